//! # okgamut
//!
//! Okgamut maps Oklab colors into sRGB and traces the limits of human vision in
//! Oklab.
#![cfg_attr(
    not(feature = "pyffi"),
    doc = " This version of the API documentation **covers native Rust interfaces
only**. Enabling the `pyffi` feature adds Python integration. "
)]
#![cfg_attr(
    feature = "pyffi",
    doc = " This version of the API documentation **covers both Rust and Python
interfaces**. "
)]
//!
//!
//! ## 1. Conversions
//!
//! The crate converts between CIE XYZ, [Oklab](https://bottosson.github.io/posts/oklab/),
//! linear sRGB, and gamma-encoded sRGB with [`xyz_to_oklab`],
//! [`oklab_to_linear_srgb`], [`linear_to_gamma_srgb`], and friends. All of
//! them operate on three-element arrays of [`Float`] and are defined for all
//! finite inputs, including the coordinates of imaginary colors. Gamma
//! encoding uses a pure power function with exponent 2.2, which is close to
//! but not the same as sRGB's official transfer function.
//!
//!
//! ## 2. Gamut Mapping
//!
//! Linear sRGB coordinates are in gamut if they lie in the closed unit cube,
//! as determined by [`in_gamut`]. A [`GamutMapper`] corrects out-of-gamut
//! Oklab colors with one of three [`GamutPolicy`]s:
//!
//! ```
//! # use okgamut::{GamutMapper, GamutPolicy, in_gamut};
//! let mapper = GamutMapper::new(GamutPolicy::BisectChroma);
//! let mapping = mapper.map([0.7, 0.1, 0.0])?;
//! assert!(mapping.was_in_gamut);
//!
//! let mapping = mapper.map([0.7, 0.4, 0.0])?;
//! assert!(!mapping.was_in_gamut);
//! assert!(mapping.oklab[1] < 0.4);
//! # Ok::<(), okgamut::error::InvalidInputError>(())
//! ```
//!
//! Cone clamping relies on [`max_chroma_for_hue`], which determines the
//! maximum chroma at lightness 1 before linear sRGB turns negative.
//! [`ChromaLimitTable`] caches that function for evenly spaced hues.
//!
//!
//! ## 3. The Spectral Locus
//!
//! The [`spectrum`] module projects the CIE 1931 standard observer onto the
//! `L = 1` plane of Oklab and closes the curve with the line of purples. The
//! result, the *ghost*, should run clockwise, which [`assert_clockwise`]
//! checks.
//!
//!
//! ## 4. Slices and Sweeps
//!
//! [`Slice`] renders a constant-hue raster of lightness against chroma into
//! RGBA bytes, optionally highlighting out-of-gamut pixels and drawing the
//! chroma limit. [`LightnessSweep`] samples lightness at constant chroma and
//! hue. Both are configured through plain values or, for slices, the builder
//! in [`opt`].
//!
//!
//! ## 5. Optional Features
//!
//!   - **`f64`** selects the eponymous type as floating point type [`Float`]
//!     and `u64` as [`Bits`] instead of `f32` as [`Float`] and `u32` as
//!     [`Bits`]. This feature is enabled by default.
//!   - **`pyffi`** controls okgamut's Python integration through
//!     [PyO3](https://pyo3.rs/). This feature is disabled by default.

/// The floating point type in use.
#[cfg(feature = "f64")]
pub type Float = f64;
/// The floating point type in use.
#[cfg(not(feature = "f64"))]
pub type Float = f32;

/// [`Float`]'s bits.
#[cfg(feature = "f64")]
pub type Bits = u64;
/// [`Float`]'s bits.
#[cfg(not(feature = "f64"))]
pub type Bits = u32;

mod chroma;
mod cie;
mod core;
pub mod error;
mod mapper;
pub mod opt;
mod plot;
mod slice;
pub mod spectrum;
mod util;

#[doc(hidden)]
pub use core::to_eq_bits;

pub use chroma::{max_chroma_for_hue, ChromaLimitTable};
pub use core::{
    clip, in_gamut, linear_srgb_to_oklab, linear_srgb_to_xyz, linear_to_gamma_srgb,
    oklab_to_linear_srgb, oklab_to_oklch, oklch_to_oklab, to_24bit, xyz_to_linear_srgb,
    xyz_to_oklab, BisectionStep, ChromaBisection, BISECTION_STEPS, SIMPLE_SRGB_GAMMA,
};
pub use mapper::{cone_clamp, GamutMapper, GamutMapping, GamutPolicy};
pub use plot::{LightnessSweep, SweepSample};
pub use slice::{Slice, SliceImage};
pub use spectrum::{assert_clockwise, ghost, line_of_purples, spectral_locus_in_oklab, LocusPoint};

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

#[cfg(feature = "pyffi")]
mod py {
    use pyo3::prelude::*;

    use crate::{Float, GamutMapper, GamutMapping, GamutPolicy, LocusPoint};

    /// Convert XYZ to Oklab. <i class=python-only>Python only!</i>
    #[pyfunction]
    pub fn xyz_to_oklab(xyz: [Float; 3]) -> [Float; 3] {
        crate::xyz_to_oklab(&xyz)
    }

    /// Convert Oklab to linear sRGB. <i class=python-only>Python only!</i>
    #[pyfunction]
    pub fn oklab_to_linear_srgb(oklab: [Float; 3]) -> [Float; 3] {
        crate::oklab_to_linear_srgb(&oklab)
    }

    /// Gamma-encode linear sRGB. <i class=python-only>Python only!</i>
    #[pyfunction]
    pub fn linear_to_gamma_srgb(rgb: [Float; 3]) -> [Float; 3] {
        crate::linear_to_gamma_srgb(&rgb)
    }

    /// Determine whether linear sRGB is in gamut. <i
    /// class=python-only>Python only!</i>
    #[pyfunction]
    pub fn in_gamut(rgb: [Float; 3]) -> bool {
        crate::in_gamut(&rgb)
    }

    /// Map Oklab into sRGB with the given policy. <i
    /// class=python-only>Python only!</i>
    #[pyfunction]
    pub fn map_to_gamut(policy: GamutPolicy, oklab: [Float; 3]) -> PyResult<GamutMapping> {
        Ok(GamutMapper::new(policy).map(oklab)?)
    }

    /// Get the ghost's points. <i class=python-only>Python only!</i>
    #[pyfunction]
    pub fn ghost() -> Vec<LocusPoint> {
        crate::ghost().collect()
    }

    /// Get the xy chromaticities of the spectral locus. <i
    /// class=python-only>Python only!</i>
    #[pyfunction]
    pub fn horseshoe() -> Vec<(Float, Float)> {
        crate::spectrum::horseshoe()
    }

    /// Check that the points run clockwise. <i class=python-only>Python
    /// only!</i>
    #[pyfunction]
    pub fn assert_clockwise(points: Vec<LocusPoint>) -> PyResult<()> {
        Ok(crate::assert_clockwise(points)?)
    }
}

#[doc(hidden)]
#[cfg(feature = "pyffi")]
#[pymodule]
pub fn okgamut(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py::xyz_to_oklab, m)?)?;
    m.add_function(wrap_pyfunction!(py::oklab_to_linear_srgb, m)?)?;
    m.add_function(wrap_pyfunction!(py::linear_to_gamma_srgb, m)?)?;
    m.add_function(wrap_pyfunction!(py::in_gamut, m)?)?;
    m.add_function(wrap_pyfunction!(py::map_to_gamut, m)?)?;
    m.add_function(wrap_pyfunction!(py::ghost, m)?)?;
    m.add_function(wrap_pyfunction!(py::horseshoe, m)?)?;
    m.add_function(wrap_pyfunction!(py::assert_clockwise, m)?)?;
    m.add_function(wrap_pyfunction!(max_chroma_for_hue, m)?)?;

    m.add_class::<BisectionStep>()?;
    m.add_class::<ChromaLimitTable>()?;
    m.add_class::<GamutMapper>()?;
    m.add_class::<GamutMapping>()?;
    m.add_class::<GamutPolicy>()?;
    m.add_class::<LocusPoint>()?;
    m.add_class::<spectrum::Observer>()?;
    m.add("CIE_OBSERVER_2DEG_1931", spectrum::CIE_OBSERVER_2DEG_1931.clone())?;

    Ok(())
}
