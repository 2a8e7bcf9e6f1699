//! The maximum chroma for each hue.
//!
//! Since Oklab's cube root commutes with uniform scaling of LMS, Oklab colors
//! `(L, L·a', L·b')` with the same `a'` and `b'` differ in linear sRGB by the
//! factor `L³` only. Hence the colors with non-negative linear sRGB
//! components form a cone through black, and that cone is fully described by
//! its cross-section at `L = 1`. [`max_chroma_for_hue`] computes the radius of
//! that cross-section for a given hue, and [`ChromaLimitTable`] caches it for
//! evenly spaced hues.

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use std::num::NonZeroUsize;

use crate::core::oklab_to_linear_srgb;
#[cfg(feature = "pyffi")]
use crate::error::InvalidInputError;
use crate::Float;

const MARCH_STEP: Float = 1.0 / 64.0;
const MARCH_BOUND: Float = 2.0;
const SEARCH_STEPS: usize = 48;

fn is_nonnegative(cos: Float, sin: Float, chroma: Float) -> bool {
    oklab_to_linear_srgb(&[1.0, chroma * cos, chroma * sin])
        .iter()
        .all(|c| 0.0 <= *c)
}

/// Determine the maximum chroma for the given hue in degrees.
///
/// This function returns the chroma `C` at which the Oklab color `(1, C·cos h,
/// C·sin h)` first has a negative linear sRGB component. Near the blue
/// primary at roughly 264º, the ray leaves and re-enters the non-negative
/// region, so a plain bisection over the full range may find the wrong
/// crossing. Instead, this function first marches outwards in steps of 1/64 to
/// bracket the first crossing and then bisects that bracket. If there is no
/// crossing before chroma 2, the result is 2.
///
/// The limit is positive for all hues. It is continuous, except for a jump
/// near the blue primary, where the binding face of the sRGB cube changes.
#[cfg_attr(feature = "pyffi", pyfunction)]
pub fn max_chroma_for_hue(hue: Float) -> Float {
    let (sin, cos) = hue.to_radians().sin_cos();

    let mut lower = 0.0;
    let mut upper;
    loop {
        upper = lower + MARCH_STEP;
        if MARCH_BOUND < upper {
            return MARCH_BOUND;
        } else if !is_nonnegative(cos, sin, upper) {
            break;
        }
        lower = upper;
    }

    for _ in 0..SEARCH_STEPS {
        let middle = (lower + upper) / 2.0;
        if is_nonnegative(cos, sin, middle) {
            lower = middle;
        } else {
            upper = middle;
        }
    }

    lower
}

// ====================================================================================================================

/// A table of precomputed chroma limits.
///
/// The table holds the result of [`max_chroma_for_hue`] for `resolution`
/// evenly spaced hues starting at 0º. Lookups interpolate linearly between
/// neighboring entries and wrap around at 360º.
#[cfg_attr(feature = "pyffi", pyclass(frozen, module = "okgamut"))]
#[derive(Clone, Debug)]
pub struct ChromaLimitTable {
    limits: Vec<Float>,
}

impl ChromaLimitTable {
    /// Create a new table with the given number of entries.
    pub fn new(resolution: NonZeroUsize) -> Self {
        let count = resolution.get();
        let limits = (0..count)
            .map(|index| max_chroma_for_hue(index as Float * 360.0 / count as Float))
            .collect();

        Self { limits }
    }
}

impl Default for ChromaLimitTable {
    /// Create a new table with one entry per degree.
    fn default() -> Self {
        Self::new(NonZeroUsize::MIN.saturating_add(359))
    }
}

#[cfg_attr(feature = "pyffi", pymethods)]
impl ChromaLimitTable {
    #[cfg(feature = "pyffi")]
    #[new]
    #[pyo3(signature = (resolution=None))]
    pub fn py_new(resolution: Option<usize>) -> Result<Self, InvalidInputError> {
        match resolution {
            Some(resolution) => NonZeroUsize::new(resolution).map(Self::new).ok_or(
                InvalidInputError::TooSmall {
                    what: "table resolution",
                    value: resolution,
                    minimum: 1,
                },
            ),
            None => Ok(Self::default()),
        }
    }

    /// Get the number of entries.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.limits.len()
    }

    /// Get the maximum chroma for the given hue in degrees.
    ///
    /// Since the chroma limit jumps near the blue primary, interpolated values
    /// in that neighborhood are coarser than elsewhere.
    pub fn at(&self, hue: Float) -> Float {
        let count = self.limits.len();
        let position = hue.rem_euclid(360.0) * count as Float / 360.0;
        if !position.is_finite() {
            return Float::NAN;
        }

        // rem_euclid may round up to 360.0 for tiny negative hues.
        let index = (position.floor() as usize) % count;
        let fraction = position - position.floor();
        let next = (index + 1) % count;

        let (start, end) = (self.limits[index], self.limits[next]);
        fraction.mul_add(end - start, start)
    }

    /// Get the outline of the chroma limits on the `L = 1` plane.
    ///
    /// The result has one `(a, b)` pair per entry, in order of increasing hue.
    pub fn boundary(&self) -> Vec<(Float, Float)> {
        let count = self.limits.len() as Float;
        self.limits
            .iter()
            .enumerate()
            .map(|(index, limit)| {
                let (sin, cos) = (index as Float * 360.0 / count).to_radians().sin_cos();
                (limit * cos, limit * sin)
            })
            .collect()
    }

    /// Get a debug representation. <i class=python-only>Python only!</i>
    #[cfg(feature = "pyffi")]
    pub fn __repr__(&self) -> String {
        format!("ChromaLimitTable({})", self.limits.len())
    }
}

// ====================================================================================================================
