//! The spectral locus in Oklab.
//!
//! This module projects the CIE 1931 standard observer into Oklab. Each
//! observer sample's tristimulus values are converted to Oklab, and the a/b
//! coordinates are divided by lightness, which places the locus on the `L = 1`
//! plane. The line of purples closes the curve, running from the red end back
//! to the violet end. Together, locus and purples form the *ghost*, the
//! outline of all physically possible chromaticities in Oklab.
//!
//! Walking along the ghost from violet to red and back through the purples,
//! hue should strictly decrease, i.e., the curve should run clockwise.
//! [`assert_clockwise`] checks that property. It does not allow for the one
//! place where hue necessarily wraps around from just above 0º to just below
//! 360º, so the complete ghost always fails the check. Splitting the points at
//! the wrap yields two runs that pass.
//!
//! By default, the locus covers every sample of the observer table. Beyond
//! 700nm, the table's chromaticities are constant within their precision and
//! hue jitters instead of decreasing, so the full locus fails the check well
//! before the wrap. [`SpectralLocus::with_range`] with [`VISIBLE_RANGE`]
//! restricts the locus to the wavelengths where hue does decrease.

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use std::ops::RangeInclusive;

use crate::core::{hue_degrees, xyz_to_oklab};
use crate::error::{InvalidInputError, NonMonotonicHueError};
use crate::Float;

pub use crate::cie::CIE_OBSERVER_2DEG_1931;

/// The wavelengths for which the locus has strictly decreasing hue.
///
/// Beyond 700nm, the chromaticity of the 1931 observer is constant within the
/// precision of its table and hue no longer decreases.
pub const VISIBLE_RANGE: RangeInclusive<usize> = 380..=700;

/// The default number of points on the line of purples.
pub const PURPLE_SEGMENTS: usize = 100;

// ====================================================================================================================

/// A standard observer at fixed wavelength resolution.
///
/// The CIE's standard observers, or color matching functions, model human color
/// perception. Since humans are trichromatic, the per-wavelength values of
/// standard observers are triples of floating point numbers.
#[cfg_attr(feature = "pyffi", pyclass(frozen, module = "okgamut"))]
#[derive(Clone, Debug)]
pub struct Observer {
    label: &'static str,
    start: usize,
    step: usize,
    checksum: [Float; 3],
    data: &'static [[Float; 3]],
}

impl Observer {
    /// Create a new observer.
    ///
    /// The first entry of `data` is for wavelength `start`, and each
    /// subsequent entry is `step` nanometers further along.
    pub const fn new(
        label: &'static str,
        start: usize,
        step: usize,
        checksum: [Float; 3],
        data: &'static [[Float; 3]],
    ) -> Self {
        Self {
            label,
            start,
            step,
            checksum,
            data,
        }
    }

    /// Get an iterator over this observer's samples in increasing wavelength
    /// order.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = SpectralSample> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(index, xyz)| SpectralSample {
                wavelength: (self.start + index * self.step) as Float,
                xyz: *xyz,
            })
    }

    /// Get the index for the given wavelength.
    fn index_of(&self, wavelength: usize) -> Option<usize> {
        if wavelength < self.start || (wavelength - self.start) % self.step != 0 {
            return None;
        }

        let index = (wavelength - self.start) / self.step;
        if index < self.data.len() {
            Some(index)
        } else {
            None
        }
    }
}

#[cfg_attr(feature = "pyffi", pymethods)]
impl Observer {
    /// Get a descriptive label for this observer.
    #[inline]
    pub fn label(&self) -> String {
        self.label.to_string()
    }

    /// Get this observer's starting wavelength.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get this observer's ending wavelength, i.e., the last wavelength plus
    /// one step.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.step * self.data.len()
    }

    /// Get this observer's step between samples in nanometers.
    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    /// Determine whether this observer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Determine the number of entries for this observer.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Get this observer's value for the given wavelength.
    ///
    /// Wavelengths between samples have no value.
    #[inline]
    pub fn at(&self, wavelength: usize) -> Option<[Float; 3]> {
        self.index_of(wavelength).map(|index| self.data[index])
    }

    /// Get this observer's checksum, the componentwise sum of all entries.
    #[inline]
    pub fn checksum(&self) -> [Float; 3] {
        self.checksum
    }

    /// Get the number of entries. <i class=python-only>Python only!</i>
    #[cfg(feature = "pyffi")]
    pub fn __len__(&self) -> usize {
        self.data.len()
    }

    /// Get a debug representation. <i class=python-only>Python only!</i>
    #[cfg(feature = "pyffi")]
    pub fn __repr__(&self) -> String {
        format!(
            "Observer({}, {}..{} by {})",
            self.label,
            self.start,
            self.end(),
            self.step
        )
    }
}

/// A sample of a standard observer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpectralSample {
    /// The wavelength in nanometers.
    pub wavelength: Float,
    /// The tristimulus values.
    pub xyz: [Float; 3],
}

// ====================================================================================================================

/// A point on the ghost.
///
/// Points on the spectral locus carry their wavelength, points on the line of
/// purples don't.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, get_all, frozen, module = "okgamut")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocusPoint {
    /// The wavelength in nanometers, if the point is on the spectral locus.
    pub wavelength: Option<Float>,
    /// The a coordinate on the `L = 1` plane.
    pub a: Float,
    /// The b coordinate on the `L = 1` plane.
    pub b: Float,
}

impl LocusPoint {
    /// Convert the XYZ coordinates to a point on the `L = 1` plane.
    fn from_xyz(wavelength: Option<Float>, xyz: &[Float; 3]) -> Self {
        let [l, a, b] = xyz_to_oklab(xyz);
        Self {
            wavelength,
            a: a / l,
            b: b / l,
        }
    }
}

#[cfg_attr(feature = "pyffi", pymethods)]
impl LocusPoint {
    #[cfg(feature = "pyffi")]
    #[new]
    #[pyo3(signature = (a, b, wavelength=None))]
    pub fn py_new(a: Float, b: Float, wavelength: Option<Float>) -> Self {
        Self { wavelength, a, b }
    }

    /// Get this point's hue in degrees `0..360`.
    pub fn hue(&self) -> Float {
        hue_degrees(self.a, self.b)
    }

    /// Get a debug representation. <i class=python-only>Python only!</i>
    #[cfg(feature = "pyffi")]
    pub fn __repr__(&self) -> String {
        format!("{:?}", self)
    }
}

impl std::fmt::Display for LocusPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.wavelength {
            Some(wavelength) => write!(f, "{}nm ({:.5}, {:.5})", wavelength, self.a, self.b),
            None => write!(f, "purple ({:.5}, {:.5})", self.a, self.b),
        }
    }
}

// ====================================================================================================================

/// The spectral locus for a range of an observer's wavelengths.
#[derive(Clone, Debug)]
pub struct SpectralLocus<'a> {
    observer: &'a Observer,
    first: usize,
    last: usize,
}

impl SpectralLocus<'static> {
    /// Get the spectral locus of the CIE 1931 2º standard observer, covering
    /// all of its samples.
    pub fn cie1931() -> Self {
        let observer = &CIE_OBSERVER_2DEG_1931;
        Self {
            observer,
            first: 0,
            last: observer.len().saturating_sub(1),
        }
    }
}

impl<'a> SpectralLocus<'a> {
    /// Create a spectral locus for the given observer and wavelengths.
    ///
    /// Both ends of the range must be sampled wavelengths, and the range must
    /// cover at least two samples.
    pub fn with_range(
        observer: &'a Observer,
        range: RangeInclusive<usize>,
    ) -> Result<Self, InvalidInputError> {
        let expected = observer.start()..=observer.end().saturating_sub(observer.step());
        let index_of = |wavelength: usize| {
            observer
                .index_of(wavelength)
                .ok_or_else(|| InvalidInputError::OutOfRange {
                    what: "wavelength",
                    value: wavelength,
                    expected: expected.clone(),
                })
        };

        let first = index_of(*range.start())?;
        let last = index_of(*range.end())?;
        if last <= first {
            return Err(InvalidInputError::TooSmall {
                what: "number of locus samples",
                value: (last + 1).saturating_sub(first),
                minimum: 2,
            });
        }

        Ok(Self {
            observer,
            first,
            last,
        })
    }

    /// Get the number of points on the locus.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    /// Get an iterator over the points on the locus, from violet to red.
    pub fn points(&self) -> LocusPoints<'a> {
        LocusPoints {
            observer: self.observer,
            index: self.first,
            end: self.last + 1,
        }
    }

    /// Get an iterator over the points on the line of purples, from red to
    /// violet, excluding both ends.
    pub fn purples(&self, segments: usize) -> LineOfPurples {
        LineOfPurples {
            red: self.observer.data[self.last],
            violet: self.observer.data[self.first],
            segments,
            index: 1,
        }
    }

    /// Get an iterator over the ghost, the locus followed by the line of
    /// purples with [`PURPLE_SEGMENTS`] points.
    pub fn ghost(&self) -> Ghost<'a> {
        self.points().chain(self.purples(PURPLE_SEGMENTS))
    }

    /// Get the xy chromaticities of the locus.
    pub fn horseshoe(&self) -> Vec<(Float, Float)> {
        self.observer.data[self.first..=self.last]
            .iter()
            .map(|[x, y, z]| {
                let sum = x + y + z;
                (x / sum, y / sum)
            })
            .collect()
    }
}

/// An iterator over the points of the spectral locus.
#[derive(Clone, Debug)]
pub struct LocusPoints<'a> {
    observer: &'a Observer,
    index: usize,
    end: usize,
}

impl Iterator for LocusPoints<'_> {
    type Item = LocusPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.end <= self.index {
            return None;
        }

        let index = self.index;
        self.index += 1;

        let wavelength = (self.observer.start + index * self.observer.step) as Float;
        Some(LocusPoint::from_xyz(
            Some(wavelength),
            &self.observer.data[index],
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end.saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl std::iter::ExactSizeIterator for LocusPoints<'_> {}

impl std::iter::FusedIterator for LocusPoints<'_> {}

/// An iterator over the points on the line of purples.
///
/// The points are evenly spaced in XYZ, at ratios `i / (segments + 1)` for
/// `i` in `1..=segments` from the red end to the violet end.
#[derive(Clone, Debug)]
pub struct LineOfPurples {
    red: [Float; 3],
    violet: [Float; 3],
    segments: usize,
    index: usize,
}

impl Iterator for LineOfPurples {
    type Item = LocusPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.segments < self.index {
            return None;
        }

        let ratio = self.index as Float / (self.segments + 1) as Float;
        self.index += 1;

        let [r1, r2, r3] = self.red;
        let [v1, v2, v3] = self.violet;
        let xyz = [
            ratio.mul_add(v1 - r1, r1),
            ratio.mul_add(v2 - r2, r2),
            ratio.mul_add(v3 - r3, r3),
        ];

        Some(LocusPoint::from_xyz(None, &xyz))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.segments + 1).saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl std::iter::ExactSizeIterator for LineOfPurples {}

impl std::iter::FusedIterator for LineOfPurples {}

/// An iterator over the ghost.
pub type Ghost<'a> = std::iter::Chain<LocusPoints<'a>, LineOfPurples>;

// ====================================================================================================================

/// Get the spectral locus of the CIE 1931 2º standard observer in Oklab.
///
/// The locus has one point per sample of the observer table. Each call returns a fresh iterator, which produces the same points.
pub fn spectral_locus_in_oklab() -> LocusPoints<'static> {
    SpectralLocus::cie1931().points()
}

/// Get the line of purples closing the spectral locus.
pub fn line_of_purples(segments: usize) -> LineOfPurples {
    SpectralLocus::cie1931().purples(segments)
}

/// Get the ghost, i.e., the spectral locus followed by the line of purples.
pub fn ghost() -> Ghost<'static> {
    SpectralLocus::cie1931().ghost()
}

/// Get the xy chromaticities of the spectral locus.
pub fn horseshoe() -> Vec<(Float, Float)> {
    SpectralLocus::cie1931().horseshoe()
}

/// Assert that the points are arranged clockwise.
///
/// This function checks that the hue of each point is strictly smaller than
/// the hue of the point before. Since hue is normalized to `0..360`, a curve
/// that winds all the way around the origin fails this check where hue wraps
/// around.
pub fn assert_clockwise<I>(points: I) -> Result<(), NonMonotonicHueError>
where
    I: IntoIterator<Item = LocusPoint>,
{
    let mut points = points.into_iter();
    let mut previous = match points.next() {
        Some(point) => point,
        None => return Ok(()),
    };
    let mut previous_hue = previous.hue();

    for (index, point) in points.enumerate() {
        let hue = point.hue();
        if previous_hue <= hue {
            return Err(NonMonotonicHueError::new(previous, point, index + 1));
        }

        previous = point;
        previous_hue = hue;
    }

    Ok(())
}

// ====================================================================================================================
