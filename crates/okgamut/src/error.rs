//! Utility module with okgamut's errors.

#[cfg(feature = "pyffi")]
use pyo3::{exceptions::PyValueError, prelude::*};

use crate::spectrum::LocusPoint;
use crate::Float;

/// An invalid input error.
///
/// This error indicates a numeric input that the computation cannot accept,
/// such as a not-a-number coordinate or a raster too small to span its
/// axes. Each variant names what the value was for.
#[derive(Clone, Debug, PartialEq)]
pub enum InvalidInputError {
    /// A coordinate or parameter that is not-a-number or infinite.
    NotFinite { what: &'static str, value: Float },
    /// A size below the required minimum.
    TooSmall {
        what: &'static str,
        value: usize,
        minimum: usize,
    },
    /// A parameter that must be strictly positive but isn't.
    NotPositive { what: &'static str, value: Float },
    /// A wavelength or index that is not available.
    OutOfRange {
        what: &'static str,
        value: usize,
        expected: std::ops::RangeInclusive<usize>,
    },
}

impl InvalidInputError {
    /// Check that all coordinates are finite.
    pub(crate) fn check_finite(what: &'static str, coordinates: &[Float]) -> Result<(), Self> {
        match coordinates.iter().find(|c| !c.is_finite()) {
            Some(value) => Err(Self::NotFinite {
                what,
                value: *value,
            }),
            None => Ok(()),
        }
    }
}

impl std::fmt::Display for InvalidInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use InvalidInputError::*;

        match self {
            NotFinite { what, value } => {
                write!(f, "{} should be finite but has {}", what, value)
            }
            TooSmall {
                what,
                value,
                minimum,
            } => write!(f, "{} should be at least {} but is {}", what, minimum, value),
            NotPositive { what, value } => {
                write!(f, "{} should be positive but is {}", what, value)
            }
            OutOfRange {
                what,
                value,
                expected,
            } => write!(
                f,
                "{} should be a sample in {}..={} but is {}",
                what,
                expected.start(),
                expected.end(),
                value
            ),
        }
    }
}

impl std::error::Error for InvalidInputError {}

#[cfg(feature = "pyffi")]
impl From<InvalidInputError> for PyErr {
    fn from(value: InvalidInputError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}

// ====================================================================================================================

/// A violation of the clockwise ordering of hues.
///
/// Points along the spectral locus, followed by the line of purples, should
/// have strictly decreasing hues. This error names the first pair of
/// consecutive points that does not, as well as the index of the offending
/// point.
#[derive(Clone, Debug, PartialEq)]
pub struct NonMonotonicHueError {
    previous: LocusPoint,
    offending: LocusPoint,
    index: usize,
}

impl NonMonotonicHueError {
    /// Create a new non-monotonic hue error.
    pub fn new(previous: LocusPoint, offending: LocusPoint, index: usize) -> Self {
        Self {
            previous,
            offending,
            index,
        }
    }

    /// Get the point before the offending one.
    pub fn previous(&self) -> LocusPoint {
        self.previous
    }

    /// Get the offending point.
    pub fn offending(&self) -> LocusPoint {
        self.offending
    }

    /// Get the hues of the previous and offending points in degrees.
    pub fn hues(&self) -> (Float, Float) {
        (self.previous.hue(), self.offending.hue())
    }

    /// Get the offending point's index.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl std::fmt::Display for NonMonotonicHueError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (h1, h2) = self.hues();
        write!(
            f,
            "hue should decrease from {} with {:.3}º but point {} at {} has {:.3}º",
            self.previous, h1, self.index, self.offending, h2
        )
    }
}

impl std::error::Error for NonMonotonicHueError {}

#[cfg(feature = "pyffi")]
impl From<NonMonotonicHueError> for PyErr {
    fn from(value: NonMonotonicHueError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}

// ====================================================================================================================

/// An unsupported gamut policy.
///
/// This error carries the string that failed to parse as a
/// [`GamutPolicy`](crate::GamutPolicy).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsupportedGamutPolicyError {
    pub value: String,
}

impl std::fmt::Display for UnsupportedGamutPolicyError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "gamut policy should be `clip`, `chroma`, or `cone` but is `{}`",
            self.value
        )
    }
}

impl std::error::Error for UnsupportedGamutPolicyError {}

#[cfg(feature = "pyffi")]
impl From<UnsupportedGamutPolicyError> for PyErr {
    fn from(value: UnsupportedGamutPolicyError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}
