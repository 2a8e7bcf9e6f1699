#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::core::conversion::oklab_to_linear_srgb;
use crate::Float;

/// Determine whether the linear sRGB coordinates are in gamut.
///
/// The gamut is the closed unit cube, so 0 and 1 are in gamut. Since every
/// comparison with not-a-number fails, not-a-number is out of gamut.
pub fn in_gamut(coordinates: &[Float; 3]) -> bool {
    coordinates.iter().all(|c| 0.0 <= *c && *c <= 1.0)
}

/// Clip the linear sRGB coordinates to the unit cube.
pub fn clip(coordinates: &[Float; 3]) -> [Float; 3] {
    let [r, g, b] = coordinates;
    [r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0)]
}

/// The number of midpoints evaluated by chroma bisection.
pub const BISECTION_STEPS: usize = 10;

// ====================================================================================================================

/// A step of chroma bisection.
///
/// Each step evaluates the midpoint `scale` of the current bracket, where
/// `lower` is known to be in gamut (or is zero) and `upper` is known to be out
/// of gamut (or is one). The step's `oklab` coordinates hold the original
/// lightness and the a/b coordinates multiplied by `scale`.
#[cfg_attr(
    feature = "pyffi",
    pyclass(get_all, frozen, module = "okgamut")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BisectionStep {
    /// The bracket's lower bound.
    pub lower: Float,
    /// The bracket's upper bound.
    pub upper: Float,
    /// The evaluated midpoint.
    pub scale: Float,
    /// The Oklab coordinates at the midpoint.
    pub oklab: [Float; 3],
    /// The linear sRGB coordinates at the midpoint.
    pub linear_srgb: [Float; 3],
    /// Whether the midpoint is in gamut.
    pub in_gamut: bool,
}

/// An iterator over the steps of chroma bisection.
///
/// This iterator performs a binary search for the factor `s ∈ [0, 1]`, which
/// is applied to the a/b coordinates of an Oklab color while holding its
/// lightness fixed. The search always takes exactly [`BISECTION_STEPS`] steps.
/// Its result is the color at the last midpoint, *not* the lower bound. As a
/// consequence, that color may still be marginally out of gamut.
#[derive(Debug)]
pub struct ChromaBisection {
    oklab: [Float; 3],
    lower: Float,
    upper: Float,
    remaining: usize,
}

impl ChromaBisection {
    /// Create a new chroma bisection for the Oklab coordinates.
    pub fn new(oklab: &[Float; 3]) -> Self {
        Self {
            oklab: *oklab,
            lower: 0.0,
            upper: 1.0,
            remaining: BISECTION_STEPS,
        }
    }

    /// Run the bisection to completion, returning the last step.
    ///
    /// Since the bisection always has at least one step, the result is
    /// guaranteed to exist.
    pub fn run(self) -> BisectionStep {
        let oklab = self.oklab;
        self.last().unwrap_or_else(|| BisectionStep {
            lower: 0.0,
            upper: 1.0,
            scale: 1.0,
            oklab,
            linear_srgb: oklab_to_linear_srgb(&oklab),
            in_gamut: false,
        })
    }
}

impl Iterator for ChromaBisection {
    type Item = BisectionStep;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let [l, a, b] = self.oklab;
        let scale = (self.lower + self.upper) / 2.0;
        let oklab = [l, a * scale, b * scale];
        let linear_srgb = oklab_to_linear_srgb(&oklab);
        let in_gamut = in_gamut(&linear_srgb);

        let step = BisectionStep {
            lower: self.lower,
            upper: self.upper,
            scale,
            oklab,
            linear_srgb,
            in_gamut,
        };

        if in_gamut {
            self.lower = scale;
        } else {
            self.upper = scale;
        }

        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl std::iter::ExactSizeIterator for ChromaBisection {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl std::iter::FusedIterator for ChromaBisection {}

// ====================================================================================================================
