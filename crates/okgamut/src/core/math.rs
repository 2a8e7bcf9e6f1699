#[cfg(test)]
use crate::Float;

/// An extension trait for floating point numbers.
///
/// For now, this trait exists solely to pre-compute the rounding factor for
/// equality comparisons, which depends on the floating point representation.
pub(crate) trait FloatExt {
    /// The factor determining rounding precision.
    const ROUNDING_FACTOR: Self;
}

impl FloatExt for f64 {
    const ROUNDING_FACTOR: f64 = 1e12;
}

impl FloatExt for f32 {
    const ROUNDING_FACTOR: f32 = 1e4;
}

// --------------------------------------------------------------------------------------------------------------------

/// A compensated sum.
///
/// This struct uses [Kahan's algorithm with Neumaier's
/// improvements](https://en.wikipedia.org/wiki/Kahan_summation_algorithm) to
/// keep the cumulative error of long sums small.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct Sum {
    sum: Float,
    compensation: Float,
}

#[cfg(test)]
impl Sum {
    /// Create a new, zero sum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current value.
    #[inline]
    pub fn value(&self) -> Float {
        self.sum + self.compensation
    }
}

#[cfg(test)]
impl std::ops::AddAssign<Float> for Sum {
    fn add_assign(&mut self, rhs: Float) {
        let t = self.sum + rhs;
        if rhs.abs() < self.sum.abs() {
            self.compensation += (self.sum - t) + rhs;
        } else {
            self.compensation += (rhs - t) + self.sum;
        }
        self.sum = t;
    }
}
