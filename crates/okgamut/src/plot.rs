//! Sweeping lightness at constant chroma and hue.

use crate::core::{clip, linear_srgb_to_oklab, linear_to_gamma_srgb, to_24bit};
use crate::error::InvalidInputError;
use crate::{Float, GamutMapper, GamutPolicy};

/// A sample of a lightness sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepSample {
    /// The requested lightness.
    pub target: Float,
    /// Whether the requested color was in gamut.
    pub in_gamut: bool,
    /// The displayed color after mapping, gamma encoding, and quantization.
    pub rgb: [u8; 3],
    /// The Oklab lightness of the displayed color before quantization.
    pub lightness: Float,
}

/// An iterator sweeping lightness from 0 to 1.
///
/// Each sample has the same chroma and hue, with lightness `x / (samples - 1)`
/// for the `x`-th sample. Plotting [`SweepSample::lightness`] against
/// [`SweepSample::target`] shows how much a gamut policy distorts lightness.
#[derive(Debug)]
pub struct LightnessSweep {
    mapper: GamutMapper,
    a: Float,
    b: Float,
    samples: usize,
    index: usize,
}

impl LightnessSweep {
    /// Create a new lightness sweep.
    ///
    /// # Errors
    ///
    /// This function fails if chroma or hue are not finite or if there are
    /// fewer than two samples.
    pub fn new(
        chroma: Float,
        hue: Float,
        policy: GamutPolicy,
        samples: usize,
    ) -> Result<Self, InvalidInputError> {
        InvalidInputError::check_finite("chroma and hue", &[chroma, hue])?;
        if samples < 2 {
            return Err(InvalidInputError::TooSmall {
                what: "number of samples",
                value: samples,
                minimum: 2,
            });
        }

        let (sin, cos) = hue.to_radians().sin_cos();
        Ok(Self {
            mapper: GamutMapper::new(policy),
            a: chroma * cos,
            b: chroma * sin,
            samples,
            index: 0,
        })
    }
}

impl Iterator for LightnessSweep {
    type Item = SweepSample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.samples <= self.index {
            return None;
        }

        let target = self.index as Float / (self.samples - 1) as Float;
        self.index += 1;

        let mapping = self.mapper.map_finite(&[target, self.a, self.b]);
        let rgb = to_24bit(&linear_to_gamma_srgb(&mapping.linear_srgb));
        let lightness = linear_srgb_to_oklab(&clip(&mapping.linear_srgb))[0];

        Some(SweepSample {
            target,
            in_gamut: mapping.was_in_gamut,
            rgb,
            lightness,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.samples - self.index;
        (remaining, Some(remaining))
    }
}

impl std::iter::ExactSizeIterator for LightnessSweep {}

impl std::iter::FusedIterator for LightnessSweep {}

#[cfg(test)]
mod test {
    use super::*;

    fn sweep(chroma: Float, hue: Float, policy: GamutPolicy, samples: usize) -> LightnessSweep {
        match LightnessSweep::new(chroma, hue, policy, samples) {
            Ok(sweep) => sweep,
            Err(error) => panic!("{}", error),
        }
    }

    #[test]
    fn test_red_under_clip() {
        let samples: Vec<_> = sweep(0.4, 0.0, GamutPolicy::Clip, 101).collect();
        assert_eq!(samples.len(), 101);

        // At this much chroma, no lightness is in gamut.
        assert!(samples.iter().all(|s| !s.in_gamut));

        assert_eq!(samples[0].target, 0.0);
        assert_eq!(samples[0].rgb, [39, 0, 0]);
        assert!(samples[0].rgb.iter().all(|c| *c < 64));

        assert_eq!(samples[50].target, 0.5);
        assert_eq!(samples[50].rgb, [239, 0, 90]);
        let [r, g, b] = samples[50].rgb;
        assert!(g < r && b < r);

        assert_eq!(samples[100].target, 1.0);
        assert_eq!(samples[100].rgb, [255, 37, 244]);
    }

    #[test]
    fn test_lightness() {
        // Grays are in gamut and keep their lightness.
        for sample in sweep(0.0, 0.0, GamutPolicy::BisectChroma, 11).take(10) {
            assert!(sample.in_gamut);
            assert!((sample.lightness - sample.target).abs() < 1e-9);
        }

        // Clipping distorts lightness.
        let samples: Vec<_> = sweep(0.4, 0.0, GamutPolicy::Clip, 11).collect();
        assert!(samples.iter().any(|s| 0.05 < (s.lightness - s.target).abs()));
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(
            LightnessSweep::new(0.1, 0.0, GamutPolicy::Clip, 1),
            Err(InvalidInputError::TooSmall { value: 1, .. })
        ));
        assert!(matches!(
            LightnessSweep::new(Float::INFINITY, 0.0, GamutPolicy::Clip, 10),
            Err(InvalidInputError::NotFinite { .. })
        ));

        let mut sweep = sweep(0.1, 30.0, GamutPolicy::ConeClamp, 3);
        assert_eq!(sweep.len(), 3);
        sweep.next();
        assert_eq!(sweep.len(), 2);
    }
}
