//! Mapping out-of-gamut Oklab colors into sRGB.

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::chroma::max_chroma_for_hue;
use crate::core::{hue_degrees, in_gamut, oklab_to_linear_srgb, ChromaBisection};
use crate::error::{InvalidInputError, UnsupportedGamutPolicyError};
use crate::Float;

/// The policy for handling out-of-gamut colors.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, eq_int, frozen, hash, module = "okgamut")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GamutPolicy {
    /// Leave the linear sRGB coordinates as is and let 8-bit quantization
    /// clamp them.
    #[default]
    Clip,
    /// Reduce chroma by bisecting a scale factor for a/b in ten steps.
    BisectChroma,
    /// Limit chroma to the cone through black spanned by the hue's chroma
    /// limit.
    ConeClamp,
}

#[cfg_attr(feature = "pyffi", pymethods)]
impl GamutPolicy {
    /// Parse the policy from its name. <i class=python-only>Python only!</i>
    #[cfg(feature = "pyffi")]
    #[staticmethod]
    pub fn parse(name: &str) -> Result<Self, UnsupportedGamutPolicyError> {
        name.parse()
    }

    /// Get this policy's name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Clip => "clip",
            Self::BisectChroma => "bisect-chroma",
            Self::ConeClamp => "cone-clamp",
        }
    }

    /// Get a debug representation. <i class=python-only>Python only!</i>
    #[cfg(feature = "pyffi")]
    pub fn __repr__(&self) -> String {
        format!("GamutPolicy.{:?}", self)
    }
}

impl std::str::FromStr for GamutPolicy {
    type Err = UnsupportedGamutPolicyError;

    /// Parse a policy from either its name or the short form used by the
    /// demo's form controls, i.e., `clip`, `chroma`, or `cone`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clip" => Ok(Self::Clip),
            "chroma" | "bisect-chroma" => Ok(Self::BisectChroma),
            "cone" | "cone-clamp" => Ok(Self::ConeClamp),
            _ => Err(UnsupportedGamutPolicyError {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for GamutPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ====================================================================================================================

/// The result of gamut mapping.
#[cfg_attr(feature = "pyffi", pyclass(get_all, frozen, module = "okgamut"))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GamutMapping {
    /// The mapped Oklab coordinates.
    pub oklab: [Float; 3],
    /// The mapped linear sRGB coordinates, which may be out of gamut.
    pub linear_srgb: [Float; 3],
    /// Whether the original color was in gamut.
    pub was_in_gamut: bool,
    /// The policy used for mapping.
    pub policy: GamutPolicy,
}

/// A gamut mapper.
///
/// The mapper converts Oklab coordinates to linear sRGB and, if the result is
/// out of gamut, corrects the color according to its policy. In-gamut colors
/// are returned unchanged under every policy. None of the policies guarantees
/// an in-gamut result:
///
///   * [`GamutPolicy::Clip`] leaves out-of-gamut coordinates to be clamped
///     during 8-bit quantization;
///   * [`GamutPolicy::BisectChroma`] returns the last midpoint of a bisection
///     with a fixed number of steps, which may be marginally out of gamut;
///   * [`GamutPolicy::ConeClamp`] approximates the gamut with a cone, which
///     is imprecise near saturated primaries.
#[cfg_attr(feature = "pyffi", pyclass(frozen, module = "okgamut"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct GamutMapper {
    policy: GamutPolicy,
}

#[cfg_attr(feature = "pyffi", pymethods)]
impl GamutMapper {
    // The constructor comes twice, once for pyffi and once without, since
    // #[new] does not work inside #[cfg_attr()].

    /// Create a new gamut mapper with the given policy.
    #[cfg(feature = "pyffi")]
    #[new]
    pub const fn new(policy: GamutPolicy) -> Self {
        Self { policy }
    }

    /// Create a new gamut mapper with the given policy.
    #[cfg(not(feature = "pyffi"))]
    pub const fn new(policy: GamutPolicy) -> Self {
        Self { policy }
    }

    /// Get this mapper's policy.
    pub fn policy(&self) -> GamutPolicy {
        self.policy
    }

    /// Map the Oklab coordinates into sRGB.
    ///
    /// # Errors
    ///
    /// This method fails with an [`InvalidInputError`] if any coordinate is
    /// not-a-number or infinite.
    pub fn map(&self, oklab: [Float; 3]) -> Result<GamutMapping, InvalidInputError> {
        InvalidInputError::check_finite("Oklab coordinate", &oklab)?;
        Ok(self.map_finite(&oklab))
    }
}

impl GamutMapper {
    /// Map the finite Oklab coordinates into sRGB.
    ///
    /// Unlike [`GamutMapper::map`], this method does not validate its input.
    pub fn map_finite(&self, oklab: &[Float; 3]) -> GamutMapping {
        let linear_srgb = oklab_to_linear_srgb(oklab);
        if in_gamut(&linear_srgb) {
            return GamutMapping {
                oklab: *oklab,
                linear_srgb,
                was_in_gamut: true,
                policy: self.policy,
            };
        }

        let (oklab, linear_srgb) = match self.policy {
            GamutPolicy::Clip => (*oklab, linear_srgb),
            GamutPolicy::BisectChroma => {
                let step = ChromaBisection::new(oklab).run();
                (step.oklab, step.linear_srgb)
            }
            GamutPolicy::ConeClamp => {
                let oklab = cone_clamp(oklab);
                (oklab, oklab_to_linear_srgb(&oklab))
            }
        };

        GamutMapping {
            oklab,
            linear_srgb,
            was_in_gamut: false,
            policy: self.policy,
        }
    }
}

/// Clamp the chroma of the Oklab coordinates to the cone through black.
///
/// The cone's radius at lightness `L` is `max_chroma_for_hue(h) · L`. Colors
/// with more chroma have a/b scaled down onto the cone, all others are returned
/// unchanged. Negative lightness is treated as zero.
pub fn cone_clamp(oklab: &[Float; 3]) -> [Float; 3] {
    let [l, a, b] = *oklab;
    let limit = max_chroma_for_hue(hue_degrees(a, b)) * l.max(0.0);
    let chroma = a.hypot(b);

    if chroma > limit {
        let factor = limit / chroma;
        [l, a * factor, b * factor]
    } else {
        *oklab
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::{linear_srgb_to_oklab, oklch_to_oklab, ChromaBisection};

    const POLICIES: [GamutPolicy; 3] = [
        GamutPolicy::Clip,
        GamutPolicy::BisectChroma,
        GamutPolicy::ConeClamp,
    ];

    #[test]
    fn test_policy() {
        for policy in POLICIES {
            assert_eq!(policy.name().parse::<GamutPolicy>(), Ok(policy));
            assert_eq!(policy.to_string(), policy.name());
        }

        assert_eq!("chroma".parse::<GamutPolicy>(), Ok(GamutPolicy::BisectChroma));
        assert_eq!("cone".parse::<GamutPolicy>(), Ok(GamutPolicy::ConeClamp));
        assert_eq!(
            "p3".parse::<GamutPolicy>(),
            Err(UnsupportedGamutPolicyError {
                value: "p3".to_string()
            })
        );
        assert_eq!(GamutPolicy::default(), GamutPolicy::Clip);
    }

    #[test]
    fn test_mapper_new() {
        const CONE: GamutMapper = GamutMapper::new(GamutPolicy::ConeClamp);
        assert_eq!(CONE.policy(), GamutPolicy::ConeClamp);
        assert_eq!(GamutMapper::default().policy(), GamutPolicy::Clip);

        for policy in POLICIES {
            let mapping = GamutMapper::new(policy).map_finite(&[0.7, 0.4, 0.0]);
            assert_eq!(mapping.policy, policy);
        }
    }

    #[test]
    fn test_invalid_input() {
        let mapper = GamutMapper::new(GamutPolicy::ConeClamp);
        assert!(matches!(
            mapper.map([Float::NAN, 0.0, 0.0]),
            Err(InvalidInputError::NotFinite { .. })
        ));
        assert!(matches!(
            mapper.map([0.5, Float::INFINITY, 0.0]),
            Err(InvalidInputError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_in_gamut_is_unchanged() {
        let oklab = linear_srgb_to_oklab(&[0.2, 0.6, 0.4]);
        for policy in POLICIES {
            let mapping = GamutMapper::new(policy).map(oklab);
            let mapping = match mapping {
                Ok(mapping) => mapping,
                Err(error) => panic!("{}", error),
            };
            assert!(mapping.was_in_gamut);
            assert_eq!(mapping.oklab, oklab);
            assert_eq!(mapping.policy, policy);
            assert!(in_gamut(&mapping.linear_srgb));
        }
    }

    #[test]
    fn test_clip() {
        let oklab = [0.5, 0.4, 0.0];
        let mapping = GamutMapper::new(GamutPolicy::Clip).map_finite(&oklab);
        assert!(!mapping.was_in_gamut);
        assert_eq!(mapping.oklab, oklab);
        assert_eq!(mapping.linear_srgb, oklab_to_linear_srgb(&oklab));
    }

    #[test]
    fn test_bisect_chroma() {
        let oklab = [0.7, 0.4, 0.0];
        let mapping = GamutMapper::new(GamutPolicy::BisectChroma).map_finite(&oklab);
        let step = ChromaBisection::new(&oklab).run();

        assert!(!mapping.was_in_gamut);
        assert_eq!(mapping.oklab, step.oklab);
        assert_eq!(mapping.linear_srgb, step.linear_srgb);
        assert_eq!(mapping.oklab[0], 0.7);
        assert_eq!(mapping.oklab[1], 0.4 * 0.5244140625);
    }

    #[test]
    fn test_cone_clamp_boundary_is_noop() {
        for degree in (0..360).step_by(10) {
            let hue = degree as Float;
            for lightness in [0.2, 0.5, 0.8] {
                let chroma = max_chroma_for_hue(hue) * lightness;
                let oklab = oklch_to_oklab(&[lightness, chroma, hue]);
                let clamped = cone_clamp(&oklab);

                assert_eq!(clamped[0], oklab[0]);
                assert!((clamped[1] - oklab[1]).abs() < 1e-12, "{}º", hue);
                assert!((clamped[2] - oklab[2]).abs() < 1e-12, "{}º", hue);
            }
        }
    }

    #[test]
    fn test_cone_clamp() {
        let limit = max_chroma_for_hue(0.0);

        // Inside the cone
        assert_eq!(cone_clamp(&[0.5, 0.1, 0.0]), [0.5, 0.1, 0.0]);

        // Outside the cone
        let clamped = cone_clamp(&[0.5, 0.4, 0.0]);
        assert_eq!(clamped[0], 0.5);
        assert!((clamped[1] - limit * 0.5).abs() < 1e-12);
        assert_eq!(clamped[2], 0.0);

        // Black has no chroma at all.
        assert_eq!(cone_clamp(&[0.0, 0.1, 0.1]), [0.0, 0.0, 0.0]);
        assert_eq!(cone_clamp(&[-0.1, 0.1, 0.0]), [-0.1, 0.0, 0.0]);

        // The cone is not the gamut.
        let mapping = GamutMapper::new(GamutPolicy::ConeClamp).map_finite(&[0.9, 0.4, 0.0]);
        assert!(!mapping.was_in_gamut);
        assert!((mapping.oklab[1] - limit * 0.9).abs() < 1e-12);
        assert!(!in_gamut(&mapping.linear_srgb));
    }
}
