use crate::Float;

/// Multiply the 3 by 3 matrix and 3-element vector with each other, producing a
/// new 3-element vector.
#[inline]
fn multiply(matrix: &[[Float; 3]; 3], vector: &[Float; 3]) -> [Float; 3] {
    let [row1, row2, row3] = matrix;

    [
        row1[0].mul_add(vector[0], row1[1].mul_add(vector[1], row1[2] * vector[2])),
        row2[0].mul_add(vector[0], row2[1].mul_add(vector[1], row2[2] * vector[2])),
        row3[0].mul_add(vector[0], row3[1].mul_add(vector[1], row3[2] * vector[2])),
    ]
}

// --------------------------------------------------------------------------------------------------------------------
// https://github.com/color-js/color.js/blob/a77e080a070039c534dda3965a769675aac5f75e/src/spaces/srgb-linear.js

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const LINEAR_SRGB_TO_XYZ: [[Float; 3]; 3] = [
    [ 0.41239079926595934, 0.357584339383878,   0.1804807884018343  ],
    [ 0.21263900587151027, 0.715168678767756,   0.07219231536073371 ],
    [ 0.01933081871559182, 0.11919477979462598, 0.9505321522496607  ],
];

/// Convert coordinates for linear sRGB to XYZ. This is a one-hop, direct
/// conversion.
pub fn linear_srgb_to_xyz(value: &[Float; 3]) -> [Float; 3] {
    multiply(&LINEAR_SRGB_TO_XYZ, value)
}

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const XYZ_TO_LINEAR_SRGB: [[Float; 3]; 3] = [
    [  3.2409699419045226,  -1.537383177570094,   -0.4986107602930034  ],
    [ -0.9692436362808796,   1.8759675015077202,   0.04155505740717559 ],
    [  0.05563007969699366, -0.20397695888897652,  1.0569715142428786  ],
];

/// Convert coordinates for XYZ to linear sRGB. This is a one-hop, direct
/// conversion.
pub fn xyz_to_linear_srgb(value: &[Float; 3]) -> [Float; 3] {
    multiply(&XYZ_TO_LINEAR_SRGB, value)
}

// --------------------------------------------------------------------------------------------------------------------
// https://github.com/color-js/color.js/blob/a77e080a070039c534dda3965a769675aac5f75e/src/spaces/oklab.js

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const XYZ_TO_OKLMS: [[Float; 3]; 3] = [
    [ 0.8190224379967030, 0.3619062600528904, -0.1288737815209879 ],
    [ 0.0329836539323885, 0.9292868615863434,  0.0361446663506424 ],
    [ 0.0481771893596242, 0.2642395317527308,  0.6335478284694309 ],
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const OKLMS_TO_OKLAB: [[Float; 3]; 3] = [
    [ 0.2104542683093140,  0.7936177747023054, -0.0040720430116193 ],
    [ 1.9779985324311684, -2.4285922420485799,  0.4505937096174110 ],
    [ 0.0259040424655478,  0.7827717124575296, -0.8086757549230774 ],
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const OKLAB_TO_OKLMS: [[Float; 3]; 3] = [
    [ 1.0000000000000000,  0.3963377773761749,  0.2158037573099136 ],
    [ 1.0000000000000000, -0.1055613458156586, -0.0638541728258133 ],
    [ 1.0000000000000000, -0.0894841775298119, -1.2914855480194092 ],
];

// The exact products of XYZ_TO_LINEAR_SRGB with Color.js' OKLMS_TO_XYZ and of
// XYZ_TO_OKLMS with LINEAR_SRGB_TO_XYZ, rounded once.

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const OKLMS_TO_LINEAR_SRGB: [[Float; 3]; 3] = [
    [  4.07674163607596,     -3.307711539258063,   0.2309699031821047  ],
    [ -1.2684379732850315,    2.609757349287688,  -0.3413193760026572  ],
    [ -0.004196076138675491, -0.7034186179359362,  1.7076146940746117  ],
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const LINEAR_SRGB_TO_OKLMS: [[Float; 3]; 3] = [
    [ 0.4122214694707629,  0.5363325372617349, 0.05144599326750218 ],
    [ 0.21190349581782517, 0.6806995506452345, 0.10739695353694055 ],
    [ 0.08830245919005637, 0.2817188391361215, 0.6299787016738222  ],
];

/// Convert coordinates for XYZ to Oklab.
///
/// This function multiplies with a matrix to get LMS, takes the real and hence
/// sign-preserving cube root of each component, and multiplies with a second
/// matrix to get L, a, b. It is defined for all real inputs, including the
/// negative and greater-than-one coordinates of imaginary colors.
pub fn xyz_to_oklab(value: &[Float; 3]) -> [Float; 3] {
    let [l, m, s] = multiply(&XYZ_TO_OKLMS, value);
    multiply(&OKLMS_TO_OKLAB, &[l.cbrt(), m.cbrt(), s.cbrt()])
}

/// Convert coordinates for Oklab to linear sRGB.
///
/// This function undoes the cube root of [`xyz_to_oklab`] and then maps
/// straight from LMS to linear sRGB. The result is unbounded; whether it fits
/// into sRGB is for [`in_gamut`](crate::in_gamut) to decide.
pub fn oklab_to_linear_srgb(value: &[Float; 3]) -> [Float; 3] {
    let [l, m, s] = multiply(&OKLAB_TO_OKLMS, value);
    multiply(&OKLMS_TO_LINEAR_SRGB, &[l.powi(3), m.powi(3), s.powi(3)])
}

/// Convert coordinates for linear sRGB to Oklab.
pub fn linear_srgb_to_oklab(value: &[Float; 3]) -> [Float; 3] {
    let [l, m, s] = multiply(&LINEAR_SRGB_TO_OKLMS, value);
    multiply(&OKLMS_TO_OKLAB, &[l.cbrt(), m.cbrt(), s.cbrt()])
}

// --------------------------------------------------------------------------------------------------------------------

/// The exponent of the simplified sRGB transfer function.
pub const SIMPLE_SRGB_GAMMA: Float = 2.2;

/// Gamma-encode linear sRGB with the simplified, pure power transfer function.
///
/// Each coordinate `v` becomes `sign(v) × |v|^(1/2.2)`. This deliberately
/// deviates from the official two-segment sRGB curve, which has a linear
/// segment near black.
pub fn linear_to_gamma_srgb(value: &[Float; 3]) -> [Float; 3] {
    #[inline]
    fn convert(value: Float) -> Float {
        value.abs().powf(SIMPLE_SRGB_GAMMA.recip()).copysign(value)
    }

    [convert(value[0]), convert(value[1]), convert(value[2])]
}

/// Convert gamma-encoded coordinates to 24-bit representation.
///
/// Coordinates are scaled to `0..=255` and rounded to the nearest integer,
/// with ties going to the even integer. Out-of-range values saturate, since
/// float to integer casts saturate in Rust. Not-a-number becomes zero. That
/// is exactly how a canvas' clamped byte array stores numbers.
pub fn to_24bit(value: &[Float; 3]) -> [u8; 3] {
    let [r, g, b] = *value;
    [
        (r * 255.0).round_ties_even() as u8,
        (g * 255.0).round_ties_even() as u8,
        (b * 255.0).round_ties_even() as u8,
    ]
}

// --------------------------------------------------------------------------------------------------------------------

/// Determine the hue angle for the a/b coordinates in degrees `0..360`.
///
/// Unlike [`oklab_to_oklch`], this function does not treat small chroma as
/// achromatic. The origin has hue 0.
#[inline]
pub fn hue_degrees(a: Float, b: Float) -> Float {
    let h = b.atan2(a).to_degrees();
    if h < 0.0 {
        let h = h + 360.0;
        // Tiny negative angles round up to a full turn.
        if h < 360.0 {
            h
        } else {
            0.0
        }
    } else {
        h
    }
}

/// Convert coordinates for Oklch to Oklab.
///
/// A not-a-number hue denotes a gray and produces zero a/b.
#[allow(non_snake_case)]
pub fn oklch_to_oklab(value: &[Float; 3]) -> [Float; 3] {
    let [L, C, h] = *value;

    if h.is_nan() {
        [L, 0.0, 0.0]
    } else {
        let (sin, cos) = h.to_radians().sin_cos();
        [L, C * cos, C * sin]
    }
}

const EPSILON: Float = 0.0002;

/// Convert coordinates for Oklab to Oklch.
///
/// Colors with a and b both closer to zero than 0.0002 are achromatic and have
/// zero chroma and a not-a-number hue.
#[allow(non_snake_case)]
pub fn oklab_to_oklch(value: &[Float; 3]) -> [Float; 3] {
    let [L, a, b] = *value;

    let a_m = a.abs();
    if a_m < EPSILON && b.abs() < EPSILON {
        return [L, 0.0, Float::NAN];
    }

    // per herbie 2.1
    let C = if a_m < b { b.hypot(a_m) } else { a_m.hypot(b) };

    [L, C, hue_degrees(a, b)]
}

// ====================================================================================================================

#[cfg(test)]
#[allow(clippy::excessive_precision)]
mod test {
    use super::*;
    use crate::core::assert_same_coordinates;
    use crate::Float;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    struct Representations {
        linear_srgb: [Float; 3],
        oklch: [Float; 3],
        oklab: [Float; 3],
        xyz: [Float; 3],
    }

    const BLACK: Representations = Representations {
        linear_srgb: [0.0, 0.0, 0.0],
        oklch: [0.0, 0.0, Float::NAN],
        oklab: [0.0, 0.0, 0.0],
        xyz: [0.0, 0.0, 0.0],
    };

    const YELLOW: Representations = Representations {
        // #ffca00
        linear_srgb: [1.0, 0.5906188409193369, 0.0],
        oklch: [0.8613332073307732, 0.1760097742886813, 89.440876452466],
        oklab: [
            0.8613332073307732,
            0.0017175723640959761,
            0.17600139371700052,
        ],
        xyz: [0.6235868473237722, 0.635031101987136, 0.08972950140152941],
    };

    const BLUE: Representations = Representations {
        // #3178ea
        linear_srgb: [
            0.030713443732993635,
            0.18782077230067787,
            0.8227857543962835,
        ],
        oklch: [0.5909012953108558, 0.18665606306724153, 259.66681920272595],
        oklab: [
            0.5909012953108558,
            -0.03348086515869664,
            -0.1836287492414715,
        ],
        xyz: [0.22832473003420622, 0.20025321836938534, 0.80506528557483],
    };

    const WHITE: Representations = Representations {
        // #ffffff
        linear_srgb: [1.0, 1.0, 1.0],
        oklch: [1.0000000000000002, 0.0, Float::NAN],
        oklab: [1.0000000000000002, -4.996003610813204e-16, 0.0],
        xyz: [0.9504559270516717, 1.0, 1.0890577507598784],
    };

    #[test]
    fn test_conversions() {
        for &color in [&BLACK, &YELLOW, &BLUE, &WHITE].iter() {
            let xyz = linear_srgb_to_xyz(&color.linear_srgb);
            assert_same_coordinates!(&xyz, &color.xyz);

            let also_linear_srgb = xyz_to_linear_srgb(&xyz);
            assert_same_coordinates!(&also_linear_srgb, &color.linear_srgb);

            let oklab = xyz_to_oklab(&xyz);
            assert_same_coordinates!(&oklab, &color.oklab);

            let linear_srgb = oklab_to_linear_srgb(&oklab);
            assert_same_coordinates!(&linear_srgb, &color.linear_srgb);

            let also_oklab = linear_srgb_to_oklab(&color.linear_srgb);
            assert_same_coordinates!(&also_oklab, &color.oklab);

            let oklch = oklab_to_oklch(&oklab);
            assert_eq!(oklch[2].is_nan(), color.oklch[2].is_nan(), "{:?}", oklch);
            crate::assert_close_enough!(oklch[0], color.oklch[0]);
            crate::assert_close_enough!(oklch[1], color.oklch[1]);
            if !oklch[2].is_nan() {
                assert!((oklch[2] - color.oklch[2]).abs() < 1e-9, "{:?}", oklch);
            }

            let oklab_too = oklch_to_oklab(&oklch);
            if !oklch[2].is_nan() {
                assert_same_coordinates!(&oklab_too, &color.oklab);
            }
        }
    }

    #[test]
    fn test_round_trip() {
        fn relative_error(expected: Float, actual: Float) -> Float {
            if expected == 0.0 {
                actual.abs()
            } else {
                ((actual - expected) / expected).abs()
            }
        }

        let mut rng = StdRng::seed_from_u64(0x2545_f491_4f6c_dd1d);
        let mut samples = vec![
            [0.95047, 1.0, 1.08883],
            [0.2, 0.3, 0.4],
            [0.001, 0.0005, 0.02],
            [0.6235868473237722, 0.635031101987136, 0.08972950140152941],
        ];
        for _ in 0..500 {
            samples.push([
                rng.random_range(0.001..1.0),
                rng.random_range(0.001..1.0),
                rng.random_range(0.001..1.0),
            ]);
        }

        for xyz in samples {
            let oklab = xyz_to_oklab(&xyz);
            let round_trip = linear_srgb_to_xyz(&oklab_to_linear_srgb(&oklab));
            for (expected, actual) in xyz.iter().zip(round_trip.iter()) {
                let error = relative_error(*expected, *actual);
                assert!(error < 1e-9, "{:?} became {:?}", xyz, round_trip);
            }
        }
    }

    #[test]
    fn test_cube_root_preserves_sign() {
        // Imaginary colors have negative LMS components.
        let oklab = xyz_to_oklab(&[-0.1, 0.05, 0.3]);
        assert!(oklab.iter().all(|c| c.is_finite()), "{:?}", oklab);

        let xyz = linear_srgb_to_xyz(&oklab_to_linear_srgb(&oklab));
        assert!((xyz[0] + 0.1).abs() < 1e-12, "{:?}", xyz);
        assert!((xyz[1] - 0.05).abs() < 1e-12, "{:?}", xyz);
        assert!((xyz[2] - 0.3).abs() < 1e-12, "{:?}", xyz);
    }

    #[test]
    fn test_gamma() {
        let encoded = linear_to_gamma_srgb(&[0.0, 1.0, 0.5]);
        assert_eq!(encoded[0], 0.0);
        assert_eq!(encoded[1], 1.0);
        assert!((encoded[2] - 0.7297400528407231).abs() < 1e-12, "{:?}", encoded);

        let negative = linear_to_gamma_srgb(&[-0.5, -1.0, 2.0]);
        assert!((negative[0] + 0.7297400528407231).abs() < 1e-12, "{:?}", negative);
        assert_eq!(negative[1], -1.0);
        assert!(negative[2] > 1.0, "{:?}", negative);
    }

    #[test]
    fn test_24bit() {
        assert_eq!(to_24bit(&[0.0, 0.5, 1.0]), [0, 128, 255]);
        assert_eq!(to_24bit(&[-0.3, 1.7, Float::NAN]), [0, 255, 0]);
        assert_eq!(to_24bit(&[0.499 / 255.0, 0.501 / 255.0, 254.6 / 255.0]), [0, 1, 255]);

        // Ties go to even.
        assert_eq!(to_24bit(&[0.5 / 255.0, 1.5 / 255.0, 2.5 / 255.0]), [0, 2, 2]);
        assert_eq!(to_24bit(&[126.5 / 255.0, 127.5 / 255.0, 254.5 / 255.0]), [126, 128, 254]);
    }

    #[test]
    fn test_hue() {
        assert_eq!(hue_degrees(1.0, 0.0), 0.0);
        assert_eq!(hue_degrees(0.0, 0.0), 0.0);
        assert!((hue_degrees(0.0, 1.0) - 90.0).abs() < 1e-12);
        assert!((hue_degrees(-1.0, 0.0) - 180.0).abs() < 1e-12);
        assert!((hue_degrees(0.0, -1.0) - 270.0).abs() < 1e-12);
        assert!(hue_degrees(1.0, -1e-300) < 360.0);
    }
}
