mod conversion;
mod equality;
mod gamut;
mod math;

// conversion
pub use conversion::{
    linear_srgb_to_oklab, linear_srgb_to_xyz, linear_to_gamma_srgb, oklab_to_linear_srgb,
    oklab_to_oklch, oklch_to_oklab, to_24bit, xyz_to_linear_srgb, xyz_to_oklab,
    SIMPLE_SRGB_GAMMA,
};
pub(crate) use conversion::hue_degrees;

// equality
#[cfg(test)]
pub(crate) use equality::assert_same_coordinates;
pub use equality::to_eq_bits;
#[cfg(test)]
pub(crate) use equality::to_eq_coordinates;

// gamut
pub use gamut::{clip, in_gamut, BisectionStep, ChromaBisection, BISECTION_STEPS};

// math
#[cfg(test)]
pub(crate) use math::Sum;
pub(crate) use math::FloatExt;
