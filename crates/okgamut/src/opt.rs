//! Helper module with the options for rendering slices.
//!
//! This module provides the options for a [`Slice`](crate::Slice) and the
//! corresponding builder, as well as the volume of diagnostic logging.
//!
//!
//! # Example
//!
//! ```
//! # use okgamut::opt::SliceOptions;
//! # use okgamut::GamutPolicy;
//! let options = SliceOptions::builder()
//!     .width(64)
//!     .height(32)
//!     .hue(120.0)
//!     .policy(GamutPolicy::ConeClamp)
//!     .build()?;
//!
//! assert_eq!(options.width(), 64);
//! assert_eq!(options.policy(), GamutPolicy::ConeClamp);
//! # Ok::<(), okgamut::error::InvalidInputError>(())
//! ```

use crate::error::InvalidInputError;
use crate::util::{Env, Environment};
use crate::{Float, GamutPolicy};

/// The environment variable controlling the default volume.
pub const LOG_VARIABLE: &str = "OKGAMUT_LOG";

/// The diagnostic logging volume.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Volume {
    #[default]
    Silent,
    Regular,
    Detailed,
}

impl Volume {
    /// Determine the volume from the `OKGAMUT_LOG` environment variable.
    ///
    /// The variable's value is one of `silent`, `regular`, or `detailed`,
    /// ignoring case. A missing or unrecognized value means silent.
    pub fn from_environment() -> Self {
        Self::from_env(&Env)
    }

    pub(crate) fn from_env(env: &impl Environment) -> Self {
        match env.read(LOG_VARIABLE) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "regular" => Self::Regular,
                "detailed" => Self::Detailed,
                _ => Self::Silent,
            },
            Err(_) => Self::Silent,
        }
    }

    /// Determine whether this volume is at least regular.
    pub fn is_regular(&self) -> bool {
        !matches!(self, Self::Silent)
    }

    /// Determine whether this volume is detailed.
    pub fn is_detailed(&self) -> bool {
        matches!(self, Self::Detailed)
    }
}

#[derive(Clone, Debug)]
struct OptionData {
    volume: Volume,
    policy: GamutPolicy,
    width: usize,
    height: usize,
    hue: Float,
    max_chroma: Float,
    highlight: bool,
    boundary: bool,
}

impl OptionData {
    pub const fn new() -> Self {
        Self {
            volume: Volume::Silent,
            policy: GamutPolicy::Clip,
            width: 256,
            height: 256,
            hue: 0.0,
            max_chroma: 0.4,
            highlight: false,
            boundary: false,
        }
    }
}

/// A builder of slice options.
#[derive(Debug)]
pub struct SliceOptionBuilder(OptionData);

impl SliceOptionBuilder {
    /// Set the volume.
    pub fn volume(&mut self, volume: Volume) -> &mut Self {
        self.0.volume = volume;
        self
    }

    /// Set the gamut policy.
    pub fn policy(&mut self, policy: GamutPolicy) -> &mut Self {
        self.0.policy = policy;
        self
    }

    /// Set the width in pixels.
    pub fn width(&mut self, width: usize) -> &mut Self {
        self.0.width = width;
        self
    }

    /// Set the height in pixels.
    pub fn height(&mut self, height: usize) -> &mut Self {
        self.0.height = height;
        self
    }

    /// Set the hue in degrees.
    pub fn hue(&mut self, hue: Float) -> &mut Self {
        self.0.hue = hue;
        self
    }

    /// Set the chroma at the right edge of the slice.
    pub fn max_chroma(&mut self, max_chroma: Float) -> &mut Self {
        self.0.max_chroma = max_chroma;
        self
    }

    /// Set whether to invert out-of-gamut pixels.
    pub fn highlight(&mut self, highlight: bool) -> &mut Self {
        self.0.highlight = highlight;
        self
    }

    /// Set whether to draw the chroma limit.
    pub fn boundary(&mut self, boundary: bool) -> &mut Self {
        self.0.boundary = boundary;
        self
    }

    /// Instantiate the options.
    ///
    /// # Errors
    ///
    /// This method fails if width or height are less than two, the hue is not
    /// finite, or the maximum chroma is not finite and positive.
    pub fn build(&self) -> Result<SliceOptions, InvalidInputError> {
        let data = &self.0;

        for (what, value) in [("width", data.width), ("height", data.height)] {
            if value < 2 {
                return Err(InvalidInputError::TooSmall {
                    what,
                    value,
                    minimum: 2,
                });
            }
        }

        InvalidInputError::check_finite("hue", &[data.hue])?;
        InvalidInputError::check_finite("maximum chroma", &[data.max_chroma])?;
        if data.max_chroma <= 0.0 {
            return Err(InvalidInputError::NotPositive {
                what: "maximum chroma",
                value: data.max_chroma,
            });
        }

        Ok(SliceOptions(data.clone()))
    }
}

/// An options object for slices.
#[derive(Clone, Debug)]
pub struct SliceOptions(OptionData);

impl Default for SliceOptions {
    fn default() -> Self {
        SliceOptions(OptionData::new())
    }
}

impl SliceOptions {
    /// Create a new builder with the default option values.
    pub fn builder() -> SliceOptionBuilder {
        SliceOptionBuilder(OptionData::new())
    }

    /// Get the volume.
    pub fn volume(&self) -> Volume {
        self.0.volume
    }

    /// Get the gamut policy.
    pub fn policy(&self) -> GamutPolicy {
        self.0.policy
    }

    /// Get the width in pixels.
    pub fn width(&self) -> usize {
        self.0.width
    }

    /// Get the height in pixels.
    pub fn height(&self) -> usize {
        self.0.height
    }

    /// Get the hue in degrees.
    pub fn hue(&self) -> Float {
        self.0.hue
    }

    /// Get the chroma at the right edge.
    pub fn max_chroma(&self) -> Float {
        self.0.max_chroma
    }

    /// Determine whether out-of-gamut pixels are inverted.
    pub fn highlight(&self) -> bool {
        self.0.highlight
    }

    /// Determine whether the chroma limit is drawn.
    pub fn boundary(&self) -> bool {
        self.0.boundary
    }
}
