//! Constant-hue slices through Oklch.
//!
//! A slice is a raster with lightness decreasing from 1 at the top to 0 at the
//! bottom and chroma increasing from 0 on the left to the maximum chroma on
//! the right, all at the same hue. Every pixel is mapped into sRGB with the
//! configured policy, which makes the slice a direct visualization of how the
//! policies differ.

use std::io::Write;

use crate::chroma::max_chroma_for_hue;
use crate::core::{linear_to_gamma_srgb, to_24bit};
use crate::opt::SliceOptions;
use crate::{Float, GamutMapper};

/// A renderer for constant-hue slices.
#[derive(Clone, Debug)]
pub struct Slice {
    options: SliceOptions,
    mapper: GamutMapper,
    max_a: Float,
    max_b: Float,
    limit: Float,
}

impl Slice {
    /// Create a new slice renderer.
    pub fn new(options: SliceOptions) -> Self {
        let hue = options.hue();
        let (sin, cos) = hue.to_radians().sin_cos();
        let max_chroma = options.max_chroma();

        Self {
            mapper: GamutMapper::new(options.policy()),
            max_a: max_chroma * cos,
            max_b: max_chroma * sin,
            limit: max_chroma_for_hue(hue),
            options,
        }
    }

    /// Get the options.
    pub fn options(&self) -> &SliceOptions {
        &self.options
    }

    /// Get the Oklab coordinates for the pixel at the given coordinates.
    pub fn oklab_at(&self, x: usize, y: usize) -> [Float; 3] {
        let w = (self.options.width() - 1) as Float;
        let h = (self.options.height() - 1) as Float;
        let x = x as Float / w;

        [1.0 - y as Float / h, self.max_a * x, self.max_b * x]
    }

    /// Get the column on which the chroma limit falls for the given row.
    ///
    /// If the limit lies beyond the slice's right edge, this method returns
    /// `None`.
    pub fn boundary_at(&self, y: usize) -> Option<usize> {
        let lightness = 1.0 - y as Float / (self.options.height() - 1) as Float;
        let position = self.limit * lightness / self.options.max_chroma()
            * (self.options.width() - 1) as Float;
        let column = position.round();

        if column < self.options.width() as Float {
            Some(column as usize)
        } else {
            None
        }
    }

    /// Render the slice.
    pub fn render(&self) -> SliceImage {
        let width = self.options.width();
        let height = self.options.height();
        let mut rgba = Vec::with_capacity(width * height * 4);
        let mut gamut = Vec::with_capacity(width * height);

        for y in 0..height {
            let boundary = if self.options.boundary() {
                self.boundary_at(y)
            } else {
                None
            };

            for x in 0..width {
                // Only finite coordinates reach the mapper, since the options
                // have been validated.
                let mapping = self.mapper.map_finite(&self.oklab_at(x, y));
                gamut.push(mapping.was_in_gamut);

                if boundary == Some(x) {
                    rgba.extend_from_slice(&[0, 0, 0, 255]);
                    continue;
                }

                let mut linear = mapping.linear_srgb;
                if self.options.highlight() && !mapping.was_in_gamut {
                    linear = linear.map(|c| 1.0 - c);
                }

                let [r, g, b] = to_24bit(&linear_to_gamma_srgb(&linear));
                rgba.extend_from_slice(&[r, g, b, 255]);
            }
        }

        SliceImage {
            width,
            height,
            rgba,
            gamut,
        }
    }

    /// Render the slice while logging to the given writer.
    ///
    /// The amount of logging depends on the options' volume.
    pub fn render_with_log<W: Write>(&self, log: &mut W) -> std::io::Result<SliceImage> {
        let volume = self.options.volume();
        if volume.is_regular() {
            writeln!(
                log,
                "slice::render width={} height={} hue={} policy={}",
                self.options.width(),
                self.options.height(),
                self.options.hue(),
                self.options.policy()
            )?;
        }

        let image = self.render();

        if volume.is_detailed() {
            for (y, row) in image.gamut.chunks(image.width).enumerate() {
                writeln!(
                    log,
                    "slice::row y={} lightness={:.4} out_of_gamut={}",
                    y,
                    self.oklab_at(0, y)[0],
                    row.iter().filter(|g| !**g).count()
                )?;
            }
        }

        if volume.is_regular() {
            writeln!(
                log,
                "slice::done out_of_gamut={} pixels={}",
                image.out_of_gamut_count(),
                image.gamut.len()
            )?;
            log.flush()?;
        }

        Ok(image)
    }
}

// ====================================================================================================================

/// A rendered slice.
///
/// Pixels are stored row by row, with four bytes per pixel for red, green,
/// blue, and alpha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SliceImage {
    width: usize,
    height: usize,
    rgba: Vec<u8>,
    gamut: Vec<bool>,
}

impl SliceImage {
    /// Get the width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the RGBA bytes.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Get the per-pixel gamut verdicts, from before mapping.
    pub fn gamut(&self) -> &[bool] {
        &self.gamut
    }

    /// Get the pixel at the given coordinates.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if self.width <= x || self.height <= y {
            return None;
        }

        let index = 4 * (y * self.width + x);
        let pixel = &self.rgba[index..index + 4];
        Some([pixel[0], pixel[1], pixel[2], pixel[3]])
    }

    /// Determine whether the pixel at the given coordinates was in gamut
    /// before mapping.
    pub fn in_gamut(&self, x: usize, y: usize) -> Option<bool> {
        if self.width <= x || self.height <= y {
            None
        } else {
            Some(self.gamut[y * self.width + x])
        }
    }

    /// Count the pixels that were out of gamut before mapping.
    pub fn out_of_gamut_count(&self) -> usize {
        self.gamut.iter().filter(|g| !**g).count()
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::opt::{SliceOptionBuilder, Volume};
    use crate::GamutPolicy;

    fn new_slice(builder: &mut SliceOptionBuilder) -> Slice {
        match builder.build() {
            Ok(options) => Slice::new(options),
            Err(error) => panic!("{}", error),
        }
    }

    #[test]
    fn test_raster() {
        let slice = new_slice(SliceOptions::builder().width(11).height(11));
        let image = slice.render();

        assert_eq!(image.width(), 11);
        assert_eq!(image.height(), 11);
        assert_eq!(image.rgba().len(), 11 * 11 * 4);
        assert_eq!(image.gamut().len(), 11 * 11);
        assert!(image.rgba().chunks(4).all(|p| p[3] == 255));

        assert_eq!(slice.oklab_at(0, 10), [0.0, 0.0, 0.0]);
        assert_eq!(slice.oklab_at(10, 0), [1.0, 0.4, 0.0]);
        assert_eq!(slice.oklab_at(5, 5), [0.5, 0.2, 0.0]);

        // Black is in gamut, and so are the grays on the left edge.
        assert_eq!(image.pixel(0, 10), Some([0, 0, 0, 255]));
        for y in 1..=10 {
            assert_eq!(image.in_gamut(0, y), Some(true));
            let pixel = image.pixel(0, y).unwrap_or_default();
            assert_eq!(pixel[0], pixel[1]);
            assert_eq!(pixel[1], pixel[2]);
        }

        // At hue 0º and full chroma, the right edge is out of gamut.
        for y in 0..=10 {
            assert_eq!(image.in_gamut(10, y), Some(false));
        }

        assert_eq!(image.pixel(11, 0), None);
        assert_eq!(image.in_gamut(0, 11), None);
    }

    #[test]
    fn test_highlight() {
        let plain = new_slice(SliceOptions::builder().width(9).height(9)).render();
        let highlighted = new_slice(SliceOptions::builder().width(9).height(9).highlight(true)).render();

        assert_eq!(plain.gamut(), highlighted.gamut());
        assert!(0 < plain.out_of_gamut_count());

        for y in 0..9 {
            for x in 0..9 {
                if plain.in_gamut(x, y) == Some(true) {
                    assert_eq!(plain.pixel(x, y), highlighted.pixel(x, y));
                }
            }
        }

        // Clipped red at mid lightness becomes cyan-ish once inverted.
        assert_eq!(plain.in_gamut(8, 4), Some(false));
        assert_eq!(plain.pixel(8, 4), Some([239, 0, 90, 255]));
        assert_eq!(highlighted.pixel(8, 4), Some([101, 255, 243, 255]));
    }

    #[test]
    fn test_boundary() {
        let slice = new_slice(SliceOptions::builder().width(11).height(11).boundary(true));
        let limit = max_chroma_for_hue(0.0);

        // At hue 0º the limit exceeds the maximum chroma of 0.4 only by a bit.
        assert!(0.4 < limit && limit < 0.41);
        assert_eq!(slice.boundary_at(0), Some(10));
        assert_eq!(slice.boundary_at(5), Some(5));
        assert_eq!(slice.boundary_at(10), Some(0));

        let image = slice.render();
        assert_eq!(image.pixel(5, 5), Some([0, 0, 0, 255]));
        assert_eq!(image.pixel(10, 0), Some([0, 0, 0, 255]));

        let plain = new_slice(SliceOptions::builder().width(11).height(11)).render();
        assert_ne!(plain.pixel(5, 5), Some([0, 0, 0, 255]));

        // With more chroma on the x-axis, the limit falls inside the raster.
        let wide = new_slice(SliceOptions::builder().width(11).height(3).max_chroma(0.2));
        assert_eq!(wide.boundary_at(0), None);
        assert_eq!(wide.boundary_at(1), Some(10));
    }

    #[test]
    fn test_policies_differ() {
        let clip = new_slice(SliceOptions::builder().width(9).height(9)).render();
        let cone = new_slice(
            SliceOptions::builder()
                .width(9)
                .height(9)
                .policy(GamutPolicy::ConeClamp),
        )
        .render();

        assert_eq!(clip.gamut(), cone.gamut());
        assert_ne!(clip.rgba(), cone.rgba());
    }

    #[test]
    fn test_log() {
        let quiet = new_slice(SliceOptions::builder().width(4).height(3));
        let mut log = Vec::new();
        let image = quiet.render_with_log(&mut log);
        assert!(image.is_ok());
        assert!(log.is_empty());

        let regular = new_slice(
            SliceOptions::builder()
                .width(4)
                .height(3)
                .volume(Volume::Regular),
        );
        let mut log = Vec::new();
        let image = regular.render_with_log(&mut log);
        assert_eq!(image.ok(), Some(regular.render()));
        let log = String::from_utf8(log).unwrap_or_default();
        let lines: Vec<_> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "slice::render width=4 height=3 hue=0 policy=clip");
        assert!(lines[1].starts_with("slice::done out_of_gamut="));
        assert!(lines[1].ends_with(" pixels=12"));

        let detailed = new_slice(
            SliceOptions::builder()
                .width(4)
                .height(3)
                .volume(Volume::Detailed),
        );
        let mut log = Vec::new();
        assert!(detailed.render_with_log(&mut log).is_ok());
        let log = String::from_utf8(log).unwrap_or_default();
        assert_eq!(log.lines().count(), 5);
        assert!(log.contains("slice::row y=2 lightness=0.0000 out_of_gamut=3"));
    }
}
