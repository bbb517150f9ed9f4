//! Finished render storage and encoding.
//!
//! The PPM writer is the canonical output: plain-text `P3`, one pixel per
//! line, row-major from the top-left corner. Other formats go through the
//! `image` crate.

use crate::OutputError;
use glint_math::{Color, Interval};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Channel range before quantization. The upper bound stays below 1 so
/// `255.999 * x` never reaches 256.
const INTENSITY: Interval = Interval::new(0.000, 0.999);

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let quantize = |c: f64| (255.999 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Linear-light image, row-major from the top-left pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert to gamma-corrected 8-bit RGB.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            image::Rgb(color_to_rgb8(self.get(x, y)))
        })
    }

    /// Save to `path`. `.ppm` files use the plain-text writer, anything else
    /// is encoded by the `image` crate based on the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), OutputError> {
        let path = path.as_ref();
        let is_ppm = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

        if is_ppm {
            let mut writer = BufWriter::new(File::create(path)?);
            write_ppm(self, &mut writer)?;
            writer.flush()?;
        } else {
            self.to_rgb_image().save(path)?;
        }

        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Write `image` as a plain-text PPM (`P3`).
pub fn write_ppm<W: Write>(image: &ImageBuffer, mut out: W) -> std::io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image.width, image.height)?;
    writeln!(out, "255")?;

    for color in &image.pixels {
        let [r, g, b] = color_to_rgb8(*color);
        writeln!(out, "{} {} {}", r, g, b)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-0.5), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 1e-12);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_color_to_rgb8_extremes() {
        assert_eq!(color_to_rgb8(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb8(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb8(Color::new(4.0, -1.0, f64::NAN)), [255, 0, 0]);
    }

    #[test]
    fn test_color_to_rgb8_applies_gamma() {
        // 0.25 linear -> 0.5 gamma -> floor(127.9995)
        assert_eq!(color_to_rgb8(Color::splat(0.25)), [127, 127, 127]);
    }

    #[test]
    fn test_image_get_set() {
        let mut image = ImageBuffer::new(3, 2);
        assert_eq!(image.pixels().len(), 6);

        image.set(2, 1, Color::new(0.1, 0.2, 0.3));
        assert_eq!(image.get(2, 1), Color::new(0.1, 0.2, 0.3));
        assert_eq!(image.pixels()[5], Color::new(0.1, 0.2, 0.3));
        assert_eq!(image.get(0, 0), Color::ZERO);
    }

    #[test]
    fn test_write_ppm_exact_bytes() {
        let mut image = ImageBuffer::new(2, 2);
        image.set(0, 0, Color::ONE);
        image.set(1, 0, Color::new(1.0, 0.0, 0.0));
        image.set(0, 1, Color::new(0.0, 0.25, 0.0));

        let mut bytes = Vec::new();
        write_ppm(&image, &mut bytes).expect("write to vec");

        let expected = "P3\n2 2\n255\n255 255 255\n255 0 0\n0 127 0\n0 0 0\n";
        assert_eq!(String::from_utf8(bytes).expect("ascii output"), expected);
    }

    #[test]
    fn test_to_rgb_image() {
        let mut image = ImageBuffer::new(2, 1);
        image.set(1, 0, Color::ONE);

        let rgb = image.to_rgb_image();
        assert_eq!(rgb.dimensions(), (2, 1));
        assert_eq!(rgb.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(rgb.get_pixel(1, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_save_ppm_and_png() {
        let dir = tempfile::tempdir().expect("temp dir");

        let mut image = ImageBuffer::new(4, 3);
        image.set(3, 2, Color::new(0.5, 0.5, 0.5));

        let ppm = dir.path().join("out.ppm");
        image.save(&ppm).expect("save ppm");
        let text = std::fs::read_to_string(&ppm).expect("read back");
        assert!(text.starts_with("P3\n4 3\n255\n"));
        assert_eq!(text.lines().count(), 3 + 12);

        let png = dir.path().join("out.png");
        image.save(&png).expect("save png");
        let decoded = image::open(&png).expect("decode png").to_rgb8();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.get_pixel(3, 2).0, color_to_rgb8(Color::splat(0.5)));
    }
}
