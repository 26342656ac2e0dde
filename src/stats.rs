use image::imageops::{self, FilterType};
use image::DynamicImage;

pub const ANALYSIS_WIDTH: u32 = 160;
// tall slivers past this height are treated as unrasterisable
pub const MAX_ANALYSIS_HEIGHT: u32 = 16_384;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelStats {
  pub avg_luminance: f64,
  pub std_luminance: f64,
  pub avg_r: f64,
  pub avg_g: f64,
  pub avg_b: f64,
}

pub fn analysis_dimensions(width: u32, height: u32) -> Option<(u32, u32)> {
  if width == 0 || height == 0 {
    return None;
  }
  let scaled = (height as f64 / width as f64 * ANALYSIS_WIDTH as f64).round();
  if scaled > MAX_ANALYSIS_HEIGHT as f64 {
    return None;
  }
  Some((ANALYSIS_WIDTH, (scaled as u32).max(1)))
}

pub fn relative_luminance(r: f64, g: f64, b: f64) -> f64 {
  0.2126 * r + 0.7152 * g + 0.0722 * b
}

impl PixelStats {
  pub fn from_image(img: &DynamicImage) -> Option<PixelStats> {
    let (w, h) = analysis_dimensions(img.width(), img.height())?;
    // alpha is dropped before resampling
    let rgb = imageops::resize(&img.to_rgb8(), w, h, FilterType::Triangle);

    let n = (w as f64) * (h as f64);
    let mut sum_l = 0.0f64;
    let mut sum_l2 = 0.0f64;
    let mut sum_r = 0.0f64;
    let mut sum_g = 0.0f64;
    let mut sum_b = 0.0f64;

    for p in rgb.pixels() {
      let r = p[0] as f64 / 255.0;
      let g = p[1] as f64 / 255.0;
      let b = p[2] as f64 / 255.0;
      let l = relative_luminance(r, g, b);
      sum_l += l;
      sum_l2 += l * l;
      sum_r += r;
      sum_g += g;
      sum_b += b;
    }

    let avg_luminance = sum_l / n;
    // population variance; clamp rounding noise below zero
    let std_luminance = (sum_l2 / n - avg_luminance * avg_luminance).max(0.0).sqrt();

    Some(PixelStats {
      avg_luminance,
      std_luminance,
      avg_r: sum_r / n,
      avg_g: sum_g / n,
      avg_b: sum_b / n,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use image::{Rgb, RgbImage, Rgba, RgbaImage};

  fn solid(w: u32, h: u32, rgb: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb(rgb)))
  }

  #[test]
  fn dimensions_preserve_aspect_ratio() {
    assert_eq!(analysis_dimensions(320, 240), Some((160, 120)));
    assert_eq!(analysis_dimensions(100, 100), Some((160, 160)));
    assert_eq!(analysis_dimensions(1000, 333), Some((160, 53)));
  }

  #[test]
  fn dimensions_have_minimum_height() {
    assert_eq!(analysis_dimensions(10_000, 1), Some((160, 1)));
  }

  #[test]
  fn extreme_aspect_ratio_has_no_analysis_size() {
    assert_eq!(analysis_dimensions(1, 100_000), None);
    assert_eq!(analysis_dimensions(10, 1024), Some((160, 16_384)));
    assert_eq!(analysis_dimensions(10, 1025), None);
    let sliver = DynamicImage::new_rgb8(1, 200);
    assert!(PixelStats::from_image(&sliver).is_none());
  }

  #[test]
  fn zero_dimension_has_no_analysis_size() {
    assert_eq!(analysis_dimensions(0, 10), None);
    assert_eq!(analysis_dimensions(10, 0), None);
    assert!(PixelStats::from_image(&DynamicImage::new_rgb8(0, 0)).is_none());
  }

  #[test]
  fn white_image_has_full_luminance() {
    let stats = PixelStats::from_image(&solid(64, 48, [255, 255, 255])).expect("stats");
    assert!((stats.avg_luminance - 1.0).abs() < 1e-2);
    assert!(stats.std_luminance < 1e-2);
    assert!((stats.avg_r - 1.0).abs() < 1e-2);
  }

  #[test]
  fn black_image_has_zero_luminance() {
    let stats = PixelStats::from_image(&solid(300, 200, [0, 0, 0])).expect("stats");
    assert_eq!(stats.avg_luminance, 0.0);
    assert_eq!(stats.std_luminance, 0.0);
  }

  #[test]
  fn split_image_has_contrast() {
    let img = RgbImage::from_fn(320, 160, |x, _| {
      if x < 160 {
        Rgb([0, 0, 0])
      } else {
        Rgb([255, 255, 255])
      }
    });
    let stats = PixelStats::from_image(&DynamicImage::ImageRgb8(img)).expect("stats");
    assert!((stats.avg_luminance - 0.5).abs() < 0.02);
    assert!(stats.std_luminance > 0.45);
  }

  #[test]
  fn alpha_is_ignored() {
    let img = RgbaImage::from_pixel(40, 40, Rgba([200, 100, 50, 0]));
    let stats = PixelStats::from_image(&DynamicImage::ImageRgba8(img)).expect("stats");
    assert!((stats.avg_r - 200.0 / 255.0).abs() < 1e-2);
    assert!((stats.avg_b - 50.0 / 255.0).abs() < 1e-2);
  }

  #[test]
  fn statistics_stay_in_unit_range() {
    let img = RgbImage::from_fn(97, 61, |x, y| {
      Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) * 3 % 256) as u8])
    });
    let stats = PixelStats::from_image(&DynamicImage::ImageRgb8(img)).expect("stats");
    for v in [stats.avg_luminance, stats.avg_r, stats.avg_g, stats.avg_b] {
      assert!((0.0..=1.0).contains(&v), "{v} out of range");
    }
    assert!(stats.std_luminance >= 0.0);
  }
}
