#![allow(dead_code)]

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs;
use std::path::Path;

/// Busy RGB content so encoders have something real to compress.
pub fn photo(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 251) as u8, (y % 241) as u8, ((x * y) % 233) as u8])
    }))
}

pub fn translucent(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, 90, (y % 256) as u8, ((x + y) % 256) as u8])
    }))
}

/// Populates `dir` with a mix of valid images, a corrupt image and
/// non-image files. Returns the names expected to convert successfully.
pub fn create_source_directory(dir: &Path) -> Vec<&'static str> {
    photo(320, 240).save(dir.join("landscape.jpg")).unwrap();
    translucent(64, 48).save(dir.join("badge.png")).unwrap();
    photo(40, 40).save(dir.join("thumb.bmp")).unwrap();

    fs::write(dir.join("broken.png"), b"not a png at all").unwrap();
    fs::write(dir.join("notes.txt"), b"ignore me").unwrap();

    let nested = dir.join("archive");
    fs::create_dir(&nested).unwrap();
    photo(16, 16).save(nested.join("old.jpg")).unwrap();

    vec!["badge.png", "landscape.jpg", "thumb.bmp"]
}
