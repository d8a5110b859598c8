//! Fixed enhancement chain applied after resizing
//!
//! Sharpen, then lift contrast, then (for color images) boost saturation.
//! Each filter only touches color channels; alpha passes through unchanged.

use crate::constants::{
    COLOR_FACTOR, CONTRAST_FACTOR, UNSHARP_PERCENT, UNSHARP_RADIUS, UNSHARP_THRESHOLD,
};
use image::{imageops, DynamicImage, ImageBuffer, Pixel};

type Buffer<P> = ImageBuffer<P, Vec<u8>>;

/// Whether the chain runs for this color mode: grayscale, RGB and RGBA only.
pub fn is_enhanceable(img: &DynamicImage) -> bool {
    matches!(
        img,
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_)
    )
}

/// Runs unsharp mask, contrast and color enhancement in that order.
/// Images in any other mode are returned untouched.
pub fn apply_enhancement_chain(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageLuma8(buf) => {
            let mut buf = unsharp_mask(&buf, UNSHARP_RADIUS, UNSHARP_PERCENT, UNSHARP_THRESHOLD);
            enhance_contrast(&mut buf, CONTRAST_FACTOR);
            DynamicImage::ImageLuma8(buf)
        }
        DynamicImage::ImageRgb8(buf) => {
            let mut buf = unsharp_mask(&buf, UNSHARP_RADIUS, UNSHARP_PERCENT, UNSHARP_THRESHOLD);
            enhance_contrast(&mut buf, CONTRAST_FACTOR);
            enhance_color(&mut buf, COLOR_FACTOR);
            DynamicImage::ImageRgb8(buf)
        }
        DynamicImage::ImageRgba8(buf) => {
            let mut buf = unsharp_mask(&buf, UNSHARP_RADIUS, UNSHARP_PERCENT, UNSHARP_THRESHOLD);
            enhance_contrast(&mut buf, CONTRAST_FACTOR);
            enhance_color(&mut buf, COLOR_FACTOR);
            DynamicImage::ImageRgba8(buf)
        }
        other => other,
    }
}

/// Sharpens edges by pushing each sample away from its gaussian-blurred
/// neighbourhood. `percent` scales the push; differences smaller than
/// `threshold` are left alone so flat areas keep their noise floor.
pub fn unsharp_mask<P>(image: &Buffer<P>, radius: f32, percent: i32, threshold: i32) -> Buffer<P>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let blurred = imageops::blur(image, radius);
    let channels = P::CHANNEL_COUNT as usize;
    let color_channels = color_channel_count::<P>();

    let mut out = image.clone();
    for ((dst, src), soft) in out
        .chunks_exact_mut(channels)
        .zip(image.chunks_exact(channels))
        .zip(blurred.chunks_exact(channels))
    {
        for c in 0..color_channels {
            let diff = src[c] as i32 - soft[c] as i32;
            if diff.abs() >= threshold {
                dst[c] = (src[c] as i32 + diff * percent / 100).clamp(0, 255) as u8;
            }
        }
    }
    out
}

/// Blends every color sample against the image's mean luminance.
/// A factor of 1.0 is the identity; above 1.0 spreads values apart.
pub fn enhance_contrast<P>(image: &mut Buffer<P>, factor: f32)
where
    P: Pixel<Subpixel = u8>,
{
    let mean = mean_luminance(image);
    let channels = P::CHANNEL_COUNT as usize;
    let color_channels = color_channel_count::<P>();

    for px in image.chunks_exact_mut(channels) {
        for sample in px.iter_mut().take(color_channels) {
            *sample = blend(mean, *sample, factor);
        }
    }
}

/// Blends each pixel against its own grayscale value, scaling saturation.
/// Single-channel images have no chroma and are left unchanged.
pub fn enhance_color<P>(image: &mut Buffer<P>, factor: f32)
where
    P: Pixel<Subpixel = u8>,
{
    let channels = P::CHANNEL_COUNT as usize;
    let color_channels = color_channel_count::<P>();
    if color_channels < 3 {
        return;
    }

    for px in image.chunks_exact_mut(channels) {
        let gray = luminance(px[0], px[1], px[2]);
        for sample in px.iter_mut().take(color_channels) {
            *sample = blend(gray, *sample, factor);
        }
    }
}

/// ITU-R 601-2 luma in 16.16 fixed point.
fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

fn mean_luminance<P>(image: &Buffer<P>) -> u8
where
    P: Pixel<Subpixel = u8>,
{
    let channels = P::CHANNEL_COUNT as usize;
    let color_channels = color_channel_count::<P>();

    let mut sum = 0u64;
    let mut count = 0u64;
    for px in image.chunks_exact(channels) {
        let l = if color_channels >= 3 {
            luminance(px[0], px[1], px[2])
        } else {
            px[0]
        };
        sum += l as u64;
        count += 1;
    }

    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64 + 0.5) as u8
}

fn blend(base: u8, value: u8, factor: f32) -> u8 {
    let base = base as f32;
    (base + factor * (value as f32 - base)).round().clamp(0.0, 255.0) as u8
}

fn color_channel_count<P: Pixel>() -> usize {
    P::CHANNEL_COUNT as usize - usize::from(P::HAS_ALPHA)
}
