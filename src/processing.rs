use crate::constants::{
    DEFAULT_MAX_DIMENSION, DEFAULT_QUALITY, MAX_QUALITY, MIN_QUALITY, OXIPNG_PRESET,
};
use crate::enhance::{apply_enhancement_chain, is_enhanceable};
use crate::error::{ConversionError, Result};
use crate::formats::OutputFormat;
use crate::report::format_error_line;
use crate::verbose;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, Rgb, RgbImage};
use mozjpeg::{ColorSpace, Compress};
use std::fs;
use std::io::Cursor;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizeOptions {
    pub quality: u8,
    pub max_size: u32,
}

impl OptimizeOptions {
    pub fn new(quality: Option<u8>, max_size: Option<u32>) -> Result<Self> {
        let quality = quality.unwrap_or(DEFAULT_QUALITY);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(ConversionError::InvalidQuality(quality));
        }

        let max_size = max_size.unwrap_or(DEFAULT_MAX_DIMENSION);
        if max_size == 0 {
            return Err(ConversionError::InvalidMaxSize(max_size));
        }

        Ok(Self { quality, max_size })
    }
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            max_size: DEFAULT_MAX_DIMENSION,
        }
    }
}

/// Optimizes one image and reports whether it succeeded.
///
/// Failures never escape: the error is printed as `Error: <name>: <message>`
/// and `false` is returned. Nothing is written at `output_path` unless the
/// whole pipeline succeeded.
pub fn optimize_image(input_path: &Path, output_path: &Path, options: &OptimizeOptions) -> bool {
    match convert_image(input_path, output_path, options) {
        Ok(_) => true,
        Err(e) => {
            println!("{}", format_error_line(&display_name(input_path), &e));
            false
        }
    }
}

/// File name used in report lines, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Decode -> normalize -> flatten -> resize -> enhance -> encode -> write.
///
/// # Returns
/// * `Ok(bytes_written)` - Size of the file written at `output_path`
/// * `Err(ConversionError)` - If any step fails; no output is left behind
pub fn convert_image(
    input_path: &Path,
    output_path: &Path,
    options: &OptimizeOptions,
) -> Result<u64> {
    let format = OutputFormat::from_path(output_path)?;

    let img = load_image(input_path)?;
    verbose!(
        "{}: {}x{} {:?} -> {}",
        input_path.display(),
        img.width(),
        img.height(),
        img.color(),
        format
    );

    let img = process_image(img, format, options.max_size);
    let encoded = encode_image(&img, format, options.quality)?;

    fs::write(output_path, &encoded)?;
    Ok(encoded.len() as u64)
}

/// Runs the in-memory part of the pipeline for a given target format.
pub fn process_image(img: DynamicImage, format: OutputFormat, max_size: u32) -> DynamicImage {
    let mut img = img;
    if format.is_jpeg_family() && img.color().has_alpha() {
        img = flatten_onto_white(&img);
    }

    resize_to_fit(&mut img, max_size);

    if is_enhanceable(&img) {
        img = apply_enhancement_chain(img);
    }
    img
}

/// Decodes an image, guessing the format from its content, and narrows
/// high bit-depth samples to 8 bits.
pub fn load_image(input_path: &Path) -> Result<DynamicImage> {
    let img = ImageReader::open(input_path)?
        .with_guessed_format()?
        .decode()?;
    Ok(normalize_mode(img))
}

pub fn normalize_mode(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageLuma8(_)
        | DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageRgb8(_)
        | DynamicImage::ImageRgba8(_) => img,
        DynamicImage::ImageLuma16(_) => DynamicImage::ImageLuma8(img.to_luma8()),
        DynamicImage::ImageLumaA16(_) => DynamicImage::ImageLumaA8(img.to_luma_alpha8()),
        other if other.color().has_alpha() => DynamicImage::ImageRgba8(other.to_rgba8()),
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

/// Composites the image onto an opaque white canvas. RGBA uses its alpha
/// channel as the mask; grayscale+alpha keeps its gray values and drops
/// alpha. The result is always RGB.
pub fn flatten_onto_white(img: &DynamicImage) -> DynamicImage {
    if let DynamicImage::ImageLumaA8(_) = img {
        return DynamicImage::ImageRgb8(img.to_rgb8());
    }

    let rgba = img.to_rgba8();
    let mut background = RgbImage::from_pixel(rgba.width(), rgba.height(), Rgb([255, 255, 255]));

    for (dst, src) in background.pixels_mut().zip(rgba.pixels()) {
        let alpha = src[3] as u32;
        for c in 0..3 {
            let over = src[c] as u32 * alpha + 255 * (255 - alpha);
            dst[c] = ((over + 127) / 255) as u8;
        }
    }

    DynamicImage::ImageRgb8(background)
}

/// Target dimensions for fitting the longer edge within `max_size`, or
/// `None` when the image already fits.
pub fn fit_dimensions(width: u32, height: u32, max_size: u32) -> Option<(u32, u32)> {
    let longest = width.max(height);
    if longest <= max_size {
        return None;
    }

    let ratio = max_size as f64 / longest as f64;
    let scale = |dim: u32| ((dim as f64 * ratio).round() as u32).max(1);
    Some((scale(width), scale(height)))
}

pub fn resize_to_fit(img: &mut DynamicImage, max_size: u32) {
    if let Some((w, h)) = fit_dimensions(img.width(), img.height(), max_size) {
        verbose!("Resizing {}x{} -> {}x{}", img.width(), img.height(), w, h);
        *img = img.resize_exact(w, h, FilterType::Lanczos3);
    }
}

/// Encodes into memory so a failed encode never leaves a partial file.
pub fn encode_image(img: &DynamicImage, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
    let mut buf = Vec::new();

    match format {
        OutputFormat::Jpeg => buf = encode_jpeg(img, quality)?,
        OutputFormat::Png => {
            let encoder = PngEncoder::new(&mut buf);
            img.write_with_encoder(encoder)?;
            buf = optimize_png(&buf)?;
        }
        OutputFormat::Gif => {
            // The GIF encoder quantizes from RGB(A) only
            let img = match img {
                DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => img.clone(),
                other => DynamicImage::ImageRgba8(other.to_rgba8()),
            };
            img.write_to(&mut Cursor::new(&mut buf), format.to_image_format())?;
        }
        OutputFormat::WebP | OutputFormat::Bmp => {
            img.write_to(&mut Cursor::new(&mut buf), format.to_image_format())?;
        }
    }

    Ok(buf)
}

/// Huffman-optimized JPEG at `quality`. JPEG has no alpha channel; callers
/// flatten first, anything that is not grayscale is narrowed to RGB here.
fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let (color_space, pixels) = match img {
        DynamicImage::ImageLuma8(gray) => (ColorSpace::JCS_GRAYSCALE, gray.as_raw().clone()),
        other => (ColorSpace::JCS_RGB, other.to_rgb8().into_raw()),
    };

    let mut comp = Compress::new(color_space);
    comp.set_size(img.width() as usize, img.height() as usize);
    comp.set_quality(quality as f32);
    comp.set_optimize_coding(true);

    let mut dest = Vec::new();
    let mut writer = comp.start_compress(&mut dest)?;
    writer.write_scanlines(&pixels)?;
    writer.finish()?;

    Ok(dest)
}

fn optimize_png(data: &[u8]) -> Result<Vec<u8>> {
    let options = oxipng::Options::from_preset(OXIPNG_PRESET);
    oxipng::optimize_from_memory(data, &options)
        .map_err(|e| ConversionError::PngOptimization(e.to_string()))
}

/// Pixel dimensions of an encoded image without holding on to it.
pub fn image_dimensions(path: &Path) -> Result<(u32, u32)> {
    Ok(image::image_dimensions(path)?)
}
