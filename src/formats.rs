//! Image format handling keyed on file extensions
//!
//! The optimizer never converts between containers: the output keeps the
//! input's file name, so the encoder is chosen from the extension alone.

use crate::constants::SUPPORTED_IMAGE_EXTENSIONS;
use crate::error::{ConversionError, Result};
use image::ImageFormat;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Output encoders the optimizer knows how to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossy JPEG at the configured quality
    Jpeg,
    /// Lossless PNG, re-compressed with oxipng
    Png,
    /// Library default WebP encoder
    WebP,
    /// Library default GIF encoder
    Gif,
    /// Library default BMP encoder
    Bmp,
}

impl OutputFormat {
    /// Convert to the image crate's ImageFormat
    pub fn to_image_format(&self) -> ImageFormat {
        match self {
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::WebP => ImageFormat::WebP,
            OutputFormat::Gif => ImageFormat::Gif,
            OutputFormat::Bmp => ImageFormat::Bmp,
        }
    }

    /// JPEG output cannot carry alpha, so transparent inputs get flattened.
    pub fn is_jpeg_family(&self) -> bool {
        matches!(self, OutputFormat::Jpeg)
    }

    /// Resolve the encoder for a destination path from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ConversionError::UnsupportedFormat(format!(
                    "{} has no usable extension",
                    path.display()
                ))
            })?;
        OutputFormat::from_str(ext)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Png => "PNG",
            OutputFormat::WebP => "WebP",
            OutputFormat::Gif => "GIF",
            OutputFormat::Bmp => "BMP",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for OutputFormat {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            "webp" => Ok(OutputFormat::WebP),
            "gif" => Ok(OutputFormat::Gif),
            "bmp" => Ok(OutputFormat::Bmp),
            _ => Err(ConversionError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Check if a file path carries one of the allow-listed image extensions
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            SUPPORTED_IMAGE_EXTENSIONS.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}
