use crate::constants::{DEFAULT_DESTINATION_DIR, DEFAULT_SOURCE_DIR};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "img-optimize",
    about = "Resize, sharpen and re-encode every image in a folder",
    long_about = "img-optimize walks a single folder, shrinks images whose longest edge exceeds \
                  the maximum size, applies a light sharpen/contrast/color pass and re-encodes \
                  each file in its original format under the same name in the output folder.",
    version,
    after_help = "EXAMPLES:\n  \
    img-optimize\n  \
    img-optimize ./photos ./photos_web\n  \
    img-optimize ./photos ./photos_web -q 80 -m 1280"
)]
pub struct Args {
    #[arg(
        default_value = DEFAULT_SOURCE_DIR,
        help = "Folder to read images from"
    )]
    pub source: PathBuf,

    #[arg(
        default_value = DEFAULT_DESTINATION_DIR,
        help = "Folder to write optimized images to (created if missing)"
    )]
    pub destination: PathBuf,

    #[arg(
        short = 'q',
        long,
        help = "JPEG quality (1-100, default: 85)",
        long_help = "Compression quality for JPEG output, from 1 (smallest) to 100 (best). \
                     PNG, WebP, GIF and BMP output ignore this setting."
    )]
    pub quality: Option<u8>,

    #[arg(
        short = 'm',
        long,
        help = "Maximum width or height in pixels (default: 1920)",
        long_help = "Images whose longest edge exceeds this size are scaled down, \
                     preserving the aspect ratio."
    )]
    pub max_size: Option<u32>,

    #[arg(short = 'v', long, help = "Print per-step diagnostics to stderr")]
    pub verbose: bool,

    #[arg(long, conflicts_with = "verbose", help = "Hide the progress bar and warnings")]
    pub quiet: bool,
}
