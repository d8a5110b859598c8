pub const DEFAULT_QUALITY: u8 = 85;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

/// Longest edge, in pixels, an optimized image may keep.
pub const DEFAULT_MAX_DIMENSION: u32 = 1920;

pub const DEFAULT_SOURCE_DIR: &str = "portoflio";
pub const DEFAULT_DESTINATION_DIR: &str = "portoflio_optimized";

/// Extensions picked up by the directory scan, compared case-insensitively.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp"];

// Enhancement chain
pub const UNSHARP_RADIUS: f32 = 1.0;
pub const UNSHARP_PERCENT: i32 = 120;
pub const UNSHARP_THRESHOLD: i32 = 3;
pub const CONTRAST_FACTOR: f32 = 1.05;
pub const COLOR_FACTOR: f32 = 1.1;

pub const OXIPNG_PRESET: u8 = 2;

pub const SUMMARY_RULE_WIDTH: usize = 60;
pub const PROGRESS_BAR_TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}";

// Report line prefixes
pub const SUCCESS_PREFIX: &str = "✓";
pub const ERROR_PREFIX: &str = "Error:";
