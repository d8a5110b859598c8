pub mod batch;
pub mod cli;
pub mod constants;
pub mod enhance;
pub mod error;
pub mod formats;
pub mod logger;
pub mod processing;
pub mod report;
pub mod utils;

pub use batch::{collect_image_files, optimize_directory};
pub use enhance::{apply_enhancement_chain, enhance_color, enhance_contrast, unsharp_mask};
pub use error::{ConversionError, Result};
pub use formats::{is_image_file, OutputFormat};
pub use processing::{
    convert_image, encode_image, fit_dimensions, flatten_onto_white, load_image, optimize_image,
    process_image, resize_to_fit, OptimizeOptions,
};
pub use report::RunStatistics;
