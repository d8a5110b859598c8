use crate::constants::PROGRESS_BAR_TEMPLATE;
use crate::error::{ConversionError, Result};
use crate::formats::is_image_file;
use crate::processing::{display_name, optimize_image, OptimizeOptions};
use crate::report::{format_file_line, format_summary, RunStatistics};
use crate::{logger, verbose, warn};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

/// Optimizes every allow-listed image directly inside `source` into
/// `destination`, printing one line per file and a closing summary.
///
/// Per-file failures are reported and skipped. Only directory-level
/// problems (missing source, unwritable destination, unreadable listing)
/// abort the run.
pub fn optimize_directory(
    source: &Path,
    destination: &Path,
    options: &OptimizeOptions,
) -> Result<RunStatistics> {
    let start_time = Instant::now();

    if !source.is_dir() {
        return Err(ConversionError::SourceNotFound(source.to_path_buf()));
    }

    fs::create_dir_all(destination)
        .map_err(|e| ConversionError::DirectoryCreationFailed(destination.to_path_buf(), e))?;

    let image_files = collect_image_files(source)?;
    verbose!(
        "Found {} image files in {}",
        image_files.len(),
        source.display()
    );
    if image_files.is_empty() {
        warn!("No image files found in {}", source.display());
    }

    let progress = create_progress_bar(image_files.len() as u64);
    let mut stats = RunStatistics::new();

    for input_path in &image_files {
        let name = display_name(input_path);
        progress.set_message(name.clone());

        let output_path = destination.join(input_path.file_name().unwrap_or_default());
        let original_size = fs::metadata(input_path).map(|m| m.len());

        if !progress.suspend(|| optimize_image(input_path, &output_path, options)) {
            stats.record_failure();
        } else {
            match original_size.and_then(|before| Ok((before, fs::metadata(&output_path)?.len()))) {
                Ok((before, after)) => {
                    stats.record_success(before, after);
                    progress.suspend(|| println!("{}", format_file_line(&name, before, after)));
                }
                Err(e) => {
                    stats.record_failure();
                    warn!("Could not measure {}: {}", name, e);
                }
            }
        }
        progress.inc(1);
    }

    progress.finish_and_clear();

    println!("{}", format_summary(&stats));
    verbose!("Total time: {:.2?}", start_time.elapsed());

    Ok(stats)
}

/// Lists regular files directly inside `source` whose extension is on the
/// allow-list, sorted by file name. Subdirectories are not descended into.
pub fn collect_image_files(source: &Path) -> Result<Vec<PathBuf>> {
    let mut image_files = Vec::new();

    let walker = WalkDir::new(source)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() && is_image_file(path) {
            image_files.push(path.to_path_buf());
        } else {
            verbose!("Skipping {}", path.display());
        }
    }

    Ok(image_files)
}

fn create_progress_bar(len: u64) -> ProgressBar {
    if logger::is_quiet() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(PROGRESS_BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
    use std::fs::File;
    use tempfile::TempDir;

    fn write_photo(path: &Path, width: u32, height: u32) {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 251) as u8, (y % 241) as u8, ((x + y) % 239) as u8])
        }))
        .save(path)
        .unwrap();
    }

    #[test]
    fn test_collect_image_files_filters_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        File::create(temp_dir.path().join("b.PNG")).unwrap();
        File::create(temp_dir.path().join("a.jpg")).unwrap();
        File::create(temp_dir.path().join("notes.txt")).unwrap();
        File::create(temp_dir.path().join("scan.tiff")).unwrap();

        let files = collect_image_files(temp_dir.path()).unwrap();
        let names: Vec<_> = files.iter().map(|p| display_name(p)).collect();
        assert_eq!(names, vec!["a.jpg", "b.PNG"]);
    }

    #[test]
    fn test_collect_image_files_non_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("nested.jpg");
        fs::create_dir(&subdir).unwrap();
        File::create(subdir.join("inner.jpg")).unwrap();
        File::create(temp_dir.path().join("top.gif")).unwrap();

        let files = collect_image_files(temp_dir.path()).unwrap();
        assert_eq!(files, vec![temp_dir.path().join("top.gif")]);
    }

    #[test]
    fn test_collect_image_files_empty() {
        let temp_dir = TempDir::new().unwrap();
        assert!(collect_image_files(temp_dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_optimize_directory_missing_source() {
        let temp_dir = TempDir::new().unwrap();
        let result = optimize_directory(
            &temp_dir.path().join("missing"),
            &temp_dir.path().join("out"),
            &OptimizeOptions::default(),
        );
        assert!(matches!(result, Err(ConversionError::SourceNotFound(_))));
        assert!(!temp_dir.path().join("out").exists());
    }

    #[test]
    fn test_optimize_directory_creates_destination() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        let destination = temp_dir.path().join("deep").join("out");
        fs::create_dir(&source).unwrap();

        let stats = optimize_directory(&source, &destination, &OptimizeOptions::default()).unwrap();
        assert!(destination.is_dir());
        assert_eq!(stats, RunStatistics::default());
    }

    #[test]
    fn test_optimize_directory_destination_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        let destination = temp_dir.path().join("taken");
        fs::create_dir(&source).unwrap();
        fs::write(&destination, b"occupied").unwrap();

        let err = optimize_directory(&source, &destination, &OptimizeOptions::default()).unwrap_err();
        assert!(matches!(err, ConversionError::DirectoryCreationFailed(ref p, _) if *p == destination));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_optimize_directory_totals_match_outputs() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        let destination = temp_dir.path().join("out");
        fs::create_dir(&source).unwrap();

        write_photo(&source.join("wide.jpg"), 400, 100);
        write_photo(&source.join("small.png"), 50, 40);
        RgbaImage::from_pixel(30, 30, Rgba([255, 0, 0, 64]))
            .save(source.join("overlay.png"))
            .unwrap();
        fs::write(source.join("corrupt.jpg"), b"not really a jpeg").unwrap();
        fs::write(source.join("readme.md"), b"# hi").unwrap();

        let options = OptimizeOptions::new(None, Some(200)).unwrap();
        let stats = optimize_directory(&source, &destination, &options).unwrap();

        assert_eq!(stats.count, 3);
        assert_eq!(stats.failed, 1);
        assert!(!destination.join("corrupt.jpg").exists());
        assert!(!destination.join("readme.md").exists());

        let mut before = 0;
        let mut after = 0;
        for name in ["wide.jpg", "small.png", "overlay.png"] {
            before += fs::metadata(source.join(name)).unwrap().len();
            after += fs::metadata(destination.join(name)).unwrap().len();
        }
        assert_eq!(stats.total_before, before);
        assert_eq!(stats.total_after, after);

        let wide = image::open(destination.join("wide.jpg")).unwrap();
        assert_eq!((wide.width(), wide.height()), (200, 50));
    }
}
