//! Size and ratio helpers shared by the per-file and summary report lines

const KIB: u64 = 1024;
const MIB: f64 = 1024.0 * 1024.0;

/// Calculate size reduction as a percentage
///
/// # Arguments
/// * `original_size` - Original file size in bytes
/// * `new_size` - Optimized file size in bytes
///
/// # Returns
/// * Reduction as percentage (positive means smaller, negative means the
///   file grew). Zero when the original size is zero.
pub fn calculate_reduction(original_size: u64, new_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - new_size as f64) / original_size as f64) * 100.0
}

/// Whole kilobytes, truncated
pub fn to_kilobytes(bytes: u64) -> u64 {
    bytes / KIB
}

pub fn to_megabytes(bytes: u64) -> f64 {
    bytes as f64 / MIB
}
