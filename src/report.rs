use crate::constants::{ERROR_PREFIX, SUCCESS_PREFIX, SUMMARY_RULE_WIDTH};
use crate::utils::{calculate_reduction, to_kilobytes, to_megabytes};
use std::fmt::Write;

/// Running totals for one optimizer run.
///
/// Only successful conversions contribute bytes; failures are counted
/// separately and never touch the totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    pub total_before: u64,
    pub total_after: u64,
    pub count: usize,
    pub failed: usize,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, before: u64, after: u64) {
        self.total_before += before;
        self.total_after += after;
        self.count += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn reduction(&self) -> f64 {
        calculate_reduction(self.total_before, self.total_after)
    }
}

/// `✓ name (123KB → 45KB, 63.4%)`
pub fn format_file_line(name: &str, before: u64, after: u64) -> String {
    format!(
        "{} {} ({}KB → {}KB, {:.1}%)",
        SUCCESS_PREFIX,
        name,
        to_kilobytes(before),
        to_kilobytes(after),
        calculate_reduction(before, after)
    )
}

/// `Error: name: message`
pub fn format_error_line(name: &str, error: &dyn std::fmt::Display) -> String {
    format!("{} {}: {}", ERROR_PREFIX, name, error)
}

/// The closing block, starting with a blank line and framed by rules.
pub fn format_summary(stats: &RunStatistics) -> String {
    let rule = "=".repeat(SUMMARY_RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Optimized: {} images", stats.count);
    if stats.failed > 0 {
        let _ = writeln!(out, "Failed: {} images", stats.failed);
    }
    let _ = writeln!(
        out,
        "Size: {:.2} MB → {:.2} MB",
        to_megabytes(stats.total_before),
        to_megabytes(stats.total_after)
    );
    let _ = writeln!(out, "Reduction: {:.1}%", stats.reduction());
    let _ = write!(out, "{}", rule);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_accumulate_successes_only() {
        let mut stats = RunStatistics::new();
        stats.record_success(2048, 1024);
        stats.record_failure();
        stats.record_success(4096, 1024);

        assert_eq!(stats.total_before, 6144);
        assert_eq!(stats.total_after, 2048);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.failed, 1);
    }

    #[test]
    fn test_statistics_reduction() {
        let mut stats = RunStatistics::new();
        assert_eq!(stats.reduction(), 0.0);

        stats.record_success(1000, 250);
        assert_eq!(stats.reduction(), 75.0);
    }

    #[test]
    fn test_format_file_line() {
        assert_eq!(
            format_file_line("beach.jpg", 512_000, 128_000),
            "✓ beach.jpg (500KB → 125KB, 75.0%)"
        );
        assert_eq!(
            format_file_line("empty.png", 0, 100),
            "✓ empty.png (0KB → 0KB, 0.0%)"
        );
    }

    #[test]
    fn test_format_file_line_growth() {
        assert_eq!(
            format_file_line("tiny.gif", 1000, 1100),
            "✓ tiny.gif (0KB → 1KB, -10.0%)"
        );
    }

    #[test]
    fn test_format_error_line() {
        let err = crate::error::ConversionError::UnsupportedFormat("tiff".to_string());
        assert_eq!(
            format_error_line("scan.jpg", &err),
            "Error: scan.jpg: Unsupported format: tiff"
        );
    }

    #[test]
    fn test_format_summary() {
        let stats = RunStatistics {
            total_before: 4 * 1024 * 1024,
            total_after: 1024 * 1024,
            count: 3,
            failed: 0,
        };
        let rule = "=".repeat(60);
        let expected = format!(
            "\n{rule}\nOptimized: 3 images\nSize: 4.00 MB → 1.00 MB\nReduction: 75.0%\n{rule}"
        );
        assert_eq!(format_summary(&stats), expected);
    }

    #[test]
    fn test_format_summary_mentions_failures() {
        let stats = RunStatistics {
            failed: 2,
            ..RunStatistics::default()
        };
        let summary = format_summary(&stats);
        assert!(summary.contains("Optimized: 0 images"));
        assert!(summary.contains("Failed: 2 images"));
        assert!(summary.contains("Reduction: 0.0%"));
    }
}
