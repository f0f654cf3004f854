// Step 3: static HTML report.
// Rendering is a pure function of its inputs; the pipeline owns the file write.

pub mod document;
pub mod template;

use chrono::{DateTime, Utc};

pub use document::{Fragment, ReportDocument};

use crate::models::{CoordinateDetectionResult, ProfileAnalysis};
use crate::screenshot::Screenshot;

/// Builds and serializes the full report document.
pub fn render_report(
    screenshot: &Screenshot,
    analysis: &ProfileAnalysis,
    detection: Option<&CoordinateDetectionResult>,
    generated_at: DateTime<Utc>,
) -> String {
    ReportDocument::build(screenshot, analysis, detection, generated_at).to_html()
}
