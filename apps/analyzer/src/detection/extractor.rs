//! Coordinate Extractor: asks the model where each section title starts, then
//! normalises the answer.
//!
//! Post-processing order matters and is fixed:
//! sort by y → clamp x,y into [0, 100] → nudge x left by 0.5 → tag precision.

use tracing::{debug, info};

use crate::detection::prompts::build_detection_prompt;
use crate::errors::AnalyzerError;
use crate::llm_client::extract::extract_json;
use crate::llm_client::VisionModel;
use crate::models::{CoordinateDetectionResult, CoordinatePrecision, DetectedSection};
use crate::screenshot::Screenshot;

const MIN_PCT: f64 = 0.0;
const MAX_PCT: f64 = 100.0;
/// Detected x positions overshoot to the right; markers are pulled back by this much.
const X_NUDGE: f64 = 0.5;

/// Runs the detection call and post-processes the result.
///
/// An `Ok` with zero sections means the model found nothing; upstream and
/// parse failures are always `Err`.
pub async fn detect_sections(
    model: &dyn VisionModel,
    screenshot: &Screenshot,
) -> Result<CoordinateDetectionResult, AnalyzerError> {
    let prompt = build_detection_prompt(screenshot.width, screenshot.height);
    let text = model.generate(&prompt, screenshot).await?;

    let mut result: CoordinateDetectionResult = extract_json(&text).inspect_err(|e| {
        if let AnalyzerError::MalformedResponse { raw, .. } = e {
            debug!("Raw detection response: {raw}");
        }
    })?;

    if let Some(reported) = result.detection_metadata.total_sections_found() {
        debug!(
            "Model reported {reported} sections, returned {}",
            result.detected_sections.len()
        );
    }

    post_process(&mut result.detected_sections);
    info!(
        "Detected {} section titles via {}",
        result.detected_sections.len(),
        model.model_name()
    );
    Ok(result)
}

/// Applies the fixed normalisation sequence in place.
pub fn post_process(sections: &mut [DetectedSection]) {
    sort_by_vertical(sections);

    for section in sections.iter_mut() {
        let x = clamp_percent(section.x());
        let y = clamp_percent(section.y());
        section.title_coordinates = [nudge_left(x), y];
        section.coordinate_precision = Some(CoordinatePrecision::from_confidence(section.confidence));
    }
}

/// Stable ascending sort on the y coordinate (top of the page first).
pub fn sort_by_vertical(sections: &mut [DetectedSection]) {
    sections.sort_by(|a, b| a.y().total_cmp(&b.y()));
}

/// Clamps into `[0, 100]`. NaN maps to 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        MIN_PCT
    } else {
        value.clamp(MIN_PCT, MAX_PCT)
    }
}

fn nudge_left(x: f64) -> f64 {
    (x - X_NUDGE).max(MIN_PCT)
}
