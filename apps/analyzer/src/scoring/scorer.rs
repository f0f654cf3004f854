//! Profile Scorer: one model call that returns the full critique.
//!
//! The detection result, when present, is only prompt context. The scorer's own
//! section coordinates are taken as-is and may disagree with it.

use tracing::{debug, info};

use crate::errors::AnalyzerError;
use crate::llm_client::extract::extract_json;
use crate::llm_client::prompts::{image_context, JSON_ONLY_INSTRUCTION};
use crate::llm_client::VisionModel;
use crate::models::{CoordinateDetectionResult, ProfileAnalysis};
use crate::scoring::prompts::{COORDINATE_CONTEXT_TEMPLATE, SCORING_PROMPT_TEMPLATE};
use crate::screenshot::Screenshot;

pub async fn score_profile(
    model: &dyn VisionModel,
    screenshot: &Screenshot,
    coordinates: Option<&CoordinateDetectionResult>,
) -> Result<ProfileAnalysis, AnalyzerError> {
    let prompt = build_scoring_prompt(screenshot, coordinates)?;
    let text = model.generate(&prompt, screenshot).await?;

    let analysis: ProfileAnalysis = extract_json(&text).inspect_err(|e| {
        if let AnalyzerError::MalformedResponse { raw, .. } = e {
            debug!("Raw scoring response: {raw}");
        }
    })?;

    info!(
        "Profile scored {}/100 across {} sections",
        analysis.overall_score,
        analysis.sections.len()
    );
    Ok(analysis)
}

/// Fills the scoring template. The coordinate block is omitted entirely when
/// there is no detection result or it found nothing.
fn build_scoring_prompt(
    screenshot: &Screenshot,
    coordinates: Option<&CoordinateDetectionResult>,
) -> Result<String, AnalyzerError> {
    let coordinate_context = match coordinates.filter(|c| !c.is_empty()) {
        Some(result) => {
            let sections_json = serde_json::to_string_pretty(&result.detected_sections).map_err(|e| {
                AnalyzerError::Internal(anyhow::anyhow!("Failed to serialize detected sections: {e}"))
            })?;
            COORDINATE_CONTEXT_TEMPLATE.replace("{sections_json}", &sections_json)
        }
        None => String::new(),
    };

    Ok(SCORING_PROMPT_TEMPLATE
        .replace("{image_context}", &image_context(screenshot.width, screenshot.height))
        .replace("{coordinate_context}", &coordinate_context)
        .replace("{json_only}", JSON_ONLY_INSTRUCTION))
}
