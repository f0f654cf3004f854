//! Analysis pipeline: orchestrates the three steps and owns every file write.
//!
//! Flow: load screenshot → detect section coordinates (recoverable) →
//!       score profile (fatal on failure) → render report.
//!
//! The HTML report is only written once a valid `ProfileAnalysis` exists.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::detection::detect_sections;
use crate::errors::AnalyzerError;
use crate::llm_client::VisionModel;
use crate::models::{CoordinateDetectionResult, ProfileAnalysis};
use crate::render::render_report;
use crate::scoring::score_profile;
use crate::screenshot::Screenshot;

pub const COORDINATES_FILE: &str = "detected_coordinates.json";
pub const ANALYSIS_FILE: &str = "analysis_results.json";
pub const REPORT_FILE: &str = "linkedin_analysis.html";

const STEP_LOAD: &str = "load screenshot";
const STEP_DETECT: &str = "section coordinate detection";
const STEP_SCORE: &str = "profile scoring";
const STEP_RENDER: &str = "report rendering";

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct ReportArtifacts {
    pub html_report: PathBuf,
    pub analysis_json: PathBuf,
    /// `None` when detection failed and the run continued without coordinates.
    pub coordinates_json: Option<PathBuf>,
    pub section_coordinates: Option<CoordinateDetectionResult>,
    pub analysis: ProfileAnalysis,
}

/// Runs the full workflow against `screenshot_path`, writing all outputs under `output_dir`.
pub async fn analyze_and_create_report(
    model: &dyn VisionModel,
    screenshot_path: &Path,
    output_dir: &Path,
    generated_at: DateTime<Utc>,
) -> Result<ReportArtifacts, AnalyzerError> {
    let screenshot = Screenshot::open(screenshot_path)
        .await
        .map_err(|e| e.in_step(STEP_LOAD))?;

    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|source| {
            AnalyzerError::WriteFailure {
                path: output_dir.to_path_buf(),
                source,
            }
            .in_step(STEP_LOAD)
        })?;

    // Step 1: coordinates. Any failure degrades to "no coordinate context".
    println!("Step 1: Detecting section coordinates...");
    let (section_coordinates, coordinates_json) = match detect_sections(model, &screenshot).await {
        Ok(result) => {
            println!("  Detected {} sections", result.detected_sections.len());
            let path = output_dir.join(COORDINATES_FILE);
            write_json(&path, &result)
                .await
                .map_err(|e| e.in_step(STEP_DETECT))?;
            println!("  Coordinates saved to: {}", path.display());
            (Some(result), Some(path))
        }
        Err(e) => {
            warn!("Step '{STEP_DETECT}' failed, continuing without coordinate context: {e}");
            println!("  Coordinate detection failed, proceeding with estimated positions");
            (None, None)
        }
    };

    // Step 2: scoring. Without an analysis there is nothing to render.
    println!("Step 2: Analyzing profile...");
    let analysis = score_profile(model, &screenshot, section_coordinates.as_ref())
        .await
        .map_err(|e| e.in_step(STEP_SCORE))?;
    let analysis_json = output_dir.join(ANALYSIS_FILE);
    write_json(&analysis_json, &analysis)
        .await
        .map_err(|e| e.in_step(STEP_SCORE))?;
    println!("  Analysis saved to: {}", analysis_json.display());

    // Step 3: report.
    println!("Step 3: Creating interactive HTML report...");
    let html = render_report(&screenshot, &analysis, section_coordinates.as_ref(), generated_at);
    let html_report = output_dir.join(REPORT_FILE);
    write_file(&html_report, html.as_bytes())
        .await
        .map_err(|e| e.in_step(STEP_RENDER))?;
    info!(
        "Report written to {} ({} markers)",
        html_report.display(),
        analysis.sections.len()
    );

    Ok(ReportArtifacts {
        html_report,
        analysis_json,
        coordinates_json,
        section_coordinates,
        analysis,
    })
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AnalyzerError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        AnalyzerError::Internal(anyhow::anyhow!(
            "Failed to serialize {}: {e}",
            path.display()
        ))
    })?;
    write_file(path, json.as_bytes()).await
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<(), AnalyzerError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| AnalyzerError::WriteFailure {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::CannedModel;
    use crate::screenshot::sample_png;
    use serde_json::json;

    const DETECTION_REPLY: &str = r#"```json
{"detected_sections": [
  {"section_name": "Skills", "first_letter": "S", "title_coordinates": [4.0, 70.0], "confidence": 88},
  {"section_name": "About", "first_letter": "A", "title_coordinates": [4.0, 25.0], "confidence": 75}
], "detection_metadata": {"total_sections_found": 2}}
```"#;

    fn scoring_reply() -> String {
        json!({
            "overall_score": 92,
            "overall_feedback": "Polished profile.",
            "competitive_advantages": ["Clear headline"],
            "sections": [
                {"name": "Headline", "coordinates": [10.0, 20.0], "criticality": "green", "score": 90, "comment": "Strong"}
            ]
        })
        .to_string()
    }

    fn write_screenshot(dir: &Path) -> PathBuf {
        let path = dir.join("profile.png");
        std::fs::write(&path, sample_png(16, 32)).unwrap();
        path
    }

    #[tokio::test]
    async fn test_full_run_writes_all_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_screenshot(dir.path());
        let out = dir.path().join("nested").join("out");
        let scoring = scoring_reply();
        let model = CannedModel::texts(&[DETECTION_REPLY, scoring.as_str()]);

        let artifacts = analyze_and_create_report(&model, &image, &out, Utc::now())
            .await
            .unwrap();

        assert_eq!(artifacts.html_report, out.join(REPORT_FILE));
        assert_eq!(artifacts.coordinates_json, Some(out.join(COORDINATES_FILE)));

        let coords: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out.join(COORDINATES_FILE)).unwrap()).unwrap();
        assert_eq!(coords["detected_sections"][0]["section_name"], "About");
        assert_eq!(coords["detected_sections"][0]["title_coordinates"], json!([3.5, 25.0]));
        assert_eq!(coords["detected_sections"][1]["coordinate_precision"], "high");

        let html = std::fs::read_to_string(&artifacts.html_report).unwrap();
        assert!(html.contains("score-excellent"));
        assert!(html.contains("left: 13.0%; top: 20.0%;"));
        assert!(html.contains("2 section headers located"));

        // scoring prompt carried the detected coordinates
        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].contains("DETECTED SECTION COORDINATES"));
    }

    #[tokio::test]
    async fn test_detection_failure_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_screenshot(dir.path());
        let out = dir.path().join("out");
        let scoring = scoring_reply();
        let model = CannedModel::new(vec![
            Err(CannedModel::upstream_failure()),
            Ok(scoring),
        ]);

        let artifacts = analyze_and_create_report(&model, &image, &out, Utc::now())
            .await
            .unwrap();

        assert!(artifacts.coordinates_json.is_none());
        assert!(artifacts.section_coordinates.is_none());
        assert!(!out.join(COORDINATES_FILE).exists());
        assert!(out.join(REPORT_FILE).exists());
        assert!(out.join(ANALYSIS_FILE).exists());

        let prompts = model.prompts.lock().unwrap();
        assert!(!prompts[1].contains("DETECTED SECTION COORDINATES"));
    }

    #[tokio::test]
    async fn test_scoring_failure_is_fatal_and_writes_no_html() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_screenshot(dir.path());
        let out = dir.path().join("out");
        let model = CannedModel::texts(&[DETECTION_REPLY, "Sorry, I can't help with that."]);

        let err = analyze_and_create_report(&model, &image, &out, Utc::now())
            .await
            .unwrap_err();

        match &err {
            AnalyzerError::StepFailed { step, source } => {
                assert_eq!(*step, STEP_SCORE);
                assert!(matches!(**source, AnalyzerError::MalformedResponse { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!err.is_input_not_found());
        assert!(!out.join(REPORT_FILE).exists());
        assert!(!out.join(ANALYSIS_FILE).exists());
    }

    #[tokio::test]
    async fn test_missing_image_is_input_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let model = CannedModel::texts(&[]);
        let err = analyze_and_create_report(
            &model,
            &dir.path().join("nope.png"),
            &dir.path().join("out"),
            Utc::now(),
        )
        .await
        .unwrap_err();

        assert!(err.is_input_not_found());
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unwritable_output_dir_names_its_step() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_screenshot(dir.path());
        // a regular file where the output directory should go
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, b"").unwrap();
        let model = CannedModel::texts(&[]);

        let err = analyze_and_create_report(&model, &image, &blocker.join("out"), Utc::now())
            .await
            .unwrap_err();

        match &err {
            AnalyzerError::StepFailed { step, source } => {
                assert_eq!(*step, STEP_LOAD);
                assert!(matches!(**source, AnalyzerError::WriteFailure { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_artifact_write_failure_names_its_step() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_screenshot(dir.path());
        let out = dir.path().join("out");
        // a directory squatting on the analysis file path makes the write fail
        std::fs::create_dir_all(out.join(ANALYSIS_FILE)).unwrap();
        let scoring = scoring_reply();
        let model = CannedModel::texts(&[DETECTION_REPLY, scoring.as_str()]);

        let err = analyze_and_create_report(&model, &image, &out, Utc::now())
            .await
            .unwrap_err();

        match &err {
            AnalyzerError::StepFailed { step, source } => {
                assert_eq!(*step, STEP_SCORE);
                assert!(matches!(**source, AnalyzerError::WriteFailure { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(out.join(COORDINATES_FILE).exists());
        assert!(!out.join(REPORT_FILE).exists());
    }
}
