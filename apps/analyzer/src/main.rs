mod config;
mod detection;
mod errors;
mod llm_client;
mod models;
mod pipeline;
mod render;
mod scoring;
mod screenshot;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{GeminiClient, VisionModel};
use crate::pipeline::{analyze_and_create_report, ReportArtifacts};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when the pipeline failed and the failure was already reported.
async fn run() -> Result<bool> {
    // Configuration first; a missing API key stops here.
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting profile analyzer v{}", env!("CARGO_PKG_VERSION"));

    let model = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_api_base.clone(),
        config.gemini_model.clone(),
        Duration::from_secs(config.llm_timeout_secs),
        config.llm_max_attempts,
    )?;
    info!(
        "Model client initialized (model: {}, attempts: {})",
        model.model_name(),
        config.llm_max_attempts
    );

    let outcome = analyze_and_create_report(
        &model,
        &config.image_path,
        &config.output_dir,
        chrono::Utc::now(),
    )
    .await;

    match outcome {
        Ok(artifacts) => {
            print_summary(&config, &artifacts);
            Ok(true)
        }
        Err(e) if e.is_input_not_found() => {
            error!("{e}");
            println!("Error: image file '{}' not found", config.image_path.display());
            println!("Please ensure the profile screenshot exists at the specified path");
            Ok(false)
        }
        Err(e) => {
            error!("{e}");
            println!("Error during analysis: {e}");
            println!("Please check your API key and image file");
            Ok(false)
        }
    }
}

fn print_summary(config: &Config, artifacts: &ReportArtifacts) {
    println!();
    println!("Analysis complete! Score: {}/100", artifacts.analysis.overall_score);
    println!("Output directory: {}", config.output_dir.display());
    println!("  html_report: {}", artifacts.html_report.display());
    println!("  analysis_json: {}", artifacts.analysis_json.display());
    match (&artifacts.coordinates_json, &artifacts.section_coordinates) {
        (Some(path), Some(result)) => println!(
            "  coordinates_json: {} ({} sections)",
            path.display(),
            result.detected_sections.len()
        ),
        _ => println!("  coordinates_json: not detected"),
    }
}
