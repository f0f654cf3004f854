// Step 1: section-title coordinate detection.
// Failures here are recoverable; the pipeline continues without coordinate context.

pub mod extractor;
pub mod prompts;

pub use extractor::detect_sections;
