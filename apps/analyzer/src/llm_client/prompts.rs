// Shared prompt fragments.
// Detection and scoring each keep their own prompts.rs next to the code that uses them.

/// Appended to every prompt. Responses are still run through `extract::extract_json`,
/// because models do not reliably honour it.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond with a single valid JSON object only. \
    Do NOT include explanations, apologies, or any text outside the JSON object.";

/// States the pixel size of the screenshot so the model can reason about proportions.
/// Coordinates are still requested as percentages.
pub fn image_context(width: u32, height: u32) -> String {
    format!(
        "The screenshot is {width}x{height} pixels. \
        Express every coordinate as a percentage (0-100) of the image width or height, \
        measured from the top-left corner."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_context_mentions_dimensions() {
        let text = image_context(1280, 4000);
        assert!(text.contains("1280x4000"));
        assert!(text.contains("percentage"));
    }
}
