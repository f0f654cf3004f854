// Section-title detection prompt.

use crate::llm_client::prompts::{image_context, JSON_ONLY_INSTRUCTION};

/// Section headers a profile page can show, with the letter the marker should land on.
pub const KNOWN_SECTION_TITLES: &[(&str, char)] = &[
    ("About", 'A'),
    ("Experience", 'E'),
    ("Education", 'E'),
    ("Skills", 'S'),
    ("Recommendations", 'R'),
    ("Accomplishments", 'A'),
    ("Certifications", 'C'),
    ("Languages", 'L'),
    ("Volunteer experience", 'V'),
    ("Projects", 'P'),
    ("Publications", 'P'),
    ("Honors & awards", 'H'),
    ("Test scores", 'T'),
    ("Courses", 'C'),
    ("Organizations", 'O'),
    ("Patents", 'P'),
    ("Licenses & certifications", 'L'),
    ("Contact info", 'C'),
];

pub const DETECTION_PROMPT_TEMPLATE: &str = r#"You are a computer vision expert specializing in precise text localization in professional profile screenshots.
Identify the position of the FIRST LETTER of each section title in this screenshot.

{image_context}

INSTRUCTIONS:
1. Section titles are headers: bold, larger font, standalone, left-aligned, with vertical spacing around them.
2. For each title found, locate the leftmost and topmost pixel of its FIRST letter. Ignore icons, bullets, and spacing.
3. x = distance from the left edge, y = distance from the top edge, both as percentages (0-100).
4. When several titles start with the same letter, match on the full title text.

SECTION TITLES TO DETECT:
{section_list}

RESPONSE FORMAT:
{
  "detected_sections": [
    {
      "section_name": "Experience",
      "first_letter": "E",
      "title_coordinates": [x_percentage, y_percentage],
      "confidence": 95,
      "font_size_estimate": "large/medium/small",
      "text_style": "bold/normal",
      "notes": "Clear header, bold formatting"
    }
  ],
  "detection_metadata": {
    "total_sections_found": 5,
    "image_dimensions": [width, height],
    "layout_type": "desktop/mobile",
    "scroll_position": "top/middle/bottom",
    "text_clarity": "high/medium/low"
  }
}

QUALITY RULES:
- Only include sections whose first letter is clearly visible.
- confidence 80+ for precise coordinates, 60-79 for estimated positions.
- If text is blurry or partially obscured, say so in "notes" and still give a best estimate.

{json_only}"#;

/// Fills the detection template for a screenshot of the given size.
pub fn build_detection_prompt(width: u32, height: u32) -> String {
    let section_list = KNOWN_SECTION_TITLES
        .iter()
        .map(|(title, letter)| format!("- \"{title}\" (first letter: {letter})"))
        .collect::<Vec<_>>()
        .join("\n");

    DETECTION_PROMPT_TEMPLATE
        .replace("{image_context}", &image_context(width, height))
        .replace("{section_list}", &section_list)
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
}
