use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::models::lenient;

/// Precision tier attached after post-processing. Only two tiers exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinatePrecision {
    High,
    Medium,
}

impl CoordinatePrecision {
    pub const HIGH_CONFIDENCE: f64 = 85.0;

    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= Self::HIGH_CONFIDENCE {
            CoordinatePrecision::High
        } else {
            CoordinatePrecision::Medium
        }
    }
}

/// A section title located by the detection call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedSection {
    #[serde(default, deserialize_with = "lenient::text")]
    pub section_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub first_letter: String,
    /// `[x%, y%]` of the title's first letter, from the top-left corner.
    #[serde(default, deserialize_with = "lenient::point")]
    pub title_coordinates: [f64; 2],
    /// 0 – 100
    #[serde(default, deserialize_with = "lenient::number_or_zero")]
    pub confidence: f64,
    // Free-form hints, passed through as written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size_estimate: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_style: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Value>,
    /// Set by post-processing, never by the model.
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub coordinate_precision: Option<CoordinatePrecision>,
}

impl DetectedSection {
    pub fn x(&self) -> f64 {
        self.title_coordinates[0]
    }

    pub fn y(&self) -> f64 {
        self.title_coordinates[1]
    }
}

/// Free-form metadata the model reports about the screenshot
/// (`total_sections_found`, `layout_type`, ...). Kept verbatim so the debug
/// artifact is lossless; anything other than an object reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DetectionMetadata(pub Map<String, Value>);

impl<'de> Deserialize<'de> for DetectionMetadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Object(map) => DetectionMetadata(map),
            _ => DetectionMetadata::default(),
        })
    }
}

impl DetectionMetadata {
    /// The model's own count, when it wrote one that reads as a number.
    pub fn total_sections_found(&self) -> Option<f64> {
        self.0.get("total_sections_found").and_then(lenient::as_number)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinateDetectionResult {
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub detected_sections: Vec<DetectedSection>,
    #[serde(default)]
    pub detection_metadata: DetectionMetadata,
}

impl CoordinateDetectionResult {
    pub fn is_empty(&self) -> bool {
        self.detected_sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_precision_threshold() {
        assert_eq!(CoordinatePrecision::from_confidence(85.0), CoordinatePrecision::High);
        assert_eq!(CoordinatePrecision::from_confidence(84.9), CoordinatePrecision::Medium);
        assert_eq!(CoordinatePrecision::from_confidence(0.0), CoordinatePrecision::Medium);
    }

    #[test]
    fn test_missing_fields_default() {
        let section: DetectedSection = serde_json::from_value(json!({"section_name": "Skills"})).unwrap();
        assert_eq!(section.title_coordinates, [0.0, 0.0]);
        assert_eq!(section.confidence, 0.0);
        assert!(section.coordinate_precision.is_none());
    }

    #[test]
    fn test_metadata_keeps_unknown_keys() {
        let value = json!({
            "detected_sections": [],
            "detection_metadata": {
                "total_sections_found": 0,
                "layout_type": "desktop",
                "theme": "dark"
            }
        });
        let result: CoordinateDetectionResult = serde_json::from_value(value).unwrap();
        assert_eq!(result.detection_metadata.0["layout_type"], "desktop");
        assert_eq!(result.detection_metadata.0["theme"], "dark");
        assert_eq!(result.detection_metadata.total_sections_found(), Some(0.0));

        let back = serde_json::to_value(&result).unwrap();
        assert_eq!(back["detection_metadata"]["theme"], "dark");
    }

    #[test]
    fn test_precision_serializes_lowercase() {
        let mut section: DetectedSection = serde_json::from_value(json!({})).unwrap();
        section.coordinate_precision = Some(CoordinatePrecision::High);
        let value = serde_json::to_value(&section).unwrap();
        assert_eq!(value["coordinate_precision"], "high");
    }

    #[test]
    fn test_mismatched_section_fields_are_tolerated() {
        let section: DetectedSection = serde_json::from_value(json!({
            "section_name": "Experience",
            "first_letter": null,
            "title_coordinates": ["12", 40],
            "confidence": null,
            "font_size_estimate": 14,
            "text_style": {"weight": "bold"},
            "notes": null
        }))
        .unwrap();
        assert_eq!(section.title_coordinates, [12.0, 40.0]);
        assert_eq!(section.confidence, 0.0);
        assert_eq!(section.font_size_estimate, Some(json!(14)));
        assert!(section.notes.is_none());

        let back = serde_json::to_value(&section).unwrap();
        assert_eq!(back["font_size_estimate"], 14);
        assert_eq!(back["text_style"]["weight"], "bold");
    }

    #[test]
    fn test_metadata_count_variants() {
        let parse = |v: Value| serde_json::from_value::<CoordinateDetectionResult>(v).unwrap();
        let float = parse(json!({"detection_metadata": {"total_sections_found": 5.0}}));
        assert_eq!(float.detection_metadata.total_sections_found(), Some(5.0));
        let quoted = parse(json!({"detection_metadata": {"total_sections_found": "5"}}));
        assert_eq!(quoted.detection_metadata.total_sections_found(), Some(5.0));
        assert_eq!(serde_json::to_value(&quoted).unwrap()["detection_metadata"]["total_sections_found"], "5");

        let odd = parse(json!({"detected_sections": null, "detection_metadata": "n/a"}));
        assert!(odd.is_empty());
        assert!(odd.detection_metadata.0.is_empty());
    }
}
