use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::lenient;

/// Bounding box assumed for a section that carries neither coordinates nor bbox.
const DEFAULT_BBOX: [f64; 4] = [0.0, 0.0, 10.0, 10.0];

/// Severity of a section review.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Value")]
pub enum Criticality {
    Red,
    #[default]
    Yellow,
    Green,
}

impl From<Value> for Criticality {
    /// Case-insensitive; anything unrecognised, including non-strings, is yellow.
    fn from(value: Value) -> Self {
        match value.as_str().map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("red") => Criticality::Red,
            Some("green") => Criticality::Green,
            _ => Criticality::Yellow,
        }
    }
}

impl Criticality {
    pub fn as_str(self) -> &'static str {
        match self {
            Criticality::Red => "red",
            Criticality::Yellow => "yellow",
            Criticality::Green => "green",
        }
    }
}

/// Three-tier classification of the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Excellent,
    Good,
    Poor,
}

impl ScoreTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            ScoreTier::Excellent
        } else if score >= 60.0 {
            ScoreTier::Good
        } else {
            ScoreTier::Poor
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "excellent",
            ScoreTier::Good => "good",
            ScoreTier::Poor => "poor",
        }
    }
}

/// Where a section's marker hangs, as reported by the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// `[x%, y%]` of the section.
    Percentage { x: f64, y: f64 },
    /// `[x0, y0, x1, y1]` in percent.
    BoundingBox {
        #[allow(dead_code)]
        x0: f64,
        y0: f64,
        x1: f64,
        #[allow(dead_code)]
        y1: f64,
    },
}

impl Anchor {
    /// Horizontal offset applied to percentage anchors so the marker sits right of the title.
    pub const PERCENTAGE_X_OFFSET: f64 = 3.0;

    /// Unclamped marker point: percentage anchors shift right by
    /// `PERCENTAGE_X_OFFSET`; bounding boxes use their top-right corner.
    pub fn marker_point(self) -> (f64, f64) {
        match self {
            Anchor::Percentage { x, y } => (x + Self::PERCENTAGE_X_OFFSET, y),
            Anchor::BoundingBox { y0, x1, .. } => (x1, y0),
        }
    }
}

/// A score or priority as the model wrote it. Numbers are the norm, but text
/// such as `"N/A"` or `"High"` is kept and shown verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScoreValue {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for ScoreValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => match n.as_f64() {
                Some(f) => ScoreValue::Number(f),
                None => ScoreValue::Text(n.to_string()),
            },
            Value::String(s) => ScoreValue::Text(s),
            other => ScoreValue::Text(other.to_string()),
        })
    }
}

impl fmt::Display for ScoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreValue::Number(n) => write!(f, "{n}"),
            ScoreValue::Text(s) => f.write_str(s),
        }
    }
}

/// The model's critique of one profile section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionReview {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient::number_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub coordinates: Option<Vec<f64>>,
    #[serde(
        default,
        deserialize_with = "lenient::number_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub bbox: Option<Vec<f64>>,
    #[serde(default)]
    pub criticality: Criticality,
    /// 0 – 100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<ScoreValue>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub comment: String,
    /// 1 – 10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<ScoreValue>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub improvements: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub industry_benchmark: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub impact_on_opportunities: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub detailed_analysis: String,
}

impl SectionReview {
    /// Resolves the wire fields into one anchor. A usable `coordinates` pair wins,
    /// then a usable `bbox`, then `DEFAULT_BBOX`.
    pub fn anchor(&self) -> Anchor {
        if let Some([x, y, ..]) = self.coordinates.as_deref() {
            return Anchor::Percentage { x: *x, y: *y };
        }
        let [x0, y0, x1, y1] = match self.bbox.as_deref() {
            Some([x0, y0, x1, y1, ..]) => [*x0, *y0, *x1, *y1],
            _ => DEFAULT_BBOX,
        };
        Anchor::BoundingBox { x0, y0, x1, y1 }
    }
}

/// Full structured output of the scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileAnalysis {
    /// 0 – 100
    #[serde(default, deserialize_with = "lenient::number_or_zero")]
    pub overall_score: f64,
    #[serde(default = "default_feedback", deserialize_with = "feedback")]
    pub overall_feedback: String,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub critical_issues: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub competitive_advantages: Vec<String>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub sections: Vec<SectionReview>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub missing_elements: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub next_steps: Vec<String>,
}

fn default_feedback() -> String {
    "No feedback available".to_string()
}

fn feedback<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let text = lenient::text(deserializer)?;
    Ok(if text.trim().is_empty() {
        default_feedback()
    } else {
        text
    })
}

impl ProfileAnalysis {
    pub fn tier(&self) -> ScoreTier {
        ScoreTier::from_score(self.overall_score)
    }

    pub fn count_by_criticality(&self, criticality: Criticality) -> usize {
        self.sections
            .iter()
            .filter(|s| s.criticality == criticality)
            .count()
    }
}
