// JSON contracts shared by detection, scoring, and rendering.

pub mod analysis;
pub mod coordinates;
mod lenient;

pub use analysis::{Criticality, ProfileAnalysis, ScoreTier, ScoreValue, SectionReview};
pub use coordinates::{CoordinateDetectionResult, CoordinatePrecision, DetectedSection};
