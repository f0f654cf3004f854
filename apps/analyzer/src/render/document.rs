//! Report document builder.
//!
//! The report is assembled from typed fragments (header, image canvas,
//! summary, footer), each built from the inputs up front and serialized once
//! by `ReportDocument::to_html`. Fragments render independently so each can
//! be checked on its own.

use chrono::{DateTime, Utc};

use crate::models::{
    CoordinateDetectionResult, Criticality, ProfileAnalysis, ScoreTier, ScoreValue, SectionReview,
};
use crate::render::template::{REPORT_TITLE, SCRIPT, STYLES};
use crate::screenshot::Screenshot;

/// Markers stop short of the right and bottom edges so they never sit flush on them.
pub const MARKER_MAX_PCT: f64 = 95.0;
/// Panels list at most this many improvements.
pub const MAX_IMPROVEMENTS: usize = 5;

const DEFAULT_PRIORITY: f64 = 5.0;
const DEFAULT_COMMENT: &str = "No comment available";

/// A piece of the report that knows how to write itself.
pub trait Fragment {
    fn write_html(&self, out: &mut String);

    fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Header: score banner + statistics strip
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Header {
    pub overall_score: f64,
    pub tier: ScoreTier,
    pub feedback: String,
    pub stats: StatsStrip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsStrip {
    pub red: usize,
    pub yellow: usize,
    pub green: usize,
    pub total: usize,
}

impl StatsStrip {
    pub fn tally(analysis: &ProfileAnalysis) -> Self {
        Self {
            red: analysis.count_by_criticality(Criticality::Red),
            yellow: analysis.count_by_criticality(Criticality::Yellow),
            green: analysis.count_by_criticality(Criticality::Green),
            total: analysis.sections.len(),
        }
    }
}

impl Fragment for StatsStrip {
    fn write_html(&self, out: &mut String) {
        out.push_str("<div class=\"stats-row\">\n");
        for (count, class, label) in [
            (self.red, "red", "Critical Issues"),
            (self.yellow, "yellow", "Needs Improvement"),
            (self.green, "green", "Excellent"),
            (self.total, "total", "Total Sections"),
        ] {
            out.push_str(&format!(
                "<div class=\"stat-item\"><span class=\"stat-number {class}\">{count}</span>\
                 <span class=\"stat-label\">{label}</span></div>\n"
            ));
        }
        out.push_str("</div>\n");
    }
}

impl Fragment for Header {
    fn write_html(&self, out: &mut String) {
        out.push_str("<div class=\"header\">\n<h1>Profile Analysis</h1>\n");
        out.push_str(&format!(
            "<div class=\"score-display score-{}\">{}/100</div>\n",
            self.tier.as_str(),
            self.overall_score
        ));
        out.push_str(&format!("<p class=\"feedback\">{}</p>\n", html_escape(&self.feedback)));
        self.stats.write_html(out);
        out.push_str("</div>\n");
        out.push_str(
            "<div class=\"instruction-banner\"><strong>How to use:</strong> \
             click the colored \"i\" buttons to see detailed feedback.</div>\n",
        );
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Image canvas: embedded screenshot + one marker/panel per section
// ────────────────────────────────────────────────────────────────────────────

/// One interactive marker and its detail panel.
#[derive(Debug, Clone)]
pub struct Marker {
    pub index: usize,
    pub name: String,
    /// Percent of image width, already clamped to `[0, MARKER_MAX_PCT]`.
    pub x: f64,
    /// Percent of image height, already clamped to `[0, MARKER_MAX_PCT]`.
    pub y: f64,
    pub criticality: Criticality,
    pub score: Option<ScoreValue>,
    pub priority: ScoreValue,
    pub comment: String,
    pub detailed_analysis: String,
    pub improvements: Vec<String>,
    pub industry_benchmark: String,
    pub impact_on_opportunities: String,
}

impl Marker {
    pub fn from_section(index: usize, section: &SectionReview) -> Self {
        let (x, y) = section.anchor().marker_point();
        let name = if section.name.trim().is_empty() {
            format!("Section {}", index + 1)
        } else {
            section.name.clone()
        };
        let comment = if section.comment.trim().is_empty() {
            DEFAULT_COMMENT.to_string()
        } else {
            section.comment.clone()
        };

        Self {
            index,
            name,
            x: clamp_marker(x),
            y: clamp_marker(y),
            criticality: section.criticality,
            score: section.score.clone(),
            priority: section
                .priority
                .clone()
                .unwrap_or(ScoreValue::Number(DEFAULT_PRIORITY)),
            comment,
            detailed_analysis: section.detailed_analysis.clone(),
            improvements: section
                .improvements
                .iter()
                .take(MAX_IMPROVEMENTS)
                .cloned()
                .collect(),
            industry_benchmark: section.industry_benchmark.clone(),
            impact_on_opportunities: section.impact_on_opportunities.clone(),
        }
    }

    fn tooltip_id(&self) -> String {
        format!("tooltip-{}", self.index)
    }
}

impl Fragment for Marker {
    fn write_html(&self, out: &mut String) {
        let id = self.tooltip_id();
        out.push_str(&format!(
            "<div class=\"info-button {}\" style=\"left: {:.1}%; top: {:.1}%;\" data-tooltip-id=\"{id}\">i</div>\n",
            self.criticality.as_str(),
            self.x,
            self.y,
        ));

        let score = self
            .score
            .as_ref()
            .map(|s| html_escape(&s.to_string()))
            .unwrap_or_else(|| "N/A".to_string());
        out.push_str(&format!("<div class=\"tooltip\" id=\"{id}\">\n"));
        out.push_str(&format!(
            "<div class=\"tooltip-header\"><div class=\"tooltip-title\">{}</div>\
             <div class=\"tooltip-meta\"><div class=\"tooltip-score\">Score: {score}/100</div>\
             <div class=\"tooltip-priority\">Priority: {}/10</div></div></div>\n",
            html_escape(&self.name),
            html_escape(&self.priority.to_string()),
        ));

        out.push_str("<div class=\"tooltip-content\">\n");
        out.push_str(&format!(
            "<div class=\"tooltip-section\"><h4>Overview</h4><p>{}</p>",
            html_escape(&self.comment)
        ));
        if !self.detailed_analysis.trim().is_empty() {
            out.push_str(&format!(
                "<p><strong>Detailed Analysis:</strong> {}</p>",
                html_escape(&self.detailed_analysis)
            ));
        }
        out.push_str("</div>\n");

        if !self.improvements.is_empty() {
            out.push_str("<div class=\"tooltip-section\"><h4>Recommended Actions</h4><ul>");
            for item in &self.improvements {
                out.push_str(&format!("<li>{}</li>", html_escape(item)));
            }
            out.push_str("</ul></div>\n");
        }
        if !self.industry_benchmark.trim().is_empty() {
            out.push_str(&format!(
                "<div class=\"tooltip-section\"><h4>Industry Benchmark</h4><p>{}</p></div>\n",
                html_escape(&self.industry_benchmark)
            ));
        }
        if !self.impact_on_opportunities.trim().is_empty() {
            out.push_str(&format!(
                "<div class=\"tooltip-section\"><h4>Career Impact</h4><p>{}</p></div>\n",
                html_escape(&self.impact_on_opportunities)
            ));
        }

        out.push_str("</div>\n<div class=\"scroll-indicator\">Scroll for more</div>\n</div>\n");
    }
}

#[derive(Debug, Clone)]
pub struct ImageCanvas {
    pub data_uri: String,
    pub markers: Vec<Marker>,
}

impl Fragment for ImageCanvas {
    fn write_html(&self, out: &mut String) {
        out.push_str("<div class=\"image-container\">\n");
        out.push_str(&format!(
            "<img src=\"{}\" alt=\"Profile screenshot\" class=\"profile-image\" id=\"profileImage\">\n",
            self.data_uri
        ));
        for marker in &self.markers {
            marker.write_html(out);
        }
        out.push_str("</div>\n");
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Summary grid
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    CriticalIssues,
    Strengths,
    NextSteps,
    MissingElements,
}

impl SummaryKind {
    fn title(self) -> &'static str {
        match self {
            SummaryKind::CriticalIssues => "Critical Issues",
            SummaryKind::Strengths => "Your Strengths",
            SummaryKind::NextSteps => "Action Plan",
            SummaryKind::MissingElements => "Missing Elements",
        }
    }

    fn card_class(self) -> &'static str {
        match self {
            SummaryKind::CriticalIssues => "issues",
            SummaryKind::Strengths => "strengths",
            SummaryKind::NextSteps => "actions",
            SummaryKind::MissingElements => "missing",
        }
    }

    fn indicator_class(self) -> &'static str {
        match self {
            SummaryKind::CriticalIssues => "priority-high",
            SummaryKind::Strengths => "priority-low",
            SummaryKind::NextSteps | SummaryKind::MissingElements => "priority-medium",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SummaryCard {
    pub kind: SummaryKind,
    pub items: Vec<String>,
}

impl Fragment for SummaryCard {
    fn write_html(&self, out: &mut String) {
        out.push_str(&format!(
            "<div class=\"summary-card {}\"><h3>{}</h3><ul>",
            self.kind.card_class(),
            self.kind.title()
        ));
        for item in &self.items {
            out.push_str(&format!(
                "<li><span class=\"priority-indicator {}\"></span>{}</li>",
                self.kind.indicator_class(),
                html_escape(item)
            ));
        }
        out.push_str("</ul></div>\n");
    }
}

#[derive(Debug, Clone, Default)]
pub struct Summary {
    pub cards: Vec<SummaryCard>,
}

impl Summary {
    /// Cards in fixed order; empty lists produce no card.
    pub fn from_analysis(analysis: &ProfileAnalysis) -> Self {
        let cards = [
            (SummaryKind::CriticalIssues, &analysis.critical_issues),
            (SummaryKind::Strengths, &analysis.competitive_advantages),
            (SummaryKind::NextSteps, &analysis.next_steps),
            (SummaryKind::MissingElements, &analysis.missing_elements),
        ]
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(kind, items)| SummaryCard {
            kind,
            items: items.clone(),
        })
        .collect();

        Self { cards }
    }
}

impl Fragment for Summary {
    fn write_html(&self, out: &mut String) {
        out.push_str("<div class=\"summary-section\">\n<h2>Analysis Summary</h2>\n<div class=\"summary-grid\">\n");
        for card in &self.cards {
            card.write_html(out);
        }
        out.push_str("</div>\n</div>\n");
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Footer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Footer {
    pub generated_at: DateTime<Utc>,
    /// Number of section titles the detection step located, when it ran successfully.
    pub detected_headers: Option<usize>,
}

impl Fragment for Footer {
    fn write_html(&self, out: &mut String) {
        out.push_str(&format!(
            "<div class=\"footer\">Generated {}",
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));
        match self.detected_headers {
            Some(n) => out.push_str(&format!(" &middot; {n} section headers located")),
            None => out.push_str(" &middot; section headers not detected"),
        }
        out.push_str("</div>\n");
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub header: Header,
    pub canvas: ImageCanvas,
    pub summary: Summary,
    pub footer: Footer,
}

impl ReportDocument {
    pub fn build(
        screenshot: &Screenshot,
        analysis: &ProfileAnalysis,
        detection: Option<&CoordinateDetectionResult>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let markers = analysis
            .sections
            .iter()
            .enumerate()
            .map(|(i, section)| Marker::from_section(i, section))
            .collect();

        Self {
            header: Header {
                overall_score: analysis.overall_score,
                tier: analysis.tier(),
                feedback: analysis.overall_feedback.clone(),
                stats: StatsStrip::tally(analysis),
            },
            canvas: ImageCanvas {
                data_uri: screenshot.data_uri(),
                markers,
            },
            summary: Summary::from_analysis(analysis),
            footer: Footer {
                generated_at,
                detected_headers: detection.map(|d| d.detected_sections.len()),
            },
        }
    }
}

impl Fragment for ReportDocument {
    fn write_html(&self, out: &mut String) {
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
        out.push_str(&format!("<title>{REPORT_TITLE}</title>\n<style>{STYLES}</style>\n</head>\n<body>\n"));
        out.push_str("<div class=\"container\">\n");
        self.header.write_html(out);
        self.canvas.write_html(out);
        self.summary.write_html(out);
        self.footer.write_html(out);
        out.push_str("</div>\n");
        out.push_str(&format!("<script>{SCRIPT}</script>\n</body>\n</html>\n"));
    }
}

/// Clamps a marker coordinate into `[0, MARKER_MAX_PCT]`. NaN maps to 0.
pub fn clamp_marker(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, MARKER_MAX_PCT)
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screenshot::sample_png;
    use chrono::TimeZone;
    use serde_json::json;

    fn analysis(value: serde_json::Value) -> ProfileAnalysis {
        serde_json::from_value(value).unwrap()
    }

    fn build(analysis: &ProfileAnalysis) -> ReportDocument {
        let shot = Screenshot::from_bytes(sample_png(10, 20)).unwrap();
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        ReportDocument::build(&shot, analysis, None, at)
    }

    #[test]
    fn test_clamp_marker_bounds() {
        for value in [-100.0, -0.1, 0.0, 50.0, 95.0, 95.1, 100.0, 1e9, f64::NAN, f64::INFINITY] {
            let clamped = clamp_marker(value);
            assert!((0.0..=MARKER_MAX_PCT).contains(&clamped), "{value} -> {clamped}");
        }
    }

    #[test]
    fn test_headline_example_renders_green_marker() {
        let a = analysis(json!({
            "overall_score": 92,
            "sections": [{
                "name": "Headline",
                "coordinates": [10.0, 20.0],
                "criticality": "green",
                "score": 90,
                "comment": "Strong"
            }]
        }));
        let doc = build(&a);
        assert_eq!(doc.header.tier, ScoreTier::Excellent);
        assert_eq!(doc.canvas.markers.len(), 1);
        assert_eq!((doc.canvas.markers[0].x, doc.canvas.markers[0].y), (13.0, 20.0));

        let html = doc.to_html();
        assert!(html.contains("class=\"score-display score-excellent\">92/100"));
        assert!(html.contains(
            "<div class=\"info-button green\" style=\"left: 13.0%; top: 20.0%;\" data-tooltip-id=\"tooltip-0\">"
        ));
        assert!(html.contains("Score: 90/100"));
        assert!(html.contains("<p>Strong</p>"));
        assert_eq!(html.matches("class=\"info-button ").count(), 1);
    }

    #[test]
    fn test_zero_sections_renders_valid_document() {
        let doc = build(&analysis(json!({"overall_score": 40})));
        assert_eq!(
            doc.header.stats,
            StatsStrip { red: 0, yellow: 0, green: 0, total: 0 }
        );

        let html = doc.to_html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.trim_end().ends_with("</html>"));
        assert_eq!(html.matches("class=\"info-button ").count(), 0);
        assert_eq!(html.matches("<span class=\"stat-number").count(), 4);
        for class in ["red", "yellow", "green", "total"] {
            assert!(html.contains(&format!("<span class=\"stat-number {class}\">0</span>")));
        }
        assert!(html.contains("score-poor"));
        assert!(html.contains("data:image/png;base64,"));
    }

    #[test]
    fn test_markers_keep_input_order_and_clamp() {
        let a = analysis(json!({
            "overall_score": 70,
            "sections": [
                {"name": "Skills", "coordinates": [94.0, 99.0], "criticality": "red"},
                {"name": "About", "bbox": [5.0, -3.0, 30.0, 40.0], "criticality": "yellow"},
                {"name": "Photo", "criticality": "green"}
            ]
        }));
        let doc = build(&a);
        let markers = &doc.canvas.markers;
        let names: Vec<_> = markers.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Skills", "About", "Photo"]);
        assert_eq!((markers[0].x, markers[0].y), (95.0, 95.0));
        assert_eq!((markers[1].x, markers[1].y), (30.0, 0.0));
        assert_eq!((markers[2].x, markers[2].y), (10.0, 0.0));
        assert_eq!(
            doc.header.stats,
            StatsStrip { red: 1, yellow: 1, green: 1, total: 3 }
        );
    }

    #[test]
    fn test_panel_defaults_and_optional_blocks() {
        let marker = Marker::from_section(2, &SectionReview::default());
        let html = marker.to_html();
        assert_eq!(marker.name, "Section 3");
        assert!(html.contains("Score: N/A/100"));
        assert!(html.contains("Priority: 5/10"));
        assert!(html.contains("No comment available"));
        assert!(!html.contains("Recommended Actions"));
        assert!(!html.contains("Industry Benchmark"));
        assert!(!html.contains("Career Impact"));
        assert!(!html.contains("Detailed Analysis"));
    }

    #[test]
    fn test_panel_limits_improvements_to_five() {
        let section: SectionReview = serde_json::from_value(json!({
            "name": "Experience",
            "improvements": ["a1", "a2", "a3", "a4", "a5", "a6", "a7"],
            "industry_benchmark": "Top 10% quantify results",
            "impact_on_opportunities": "Recruiters skim"
        }))
        .unwrap();
        let html = Marker::from_section(0, &section).to_html();
        assert_eq!(html.matches("<li>").count(), 5);
        assert!(html.contains("<li>a5</li>"));
        assert!(!html.contains("a6"));
        assert!(html.contains("Top 10% quantify results"));
        assert!(html.contains("Recruiters skim"));
    }

    #[test]
    fn test_textual_score_and_null_fields_render() {
        let section: SectionReview = serde_json::from_value(json!({
            "name": "Photo",
            "coordinates": [20, 5],
            "criticality": "red",
            "score": "N/A",
            "priority": "High",
            "comment": "Add a professional photo",
            "industry_benchmark": null,
            "improvements": null
        }))
        .unwrap();
        let html = Marker::from_section(0, &section).to_html();
        assert!(html.contains("Score: N/A/100"));
        assert!(html.contains("Priority: High/10"));
        assert!(html.contains("Add a professional photo"));
        assert!(!html.contains("Industry Benchmark"));
        assert!(!html.contains("Recommended Actions"));
    }

    #[test]
    fn test_summary_cards_only_for_non_empty_lists() {
        let a = analysis(json!({
            "critical_issues": ["No photo"],
            "next_steps": ["Add a photo", "Rewrite headline"]
        }));
        let summary = Summary::from_analysis(&a);
        let kinds: Vec<_> = summary.cards.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, [SummaryKind::CriticalIssues, SummaryKind::NextSteps]);

        let html = summary.to_html();
        assert!(html.contains("Critical Issues"));
        assert!(html.contains("Action Plan"));
        assert!(!html.contains("Your Strengths"));
        assert!(!html.contains("Missing Elements"));
    }

    #[test]
    fn test_model_text_is_escaped() {
        let a = analysis(json!({
            "overall_feedback": "<script>alert('x')</script> & more",
            "sections": [{"name": "A <b>bold</b> claim", "comment": "\"quoted\""}]
        }));
        let html = build(&a).to_html();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more"));
        assert!(html.contains("A &lt;b&gt;bold&lt;/b&gt; claim"));
        assert!(html.contains("&quot;quoted&quot;"));
    }

    #[test]
    fn test_footer_reports_detection() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let with = Footer { generated_at: at, detected_headers: Some(4) }.to_html();
        assert!(with.contains("Generated 2025-03-01 09:30 UTC"));
        assert!(with.contains("4 section headers located"));

        let without = Footer { generated_at: at, detected_headers: None }.to_html();
        assert!(without.contains("not detected"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = analysis(json!({"overall_score": 61, "sections": [{"name": "About", "coordinates": [1, 2]}]}));
        assert_eq!(build(&a).to_html(), build(&a).to_html());
        assert!(build(&a).to_html().contains("score-good"));
    }
}
