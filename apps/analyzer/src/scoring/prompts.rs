// All prompt text for the scoring step.

pub const SCORING_PROMPT_TEMPLATE: &str = r#"You are an expert professional-profile optimization consultant with 15+ years of experience.
Analyze this profile screenshot with extreme precision and provide comprehensive feedback.

{image_context}

{coordinate_context}

ANALYSIS REQUIREMENTS:
1. Examine EVERY visible element in the screenshot.
2. Apply STRICT professional standards: be harsh but constructive.
3. Focus on conversion optimization and professional branding impact.

SECTIONS TO ANALYZE (if visible):
- Profile photo (quality, lighting, attire, background, expression)
- Background banner (brand consistency, visual appeal, message clarity)
- Headline/title (keyword optimization, value proposition, length)
- Summary/About (storytelling, achievements, call-to-action, length)
- Experience entries (impact metrics, keyword density, accomplishment focus)
- Education (relevance, completeness, additional credentials)
- Skills (strategic selection, endorsements, relevance)
- Recommendations (quality, quantity, diversity, recency)
- Contact information (completeness, accessibility)
- Activity/posts (engagement quality, posting frequency, relevance)
- Certifications (industry relevance, credibility, recency)
- Languages (professional advantage, proficiency levels)
- Volunteer experience (leadership, social impact)

POSITIONING:
- For section titles, reuse the detected coordinates when they are provided.
- For elements without detected coordinates, estimate based on typical profile layouts.

SCORING CRITERIA:
- GREEN (85-100): exceptional, industry-leading, conversion-optimized
- YELLOW (60-84): adequate, but significant improvement needed to compete
- RED (0-59): poor quality, severely limiting professional opportunities

RESPONSE FORMAT:
{
  "overall_score": 72,
  "overall_feedback": "Detailed assessment with specific improvement priorities",
  "critical_issues": ["3-5 most urgent problems"],
  "competitive_advantages": ["2-3 strongest elements"],
  "sections": [
    {
      "name": "Profile Photo",
      "coordinates": [x_percentage, y_percentage],
      "criticality": "red" | "yellow" | "green",
      "score": 65,
      "comment": "Specific, actionable feedback with industry context",
      "priority": 8,
      "improvements": ["Action item 1", "Action item 2", "Action item 3"],
      "industry_benchmark": "How this compares to the top 10% of professionals",
      "impact_on_opportunities": "How this affects job or business prospects",
      "detailed_analysis": "Extended analysis with specific examples"
    }
  ],
  "missing_elements": ["Important sections not present in the profile"],
  "next_steps": ["Prioritized action plan with timeline suggestions"]
}

Analyze this profile as if the person is competing for their dream role against 200+ other qualified candidates.

{json_only}"#;

pub const COORDINATE_CONTEXT_TEMPLATE: &str = r#"DETECTED SECTION COORDINATES (for reference):
{sections_json}

Use these coordinates to position your section feedback accurately."#;
