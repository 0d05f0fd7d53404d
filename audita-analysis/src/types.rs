//! The validated audit result and its sub-records.
//!
//! Field names mirror the wire contract declared in
//! `audita_llm::schema::analysis_schema`; an `AnalysisResult` is constructed
//! once per request and immutable thereafter. `sources` is never authored by
//! the provider payload — it is derived from grounding metadata and merged
//! in during assembly.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub basic_info: BasicInfo,
    pub content_metrics: ContentMetrics,
    /// Expected length 3; the prompt asks for exactly three competitors.
    pub competitors: Vec<Competitor>,
    pub diagnosis: Diagnosis,
    pub commercial_proposal: CommercialProposal,
    /// Derived from grounding citations, never from the payload itself.
    #[serde(default)]
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub handle: String,
    pub business_name: String,
    pub category: String,
    pub bio: String,
    pub services: Vec<String>,
    pub location: String,
    pub target_audience: String,
    pub unique_value_prop: String,
    pub contact: Contact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub website: String,
    #[serde(default)]
    pub main_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetrics {
    pub post_frequency: String,
    pub content_types: Vec<ContentTypeShare>,
    pub themes: Vec<String>,
    pub tone: String,
    pub visual_style: String,
    /// Qualitative label ("Alto", "Medio", ...), not a number.
    pub engagement_level: String,
    /// 0–10.
    pub brand_consistency: f64,
    pub quality_score: QualityScore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentTypeShare {
    #[serde(rename = "type")]
    pub kind: String,
    /// 0–100.
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityScore {
    pub visual: f64,
    pub copywriting: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub name: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub practices: Vec<String>,
    pub metrics: CompetitorMetrics,
}

/// Each axis scored 0–10.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorMetrics {
    pub presence: f64,
    pub consistency: f64,
    pub professionalism: f64,
    pub engagement: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    /// 0–10.
    pub overall_score: f64,
    pub executive_summary: String,
    pub opportunities: Vec<Opportunity>,
    pub gaps_vs_competitors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    pub area: String,
    pub priority: Priority,
    pub advice: String,
}

/// Priority labels as they travel on the wire; deserialization is strict,
/// any other value rejects the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Alta,
    Media,
    Baja,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommercialProposal {
    pub introduction: String,
    pub pain_points: Vec<String>,
    pub solution: Solution,
    pub projected_benefits: Vec<ProjectedBenefit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub web_design: String,
    pub chatbot: String,
    pub booking_system: String,
    pub social_optimization: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectedBenefit {
    pub metric: String,
    pub improvement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
}
