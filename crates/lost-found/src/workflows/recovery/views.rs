//! Caller-facing JSON shapes.

use serde::Serialize;

use super::decision::ClaimDecision;
use super::domain::{FoundItemId, FoundItemRecord, LostItemReport, ReportId};
use super::ranking::MatchCandidate;
use super::scoring::ScoreSource;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub success: bool,
    pub score: f64,
    pub threshold: f64,
    pub source: ScoreSource,
    pub rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_score: Option<f64>,
    pub message: String,
}

impl From<&ClaimDecision> for ClaimResponse {
    fn from(decision: &ClaimDecision) -> Self {
        Self {
            success: decision.accepted,
            score: decision.result.score,
            threshold: decision.threshold,
            source: decision.result.source,
            rationale: decision.result.rationale.clone(),
            fallback_score: decision.fallback_score,
            message: decision.message().to_string(),
        }
    }
}

/// One ranked suggestion returned to a reporter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub id: FoundItemId,
    pub name: String,
    pub score: f64,
    pub image_url: String,
    pub location_found: String,
    pub secret_detail: String,
    pub description: String,
}

impl From<&MatchCandidate<'_>> for MatchView {
    fn from(candidate: &MatchCandidate<'_>) -> Self {
        let item = candidate.item;
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            score: candidate.score,
            image_url: item.image_url.clone(),
            location_found: item.location_found.clone(),
            secret_detail: item.secret_detail.clone(),
            description: item.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LostReportResponse {
    pub message: String,
    pub report_id: ReportId,
    pub status: &'static str,
    pub matches: Vec<MatchView>,
}

impl LostReportResponse {
    pub fn new(report: &LostItemReport, matches: Vec<MatchView>) -> Self {
        let message = if matches.is_empty() {
            "Report submitted. No registered items resemble it yet.".to_string()
        } else {
            format!(
                "Report submitted. {} registered item(s) may be yours.",
                matches.len()
            )
        };
        Self {
            message,
            report_id: report.id.clone(),
            status: report.status.label(),
            matches,
        }
    }
}

/// Public listing entry. The secret detail stays with the office.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundItemView {
    pub id: FoundItemId,
    pub name: String,
    pub description: String,
    pub color: String,
    pub size: String,
    pub shape: String,
    pub location_found: String,
    pub image_url: String,
    pub claimed: bool,
}

impl From<&FoundItemRecord> for FoundItemView {
    fn from(item: &FoundItemRecord) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            color: item.color.clone(),
            size: item.size.clone(),
            shape: item.shape.clone(),
            location_found: item.location_found.clone(),
            image_url: item.image_url.clone(),
            claimed: item.claimed,
        }
    }
}
