use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for registered found items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FoundItemId(pub String);

/// Identifier wrapper for lost-item reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReportId(pub String);

/// Admin registration payload for a recovered item. Every text field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FoundItemSubmission {
    pub name: String,
    pub description: String,
    pub color: String,
    pub size: String,
    pub shape: String,
    pub location_found: String,
    #[serde(alias = "SecretDetail")]
    pub secret_detail: String,
    pub image_url: String,
}

/// A recovered item awaiting its owner.
///
/// `claimed` only ever moves from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundItemRecord {
    pub id: FoundItemId,
    pub name: String,
    pub description: String,
    pub color: String,
    pub size: String,
    pub shape: String,
    pub location_found: String,
    pub secret_detail: String,
    pub image_url: String,
    pub claimed: bool,
    pub created_at: DateTime<Utc>,
}

impl FoundItemRecord {
    pub fn from_submission(
        id: FoundItemId,
        submission: FoundItemSubmission,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: submission.name,
            description: submission.description,
            color: submission.color,
            size: submission.size,
            shape: submission.shape,
            location_found: submission.location_found,
            secret_detail: submission.secret_detail,
            image_url: submission.image_url,
            claimed: false,
            created_at,
        }
    }

    pub fn mark_claimed(&mut self) {
        self.claimed = true;
    }
}

/// Student submission describing something they lost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LostReportSubmission {
    pub item_name: String,
    pub description: String,
    pub color: String,
    pub size: String,
    pub shape: String,
    pub location_lost: String,
    pub secret_detail: String,
    pub contact: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Missing,
}

impl ReportStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ReportStatus::Missing => "missing",
        }
    }
}

/// A stored lost-item report. Immutable once filed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LostItemReport {
    pub id: ReportId,
    pub item_name: String,
    pub description: String,
    pub color: String,
    pub size: String,
    pub shape: String,
    pub location_lost: String,
    pub secret_detail: String,
    pub contact: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

impl LostItemReport {
    pub fn from_submission(
        id: ReportId,
        submission: LostReportSubmission,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            item_name: submission.item_name,
            description: submission.description,
            color: submission.color,
            size: submission.size,
            shape: submission.shape,
            location_lost: submission.location_lost,
            secret_detail: submission.secret_detail,
            contact: submission.contact,
            status: ReportStatus::default(),
            created_at,
        }
    }

    /// Claim-side view of the report used when ranking found items.
    ///
    /// Only the secret detail and the physical attributes take part.
    pub fn as_claim(&self) -> ClaimAttempt {
        ClaimAttempt {
            secret_detail: self.secret_detail.clone(),
            color: self.color.clone(),
            size: self.size.clone(),
            shape: self.shape.clone(),
            ..ClaimAttempt::default()
        }
    }
}

/// One ownership claim against a found item. Lives for a single evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClaimAttempt {
    pub secret_detail: String,
    #[serde(alias = "description")]
    pub claim_description: String,
    pub claimant_name: String,
    pub claimant_contact: String,
    pub color: String,
    pub size: String,
    pub shape: String,
    pub item_name: String,
    pub location: String,
}
