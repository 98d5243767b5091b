//! Comparison corpora built from the free-text attributes on both sides of a match.

use super::domain::{ClaimAttempt, FoundItemRecord};

/// Lower-cases and trims a single attribute. Invisible BOM/zero-width characters are dropped.
pub fn normalize(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.trim().to_lowercase()
}

/// Normalizes each part and joins the non-empty ones with a single space.
pub fn corpus<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    parts
        .into_iter()
        .map(normalize)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Field groups compared pairwise by the local scorer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComparisonCorpora {
    pub identity: String,
    pub context: String,
    pub color: String,
    pub size: String,
    pub shape: String,
}

impl ComparisonCorpora {
    pub fn for_found(item: &FoundItemRecord) -> Self {
        Self {
            identity: corpus([
                item.secret_detail.as_str(),
                item.description.as_str(),
                item.name.as_str(),
                item.location_found.as_str(),
            ]),
            context: corpus([item.name.as_str(), item.description.as_str()]),
            color: normalize(&item.color),
            size: normalize(&item.size),
            shape: normalize(&item.shape),
        }
    }

    pub fn for_claim(claim: &ClaimAttempt) -> Self {
        Self {
            identity: corpus([
                claim.secret_detail.as_str(),
                claim.claim_description.as_str(),
                claim.item_name.as_str(),
                claim.location.as_str(),
            ]),
            context: corpus([claim.item_name.as_str(), claim.claim_description.as_str()]),
            color: normalize(&claim.color),
            size: normalize(&claim.size),
            shape: normalize(&claim.shape),
        }
    }
}
