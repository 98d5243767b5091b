use tracing::debug;

use super::domain::{FoundItemRecord, LostItemReport};
use super::scoring::{LocalSimilarityScorer, SimilarityScorer};

/// A found item paired with how well it matches a lost report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchCandidate<'a> {
    pub item: &'a FoundItemRecord,
    pub score: f64,
}

/// Ranks found items against a lost report. Scores are recomputed on every call.
#[derive(Debug, Clone, Default)]
pub struct MatchRanker<S = LocalSimilarityScorer> {
    scorer: S,
}

impl<S> MatchRanker<S>
where
    S: SimilarityScorer,
{
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    /// Highest scores first; equal scores keep their input order. At most `top_n` entries.
    pub fn rank<'a>(
        &self,
        report: &LostItemReport,
        candidates: &'a [FoundItemRecord],
        top_n: usize,
    ) -> Vec<MatchCandidate<'a>> {
        let claim = report.as_claim();

        let mut ranked: Vec<MatchCandidate<'a>> = candidates
            .iter()
            .map(|item| MatchCandidate {
                item,
                score: self.scorer.score(item, &claim),
            })
            .collect();

        // `sort_by` is stable, which gives the input-order tie-break.
        ranked.sort_by(|left, right| right.score.total_cmp(&left.score));
        ranked.truncate(top_n);

        debug!(
            report_id = %report.id.0,
            candidates = candidates.len(),
            returned = ranked.len(),
            "ranked found items for lost report"
        );

        ranked
    }
}
