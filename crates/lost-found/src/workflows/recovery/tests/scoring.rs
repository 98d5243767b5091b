use proptest::prelude::*;
use proptest::test_runner::Config;

use super::common::*;
use crate::workflows::recovery::domain::{ClaimAttempt, FoundItemId, FoundItemRecord};
use crate::workflows::recovery::scoring::{
    LocalSimilarityScorer, ScoreSource, ScoringWeights, SimilarityScorer, WeightError,
};

fn empty_item() -> FoundItemRecord {
    FoundItemRecord {
        id: FoundItemId("found-empty".to_string()),
        name: String::new(),
        description: String::new(),
        color: String::new(),
        size: String::new(),
        shape: String::new(),
        location_found: String::new(),
        secret_detail: String::new(),
        image_url: String::new(),
        claimed: false,
        created_at: found_item("x").created_at,
    }
}

#[test]
fn default_weights_sum_to_one() {
    let weights = ScoringWeights::default();
    assert!((weights.total() - 1.0).abs() < 1e-12);
    assert!(weights.validate().is_ok());
}

#[test]
fn identical_attributes_score_one() {
    let scorer = LocalSimilarityScorer::default();
    let item = found_item("same");

    let score = scorer.score(&item, &mirroring_claim(&item));

    assert_eq!(score, 1.0);
}

fn item_from(fields: &[String]) -> FoundItemRecord {
    let mut item = empty_item();
    item.name = fields[0].clone();
    item.description = fields[1].clone();
    item.color = fields[2].clone();
    item.size = fields[3].clone();
    item.shape = fields[4].clone();
    item.location_found = fields[5].clone();
    item.secret_detail = fields[6].clone();
    item
}

fn claim_from(fields: &[String]) -> ClaimAttempt {
    ClaimAttempt {
        secret_detail: fields[0].clone(),
        claim_description: fields[1].clone(),
        color: fields[2].clone(),
        size: fields[3].clone(),
        shape: fields[4].clone(),
        item_name: fields[5].clone(),
        location: fields[6].clone(),
        ..ClaimAttempt::default()
    }
}

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn any_text_scores_within_unit_interval(
        found in prop::collection::vec(any::<String>(), 7),
        claim in prop::collection::vec(any::<String>(), 7),
    ) {
        let score = LocalSimilarityScorer::default().score(&item_from(&found), &claim_from(&claim));
        prop_assert!(score.is_finite());
        prop_assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
    }

    #[test]
    fn disjoint_text_scores_below_one(
        found in prop::collection::vec("[a-m]{1,12}( [a-m]{1,12})?", 7),
        claim in prop::collection::vec("[n-z]{1,12}( [n-z]{1,12})?", 7),
    ) {
        let score = LocalSimilarityScorer::default().score(&item_from(&found), &claim_from(&claim));
        prop_assert!(score < 1.0, "disjoint text scored {}", score);
    }
}

#[test]
fn all_empty_inputs_use_empty_pair_similarity() {
    let lenient = LocalSimilarityScorer::default();
    let score = lenient.score(&empty_item(), &ClaimAttempt::default());
    assert!(!score.is_nan());
    assert_eq!(score, 1.0);

    let strict = LocalSimilarityScorer::new(ScoringWeights {
        empty_pair_similarity: 0.0,
        ..ScoringWeights::default()
    })
    .expect("valid strict profile");
    assert_eq!(strict.score(&empty_item(), &ClaimAttempt::default()), 0.0);
}

#[test]
fn omitted_shape_on_both_sides_still_earns_shape_weight() {
    let scorer = LocalSimilarityScorer::default();
    let mut item = found_item("no-shape");
    item.shape.clear();
    let mut claim = mirroring_claim(&item);
    claim.shape.clear();

    let breakdown = scorer.breakdown(&item, &claim);

    assert_eq!(breakdown.shape, 1.0);
    assert_eq!(breakdown.total, 1.0);
}

#[test]
fn normalization_ignores_case_and_padding() {
    let scorer = LocalSimilarityScorer::default();
    let item = found_item("case");
    let mut claim = mirroring_claim(&item);
    claim.color = "  NAVY BLUE ".to_string();
    claim.secret_detail = claim.secret_detail.to_uppercase();

    assert_eq!(scorer.score(&item, &claim), 1.0);
}

#[test]
fn partial_claims_score_between_bounds() {
    let scorer = LocalSimilarityScorer::default();
    let item = found_item("partial");

    let result = scorer.evaluate(&item, &bottle_claim());

    assert_eq!(result.source, ScoreSource::Local);
    assert!(result.score > 0.3 && result.score < 1.0, "got {}", result.score);
    assert!(result.rationale.starts_with("local similarity"));
}

#[test]
fn matching_claim_outscores_unrelated_claim() {
    let scorer = LocalSimilarityScorer::default();
    let bottle = found_item("bottle");
    let umbrella = umbrella("umbrella");
    let claim = bottle_claim();

    assert!(scorer.score(&bottle, &claim) > scorer.score(&umbrella, &claim));
}

#[test]
fn rejects_unbalanced_weight_profiles() {
    let err = LocalSimilarityScorer::new(ScoringWeights {
        secret: 0.9,
        ..ScoringWeights::default()
    })
    .expect_err("weights exceed one");
    assert!(matches!(err, WeightError::UnbalancedTotal(_)));

    let err = LocalSimilarityScorer::new(ScoringWeights {
        color: -0.15,
        secret: 0.85,
        ..ScoringWeights::default()
    })
    .expect_err("negative weight");
    assert!(matches!(err, WeightError::InvalidWeight { field: "color", .. }));
}

#[test]
fn alternate_profiles_change_emphasis() {
    let color_only = LocalSimilarityScorer::new(ScoringWeights {
        secret: 0.0,
        color: 1.0,
        size: 0.0,
        shape: 0.0,
        context: 0.0,
        empty_pair_similarity: 1.0,
    })
    .expect("valid profile");
    let item = found_item("color");
    let claim = ClaimAttempt {
        color: item.color.clone(),
        ..ClaimAttempt::default()
    };

    assert_eq!(color_only.score(&item, &claim), 1.0);
}
