use crate::infra::{InMemoryFoundItemRepository, InMemoryLostReportRepository};
use clap::Args;
use lost_found::config::{parse_threshold, AppConfig};
use lost_found::error::AppError;
use lost_found::workflows::recovery::{
    ClaimAttempt, ClaimResponse, FoundItemRecord, FoundItemSubmission, LostReportSubmission,
    RecoveryService,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the claim acceptance threshold (0.0 - 1.0)
    #[arg(long, value_parser = parse_threshold)]
    pub(crate) threshold: Option<f64>,
}

type DemoService = RecoveryService<InMemoryFoundItemRepository, InMemoryLostReportRepository>;

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(threshold) = args.threshold {
        config.matching.claim_threshold = threshold;
    }

    let service: DemoService = RecoveryService::new(
        Arc::new(InMemoryFoundItemRepository::default()),
        Arc::new(InMemoryLostReportRepository::default()),
        config.matching.clone(),
        &config.semantic,
    )?;

    println!("Lost-and-found claim demo");
    println!(
        "  scoring: {} | acceptance threshold: {:.2}",
        if service.semantic_enabled() {
            "semantic with local fallback"
        } else {
            "local similarity only"
        },
        service.claim_threshold()
    );

    println!("\nRegistered found items");
    let mut registered = Vec::new();
    for submission in demo_found_items() {
        let record = service.register_found(submission)?;
        println!(
            "  - {} | {} ({}), found at {}",
            record.id.0, record.name, record.color, record.location_found
        );
        registered.push(record);
    }

    let outcome = service.report_lost(demo_lost_report())?;
    println!(
        "\nLost report {} filed ({})",
        outcome.report.id.0,
        outcome.report.status.label()
    );
    if outcome.matches.is_empty() {
        println!("  no registered items resemble it yet");
    }
    for (rank, candidate) in outcome.matches.iter().enumerate() {
        println!(
            "  {}. {} {} - score {:.3}",
            rank + 1,
            candidate.id.0,
            candidate.name,
            candidate.score
        );
    }

    if let Some(bottle) = registered.first() {
        print_claim(&service, bottle, "Matching claim", matching_claim()).await?;
    }
    if let Some(umbrella) = registered.get(1) {
        print_claim(&service, umbrella, "Mismatched claim", mismatched_claim()).await?;
    }

    Ok(())
}

async fn print_claim(
    service: &DemoService,
    item: &FoundItemRecord,
    label: &str,
    attempt: ClaimAttempt,
) -> Result<(), AppError> {
    let decision = service.claim(&item.id, attempt).await?;
    let response = ClaimResponse::from(&decision);

    println!("\n{label} against {} ({})", item.id.0, item.name);
    println!(
        "  success: {} | score {:.3} (threshold {:.2}) via {}",
        response.success,
        response.score,
        response.threshold,
        response.source.label()
    );
    println!("  rationale: {}", response.rationale);
    if let Some(fallback) = response.fallback_score {
        println!("  local similarity: {fallback:.3}");
    }
    println!("  {}", response.message);
    Ok(())
}

fn demo_found_items() -> Vec<FoundItemSubmission> {
    vec![
        FoundItemSubmission {
            name: "Water bottle".to_string(),
            description: "Steel bottle with a dented base".to_string(),
            color: "Navy blue".to_string(),
            size: "Medium".to_string(),
            shape: "Cylinder".to_string(),
            location_found: "Library second floor".to_string(),
            secret_detail: "Sticker of a fox under the lid".to_string(),
            image_url: "https://images.example/bottle.jpg".to_string(),
        },
        FoundItemSubmission {
            name: "Umbrella".to_string(),
            description: "Folding umbrella with a wooden handle".to_string(),
            color: "Black".to_string(),
            size: "Small".to_string(),
            shape: "Folded".to_string(),
            location_found: "Cafeteria entrance".to_string(),
            secret_detail: "Initials J.K. on the strap".to_string(),
            image_url: String::new(),
        },
        FoundItemSubmission {
            name: "Calculator".to_string(),
            description: "Graphing calculator in a soft case".to_string(),
            color: "Grey".to_string(),
            size: "Small".to_string(),
            shape: "Rectangular".to_string(),
            location_found: "Maths building room 4".to_string(),
            secret_detail: "Scratched serial number on the back".to_string(),
            image_url: String::new(),
        },
    ]
}

fn demo_lost_report() -> LostReportSubmission {
    LostReportSubmission {
        item_name: "Water bottle".to_string(),
        description: "Blue metal bottle".to_string(),
        color: "navy blue".to_string(),
        size: "medium".to_string(),
        shape: "cylinder".to_string(),
        location_lost: "Library".to_string(),
        secret_detail: "fox sticker under the lid".to_string(),
        contact: "sam@example.edu".to_string(),
    }
}

fn matching_claim() -> ClaimAttempt {
    ClaimAttempt {
        secret_detail: "Sticker of a fox under the lid".to_string(),
        claim_description: "Steel bottle with a dented base".to_string(),
        claimant_name: "Sam Rivera".to_string(),
        claimant_contact: "sam@example.edu".to_string(),
        color: "Navy blue".to_string(),
        size: "Medium".to_string(),
        shape: "Cylinder".to_string(),
        item_name: "Water bottle".to_string(),
        location: "Library second floor".to_string(),
    }
}

fn mismatched_claim() -> ClaimAttempt {
    ClaimAttempt {
        secret_detail: "a keyring shaped like a star".to_string(),
        claim_description: "large red golf umbrella".to_string(),
        claimant_name: "Alex Doe".to_string(),
        claimant_contact: "alex@example.edu".to_string(),
        color: "red".to_string(),
        size: "large".to_string(),
        shape: "straight".to_string(),
        ..ClaimAttempt::default()
    }
}
