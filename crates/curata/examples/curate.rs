//! Example: Curate an NDJSON file of snippets with Curata.
//!
//! Usage:
//!   cargo run --example curate -- <file_path>

use std::env;
use std::path::Path;

use curata::{HashedEmbedder, MockProvider, Pipeline, PipelineConfig};

fn main() -> curata::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example curate -- <file_path>");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Curata: {}", path.display());
    println!("{}", separator);
    println!();

    // Local embedder and mock LLM, so nothing external is needed
    let pipeline = Pipeline::new(PipelineConfig::default())?
        .with_embedder(HashedEmbedder::default())
        .with_llm(MockProvider::new());

    let out = pipeline.run_file(path)?;

    println!("## Approved ({})", out.approved.len());
    for item in &out.approved {
        let scored = &item.filtered.item;
        let method = item
            .enhancement
            .as_ref()
            .map(|e| format!("{} -> {:.0}", e.method, e.enhanced_total_score))
            .unwrap_or_else(|| "not enhanced".to_string());
        println!(
            "  {} [{}] {:.0} ({}) {}",
            item.id(),
            scored.content_type(),
            scored.total_score,
            scored.quality_tier,
            method
        );
    }
    println!();

    println!("## Needs review ({})", out.needs_review.len());
    for item in &out.needs_review {
        println!("  {} {}", item.item.id(), item.decision.reasons.join(", "));
    }
    println!();

    println!("## Rejected ({})", out.rejected.len());
    for item in &out.rejected {
        println!("  {} {}", item.item.id(), item.decision.reasons.join(", "));
    }
    println!();

    println!("## Duplicates ({})", out.duplicates.len());
    for dup in &out.duplicates {
        println!("  {} -> {} ({})", dup.item.id, dup.duplicate_of, dup.reason());
    }
    println!();

    let t = &out.report.totals;
    println!(
        "{} in, {} approved, {} review, {} rejected, {} duplicates, {} discarded",
        t.total_items, t.auto_approved, t.needs_review, t.rejected, t.duplicates, t.discarded
    );
    Ok(())
}
