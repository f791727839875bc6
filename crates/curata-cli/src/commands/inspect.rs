//! Inspect command - classify and score a single snippet.

use std::io::Read;
use std::path::PathBuf;

use colored::Colorize;
use curata::enhance::GapReport;
use curata::filter::{DedupRule, FilterReport};
use curata::pipeline::PipelineContext;
use curata::{CandidateItem, FilterOutcome, QualityTier};

pub fn run(
    text: Option<String>,
    title: Option<String>,
    config: Option<PathBuf>,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = match text {
        Some(t) => t,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    if content.trim().is_empty() {
        return Err("No text given. Pass TEXT or pipe it on stdin.".into());
    }

    let ctx = PipelineContext::new(super::load_config(config.as_deref())?)?;
    let mut candidate = CandidateItem::new("inspect", content);
    if let Some(t) = title {
        candidate = candidate.with_title(t);
    }

    let scored = ctx.scorer.score(ctx.classifier.classify(candidate));
    let decision = ctx
        .filter
        .decide(&scored, &mut DedupRule::default(), &mut FilterReport::default());
    let gaps = GapReport::analyze(
        scored.content_type(),
        &scored.classified.features,
        ctx.config.enhance.min_content_chars,
    );

    if json {
        let out = serde_json::json!({
            "item": scored,
            "decision": decision,
            "gaps": gaps.missing(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let c = &scored.classified;
    println!("{}", "Classification:".yellow().bold());
    println!(
        "  {} via {} (confidence {:.2}, validated {:.2}, {})",
        c.content_type.to_string().white().bold(),
        c.classification_method,
        c.classification_confidence,
        c.validated_confidence,
        c.confidence_band().key()
    );
    println!("  {}", c.classification_reason.dimmed());
    println!();

    if verbose {
        println!("{}", "Features:".yellow().bold());
        let f = &c.features;
        println!(
            "  {} chars, {} words, {} lines, {} sentences",
            f.content_length, f.word_count, f.line_count, f.sentence_count
        );
        println!(
            "  code block: {}, steps: {} ({}), bullets: {}, headings: {}, example: {}, caution: {}",
            f.has_code_block,
            f.has_numbered_steps,
            f.step_marker_count,
            f.has_bullets,
            f.has_headings,
            f.has_example,
            f.has_caution
        );
        println!(
            "  keywords: prompt {}, workflow {}, industry {}, guide {}",
            f.prompt_keywords, f.workflow_keywords, f.industry_keywords, f.guide_keywords
        );
        println!();
    }

    println!("{}", "Scores:".yellow().bold());
    let rubric = ctx.scorer.rubric(scored.content_type());
    for dim in &rubric.dimensions {
        let value = scored.dimension_scores.get(dim.name).copied().unwrap_or(0.0);
        println!("  {:16} {:>5} / {}", dim.name, value, dim.max);
    }
    let tier = match scored.quality_tier {
        QualityTier::High => "high".green().bold(),
        QualityTier::Medium => "medium".yellow().bold(),
        QualityTier::Low => "low".red().bold(),
    };
    println!(
        "  {:16} {:>5} / 100  {} (threshold {})",
        "total", scored.total_score, tier, scored.threshold
    );
    println!();

    let outcome = match decision.outcome {
        FilterOutcome::AutoApproved => "auto_approved".green().bold(),
        FilterOutcome::NeedsReview => "needs_review".yellow().bold(),
        FilterOutcome::Rejected => "rejected".red().bold(),
    };
    println!("{} {}", "Decision:".yellow().bold(), outcome);
    for reason in &decision.reasons {
        println!("  - {}", reason);
    }

    let missing = gaps.missing();
    if !missing.is_empty() {
        println!();
        println!("{} {}", "Gaps:".yellow().bold(), missing.join(", "));
    }

    Ok(())
}
