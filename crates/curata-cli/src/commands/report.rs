//! Report command - pretty-print a saved pipeline report.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use colored::Colorize;
use curata::PipelineReport;
use curata::dedup::SemanticStatus;

pub fn run(file: PathBuf, json: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("Report not found: {}", file.display()).into());
    }

    let report: PipelineReport = serde_json::from_reader(BufReader::new(File::open(&file)?))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} {}",
            "Pipeline report".cyan().bold(),
            file.display().to_string().white()
        );
        println!(
            "Ran {} → {}",
            report.started_at.format("%Y-%m-%d %H:%M:%S"),
            report.finished_at.format("%H:%M:%S")
        );
        println!();
        print_summary(&report, verbose);
    }
    Ok(())
}

fn counts<'a>(pairs: impl IntoIterator<Item = (&'a String, &'a usize)>) -> String {
    pairs
        .into_iter()
        .map(|(k, v)| format!("{} {}", k, v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Human-readable summary shared by `run` and `report`.
pub fn print_summary(report: &PipelineReport, verbose: bool) {
    if let Some(input) = &report.input {
        println!("{}", "Input:".yellow().bold());
        println!(
            "  Lines: {}  parsed: {}  skipped: {}",
            input.total_lines,
            input.parsed.to_string().green(),
            input.skipped.to_string().red()
        );
        if verbose {
            for m in &input.malformed {
                println!("    line {}: {}", m.line, m.error.dimmed());
            }
        }
        println!();
    }

    let d = &report.dedup;
    println!("{}", "Deduplication:".yellow().bold());
    println!(
        "  {} unique of {} ({} exact, {} semantic duplicates)",
        d.unique.to_string().white().bold(),
        d.total_items,
        d.exact_duplicates,
        d.semantic_dedup.removed
    );
    let status = match d.semantic_dedup.status {
        SemanticStatus::Ran => "ran".green(),
        SemanticStatus::Skipped => "skipped".yellow(),
        SemanticStatus::Failed => "failed".red(),
    };
    match &d.semantic_dedup.reason {
        Some(reason) => println!("  Semantic pass: {} ({})", status, reason),
        None => println!("  Semantic pass: {}", status),
    }
    println!();

    if report.cleaning.enabled {
        println!("{}", "Cleaning:".yellow().bold());
        println!("  Removed {}", report.cleaning.removed.to_string().red());
        if verbose {
            println!("  {}", counts(&report.cleaning.by_rule));
        }
        println!();
    }

    println!("{}", "Classification:".yellow().bold());
    println!("  {}", counts(&report.classification.by_type));
    if verbose {
        println!("  Methods: {}", counts(&report.classification.by_method));
        println!(
            "  Confidence: {}",
            counts(&report.classification.confidence_distribution)
        );
    }
    println!();

    println!("{}", "Scoring:".yellow().bold());
    println!(
        "  {}  (average {:.1})",
        counts(&report.scoring.quality_distribution),
        report.scoring.average_score
    );
    println!();

    let f = &report.filter;
    println!("{}", "Filtering:".yellow().bold());
    println!("  Approved: {}", f.auto_approved.to_string().green());
    println!("  Review:   {}", f.needs_review.to_string().yellow());
    println!("  Rejected: {}", f.rejected.to_string().red());
    if verbose {
        println!(
            "    threshold {}, duplicate {}, compliance {} (nsfw {}, political {})",
            f.threshold_rejected,
            f.dedup_rejected,
            f.compliance.rejected,
            f.compliance.nsfw,
            f.compliance.political_sensitive
        );
        println!("    review reasons: {}", counts(&f.review_reasons));
    }
    println!();

    let e = &report.enhancement;
    if e.enabled {
        println!("{}", "Enhancement:".yellow().bold());
        println!(
            "  {} enhanced, {} improved (average +{:.1})",
            e.successfully_enhanced.to_string().green(),
            e.items_improved,
            e.average_improvement
        );
        println!("  {}", counts(&e.methods_used));
        println!();
    }

    let t = &report.totals;
    let balance = if t.balanced {
        "balanced".green()
    } else {
        "UNBALANCED".red().bold()
    };
    println!(
        "Totals: {} in = {} approved + {} review + {} rejected + {} duplicates + {} discarded ({})",
        t.total_items.to_string().white().bold(),
        t.auto_approved,
        t.needs_review,
        t.rejected,
        t.duplicates,
        t.discarded,
        balance
    );
}
