//! Curation pipeline performance benchmarks.
//!
//! Measures the per-stage cost of classification and scoring, the quadratic
//! semantic dedup pass, and end-to-end runs over generated batches.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use curata::classify::Classifier;
use curata::config::{ClassifierConfig, DedupConfig, ScoringConfig};
use curata::dedup::Deduplicator;
use curata::score::Scorer;
use curata::{CandidateItem, HashedEmbedder, Pipeline, PipelineConfig};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

const SNIPPETS: [&str; 4] = [
    "You are a senior copywriter. Write 3 taglines for a {topic} brand. \
     Output format: a numbered list, each under 10 words.",
    "## Weekly {topic} review workflow\n\n1. Export last week's numbers\n\
     2. Compare against the target\n3. Flag anything off by more than 10%\n\
     4. Send the summary to the team",
    "The {topic} market grew 12% in 2023, driven by subscription models. \
     Customer retention is now the main revenue lever for most players.",
    "# How to get started with {topic}\n\nIn this guide you will learn the basics.\n\n\
     ## Steps\n\n- Install the tools\n- Run the first example\n\n\
     For example, the starter template prints a greeting.\n\n\
     Note: check your version before you begin.",
];

const TOPICS: [&str; 6] = ["coffee", "tea", "cycling", "bakery", "fintech", "gardening"];

/// Generate a batch with a realistic share of exact and near duplicates.
fn generate_candidates(count: usize) -> Vec<CandidateItem> {
    (0..count)
        .map(|i| {
            let template = SNIPPETS[i % SNIPPETS.len()];
            let topic = TOPICS[(i / SNIPPETS.len()) % TOPICS.len()];
            let mut content = template.replace("{topic}", topic);
            // Every 10th item is a lightly edited repost
            if i % 10 == 9 {
                content.push('!');
            } else {
                content.push_str(&format!(" (variant {})", i));
            }
            CandidateItem::new(format!("item-{:05}", i), content).with_title(format!("{} snippet", topic))
        })
        .collect()
}

fn bench_classify_and_score(c: &mut Criterion) {
    let classifier = Classifier::new(&ClassifierConfig::default()).unwrap();
    let scorer = Scorer::new(&ScoringConfig::default()).unwrap();
    let items = generate_candidates(SNIPPETS.len());

    let mut group = c.benchmark_group("classify_score");
    for item in items {
        let label = classifier.classify(item.clone()).content_type.to_string();
        group.bench_with_input(BenchmarkId::new("classify", &label), &item, |b, item| {
            b.iter(|| classifier.classify(black_box(item.clone())))
        });
        let classified = classifier.classify(item);
        group.bench_with_input(BenchmarkId::new("score", &label), &classified, |b, item| {
            b.iter(|| scorer.score(black_box(item.clone())))
        });
    }
    group.finish();
}

fn bench_dedup(c: &mut Criterion) {
    let mut group = c.benchmark_group("dedup");
    for size in [50, 200, 500] {
        let items = generate_candidates(size);
        group.throughput(Throughput::Elements(size as u64));

        let exact = Deduplicator::new(&DedupConfig::default());
        group.bench_with_input(BenchmarkId::new("exact", size), &items, |b, items| {
            b.iter(|| exact.run(black_box(items.clone())))
        });

        let semantic = Deduplicator::new(&DedupConfig::default())
            .with_embedder(Arc::new(HashedEmbedder::default()));
        group.bench_with_input(BenchmarkId::new("semantic", size), &items, |b, items| {
            b.iter(|| semantic.run(black_box(items.clone())))
        });
    }
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();

    let mut group = c.benchmark_group("pipeline");
    for size in [10, 100, 500] {
        let items = generate_candidates(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("run", size), &items, |b, items| {
            b.iter(|| pipeline.run(black_box(items.clone())))
        });
    }
    group.finish();
}

fn bench_pipeline_file(c: &mut Criterion) {
    let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
    let mut file = NamedTempFile::new().unwrap();
    for item in generate_candidates(1000) {
        writeln!(file, "{}", serde_json::to_string(&item).unwrap()).unwrap();
    }
    file.flush().unwrap();

    c.bench_function("pipeline_run_file_1000", |b| {
        b.iter(|| pipeline.run_file(black_box(file.path())).unwrap())
    });
}

criterion_group!(benches, bench_classify_and_score, bench_dedup, bench_pipeline);

// Large batches run separately due to longer execution time
criterion_group!(
    name = large_benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(20));
    targets = bench_pipeline_file
);

criterion_main!(benches, large_benches);
