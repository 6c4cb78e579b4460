//! Performance benchmarks for candidate scoring and reranking
//!
//! Run with: cargo bench --bench scoring_benchmarks

use cinesearch::models::MovieRecord;
use cinesearch::prelude::*;
use cinesearch::search::similarity::{partial_ratio, ratio};
use cinesearch::search::{parse_query, rank, ScoredCandidate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

const TITLES: &[&str] = &[
    "The Dark Knight",
    "Inception",
    "Interstellar",
    "The Prestige",
    "Memento",
    "Dunkirk",
    "Tenet",
    "Oppenheimer",
    "Insomnia",
    "Following",
];

const OVERVIEW: &str = "A thief who steals corporate secrets through the use of \
    dream-sharing technology is given the inverse task of planting an idea into \
    the mind of a C.E.O., but his tragic past may doom the project and his team to disaster.";

/// Build a candidate pool of `size` records
fn create_pool(size: usize) -> Vec<MovieRecord> {
    (0..size)
        .map(|i| {
            MovieRecord::new(i as i64, format!("{} {}", TITLES[i % TITLES.len()], i / TITLES.len()))
                .with_overview(OVERVIEW)
                .with_release_year(1990 + (i % 35) as i32)
                .with_popularity((i % 97) as f64 * 1.3)
                .with_votes((i % 10) as f64, (i * 17) as i64)
        })
        .collect()
}

// =============================================================================
// Benchmark 1: String similarity
// =============================================================================

fn bench_similarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity");

    group.bench_function("ratio_title", |b| {
        b.iter(|| ratio(black_box("the dark knight rises"), black_box("the dark knight")));
    });

    group.bench_function("partial_ratio_overview", |b| {
        b.iter(|| partial_ratio(black_box("dream sharing"), black_box(OVERVIEW)));
    });

    let long_query = "dream sharing heist thief corporate secrets ".repeat(45);
    group.bench_function("partial_ratio_long_query", |b| {
        b.iter(|| partial_ratio(black_box(&long_query), black_box(OVERVIEW)));
    });

    group.finish();
}

// =============================================================================
// Benchmark 2: Scoring a candidate pool
// =============================================================================

fn bench_pool_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_scoring");
    let calculator = ScoreCalculator::new(ScoringConfig::default());
    let query = parse_query("inception 2010").unwrap();

    for size in [100usize, 500] {
        let pool = create_pool(size);

        group.bench_with_input(BenchmarkId::new("score_and_rank", size), &pool, |b, pool| {
            b.iter(|| {
                let scored: Vec<ScoredCandidate> = pool
                    .iter()
                    .map(|record| {
                        ScoredCandidate::new(
                            record.clone(),
                            calculator.calculate_final_score(record, &query),
                        )
                    })
                    .collect();
                black_box(rank(scored, 10));
            });
        });
    }

    group.finish();
}

// =============================================================================
// Benchmark 3: Full pipeline over an in-memory index
// =============================================================================

fn bench_rerank_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("rerank_pipeline");
    let rt = tokio::runtime::Runtime::new().unwrap();

    let index = InMemoryIndex::new(create_pool(500));
    let reranker = Reranker::new(Arc::new(index), ScoringConfig::default()).unwrap();

    for limit in [10usize, 50] {
        group.bench_with_input(BenchmarkId::new("rerank_search", limit), &limit, |b, &limit| {
            b.to_async(&rt).iter(|| async {
                black_box(reranker.rerank_search("the dark knight 2008", limit).await.ok());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_similarity,
    bench_pool_scoring,
    bench_rerank_pipeline
);
criterion_main!(benches);
