//! # Cosine Performance Benchmarks
//!
//! Measures the stages of the recommendation pipeline on synthetic playlist
//! data.
//!
//! ## Benchmark Categories
//!
//! - **Model Build**: vocabulary, interest matrix and similarity matrix
//! - **Recommendation**: neighbor selection and scoring for one user
//! - **Onboarding**: full rebuild triggered by a new user
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench
//! cargo bench similarity
//! ```

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::collections::BTreeSet;
use std::hint::black_box;
use cosine::catalog::build_vocabulary;
use cosine::matrix::build_matrix;
use cosine::similarity::build_similarity;
use cosine::{Recommender, UserArtists};

/// Deterministic playlists: each user draws from an overlapping window of
/// artists so that similarities are spread out.
fn create_playlists(num_users: usize, num_artists: usize) -> UserArtists {
    (0..num_users)
        .map(|user| {
            let artists = (0..num_artists)
                .filter(|artist| (user * 31 + artist * 17) % 7 == 0 || (user + artist) % 13 == 0)
                .map(|artist| format!("Artist {artist:04}"))
                .collect::<BTreeSet<String>>();
            (format!("Playlist {user:04}"), artists)
        })
        .collect()
}

fn benchmark_model_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_build");

    for users in [100, 250, 500].iter() {
        let data = create_playlists(*users, 1000);
        let vocabulary = build_vocabulary(&data);
        let matrix = build_matrix(&data, &vocabulary).expect("Failed to build matrix");

        group.bench_with_input(BenchmarkId::new("vocabulary", users), &data, |b, data| {
            b.iter(|| build_vocabulary(black_box(data)))
        });

        group.bench_with_input(BenchmarkId::new("interest_matrix", users), &data, |b, data| {
            b.iter(|| build_matrix(black_box(data), black_box(&vocabulary)))
        });

        group.bench_with_input(BenchmarkId::new("similarity", users), &matrix, |b, matrix| {
            b.iter(|| build_similarity(black_box(matrix)))
        });
    }

    group.finish();
}

fn benchmark_recommendation(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommendation");
    let recommender = Recommender::new(create_playlists(500, 1000)).expect("Failed to build model");

    for k in [5, 25, 100].iter() {
        group.bench_with_input(BenchmarkId::new("existing_user", k), k, |b, &k| {
            b.iter(|| recommender.recommend_for_existing_user(black_box("Playlist 0042"), k, 10))
        });
    }

    group.finish();
}

fn benchmark_onboarding(c: &mut Criterion) {
    let mut group = c.benchmark_group("onboarding");
    group.sample_size(10);

    let base = Recommender::new(create_playlists(250, 1000)).expect("Failed to build model");
    let artists: Vec<String> = (0..40).map(|a| format!("Artist {:04}", a * 11)).collect();

    group.bench_function("new_user_rebuild", |b| {
        b.iter_batched(
            || base.clone(),
            |mut recommender| {
                recommender
                    .recommend_for_new_user("Newcomer", artists.clone(), 25, 10)
                    .expect("Onboarding failed")
            },
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_model_build,
    benchmark_recommendation,
    benchmark_onboarding
);
criterion_main!(benches);
