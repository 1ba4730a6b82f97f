//! # Similarity Module
//!
//! Pairwise cosine similarity between the rows of an [`InterestMatrix`].
//!
//! For binary rows `u` and `v` the cosine reduces to
//!
//! ```text
//! sim(u, v) = |u ∩ v| / sqrt(|u| · |v|)
//! ```
//!
//! The integer product is taken under a single square root, so a user's
//! similarity to itself is exactly `1.0`. A user with no artists has
//! similarity `0.0` to everyone, itself included.
//!
//! ## Cost
//!
//! O(users² · artists) time and O(users²) memory for the dense result. Rows
//! of the upper triangle are computed in parallel with rayon and mirrored
//! into the lower triangle, which makes the matrix symmetric by construction.

use crate::error::Result;
use crate::matrix::{dense_buffer, InterestMatrix};
use log::{debug, info};
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    users: Vec<String>,
    user_index: HashMap<String, usize>,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Number of users (rows and columns).
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    #[must_use]
    pub fn users(&self) -> &[String] {
        &self.users
    }

    #[must_use]
    pub fn user_index(&self, user: &str) -> Option<usize> {
        self.user_index.get(user).copied()
    }

    /// Similarity between the users at `row` and `column`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.row(row)[column]
    }

    /// Similarities of user `row` to every user, in row order.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        let n = self.len();
        &self.values[row * n..(row + 1) * n]
    }

    /// Similarity between two users by identifier.
    #[must_use]
    pub fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        Some(self.get(self.user_index(a)?, self.user_index(b)?))
    }
}

/// Cosine similarity of two binary rows with known one-counts.
#[inline]
fn binary_cosine(u: &[u8], v: &[u8], u_count: usize, v_count: usize) -> f64 {
    if u_count == 0 || v_count == 0 {
        return 0.0;
    }

    let shared: usize = u
        .iter()
        .zip(v)
        .map(|(&a, &b)| usize::from(a & b))
        .sum();

    #[allow(clippy::cast_precision_loss)]
    let cosine = shared as f64 / ((u_count * v_count) as f64).sqrt();
    cosine.min(1.0)
}

/// Builds the user×user cosine similarity matrix.
///
/// # Errors
///
/// [`crate::RecommendError::MatrixTooLarge`] if the `users × users` buffer
/// cannot be allocated.
pub fn build_similarity(matrix: &InterestMatrix) -> Result<SimilarityMatrix> {
    let n = matrix.num_users();
    let start = Instant::now();
    let mut values = dense_buffer(n, n, 0.0f64)?;

    // Row i holds sim(i, j) for j >= i.
    let upper: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| {
            let u = matrix.row(i);
            let u_count = matrix.row_count(i);
            (i..n)
                .map(|j| binary_cosine(u, matrix.row(j), u_count, matrix.row_count(j)))
                .collect()
        })
        .collect();

    for (i, row) in upper.into_iter().enumerate() {
        for (offset, value) in row.into_iter().enumerate() {
            let j = i + offset;
            values[i * n + j] = value;
            values[j * n + i] = value;
        }
    }

    let users = matrix.users().to_vec();
    let user_index = users
        .iter()
        .enumerate()
        .map(|(row, user)| (user.clone(), row))
        .collect();

    info!(
        "Computed {n}x{n} similarity matrix over {} artists in {}ms",
        matrix.num_artists(),
        start.elapsed().as_millis()
    );
    debug!("Similarity matrix holds {} cells", n * n);

    Ok(SimilarityMatrix {
        users,
        user_index,
        values,
    })
}
