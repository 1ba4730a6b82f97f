//! # Recommendation Module
//!
//! Neighbor-weighted scoring of unseen artists.
//!
//! ## Algorithm
//!
//! 1. Rank every other user by similarity to the target, descending, and
//!    keep the top `k` as neighbors (fewer if fewer exist).
//! 2. Every artist a neighbor listens to that the target has not heard gains
//!    that neighbor's similarity as score. Scores add up across neighbors.
//! 3. Candidates are ranked by score, descending, and the first `n` returned.
//!
//! ## Ordering
//!
//! Both sorts are stable. Neighbors with equal similarity keep user row
//! order. Artists with equal score keep the order in which they were first
//! encountered: neighbor rank first, then each neighbor's artists in
//! lexicographic order.

use crate::catalog::UserArtists;
use crate::error::{RecommendError, Result};
use crate::similarity::SimilarityMatrix;
use log::debug;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

/// A recommended artist together with its accumulated neighbor score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredArtist {
    pub artist: String,
    pub score: f64,
}

/// Descending comparison for similarity scores; NaN never occurs but sorts as equal.
fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Top `k` users most similar to `target`, excluding `target`, with their similarity.
///
/// `target` must be a row of `similarity`; out-of-range indices panic.
pub(crate) fn nearest_neighbors(similarity: &SimilarityMatrix, target: usize, k: usize) -> Vec<(usize, f64)> {
    let mut others: Vec<(usize, f64)> = similarity
        .row(target)
        .iter()
        .copied()
        .enumerate()
        .filter(|&(user, _)| user != target)
        .collect();

    others.sort_by(|a, b| descending(a.1, b.1));
    others.truncate(k);
    others
}

/// Recommends up to `n` artists for `target_user` from its `k` nearest neighbors.
///
/// `k == 0` or `n == 0` yields an empty list.
///
/// # Errors
///
/// [`RecommendError::UserNotFound`] if `target_user` has no row in
/// `similarity` or no entry in `user_artists`.
pub fn recommend(
    similarity: &SimilarityMatrix,
    user_artists: &UserArtists,
    target_user: &str,
    k: usize,
    n: usize,
) -> Result<Vec<ScoredArtist>> {
    let not_found = || RecommendError::UserNotFound(target_user.to_string());

    let target = similarity.user_index(target_user).ok_or_else(not_found)?;
    let heard = user_artists.get(target_user).ok_or_else(not_found)?;

    if k == 0 || n == 0 {
        return Ok(Vec::new());
    }

    let neighbors = nearest_neighbors(similarity, target, k);
    debug!("{target_user}: {} neighbors selected (k = {k})", neighbors.len());

    let empty = BTreeSet::new();

    // Candidates in first-encountered order, with a position index for accumulation.
    let mut candidates: Vec<ScoredArtist> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();

    for (neighbor, weight) in neighbors {
        let name = &similarity.users()[neighbor];
        let artists = user_artists.get(name).unwrap_or(&empty);

        for artist in artists.iter().filter(|artist| !heard.contains(*artist)) {
            match position.get(artist.as_str()) {
                Some(&slot) => candidates[slot].score += weight,
                None => {
                    position.insert(artist.as_str(), candidates.len());
                    candidates.push(ScoredArtist {
                        artist: artist.clone(),
                        score: weight,
                    });
                }
            }
        }
    }

    candidates.sort_by(|a, b| descending(a.score, b.score));
    candidates.truncate(n);
    Ok(candidates)
}
