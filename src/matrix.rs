//! # Interest Matrix Module
//!
//! Dense binary user×artist matrix. Row `r` belongs to the `r`-th user in
//! [`UserArtists`] order, column `c` to the `c`-th vocabulary artist, and a
//! cell is 1 exactly when that user listened to that artist.
//!
//! ## Memory
//!
//! Storage is one row-major `u8` buffer of `users × artists` bytes. The
//! buffer is reserved fallibly so that an oversized dataset surfaces as
//! [`RecommendError::MatrixTooLarge`] instead of aborting the process.

use crate::catalog::{UserArtists, Vocabulary};
use crate::error::{RecommendError, Result};
use log::debug;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterestMatrix {
    users: Vec<String>,
    user_index: HashMap<String, usize>,
    num_artists: usize,
    cells: Vec<u8>,
    row_counts: Vec<usize>,
}

impl InterestMatrix {
    #[must_use]
    pub fn num_users(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn num_artists(&self) -> usize {
        self.num_artists
    }

    /// User identifiers in row order.
    #[must_use]
    pub fn users(&self) -> &[String] {
        &self.users
    }

    #[must_use]
    pub fn user_index(&self, user: &str) -> Option<usize> {
        self.user_index.get(user).copied()
    }

    /// Row `user` as a slice of 0/1 cells, one per vocabulary artist.
    ///
    /// # Panics
    ///
    /// Panics if `user` is out of range.
    #[must_use]
    pub fn row(&self, user: usize) -> &[u8] {
        let start = user * self.num_artists;
        &self.cells[start..start + self.num_artists]
    }

    /// # Panics
    ///
    /// Panics if `user` or `artist` is out of range.
    #[must_use]
    pub fn get(&self, user: usize, artist: usize) -> u8 {
        self.row(user)[artist]
    }

    /// Number of ones in row `user`, i.e. the squared norm of the row.
    #[must_use]
    pub fn row_count(&self, user: usize) -> usize {
        self.row_counts[user]
    }
}

/// Reserves a `rows × cols` buffer filled with `fill`, failing cleanly when
/// the size overflows or the allocator refuses.
pub(crate) fn dense_buffer<T: Clone>(rows: usize, cols: usize, fill: T) -> Result<Vec<T>> {
    let too_large = || RecommendError::MatrixTooLarge { rows, cols };

    let len = rows.checked_mul(cols).ok_or_else(too_large)?;
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len).map_err(|_| too_large())?;
    buffer.resize(len, fill);
    Ok(buffer)
}

/// Builds the binary interest matrix for `user_artists` over `vocabulary`.
///
/// Artists missing from the vocabulary are ignored. Users with empty sets get
/// an all-zero row.
///
/// # Errors
///
/// [`RecommendError::MatrixTooLarge`] if the dense buffer cannot be allocated.
pub fn build_matrix(user_artists: &UserArtists, vocabulary: &Vocabulary) -> Result<InterestMatrix> {
    let num_users = user_artists.len();
    let num_artists = vocabulary.len();
    let mut cells = dense_buffer(num_users, num_artists, 0u8)?;

    let mut users = Vec::with_capacity(num_users);
    let mut user_index = HashMap::with_capacity(num_users);
    let mut row_counts = Vec::with_capacity(num_users);

    for (row, (user, artists)) in user_artists.iter().enumerate() {
        let offset = row * num_artists;
        let mut count = 0;
        for column in artists.iter().filter_map(|artist| vocabulary.index_of(artist)) {
            cells[offset + column] = 1;
            count += 1;
        }

        users.push(user.clone());
        user_index.insert(user.clone(), row);
        row_counts.push(count);
    }

    debug!("Built {num_users}x{num_artists} interest matrix");

    Ok(InterestMatrix {
        users,
        user_index,
        num_artists,
        cells,
        row_counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_vocabulary;

    fn users(entries: &[(&str, &[&str])]) -> UserArtists {
        entries
            .iter()
            .map(|(user, artists)| {
                (user.to_string(), artists.iter().map(|a| a.to_string()).collect())
            })
            .collect()
    }

    #[test]
    fn test_cells_match_membership() {
        let data = users(&[("A", &["x", "y"]), ("B", &["y", "z"]), ("C", &["x", "y", "z"])]);
        let vocabulary = build_vocabulary(&data);
        let matrix = build_matrix(&data, &vocabulary).unwrap();

        assert_eq!(matrix.num_users(), 3);
        assert_eq!(matrix.num_artists(), 3);
        assert_eq!(matrix.row(0), &[1, 1, 0]);
        assert_eq!(matrix.row(1), &[0, 1, 1]);
        assert_eq!(matrix.row(2), &[1, 1, 1]);
        assert_eq!(matrix.row_count(2), 3);

        for (user, artists) in &data {
            let row = matrix.user_index(user).unwrap();
            for (column, artist) in vocabulary.iter().enumerate() {
                assert_eq!(matrix.get(row, column) == 1, artists.contains(artist));
            }
        }
    }

    #[test]
    fn test_empty_user_gets_zero_row() {
        let data = users(&[("A", &["x"]), ("B", &[])]);
        let vocabulary = build_vocabulary(&data);
        let matrix = build_matrix(&data, &vocabulary).unwrap();

        let row = matrix.user_index("B").unwrap();
        assert_eq!(matrix.row(row), &[0]);
        assert_eq!(matrix.row_count(row), 0);
    }

    #[test]
    fn test_artists_outside_vocabulary_are_ignored() {
        let data = users(&[("A", &["x", "unknown"])]);
        let vocabulary = build_vocabulary(&users(&[("seed", &["x"])]));
        let matrix = build_matrix(&data, &vocabulary).unwrap();

        assert_eq!(matrix.row(0), &[1]);
        assert_eq!(matrix.row_count(0), 1);
    }

    #[test]
    fn test_zero_width_matrix() {
        let data = users(&[("A", &[]), ("B", &[])]);
        let vocabulary = build_vocabulary(&data);
        let matrix = build_matrix(&data, &vocabulary).unwrap();

        assert_eq!(matrix.num_users(), 2);
        assert_eq!(matrix.num_artists(), 0);
        assert!(matrix.row(1).is_empty());
    }

    #[test]
    fn test_dense_buffer_overflow_is_reported() {
        let result = dense_buffer(usize::MAX, 2, 0u8);
        assert_eq!(
            result.unwrap_err(),
            RecommendError::MatrixTooLarge { rows: usize::MAX, cols: 2 }
        );
    }
}
