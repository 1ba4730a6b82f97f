//! # Catalog Module
//!
//! Builds the artist vocabulary: every distinct artist observed across all
//! users, in a fixed order that assigns each artist its column in the
//! interest matrix.
//!
//! The order is lexicographic. It only has to be stable for one build, but a
//! sorted vocabulary also makes tie-breaking and test output reproducible
//! between runs.

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Per-user listening history: user identifier to the distinct artists heard.
///
/// Ordered maps keep user rows and artist iteration deterministic.
pub type UserArtists = BTreeMap<String, BTreeSet<String>>;

/// Ordered set of all artists with a reverse index for column lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    artists: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Number of distinct artists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.artists.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }

    /// Column index of `artist`, if it is part of the vocabulary.
    #[must_use]
    pub fn index_of(&self, artist: &str) -> Option<usize> {
        self.index.get(artist).copied()
    }

    #[must_use]
    pub fn contains(&self, artist: &str) -> bool {
        self.index.contains_key(artist)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.artists.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.artists
    }

    /// Case-insensitive substring filter over the vocabulary, in vocabulary order.
    ///
    /// An empty keyword matches everything.
    ///
    /// ```
    /// use cosine::catalog::{build_vocabulary, UserArtists};
    ///
    /// let mut users = UserArtists::new();
    /// users.entry("mix".into()).or_default().extend(["Daft Punk".to_string(), "Justice".to_string()]);
    /// let vocabulary = build_vocabulary(&users);
    /// assert_eq!(vocabulary.search("daft"), vec!["Daft Punk"]);
    /// ```
    #[must_use]
    pub fn search(&self, keyword: &str) -> Vec<&str> {
        let needle = keyword.to_lowercase();
        self.iter()
            .filter(|artist| artist.to_lowercase().contains(&needle))
            .collect()
    }
}

/// Union of every user's artist set as an ordered vocabulary.
///
/// An empty dataset (or one where every user has an empty set) yields an
/// empty vocabulary.
#[must_use]
pub fn build_vocabulary(user_artists: &UserArtists) -> Vocabulary {
    let distinct: BTreeSet<&String> = user_artists.values().flatten().collect();

    let artists: Vec<String> = distinct.into_iter().cloned().collect();
    let index = artists
        .iter()
        .enumerate()
        .map(|(column, artist)| (artist.clone(), column))
        .collect();

    Vocabulary { artists, index }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users(entries: &[(&str, &[&str])]) -> UserArtists {
        entries
            .iter()
            .map(|(user, artists)| {
                (user.to_string(), artists.iter().map(|a| a.to_string()).collect())
            })
            .collect()
    }

    #[test]
    fn test_vocabulary_is_sorted_union() {
        let data = users(&[("a", &["y", "x"]), ("b", &["z", "y"])]);
        let vocabulary = build_vocabulary(&data);

        assert_eq!(vocabulary.as_slice(), &["x", "y", "z"]);
        assert_eq!(vocabulary.index_of("x"), Some(0));
        assert_eq!(vocabulary.index_of("z"), Some(2));
        assert_eq!(vocabulary.index_of("w"), None);
    }

    #[test]
    fn test_every_artist_appears_exactly_once() {
        let data = users(&[("a", &["x", "y"]), ("b", &["x", "y"]), ("c", &["x"])]);
        let vocabulary = build_vocabulary(&data);

        assert_eq!(vocabulary.len(), 2);
        for artists in data.values() {
            for artist in artists {
                assert!(vocabulary.contains(artist));
            }
        }
    }

    #[test]
    fn test_empty_inputs_give_empty_vocabulary() {
        assert!(build_vocabulary(&UserArtists::new()).is_empty());

        let only_empty = users(&[("a", &[]), ("b", &[])]);
        assert!(build_vocabulary(&only_empty).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let data = users(&[("a", &["Nina Simone", "Nirvana", "Air"])]);
        let vocabulary = build_vocabulary(&data);

        assert_eq!(vocabulary.search("NI"), vec!["Nina Simone", "Nirvana"]);
        assert_eq!(vocabulary.search("air"), vec!["Air"]);
        assert!(vocabulary.search("zz").is_empty());
        assert_eq!(vocabulary.search("").len(), 3);
    }
}
