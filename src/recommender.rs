//! # Recommender Session
//!
//! [`Recommender`] owns the per-user artist sets and the derived caches
//! (vocabulary, interest matrix, similarity matrix) for one session.
//!
//! ## Rebuilds
//!
//! The caches are grouped in a [`Model`] snapshot. Any change to the per-user
//! sets builds a complete new snapshot first and swaps it in only once every
//! stage succeeded, so a failed rebuild leaves the previous state usable.
//!
//! Onboarding a new user always rebuilds from scratch: it costs
//! O(users² · artists) time and O(users · artists + users²) memory per call.
//!
//! ## Concurrency
//!
//! Queries take `&self` and onboarding takes `&mut self`. Callers sharing a
//! recommender across threads should wrap it in an `RwLock`, which gives a
//! rebuild exclusive access until it completes.
//!
//! ## Example
//!
//! ```
//! use cosine::{Recommender, UserArtists};
//!
//! let mut users = UserArtists::new();
//! users.insert("A".into(), ["x", "y"].iter().map(|s| s.to_string()).collect());
//! users.insert("B".into(), ["y", "z"].iter().map(|s| s.to_string()).collect());
//! users.insert("C".into(), ["x", "y", "z"].iter().map(|s| s.to_string()).collect());
//!
//! let recommender = Recommender::new(users)?;
//! assert_eq!(recommender.recommend_for_existing_user("A", 1, 5)?, vec!["z"]);
//! # Ok::<(), cosine::RecommendError>(())
//! ```

use crate::catalog::{build_vocabulary, UserArtists, Vocabulary};
use crate::error::{RecommendError, Result};
use crate::matrix::{build_matrix, InterestMatrix};
use crate::recommend::{recommend, ScoredArtist};
use crate::similarity::{build_similarity, SimilarityMatrix};
use log::{info, warn};
use std::collections::BTreeSet;
use std::time::Instant;

/// One consistent set of derived caches.
#[derive(Debug, Clone)]
pub struct Model {
    pub vocabulary: Vocabulary,
    pub interests: InterestMatrix,
    pub similarity: SimilarityMatrix,
}

impl Model {
    /// Runs vocabulary → interest matrix → similarity matrix in order.
    ///
    /// # Errors
    ///
    /// [`RecommendError::MatrixTooLarge`] if either dense matrix cannot be allocated.
    pub fn build(user_artists: &UserArtists) -> Result<Self> {
        let start = Instant::now();

        let vocabulary = build_vocabulary(user_artists);
        let interests = build_matrix(user_artists, &vocabulary)?;
        let similarity = build_similarity(&interests)?;

        info!(
            "Model built for {} users and {} artists in {}ms",
            interests.num_users(),
            vocabulary.len(),
            start.elapsed().as_millis()
        );

        Ok(Self {
            vocabulary,
            interests,
            similarity,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Recommender {
    user_artists: UserArtists,
    model: Model,
}

impl Recommender {
    /// Builds a recommender over an initial dataset.
    ///
    /// # Errors
    ///
    /// Fails if the initial matrices cannot be allocated.
    pub fn new(user_artists: UserArtists) -> Result<Self> {
        let model = Model::build(&user_artists)?;
        Ok(Self { user_artists, model })
    }

    /// Read-only view of the current artist vocabulary.
    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.model.vocabulary
    }

    #[must_use]
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Known user identifiers in row order.
    #[must_use]
    pub fn users(&self) -> &[String] {
        self.model.similarity.users()
    }

    #[must_use]
    pub fn contains_user(&self, user_id: &str) -> bool {
        self.user_artists.contains_key(user_id)
    }

    #[must_use]
    pub fn artists_of(&self, user_id: &str) -> Option<&BTreeSet<String>> {
        self.user_artists.get(user_id)
    }

    /// Cosine similarity between two known users.
    #[must_use]
    pub fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        self.model.similarity.similarity(a, b)
    }

    /// Ranked recommendations with their scores.
    ///
    /// # Errors
    ///
    /// [`RecommendError::UserNotFound`] for an unknown user.
    pub fn scored_recommendations(&self, user_id: &str, k: usize, n: usize) -> Result<Vec<ScoredArtist>> {
        recommend(&self.model.similarity, &self.user_artists, user_id, k, n)
    }

    /// Up to `n` artists for an existing user, drawn from its `k` nearest neighbors.
    ///
    /// # Errors
    ///
    /// [`RecommendError::UserNotFound`] for an unknown user. Caches are left untouched.
    pub fn recommend_for_existing_user(&self, user_id: &str, k: usize, n: usize) -> Result<Vec<String>> {
        Ok(self
            .scored_recommendations(user_id, k, n)?
            .into_iter()
            .map(|scored| scored.artist)
            .collect())
    }

    /// Registers a new user and rebuilds every cache.
    ///
    /// Artists missing from the current vocabulary are accepted and become new
    /// vocabulary entries. The rebuild is O(full dataset).
    ///
    /// # Errors
    ///
    /// [`RecommendError::InvalidParameter`] if `user_id` is empty,
    /// [`RecommendError::DuplicateUser`] if it is already registered, or
    /// [`RecommendError::MatrixTooLarge`] if the rebuild fails. In every case
    /// the previous state is kept.
    pub fn add_user<I, S>(&mut self, user_id: &str, artists: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_user_with(user_id, artists, Model::build)
    }

    /// Registration with the rebuild step supplied by the caller.
    fn add_user_with<I, S, F>(&mut self, user_id: &str, artists: I, build: F) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnOnce(&UserArtists) -> Result<Model>,
    {
        if user_id.is_empty() {
            warn!("Refusing to onboard a user with an empty name");
            return Err(RecommendError::InvalidParameter {
                name: "user_id",
                value: user_id.to_string(),
            });
        }

        if self.contains_user(user_id) {
            warn!("Refusing to onboard existing user {user_id}");
            return Err(RecommendError::DuplicateUser(user_id.to_string()));
        }

        let artist_set: BTreeSet<String> = artists.into_iter().map(Into::into).collect();
        let unseen = artist_set
            .iter()
            .filter(|artist| !self.model.vocabulary.contains(artist))
            .count();
        info!(
            "Onboarding {user_id} with {} artists ({unseen} new to the vocabulary); rebuilding all matrices",
            artist_set.len()
        );

        let mut user_artists = self.user_artists.clone();
        user_artists.insert(user_id.to_string(), artist_set);
        let model = build(&user_artists)?;

        self.user_artists = user_artists;
        self.model = model;
        Ok(())
    }

    /// Registers `user_id`, rebuilds, and recommends for it.
    ///
    /// # Errors
    ///
    /// See [`Recommender::add_user`].
    pub fn add_user_and_recommend<I, S>(&mut self, user_id: &str, artists: I, k: usize, n: usize) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_user(user_id, artists)?;
        self.recommend_for_existing_user(user_id, k, n)
    }

    /// Entry point for a user not yet in the dataset; same as
    /// [`Recommender::add_user_and_recommend`].
    ///
    /// # Errors
    ///
    /// See [`Recommender::add_user`].
    pub fn recommend_for_new_user<I, S>(&mut self, user_id: &str, artists: I, k: usize, n: usize) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_user_and_recommend(user_id, artists, k, n)
    }
}
