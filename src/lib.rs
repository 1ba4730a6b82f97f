//! Artist recommendations from playlist co-listening.
//!
//! Every playlist is treated as a user whose taste is the set of artists it
//! contains. Users are compared with cosine similarity over a binary
//! user×artist matrix, and artists a user has not heard are scored by how
//! many similar users listen to them, weighted by similarity.
//!
//! Core modules, in data-flow order:
//! - [`catalog`] - Artist vocabulary
//! - [`matrix`] - Binary interest matrix
//! - [`similarity`] - User×user cosine similarity
//! - [`recommend`] - Neighbor-weighted artist scoring
//! - [`recommender`] - Session owning the data and caches, including onboarding
//!
//! ### Supporting Modules
//!
//! - [`error`] - Core error type
//! - [`ingest`] - Playlist dataset loading
//! - [`config`] - Runtime configuration and data directory
//! - [`cli`] - Command-line interface definitions
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use cosine::{ingest, Recommender};
//! use std::path::Path;
//!
//! let users = ingest::load_dir(Path::new("spotify_million_playlist"))?;
//! let mut recommender = Recommender::new(users)?;
//!
//! let picks = recommender.recommend_for_existing_user("road trip", 20, 10)?;
//! println!("{picks:?}");
//!
//! let fresh = recommender.recommend_for_new_user("newcomer", ["Toto", "Queen"], 20, 10)?;
//! println!("{fresh:?}");
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Cost
//!
//! The interest matrix takes `users × artists` bytes and the similarity
//! matrix `users² × 8` bytes. Building the similarity matrix is
//! O(users² · artists) and happens on construction and on every onboarding.
//!
//! ## Logging
//!
//! Library code logs through the `log` facade. The binary installs
//! `env_logger`, so `RUST_LOG=cosine=debug` shows build timings and sizes.

pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod ingest;
pub mod matrix;
pub mod recommend;
pub mod recommender;
pub mod similarity;

pub use catalog::{UserArtists, Vocabulary};
pub use error::{RecommendError, Result};
pub use recommend::ScoredArtist;
pub use recommender::Recommender;
