//! # Command-Line Interface Module
//!
//! Clap definitions for the `cosine` binary.
//!
//! ## Commands
//!
//! - `users`: List every playlist (user) in the dataset
//! - `artists`: Browse the artist vocabulary, optionally filtered by keyword
//! - `recommend`: Recommend artists for an existing user
//! - `onboard`: Register a new user from a list of artists and recommend for it
//! - `completion`: Generate shell completions
//!
//! ## Examples
//!
//! ```bash
//! cosine --data ~/spotify_million_playlist users
//! cosine artists beat
//! cosine recommend "road trip" -k 20 -n 10
//! cosine onboard newcomer "The Beatles" "Nina Simone" -k 15
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "cosine")]
#[command(about = "Cosine: artist suggestions from playlist co-listening")]
#[command(version)]
pub struct Args {
    /// Playlist dataset directory (JSON slices, or a folder containing `data/`)
    #[arg(long, global = true, env = "COSINE_DATA", value_hint = clap::ValueHint::DirPath)]
    pub data: Option<PathBuf>,

    /// JSON config file overriding the defaults
    #[arg(long, global = true, env = "COSINE_CONFIG", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Neighbor and result counts shared by the recommending commands.
///
/// Kept as raw text so that negative or non-numeric input reaches
/// `error::parse_count` and is reported as an invalid parameter instead of a
/// generic parse failure.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct Counts {
    /// Number of most similar users consulted
    #[arg(short = 'k', long, allow_negative_numbers = true)]
    pub neighbors: Option<String>,

    /// Number of artists to suggest
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub results: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all users (playlists) in the dataset
    Users,

    /// List artists in the vocabulary
    ///
    /// With a filter, only artists whose name contains it (case-insensitive)
    /// are shown. Useful for picking names to pass to `onboard`.
    Artists {
        /// Keyword to filter artist names by
        filter: Option<String>,
    },

    /// Recommend artists for a user already in the dataset
    Recommend {
        /// User (playlist name) to recommend for
        user: String,

        #[command(flatten)]
        counts: Counts,

        /// Print the accumulated score next to each artist
        #[arg(long)]
        scores: bool,
    },

    /// Add a new user with the given artists and recommend for it
    ///
    /// Rebuilds the full similarity matrix, so this takes time proportional
    /// to the whole dataset.
    Onboard {
        /// Identifier for the new user; must not exist yet
        user: String,

        /// Artists the new user listens to
        artists: Vec<String>,

        #[command(flatten)]
        counts: Counts,
    },

    /// Generate shell completions
    ///
    /// Usage: cosine completion bash > ~/.local/share/bash-completion/completions/cosine
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_recommend_with_counts() {
        let args = Args::parse_from(["cosine", "recommend", "road trip", "-k", "3", "-n", "7"]);
        match args.command {
            Command::Recommend { user, counts, scores } => {
                assert_eq!(user, "road trip");
                assert_eq!(counts.neighbors.as_deref(), Some("3"));
                assert_eq!(counts.results.as_deref(), Some("7"));
                assert!(!scores);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_negative_counts_reach_validation() {
        let args = Args::parse_from(["cosine", "onboard", "new", "A", "B", "-k", "-2"]);
        match args.command {
            Command::Onboard { user, artists, counts } => {
                assert_eq!(user, "new");
                assert_eq!(artists, vec!["A", "B"]);
                assert_eq!(counts.neighbors.as_deref(), Some("-2"));
                assert_eq!(counts.results, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_non_integer_count_reaches_validation() {
        let args = Args::try_parse_from(["cosine", "recommend", "u", "-n", "many"]).unwrap();
        match args.command {
            Command::Recommend { counts, .. } => {
                assert_eq!(counts.results.as_deref(), Some("many"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
