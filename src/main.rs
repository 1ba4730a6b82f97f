//! # Cosine - Playlist-Based Artist Recommender
//!
//! Loads a playlist dataset, treats each playlist as a user, and recommends
//! artists from the most similar playlists.
//!
//! ## Usage
//!
//! ```bash
//! # Show who is in the dataset
//! cosine --data /path/to/spotify_million_playlist users
//!
//! # Browse artists
//! cosine artists "daft"
//!
//! # Recommend for an existing playlist
//! cosine recommend "road trip" -k 20 -n 10
//!
//! # Recommend for someone new
//! cosine onboard newcomer "Daft Punk" "Justice"
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cosine::config::{self, RuntimeConfig};
use cosine::error::parse_count;
use cosine::{cli, completion, ingest, Recommender};
use log::{debug, info};
use std::io;

/// Resolves optional CLI counts against config defaults and validates them.
fn resolve_counts(counts: &cli::Counts, config: &RuntimeConfig) -> Result<(usize, usize)> {
    let neighbors = match &counts.neighbors {
        Some(raw) => parse_count("neighbors", raw)?,
        None => config.neighbors,
    };
    let results = match &counts.results {
        Some(raw) => parse_count("results", raw)?,
        None => config.results,
    };
    Ok((neighbors, results))
}

fn load_config(args: &cli::Args) -> Result<RuntimeConfig> {
    let config = match &args.config {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };

    Ok(match &args.data {
        Some(dir) => config.with_data_dir(dir.clone()),
        None => config,
    })
}

fn load_recommender(config: &RuntimeConfig) -> Result<Recommender> {
    if !config.data_dir.exists() {
        let default_dir = config::default_dataset_dir();
        let parent = default_dir.parent().unwrap_or(&default_dir);
        anyhow::bail!(
            "Playlist dataset not found at {}. Extract the dataset there (or under {}), or pass --data.",
            config.data_dir.display(),
            parent.display()
        );
    }

    info!("Loading playlists from {}", config.data_dir.display());
    let users = ingest::load_dir(&config.data_dir)?;
    Recommender::new(users).context("Failed to build recommendation model")
}

/// Main entry point for the cosine binary.
///
/// Logging is controlled via `RUST_LOG`:
/// - `RUST_LOG=info cosine users` - Load and build timings
/// - `RUST_LOG=cosine::recommend=debug cosine recommend ...` - Neighbor selection
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    if let cli::Command::Completion { shell } = args.command {
        let mut cmd = cli::Args::command();
        completion::generate_completions(
            completion::shell_to_completion_shell(shell),
            &mut cmd,
            &mut io::stdout(),
        );
        return Ok(());
    }

    let config = load_config(&args)?;
    debug!("Runtime config: {config:?}");
    let mut recommender = load_recommender(&config)?;

    match args.command {
        cli::Command::Users => {
            for user in recommender.users() {
                println!("{user}");
            }
        }
        cli::Command::Artists { filter } => {
            let keyword = filter.unwrap_or_default();
            let matches = recommender.vocabulary().search(&keyword);
            if matches.is_empty() {
                eprintln!("No artists found matching {keyword:?}");
            }
            for artist in matches {
                println!("{artist}");
            }
        }
        cli::Command::Recommend { user, counts, scores } => {
            let (k, n) = resolve_counts(&counts, &config)?;
            info!("Recommending for {user} from {k} neighbors");

            for scored in recommender.scored_recommendations(&user, k, n)? {
                if scores {
                    println!("{:.4}\t{}", scored.score, scored.artist);
                } else {
                    println!("{}", scored.artist);
                }
            }
        }
        cli::Command::Onboard { user, artists, counts } => {
            let (k, n) = resolve_counts(&counts, &config)?;
            for artist in artists.iter().filter(|a| !recommender.vocabulary().contains(a)) {
                eprintln!("Note: {artist:?} is new to the dataset and will be added");
            }

            for artist in recommender.recommend_for_new_user(&user, artists, k, n)? {
                println!("{artist}");
            }
        }
        cli::Command::Completion { .. } => unreachable!("handled before loading the dataset"),
    }

    Ok(())
}
