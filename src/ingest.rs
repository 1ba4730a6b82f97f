//! # Playlist Ingestion Module
//!
//! Reads playlist slices in the Spotify Million Playlist Dataset layout and
//! turns them into [`UserArtists`]: each playlist becomes a user, keyed by its
//! name, whose artist set is the distinct `artist_name`s of its tracks.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "playlists": [
//!     {
//!       "name": "Throwbacks",
//!       "tracks": [
//!         { "artist_name": "Missy Elliott", "track_name": "Lose Control", "album_name": "The Cookbook" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Unknown fields are ignored. Playlists that share a name are merged, and
//! tracks without an artist are skipped.

use crate::catalog::UserArtists;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Deserialize)]
struct Slice {
    #[serde(default)]
    playlists: Vec<Playlist>,
}

#[derive(Debug, Deserialize)]
struct Playlist {
    name: Option<String>,
    #[serde(default)]
    tracks: Vec<Track>,
}

#[derive(Debug, Deserialize)]
struct Track {
    artist_name: Option<String>,
}

fn merge_slice(slice: Slice, into: &mut UserArtists) {
    for playlist in slice.playlists {
        let Some(name) = playlist.name else {
            debug!("Skipping playlist without a name");
            continue;
        };

        if into.contains_key(&name) {
            debug!("Merging duplicate playlist name {name:?}");
        }

        let artists = into.entry(name).or_default();
        artists.extend(
            playlist
                .tracks
                .into_iter()
                .filter_map(|track| track.artist_name)
                .filter(|artist| !artist.is_empty()),
        );
    }
}

/// Parses one slice held in memory and merges it into `into`.
///
/// # Errors
///
/// Returns an error if `bytes` is not a valid playlist slice.
pub fn from_slice(bytes: &[u8], into: &mut UserArtists) -> Result<()> {
    let slice: Slice = serde_json::from_slice(bytes).context("Invalid playlist slice JSON")?;
    merge_slice(slice, into);
    Ok(())
}

/// Reads one JSON slice file and merges its playlists into `into`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid slice.
pub fn load_file(path: &Path, into: &mut UserArtists) -> Result<()> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read playlist slice {}", path.display()))?;
    from_slice(&bytes, into)
        .with_context(|| format!("Failed to parse playlist slice {}", path.display()))
}

/// Directory that actually holds the slices: `<dir>/data` if present, else `dir`.
#[must_use]
pub fn slice_dir(dir: &Path) -> PathBuf {
    let nested = dir.join("data");
    if nested.is_dir() {
        nested
    } else {
        dir.to_path_buf()
    }
}

/// Loads every `*.json` slice from a dataset directory, in file name order.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed or any slice fails to
/// load. A directory without slices is not an error; it yields no users.
pub fn load_dir(dir: &Path) -> Result<UserArtists> {
    let dir = slice_dir(dir);
    let start = Instant::now();

    let mut files: Vec<PathBuf> = fs::read_dir(&dir)
        .with_context(|| format!("Failed to list dataset directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    if files.is_empty() {
        warn!("No playlist slices found in {}", dir.display());
    }

    let mut user_artists = UserArtists::new();
    for file in &files {
        debug!("Loading {}", file.display());
        load_file(file, &mut user_artists)?;
    }

    info!(
        "Loaded {} playlists from {} slices in {}ms",
        user_artists.len(),
        files.len(),
        start.elapsed().as_millis()
    );
    Ok(user_artists)
}
