//! # Configuration Module
//!
//! Runtime settings for the `cosine` binary and the platform data directory
//! where the playlist dataset lives by default.
//!
//! ## Data Storage
//!
//! - Linux: `~/.local/share/cosine/`
//! - macOS: `~/Library/Application Support/cosine/`
//! - Windows: `%APPDATA%\cosine\`
//!
//! ## Config File
//!
//! An optional JSON file can override any subset of the defaults:
//!
//! ```json
//! { "data_dir": "/srv/spotify_million_playlist", "neighbors": 25 }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the dataset directory inside the data directory.
pub const DATASET_DIR_NAME: &str = "spotify_million_playlist";

pub const DEFAULT_NEIGHBORS: usize = 10;
pub const DEFAULT_RESULTS: usize = 10;

/// Default dataset location, without touching the filesystem.
#[must_use]
pub fn default_dataset_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("cosine"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATASET_DIR_NAME)
}

/// Configuration for runtime behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Directory holding the playlist slices (or a `data/` folder of them)
    pub data_dir: PathBuf,
    /// Neighbors consulted when the caller gives no count
    pub neighbors: usize,
    /// Artists returned when the caller gives no count
    pub results: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: default_dataset_dir(),
            neighbors: DEFAULT_NEIGHBORS,
            results: DEFAULT_RESULTS,
        }
    }
}

impl RuntimeConfig {
    /// Reads a JSON config file; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Create configuration with explicit dataset directory
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = data_dir;
        self
    }
}
