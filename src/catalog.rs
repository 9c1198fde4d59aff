//! Song catalog
//!
//! A static, read-only mapping of song names to playable URLs, loaded once
//! at startup. Lookup is case-insensitive exact match; the stored order is
//! the order names are listed back to the user.

use std::path::Path;

use serde::Deserialize;

use crate::{Error, Result};

/// A single catalog entry
#[derive(Debug, Clone, Deserialize)]
pub struct SongEntry {
    /// Lookup key, matched case-insensitively
    pub name: String,
    /// Playable URL
    pub url: String,
}

/// Read-only song catalog
#[derive(Debug, Clone)]
pub struct SongCatalog {
    entries: Vec<SongEntry>,
}

/// On-disk catalog file shape
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    songs: Vec<SongEntry>,
}

impl SongCatalog {
    /// The catalog compiled into the binary
    #[must_use]
    pub fn builtin() -> Self {
        let entries = [
            ("virtual", "https://www.youtube.com/watch?v=YVkUvmDQ3HY"),
            ("checkpoint", "https://www.youtube.com/watch?v=D5drYkLiLI8"),
            ("ping", "https://www.youtube.com/watch?v=dOUspiO0IGc"),
            ("overthinker", "https://www.youtube.com/watch?v=3RhEa9BMkXM"),
            ("playlist", "https://www.youtube.com/playlist?list=PLw-VjHDlEOguiuN1BdDTRlGYLzCXG6i0L"),
        ]
        .into_iter()
        .map(|(name, url)| SongEntry {
            name: name.to_string(),
            url: url.to_string(),
        })
        .collect();

        Self { entries }
    }

    /// Build a catalog from explicit entries
    #[must_use]
    pub fn from_entries(entries: Vec<SongEntry>) -> Self {
        Self { entries }
    }

    /// Load a catalog from a TOML file with `[[songs]]` tables
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed, or lists no songs
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: CatalogFile = toml::from_str(&content)?;

        if file.songs.is_empty() {
            return Err(Error::Config(format!(
                "song catalog {} lists no songs",
                path.display()
            )));
        }

        tracing::info!(path = %path.display(), songs = file.songs.len(), "loaded song catalog");
        Ok(Self::from_entries(file.songs))
    }

    /// Resolve a song name to its URL (case-insensitive exact match)
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
            .map(|e| e.url.as_str())
    }

    /// Catalog names in their stored order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// All names joined for a spoken listing
    #[must_use]
    pub fn names_joined(&self) -> String {
        self.names().collect::<Vec<_>>().join(", ")
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
