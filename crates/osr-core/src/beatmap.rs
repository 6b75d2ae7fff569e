//! Beatmap collaborators.
//!
//! The decoder only knows a beatmap by its MD5 hash. Resolving that hash to
//! metadata and to a `.osu` file on disk is delegated to implementations of
//! [`BeatmapLookup`] and [`BeatmapSource`].

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Beatmap metadata as returned by the osu! API (`get_beatmaps`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeatmapInfo {
    #[serde(deserialize_with = "u32_from_str_or_number")]
    pub beatmapset_id: u32,
    #[serde(deserialize_with = "u32_from_str_or_number")]
    pub beatmap_id: u32,
    pub artist: String,
    pub title: String,
    /// Difficulty name.
    pub version: String,
}

impl BeatmapInfo {
    /// Parses a `get_beatmaps` response body and returns the first entry.
    ///
    /// # Errors
    ///
    /// `NotFound` for an empty array, `Json` for a malformed body.
    pub fn from_api_response(body: &str, hash: &str) -> Result<Self> {
        Self::first_of(serde_json::from_str(body)?, hash)
    }

    /// Picks the first entry of an already parsed `get_beatmaps` response.
    ///
    /// # Errors
    ///
    /// `NotFound` when the API returned no beatmap for `hash`.
    pub fn first_of(entries: Vec<BeatmapInfo>, hash: &str) -> Result<Self> {
        entries
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("beatmap with hash {hash}")))
    }
}

impl std::fmt::Display for BeatmapInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {} [{}]", self.artist, self.title, self.version)
    }
}

fn u32_from_str_or_number<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Resolves a beatmap hash to metadata.
pub trait BeatmapLookup {
    fn lookup(&self, beatmap_hash: &str) -> Result<BeatmapInfo>;
}

/// Provides a directory containing the files of a beatmapset.
pub trait BeatmapSource {
    fn beatmapset_dir(&self, beatmapset_id: u32) -> Result<PathBuf>;
}

/// Finds the `.osu` file in `dir` whose `BeatmapID:` header equals `beatmap_id`.
///
/// # Errors
///
/// `NotFound` when no file matches; `Io` when the directory cannot be read.
pub fn locate_beatmap_file(dir: &Path, beatmap_id: u32) -> Result<PathBuf> {
    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "osu"))
        .collect();
    candidates.sort();

    for path in candidates {
        trace!(path = %path.display(), "checking beatmap file");
        if read_beatmap_id(&path)? == Some(beatmap_id) {
            debug!(path = %path.display(), beatmap_id, "located beatmap file");
            return Ok(path);
        }
    }

    Err(Error::NotFound(format!(
        "beatmap {beatmap_id} in {}",
        dir.display()
    )))
}

/// Reads the `BeatmapID` from the `[Metadata]` section of an `.osu` file.
pub fn read_beatmap_id(path: &Path) -> Result<Option<u32>> {
    let reader = BufReader::new(fs::File::open(path)?);

    for line in reader.lines() {
        let line = line?;
        let line = line.trim_start_matches('\u{feff}');
        if let Some(value) = line.strip_prefix("BeatmapID")
            && let Some((_, id)) = value.split_once(':')
        {
            return Ok(id.trim().parse().ok());
        }
        // Metadata precedes hit objects
        if line.trim() == "[HitObjects]" {
            break;
        }
    }

    Ok(None)
}
