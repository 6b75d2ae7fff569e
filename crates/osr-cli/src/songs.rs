//! Local osu! Songs directory as a beatmap source.
//!
//! osu! extracts each beatmapset into a folder named
//! `"{beatmapset_id} {artist} - {title}"`.

use std::fs;
use std::path::PathBuf;

use osr_core::{BeatmapSource, Error, Result};
use tracing::debug;

pub struct SongsDirectory {
    root: PathBuf,
}

impl SongsDirectory {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl BeatmapSource for SongsDirectory {
    fn beatmapset_dir(&self, beatmapset_id: u32) -> Result<PathBuf> {
        let id = beatmapset_id.to_string();
        let prefix = format!("{id} ");

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }

            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name == id || name.starts_with(&prefix) {
                debug!(dir = %entry.path().display(), "found beatmapset");
                return Ok(entry.path());
            }
        }

        Err(Error::NotFound(format!(
            "beatmapset {beatmapset_id} in {}",
            self.root.display()
        )))
    }
}
