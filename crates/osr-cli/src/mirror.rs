//! Beatmap mirror as a beatmap source.
//!
//! Downloads the `.osz` archive of a beatmapset and extracts it into a
//! temporary directory owned by the mirror. The directories live as long as
//! the [`BeatmapMirror`] and are removed when it is dropped.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use osr_core::config::api::MAX_ARCHIVE_BYTES;
use osr_core::{BeatmapSource, Error, Result};
use tempfile::TempDir;
use tracing::{debug, info};

use crate::api::{build_agent, network_error};
use crate::songs::SongsDirectory;

pub struct BeatmapMirror {
    agent: ureq::Agent,
    base_url: String,
    workdir: TempDir,
}

impl BeatmapMirror {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            agent: build_agent(),
            base_url: base_url.trim_end_matches('/').to_string(),
            workdir: tempfile::Builder::new().prefix("osr-beatmaps-").tempdir()?,
        })
    }

    fn download_url(&self, beatmapset_id: u32) -> String {
        format!("{}/d/{beatmapset_id}", self.base_url)
    }

    fn download(&self, beatmapset_id: u32) -> Result<Vec<u8>> {
        let url = self.download_url(beatmapset_id);
        info!(url, "downloading beatmapset");

        let mut response = self.agent.get(&url).call().map_err(|e| match e {
            ureq::Error::StatusCode(404) => {
                Error::NotFound(format!("beatmapset {beatmapset_id} on {}", self.base_url))
            }
            other => network_error(other),
        })?;

        response
            .body_mut()
            .with_config()
            .limit(MAX_ARCHIVE_BYTES)
            .read_to_vec()
            .map_err(network_error)
    }
}

impl BeatmapSource for BeatmapMirror {
    fn beatmapset_dir(&self, beatmapset_id: u32) -> Result<PathBuf> {
        let dest = self.workdir.path().join(beatmapset_id.to_string());
        if dest.is_dir() {
            return Ok(dest);
        }

        let archive = self.download(beatmapset_id)?;
        extract_archive(&archive, &dest)?;
        Ok(dest)
    }
}

/// Extracts an `.osz` (zip) archive into `dest`, creating it if needed.
///
/// # Errors
///
/// `Archive` for a corrupt or unsafe archive, `Io` when writing fails.
pub fn extract_archive(archive: &[u8], dest: &Path) -> Result<()> {
    let mut zip = zip::ZipArchive::new(Cursor::new(archive)).map_err(archive_error)?;
    debug!(entries = zip.len(), dest = %dest.display(), "extracting beatmapset");

    std::fs::create_dir_all(dest)?;
    zip.extract(dest).map_err(archive_error)
}

fn archive_error(e: zip::result::ZipError) -> Error {
    match e {
        zip::result::ZipError::Io(io) => Error::Io(io),
        other => Error::Archive(other.to_string()),
    }
}

/// Looks in the local Songs directory first and falls back to the mirror.
pub struct LocalFirst {
    local: Option<SongsDirectory>,
    remote: BeatmapMirror,
}

impl LocalFirst {
    pub fn new(local: Option<SongsDirectory>, remote: BeatmapMirror) -> Self {
        Self { local, remote }
    }
}

impl BeatmapSource for LocalFirst {
    fn beatmapset_dir(&self, beatmapset_id: u32) -> Result<PathBuf> {
        if let Some(local) = &self.local {
            match local.beatmapset_dir(beatmapset_id) {
                Err(Error::NotFound(what)) => debug!(what, "not in Songs directory"),
                found => return found,
            }
        }
        self.remote.beatmapset_dir(beatmapset_id)
    }
}
