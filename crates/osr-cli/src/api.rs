//! osu! API v1 client used to resolve beatmap hashes.

use osr_core::config::api::REQUEST_TIMEOUT;
use osr_core::{BeatmapInfo, BeatmapLookup, Error, Result};
use tracing::debug;

pub struct OsuApiClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl OsuApiClient {
    pub fn new(base_url: &str, api_key: String) -> Self {
        Self {
            agent: build_agent(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn beatmaps_url(&self) -> String {
        format!("{}/get_beatmaps", self.base_url)
    }
}

impl BeatmapLookup for OsuApiClient {
    fn lookup(&self, beatmap_hash: &str) -> Result<BeatmapInfo> {
        let url = self.beatmaps_url();
        debug!(url, beatmap_hash, "looking up beatmap");

        let mut response = self
            .agent
            .get(&url)
            .query("k", &self.api_key)
            .query("h", beatmap_hash)
            .call()
            .map_err(network_error)?;

        let entries: Vec<BeatmapInfo> = response
            .body_mut()
            .read_json()
            .map_err(network_error)?;

        BeatmapInfo::first_of(entries, beatmap_hash)
    }
}

pub(crate) fn network_error(e: ureq::Error) -> Error {
    match e {
        ureq::Error::Json(inner) => Error::Json(inner),
        ureq::Error::StatusCode(code) => Error::Network(format!("HTTP {code} error")),
        ureq::Error::Timeout(_) => Error::Network(format!("Request timed out: {e}")),
        _ => Error::Network(format!("HTTP error: {e}")),
    }
}

pub(crate) fn build_agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(REQUEST_TIMEOUT))
        .build()
        .into()
}
