//! Combines a decoded replay with its collaborators into a report.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::beatmap::{BeatmapInfo, BeatmapLookup, BeatmapSource, locate_beatmap_file};
use crate::error::{Error, Result};
use crate::mods::decode_mods;
use crate::performance::{Performance, PerformanceCalculator, PerformanceRequest};
use crate::replay::{GameMode, ReplayRecord};

/// Everything the CLI prints about a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub player: String,
    pub beatmap: BeatmapInfo,
    pub mods: Vec<&'static str>,
    pub score: u32,
    pub max_combo: u16,
    pub accuracy: f64,
    /// `None` when the play has no 300s.
    pub ma_ratio: Option<f64>,
    pub performance: Performance,
    pub recorded_at: Option<DateTime<Utc>>,
}

pub struct Analyzer<'a> {
    lookup: &'a dyn BeatmapLookup,
    source: &'a dyn BeatmapSource,
    calculator: &'a dyn PerformanceCalculator,
}

impl<'a> Analyzer<'a> {
    pub fn new(
        lookup: &'a dyn BeatmapLookup,
        source: &'a dyn BeatmapSource,
        calculator: &'a dyn PerformanceCalculator,
    ) -> Self {
        Self {
            lookup,
            source,
            calculator,
        }
    }

    /// Resolves the beatmap, runs the calculator and derives score metrics.
    ///
    /// # Errors
    ///
    /// - `UnsupportedGameMode` if the record is not a mania play
    /// - `ReservedModBit` / `DivisionByZero` from the derived views
    /// - collaborator errors (`NotFound`, `Network`, `Calculator`) unchanged
    pub fn analyze(&self, record: &ReplayRecord) -> Result<ReplayReport> {
        if record.mode() != Some(GameMode::Mania) {
            return Err(Error::UnsupportedGameMode(record.game_mode));
        }

        let mods = decode_mods(record.mods)?;
        let accuracy = record.accuracy()?;
        let ma_ratio = match record.ma_ratio() {
            Ok(ratio) => Some(ratio),
            Err(Error::DivisionByZero { .. }) => None,
            Err(e) => return Err(e),
        };

        let hash = record
            .beatmap_hash
            .as_deref()
            .ok_or_else(|| Error::NotFound("beatmap hash in replay".to_string()))?;

        let beatmap = self.lookup.lookup(hash)?;
        info!(
            beatmap_id = beatmap.beatmap_id,
            beatmapset_id = beatmap.beatmapset_id,
            "resolved beatmap {}",
            beatmap
        );

        let dir = self.source.beatmapset_dir(beatmap.beatmapset_id)?;
        let path = locate_beatmap_file(&dir, beatmap.beatmap_id)?;
        debug!(path = %path.display(), "calculating performance");

        let performance = self
            .calculator
            .calculate(&path, &PerformanceRequest::from(record))?;

        Ok(ReplayReport {
            player: record.player_name.clone().unwrap_or_default(),
            beatmap,
            mods: mods.into_iter().map(|m| m.token()).collect(),
            score: record.score,
            max_combo: record.max_combo,
            accuracy,
            ma_ratio,
            performance,
            recorded_at: record.recorded_at_utc(),
        })
    }
}
