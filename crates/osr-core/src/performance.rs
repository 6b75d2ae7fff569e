//! Performance-point calculation boundary.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::metrics::JudgementCounts;
use crate::replay::ReplayRecord;

/// Inputs handed to a [`PerformanceCalculator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceRequest {
    pub mods: u32,
    pub score: u32,
    pub max_combo: u16,
    pub judgements: JudgementCounts,
}

impl From<&ReplayRecord> for PerformanceRequest {
    fn from(record: &ReplayRecord) -> Self {
        Self {
            mods: record.mods,
            score: record.score,
            max_combo: record.max_combo,
            judgements: record.judgements,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    pub pp: f64,
    pub stars: f64,
}

/// Computes performance points and star rating for a score on a beatmap file.
///
/// Implementations are expected to be deterministic for a given input.
pub trait PerformanceCalculator {
    fn calculate(&self, beatmap_path: &Path, request: &PerformanceRequest) -> Result<Performance>;
}
