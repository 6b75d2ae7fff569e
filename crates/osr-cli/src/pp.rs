//! Performance calculation backed by rosu-pp.

use std::path::Path;

use osr_core::{Error, Performance, PerformanceCalculator, PerformanceRequest, Result};
use rosu_pp::{Beatmap, ManiaPP};
use tracing::debug;

pub struct RosuCalculator;

impl PerformanceCalculator for RosuCalculator {
    fn calculate(&self, beatmap_path: &Path, request: &PerformanceRequest) -> Result<Performance> {
        let map = Beatmap::from_path(beatmap_path).map_err(|e| {
            Error::Calculator(format!("failed to parse {}: {e}", beatmap_path.display()))
        })?;

        let j = request.judgements;
        let attributes = ManiaPP::new(&map)
            .mods(request.mods)
            .n320(usize::from(j.geki))
            .n300(usize::from(j.perfect))
            .n200(usize::from(j.katu))
            .n100(usize::from(j.great))
            .n50(usize::from(j.good))
            .n_misses(usize::from(j.miss))
            .calculate();

        let performance = Performance {
            pp: attributes.pp(),
            stars: attributes.stars(),
        };
        debug!(pp = performance.pp, stars = performance.stars, "calculated performance");
        Ok(performance)
    }
}
