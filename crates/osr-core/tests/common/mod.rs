//! Replay fixture builder shared by the integration tests.

#![allow(dead_code)]

use osr_core::codec::lzma;
use osr_core::encode_uleb128;

/// Builds `.osr` bytes field by field, in file order.
#[derive(Debug, Clone)]
pub struct ReplayBuilder {
    pub game_mode: u8,
    pub format_version: u32,
    pub beatmap_hash: Option<String>,
    pub player_name: Option<String>,
    pub replay_hash: Option<String>,
    /// 300, 100, 50, geki, katu, miss
    pub counts: [u16; 6],
    pub score: u32,
    pub max_combo: u16,
    pub full_combo: u8,
    pub mods: u32,
    pub life_graph: Option<String>,
    pub recorded_at: i64,
    pub actions: Vec<u8>,
    pub online_id: i64,
    pub target_practice_accuracy: Option<f64>,
}

impl Default for ReplayBuilder {
    fn default() -> Self {
        Self {
            game_mode: 3,
            format_version: 20240130,
            beatmap_hash: Some("0123456789abcdef0123456789abcdef".to_string()),
            player_name: Some("peppy".to_string()),
            replay_hash: Some("fedcba9876543210fedcba9876543210".to_string()),
            counts: [100, 10, 5, 250, 3, 1],
            score: 912_345,
            max_combo: 321,
            full_combo: 0,
            mods: 0,
            life_graph: Some("0|1,1000|0.95,".to_string()),
            recorded_at: 638_000_000_000_000_000,
            actions: b"0|1|0|0,16|3|0|0,16|0|0|0,-12345|0|0|424242".to_vec(),
            online_id: 4_000_000_123,
            target_practice_accuracy: None,
        }
    }
}

impl ReplayBuilder {
    pub fn mode(mut self, game_mode: u8) -> Self {
        self.game_mode = game_mode;
        self
    }

    pub fn mods(mut self, mods: u32) -> Self {
        self.mods = mods;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        self.build_with_payload(&lzma::compress(&self.actions, 6).unwrap())
    }

    /// Builds with a raw (already compressed, or deliberately corrupt) payload.
    pub fn build_with_payload(&self, payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.push(self.game_mode);
        out.extend_from_slice(&self.format_version.to_le_bytes());
        write_string(&mut out, self.beatmap_hash.as_deref());
        write_string(&mut out, self.player_name.as_deref());
        write_string(&mut out, self.replay_hash.as_deref());
        for count in self.counts {
            out.extend_from_slice(&count.to_le_bytes());
        }
        out.extend_from_slice(&self.score.to_le_bytes());
        out.extend_from_slice(&self.max_combo.to_le_bytes());
        out.push(self.full_combo);
        out.extend_from_slice(&self.mods.to_le_bytes());
        write_string(&mut out, self.life_graph.as_deref());
        out.extend_from_slice(&self.recorded_at.to_le_bytes());
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(payload);
        out.extend_from_slice(&self.online_id.to_le_bytes());
        if let Some(acc) = self.target_practice_accuracy {
            out.extend_from_slice(&acc.to_le_bytes());
        }
        out
    }
}

pub fn write_string(out: &mut Vec<u8>, value: Option<&str>) {
    match value {
        Some(s) => {
            out.push(0x0b);
            out.extend_from_slice(&encode_uleb128(s.len() as u32));
            out.extend_from_slice(s.as_bytes());
        }
        None => out.push(0x00),
    }
}
