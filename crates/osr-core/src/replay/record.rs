use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{FromRepr, IntoStaticStr};
use tracing::debug;

use super::schema::{
    FieldValues, REPLAY_SCHEMA, TARGET_PRACTICE_FIELD, decode_fields, read_field,
};
use crate::action::{ActionEvent, decode_actions};
use crate::codec::ByteCursor;
use crate::config::ticks::{TICKS_PER_SECOND, UNIX_EPOCH_TICKS};
use crate::error::{Error, Result};
use crate::metrics::JudgementCounts;
use crate::mods::{Mod, decode_mods};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    FromRepr,
    IntoStaticStr,
)]
#[repr(u8)]
pub enum GameMode {
    #[strum(serialize = "osu!")]
    Osu = 0,
    #[strum(serialize = "osu!taiko")]
    Taiko = 1,
    #[strum(serialize = "osu!catch")]
    CatchTheBeat = 2,
    #[strum(serialize = "osu!mania")]
    Mania = 3,
}

impl GameMode {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn display_name(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A fully decoded replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayRecord {
    pub game_mode: u8,
    pub format_version: u32,
    pub beatmap_hash: Option<String>,
    pub player_name: Option<String>,
    pub replay_hash: Option<String>,
    pub judgements: JudgementCounts,
    pub score: u32,
    pub max_combo: u16,
    pub is_full_combo: bool,
    pub mods: u32,
    pub life_graph: Option<String>,
    pub recorded_at: i64,
    #[serde(skip)]
    pub action_stream: Vec<u8>,
    pub online_id: i64,
    pub target_practice_accuracy: Option<f64>,
}

impl ReplayRecord {
    pub fn mode(&self) -> Option<GameMode> {
        GameMode::from_u8(self.game_mode)
    }

    pub fn mod_list(&self) -> Result<Vec<Mod>> {
        decode_mods(self.mods)
    }

    pub fn actions(&self) -> Vec<ActionEvent> {
        decode_actions(&self.action_stream)
    }

    pub fn accuracy(&self) -> Result<f64> {
        self.judgements.accuracy()
    }

    pub fn ma_ratio(&self) -> Result<f64> {
        self.judgements.ma_ratio()
    }

    /// Key count forced by a key mod, if any.
    pub fn key_count(&self) -> Result<Option<u8>> {
        Ok(self.mod_list()?.into_iter().find_map(Mod::key_count))
    }

    /// Converts the tick timestamp to UTC. `None` if out of range.
    pub fn recorded_at_utc(&self) -> Option<DateTime<Utc>> {
        let unix_ticks = self.recorded_at.checked_sub(UNIX_EPOCH_TICKS)?;
        let secs = unix_ticks.div_euclid(TICKS_PER_SECOND);
        let nanos = (unix_ticks.rem_euclid(TICKS_PER_SECOND) * 100) as u32;
        DateTime::<Utc>::from_timestamp(secs, nanos)
    }
}

/// Decodes the replay structure without checking the game mode.
///
/// # Errors
///
/// Any primitive or decompression failure is returned as
/// `InvalidReplayFile` naming the field; no partial record is produced.
pub fn decode_record(bytes: &[u8]) -> Result<ReplayRecord> {
    let mut cursor = ByteCursor::new(bytes);
    let mut fields = FieldValues::new(decode_fields(&mut cursor, &REPLAY_SCHEMA)?);

    let mut record = ReplayRecord {
        game_mode: fields.next_u8("game_mode")?,
        format_version: fields.next_u32("format_version")?,
        beatmap_hash: fields.next_string("beatmap_hash")?,
        player_name: fields.next_string("player_name")?,
        replay_hash: fields.next_string("replay_hash")?,
        judgements: JudgementCounts {
            perfect: fields.next_u16("count_300")?,
            great: fields.next_u16("count_100")?,
            good: fields.next_u16("count_50")?,
            geki: fields.next_u16("count_geki")?,
            katu: fields.next_u16("count_katu")?,
            miss: fields.next_u16("count_miss")?,
        },
        score: fields.next_u32("score")?,
        max_combo: fields.next_u16("max_combo")?,
        is_full_combo: fields.next_u8("is_full_combo")? != 0,
        mods: fields.next_u32("mods")?,
        life_graph: fields.next_string("life_graph")?,
        recorded_at: fields.next_i64("recorded_at")?,
        action_stream: fields.next_bytes("action_stream")?,
        online_id: fields.next_i64("online_id")?,
        target_practice_accuracy: None,
    };

    // Part of the structure for every mode, so a missing trailer is reported
    // even when the mode gate would reject the record afterwards.
    if Mod::TargetPractice.is_set_in(record.mods) {
        let mut trailer = FieldValues::new(vec![(
            TARGET_PRACTICE_FIELD,
            read_field(&mut cursor, &TARGET_PRACTICE_FIELD)?,
        )]);
        let bits = trailer.next_i64(TARGET_PRACTICE_FIELD.name)? as u64;
        record.target_practice_accuracy = Some(f64::from_bits(bits));
    }

    if !cursor.is_exhausted() {
        debug!(remaining = cursor.remaining(), "trailing bytes after replay");
    }

    debug!(
        mode = record.game_mode,
        version = record.format_version,
        player = record.player_name.as_deref().unwrap_or(""),
        actions = record.action_stream.len(),
        "decoded replay"
    );
    Ok(record)
}

/// Decodes a replay and requires it to be an osu!mania play.
///
/// # Errors
///
/// Structural failures as in [`decode_record`]; `UnsupportedGameMode` for
/// any mode other than mania.
pub fn decode_replay(bytes: &[u8]) -> Result<ReplayRecord> {
    let record = decode_record(bytes)?;
    match record.mode() {
        Some(GameMode::Mania) => Ok(record),
        _ => Err(Error::UnsupportedGameMode(record.game_mode)),
    }
}
