//! Replay (`.osr`) decoding.
//!
//! This module contains:
//! - `REPLAY_SCHEMA` - the field layout, walked by a generic reader
//! - `ReplayRecord` - the decoded record and its derived views
//! - `decode_record` / `decode_replay` - structural and mania-only entry points

mod record;
pub mod schema;

pub use record::*;
pub use schema::{FieldKind, FieldSpec, REPLAY_SCHEMA};
