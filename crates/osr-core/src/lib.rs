//! # osr-core
//!
//! Core library for decoding osu!mania replay (`.osr`) files.
//!
//! This crate provides:
//! - A forward-only byte cursor and the format's primitive readers
//! - Schema-driven replay decoding, including the LZMA action payload
//! - Mod bitmask, action stream and score metric views over a record
//! - Collaborator traits for beatmap lookup and performance calculation
//!
//! Decoding is pure and synchronous; reading the file and any network access
//! are left to the caller.

pub mod action;
pub mod analyzer;
pub mod beatmap;
pub mod codec;
pub mod config;
pub mod error;
pub mod metrics;
pub mod mods;
pub mod performance;
pub mod replay;

pub use action::{ActionEvent, Timeline, decode_actions};
pub use analyzer::{Analyzer, ReplayReport};
pub use beatmap::{BeatmapInfo, BeatmapLookup, BeatmapSource, locate_beatmap_file};
pub use codec::{ByteCursor, encode_uleb128};
pub use error::{DecodeError, Error, Result};
pub use metrics::JudgementCounts;
pub use mods::{MOD_TABLE, Mod, decode_mods, encode_mods, format_mods};
pub use performance::{Performance, PerformanceCalculator, PerformanceRequest};
pub use replay::{GameMode, REPLAY_SCHEMA, ReplayRecord, decode_record, decode_replay};
