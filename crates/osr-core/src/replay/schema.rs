//! Field layout of the `.osr` replay format.
//!
//! The layout is a static table walked by [`decode_fields`]; the record
//! assembly in `record.rs` consumes the values in the same order.

use tracing::trace;

use crate::codec::{ByteCursor, lzma};
use crate::error::{DecodeError, Error, Result};

/// How a single field is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Little-endian unsigned integer of the given width in bytes.
    Uint(usize),
    /// Marker byte, ULEB128 length, UTF-8 bytes.
    String,
    /// `u32` length followed by an LZMA-alone payload.
    Compressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

const BYTE: FieldKind = FieldKind::Uint(1);
const SHORT: FieldKind = FieldKind::Uint(2);
const INT: FieldKind = FieldKind::Uint(4);
const LONG: FieldKind = FieldKind::Uint(8);

/// Fixed field sequence of a replay, in file order.
pub const REPLAY_SCHEMA: [FieldSpec; 19] = [
    field("game_mode", BYTE),
    field("format_version", INT),
    field("beatmap_hash", FieldKind::String),
    field("player_name", FieldKind::String),
    field("replay_hash", FieldKind::String),
    field("count_300", SHORT),
    field("count_100", SHORT),
    field("count_50", SHORT),
    field("count_geki", SHORT),
    field("count_katu", SHORT),
    field("count_miss", SHORT),
    field("score", INT),
    field("max_combo", SHORT),
    field("is_full_combo", BYTE),
    field("mods", INT),
    field("life_graph", FieldKind::String),
    field("recorded_at", LONG),
    field("action_stream", FieldKind::Compressed),
    field("online_id", LONG),
];

/// Trailer present only when the Target Practice mod is set.
pub const TARGET_PRACTICE_FIELD: FieldSpec = field("target_practice_accuracy", LONG);

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Uint(u64),
    String(Option<String>),
    Bytes(Vec<u8>),
}

/// Reads one field, tagging any failure with the field name.
pub fn read_field(cursor: &mut ByteCursor<'_>, spec: &FieldSpec) -> Result<FieldValue> {
    let position = cursor.position();
    let value = match spec.kind {
        FieldKind::Uint(width) => cursor.read_uint(width).map(FieldValue::Uint),
        FieldKind::String => cursor.read_string().map(FieldValue::String),
        FieldKind::Compressed => cursor
            .read_byte_array()
            .and_then(lzma::decompress)
            .map(FieldValue::Bytes),
    }
    .map_err(|source| Error::InvalidReplayFile {
        field: spec.name,
        source,
    })?;

    trace!(field = spec.name, position, "read field");
    Ok(value)
}

/// Reads every field of `schema` in order.
pub fn decode_fields(
    cursor: &mut ByteCursor<'_>,
    schema: &[FieldSpec],
) -> Result<Vec<(FieldSpec, FieldValue)>> {
    schema
        .iter()
        .map(|spec| read_field(cursor, spec).map(|value| (*spec, value)))
        .collect()
}

/// Ordered consumer of decoded values with typed accessors.
///
/// Each accessor checks that the next value has the expected name and kind,
/// so the assembly code cannot drift from [`REPLAY_SCHEMA`] unnoticed.
pub struct FieldValues {
    values: std::vec::IntoIter<(FieldSpec, FieldValue)>,
}

impl FieldValues {
    pub fn new(values: Vec<(FieldSpec, FieldValue)>) -> Self {
        Self {
            values: values.into_iter(),
        }
    }

    fn next(&mut self, name: &'static str) -> Result<(FieldSpec, FieldValue)> {
        match self.values.next() {
            Some((spec, value)) if spec.name == name => Ok((spec, value)),
            _ => Err(mismatch(name)),
        }
    }

    fn next_uint(&mut self, name: &'static str, width: usize) -> Result<u64> {
        match self.next(name)? {
            (spec, FieldValue::Uint(v)) if spec.kind == FieldKind::Uint(width) => Ok(v),
            _ => Err(mismatch(name)),
        }
    }

    pub fn next_u8(&mut self, name: &'static str) -> Result<u8> {
        Ok(self.next_uint(name, 1)? as u8)
    }

    pub fn next_u16(&mut self, name: &'static str) -> Result<u16> {
        Ok(self.next_uint(name, 2)? as u16)
    }

    pub fn next_u32(&mut self, name: &'static str) -> Result<u32> {
        Ok(self.next_uint(name, 4)? as u32)
    }

    pub fn next_i64(&mut self, name: &'static str) -> Result<i64> {
        Ok(self.next_uint(name, 8)? as i64)
    }

    pub fn next_string(&mut self, name: &'static str) -> Result<Option<String>> {
        match self.next(name)? {
            (_, FieldValue::String(s)) => Ok(s),
            _ => Err(mismatch(name)),
        }
    }

    pub fn next_bytes(&mut self, name: &'static str) -> Result<Vec<u8>> {
        match self.next(name)? {
            (_, FieldValue::Bytes(b)) => Ok(b),
            _ => Err(mismatch(name)),
        }
    }
}

fn mismatch(name: &'static str) -> Error {
    Error::InvalidReplayFile {
        field: name,
        source: DecodeError::SchemaMismatch,
    }
}
