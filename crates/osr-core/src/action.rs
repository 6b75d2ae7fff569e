//! Decoding of the decompressed action payload.
//!
//! The payload is ASCII text: `,`-separated frames, each frame four
//! `|`-separated fields `w|x|y|z`. `w` is the time since the previous frame
//! in milliseconds; for mania `x` carries the pressed-key bitmask and `y`/`z`
//! are unused.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single timestamped input frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEvent {
    pub time_delta: i64,
    pub input_state: u32,
}

impl ActionEvent {
    pub fn new(time_delta: i64, input_state: u32) -> Self {
        Self {
            time_delta,
            input_state,
        }
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        key < 32 && self.input_state & (1 << key) != 0
    }
}

/// Parses the payload into events.
///
/// Frames without exactly four fields, or whose time/key fields are not
/// integers, are skipped; decoding continues with the next frame.
pub fn decode_actions(payload: &[u8]) -> Vec<ActionEvent> {
    let mut events = Vec::new();
    let mut skipped = 0usize;

    for (index, frame) in payload.split(|&b| b == b',').enumerate() {
        match parse_frame(frame) {
            Some(event) => events.push(event),
            None => {
                if !frame.is_empty() {
                    debug!(index, frame = %String::from_utf8_lossy(frame), "skipping action frame");
                }
                skipped += 1;
            }
        }
    }

    debug!(events = events.len(), skipped, "decoded action stream");
    events
}

fn parse_frame(frame: &[u8]) -> Option<ActionEvent> {
    let fields: Vec<&[u8]> = frame.split(|&b| b == b'|').collect();
    let [time, keys, _, _] = fields.as_slice() else {
        return None;
    };

    Some(ActionEvent {
        time_delta: parse_number(time)?,
        input_state: parse_number(keys)?,
    })
}

fn parse_number<T: std::str::FromStr>(field: &[u8]) -> Option<T> {
    std::str::from_utf8(field).ok()?.trim().parse().ok()
}

/// Absolute-time view over a sequence of events.
#[derive(Debug, Clone, Copy)]
pub struct Timeline<'a> {
    events: &'a [ActionEvent],
}

impl<'a> Timeline<'a> {
    pub fn new(events: &'a [ActionEvent]) -> Self {
        Self { events }
    }

    /// Yields `(absolute_time_ms, event)` pairs.
    pub fn absolute(&self) -> impl Iterator<Item = (i64, &'a ActionEvent)> + 'a {
        self.events.iter().scan(0i64, |time, event| {
            *time = time.saturating_add(event.time_delta);
            Some((*time, event))
        })
    }

    /// Total duration covered by the events.
    pub fn duration(&self) -> i64 {
        self.absolute().last().map(|(t, _)| t).unwrap_or(0)
    }

    /// Counts presses per key bit: a press is a bit set in an event that was
    /// clear in the previous one.
    pub fn key_presses(&self) -> [u32; 32] {
        let mut presses = [0u32; 32];
        let mut previous = 0u32;

        for event in self.events {
            let rising = event.input_state & !previous;
            for (key, count) in presses.iter_mut().enumerate() {
                if rising & (1 << key) != 0 {
                    *count += 1;
                }
            }
            previous = event.input_state;
        }

        presses
    }
}
