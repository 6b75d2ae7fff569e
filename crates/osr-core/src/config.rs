//! Decoder and collaborator configuration constants.
//!
//! - Decode limits (varint width, LZMA memory and output limits, string marker)
//! - osu! API and beatmap mirror defaults
//! - .NET tick epoch used by replay timestamps

/// Replay decoding limits.
pub mod decode {
    /// Marker byte that precedes a present string.
    pub const STRING_MARKER: u8 = 0x0b;

    /// Maximum number of bytes in a ULEB128 length (32-bit value).
    pub const MAX_ULEB128_BYTES: usize = 5;

    /// Memory limit handed to the LZMA decoder (256 MiB).
    pub const LZMA_MEMLIMIT: u64 = 256 * 1024 * 1024;

    /// Upper bound on the decompressed action stream (64 MiB).
    pub const MAX_ACTION_BYTES: usize = 64 * 1024 * 1024;
}

/// osu! API v1 and beatmap mirror defaults.
pub mod api {
    use std::time::Duration;

    /// Base URL of the legacy osu! API.
    pub const DEFAULT_BASE_URL: &str = "https://osu.ppy.sh/api";

    /// Beatmap mirror serving `.osz` archives at `/d/{beatmapset_id}`.
    pub const DEFAULT_MIRROR_URL: &str = "https://catboy.best";

    /// Largest `.osz` archive accepted from the mirror (256 MiB).
    pub const MAX_ARCHIVE_BYTES: u64 = 256 * 1024 * 1024;

    /// Global request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
}

/// Replay timestamp conversion.
///
/// Timestamps are .NET `DateTime` ticks: 100 ns intervals since 0001-01-01.
pub mod ticks {
    /// Ticks between 0001-01-01 and the Unix epoch.
    pub const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;

    /// Ticks per second.
    pub const TICKS_PER_SECOND: i64 = 10_000_000;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_constants() {
        assert_eq!(decode::STRING_MARKER, 0x0b);
        assert_eq!(decode::MAX_ULEB128_BYTES * 7, 35);
        assert!(decode::MAX_ACTION_BYTES as u64 <= decode::LZMA_MEMLIMIT);
    }

    #[test]
    fn test_tick_epoch() {
        // 1970-01-01 is 719_162 days after 0001-01-01
        assert_eq!(
            ticks::UNIX_EPOCH_TICKS,
            719_162 * 86_400 * ticks::TICKS_PER_SECOND
        );
    }

    #[test]
    fn test_api_constants() {
        assert!(api::DEFAULT_BASE_URL.starts_with("https://"));
        assert_eq!(api::REQUEST_TIMEOUT.as_secs(), 30);
    }
}
