//! LZMA "alone" (`.lzma`) compression for the embedded action payload.

use std::io::{Read, Write};

use tracing::debug;
use xz2::read::XzDecoder;
use xz2::stream::{LzmaOptions, Stream};
use xz2::write::XzEncoder;

use crate::config::decode::{LZMA_MEMLIMIT, MAX_ACTION_BYTES};
use crate::error::DecodeError;

/// Decompresses an LZMA-alone payload of at most `MAX_ACTION_BYTES`.
pub fn decompress(payload: &[u8]) -> Result<Vec<u8>, DecodeError> {
    decompress_bounded(payload, MAX_ACTION_BYTES)
}

/// Decompresses an LZMA-alone payload, failing with `PayloadTooLarge` once
/// the output would exceed `limit` bytes.
pub fn decompress_bounded(payload: &[u8], limit: usize) -> Result<Vec<u8>, DecodeError> {
    let stream = Stream::new_lzma_decoder(LZMA_MEMLIMIT).map_err(stream_error)?;
    let mut decoder = XzDecoder::new_stream(payload, stream);

    let mut out = Vec::with_capacity(payload.len().saturating_mul(4).min(limit));
    (&mut decoder)
        .take(limit as u64 + 1)
        .read_to_end(&mut out)
        .map_err(DecodeError::Decompression)?;

    if out.len() > limit {
        return Err(DecodeError::PayloadTooLarge { limit });
    }

    debug!(
        compressed = payload.len(),
        decompressed = out.len(),
        "decompressed action payload"
    );
    Ok(out)
}

/// Compresses `data` into an LZMA-alone payload at the given preset (0-9).
pub fn compress(data: &[u8], preset: u32) -> Result<Vec<u8>, DecodeError> {
    let options = LzmaOptions::new_preset(preset).map_err(stream_error)?;
    let stream = Stream::new_lzma_encoder(&options).map_err(stream_error)?;

    let mut encoder = XzEncoder::new_stream(Vec::new(), stream);
    encoder
        .write_all(data)
        .map_err(DecodeError::Decompression)?;
    encoder.finish().map_err(DecodeError::Decompression)
}

fn stream_error(e: xz2::stream::Error) -> DecodeError {
    DecodeError::Decompression(std::io::Error::other(e))
}
