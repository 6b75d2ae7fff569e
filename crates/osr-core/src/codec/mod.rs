//! Low-level binary decoding for replay files.
//!
//! - `ByteCursor` - forward-only reader with position tracking
//! - primitive readers (fixed-width integers, ULEB128, strings, byte arrays)
//! - LZMA compression for the action payload

mod cursor;
pub mod lzma;
mod primitives;

pub use cursor::ByteCursor;
pub use primitives::encode_uleb128;
