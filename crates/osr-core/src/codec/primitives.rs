//! Primitive readers layered on top of [`ByteCursor`].
//!
//! All fixed-width integers in the replay format are little-endian. Strings
//! are preceded by a marker byte and a ULEB128 length; byte arrays by a
//! `u32` length.

use tracing::trace;

use super::cursor::ByteCursor;
use crate::config::decode::{MAX_ULEB128_BYTES, STRING_MARKER};
use crate::error::DecodeError;

impl<'a> ByteCursor<'a> {
    /// Reads an unsigned little-endian integer of `width` bytes.
    ///
    /// `width` must be one of 1, 2, 4 or 8. The width is checked before any
    /// byte is consumed.
    pub fn read_uint(&mut self, width: usize) -> Result<u64, DecodeError> {
        if !matches!(width, 1 | 2 | 4 | 8) {
            return Err(DecodeError::UnsupportedWidth(width));
        }

        let bytes = self.read_exact(width)?;
        let mut buf = [0u8; 8];
        buf[..width].copy_from_slice(bytes);
        Ok(u64::from_le_bytes(buf))
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64, DecodeError> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        Ok(f64::from_le_bytes(self.read_array()?))
    }

    /// Reads a ULEB128 variable-length integer.
    ///
    /// At most [`MAX_ULEB128_BYTES`] bytes are consumed, and the decoded value
    /// must fit in a `u32`.
    ///
    /// # Errors
    ///
    /// - `TruncatedInput` if the buffer ends before the terminating byte.
    /// - `MalformedVarint` if the varint runs past the byte cap or overflows.
    pub fn read_uleb128(&mut self) -> Result<u32, DecodeError> {
        let start = self.position();
        let mut result: u64 = 0;

        for index in 0..MAX_ULEB128_BYTES {
            let byte = self.read_u8()?;
            result |= u64::from(byte & 0x7F) << (7 * index);

            if byte & 0x80 == 0 {
                return u32::try_from(result)
                    .map_err(|_| DecodeError::MalformedVarint { position: start });
            }
        }

        Err(DecodeError::MalformedVarint { position: start })
    }

    /// Reads a marker-prefixed UTF-8 string.
    ///
    /// Returns `None` when the marker byte is anything other than `0x0b`; in
    /// that case only the marker is consumed.
    pub fn read_string(&mut self) -> Result<Option<String>, DecodeError> {
        let marker = self.read_u8()?;
        if marker != STRING_MARKER {
            trace!(marker, position = self.position(), "string absent");
            return Ok(None);
        }

        let len = self.read_uleb128()? as usize;
        let position = self.position();
        let bytes = self.read_exact(len)?;

        std::str::from_utf8(bytes)
            .map(|s| Some(s.to_owned()))
            .map_err(|source| DecodeError::InvalidEncoding { position, source })
    }

    /// Reads a `u32` length followed by that many raw bytes.
    pub fn read_byte_array(&mut self) -> Result<&'a [u8], DecodeError> {
        let len = self.read_u32()? as usize;
        self.read_exact(len)
    }
}

/// Encodes `value` as ULEB128.
pub fn encode_uleb128(mut value: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_ULEB128_BYTES);
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return out;
        }
        out.push(byte | 0x80);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_uint_widths() {
        let data = [
            0x2A, // u8: 42
            0x34, 0x12, // u16: 0x1234
            0x78, 0x56, 0x34, 0x12, // u32: 0x12345678
            0xEF, 0xCD, 0xAB, 0x90, 0x78, 0x56, 0x34, 0x12, // u64
        ];
        let mut cursor = ByteCursor::new(&data);

        assert_eq!(cursor.read_uint(1).unwrap(), 42);
        assert_eq!(cursor.read_uint(2).unwrap(), 0x1234);
        assert_eq!(cursor.read_uint(4).unwrap(), 0x12345678);
        assert_eq!(cursor.read_uint(8).unwrap(), 0x1234567890ABCDEF);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_read_uint_rejects_odd_width() {
        let data = [0u8; 8];
        let mut cursor = ByteCursor::new(&data);
        assert!(matches!(
            cursor.read_uint(3),
            Err(DecodeError::UnsupportedWidth(3))
        ));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_typed_reads_match_read_uint() {
        let data = [0xFF, 0xFF, 0x01, 0x00];
        let mut a = ByteCursor::new(&data);
        let mut b = ByteCursor::new(&data);
        assert_eq!(u64::from(a.read_u16().unwrap()), b.read_uint(2).unwrap());
        assert_eq!(a.read_u16().unwrap(), 1);
    }

    #[test]
    fn test_read_u32_truncated() {
        let data = [0x01, 0x02, 0x03];
        let mut cursor = ByteCursor::new(&data);
        assert!(matches!(
            cursor.read_u32(),
            Err(DecodeError::TruncatedInput { requested: 4, .. })
        ));
    }

    #[test]
    fn test_uleb128_roundtrip() {
        for value in [0u32, 127, 128, 300, 16384, 2_097_151] {
            let encoded = encode_uleb128(value);
            let mut cursor = ByteCursor::new(&encoded);
            assert_eq!(cursor.read_uleb128().unwrap(), value, "value {value}");
            assert!(cursor.is_exhausted());
        }
    }

    #[test]
    fn test_uleb128_known_encoding() {
        assert_eq!(encode_uleb128(300), vec![0xAC, 0x02]);
        assert_eq!(encode_uleb128(127), vec![0x7F]);
        assert_eq!(encode_uleb128(u32::MAX), vec![0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
    }

    #[test]
    fn test_uleb128_runaway() {
        let data = [0x80, 0x80, 0x80, 0x80, 0x80, 0x01];
        let mut cursor = ByteCursor::new(&data);
        assert!(matches!(
            cursor.read_uleb128(),
            Err(DecodeError::MalformedVarint { position: 0 })
        ));
    }

    #[test]
    fn test_uleb128_overflow_in_last_byte() {
        let data = [0xFF, 0xFF, 0xFF, 0xFF, 0x7F];
        let mut cursor = ByteCursor::new(&data);
        assert!(matches!(
            cursor.read_uleb128(),
            Err(DecodeError::MalformedVarint { .. })
        ));
    }

    #[test]
    fn test_uleb128_truncated() {
        let data = [0x80, 0x80];
        let mut cursor = ByteCursor::new(&data);
        assert!(matches!(
            cursor.read_uleb128(),
            Err(DecodeError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_read_string_present() {
        let mut data = vec![0x0b, 0x05];
        data.extend_from_slice(b"hello");
        let mut cursor = ByteCursor::new(&data);

        assert_eq!(cursor.read_string().unwrap().as_deref(), Some("hello"));
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_read_string_absent_consumes_marker_only() {
        let data = [0x00, 0x05, b'h'];
        let mut cursor = ByteCursor::new(&data);

        assert_eq!(cursor.read_string().unwrap(), None);
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_read_string_empty() {
        let data = [0x0b, 0x00];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_string().unwrap().as_deref(), Some(""));
    }

    #[test]
    fn test_read_string_invalid_utf8() {
        let data = [0x0b, 0x02, 0xC3, 0x28];
        let mut cursor = ByteCursor::new(&data);
        assert!(matches!(
            cursor.read_string(),
            Err(DecodeError::InvalidEncoding { position: 2, .. })
        ));
    }

    #[test]
    fn test_read_string_length_exceeds_input() {
        let data = [0x0b, 0x0A, b'a', b'b'];
        let mut cursor = ByteCursor::new(&data);
        assert!(matches!(
            cursor.read_string(),
            Err(DecodeError::TruncatedInput {
                requested: 10,
                remaining: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_read_byte_array() {
        let data = [0x03, 0x00, 0x00, 0x00, 0xAA, 0xBB, 0xCC, 0xDD];
        let mut cursor = ByteCursor::new(&data);

        assert_eq!(cursor.read_byte_array().unwrap(), &[0xAA, 0xBB, 0xCC]);
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn test_read_byte_array_declared_length_too_long() {
        let data = [0xFF, 0xFF, 0xFF, 0x7F, 0x00];
        let mut cursor = ByteCursor::new(&data);
        assert!(matches!(
            cursor.read_byte_array(),
            Err(DecodeError::TruncatedInput { .. })
        ));
    }
}
