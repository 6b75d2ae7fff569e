//! Forward-only byte cursor for parsing replay data.

use crate::error::DecodeError;

/// A position-tracking, forward-only reader over a byte slice.
///
/// Every read either returns exactly the requested bytes and advances, or
/// fails with [`DecodeError::TruncatedInput`] and leaves the position where
/// it was. There is no way to seek backwards.
///
/// # Example
///
/// ```
/// use osr_core::codec::ByteCursor;
///
/// let data = [0x01, 0x02, 0x03];
/// let mut cursor = ByteCursor::new(&data);
///
/// assert_eq!(cursor.read_exact(2).unwrap(), &[0x01, 0x02]);
/// assert_eq!(cursor.position(), 2);
/// assert_eq!(cursor.remaining(), 1);
/// assert!(cursor.read_exact(2).is_err());
/// ```
#[derive(Debug)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current read position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes remaining from the current position.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Reads the next `count` bytes and advances the position.
    ///
    /// # Errors
    ///
    /// Returns `TruncatedInput` if fewer than `count` bytes remain.
    pub fn read_exact(&mut self, count: usize) -> Result<&'a [u8], DecodeError> {
        let remaining = self.remaining();
        if count > remaining {
            return Err(DecodeError::TruncatedInput {
                position: self.pos,
                requested: count,
                remaining,
            });
        }

        let end = self.pos + count;
        let result = &self.data[self.pos..end];
        self.pos = end;
        Ok(result)
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let bytes = self.read_exact(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_sequential_reads() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05];
        let mut cursor = ByteCursor::new(&data);

        assert_eq!(cursor.read_exact(1).unwrap(), &[0x01]);
        assert_eq!(cursor.read_exact(3).unwrap(), &[0x02, 0x03, 0x04]);
        assert_eq!(cursor.position(), 4);
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn test_cursor_zero_length_read() {
        let data: [u8; 0] = [];
        let mut cursor = ByteCursor::new(&data);
        assert!(cursor.read_exact(0).unwrap().is_empty());
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_cursor_truncated_does_not_advance() {
        let data = [0x01, 0x02];
        let mut cursor = ByteCursor::new(&data);
        cursor.read_exact(1).unwrap();

        let err = cursor.read_exact(4).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TruncatedInput {
                position: 1,
                requested: 4,
                remaining: 1,
            }
        ));
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_cursor_huge_request_does_not_overflow() {
        let data = [0x01];
        let mut cursor = ByteCursor::new(&data);
        assert!(cursor.read_exact(usize::MAX).is_err());
    }

    #[test]
    fn test_cursor_read_array() {
        let data = [0xAA, 0xBB, 0xCC];
        let mut cursor = ByteCursor::new(&data);
        let arr: [u8; 2] = cursor.read_array().unwrap();
        assert_eq!(arr, [0xAA, 0xBB]);
        assert!(cursor.read_array::<2>().is_err());
    }
}
