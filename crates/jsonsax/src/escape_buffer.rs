//! Decoding of the four hex digits of a `\uXXXX` escape.
//!
//! The [`UnicodeEscapeBuffer`] folds ASCII hexadecimal digits (`0-9`, `A-F`,
//! `a-f`) into a UTF-16 code unit as they arrive, so a digit run split over
//! several chunks needs no extra buffering. After the fourth digit the code
//! unit is returned and the accumulator resets for the next escape.
//!
//! Surrogate halves are returned as-is; pairing them is up to the caller.

use crate::error::ErrorKind;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    acc: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of digits consumed so far.
    #[cfg(test)]
    pub(crate) fn len(&self) -> u8 {
        self.len
    }

    #[inline]
    fn hex_val(byte: u8) -> Option<u16> {
        match byte {
            b'0'..=b'9' => Some(u16::from(byte - b'0')),
            b'a'..=b'f' => Some(u16::from(byte - b'a') + 10),
            b'A'..=b'F' => Some(u16::from(byte - b'A') + 10),
            _ => None,
        }
    }

    /// Feeds one digit.
    ///
    /// - `Ok(None)` while fewer than four digits have been seen.
    /// - `Ok(Some(unit))` on the fourth digit.
    /// - `Err(InvalidEscape)` if `byte` is not a hex digit.
    pub(crate) fn feed(&mut self, byte: u8) -> Result<Option<u16>, ErrorKind> {
        let digit = Self::hex_val(byte).ok_or(ErrorKind::InvalidEscape(byte))?;

        self.acc = (self.acc << 4) | digit;
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }

        let unit = self.acc;
        *self = Self::new();
        Ok(Some(unit))
    }
}

#[cfg(test)]
mod tests {
    use super::UnicodeEscapeBuffer;
    use crate::error::ErrorKind;

    #[test]
    fn basic_decoding() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(buf.feed(b'0').unwrap(), None);
        assert_eq!(buf.feed(b'0').unwrap(), None);
        assert_eq!(buf.feed(b'4').unwrap(), None);
        assert_eq!(buf.feed(b'1').unwrap(), Some(0x41));
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn mixed_case_hex() {
        let mut buf = UnicodeEscapeBuffer::new();
        for byte in *b"AbC" {
            assert!(buf.feed(byte).unwrap().is_none());
        }
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.feed(b'd').unwrap(), Some(0xABCD));
    }

    #[test]
    fn surrogates_are_passed_through() {
        let mut buf = UnicodeEscapeBuffer::new();
        let mut last = None;
        for byte in *b"D83D" {
            last = buf.feed(byte).unwrap();
        }
        assert_eq!(last, Some(0xD83D));
    }

    #[test]
    fn invalid_hex_error() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(buf.feed(b'0').unwrap(), None);
        assert_eq!(buf.feed(b'G').unwrap_err(), ErrorKind::InvalidEscape(b'G'));
    }
}
