//! Incremental UTF-8 validation for string content.
//!
//! Multi-byte sequences may be split across chunks, so the validator keeps
//! the number of outstanding continuation bytes and the admissible range for
//! the next one. The ranges reject overlong encodings, UTF-16 surrogates
//! encoded in UTF-8 and code points above U+10FFFF.

#[derive(Debug, Clone, Copy)]
pub(crate) struct Utf8Validator {
    /// Continuation bytes still expected.
    needed: u8,
    /// Inclusive bounds for the next continuation byte.
    lower: u8,
    upper: u8,
}

impl Default for Utf8Validator {
    fn default() -> Self {
        Self {
            needed: 0,
            lower: 0x80,
            upper: 0xBF,
        }
    }
}

impl Utf8Validator {
    /// Whether a multi-byte sequence is still open.
    pub(crate) fn in_sequence(&self) -> bool {
        self.needed > 0
    }

    /// Feeds one byte; returns `false` if the byte makes the input invalid.
    pub(crate) fn feed(&mut self, byte: u8) -> bool {
        if self.needed > 0 {
            if !(self.lower..=self.upper).contains(&byte) {
                return false;
            }
            self.needed -= 1;
            self.lower = 0x80;
            self.upper = 0xBF;
            return true;
        }

        let (needed, lower, upper) = match byte {
            0x00..=0x7F => return true,
            0xC2..=0xDF => (1, 0x80, 0xBF),
            0xE0 => (2, 0xA0, 0xBF),
            0xE1..=0xEC | 0xEE..=0xEF => (2, 0x80, 0xBF),
            0xED => (2, 0x80, 0x9F),
            0xF0 => (3, 0x90, 0xBF),
            0xF1..=0xF3 => (3, 0x80, 0xBF),
            0xF4 => (3, 0x80, 0x8F),
            _ => return false,
        };
        self.needed = needed;
        self.lower = lower;
        self.upper = upper;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::Utf8Validator;

    fn validate(bytes: &[u8]) -> Option<usize> {
        let mut v = Utf8Validator::default();
        for (i, &b) in bytes.iter().enumerate() {
            if !v.feed(b) {
                return Some(i);
            }
        }
        if v.in_sequence() {
            return Some(bytes.len());
        }
        None
    }

    #[test]
    fn agrees_with_core_on_samples() {
        let samples: &[&[u8]] = &[
            b"plain",
            "h\u{e9}llo \u{1F600} \u{FFFD}".as_bytes(),
            b"\xC1\xBF",
            b"\xE0\x80\x80",
            b"\xED\xA0\x80",
            b"\xF4\x90\x80\x80",
            b"\xF0\x9F\x98",
            b"\x80",
            b"\xFF",
        ];
        for sample in samples {
            let ours = validate(sample);
            let core = core::str::from_utf8(sample).err().map(|e| e.valid_up_to());
            assert_eq!(ours.is_none(), core.is_none(), "{sample:?}");
        }
    }

    #[test]
    fn reports_first_bad_byte() {
        assert_eq!(validate(b"ab\xC3("), Some(3));
        assert_eq!(validate(b"\xED\xA0\x80"), Some(1));
    }
}
