//! Resumable scanner for string bodies.
//!
//! The scanner starts just after the opening quote and decodes into an owned
//! byte accumulator. When a chunk ends before the closing quote, everything
//! needed to continue lives in [`StringScanner`]: the accumulator, the escape
//! sub-state (bare backslash, `n` of four hex digits, waiting for the low half
//! of a surrogate pair) and the UTF-8 sequence state. Feeding the next chunk
//! resumes exactly where the previous one stopped, so splitting a string at
//! any byte yields the same decoded text.

use alloc::{string::String, vec::Vec};

use crate::{error::ErrorKind, escape_buffer::UnicodeEscapeBuffer, utf8::Utf8Validator};

/// Whether a string is an object key or a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StringRole {
    Key,
    Value,
}

#[derive(Debug, Clone, Copy)]
enum EscapeState {
    /// Plain content.
    None,
    /// Just saw `\`.
    Backslash,
    /// Inside `\uXXXX`; `high` is set while decoding the low half of a pair.
    Unicode {
        digits: UnicodeEscapeBuffer,
        high: Option<u16>,
    },
    /// A high surrogate was decoded; `\` must follow.
    LowBackslash(u16),
    /// A high surrogate and `\` were seen; `u` must follow.
    LowU(u16),
}

/// Result of scanning one chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scan {
    /// The closing quote was found; this many bytes were consumed, quote
    /// included.
    Complete(usize),
    /// The byte at this index is invalid.
    Failed { at: usize, kind: ErrorKind },
    /// The chunk was consumed without finishing the string.
    Suspended,
}

#[derive(Debug)]
pub(crate) struct StringScanner {
    role: StringRole,
    buffer: Vec<u8>,
    escape: EscapeState,
    utf8: Utf8Validator,
}

#[inline]
fn is_special(byte: u8) -> bool {
    byte == b'"' || byte == b'\\' || byte < 0x20 || byte >= 0x80
}

impl StringScanner {
    /// `buffer` must be empty; it is usually drawn from the event pool.
    pub(crate) fn new(role: StringRole, buffer: Vec<u8>) -> Self {
        debug_assert!(buffer.is_empty());
        Self {
            role,
            buffer,
            escape: EscapeState::None,
            utf8: Utf8Validator::default(),
        }
    }

    pub(crate) fn role(&self) -> StringRole {
        self.role
    }

    /// Hands back the accumulator, for recycling after a failure.
    pub(crate) fn into_buffer(self) -> Vec<u8> {
        self.buffer
    }

    /// The decoded text, once [`Scan::Complete`] has been returned.
    ///
    /// Raw bytes pass the UTF-8 validator and escapes are pushed as whole
    /// `char`s, so the accumulator is always well-formed here.
    pub(crate) fn into_text(self) -> String {
        debug_assert!(core::str::from_utf8(&self.buffer).is_ok());
        String::from_utf8(self.buffer)
            .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
    }

    fn push_char(&mut self, ch: char) {
        let mut tmp = [0u8; 4];
        self.buffer
            .extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
    }

    fn push_units(&mut self, units: &[u16]) -> bool {
        match char::decode_utf16(units.iter().copied()).next() {
            Some(Ok(ch)) => {
                self.push_char(ch);
                true
            }
            _ => false,
        }
    }

    /// Scans `input` until the closing quote, an error, or the end of the
    /// chunk.
    pub(crate) fn scan(&mut self, input: &[u8]) -> Scan {
        let mut i = 0;
        while i < input.len() {
            let byte = input[i];
            match self.escape {
                EscapeState::None => {
                    if !self.utf8.in_sequence() && !is_special(byte) {
                        let run = input[i..]
                            .iter()
                            .position(|&b| is_special(b))
                            .unwrap_or(input.len() - i);
                        self.buffer.extend_from_slice(&input[i..i + run]);
                        i += run;
                        continue;
                    }

                    if !self.utf8.feed(byte) {
                        return Scan::Failed {
                            at: i,
                            kind: ErrorKind::InvalidUtf8(byte),
                        };
                    }
                    match byte {
                        b'"' => return Scan::Complete(i + 1),
                        b'\\' => self.escape = EscapeState::Backslash,
                        0x00..=0x1F => {
                            return Scan::Failed {
                                at: i,
                                kind: ErrorKind::ControlCharacter(byte),
                            };
                        }
                        _ => self.buffer.push(byte),
                    }
                }

                EscapeState::Backslash => {
                    let decoded = match byte {
                        b'"' => b'"',
                        b'\\' => b'\\',
                        b'/' => b'/',
                        b'b' => 0x08,
                        b'f' => 0x0C,
                        b'n' => b'\n',
                        b'r' => b'\r',
                        b't' => b'\t',
                        b'u' => {
                            self.escape = EscapeState::Unicode {
                                digits: UnicodeEscapeBuffer::new(),
                                high: None,
                            };
                            i += 1;
                            continue;
                        }
                        _ => {
                            return Scan::Failed {
                                at: i,
                                kind: ErrorKind::InvalidEscape(byte),
                            };
                        }
                    };
                    self.buffer.push(decoded);
                    self.escape = EscapeState::None;
                }

                EscapeState::Unicode { mut digits, high } => {
                    let unit = match digits.feed(byte) {
                        Ok(Some(unit)) => unit,
                        Ok(None) => {
                            self.escape = EscapeState::Unicode { digits, high };
                            i += 1;
                            continue;
                        }
                        Err(kind) => return Scan::Failed { at: i, kind },
                    };

                    let unpaired = match (high, unit) {
                        (None, 0xD800..=0xDBFF) => {
                            self.escape = EscapeState::LowBackslash(unit);
                            i += 1;
                            continue;
                        }
                        (None, 0xDC00..=0xDFFF) => Some(unit),
                        (None, _) => (!self.push_units(&[unit])).then_some(unit),
                        (Some(high), 0xDC00..=0xDFFF) => {
                            (!self.push_units(&[high, unit])).then_some(high)
                        }
                        (Some(high), _) => Some(high),
                    };
                    if let Some(unit) = unpaired {
                        return Scan::Failed {
                            at: i,
                            kind: ErrorKind::UnpairedSurrogate(unit),
                        };
                    }
                    self.escape = EscapeState::None;
                }

                EscapeState::LowBackslash(high) => {
                    if byte != b'\\' {
                        return Scan::Failed {
                            at: i,
                            kind: ErrorKind::UnpairedSurrogate(high),
                        };
                    }
                    self.escape = EscapeState::LowU(high);
                }

                EscapeState::LowU(high) => {
                    if byte != b'u' {
                        return Scan::Failed {
                            at: i,
                            kind: ErrorKind::UnpairedSurrogate(high),
                        };
                    }
                    self.escape = EscapeState::Unicode {
                        digits: UnicodeEscapeBuffer::new(),
                        high: Some(high),
                    };
                }
            }
            i += 1;
        }
        Scan::Suspended
    }
}
