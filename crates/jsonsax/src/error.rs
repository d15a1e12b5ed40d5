use bstr::{BStr, ByteSlice};
use thiserror::Error;

/// A tokenization error, located at the byte offset where it was detected.
///
/// Errors are terminal: once a [`Tokenizer`](crate::Tokenizer) reports one, it
/// emits no further events.
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("{kind} at offset {offset}")]
pub struct TokenizeError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Global byte offset of the offending byte. For
    /// [`ErrorKind::UnterminatedToken`] this is the end of the input.
    pub offset: usize,
}

/// The reason a document was rejected.
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A byte that cannot start or continue a token in the current state.
    #[error("unexpected character {:?}", byte_repr(.0))]
    UnexpectedCharacter(u8),
    /// An unknown `\X` escape, or a non-hex digit inside `\uXXXX`.
    #[error("invalid escape character {:?}", byte_repr(.0))]
    InvalidEscape(u8),
    /// A UTF-16 surrogate escape without its other half.
    #[error("unpaired surrogate \\u{0:04X} in unicode escape")]
    UnpairedSurrogate(u16),
    /// An unescaped control character (below `0x20`) inside a string.
    #[error("unescaped control character {:?} in string", byte_repr(.0))]
    ControlCharacter(u8),
    /// String content that is not well-formed UTF-8.
    #[error("invalid UTF-8 byte {:?} in string", byte_repr(.0))]
    InvalidUtf8(u8),
    /// End of input while a token or container was still open.
    #[error("unexpected end of input")]
    UnterminatedToken,
    /// A closer that does not match the innermost open container.
    #[error("mismatched closer {:?}", byte_repr(.0))]
    MismatchedCloser(u8),
    /// A closer with no open container.
    #[error("unbalanced closer {:?}", byte_repr(.0))]
    UnbalancedCloser(u8),
    /// Non-whitespace after the document has been completed.
    #[error("trailing data {:?} after end of document", byte_repr(.0))]
    TrailingData(u8),
    /// Opening a container would exceed the configured depth limit.
    #[error("nesting depth limit of {0} exceeded")]
    DepthLimitExceeded(usize),
}

impl ErrorKind {
    /// Attaches the offset at which the error was detected.
    #[must_use]
    pub fn at(self, offset: usize) -> TokenizeError {
        TokenizeError { kind: self, offset }
    }
}

fn byte_repr(byte: &u8) -> &BStr {
    core::slice::from_ref(byte).as_bstr()
}
