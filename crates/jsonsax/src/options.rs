/// Configuration options for the [`Tokenizer`](crate::Tokenizer).
///
/// # Examples
///
/// ```rust
/// use jsonsax::{Tokenizer, TokenizerOptions};
///
/// let tokenizer = Tokenizer::new(TokenizerOptions {
///     allow_multiple_documents: true,
///     max_depth: Some(64),
///     ..Default::default()
/// });
/// ```
///
/// # Default
///
/// A single document per stream, with no depth limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenizerOptions {
    /// Whether to tokenize several concatenated JSON documents from one
    /// stream.
    ///
    /// When `false`, any non-whitespace byte after the first document is a
    /// [`TrailingData`](crate::ErrorKind::TrailingData) error. When `true`,
    /// such a byte starts a new document with a fresh nesting stack. This
    /// supports JSON Lines and plain concatenation.
    ///
    /// ```json
    /// {"a":true}
    /// {"b":null}
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub allow_multiple_documents: bool,

    /// Maximum number of simultaneously open containers.
    ///
    /// Opening a container beyond this limit raises
    /// [`DepthLimitExceeded`](crate::ErrorKind::DepthLimitExceeded).
    ///
    /// # Default
    ///
    /// `None` (bounded only by memory)
    pub max_depth: Option<usize>,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on tokenization errors instead of emitting them.
    ///
    /// Enabled only in test and fuzzing builds to produce backtraces.
    pub panic_on_error: bool,
}
