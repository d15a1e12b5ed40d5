//! The resumable tokenizer driver.
//!
//! [`Tokenizer`] walks each chunk byte by byte, deciding from its
//! [`Expectation`] what may start at the current position. Strings and
//! keywords are delegated to sub-parsers. When one of them runs out of input
//! it is parked in `pending`, and the next `feed` hands the new chunk to it
//! before the driver loop continues. No other state crosses a chunk boundary,
//! which is what makes the event stream independent of how the input was
//! split.
//!
//! # Examples
//!
//! ```rust
//! use jsonsax::{Event, Tokenizer, TokenizerOptions};
//!
//! let mut tokenizer = Tokenizer::new(TokenizerOptions::default());
//! let mut events = Vec::new();
//! for chunk in ["{\"a", "\":tr", "ue}"] {
//!     tokenizer.feed(chunk, &mut events);
//! }
//! assert_eq!(
//!     events,
//!     vec![
//!         Event::StartObject,
//!         Event::Key("a".to_string()),
//!         Event::True,
//!         Event::EndObject,
//!     ]
//! );
//! ```

use alloc::vec::Vec;

use crate::{
    error::{ErrorKind, TokenizeError},
    event::{Event, EventSink},
    event_pool::EventPool,
    literal_buffer::{ExpectedLiteralBuffer, Literal, Match},
    nesting::{Container, Frame, NestingStack},
    options::TokenizerOptions,
    scanner::{Scan, StringRole, StringScanner},
};

/// What kind of token may begin at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expectation {
    /// Any value.
    Value,
    /// Any value, or `]` directly after `[`.
    ValueOrEnd,
    /// A quoted key.
    Key,
    /// A quoted key, or `}` directly after `{`.
    KeyOrEnd,
    /// The `:` after a key.
    Colon,
    /// `,` or the closer of the innermost container.
    CommaOrEnd,
}

/// Where the tokenizer is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// A document is in progress, or none has started yet.
    Streaming,
    /// The top-level value has been closed.
    Complete,
    /// An error was emitted; further input is ignored.
    Failed,
}

/// A sub-parse suspended at the end of a chunk.
#[derive(Debug)]
enum Pending {
    Literal(ExpectedLiteralBuffer),
    String(StringScanner),
}

#[inline]
fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// The streaming JSON tokenizer.
///
/// Feed it chunks in document order with [`feed`](Self::feed); events are
/// pushed to the given sink synchronously. Call [`finish`](Self::finish) to
/// signal the end of input.
#[derive(Debug)]
pub struct Tokenizer {
    options: TokenizerOptions,

    /// Global byte offset, incremented once per consumed byte.
    pos: usize,
    expect: Expectation,
    status: Status,
    nesting: NestingStack,
    pending: Option<Pending>,
    pool: EventPool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(TokenizerOptions::default())
    }
}

impl Tokenizer {
    /// Creates a tokenizer for one stream.
    #[must_use]
    pub fn new(options: TokenizerOptions) -> Self {
        Self {
            options,
            pos: 0,
            expect: Expectation::Value,
            status: Status::Streaming,
            nesting: NestingStack::new(),
            pending: None,
            pool: EventPool::new(),
        }
    }

    /// Lifecycle state.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of open containers.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.nesting.depth()
    }

    /// What may start at the current position.
    #[must_use]
    pub fn expecting(&self) -> Expectation {
        self.expect
    }

    /// The open containers, outermost first.
    #[must_use]
    pub fn open_containers(&self) -> &[Frame] {
        self.nesting.frames()
    }

    /// Tokenizes the next chunk, pushing every completed token to `sink`.
    ///
    /// Empty chunks are no-ops, and so is any chunk after an error. A
    /// multi-byte character may be split between chunks.
    pub fn feed<S: EventSink + ?Sized>(&mut self, chunk: impl AsRef<[u8]>, sink: &mut S) {
        let chunk = chunk.as_ref();
        if chunk.is_empty() || self.status == Status::Failed {
            return;
        }

        let mut i = 0;
        if let Some(pending) = self.pending.take() {
            tracing::trace!(offset = self.pos, "resuming suspended token");
            i = match pending {
                Pending::Literal(matcher) => self.drive_literal(matcher, chunk, sink),
                Pending::String(scanner) => self.drive_string(scanner, chunk, sink),
            };
        }

        while i < chunk.len() && self.status != Status::Failed {
            i += self.step(&chunk[i..], sink);
        }
    }

    /// Signals that no more input will arrive.
    ///
    /// Emits [`ErrorKind::UnterminatedToken`] if a token or container is
    /// still open, or if the stream held no value at all. Returns the final
    /// status.
    pub fn finish<S: EventSink + ?Sized>(mut self, sink: &mut S) -> Status {
        if self.status == Status::Streaming {
            self.fail(ErrorKind::UnterminatedToken, sink);
        }
        self.status
    }

    /// Consumes at least one byte from the non-empty `input`, unless an
    /// error is raised.
    fn step<S: EventSink + ?Sized>(&mut self, input: &[u8], sink: &mut S) -> usize {
        let byte = input[0];
        if is_whitespace(byte) {
            self.pos += 1;
            return 1;
        }

        if self.status == Status::Complete {
            if !self.options.allow_multiple_documents {
                self.fail(ErrorKind::TrailingData(byte), sink);
                return 0;
            }
            self.start_document();
        }

        match self.expect {
            Expectation::Value | Expectation::ValueOrEnd => match byte {
                b'{' => self.open(Container::Object, sink),
                b'[' => self.open(Container::Array, sink),
                b'"' => self.start_string(StringRole::Value, input, sink),
                b']' if self.expect == Expectation::ValueOrEnd => {
                    self.close(Container::Array, sink)
                }
                b'}' if self.expect == Expectation::ValueOrEnd => {
                    self.close(Container::Object, sink)
                }
                b'}' | b']' => {
                    self.reject_closer(byte, sink);
                    0
                }
                _ => match Literal::from_first_byte(byte) {
                    Some(literal) => {
                        self.drive_literal(ExpectedLiteralBuffer::new(literal), input, sink)
                    }
                    None => {
                        self.fail(ErrorKind::UnexpectedCharacter(byte), sink);
                        0
                    }
                },
            },

            Expectation::Key | Expectation::KeyOrEnd => match byte {
                b'"' => self.start_string(StringRole::Key, input, sink),
                b'}' if self.expect == Expectation::KeyOrEnd => {
                    self.close(Container::Object, sink)
                }
                b']' if self.expect == Expectation::KeyOrEnd => {
                    self.close(Container::Array, sink)
                }
                b'}' | b']' => {
                    self.reject_closer(byte, sink);
                    0
                }
                _ => {
                    self.fail(ErrorKind::UnexpectedCharacter(byte), sink);
                    0
                }
            },

            Expectation::Colon => {
                if byte != b':' {
                    self.fail(ErrorKind::UnexpectedCharacter(byte), sink);
                    return 0;
                }
                self.pos += 1;
                self.expect = Expectation::Value;
                1
            }

            Expectation::CommaOrEnd => match byte {
                b'}' => self.close(Container::Object, sink),
                b']' => self.close(Container::Array, sink),
                b',' => {
                    self.expect = match self.nesting.top_kind() {
                        Some(Container::Object) => Expectation::Key,
                        Some(Container::Array) => Expectation::Value,
                        None => {
                            self.fail(ErrorKind::UnexpectedCharacter(byte), sink);
                            return 0;
                        }
                    };
                    self.pos += 1;
                    1
                }
                _ => {
                    self.fail(ErrorKind::UnexpectedCharacter(byte), sink);
                    0
                }
            },
        }
    }

    /// Fresh per-document state for the next concatenated document.
    fn start_document(&mut self) {
        tracing::trace!(offset = self.pos, "starting next document");
        self.nesting.clear();
        self.expect = Expectation::Value;
        self.status = Status::Streaming;
    }

    fn open<S: EventSink + ?Sized>(&mut self, kind: Container, sink: &mut S) -> usize {
        if let Some(limit) = self.options.max_depth {
            if self.nesting.depth() >= limit {
                self.fail(ErrorKind::DepthLimitExceeded(limit), sink);
                return 0;
            }
        }

        self.nesting.push(kind, self.pos);
        self.pos += 1;
        let (event, expect) = match kind {
            Container::Object => (Event::StartObject, Expectation::KeyOrEnd),
            Container::Array => (Event::StartArray, Expectation::ValueOrEnd),
        };
        self.expect = expect;
        self.emit(event, sink);
        1
    }

    fn close<S: EventSink + ?Sized>(&mut self, kind: Container, sink: &mut S) -> usize {
        let closer = kind.closer();
        match self.nesting.top_kind() {
            None => {
                self.fail(ErrorKind::UnbalancedCloser(closer), sink);
                return 0;
            }
            Some(top) if top != kind => {
                self.fail(ErrorKind::MismatchedCloser(closer), sink);
                return 0;
            }
            Some(_) => {}
        }

        self.nesting.pop();
        self.pos += 1;
        let event = match kind {
            Container::Object => Event::EndObject,
            Container::Array => Event::EndArray,
        };
        self.emit(event, sink);
        self.finish_value();
        1
    }

    /// A closer where a value or key is required, i.e. after `,` or `:`.
    ///
    /// One matching the innermost container is a dangling separator; any
    /// other is reported the same way [`close`](Self::close) would.
    fn reject_closer<S: EventSink + ?Sized>(&mut self, closer: u8, sink: &mut S) {
        let kind = match self.nesting.top_kind() {
            None => ErrorKind::UnbalancedCloser(closer),
            Some(top) if top.closer() == closer => ErrorKind::UnexpectedCharacter(closer),
            Some(_) => ErrorKind::MismatchedCloser(closer),
        };
        self.fail(kind, sink);
    }

    /// Runs after a literal, a string value or a closed container.
    fn finish_value(&mut self) {
        if self.nesting.is_empty() {
            tracing::debug!(offset = self.pos, "document complete");
            self.status = Status::Complete;
        } else {
            self.expect = Expectation::CommaOrEnd;
        }
    }

    fn drive_literal<S: EventSink + ?Sized>(
        &mut self,
        mut matcher: ExpectedLiteralBuffer,
        input: &[u8],
        sink: &mut S,
    ) -> usize {
        match matcher.step(input) {
            Match::Matched(consumed) => {
                self.pos += consumed;
                self.emit(matcher.literal().event(), sink);
                self.finish_value();
                consumed
            }
            Match::Mismatched(at) => {
                self.pos += at;
                self.fail(ErrorKind::UnexpectedCharacter(input[at]), sink);
                at
            }
            Match::Insufficient => {
                self.pos += input.len();
                tracing::trace!(offset = self.pos, literal = ?matcher.literal(), "suspending literal");
                self.pending = Some(Pending::Literal(matcher));
                input.len()
            }
        }
    }

    /// `input[0]` is the opening quote.
    fn start_string<S: EventSink + ?Sized>(
        &mut self,
        role: StringRole,
        input: &[u8],
        sink: &mut S,
    ) -> usize {
        self.pos += 1;
        let scanner = StringScanner::new(role, self.pool.acquire());
        1 + self.drive_string(scanner, &input[1..], sink)
    }

    fn drive_string<S: EventSink + ?Sized>(
        &mut self,
        mut scanner: StringScanner,
        input: &[u8],
        sink: &mut S,
    ) -> usize {
        match scanner.scan(input) {
            Scan::Complete(consumed) => {
                let role = scanner.role();
                let text = scanner.into_text();
                self.pos += consumed;
                match role {
                    StringRole::Key => {
                        self.emit(Event::Key(text), sink);
                        self.expect = Expectation::Colon;
                    }
                    StringRole::Value => {
                        self.emit(Event::String(text), sink);
                        self.finish_value();
                    }
                }
                consumed
            }
            Scan::Failed { at, kind } => {
                self.pool.recycle(scanner.into_buffer());
                self.pos += at;
                self.fail(kind, sink);
                at
            }
            Scan::Suspended => {
                self.pos += input.len();
                tracing::trace!(offset = self.pos, "suspending string");
                self.pending = Some(Pending::String(scanner));
                input.len()
            }
        }
    }

    fn emit<S: EventSink + ?Sized>(&mut self, event: Event, sink: &mut S) {
        sink.enqueue(&event);
        self.pool.release(event);
    }

    /// Emits the terminal error event at the current position.
    fn fail<S: EventSink + ?Sized>(&mut self, kind: ErrorKind, sink: &mut S) {
        let err: TokenizeError = kind.at(self.pos);
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(!self.options.panic_on_error, "Tokenize error: {err}");
        tracing::debug!(offset = err.offset, depth = self.nesting.depth(), error = %err, "tokenize error");

        self.status = Status::Failed;
        self.pending = None;
        self.emit(Event::Error(err), sink);
    }
}

/// Tokenizes a complete document held in memory.
///
/// ```
/// use jsonsax::{Event, tokenize};
///
/// assert_eq!(
///     tokenize(r#"["x","y"]"#),
///     vec![
///         Event::StartArray,
///         Event::String("x".to_string()),
///         Event::String("y".to_string()),
///         Event::EndArray,
///     ]
/// );
/// ```
#[must_use]
pub fn tokenize(input: impl AsRef<[u8]>) -> Vec<Event> {
    let mut events = Vec::new();
    let mut tokenizer = Tokenizer::default();
    tokenizer.feed(input, &mut events);
    tokenizer.finish(&mut events);
    events
}
