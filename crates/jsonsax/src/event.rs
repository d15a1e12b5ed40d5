//! Events produced by the tokenizer and the sink that receives them.
//!
//! Structural markers and literals are fieldless variants of [`Event`], so
//! emitting them never allocates. Only [`Event::String`] and [`Event::Key`]
//! carry text, and the tokenizer recycles that text buffer once the sink has
//! returned.
//!
//! # Examples
//!
//! ```
//! use jsonsax::{Event, Tokenizer, TokenizerOptions};
//!
//! let mut tokenizer = Tokenizer::new(TokenizerOptions::default());
//! let mut events = Vec::new();
//! tokenizer.feed("[\"x\", nu", &mut events);
//! tokenizer.feed("ll]", &mut events);
//! assert_eq!(
//!     events,
//!     vec![
//!         Event::StartArray,
//!         Event::String("x".to_string()),
//!         Event::Null,
//!         Event::EndArray,
//!     ]
//! );
//! ```
use alloc::{string::String, vec::Vec};

use crate::error::TokenizeError;

/// One tokenization result.
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `{`
    StartObject,
    /// `}`
    EndObject,
    /// `[`
    StartArray,
    /// `]`
    EndArray,
    /// The literal `true`.
    True,
    /// The literal `false`.
    False,
    /// The literal `null`.
    Null,
    /// A string in value position, with escapes decoded.
    String(String),
    /// A string in key position, with escapes decoded.
    Key(String),
    /// The document was rejected. Always the last event of a stream.
    Error(TokenizeError),
}

impl Event {
    /// Returns the decoded text of a `String` or `Key` event.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::String(text) | Self::Key(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the error carried by an `Error` event.
    #[must_use]
    pub fn as_error(&self) -> Option<&TokenizeError> {
        if let Self::Error(err) = self {
            Some(err)
        } else {
            None
        }
    }

    /// Returns `true` for `StartObject` and `StartArray`.
    #[must_use]
    pub fn is_start(&self) -> bool {
        matches!(self, Self::StartObject | Self::StartArray)
    }

    /// Returns `true` for `EndObject` and `EndArray`.
    #[must_use]
    pub fn is_end(&self) -> bool {
        matches!(self, Self::EndObject | Self::EndArray)
    }
}

/// Receiver of tokenizer events.
///
/// The sink borrows each event for the duration of one call. Text events
/// are recycled afterwards, so a sink that needs the text later must copy it
/// out, as the `Vec<Event>` implementation does.
pub trait EventSink {
    /// Accepts the next event in document order.
    fn enqueue(&mut self, event: &Event);
}

impl EventSink for Vec<Event> {
    fn enqueue(&mut self, event: &Event) {
        self.push(event.clone());
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn enqueue(&mut self, event: &Event) {
        (**self).enqueue(event);
    }
}

/// An [`EventSink`] backed by a closure. Created with [`from_fn`].
#[derive(Debug, Clone)]
pub struct FromFn<F>(F);

/// Wraps a closure as an [`EventSink`].
///
/// ```
/// use jsonsax::{Event, Tokenizer, from_fn};
///
/// let mut depth = 0usize;
/// let mut max_depth = 0usize;
/// let mut tokenizer = Tokenizer::default();
/// tokenizer.feed(
///     "[[[]],[]]",
///     &mut from_fn(|event: &Event| {
///         if event.is_start() {
///             depth += 1;
///             max_depth = max_depth.max(depth);
///         } else if event.is_end() {
///             depth -= 1;
///         }
///     }),
/// );
/// assert_eq!(max_depth, 3);
/// ```
pub fn from_fn<F: FnMut(&Event)>(f: F) -> FromFn<F> {
    FromFn(f)
}

impl<F: FnMut(&Event)> EventSink for FromFn<F> {
    fn enqueue(&mut self, event: &Event) {
        (self.0)(event);
    }
}
