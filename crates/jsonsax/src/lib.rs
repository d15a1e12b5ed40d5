//! An incremental, event-based JSON tokenizer.
//!
//! JSON text is fed in arbitrarily split chunks and turned into a flat stream
//! of [`Event`]s without building a tree. Tokens that straddle a chunk
//! boundary are suspended and resumed, so the event stream is identical no
//! matter how the input was split, down to one byte per chunk. Memory use is
//! bounded by the open string and the nesting depth, not the document size.
//!
//! ```rust
//! use jsonsax::{Event, Tokenizer, TokenizerOptions};
//!
//! let mut tokenizer = Tokenizer::new(TokenizerOptions::default());
//! let mut events = Vec::new();
//! tokenizer.feed(r#"{"k":"val"#, &mut events);
//! tokenizer.feed(r#"ue"}"#, &mut events);
//! tokenizer.finish(&mut events);
//! assert_eq!(
//!     events,
//!     vec![
//!         Event::StartObject,
//!         Event::Key("k".to_string()),
//!         Event::String("value".to_string()),
//!         Event::EndObject,
//!     ]
//! );
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod escape_buffer;
mod event;
mod event_pool;
mod literal_buffer;
mod nesting;
mod options;
mod scanner;
mod tokenizer;
mod utf8;

#[cfg(test)]
mod tests;

pub use error::{ErrorKind, TokenizeError};
pub use event::{Event, EventSink, FromFn, from_fn};
pub use nesting::{Container, Frame};
pub use options::TokenizerOptions;
pub use tokenizer::{Expectation, Status, Tokenizer, tokenize};
