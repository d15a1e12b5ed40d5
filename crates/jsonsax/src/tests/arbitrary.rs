//! Random documents for the property suites.
//!
//! Numbers are not tokenized, so generated documents only hold literals,
//! strings and containers.

use alloc::{
    boxed::Box,
    string::{String, ToString},
    vec,
    vec::Vec,
};
use core::fmt::Write;

use quickcheck::{Arbitrary, Gen};

use crate::Event;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Doc {
    Null,
    Bool(bool),
    Str(String),
    Array(Vec<Doc>),
    Object(Vec<(String, Doc)>),
}

/// How a document is written out.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Style {
    /// Escape every non-ASCII character as `\uXXXX`, pairs included.
    pub(crate) ascii_only: bool,
    /// Pad tokens with whitespace.
    pub(crate) padded: bool,
}

impl Arbitrary for Style {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            ascii_only: bool::arbitrary(g),
            padded: bool::arbitrary(g),
        }
    }
}

const MAX_DEPTH: usize = 4;

fn arbitrary_doc(g: &mut Gen, depth: usize) -> Doc {
    let kinds = if depth == 0 { 3 } else { 5 };
    match u8::arbitrary(g) % kinds {
        0 => Doc::Null,
        1 => Doc::Bool(bool::arbitrary(g)),
        2 => Doc::Str(String::arbitrary(g)),
        3 => {
            let len = usize::arbitrary(g) % 5;
            Doc::Array((0..len).map(|_| arbitrary_doc(g, depth - 1)).collect())
        }
        _ => {
            let len = usize::arbitrary(g) % 5;
            Doc::Object(
                (0..len)
                    .map(|_| (String::arbitrary(g), arbitrary_doc(g, depth - 1)))
                    .collect(),
            )
        }
    }
}

impl Arbitrary for Doc {
    fn arbitrary(g: &mut Gen) -> Self {
        arbitrary_doc(g, MAX_DEPTH)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Doc::Array(items) => Box::new(items.clone().into_iter()),
            Doc::Object(members) => Box::new(
                members
                    .clone()
                    .into_iter()
                    .map(|(_, value)| value)
                    .collect::<Vec<_>>()
                    .into_iter(),
            ),
            Doc::Str(s) => Box::new(s.shrink().map(Doc::Str)),
            _ => quickcheck::empty_shrinker(),
        }
    }
}

fn write_string(s: &str, style: Style, out: &mut String) {
    if !style.ascii_only {
        out.push_str(&serde_json::to_string(s).unwrap());
        return;
    }
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            ' '..='~' => out.push(ch),
            _ => {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    write!(out, "\\u{unit:04x}").unwrap();
                }
            }
        }
    }
    out.push('"');
}

impl Doc {
    pub(crate) fn render(&self, style: Style) -> String {
        let mut out = String::new();
        self.write(style, &mut out);
        out
    }

    fn write(&self, style: Style, out: &mut String) {
        let pad = |out: &mut String| {
            if style.padded {
                out.push_str(" \n\t ");
            }
        };
        pad(out);
        match self {
            Doc::Null => out.push_str("null"),
            Doc::Bool(b) => out.push_str(&b.to_string()),
            Doc::Str(s) => write_string(s, style, out),
            Doc::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.write(style, out);
                }
                pad(out);
                out.push(']');
            }
            Doc::Object(members) => {
                out.push('{');
                for (i, (key, value)) in members.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    pad(out);
                    write_string(key, style, out);
                    pad(out);
                    out.push(':');
                    value.write(style, out);
                }
                pad(out);
                out.push('}');
            }
        }
        pad(out);
    }

    /// The events a conforming tokenizer must produce for this document.
    pub(crate) fn events(&self) -> Vec<Event> {
        let mut events = Vec::new();
        self.push_events(&mut events);
        events
    }

    fn push_events(&self, events: &mut Vec<Event>) {
        match self {
            Doc::Null => events.push(Event::Null),
            Doc::Bool(true) => events.push(Event::True),
            Doc::Bool(false) => events.push(Event::False),
            Doc::Str(s) => events.push(Event::String(s.clone())),
            Doc::Array(items) => {
                events.push(Event::StartArray);
                for item in items {
                    item.push_events(events);
                }
                events.push(Event::EndArray);
            }
            Doc::Object(members) => {
                events.push(Event::StartObject);
                for (key, value) in members {
                    events.push(Event::Key(key.clone()));
                    value.push_events(events);
                }
                events.push(Event::EndObject);
            }
        }
    }
}

#[test]
fn render_and_events_agree_on_a_sample() {
    let doc = Doc::Object(vec![
        ("a".to_string(), Doc::Array(vec![Doc::Null, Doc::Bool(true)])),
        ("\u{e9}".to_string(), Doc::Str("\u{1F600}\n".to_string())),
    ]);
    assert_eq!(
        doc.render(Style::default()),
        "{\"a\":[null,true],\"\u{e9}\":\"\u{1F600}\\n\"}"
    );
    assert_eq!(
        doc.render(Style {
            ascii_only: true,
            padded: false
        }),
        "{\"a\":[null,true],\"\\u00e9\":\"\\ud83d\\ude00\\u000a\"}"
    );
    assert_eq!(crate::tokenize(doc.render(Style::default())), doc.events());
}
