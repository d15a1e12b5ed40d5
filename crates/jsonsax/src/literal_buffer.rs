use crate::event::Event;

/// One of the three JSON keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Literal {
    True,
    False,
    Null,
}

impl Literal {
    /// The keyword whose first byte is `first`, if any.
    pub(crate) fn from_first_byte(first: u8) -> Option<Self> {
        match first {
            b't' => Some(Self::True),
            b'f' => Some(Self::False),
            b'n' => Some(Self::Null),
            _ => None,
        }
    }

    fn text(self) -> &'static [u8] {
        match self {
            Self::True => b"true",
            Self::False => b"false",
            Self::Null => b"null",
        }
    }

    pub(crate) fn event(self) -> Event {
        match self {
            Self::True => Event::True,
            Self::False => Event::False,
            Self::Null => Event::Null,
        }
    }
}

/// Outcome of matching a keyword against one chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Match {
    /// The keyword is complete; this many bytes of the chunk belong to it.
    Matched(usize),
    /// The byte at this index of the chunk disproves the keyword.
    Mismatched(usize),
    /// The whole chunk is a prefix of the rest of the keyword.
    Insufficient,
}

/// Matches a keyword that may be split over several chunks.
///
/// The only state carried between chunks is how many bytes of the keyword
/// have already been confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ExpectedLiteralBuffer {
    literal: Literal,
    matched: usize,
}

impl ExpectedLiteralBuffer {
    pub(crate) fn new(literal: Literal) -> Self {
        Self {
            literal,
            matched: 0,
        }
    }

    pub(crate) fn literal(&self) -> Literal {
        self.literal
    }

    /// Checks `input` against the unmatched suffix of the keyword.
    ///
    /// On [`Match::Insufficient`] the confirmed prefix grows by
    /// `input.len()`, and the next chunk continues where this one stopped.
    pub(crate) fn step(&mut self, input: &[u8]) -> Match {
        let rest = &self.literal.text()[self.matched..];
        let common = rest.len().min(input.len());

        if let Some(at) = rest[..common]
            .iter()
            .zip(&input[..common])
            .position(|(want, got)| want != got)
        {
            return Match::Mismatched(at);
        }

        if input.len() >= rest.len() {
            self.matched += rest.len();
            Match::Matched(rest.len())
        } else {
            self.matched += input.len();
            Match::Insufficient
        }
    }
}
