use alloc::vec::Vec;

/// The kind of an open container.
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    /// `{ ... }`
    Object,
    /// `[ ... ]`
    Array,
}

impl Container {
    /// The byte that closes this container.
    #[must_use]
    pub fn closer(self) -> u8 {
        match self {
            Self::Object => b'}',
            Self::Array => b']',
        }
    }
}

/// One open container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Object or array.
    pub kind: Container,
    /// Byte offset of the opening `{` or `[`.
    pub start_offset: usize,
}

/// The open containers, innermost last.
#[derive(Debug, Clone, Default)]
pub(crate) struct NestingStack {
    frames: Vec<Frame>,
}

impl NestingStack {
    pub(crate) fn new() -> Self {
        Self {
            frames: Vec::with_capacity(16),
        }
    }

    pub(crate) fn push(&mut self, kind: Container, start_offset: usize) {
        self.frames.push(Frame { kind, start_offset });
    }

    /// Removes the innermost frame. Callers validate its kind first.
    pub(crate) fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    /// The innermost frame's kind, `None` when nothing is open.
    pub(crate) fn top_kind(&self) -> Option<Container> {
        self.frames.last().map(|frame| frame.kind)
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub(crate) fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub(crate) fn clear(&mut self) {
        self.frames.clear();
    }
}
