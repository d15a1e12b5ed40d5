use alloc::{string::String, vec::Vec};

use crate::event::Event;

/// Upper bound on retained buffers.
pub(crate) const MAX_FREE_BUFFERS: usize = 8;

/// Buffers grown beyond this many bytes are dropped instead of retained.
pub(crate) const MAX_RETAINED_CAPACITY: usize = 4 * 1024;

/// Per-tokenizer free list of text buffers.
///
/// A string scan takes its accumulator from here, the accumulator becomes the
/// event's `String` without copying, and after the sink has returned the
/// buffer is cleared and handed back. Content-free events never touch the
/// pool.
#[derive(Debug, Default)]
pub(crate) struct EventPool {
    free: Vec<Vec<u8>>,
}

impl EventPool {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A cleared buffer, reused if one is available.
    pub(crate) fn acquire(&mut self) -> Vec<u8> {
        self.free.pop().unwrap_or_default()
    }

    /// Returns a buffer that never became an event.
    pub(crate) fn recycle(&mut self, mut buffer: Vec<u8>) {
        if self.free.len() < MAX_FREE_BUFFERS && buffer.capacity() <= MAX_RETAINED_CAPACITY {
            buffer.clear();
            self.free.push(buffer);
        }
    }

    /// Takes back an event once the sink is done with it.
    pub(crate) fn release(&mut self, event: Event) {
        if let Event::String(text) | Event::Key(text) = event {
            self.recycle(String::into_bytes(text));
        }
    }

    #[cfg(test)]
    pub(crate) fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Total capacity held by the free list.
    #[cfg(test)]
    pub(crate) fn retained_capacity(&self) -> usize {
        self.free.iter().map(Vec::capacity).sum()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec::Vec};

    use super::{EventPool, MAX_FREE_BUFFERS, MAX_RETAINED_CAPACITY};
    use crate::event::Event;

    #[test]
    fn starts_empty_and_grows_on_release() {
        let mut pool = EventPool::new();
        assert_eq!(pool.free_len(), 0);
        assert!(pool.acquire().is_empty());

        pool.release(Event::Key("abc".to_string()));
        assert_eq!(pool.free_len(), 1);

        let reused = pool.acquire();
        assert!(reused.is_empty());
        assert!(reused.capacity() >= 3);
        assert_eq!(pool.free_len(), 0);
    }

    #[test]
    fn content_free_events_are_not_pooled() {
        let mut pool = EventPool::new();
        pool.release(Event::StartObject);
        pool.release(Event::Null);
        assert_eq!(pool.free_len(), 0);
    }

    #[test]
    fn free_list_is_bounded() {
        let mut pool = EventPool::new();
        for _ in 0..MAX_FREE_BUFFERS * 2 {
            pool.recycle(Vec::with_capacity(4));
        }
        assert_eq!(pool.free_len(), MAX_FREE_BUFFERS);
    }

    #[test]
    fn oversized_buffers_are_dropped() {
        let mut pool = EventPool::new();
        pool.recycle(Vec::with_capacity(MAX_RETAINED_CAPACITY + 1));
        assert_eq!(pool.free_len(), 0);

        pool.recycle(Vec::with_capacity(MAX_RETAINED_CAPACITY));
        assert_eq!(pool.free_len(), 1);
    }
}
