use alloc::vec::Vec;

use crate::{Event, Tokenizer, TokenizerOptions};

/// Feeds `chunks` in order, then signals end of input.
pub(crate) fn feed_chunks<C: AsRef<[u8]>>(options: TokenizerOptions, chunks: &[C]) -> Vec<Event> {
    let mut tokenizer = Tokenizer::new(options);
    let mut events = Vec::new();
    for chunk in chunks {
        tokenizer.feed(chunk, &mut events);
    }
    tokenizer.finish(&mut events);
    events
}

/// Cuts `input` into consecutive non-empty pieces whose sizes are derived
/// from `splits`; whatever is left over forms the last piece.
pub(crate) fn split_by<'a>(input: &'a [u8], splits: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::new();
    let mut rest = input;
    for s in splits {
        if rest.is_empty() {
            break;
        }
        let size = 1 + (s % rest.len());
        let (head, tail) = rest.split_at(size);
        chunks.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}

/// The event sequences for the whole input, for one byte per chunk, and for
/// every two-way split.
pub(crate) fn all_chunkings(options: TokenizerOptions, input: &[u8]) -> Vec<Vec<Event>> {
    let mut runs = Vec::new();
    runs.push(feed_chunks(options, &[input]));
    runs.push(feed_chunks(options, &input.chunks(1).collect::<Vec<_>>()));
    for split in 1..input.len() {
        let (head, tail) = input.split_at(split);
        runs.push(feed_chunks(options, &[head, tail]));
    }
    runs
}

/// Number of quickcheck cases, as the other property suites scale them.
pub(crate) fn test_count() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

#[test]
fn split_by_covers_the_input() {
    let input = b"[\"foo\",\"bar\"]";
    let chunks = split_by(input, &[2, 0, 100]);
    assert_eq!(chunks.concat(), input);
    assert!(chunks.iter().all(|c| !c.is_empty()));
    assert_eq!(chunks[0], b"[\"f");
    assert_eq!(chunks[1], b"o");
}
