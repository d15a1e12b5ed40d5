#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsonsax::{Event, Tokenizer, TokenizerOptions};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 5; // 1 flag + 4-byte seed

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

static WS_TABLE: &[&[u8]] = &[b" ", b"\t", b"\n", b"\r"];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x07);
        data[1..5].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let mut prefix = HEADER;
        while prefix < size {
            prefix += append_whitespace(&mut data[prefix..], max_size - prefix);
            prefix += append_value(&mut data[prefix..], size, max_size - prefix);
            prefix += append_whitespace(&mut data[prefix..], max_size - prefix);
        }

        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Appends up to eight JSON whitespace bytes, never more than `limit`.
fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }
        let n = rng.random_range(1..=limit.min(8));
        for b in &mut buf[..n] {
            *b = WS_TABLE[rng.random_range(0..WS_TABLE.len())][0];
        }
        n
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..=size * 2).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec(&value.0).expect("Failed to serialize arbitrary value");

    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);

    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

/// A JSON value without numbers, which the tokenizer does not accept.
#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(20)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2..=9 => Value::String(u.arbitrary()?),
            10..=14 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            _ => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
        };
        Ok(ArbitraryValue(value))
    }
}

fn run(options: TokenizerOptions, chunks: &[&[u8]]) -> Vec<Event> {
    let mut tokenizer = Tokenizer::new(options);
    let mut events = Vec::new();
    for chunk in chunks {
        tokenizer.feed(chunk, &mut events);
    }
    tokenizer.finish(&mut events);
    events
}

fn tokenizer(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let split_seed = u32::from_le_bytes(data[1..5].try_into().unwrap()) as usize;
    let data = &data[HEADER..];

    let options = TokenizerOptions {
        allow_multiple_documents: flags & 1 != 0,
        max_depth: (flags & 2 != 0).then_some(16),
        panic_on_error: false,
    };

    let whole = run(options, &[data]);
    let chunks = split_into_chunks(data, split_seed);
    let split = run(options, &chunks);
    assert_eq!(whole, split, "events depend on chunking");

    let errors = whole.iter().filter(|e| e.as_error().is_some()).count();
    assert!(errors <= 1, "more than one error event");
    if errors == 1 {
        assert!(whole.last().and_then(Event::as_error).is_some(), "error is not terminal");
    }

    // A clean single document within serde_json's recursion limit must parse
    // there too.
    if flags & 3 == 2 && errors == 0 {
        assert!(serde_json::from_slice::<Value>(data).is_ok(), "accepted invalid JSON");
    }
}

fuzz_target!(|data: &[u8]| tokenizer(data));

/// Splits `data` into non-empty chunks whose sizes derive from `split_seed`.
/// Chunks may end inside a multi-byte character.
fn split_into_chunks(data: &[u8], split_seed: usize) -> Vec<&[u8]> {
    let mut chunks = Vec::new();
    let mut rest = data;
    let mut seed = split_seed;
    while !rest.is_empty() {
        let size = (seed % rest.len()) + 1;
        let (head, tail) = rest.split_at(size);
        chunks.push(head);
        rest = tail;
        seed = seed.rotate_left(7) ^ 0x9E37_79B9;
    }
    chunks
}
