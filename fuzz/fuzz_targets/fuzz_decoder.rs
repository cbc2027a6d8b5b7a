#![no_main]
use std::cell::RefCell;
use std::fmt::Write;

use arbitrary::Arbitrary;
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use siebelmsg::{Decoder, DecoderOptions, LengthUnit, decode_slice};

const HEADER: usize = 5; // 1 flag + 4-byte seed

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// A well-formed message: the root group and its children, each a list of
/// name/value pairs.
#[derive(Debug, Arbitrary)]
struct ArbitraryMessage {
    root: Vec<(String, String)>,
    children: Vec<(String, Vec<(String, String)>)>,
}

impl ArbitraryMessage {
    fn encode(&self) -> String {
        let mut out = String::new();
        let _ = write!(out, "@0*0*{}*{}*0*0*", self.root.len(), self.children.len());
        encode_pairs(&mut out, &self.root);
        for (name, pairs) in &self.children {
            // Group names end at the next delimiter.
            let name = name.replace('*', "");
            let _ = write!(out, "{}*{name}*", pairs.len().saturating_sub(1));
            encode_pairs(&mut out, pairs);
        }
        out
    }
}

fn encode_pairs(out: &mut String, pairs: &[(String, String)]) {
    for (name, value) in pairs {
        let _ = write!(out, "{}*{name}", name.chars().count());
        let _ = write!(out, "{}*{value}", value.chars().count());
    }
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x1);
        data[1..5].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let limit = max_size - HEADER;
        let message = loop {
            let s = with_rng(|rng| rng.random_range(size / 2..size * 2 + 1).min(limit));
            let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
            if let Ok(message) = ArbitraryMessage::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
                break message.encode();
            }
        };

        let len = message.len().min(limit);
        data[HEADER..HEADER + len].copy_from_slice(&message.as_bytes()[..len]);
        HEADER + len
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

fn decoder(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let split_seed = u32::from_le_bytes(data[1..5].try_into().unwrap()) as u64;
    let data = &data[HEADER..];

    let options = DecoderOptions {
        length_unit: if flags & 1 != 0 {
            LengthUnit::Bytes
        } else {
            LengthUnit::Characters
        },
    };

    let mut whole = Decoder::new(options);
    let expected = whole.feed(data).and_then(|mut out| {
        out.extend(whole.finish()?);
        Ok(out)
    });

    let mut chunked = Decoder::new(options);
    let mut actual = Vec::new();
    let mut result = Ok(());
    for chunk in split_into_chunks(data, split_seed) {
        result = chunked.feed_into(chunk, &mut actual);
        if result.is_err() {
            break;
        }
    }
    let actual = result
        .and_then(|()| chunked.finish())
        .map(|last| {
            actual.extend(last);
            actual
        });

    assert_eq!(expected, actual);
    if options.length_unit == LengthUnit::Characters {
        assert_eq!(expected, decode_slice(data));
    }
}

fuzz_target!(|data: &[u8]| decoder(data));

/// Split `data` into non-empty chunks whose sizes are drawn from a generator
/// seeded with `split_seed`.
fn split_into_chunks(data: &[u8], split_seed: u64) -> Vec<&[u8]> {
    let mut rng = SmallRng::seed_from_u64(split_seed);
    let mut chunks = Vec::new();
    let mut rest = data;
    while !rest.is_empty() {
        let size = rng.random_range(1..=rest.len().min(64));
        let (chunk, tail) = rest.split_at(size);
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}
