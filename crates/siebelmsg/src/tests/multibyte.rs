//! Declared lengths against multi-byte characters.
//!
//! With `LengthUnit::Characters` a lead byte pulls in its whole sequence and
//! widens the declared budget by the extra bytes, so a character is never
//! split, whatever the declared boundary. These tests pin the exact byte
//! accounting.

use alloc::vec;

use bstr::BString;
use rstest::rstest;

use super::utils::{decode_split, decode_with, render};
use crate::{DecoderOptions, Fragment, LengthUnit, decode_slice};

fn line(bytes: &[u8]) -> Fragment {
    Fragment::Line(BString::from(bytes))
}

#[rstest]
#[case::two_bytes("äb", 2)]
#[case::three_bytes("€x", 2)]
#[case::four_bytes("🦀", 1)]
#[case::mixed("Grüße €5 🦀!", 11)]
#[case::only_multibyte("ÄÖÜ", 3)]
fn declared_length_counts_characters(#[case] value: &str, #[case] declared: usize) {
    let message = alloc::format!("@0*0*1*0*0*0*1*k{declared}*{value}");
    let fragments = decode_slice(message.as_bytes()).unwrap();
    assert_eq!(
        fragments,
        vec![
            Fragment::Blank,
            Fragment::Label("k".into()),
            Fragment::Line(value.into()),
        ]
    );
}

#[test]
fn parser_stays_in_sync_after_multibyte_values() {
    let fragments = decode_slice("@0*0*2*0*0*0*1*a2*€x1*b1*c".as_bytes()).unwrap();
    assert_eq!(render(&fragments), "\na: €x\nb: c\n");
}

#[test]
fn declared_boundary_inside_a_character_keeps_it_whole() {
    // `ä` is two bytes but one declared unit; the boundary after its first
    // byte does not split it.
    let fragments = decode_slice("@0*0*2*0*0*0*1*k1*ä1*z1*y".as_bytes()).unwrap();
    assert_eq!(fragments[2], Fragment::Line("ä".into()));
    assert_eq!(render(&fragments), "\nk: ä\nz: y\n");
}

#[test]
fn continuation_bytes_are_taken_unconditionally() {
    let fragments = decode_slice(b"@0*0*1*0*0*0*1*k1*\xC3*").unwrap();
    assert_eq!(fragments[2], line(b"\xC3*"));
}

#[test]
fn stray_continuation_byte_takes_the_next_byte() {
    // `\x80` pulls `z` in with it and widens the budget by one, so `w` is
    // still content and the following pair decodes in step.
    let fragments = decode_slice(b"@0*0*2*0*0*0*1*k2*\x80zw1*a1*b").unwrap();
    assert_eq!(
        fragments,
        vec![
            Fragment::Blank,
            Fragment::Label("k".into()),
            line(b"\x80zw"),
            Fragment::Label("a".into()),
            Fragment::Line("b".into()),
        ]
    );
}

#[test]
fn stream_ending_mid_character_flushes_what_arrived() {
    let fragments = decode_slice(b"@0*0*1*0*0*0*1*k1*\xE2\x82").unwrap();
    assert_eq!(fragments[2], line(b"\xE2\x82"));
}

#[test]
fn character_split_across_chunks() {
    let input = "@0*0*2*0*0*0*1*a2*🦀x1*b1*c".as_bytes();
    let whole = decode_slice(input).unwrap();
    let lead = input.iter().position(|&b| b == 0xF0).unwrap();
    for split in lead..lead + 4 {
        assert_eq!(decode_split(input, &[split]).unwrap(), whole);
    }
    assert_eq!(decode_split(input, &[lead + 1, lead + 2, lead + 3]).unwrap(), whole);
}

#[test]
fn byte_lengths_split_characters() {
    let options = DecoderOptions {
        length_unit: LengthUnit::Bytes,
    };
    // One declared byte takes only the lead byte; the continuation byte then
    // lands in the next length prefix.
    let fragments = decode_with("@0*0*1*0*0*0*1*k1*ä".as_bytes(), options).unwrap();
    assert_eq!(
        fragments,
        vec![Fragment::Blank, Fragment::Label("k".into()), line(b"\xC3")]
    );

    let fragments = decode_with("@0*0*1*0*0*0*1*k2*ä".as_bytes(), options).unwrap();
    assert_eq!(fragments[2], Fragment::Line("ä".into()));
}

#[test]
fn byte_lengths_treat_high_bytes_as_plain_content() {
    let options = DecoderOptions {
        length_unit: LengthUnit::Bytes,
    };
    let fragments = decode_with(b"@0*0*2*0*0*0*1*k2*\xC3*1*z1*y", options).unwrap();
    assert_eq!(render(&fragments), "\nk: \u{FFFD}*\nz: y\n");
}
