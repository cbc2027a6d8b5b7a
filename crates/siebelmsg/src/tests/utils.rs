use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use crate::{DecodeError, Decoder, DecoderOptions, Fragment};

/// Concatenates the lossy rendering of `fragments`.
pub fn render(fragments: &[Fragment]) -> String {
    fragments.iter().map(ToString::to_string).collect()
}

/// Decodes `input` in one chunk with `options`.
pub fn decode_with(input: &[u8], options: DecoderOptions) -> Result<Vec<Fragment>, DecodeError> {
    let mut decoder = Decoder::new(options);
    let mut out = decoder.feed(input)?;
    out.extend(decoder.finish()?);
    Ok(out)
}

/// Decodes `input` split at the given byte offsets (out-of-range and
/// unordered offsets are ignored).
pub fn decode_split(input: &[u8], splits: &[usize]) -> Result<Vec<Fragment>, DecodeError> {
    let mut decoder = Decoder::default();
    let mut out = Vec::new();
    let mut start = 0;
    for &split in splits {
        if split <= start || split >= input.len() {
            continue;
        }
        decoder.feed_into(&input[start..split], &mut out)?;
        start = split;
    }
    decoder.feed_into(&input[start..], &mut out)?;
    out.extend(decoder.finish()?);
    Ok(out)
}

/// Builds a single-group message from name/value pairs, declaring each
/// field's length in characters.
pub fn encode_pairs(pairs: &[(String, String)]) -> String {
    let mut message = format!("@0*0*{}*0*0*0*", pairs.len());
    for (name, value) in pairs {
        for field in [name, value] {
            message.push_str(&format!("{}*{field}", field.chars().count()));
        }
    }
    message
}
