use alloc::vec::Vec;

use bstr::BString;

/// Number of `*`-terminated tokens between the `@` marker and the first
/// field.
pub const HEADER_TOKENS: usize = 6;

/// Position (1-based) of the token holding the property-pair count.
const PROPERTY_COUNT_TOKEN: usize = 3;
/// Position (1-based) of the token holding the child group count.
const CHILD_COUNT_TOKEN: usize = 4;

/// The header of a message: the tokens between the `@` marker and the first
/// field.
///
/// Only the third and fourth tokens drive decoding. The others are kept
/// verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Header {
    tokens: Vec<BString>,
}

impl Header {
    pub(crate) fn push_token(&mut self, token: BString) {
        self.tokens.push(token);
    }

    /// The raw header tokens in stream order.
    #[must_use]
    pub fn tokens(&self) -> &[BString] {
        &self.tokens
    }

    /// Whether all [`HEADER_TOKENS`] tokens have been read.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.tokens.len() >= HEADER_TOKENS
    }

    /// Number of property pairs in the first group, as declared.
    #[must_use]
    pub fn property_count(&self) -> i64 {
        self.numeric(PROPERTY_COUNT_TOKEN)
    }

    /// Number of child groups following the first group, as declared.
    #[must_use]
    pub fn child_count(&self) -> i64 {
        self.numeric(CHILD_COUNT_TOKEN)
    }

    /// Initial value of the name/value parity counter: two slots per
    /// property pair.
    #[must_use]
    pub fn field_slots(&self) -> usize {
        clamp(self.property_count().saturating_mul(2))
    }

    /// Number of groups to decode: the first group plus its children.
    #[must_use]
    pub fn group_count(&self) -> usize {
        clamp(self.child_count().saturating_add(1))
    }

    fn numeric(&self, position: usize) -> i64 {
        self.tokens
            .get(position - 1)
            .map_or(0, |token| parse_decimal(token))
    }
}

/// Parses a decimal token the way C's `atoi` does.
///
/// Leading whitespace is skipped, an optional sign is honored, and digits are
/// read up to the first non-digit. A token without digits is `0`. Values
/// saturate instead of overflowing.
#[must_use]
pub fn parse_decimal(token: &[u8]) -> i64 {
    let mut rest = token;
    while let [b' ' | b'\t' | b'\n' | b'\r' | b'\x0B' | b'\x0C', tail @ ..] = rest {
        rest = tail;
    }

    let negative = match rest {
        [b'-', tail @ ..] => {
            rest = tail;
            true
        }
        [b'+', tail @ ..] => {
            rest = tail;
            false
        }
        _ => false,
    };

    let magnitude = rest
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });

    if negative { -magnitude } else { magnitude }
}

/// Clamps a parsed count or length to `usize`, mapping negatives to zero.
pub(crate) fn clamp(value: i64) -> usize {
    usize::try_from(value).unwrap_or(if value < 0 { 0 } else { usize::MAX })
}
