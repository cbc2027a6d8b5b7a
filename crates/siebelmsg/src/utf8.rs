/// Number of bytes in the encoded character that starts with `lead`.
///
/// Counts the leading 1-bits of the byte. ASCII is one byte wide; any other
/// byte with the top bit set takes at least one more, so a stray continuation
/// byte is two bytes wide.
#[inline]
pub(crate) fn sequence_width(lead: u8) -> usize {
    match lead.leading_ones() {
        0 => 1,
        1 => 2,
        n => n as usize,
    }
}
