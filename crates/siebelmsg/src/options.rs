/// Configuration options for [`Decoder`](crate::Decoder).
///
/// # Examples
///
/// ```rust
/// use siebelmsg::{Decoder, DecoderOptions, LengthUnit};
///
/// let decoder = Decoder::new(DecoderOptions {
///     length_unit: LengthUnit::Bytes,
/// });
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderOptions {
    /// What a field's declared length counts.
    ///
    /// # Default
    ///
    /// [`LengthUnit::Characters`]
    pub length_unit: LengthUnit,
}

/// Unit of the decimal length that precedes every field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LengthUnit {
    /// Lengths count encoded characters. A byte with its top bit set starts a
    /// multi-byte character whose width is the number of its leading 1-bits;
    /// the whole sequence is consumed as one unit of the declared length.
    #[default]
    Characters,
    /// Lengths count raw bytes. No multi-byte accounting is done, so a
    /// declared length may end inside a character.
    Bytes,
}
