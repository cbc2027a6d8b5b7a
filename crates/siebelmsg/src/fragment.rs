use core::fmt;

use bstr::{BStr, BString, ByteSlice};

/// One unit of decoded output, produced each time a field completes.
///
/// Whether a field is rendered as a label or as a line depends on the parity
/// counter at the moment it completes: odd slots are labels, even slots end a
/// line. Concatenating the rendered fragments of a message gives one
/// `NAME: value` line per property pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "text", rename_all = "snake_case"))]
pub enum Fragment {
    /// A field that completed at an odd slot. Renders as `text: `.
    Label(BString),
    /// A field that completed at an even slot. Renders as `text\n`.
    Line(BString),
    /// A delimiter reached with an empty field. Renders as `\n`.
    Blank,
}

impl Fragment {
    /// The field content, if any.
    #[must_use]
    pub fn text(&self) -> Option<&BStr> {
        match self {
            Self::Label(text) | Self::Line(text) => Some(text.as_bstr()),
            Self::Blank => None,
        }
    }

    /// Whether rendering this fragment ends an output line.
    #[must_use]
    pub fn ends_line(&self) -> bool {
        !matches!(self, Self::Label(_))
    }

    /// Writes the exact rendered bytes to `writer`.
    ///
    /// # Errors
    ///
    /// Propagates any error from `writer`.
    #[cfg(feature = "std")]
    pub fn write_to<W: std::io::Write + ?Sized>(&self, writer: &mut W) -> std::io::Result<()> {
        match self {
            Self::Label(text) => {
                writer.write_all(text)?;
                writer.write_all(b": ")
            }
            Self::Line(text) => {
                writer.write_all(text)?;
                writer.write_all(b"\n")
            }
            Self::Blank => writer.write_all(b"\n"),
        }
    }
}

/// Renders lossily; invalid UTF-8 shows up as replacement characters.
impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(text) => write!(f, "{text}: "),
            Self::Line(text) => writeln!(f, "{text}"),
            Self::Blank => f.write_str("\n"),
        }
    }
}
