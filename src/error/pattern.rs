use crate::{error, field::Field, style::TextStyle, util::escape};

/// Errors that occur while building a formatter, either from a pattern
/// string or from the builder API.
#[derive(Clone, Debug)]
pub(crate) enum Error {
    FieldNotFixed { field: Field },
    IncompleteLiteral,
    InvalidCount { letter: char, count: usize, expected: &'static str },
    InvalidOffsetPattern { pattern: Box<str> },
    LocalizedOffsetStyle { style: TextStyle },
    MissingLocalizedStyle,
    PadDangling,
    PadWidth { width: usize },
    PadWithoutPattern,
    ReducedOverflow { base: i64, width: usize },
    Reserved { ch: char },
    TooManyLetters { letter: char, count: usize },
    UnknownLetter { letter: char },
    UnmatchedOptionalEnd,
    Width { what: &'static str, given: usize, min: usize, max: usize },
    WidthOrder { min: usize, max: usize },
}

impl error::IntoError for Error {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Pattern(err).into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            FieldNotFixed { field } => write!(
                f,
                "field `{field}` must have a fixed set of values \
                 to be printed as a fraction",
            ),
            IncompleteLiteral => f.write_str(
                "pattern ends with an incomplete quoted literal",
            ),
            InvalidCount { letter, count, expected } => write!(
                f,
                "pattern letter `{letter}` repeated {count} times is \
                 invalid, expected {expected}",
                letter = escape::Char(letter),
            ),
            InvalidOffsetPattern { ref pattern } => write!(
                f,
                "invalid offset pattern `{pattern}`",
                pattern = escape::Str(pattern),
            ),
            LocalizedOffsetStyle { style } => write!(
                f,
                "localized offset style must be full or short, \
                 but got {style:?}",
            ),
            MissingLocalizedStyle => f.write_str(
                "localized pattern requires a date style, \
                 a time style or both",
            ),
            PadDangling => f.write_str(
                "pad width set with `pad_next` \
                 was not followed by anything to pad",
            ),
            PadWidth { width } => {
                write!(f, "pad width must be at least 1, but got {width}")
            }
            PadWithoutPattern => f.write_str(
                "pad letter `p` must be followed by a pattern letter",
            ),
            ReducedOverflow { base, width } => write!(
                f,
                "reduced value base {base} with width {width} \
                 overflows the range of a 32-bit integer",
            ),
            Reserved { ch } => write!(
                f,
                "pattern includes reserved character `{ch}`",
                ch = escape::Char(ch),
            ),
            TooManyLetters { letter, count } => write!(
                f,
                "too many pattern letters: `{letter}` repeated {count} times",
                letter = escape::Char(letter),
            ),
            UnknownLetter { letter } => write!(
                f,
                "unknown pattern letter `{letter}`",
                letter = escape::Char(letter),
            ),
            UnmatchedOptionalEnd => f.write_str(
                "found end of optional section `]` \
                 without a previous start `[`",
            ),
            Width { what, given, min, max } => write!(
                f,
                "{what} must be in the range {min}..={max}, but got {given}",
            ),
            WidthOrder { min, max } => write!(
                f,
                "maximum width must be at least the minimum width, \
                 but {max} < {min}",
            ),
        }
    }
}
