use crate::{error, util::escape};

/// Errors that occur while parsing text.
///
/// Every parse error carries the index, in characters, at which parsing
/// failed. Failures to resolve the parsed fields report index `0`.
#[derive(Clone, Debug)]
pub(crate) enum Error {
    Position { index: usize, len: usize },
    Unparsable { text: Box<str>, index: usize },
    Unparsed { text: Box<str>, index: usize },
    Unresolvable { text: Box<str> },
}

impl Error {
    pub(crate) fn unparsable(text: &str, index: usize) -> Error {
        Error::Unparsable { text: abbreviate(text), index }
    }

    pub(crate) fn unparsed(text: &str, index: usize) -> Error {
        Error::Unparsed { text: abbreviate(text), index }
    }

    pub(crate) fn unresolvable(text: &str) -> Error {
        Error::Unresolvable { text: abbreviate(text) }
    }

    /// The character index at which parsing failed.
    pub(crate) fn index(&self) -> usize {
        match *self {
            Error::Position { index, .. }
            | Error::Unparsable { index, .. }
            | Error::Unparsed { index, .. } => index,
            Error::Unresolvable { .. } => 0,
        }
    }
}

/// Long inputs are cut down to 64 characters in error messages.
fn abbreviate(text: &str) -> Box<str> {
    match text.char_indices().nth(64) {
        None => text.into(),
        Some((end, _)) => format!("{}...", &text[..end]).into_boxed_str(),
    }
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
        error::ErrorKind::Parse(err).into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            Position { index, len } => write!(
                f,
                "parse position {index} is out of bounds \
                 for text of length {len}",
            ),
            Unparsable { ref text, index } => write!(
                f,
                "text `{text}` could not be parsed at index {index}",
                text = escape::Str(text),
            ),
            Unparsed { ref text, index } => write!(
                f,
                "text `{text}` could not be parsed, \
                 unparsed text found at index {index}",
                text = escape::Str(text),
            ),
            Unresolvable { ref text } => write!(
                f,
                "text `{text}` could not be parsed",
                text = escape::Str(text),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_text_is_abbreviated() {
        let text = "a".repeat(100);
        let err = Error::unparsable(&text, 70);
        let msg = err.to_string();
        assert!(msg.contains(&format!("{}...", "a".repeat(64))));
        assert!(!msg.contains(&"a".repeat(65)));
        assert_eq!(err.index(), 70);
        assert_eq!(Error::unresolvable("x").index(), 0);
    }
}
