use std::sync::Arc;

pub(crate) mod format;
pub(crate) mod parse;
pub(crate) mod pattern;
pub(crate) mod resolve;

/// An error that can occur in this crate.
///
/// Errors fall into a handful of categories:
///
/// * Building a formatter failed. For example, because a pattern contained
/// an unknown pattern letter or an unmatched `]`. See [`Error::is_pattern`].
/// * Formatting failed. For example, because the value being formatted
/// doesn't have a field that the pattern requires. See [`Error::is_format`].
/// * Parsing failed, either because the input didn't match the pattern or
/// because the parsed fields couldn't be resolved into a consistent value.
/// See [`Error::is_parse`] and [`Error::parse_error_index`].
/// * Two parsed values for the same field disagree. See
/// [`Error::is_conflict`].
/// * A value was outside of its field's range. See [`Error::is_range`].
///
/// # Design
///
/// Like Jiff, this crate uses one error type for all of its operations. An
/// error is a cheaply cloneable pointer to a structured error kind and an
/// optional cause, which forms a chain. The `Display` impl prints the whole
/// chain, from the highest level context down to the root cause, separated
/// by `: `.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Creates a new error value from `core::fmt::Arguments`.
    ///
    /// This is mostly useful for implementations of [`FieldRules`] and
    /// [`TextProvider`] that need to report their own failures.
    ///
    /// [`FieldRules`]: crate::FieldRules
    /// [`TextProvider`]: crate::TextProvider
    ///
    /// # Example
    ///
    /// ```
    /// use jiff_pattern::Error;
    ///
    /// let err = Error::from_args(format_args!("something failed"));
    /// assert_eq!(err.to_string(), "something failed");
    /// ```
    pub fn from_args<'a>(message: core::fmt::Arguments<'a>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::from_args(message)))
    }

    /// Returns true when this error originated from a value being outside
    /// of the range of its field.
    ///
    /// # Example
    ///
    /// ```
    /// use jiff_pattern::{Formatter, ResolverStyle};
    ///
    /// let fmt = Formatter::of_pattern("uuuu-MM-dd")?
    ///     .with_resolver_style(ResolverStyle::Strict);
    /// assert!(fmt.parse("2024-13-01").unwrap_err().is_range());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn is_range(&self) -> bool {
        matches!(*self.root().kind(), ErrorKind::Range(_))
    }

    /// Returns true when this error occurred while building a formatter,
    /// for example, from an invalid pattern.
    ///
    /// # Example
    ///
    /// ```
    /// use jiff_pattern::Formatter;
    ///
    /// let err = Formatter::of_pattern("uuuu-MM-dd]").unwrap_err();
    /// assert!(err.is_pattern());
    /// assert!(Formatter::of_pattern("{uuuu}").unwrap_err().is_pattern());
    /// ```
    pub fn is_pattern(&self) -> bool {
        self.chain().any(|err| matches!(*err.kind(), ErrorKind::Pattern(_)))
    }

    /// Returns true when this error occurred while formatting a value.
    ///
    /// # Example
    ///
    /// ```
    /// use jiff::civil::time;
    /// use jiff_pattern::Formatter;
    ///
    /// let fmt = Formatter::of_pattern("uuuu-MM-dd")?;
    /// assert!(fmt.format(time(9, 0, 0, 0)).unwrap_err().is_format());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn is_format(&self) -> bool {
        self.chain().any(|err| matches!(*err.kind(), ErrorKind::Format(_)))
    }

    /// Returns true when this error occurred while parsing text. This
    /// includes failures to resolve the parsed fields.
    pub fn is_parse(&self) -> bool {
        self.chain().any(|err| matches!(*err.kind(), ErrorKind::Parse(_)))
    }

    /// Returns true when this error is the result of two different values
    /// competing for the same field, or a parsed field disagreeing with the
    /// resolved date or time.
    ///
    /// # Example
    ///
    /// ```
    /// use jiff_pattern::Formatter;
    ///
    /// // 2024-07-14 is a Sunday.
    /// let fmt = Formatter::of_pattern("EEE uuuu-MM-dd")?;
    /// assert!(fmt.parse("Mon 2024-07-14").unwrap_err().is_conflict());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn is_conflict(&self) -> bool {
        self.chain().any(|err| match *err.kind() {
            ErrorKind::Resolve(ref err) => err.is_conflict(),
            _ => false,
        })
    }

    /// Returns the character index at which parsing failed, if this error
    /// came from parsing.
    ///
    /// When parsing succeeded but resolving the parsed fields failed, the
    /// index is `0`.
    ///
    /// # Example
    ///
    /// ```
    /// use jiff_pattern::Formatter;
    ///
    /// let fmt = Formatter::of_pattern("uuuu-MM-dd")?;
    /// let err = fmt.parse("2024-07-1x").unwrap_err();
    /// assert_eq!(err.parse_error_index(), Some(8));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse_error_index(&self) -> Option<usize> {
        self.chain().find_map(|err| match *err.kind() {
            ErrorKind::Parse(ref err) => Some(err.index()),
            _ => None,
        })
    }
}

impl Error {
    /// Creates a new error indicating that a `given` value is out of the
    /// specified `min..=max` range. The given `what` label is used in the
    /// error message as a human readable description of what exactly is out
    /// of range. (e.g., a field name like `MonthOfYear`)
    #[inline(never)]
    #[cold]
    pub(crate) fn range(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> Error {
        Error::from(ErrorKind::Range(RangeError::new(what, given, min, max)))
    }

    /// Wraps an error returned by Jiff.
    #[inline(never)]
    #[cold]
    pub(crate) fn jiff(err: jiff::Error) -> Error {
        Error::from(ErrorKind::Jiff(err))
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        match Arc::get_mut(&mut err.inner) {
            Some(inner) => {
                debug_assert!(
                    inner.cause.is_none(),
                    "cause of consequence must be `None`"
                );
                inner.cause = Some(self);
                err
            }
            // A shared consequent can't be given a cause. Keep the root
            // cause, since that's what the predicates look at.
            None => self,
        }
    }

    /// Returns the root error in this chain.
    fn root(&self) -> &Error {
        let mut err = self;
        while let Some(ref cause) = err.inner.cause {
            err = cause;
        }
        err
    }

    /// Returns a chain of error values.
    ///
    /// This starts with the most recent error added to the chain. That is,
    /// the highest level context. The last error in the chain is always the
    /// "root" cause.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut next = Some(self);
        core::iter::from_fn(move || {
            let err = next?;
            next = err.inner.cause.as_ref();
            Some(err)
        })
    }

    fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

/// The underlying kind of a [`Error`].
#[derive(Debug)]
pub(crate) enum ErrorKind {
    Adhoc(AdhocError),
    Format(self::format::Error),
    Jiff(jiff::Error),
    Parse(self::parse::Error),
    Pattern(self::pattern::Error),
    Range(RangeError),
    Resolve(self::resolve::Error),
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match *self {
            Adhoc(ref msg) => msg.fmt(f),
            Format(ref err) => err.fmt(f),
            Jiff(ref err) => err.fmt(f),
            Parse(ref err) => err.fmt(f),
            Pattern(ref err) => err.fmt(f),
            Range(ref err) => err.fmt(f),
            Resolve(ref err) => err.fmt(f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { inner: Arc::new(ErrorInner { kind, cause: None }) }
    }
}

/// A generic error message.
///
/// This backs the public `Error::from_args` API, which permits implementors
/// of the extension traits to manifest their own `Error` values from an
/// arbitrary message.
pub(crate) struct AdhocError {
    message: Box<str>,
}

impl AdhocError {
    fn from_args<'a>(message: core::fmt::Arguments<'a>) -> AdhocError {
        AdhocError { message: message.to_string().into_boxed_str() }
    }
}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.message, f)
    }
}

impl core::fmt::Debug for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.message, f)
    }
}

/// An error that occurs when an input value is out of bounds.
///
/// The error message produced by this type will include a name describing
/// which input was out of bounds, the value given and its minimum and maximum
/// allowed values.
#[derive(Debug)]
pub(crate) struct RangeError {
    what: &'static str,
    given: i128,
    min: i128,
    max: i128,
}

impl RangeError {
    fn new(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> RangeError {
        RangeError {
            what,
            given: given.into(),
            min: min.into(),
            max: max.into(),
        }
    }
}

impl core::fmt::Display for RangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let RangeError { what, given, min, max } = *self;
        write!(
            f,
            "parameter '{what}' with value {given} \
             is not in the required range of {min}..={max}",
        )
    }
}

/// A simple trait to encapsulate automatic conversion to `Error`.
///
/// This exists to make `Error::context` work without public `From` impls
/// for every internal error type.
pub(crate) trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

impl From<jiff::Error> for Error {
    #[inline(never)]
    #[cold]
    fn from(err: jiff::Error) -> Error {
        Error::jiff(err)
    }
}

impl IntoError for jiff::Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        Error::jiff(self)
    }
}

/// A trait for contextualizing error values.
///
/// This makes it easy to contextualize either `Error` or `Result<T, Error>`.
/// Specifically, in the latter case, it absolves one of the need to call
/// `map_err` everywhere one wants to add context to an error.
pub(crate) trait ErrorContext<T, E> {
    /// Contextualize the consequent error built by the given closure with
    /// this (`self`) error as the cause.
    ///
    /// This is equivalent to saying that "consequent is caused by self." The
    /// closure is only called on the error path.
    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error>;
}

impl<T, E> ErrorContext<T, E> for Result<T, E>
where
    E: IntoError,
{
    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent().into_error())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The size of an error isn't an API guarantee, but every fallible
    // format and parse routine returns one, so growing it should be a
    // deliberate decision.
    #[test]
    fn error_size() {
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn chain_display() {
        let root = Error::range("MonthOfYear", 13, 1, 12);
        let err = Err::<(), _>(root)
            .with_context(|| Error::from_args(format_args!("outer")))
            .unwrap_err();
        insta::assert_snapshot!(
            err,
            @"outer: parameter 'MonthOfYear' with value 13 is not in the required range of 1..=12",
        );
        assert!(err.is_range());
        assert!(!err.is_parse());
    }

    #[test]
    fn with_context_lazy() {
        let result: Result<(), Error> = Ok(());
        let got = result.with_context(|| -> Error {
            panic!("context should not be built on success")
        });
        assert!(got.is_ok());
    }
}
