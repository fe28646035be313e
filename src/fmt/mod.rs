/*!
Compiled formatters and the builder that produces them.

A [`Formatter`] holds an immutable tree of printer-parser nodes along with
the configuration used to format and parse with it: a locale, a decimal
style, a text provider, a resolver style and optional chronology and zone
overrides. Formatters are cheap to clone and safe to share between threads.

Formatters are built either from a pattern string with
[`Formatter::of_pattern`], or node by node with a
[`FormatterBuilder`](builder::FormatterBuilder).
*/

use std::sync::Arc;

use crate::{
    chrono::Chronology,
    error::{format::Error as FE, parse::Error as PE, Error, ErrorContext},
    field::Field,
    locale::Locale,
    parsed::Parsed,
    style::{DecimalStyle, FormatStyle, ResolverStyle},
    temporal::Temporal,
    text::{EnglishText, TextProvider},
    zone::ZoneId,
};

use self::{
    builder::FormatterBuilder,
    context::{ParseContext, PrintContext},
    node::{Composite, Localized, Node},
};

pub(crate) mod builder;
mod context;
mod node;
mod pattern;
mod util;

/// A compiled pattern for formatting and parsing datetimes.
///
/// A formatter is immutable. Methods like [`Formatter::with_locale`] return
/// a new formatter that shares the compiled pattern with the original.
///
/// # Example: formatting
///
/// Anything that converts into a [`Temporal`] can be formatted. This
/// includes all of Jiff's datetime types:
///
/// ```
/// use jiff::civil::date;
/// use jiff_pattern::Formatter;
///
/// let fmt = Formatter::of_pattern("EEEE, d MMMM uuuu 'at' h:mm a")?;
/// let zdt = date(2024, 7, 14).at(17, 30, 0, 0).in_tz("America/New_York")?;
/// assert_eq!(fmt.format(&zdt)?, "Sunday, 14 July 2024 at 5:30 PM");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Example: parsing
///
/// Parsing returns a [`Parsed`] value, from which dates, times and
/// instants can be extracted:
///
/// ```
/// use jiff::civil::date;
/// use jiff_pattern::Formatter;
///
/// let fmt = Formatter::of_pattern("dd/MM/uuuu HH:mm")?;
/// let parsed = fmt.parse("14/07/2024 17:30")?;
/// assert_eq!(parsed.to_datetime()?, date(2024, 7, 14).at(17, 30, 0, 0));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Formatter {
    pub(crate) root: Composite,
    pub(crate) locale: Locale,
    pub(crate) decimal: DecimalStyle,
    pub(crate) resolver_style: ResolverStyle,
    pub(crate) resolver_fields: Option<Arc<[Field]>>,
    pub(crate) chrono: Option<&'static dyn Chronology>,
    pub(crate) zone: Option<ZoneId>,
    pub(crate) text: Arc<dyn TextProvider>,
}

impl Formatter {
    pub(crate) fn new(root: Composite, locale: Locale) -> Formatter {
        Formatter {
            root,
            locale,
            decimal: DecimalStyle::STANDARD,
            resolver_style: ResolverStyle::Smart,
            resolver_fields: None,
            chrono: None,
            zone: None,
            text: Arc::new(EnglishText),
        }
    }

    /// Compiles a pattern string into a formatter.
    ///
    /// See the [crate level documentation](crate) for the pattern syntax.
    ///
    /// # Errors
    ///
    /// This returns an error when the pattern is invalid. For example, when
    /// it uses an unknown letter, repeats a letter too many times, contains
    /// a reserved character or has an unmatched `]`.
    ///
    /// # Example
    ///
    /// ```
    /// use jiff_pattern::Formatter;
    ///
    /// let err = Formatter::of_pattern("uuuu-MM-dd]").unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     "found end of optional section `]` without a previous start `[`",
    /// );
    /// ```
    pub fn of_pattern(pattern: &str) -> Result<Formatter, Error> {
        FormatterBuilder::new().append_pattern(pattern)?.build()
    }

    /// Returns a formatter for a date in the locale's format of the given
    /// style.
    pub fn of_localized_date(style: FormatStyle) -> Formatter {
        Formatter::localized(Some(style), None)
    }

    /// Returns a formatter for a time of day in the locale's format of the
    /// given style.
    pub fn of_localized_time(style: FormatStyle) -> Formatter {
        Formatter::localized(None, Some(style))
    }

    /// Returns a formatter for a datetime in the locale's format, with the
    /// same style for the date and the time.
    pub fn of_localized_datetime(style: FormatStyle) -> Formatter {
        Formatter::localized(Some(style), Some(style))
    }

    /// Returns a formatter for a datetime in the locale's format, with
    /// different styles for the date and the time.
    pub fn of_localized_date_time(
        date: FormatStyle,
        time: FormatStyle,
    ) -> Formatter {
        Formatter::localized(Some(date), Some(time))
    }

    fn localized(
        date: Option<FormatStyle>,
        time: Option<FormatStyle>,
    ) -> Formatter {
        let node = Node::Localized(Localized::new(date, time));
        Formatter::new(Composite::new(vec![node], false), Locale::english_us())
    }

    /// Returns a copy of this formatter with the given locale.
    ///
    /// The locale selects the text used for names, localized patterns and
    /// the week definition used by the `Y`, `w`, `W`, `e` and `c` letters.
    pub fn with_locale(self, locale: Locale) -> Formatter {
        Formatter { locale, ..self }
    }

    /// Returns a copy of this formatter with the given decimal style.
    pub fn with_decimal_style(self, decimal: DecimalStyle) -> Formatter {
        Formatter { decimal, ..self }
    }

    /// Returns a copy of this formatter with the given resolver style.
    pub fn with_resolver_style(self, style: ResolverStyle) -> Formatter {
        Formatter { resolver_style: style, ..self }
    }

    /// Returns a copy of this formatter that only resolves the given
    /// fields. Other parsed fields are dropped before resolution.
    ///
    /// # Example
    ///
    /// ```
    /// use jiff_pattern::{Field, Formatter};
    ///
    /// let fmt = Formatter::of_pattern("uuuu-MM-dd")?
    ///     .with_resolver_fields([Field::Year, Field::MonthOfYear]);
    /// let parsed = fmt.parse("2024-07-14")?;
    /// assert!(parsed.to_date().is_err());
    /// assert_eq!(parsed.get(Field::MonthOfYear), Some(7));
    /// assert_eq!(parsed.get(Field::DayOfMonth), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn with_resolver_fields(
        self,
        fields: impl IntoIterator<Item = Field>,
    ) -> Formatter {
        let fields: Arc<[Field]> = fields.into_iter().collect();
        Formatter { resolver_fields: Some(fields), ..self }
    }

    /// Returns a copy of this formatter without a resolver field filter.
    pub fn without_resolver_fields(self) -> Formatter {
        Formatter { resolver_fields: None, ..self }
    }

    /// Returns a copy of this formatter with an override chronology.
    ///
    /// When formatting, dates are converted to this chronology. When
    /// parsing, this chronology is used unless one is parsed.
    pub fn with_chronology(
        self,
        chrono: &'static dyn Chronology,
    ) -> Formatter {
        Formatter { chrono: Some(chrono), ..self }
    }

    /// Returns a copy of this formatter with an override zone.
    ///
    /// When formatting, instants are converted to this zone. When parsing,
    /// this zone is used unless one is parsed.
    ///
    /// # Example
    ///
    /// ```
    /// use jiff::Timestamp;
    /// use jiff_pattern::{Formatter, ZoneId};
    ///
    /// let fmt = Formatter::of_pattern("uuuu-MM-dd HH:mm VV")?
    ///     .with_zone(ZoneId::of("Asia/Tokyo")?);
    /// let ts: Timestamp = "2024-07-14T00:00:00Z".parse()?;
    /// assert_eq!(fmt.format(ts)?, "2024-07-14 09:00 Asia/Tokyo");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn with_zone(self, zone: ZoneId) -> Formatter {
        Formatter { zone: Some(zone), ..self }
    }

    /// Returns a copy of this formatter that looks up text with the given
    /// provider.
    pub fn with_text_provider(
        self,
        provider: impl TextProvider,
    ) -> Formatter {
        Formatter { text: Arc::new(provider), ..self }
    }

    /// Returns the locale of this formatter.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Returns the decimal style of this formatter.
    pub fn decimal_style(&self) -> &DecimalStyle {
        &self.decimal
    }

    /// Returns the resolver style of this formatter.
    pub fn resolver_style(&self) -> ResolverStyle {
        self.resolver_style
    }

    /// Returns the fields resolved by this formatter, if restricted.
    pub fn resolver_fields(&self) -> Option<&[Field]> {
        self.resolver_fields.as_deref()
    }

    /// Returns the override chronology, if any.
    pub fn chronology(&self) -> Option<&'static dyn Chronology> {
        self.chrono
    }

    /// Returns the override zone, if any.
    pub fn zone(&self) -> Option<&ZoneId> {
        self.zone.as_ref()
    }

    /// Returns the text provider of this formatter.
    pub fn text_provider(&self) -> &dyn TextProvider {
        &*self.text
    }

    /// Formats a value into a new string.
    ///
    /// # Errors
    ///
    /// This returns an error when a field required by the pattern (outside
    /// of an optional section) is unavailable, or when a value can't be
    /// printed with the configured width or sign style.
    pub fn format<T: Into<Temporal>>(
        &self,
        value: T,
    ) -> Result<String, Error> {
        let mut buf = String::new();
        let mut ctx = PrintContext::new(value.into(), self)?;
        self.root.format(&mut ctx, &mut buf)?;
        Ok(buf)
    }

    /// Formats a value into the given writer.
    ///
    /// Nothing is written when formatting fails.
    pub fn format_to<T: Into<Temporal>, W: core::fmt::Write>(
        &self,
        value: T,
        mut wtr: W,
    ) -> Result<(), Error> {
        let buf = self.format(value)?;
        wtr.write_str(&buf).map_err(|_| Error::from(FE::Write))
    }

    /// Parses and resolves the whole of the given text.
    ///
    /// # Errors
    ///
    /// This returns an error when the text doesn't match the pattern, when
    /// text is left over after the pattern, or when the parsed fields can't
    /// be resolved with the configured resolver style. Use
    /// [`Error::parse_error_index`] to find where parsing failed.
    pub fn parse(&self, text: &str) -> Result<Parsed, Error> {
        let mut pos = ParsePosition::new(0);
        let ctx = self.parse_context(text, &mut pos)?;
        let Some(ctx) = ctx else {
            let index = pos.error_index().unwrap_or(0);
            return Err(PE::unparsable(text, index).into());
        };
        if pos.index() < text.chars().count() {
            return Err(PE::unparsed(text, pos.index()).into());
        }
        self.resolve(ctx, text)
    }

    /// Parses and resolves text starting at the given position.
    ///
    /// Unlike [`Formatter::parse`], text may be left over after the
    /// pattern. On success, the position is moved to the end of the parsed
    /// text. On a mismatch, this returns `Ok(None)` and the position's
    /// error index is set.
    ///
    /// # Errors
    ///
    /// This returns an error when the position is beyond the end of the
    /// text, or when the parsed fields can't be resolved.
    ///
    /// # Example
    ///
    /// ```
    /// use jiff::civil::date;
    /// use jiff_pattern::{Formatter, ParsePosition};
    ///
    /// let fmt = Formatter::of_pattern("uuuu-MM-dd")?;
    /// let mut pos = ParsePosition::new(5);
    /// let parsed = fmt.parse_at("date 2024-07-14 and more", &mut pos)?;
    /// assert_eq!(parsed.unwrap().to_date()?, date(2024, 7, 14));
    /// assert_eq!(pos.index(), 15);
    ///
    /// let mut pos = ParsePosition::new(0);
    /// assert!(fmt.parse_at("date 2024-07-14", &mut pos)?.is_none());
    /// assert_eq!(pos.error_index(), Some(0));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse_at(
        &self,
        text: &str,
        pos: &mut ParsePosition,
    ) -> Result<Option<Parsed>, Error> {
        let Some(ctx) = self.parse_context(text, pos)? else {
            return Ok(None);
        };
        self.resolve(ctx, text).map(Some)
    }

    /// Parses text starting at the given position without resolving it.
    ///
    /// This returns `Ok(None)` on a mismatch, with the error index of the
    /// position set. The returned value only holds the raw parsed fields,
    /// which may be out of range or in conflict.
    ///
    /// # Errors
    ///
    /// This returns an error when the position is beyond the end of the
    /// text.
    pub fn parse_unresolved(
        &self,
        text: &str,
        pos: &mut ParsePosition,
    ) -> Result<Option<Parsed>, Error> {
        let ctx = self.parse_context(text, pos)?;
        Ok(ctx.map(|ctx| ctx.into_unresolved()))
    }

    fn parse_context<'f>(
        &'f self,
        text: &str,
        pos: &mut ParsePosition,
    ) -> Result<Option<ParseContext<'f>>, Error> {
        let chars: Vec<char> = text.chars().collect();
        let start = pos.index();
        if start > chars.len() {
            let len = chars.len();
            return Err(PE::Position { index: start, len }.into());
        }
        let mut ctx = ParseContext::new(self);
        match self.root.parse(&mut ctx, &chars, start) {
            Ok(end) => {
                pos.set_index(end);
                Ok(Some(ctx))
            }
            Err(index) => {
                debug!("failed to parse `{text}` at index {index}");
                pos.set_error_index(Some(index));
                Ok(None)
            }
        }
    }

    fn resolve(
        &self,
        ctx: ParseContext<'_>,
        text: &str,
    ) -> Result<Parsed, Error> {
        ctx.into_resolved(self.resolver_style, self.resolver_fields())
            .with_context(|| PE::unresolvable(text))
    }
}

impl core::fmt::Display for Formatter {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let pattern = self.root.to_string();
        if pattern.starts_with('[') {
            return f.write_str(&pattern);
        }
        // Strips the parentheses of the root sequence.
        let inner = pattern
            .strip_prefix('(')
            .and_then(|p| p.strip_suffix(')'))
            .unwrap_or(&pattern);
        f.write_str(inner)
    }
}

/// A position in text being parsed, along with the position of an error.
///
/// Positions are in units of characters, not bytes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ParsePosition {
    index: usize,
    error_index: Option<usize>,
}

impl ParsePosition {
    /// Creates a new position at the given character index.
    pub fn new(index: usize) -> ParsePosition {
        ParsePosition { index, error_index: None }
    }

    /// The character index at which parsing starts, or after a successful
    /// parse, ends.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The character index at which the last parse failed.
    pub fn error_index(&self) -> Option<usize> {
        self.error_index
    }

    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn set_error_index(&mut self, index: Option<usize>) {
        self.error_index = index;
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn parse_errors() {
        let fmt = Formatter::of_pattern("uuuu-MM-dd").unwrap();
        insta::assert_snapshot!(
            fmt.parse("2024-07-1x").unwrap_err(),
            @"text `2024-07-1x` could not be parsed at index 8",
        );
        insta::assert_snapshot!(
            fmt.parse("2024-07-14T").unwrap_err(),
            @"text `2024-07-14T` could not be parsed, unparsed text found at index 10",
        );
        insta::assert_snapshot!(
            fmt.parse("2024-13-01").unwrap_err(),
            @"text `2024-13-01` could not be parsed: parameter 'MonthOfYear' with value 13 is not in the required range of 1..=12",
        );
        // Smart resolution clamps the day to the end of the month.
        let parsed = fmt.parse("2024-02-30").unwrap();
        assert_eq!(parsed.to_date().unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn positions() {
        let fmt = Formatter::of_pattern("HH:mm").unwrap();
        let mut pos = ParsePosition::new(3);
        let parsed = fmt.parse_at("at 09:30!", &mut pos).unwrap().unwrap();
        assert_eq!(parsed.get(Field::MinuteOfHour), Some(30));
        assert_eq!(pos.index(), 8);
        assert_eq!(pos.error_index(), None);

        let mut pos = ParsePosition::new(0);
        assert!(fmt.parse_at("09-30", &mut pos).unwrap().is_none());
        assert_eq!(pos.error_index(), Some(2));
        assert_eq!(pos.index(), 0);

        let mut pos = ParsePosition::new(10);
        let err = fmt.parse_unresolved("09:30", &mut pos).unwrap_err();
        assert!(err.is_parse(), "{err}");
        assert_eq!(err.parse_error_index(), Some(10));
        insta::assert_snapshot!(
            err,
            @"parse position 10 is out of bounds for text of length 5",
        );
        assert!(fmt.parse_at("09:30", &mut pos).is_err());

        // Resolution failures are still errors.
        let mut pos = ParsePosition::new(0);
        assert!(fmt.parse_at("25:30", &mut pos).is_err());

        // Positions count characters, not bytes.
        let fmt = Formatter::of_pattern("'é'HH").unwrap();
        let mut pos = ParsePosition::new(0);
        fmt.parse_unresolved("é09", &mut pos).unwrap().unwrap();
        assert_eq!(pos.index(), 3);
    }

    #[test]
    fn format_to() {
        let fmt = Formatter::of_pattern("d MMM uuuu").unwrap();
        let mut out = String::from("date: ");
        fmt.format_to(date(2024, 7, 14), &mut out).unwrap();
        assert_eq!(out, "date: 14 Jul 2024");
    }

    #[test]
    fn display() {
        let fmt = Formatter::of_pattern("uuuu[-MM]").unwrap();
        insta::assert_snapshot!(
            fmt,
            @"Value(Year,4,19,ExceedsPad)['-'Value(MonthOfYear,2)]",
        );
        let fmt = Formatter::of_pattern("[HH]").unwrap();
        insta::assert_snapshot!(fmt, @"[Value(HourOfDay,2)]");
    }

    #[test]
    fn configuration() {
        let fmt = Formatter::of_pattern("uuuu")
            .unwrap()
            .with_resolver_style(ResolverStyle::Strict)
            .with_resolver_fields([Field::Year])
            .with_locale(Locale::new("de", Some("DE")).unwrap());
        assert_eq!(fmt.resolver_style(), ResolverStyle::Strict);
        assert_eq!(fmt.resolver_fields(), Some(&[Field::Year][..]));
        assert_eq!(fmt.locale().language(), "de");
        assert!(fmt.chronology().is_none());
        assert!(fmt.zone().is_none());
        assert_eq!(fmt.text_provider().name(), "english");
        let fmt = fmt.without_resolver_fields();
        assert_eq!(fmt.resolver_fields(), None);
    }
}
