use jiff::civil::Date;

use crate::{
    error::{pattern::Error as E, Error},
    field::Field,
    fmt::{
        node::{
            ChronologyName, Composite, Fraction, Localized, LocalizedOffset,
            Node, Number, OffsetId, Pad, ReducedBase, Settings, Text,
            ZoneIdNode, ZoneText,
        },
        pattern, Formatter,
    },
    locale::Locale,
    style::{FormatStyle, SignStyle, TextStyle},
};

/// The largest width of a numeric value.
const MAX_WIDTH: usize = 19;

/// The largest width of a reduced value.
const MAX_REDUCED_WIDTH: usize = 10;

/// A builder for formatters.
///
/// Nodes are appended in order. Each call either returns the builder, or,
/// when its arguments can be invalid, a `Result` with the builder. Sections
/// opened with [`FormatterBuilder::optional_start`] are closed with
/// [`FormatterBuilder::optional_end`], or automatically when building.
///
/// # Example
///
/// ```
/// use jiff::civil::date;
/// use jiff_pattern::{Field, FormatterBuilder, SignStyle, TextStyle};
///
/// let fmt = FormatterBuilder::new()
///     .append_text(Field::DayOfWeek, TextStyle::Short)
///     .append_literal(", ")
///     .append_value_range(Field::DayOfMonth, 1, 2, SignStyle::NotNegative)?
///     .append_literal_char(' ')
///     .append_text(Field::MonthOfYear, TextStyle::Full)
///     .optional_start()
///     .append_literal_char(' ')
///     .append_value(Field::Year)
///     .optional_end()?
///     .build()?;
/// assert_eq!(fmt.format(date(2024, 7, 14))?, "Sun, 14 July 2024");
///
/// let parsed = fmt.parse("Sun, 14 July 2024")?;
/// assert_eq!(parsed.to_date()?, date(2024, 7, 14));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct FormatterBuilder {
    /// The open sections. The first is the root and is never popped.
    frames: Vec<Frame>,
}

#[derive(Clone, Debug)]
struct Frame {
    nodes: Vec<Node>,
    optional: bool,
    /// The index of the number that reserves digits for the fixed width
    /// numbers appended right after it.
    value_index: Option<usize>,
    pad: Option<(usize, char)>,
}

impl Frame {
    fn new(optional: bool) -> Frame {
        Frame { nodes: vec![], optional, value_index: None, pad: None }
    }
}

impl FormatterBuilder {
    /// Creates a new empty builder.
    pub fn new() -> FormatterBuilder {
        FormatterBuilder { frames: vec![Frame::new(false)] }
    }

    fn active(&mut self) -> &mut Frame {
        // The root frame is never popped.
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// Appends a node, wrapping it in a pending pad. Returns the index of
    /// the node when it wasn't padded.
    fn push(&mut self, node: Node) -> Option<usize> {
        let frame = self.active();
        frame.value_index = None;
        match frame.pad.take() {
            Some((width, ch)) => {
                frame.nodes.push(Node::Pad(Pad::new(node, width, ch)));
                None
            }
            None => {
                frame.nodes.push(node);
                Some(frame.nodes.len() - 1)
            }
        }
    }

    fn append(mut self, node: Node) -> FormatterBuilder {
        self.push(node);
        self
    }

    /// Appends a number, taking part in adjacent value parsing.
    pub(super) fn append_number(mut self, number: Number) -> FormatterBuilder {
        let frame = self.active();
        let base = match frame.value_index {
            Some(index) if frame.pad.is_none() => index,
            _ => {
                let index = self.push(Node::Number(number));
                self.active().value_index = index;
                return self;
            }
        };
        let Node::Number(ref mut active) = frame.nodes[base] else {
            let index = self.push(Node::Number(number));
            self.active().value_index = index;
            return self;
        };
        if number.is_fixed_adjacent() {
            *active = active.with_subsequent_width(number.max_width());
            self.push(Node::Number(number.with_fixed_width()));
            self.active().value_index = Some(base);
        } else {
            *active = active.with_fixed_width();
            let index = self.push(Node::Number(number));
            self.active().value_index = index;
        }
        self
    }

    /// Appends a field as a number of 1 to 19 digits, with a sign for
    /// negative values.
    ///
    /// When parsing, this reads as many digits as possible, unless fixed
    /// width values follow directly. In that case, this node leaves enough
    /// digits for them.
    pub fn append_value(self, field: Field) -> FormatterBuilder {
        self.append_number(Number::new(field, 1, MAX_WIDTH, SignStyle::Normal))
    }

    /// Appends a field as a zero padded number of exactly `width` digits.
    ///
    /// # Errors
    ///
    /// This returns an error when the width isn't in the range `1..=19`.
    pub fn append_value_width(
        self,
        field: Field,
        width: usize,
    ) -> Result<FormatterBuilder, Error> {
        check_width("width", width, 1, MAX_WIDTH)?;
        Ok(self.append_number(Number::new(
            field,
            width,
            width,
            SignStyle::NotNegative,
        )))
    }

    /// Appends a field as a number with the given width range and sign
    /// style.
    ///
    /// # Errors
    ///
    /// This returns an error when either width isn't in the range `1..=19`
    /// or when the maximum is smaller than the minimum.
    pub fn append_value_range(
        self,
        field: Field,
        min_width: usize,
        max_width: usize,
        sign: SignStyle,
    ) -> Result<FormatterBuilder, Error> {
        if min_width == max_width && sign == SignStyle::NotNegative {
            return self.append_value_width(field, max_width);
        }
        check_width("minimum width", min_width, 1, MAX_WIDTH)?;
        check_width("maximum width", max_width, 1, MAX_WIDTH)?;
        if max_width < min_width {
            return Err(
                E::WidthOrder { min: min_width, max: max_width }.into()
            );
        }
        Ok(self.append_number(Number::new(field, min_width, max_width, sign)))
    }

    /// Appends a field as its low order digits relative to a base value.
    ///
    /// A value in the range `base..base + 10^width` is printed with `width`
    /// digits. Other values are printed in full, up to `max_width` digits.
    /// When parsing, exactly `width` digits are read back into that range.
    /// For example, with a width of 2 and a base of 1980, `12` parses as
    /// 2012 and `85` as 1985.
    ///
    /// # Errors
    ///
    /// This returns an error when either width isn't in the range `1..=10`,
    /// when the maximum is smaller than the width, when the base is outside
    /// the field's range or when the base plus `10^max_width` overflows a
    /// 32-bit integer.
    pub fn append_value_reduced(
        self,
        field: Field,
        width: usize,
        max_width: usize,
        base: i64,
    ) -> Result<FormatterBuilder, Error> {
        check_reduced_width(width, max_width)?;
        field.check(base)?;
        // The width is at most 10, so this doesn't overflow.
        let limit = base + 10i64.pow(max_width as u32);
        if limit > i64::from(i32::MAX) {
            return Err(E::ReducedOverflow { base, width: max_width }.into());
        }
        Ok(self.append_number(Number::reduced(
            field,
            width,
            max_width,
            ReducedBase::Value(base),
        )))
    }

    /// Like [`FormatterBuilder::append_value_reduced`], but the base is the
    /// value of the field for the given date, in the chronology used when
    /// formatting or parsing.
    pub fn append_value_reduced_from_date(
        self,
        field: Field,
        width: usize,
        max_width: usize,
        base: Date,
    ) -> Result<FormatterBuilder, Error> {
        check_reduced_width(width, max_width)?;
        Ok(self.append_number(Number::reduced(
            field,
            width,
            max_width,
            ReducedBase::Date(base),
        )))
    }

    /// Appends a field as a fraction of its range, like `.25` for 15
    /// minutes.
    ///
    /// The field must have a fixed range. Between `min_width` and
    /// `max_width` fractional digits are printed, without trailing zeros
    /// beyond the minimum. A fraction with a fixed width and no decimal
    /// point takes part in adjacent value parsing.
    ///
    /// # Errors
    ///
    /// This returns an error when the field's range isn't fixed, when the
    /// minimum width isn't in `0..=9`, when the maximum width isn't in
    /// `1..=9` or when the maximum is smaller than the minimum.
    pub fn append_fraction(
        mut self,
        field: Field,
        min_width: usize,
        max_width: usize,
        decimal_point: bool,
    ) -> Result<FormatterBuilder, Error> {
        let fraction =
            Fraction::new(field, min_width, max_width, decimal_point)?;
        let frame = self.active();
        let base = frame.value_index.filter(|&i| {
            frame.pad.is_none()
                && fraction.is_fixed_adjacent()
                && matches!(frame.nodes[i], Node::Number(_))
        });
        let Some(base) = base else {
            return Ok(self.append(Node::Fraction(fraction)));
        };
        if let Node::Number(ref mut active) = frame.nodes[base] {
            *active = active.with_subsequent_width(fraction.max_width());
        }
        self.push(Node::Fraction(fraction));
        self.active().value_index = Some(base);
        Ok(self)
    }

    /// Appends a field as text, like a month name.
    ///
    /// Values without text are printed as numbers.
    pub fn append_text(
        self,
        field: Field,
        style: TextStyle,
    ) -> FormatterBuilder {
        self.append(Node::Text(Text::new(field, style)))
    }

    /// Appends a field as text from the given values and texts.
    ///
    /// Values missing from the map are printed as numbers. When parsing,
    /// the longest matching text wins.
    pub fn append_text_with<S: AsRef<str>>(
        self,
        field: Field,
        texts: impl IntoIterator<Item = (i64, S)>,
    ) -> FormatterBuilder {
        let texts = texts
            .into_iter()
            .map(|(value, text)| (value, Box::from(text.as_ref())))
            .collect();
        self.append(Node::Text(Text::custom(field, texts)))
    }

    /// Appends an offset like `+01:00`, or `Z` for a zero offset.
    pub fn append_offset_id(self) -> FormatterBuilder {
        self.append(Node::Offset(OffsetId::zone_suffix("Z")))
    }

    /// Appends an offset with the given pattern and zero offset text.
    ///
    /// The pattern is one of `+HH`, `+HHmm`, `+HH:mm`, `+HHMM`, `+HH:MM`,
    /// `+HHMMss`, `+HH:MM:ss`, `+HHMMSS` and `+HH:MM:SS`. Upper case parts
    /// are always printed, lower case parts only when non-zero.
    ///
    /// # Errors
    ///
    /// This returns an error for any other pattern.
    pub fn append_offset(
        self,
        pattern: &str,
        no_offset: &str,
    ) -> Result<FormatterBuilder, Error> {
        let node = OffsetId::new(pattern, no_offset)?;
        Ok(self.append(Node::Offset(node)))
    }

    /// Appends an offset like `GMT+8` (short) or `GMT+08:00` (full).
    ///
    /// # Errors
    ///
    /// This returns an error for styles other than full and short.
    pub fn append_localized_offset(
        self,
        style: TextStyle,
    ) -> Result<FormatterBuilder, Error> {
        let node = LocalizedOffset::new(style)?;
        Ok(self.append(Node::LocalizedOffset(node)))
    }

    /// Appends a zone id like `Europe/Paris` or `+01:00`.
    pub fn append_zone_id(self) -> FormatterBuilder {
        self.append(Node::ZoneId(ZoneIdNode))
    }

    /// Appends a zone name like `Central European Summer Time`.
    pub fn append_zone_text(self, style: TextStyle) -> FormatterBuilder {
        self.append(Node::ZoneText(ZoneText::new(style)))
    }

    /// Appends the identifier of the chronology, like `ISO`.
    pub fn append_chronology_id(self) -> FormatterBuilder {
        self.append(Node::Chronology(ChronologyName::new(None)))
    }

    /// Appends the display name of the chronology.
    pub fn append_chronology_text(self, style: TextStyle) -> FormatterBuilder {
        self.append(Node::Chronology(ChronologyName::new(Some(style))))
    }

    /// Appends a date, a time or both in the locale's format for the given
    /// styles.
    ///
    /// # Errors
    ///
    /// This returns an error when both styles are `None`.
    pub fn append_localized(
        self,
        date: Option<FormatStyle>,
        time: Option<FormatStyle>,
    ) -> Result<FormatterBuilder, Error> {
        if date.is_none() && time.is_none() {
            return Err(E::MissingLocalizedStyle.into());
        }
        Ok(self.append(Node::Localized(Localized::new(date, time))))
    }

    pub fn append_literal_char(self, ch: char) -> FormatterBuilder {
        self.append(Node::Char(ch))
    }

    /// Appends literal text. Nothing is appended for empty text.
    pub fn append_literal(self, literal: &str) -> FormatterBuilder {
        let mut chars = literal.chars();
        match (chars.next(), chars.next()) {
            (None, _) => self,
            (Some(ch), None) => self.append(Node::Char(ch)),
            (Some(_), Some(_)) => self.append(Node::Str(Box::from(literal))),
        }
    }

    /// Appends all of the nodes of another formatter.
    ///
    /// Only the pattern is used. The other formatter's configuration, like
    /// its locale, is ignored.
    pub fn append_formatter(self, fmt: &Formatter) -> FormatterBuilder {
        self.append(Node::Composite(fmt.root.with_optional(false)))
    }

    /// Appends all of the nodes of another formatter as an optional
    /// section.
    pub fn append_optional(self, fmt: &Formatter) -> FormatterBuilder {
        self.append(Node::Composite(fmt.root.with_optional(true)))
    }

    /// Appends the nodes for a pattern like `uuuu-MM-dd`.
    ///
    /// See the [crate level documentation](crate) for the pattern syntax.
    pub fn append_pattern(
        self,
        pattern: &str,
    ) -> Result<FormatterBuilder, Error> {
        pattern::compile(self, pattern)
    }

    /// Pads the next appended node to `width` characters with spaces.
    ///
    /// When formatting, output longer than the width is an error. When
    /// parsing strictly, the padded node must end exactly at the width.
    ///
    /// # Errors
    ///
    /// This returns an error when the width is zero.
    pub fn pad_next(self, width: usize) -> Result<FormatterBuilder, Error> {
        self.pad_next_with(width, ' ')
    }

    /// Pads the next appended node to `width` characters with the given
    /// character.
    pub fn pad_next_with(
        mut self,
        width: usize,
        ch: char,
    ) -> Result<FormatterBuilder, Error> {
        if width == 0 {
            return Err(E::PadWidth { width }.into());
        }
        self.active().pad = Some((width, ch));
        Ok(self)
    }

    /// Starts an optional section.
    ///
    /// When formatting, the section is omitted when one of its values is
    /// unavailable. When parsing, the section is skipped when it doesn't
    /// match.
    pub fn optional_start(mut self) -> FormatterBuilder {
        self.active().value_index = None;
        self.frames.push(Frame::new(true));
        self
    }

    /// Ends the innermost optional section. An empty section is dropped.
    ///
    /// # Errors
    ///
    /// This returns an error when no section is open, or when a pad was
    /// requested at the end of the section.
    pub fn optional_end(mut self) -> Result<FormatterBuilder, Error> {
        if self.frames.len() == 1 {
            return Err(E::UnmatchedOptionalEnd.into());
        }
        let Some(frame) = self.frames.pop() else {
            return Err(E::UnmatchedOptionalEnd.into());
        };
        if frame.pad.is_some() {
            return Err(E::PadDangling.into());
        }
        if frame.nodes.is_empty() {
            return Ok(self);
        }
        Ok(self.append(Node::Composite(Composite::new(
            frame.nodes,
            frame.optional,
        ))))
    }

    /// Parses the rest of the pattern case sensitively. This is the
    /// default.
    pub fn parse_case_sensitive(self) -> FormatterBuilder {
        self.append(Node::Settings(Settings::CaseSensitive))
    }

    /// Parses the rest of the pattern case insensitively.
    pub fn parse_case_insensitive(self) -> FormatterBuilder {
        self.append(Node::Settings(Settings::CaseInsensitive))
    }

    /// Parses the rest of the pattern strictly. This is the default.
    pub fn parse_strict(self) -> FormatterBuilder {
        self.append(Node::Settings(Settings::Strict))
    }

    /// Parses the rest of the pattern leniently.
    ///
    /// Lenient parsing accepts numbers of any width, signs where the sign
    /// style wouldn't allow them and text in any style.
    pub fn parse_lenient(self) -> FormatterBuilder {
        self.append(Node::Settings(Settings::Lenient))
    }

    /// Sets a field to the given value when parsing, unless it was parsed.
    ///
    /// This has no effect on formatting.
    pub fn parse_defaulting(
        self,
        field: Field,
        value: i64,
    ) -> FormatterBuilder {
        self.append(Node::Default { field, value })
    }

    /// Closes all open sections and returns the root sequence.
    pub(crate) fn into_composite(mut self) -> Result<Composite, Error> {
        while self.frames.len() > 1 {
            self = self.optional_end()?;
        }
        let Some(root) = self.frames.pop() else {
            return Ok(Composite::new(vec![], false));
        };
        if root.pad.is_some() {
            return Err(E::PadDangling.into());
        }
        Ok(Composite::new(root.nodes, false))
    }

    /// Builds a formatter for the `en-US` locale.
    ///
    /// Open optional sections are closed.
    ///
    /// # Errors
    ///
    /// This returns an error when a pad was requested at the end of the
    /// pattern.
    pub fn build(self) -> Result<Formatter, Error> {
        self.build_with_locale(Locale::english_us())
    }

    /// Builds a formatter for the given locale.
    pub fn build_with_locale(
        self,
        locale: Locale,
    ) -> Result<Formatter, Error> {
        let root = self.into_composite()?;
        trace!("built formatter {root} for {locale}");
        Ok(Formatter::new(root, locale))
    }
}

impl Default for FormatterBuilder {
    fn default() -> FormatterBuilder {
        FormatterBuilder::new()
    }
}

fn check_width(
    what: &'static str,
    given: usize,
    min: usize,
    max: usize,
) -> Result<(), Error> {
    if !(min..=max).contains(&given) {
        return Err(E::Width { what, given, min, max }.into());
    }
    Ok(())
}

fn check_reduced_width(width: usize, max_width: usize) -> Result<(), Error> {
    check_width("width", width, 1, MAX_REDUCED_WIDTH)?;
    check_width("maximum width", max_width, 1, MAX_REDUCED_WIDTH)?;
    if max_width < width {
        return Err(E::WidthOrder { min: width, max: max_width }.into());
    }
    Ok(())
}
