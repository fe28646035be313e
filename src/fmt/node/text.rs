use std::{borrow::Cow, sync::Arc};

use crate::{
    chrono,
    error::Error,
    field::Field,
    fmt::{
        context::{ParseContext, PrintContext},
        node::number::Number,
    },
    style::{SignStyle, TextStyle},
    text::{self, TextTable},
};

/// A field printed as text, like a month or weekday name.
///
/// Values without text, and text that can't be matched when parsing
/// leniently, fall back to a plain number.
#[derive(Clone, Debug)]
pub(crate) struct Text {
    field: Field,
    style: TextStyle,
    custom: Option<Custom>,
}

/// A fixed value to text mapping given when building a formatter.
#[derive(Clone, Debug)]
struct Custom {
    texts: Arc<[(i64, Box<str>)]>,
    table: TextTable,
}

impl Text {
    pub(crate) fn new(field: Field, style: TextStyle) -> Text {
        Text { field, style, custom: None }
    }

    pub(crate) fn custom(field: Field, texts: Vec<(i64, Box<str>)>) -> Text {
        let table = text::custom_table(&texts);
        Text {
            field,
            style: TextStyle::Full,
            custom: Some(Custom { texts: Arc::from(texts), table }),
        }
    }

    fn number(&self) -> Number {
        Number::new(self.field, 1, 19, SignStyle::Normal)
    }

    pub(crate) fn format(
        &self,
        ctx: &mut PrintContext<'_>,
        buf: &mut String,
    ) -> Result<bool, Error> {
        let Some(value) = ctx.value(self.field)? else { return Ok(false) };
        let text: Option<Cow<'_, str>> = match self.custom {
            Some(ref custom) => custom
                .texts
                .iter()
                .find(|&&(v, _)| v == value)
                .map(|(_, text)| Cow::Borrowed(&**text)),
            None => ctx.text_provider().text(
                self.field,
                value,
                self.style,
                ctx.text_chronology(),
                ctx.locale(),
            ),
        };
        match text {
            Some(text) => {
                buf.push_str(&text);
                Ok(true)
            }
            None => self.number().format(ctx, buf),
        }
    }

    pub(crate) fn parse(
        &self,
        ctx: &mut ParseContext<'_>,
        text: &[char],
        pos: usize,
    ) -> Result<usize, usize> {
        if pos > text.len() {
            return Err(pos);
        }
        let table = match self.custom {
            Some(ref custom) => Arc::clone(&custom.table),
            None => {
                let style =
                    if ctx.is_strict() { Some(self.style) } else { None };
                text::parse_table(
                    ctx.text_provider(),
                    self.field,
                    style,
                    ctx.effective_chronology(),
                    ctx.locale(),
                )
            }
        };
        if !table.is_empty() {
            for (candidate, value) in table.iter() {
                if let Some(end) = ctx.matches(text, pos, candidate) {
                    return ctx.set_field(self.field, *value, pos, end);
                }
            }
            if ctx.is_strict() {
                return Err(pos);
            }
        }
        self.number().parse(ctx, text, pos)
    }
}

impl core::fmt::Display for Text {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.style == TextStyle::Full {
            write!(f, "Text({})", self.field)
        } else {
            write!(f, "Text({},{:?})", self.field, self.style)
        }
    }
}

/// The chronology of a value, printed as its identifier or, with a style,
/// as its display name.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ChronologyName {
    style: Option<TextStyle>,
}

impl ChronologyName {
    pub(crate) fn new(style: Option<TextStyle>) -> ChronologyName {
        ChronologyName { style }
    }

    pub(crate) fn format(
        &self,
        ctx: &mut PrintContext<'_>,
        buf: &mut String,
    ) -> Result<bool, Error> {
        let Some(chrono) = ctx.chronology()? else { return Ok(false) };
        let name = match self.style {
            None => None,
            Some(_) => {
                ctx.text_provider().chronology_name(chrono, ctx.locale())
            }
        };
        buf.push_str(name.as_deref().unwrap_or(chrono.id()));
        Ok(true)
    }

    /// Parses the longest matching chronology identifier.
    pub(crate) fn parse(
        &self,
        ctx: &mut ParseContext<'_>,
        text: &[char],
        pos: usize,
    ) -> Result<usize, usize> {
        let mut best = None;
        for chrono in chrono::available() {
            let Some(end) = ctx.matches(text, pos, chrono.id()) else {
                continue;
            };
            if best.map_or(true, |(_, best_end)| end > best_end) {
                best = Some((chrono, end));
            }
        }
        let Some((chrono, end)) = best else { return Err(pos) };
        ctx.set_chronology(chrono);
        Ok(end)
    }
}

impl core::fmt::Display for ChronologyName {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.style {
            None => f.write_str("ChronologyId()"),
            Some(style) => write!(f, "ChronologyText({style:?})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use crate::{
        Field, Formatter, FormatterBuilder, ParsePosition, TextStyle,
        THAI_BUDDHIST,
    };

    #[test]
    fn month_names() {
        let fmt = Formatter::of_pattern("MMMM MMM MMMMM").unwrap();
        assert_eq!(fmt.format(date(2024, 9, 1)).unwrap(), "September Sep S");
        insta::assert_snapshot!(
            fmt,
            @"Text(MonthOfYear)' 'Text(MonthOfYear,Short)' 'Text(MonthOfYear,Narrow)",
        );
    }

    #[test]
    fn strict_uses_one_style() {
        let fmt = Formatter::of_pattern("MMM uuuu").unwrap();
        let parsed = fmt.parse("Sep 2024").unwrap();
        assert_eq!(parsed.get(Field::MonthOfYear), Some(9));
        // Only the short name is tried, which leaves `tember` behind.
        assert_eq!(
            fmt.parse("September 2024").unwrap_err().parse_error_index(),
            Some(3),
        );

        let lenient = FormatterBuilder::new()
            .parse_lenient()
            .append_pattern("MMM uuuu")
            .unwrap()
            .build()
            .unwrap();
        let parsed = lenient.parse("September 2024").unwrap();
        assert_eq!(parsed.get(Field::MonthOfYear), Some(9));
        // Lenient parsing falls back to numbers.
        let parsed = lenient.parse("9 2024").unwrap();
        assert_eq!(parsed.get(Field::MonthOfYear), Some(9));
    }

    #[test]
    fn numeric_fallback() {
        let fmt = FormatterBuilder::new()
            .append_text(Field::DayOfMonth, TextStyle::Full)
            .build()
            .unwrap();
        assert_eq!(fmt.format(date(2024, 7, 14)).unwrap(), "14");
        let mut pos = ParsePosition::new(0);
        let parsed = fmt.parse_unresolved("14", &mut pos).unwrap().unwrap();
        assert_eq!(parsed.get(Field::DayOfMonth), Some(14));
    }

    #[test]
    fn custom_text() {
        let fmt = FormatterBuilder::new()
            .append_text_with(
                Field::DayOfMonth,
                [(1, "1st"), (2, "2nd"), (3, "3rd"), (21, "21st")],
            )
            .build()
            .unwrap();
        assert_eq!(fmt.format(date(2024, 7, 2)).unwrap(), "2nd");
        assert_eq!(fmt.format(date(2024, 7, 14)).unwrap(), "14");
        let mut pos = ParsePosition::new(0);
        let parsed = fmt.parse_unresolved("21st", &mut pos).unwrap().unwrap();
        assert_eq!(parsed.get(Field::DayOfMonth), Some(21));
        assert_eq!(pos.index(), 4);
        // Strict parsing doesn't fall back to numbers when text exists.
        let mut pos = ParsePosition::new(0);
        assert!(fmt.parse_unresolved("14", &mut pos).unwrap().is_none());
        assert_eq!(pos.error_index(), Some(0));
    }

    #[test]
    fn chronology() {
        let fmt = FormatterBuilder::new()
            .append_chronology_id()
            .append_literal_char(' ')
            .append_chronology_text(TextStyle::Full)
            .build()
            .unwrap();
        let thai = fmt.clone().with_chronology(THAI_BUDDHIST);
        assert_eq!(
            thai.format(date(2024, 7, 14)).unwrap(),
            "ThaiBuddhist Buddhist Calendar",
        );
        assert_eq!(fmt.format(date(2024, 7, 14)).unwrap(), "ISO ISO");
        insta::assert_snapshot!(fmt, @"ChronologyId()' 'ChronologyText(Full)");

        let fmt = FormatterBuilder::new()
            .parse_case_insensitive()
            .append_chronology_id()
            .build()
            .unwrap();
        let mut pos = ParsePosition::new(0);
        let parsed =
            fmt.parse_unresolved("thaibuddhist", &mut pos).unwrap().unwrap();
        assert_eq!(parsed.chronology().map(|c| c.id()), Some("ThaiBuddhist"));
        assert_eq!(pos.index(), 12);
    }
}
