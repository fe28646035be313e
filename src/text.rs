/*!
Locale dependent text.

A [`TextProvider`] supplies the text for field values (month names, weekday
names, eras and so on), localized date and time patterns, time zone display
names and chronology names. [`EnglishText`] is the provider used by default.

Parsing text needs the reverse mapping, from text to value, ordered so that
the longest candidate is tried first. Building those tables isn't free, so
they're cached for the lifetime of the process.
*/

use std::{borrow::Cow, sync::Arc};

use once_cell::sync::Lazy;

use crate::{
    chrono::{self, Chronology},
    field::Field,
    locale::Locale,
    style::{FormatStyle, TextStyle},
    util::cache::Cache,
};

/// Which flavor of a time zone's display name to use.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ZoneNameKind {
    /// The name used while standard time is in effect, for example,
    /// `Eastern Standard Time`.
    Standard,
    /// The name used while daylight saving time is in effect, for example,
    /// `Eastern Daylight Time`.
    Daylight,
    /// The name used when it isn't known which of the two is in effect, for
    /// example, `Eastern Time`.
    Generic,
}

/// A source of localized text.
///
/// Only [`name`](TextProvider::name), [`text`](TextProvider::text) and
/// [`texts`](TextProvider::texts) are required. The other methods default
/// to having no text at all, in which case formatting falls back to
/// numbers, patterns or identifiers where possible.
///
/// The reverse tables used for parsing are built from `texts` and cached
/// by the provider's name, field, style, chronology and locale. So the
/// results of `texts` must be a pure function of its arguments.
///
/// # Example
///
/// A provider that prints months as Roman numerals and defers to English
/// for everything else:
///
/// ```
/// use std::borrow::Cow;
///
/// use jiff::civil::date;
/// use jiff_pattern::{
///     Chronology, EnglishText, Field, Formatter, Locale, TextProvider,
///     TextStyle,
/// };
///
/// #[derive(Debug)]
/// struct Roman;
///
/// const NUMERALS: [&str; 12] = [
///     "I", "II", "III", "IV", "V", "VI",
///     "VII", "VIII", "IX", "X", "XI", "XII",
/// ];
///
/// impl TextProvider for Roman {
///     fn name(&self) -> &'static str { "roman" }
///
///     fn text(
///         &self,
///         field: Field,
///         value: i64,
///         style: TextStyle,
///         chrono: &dyn Chronology,
///         locale: &Locale,
///     ) -> Option<Cow<'static, str>> {
///         if field != Field::MonthOfYear {
///             return EnglishText.text(field, value, style, chrono, locale);
///         }
///         let index = usize::try_from(value.checked_sub(1)?).ok()?;
///         NUMERALS.get(index).map(|&s| Cow::Borrowed(s))
///     }
///
///     fn texts(
///         &self,
///         field: Field,
///         style: TextStyle,
///         chrono: &dyn Chronology,
///         locale: &Locale,
///     ) -> Vec<(Cow<'static, str>, i64)> {
///         if field != Field::MonthOfYear {
///             return EnglishText.texts(field, style, chrono, locale);
///         }
///         (1..=12)
///             .zip(NUMERALS)
///             .map(|(v, s)| (Cow::Borrowed(s), v))
///             .collect()
///     }
/// }
///
/// let fmt = Formatter::of_pattern("d MMMM uuuu")?.with_text_provider(Roman);
/// assert_eq!(fmt.format(date(2024, 7, 14))?, "14 VII 2024");
/// assert_eq!(fmt.parse("14 VII 2024")?.to_date()?, date(2024, 7, 14));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait TextProvider: core::fmt::Debug + Send + Sync + 'static {
    /// A name that uniquely identifies this provider's text tables.
    fn name(&self) -> &'static str;

    /// Returns the text for a field value in the given style.
    fn text(
        &self,
        field: Field,
        value: i64,
        style: TextStyle,
        chrono: &dyn Chronology,
        locale: &Locale,
    ) -> Option<Cow<'static, str>>;

    /// Returns every `(text, value)` pair of a field in the given style.
    fn texts(
        &self,
        field: Field,
        style: TextStyle,
        chrono: &dyn Chronology,
        locale: &Locale,
    ) -> Vec<(Cow<'static, str>, i64)>;

    /// Returns the pattern for a localized date, time or datetime format.
    ///
    /// At least one of `date` and `time` is always present.
    fn localized_pattern(
        &self,
        date: Option<FormatStyle>,
        time: Option<FormatStyle>,
        chrono: &dyn Chronology,
        locale: &Locale,
    ) -> Option<Cow<'static, str>> {
        let _ = (date, time, chrono, locale);
        None
    }

    /// Returns the display name of a time zone.
    ///
    /// `style` is always either [`TextStyle::Full`] or
    /// [`TextStyle::Short`].
    fn zone_name(
        &self,
        zone: &str,
        kind: ZoneNameKind,
        style: TextStyle,
        locale: &Locale,
    ) -> Option<Cow<'static, str>> {
        let _ = (zone, kind, style, locale);
        None
    }

    /// Returns every `(display name, zone id)` pair known for parsing.
    fn zone_names(
        &self,
        locale: &Locale,
    ) -> Vec<(Cow<'static, str>, Cow<'static, str>)> {
        let _ = locale;
        vec![]
    }

    /// Returns the display name of a chronology.
    fn chronology_name(
        &self,
        chrono: &dyn Chronology,
        locale: &Locale,
    ) -> Option<Cow<'static, str>> {
        let _ = (chrono, locale);
        None
    }
}

/// English text.
///
/// This provides month, weekday, quarter, AM/PM and era names, localized
/// patterns for the United States (and for the United Kingdom when the
/// locale's region is `GB`), and display names for a handful of common time
/// zones. The locale is otherwise ignored.
///
/// # Example
///
/// ```
/// use jiff::civil::date;
/// use jiff_pattern::{FormatStyle, Formatter};
///
/// let fmt = Formatter::of_localized_date(FormatStyle::Full);
/// assert_eq!(fmt.format(date(2024, 7, 14))?, "Sunday, July 14, 2024");
///
/// let fmt = Formatter::of_localized_date(FormatStyle::Short)
///     .with_locale("en-GB".parse()?);
/// assert_eq!(fmt.format(date(2024, 7, 14))?, "14/07/2024");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct EnglishText;

static MONTHS_FULL: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
static MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct",
    "Nov", "Dec",
];
static MONTHS_NARROW: [&str; 12] =
    ["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"];
static WEEKDAYS_FULL: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];
static WEEKDAYS_SHORT: [&str; 7] =
    ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
static WEEKDAYS_NARROW: [&str; 7] = ["M", "T", "W", "T", "F", "S", "S"];
static QUARTERS_FULL: [&str; 4] =
    ["1st quarter", "2nd quarter", "3rd quarter", "4th quarter"];
static QUARTERS_SHORT: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];
static QUARTERS_NARROW: [&str; 4] = ["1", "2", "3", "4"];
static AMPM: [&str; 2] = ["AM", "PM"];
static AMPM_NARROW: [&str; 2] = ["a", "p"];
static ERAS_ISO_FULL: [&str; 2] = ["Before Christ", "Anno Domini"];
static ERAS_ISO_SHORT: [&str; 2] = ["BC", "AD"];
static ERAS_ISO_NARROW: [&str; 2] = ["B", "A"];
static ERAS_THAI_FULL: [&str; 2] = ["Before Buddhist Era", "Buddhist Era"];
static ERAS_THAI_SHORT: [&str; 2] = ["BC", "BE"];
static ERAS_THAI_NARROW: [&str; 2] = ["B", "E"];

/// Zone id, full standard, full daylight, full generic, short standard,
/// short daylight, short generic.
static ZONE_NAMES: &[[&str; 7]] = &[
    [
        "America/New_York",
        "Eastern Standard Time",
        "Eastern Daylight Time",
        "Eastern Time",
        "EST",
        "EDT",
        "ET",
    ],
    [
        "America/Chicago",
        "Central Standard Time",
        "Central Daylight Time",
        "Central Time",
        "CST",
        "CDT",
        "CT",
    ],
    [
        "America/Denver",
        "Mountain Standard Time",
        "Mountain Daylight Time",
        "Mountain Time",
        "MST",
        "MDT",
        "MT",
    ],
    [
        "America/Los_Angeles",
        "Pacific Standard Time",
        "Pacific Daylight Time",
        "Pacific Time",
        "PST",
        "PDT",
        "PT",
    ],
    [
        "America/Anchorage",
        "Alaska Standard Time",
        "Alaska Daylight Time",
        "Alaska Time",
        "AKST",
        "AKDT",
        "AKT",
    ],
    [
        "Pacific/Honolulu",
        "Hawaii-Aleutian Standard Time",
        "Hawaii-Aleutian Daylight Time",
        "Hawaii-Aleutian Time",
        "HST",
        "HDT",
        "HT",
    ],
    [
        "Europe/London",
        "Greenwich Mean Time",
        "British Summer Time",
        "British Time",
        "GMT",
        "BST",
        "BT",
    ],
    [
        "Europe/Berlin",
        "Central European Standard Time",
        "Central European Summer Time",
        "Central European Time",
        "CET",
        "CEST",
        "CET",
    ],
    [
        "Europe/Paris",
        "Central European Standard Time",
        "Central European Summer Time",
        "Central European Time",
        "CET",
        "CEST",
        "CET",
    ],
    [
        "Asia/Tokyo",
        "Japan Standard Time",
        "Japan Daylight Time",
        "Japan Time",
        "JST",
        "JDT",
        "JT",
    ],
    [
        "Asia/Kolkata",
        "India Standard Time",
        "India Daylight Time",
        "India Time",
        "IST",
        "IDT",
        "IT",
    ],
    [
        "Australia/Sydney",
        "Australian Eastern Standard Time",
        "Australian Eastern Daylight Time",
        "Eastern Australia Time",
        "AEST",
        "AEDT",
        "AET",
    ],
    [
        "UTC",
        "Coordinated Universal Time",
        "Coordinated Universal Time",
        "Coordinated Universal Time",
        "UTC",
        "UTC",
        "UTC",
    ],
];

impl EnglishText {
    fn table(
        &self,
        field: Field,
        style: TextStyle,
        chrono: &dyn Chronology,
    ) -> Option<(&'static [&'static str], i64)> {
        let style = style.as_normal();
        let thai = chrono::same(chrono, chrono::THAI_BUDDHIST);
        let table: &'static [&'static str] = match (field, style) {
            (Field::MonthOfYear, TextStyle::Full) => &MONTHS_FULL,
            (Field::MonthOfYear, TextStyle::Short) => &MONTHS_SHORT,
            (Field::MonthOfYear, _) => &MONTHS_NARROW,
            (Field::DayOfWeek, TextStyle::Full) => &WEEKDAYS_FULL,
            (Field::DayOfWeek, TextStyle::Short) => &WEEKDAYS_SHORT,
            (Field::DayOfWeek, _) => &WEEKDAYS_NARROW,
            (Field::QuarterOfYear, TextStyle::Full) => &QUARTERS_FULL,
            (Field::QuarterOfYear, TextStyle::Short) => &QUARTERS_SHORT,
            (Field::QuarterOfYear, _) => &QUARTERS_NARROW,
            (Field::AmPmOfDay, TextStyle::Narrow) => &AMPM_NARROW,
            (Field::AmPmOfDay, _) => &AMPM,
            (Field::Era, TextStyle::Full) if thai => &ERAS_THAI_FULL,
            (Field::Era, TextStyle::Short) if thai => &ERAS_THAI_SHORT,
            (Field::Era, _) if thai => &ERAS_THAI_NARROW,
            (Field::Era, TextStyle::Full) => &ERAS_ISO_FULL,
            (Field::Era, TextStyle::Short) => &ERAS_ISO_SHORT,
            (Field::Era, _) => &ERAS_ISO_NARROW,
            _ => return None,
        };
        let first = match field {
            Field::AmPmOfDay | Field::Era => 0,
            _ => 1,
        };
        Some((table, first))
    }

    fn is_gb(locale: &Locale) -> bool {
        locale.region() == Some("GB")
    }
}

impl TextProvider for EnglishText {
    fn name(&self) -> &'static str {
        "english"
    }

    fn text(
        &self,
        field: Field,
        value: i64,
        style: TextStyle,
        chrono: &dyn Chronology,
        _locale: &Locale,
    ) -> Option<Cow<'static, str>> {
        let (table, first) = self.table(field, style, chrono)?;
        let index = usize::try_from(value.checked_sub(first)?).ok()?;
        table.get(index).map(|&text| Cow::Borrowed(text))
    }

    fn texts(
        &self,
        field: Field,
        style: TextStyle,
        chrono: &dyn Chronology,
        _locale: &Locale,
    ) -> Vec<(Cow<'static, str>, i64)> {
        let Some((table, first)) = self.table(field, style, chrono) else {
            return vec![];
        };
        table
            .iter()
            .zip(first..)
            .map(|(&text, value)| (Cow::Borrowed(text), value))
            .collect()
    }

    fn localized_pattern(
        &self,
        date: Option<FormatStyle>,
        time: Option<FormatStyle>,
        _chrono: &dyn Chronology,
        locale: &Locale,
    ) -> Option<Cow<'static, str>> {
        let gb = EnglishText::is_gb(locale);
        let date_pattern = date.map(|style| match (style, gb) {
            (FormatStyle::Full, false) => "EEEE, MMMM d, y",
            (FormatStyle::Long, false) => "MMMM d, y",
            (FormatStyle::Medium, false) => "MMM d, y",
            (FormatStyle::Short, false) => "M/d/yy",
            (FormatStyle::Full, true) => "EEEE, d MMMM y",
            (FormatStyle::Long, true) => "d MMMM y",
            (FormatStyle::Medium, true) => "d MMM y",
            (FormatStyle::Short, true) => "dd/MM/y",
        });
        let time_pattern = time.map(|style| match (style, gb) {
            (FormatStyle::Full, false) => "h:mm:ss a zzzz",
            (FormatStyle::Long, false) => "h:mm:ss a z",
            (FormatStyle::Medium, false) => "h:mm:ss a",
            (FormatStyle::Short, false) => "h:mm a",
            (FormatStyle::Full, true) => "HH:mm:ss zzzz",
            (FormatStyle::Long, true) => "HH:mm:ss z",
            (FormatStyle::Medium, true) => "HH:mm:ss",
            (FormatStyle::Short, true) => "HH:mm",
        });
        match (date, date_pattern, time_pattern) {
            (_, Some(d), None) => Some(Cow::Borrowed(d)),
            (_, None, Some(t)) => Some(Cow::Borrowed(t)),
            (
                Some(FormatStyle::Full | FormatStyle::Long),
                Some(d),
                Some(t),
            ) => Some(Cow::Owned(format!("{d} 'at' {t}"))),
            (_, Some(d), Some(t)) => Some(Cow::Owned(format!("{d}, {t}"))),
            (_, None, None) => None,
        }
    }

    fn zone_name(
        &self,
        zone: &str,
        kind: ZoneNameKind,
        style: TextStyle,
        _locale: &Locale,
    ) -> Option<Cow<'static, str>> {
        let names = ZONE_NAMES.iter().find(|names| names[0] == zone)?;
        let index = match kind {
            ZoneNameKind::Standard => 1,
            ZoneNameKind::Daylight => 2,
            ZoneNameKind::Generic => 3,
        };
        let index = if style.as_normal() == TextStyle::Full {
            index
        } else {
            index + 3
        };
        Some(Cow::Borrowed(names[index]))
    }

    fn zone_names(
        &self,
        _locale: &Locale,
    ) -> Vec<(Cow<'static, str>, Cow<'static, str>)> {
        ZONE_NAMES
            .iter()
            .flat_map(|names| {
                names[1..]
                    .iter()
                    .map(|&name| {
                        (Cow::Borrowed(name), Cow::Borrowed(names[0]))
                    })
            })
            .collect()
    }

    fn chronology_name(
        &self,
        chrono: &dyn Chronology,
        _locale: &Locale,
    ) -> Option<Cow<'static, str>> {
        if chrono::same(chrono, chrono::ISO) {
            Some(Cow::Borrowed("ISO"))
        } else if chrono::same(chrono, chrono::THAI_BUDDHIST) {
            Some(Cow::Borrowed("Buddhist Calendar"))
        } else {
            None
        }
    }
}

/// A table mapping text to values, longest text first.
pub(crate) type TextTable = Arc<[(Box<str>, i64)]>;

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
struct TableKey {
    provider: &'static str,
    field: Field,
    style: Option<TextStyle>,
    chrono: &'static str,
    locale: Locale,
}

static TABLES: Lazy<Cache<TableKey, TextTable>> = Lazy::new(Cache::new);

/// Returns the parse table for a field in a style, or in all styles when
/// `style` is `None`.
///
/// A style in which two values share the same text can't be parsed, and so
/// contributes nothing to the table.
pub(crate) fn parse_table(
    provider: &dyn TextProvider,
    field: Field,
    style: Option<TextStyle>,
    chrono: &dyn Chronology,
    locale: &Locale,
) -> TextTable {
    let key = TableKey {
        provider: provider.name(),
        field,
        style,
        chrono: chrono.id(),
        locale: locale.clone(),
    };
    TABLES.get_or_insert_with(key, |_| {
        trace!(
            "building text table for {field} in style {style:?} \
             (provider: {provider}, chronology: {chrono}, locale: {locale})",
            provider = provider.name(),
            chrono = chrono.id(),
        );
        let styles: &[TextStyle] = match style {
            Some(ref style) => core::slice::from_ref(style),
            None => &TextStyle::ALL,
        };
        let mut all = vec![];
        for &style in styles {
            let texts = provider.texts(field, style, chrono, locale);
            match unambiguous(texts) {
                Some(texts) => all.extend(texts),
                None => {
                    debug!("{field} text in style {style:?} is ambiguous");
                }
            }
        }
        sorted(all)
    })
}

/// Builds a parse table from a custom value to text mapping.
///
/// This returns an empty table if two values share the same text.
pub(crate) fn custom_table(texts: &[(i64, Box<str>)]) -> TextTable {
    let texts = texts
        .iter()
        .map(|&(value, ref text)| (Cow::Owned(text.to_string()), value))
        .collect();
    sorted(unambiguous(texts).unwrap_or_default())
}

fn unambiguous(
    texts: Vec<(Cow<'static, str>, i64)>,
) -> Option<Vec<(Box<str>, i64)>> {
    let mut seen: Vec<(Box<str>, i64)> = Vec::with_capacity(texts.len());
    for (text, value) in texts {
        if let Some(&(_, other)) = seen.iter().find(|(t, _)| **t == *text) {
            if other != value {
                return None;
            }
            continue;
        }
        seen.push((text.into_owned().into_boxed_str(), value));
    }
    Some(seen)
}

fn sorted(mut texts: Vec<(Box<str>, i64)>) -> TextTable {
    texts.sort_by(|(t1, v1), (t2, v2)| {
        t2.chars()
            .count()
            .cmp(&t1.chars().count())
            .then_with(|| t1.cmp(t2))
            .then_with(|| v1.cmp(v2))
    });
    texts.dedup();
    Arc::from(texts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english() {
        let en = Locale::english_us();
        let text = |field, value, style| {
            EnglishText.text(field, value, style, chrono::ISO, &en)
        };
        let got = text(Field::MonthOfYear, 7, TextStyle::Full).unwrap();
        assert_eq!(got, "July");
        let got = text(Field::DayOfWeek, 7, TextStyle::Short).unwrap();
        assert_eq!(got, "Sun");
        assert_eq!(text(Field::Era, 1, TextStyle::Short).unwrap(), "AD");
        assert_eq!(text(Field::AmPmOfDay, 1, TextStyle::Narrow).unwrap(), "p");
        assert_eq!(text(Field::MonthOfYear, 13, TextStyle::Full), None);
        assert_eq!(text(Field::MonthOfYear, 0, TextStyle::Full), None);
        assert_eq!(text(Field::HourOfDay, 1, TextStyle::Full), None);

        let era = EnglishText.text(
            Field::Era,
            1,
            TextStyle::Short,
            chrono::THAI_BUDDHIST,
            &en,
        );
        assert_eq!(era.unwrap(), "BE");
    }

    #[test]
    fn tables() {
        let en = Locale::english_us();
        let table = parse_table(
            &EnglishText,
            Field::MonthOfYear,
            Some(TextStyle::Short),
            chrono::ISO,
            &en,
        );
        assert_eq!(table.len(), 12);
        assert!(table.iter().all(|(text, _)| text.len() == 3));

        // Narrow month names are ambiguous.
        let table = parse_table(
            &EnglishText,
            Field::MonthOfYear,
            Some(TextStyle::Narrow),
            chrono::ISO,
            &en,
        );
        assert!(table.is_empty());

        let table = parse_table(
            &EnglishText,
            Field::MonthOfYear,
            None,
            chrono::ISO,
            &en,
        );
        assert_eq!(&*table[0].0, "September");
        assert_eq!(table[0].1, 9);
        // "May" is both full and short, but it's only listed once.
        let mays = table.iter().filter(|(text, _)| &**text == "May").count();
        assert_eq!(mays, 1);
    }

    #[test]
    fn custom() {
        let table = custom_table(&[(1, "one".into()), (11, "eleven".into())]);
        assert_eq!(&*table[0].0, "eleven");
        let table = custom_table(&[(1, "x".into()), (2, "x".into())]);
        assert!(table.is_empty());
    }

    #[test]
    fn localized_patterns() {
        let en = Locale::english_us();
        let pattern = |date, time| {
            EnglishText
                .localized_pattern(date, time, chrono::ISO, &en)
                .unwrap()
                .into_owned()
        };
        insta::assert_snapshot!(
            pattern(Some(FormatStyle::Long), Some(FormatStyle::Short)),
            @"MMMM d, y 'at' h:mm a",
        );
        insta::assert_snapshot!(
            pattern(Some(FormatStyle::Medium), Some(FormatStyle::Medium)),
            @"MMM d, y, h:mm:ss a",
        );
        insta::assert_snapshot!(
            pattern(None, Some(FormatStyle::Short)),
            @"h:mm a",
        );
    }

    #[test]
    fn zone_names() {
        let en = Locale::english_us();
        let name = EnglishText.zone_name(
            "America/New_York",
            ZoneNameKind::Daylight,
            TextStyle::Short,
            &en,
        );
        assert_eq!(name.unwrap(), "EDT");
        let name = EnglishText.zone_name(
            "Asia/Tokyo",
            ZoneNameKind::Standard,
            TextStyle::Full,
            &en,
        );
        assert_eq!(name.unwrap(), "Japan Standard Time");
        assert!(EnglishText.zone_names(&en).iter().any(|(n, z)| {
            n == "PDT" && z == "America/Los_Angeles"
        }));
    }
}
