/*!
Small configuration types: resolver strictness, sign handling, text width,
localized format lengths and decimal digit symbols.
*/


use crate::error::Error;

/// The policy used to resolve parsed fields into a date and time.
///
/// Parsing happens in two phases. First, text is matched against the pattern
/// to produce raw field values. Second, those values are resolved into a
/// date, time, offset, time zone or instant. This type controls how
/// aggressively the second phase accepts partial or out of range data.
///
/// # Example
///
/// ```
/// use jiff::civil::date;
/// use jiff_pattern::{Formatter, ResolverStyle};
///
/// let fmt = Formatter::of_pattern("uuuu-MM-dd")?;
///
/// // Smart clamps the day to the end of the month.
/// let got = fmt.parse("2023-02-30")?.to_date()?;
/// assert_eq!(got, date(2023, 2, 28));
///
/// // Lenient lets the extra days overflow into March.
/// let got = fmt
///     .clone()
///     .with_resolver_style(ResolverStyle::Lenient)
///     .parse("2023-02-30")?
///     .to_date()?;
/// assert_eq!(got, date(2023, 3, 2));
///
/// // Strict rejects the date outright.
/// let strict = fmt.with_resolver_style(ResolverStyle::Strict);
/// assert!(strict.parse("2023-02-30").is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ResolverStyle {
    /// Every field must be within its valid range and the combination of
    /// fields must form a valid date and time.
    Strict,
    /// Like strict, but with a few sensible exceptions. For example, a day
    /// of month that is too big for the month (but still between 1 and 31)
    /// is clamped, and `24:00` is accepted as the end of the day.
    #[default]
    Smart,
    /// Out of range values overflow into the next larger unit.
    Lenient,
}

impl ResolverStyle {
    fn as_str(&self) -> &'static str {
        match *self {
            ResolverStyle::Strict => "strict",
            ResolverStyle::Smart => "smart",
            ResolverStyle::Lenient => "lenient",
        }
    }
}

/// How the sign of a numeric value is printed and parsed.
///
/// # Example
///
/// ```
/// use jiff::civil::date;
/// use jiff_pattern::{Field, FormatterBuilder, SignStyle};
///
/// let fmt = FormatterBuilder::new()
///     .append_value_range(Field::Year, 2, 10, SignStyle::Always)?
///     .build()?;
/// assert_eq!(fmt.format(date(2024, 1, 1))?, "+2024");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SignStyle {
    /// Never print a sign. The absolute value is printed. In strict
    /// parsing, a sign is rejected.
    Never,
    /// Never print a sign, and fail to format negative values. In strict
    /// parsing, a sign is rejected.
    NotNegative,
    /// Print a sign only for negative values. In strict parsing, a positive
    /// sign is rejected.
    Normal,
    /// Always print a sign.
    Always,
    /// Print a sign only when the value has more digits than the minimum
    /// width, and always for negative values.
    ExceedsPad,
}

impl SignStyle {
    /// Returns true when a sign may be parsed.
    ///
    /// `positive` is whether the sign seen is positive, `strict` whether
    /// parsing is strict and `fixed_width` whether the field is taking part
    /// in adjacent value parsing as a fixed width field.
    pub(crate) fn parse(
        &self,
        positive: bool,
        strict: bool,
        fixed_width: bool,
    ) -> bool {
        match *self {
            SignStyle::Normal => !positive || !strict,
            SignStyle::Always | SignStyle::ExceedsPad => true,
            SignStyle::Never | SignStyle::NotNegative => {
                !strict && !fixed_width
            }
        }
    }

    fn as_str(&self) -> &'static str {
        match *self {
            SignStyle::Never => "never",
            SignStyle::NotNegative => "not-negative",
            SignStyle::Normal => "normal",
            SignStyle::Always => "always",
            SignStyle::ExceedsPad => "exceeds-pad",
        }
    }
}

/// The width of text used for things like month and weekday names.
///
/// "Standalone" variants are for text used on its own rather than as part of
/// a complete date. Some languages use a different grammatical form in that
/// case. In English, the two are the same.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TextStyle {
    /// For example, `January` or `Monday`.
    Full,
    /// Like `Full`, but for text used on its own.
    FullStandalone,
    /// For example, `Jan` or `Mon`.
    Short,
    /// Like `Short`, but for text used on its own.
    ShortStandalone,
    /// For example, `J` or `M`.
    Narrow,
    /// Like `Narrow`, but for text used on its own.
    NarrowStandalone,
}

impl TextStyle {
    /// All styles, in the order they are tried when parsing leniently.
    pub(crate) const ALL: [TextStyle; 6] = [
        TextStyle::Full,
        TextStyle::FullStandalone,
        TextStyle::Short,
        TextStyle::ShortStandalone,
        TextStyle::Narrow,
        TextStyle::NarrowStandalone,
    ];

    /// Returns true if this is a standalone style.
    pub fn is_standalone(&self) -> bool {
        matches!(
            *self,
            TextStyle::FullStandalone
                | TextStyle::ShortStandalone
                | TextStyle::NarrowStandalone
        )
    }

    /// Returns the standalone version of this style.
    pub fn as_standalone(&self) -> TextStyle {
        match *self {
            TextStyle::Full | TextStyle::FullStandalone => {
                TextStyle::FullStandalone
            }
            TextStyle::Short | TextStyle::ShortStandalone => {
                TextStyle::ShortStandalone
            }
            TextStyle::Narrow | TextStyle::NarrowStandalone => {
                TextStyle::NarrowStandalone
            }
        }
    }

    /// Returns the normal (not standalone) version of this style.
    pub fn as_normal(&self) -> TextStyle {
        match *self {
            TextStyle::Full | TextStyle::FullStandalone => TextStyle::Full,
            TextStyle::Short | TextStyle::ShortStandalone => TextStyle::Short,
            TextStyle::Narrow | TextStyle::NarrowStandalone => {
                TextStyle::Narrow
            }
        }
    }

    fn as_str(&self) -> &'static str {
        match *self {
            TextStyle::Full => "full",
            TextStyle::FullStandalone => "full-standalone",
            TextStyle::Short => "short",
            TextStyle::ShortStandalone => "short-standalone",
            TextStyle::Narrow => "narrow",
            TextStyle::NarrowStandalone => "narrow-standalone",
        }
    }
}

/// The length of a localized date or time format.
///
/// See [`Formatter::of_localized_date`](crate::Formatter::of_localized_date).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum FormatStyle {
    /// For example, `Sunday, July 14, 2024`.
    Full,
    /// For example, `July 14, 2024`.
    Long,
    /// For example, `Jul 14, 2024`.
    Medium,
    /// For example, `7/14/24`.
    Short,
}

impl FormatStyle {
    fn as_str(&self) -> &'static str {
        match *self {
            FormatStyle::Full => "full",
            FormatStyle::Long => "long",
            FormatStyle::Medium => "medium",
            FormatStyle::Short => "short",
        }
    }
}

/// The symbols used when formatting and parsing numbers.
///
/// The zero digit determines the other nine digits: they are the nine
/// characters that follow it. For example, a zero digit of `'٠'` (U+0660)
/// selects Arabic-Indic digits.
///
/// # Example
///
/// ```
/// use jiff::civil::date;
/// use jiff_pattern::{DecimalStyle, Formatter};
///
/// let style = DecimalStyle::STANDARD.with_zero_digit('٠');
/// let fmt = Formatter::of_pattern("uuuu-MM-dd")?.with_decimal_style(style);
/// assert_eq!(fmt.format(date(2024, 7, 14))?, "٢٠٢٤-٠٧-١٤");
/// assert_eq!(fmt.parse("٢٠٢٤-٠٧-١٤")?.to_date()?, date(2024, 7, 14));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DecimalStyle {
    zero: char,
    positive: char,
    negative: char,
    decimal: char,
}

impl DecimalStyle {
    /// ASCII digits, `+`, `-` and `.`.
    pub const STANDARD: DecimalStyle =
        DecimalStyle { zero: '0', positive: '+', negative: '-', decimal: '.' };

    /// Returns the character that represents zero.
    pub fn zero_digit(&self) -> char {
        self.zero
    }

    /// Returns the character that represents a positive sign.
    pub fn positive_sign(&self) -> char {
        self.positive
    }

    /// Returns the character that represents a negative sign.
    pub fn negative_sign(&self) -> char {
        self.negative
    }

    /// Returns the character that separates the integer and fractional
    /// parts of a number.
    pub fn decimal_separator(&self) -> char {
        self.decimal
    }

    /// Returns a copy of this style with the given zero digit.
    pub fn with_zero_digit(self, zero: char) -> DecimalStyle {
        DecimalStyle { zero, ..self }
    }

    /// Returns a copy of this style with the given positive sign.
    pub fn with_positive_sign(self, positive: char) -> DecimalStyle {
        DecimalStyle { positive, ..self }
    }

    /// Returns a copy of this style with the given negative sign.
    pub fn with_negative_sign(self, negative: char) -> DecimalStyle {
        DecimalStyle { negative, ..self }
    }

    /// Returns a copy of this style with the given decimal separator.
    pub fn with_decimal_separator(self, decimal: char) -> DecimalStyle {
        DecimalStyle { decimal, ..self }
    }

    /// Returns the digit value of `ch`, if it's one of this style's digits.
    pub(crate) fn convert_to_digit(&self, ch: char) -> Option<u8> {
        let value = u32::from(ch).wrapping_sub(u32::from(self.zero));
        if value <= 9 {
            Some(value as u8)
        } else {
            None
        }
    }
}

impl Default for DecimalStyle {
    fn default() -> DecimalStyle {
        DecimalStyle::STANDARD
    }
}

macro_rules! impl_str_enum {
    ($ty:ident, $what:expr, [$($variant:ident),* $(,)?] $(,)?) => {
        impl core::fmt::Display for $ty {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl core::str::FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<$ty, Error> {
                $(
                    if s.eq_ignore_ascii_case($ty::$variant.as_str()) {
                        return Ok($ty::$variant);
                    }
                )*
                Err(Error::from_args(format_args!(
                    "unrecognized {what} `{given}`",
                    what = $what,
                    given = crate::util::escape::Str(s),
                )))
            }
        }
    };
}

impl_str_enum!(ResolverStyle, "resolver style", [Strict, Smart, Lenient]);
impl_str_enum!(
    SignStyle,
    "sign style",
    [Never, NotNegative, Normal, Always, ExceedsPad],
);
impl_str_enum!(
    TextStyle,
    "text style",
    [
        Full,
        FullStandalone,
        Short,
        ShortStandalone,
        Narrow,
        NarrowStandalone,
    ],
);
impl_str_enum!(FormatStyle, "format style", [Full, Long, Medium, Short]);

/// Formats as four characters: zero digit, positive sign, negative sign and
/// decimal separator. For example, `0+-.`.
impl core::fmt::Display for DecimalStyle {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use core::fmt::Write;

        f.write_char(self.zero)?;
        f.write_char(self.positive)?;
        f.write_char(self.negative)?;
        f.write_char(self.decimal)
    }
}

impl core::str::FromStr for DecimalStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<DecimalStyle, Error> {
        let mut chars = s.chars();
        match (
            chars.next(),
            chars.next(),
            chars.next(),
            chars.next(),
            chars.next(),
        ) {
            (
                Some(zero),
                Some(positive),
                Some(negative),
                Some(decimal),
                None,
            ) => Ok(DecimalStyle { zero, positive, negative, decimal }),
            _ => Err(Error::from_args(format_args!(
                "decimal style `{given}` must have exactly four characters \
                 (zero digit, positive sign, negative sign and decimal \
                 separator)",
                given = crate::util::escape::Str(s),
            ))),
        }
    }
}

/// Serializes and deserializes via the `Display` and `FromStr` impls.
macro_rules! impl_serde_str {
    ($ty:ident, $expecting:expr $(,)?) => {
        #[cfg(feature = "serde")]
        impl serde::Serialize for $ty {
            #[inline]
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $ty {
            #[inline]
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<$ty, D::Error> {
                use serde::de;

                struct Visitor;

                impl<'de> de::Visitor<'de> for Visitor {
                    type Value = $ty;

                    fn expecting(
                        &self,
                        f: &mut core::fmt::Formatter,
                    ) -> core::fmt::Result {
                        f.write_str($expecting)
                    }

                    #[inline]
                    fn visit_str<E: de::Error>(
                        self,
                        value: &str,
                    ) -> Result<$ty, E> {
                        value.parse().map_err(de::Error::custom)
                    }
                }

                deserializer.deserialize_str(Visitor)
            }
        }
    };
}

impl_serde_str!(ResolverStyle, "a resolver style like `smart`");
impl_serde_str!(SignStyle, "a sign style like `exceeds-pad`");
impl_serde_str!(TextStyle, "a text style like `short-standalone`");
impl_serde_str!(FormatStyle, "a format style like `medium`");
impl_serde_str!(DecimalStyle, "a four character decimal style like `0+-.`");
