/*!
A minimal locale identifier.

A [`Locale`] is a language subtag with an optional region subtag, like `en`
or `en-US`. It selects the text tables and localized patterns of a
[`TextProvider`](crate::TextProvider) and the [`WeekDef`] used by the
locale dependent week fields.
*/

use crate::{error::Error, field::WeekDef, util::escape};

/// A language and an optional region.
///
/// Locales are parsed from and printed as BCP 47 style tags with at most
/// two subtags. Underscores are accepted as separators when parsing. The
/// language is normalized to lowercase and the region to uppercase.
///
/// # Example
///
/// ```
/// use jiff::civil::Weekday;
/// use jiff_pattern::Locale;
///
/// let locale: Locale = "en_us".parse()?;
/// assert_eq!(locale.to_string(), "en-US");
/// assert_eq!(locale.language(), "en");
/// assert_eq!(locale.region(), Some("US"));
/// assert_eq!(locale.week_def().first_day_of_week(), Weekday::Sunday);
///
/// let locale: Locale = "de-DE".parse()?;
/// assert_eq!(locale.week_def().first_day_of_week(), Weekday::Monday);
/// assert_eq!(locale.week_def().minimal_days(), 4);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Locale {
    language: Box<str>,
    region: Option<Box<str>>,
}

impl Locale {
    /// Creates a locale from a language and an optional region subtag.
    ///
    /// The language must be 2 or 3 ASCII letters. The region must be 2
    /// ASCII letters or 3 ASCII digits.
    pub fn new(language: &str, region: Option<&str>) -> Result<Locale, Error> {
        let valid_language = (2..=3).contains(&language.len())
            && language.bytes().all(|b| b.is_ascii_alphabetic());
        if !valid_language {
            return Err(Error::from_args(format_args!(
                "invalid language subtag `{}`",
                escape::Str(language),
            )));
        }
        let region = match region {
            None => None,
            Some(region) => {
                let valid_region = (region.len() == 2
                    && region.bytes().all(|b| b.is_ascii_alphabetic()))
                    || (region.len() == 3
                        && region.bytes().all(|b| b.is_ascii_digit()));
                if !valid_region {
                    return Err(Error::from_args(format_args!(
                        "invalid region subtag `{}`",
                        escape::Str(region),
                    )));
                }
                Some(region.to_ascii_uppercase().into_boxed_str())
            }
        };
        Ok(Locale {
            language: language.to_ascii_lowercase().into_boxed_str(),
            region,
        })
    }

    /// English as used in the United States. This is the default locale.
    pub fn english_us() -> Locale {
        Locale { language: "en".into(), region: Some("US".into()) }
    }

    /// Returns the language subtag, in lowercase.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the region subtag, in uppercase, if present.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Returns the definition of a week in this locale.
    ///
    /// This is derived from the region. Locales without a region use the
    /// region most commonly associated with their language, and fall back to
    /// weeks that start on Monday with a 1 day minimum.
    pub fn week_def(&self) -> WeekDef {
        let region = match self.region() {
            Some(region) => region,
            None => match self.language() {
                "en" => "US",
                "de" | "fr" | "it" | "es" | "nl" | "sv" | "da" | "fi"
                | "nb" | "nn" | "pl" | "pt" => "DE",
                _ => "001",
            },
        };
        week_def_for_region(region)
    }
}

impl Default for Locale {
    fn default() -> Locale {
        Locale::english_us()
    }
}

impl core::fmt::Display for Locale {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.language)?;
        if let Some(ref region) = self.region {
            write!(f, "-{region}")?;
        }
        Ok(())
    }
}

impl core::str::FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Locale, Error> {
        let mut parts = s.split(|c| c == '-' || c == '_');
        let language = parts.next().unwrap_or("");
        let region = parts.next();
        if parts.next().is_some() {
            return Err(Error::from_args(format_args!(
                "locale `{}` has more than two subtags",
                escape::Str(s),
            )));
        }
        Locale::new(language, region)
    }
}

/// Regions whose weeks start on Sunday, with a 1 day minimum.
static SUNDAY_REGIONS: &[&str] = &[
    "AG", "AS", "BR", "BS", "BT", "BW", "BZ", "CA", "CN", "CO", "DM", "DO",
    "GT", "GU", "HK", "HN", "IL", "IN", "JM", "JP", "KE", "KH", "KR", "MO",
    "MX", "NI", "PA", "PE", "PH", "PK", "PR", "PT", "PY", "SA", "SG", "SV",
    "TH", "TT", "TW", "UM", "US", "VE", "VI", "WS", "ZA", "ZW",
];

/// Regions whose weeks start on Saturday, with a 1 day minimum.
static SATURDAY_REGIONS: &[&str] =
    &["AE", "AF", "BH", "DJ", "DZ", "EG", "IQ", "IR", "JO", "KW", "LY", "OM",
      "QA", "SD", "SY"];

/// Regions using the ISO-8601 week definition.
static ISO_REGIONS: &[&str] = &[
    "AD", "AN", "AT", "AX", "BE", "BG", "CH", "CZ", "DE", "DK", "EE", "ES",
    "FI", "FJ", "FO", "FR", "GB", "GF", "GG", "GI", "GP", "GR", "HU", "IE",
    "IM", "IS", "IT", "JE", "LI", "LT", "LU", "MC", "MQ", "NL", "NO", "PL",
    "RE", "RU", "SE", "SJ", "SK", "SM", "VA",
];

fn week_def_for_region(region: &str) -> WeekDef {
    if ISO_REGIONS.contains(&region) {
        WeekDef::ISO
    } else if SUNDAY_REGIONS.contains(&region) {
        WeekDef::SUNDAY_START
    } else if SATURDAY_REGIONS.contains(&region) {
        WeekDef::SATURDAY_START
    } else {
        WeekDef::MONDAY_START
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Locale {
    #[inline]
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Locale {
    #[inline]
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Locale, D::Error> {
        use serde::de;

        struct LocaleVisitor;

        impl<'de> de::Visitor<'de> for LocaleVisitor {
            type Value = Locale;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str("a locale tag string like `en-US`")
            }

            #[inline]
            fn visit_str<E: de::Error>(
                self,
                value: &str,
            ) -> Result<Locale, E> {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(LocaleVisitor)
    }
}
