use crate::{error, field::Field, util::escape};

/// Errors that occur while formatting a value.
#[derive(Clone, Debug)]
pub(crate) enum Error {
    ExceedsWidth { field: Field, value: i64, max: usize },
    ExceedsPad { len: usize, width: usize },
    MissingChronology,
    MissingField { field: Field },
    MissingZone,
    Negative { field: Field, value: i64 },
    NoLocalizedPattern { locale: Box<str> },
    OverrideChronology { id: &'static str },
    OverrideZone { zone: Box<str> },
    Write,
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
        error::ErrorKind::Format(err).into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            ExceedsWidth { field, value, max } => write!(
                f,
                "field `{field}` cannot be printed as the value {value} \
                 exceeds the maximum print width of {max}",
            ),
            ExceedsPad { len, width } => write!(
                f,
                "cannot print as output of {len} characters \
                 exceeds pad width of {width}",
            ),
            MissingChronology => {
                f.write_str("unable to obtain chronology from value")
            }
            MissingField { field } => {
                write!(f, "unable to obtain value for field `{field}`")
            }
            MissingZone => {
                f.write_str("unable to obtain time zone from value")
            }
            Negative { field, value } => write!(
                f,
                "field `{field}` cannot be printed as the value {value} \
                 cannot be negative according to the sign style",
            ),
            NoLocalizedPattern { ref locale } => write!(
                f,
                "no localized pattern available for locale `{locale}`",
                locale = escape::Str(locale),
            ),
            OverrideChronology { id } => write!(
                f,
                "unable to apply override chronology `{id}` because the \
                 value being formatted contains date fields but does not \
                 represent a whole date",
            ),
            OverrideZone { ref zone } => write!(
                f,
                "unable to apply override zone `{zone}` because the value \
                 being formatted has a different offset but does not \
                 represent an instant",
                zone = escape::Str(zone),
            ),
            Write => f.write_str("failed to write formatted output"),
        }
    }
}
