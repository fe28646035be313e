use jiff::civil::{Date, Time};

use crate::{error, field::Field};

/// Errors that occur while resolving parsed fields into a value.
#[derive(Clone, Debug)]
pub(crate) enum Error {
    Conflict { field: Field, old: i64, new: i64 },
    CrossCheck { field: Field, parsed: i64, derived: i64 },
    DateConflict { first: Date, second: Date },
    ExcessDaysConflict { first: i64, second: i64 },
    IncorrectResolve,
    InvalidEra { era: i64 },
    Missing { what: &'static str },
    RequiresIso { field: Field },
    StrictDifferentMonth,
    StrictDifferentWeekBasedYear,
    StrictDifferentYear,
    TimeConflict { first: Time, second: Time },
}

impl Error {
    /// Returns true for errors where two values compete for one field, or
    /// where two fields resolve to different values.
    pub(crate) fn is_conflict(&self) -> bool {
        matches!(
            *self,
            Error::Conflict { .. }
                | Error::CrossCheck { .. }
                | Error::DateConflict { .. }
                | Error::ExcessDaysConflict { .. }
                | Error::TimeConflict { .. }
        )
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
        error::ErrorKind::Resolve(err).into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            Conflict { field, old, new } => write!(
                f,
                "conflict found: field {field} has value {old} \
                 which differs from derived value {new}",
            ),
            CrossCheck { field, parsed, derived } => write!(
                f,
                "conflict found: field {field} has parsed value {parsed} \
                 which differs from value {derived} of the resolved result",
            ),
            DateConflict { first, second } => write!(
                f,
                "conflict found: fields resolved to two different dates: \
                 {first} and {second}",
            ),
            ExcessDaysConflict { first, second } => write!(
                f,
                "conflict found: fields resolved to different excess days: \
                 {first} and {second}",
            ),
            IncorrectResolve => f.write_str(
                "one of the parsed fields has an incorrectly \
                 implemented resolve method",
            ),
            InvalidEra { era } => write!(f, "invalid value for era: {era}"),
            Missing { what } => {
                write!(f, "unable to obtain {what} from parsed value")
            }
            RequiresIso { field } => write!(
                f,
                "resolving field {field} requires the ISO chronology",
            ),
            StrictDifferentMonth => f.write_str(
                "strict mode rejected resolved date \
                 as it is in a different month",
            ),
            StrictDifferentWeekBasedYear => f.write_str(
                "strict mode rejected resolved date \
                 as it is in a different week based year",
            ),
            StrictDifferentYear => f.write_str(
                "strict mode rejected resolved date \
                 as it is in a different year",
            ),
            TimeConflict { first, second } => write!(
                f,
                "conflict found: fields resolved to two different times: \
                 {first} and {second}",
            ),
        }
    }
}
