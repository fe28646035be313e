/*!
The result of parsing text with a [`Formatter`](crate::Formatter).

Parsing produces raw field values. Resolution then combines them into a
date, a time of day, an offset, a zone and an instant. Whatever couldn't be
combined, or wasn't needed, stays behind as field values.
*/

use jiff::{
    civil::{Date, DateTime, Time},
    tz::{Offset, TimeZone},
    Timestamp, Zoned,
};

use crate::{
    chrono::Chronology,
    error::{resolve::Error as E, Error},
    field::{Field, FieldValues},
    temporal::Temporal,
    zone::ZoneId,
};

mod resolve;

/// Fields parsed from text, possibly resolved into date and time values.
///
/// A `Parsed` returned by [`Formatter::parse`](crate::Formatter::parse) has
/// been resolved. One returned by
/// [`Formatter::parse_unresolved`](crate::Formatter::parse_unresolved)
/// holds only the raw field values, zone and chronology that were parsed.
///
/// # Example
///
/// ```
/// use jiff::civil::date;
/// use jiff_pattern::{Field, Formatter};
///
/// let fmt = Formatter::of_pattern("uuuu-MM-dd HH:mm VV")?;
/// let parsed = fmt.parse("2024-07-14 17:30 America/New_York")?;
/// assert_eq!(parsed.to_date()?, date(2024, 7, 14));
/// assert_eq!(parsed.get(Field::MinuteOfHour), Some(30));
/// assert_eq!(
///     parsed.to_zoned()?.to_string(),
///     "2024-07-14T17:30:00-04:00[America/New_York]",
/// );
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Parsed {
    pub(crate) fields: FieldValues,
    pub(crate) zone: Option<ZoneId>,
    pub(crate) chrono: Option<&'static dyn Chronology>,
    pub(crate) leap_second: bool,
    pub(crate) date: Option<Date>,
    pub(crate) time: Option<Time>,
    pub(crate) excess_days: i64,
}

impl Parsed {
    pub(crate) fn new() -> Parsed {
        Parsed::default()
    }

    /// Returns the value of a field.
    ///
    /// Values of resolved dates and times are available in addition to
    /// the field values that are left over.
    pub fn get(&self, field: Field) -> Option<i64> {
        Temporal::from(self).get(field)
    }

    /// Returns the field values left over after resolution, or all parsed
    /// field values when unresolved.
    pub fn fields(&self) -> &FieldValues {
        &self.fields
    }

    /// Returns the parsed zone, or the formatter's override zone when none
    /// was parsed.
    pub fn zone(&self) -> Option<&ZoneId> {
        self.zone.as_ref()
    }

    /// Returns the chronology the fields were parsed in.
    pub fn chronology(&self) -> Option<&'static dyn Chronology> {
        self.chrono
    }

    /// Returns the number of days the parsed time of day overflowed into.
    ///
    /// This is non-zero only when a time like `24:00` was parsed without a
    /// date, or when lenient resolution overflowed the time fields. When a
    /// date is present, excess days are added to it instead.
    pub fn excess_days(&self) -> i64 {
        self.excess_days
    }

    /// Returns true when a second of minute of `60` was parsed.
    ///
    /// The leap second is resolved as the second `59`.
    pub fn is_leap_second(&self) -> bool {
        self.leap_second
    }

    /// Returns the resolved date.
    pub fn to_date(&self) -> Result<Date, Error> {
        self.date.ok_or_else(|| E::Missing { what: "date" }.into())
    }

    /// Returns the resolved time of day.
    pub fn to_time(&self) -> Result<Time, Error> {
        self.time.ok_or_else(|| E::Missing { what: "time" }.into())
    }

    /// Returns the resolved date and time of day.
    pub fn to_datetime(&self) -> Result<DateTime, Error> {
        match (self.date, self.time) {
            (Some(date), Some(time)) => Ok(date.to_datetime(time)),
            _ => Err(E::Missing { what: "datetime" }.into()),
        }
    }

    /// Returns the parsed offset.
    ///
    /// This is the offset seconds field, or the zone when it is a plain
    /// offset.
    pub fn to_offset(&self) -> Result<Offset, Error> {
        if let Some(seconds) = self.fields.get(Field::OffsetSeconds) {
            return offset(seconds);
        }
        self.zone
            .as_ref()
            .and_then(|zone| zone.as_offset())
            .ok_or_else(|| E::Missing { what: "offset" }.into())
    }

    /// Returns the instant.
    ///
    /// This is available when a date, a time and an offset or zone were
    /// parsed, or when the instant seconds field was parsed directly.
    pub fn to_timestamp(&self) -> Result<Timestamp, Error> {
        let Some(seconds) = self.fields.get(Field::InstantSeconds) else {
            return Err(E::Missing { what: "instant" }.into());
        };
        let nanos = match self.time {
            Some(time) => time.subsec_nanosecond(),
            None => {
                let nanos = self.fields.get(Field::NanoOfSecond).unwrap_or(0);
                let nanos = Field::NanoOfSecond.check(nanos)?;
                // Checked to be within 0..=999_999_999.
                i32::try_from(nanos).unwrap_or(0)
            }
        };
        Ok(Timestamp::new(seconds, nanos)?)
    }

    /// Returns a zoned datetime.
    ///
    /// This requires a zone or an offset, and either an instant or a date
    /// and time. An ambiguous local datetime is resolved in the same way as
    /// Jiff's `compatible` disambiguation.
    pub fn to_zoned(&self) -> Result<Zoned, Error> {
        let tz = match self.zone {
            Some(ref zone) => zone.time_zone(),
            None => TimeZone::fixed(self.to_offset().map_err(|_| {
                Error::from(E::Missing { what: "time zone" })
            })?),
        };
        if let Ok(ts) = self.to_timestamp() {
            return Ok(ts.to_zoned(tz));
        }
        Ok(self.to_datetime()?.to_zoned(tz)?)
    }
}

/// Converts an offset seconds field value to an offset.
fn offset(seconds: i64) -> Result<Offset, Error> {
    let seconds = Field::OffsetSeconds.check(seconds)?;
    let seconds = i32::try_from(seconds)
        .map_err(|_| Error::range("OffsetSeconds", seconds, -93599, 93599))?;
    Ok(Offset::from_seconds(seconds)?)
}

impl<'a> From<&'a Parsed> for Temporal {
    fn from(parsed: &'a Parsed) -> Temporal {
        let offset = parsed
            .fields
            .get(Field::OffsetSeconds)
            .and_then(|secs| i32::try_from(secs).ok())
            .and_then(|secs| Offset::from_seconds(secs).ok())
            .or_else(|| parsed.zone.as_ref().and_then(|z| z.fixed_offset()));
        Temporal {
            date: parsed.date,
            time: parsed.time,
            offset,
            zone: parsed.zone.clone(),
            timestamp: parsed.to_timestamp().ok(),
            chrono: parsed.chrono,
            fields: parsed.fields.clone(),
        }
    }
}

impl From<Parsed> for Temporal {
    fn from(parsed: Parsed) -> Temporal {
        Temporal::from(&parsed)
    }
}

#[cfg(test)]
mod tests {
    use jiff::{
        civil::{date, time},
        tz,
    };

    use crate::{Field, Formatter, ParsePosition, ResolverStyle};

    #[test]
    fn conversions() {
        let fmt =
            Formatter::of_pattern("uuuu-MM-dd HH:mm:ss.SSS xxx").unwrap();
        let parsed = fmt.parse("2024-07-14 17:30:05.250 -04:00").unwrap();
        let dt = date(2024, 7, 14).at(17, 30, 5, 250_000_000);
        assert_eq!(parsed.to_date().unwrap(), dt.date());
        assert_eq!(parsed.to_time().unwrap(), dt.time());
        assert_eq!(parsed.to_datetime().unwrap(), dt);
        assert_eq!(parsed.to_offset().unwrap(), tz::offset(-4));
        assert_eq!(
            parsed.to_timestamp().unwrap().to_string(),
            "2024-07-14T21:30:05.25Z",
        );
        assert_eq!(
            parsed.to_zoned().unwrap().to_string(),
            "2024-07-14T17:30:05.25-04:00[-04:00]",
        );
        assert_eq!(parsed.get(Field::DayOfWeek), Some(7));
        assert_eq!(parsed.get(Field::OffsetSeconds), Some(-4 * 3600));
        assert_eq!(parsed.get(Field::InstantSeconds), Some(1720992605));
        assert!(!parsed.is_leap_second());
        assert_eq!(parsed.excess_days(), 0);
    }

    #[test]
    fn missing() {
        let fmt = Formatter::of_pattern("HH:mm").unwrap();
        let parsed = fmt.parse("17:30").unwrap();
        assert_eq!(parsed.to_time().unwrap(), time(17, 30, 0, 0));
        insta::assert_snapshot!(
            parsed.to_date().unwrap_err(),
            @"unable to obtain date from parsed value",
        );
        insta::assert_snapshot!(
            parsed.to_zoned().unwrap_err(),
            @"unable to obtain time zone from parsed value",
        );
        assert!(parsed.to_timestamp().is_err());
    }

    #[test]
    fn unresolved() {
        let fmt = Formatter::of_pattern("uuuu-MM-dd").unwrap();
        let mut pos = ParsePosition::new(0);
        let parsed =
            fmt.parse_unresolved("2024-13-45", &mut pos).unwrap().unwrap();
        assert_eq!(parsed.get(Field::MonthOfYear), Some(13));
        assert_eq!(parsed.get(Field::DayOfMonth), Some(45));
        assert!(parsed.to_date().is_err());
        assert_eq!(parsed.fields().len(), 3);
        assert_eq!(pos.index(), 10);

        let fmt = fmt.with_resolver_style(ResolverStyle::Lenient);
        let parsed = fmt.parse("2024-13-45").unwrap();
        assert_eq!(parsed.to_date().unwrap(), date(2025, 2, 14));
    }

    #[test]
    fn format_parsed() {
        let fmt = Formatter::of_pattern("uuuu-MM-dd").unwrap();
        let parsed = fmt.parse("2024-07-14").unwrap();
        let out = Formatter::of_pattern("EEEE d MMMM").unwrap();
        assert_eq!(out.format(&parsed).unwrap(), "Sunday 14 July");
    }
}
