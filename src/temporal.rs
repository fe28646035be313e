/*!
The values that can be formatted.
*/

use jiff::{
    civil::{Date, DateTime, Time},
    tz::Offset,
    Timestamp, Zoned,
};

use crate::{
    chrono::{self, Chronology},
    field::{Field, FieldValues},
    util::itime::ITime,
    week::Weeks,
    zone::ZoneId,
};

/// A bag of date, time, offset, zone and instant values to be formatted.
///
/// A `Temporal` is usually built implicitly, by passing a Jiff value like a
/// [`Date`], [`DateTime`] or [`Zoned`] to
/// [`Formatter::format`](crate::Formatter::format). Building one explicitly
/// is useful to format combinations Jiff has no type for, like a datetime
/// with an offset but no time zone, or to add values for custom fields.
///
/// Which fields are available depends on what's present:
///
/// * A date provides the date fields, numbered by the chronology (ISO unless
/// set otherwise).
/// * A time provides the time of day fields.
/// * A timestamp provides `InstantSeconds` and, in the absence of a time,
/// the sub-second fields.
/// * An offset provides `OffsetSeconds`.
/// * Explicitly set field values take precedence over everything else.
///
/// # Example
///
/// ```
/// use jiff::{civil::date, tz};
/// use jiff_pattern::{Field, Formatter, Temporal};
///
/// let t = Temporal::from(date(2024, 7, 14).at(17, 30, 0, 0))
///     .with_offset(tz::offset(-4));
/// assert_eq!(t.get(Field::OffsetSeconds), Some(-4 * 60 * 60));
/// assert_eq!(t.get(Field::InstantSeconds), None);
///
/// let fmt = Formatter::of_pattern("uuuu-MM-dd HH:mmxxx")?;
/// assert_eq!(fmt.format(t)?, "2024-07-14 17:30-04:00");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Temporal {
    pub(crate) date: Option<Date>,
    pub(crate) time: Option<Time>,
    pub(crate) offset: Option<Offset>,
    pub(crate) zone: Option<ZoneId>,
    pub(crate) timestamp: Option<Timestamp>,
    pub(crate) chrono: Option<&'static dyn Chronology>,
    pub(crate) fields: FieldValues,
}

impl Temporal {
    /// Creates an empty bag, with no fields available.
    pub fn new() -> Temporal {
        Temporal::default()
    }

    /// Sets the date.
    pub fn with_date(self, date: Date) -> Temporal {
        Temporal { date: Some(date), ..self }
    }

    /// Sets the time of day.
    pub fn with_time(self, time: Time) -> Temporal {
        Temporal { time: Some(time), ..self }
    }

    /// Sets the offset from UTC.
    pub fn with_offset(self, offset: Offset) -> Temporal {
        Temporal { offset: Some(offset), ..self }
    }

    /// Sets the time zone.
    pub fn with_zone(self, zone: ZoneId) -> Temporal {
        Temporal { zone: Some(zone), ..self }
    }

    /// Sets the instant.
    pub fn with_timestamp(self, timestamp: Timestamp) -> Temporal {
        Temporal { timestamp: Some(timestamp), ..self }
    }

    /// Sets the chronology used to number the date fields.
    pub fn with_chronology(self, chrono: &'static dyn Chronology) -> Temporal {
        Temporal { chrono: Some(chrono), ..self }
    }

    /// Sets the value of a field explicitly.
    pub fn with_field(mut self, field: Field, value: i64) -> Temporal {
        self.fields.insert(field, value);
        self
    }

    /// Returns the date, if present.
    pub fn date(&self) -> Option<Date> {
        self.date
    }

    /// Returns the time of day, if present.
    pub fn time(&self) -> Option<Time> {
        self.time
    }

    /// Returns the offset from UTC, if present.
    pub fn offset(&self) -> Option<Offset> {
        self.offset
    }

    /// Returns the time zone, if present.
    pub fn zone(&self) -> Option<&ZoneId> {
        self.zone.as_ref()
    }

    /// Returns the instant, if present.
    pub fn timestamp(&self) -> Option<Timestamp> {
        self.timestamp
    }

    /// Returns the chronology.
    ///
    /// This is ISO when a date is present and no other chronology was set,
    /// and `None` when neither a date nor a chronology is present.
    pub fn chronology(&self) -> Option<&'static dyn Chronology> {
        match self.chrono {
            Some(chrono) => Some(chrono),
            None if self.date.is_some() => Some(chrono::ISO),
            None => None,
        }
    }

    /// Returns the value of a field, or `None` if it isn't available.
    pub fn get(&self, field: Field) -> Option<i64> {
        if let Some(value) = self.fields.get(field) {
            return Some(value);
        }
        if let Field::Custom(custom) = field {
            return custom.rules().get(self);
        }
        match field {
            Field::InstantSeconds => {
                return self.timestamp.map(|ts| ts.as_second());
            }
            Field::OffsetSeconds => {
                return self.offset.map(|o| i64::from(o.seconds()));
            }
            _ => {}
        }
        if field.is_date_based() {
            let date = self.date?;
            let chrono = self.chronology().unwrap_or(chrono::ISO);
            return match field {
                Field::LocalizedDayOfWeek(def)
                | Field::WeekOfMonth(def)
                | Field::WeekOfYear(def)
                | Field::LocalizedWeekOfWeekBasedYear(def)
                | Field::LocalizedWeekBasedYear(def) => {
                    Weeks::new(def).get(field, date, chrono)
                }
                _ => chrono.get(date, field),
            };
        }
        if field.is_time_based() {
            return match self.time {
                Some(time) => time_field(ITime::from(time), field),
                None => {
                    let nanos = i64::from(self.timestamp?.subsec_nanosecond());
                    match field {
                        Field::NanoOfSecond => Some(nanos),
                        Field::MicroOfSecond => Some(nanos / 1_000),
                        Field::MilliOfSecond => Some(nanos / 1_000_000),
                        _ => None,
                    }
                }
            };
        }
        None
    }

    /// Returns true when the field is available.
    pub fn is_supported(&self, field: Field) -> bool {
        self.get(field).is_some()
    }
}

fn time_field(time: ITime, field: Field) -> Option<i64> {
    let hour = i64::from(time.hour);
    let minute = i64::from(time.minute);
    let second = i64::from(time.second);
    let nano = i64::from(time.subsec_nanosecond);
    let value = match field {
        Field::NanoOfSecond => nano,
        Field::NanoOfDay => time.to_nanosecond(),
        Field::MicroOfSecond => nano / 1_000,
        Field::MicroOfDay => time.to_nanosecond() / 1_000,
        Field::MilliOfSecond => nano / 1_000_000,
        Field::MilliOfDay => time.to_nanosecond() / 1_000_000,
        Field::SecondOfMinute => second,
        Field::SecondOfDay => hour * 3600 + minute * 60 + second,
        Field::MinuteOfHour => minute,
        Field::MinuteOfDay => hour * 60 + minute,
        Field::HourOfAmPm => hour % 12,
        Field::ClockHourOfAmPm => {
            if hour % 12 == 0 {
                12
            } else {
                hour % 12
            }
        }
        Field::HourOfDay => hour,
        Field::ClockHourOfDay => {
            if hour == 0 {
                24
            } else {
                hour
            }
        }
        Field::AmPmOfDay => hour / 12,
        _ => return None,
    };
    Some(value)
}

impl From<Date> for Temporal {
    fn from(date: Date) -> Temporal {
        Temporal::new().with_date(date)
    }
}

impl From<Time> for Temporal {
    fn from(time: Time) -> Temporal {
        Temporal::new().with_time(time)
    }
}

impl From<DateTime> for Temporal {
    fn from(dt: DateTime) -> Temporal {
        Temporal::new().with_date(dt.date()).with_time(dt.time())
    }
}

impl From<Timestamp> for Temporal {
    fn from(timestamp: Timestamp) -> Temporal {
        Temporal::new().with_timestamp(timestamp)
    }
}

impl From<Offset> for Temporal {
    fn from(offset: Offset) -> Temporal {
        Temporal::new().with_offset(offset)
    }
}

impl From<ZoneId> for Temporal {
    fn from(zone: ZoneId) -> Temporal {
        Temporal::new().with_zone(zone)
    }
}

impl<'a> From<&'a Zoned> for Temporal {
    fn from(zdt: &'a Zoned) -> Temporal {
        let dt = zdt.datetime();
        let mut t = Temporal::new()
            .with_date(dt.date())
            .with_time(dt.time())
            .with_offset(zdt.offset())
            .with_timestamp(zdt.timestamp());
        t.zone = ZoneId::from_time_zone(zdt.time_zone());
        t
    }
}

impl From<Zoned> for Temporal {
    fn from(zdt: Zoned) -> Temporal {
        Temporal::from(&zdt)
    }
}

impl<'a> From<&'a Temporal> for Temporal {
    fn from(t: &'a Temporal) -> Temporal {
        t.clone()
    }
}
