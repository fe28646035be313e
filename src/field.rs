/*!
Fields, their value ranges and the field-value store.

A [`Field`] names a calendrical quantity such as the year, the month of the
year or the offset from UTC in seconds. Formatting asks a value for the
value of a field. Parsing produces raw `(field, value)` pairs, collected in a
[`FieldValues`] store, which are later resolved into a date, time or instant.
*/

use std::collections::BTreeMap;

use jiff::civil::{Date, DateTime, Time, Weekday};

use crate::{
    chrono::Chronology, error::Error, style::ResolverStyle,
    temporal::Temporal,
};

/// The range of valid values for a field.
///
/// Some fields have a range whose bounds vary. For example, the day of the
/// month has a maximum of anywhere from `28` to `31`. Such a range is
/// described by four values: the smallest and largest minimum, and the
/// smallest and largest maximum. A range is "fixed" when the minimum and
/// maximum don't vary.
///
/// # Example
///
/// ```
/// use jiff_pattern::{Field, ValueRange};
///
/// let range = Field::DayOfMonth.range();
/// assert_eq!(range.minimum(), 1);
/// assert_eq!(range.smallest_maximum(), 28);
/// assert_eq!(range.maximum(), 31);
/// assert!(!range.is_fixed());
/// assert!(Field::MinuteOfHour.range().is_fixed());
/// assert_eq!(Field::MinuteOfHour.range(), ValueRange::new(0, 59));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ValueRange {
    min_smallest: i64,
    min_largest: i64,
    max_smallest: i64,
    max_largest: i64,
}

impl ValueRange {
    /// Creates a fixed range from `min` to `max`, inclusive.
    pub const fn new(min: i64, max: i64) -> ValueRange {
        ValueRange {
            min_smallest: min,
            min_largest: min,
            max_smallest: max,
            max_largest: max,
        }
    }

    /// Creates a range with a fixed minimum and a variable maximum.
    pub const fn variable_max(
        min: i64,
        max_smallest: i64,
        max_largest: i64,
    ) -> ValueRange {
        ValueRange {
            min_smallest: min,
            min_largest: min,
            max_smallest,
            max_largest,
        }
    }

    /// Creates a range where both the minimum and maximum vary.
    pub const fn variable(
        min_smallest: i64,
        min_largest: i64,
        max_smallest: i64,
        max_largest: i64,
    ) -> ValueRange {
        ValueRange { min_smallest, min_largest, max_smallest, max_largest }
    }

    /// Returns the smallest possible minimum.
    pub fn minimum(&self) -> i64 {
        self.min_smallest
    }

    /// Returns the largest possible minimum.
    pub fn largest_minimum(&self) -> i64 {
        self.min_largest
    }

    /// Returns the smallest possible maximum.
    pub fn smallest_maximum(&self) -> i64 {
        self.max_smallest
    }

    /// Returns the largest possible maximum.
    pub fn maximum(&self) -> i64 {
        self.max_largest
    }

    /// Returns true when neither the minimum nor the maximum vary.
    pub fn is_fixed(&self) -> bool {
        self.min_smallest == self.min_largest
            && self.max_smallest == self.max_largest
    }

    /// Returns true when the given value is between the smallest minimum and
    /// the largest maximum, inclusive.
    pub fn is_valid(&self, value: i64) -> bool {
        self.min_smallest <= value && value <= self.max_largest
    }

    /// Returns the given value if it's valid, or a range error naming the
    /// given field otherwise.
    pub(crate) fn check(
        &self,
        field: Field,
        value: i64,
    ) -> Result<i64, Error> {
        if !self.is_valid(value) {
            return Err(Error::range(
                field.name(),
                value,
                self.min_smallest,
                self.max_largest,
            ));
        }
        Ok(value)
    }
}

/// The definition of a week for locale dependent week fields.
///
/// A week definition consists of the first day of the week and the minimal
/// number of days that the first week of a month or year must contain. The
/// ISO-8601 definition starts weeks on Monday and requires at least 4 days.
/// In the United States, weeks start on Sunday and the first week needs only
/// 1 day.
///
/// # Example
///
/// ```
/// use jiff::civil::{date, Weekday};
/// use jiff_pattern::{Temporal, WeekDef};
///
/// let us = WeekDef::new(Weekday::Sunday, 1)?;
/// let t = Temporal::from(date(2024, 7, 14));
/// // 2024-07-14 is a Sunday, and thus the first day of a US week.
/// assert_eq!(t.get(us.day_of_week()), Some(1));
/// assert_eq!(t.get(WeekDef::ISO.day_of_week()), Some(7));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct WeekDef {
    /// The first day of the week, from `1` (Monday) to `7` (Sunday).
    first_day: u8,
    /// The minimal number of days in the first week, from `1` to `7`.
    min_days: u8,
}

impl WeekDef {
    /// The ISO-8601 week definition: Monday start, at least 4 days.
    pub const ISO: WeekDef = WeekDef { first_day: 1, min_days: 4 };

    /// Weeks starting on Sunday with the first week containing at least 1
    /// day. This is used in, for example, the United States.
    pub const SUNDAY_START: WeekDef = WeekDef { first_day: 7, min_days: 1 };

    /// Weeks starting on Monday with the first week containing at least 1
    /// day.
    pub const MONDAY_START: WeekDef = WeekDef { first_day: 1, min_days: 1 };

    /// Weeks starting on Saturday with the first week containing at least 1
    /// day.
    pub const SATURDAY_START: WeekDef = WeekDef { first_day: 6, min_days: 1 };

    /// Creates a new week definition.
    ///
    /// This returns an error when `min_days` is not in the range `1..=7`.
    pub fn new(first_day: Weekday, min_days: u8) -> Result<WeekDef, Error> {
        if !(1..=7).contains(&min_days) {
            return Err(Error::range(
                "minimal days in first week",
                min_days,
                1,
                7,
            ));
        }
        let first_day = match first_day {
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
            Weekday::Sunday => 7,
        };
        Ok(WeekDef { first_day, min_days })
    }

    /// Returns the first day of the week.
    pub fn first_day_of_week(&self) -> Weekday {
        match self.first_day {
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            6 => Weekday::Saturday,
            _ => Weekday::Sunday,
        }
    }

    /// Returns the minimal number of days in the first week.
    pub fn minimal_days(&self) -> u8 {
        self.min_days
    }

    /// The day of week, numbered from `1` for the first day of the week.
    pub fn day_of_week(self) -> Field {
        Field::LocalizedDayOfWeek(self)
    }

    /// The week of the month.
    pub fn week_of_month(self) -> Field {
        Field::WeekOfMonth(self)
    }

    /// The week of the year.
    pub fn week_of_year(self) -> Field {
        Field::WeekOfYear(self)
    }

    /// The week within a week based year.
    pub fn week_of_week_based_year(self) -> Field {
        Field::LocalizedWeekOfWeekBasedYear(self)
    }

    /// The week based year.
    pub fn week_based_year(self) -> Field {
        Field::LocalizedWeekBasedYear(self)
    }

    pub(crate) fn first_day_number(&self) -> i64 {
        i64::from(self.first_day)
    }

    pub(crate) fn min_days_number(&self) -> i64 {
        i64::from(self.min_days)
    }
}

impl core::fmt::Display for WeekDef {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{:?},{}", self.first_day_of_week(), self.min_days)
    }
}

/// A date, time or datetime derived by a field's resolve hook.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Resolved {
    /// A date.
    Date(Date),
    /// A time of day.
    Time(Time),
    /// A date and a time of day.
    DateTime(DateTime),
}

/// The behavior of a user defined field.
///
/// Implementations are wrapped in a [`CustomField`] and then used like any
/// other field: they can be formatted, parsed and take part in resolution.
///
/// During resolution, every custom field left in the store gets a chance to
/// derive a date, time or datetime via [`FieldRules::resolve`]. The hook may
/// also add, change or remove fields in the store, in which case resolution
/// of the built-in fields is re-run. A hook that keeps changing the store is
/// reported as an error after 50 rounds.
///
/// Two custom fields are considered equal when their names are equal.
///
/// # Example
///
/// This defines a "day of decade" field, where day 1 is the first day of a
/// year ending in `0`:
///
/// ```
/// use jiff::civil::date;
/// use jiff_pattern::{
///     Chronology, CustomField, Field, FieldRules, FieldValues,
///     FormatterBuilder, Resolved, ResolverStyle, Temporal, ValueRange,
/// };
///
/// #[derive(Debug)]
/// struct DecadeYear;
///
/// impl FieldRules for DecadeYear {
///     fn name(&self) -> &'static str { "DecadeYear" }
///     fn range(&self) -> ValueRange { ValueRange::new(0, 9) }
///     fn is_date_based(&self) -> bool { true }
///     fn get(&self, temporal: &Temporal) -> Option<i64> {
///         temporal.get(Field::Year).map(|y| y.rem_euclid(10))
///     }
///     fn resolve(
///         &self,
///         fields: &mut FieldValues,
///         _chronology: &'static dyn Chronology,
///         _style: ResolverStyle,
///     ) -> Result<Option<Resolved>, jiff_pattern::Error> {
///         // Combine with a parsed decade to produce a year.
///         let Some(decade) = fields.get(Field::Custom(DECADE)) else {
///             return Ok(None);
///         };
///         let Some(year) = fields.remove(Field::Custom(DECADE_YEAR)) else {
///             return Ok(None);
///         };
///         fields.remove(Field::Custom(DECADE));
///         fields.insert(Field::Year, decade * 10 + year);
///         Ok(None)
///     }
/// }
///
/// #[derive(Debug)]
/// struct Decade;
///
/// impl FieldRules for Decade {
///     fn name(&self) -> &'static str { "Decade" }
///     fn range(&self) -> ValueRange { ValueRange::new(-999, 999) }
///     fn get(&self, temporal: &Temporal) -> Option<i64> {
///         temporal.get(Field::Year).map(|y| y.div_euclid(10))
///     }
/// }
///
/// const DECADE_YEAR: CustomField = CustomField::new(&DecadeYear);
/// const DECADE: CustomField = CustomField::new(&Decade);
///
/// let fmt = FormatterBuilder::new()
///     .append_value_width(Field::Custom(DECADE), 3)?
///     .append_value_width(Field::Custom(DECADE_YEAR), 1)?
///     .append_pattern("-MM-dd")?
///     .build()?;
/// assert_eq!(fmt.format(date(2024, 7, 14))?, "2024-07-14");
/// assert_eq!(fmt.parse("2024-07-14")?.to_date()?, date(2024, 7, 14));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait FieldRules: core::fmt::Debug + Send + Sync + 'static {
    /// The name of this field, used in error messages and for equality.
    fn name(&self) -> &'static str;

    /// The range of valid values for this field.
    fn range(&self) -> ValueRange;

    /// Whether this field is part of a date.
    fn is_date_based(&self) -> bool {
        false
    }

    /// Whether this field is part of a time of day.
    fn is_time_based(&self) -> bool {
        false
    }

    /// Returns the value of this field for the given value being formatted,
    /// or `None` if it isn't available.
    fn get(&self, temporal: &Temporal) -> Option<i64> {
        let _ = temporal;
        None
    }

    /// Resolves this field, possibly in combination with others, into a
    /// date, time or datetime.
    ///
    /// The hook may also rewrite `fields`, for example, by replacing this
    /// field with built-in fields. Returning `Ok(None)` without changing
    /// `fields` means this field can't be resolved (yet).
    fn resolve(
        &self,
        fields: &mut FieldValues,
        chronology: &'static dyn Chronology,
        style: ResolverStyle,
    ) -> Result<Option<Resolved>, Error> {
        let _ = (fields, chronology, style);
        Ok(None)
    }
}

/// A user defined field.
///
/// See [`FieldRules`] for an example.
#[derive(Clone, Copy, Debug)]
pub struct CustomField(&'static dyn FieldRules);

impl CustomField {
    /// Wraps the given rules as a field.
    pub const fn new(rules: &'static dyn FieldRules) -> CustomField {
        CustomField(rules)
    }

    /// Returns the rules of this field.
    pub fn rules(&self) -> &'static dyn FieldRules {
        self.0
    }
}

impl Eq for CustomField {}

impl PartialEq for CustomField {
    fn eq(&self, other: &CustomField) -> bool {
        self.0.name() == other.0.name()
    }
}

impl Ord for CustomField {
    fn cmp(&self, other: &CustomField) -> core::cmp::Ordering {
        self.0.name().cmp(other.0.name())
    }
}

impl PartialOrd for CustomField {
    fn partial_cmp(&self, other: &CustomField) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl core::hash::Hash for CustomField {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.0.name().hash(state);
    }
}

/// A calendrical quantity that can be formatted, parsed and resolved.
///
/// The first group of fields are the intrinsic date and time fields. Their
/// meaning for dates depends on the chronology in use, for example, the
/// year of the Thai Buddhist calendar is 543 years ahead of the ISO year.
///
/// `QuarterOfYear`, `DayOfQuarter`, `WeekOfWeekBasedYear` and
/// `WeekBasedYear` are the ISO-8601 quarter and week fields. The fields
/// parameterized by a [`WeekDef`] are week fields whose meaning depends on
/// the locale. `Custom` fields are defined by the user.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[non_exhaustive]
pub enum Field {
    NanoOfSecond,
    NanoOfDay,
    MicroOfSecond,
    MicroOfDay,
    MilliOfSecond,
    MilliOfDay,
    SecondOfMinute,
    SecondOfDay,
    MinuteOfHour,
    MinuteOfDay,
    HourOfAmPm,
    ClockHourOfAmPm,
    HourOfDay,
    ClockHourOfDay,
    AmPmOfDay,
    DayOfWeek,
    AlignedDayOfWeekInMonth,
    AlignedDayOfWeekInYear,
    DayOfMonth,
    DayOfYear,
    EpochDay,
    AlignedWeekOfMonth,
    AlignedWeekOfYear,
    MonthOfYear,
    ProlepticMonth,
    YearOfEra,
    Year,
    Era,
    InstantSeconds,
    OffsetSeconds,
    QuarterOfYear,
    DayOfQuarter,
    WeekOfWeekBasedYear,
    WeekBasedYear,
    LocalizedDayOfWeek(WeekDef),
    WeekOfMonth(WeekDef),
    WeekOfYear(WeekDef),
    LocalizedWeekOfWeekBasedYear(WeekDef),
    LocalizedWeekBasedYear(WeekDef),
    Custom(CustomField),
}

impl Field {
    /// Returns the name of this field.
    pub fn name(&self) -> &'static str {
        use self::Field::*;

        match *self {
            NanoOfSecond => "NanoOfSecond",
            NanoOfDay => "NanoOfDay",
            MicroOfSecond => "MicroOfSecond",
            MicroOfDay => "MicroOfDay",
            MilliOfSecond => "MilliOfSecond",
            MilliOfDay => "MilliOfDay",
            SecondOfMinute => "SecondOfMinute",
            SecondOfDay => "SecondOfDay",
            MinuteOfHour => "MinuteOfHour",
            MinuteOfDay => "MinuteOfDay",
            HourOfAmPm => "HourOfAmPm",
            ClockHourOfAmPm => "ClockHourOfAmPm",
            HourOfDay => "HourOfDay",
            ClockHourOfDay => "ClockHourOfDay",
            AmPmOfDay => "AmPmOfDay",
            DayOfWeek => "DayOfWeek",
            AlignedDayOfWeekInMonth => "AlignedDayOfWeekInMonth",
            AlignedDayOfWeekInYear => "AlignedDayOfWeekInYear",
            DayOfMonth => "DayOfMonth",
            DayOfYear => "DayOfYear",
            EpochDay => "EpochDay",
            AlignedWeekOfMonth => "AlignedWeekOfMonth",
            AlignedWeekOfYear => "AlignedWeekOfYear",
            MonthOfYear => "MonthOfYear",
            ProlepticMonth => "ProlepticMonth",
            YearOfEra => "YearOfEra",
            Year => "Year",
            Era => "Era",
            InstantSeconds => "InstantSeconds",
            OffsetSeconds => "OffsetSeconds",
            QuarterOfYear => "QuarterOfYear",
            DayOfQuarter => "DayOfQuarter",
            WeekOfWeekBasedYear => "WeekOfWeekBasedYear",
            WeekBasedYear => "WeekBasedYear",
            LocalizedDayOfWeek(_) => "LocalizedDayOfWeek",
            WeekOfMonth(_) => "WeekOfMonth",
            WeekOfYear(_) => "WeekOfYear",
            LocalizedWeekOfWeekBasedYear(_) => "LocalizedWeekOfWeekBasedYear",
            LocalizedWeekBasedYear(_) => "LocalizedWeekBasedYear",
            Custom(custom) => custom.0.name(),
        }
    }

    /// Returns the range of this field for the ISO calendar.
    ///
    /// Other chronologies may use a different range for some date fields.
    /// See [`Chronology::range`].
    pub fn range(&self) -> ValueRange {
        use self::Field::*;

        match *self {
            NanoOfSecond => ValueRange::new(0, 999_999_999),
            NanoOfDay => ValueRange::new(0, 86_400 * 1_000_000_000 - 1),
            MicroOfSecond => ValueRange::new(0, 999_999),
            MicroOfDay => ValueRange::new(0, 86_400 * 1_000_000 - 1),
            MilliOfSecond => ValueRange::new(0, 999),
            MilliOfDay => ValueRange::new(0, 86_400 * 1_000 - 1),
            SecondOfMinute => ValueRange::new(0, 59),
            SecondOfDay => ValueRange::new(0, 86_400 - 1),
            MinuteOfHour => ValueRange::new(0, 59),
            MinuteOfDay => ValueRange::new(0, 24 * 60 - 1),
            HourOfAmPm => ValueRange::new(0, 11),
            ClockHourOfAmPm => ValueRange::new(1, 12),
            HourOfDay => ValueRange::new(0, 23),
            ClockHourOfDay => ValueRange::new(1, 24),
            AmPmOfDay => ValueRange::new(0, 1),
            DayOfWeek => ValueRange::new(1, 7),
            AlignedDayOfWeekInMonth => ValueRange::new(1, 7),
            AlignedDayOfWeekInYear => ValueRange::new(1, 7),
            DayOfMonth => ValueRange::variable_max(1, 28, 31),
            DayOfYear => ValueRange::variable_max(1, 365, 366),
            EpochDay => ValueRange::new(
                crate::util::itime::EPOCH_DAY_MIN,
                crate::util::itime::EPOCH_DAY_MAX,
            ),
            AlignedWeekOfMonth => ValueRange::variable_max(1, 4, 5),
            AlignedWeekOfYear => ValueRange::new(1, 53),
            MonthOfYear => ValueRange::new(1, 12),
            ProlepticMonth => ValueRange::new(-9999 * 12, 9999 * 12 + 11),
            YearOfEra => ValueRange::variable_max(1, 9999, 10000),
            Year => ValueRange::new(-9999, 9999),
            Era => ValueRange::new(0, 1),
            InstantSeconds => {
                ValueRange::new(-377_705_116_800, 253_402_207_200)
            }
            OffsetSeconds => ValueRange::new(-93_599, 93_599),
            QuarterOfYear => ValueRange::new(1, 4),
            DayOfQuarter => ValueRange::variable_max(1, 90, 92),
            WeekOfWeekBasedYear => ValueRange::variable_max(1, 52, 53),
            WeekBasedYear => ValueRange::new(-9999, 9999),
            LocalizedDayOfWeek(_) => ValueRange::new(1, 7),
            WeekOfMonth(_) => ValueRange::variable(0, 1, 4, 6),
            WeekOfYear(_) => ValueRange::variable(0, 1, 52, 54),
            LocalizedWeekOfWeekBasedYear(_) => {
                ValueRange::variable_max(1, 52, 53)
            }
            LocalizedWeekBasedYear(_) => ValueRange::new(-9999, 9999),
            Custom(custom) => custom.0.range(),
        }
    }

    /// Returns true when this field is part of a date.
    pub fn is_date_based(&self) -> bool {
        use self::Field::*;

        match *self {
            DayOfWeek
            | AlignedDayOfWeekInMonth
            | AlignedDayOfWeekInYear
            | DayOfMonth
            | DayOfYear
            | EpochDay
            | AlignedWeekOfMonth
            | AlignedWeekOfYear
            | MonthOfYear
            | ProlepticMonth
            | YearOfEra
            | Year
            | Era
            | QuarterOfYear
            | DayOfQuarter
            | WeekOfWeekBasedYear
            | WeekBasedYear
            | LocalizedDayOfWeek(_)
            | WeekOfMonth(_)
            | WeekOfYear(_)
            | LocalizedWeekOfWeekBasedYear(_)
            | LocalizedWeekBasedYear(_) => true,
            Custom(custom) => custom.0.is_date_based(),
            _ => false,
        }
    }

    /// Returns true when this field is part of a time of day.
    pub fn is_time_based(&self) -> bool {
        use self::Field::*;

        match *self {
            NanoOfSecond | NanoOfDay | MicroOfSecond | MicroOfDay
            | MilliOfSecond | MilliOfDay | SecondOfMinute | SecondOfDay
            | MinuteOfHour | MinuteOfDay | HourOfAmPm | ClockHourOfAmPm
            | HourOfDay | ClockHourOfDay | AmPmOfDay => true,
            Custom(custom) => custom.0.is_time_based(),
            _ => false,
        }
    }

    /// Returns true for the fields resolved directly by a chronology and
    /// by the time resolution steps, as opposed to fields that resolve
    /// themselves through a hook.
    pub(crate) fn is_intrinsic(&self) -> bool {
        use self::Field::*;

        !matches!(
            *self,
            QuarterOfYear
                | DayOfQuarter
                | WeekOfWeekBasedYear
                | WeekBasedYear
                | LocalizedDayOfWeek(_)
                | WeekOfMonth(_)
                | WeekOfYear(_)
                | LocalizedWeekOfWeekBasedYear(_)
                | LocalizedWeekBasedYear(_)
                | Custom(_)
        )
    }

    /// Checks that the given value is within the ISO range of this field.
    pub(crate) fn check(&self, value: i64) -> Result<i64, Error> {
        self.range().check(*self, value)
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Field::*;

        match *self {
            LocalizedDayOfWeek(def)
            | WeekOfMonth(def)
            | WeekOfYear(def)
            | LocalizedWeekOfWeekBasedYear(def)
            | LocalizedWeekBasedYear(def) => {
                write!(f, "{}[{}]", self.name(), def)
            }
            _ => f.write_str(self.name()),
        }
    }
}

/// A mapping from fields to raw values.
///
/// Keys are unique. Values are not checked against their field's range when
/// inserted, since out of range values like a month of `13` are a legal
/// intermediate state during lenient resolution.
///
/// # Example
///
/// ```
/// use jiff_pattern::{Field, FieldValues};
///
/// let mut fields = FieldValues::new();
/// assert_eq!(fields.insert(Field::MonthOfYear, 13), None);
/// assert_eq!(fields.get(Field::MonthOfYear), Some(13));
/// assert_eq!(fields.insert(Field::MonthOfYear, 12), Some(13));
/// assert_eq!(fields.remove(Field::MonthOfYear), Some(12));
/// assert!(fields.is_empty());
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldValues {
    map: BTreeMap<Field, i64>,
}

impl FieldValues {
    /// Creates an empty store.
    pub fn new() -> FieldValues {
        FieldValues::default()
    }

    /// Returns the value of the given field, if present.
    pub fn get(&self, field: Field) -> Option<i64> {
        self.map.get(&field).copied()
    }

    /// Returns true if the given field is present.
    pub fn contains(&self, field: Field) -> bool {
        self.map.contains_key(&field)
    }

    /// Sets the value of a field, returning the previous value, if any.
    pub fn insert(&mut self, field: Field, value: i64) -> Option<i64> {
        self.map.insert(field, value)
    }

    /// Removes a field, returning its value, if present.
    pub fn remove(&mut self, field: Field) -> Option<i64> {
        self.map.remove(&field)
    }

    /// Returns the number of fields present.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true when no fields are present.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns an iterator over all fields and their values, in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, i64)> + '_ {
        self.map.iter().map(|(&field, &value)| (field, value))
    }

    /// Returns all fields present, in field order.
    pub fn fields(&self) -> Vec<Field> {
        self.map.keys().copied().collect()
    }

    /// Retains only the fields for which the predicate returns true.
    pub fn retain(&mut self, mut predicate: impl FnMut(Field, i64) -> bool) {
        self.map.retain(|&field, &mut value| predicate(field, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Dummy(&'static str);

    impl FieldRules for Dummy {
        fn name(&self) -> &'static str {
            self.0
        }

        fn range(&self) -> ValueRange {
            ValueRange::new(0, 1)
        }
    }

    static DUMMY_A: Dummy = Dummy("A");
    static DUMMY_A2: Dummy = Dummy("A");
    static DUMMY_B: Dummy = Dummy("B");

    #[test]
    fn custom_fields_compare_by_name() {
        let a = Field::Custom(CustomField::new(&DUMMY_A));
        let a2 = Field::Custom(CustomField::new(&DUMMY_A2));
        let b = Field::Custom(CustomField::new(&DUMMY_B));
        assert_eq!(a, a2);
        assert_ne!(a, b);
        assert!(a < b);
        assert!(Field::Year < a);
    }

    #[test]
    fn range_check() {
        insta::assert_snapshot!(
            Field::MonthOfYear.check(13).unwrap_err(),
            @"parameter 'MonthOfYear' with value 13 is not in the required range of 1..=12",
        );
        assert_eq!(Field::DayOfMonth.check(31).unwrap(), 31);
        assert!(Field::YearOfEra.range().is_valid(10000));
    }

    #[test]
    fn display() {
        insta::assert_snapshot!(Field::Year, @"Year");
        insta::assert_snapshot!(
            WeekDef::SUNDAY_START.week_of_year(),
            @"WeekOfYear[Sunday,1]",
        );
    }

    #[test]
    fn week_def_new() {
        let def = WeekDef::new(Weekday::Monday, 4).unwrap();
        assert_eq!(def, WeekDef::ISO);
        assert_eq!(def.first_day_of_week(), Weekday::Monday);
        assert!(WeekDef::new(Weekday::Monday, 0).is_err());
        assert!(WeekDef::new(Weekday::Monday, 8).is_err());
    }

    #[test]
    fn store_retain() {
        let mut fields = FieldValues::new();
        fields.insert(Field::Year, 2024);
        fields.insert(Field::HourOfDay, 9);
        fields.retain(|field, _| field.is_date_based());
        assert_eq!(fields.fields(), vec![Field::Year]);
    }
}
