/*!
This module defines the internal core calendar data types.

Field resolution needs a handful of Gregorian calendar routines that operate
on raw integers: converting between epoch days and dates, day-of-year and
day-of-week, and month/day arithmetic. These work on simple primitive integer
types and are kept separate from Jiff's public types so that resolution can
reason about out-of-range intermediate values before committing to a
`jiff::civil::Date`.

# Naming

The types in this module are prefixed with letter `I` to make it clear that
they are internal types. Specifically, to distinguish them from Jiff's public
types. For example, `Date` versus `IDate`.
*/

use jiff::civil::Date;

use crate::error::Error;

/// The minimum year supported. This matches Jiff.
pub(crate) const YEAR_MIN: i64 = -9999;
/// The maximum year supported. This matches Jiff.
pub(crate) const YEAR_MAX: i64 = 9999;
/// The epoch day of `-9999-01-01`.
pub(crate) const EPOCH_DAY_MIN: i64 = -4_371_587;
/// The epoch day of `9999-12-31`.
pub(crate) const EPOCH_DAY_MAX: i64 = 2_932_896;

pub(crate) const NANOS_PER_DAY: i64 = 86_400_000_000_000;
pub(crate) const NANOS_PER_HOUR: i64 = 3_600_000_000_000;
pub(crate) const NANOS_PER_MINUTE: i64 = 60_000_000_000;
pub(crate) const NANOS_PER_SECOND: i64 = 1_000_000_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct IEpochDay {
    pub(crate) epoch_day: i32,
}

impl IEpochDay {
    /// Creates a new epoch day after checking that it's within the
    /// supported range.
    pub(crate) fn new(epoch_day: i64) -> Result<IEpochDay, Error> {
        if !(EPOCH_DAY_MIN..=EPOCH_DAY_MAX).contains(&epoch_day) {
            return Err(Error::range(
                "EpochDay",
                epoch_day,
                EPOCH_DAY_MIN,
                EPOCH_DAY_MAX,
            ));
        }
        // OK because we just checked the range.
        Ok(IEpochDay { epoch_day: epoch_day as i32 })
    }

    /// Converts days since the Unix epoch to a Gregorian date.
    ///
    /// This is Neri-Schneider. There's no branching or divisions.
    ///
    /// Ref: <https://github.com/cassioneri/eaf/blob/684d3cc32d14eee371d0abe4f683d6d6a49ed5c1/algorithms/neri_schneider.hpp#L40C3-L40C34>
    #[inline(always)]
    #[allow(non_upper_case_globals, non_snake_case)] // to mimic source
    pub(crate) const fn to_date(&self) -> IDate {
        const s: u32 = 82;
        const K: u32 = 719468 + 146097 * s;
        const L: u32 = 400 * s;

        let N_U = self.epoch_day as u32;
        let N = N_U.wrapping_add(K);

        let N_1 = 4 * N + 3;
        let C = N_1 / 146097;
        let N_C = (N_1 % 146097) / 4;

        let N_2 = 4 * N_C + 3;
        let P_2 = 2939745 * (N_2 as u64);
        let Z = (P_2 / 4294967296) as u32;
        let N_Y = (P_2 % 4294967296) as u32 / 2939745 / 4;
        let Y = 100 * C + Z;

        let N_3 = 2141 * N_Y + 197913;
        let M = N_3 / 65536;
        let D = (N_3 % 65536) / 2141;

        let J = N_Y >= 306;
        let year = Y.wrapping_sub(L).wrapping_add(J as u32) as i16;
        let month = (if J { M - 12 } else { M }) as i8;
        let day = (D + 1) as i8;
        IDate { year, month, day }
    }

    /// Returns the ISO day of week, from `1` (Monday) to `7` (Sunday).
    pub(crate) const fn weekday(&self) -> i8 {
        // 1970-01-01 was a Thursday.
        ((self.epoch_day as i64 + 3).rem_euclid(7) + 1) as i8
    }

    /// Adds the given number of days, returning an error if the result is
    /// out of range.
    pub(crate) fn checked_add(&self, days: i64) -> Result<IEpochDay, Error> {
        let sum = i64::from(self.epoch_day).checked_add(days).ok_or_else(
            || Error::range("EpochDay", days, EPOCH_DAY_MIN, EPOCH_DAY_MAX),
        )?;
        IEpochDay::new(sum)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct IDate {
    pub(crate) year: i16,
    pub(crate) month: i8,
    pub(crate) day: i8,
}

impl IDate {
    /// Creates a new date from a year, month and day that may each be out
    /// of range. An error is returned if any of them are.
    pub(crate) fn new(
        year: i64,
        month: i64,
        day: i64,
    ) -> Result<IDate, Error> {
        let year = check_year(year)?;
        if !(1..=12).contains(&month) {
            return Err(Error::range("MonthOfYear", month, 1, 12));
        }
        let month = month as i8;
        let max = days_in_month(year, month);
        if !(1..=i64::from(max)).contains(&day) {
            return Err(Error::range("DayOfMonth", day, 1, max));
        }
        Ok(IDate { year, month, day: day as i8 })
    }

    /// Creates a date from a year and day of year.
    pub(crate) fn from_day_of_year(
        year: i64,
        day_of_year: i64,
    ) -> Result<IDate, Error> {
        let year = check_year(year)?;
        let max = days_in_year(year);
        if !(1..=i64::from(max)).contains(&day_of_year) {
            return Err(Error::range("DayOfYear", day_of_year, 1, max));
        }
        let first = IDate { year, month: 1, day: 1 }.to_epoch_day();
        IEpochDay::new(i64::from(first.epoch_day) + day_of_year - 1)
            .map(|epoch_day| epoch_day.to_date())
    }

    /// Converts a Gregorian date to days since the Unix epoch.
    ///
    /// This is Neri-Schneider. There's no branching or divisions.
    ///
    /// Ref: https://github.com/cassioneri/eaf/blob/684d3cc32d14eee371d0abe4f683d6d6a49ed5c1/algorithms/neri_schneider.hpp#L83
    #[inline(always)]
    #[allow(non_upper_case_globals, non_snake_case)] // to mimic source
    pub(crate) const fn to_epoch_day(&self) -> IEpochDay {
        const s: u32 = 82;
        const K: u32 = 719468 + 146097 * s;
        const L: u32 = 400 * s;

        let year = self.year as u32;
        let month = self.month as u32;
        let day = self.day as u32;

        let J = month <= 2;
        let Y = year.wrapping_add(L).wrapping_sub(J as u32);
        let M = if J { month + 12 } else { month };
        let D = day - 1;
        let C = Y / 100;

        let y_star = 1461 * Y / 4 - C + C / 4;
        let m_star = (979 * M - 2919) / 32;
        let N = y_star + m_star + D;

        let N_U = N.wrapping_sub(K);
        let epoch_day = N_U as i32;
        IEpochDay { epoch_day }
    }

    /// Returns the day of the year, starting at `1`.
    pub(crate) const fn day_of_year(&self) -> i16 {
        let first = IDate { year: self.year, month: 1, day: 1 };
        (self.to_epoch_day().epoch_day - first.to_epoch_day().epoch_day + 1)
            as i16
    }

    /// Returns the ISO day of week, from `1` (Monday) to `7` (Sunday).
    pub(crate) const fn weekday(&self) -> i8 {
        self.to_epoch_day().weekday()
    }

    /// Returns the number of months since year zero.
    pub(crate) const fn proleptic_month(&self) -> i64 {
        (self.year as i64) * 12 + (self.month as i64 - 1)
    }

    /// Adds the given number of months. When the day of month doesn't exist
    /// in the resulting month, it is clamped to the last day of the month.
    pub(crate) fn checked_add_months(
        &self,
        months: i64,
    ) -> Result<IDate, Error> {
        let total = self.proleptic_month().checked_add(months).ok_or_else(
            || Error::range("ProlepticMonth", months, i64::MIN, i64::MAX),
        )?;
        let year = check_year(total.div_euclid(12))?;
        let month = (total.rem_euclid(12) + 1) as i8;
        let day = self.day.min(days_in_month(year, month));
        Ok(IDate { year, month, day })
    }

    /// Adds the given number of days.
    pub(crate) fn checked_add_days(&self, days: i64) -> Result<IDate, Error> {
        Ok(self.to_epoch_day().checked_add(days)?.to_date())
    }

    pub(crate) fn to_jiff(&self) -> Result<Date, Error> {
        Date::new(self.year, self.month, self.day).map_err(Error::jiff)
    }
}

impl From<Date> for IDate {
    fn from(date: Date) -> IDate {
        IDate { year: date.year(), month: date.month(), day: date.day() }
    }
}

/// Checks that the given year is within the supported range.
pub(crate) fn check_year(year: i64) -> Result<i16, Error> {
    if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
        return Err(Error::range("Year", year, YEAR_MIN, YEAR_MAX));
    }
    // OK because we just checked the range.
    Ok(year as i16)
}

/// Returns true if and only if the given year is a leap year.
///
/// A leap year is a year with 366 days. Typical years have 365 days.
#[inline]
pub(crate) const fn is_leap_year(year: i16) -> bool {
    // From: https://github.com/BurntSushi/jiff/pull/23
    let d = if year % 25 != 0 { 4 } else { 16 };
    (year % d) == 0
}

/// Return the number of days in the given month.
#[inline]
pub(crate) const fn days_in_month(year: i16, month: i8) -> i8 {
    // From: https://github.com/BurntSushi/jiff/pull/23
    if month == 2 {
        if is_leap_year(year) {
            29
        } else {
            28
        }
    } else {
        30 | (month ^ month >> 3)
    }
}

/// Return the number of days in the given year.
#[inline]
pub(crate) const fn days_in_year(year: i16) -> i16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// A time of day as raw components.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct ITime {
    pub(crate) hour: i8,
    pub(crate) minute: i8,
    pub(crate) second: i8,
    pub(crate) subsec_nanosecond: i32,
}

impl ITime {
    #[inline(always)]
    pub(crate) const fn to_nanosecond(&self) -> i64 {
        let mut nanosecond: i64 = 0;
        nanosecond += (self.hour as i64) * NANOS_PER_HOUR;
        nanosecond += (self.minute as i64) * NANOS_PER_MINUTE;
        nanosecond += (self.second as i64) * NANOS_PER_SECOND;
        nanosecond += self.subsec_nanosecond as i64;
        nanosecond
    }

    /// Converts nanoseconds since midnight to a time.
    ///
    /// Callers must ensure the value is in the range `0..NANOS_PER_DAY`.
    #[inline(always)]
    pub(crate) const fn from_nanosecond(mut nanosecond: i64) -> ITime {
        let hour = (nanosecond / NANOS_PER_HOUR) as i8;
        nanosecond %= NANOS_PER_HOUR;
        let minute = (nanosecond / NANOS_PER_MINUTE) as i8;
        nanosecond %= NANOS_PER_MINUTE;
        let second = (nanosecond / NANOS_PER_SECOND) as i8;
        let subsec_nanosecond = (nanosecond % NANOS_PER_SECOND) as i32;
        ITime { hour, minute, second, subsec_nanosecond }
    }

    pub(crate) fn to_jiff(&self) -> Result<jiff::civil::Time, Error> {
        jiff::civil::Time::new(
            self.hour,
            self.minute,
            self.second,
            self.subsec_nanosecond,
        )
        .map_err(Error::jiff)
    }
}

impl From<jiff::civil::Time> for ITime {
    fn from(time: jiff::civil::Time) -> ITime {
        ITime {
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
            subsec_nanosecond: time.subsec_nanosecond(),
        }
    }
}
