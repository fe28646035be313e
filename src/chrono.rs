/*!
Calendar systems.

A [`Chronology`] knows how to compute the date fields of a date and how to
resolve parsed date fields into a date. Dates are always represented as
`jiff::civil::Date` values, i.e., in the ISO calendar. A chronology only
changes how dates are *numbered*.

Two chronologies are provided: [`ISO`] and [`THAI_BUDDHIST`]. The latter
counts years from 543 BCE and otherwise shares months and days with the ISO
calendar.
*/

use jiff::civil::Date;

use crate::{
    error::{resolve::Error as E, Error},
    field::{Field, FieldValues, ValueRange},
    style::ResolverStyle,
    util::itime::{self, IDate, IEpochDay},
};

/// A calendar system.
///
/// Implementations must be stateless and are shared as `&'static dyn
/// Chronology` values. Two chronologies are considered the same when they
/// have the same [`id`](Chronology::id).
///
/// This crate provides [`ISO`] and [`THAI_BUDDHIST`]. The trait is public
/// so that a [`Formatter`](crate::Formatter) can be configured with either
/// one via [`Formatter::with_chronology`](crate::Formatter::with_chronology),
/// and so that [`FieldRules`](crate::FieldRules) implementations can build
/// dates in the chronology that was parsed.
pub trait Chronology: core::fmt::Debug + Send + Sync + 'static {
    /// The identifier of this chronology, for example, `ISO`.
    ///
    /// This is what the `appendChronologyId` style node prints and parses.
    fn id(&self) -> &'static str;

    /// The calendar type as used by Unicode locale identifiers, for example,
    /// `iso8601` or `buddhist`.
    fn calendar_type(&self) -> &'static str;

    /// Returns the date with the given year, month and day in this
    /// chronology.
    fn date(&self, year: i64, month: i64, day: i64) -> Result<Date, Error>;

    /// Returns the value of a date field for the given date, or `None` if
    /// this chronology doesn't support the field.
    fn get(&self, date: Date, field: Field) -> Option<i64>;

    /// Returns the range of the given field in this chronology.
    fn range(&self, field: Field) -> ValueRange;

    /// Resolves the date fields in the given store into a date.
    ///
    /// Fields used to build the date are removed from the store. Fields that
    /// remain are cross checked against the date later.
    fn resolve_date(
        &self,
        fields: &mut FieldValues,
        style: ResolverStyle,
    ) -> Result<Option<Date>, Error>;
}

/// The ISO-8601 calendar system, i.e., the proleptic Gregorian calendar.
///
/// Year `0` is `1 BCE`. The `Era` field is `1` for the current era and `0`
/// before it.
pub static ISO: &'static dyn Chronology = &Gregorian {
    id: "ISO",
    calendar_type: "iso8601",
    year_offset: 0,
};

/// The Thai Buddhist calendar system.
///
/// This is the ISO calendar with years counted from 543 BCE. For example,
/// 2024 CE is 2567 BE. The `Era` field is `1` for the Buddhist era and `0`
/// before it.
///
/// # Example
///
/// ```
/// use jiff::civil::date;
/// use jiff_pattern::{Formatter, THAI_BUDDHIST};
///
/// let fmt = Formatter::of_pattern("yyyy-MM-dd G")?
///     .with_chronology(THAI_BUDDHIST);
/// assert_eq!(fmt.format(date(2024, 7, 14))?, "2567-07-14 BE");
/// assert_eq!(fmt.parse("2567-07-14 BE")?.to_date()?, date(2024, 7, 14));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub static THAI_BUDDHIST: &'static dyn Chronology = &Gregorian {
    id: "ThaiBuddhist",
    calendar_type: "buddhist",
    year_offset: 543,
};

/// Returns all chronologies known to this crate.
pub(crate) fn available() -> [&'static dyn Chronology; 2] {
    [ISO, THAI_BUDDHIST]
}

/// Returns true when both chronologies are the same.
pub(crate) fn same(c1: &dyn Chronology, c2: &dyn Chronology) -> bool {
    c1.id() == c2.id()
}

/// A calendar with Gregorian months and days whose years are shifted by a
/// fixed offset from ISO years.
#[derive(Debug)]
struct Gregorian {
    id: &'static str,
    calendar_type: &'static str,
    year_offset: i64,
}

impl Gregorian {
    fn iso_year(&self, year: i64) -> Result<i64, Error> {
        let iso = year.checked_sub(self.year_offset).ok_or_else(|| {
            Error::range("Year", year, self.min_year(), self.max_year())
        })?;
        itime::check_year(iso)
            .map(i64::from)
            .map_err(|_| {
                Error::range("Year", year, self.min_year(), self.max_year())
            })
    }

    fn year(&self, date: IDate) -> i64 {
        i64::from(date.year) + self.year_offset
    }

    fn min_year(&self) -> i64 {
        itime::YEAR_MIN + self.year_offset
    }

    fn max_year(&self) -> i64 {
        itime::YEAR_MAX + self.year_offset
    }

    fn idate(&self, year: i64, month: i64, day: i64) -> Result<IDate, Error> {
        IDate::new(self.iso_year(year)?, month, day)
    }

    fn idate_year_day(&self, year: i64, day: i64) -> Result<IDate, Error> {
        IDate::from_day_of_year(self.iso_year(year)?, day)
    }

    /// Checks a value against this chronology's range for the field and
    /// returns it.
    fn check(&self, field: Field, value: i64) -> Result<i64, Error> {
        self.range(field).check(field, value)
    }

    fn resolve_proleptic_month(
        &self,
        fields: &mut FieldValues,
        style: ResolverStyle,
    ) -> Result<(), Error> {
        let Some(pmonth) = fields.remove(Field::ProlepticMonth) else {
            return Ok(());
        };
        if style != ResolverStyle::Lenient {
            self.check(Field::ProlepticMonth, pmonth)?;
        }
        let moy = pmonth.rem_euclid(12) + 1;
        add_field_value(fields, Field::MonthOfYear, moy)?;
        add_field_value(fields, Field::Year, pmonth.div_euclid(12))?;
        Ok(())
    }

    fn resolve_year_of_era(
        &self,
        fields: &mut FieldValues,
        style: ResolverStyle,
    ) -> Result<(), Error> {
        let Some(yoe) = fields.remove(Field::YearOfEra) else {
            if let Some(era) = fields.get(Field::Era) {
                self.check(Field::Era, era)?;
            }
            return Ok(());
        };
        if style != ResolverStyle::Lenient {
            self.check(Field::YearOfEra, yoe)?;
        }
        let before_era = || {
            1i64.checked_sub(yoe)
                .ok_or_else(|| Error::range("YearOfEra", yoe, 1, i64::MAX))
        };
        match fields.remove(Field::Era) {
            None => {
                let year = fields.get(Field::Year);
                if style == ResolverStyle::Strict {
                    // Don't invent an era, but cross check with the year.
                    match year {
                        Some(year) => {
                            let value =
                                if year > 0 { yoe } else { before_era()? };
                            add_field_value(fields, Field::Year, value)?;
                        }
                        None => {
                            fields.insert(Field::YearOfEra, yoe);
                        }
                    }
                } else {
                    let value = match year {
                        Some(year) if year <= 0 => before_era()?,
                        _ => yoe,
                    };
                    add_field_value(fields, Field::Year, value)?;
                }
            }
            Some(1) => add_field_value(fields, Field::Year, yoe)?,
            Some(0) => add_field_value(fields, Field::Year, before_era()?)?,
            Some(era) => return Err(E::InvalidEra { era }.into()),
        }
        Ok(())
    }

    fn resolve_ymd(
        &self,
        fields: &mut FieldValues,
        style: ResolverStyle,
        year: i64,
    ) -> Result<IDate, Error> {
        let moy = take(fields, Field::MonthOfYear);
        let dom = take(fields, Field::DayOfMonth);
        if style == ResolverStyle::Lenient {
            let months = sub1(Field::MonthOfYear, moy)?;
            let days = sub1(Field::DayOfMonth, dom)?;
            return self
                .idate(year, 1, 1)?
                .checked_add_months(months)?
                .checked_add_days(days);
        }
        let moy = self.check(Field::MonthOfYear, moy)?;
        let mut dom = self.check(Field::DayOfMonth, dom)?;
        if style == ResolverStyle::Smart {
            let iso_year = itime::check_year(self.iso_year(year)?)?;
            let max = itime::days_in_month(iso_year, moy as i8);
            dom = dom.min(i64::from(max));
        }
        self.idate(year, moy, dom)
    }

    fn resolve_yd(
        &self,
        fields: &mut FieldValues,
        style: ResolverStyle,
        year: i64,
    ) -> Result<IDate, Error> {
        let doy = take(fields, Field::DayOfYear);
        if style == ResolverStyle::Lenient {
            let days = sub1(Field::DayOfYear, doy)?;
            return self.idate_year_day(year, 1)?.checked_add_days(days);
        }
        let doy = self.check(Field::DayOfYear, doy)?;
        self.idate_year_day(year, doy)
    }

    fn resolve_ymaa(
        &self,
        fields: &mut FieldValues,
        style: ResolverStyle,
        year: i64,
    ) -> Result<IDate, Error> {
        let moy = take(fields, Field::MonthOfYear);
        let aw = take(fields, Field::AlignedWeekOfMonth);
        let ad = take(fields, Field::AlignedDayOfWeekInMonth);
        if style == ResolverStyle::Lenient {
            let months = sub1(Field::MonthOfYear, moy)?;
            let weeks = sub1(Field::AlignedWeekOfMonth, aw)?;
            let days = sub1(Field::AlignedDayOfWeekInMonth, ad)?;
            return self
                .idate(year, 1, 1)?
                .checked_add_months(months)?
                .checked_add_days(weeks_to_days(weeks)?)?
                .checked_add_days(days);
        }
        let moy = self.check(Field::MonthOfYear, moy)?;
        let aw = self.check(Field::AlignedWeekOfMonth, aw)?;
        let ad = self.check(Field::AlignedDayOfWeekInMonth, ad)?;
        let date = self
            .idate(year, moy, 1)?
            .checked_add_days((aw - 1) * 7 + (ad - 1))?;
        if style == ResolverStyle::Strict && i64::from(date.month) != moy {
            return Err(E::StrictDifferentMonth.into());
        }
        Ok(date)
    }

    fn resolve_ymad(
        &self,
        fields: &mut FieldValues,
        style: ResolverStyle,
        year: i64,
    ) -> Result<IDate, Error> {
        let moy = take(fields, Field::MonthOfYear);
        let aw = take(fields, Field::AlignedWeekOfMonth);
        let dow = take(fields, Field::DayOfWeek);
        if style == ResolverStyle::Lenient {
            let months = sub1(Field::MonthOfYear, moy)?;
            let weeks = sub1(Field::AlignedWeekOfMonth, aw)?;
            let first = self.idate(year, 1, 1)?;
            return resolve_aligned(first, months, weeks, dow);
        }
        let moy = self.check(Field::MonthOfYear, moy)?;
        let aw = self.check(Field::AlignedWeekOfMonth, aw)?;
        let dow = self.check(Field::DayOfWeek, dow)?;
        let date = self.idate(year, moy, 1)?.checked_add_days((aw - 1) * 7)?;
        let date = next_or_same(date, dow)?;
        if style == ResolverStyle::Strict && i64::from(date.month) != moy {
            return Err(E::StrictDifferentMonth.into());
        }
        Ok(date)
    }

    fn resolve_yaa(
        &self,
        fields: &mut FieldValues,
        style: ResolverStyle,
        year: i64,
    ) -> Result<IDate, Error> {
        let aw = take(fields, Field::AlignedWeekOfYear);
        let ad = take(fields, Field::AlignedDayOfWeekInYear);
        if style == ResolverStyle::Lenient {
            let weeks = sub1(Field::AlignedWeekOfYear, aw)?;
            let days = sub1(Field::AlignedDayOfWeekInYear, ad)?;
            return self
                .idate_year_day(year, 1)?
                .checked_add_days(weeks_to_days(weeks)?)?
                .checked_add_days(days);
        }
        let aw = self.check(Field::AlignedWeekOfYear, aw)?;
        let ad = self.check(Field::AlignedDayOfWeekInYear, ad)?;
        let date = self
            .idate_year_day(year, 1)?
            .checked_add_days((aw - 1) * 7 + (ad - 1))?;
        if style == ResolverStyle::Strict && self.year(date) != year {
            return Err(E::StrictDifferentYear.into());
        }
        Ok(date)
    }

    fn resolve_yad(
        &self,
        fields: &mut FieldValues,
        style: ResolverStyle,
        year: i64,
    ) -> Result<IDate, Error> {
        let aw = take(fields, Field::AlignedWeekOfYear);
        let dow = take(fields, Field::DayOfWeek);
        if style == ResolverStyle::Lenient {
            let weeks = sub1(Field::AlignedWeekOfYear, aw)?;
            let first = self.idate_year_day(year, 1)?;
            return resolve_aligned(first, 0, weeks, dow);
        }
        let aw = self.check(Field::AlignedWeekOfYear, aw)?;
        let dow = self.check(Field::DayOfWeek, dow)?;
        let date =
            self.idate_year_day(year, 1)?.checked_add_days((aw - 1) * 7)?;
        let date = next_or_same(date, dow)?;
        if style == ResolverStyle::Strict && self.year(date) != year {
            return Err(E::StrictDifferentYear.into());
        }
        Ok(date)
    }
}

impl Chronology for Gregorian {
    fn id(&self) -> &'static str {
        self.id
    }

    fn calendar_type(&self) -> &'static str {
        self.calendar_type
    }

    fn date(&self, year: i64, month: i64, day: i64) -> Result<Date, Error> {
        self.idate(year, month, day)?.to_jiff()
    }

    fn get(&self, date: Date, field: Field) -> Option<i64> {
        let idate = IDate::from(date);
        let dom = i64::from(idate.day);
        let doy = i64::from(idate.day_of_year());
        let year = self.year(idate);
        let value = match field {
            Field::DayOfWeek => i64::from(idate.weekday()),
            Field::AlignedDayOfWeekInMonth => ((dom - 1) % 7) + 1,
            Field::AlignedDayOfWeekInYear => ((doy - 1) % 7) + 1,
            Field::DayOfMonth => dom,
            Field::DayOfYear => doy,
            Field::EpochDay => i64::from(idate.to_epoch_day().epoch_day),
            Field::AlignedWeekOfMonth => ((dom - 1) / 7) + 1,
            Field::AlignedWeekOfYear => ((doy - 1) / 7) + 1,
            Field::MonthOfYear => i64::from(idate.month),
            Field::ProlepticMonth => year * 12 + i64::from(idate.month) - 1,
            Field::YearOfEra => {
                if year >= 1 {
                    year
                } else {
                    1 - year
                }
            }
            Field::Year => year,
            Field::Era => i64::from(year >= 1),
            Field::QuarterOfYear if self.year_offset == 0 => {
                (i64::from(idate.month) - 1) / 3 + 1
            }
            Field::DayOfQuarter if self.year_offset == 0 => {
                crate::week::day_of_quarter(idate)
            }
            Field::WeekOfWeekBasedYear if self.year_offset == 0 => {
                crate::week::week_of_week_based_year(idate)
            }
            Field::WeekBasedYear if self.year_offset == 0 => {
                crate::week::week_based_year(idate)
            }
            _ => return None,
        };
        Some(value)
    }

    fn range(&self, field: Field) -> ValueRange {
        if self.year_offset == 0 {
            return field.range();
        }
        let (min, max) = (self.min_year(), self.max_year());
        match field {
            Field::Year => ValueRange::new(min, max),
            Field::YearOfEra => ValueRange::variable_max(1, 1 - min, max),
            Field::ProlepticMonth => ValueRange::new(min * 12, max * 12 + 11),
            _ => field.range(),
        }
    }

    fn resolve_date(
        &self,
        fields: &mut FieldValues,
        style: ResolverStyle,
    ) -> Result<Option<Date>, Error> {
        if let Some(epoch_day) = fields.remove(Field::EpochDay) {
            let date = IEpochDay::new(epoch_day)?.to_date();
            return date.to_jiff().map(Some);
        }
        self.resolve_proleptic_month(fields, style)?;
        self.resolve_year_of_era(fields, style)?;
        let Some(year) = fields.get(Field::Year) else { return Ok(None) };
        let year = self.check(Field::Year, year)?;
        let has = |field| fields.contains(field);
        let date = if has(Field::MonthOfYear) && has(Field::DayOfMonth) {
            fields.remove(Field::Year);
            self.resolve_ymd(fields, style, year)?
        } else if has(Field::MonthOfYear)
            && has(Field::AlignedWeekOfMonth)
            && has(Field::AlignedDayOfWeekInMonth)
        {
            fields.remove(Field::Year);
            self.resolve_ymaa(fields, style, year)?
        } else if has(Field::MonthOfYear)
            && has(Field::AlignedWeekOfMonth)
            && has(Field::DayOfWeek)
        {
            fields.remove(Field::Year);
            self.resolve_ymad(fields, style, year)?
        } else if has(Field::DayOfYear) {
            fields.remove(Field::Year);
            self.resolve_yd(fields, style, year)?
        } else if has(Field::AlignedWeekOfYear)
            && has(Field::AlignedDayOfWeekInYear)
        {
            fields.remove(Field::Year);
            self.resolve_yaa(fields, style, year)?
        } else if has(Field::AlignedWeekOfYear) && has(Field::DayOfWeek) {
            fields.remove(Field::Year);
            self.resolve_yad(fields, style, year)?
        } else {
            return Ok(None);
        };
        trace!("{} resolved date fields to {date:?}", self.id);
        date.to_jiff().map(Some)
    }
}

/// Sets a field in the store, returning a conflict error if it already has
/// a different value.
pub(crate) fn add_field_value(
    fields: &mut FieldValues,
    field: Field,
    value: i64,
) -> Result<(), Error> {
    match fields.insert(field, value) {
        Some(old) if old != value => {
            Err(E::Conflict { field, old, new: value }.into())
        }
        _ => Ok(()),
    }
}

/// Removes a field that the caller has checked is present.
fn take(fields: &mut FieldValues, field: Field) -> i64 {
    // Callers check presence first, so the default is unreachable.
    fields.remove(field).unwrap_or(0)
}

fn sub1(field: Field, value: i64) -> Result<i64, Error> {
    value
        .checked_sub(1)
        .ok_or_else(|| {
            Error::range(field.name(), value, i64::MIN + 1, i64::MAX)
        })
}

pub(crate) fn weeks_to_days(weeks: i64) -> Result<i64, Error> {
    weeks.checked_mul(7).ok_or_else(|| {
        Error::range("weeks", weeks, i64::MIN / 7, i64::MAX / 7)
    })
}

/// Splits a day of week that may be outside of `1..=7` into whole weeks and
/// a day of week in `1..=7`.
pub(crate) fn normalize_day_of_week(dow: i64) -> (i64, i64) {
    ((dow - 1).div_euclid(7), (dow - 1).rem_euclid(7) + 1)
}

/// Returns the first date on or after `date` that falls on the given ISO
/// day of week.
pub(crate) fn next_or_same(date: IDate, dow: i64) -> Result<IDate, Error> {
    let diff = (dow - i64::from(date.weekday())).rem_euclid(7);
    date.checked_add_days(diff)
}

/// Adds months and weeks to a date and then moves to the given day of week,
/// where days of week outside of `1..=7` overflow into weeks.
fn resolve_aligned(
    base: IDate,
    months: i64,
    weeks: i64,
    dow: i64,
) -> Result<IDate, Error> {
    let date = base
        .checked_add_months(months)?
        .checked_add_days(weeks_to_days(weeks)?)?;
    let (extra_weeks, dow) = normalize_day_of_week(dow);
    let date = date.checked_add_days(weeks_to_days(extra_weeks)?)?;
    next_or_same(date, dow)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn resolve(
        chrono: &dyn Chronology,
        style: ResolverStyle,
        fields: &[(Field, i64)],
    ) -> Result<Option<Date>, Error> {
        let mut store = FieldValues::new();
        for &(field, value) in fields {
            store.insert(field, value);
        }
        chrono.resolve_date(&mut store, style)
    }

    #[test]
    fn ymd() {
        use self::Field::*;
        use self::ResolverStyle::*;

        let f = |style, m, d| {
            resolve(
                ISO,
                style,
                &[(Year, 2023), (MonthOfYear, m), (DayOfMonth, d)],
            )
        };
        assert_eq!(f(Strict, 2, 28).unwrap(), Some(date(2023, 2, 28)));
        assert!(f(Strict, 2, 29).is_err());
        assert_eq!(f(Smart, 2, 31).unwrap(), Some(date(2023, 2, 28)));
        assert_eq!(f(Smart, 4, 31).unwrap(), Some(date(2023, 4, 30)));
        assert!(f(Smart, 2, 32).is_err());
        assert!(f(Smart, 13, 1).is_err());
        assert_eq!(f(Lenient, 13, 1).unwrap(), Some(date(2024, 1, 1)));
        assert_eq!(f(Lenient, 0, 0).unwrap(), Some(date(2022, 11, 30)));
    }

    #[test]
    fn year_of_era() {
        use self::Field::*;
        use self::ResolverStyle::*;

        let got = resolve(
            ISO,
            Smart,
            &[(YearOfEra, 44), (Era, 0), (MonthOfYear, 3), (DayOfMonth, 15)],
        );
        assert_eq!(got.unwrap(), Some(date(-43, 3, 15)));

        // Strict doesn't invent an era.
        let mut store = FieldValues::new();
        store.insert(YearOfEra, 2024);
        store.insert(MonthOfYear, 1);
        store.insert(DayOfMonth, 1);
        assert_eq!(ISO.resolve_date(&mut store, Strict).unwrap(), None);
        assert_eq!(store.get(YearOfEra), Some(2024));

        insta::assert_snapshot!(
            resolve(ISO, Smart, &[(YearOfEra, 1), (Era, 2)]).unwrap_err(),
            @"invalid value for era: 2",
        );
        insta::assert_snapshot!(
            resolve(ISO, Smart, &[(YearOfEra, 2024), (Year, 2023)])
                .unwrap_err(),
            @"conflict found: field Year has value 2023 which differs from derived value 2024",
        );
    }

    #[test]
    fn epoch_day_and_proleptic_month() {
        use self::Field::*;
        use self::ResolverStyle::*;

        assert_eq!(
            resolve(ISO, Strict, &[(EpochDay, 19_918)]).unwrap(),
            Some(date(2024, 7, 14)),
        );
        assert_eq!(
            resolve(
                ISO,
                Strict,
                &[(ProlepticMonth, 2024 * 12 + 6), (DayOfMonth, 14)],
            )
            .unwrap(),
            Some(date(2024, 7, 14)),
        );
    }

    #[test]
    fn aligned() {
        use self::Field::*;
        use self::ResolverStyle::*;

        // Third Sunday (week 3) of July 2024.
        let got = resolve(
            ISO,
            Smart,
            &[
                (Year, 2024),
                (MonthOfYear, 7),
                (AlignedWeekOfMonth, 3),
                (DayOfWeek, 7),
            ],
        );
        assert_eq!(got.unwrap(), Some(date(2024, 7, 21)));
        let got = resolve(
            ISO,
            Smart,
            &[
                (Year, 2024),
                (MonthOfYear, 7),
                (AlignedWeekOfMonth, 2),
                (AlignedDayOfWeekInMonth, 7),
            ],
        );
        assert_eq!(got.unwrap(), Some(date(2024, 7, 14)));
        let got = resolve(
            ISO,
            Strict,
            &[
                (Year, 2023),
                (MonthOfYear, 2),
                (AlignedWeekOfMonth, 5),
                (AlignedDayOfWeekInMonth, 1),
            ],
        );
        insta::assert_snapshot!(
            got.unwrap_err(),
            @"strict mode rejected resolved date as it is in a different month",
        );
        let got = resolve(
            ISO,
            Smart,
            &[
                (Year, 2024),
                (AlignedWeekOfYear, 2),
                (AlignedDayOfWeekInYear, 3),
            ],
        );
        assert_eq!(got.unwrap(), Some(date(2024, 1, 10)));
        let got = resolve(ISO, Lenient, &[(Year, 2024), (DayOfYear, 367)]);
        assert_eq!(got.unwrap(), Some(date(2025, 1, 1)));
    }

    #[test]
    fn thai_buddhist() {
        use self::Field::*;

        let d = date(2024, 7, 14);
        assert_eq!(THAI_BUDDHIST.get(d, Year), Some(2567));
        assert_eq!(THAI_BUDDHIST.get(d, YearOfEra), Some(2567));
        assert_eq!(THAI_BUDDHIST.get(d, Era), Some(1));
        assert_eq!(THAI_BUDDHIST.get(d, QuarterOfYear), None);
        assert_eq!(ISO.get(d, QuarterOfYear), Some(3));
        assert_eq!(THAI_BUDDHIST.date(2567, 7, 14).unwrap(), d);
        let got = resolve(
            THAI_BUDDHIST,
            ResolverStyle::Smart,
            &[(Year, 2567), (MonthOfYear, 7), (DayOfMonth, 14)],
        );
        assert_eq!(got.unwrap(), Some(d));
        assert_eq!(THAI_BUDDHIST.range(Year).maximum(), 10542);
        assert!(same(ISO, available()[0]));
        assert!(!same(ISO, THAI_BUDDHIST));
    }
}
