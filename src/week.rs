/*!
Quarter and week fields.

This module computes and resolves the ISO-8601 quarter and week fields
(`QuarterOfYear`, `DayOfQuarter`, `WeekOfWeekBasedYear` and `WeekBasedYear`)
and the week fields parameterized by a [`WeekDef`].

The ISO fields are only supported by the ISO chronology. The localized fields
work with any chronology, since they're defined in terms of the day of week,
day of month, day of year and year of the chronology.
*/

use jiff::civil::Date;

use crate::{
    chrono::{self, Chronology},
    error::{resolve::Error as E, Error},
    field::{Field, FieldValues, Resolved, ValueRange, WeekDef},
    style::ResolverStyle,
    util::itime::{self, IDate},
};

/// The number of days before the first day of each quarter. The second half
/// is for leap years.
const QUARTER_DAYS: [i64; 8] = [0, 90, 181, 273, 0, 91, 182, 274];

pub(crate) fn day_of_quarter(date: IDate) -> i64 {
    let doy = i64::from(date.day_of_year());
    let quarter = (usize::try_from(date.month).unwrap_or(1) - 1) / 3;
    let leap = if itime::is_leap_year(date.year) { 4 } else { 0 };
    doy - QUARTER_DAYS[quarter + leap]
}

/// Returns the number of ISO weeks in the given week based year.
///
/// A week based year has 53 weeks when it starts on a Thursday, or on a
/// Wednesday in a leap year.
pub(crate) fn weeks_in_week_based_year(year: i64) -> i64 {
    // Years just outside the supported range are fine here since no range
    // check is done on the unchecked date.
    let Ok(year) = i16::try_from(year) else { return 52 };
    let jan1 = IDate { year, month: 1, day: 1 }.weekday();
    if jan1 == 4 || (jan1 == 3 && itime::is_leap_year(year)) {
        53
    } else {
        52
    }
}

pub(crate) fn week_of_week_based_year(date: IDate) -> i64 {
    let dow0 = i64::from(date.weekday()) - 1;
    let doy0 = i64::from(date.day_of_year()) - 1;
    let doy_thu0 = doy0 + (3 - dow0);
    let aligned_week = doy_thu0 / 7;
    let first_thu_doy0 = doy_thu0 - (aligned_week * 7);
    let mut first_mon_doy0 = first_thu_doy0 - 3;
    if first_mon_doy0 < -3 {
        first_mon_doy0 += 7;
    }
    if doy0 < first_mon_doy0 {
        return weeks_in_week_based_year(i64::from(date.year) - 1);
    }
    let mut week = ((doy0 - first_mon_doy0) / 7) + 1;
    if week == 53 {
        let long_year = first_mon_doy0 == -3
            || (first_mon_doy0 == -2 && itime::is_leap_year(date.year));
        if !long_year {
            week = 1;
        }
    }
    week
}

pub(crate) fn week_based_year(date: IDate) -> i64 {
    let mut year = i64::from(date.year);
    let doy = i64::from(date.day_of_year());
    let dow0 = i64::from(date.weekday()) - 1;
    if doy <= 3 {
        if doy - dow0 < -2 {
            year -= 1;
        }
    } else if doy >= 363 {
        let leap = i64::from(itime::is_leap_year(date.year));
        if doy - 363 - leap - dow0 >= 0 {
            year += 1;
        }
    }
    year
}

/// Resolves the ISO quarter and week fields.
///
/// Only `DayOfQuarter` and `WeekOfWeekBasedYear` do any work. The other two
/// fields are consumed by them.
pub(crate) fn resolve_iso(
    field: Field,
    fields: &mut FieldValues,
    chrono: &'static dyn Chronology,
    style: ResolverStyle,
) -> Result<Option<Resolved>, Error> {
    match field {
        Field::DayOfQuarter => resolve_day_of_quarter(fields, chrono, style),
        Field::WeekOfWeekBasedYear => {
            resolve_week_of_week_based_year(fields, chrono, style)
        }
        _ => Ok(None),
    }
}

fn ensure_iso(field: Field, chrono: &dyn Chronology) -> Result<(), Error> {
    if !chrono::same(chrono, chrono::ISO) {
        return Err(E::RequiresIso { field }.into());
    }
    Ok(())
}

fn resolve_day_of_quarter(
    fields: &mut FieldValues,
    chrono: &'static dyn Chronology,
    style: ResolverStyle,
) -> Result<Option<Resolved>, Error> {
    let (Some(year), Some(qoy)) =
        (fields.get(Field::Year), fields.get(Field::QuarterOfYear))
    else {
        return Ok(None);
    };
    let year = Field::Year.check(year)?;
    let Some(doq) = fields.get(Field::DayOfQuarter) else { return Ok(None) };
    ensure_iso(Field::DayOfQuarter, chrono)?;
    let (start, days) = if style == ResolverStyle::Lenient {
        let months = qoy
            .checked_sub(1)
            .and_then(|q| q.checked_mul(3))
            .ok_or_else(|| Error::range("QuarterOfYear", qoy, 1, 4))?;
        let start = IDate::new(year, 1, 1)?.checked_add_months(months)?;
        (start, doq.saturating_sub(1))
    } else {
        let qoy = Field::QuarterOfYear.check(qoy)?;
        let start = IDate::new(year, (qoy - 1) * 3 + 1, 1)?;
        if !(1..=90).contains(&doq) {
            if style == ResolverStyle::Strict {
                let leap = itime::is_leap_year(start.year);
                let max = match qoy {
                    1 if leap => 91,
                    1 => 90,
                    2 => 91,
                    _ => 92,
                };
                ValueRange::new(1, max).check(Field::DayOfQuarter, doq)?;
            } else {
                Field::DayOfQuarter.check(doq)?;
            }
        }
        (start, doq - 1)
    };
    fields.remove(Field::DayOfQuarter);
    fields.remove(Field::Year);
    fields.remove(Field::QuarterOfYear);
    let date = start.checked_add_days(days)?;
    Ok(Some(Resolved::Date(date.to_jiff()?)))
}

fn resolve_week_of_week_based_year(
    fields: &mut FieldValues,
    chrono: &'static dyn Chronology,
    style: ResolverStyle,
) -> Result<Option<Resolved>, Error> {
    let (Some(wby), Some(dow)) =
        (fields.get(Field::WeekBasedYear), fields.get(Field::DayOfWeek))
    else {
        return Ok(None);
    };
    let wby = Field::WeekBasedYear.check(wby)?;
    let Some(wowby) = fields.get(Field::WeekOfWeekBasedYear) else {
        return Ok(None);
    };
    ensure_iso(Field::WeekOfWeekBasedYear, chrono)?;
    // January 4th is always in the first week.
    let mut date = IDate::new(wby, 1, 4)?;
    let dow = if style == ResolverStyle::Lenient {
        let (weeks, dow) = chrono::normalize_day_of_week(dow);
        date = date.checked_add_days(chrono::weeks_to_days(weeks)?)?;
        let weeks = wowby.checked_sub(1).ok_or_else(|| {
            Error::range("WeekOfWeekBasedYear", wowby, 1, i64::MAX)
        })?;
        date = date.checked_add_days(chrono::weeks_to_days(weeks)?)?;
        dow
    } else {
        let dow = Field::DayOfWeek.check(dow)?;
        if !(1..=52).contains(&wowby) {
            if style == ResolverStyle::Strict {
                let max = weeks_in_week_based_year(wby);
                ValueRange::new(1, max)
                    .check(Field::WeekOfWeekBasedYear, wowby)?;
            } else {
                Field::WeekOfWeekBasedYear.check(wowby)?;
            }
        }
        date = date.checked_add_days((wowby - 1) * 7)?;
        dow
    };
    let date =
        date.checked_add_days(dow - i64::from(date.weekday()))?.to_jiff()?;
    fields.remove(Field::WeekOfWeekBasedYear);
    fields.remove(Field::WeekBasedYear);
    fields.remove(Field::DayOfWeek);
    Ok(Some(Resolved::Date(date)))
}

/// Computes localized week fields for a date in the given chronology.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Weeks {
    def: WeekDef,
}

impl Weeks {
    pub(crate) fn new(def: WeekDef) -> Weeks {
        Weeks { def }
    }

    /// Returns the value of a localized week field, or `None` if the field
    /// isn't a localized week field.
    pub(crate) fn get(
        &self,
        field: Field,
        date: Date,
        chrono: &dyn Chronology,
    ) -> Option<i64> {
        let idate = IDate::from(date);
        let value = match field {
            Field::LocalizedDayOfWeek(_) => {
                self.day_of_week(i64::from(idate.weekday()))
            }
            Field::WeekOfMonth(_) => self.week_of_month(idate),
            Field::WeekOfYear(_) => self.week_of_year(idate),
            Field::LocalizedWeekOfWeekBasedYear(_) => {
                self.week_of_week_based_year(idate)
            }
            Field::LocalizedWeekBasedYear(_) => {
                let year = chrono.get(date, Field::Year)?;
                self.week_based_year(idate, year)
            }
            _ => return None,
        };
        Some(value)
    }

    /// Converts an ISO day of week to a localized one.
    fn day_of_week(&self, iso_dow: i64) -> i64 {
        (iso_dow - self.def.first_day_number()).rem_euclid(7) + 1
    }

    /// Converts a localized day of week to an ISO one.
    fn iso_day_of_week(&self, dow: i64) -> i64 {
        ((self.def.first_day_number() - 1) + (dow - 1)).rem_euclid(7) + 1
    }

    /// Returns the offset of the first day of the first week relative to
    /// the first day of the month or year, given a day and its localized
    /// day of week.
    fn start_of_week_offset(&self, day: i64, dow: i64) -> i64 {
        let week_start = (day - dow).rem_euclid(7);
        if week_start + 1 > self.def.min_days_number() {
            // The partial week before is long enough to be the first week.
            7 - week_start
        } else {
            -week_start
        }
    }

    fn compute_week(offset: i64, day: i64) -> i64 {
        (7 + offset + (day - 1)).div_euclid(7)
    }

    fn week_of_month(&self, date: IDate) -> i64 {
        let dow = self.day_of_week(i64::from(date.weekday()));
        let dom = i64::from(date.day);
        let offset = self.start_of_week_offset(dom, dow);
        Weeks::compute_week(offset, dom)
    }

    fn week_of_year(&self, date: IDate) -> i64 {
        let dow = self.day_of_week(i64::from(date.weekday()));
        let doy = i64::from(date.day_of_year());
        let offset = self.start_of_week_offset(doy, dow);
        Weeks::compute_week(offset, doy)
    }

    fn week_of_week_based_year(&self, date: IDate) -> i64 {
        let dow = self.day_of_week(i64::from(date.weekday()));
        let doy = i64::from(date.day_of_year());
        let offset = self.start_of_week_offset(doy, dow);
        let mut week = Weeks::compute_week(offset, doy);
        if week == 0 {
            // The day belongs to the last week of the previous year.
            let last = IDate { year: date.year - 1, month: 12, day: 31 };
            return self.week_of_week_based_year(last);
        } else if week > 50 {
            let year_len = i64::from(itime::days_in_year(date.year));
            let new_year_week = Weeks::compute_week(
                offset,
                year_len + self.def.min_days_number(),
            );
            if week >= new_year_week {
                week = week - new_year_week + 1;
            }
        }
        week
    }

    fn week_based_year(&self, date: IDate, year: i64) -> i64 {
        let dow = self.day_of_week(i64::from(date.weekday()));
        let doy = i64::from(date.day_of_year());
        let offset = self.start_of_week_offset(doy, dow);
        let week = Weeks::compute_week(offset, doy);
        if week == 0 {
            return year - 1;
        }
        let year_len = i64::from(itime::days_in_year(date.year));
        let new_year_week = Weeks::compute_week(
            offset,
            year_len + self.def.min_days_number(),
        );
        if week >= new_year_week {
            year + 1
        } else {
            year
        }
    }

    /// Resolves a localized week field.
    ///
    /// A localized day of week is always converted to an ISO day of week
    /// first. The other fields build a date once an ISO day of week is
    /// available.
    pub(crate) fn resolve(
        &self,
        field: Field,
        fields: &mut FieldValues,
        chrono: &'static dyn Chronology,
        style: ResolverStyle,
    ) -> Result<Option<Resolved>, Error> {
        let Some(value) = fields.get(field) else { return Ok(None) };
        if let Field::LocalizedDayOfWeek(_) = field {
            // Always strict, since mixing lenient localized and ISO days
            // of week has no sensible meaning.
            let value = field.check(value)?;
            fields.remove(field);
            chrono::add_field_value(
                fields,
                Field::DayOfWeek,
                self.iso_day_of_week(value),
            )?;
            return Ok(None);
        }
        let Some(iso_dow) = fields.get(Field::DayOfWeek) else {
            return Ok(None);
        };
        let dow = self.day_of_week(Field::DayOfWeek.check(iso_dow)?);
        if let Some(year) = fields.get(Field::Year) {
            let year = chrono.range(Field::Year).check(Field::Year, year)?;
            let date = match field {
                Field::WeekOfMonth(_) => {
                    let Some(month) = fields.get(Field::MonthOfYear) else {
                        return Ok(None);
                    };
                    let date = self.resolve_week_of_month(
                        chrono, year, month, value, dow, style,
                    )?;
                    fields.remove(Field::MonthOfYear);
                    date
                }
                Field::WeekOfYear(_) => {
                    self.resolve_week_of_year(chrono, year, value, dow, style)?
                }
                _ => return Ok(None),
            };
            fields.remove(field);
            fields.remove(Field::Year);
            fields.remove(Field::DayOfWeek);
            return Ok(Some(Resolved::Date(date)));
        }
        let wby_field = self.def.week_based_year();
        let wowby_field = self.def.week_of_week_based_year();
        if !matches!(
            field,
            Field::LocalizedWeekBasedYear(_)
                | Field::LocalizedWeekOfWeekBasedYear(_)
        ) {
            return Ok(None);
        }
        let (Some(wby), Some(wowby)) =
            (fields.get(wby_field), fields.get(wowby_field))
        else {
            return Ok(None);
        };
        let wby = wby_field.check(wby)?;
        let date = if style == ResolverStyle::Lenient {
            let date = self.of_week_based_year(chrono, wby, 1, dow)?;
            let weeks = wowby.checked_sub(1).ok_or_else(|| {
                Error::range(wowby_field.name(), wowby, 1, i64::MAX)
            })?;
            IDate::from(date)
                .checked_add_days(chrono::weeks_to_days(weeks)?)?
                .to_jiff()?
        } else {
            let wowby = wowby_field.check(wowby)?;
            let date = self.of_week_based_year(chrono, wby, wowby, dow)?;
            if style == ResolverStyle::Strict {
                let year = chrono.get(date, Field::Year).unwrap_or(wby);
                if self.week_based_year(IDate::from(date), year) != wby {
                    return Err(E::StrictDifferentWeekBasedYear.into());
                }
            }
            date
        };
        fields.remove(wby_field);
        fields.remove(wowby_field);
        fields.remove(Field::DayOfWeek);
        Ok(Some(Resolved::Date(date)))
    }

    fn resolve_week_of_month(
        &self,
        chrono: &'static dyn Chronology,
        year: i64,
        month: i64,
        wom: i64,
        dow: i64,
        style: ResolverStyle,
    ) -> Result<Date, Error> {
        if style == ResolverStyle::Lenient {
            let months = month.checked_sub(1).ok_or_else(|| {
                Error::range("MonthOfYear", month, 1, i64::MAX)
            })?;
            let first = IDate::from(chrono.date(year, 1, 1)?)
                .checked_add_months(months)?;
            let weeks = wom
                .checked_sub(self.week_of_month(first))
                .ok_or_else(|| Error::range("WeekOfMonth", wom, 0, 6))?;
            let days = dow - self.day_of_week(i64::from(first.weekday()));
            let date = first
                .checked_add_days(chrono::weeks_to_days(weeks)?)?
                .checked_add_days(days)?;
            return date.to_jiff();
        }
        let month = Field::MonthOfYear.check(month)?;
        let first = IDate::from(chrono.date(year, month, 1)?);
        let wom = self.def.week_of_month().check(wom)?;
        let weeks = wom - self.week_of_month(first);
        let days = dow - self.day_of_week(i64::from(first.weekday()));
        let date = first.checked_add_days(weeks * 7 + days)?.to_jiff()?;
        if style == ResolverStyle::Strict
            && chrono.get(date, Field::MonthOfYear) != Some(month)
        {
            return Err(E::StrictDifferentMonth.into());
        }
        Ok(date)
    }

    fn resolve_week_of_year(
        &self,
        chrono: &'static dyn Chronology,
        year: i64,
        woy: i64,
        dow: i64,
        style: ResolverStyle,
    ) -> Result<Date, Error> {
        let first = IDate::from(chrono.date(year, 1, 1)?);
        let days = dow - self.day_of_week(i64::from(first.weekday()));
        if style == ResolverStyle::Lenient {
            let weeks = woy
                .checked_sub(self.week_of_year(first))
                .ok_or_else(|| Error::range("WeekOfYear", woy, 0, 54))?;
            let date = first
                .checked_add_days(chrono::weeks_to_days(weeks)?)?
                .checked_add_days(days)?;
            return date.to_jiff();
        }
        let woy = self.def.week_of_year().check(woy)?;
        let weeks = woy - self.week_of_year(first);
        let date = first.checked_add_days(weeks * 7 + days)?.to_jiff()?;
        if style == ResolverStyle::Strict
            && chrono.get(date, Field::Year) != Some(year)
        {
            return Err(E::StrictDifferentYear.into());
        }
        Ok(date)
    }

    /// Returns the date for a week based year, week and localized day of
    /// week. The week is clamped to the last week of the year.
    fn of_week_based_year(
        &self,
        chrono: &'static dyn Chronology,
        wby: i64,
        wowby: i64,
        dow: i64,
    ) -> Result<Date, Error> {
        let first = IDate::from(chrono.date(wby, 1, 1)?);
        let ldow = self.day_of_week(i64::from(first.weekday()));
        let offset = self.start_of_week_offset(1, ldow);
        let year_len = i64::from(itime::days_in_year(first.year));
        let new_year_week = Weeks::compute_week(
            offset,
            year_len + self.def.min_days_number(),
        );
        let wowby = wowby.min(new_year_week - 1);
        let days = -offset + (dow - 1) + (wowby - 1) * 7;
        first.checked_add_days(days)?.to_jiff()
    }
}
