use jiff::{
    civil::{Date, Time},
    tz::TimeZone,
    Timestamp,
};

use crate::{
    chrono::{self, Chronology},
    error::{resolve::Error as E, Error},
    field::{Field, Resolved},
    parsed::{offset, Parsed},
    style::ResolverStyle,
    temporal::Temporal,
    util::itime::{
        IDate, ITime, NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MINUTE,
        NANOS_PER_SECOND,
    },
    week::{self, Weeks},
};

/// The number of times field hooks may change the store before resolution
/// gives up.
const MAX_HOOK_ROUNDS: usize = 50;

impl Parsed {
    /// Resolves the parsed fields into a date, time and instant.
    ///
    /// When a filter is given, fields not in it are dropped first.
    pub(crate) fn resolve(
        &mut self,
        style: ResolverStyle,
        filter: Option<&[Field]>,
    ) -> Result<(), Error> {
        if let Some(filter) = filter {
            self.fields.retain(|field, _| filter.contains(&field));
        }
        if self.fields.get(Field::SecondOfMinute) == Some(60) {
            self.fields.insert(Field::SecondOfMinute, 59);
            self.leap_second = true;
        }
        let chrono = self.chrono.unwrap_or(chrono::ISO);
        self.chrono = Some(chrono);
        trace!("resolving {:?} with {style} resolver", self.fields);

        self.resolve_fields(chrono, style)?;
        self.resolve_time_lenient(style)?;
        self.cross_check()?;
        self.resolve_excess_days()?;
        self.resolve_fractional();
        self.resolve_instant()?;
        trace!(
            "resolved to date {:?}, time {:?} with leftover fields {:?}",
            self.date,
            self.time,
            self.fields,
        );
        Ok(())
    }

    fn resolve_fields(
        &mut self,
        chrono: &'static dyn Chronology,
        style: ResolverStyle,
    ) -> Result<(), Error> {
        self.resolve_intrinsic(chrono, style)?;
        let mut changed = 0;
        'outer: while changed < MAX_HOOK_ROUNDS {
            for field in self.fields.fields() {
                if field.is_intrinsic() || !self.fields.contains(field) {
                    continue;
                }
                let before = self.fields.clone();
                let resolved = match field {
                    Field::Custom(custom) => custom.rules().resolve(
                        &mut self.fields,
                        chrono,
                        style,
                    )?,
                    Field::LocalizedDayOfWeek(def)
                    | Field::WeekOfMonth(def)
                    | Field::WeekOfYear(def)
                    | Field::LocalizedWeekOfWeekBasedYear(def)
                    | Field::LocalizedWeekBasedYear(def) => Weeks::new(def)
                        .resolve(field, &mut self.fields, chrono, style)?,
                    _ => week::resolve_iso(
                        field,
                        &mut self.fields,
                        chrono,
                        style,
                    )?,
                };
                match resolved {
                    Some(resolved) => {
                        trace!("field {field} resolved to {resolved:?}");
                        match resolved {
                            Resolved::Date(date) => self.update_date(date)?,
                            Resolved::Time(time) => self.update_time(time, 0)?,
                            Resolved::DateTime(dt) => {
                                self.update_time(dt.time(), 0)?;
                                self.update_date(dt.date())?;
                            }
                        }
                    }
                    None if self.fields != before => {}
                    None => continue,
                }
                changed += 1;
                continue 'outer;
            }
            break;
        }
        if changed == MAX_HOOK_ROUNDS {
            return Err(E::IncorrectResolve.into());
        }
        if changed > 0 {
            self.resolve_intrinsic(chrono, style)?;
        }
        Ok(())
    }

    fn resolve_intrinsic(
        &mut self,
        chrono: &'static dyn Chronology,
        style: ResolverStyle,
    ) -> Result<(), Error> {
        self.resolve_instant_fields()?;
        if let Some(date) = chrono.resolve_date(&mut self.fields, style)? {
            self.update_date(date)?;
        }
        self.resolve_time_fields(style)
    }

    /// Derives the date, second of day and offset from a parsed instant.
    fn resolve_instant_fields(&mut self) -> Result<(), Error> {
        let Some(seconds) = self.fields.get(Field::InstantSeconds) else {
            return Ok(());
        };
        let offset_seconds = self.fields.get(Field::OffsetSeconds);
        let tz = match (self.zone.as_ref(), offset_seconds) {
            (Some(zone), _) => zone.time_zone(),
            (None, Some(seconds)) => TimeZone::fixed(offset(seconds)?),
            (None, None) => return Ok(()),
        };
        let seconds = Field::InstantSeconds.check(seconds)?;
        let zdt = Timestamp::from_second(seconds)?.to_zoned(tz);
        self.update_date(zdt.date())?;
        let time = zdt.time();
        let second_of_day = i64::from(time.hour()) * 3600
            + i64::from(time.minute()) * 60
            + i64::from(time.second());
        self.set(Field::SecondOfDay, second_of_day)?;
        self.set(Field::OffsetSeconds, i64::from(zdt.offset().seconds()))
    }

    /// Simplifies the time fields down to hour, minute, second and
    /// nanosecond, and builds a time when all four are present.
    fn resolve_time_fields(
        &mut self,
        style: ResolverStyle,
    ) -> Result<(), Error> {
        let strict = style != ResolverStyle::Lenient;
        if let Some(ch) = self.fields.remove(Field::ClockHourOfDay) {
            if style == ResolverStyle::Strict
                || (style == ResolverStyle::Smart && ch != 0)
            {
                Field::ClockHourOfDay.check(ch)?;
            }
            self.set(Field::HourOfDay, if ch == 24 { 0 } else { ch })?;
        }
        if let Some(ch) = self.fields.remove(Field::ClockHourOfAmPm) {
            if style == ResolverStyle::Strict
                || (style == ResolverStyle::Smart && ch != 0)
            {
                Field::ClockHourOfAmPm.check(ch)?;
            }
            self.set(Field::HourOfAmPm, if ch == 12 { 0 } else { ch })?;
        }
        if self.fields.contains(Field::AmPmOfDay)
            && self.fields.contains(Field::HourOfAmPm)
        {
            let ap = self.fields.remove(Field::AmPmOfDay).unwrap_or(0);
            let hap = self.fields.remove(Field::HourOfAmPm).unwrap_or(0);
            let hour = if strict {
                Field::AmPmOfDay.check(ap)? * 12
                    + Field::HourOfAmPm.check(hap)?
            } else {
                ap.checked_mul(12)
                    .and_then(|h| h.checked_add(hap))
                    .ok_or_else(|| overflow("hour of day", ap, hap))?
            };
            self.set(Field::HourOfDay, hour)?;
        }
        if let Some(nod) = self.take(Field::NanoOfDay, strict)? {
            self.set(Field::HourOfDay, nod / NANOS_PER_HOUR)?;
            self.set(Field::MinuteOfHour, (nod / NANOS_PER_MINUTE) % 60)?;
            self.set(Field::SecondOfMinute, (nod / NANOS_PER_SECOND) % 60)?;
            self.set(Field::NanoOfSecond, nod % NANOS_PER_SECOND)?;
        }
        if let Some(cod) = self.take(Field::MicroOfDay, strict)? {
            self.set(Field::SecondOfDay, cod / 1_000_000)?;
            self.set(Field::MicroOfSecond, cod % 1_000_000)?;
        }
        if let Some(lod) = self.take(Field::MilliOfDay, strict)? {
            self.set(Field::SecondOfDay, lod / 1_000)?;
            self.set(Field::MilliOfSecond, lod % 1_000)?;
        }
        if let Some(sod) = self.take(Field::SecondOfDay, strict)? {
            self.set(Field::HourOfDay, sod / 3600)?;
            self.set(Field::MinuteOfHour, (sod / 60) % 60)?;
            self.set(Field::SecondOfMinute, sod % 60)?;
        }
        if let Some(mod_) = self.take(Field::MinuteOfDay, strict)? {
            self.set(Field::HourOfDay, mod_ / 60)?;
            self.set(Field::MinuteOfHour, mod_ % 60)?;
        }

        // Partial seconds are only merged into an existing nanosecond here.
        // Merging them into nothing happens leniently at the end.
        if let Some(mut nos) = self.fields.get(Field::NanoOfSecond) {
            if strict {
                Field::NanoOfSecond.check(nos)?;
            }
            if let Some(cos) = self.take(Field::MicroOfSecond, strict)? {
                nos = cos
                    .checked_mul(1_000)
                    .and_then(|n| n.checked_add(nos % 1_000))
                    .ok_or_else(|| overflow("nanosecond", cos, nos))?;
                self.set(Field::NanoOfSecond, nos)?;
            }
            if let Some(los) = self.take(Field::MilliOfSecond, strict)? {
                let nos = los
                    .checked_mul(1_000_000)
                    .and_then(|n| n.checked_add(nos % 1_000_000))
                    .ok_or_else(|| overflow("nanosecond", los, nos))?;
                self.set(Field::NanoOfSecond, nos)?;
            }
        }

        let has = |field| self.fields.contains(field);
        if has(Field::HourOfDay)
            && has(Field::MinuteOfHour)
            && has(Field::SecondOfMinute)
            && has(Field::NanoOfSecond)
        {
            let hod = self.fields.remove(Field::HourOfDay).unwrap_or(0);
            let moh = self.fields.remove(Field::MinuteOfHour).unwrap_or(0);
            let som = self.fields.remove(Field::SecondOfMinute).unwrap_or(0);
            let nos = self.fields.remove(Field::NanoOfSecond).unwrap_or(0);
            self.resolve_time(style, hod, moh, som, nos)?;
        }
        Ok(())
    }

    /// Builds a time from incomplete time fields by defaulting the smaller
    /// units to zero, then validates the time fields left over.
    fn resolve_time_lenient(
        &mut self,
        style: ResolverStyle,
    ) -> Result<(), Error> {
        if self.time.is_none() {
            if let Some(los) = self.fields.remove(Field::MilliOfSecond) {
                let nos = match self.fields.remove(Field::MicroOfSecond) {
                    Some(cos) => {
                        let merged = los
                            .checked_mul(1_000)
                            .and_then(|c| c.checked_add(cos % 1_000))
                            .ok_or_else(|| overflow("microsecond", los, cos))?;
                        if merged != cos {
                            return Err(E::Conflict {
                                field: Field::MicroOfSecond,
                                old: cos,
                                new: merged,
                            }
                            .into());
                        }
                        merged.checked_mul(1_000)
                    }
                    None => los.checked_mul(1_000_000),
                };
                let nos = nos.ok_or_else(|| overflow("nanosecond", los, 0))?;
                self.fields.insert(Field::NanoOfSecond, nos);
            } else if let Some(cos) = self.fields.remove(Field::MicroOfSecond)
            {
                let nos = cos
                    .checked_mul(1_000)
                    .ok_or_else(|| overflow("nanosecond", cos, 0))?;
                self.fields.insert(Field::NanoOfSecond, nos);
            }

            if let Some(hod) = self.fields.get(Field::HourOfDay) {
                let moh = self.fields.get(Field::MinuteOfHour);
                let som = self.fields.get(Field::SecondOfMinute);
                let nos = self.fields.get(Field::NanoOfSecond);
                // A smaller unit without the larger one can't be defaulted.
                let gap = (moh.is_none() && (som.is_some() || nos.is_some()))
                    || (moh.is_some() && som.is_none() && nos.is_some());
                if !gap {
                    self.resolve_time(
                        style,
                        hod,
                        moh.unwrap_or(0),
                        som.unwrap_or(0),
                        nos.unwrap_or(0),
                    )?;
                    self.fields.remove(Field::HourOfDay);
                    self.fields.remove(Field::MinuteOfHour);
                    self.fields.remove(Field::SecondOfMinute);
                    self.fields.remove(Field::NanoOfSecond);
                }
            }
        }

        if style != ResolverStyle::Lenient {
            for (field, value) in self.fields.iter() {
                let custom = matches!(field, Field::Custom(_));
                if field.is_time_based() && !custom {
                    field.check(value)?;
                }
            }
        }
        Ok(())
    }

    fn resolve_time(
        &mut self,
        style: ResolverStyle,
        hod: i64,
        moh: i64,
        som: i64,
        nos: i64,
    ) -> Result<(), Error> {
        if style == ResolverStyle::Lenient {
            let total = hod
                .checked_mul(NANOS_PER_HOUR)
                .and_then(|t| {
                    t.checked_add(moh.checked_mul(NANOS_PER_MINUTE)?)
                })
                .and_then(|t| {
                    t.checked_add(som.checked_mul(NANOS_PER_SECOND)?)
                })
                .and_then(|t| t.checked_add(nos))
                .ok_or_else(|| {
                    Error::from_args(format_args!(
                        "time {hod}:{moh}:{som}.{nos} overflows \
                         a 64-bit nanosecond count",
                    ))
                })?;
            let excess = total.div_euclid(NANOS_PER_DAY);
            let nod = total.rem_euclid(NANOS_PER_DAY);
            let time = ITime::from_nanosecond(nod).to_jiff()?;
            return self.update_time(time, excess);
        }
        let moh = Field::MinuteOfHour.check(moh)?;
        let nos = Field::NanoOfSecond.check(nos)?;
        if style == ResolverStyle::Smart
            && hod == 24
            && moh == 0
            && som == 0
            && nos == 0
        {
            return self.update_time(Time::midnight(), 1);
        }
        let hod = Field::HourOfDay.check(hod)?;
        let som = Field::SecondOfMinute.check(som)?;
        // All four were checked above, so the casts are lossless.
        let time = Time::new(hod as i8, moh as i8, som as i8, nos as i32)?;
        self.update_time(time, 0)
    }

    /// Checks the fields left over against the resolved date and time,
    /// removing the ones that agree.
    fn cross_check(&mut self) -> Result<(), Error> {
        if self.fields.is_empty() {
            return Ok(());
        }
        let base = Temporal { chrono: self.chrono, ..Temporal::new() };
        if let Some(date) = self.date {
            let temporal = Temporal { date: Some(date), ..base.clone() };
            self.cross_check_with(&temporal)?;
        }
        if let Some(time) = self.time {
            let temporal = Temporal { time: Some(time), ..base.clone() };
            self.cross_check_with(&temporal)?;
            if self.date.is_some() && !self.fields.is_empty() {
                let target =
                    Temporal { date: self.date, time: Some(time), ..base };
                self.cross_check_with(&target)?;
            }
        }
        Ok(())
    }

    fn cross_check_with(&mut self, target: &Temporal) -> Result<(), Error> {
        for (field, parsed) in self.fields.iter() {
            let Some(derived) = target.get(field) else { continue };
            if parsed != derived {
                return Err(E::CrossCheck { field, parsed, derived }.into());
            }
        }
        self.fields.retain(|field, _| target.get(field).is_none());
        Ok(())
    }

    /// Moves days that the time of day overflowed into onto the date.
    fn resolve_excess_days(&mut self) -> Result<(), Error> {
        let (Some(date), Some(_)) = (self.date, self.time) else {
            return Ok(());
        };
        if self.excess_days != 0 {
            let date = IDate::from(date)
                .checked_add_days(self.excess_days)?
                .to_jiff()?;
            self.date = Some(date);
            self.excess_days = 0;
        }
        Ok(())
    }

    /// Fills in the sub-second fields when seconds were parsed without a
    /// full time, so that they can be queried consistently.
    fn resolve_fractional(&mut self) {
        if self.time.is_some() {
            return;
        }
        let has_seconds = self.fields.contains(Field::InstantSeconds)
            || self.fields.contains(Field::SecondOfDay)
            || self.fields.contains(Field::SecondOfMinute);
        if !has_seconds {
            return;
        }
        match self.fields.get(Field::NanoOfSecond) {
            Some(nos) => {
                self.fields.insert(Field::MicroOfSecond, nos / 1_000);
                self.fields.insert(Field::MilliOfSecond, nos / 1_000_000);
            }
            None => {
                self.fields.insert(Field::NanoOfSecond, 0);
                self.fields.insert(Field::MicroOfSecond, 0);
                self.fields.insert(Field::MilliOfSecond, 0);
            }
        }
    }

    /// Computes the instant when a date, time and offset or zone are
    /// available. A parsed offset wins over a zone.
    fn resolve_instant(&mut self) -> Result<(), Error> {
        let (Some(date), Some(time)) = (self.date, self.time) else {
            return Ok(());
        };
        let offset_seconds = self.fields.get(Field::OffsetSeconds);
        let tz = match (offset_seconds, self.zone.as_ref()) {
            (Some(seconds), _) => TimeZone::fixed(offset(seconds)?),
            (None, Some(zone)) => zone.time_zone(),
            (None, None) => return Ok(()),
        };
        let zdt = date.to_datetime(time).to_zoned(tz)?;
        self.fields.insert(Field::InstantSeconds, zdt.timestamp().as_second());
        Ok(())
    }

    /// Removes a field, checking its range unless resolving leniently.
    fn take(
        &mut self,
        field: Field,
        check: bool,
    ) -> Result<Option<i64>, Error> {
        let Some(value) = self.fields.remove(field) else { return Ok(None) };
        if check {
            field.check(value)?;
        }
        Ok(Some(value))
    }

    fn set(&mut self, field: Field, value: i64) -> Result<(), Error> {
        chrono::add_field_value(&mut self.fields, field, value)
    }

    fn update_date(&mut self, date: Date) -> Result<(), Error> {
        match self.date {
            Some(first) if first != date => {
                Err(E::DateConflict { first, second: date }.into())
            }
            _ => {
                self.date = Some(date);
                Ok(())
            }
        }
    }

    fn update_time(
        &mut self,
        time: Time,
        excess_days: i64,
    ) -> Result<(), Error> {
        let Some(first) = self.time else {
            self.time = Some(time);
            self.excess_days = excess_days;
            return Ok(());
        };
        if first != time {
            return Err(E::TimeConflict { first, second: time }.into());
        }
        if self.excess_days != 0
            && excess_days != 0
            && self.excess_days != excess_days
        {
            return Err(E::ExcessDaysConflict {
                first: self.excess_days,
                second: excess_days,
            }
            .into());
        }
        if excess_days != 0 {
            self.excess_days = excess_days;
        }
        Ok(())
    }
}

fn overflow(what: &str, a: i64, b: i64) -> Error {
    Error::from_args(format_args!(
        "{what} computed from {a} and {b} overflows a 64-bit integer",
    ))
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};

    use crate::{
        CustomField, Field, FieldRules, FieldValues, Formatter,
        FormatterBuilder, ParsePosition, Resolved, ResolverStyle, ValueRange,
    };

    fn fmt(pattern: &str, style: ResolverStyle) -> Formatter {
        Formatter::of_pattern(pattern).unwrap().with_resolver_style(style)
    }

    #[test]
    fn end_of_day() {
        let smart = fmt("HH:mm", ResolverStyle::Smart);
        let parsed = smart.parse("24:00").unwrap();
        assert_eq!(parsed.to_time().unwrap(), time(0, 0, 0, 0));
        assert_eq!(parsed.excess_days(), 1);

        let smart = fmt("uuuu-MM-dd HH:mm", ResolverStyle::Smart);
        let parsed = smart.parse("2024-12-31 24:00").unwrap();
        let dt = date(2025, 1, 1).at(0, 0, 0, 0);
        assert_eq!(parsed.to_datetime().unwrap(), dt);
        assert_eq!(parsed.excess_days(), 0);
        assert!(smart.parse("2024-12-31 24:01").unwrap_err().is_range());

        let strict = fmt("uuuu-MM-dd HH:mm", ResolverStyle::Strict);
        let err = strict.parse("2024-12-31 24:00").unwrap_err();
        assert!(err.is_range());
        assert_eq!(err.parse_error_index(), Some(0));
    }

    #[test]
    fn lenient_overflow() {
        let lenient = fmt("uuuu-MM-dd HH:mm:ss", ResolverStyle::Lenient);
        let parsed = lenient.parse("2024-01-31 25:61:61").unwrap();
        assert_eq!(
            parsed.to_datetime().unwrap(),
            date(2024, 2, 1).at(2, 2, 1, 0),
        );

        let lenient = fmt("HH:mm", ResolverStyle::Lenient);
        let parsed = lenient.parse("49:30").unwrap();
        assert_eq!(parsed.to_time().unwrap(), time(1, 30, 0, 0));
        assert_eq!(parsed.excess_days(), 2);
    }

    #[test]
    fn leap_second() {
        let fmt = fmt("HH:mm:ss", ResolverStyle::Strict);
        let parsed = fmt.parse("23:59:60").unwrap();
        assert_eq!(parsed.to_time().unwrap(), time(23, 59, 59, 0));
        assert!(parsed.is_leap_second());
    }

    #[test]
    fn clock_hours() {
        let fmt12 = fmt("h:mm a", ResolverStyle::Smart);
        let parsed = fmt12.parse("12:15 AM").unwrap();
        assert_eq!(parsed.to_time().unwrap(), time(0, 15, 0, 0));
        let parsed = fmt12.parse("12:15 PM").unwrap();
        assert_eq!(parsed.to_time().unwrap(), time(12, 15, 0, 0));

        let fmt24 = fmt("kk:mm", ResolverStyle::Strict);
        let parsed = fmt24.parse("24:30").unwrap();
        assert_eq!(parsed.to_time().unwrap(), time(0, 30, 0, 0));
        assert!(fmt24.parse("00:30").unwrap_err().is_range());
        // Smart mode lets a clock hour of zero through.
        let fmt24 = fmt("kk:mm", ResolverStyle::Smart);
        let parsed = fmt24.parse("00:30").unwrap();
        assert_eq!(parsed.to_time().unwrap(), time(0, 30, 0, 0));
    }

    #[test]
    fn hour_only() {
        let parsed = fmt("HH", ResolverStyle::Smart).parse("17").unwrap();
        assert_eq!(parsed.to_time().unwrap(), time(17, 0, 0, 0));
        // A second without a minute can't be defaulted.
        let fmt = FormatterBuilder::new()
            .append_value_width(Field::HourOfDay, 2)
            .unwrap()
            .append_literal_char(':')
            .append_value_width(Field::SecondOfMinute, 2)
            .unwrap()
            .build()
            .unwrap();
        let parsed = fmt.parse("17:45").unwrap();
        assert!(parsed.to_time().is_err());
        assert_eq!(parsed.get(Field::HourOfDay), Some(17));
        assert_eq!(parsed.get(Field::SecondOfMinute), Some(45));
        assert_eq!(parsed.get(Field::NanoOfSecond), Some(0));
    }

    #[test]
    fn second_of_day_and_fractions() {
        let fmt = FormatterBuilder::new()
            .append_value_width(Field::SecondOfDay, 5)
            .unwrap()
            .append_literal_char('.')
            .append_value_width(Field::MilliOfSecond, 3)
            .unwrap()
            .build()
            .unwrap();
        let parsed = fmt.parse("63005.250").unwrap();
        assert_eq!(parsed.to_time().unwrap(), time(17, 30, 5, 250_000_000));
    }

    #[test]
    fn cross_check() {
        let fmt = fmt("EEE uuuu-MM-dd", ResolverStyle::Smart);
        let parsed = fmt.parse("Sun 2024-07-14").unwrap();
        assert!(!parsed.fields().contains(Field::DayOfWeek));
        let err = fmt.parse("Mon 2024-07-14").unwrap_err();
        assert!(err.is_conflict());
        insta::assert_snapshot!(
            err,
            @"text `Mon 2024-07-14` could not be parsed: conflict found: field DayOfWeek has parsed value 1 which differs from value 7 of the resolved result",
        );

        let fmt = FormatterBuilder::new()
            .append_pattern("HH:mm")
            .unwrap()
            .append_literal_char(' ')
            .append_value_width(Field::AmPmOfDay, 1)
            .unwrap()
            .build()
            .unwrap();
        assert!(fmt.parse("17:30 1").is_ok());
        assert!(fmt.parse("17:30 0").unwrap_err().is_conflict());
    }

    #[test]
    fn duplicate_field_conflict() {
        let fmt = fmt("HH:mm '/' H", ResolverStyle::Smart);
        assert!(fmt.parse("17:30 / 17").is_ok());
        let mut pos = ParsePosition::new(0);
        // Parsing itself rejects a second different value for a field.
        let parsed = fmt.parse_unresolved("17:30 / 18", &mut pos).unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn resolver_fields() {
        let fmt = fmt("uuuu-MM-dd", ResolverStyle::Smart)
            .with_resolver_fields([Field::Year, Field::DayOfYear]);
        let parsed = fmt.parse("2024-07-14").unwrap();
        assert!(parsed.to_date().is_err());
        assert_eq!(parsed.get(Field::Year), Some(2024));
        assert_eq!(parsed.get(Field::MonthOfYear), None);
    }

    #[test]
    fn instant() {
        let fmt = fmt("uuuu-MM-dd HH:mm VV", ResolverStyle::Smart);
        let parsed = fmt.parse("2024-03-10 02:30 America/New_York").unwrap();
        // Times in a gap are moved forward.
        assert_eq!(
            parsed.to_timestamp().unwrap().to_string(),
            "2024-03-10T07:30:00Z",
        );
        // A parsed offset wins over the zone.
        let fmt = Formatter::of_pattern("uuuu-MM-dd HH:mm xxx").unwrap();
        let parsed = fmt.parse("2024-07-14 17:30 +02:00").unwrap();
        assert_eq!(parsed.get(Field::InstantSeconds), Some(1720971000));
    }

    #[test]
    fn instant_fields() {
        let fmt = FormatterBuilder::new()
            .append_value(Field::InstantSeconds)
            .append_offset("+HH:MM", "Z")
            .unwrap()
            .build()
            .unwrap();
        let parsed = fmt.parse("1720971000+02:00").unwrap();
        assert_eq!(parsed.to_date().unwrap(), date(2024, 7, 14));
        assert_eq!(parsed.to_time().unwrap(), time(17, 30, 0, 0));
        assert_eq!(parsed.get(Field::InstantSeconds), Some(1720971000));
    }

    #[derive(Debug)]
    struct DayOfDecade;

    impl FieldRules for DayOfDecade {
        fn name(&self) -> &'static str {
            "DayOfDecade"
        }

        fn range(&self) -> ValueRange {
            ValueRange::new(1, 3653)
        }

        fn is_date_based(&self) -> bool {
            true
        }

        fn resolve(
            &self,
            fields: &mut FieldValues,
            chronology: &'static dyn crate::Chronology,
            _: ResolverStyle,
        ) -> Result<Option<Resolved>, crate::Error> {
            let Some(day) = fields.remove(DAY_OF_DECADE) else {
                return Ok(None);
            };
            let Some(year) = fields.remove(Field::Year) else {
                fields.insert(DAY_OF_DECADE, day);
                return Ok(None);
            };
            let start = chronology.date(year - year.rem_euclid(10), 1, 1)?;
            let date = start.checked_add(jiff::Span::new().days(day - 1))?;
            Ok(Some(Resolved::Date(date)))
        }
    }

    const DAY_OF_DECADE: Field = Field::Custom(CustomField::new(&DayOfDecade));

    #[derive(Debug)]
    struct Spinner;

    impl FieldRules for Spinner {
        fn name(&self) -> &'static str {
            "Spinner"
        }

        fn range(&self) -> ValueRange {
            ValueRange::new(0, i64::MAX)
        }

        fn resolve(
            &self,
            fields: &mut FieldValues,
            _: &'static dyn crate::Chronology,
            _: ResolverStyle,
        ) -> Result<Option<Resolved>, crate::Error> {
            let value = fields.get(SPINNER).unwrap_or(0);
            fields.insert(SPINNER, value + 1);
            Ok(None)
        }
    }

    const SPINNER: Field = Field::Custom(CustomField::new(&Spinner));

    #[test]
    fn custom_field_hook() {
        let fmt = FormatterBuilder::new()
            .append_value_width(Field::Year, 4)
            .unwrap()
            .append_literal_char('/')
            .append_value(DAY_OF_DECADE)
            .build()
            .unwrap();
        let parsed = fmt.parse("2024/45").unwrap();
        assert_eq!(parsed.to_date().unwrap(), date(2020, 2, 14));
        assert!(parsed.fields().is_empty());
    }

    #[test]
    fn runaway_hook() {
        let fmt = FormatterBuilder::new()
            .append_value(SPINNER)
            .build()
            .unwrap();
        insta::assert_snapshot!(
            fmt.parse("1").unwrap_err(),
            @"text `1` could not be parsed: one of the parsed fields has an incorrectly implemented resolve method",
        );
    }
}
