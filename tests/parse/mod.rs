use jiff::civil::{date, time};
use jiff_pattern::{
    Field, Formatter, FormatterBuilder, ParsePosition, ResolverStyle,
};

use crate::Result;

#[test]
fn adjacent_values_split() -> Result {
    let fmt = FormatterBuilder::new()
        .append_value(Field::Year)
        .append_value_width(Field::MonthOfYear, 2)?
        .build()?;
    let parsed = fmt.parse("201106")?;
    assert_eq!(parsed.get(Field::Year), Some(2011));
    assert_eq!(parsed.get(Field::MonthOfYear), Some(6));

    let fmt = Formatter::of_pattern("uuuuMMddHHmmss")?;
    let parsed = fmt.parse("20240714173005")?;
    assert_eq!(parsed.to_datetime()?, date(2024, 7, 14).at(17, 30, 5, 0));
    Ok(())
}

#[test]
fn reduced_year_window() -> Result {
    let fmt = FormatterBuilder::new()
        .append_value_reduced(Field::Year, 2, 4, 1980)?
        .build()?;
    assert_eq!(fmt.parse("12")?.get(Field::Year), Some(2012));
    assert_eq!(fmt.parse("80")?.get(Field::Year), Some(1980));
    assert_eq!(fmt.parse("79")?.get(Field::Year), Some(2079));
    assert_eq!(fmt.parse("1915")?.get(Field::Year), Some(1915));
    Ok(())
}

#[test]
fn fraction_of_minute() -> Result {
    let fmt = FormatterBuilder::new()
        .append_fraction(Field::MinuteOfHour, 0, 9, true)?
        .build()?;
    assert_eq!(fmt.format(time(0, 15, 0, 0))?, ".25");
    let mut pos = ParsePosition::new(0);
    let parsed = fmt.parse_unresolved(".25", &mut pos)?.unwrap();
    assert_eq!(parsed.get(Field::MinuteOfHour), Some(15));
    Ok(())
}

#[test]
fn end_of_day_and_leap_second() -> Result {
    let fmt = Formatter::of_pattern("HH:mm")?;
    let parsed = fmt.parse("24:00")?;
    assert_eq!(parsed.to_time()?, time(0, 0, 0, 0));
    assert_eq!(parsed.excess_days(), 1);

    let strict = fmt.with_resolver_style(ResolverStyle::Strict);
    assert!(strict.parse("24:00").is_err());

    let fmt = Formatter::of_pattern("HH:mm:ss")?;
    let parsed = fmt.parse("23:59:60")?;
    assert!(parsed.is_leap_second());
    assert_eq!(parsed.to_time()?, time(23, 59, 59, 0));
    Ok(())
}

#[test]
fn strict_and_lenient_months() -> Result {
    let fmt = Formatter::of_pattern("uuuu-MM-dd")?;
    let lenient = fmt.clone().with_resolver_style(ResolverStyle::Lenient);
    assert_eq!(lenient.parse("2024-13-01")?.to_date()?, date(2025, 1, 1));

    let strict = fmt.with_resolver_style(ResolverStyle::Strict);
    let err = strict.parse("2024-13-01").unwrap_err();
    assert!(err.is_range(), "{err}");
    assert_eq!(err.parse_error_index(), Some(0));
    Ok(())
}

#[test]
fn optional_sections_parse() -> Result {
    let fmt = Formatter::of_pattern("HH[:mm]")?;
    let parsed = fmt.parse("09")?;
    assert_eq!(parsed.get(Field::HourOfDay), Some(9));
    assert_eq!(parsed.get(Field::MinuteOfHour), None);

    let parsed = fmt.parse("09:45")?;
    assert_eq!(parsed.to_time()?, time(9, 45, 0, 0));
    Ok(())
}

#[test]
fn zone_ids_match_longest() -> Result {
    let fmt = Formatter::of_pattern("VV")?;
    let parsed = fmt.parse("Etc/GMT-2")?;
    assert_eq!(parsed.zone().unwrap().to_string(), "Etc/GMT-2");

    let parsed = fmt.parse("Etc/GMT")?;
    assert_eq!(parsed.zone().unwrap().to_string(), "Etc/GMT");
    Ok(())
}

#[test]
fn zoned_datetimes() -> Result {
    let fmt = Formatter::of_pattern("uuuu-MM-dd HH:mm VV")?;
    let zdt = fmt.parse("2024-11-03 01:30 America/New_York")?.to_zoned()?;
    // The earlier of the two ambiguous offsets is used.
    assert_eq!(zdt.to_string(), "2024-11-03T01:30:00-04:00[America/New_York]");

    let fmt = Formatter::of_pattern("uuuu-MM-dd HH:mm")?
        .with_zone("Asia/Tokyo".parse()?);
    let zdt = fmt.parse("2024-07-14 09:00")?.to_zoned()?;
    assert_eq!(zdt.to_string(), "2024-07-14T09:00:00+09:00[Asia/Tokyo]");
    Ok(())
}

#[test]
fn case_and_strictness() -> Result {
    let fmt = FormatterBuilder::new()
        .parse_case_insensitive()
        .append_pattern("d MMM uuuu")?
        .build()?;
    assert_eq!(fmt.parse("14 JUL 2024")?.to_date()?, date(2024, 7, 14));

    let fmt = Formatter::of_pattern("d MMM uuuu")?;
    assert_eq!(
        fmt.parse("14 JUL 2024").unwrap_err().parse_error_index(),
        Some(3),
    );

    let fmt = FormatterBuilder::new()
        .parse_lenient()
        .append_pattern("d MMM uuuu")?
        .build()?;
    assert_eq!(fmt.parse("14 July 2024")?.to_date()?, date(2024, 7, 14));
    Ok(())
}

#[test]
fn defaults_and_filters() -> Result {
    let fmt = FormatterBuilder::new()
        .append_pattern("uuuu-MM")?
        .parse_defaulting(Field::DayOfMonth, 1)
        .build()?;
    assert_eq!(fmt.parse("2024-07")?.to_date()?, date(2024, 7, 1));

    // Only the year and day of year take part in resolution. The month and
    // day of month stay behind.
    let fmt = Formatter::of_pattern("uuuu-DDD MM-dd")?.with_resolver_fields([
        Field::Year,
        Field::DayOfYear,
    ]);
    let parsed = fmt.parse("2024-196 01-01")?;
    assert_eq!(parsed.to_date()?, date(2024, 7, 14));
    assert_eq!(parsed.fields().get(Field::MonthOfYear), None);
    Ok(())
}
