use jiff::{
    civil::{date, time},
    tz::{self, TimeZone},
};
use jiff_pattern::{
    DecimalStyle, Field, FormatStyle, Formatter, FormatterBuilder, Locale,
    SignStyle, Temporal, TextStyle,
};

use crate::Result;

#[test]
fn common_patterns() -> Result {
    let _ = crate::Logger::init();

    let zdt = date(2024, 3, 9)
        .at(7, 4, 5, 6_000_000)
        .to_zoned(TimeZone::get("America/New_York").unwrap())
        .unwrap();
    let cases = [
        ("uuuu-MM-dd", "2024-03-09"),
        ("d/M/uu", "9/3/24"),
        ("uuuuMMdd'T'HHmmss", "20240309T070405"),
        ("HH:mm:ss.SSS", "07:04:05.006"),
        ("h:mm a", "7:04 AM"),
        ("EEE, d MMM uuuu HH:mm:ss Z", "Sat, 9 Mar 2024 07:04:05 -0500"),
        ("EEEE', 'MMMM d", "Saturday, March 9"),
        ("uuuu-DDD", "2024-069"),
        ("QQQ uuuu", "Q1 2024"),
        ("G yyyy", "AD 2024"),
        ("VV", "America/New_York"),
        ("xxx", "-05:00"),
        ("'week' w", "week 10"),
    ];
    for (pattern, expected) in cases {
        let fmt = Formatter::of_pattern(pattern)?;
        assert_eq!(fmt.format(&zdt)?, expected, "pattern: {pattern}");
    }
    Ok(())
}

#[test]
fn optional_sections_are_omitted() -> Result {
    let fmt = Formatter::of_pattern("HH[:mm]")?;
    let only_hour = Temporal::new().with_field(Field::HourOfDay, 9);
    assert_eq!(fmt.format(only_hour)?, "09");
    assert_eq!(fmt.format(time(9, 15, 0, 0))?, "09:15");

    // Outside a section, a missing field is an error.
    let fmt = Formatter::of_pattern("HH:mm")?;
    let err = fmt.format(date(2024, 7, 14)).unwrap_err();
    assert!(err.is_format(), "{err}");
    Ok(())
}

#[test]
fn widths_and_signs() -> Result {
    let fmt = FormatterBuilder::new()
        .append_value_range(Field::Year, 4, 10, SignStyle::ExceedsPad)?
        .build()?;
    assert_eq!(fmt.format(date(2024, 1, 1))?, "2024");
    assert_eq!(fmt.format(date(-44, 1, 1))?, "-0044");
    assert_eq!(fmt.format(date(9999, 1, 1))?, "9999");

    let fmt = FormatterBuilder::new()
        .append_value_range(Field::Year, 2, 4, SignStyle::Always)?
        .build()?;
    assert_eq!(fmt.format(date(24, 1, 1))?, "+24");

    // A value wider than the maximum width can't be printed.
    let fmt = FormatterBuilder::new()
        .append_value_range(Field::DayOfYear, 1, 2, SignStyle::NotNegative)?
        .build()?;
    assert!(fmt.format(date(2024, 12, 31)).unwrap_err().is_format());
    Ok(())
}

#[test]
fn localized() -> Result {
    let dt = date(2024, 7, 14).at(17, 30, 0, 0);
    let fmt = Formatter::of_localized_datetime(FormatStyle::Short);
    assert_eq!(fmt.format(dt)?, "7/14/24, 5:30 PM");

    let fmt = Formatter::of_localized_date(FormatStyle::Full)
        .with_locale(Locale::new("en", Some("GB"))?);
    assert_eq!(fmt.format(dt)?, "Sunday, 14 July 2024");
    Ok(())
}

#[test]
fn decimal_style() -> Result {
    let style = DecimalStyle::STANDARD
        .with_zero_digit('٠')
        .with_decimal_separator(',');
    let fmt = Formatter::of_pattern("HH:mm:ss.SSS")?.with_decimal_style(style);
    assert_eq!(fmt.format(time(9, 5, 1, 500_000_000))?, "٠٩:٠٥:٠١.٥٠٠");

    let fmt = FormatterBuilder::new()
        .append_fraction(Field::MinuteOfHour, 0, 9, true)?
        .build()?
        .with_decimal_style(style);
    assert_eq!(fmt.format(time(0, 15, 0, 0))?, ",٢٥");
    Ok(())
}

#[test]
fn text_styles() -> Result {
    let fmt = FormatterBuilder::new()
        .append_text(Field::MonthOfYear, TextStyle::Narrow)
        .append_literal_char(' ')
        .append_text(Field::DayOfWeek, TextStyle::Full)
        .build()?;
    assert_eq!(fmt.format(date(2024, 7, 14))?, "J Sunday");

    let fmt = FormatterBuilder::new()
        .append_text_with(
            Field::AmPmOfDay,
            [(0, "in the morning"), (1, "in the afternoon")],
        )
        .build()?;
    assert_eq!(fmt.format(time(15, 0, 0, 0))?, "in the afternoon");
    Ok(())
}

#[test]
fn offsets_and_zones() -> Result {
    let ts = jiff::Timestamp::from_second(1_720_992_605).unwrap();
    let fmt = Formatter::of_pattern("uuuu-MM-dd'T'HH:mm:ssXXX'['VV']'")?;

    let zdt = ts.to_zoned(TimeZone::get("Europe/Paris").unwrap());
    assert_eq!(fmt.format(&zdt)?, "2024-07-14T23:30:05+02:00[Europe/Paris]");

    let zdt = ts.to_zoned(TimeZone::UTC);
    assert_eq!(fmt.format(&zdt)?, "2024-07-14T21:30:05Z[UTC]");

    let fmt = Formatter::of_pattern("ZZZZ")?;
    let zdt = ts.to_zoned(TimeZone::fixed(tz::offset(-3)));
    assert_eq!(fmt.format(&zdt)?, "GMT-03:00");
    Ok(())
}
