use jiff::{
    civil::{Date, DateTime, Time},
    tz::TimeZone,
    Timestamp,
};
use jiff_pattern::{FormatStyle, Formatter};

/// Builds a datetime in the years 1 through 9999 from arbitrary numbers.
fn datetime(y: u16, m: u8, d: u8, h: u8, mi: u8, s: u8, ns: u32) -> DateTime {
    let year = 1 + (y % 9999) as i16;
    let month = 1 + (m % 12) as i8;
    let date = Date::new(year, month, 1).unwrap();
    let day = 1 + (d % date.days_in_month() as u8) as i8;
    let date = Date::new(year, month, day).unwrap();
    let time = Time::new(
        (h % 24) as i8,
        (mi % 60) as i8,
        (s % 60) as i8,
        (ns % 1_000_000_000) as i32,
    )
    .unwrap();
    date.to_datetime(time)
}

fn roundtrip(fmt: &Formatter, dt: DateTime) -> DateTime {
    let text = fmt.format(dt).unwrap();
    fmt.parse(&text).unwrap().to_datetime().unwrap()
}

quickcheck::quickcheck! {
    fn prop_iso_like(
        y: u16,
        m: u8,
        d: u8,
        h: u8,
        mi: u8,
        s: u8,
        ns: u32
    ) -> bool {
        let fmt =
            Formatter::of_pattern("uuuu-MM-dd'T'HH:mm:ss.SSSSSSSSS").unwrap();
        let dt = datetime(y, m, d, h, mi, s, ns);
        roundtrip(&fmt, dt) == dt
    }

    fn prop_adjacent(y: u16, m: u8, d: u8, h: u8, mi: u8, s: u8) -> bool {
        let fmt = Formatter::of_pattern("uuuuMMddHHmmss").unwrap();
        let dt = datetime(y, m, d, h, mi, s, 0);
        roundtrip(&fmt, dt) == dt
    }

    fn prop_text(y: u16, m: u8, d: u8, h: u8, mi: u8) -> bool {
        let fmt = Formatter::of_pattern("EEEE, d MMMM uuuu h:mm a").unwrap();
        let dt = datetime(y, m, d, h, mi, 0, 0);
        roundtrip(&fmt, dt) == dt
    }

    fn prop_localized(y: u16, m: u8, d: u8, h: u8, mi: u8, s: u8) -> bool {
        let fmt = Formatter::of_localized_date_time(
            FormatStyle::Medium,
            FormatStyle::Medium,
        );
        let dt = datetime(y, m, d, h, mi, s, 0);
        roundtrip(&fmt, dt) == dt
    }

    fn prop_ordinal(y: u16, m: u8, d: u8) -> bool {
        let fmt = Formatter::of_pattern("uuuu-DDD").unwrap();
        let date = datetime(y, m, d, 0, 0, 0, 0).date();
        let text = fmt.format(date).unwrap();
        fmt.parse(&text).unwrap().to_date().unwrap() == date
    }

    fn prop_instant(seconds: i32, ns: u32) -> bool {
        let fmt = Formatter::of_pattern(
            "uuuu-MM-dd'T'HH:mm:ss.SSSSSSSSSXXXXX",
        )
        .unwrap();
        let ts = Timestamp::new(
            i64::from(seconds),
            (ns % 1_000_000_000) as i32,
        )
        .unwrap();
        let zdt = ts.to_zoned(TimeZone::UTC);
        let text = fmt.format(&zdt).unwrap();
        fmt.parse(&text).unwrap().to_timestamp().unwrap() == ts
    }
}
