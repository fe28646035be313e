/*!
This crate provides pattern based formatting and parsing for [`jiff`]
datetimes.

A pattern like `uuuu-MM-dd HH:mm` is compiled into an immutable tree of
printer-parser nodes, held by a [`Formatter`]. Formatting walks the tree and
asks each node to render the fields it knows about. Parsing walks the same
tree, but in reverse: each node consumes some text and records raw
`(field, value)` pairs. Those raw pairs are then *resolved* into a date, a
time, an offset, a time zone or an instant, according to a [`ResolverStyle`]:

* [`ResolverStyle::Strict`] rejects anything that isn't exactly valid.
* [`ResolverStyle::Smart`] (the default) accepts a few reasonable
deviations, like `24:00` meaning midnight of the next day, and clamps the
day of month to the end of the month.
* [`ResolverStyle::Lenient`] lets out of range values overflow into the
next larger unit.

# Example: format and parse a civil datetime

```
use jiff::civil::date;
use jiff_pattern::Formatter;

let fmt = Formatter::of_pattern("uuuu-MM-dd HH:mm:ss")?;
let dt = date(2024, 7, 14).at(17, 30, 5, 0);
assert_eq!(fmt.format(dt)?, "2024-07-14 17:30:05");

let parsed = fmt.parse("2024-07-14 17:30:05")?;
assert_eq!(parsed.to_datetime()?, dt);

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Example: adjacent values

A variable width field followed by fixed width fields, with nothing in
between, still parses. The fixed width fields reserve the digits they need:

```
use jiff::civil::date;
use jiff_pattern::{Field, Formatter, FormatterBuilder};

let fmt = FormatterBuilder::new()
    .append_value(Field::Year)
    .append_value_width(Field::MonthOfYear, 2)?
    .append_value_width(Field::DayOfMonth, 2)?
    .build()?;
let parsed = fmt.parse("20110623")?;
assert_eq!(parsed.to_date()?, date(2011, 6, 23));

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Example: optional sections

Sections in square brackets are optional. When formatting, a section whose
fields aren't available is omitted. When parsing, a section that doesn't
match is skipped.

```
use jiff::civil::time;
use jiff_pattern::{Field, Formatter};

let fmt = Formatter::of_pattern("HH[:mm]")?;
let parsed = fmt.parse("09")?;
assert_eq!(parsed.get(Field::HourOfDay), Some(9));
assert_eq!(parsed.get(Field::MinuteOfHour), None);

assert_eq!(fmt.format(time(9, 15, 0, 0))?, "09:15");

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Pattern syntax

A pattern is a sequence of letters, literals and optional sections. A run
of the same ASCII letter is one field, and the length of the run (the
count) selects how it is printed:

| Letter | Meaning | Counts |
| ------ | ------- | ------ |
| `G` | era | 1-3 short text (`AD`), 4 full, 5 narrow |
| `u` | proleptic year | 2 reduced to two digits, otherwise at least `count` digits |
| `y` | year of era | like `u` |
| `D` | day of year | 1 number, 2-3 zero padded to `count` |
| `M` / `L` | month of year | 1 number, 2 padded, 3 short text, 4 full, 5 narrow (`L` is standalone) |
| `d` | day of month | 1 or 2 |
| `Q` / `q` | quarter of year | like `M` / `L` |
| `Y` | week based year | like `u`, using the locale's week definition |
| `w` | week of week based year | 1 or 2 |
| `W` | week of month | 1 |
| `E` | day of week | 1-3 short text (`Tue`), 4 full, 5 narrow |
| `e` / `c` | localized day of week | 1-2 number, 3 short text, 4 full, 5 narrow (`c` is standalone and can't be 2) |
| `F` | aligned week of month | 1 |
| `a` | am/pm of day | 1 |
| `h` | clock hour of am/pm (1-12) | 1 or 2 |
| `K` | hour of am/pm (0-11) | 1 or 2 |
| `k` | clock hour of day (1-24) | 1 or 2 |
| `H` | hour of day (0-23) | 1 or 2 |
| `m` | minute of hour | 1 or 2 |
| `s` | second of minute | 1 or 2 |
| `S` | fraction of second | `count` fractional digits |
| `A` | millisecond of day | 1 number, otherwise padded to `count` |
| `n` | nanosecond of second | like `A` |
| `N` | nanosecond of day | like `A` |
| `V` | zone id | 2 (`America/New_York`) |
| `z` | zone name | 1-3 short (`EST`), 4 full |
| `O` | localized offset | 1 (`GMT+8`), 4 (`GMT+08:00`) |
| `X` | offset, `Z` for zero | 1 `+08`/`+0830`, 2 `+0830`, 3 `+08:30`, 4 `+083015`, 5 `+08:30:15` |
| `x` | offset | like `X`, but zero is printed as `+00`, `+0000` or `+00:00` |
| `Z` | offset | 1-3 `+0800`, 4 like `OOOO`, 5 like `XXXXX` |
| `p` | pad the next field | the count is the pad width, like `ppH` |

Text in single quotes is literal, and `''` is a single quote. Any other
character that isn't an ASCII letter is literal too, except for the
reserved characters `#`, `{` and `}`. Square brackets delimit optional
sections, which may nest. Sections left open are closed at the end of the
pattern.

# Crate features

* **std** (enabled by default) - Uses the standard library. The process wide
caches for text tables, localized patterns and zone prefix trees require it.
* **logging** - Emits log messages via the [`log`](https://docs.rs/log)
crate. Mostly useful for debugging cache behavior.
* **serde** - Provides `Serialize` and `Deserialize` impls for the
configuration types ([`ResolverStyle`], [`SignStyle`], [`TextStyle`],
[`FormatStyle`], [`Locale`] and [`DecimalStyle`]).
*/

#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_debug_implementations)]

pub use crate::{
    chrono::{Chronology, ISO, THAI_BUDDHIST},
    error::Error,
    field::{
        CustomField, Field, FieldRules, FieldValues, Resolved, ValueRange,
        WeekDef,
    },
    fmt::{builder::FormatterBuilder, Formatter, ParsePosition},
    locale::Locale,
    parsed::Parsed,
    style::{DecimalStyle, FormatStyle, ResolverStyle, SignStyle, TextStyle},
    temporal::Temporal,
    text::{EnglishText, TextProvider, ZoneNameKind},
    zone::ZoneId,
};

#[macro_use]
mod logging;

mod chrono;
mod error;
mod field;
mod fmt;
mod locale;
mod parsed;
mod style;
mod temporal;
mod text;
mod util;
mod week;
mod zone;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topscratch() {
        let _ = env_logger::try_init();

        let fmt = Formatter::of_pattern("uuuu-MM-dd'T'HH:mm").unwrap();
        let got = fmt.format(jiff::civil::date(2024, 7, 14).at(9, 5, 0, 0));
        assert_eq!(got.unwrap(), "2024-07-14T09:05");
    }

    #[test]
    fn send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Formatter>();
        assert_send_sync::<FormatterBuilder>();
        assert_send_sync::<Parsed>();
        assert_send_sync::<Error>();
    }
}
