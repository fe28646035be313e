/*!
Compiles pattern strings like `uuuu-MM-dd'T'HH:mm` into builder calls.

Every run of the same ASCII letter is one field, where the number of
repetitions selects the width or the text style. Text in single quotes is
literal, with `''` standing for one quote. Square brackets delimit optional
sections. The characters `#`, `{` and `}` are reserved. Everything else is
literal.
*/

use jiff::civil::date;

use crate::{
    error::{pattern::Error as E, Error},
    field::Field,
    fmt::{builder::FormatterBuilder, node::Number},
    style::{SignStyle, TextStyle},
};

/// Offset patterns selected by the count of `X` and `x`.
static OFFSET_PATTERNS: &[&str] = &[
    "+HH",
    "+HHmm",
    "+HH:mm",
    "+HHMM",
    "+HH:MM",
    "+HHMMss",
    "+HH:MM:ss",
    "+HHMMSS",
    "+HH:MM:SS",
];

/// Returns the field for the letters that map directly to one.
fn field(letter: char) -> Option<Field> {
    let field = match letter {
        'G' => Field::Era,
        'y' => Field::YearOfEra,
        'u' => Field::Year,
        'Q' | 'q' => Field::QuarterOfYear,
        'M' | 'L' => Field::MonthOfYear,
        'D' => Field::DayOfYear,
        'd' => Field::DayOfMonth,
        'F' => Field::AlignedWeekOfMonth,
        'E' | 'c' | 'e' => Field::DayOfWeek,
        'a' => Field::AmPmOfDay,
        'H' => Field::HourOfDay,
        'k' => Field::ClockHourOfDay,
        'K' => Field::HourOfAmPm,
        'h' => Field::ClockHourOfAmPm,
        'm' => Field::MinuteOfHour,
        's' => Field::SecondOfMinute,
        'S' => Field::NanoOfSecond,
        'A' => Field::MilliOfDay,
        'n' => Field::NanoOfSecond,
        'N' => Field::NanoOfDay,
        _ => return None,
    };
    Some(field)
}

/// Appends the nodes for `pattern` to `builder`.
pub(super) fn compile(
    mut builder: FormatterBuilder,
    pattern: &str,
) -> Result<FormatterBuilder, Error> {
    trace!("compiling pattern `{pattern}`");
    let chars: Vec<char> = pattern.chars().collect();
    let mut pos = 0;
    // The number of optional sections opened by this pattern. A `]` may
    // only close one of these.
    let mut depth = 0usize;
    while pos < chars.len() {
        let cur = chars[pos];
        if cur.is_ascii_alphabetic() {
            let (mut letter, mut count) = run(&chars, pos);
            pos += count;
            if letter == 'p' {
                let Some(&next) = chars.get(pos) else {
                    return Err(E::PadWithoutPattern.into());
                };
                if !next.is_ascii_alphabetic() {
                    return Err(E::PadWithoutPattern.into());
                }
                builder = builder.pad_next(count)?;
                (letter, count) = run(&chars, pos);
                pos += count;
            }
            builder = letters(builder, letter, count)?;
        } else if cur == '\'' {
            let (literal, end) = quoted(&chars, pos)?;
            builder = builder.append_literal(&literal);
            pos = end;
        } else if cur == '[' {
            builder = builder.optional_start();
            depth += 1;
            pos += 1;
        } else if cur == ']' {
            if depth == 0 {
                return Err(E::UnmatchedOptionalEnd.into());
            }
            builder = builder.optional_end()?;
            depth -= 1;
            pos += 1;
        } else if matches!(cur, '#' | '{' | '}') {
            return Err(E::Reserved { ch: cur }.into());
        } else {
            builder = builder.append_literal_char(cur);
            pos += 1;
        }
    }
    Ok(builder)
}

/// Returns the letter at `start` and how many times it repeats.
fn run(chars: &[char], start: usize) -> (char, usize) {
    let letter = chars[start];
    let count = chars[start..].iter().take_while(|&&ch| ch == letter).count();
    (letter, count)
}

/// Parses the quoted literal starting at `start` and returns it with the
/// position just past the closing quote.
fn quoted(chars: &[char], start: usize) -> Result<(String, usize), Error> {
    let mut literal = String::new();
    let mut pos = start + 1;
    loop {
        match chars.get(pos) {
            None => return Err(E::IncompleteLiteral.into()),
            Some('\'') if chars.get(pos + 1) == Some(&'\'') => {
                literal.push('\'');
                pos += 2;
            }
            Some('\'') => break,
            Some(&ch) => {
                literal.push(ch);
                pos += 1;
            }
        }
    }
    // `''` on its own is a quote.
    if pos == start + 1 {
        literal.push('\'');
    }
    Ok((literal, pos + 1))
}

fn letters(
    builder: FormatterBuilder,
    letter: char,
    count: usize,
) -> Result<FormatterBuilder, Error> {
    if let Some(field) = field(letter) {
        return field_letters(builder, letter, count, field);
    }
    let too_many = || Error::from(E::TooManyLetters { letter, count });
    let builder = match letter {
        'z' => match count {
            1..=3 => builder.append_zone_text(TextStyle::Short),
            4 => builder.append_zone_text(TextStyle::Full),
            _ => return Err(too_many()),
        },
        'V' => {
            if count != 2 {
                return Err(E::InvalidCount { letter, count, expected: "2" }
                    .into());
            }
            builder.append_zone_id()
        }
        'Z' => match count {
            1..=3 => builder.append_offset("+HHMM", "+0000")?,
            4 => builder.append_localized_offset(TextStyle::Full)?,
            5 => builder.append_offset("+HH:MM:ss", "Z")?,
            _ => return Err(too_many()),
        },
        'O' => match count {
            1 => builder.append_localized_offset(TextStyle::Short)?,
            4 => builder.append_localized_offset(TextStyle::Full)?,
            _ => {
                return Err(E::InvalidCount {
                    letter,
                    count,
                    expected: "1 or 4",
                }
                .into())
            }
        },
        'X' | 'x' => {
            if count > 5 {
                return Err(too_many());
            }
            let index = if count == 1 { 1 } else { count + 1 };
            let pattern = OFFSET_PATTERNS[index];
            let no_offset = match (letter, count) {
                ('X', _) => "Z",
                (_, 1) => "+00",
                (_, 2 | 4) => "+0000",
                _ => "+00:00",
            };
            builder.append_offset(pattern, no_offset)?
        }
        'W' => {
            if count > 1 {
                return Err(too_many());
            }
            builder.append_number(Number::week_based('W', count, count, count))
        }
        'w' => {
            if count > 2 {
                return Err(too_many());
            }
            builder.append_number(Number::week_based('w', count, count, 2))
        }
        'Y' => {
            let max = if count == 2 { 2 } else { 19 };
            if count > 19 {
                return Err(too_many());
            }
            builder.append_number(Number::week_based('Y', count, count, max))
        }
        _ => return Err(E::UnknownLetter { letter }.into()),
    };
    Ok(builder)
}

fn field_letters(
    builder: FormatterBuilder,
    letter: char,
    count: usize,
    field: Field,
) -> Result<FormatterBuilder, Error> {
    let too_many = || Error::from(E::TooManyLetters { letter, count });
    let builder = match letter {
        'u' | 'y' => match count {
            2 => builder.append_value_reduced_from_date(
                field,
                2,
                2,
                date(2000, 1, 1),
            )?,
            1 | 3 => builder.append_value_range(
                field,
                count,
                19,
                SignStyle::Normal,
            )?,
            _ => builder.append_value_range(
                field,
                count,
                19,
                SignStyle::ExceedsPad,
            )?,
        },
        'c' if count == 1 => {
            builder.append_number(Number::week_based('c', 1, 1, 1))
        }
        'c' if count == 2 => {
            return Err(E::InvalidCount {
                letter,
                count,
                expected: "1 or at least 3",
            }
            .into());
        }
        'M' | 'L' | 'Q' | 'q' | 'E' | 'e' | 'c' => {
            let standalone = matches!(letter, 'L' | 'q' | 'c');
            let style = match count {
                1 | 2 => {
                    return Ok(match letter {
                        'e' => builder.append_number(Number::week_based(
                            'e', count, count, count,
                        )),
                        'E' => builder.append_text(field, TextStyle::Short),
                        _ if count == 1 => builder.append_value(field),
                        _ => builder.append_value_width(field, 2)?,
                    });
                }
                3 => TextStyle::Short,
                4 => TextStyle::Full,
                5 => TextStyle::Narrow,
                _ => return Err(too_many()),
            };
            let style = if standalone { style.as_standalone() } else { style };
            builder.append_text(field, style)
        }
        'a' => match count {
            1 => builder.append_text(field, TextStyle::Short),
            _ => return Err(too_many()),
        },
        'G' => match count {
            1..=3 => builder.append_text(field, TextStyle::Short),
            4 => builder.append_text(field, TextStyle::Full),
            5 => builder.append_text(field, TextStyle::Narrow),
            _ => return Err(too_many()),
        },
        'S' => builder.append_fraction(field, count, count, false)?,
        'F' => match count {
            1 => builder.append_value(field),
            _ => return Err(too_many()),
        },
        'd' | 'h' | 'H' | 'k' | 'K' | 'm' | 's' => match count {
            1 => builder.append_value(field),
            2 => builder.append_value_width(field, 2)?,
            _ => return Err(too_many()),
        },
        'D' => match count {
            1 => builder.append_value(field),
            2 | 3 => builder.append_value_range(
                field,
                count,
                3,
                SignStyle::NotNegative,
            )?,
            _ => return Err(too_many()),
        },
        _ => match count {
            1 => builder.append_value(field),
            _ => builder.append_value_width(field, count)?,
        },
    };
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};

    use crate::{Field, Formatter};

    fn compiled(pattern: &str) -> String {
        Formatter::of_pattern(pattern).unwrap().to_string()
    }

    fn error(pattern: &str) -> String {
        Formatter::of_pattern(pattern).unwrap_err().to_string()
    }

    #[test]
    fn numbers() {
        insta::assert_snapshot!(
            compiled("uuuu-MM-dd"),
            @"Value(Year,4,19,ExceedsPad)'-'Value(MonthOfYear,2)'-'Value(DayOfMonth,2)",
        );
        insta::assert_snapshot!(
            compiled("y yyy D DD"),
            @"Value(YearOfEra)' 'Value(YearOfEra,3,19,Normal)' 'Value(DayOfYear)' 'Value(DayOfYear,2,3,NotNegative)",
        );
        insta::assert_snapshot!(
            compiled("uu"),
            @"ReducedValue(Year,2,2,2000-01-01)",
        );
        insta::assert_snapshot!(
            compiled("H:m:s n A NN"),
            @"Value(HourOfDay)':'Value(MinuteOfHour)':'Value(SecondOfMinute)' 'Value(NanoOfSecond)' 'Value(MilliOfDay)' 'Value(NanoOfDay,2)",
        );
    }

    #[test]
    fn adjacent() {
        insta::assert_snapshot!(
            compiled("uuuuMMddHHmm"),
            @"Value(Year,4,19,ExceedsPad)Value(MonthOfYear,2)Value(DayOfMonth,2)Value(HourOfDay,2)Value(MinuteOfHour,2)",
        );
        let fmt = Formatter::of_pattern("uuuuMMddHHmmssSSS").unwrap();
        let parsed = fmt.parse("20240714173005250").unwrap();
        assert_eq!(
            parsed.to_datetime().unwrap(),
            date(2024, 7, 14).at(17, 30, 5, 250_000_000),
        );

        let fmt = Formatter::of_pattern("uuuuMM").unwrap();
        let parsed = fmt.parse("201106").unwrap();
        assert_eq!(parsed.get(Field::Year), Some(2011));
        assert_eq!(parsed.get(Field::MonthOfYear), Some(6));

        // A literal breaks the chain, so the year is greedy again.
        let fmt = Formatter::of_pattern("u'-'MM").unwrap();
        let parsed = fmt.parse("12345-06").unwrap();
        assert_eq!(parsed.get(Field::Year), Some(12345));
    }

    #[test]
    fn text() {
        insta::assert_snapshot!(
            compiled("MMM MMMM MMMMM LLL"),
            @"Text(MonthOfYear,Short)' 'Text(MonthOfYear)' 'Text(MonthOfYear,Narrow)' 'Text(MonthOfYear,ShortStandalone)",
        );
        insta::assert_snapshot!(
            compiled("E EEEE ccc G GGGG a"),
            @"Text(DayOfWeek,Short)' 'Text(DayOfWeek)' 'Text(DayOfWeek,ShortStandalone)' 'Text(Era,Short)' 'Text(Era)' 'Text(AmPmOfDay,Short)",
        );
        insta::assert_snapshot!(
            compiled("Q QQ QQQ"),
            @"Value(QuarterOfYear)' 'Value(QuarterOfYear,2)' 'Text(QuarterOfYear,Short)",
        );

        let fmt = Formatter::of_pattern("EEEE, MMMM d, uuuu h:mm a").unwrap();
        let dt = date(2024, 7, 14).at(17, 5, 0, 0);
        assert_eq!(fmt.format(dt).unwrap(), "Sunday, July 14, 2024 5:05 PM");
        let parsed = fmt.parse("Sunday, July 14, 2024 5:05 PM").unwrap();
        assert_eq!(parsed.to_datetime().unwrap(), dt);
    }

    #[test]
    fn fractions() {
        insta::assert_snapshot!(
            compiled("ss.SSS"),
            @"Value(SecondOfMinute,2)'.'Fraction(NanoOfSecond,3,3)",
        );
        let fmt = Formatter::of_pattern("HH:mm:ss.SSSSSS").unwrap();
        assert_eq!(
            fmt.format(time(9, 5, 1, 123_456_789)).unwrap(),
            "09:05:01.123456",
        );
        insta::assert_snapshot!(
            error("S".repeat(10).as_str()),
            @"minimum fraction width must be in the range 0..=9, but got 10",
        );
    }

    #[test]
    fn offsets() {
        let cases = [
            ("X", "+0530"),
            ("XX", "+0530"),
            ("XXX", "+05:30"),
            ("XXXX", "+0530"),
            ("XXXXX", "+05:30"),
            ("Z", "+0530"),
            ("ZZZZ", "GMT+05:30"),
            ("ZZZZZ", "+05:30"),
            ("O", "GMT+5:30"),
            ("OOOO", "GMT+05:30"),
        ];
        let zdt = date(2024, 7, 14)
            .at(12, 0, 0, 0)
            .to_zoned(jiff::tz::TimeZone::get("Asia/Kolkata").unwrap())
            .unwrap();
        for (pattern, expected) in cases {
            let fmt = Formatter::of_pattern(pattern).unwrap();
            assert_eq!(fmt.format(&zdt).unwrap(), expected, "{pattern}");
        }

        let utc =
            jiff::Timestamp::UNIX_EPOCH.to_zoned(jiff::tz::TimeZone::UTC);
        let cases = [
            ("X", "Z"),
            ("x", "+00"),
            ("xx", "+0000"),
            ("xxx", "+00:00"),
            ("xxxx", "+0000"),
            ("xxxxx", "+00:00"),
            ("Z", "+0000"),
            ("ZZZZZ", "Z"),
        ];
        for (pattern, expected) in cases {
            let fmt = Formatter::of_pattern(pattern).unwrap();
            assert_eq!(fmt.format(&utc).unwrap(), expected, "{pattern}");
        }
        insta::assert_snapshot!(
            error("XXXXXX"),
            @"too many pattern letters: `X` repeated 6 times",
        );
        insta::assert_snapshot!(
            error("OO"),
            @"pattern letter `O` repeated 2 times is invalid, expected 1 or 4",
        );
    }

    #[test]
    fn zones() {
        insta::assert_snapshot!(compiled("VV"), @"ZoneId()");
        insta::assert_snapshot!(
            error("V"),
            @"pattern letter `V` repeated 1 times is invalid, expected 2",
        );
        insta::assert_snapshot!(
            error("zzzzz"),
            @"too many pattern letters: `z` repeated 5 times",
        );
    }

    #[test]
    fn week_based() {
        insta::assert_snapshot!(
            compiled("YYYY-'W'ww-e"),
            @"Localized(WeekBasedYear,4,19,ExceedsPad)'-''W'Localized(WeekOfWeekBasedYear,2)'-'Localized(DayOfWeek,1)",
        );
        insta::assert_snapshot!(
            error("ww w www"),
            @"too many pattern letters: `w` repeated 3 times",
        );
        insta::assert_snapshot!(
            error("cc"),
            @"pattern letter `c` repeated 2 times is invalid, expected 1 or at least 3",
        );
    }

    #[test]
    fn literals() {
        insta::assert_snapshot!(
            compiled("'it''s' '' HH"),
            @"'it''s'' '''' 'Value(HourOfDay,2)",
        );
        let fmt = Formatter::of_pattern("'o''clock' h").unwrap();
        assert_eq!(fmt.format(time(9, 0, 0, 0)).unwrap(), "o'clock 9");
        insta::assert_snapshot!(
            error("HH 'oops"),
            @"pattern ends with an incomplete quoted literal",
        );
    }

    #[test]
    fn sections() {
        insta::assert_snapshot!(
            compiled("HH[:mm[:ss]]"),
            @"Value(HourOfDay,2)[':'Value(MinuteOfHour,2)[':'Value(SecondOfMinute,2)]]",
        );
        // Unclosed sections are closed at the end.
        insta::assert_snapshot!(
            compiled("HH[:mm"),
            @"Value(HourOfDay,2)[':'Value(MinuteOfHour,2)]",
        );
        insta::assert_snapshot!(
            error("HH]"),
            @"found end of optional section `]` without a previous start `[`",
        );
    }

    #[test]
    fn padding() {
        insta::assert_snapshot!(
            compiled("pppH"),
            @"Pad(Value(HourOfDay),3,' ')",
        );
        insta::assert_snapshot!(
            error("p"),
            @"pad letter `p` must be followed by a pattern letter",
        );
        insta::assert_snapshot!(
            error("p-"),
            @"pad letter `p` must be followed by a pattern letter",
        );
    }

    #[test]
    fn errors() {
        insta::assert_snapshot!(
            error("HHH"),
            @"too many pattern letters: `H` repeated 3 times",
        );
        insta::assert_snapshot!(
            error("aa"),
            @"too many pattern letters: `a` repeated 2 times",
        );
        insta::assert_snapshot!(
            error("MMMMMM"),
            @"too many pattern letters: `M` repeated 6 times",
        );
        insta::assert_snapshot!(
            error("uuuu-MM-dd #"),
            @"pattern includes reserved character `#`",
        );
        insta::assert_snapshot!(
            error("{"),
            @"pattern includes reserved character `{`",
        );
        insta::assert_snapshot!(error("b"), @"unknown pattern letter `b`");
        insta::assert_snapshot!(
            error("n".repeat(20).as_str()),
            @"width must be in the range 1..=19, but got 20",
        );
        // Non-ASCII letters are literals.
        insta::assert_snapshot!(compiled("ñ"), @"'ñ'");
    }
}
