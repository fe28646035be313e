use crate::{
    error::{pattern::Error as P, Error},
    field::Field,
    fmt::{
        context::{ParseContext, PrintContext},
        util::{ascii_digit, push_two_digits},
    },
    style::TextStyle,
    util::escape,
};

/// The supported offset patterns.
///
/// Lowercase letters are printed only when non-zero. A pattern with colons
/// has an even index.
pub(crate) static PATTERNS: [&str; 9] = [
    "+HH", "+HHmm", "+HH:mm", "+HHMM", "+HH:MM", "+HHMMss", "+HH:MM:ss",
    "+HHMMSS", "+HH:MM:SS",
];

/// An offset from UTC like `+01:30`, with the text printed for a zero
/// offset.
#[derive(Clone, Debug)]
pub(crate) struct OffsetId {
    kind: usize,
    no_offset: Box<str>,
}

impl OffsetId {
    pub(crate) fn new(
        pattern: &str,
        no_offset: &str,
    ) -> Result<OffsetId, Error> {
        let Some(kind) = PATTERNS.iter().position(|&p| p == pattern) else {
            return Err(P::InvalidOffsetPattern { pattern: pattern.into() }
                .into());
        };
        Ok(OffsetId { kind, no_offset: no_offset.into() })
    }

    /// The offset used after a zone id prefix like `UTC`, with `no_offset`
    /// as the text for a zero offset.
    pub(crate) fn zone_suffix(no_offset: &str) -> OffsetId {
        OffsetId { kind: 6, no_offset: no_offset.into() }
    }

    fn has_colons(&self) -> bool {
        self.kind % 2 == 0
    }

    pub(crate) fn format(
        &self,
        ctx: &mut PrintContext<'_>,
        buf: &mut String,
    ) -> Result<bool, Error> {
        let Some(total) = ctx.value(Field::OffsetSeconds)? else {
            return Ok(false);
        };
        if total == 0 {
            buf.push_str(&self.no_offset);
            return Ok(true);
        }
        let hours = ((total / 3600) % 100).abs();
        let minutes = ((total / 60) % 60).abs();
        let seconds = (total % 60).abs();
        let start = buf.len();
        buf.push(if total < 0 { '-' } else { '+' });
        push_two_digits(hours, buf);
        let mut output = hours;
        if self.kind >= 3 || (self.kind >= 1 && minutes > 0) {
            if self.has_colons() {
                buf.push(':');
            }
            push_two_digits(minutes, buf);
            output += minutes;
            if self.kind >= 7 || (self.kind >= 5 && seconds > 0) {
                if self.has_colons() {
                    buf.push(':');
                }
                push_two_digits(seconds, buf);
                output += seconds;
            }
        }
        if output == 0 {
            // Only hours beyond 99 were present.
            buf.truncate(start);
            buf.push_str(&self.no_offset);
        }
        Ok(true)
    }

    pub(crate) fn parse(
        &self,
        ctx: &mut ParseContext<'_>,
        text: &[char],
        pos: usize,
    ) -> Result<usize, usize> {
        let (seconds, end) = self.parse_seconds(ctx, text, pos)?;
        ctx.set_field(Field::OffsetSeconds, seconds, pos, end)
    }

    /// Parses an offset without recording it, returning its total seconds
    /// and the position after it.
    pub(crate) fn parse_seconds(
        &self,
        ctx: &ParseContext<'_>,
        text: &[char],
        pos: usize,
    ) -> Result<(i64, usize), usize> {
        if self.no_offset.is_empty() {
            if pos == text.len() {
                return Ok((0, pos));
            }
        } else {
            if pos == text.len() {
                return Err(pos);
            }
            if let Some(end) = ctx.matches(text, pos, &self.no_offset) {
                return Ok((0, end));
            }
        }
        let sign = text[pos];
        if sign == '+' || sign == '-' {
            let mut parts = [pos + 1, 0, 0, 0];
            let ok = self.parse_part(&mut parts, 1, text, true)
                && self.parse_part(&mut parts, 2, text, self.kind >= 3)
                && self.parse_part(&mut parts, 3, text, false);
            if ok {
                let [end, h, m, s] = parts.map(|p| p as i64);
                let seconds = h * 3600 + m * 60 + s;
                let seconds = if sign == '-' { -seconds } else { seconds };
                return Ok((seconds, end as usize));
            }
        }
        if self.no_offset.is_empty() {
            return Ok((0, pos));
        }
        Err(pos)
    }

    /// Parses two digits for the hour, minute or second at `index` of
    /// `parts`, where `parts[0]` is the cursor.
    ///
    /// This returns false only when the part is required and missing.
    fn parse_part(
        &self,
        parts: &mut [usize; 4],
        index: usize,
        text: &[char],
        required: bool,
    ) -> bool {
        if (self.kind + 3) / 2 < index {
            return true;
        }
        let mut pos = parts[0];
        if self.has_colons() && index > 1 {
            if text.get(pos) != Some(&':') {
                return !required;
            }
            pos += 1;
        }
        let (Some(d1), Some(d2)) =
            (ascii_digit(text, pos), ascii_digit(text, pos + 1))
        else {
            return !required;
        };
        let value = d1 * 10 + d2;
        if value > 59 {
            return !required;
        }
        parts[index] = value as usize;
        parts[0] = pos + 2;
        true
    }
}

impl core::fmt::Display for OffsetId {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "Offset({},'{}')",
            PATTERNS[self.kind],
            escape::Str(&self.no_offset.replace('\'', "''")),
        )
    }
}

/// An offset in the localized `GMT` format, like `GMT+8` or `GMT+08:00`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LocalizedOffset {
    style: TextStyle,
}

impl LocalizedOffset {
    pub(crate) fn new(style: TextStyle) -> Result<LocalizedOffset, Error> {
        match style.as_normal() {
            TextStyle::Full | TextStyle::Short => {
                Ok(LocalizedOffset { style: style.as_normal() })
            }
            _ => Err(P::LocalizedOffsetStyle { style }.into()),
        }
    }

    fn is_full(&self) -> bool {
        self.style == TextStyle::Full
    }

    pub(crate) fn format(
        &self,
        ctx: &mut PrintContext<'_>,
        buf: &mut String,
    ) -> Result<bool, Error> {
        let Some(total) = ctx.value(Field::OffsetSeconds)? else {
            return Ok(false);
        };
        buf.push_str("GMT");
        if total == 0 {
            return Ok(true);
        }
        let hours = ((total / 3600) % 100).abs();
        let minutes = ((total / 60) % 60).abs();
        let seconds = (total % 60).abs();
        buf.push(if total < 0 { '-' } else { '+' });
        if self.is_full() {
            push_two_digits(hours, buf);
            buf.push(':');
            push_two_digits(minutes, buf);
            if seconds != 0 {
                buf.push(':');
                push_two_digits(seconds, buf);
            }
            return Ok(true);
        }
        if hours >= 10 {
            buf.push(char::from(b'0' + (hours / 10) as u8));
        }
        buf.push(char::from(b'0' + (hours % 10) as u8));
        if minutes != 0 || seconds != 0 {
            buf.push(':');
            push_two_digits(minutes, buf);
            if seconds != 0 {
                buf.push(':');
                push_two_digits(seconds, buf);
            }
        }
        Ok(true)
    }

    pub(crate) fn parse(
        &self,
        ctx: &mut ParseContext<'_>,
        text: &[char],
        pos: usize,
    ) -> Result<usize, usize> {
        let Some(mut cur) = ctx.matches(text, pos, "GMT") else {
            return Err(pos);
        };
        let negative = match text.get(cur) {
            Some('+') => false,
            Some('-') => true,
            _ => return ctx.set_field(Field::OffsetSeconds, 0, pos, cur),
        };
        cur += 1;
        let (mut m, mut s) = (0, 0);
        let h = if self.is_full() {
            let (Some(h1), Some(h2)) =
                (ascii_digit(text, cur), ascii_digit(text, cur + 1))
            else {
                return Err(pos);
            };
            if text.get(cur + 2) != Some(&':') {
                return Err(pos);
            }
            let (Some(m1), Some(m2)) =
                (ascii_digit(text, cur + 3), ascii_digit(text, cur + 4))
            else {
                return Err(pos);
            };
            cur += 5;
            m = m1 * 10 + m2;
            if let Some(secs) = colon_pair(text, cur) {
                s = secs;
                cur += 3;
            }
            h1 * 10 + h2
        } else {
            let Some(h1) = ascii_digit(text, cur) else { return Err(pos) };
            cur += 1;
            let h = match ascii_digit(text, cur) {
                Some(h2) => {
                    cur += 1;
                    h1 * 10 + h2
                }
                None => h1,
            };
            if let Some(mins) = colon_pair(text, cur) {
                m = mins;
                cur += 3;
                if let Some(secs) = colon_pair(text, cur) {
                    s = secs;
                    cur += 3;
                }
            }
            h
        };
        let total = h * 3600 + m * 60 + s;
        let total = if negative { -total } else { total };
        ctx.set_field(Field::OffsetSeconds, total, pos, cur)
    }
}

/// Returns the two digit number after a colon at `pos`.
fn colon_pair(text: &[char], pos: usize) -> Option<i64> {
    if text.get(pos) != Some(&':') {
        return None;
    }
    Some(ascii_digit(text, pos + 1)? * 10 + ascii_digit(text, pos + 2)?)
}

impl core::fmt::Display for LocalizedOffset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "LocalizedOffset({:?})", self.style)
    }
}

#[cfg(test)]
mod tests {
    use jiff::tz;

    use crate::{
        Field, Formatter, FormatterBuilder, ParsePosition, Temporal, TextStyle,
    };

    fn offset(pattern: &str, no_offset: &str) -> Formatter {
        FormatterBuilder::new()
            .append_offset(pattern, no_offset)
            .unwrap()
            .build()
            .unwrap()
    }

    fn seconds(fmt: &Formatter, text: &str) -> Option<(i64, usize)> {
        let mut pos = ParsePosition::new(0);
        let parsed = fmt.parse_unresolved(text, &mut pos).unwrap()?;
        Some((parsed.get(Field::OffsetSeconds)?, pos.index()))
    }

    fn at(hours: i8, minutes: i8, secs: i8) -> Temporal {
        let total = i32::from(hours) * 3600
            + i32::from(minutes) * 60
            + i32::from(secs);
        Temporal::from(tz::Offset::from_seconds(total).unwrap())
    }

    #[test]
    fn format_patterns() {
        let cases = [
            ("+HH", "+01", "+01"),
            ("+HHmm", "+01", "+0130"),
            ("+HH:mm", "+01", "+01:30"),
            ("+HHMM", "+0100", "+0130"),
            ("+HH:MM", "+01:00", "+01:30"),
            ("+HHMMss", "+0100", "+0130"),
            ("+HH:MM:ss", "+01:00", "+01:30"),
            ("+HHMMSS", "+010000", "+013000"),
            ("+HH:MM:SS", "+01:00:00", "+01:30:00"),
        ];
        for (pattern, whole, half) in cases {
            let fmt = offset(pattern, "Z");
            assert_eq!(fmt.format(at(1, 0, 0)).unwrap(), whole, "{pattern}");
            assert_eq!(fmt.format(at(1, 30, 0)).unwrap(), half, "{pattern}");
            assert_eq!(fmt.format(at(0, 0, 0)).unwrap(), "Z", "{pattern}");
        }
        let fmt = offset("+HH:MM:ss", "Z");
        assert_eq!(fmt.format(at(-5, -30, -15)).unwrap(), "-05:30:15");
        insta::assert_snapshot!(fmt, @"Offset(+HH:MM:ss,'Z')");
    }

    #[test]
    fn parse_patterns() {
        let fmt = offset("+HH:MM:ss", "Z");
        assert_eq!(seconds(&fmt, "+01:30"), Some((5400, 6)));
        assert_eq!(seconds(&fmt, "-01:30:15"), Some((-5415, 9)));
        assert_eq!(seconds(&fmt, "Z"), Some((0, 1)));
        assert_eq!(seconds(&fmt, "+01"), None);
        assert_eq!(seconds(&fmt, "+01:60"), None);

        let fmt = offset("+HH", "Z");
        // Minutes aren't part of the pattern and so are left unparsed.
        assert_eq!(seconds(&fmt, "+0130"), Some((3600, 3)));

        let fmt = offset("+HHmm", "");
        assert_eq!(seconds(&fmt, "+01"), Some((3600, 3)));
        assert_eq!(seconds(&fmt, "+0130"), Some((5400, 5)));
        // An empty zero offset text matches nothing.
        assert_eq!(seconds(&fmt, "x"), Some((0, 0)));
    }

    #[test]
    fn pattern_letters() {
        let t = at(5, 30, 0);
        let fmt =
            Formatter::of_pattern("X XX XXX x xx xxx Z ZZZZ ZZZZZ").unwrap();
        insta::assert_snapshot!(
            fmt.format(t).unwrap(),
            @"+0530 +0530 +05:30 +0530 +0530 +05:30 +0530 GMT+05:30 +05:30",
        );
        let t = at(0, 0, 0);
        insta::assert_snapshot!(
            fmt.format(t).unwrap(),
            @"Z Z Z +00 +0000 +00:00 +0000 GMT Z",
        );
    }

    #[test]
    fn localized() {
        let full = FormatterBuilder::new()
            .append_localized_offset(TextStyle::Full)
            .unwrap()
            .build()
            .unwrap();
        let short = Formatter::of_pattern("O").unwrap();
        assert_eq!(full.format(at(8, 0, 0)).unwrap(), "GMT+08:00");
        assert_eq!(short.format(at(8, 0, 0)).unwrap(), "GMT+8");
        assert_eq!(short.format(at(-10, -30, 0)).unwrap(), "GMT-10:30");
        assert_eq!(full.format(at(0, 0, 0)).unwrap(), "GMT");
        insta::assert_snapshot!(short, @"LocalizedOffset(Short)");

        assert_eq!(seconds(&full, "GMT+08:00"), Some((8 * 3600, 9)));
        assert_eq!(seconds(&full, "GMT+8"), None);
        assert_eq!(seconds(&short, "GMT+8"), Some((8 * 3600, 5)));
        assert_eq!(seconds(&short, "GMT-10:30:15"), Some((-37815, 12)));
        assert_eq!(seconds(&short, "GMT"), Some((0, 3)));
        assert_eq!(seconds(&short, "UTC"), None);

        let err = FormatterBuilder::new()
            .append_localized_offset(TextStyle::Narrow)
            .unwrap_err();
        insta::assert_snapshot!(
            err,
            @"localized offset style must be full or short, but got Narrow",
        );
    }
}
