use crate::style::DecimalStyle;

/// A simple formatter for converting unsigned integers to ASCII digits.
///
/// This avoids going through the formatting machinery for what is by far
/// the most common operation when formatting a pattern.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DecimalFormatter {
    minimum_digits: u8,
}

impl DecimalFormatter {
    /// Creates a new decimal formatter using the default configuration.
    pub(crate) const fn new() -> DecimalFormatter {
        DecimalFormatter { minimum_digits: 0 }
    }

    /// Format the given value using this configuration as a decimal ASCII
    /// number.
    pub(crate) const fn format(&self, value: u64) -> Decimal {
        Decimal::new(self, value)
    }

    /// The minimum number of digits that this number should be formatted
    /// with. If the number would have fewer digits than this, then it is
    /// padded out with zeros until the minimum is reached.
    ///
    /// The minimum number of digits is capped at the maximum number of digits
    /// for a u64 value (which is 20).
    pub(crate) const fn padding(self, mut digits: u8) -> DecimalFormatter {
        if digits > Decimal::MAX_U64_DIGITS {
            digits = Decimal::MAX_U64_DIGITS;
        }
        DecimalFormatter { minimum_digits: digits }
    }
}

impl Default for DecimalFormatter {
    fn default() -> DecimalFormatter {
        DecimalFormatter::new()
    }
}

/// A formatted decimal number that can be converted to a string.
#[derive(Debug)]
pub(crate) struct Decimal {
    buf: [u8; Self::MAX_U64_DIGITS as usize],
    start: u8,
}

impl Decimal {
    /// Discovered via `u64::MAX.to_string().len()`.
    const MAX_U64_DIGITS: u8 = 20;

    const fn new(formatter: &DecimalFormatter, mut value: u64) -> Decimal {
        let mut decimal = Decimal {
            buf: [0; Self::MAX_U64_DIGITS as usize],
            start: Self::MAX_U64_DIGITS,
        };
        loop {
            decimal.start -= 1;
            decimal.buf[decimal.start as usize] = b'0' + (value % 10) as u8;
            value /= 10;
            if value == 0 {
                break;
            }
        }
        while decimal.len() < formatter.minimum_digits {
            decimal.start -= 1;
            decimal.buf[decimal.start as usize] = b'0';
        }
        decimal
    }

    /// Returns the number of digits.
    pub(crate) const fn len(&self) -> u8 {
        Self::MAX_U64_DIGITS - self.start
    }

    /// Returns the ASCII digits of this number.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf[usize::from(self.start)..]
    }

    /// Appends the digits to `buf`, converted to the digits of the given
    /// style.
    pub(crate) fn push_to(&self, style: &DecimalStyle, buf: &mut String) {
        for &byte in self.as_bytes() {
            buf.push(digit(style, byte - b'0'));
        }
    }
}

/// Returns the character for a digit in the given style.
pub(crate) fn digit(style: &DecimalStyle, digit: u8) -> char {
    let zero = u32::from(style.zero_digit());
    char::from_u32(zero + u32::from(digit))
        .unwrap_or(char::from(b'0' + digit))
}

/// Appends `count` zero digits of the given style to `buf`.
pub(crate) fn push_zeros(
    style: &DecimalStyle,
    count: usize,
    buf: &mut String,
) {
    for _ in 0..count {
        buf.push(style.zero_digit());
    }
}

/// Appends a number in `0..=99` as two ASCII digits.
pub(crate) fn push_two_digits(value: i64, buf: &mut String) {
    let value = value.rem_euclid(100) as u8;
    buf.push(char::from(b'0' + value / 10));
    buf.push(char::from(b'0' + value % 10));
}

/// Returns the value of an ASCII digit at `pos`, if there is one.
pub(crate) fn ascii_digit(text: &[char], pos: usize) -> Option<i64> {
    let &ch = text.get(pos)?;
    ch.to_digit(10).filter(|_| ch.is_ascii()).map(i64::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal() {
        let x = DecimalFormatter::new().format(u64::MAX);
        assert_eq!(x.as_bytes(), b"18446744073709551615");
        assert_eq!(x.len(), 20);

        let x = DecimalFormatter::new().format(0);
        assert_eq!(x.as_bytes(), b"0");

        let x = DecimalFormatter::new().padding(4).format(7);
        assert_eq!(x.as_bytes(), b"0007");

        let x = DecimalFormatter::new().padding(2).format(12345);
        assert_eq!(x.as_bytes(), b"12345");

        let x = DecimalFormatter::new().padding(30).format(1);
        assert_eq!(x.len(), 20);
    }

    #[test]
    fn styled_digits() {
        let style = DecimalStyle::STANDARD.with_zero_digit('\u{0660}');
        let mut buf = String::new();
        DecimalFormatter::new().format(2024).push_to(&style, &mut buf);
        assert_eq!(buf, "\u{0662}\u{0660}\u{0662}\u{0664}");

        let mut buf = String::new();
        push_two_digits(7, &mut buf);
        push_zeros(&DecimalStyle::STANDARD, 2, &mut buf);
        assert_eq!(buf, "0700");
    }

    #[test]
    fn ascii_digits() {
        let text: Vec<char> = "1x\u{0661}".chars().collect();
        assert_eq!(ascii_digit(&text, 0), Some(1));
        assert_eq!(ascii_digit(&text, 1), None);
        assert_eq!(ascii_digit(&text, 2), None);
        assert_eq!(ascii_digit(&text, 3), None);
    }
}
