use crate::{
    error::{pattern::Error as P, Error},
    field::Field,
    fmt::{
        context::{ParseContext, PrintContext},
        util::{push_zeros, DecimalFormatter},
    },
};

const NANOS_PER_UNIT: i128 = 1_000_000_000;

/// A field with a fixed range, printed as a fraction of that range.
///
/// For example, a `MinuteOfHour` of `15` is the fraction `0.25` of the range
/// `0..=59`. Only the nine most significant digits are kept, and trailing
/// zeros are dropped down to the minimum width.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fraction {
    field: Field,
    min_width: usize,
    max_width: usize,
    decimal_point: bool,
}

impl Fraction {
    pub(crate) fn new(
        field: Field,
        min_width: usize,
        max_width: usize,
        decimal_point: bool,
    ) -> Result<Fraction, Error> {
        if !field.range().is_fixed() {
            return Err(P::FieldNotFixed { field }.into());
        }
        if min_width > 9 {
            return Err(P::Width {
                what: "minimum fraction width",
                given: min_width,
                min: 0,
                max: 9,
            }
            .into());
        }
        if !(1..=9).contains(&max_width) {
            return Err(P::Width {
                what: "maximum fraction width",
                given: max_width,
                min: 1,
                max: 9,
            }
            .into());
        }
        if max_width < min_width {
            return Err(
                P::WidthOrder { min: min_width, max: max_width }.into()
            );
        }
        Ok(Fraction { field, min_width, max_width, decimal_point })
    }

    /// Returns true when this node can reserve its width as the subsequent
    /// width of a preceding variable width node.
    pub(crate) fn is_fixed_adjacent(&self) -> bool {
        self.min_width == self.max_width && !self.decimal_point
    }

    pub(crate) fn max_width(&self) -> usize {
        self.max_width
    }

    pub(crate) fn format(
        &self,
        ctx: &mut PrintContext<'_>,
        buf: &mut String,
    ) -> Result<bool, Error> {
        let Some(value) = ctx.value(self.field)? else { return Ok(false) };
        let style = ctx.decimal_style();
        let range = self.field.range();
        range.check(self.field, value)?;
        let min = i128::from(range.minimum());
        let span = i128::from(range.maximum()) - min + 1;
        let nanos = (i128::from(value) - min) * NANOS_PER_UNIT / span;
        if nanos == 0 {
            if self.min_width > 0 {
                if self.decimal_point {
                    buf.push(style.decimal_separator());
                }
                push_zeros(style, self.min_width, buf);
            }
            return Ok(true);
        }
        let mut scale = 9;
        let mut significant = nanos;
        while significant % 10 == 0 {
            significant /= 10;
            scale -= 1;
        }
        let scale = scale.clamp(self.min_width, self.max_width);
        let digits = nanos / 10i128.pow((9 - scale) as u32);
        if self.decimal_point {
            buf.push(style.decimal_separator());
        }
        DecimalFormatter::new()
            .padding(scale as u8)
            .format(digits as u64)
            .push_to(style, buf);
        Ok(true)
    }

    pub(crate) fn parse(
        &self,
        ctx: &mut ParseContext<'_>,
        text: &[char],
        pos: usize,
    ) -> Result<usize, usize> {
        let fixed = ctx.is_strict() && self.is_fixed_adjacent();
        let (min_width, max_width) = if ctx.is_strict() || fixed {
            (self.min_width, self.max_width)
        } else {
            (0, 9)
        };
        let style = *ctx.decimal_style();
        let mut start = pos;
        if self.decimal_point {
            match text.get(pos) {
                Some(&ch) if ch == style.decimal_separator() => start += 1,
                _ if min_width > 0 => return Err(pos),
                _ => return Ok(pos),
            }
        } else if pos == text.len() {
            return if min_width > 0 { Err(pos) } else { Ok(pos) };
        }
        let min_end = start + min_width;
        if min_end > text.len() {
            return Err(start);
        }
        let max_end = core::cmp::min(start + max_width, text.len());
        let mut total: i128 = 0;
        let mut end = start;
        while end < max_end {
            let Some(digit) = style.convert_to_digit(text[end]) else {
                if end < min_end {
                    return Err(start);
                }
                break;
            };
            total = total * 10 + i128::from(digit);
            end += 1;
        }
        let range = self.field.range();
        let min = i128::from(range.minimum());
        let span = i128::from(range.maximum()) - min + 1;
        let digits = (end - start) as u32;
        let value = total * span / 10i128.pow(digits) + min;
        // The value is within the field's range, which fits in an i64.
        let value = i64::try_from(value).map_err(|_| start)?;
        ctx.set_field(self.field, value, start, end)
    }
}

impl core::fmt::Display for Fraction {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let Fraction { field, min_width, max_width, decimal_point } = *self;
        write!(f, "Fraction({field},{min_width},{max_width}")?;
        if decimal_point {
            f.write_str(",DecimalPoint")?;
        }
        f.write_str(")")
    }
}
