use jiff::civil::{date, Date};

use crate::{
    error::{format::Error as E, Error},
    field::Field,
    fmt::{
        context::{ParseContext, PrintContext},
        util::{push_zeros, DecimalFormatter},
    },
    locale::Locale,
    style::SignStyle,
};

/// The base date used by two digit week based years.
const WEEK_BASED_BASE: Date = date(2000, 1, 1);

/// What a numeric node prints.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Target {
    Field(Field),
    /// A week field whose definition depends on the locale. The concrete
    /// field is determined for every call.
    WeekBased { letter: char, count: usize },
}

/// The value relative to which a reduced value is printed and parsed.
#[derive(Clone, Copy, Debug)]
pub(crate) enum ReducedBase {
    Value(i64),
    /// A date whose field value in the effective chronology is the base.
    Date(Date),
}

/// A numeric value, optionally reduced to its low order digits.
///
/// When parsing, a variable width number followed by fixed width numbers
/// (with no other nodes in between) reserves `subsequent_width` digits for
/// them. For example, the year in `uuuuMMdd` reads all of `20110623` at
/// first, and then gives back four digits for the month and day.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Number {
    target: Target,
    min_width: usize,
    max_width: usize,
    sign: SignStyle,
    subsequent_width: usize,
    fixed_width: bool,
    reduced: Option<ReducedBase>,
}

impl Number {
    pub(crate) fn new(
        field: Field,
        min_width: usize,
        max_width: usize,
        sign: SignStyle,
    ) -> Number {
        Number {
            target: Target::Field(field),
            min_width,
            max_width,
            sign,
            subsequent_width: 0,
            fixed_width: false,
            reduced: None,
        }
    }

    pub(crate) fn reduced(
        field: Field,
        min_width: usize,
        max_width: usize,
        base: ReducedBase,
    ) -> Number {
        Number {
            reduced: Some(base),
            ..Number::new(field, min_width, max_width, SignStyle::NotNegative)
        }
    }

    pub(crate) fn week_based(
        letter: char,
        count: usize,
        min_width: usize,
        max_width: usize,
    ) -> Number {
        Number {
            target: Target::WeekBased { letter, count },
            ..Number::new(
                Field::DayOfWeek,
                min_width,
                max_width,
                SignStyle::NotNegative,
            )
        }
    }

    /// Returns true when this node can reserve its width as the subsequent
    /// width of a preceding variable width node.
    pub(crate) fn is_fixed_adjacent(&self) -> bool {
        self.min_width == self.max_width && self.sign == SignStyle::NotNegative
    }

    pub(crate) fn max_width(&self) -> usize {
        self.max_width
    }

    /// Marks this node as taking part in adjacent value parsing with a
    /// fixed width.
    pub(crate) fn with_fixed_width(self) -> Number {
        Number { fixed_width: true, subsequent_width: 0, ..self }
    }

    /// Reserves `width` more digits for the fixed width nodes following
    /// this one.
    pub(crate) fn with_subsequent_width(self, width: usize) -> Number {
        Number { subsequent_width: self.subsequent_width + width, ..self }
    }

    fn is_fixed_width(&self, ctx: &ParseContext<'_>) -> bool {
        if self.reduced.is_some() && !ctx.is_strict() {
            return false;
        }
        self.fixed_width
            || (self.subsequent_width > 0 && self.is_fixed_adjacent())
    }

    /// Resolves a week based node into a node for the week definition of
    /// the given locale.
    fn localize(&self, locale: &Locale) -> Number {
        let Target::WeekBased { letter, count } = self.target else {
            return *self;
        };
        let def = locale.week_def();
        let node = match letter {
            'Y' if count == 2 => Number::reduced(
                def.week_based_year(),
                2,
                2,
                ReducedBase::Date(WEEK_BASED_BASE),
            ),
            'Y' => {
                let sign = if count < 4 {
                    SignStyle::Normal
                } else {
                    SignStyle::ExceedsPad
                };
                Number::new(def.week_based_year(), count, 19, sign)
            }
            'w' => Number::new(
                def.week_of_week_based_year(),
                count,
                2,
                SignStyle::NotNegative,
            ),
            'W' => {
                Number::new(def.week_of_month(), 1, 2, SignStyle::NotNegative)
            }
            _ => Number::new(
                def.day_of_week(),
                count,
                2,
                SignStyle::NotNegative,
            ),
        };
        Number {
            subsequent_width: self.subsequent_width,
            fixed_width: self.fixed_width,
            ..node
        }
    }

    pub(crate) fn format(
        &self,
        ctx: &mut PrintContext<'_>,
        buf: &mut String,
    ) -> Result<bool, Error> {
        let field = match self.target {
            Target::Field(field) => field,
            Target::WeekBased { .. } => {
                return self.localize(ctx.locale()).format(ctx, buf);
            }
        };
        let Some(value) = ctx.value(field)? else { return Ok(false) };
        let value = match self.reduced {
            None => value,
            Some(base) => self.reduce(ctx, field, base, value),
        };
        let style = ctx.decimal_style();
        let digits = DecimalFormatter::new().format(value.unsigned_abs());
        let len = usize::from(digits.len());
        if len > self.max_width {
            return Err(E::ExceedsWidth { field, value, max: self.max_width }
                .into());
        }
        if value >= 0 {
            match self.sign {
                SignStyle::ExceedsPad => {
                    if self.min_width < 19
                        && value >= 10i64.pow(self.min_width as u32)
                    {
                        buf.push(style.positive_sign());
                    }
                }
                SignStyle::Always => buf.push(style.positive_sign()),
                _ => {}
            }
        } else {
            match self.sign {
                SignStyle::Normal
                | SignStyle::ExceedsPad
                | SignStyle::Always => buf.push(style.negative_sign()),
                SignStyle::NotNegative => {
                    return Err(E::Negative { field, value }.into());
                }
                SignStyle::Never => {}
            }
        }
        push_zeros(style, self.min_width.saturating_sub(len), buf);
        digits.push_to(style, buf);
        Ok(true)
    }

    /// Returns the digits of a reduced value to print.
    fn reduce(
        &self,
        ctx: &PrintContext<'_>,
        field: Field,
        base: ReducedBase,
        value: i64,
    ) -> i64 {
        let base = match base {
            ReducedBase::Value(value) => value,
            ReducedBase::Date(date) => ctx
                .text_chronology()
                .get(date, field)
                .unwrap_or_else(|| i64::from(date.year())),
        };
        let range = 10i64.pow(self.min_width as u32);
        if value >= base && value < base.saturating_add(range) {
            return value.unsigned_abs() as i64 % range;
        }
        let max = 10i64.pow(self.max_width as u32);
        (value.unsigned_abs() % max as u64) as i64
    }

    pub(crate) fn parse(
        &self,
        ctx: &mut ParseContext<'_>,
        text: &[char],
        pos: usize,
    ) -> Result<usize, usize> {
        let field = match self.target {
            Target::Field(field) => field,
            Target::WeekBased { .. } => {
                return self.localize(ctx.locale()).parse(ctx, text, pos);
            }
        };
        let Some(&first) = text.get(pos) else { return Err(pos) };
        let strict = ctx.is_strict();
        let fixed = self.is_fixed_width(ctx);
        let style = *ctx.decimal_style();
        let same_widths = self.min_width == self.max_width;

        let mut start = pos;
        let (mut negative, mut positive) = (false, false);
        if first == style.positive_sign() {
            if !self.sign.parse(true, strict, same_widths) {
                return Err(pos);
            }
            positive = true;
            start += 1;
        } else if first == style.negative_sign() {
            if !self.sign.parse(false, strict, same_widths) {
                return Err(pos);
            }
            negative = true;
            start += 1;
        } else if self.sign == SignStyle::Always && strict {
            return Err(pos);
        }

        let min_width = if strict || fixed { self.min_width } else { 1 };
        let min_end = start + min_width;
        if min_end > text.len() {
            return Err(start);
        }
        let mut max_width =
            if strict || fixed { self.max_width } else { 19 };
        max_width += self.subsequent_width;
        let mut total: i128 = 0;
        let mut end = start;
        for pass in 0..2 {
            let max_end = core::cmp::min(end + max_width, text.len());
            while end < max_end {
                let Some(digit) = style.convert_to_digit(text[end]) else {
                    if end < min_end {
                        return Err(start);
                    }
                    break;
                };
                end += 1;
                total = total
                    .checked_mul(10)
                    .and_then(|t| t.checked_add(i128::from(digit)))
                    .unwrap_or(i128::MAX);
            }
            if self.subsequent_width > 0 && pass == 0 {
                // Parse again, leaving digits for the fixed width fields.
                let len = end - start;
                max_width = core::cmp::max(
                    min_width,
                    len.saturating_sub(self.subsequent_width),
                );
                end = start;
                total = 0;
            } else {
                break;
            }
        }

        if negative {
            if total == 0 && strict {
                // A negative zero isn't allowed.
                return Err(start - 1);
            }
            total = -total;
        } else if self.sign == SignStyle::ExceedsPad && strict {
            let len = end - start;
            if positive {
                if len <= self.min_width {
                    return Err(start - 1);
                }
            } else if len > self.min_width {
                return Err(start);
            }
        }
        if i64::try_from(total).is_err() {
            // Drop the last digit to fit.
            total /= 10;
            end -= 1;
        }
        let value = i64::try_from(total).map_err(|_| start)?;
        self.set_value(ctx, field, value, start, end)
    }

    fn set_value(
        &self,
        ctx: &mut ParseContext<'_>,
        field: Field,
        mut value: i64,
        error_pos: usize,
        success_pos: usize,
    ) -> Result<usize, usize> {
        let Some(base) = self.reduced else {
            return ctx.set_field(field, value, error_pos, success_pos);
        };
        let base = match base {
            ReducedBase::Value(value) => value,
            ReducedBase::Date(date) => {
                let chrono = ctx.effective_chronology();
                // The chronology may still change later in the text, in
                // which case the value is set again.
                ctx.add_listener(ChronoListener {
                    node: *self,
                    field,
                    value,
                    error_pos,
                    success_pos,
                });
                chrono
                    .get(date, field)
                    .unwrap_or_else(|| i64::from(date.year()))
            }
        };
        let len = success_pos - error_pos;
        if len == self.min_width && value >= 0 {
            let range = 10i64.pow(self.min_width as u32);
            let last = base % range;
            let base_part = base - last;
            value = if base > 0 {
                base_part + value
            } else {
                base_part - value
            };
            if value < base {
                value += range;
            }
        }
        ctx.set_field(field, value, error_pos, success_pos)
    }
}

impl core::fmt::Display for Number {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let Number { target, min_width, max_width, sign, reduced, .. } = *self;
        let field = match target {
            Target::Field(field) => field,
            Target::WeekBased { letter: 'Y', count } => {
                return match count {
                    1 => f.write_str("Localized(WeekBasedYear)"),
                    2 => write!(
                        f,
                        "Localized(ReducedValue(WeekBasedYear,2,2,{}))",
                        WEEK_BASED_BASE,
                    ),
                    _ => {
                        let sign = if count < 4 {
                            SignStyle::Normal
                        } else {
                            SignStyle::ExceedsPad
                        };
                        write!(
                            f,
                            "Localized(WeekBasedYear,{count},19,{sign:?})",
                        )
                    }
                };
            }
            Target::WeekBased { letter, count } => {
                let name = match letter {
                    'w' => "WeekOfWeekBasedYear",
                    'W' => "WeekOfMonth",
                    _ => "DayOfWeek",
                };
                return write!(f, "Localized({name},{count})");
            }
        };
        match reduced {
            Some(ReducedBase::Value(base)) => write!(
                f,
                "ReducedValue({field},{min_width},{max_width},{base})",
            ),
            Some(ReducedBase::Date(base)) => write!(
                f,
                "ReducedValue({field},{min_width},{max_width},{base})",
            ),
            None if min_width == 1
                && max_width == 19
                && sign == SignStyle::Normal =>
            {
                write!(f, "Value({field})")
            }
            None if self.is_fixed_adjacent() => {
                write!(f, "Value({field},{min_width})")
            }
            None => {
                write!(f, "Value({field},{min_width},{max_width},{sign:?})")
            }
        }
    }
}

/// A reduced value waiting to be set again if a chronology is parsed after
/// it.
#[derive(Clone, Debug)]
pub(crate) struct ChronoListener {
    node: Number,
    field: Field,
    value: i64,
    error_pos: usize,
    success_pos: usize,
}

impl ChronoListener {
    pub(crate) fn fire(self, ctx: &mut ParseContext<'_>) {
        trace!(
            "re-deriving {field} for chronology {chrono}",
            field = self.field,
            chrono = ctx.effective_chronology().id(),
        );
        // A conflict means the value read for the new chronology replaced
        // the one read earlier.
        let result = self.node.set_value(
            ctx,
            self.field,
            self.value,
            self.error_pos,
            self.success_pos,
        );
        if result.is_err() {
            debug!(
                "replaced {field} read at {pos} for chronology {chrono}",
                field = self.field,
                pos = self.error_pos,
                chrono = ctx.effective_chronology().id(),
            );
        }
    }
}
