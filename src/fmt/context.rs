/*!
The per-call state threaded through the node tree.

A [`PrintContext`] wraps the value being formatted, after applying a
formatter's chronology and zone overrides. A [`ParseContext`] holds the
fields parsed so far, as a stack of snapshots with one entry per open
optional section, along with the case sensitivity and strictness flags that
settings nodes toggle.
*/

use crate::{
    chrono::{self, Chronology},
    error::{format::Error as E, Error},
    field::Field,
    fmt::{node::number::ChronoListener, Formatter},
    locale::Locale,
    parsed::Parsed,
    style::{DecimalStyle, ResolverStyle},
    temporal::Temporal,
    text::TextProvider,
    zone::{char_equals_ignore_case, ZoneId},
};

/// The state used while formatting a single value.
#[derive(Debug)]
pub(crate) struct PrintContext<'f> {
    temporal: Temporal,
    fmt: &'f Formatter,
    optional: usize,
}

impl<'f> PrintContext<'f> {
    pub(crate) fn new(
        temporal: Temporal,
        fmt: &'f Formatter,
    ) -> Result<PrintContext<'f>, Error> {
        let temporal = adjust(temporal, fmt)?;
        Ok(PrintContext { temporal, fmt, optional: 0 })
    }

    pub(crate) fn temporal(&self) -> &Temporal {
        &self.temporal
    }

    pub(crate) fn locale(&self) -> &'f Locale {
        &self.fmt.locale
    }

    pub(crate) fn decimal_style(&self) -> &'f DecimalStyle {
        &self.fmt.decimal
    }

    pub(crate) fn text_provider(&self) -> &'f dyn TextProvider {
        &*self.fmt.text
    }

    pub(crate) fn start_optional(&mut self) {
        self.optional += 1;
    }

    pub(crate) fn end_optional(&mut self) {
        self.optional -= 1;
    }

    /// Returns the value of a field.
    ///
    /// A missing field is an error, unless inside an optional section.
    pub(crate) fn value(&self, field: Field) -> Result<Option<i64>, Error> {
        match self.temporal.get(field) {
            Some(value) => Ok(Some(value)),
            None if self.optional > 0 => Ok(None),
            None => Err(E::MissingField { field }.into()),
        }
    }

    /// Returns the zone id of the value being formatted.
    pub(crate) fn zone(&self) -> Result<Option<&ZoneId>, Error> {
        match self.temporal.zone() {
            Some(zone) => Ok(Some(zone)),
            None if self.optional > 0 => Ok(None),
            None => Err(E::MissingZone.into()),
        }
    }

    /// Returns the chronology of the value being formatted.
    pub(crate) fn chronology(
        &self,
    ) -> Result<Option<&'static dyn Chronology>, Error> {
        match self.temporal.chronology() {
            Some(chrono) => Ok(Some(chrono)),
            None if self.optional > 0 => Ok(None),
            None => Err(E::MissingChronology.into()),
        }
    }

    /// Returns the chronology used to look up text and localized patterns.
    pub(crate) fn text_chronology(&self) -> &'static dyn Chronology {
        self.temporal.chronology().unwrap_or(chrono::ISO)
    }
}

/// Applies a formatter's chronology and zone overrides to a value.
fn adjust(temporal: Temporal, fmt: &Formatter) -> Result<Temporal, Error> {
    let temporal_chrono = temporal.chronology();
    let override_chrono = fmt.chrono.filter(|&c1| {
        !temporal_chrono.is_some_and(|c2| chrono::same(c1, c2))
    });
    let override_zone =
        fmt.zone.as_ref().filter(|&z| temporal.zone() != Some(z));
    if override_chrono.is_none() && override_zone.is_none() {
        return Ok(temporal);
    }
    let effective_chrono = override_chrono.or(temporal_chrono);

    if let Some(zone) = override_zone {
        if let Some(ts) = temporal.timestamp() {
            trace!("moving {ts} into override zone {zone}");
            let zdt = ts.to_zoned(zone.time_zone());
            let mut adjusted = Temporal::from(&zdt);
            adjusted.zone = Some(zone.clone());
            adjusted.chrono = effective_chrono;
            adjusted.fields = temporal.fields;
            return Ok(adjusted);
        }
        if let (Some(fixed), Some(offset)) =
            (zone.fixed_offset(), temporal.get(Field::OffsetSeconds))
        {
            if i64::from(fixed.seconds()) != offset {
                return Err(E::OverrideZone {
                    zone: zone.to_string().into_boxed_str(),
                }
                .into());
            }
        }
    }

    let mut adjusted = temporal;
    if let Some(zone) = override_zone {
        adjusted.zone = Some(zone.clone());
    }
    if let Some(chrono) = override_chrono {
        let iso_from_nothing =
            chrono::same(chrono, chrono::ISO) && temporal_chrono.is_none();
        if adjusted.date.is_none()
            && !iso_from_nothing
            && adjusted.fields.iter().any(|(f, _)| f.is_date_based())
        {
            return Err(E::OverrideChronology { id: chrono.id() }.into());
        }
        adjusted.chrono = Some(chrono);
    }
    Ok(adjusted)
}

/// The state used while parsing a single piece of text.
#[derive(Debug)]
pub(crate) struct ParseContext<'f> {
    fmt: &'f Formatter,
    case_sensitive: bool,
    strict: bool,
    parsed: Vec<Parsed>,
    listeners: Vec<ChronoListener>,
}

impl<'f> ParseContext<'f> {
    pub(crate) fn new(fmt: &'f Formatter) -> ParseContext<'f> {
        ParseContext {
            fmt,
            case_sensitive: true,
            strict: true,
            parsed: vec![Parsed::new()],
            listeners: vec![],
        }
    }

    pub(crate) fn locale(&self) -> &'f Locale {
        &self.fmt.locale
    }

    pub(crate) fn decimal_style(&self) -> &'f DecimalStyle {
        &self.fmt.decimal
    }

    pub(crate) fn text_provider(&self) -> &'f dyn TextProvider {
        &*self.fmt.text
    }

    pub(crate) fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub(crate) fn set_case_sensitive(&mut self, yes: bool) {
        self.case_sensitive = yes;
    }

    pub(crate) fn is_strict(&self) -> bool {
        self.strict
    }

    pub(crate) fn set_strict(&mut self, yes: bool) {
        self.strict = yes;
    }

    /// Compares two characters using the current case sensitivity.
    pub(crate) fn char_equals(&self, c1: char, c2: char) -> bool {
        if self.case_sensitive {
            c1 == c2
        } else {
            char_equals_ignore_case(c1, c2)
        }
    }

    /// Returns the position after `expected` if `text[pos..]` starts with it.
    pub(crate) fn matches(
        &self,
        text: &[char],
        pos: usize,
        expected: &str,
    ) -> Option<usize> {
        let mut end = pos;
        for ch in expected.chars() {
            let &got = text.get(end)?;
            if !self.char_equals(got, ch) {
                return None;
            }
            end += 1;
        }
        Some(end)
    }

    /// Enters an optional section by snapshotting the parsed state.
    pub(crate) fn start_optional(&mut self) {
        let snapshot = self.current().clone();
        self.parsed.push(snapshot);
    }

    /// Leaves an optional section, keeping its state on success and
    /// restoring the snapshot otherwise.
    pub(crate) fn end_optional(&mut self, success: bool) {
        let Some(last) = self.parsed.pop() else { return };
        if success {
            if let Some(parent) = self.parsed.last_mut() {
                *parent = last;
            }
        }
    }

    pub(crate) fn current(&self) -> &Parsed {
        // The stack is never empty: it starts with one entry and
        // `end_optional` only pops entries pushed by `start_optional`.
        &self.parsed[self.parsed.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Parsed {
        let last = self.parsed.len() - 1;
        &mut self.parsed[last]
    }

    /// Returns the parsed value of a field.
    pub(crate) fn field(&self, field: Field) -> Option<i64> {
        self.current().fields.get(field)
    }

    /// Records a parsed field value.
    ///
    /// This returns `success_pos` unless the field already had a different
    /// value, in which case the match fails at `error_pos`.
    pub(crate) fn set_field(
        &mut self,
        field: Field,
        value: i64,
        error_pos: usize,
        success_pos: usize,
    ) -> Result<usize, usize> {
        match self.current_mut().fields.insert(field, value) {
            Some(old) if old != value => Err(error_pos),
            _ => Ok(success_pos),
        }
    }

    pub(crate) fn set_zone(&mut self, zone: ZoneId) {
        self.current_mut().zone = Some(zone);
    }

    /// Records a parsed chronology and notifies the listeners waiting for
    /// one.
    pub(crate) fn set_chronology(&mut self, chrono: &'static dyn Chronology) {
        self.current_mut().chrono = Some(chrono);
        let listeners = core::mem::take(&mut self.listeners);
        for listener in listeners {
            listener.fire(self);
        }
    }

    pub(crate) fn add_listener(&mut self, listener: ChronoListener) {
        self.listeners.push(listener);
    }

    /// Returns the parsed chronology, or the formatter's, or ISO.
    pub(crate) fn effective_chronology(&self) -> &'static dyn Chronology {
        self.current().chrono.or(self.fmt.chrono).unwrap_or(chrono::ISO)
    }

    /// Returns the parsed state without resolving it.
    pub(crate) fn into_unresolved(mut self) -> Parsed {
        self.parsed.pop().unwrap_or_else(Parsed::new)
    }

    /// Resolves the parsed state into a value.
    pub(crate) fn into_resolved(
        self,
        style: ResolverStyle,
        filter: Option<&[Field]>,
    ) -> Result<Parsed, Error> {
        let chrono = self.effective_chronology();
        let default_zone = self.fmt.zone.clone();
        let mut parsed = self.into_unresolved();
        parsed.chrono = Some(chrono);
        if parsed.zone.is_none() {
            parsed.zone = default_zone;
        }
        parsed.resolve(style, filter)?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, tz, Timestamp};

    use super::*;

    #[test]
    fn optional_snapshots() {
        let fmt = Formatter::of_pattern("uuuu").unwrap();
        let mut ctx = ParseContext::new(&fmt);
        assert_eq!(ctx.set_field(Field::Year, 2024, 0, 4), Ok(4));

        ctx.start_optional();
        assert_eq!(ctx.set_field(Field::MonthOfYear, 7, 4, 6), Ok(6));
        ctx.end_optional(false);
        assert_eq!(ctx.field(Field::MonthOfYear), None);

        ctx.start_optional();
        assert_eq!(ctx.set_field(Field::MonthOfYear, 7, 4, 6), Ok(6));
        ctx.end_optional(true);
        assert_eq!(ctx.field(Field::MonthOfYear), Some(7));

        assert_eq!(ctx.set_field(Field::Year, 2024, 6, 10), Ok(10));
        assert_eq!(ctx.set_field(Field::Year, 2023, 6, 10), Err(6));
    }

    #[test]
    fn matching() {
        let fmt = Formatter::of_pattern("uuuu").unwrap();
        let mut ctx = ParseContext::new(&fmt);
        let text: Vec<char> = "xJULY".chars().collect();
        assert_eq!(ctx.matches(&text, 1, "JUL"), Some(4));
        assert_eq!(ctx.matches(&text, 1, "Jul"), None);
        assert_eq!(ctx.matches(&text, 3, "LYX"), None);
        ctx.set_case_sensitive(false);
        assert_eq!(ctx.matches(&text, 1, "july"), Some(5));
    }

    #[test]
    fn override_zone() {
        let zone = ZoneId::of("Asia/Tokyo").unwrap();
        let fmt = Formatter::of_pattern("HH:mm VV").unwrap().with_zone(zone);

        let ts: Timestamp = "2024-07-14T00:00Z".parse().unwrap();
        assert_eq!(fmt.format(ts).unwrap(), "09:00 Asia/Tokyo");

        // Without an instant, the zone is attached as is.
        let got = fmt.format(date(2024, 7, 14).at(9, 0, 0, 0)).unwrap();
        assert_eq!(got, "09:00 Asia/Tokyo");

        let fmt = Formatter::of_pattern("HH:mm")
            .unwrap()
            .with_zone(ZoneId::offset(tz::offset(2)));
        let t = Temporal::from(date(2024, 7, 14).at(9, 0, 0, 0))
            .with_offset(tz::offset(1));
        insta::assert_snapshot!(
            fmt.format(t).unwrap_err(),
            @"unable to apply override zone `+02:00` because the value being formatted has a different offset but does not represent an instant",
        );
    }

    #[test]
    fn override_chronology() {
        let fmt = Formatter::of_pattern("uuuu-MM")
            .unwrap()
            .with_chronology(chrono::THAI_BUDDHIST);
        assert_eq!(fmt.format(date(2024, 7, 14)).unwrap(), "2567-07");

        let t = Temporal::new().with_field(Field::MonthOfYear, 7);
        insta::assert_snapshot!(
            fmt.format(t).unwrap_err(),
            @"unable to apply override chronology `ThaiBuddhist` because the value being formatted contains date fields but does not represent a whole date",
        );

        // A time has no date fields, so any chronology applies.
        let fmt =
            Formatter::of_pattern("HH").unwrap().with_chronology(chrono::ISO);
        let got = fmt.format(jiff::civil::time(7, 0, 0, 0)).unwrap();
        assert_eq!(got, "07");
    }
}
