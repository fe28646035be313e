use jiff::tz::{AmbiguousOffset, Offset};

use crate::{
    error::Error,
    fmt::{
        context::{ParseContext, PrintContext},
        node::offset::OffsetId,
    },
    style::TextStyle,
    text::ZoneNameKind,
    zone::{self, MatchMode, ZoneId},
};

/// The largest offset accepted after a zone id prefix.
const MAX_OFFSET_SECONDS: i64 = 18 * 60 * 60;

/// A zone id, like `Europe/Paris`, `UTC+01:00` or `-08:00`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ZoneIdNode;

impl ZoneIdNode {
    pub(crate) fn format(
        &self,
        ctx: &mut PrintContext<'_>,
        buf: &mut String,
    ) -> Result<bool, Error> {
        let Some(zone) = ctx.zone()? else { return Ok(false) };
        buf.push_str(&zone.to_string());
        Ok(true)
    }

    pub(crate) fn parse(
        &self,
        ctx: &mut ParseContext<'_>,
        text: &[char],
        pos: usize,
    ) -> Result<usize, usize> {
        parse_zone(ctx, text, pos, None)
    }
}

impl core::fmt::Display for ZoneIdNode {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("ZoneId()")
    }
}

/// A zone's display name, like `Eastern Standard Time` or `EST`.
///
/// Zones without a display name are printed as their id. Parsing accepts
/// display names as well as everything [`ZoneIdNode`] accepts.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ZoneText {
    style: TextStyle,
}

impl ZoneText {
    pub(crate) fn new(style: TextStyle) -> ZoneText {
        ZoneText { style }
    }

    pub(crate) fn format(
        &self,
        ctx: &mut PrintContext<'_>,
        buf: &mut String,
    ) -> Result<bool, Error> {
        let Some(zone) = ctx.zone()? else { return Ok(false) };
        let id = zone.to_string();
        if zone.as_offset().is_some() {
            buf.push_str(&id);
            return Ok(true);
        }
        let kind = name_kind(ctx, zone);
        let name =
            ctx.text_provider().zone_name(&id, kind, self.style, ctx.locale());
        buf.push_str(name.as_deref().unwrap_or(&id));
        Ok(true)
    }

    pub(crate) fn parse(
        &self,
        ctx: &mut ParseContext<'_>,
        text: &[char],
        pos: usize,
    ) -> Result<usize, usize> {
        parse_zone(ctx, text, pos, Some(*self))
    }
}

impl core::fmt::Display for ZoneText {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "ZoneText({:?})", self.style)
    }
}

/// Returns whether standard or daylight time is in effect for the value
/// being formatted.
///
/// Without an instant or an unambiguous local datetime, this is unknown and
/// the generic name is used.
fn name_kind(ctx: &PrintContext<'_>, zone: &ZoneId) -> ZoneNameKind {
    let temporal = ctx.temporal();
    let tz = zone.time_zone();
    let parts = (temporal.timestamp(), temporal.date(), temporal.time());
    let timestamp = match parts {
        (Some(ts), _, _) => Some(ts),
        (None, Some(date), Some(time)) => {
            let ambiguous = tz.to_ambiguous_timestamp(date.to_datetime(time));
            match ambiguous.offset() {
                AmbiguousOffset::Unambiguous { .. } => {
                    ambiguous.unambiguous().ok()
                }
                _ => None,
            }
        }
        _ => None,
    };
    match timestamp {
        None => ZoneNameKind::Generic,
        Some(ts) if tz.to_offset_info(ts).dst().is_dst() => {
            ZoneNameKind::Daylight
        }
        Some(_) => ZoneNameKind::Standard,
    }
}

fn parse_zone(
    ctx: &mut ParseContext<'_>,
    text: &[char],
    pos: usize,
    names: Option<ZoneText>,
) -> Result<usize, usize> {
    let Some(&first) = text.get(pos) else { return Err(pos) };
    if first == '+' || first == '-' {
        return parse_offset_based(ctx, text, pos, pos, true);
    }
    if let Some(&second) = text.get(pos + 1) {
        if ctx.char_equals(first, 'U') && ctx.char_equals(second, 'T') {
            let utc =
                text.get(pos + 2).is_some_and(|&c| ctx.char_equals(c, 'C'));
            if !utc {
                return parse_offset_based(ctx, text, pos, pos + 2, false);
            }
            // Display names may start with `UTC`, so those go through the
            // prefix tree.
            if names.is_none() {
                return parse_offset_based(ctx, text, pos, pos + 3, false);
            }
        } else if ctx.char_equals(first, 'G')
            && ctx.char_equals(second, 'M')
            && text.get(pos + 2).is_some_and(|&c| ctx.char_equals(c, 'T'))
        {
            if text.get(pos + 3).is_some_and(|&c| ctx.char_equals(c, '0')) {
                let zone = ZoneId::of("GMT0")
                    .unwrap_or_else(|_| ZoneId::prefixed("GMT", Offset::UTC));
                ctx.set_zone(zone);
                return Ok(pos + 4);
            }
            return parse_offset_based(ctx, text, pos, pos + 3, false);
        }
    }

    let mode = if ctx.is_case_sensitive() {
        MatchMode::CaseSensitive
    } else if ctx.is_strict() {
        MatchMode::CaseInsensitive
    } else {
        MatchMode::Lenient
    };
    let tree = match names {
        None => zone::region_tree(mode),
        Some(_) => zone::name_tree(mode, ctx.text_provider(), ctx.locale()),
    };
    let Some((id, end)) = tree.find(text, pos) else {
        if ctx.char_equals(first, 'Z') {
            ctx.set_zone(ZoneId::offset(Offset::UTC));
            return Ok(pos + 1);
        }
        return Err(pos);
    };
    match ZoneId::of(id) {
        Ok(zone) => {
            ctx.set_zone(zone);
            Ok(end)
        }
        Err(_err) => {
            warn!("zone id `{id}` from prefix tree is unknown: {_err}");
            Err(pos)
        }
    }
}

/// Parses an offset following a prefix like `UTC` in `text[prefix..pos]`.
///
/// When no offset follows, the prefix on its own is the zone. A bare offset
/// with no prefix must be followed by a valid offset.
fn parse_offset_based(
    ctx: &mut ParseContext<'_>,
    text: &[char],
    prefix: usize,
    pos: usize,
    bare: bool,
) -> Result<usize, usize> {
    let prefix_text: String =
        text[prefix..pos].iter().flat_map(|c| c.to_uppercase()).collect();
    let prefix_only = ZoneId::prefixed(&prefix_text, Offset::UTC);
    match text.get(pos) {
        None => {
            ctx.set_zone(prefix_only);
            return Ok(pos);
        }
        Some(&c) if c == '0' || ctx.char_equals(c, 'Z') => {
            ctx.set_zone(prefix_only);
            return Ok(pos);
        }
        Some(_) => {}
    }
    let no_offset = if bare { "Z" } else { "0" };
    let (seconds, end) =
        match OffsetId::zone_suffix(no_offset).parse_seconds(ctx, text, pos) {
            Ok(parsed) => parsed,
            Err(_) if bare => return Err(prefix),
            Err(_) => {
                ctx.set_zone(prefix_only);
                return Ok(pos);
            }
        };
    if seconds.abs() > MAX_OFFSET_SECONDS {
        return Err(prefix);
    }
    let offset = i32::try_from(seconds)
        .ok()
        .and_then(|secs| Offset::from_seconds(secs).ok());
    let Some(offset) = offset else { return Err(prefix) };
    ctx.set_zone(ZoneId::prefixed(&prefix_text, offset));
    Ok(end)
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, tz, Timestamp, Zoned};

    use crate::{Formatter, FormatterBuilder, ParsePosition, TextStyle, ZoneId};

    fn zone(fmt: &Formatter, text: &str) -> Option<(String, usize)> {
        let mut pos = ParsePosition::new(0);
        let parsed = fmt.parse_unresolved(text, &mut pos).unwrap()?;
        Some((parsed.zone()?.to_string(), pos.index()))
    }

    fn some(id: &str, end: usize) -> Option<(String, usize)> {
        Some((id.to_string(), end))
    }

    #[test]
    fn parse_ids() {
        let fmt = Formatter::of_pattern("VV").unwrap();
        assert_eq!(zone(&fmt, "Europe/Paris"), some("Europe/Paris", 12));
        assert_eq!(zone(&fmt, "+01:30"), some("+01:30", 6));
        assert_eq!(zone(&fmt, "-08"), some("-08:00", 3));
        assert_eq!(zone(&fmt, "Z"), some("Z", 1));
        assert_eq!(zone(&fmt, "UTC"), some("UTC", 3));
        assert_eq!(zone(&fmt, "UTC+01:00"), some("UTC+01:00", 9));
        assert_eq!(zone(&fmt, "UT-05:00"), some("UT-05:00", 8));
        assert_eq!(zone(&fmt, "GMT+02:00 rest"), some("GMT+02:00", 9));
        // Minutes are required after a prefix.
        assert_eq!(zone(&fmt, "GMT+2"), some("GMT", 3));
        // An offset that doesn't parse leaves the bare prefix.
        assert_eq!(zone(&fmt, "UTCx"), some("UTC", 3));
        // A bare sign must be followed by an offset.
        assert_eq!(zone(&fmt, "+x"), None);
        assert_eq!(zone(&fmt, "+19:00"), None);
        assert_eq!(zone(&fmt, "Nowhere/Special"), None);
        insta::assert_snapshot!(fmt, @"ZoneId()");
    }

    #[test]
    fn longest_region_match() {
        let fmt = Formatter::of_pattern("VV'!'").unwrap();
        assert_eq!(zone(&fmt, "Etc/GMT-2!"), some("Etc/GMT-2", 10));
        assert_eq!(zone(&fmt, "Etc/GMT-12!"), some("Etc/GMT-12", 11));
    }

    #[test]
    fn case_insensitive_ids() {
        let fmt = FormatterBuilder::new()
            .parse_case_insensitive()
            .append_zone_id()
            .build()
            .unwrap();
        assert_eq!(zone(&fmt, "europe/paris"), some("Europe/Paris", 12));
        assert_eq!(zone(&fmt, "utc+01:00"), some("UTC+01:00", 9));

        let fmt = FormatterBuilder::new()
            .parse_case_insensitive()
            .parse_lenient()
            .append_zone_id()
            .build()
            .unwrap();
        assert_eq!(
            zone(&fmt, "america new york"),
            some("America/New_York", 16),
        );
    }

    #[test]
    fn format_ids() {
        let fmt = Formatter::of_pattern("VV").unwrap();
        let zdt: Zoned = "2024-07-14T12:00[Europe/Paris]".parse().unwrap();
        assert_eq!(fmt.format(&zdt).unwrap(), "Europe/Paris");
        let id = ZoneId::prefixed("GMT", tz::offset(-3));
        assert_eq!(fmt.format(id).unwrap(), "GMT-03:00");
        // An offset alone is not a zone.
        assert!(fmt.format(tz::offset(1)).is_err());
    }

    #[test]
    fn zone_text() {
        let full = FormatterBuilder::new()
            .append_zone_text(TextStyle::Full)
            .build()
            .unwrap();
        let short = Formatter::of_pattern("z").unwrap();

        let summer: Zoned =
            "2024-07-14T12:00[America/New_York]".parse().unwrap();
        let winter: Zoned =
            "2024-01-14T12:00[America/New_York]".parse().unwrap();
        assert_eq!(full.format(&summer).unwrap(), "Eastern Daylight Time");
        assert_eq!(full.format(&winter).unwrap(), "Eastern Standard Time");
        assert_eq!(short.format(&summer).unwrap(), "EDT");

        let ny = ZoneId::of("America/New_York").unwrap();
        let local = crate::Temporal::from(date(2024, 1, 14).at(12, 0, 0, 0))
            .with_zone(ny.clone());
        assert_eq!(short.format(local).unwrap(), "EST");
        // Neither an instant nor a local datetime.
        assert_eq!(full.format(ny).unwrap(), "Eastern Time");

        let ts: Timestamp = "2024-07-14T12:00Z".parse().unwrap();
        let paris = crate::Temporal::from(ts)
            .with_zone(ZoneId::of("Europe/Paris").unwrap());
        assert_eq!(full.format(paris).unwrap(), "Europe/Paris");
        let fixed = ZoneId::offset(tz::offset(2));
        assert_eq!(full.format(fixed).unwrap(), "+02:00");
        insta::assert_snapshot!(short, @"ZoneText(Short)");
    }

    #[test]
    fn parse_zone_text() {
        let fmt = Formatter::of_pattern("z").unwrap();
        assert_eq!(
            zone(&fmt, "Eastern Standard Time"),
            some("America/New_York", 21),
        );
        assert_eq!(zone(&fmt, "PDT"), some("America/Los_Angeles", 3));
        assert_eq!(zone(&fmt, "Asia/Tokyo"), some("Asia/Tokyo", 10));
        assert_eq!(zone(&fmt, "UTC"), some("UTC", 3));
        assert_eq!(zone(&fmt, "GMT+05:30"), some("GMT+05:30", 9));
    }
}
