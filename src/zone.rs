/*!
Time zone identifiers and the prefix tree used to parse them.

A [`ZoneId`] is what the zone nodes of a pattern print and parse. It is
either a fixed offset like `+01:00`, a fixed offset behind a `UTC`, `GMT` or
`UT` prefix like `UTC+01:00`, or a region id from the time zone database
like `Europe/Paris`.
*/

use std::sync::Arc;

use jiff::tz::{Offset, TimeZone};
use once_cell::sync::Lazy;

use crate::{
    error::{Error, ErrorContext},
    util::{cache::Cache, escape},
};

/// An identifier for a time zone.
///
/// # Example
///
/// ```
/// use jiff::tz::{self, Offset};
/// use jiff_pattern::ZoneId;
///
/// let zone = ZoneId::of("Europe/Paris")?;
/// assert_eq!(zone.to_string(), "Europe/Paris");
/// assert_eq!(zone.as_offset(), None);
///
/// let zone = ZoneId::of("UTC+01:30")?;
/// assert_eq!(zone.to_string(), "UTC+01:30");
/// assert_eq!(zone.fixed_offset(), Some(Offset::from_seconds(90 * 60)?));
///
/// let zone = ZoneId::of("-0800")?;
/// assert_eq!(zone.to_string(), "-08:00");
/// assert_eq!(zone.as_offset(), Some(tz::offset(-8)));
///
/// assert_eq!(ZoneId::of("Z")?, ZoneId::offset(Offset::UTC));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct ZoneId {
    kind: ZoneKind,
}

#[derive(Clone, Debug)]
enum ZoneKind {
    Offset(Offset),
    Prefixed { prefix: &'static str, offset: Offset },
    Region { name: Box<str>, tz: TimeZone },
}

/// The prefixes that may precede an offset in a zone id.
static PREFIXES: [&str; 3] = ["UTC", "GMT", "UT"];

impl ZoneId {
    /// Parses a zone id.
    ///
    /// This accepts `Z`, offsets like `+01`, `+0130`, `+01:30` or
    /// `+01:30:15`, the prefixes `UTC`, `GMT` and `UT` on their own or
    /// followed by an offset, and region ids known to Jiff's time zone
    /// database.
    pub fn of(id: &str) -> Result<ZoneId, Error> {
        if id == "Z" {
            return Ok(ZoneId::offset(Offset::UTC));
        }
        if id.starts_with(['+', '-']) {
            return Ok(ZoneId::offset(parse_offset(id)?));
        }
        for prefix in PREFIXES {
            if let Some(rest) = id.strip_prefix(prefix) {
                if rest.is_empty() {
                    return Ok(ZoneId::prefixed(prefix, Offset::UTC));
                }
                if rest.starts_with(['+', '-']) {
                    let offset = parse_offset(rest)?;
                    return Ok(ZoneId::prefixed(prefix, offset));
                }
            }
        }
        ZoneId::region(id)
    }

    /// Returns a zone id for a fixed offset.
    pub fn offset(offset: Offset) -> ZoneId {
        ZoneId { kind: ZoneKind::Offset(offset) }
    }

    /// Returns a zone id for an offset behind a prefix.
    ///
    /// The prefix must be one of `UTC`, `GMT` or `UT`. Any other prefix,
    /// including the empty string, results in a plain offset.
    pub fn prefixed(prefix: &str, offset: Offset) -> ZoneId {
        match PREFIXES.iter().find(|&&p| p == prefix) {
            Some(&prefix) => {
                ZoneId { kind: ZoneKind::Prefixed { prefix, offset } }
            }
            None => ZoneId::offset(offset),
        }
    }

    fn region(name: &str) -> Result<ZoneId, Error> {
        let tz = jiff::tz::db().get(name).with_context(|| {
            Error::from_args(format_args!(
                "unknown zone id `{}`",
                escape::Str(name),
            ))
        })?;
        Ok(ZoneId { kind: ZoneKind::Region { name: name.into(), tz } })
    }

    /// Returns a zone id for a Jiff time zone.
    ///
    /// Time zones with an IANA name become region ids. Fixed offset time
    /// zones become offsets. Other time zones, like those created from a
    /// POSIX TZ string, have no zone id.
    pub fn from_time_zone(tz: &TimeZone) -> Option<ZoneId> {
        if let Some(name) = tz.iana_name() {
            if name == "UTC" {
                return Some(ZoneId::prefixed("UTC", Offset::UTC));
            }
            let kind = ZoneKind::Region { name: name.into(), tz: tz.clone() };
            return Some(ZoneId { kind });
        }
        tz.to_fixed_offset().ok().map(ZoneId::offset)
    }

    /// Returns the offset if this is a plain offset, like `+01:00`.
    pub fn as_offset(&self) -> Option<Offset> {
        match self.kind {
            ZoneKind::Offset(offset) => Some(offset),
            _ => None,
        }
    }

    /// Returns the offset if this zone id has one, with or without a prefix.
    pub fn fixed_offset(&self) -> Option<Offset> {
        match self.kind {
            ZoneKind::Offset(offset) => Some(offset),
            ZoneKind::Prefixed { offset, .. } => Some(offset),
            ZoneKind::Region { .. } => None,
        }
    }

    /// Returns the region id, if this is a region.
    pub fn region_name(&self) -> Option<&str> {
        match self.kind {
            ZoneKind::Region { ref name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns a Jiff time zone for this zone id.
    pub fn time_zone(&self) -> TimeZone {
        match self.kind {
            ZoneKind::Offset(offset) => TimeZone::fixed(offset),
            ZoneKind::Prefixed { offset, .. } => TimeZone::fixed(offset),
            ZoneKind::Region { ref tz, .. } => tz.clone(),
        }
    }
}

impl Eq for ZoneId {}

impl PartialEq for ZoneId {
    fn eq(&self, other: &ZoneId) -> bool {
        match (&self.kind, &other.kind) {
            (ZoneKind::Offset(o1), ZoneKind::Offset(o2)) => o1 == o2,
            (
                ZoneKind::Prefixed { prefix: p1, offset: o1 },
                ZoneKind::Prefixed { prefix: p2, offset: o2 },
            ) => p1 == p2 && o1 == o2,
            (
                ZoneKind::Region { name: n1, .. },
                ZoneKind::Region { name: n2, .. },
            ) => n1 == n2,
            _ => false,
        }
    }
}

impl core::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.kind {
            ZoneKind::Offset(offset) => write_offset_id(f, offset),
            ZoneKind::Prefixed { prefix, offset } => {
                f.write_str(prefix)?;
                if offset != Offset::UTC {
                    write_offset_id(f, offset)?;
                }
                Ok(())
            }
            ZoneKind::Region { ref name, .. } => f.write_str(name),
        }
    }
}

impl core::str::FromStr for ZoneId {
    type Err = Error;

    fn from_str(s: &str) -> Result<ZoneId, Error> {
        ZoneId::of(s)
    }
}

impl From<Offset> for ZoneId {
    fn from(offset: Offset) -> ZoneId {
        ZoneId::offset(offset)
    }
}

/// Writes `Z`, `+HH:MM` or `+HH:MM:SS`.
fn write_offset_id(
    f: &mut core::fmt::Formatter,
    offset: Offset,
) -> core::fmt::Result {
    let seconds = offset.seconds();
    if seconds == 0 {
        return f.write_str("Z");
    }
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.unsigned_abs();
    let (h, m, s) = (abs / 3600, (abs / 60) % 60, abs % 60);
    write!(f, "{sign}{h:02}:{m:02}")?;
    if s != 0 {
        write!(f, ":{s:02}")?;
    }
    Ok(())
}

/// Parses `+h`, `+hh`, `+hh:mm`, `+hhmm`, `+hh:mm:ss` or `+hhmmss`.
fn parse_offset(s: &str) -> Result<Offset, Error> {
    let invalid = || {
        Error::from_args(format_args!(
            "invalid offset `{}`, expected a format like `+01:30`",
            escape::Str(s),
        ))
    };
    let bytes = s.as_bytes();
    let (sign, rest) = match bytes.split_first() {
        Some((b'+', rest)) => (1, rest),
        Some((b'-', rest)) => (-1, rest),
        _ => return Err(invalid()),
    };
    let two = |at: usize| -> Option<i32> {
        let d = rest.get(at..at + 2)?;
        if !d.iter().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(i32::from(d[0] - b'0') * 10 + i32::from(d[1] - b'0'))
    };
    let (hours, minutes, seconds) = match rest.len() {
        1 if rest[0].is_ascii_digit() => (i32::from(rest[0] - b'0'), 0, 0),
        2 => (two(0).ok_or_else(invalid)?, 0, 0),
        4 => (two(0).ok_or_else(invalid)?, two(2).ok_or_else(invalid)?, 0),
        5 if rest[2] == b':' => {
            (two(0).ok_or_else(invalid)?, two(3).ok_or_else(invalid)?, 0)
        }
        6 => (
            two(0).ok_or_else(invalid)?,
            two(2).ok_or_else(invalid)?,
            two(4).ok_or_else(invalid)?,
        ),
        8 if rest[2] == b':' && rest[5] == b':' => (
            two(0).ok_or_else(invalid)?,
            two(3).ok_or_else(invalid)?,
            two(6).ok_or_else(invalid)?,
        ),
        _ => return Err(invalid()),
    };
    if hours > 18 || minutes > 59 || seconds > 59 {
        return Err(invalid());
    }
    let total = sign * (hours * 3600 + minutes * 60 + seconds);
    Offset::from_seconds(total).map_err(Error::jiff)
}

/// How a prefix tree compares characters.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum MatchMode {
    CaseSensitive,
    CaseInsensitive,
    /// Case insensitive, and ` `, `_` and `/` are ignored.
    Lenient,
}

impl MatchMode {
    fn is_equal(self, c1: char, c2: char) -> bool {
        match self {
            MatchMode::CaseSensitive => c1 == c2,
            MatchMode::CaseInsensitive | MatchMode::Lenient => {
                char_equals_ignore_case(c1, c2)
            }
        }
    }

    fn is_ignored(self, ch: char) -> bool {
        self == MatchMode::Lenient && matches!(ch, ' ' | '_' | '/')
    }
}

/// Compares two characters ignoring case.
pub(crate) fn char_equals_ignore_case(c1: char, c2: char) -> bool {
    c1 == c2
        || c1.to_uppercase().eq(c2.to_uppercase())
        || c1.to_lowercase().eq(c2.to_lowercase())
}

/// A tree of keys sharing prefixes, used to find the longest key that is a
/// prefix of some text.
///
/// Each node holds a fragment of a key. The key of a node is the
/// concatenation of the fragments from the root to it. A node with a value
/// marks the end of a key.
#[derive(Clone, Debug)]
pub(crate) struct PrefixTree {
    mode: MatchMode,
    key: Vec<char>,
    value: Option<Box<str>>,
    children: Vec<PrefixTree>,
}

impl PrefixTree {
    pub(crate) fn new(mode: MatchMode) -> PrefixTree {
        PrefixTree { mode, key: vec![], value: None, children: vec![] }
    }

    /// Adds a key mapped to a value. An existing key's value is replaced.
    pub(crate) fn add(&mut self, key: &str, value: &str) {
        let key: Vec<char> =
            key.chars().filter(|&ch| !self.mode.is_ignored(ch)).collect();
        if key.is_empty() {
            return;
        }
        self.add_chars(&key, value);
    }

    fn add_chars(&mut self, key: &[char], value: &str) {
        let common = self
            .key
            .iter()
            .zip(key)
            .take_while(|&(&c1, &c2)| self.mode.is_equal(c1, c2))
            .count();
        if common == self.key.len() {
            let rest = &key[common..];
            let Some(&first) = rest.first() else {
                self.value = Some(value.into());
                return;
            };
            let mode = self.mode;
            if let Some(child) = self
                .children
                .iter_mut()
                .find(|child| mode.is_equal(child.key[0], first))
            {
                child.add_chars(rest, value);
                return;
            }
            let leaf = self.leaf(rest, value);
            self.children.push(leaf);
            return;
        }
        // Split this node at the end of the common prefix.
        let tail = PrefixTree {
            mode: self.mode,
            key: self.key.split_off(common),
            value: self.value.take(),
            children: core::mem::take(&mut self.children),
        };
        self.children.push(tail);
        if common < key.len() {
            let leaf = self.leaf(&key[common..], value);
            self.children.push(leaf);
        } else {
            self.value = Some(value.into());
        }
    }

    fn leaf(&self, key: &[char], value: &str) -> PrefixTree {
        PrefixTree {
            mode: self.mode,
            key: key.to_vec(),
            value: Some(value.into()),
            children: vec![],
        }
    }

    /// Returns the value of the longest key that is a prefix of
    /// `text[pos..]`, along with the position just after the match.
    pub(crate) fn find(
        &self,
        text: &[char],
        pos: usize,
    ) -> Option<(&str, usize)> {
        let end = self.prefix_of(text, pos)?;
        if end < text.len() {
            for child in self.children.iter() {
                if let Some(found) = child.find(text, end) {
                    return Some(found);
                }
            }
        }
        self.value.as_deref().map(|value| (value, end))
    }

    /// Returns the position after this node's key fragment if the text at
    /// `pos` starts with it.
    fn prefix_of(&self, text: &[char], mut pos: usize) -> Option<usize> {
        let mut key = self.key.iter();
        let mut next = key.next();
        while let Some(&k) = next {
            let &ch = text.get(pos)?;
            pos += 1;
            if self.mode.is_ignored(ch) {
                continue;
            }
            if !self.mode.is_equal(k, ch) {
                return None;
            }
            next = key.next();
        }
        Some(pos)
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
struct TreeKey {
    mode: MatchMode,
    ids: usize,
    names: Option<(&'static str, crate::locale::Locale)>,
}

static TREES: Lazy<Cache<TreeKey, Arc<PrefixTree>>> = Lazy::new(Cache::new);

/// Returns the number of region ids known to the time zone database.
fn region_count() -> usize {
    jiff::tz::db().available().count()
}

/// Adds every region id known to the time zone database to `tree`, mapping
/// each to itself.
fn add_region_ids(tree: &mut PrefixTree) {
    for name in jiff::tz::db().available() {
        tree.add(name.as_str(), name.as_str());
    }
}

/// Returns a prefix tree of all region ids.
///
/// Trees are cached by the number of known region ids, so adding zones to
/// the database causes the tree to be rebuilt.
pub(crate) fn region_tree(mode: MatchMode) -> Arc<PrefixTree> {
    let key = TreeKey { mode, ids: region_count(), names: None };
    TREES.get_or_insert_with(key, |_| {
        debug!("building {mode:?} zone id prefix tree");
        let mut tree = PrefixTree::new(mode);
        add_region_ids(&mut tree);
        Arc::new(tree)
    })
}

/// Returns a prefix tree of all region ids and the display names of a text
/// provider, mapping to their region ids.
pub(crate) fn name_tree(
    mode: MatchMode,
    provider: &dyn crate::text::TextProvider,
    locale: &crate::locale::Locale,
) -> Arc<PrefixTree> {
    let key = TreeKey {
        mode,
        ids: region_count(),
        names: Some((provider.name(), locale.clone())),
    };
    TREES.get_or_insert_with(key, |_| {
        debug!(
            "building {mode:?} zone name prefix tree for {provider} \
             in {locale}",
            provider = provider.name(),
        );
        let mut tree = PrefixTree::new(mode);
        add_region_ids(&mut tree);
        for (name, id) in provider.zone_names(locale) {
            tree.add(&name, &id);
        }
        Arc::new(tree)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn longest_match() {
        let mut tree = PrefixTree::new(MatchMode::CaseSensitive);
        tree.add("Etc/GMT", "Etc/GMT");
        tree.add("Etc/GMT-2", "Etc/GMT-2");
        tree.add("Etc/GMT-14", "Etc/GMT-14");
        tree.add("Europe/Paris", "Europe/Paris");

        let text = chars("Etc/GMT-2");
        assert_eq!(tree.find(&text, 0), Some(("Etc/GMT-2", 9)));
        let text = chars("Etc/GMT-1x");
        assert_eq!(tree.find(&text, 0), Some(("Etc/GMT", 7)));
        let text = chars("Etc/GMT-14");
        assert_eq!(tree.find(&text, 0), Some(("Etc/GMT-14", 10)));
        let text = chars("xEurope/Paris!");
        assert_eq!(tree.find(&text, 1), Some(("Europe/Paris", 13)));
        let text = chars("Etc");
        assert_eq!(tree.find(&text, 0), None);
        let text = chars("etc/gmt");
        assert_eq!(tree.find(&text, 0), None);
    }

    #[test]
    fn modes() {
        let mut tree = PrefixTree::new(MatchMode::CaseInsensitive);
        tree.add("America/New_York", "America/New_York");
        let text = chars("AMERICA/NEW_YORK");
        assert_eq!(tree.find(&text, 0), Some(("America/New_York", 16)));

        let mut tree = PrefixTree::new(MatchMode::Lenient);
        tree.add("America/New_York", "America/New_York");
        let text = chars("america newyork");
        assert_eq!(tree.find(&text, 0), Some(("America/New_York", 15)));
    }

    #[test]
    fn replace_value() {
        let mut tree = PrefixTree::new(MatchMode::CaseSensitive);
        tree.add("CET", "Europe/Berlin");
        tree.add("CET", "Europe/Paris");
        tree.add("C", "C");
        let text = chars("CET");
        assert_eq!(tree.find(&text, 0), Some(("Europe/Paris", 3)));
        let text = chars("CE");
        assert_eq!(tree.find(&text, 0), Some(("C", 1)));
    }

    #[test]
    fn zone_ids() {
        insta::assert_snapshot!(ZoneId::of("+1").unwrap(), @"+01:00");
        insta::assert_snapshot!(
            ZoneId::of("-01:30:15").unwrap(),
            @"-01:30:15",
        );
        insta::assert_snapshot!(ZoneId::of("GMT").unwrap(), @"GMT");
        insta::assert_snapshot!(ZoneId::of("UT-0200").unwrap(), @"UT-02:00");
        insta::assert_snapshot!(
            ZoneId::of("Etc/GMT-2").unwrap(),
            @"Etc/GMT-2",
        );
        insta::assert_snapshot!(
            ZoneId::of("+19").unwrap_err(),
            @"invalid offset `+19`, expected a format like `+01:30`",
        );
        assert!(ZoneId::of("Mars/Olympus_Mons").is_err());
        assert_eq!(
            ZoneId::prefixed("", Offset::UTC),
            ZoneId::of("Z").unwrap(),
        );
        assert_ne!(ZoneId::of("UTC").unwrap(), ZoneId::of("Z").unwrap());
    }

    #[test]
    fn from_time_zone() {
        let tz = jiff::tz::db().get("Asia/Tokyo").unwrap();
        let zone = ZoneId::from_time_zone(&tz).unwrap();
        assert_eq!(zone.region_name(), Some("Asia/Tokyo"));
        let tz = TimeZone::fixed(jiff::tz::offset(5));
        assert_eq!(
            ZoneId::from_time_zone(&tz).unwrap().as_offset(),
            Some(jiff::tz::offset(5)),
        );
    }

    #[test]
    fn region_trees() {
        let tree = region_tree(MatchMode::CaseSensitive);
        let text = chars("America/New_York!");
        assert_eq!(tree.find(&text, 0), Some(("America/New_York", 16)));

        // Later lookups reuse the cached tree as long as the set of region
        // ids doesn't change.
        let again = region_tree(MatchMode::CaseSensitive);
        assert!(Arc::ptr_eq(&tree, &again));
        let key = TreeKey {
            mode: MatchMode::CaseSensitive,
            ids: region_count(),
            names: None,
        };
        assert!(TREES.get(&key).is_some());
    }

    #[test]
    fn name_trees() {
        let locale = crate::locale::Locale::english_us();
        let provider = crate::text::EnglishText;
        let tree = name_tree(MatchMode::CaseSensitive, &provider, &locale);
        let again = name_tree(MatchMode::CaseSensitive, &provider, &locale);
        assert!(Arc::ptr_eq(&tree, &again));
        let text = chars("Asia/Tokyo");
        assert_eq!(tree.find(&text, 0), Some(("Asia/Tokyo", 10)));
    }
}
