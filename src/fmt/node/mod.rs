/*!
The printer-parser nodes a pattern compiles to.

Every node can both format and parse. Formatting appends to a `String` and
returns `Ok(true)` when something was emitted, `Ok(false)` when a value is
unavailable inside an optional section, or an error. Parsing consumes a
slice of characters starting at a position and returns `Ok(end)` on a match
or `Err(pos)` with the position of the mismatch.

Nodes are immutable once built, so a tree can be shared freely between
threads. All of the mutable state of a call lives in its context.
*/

use std::sync::Arc;

use crate::{
    error::{format::Error as E, Error},
    field::Field,
    fmt::context::{ParseContext, PrintContext},
    util::escape,
};

pub(crate) use self::{
    fraction::Fraction,
    localized::Localized,
    number::{Number, ReducedBase},
    offset::{LocalizedOffset, OffsetId},
    text::{ChronologyName, Text},
    zone::{ZoneIdNode, ZoneText},
};

mod fraction;
mod localized;
pub(crate) mod number;
mod offset;
mod text;
mod zone;

/// A single printer-parser.
#[derive(Clone, Debug)]
pub(crate) enum Node {
    Char(char),
    Str(Box<str>),
    Number(Number),
    Fraction(Fraction),
    Text(Text),
    Offset(OffsetId),
    LocalizedOffset(LocalizedOffset),
    ZoneId(ZoneIdNode),
    ZoneText(ZoneText),
    Chronology(ChronologyName),
    Localized(Localized),
    Settings(Settings),
    Default { field: Field, value: i64 },
    Pad(Pad),
    Composite(Composite),
}

impl Node {
    pub(crate) fn format(
        &self,
        ctx: &mut PrintContext<'_>,
        buf: &mut String,
    ) -> Result<bool, Error> {
        match *self {
            Node::Char(ch) => {
                buf.push(ch);
                Ok(true)
            }
            Node::Str(ref s) => {
                buf.push_str(s);
                Ok(true)
            }
            Node::Number(ref n) => n.format(ctx, buf),
            Node::Fraction(ref n) => n.format(ctx, buf),
            Node::Text(ref n) => n.format(ctx, buf),
            Node::Offset(ref n) => n.format(ctx, buf),
            Node::LocalizedOffset(ref n) => n.format(ctx, buf),
            Node::ZoneId(ref n) => n.format(ctx, buf),
            Node::ZoneText(ref n) => n.format(ctx, buf),
            Node::Chronology(ref n) => n.format(ctx, buf),
            Node::Localized(ref n) => n.format(ctx, buf),
            Node::Settings(_) | Node::Default { .. } => Ok(true),
            Node::Pad(ref n) => n.format(ctx, buf),
            Node::Composite(ref n) => n.format(ctx, buf),
        }
    }

    pub(crate) fn parse(
        &self,
        ctx: &mut ParseContext<'_>,
        text: &[char],
        pos: usize,
    ) -> Result<usize, usize> {
        match *self {
            Node::Char(ch) => {
                let Some(&got) = text.get(pos) else { return Err(pos) };
                if !ctx.char_equals(got, ch) {
                    return Err(pos);
                }
                Ok(pos + 1)
            }
            Node::Str(ref s) => ctx.matches(text, pos, s).ok_or(pos),
            Node::Number(ref n) => n.parse(ctx, text, pos),
            Node::Fraction(ref n) => n.parse(ctx, text, pos),
            Node::Text(ref n) => n.parse(ctx, text, pos),
            Node::Offset(ref n) => n.parse(ctx, text, pos),
            Node::LocalizedOffset(ref n) => n.parse(ctx, text, pos),
            Node::ZoneId(ref n) => n.parse(ctx, text, pos),
            Node::ZoneText(ref n) => n.parse(ctx, text, pos),
            Node::Chronology(ref n) => n.parse(ctx, text, pos),
            Node::Localized(ref n) => n.parse(ctx, text, pos),
            Node::Settings(settings) => {
                settings.apply(ctx);
                Ok(pos)
            }
            Node::Default { field, value } => {
                if ctx.field(field).is_none() {
                    // Setting an absent field can't conflict.
                    let _ = ctx.set_field(field, value, pos, pos);
                }
                Ok(pos)
            }
            Node::Pad(ref n) => n.parse(ctx, text, pos),
            Node::Composite(ref n) => n.parse(ctx, text, pos),
        }
    }
}

impl core::fmt::Display for Node {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Node::Char('\'') => f.write_str("''"),
            Node::Char(ch) => write!(f, "'{}'", escape::Char(ch)),
            Node::Str(ref s) => {
                f.write_str("'")?;
                for ch in s.chars() {
                    if ch == '\'' {
                        f.write_str("''")?;
                    } else {
                        write!(f, "{}", escape::Char(ch))?;
                    }
                }
                f.write_str("'")
            }
            Node::Number(ref n) => n.fmt(f),
            Node::Fraction(ref n) => n.fmt(f),
            Node::Text(ref n) => n.fmt(f),
            Node::Offset(ref n) => n.fmt(f),
            Node::LocalizedOffset(ref n) => n.fmt(f),
            Node::ZoneId(ref n) => n.fmt(f),
            Node::ZoneText(ref n) => n.fmt(f),
            Node::Chronology(ref n) => n.fmt(f),
            Node::Localized(ref n) => n.fmt(f),
            Node::Settings(ref n) => n.fmt(f),
            Node::Default { field, value } => {
                write!(f, "Default({field},{value})")
            }
            Node::Pad(ref n) => n.fmt(f),
            Node::Composite(ref n) => n.fmt(f),
        }
    }
}

/// A node that changes how the rest of the pattern is parsed.
///
/// Settings have no effect when formatting.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Settings {
    CaseSensitive,
    CaseInsensitive,
    Strict,
    Lenient,
}

impl Settings {
    fn apply(self, ctx: &mut ParseContext<'_>) {
        match self {
            Settings::CaseSensitive => ctx.set_case_sensitive(true),
            Settings::CaseInsensitive => ctx.set_case_sensitive(false),
            Settings::Strict => ctx.set_strict(true),
            Settings::Lenient => ctx.set_strict(false),
        }
    }
}

impl core::fmt::Display for Settings {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Settings::CaseSensitive => f.write_str("ParseCaseSensitive(true)"),
            Settings::CaseInsensitive => {
                f.write_str("ParseCaseSensitive(false)")
            }
            Settings::Strict => f.write_str("ParseStrict(true)"),
            Settings::Lenient => f.write_str("ParseStrict(false)"),
        }
    }
}

/// Pads the output of another node to a fixed width.
#[derive(Clone, Debug)]
pub(crate) struct Pad {
    node: Box<Node>,
    width: usize,
    ch: char,
}

impl Pad {
    pub(crate) fn new(node: Node, width: usize, ch: char) -> Pad {
        Pad { node: Box::new(node), width, ch }
    }

    fn format(
        &self,
        ctx: &mut PrintContext<'_>,
        buf: &mut String,
    ) -> Result<bool, Error> {
        let start = buf.len();
        if !self.node.format(ctx, buf)? {
            return Ok(false);
        }
        let len = buf[start..].chars().count();
        if len > self.width {
            return Err(E::ExceedsPad { len, width: self.width }.into());
        }
        let padding: String =
            core::iter::repeat(self.ch).take(self.width - len).collect();
        buf.insert_str(start, &padding);
        Ok(true)
    }

    fn parse(
        &self,
        ctx: &mut ParseContext<'_>,
        text: &[char],
        pos: usize,
    ) -> Result<usize, usize> {
        if pos == text.len() {
            return Err(pos);
        }
        let strict = ctx.is_strict();
        let mut end = pos + self.width;
        if end > text.len() {
            if strict {
                return Err(pos);
            }
            end = text.len();
        }
        let mut cur = pos;
        while cur < end && ctx.char_equals(text[cur], self.ch) {
            cur += 1;
        }
        let got = self.node.parse(ctx, &text[..end], cur)?;
        if got != end && strict {
            return Err(cur);
        }
        Ok(got)
    }
}

impl core::fmt::Display for Pad {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Pad({},{}", self.node, self.width)?;
        if self.ch != ' ' {
            write!(f, ",'{}'", escape::Char(self.ch))?;
        }
        f.write_str(")")
    }
}

/// A sequence of nodes, possibly optional.
#[derive(Clone, Debug)]
pub(crate) struct Composite {
    nodes: Arc<[Node]>,
    optional: bool,
}

impl Composite {
    pub(crate) fn new(nodes: Vec<Node>, optional: bool) -> Composite {
        Composite { nodes: Arc::from(nodes), optional }
    }

    /// Returns this sequence with a different optional flag.
    pub(crate) fn with_optional(&self, optional: bool) -> Composite {
        Composite { nodes: Arc::clone(&self.nodes), optional }
    }

    pub(crate) fn format(
        &self,
        ctx: &mut PrintContext<'_>,
        buf: &mut String,
    ) -> Result<bool, Error> {
        let start = buf.len();
        if self.optional {
            ctx.start_optional();
        }
        let result = self.format_nodes(ctx, buf);
        if self.optional {
            ctx.end_optional();
        }
        if !result? {
            buf.truncate(start);
        }
        Ok(true)
    }

    fn format_nodes(
        &self,
        ctx: &mut PrintContext<'_>,
        buf: &mut String,
    ) -> Result<bool, Error> {
        for node in self.nodes.iter() {
            if !node.format(ctx, buf)? {
                return Ok(false);
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
        if !self.optional {
            let mut cur = pos;
            for node in self.nodes.iter() {
                cur = node.parse(ctx, text, cur)?;
            }
            return Ok(cur);
        }
        ctx.start_optional();
        let mut cur = pos;
        for node in self.nodes.iter() {
            match node.parse(ctx, text, cur) {
                Ok(end) => cur = end,
                Err(_) => {
                    ctx.end_optional(false);
                    return Ok(pos);
                }
            }
        }
        ctx.end_optional(true);
        Ok(cur)
    }
}

impl core::fmt::Display for Composite {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(if self.optional { "[" } else { "(" })?;
        for node in self.nodes.iter() {
            node.fmt(f)?;
        }
        f.write_str(if self.optional { "]" } else { ")" })
    }
}
