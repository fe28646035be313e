use once_cell::sync::Lazy;

use crate::{
    chrono::Chronology,
    error::{format::Error as E, Error, ErrorContext},
    fmt::{
        builder::FormatterBuilder,
        context::{ParseContext, PrintContext},
        node::Composite,
    },
    locale::Locale,
    style::FormatStyle,
    text::TextProvider,
    util::cache::Cache,
};

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
struct PatternKey {
    provider: &'static str,
    chrono: &'static str,
    locale: Locale,
    date: Option<FormatStyle>,
    time: Option<FormatStyle>,
}

/// Compiled localized patterns. `None` records that a provider has no
/// pattern for a key.
static PATTERNS: Lazy<Cache<PatternKey, Option<Composite>>> =
    Lazy::new(Cache::new);

/// A date and/or time in a locale's format for a style.
///
/// The pattern comes from the text provider and depends on the chronology
/// of the value, so it is looked up and compiled (once per process) when
/// formatting or parsing.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Localized {
    date: Option<FormatStyle>,
    time: Option<FormatStyle>,
}

impl Localized {
    pub(crate) fn new(
        date: Option<FormatStyle>,
        time: Option<FormatStyle>,
    ) -> Localized {
        Localized { date, time }
    }

    fn compiled(
        &self,
        provider: &dyn TextProvider,
        chrono: &'static dyn Chronology,
        locale: &Locale,
    ) -> Result<Option<Composite>, Error> {
        let key = PatternKey {
            provider: provider.name(),
            chrono: chrono.id(),
            locale: locale.clone(),
            date: self.date,
            time: self.time,
        };
        PATTERNS.get_or_try_insert_with(key, |key| {
            let Some(pattern) = provider.localized_pattern(
                key.date,
                key.time,
                chrono,
                &key.locale,
            ) else {
                return Ok(None);
            };
            debug!(
                "compiling localized pattern `{pattern}` for {locale} \
                 ({provider}, {chrono})",
                locale = key.locale,
                provider = key.provider,
                chrono = key.chrono,
            );
            let composite = FormatterBuilder::new()
                .append_pattern(&pattern)
                .and_then(|builder| builder.into_composite())
                .with_context(|| {
                    Error::from_args(format_args!(
                        "invalid localized pattern from text provider `{}`",
                        key.provider,
                    ))
                })?;
            Ok(Some(composite))
        })
    }

    pub(crate) fn format(
        &self,
        ctx: &mut PrintContext<'_>,
        buf: &mut String,
    ) -> Result<bool, Error> {
        let compiled = self.compiled(
            ctx.text_provider(),
            ctx.text_chronology(),
            ctx.locale(),
        )?;
        let Some(composite) = compiled else {
            return Err(E::NoLocalizedPattern {
                locale: ctx.locale().to_string().into_boxed_str(),
            }
            .into());
        };
        composite.format(ctx, buf)
    }

    pub(crate) fn parse(
        &self,
        ctx: &mut ParseContext<'_>,
        text: &[char],
        pos: usize,
    ) -> Result<usize, usize> {
        let compiled = self.compiled(
            ctx.text_provider(),
            ctx.effective_chronology(),
            ctx.locale(),
        );
        match compiled {
            Ok(Some(composite)) => composite.parse(ctx, text, pos),
            Ok(None) => {
                warn!("no localized pattern for {self} in {}", ctx.locale());
                Err(pos)
            }
            Err(_err) => {
                warn!(
                    "failed to compile localized pattern for {self}: {_err}",
                );
                Err(pos)
            }
        }
    }
}

impl core::fmt::Display for Localized {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("Localized(")?;
        if let Some(style) = self.date {
            write!(f, "{style:?}")?;
        }
        f.write_str(",")?;
        if let Some(style) = self.time {
            write!(f, "{style:?}")?;
        }
        f.write_str(")")
    }
}
