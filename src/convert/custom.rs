//! Custom converter overrides.
//!
//! A custom converter bypasses a type's own parsers entirely: the resolver
//! consults it before the native chain and falls back to the native chain only
//! when the converter reports failure. Converters are inherently safe — they
//! report success or failure, never raise.
//!
//! Two built-ins ship with [`Registry::with_builtins`](super::Registry::with_builtins):
//! the boolean word table (`true`/`yes`/`1`, `false`/`no`/`0`) and, with the
//! `uri` feature, absolute URIs via [`url::Url`].

use std::sync::Arc;

use super::locale::Locale;
use super::strategy::TryParseFn;

/// A hand-written safe-parse override for one target type.
pub struct CustomConverter<T> {
    try_parse: TryParseFn<T>,
}

impl<T> CustomConverter<T> {
    /// Creates a converter from a safe-parse closure.
    pub fn new<F>(try_parse: F) -> Self
    where
        F: Fn(&str, &Locale) -> Option<T> + Send + Sync + 'static,
    {
        Self {
            try_parse: Arc::new(try_parse),
        }
    }

    /// Runs the converter; `None` means "not recognized".
    pub fn try_parse(&self, text: &str, locale: &Locale) -> Option<T> {
        (self.try_parse)(text, locale)
    }

    pub(crate) fn parse_fn(&self) -> TryParseFn<T> {
        Arc::clone(&self.try_parse)
    }
}

impl<T> Clone for CustomConverter<T> {
    fn clone(&self) -> Self {
        Self {
            try_parse: Arc::clone(&self.try_parse),
        }
    }
}

/// The boolean word table: `true`/`yes`/`1` and `false`/`no`/`0`,
/// case-insensitive. Anything else is not recognized.
pub(crate) fn parse_bool_word(text: &str) -> Option<bool> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true")
        || trimmed.eq_ignore_ascii_case("yes")
        || trimmed == "1"
    {
        return Some(true);
    }
    if trimmed.eq_ignore_ascii_case("false")
        || trimmed.eq_ignore_ascii_case("no")
        || trimmed == "0"
    {
        return Some(false);
    }
    None
}

/// Built-in boolean converter.
pub fn boolean_converter() -> CustomConverter<bool> {
    CustomConverter::new(|text: &str, _: &Locale| parse_bool_word(text))
}

/// Built-in absolute-URI converter. Relative references are not recognized.
#[cfg(feature = "uri")]
pub fn uri_converter() -> CustomConverter<url::Url> {
    CustomConverter::new(|text: &str, _: &Locale| url::Url::parse(text.trim()).ok())
}
