//! Resolved conversion strategies and the per-type source records they are
//! built from.
//!
//! A [`Strategy`] is the final, cached answer to "how does text become a `T`
//! and a `T` become text": three closures, composed once per type by
//! [`Registry`](super::Registry) and reused for every later call.
//!
//! A [`NativeSources`] record describes what a type natively offers — which of
//! the throwing, safe, style-aware and formatting shapes exist for it. The
//! resolver walks the record in a fixed precedence order; the same record
//! always yields the same strategy.

use std::sync::Arc;

use super::error::ConvertError;
use super::locale::Locale;
use super::style::{DateStyle, NumberStyle};
use super::traits::{FormatText, ParseText, TryParseText};

pub(crate) type ParseFn<T> =
    Arc<dyn Fn(&str, &Locale) -> Result<T, ConvertError> + Send + Sync>;
pub(crate) type TryParseFn<T> = Arc<dyn Fn(&str, &Locale) -> Option<T> + Send + Sync>;
pub(crate) type FormatFn<T> =
    Arc<dyn Fn(&T, &Locale) -> Result<String, ConvertError> + Send + Sync>;

type PlainParseFn<T> = Arc<dyn Fn(&str) -> Result<T, ConvertError> + Send + Sync>;
type ConstructFn<T> = Arc<dyn Fn(&str) -> T + Send + Sync>;
type PlainTryFn<T> = Arc<dyn Fn(&str) -> Option<T> + Send + Sync>;
type NumberTryFn<T> = Arc<dyn Fn(&str, NumberStyle, &Locale) -> Option<T> + Send + Sync>;
type DateTryFn<T> = Arc<dyn Fn(&str, DateStyle, &Locale) -> Option<T> + Send + Sync>;
type FormatWithFn<T> = Arc<dyn Fn(&T, &str, &Locale) -> String + Send + Sync>;
type DisplayFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// The conversion shapes a type natively offers.
///
/// Built through the builder methods and handed to
/// [`Registry::register_with_sources`](super::Registry::register_with_sources);
/// every slot is optional. The resolver prefers locale-aware shapes over plain
/// ones and safe shapes over wrapped throwing ones — see the precedence notes
/// on [`Strategy`].
pub struct NativeSources<T> {
    target: &'static str,
    parse_localized: Option<ParseFn<T>>,
    parse_plain: Option<PlainParseFn<T>>,
    construct: Option<ConstructFn<T>>,
    try_localized: Option<TryParseFn<T>>,
    try_number: Option<(NumberTryFn<T>, NumberStyle)>,
    try_date: Option<(DateTryFn<T>, DateStyle)>,
    try_plain: Option<PlainTryFn<T>>,
    format_with: Option<FormatWithFn<T>>,
    display: Option<DisplayFn<T>>,
}

impl<T> NativeSources<T> {
    /// Creates an empty record for the named target type.
    pub fn new(target: &'static str) -> Self {
        Self {
            target,
            parse_localized: None,
            parse_plain: None,
            construct: None,
            try_localized: None,
            try_number: None,
            try_date: None,
            try_plain: None,
            format_with: None,
            display: None,
        }
    }

    /// Name of the target type this record describes.
    pub fn target(&self) -> &'static str {
        self.target
    }

    /// Registers a locale-aware throwing parse.
    pub fn parse_localized<F>(mut self, parse: F) -> Self
    where
        F: Fn(&str, &Locale) -> Result<T, ConvertError> + Send + Sync + 'static,
    {
        self.parse_localized = Some(Arc::new(parse));
        self
    }

    /// Registers a plain throwing parse (no locale).
    pub fn parse_plain<F>(mut self, parse: F) -> Self
    where
        F: Fn(&str) -> Result<T, ConvertError> + Send + Sync + 'static,
    {
        self.parse_plain = Some(Arc::new(parse));
        self
    }

    /// Registers an infallible single-text constructor.
    pub fn construct<F>(mut self, construct: F) -> Self
    where
        F: Fn(&str) -> T + Send + Sync + 'static,
    {
        self.construct = Some(Arc::new(construct));
        self
    }

    /// Registers a locale-aware safe parse.
    pub fn try_localized<F>(mut self, try_parse: F) -> Self
    where
        F: Fn(&str, &Locale) -> Option<T> + Send + Sync + 'static,
    {
        self.try_localized = Some(Arc::new(try_parse));
        self
    }

    /// Registers a number-style-aware safe parse with the default style the
    /// resolver invokes it with.
    pub fn try_number<F>(mut self, try_parse: F, default_style: NumberStyle) -> Self
    where
        F: Fn(&str, NumberStyle, &Locale) -> Option<T> + Send + Sync + 'static,
    {
        self.try_number = Some((Arc::new(try_parse), default_style));
        self
    }

    /// Registers a date-style-aware safe parse with the default style the
    /// resolver invokes it with.
    pub fn try_date<F>(mut self, try_parse: F, default_style: DateStyle) -> Self
    where
        F: Fn(&str, DateStyle, &Locale) -> Option<T> + Send + Sync + 'static,
    {
        self.try_date = Some((Arc::new(try_parse), default_style));
        self
    }

    /// Registers a plain safe parse (no locale).
    pub fn try_plain<F>(mut self, try_parse: F) -> Self
    where
        F: Fn(&str) -> Option<T> + Send + Sync + 'static,
    {
        self.try_plain = Some(Arc::new(try_parse));
        self
    }

    /// Registers the formattable capability (format string + locale).
    pub fn format_with<F>(mut self, format: F) -> Self
    where
        F: Fn(&T, &str, &Locale) -> String + Send + Sync + 'static,
    {
        self.format_with = Some(Arc::new(format));
        self
    }

    /// Registers the generic `to_string` fallback.
    pub fn display<F>(mut self, display: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.display = Some(Arc::new(display));
        self
    }

    /// Returns whether the record has no sources at all.
    pub fn is_empty(&self) -> bool {
        self.parse_localized.is_none()
            && self.parse_plain.is_none()
            && self.construct.is_none()
            && self.try_localized.is_none()
            && self.try_number.is_none()
            && self.try_date.is_none()
            && self.try_plain.is_none()
            && self.format_with.is_none()
            && self.display.is_none()
    }
}

impl<T> NativeSources<T>
where
    T: ParseText + 'static,
{
    /// Derives a record from a type's [`ParseText`] implementation, with
    /// `Display` formatting.
    pub fn from_parse_text(target: &'static str) -> Self
    where
        T: std::fmt::Display,
    {
        Self::new(target)
            .parse_localized(T::parse_text)
            .display(|value: &T| value.to_string())
    }
}

/// A resolved parse/format strategy for one target type.
///
/// Parse resolution precedence (first match wins):
///
/// 1. `String` — the identity strategy (handled by the registry).
/// 2. `Option<U>` — blank text is `None`, anything else delegates to `U`.
/// 3. A registered custom converter, falling back to the native chain below
///    when it reports failure (never the reverse).
/// 4. Locale-aware throwing parse.
/// 5. Plain throwing parse.
/// 6. Single-text constructor.
///
/// The safe variant prefers a native safe source — locale-aware, then
/// number-style-aware (invoked with its registered default style), then
/// date-style-aware, then plain — over wrapping the throwing chain in a
/// failure handler. Formatting prefers the formattable capability (empty
/// format string) over the `to_string` fallback.
pub struct Strategy<T> {
    parse: ParseFn<T>,
    try_parse: TryParseFn<T>,
    format: FormatFn<T>,
}

impl<T> Clone for Strategy<T> {
    fn clone(&self) -> Self {
        Self {
            parse: Arc::clone(&self.parse),
            try_parse: Arc::clone(&self.try_parse),
            format: Arc::clone(&self.format),
        }
    }
}

impl<T> Strategy<T> {
    /// Parses `text` under `locale`.
    ///
    /// # Errors
    ///
    /// [`ConvertError::Conversion`] when the underlying parser fails,
    /// [`ConvertError::NoStrategy`] when the type resolved with no parse
    /// source at all.
    pub fn parse(&self, text: &str, locale: &Locale) -> Result<T, ConvertError> {
        (self.parse)(text, locale)
    }

    /// Parses `text` under `locale`, reporting failure as `None`.
    pub fn try_parse(&self, text: &str, locale: &Locale) -> Option<T> {
        (self.try_parse)(text, locale)
    }

    /// Formats `value` under `locale`.
    ///
    /// # Errors
    ///
    /// [`ConvertError::NoStrategy`] when the type resolved with no format
    /// source.
    pub fn format(&self, value: &T, locale: &Locale) -> Result<String, ConvertError> {
        (self.format)(value, locale)
    }
}

impl<T: 'static> Strategy<T> {
    /// Composes the strategy for a type from its native sources and an
    /// optional custom converter.
    ///
    /// Returns `None` when neither exists; the caller caches that as a
    /// negative entry. Resolution itself never fails: a record that offers
    /// only formatting still resolves, with the parse closures reporting
    /// `NoStrategy`/`None` at the point of use.
    pub(crate) fn resolve(
        target: &'static str,
        natives: Option<&Arc<NativeSources<T>>>,
        custom: Option<TryParseFn<T>>,
    ) -> Option<Self> {
        if natives.is_none() && custom.is_none() {
            return None;
        }

        let native_parse = natives.and_then(|sources| Self::native_parse(sources));
        let native_try = natives.and_then(|sources| Self::native_try(sources, &native_parse));

        let parse = Self::compose_parse(target, custom.clone(), native_parse);
        let try_parse = Self::compose_try(custom, native_try);
        let format = Self::compose_format(target, natives);

        Some(Self {
            parse,
            try_parse,
            format,
        })
    }

    /// The throwing chain: locale-aware parse, then plain parse, then
    /// constructor.
    fn native_parse(sources: &NativeSources<T>) -> Option<ParseFn<T>> {
        if let Some(parse) = &sources.parse_localized {
            return Some(Arc::clone(parse));
        }
        if let Some(parse) = &sources.parse_plain {
            let parse = Arc::clone(parse);
            return Some(Arc::new(move |text: &str, _locale: &Locale| parse(text)));
        }
        if let Some(construct) = &sources.construct {
            let construct = Arc::clone(construct);
            return Some(Arc::new(move |text: &str, _locale: &Locale| {
                Ok(construct(text))
            }));
        }
        None
    }

    /// The safe chain: native safe sources in preference order, else the
    /// throwing chain wrapped in a failure handler.
    fn native_try(
        sources: &NativeSources<T>,
        native_parse: &Option<ParseFn<T>>,
    ) -> Option<TryParseFn<T>> {
        if let Some(try_parse) = &sources.try_localized {
            return Some(Arc::clone(try_parse));
        }
        if let Some((try_parse, default_style)) = &sources.try_number {
            let try_parse = Arc::clone(try_parse);
            let style = *default_style;
            return Some(Arc::new(move |text: &str, locale: &Locale| {
                try_parse(text, style, locale)
            }));
        }
        if let Some((try_parse, default_style)) = &sources.try_date {
            let try_parse = Arc::clone(try_parse);
            let style = *default_style;
            return Some(Arc::new(move |text: &str, locale: &Locale| {
                try_parse(text, style, locale)
            }));
        }
        if let Some(try_parse) = &sources.try_plain {
            let try_parse = Arc::clone(try_parse);
            return Some(Arc::new(move |text: &str, _locale: &Locale| try_parse(text)));
        }
        if let Some(parse) = native_parse {
            let parse = Arc::clone(parse);
            return Some(Arc::new(move |text: &str, locale: &Locale| {
                parse(text, locale).ok()
            }));
        }
        None
    }

    /// Custom converter first, native chain as fallback on custom failure.
    fn compose_parse(
        target: &'static str,
        custom: Option<TryParseFn<T>>,
        native: Option<ParseFn<T>>,
    ) -> ParseFn<T> {
        match (custom, native) {
            (Some(custom), Some(native)) => Arc::new(move |text: &str, locale: &Locale| {
                custom(text, locale).map_or_else(|| native(text, locale), Ok)
            }),
            (Some(custom), None) => Arc::new(move |text: &str, locale: &Locale| {
                custom(text, locale).ok_or_else(|| ConvertError::conversion_bare(target))
            }),
            (None, Some(native)) => native,
            (None, None) => {
                Arc::new(move |_: &str, _: &Locale| Err(ConvertError::NoStrategy { target }))
            }
        }
    }

    fn compose_try(custom: Option<TryParseFn<T>>, native: Option<TryParseFn<T>>) -> TryParseFn<T> {
        match (custom, native) {
            (Some(custom), Some(native)) => Arc::new(move |text: &str, locale: &Locale| {
                custom(text, locale).or_else(|| native(text, locale))
            }),
            (Some(only), None) | (None, Some(only)) => only,
            (None, None) => Arc::new(|_: &str, _: &Locale| None),
        }
    }

    /// Formattable capability with an empty format string, else `to_string`.
    fn compose_format(
        target: &'static str,
        natives: Option<&Arc<NativeSources<T>>>,
    ) -> FormatFn<T> {
        if let Some(format) = natives.and_then(|sources| sources.format_with.clone()) {
            return Arc::new(move |value: &T, locale: &Locale| Ok(format(value, "", locale)));
        }
        if let Some(display) = natives.and_then(|sources| sources.display.clone()) {
            return Arc::new(move |value: &T, _locale: &Locale| Ok(display(value)));
        }
        Arc::new(move |_: &T, _: &Locale| Err(ConvertError::NoStrategy { target }))
    }
}

impl Strategy<String> {
    /// The identity strategy: text passes through unchanged both ways.
    pub(crate) fn identity() -> Self {
        Self {
            parse: Arc::new(|text: &str, _: &Locale| Ok(text.to_owned())),
            try_parse: Arc::new(|text: &str, _: &Locale| Some(text.to_owned())),
            format: Arc::new(|value: &String, _: &Locale| Ok(value.clone())),
        }
    }
}

impl<T: 'static> Strategy<Option<T>> {
    /// Lifts a strategy for `T` into one for `Option<T>`: blank text is the
    /// absent value, anything else delegates to the inner strategy; `None`
    /// formats to empty text.
    pub(crate) fn optional(inner: Arc<Strategy<T>>) -> Self {
        let parse_inner = Arc::clone(&inner);
        let try_inner = Arc::clone(&inner);
        Self {
            parse: Arc::new(move |text: &str, locale: &Locale| {
                if text.trim().is_empty() {
                    Ok(None)
                } else {
                    parse_inner.parse(text, locale).map(Some)
                }
            }),
            try_parse: Arc::new(move |text: &str, locale: &Locale| {
                if text.trim().is_empty() {
                    Some(None)
                } else {
                    try_inner.try_parse(text, locale).map(Some)
                }
            }),
            format: Arc::new(move |value: &Option<T>, locale: &Locale| match value {
                Some(value) => inner.format(value, locale),
                None => Ok(String::new()),
            }),
        }
    }
}

/// Derives a full source record from a type's capability-trait impls.
///
/// Used by [`Registry::register`](super::Registry::register); the locale-aware
/// slots come from [`ParseText`]/[`TryParseText`], the formattable slot from
/// [`FormatText`].
pub(crate) fn sources_from_traits<T>(target: &'static str) -> NativeSources<T>
where
    T: ParseText + TryParseText + FormatText + 'static,
{
    NativeSources::new(target)
        .parse_localized(T::parse_text)
        .try_localized(T::try_parse_text)
        .format_with(|value: &T, format: &str, locale: &Locale| value.format_text(format, locale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn int_sources() -> Arc<NativeSources<i32>> {
        Arc::new(
            NativeSources::new("i32")
                .parse_localized(|text, locale| {
                    locale
                        .normalize_number(text)
                        .parse::<i32>()
                        .map_err(|error| ConvertError::conversion("i32", error))
                })
                .display(|value| value.to_string()),
        )
    }

    #[rstest]
    fn test_resolve_nothing_is_none() {
        assert!(Strategy::<i32>::resolve("i32", None, None).is_none());
    }

    #[rstest]
    fn test_native_parse_and_format() {
        let sources = int_sources();
        let strategy = Strategy::resolve("i32", Some(&sources), None).unwrap();

        assert_eq!(strategy.parse("42", &Locale::INVARIANT).unwrap(), 42);
        assert_eq!(strategy.try_parse("42", &Locale::INVARIANT), Some(42));
        assert_eq!(strategy.try_parse("nope", &Locale::INVARIANT), None);
        assert_eq!(strategy.format(&7, &Locale::INVARIANT).unwrap(), "7");
    }

    #[rstest]
    fn test_custom_wins_over_native() {
        let sources = int_sources();
        let custom: TryParseFn<i32> = Arc::new(|text: &str, _: &Locale| {
            (text == "answer").then_some(42)
        });
        let strategy = Strategy::resolve("i32", Some(&sources), Some(custom)).unwrap();

        // Custom hit
        assert_eq!(strategy.parse("answer", &Locale::INVARIANT).unwrap(), 42);
        // Custom miss falls back to the native chain
        assert_eq!(strategy.parse("7", &Locale::INVARIANT).unwrap(), 7);
        // Both miss
        assert!(strategy.parse("nope", &Locale::INVARIANT).is_err());
    }

    #[rstest]
    fn test_custom_only_failure_is_conversion_error() {
        let custom: TryParseFn<i32> = Arc::new(|_: &str, _: &Locale| None);
        let strategy = Strategy::resolve("i32", None, Some(custom)).unwrap();

        let error = strategy.parse("anything", &Locale::INVARIANT).unwrap_err();
        assert!(error.is_conversion());
        assert_eq!(strategy.try_parse("anything", &Locale::INVARIANT), None);
    }

    #[rstest]
    fn test_format_only_record_reports_no_parse_strategy() {
        let sources = Arc::new(NativeSources::<i32>::new("i32").display(|value| value.to_string()));
        let strategy = Strategy::resolve("i32", Some(&sources), None).unwrap();

        assert!(strategy.parse("42", &Locale::INVARIANT).unwrap_err().is_no_strategy());
        assert_eq!(strategy.try_parse("42", &Locale::INVARIANT), None);
        assert_eq!(strategy.format(&42, &Locale::INVARIANT).unwrap(), "42");
    }

    #[rstest]
    fn test_plain_parse_ranks_below_localized() {
        let sources = Arc::new(
            NativeSources::<i32>::new("i32")
                .parse_plain(|_| Ok(1))
                .parse_localized(|_, _| Ok(2)),
        );
        let strategy = Strategy::resolve("i32", Some(&sources), None).unwrap();
        assert_eq!(strategy.parse("x", &Locale::INVARIANT).unwrap(), 2);
    }

    #[rstest]
    fn test_constructor_is_last_throwing_source() {
        let sources = Arc::new(NativeSources::<i32>::new("i32").construct(|text| text.len() as i32));
        let strategy = Strategy::resolve("i32", Some(&sources), None).unwrap();
        assert_eq!(strategy.parse("abc", &Locale::INVARIANT).unwrap(), 3);
    }

    #[rstest]
    fn test_safe_chain_prefers_native_try_over_wrapped_throwing() {
        let sources = Arc::new(
            NativeSources::<i32>::new("i32")
                .parse_localized(|_, _| Ok(1))
                .try_plain(|_| Some(2)),
        );
        let strategy = Strategy::resolve("i32", Some(&sources), None).unwrap();
        assert_eq!(strategy.try_parse("x", &Locale::INVARIANT), Some(2));
        // Throwing chain untouched by the safe sources
        assert_eq!(strategy.parse("x", &Locale::INVARIANT).unwrap(), 1);
    }

    #[rstest]
    fn test_number_style_default_applied() {
        let sources = Arc::new(NativeSources::<i32>::new("i32").try_number(
            |text, style, locale| {
                let normalized = locale.normalize_number(text);
                style
                    .permits(&normalized)
                    .then(|| normalized.parse::<i32>().ok())
                    .flatten()
            },
            NumberStyle::INTEGER,
        ));
        let strategy = Strategy::resolve("i32", Some(&sources), None).unwrap();
        assert_eq!(strategy.try_parse("42", &Locale::INVARIANT), Some(42));
        // INTEGER default rejects fractional notation before the parser runs
        assert_eq!(strategy.try_parse("4.2", &Locale::INVARIANT), None);
    }

    #[rstest]
    fn test_identity_strategy_round_trips() {
        let strategy = Strategy::identity();
        assert_eq!(strategy.parse("hi", &Locale::INVARIANT).unwrap(), "hi");
        assert_eq!(strategy.format(&"hi".to_owned(), &Locale::INVARIANT).unwrap(), "hi");
    }

    #[rstest]
    fn test_optional_strategy_semantics() {
        let sources = int_sources();
        let inner = Arc::new(Strategy::resolve("i32", Some(&sources), None).unwrap());
        let optional = Strategy::optional(inner);

        assert_eq!(optional.parse("  ", &Locale::INVARIANT).unwrap(), None);
        assert_eq!(optional.parse("5", &Locale::INVARIANT).unwrap(), Some(5));
        assert!(optional.parse("nope", &Locale::INVARIANT).is_err());
        assert_eq!(optional.try_parse("", &Locale::INVARIANT), Some(None));
        assert_eq!(optional.try_parse("5", &Locale::INVARIANT), Some(Some(5)));
        assert_eq!(optional.try_parse("nope", &Locale::INVARIANT), None);
        assert_eq!(optional.format(&None, &Locale::INVARIANT).unwrap(), "");
        assert_eq!(optional.format(&Some(5), &Locale::INVARIANT).unwrap(), "5");
    }
}
