//! Capability traits for types that take part in typed conversion.
//!
//! The engine resolves strategies from per-type source records (see
//! [`NativeSources`](super::NativeSources)). Downstream types that want to
//! participate without hand-building a record implement these traits and call
//! [`Registry::register`](super::Registry::register): the registry derives the
//! source record from the trait impls.
//!
//! Implementing [`ParseText`] fills the locale-aware throwing slot,
//! [`TryParseText`] the locale-aware safe slot, and [`FormatText`] the
//! formattable capability. Types without [`TryParseText`] still get a safe
//! parse — the resolver wraps the throwing parse in a failure handler.

use super::error::ConvertError;
use super::locale::Locale;

/// A type that can be parsed from text with locale-specific rules.
///
/// # Examples
///
/// ```rust
/// use valtext::convert::{ConvertError, Locale, ParseText};
///
/// #[derive(Debug, PartialEq)]
/// struct Percentage(f64);
///
/// impl ParseText for Percentage {
///     fn parse_text(text: &str, locale: &Locale) -> Result<Self, ConvertError> {
///         let body = text.strip_suffix('%').ok_or_else(|| {
///             ConvertError::Conversion { target: "Percentage", cause: None }
///         })?;
///         locale
///             .normalize_number(body)
///             .parse::<f64>()
///             .map(Percentage)
///             .map_err(|_| ConvertError::Conversion { target: "Percentage", cause: None })
///     }
/// }
///
/// let parsed = Percentage::parse_text("12.5%", &Locale::INVARIANT).unwrap();
/// assert_eq!(parsed, Percentage(12.5));
/// ```
pub trait ParseText: Sized {
    /// Parses `text` under `locale`, failing with a [`ConvertError`] when the
    /// text does not represent a value of this type.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Conversion`] when the text is not a valid
    /// rendering of `Self`.
    fn parse_text(text: &str, locale: &Locale) -> Result<Self, ConvertError>;
}

/// A type with a native safe parse: reports failure instead of raising.
pub trait TryParseText: Sized {
    /// Parses `text` under `locale`, returning `None` on any failure.
    fn try_parse_text(text: &str, locale: &Locale) -> Option<Self>;
}

/// A type that can render itself to text given a format string and locale.
///
/// The resolver always invokes this with an empty format string; the argument
/// exists so implementations can support richer renderings when called
/// directly.
pub trait FormatText {
    /// Renders `self` as text.
    fn format_text(&self, format: &str, locale: &Locale) -> String;
}
