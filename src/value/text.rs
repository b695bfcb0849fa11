//! The immutable text value.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::convert::{default_registry, ConvertError, Locale};

use super::hash::fnv1a_64;
use super::interpolate::expand_placeholders;

/// How two text values are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextComparison {
    /// Byte-for-byte comparison.
    #[default]
    Ordinal,
    /// Unicode lowercase-folded comparison.
    OrdinalIgnoreCase,
}

/// An immutable, guaranteed non-blank piece of text with typed-conversion
/// capability.
///
/// Construction goes through [`TextValue::new`] (raw text) or
/// [`TextValue::from_value`] (formats a typed value first); both reject blank
/// text. Once built, the text never changes — parses and comparisons only
/// read it.
///
/// Equality is ordinal; the hash is the 64-bit FNV-1a digest of the text, so
/// equal values always hash equal and `TextValue` works as a map key whose
/// hash is stable across processes.
///
/// # Examples
///
/// ```rust
/// use valtext::TextValue;
///
/// let port = TextValue::new("8080")?;
/// assert_eq!(port.parse::<u16>()?, 8080);
/// assert_eq!(port.to_string(), "8080");
///
/// assert!(TextValue::new("   ").is_err());
/// # Ok::<(), valtext::ConvertError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TextValue {
    text: Box<str>,
}

impl TextValue {
    /// Wraps raw text.
    ///
    /// # Errors
    ///
    /// [`ConvertError::InvalidArgument`] when `text` is empty or
    /// all-whitespace.
    pub fn new(text: impl Into<String>) -> Result<Self, ConvertError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ConvertError::invalid(
                "text value must not be empty or whitespace-only",
            ));
        }
        Ok(Self {
            text: text.into_boxed_str(),
        })
    }

    /// Formats a typed value through the default registry and wraps the
    /// result.
    ///
    /// # Errors
    ///
    /// [`ConvertError::NoStrategy`] when no format strategy resolves for `T`;
    /// [`ConvertError::InvalidArgument`] when formatting produced blank text
    /// (formatting `None` produces empty text, so absent values are rejected
    /// the same way blank raw text is).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valtext::TextValue;
    ///
    /// let value = TextValue::from_value(&42_i32)?;
    /// assert_eq!(value.as_str(), "42");
    ///
    /// assert!(TextValue::from_value(&None::<i32>).is_err());
    /// # Ok::<(), valtext::ConvertError>(())
    /// ```
    pub fn from_value<T: 'static>(value: &T) -> Result<Self, ConvertError> {
        default_registry().wrap(value)
    }

    /// Locale-aware form of [`TextValue::from_value`].
    ///
    /// # Errors
    ///
    /// Same as [`TextValue::from_value`].
    pub fn from_value_with<T: 'static>(value: &T, locale: &Locale) -> Result<Self, ConvertError> {
        default_registry().wrap_with(value, locale)
    }

    /// The wrapped text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consumes the value and returns the owned text.
    pub fn into_string(self) -> String {
        self.text.into_string()
    }

    /// Parses the text as `T` through the default registry under the
    /// invariant locale.
    ///
    /// # Errors
    ///
    /// [`ConvertError::Conversion`] when the resolved strategy fails,
    /// [`ConvertError::NoStrategy`] when no strategy resolves for `T`.
    pub fn parse<T: 'static>(&self) -> Result<T, ConvertError> {
        default_registry().parse(self)
    }

    /// Parses the text as `T` under an explicit locale.
    ///
    /// # Errors
    ///
    /// Same as [`TextValue::parse`].
    pub fn parse_with<T: 'static>(&self, locale: &Locale) -> Result<T, ConvertError> {
        default_registry().parse_with(self, locale)
    }

    /// Safe parse: `None` on any failure, never an error.
    pub fn try_parse<T: 'static>(&self) -> Option<T> {
        default_registry().try_parse(self)
    }

    /// Safe parse under an explicit locale.
    pub fn try_parse_with<T: 'static>(&self, locale: &Locale) -> Option<T> {
        default_registry().try_parse_with(self, locale)
    }

    /// Substitutes `{key}` placeholders, then parses the result as `T`.
    ///
    /// # Errors
    ///
    /// [`ConvertError::InvalidArgument`] on duplicate substitution keys, plus
    /// everything [`TextValue::parse`] reports.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valtext::TextValue;
    ///
    /// let template = TextValue::new("Hello {name}, you are {age}")?;
    /// let greeting: String =
    ///     template.expand_as(&[("name", "Ann"), ("age", "30")])?;
    /// assert_eq!(greeting, "Hello Ann, you are 30");
    /// # Ok::<(), valtext::ConvertError>(())
    /// ```
    pub fn expand_as<T: 'static>(&self, substitutions: &[(&str, &str)]) -> Result<T, ConvertError> {
        default_registry().expand_as(self, substitutions)
    }

    /// Substitutes placeholders without parsing, yielding a new text value.
    ///
    /// # Errors
    ///
    /// [`ConvertError::InvalidArgument`] on duplicate substitution keys or
    /// when the expansion comes out blank.
    pub fn expand(&self, substitutions: &[(&str, &str)]) -> Result<Self, ConvertError> {
        Self::new(expand_placeholders(&self.text, substitutions)?)
    }

    /// Compares two values under the given comparison mode.
    ///
    /// `Ordinal` is plain `==`; `OrdinalIgnoreCase` folds both sides with
    /// Unicode lowercasing first.
    pub fn eq_with(&self, other: &Self, comparison: TextComparison) -> bool {
        match comparison {
            TextComparison::Ordinal => self.text == other.text,
            TextComparison::OrdinalIgnoreCase => {
                self.text.to_lowercase() == other.text.to_lowercase()
            }
        }
    }

    /// The 64-bit FNV-1a digest of the text.
    ///
    /// A pure function of the wrapped text: equal values always produce equal
    /// digests, across calls and across processes.
    pub fn hash_value(&self) -> u64 {
        fnv1a_64(self.text.as_bytes())
    }
}

impl Hash for TextValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_value());
    }
}

impl fmt::Display for TextValue {
    /// Returns the wrapped text verbatim.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.text)
    }
}

impl AsRef<str> for TextValue {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl FromStr for TextValue {
    type Err = ConvertError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::new(text)
    }
}

impl TryFrom<&str> for TextValue {
    type Error = ConvertError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

impl TryFrom<String> for TextValue {
    type Error = ConvertError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

impl From<TextValue> for String {
    fn from(value: TextValue) -> Self {
        value.into_string()
    }
}

static_assertions::assert_impl_all!(TextValue: Send, Sync);
