//! Locale-specific number formatting rules.
//!
//! The conversion engine is culture-neutral by default: every `parse` and
//! `wrap` call that omits a locale uses [`Locale::INVARIANT`]. A caller that
//! works with localized numeric text ("1.234,5") supplies an explicit locale
//! through the `_with` variants.
//!
//! Only the pieces the numeric strategies actually consult are modelled: the
//! decimal separator and the digit-group separator.

use std::borrow::Cow;

/// Culture-specific number formatting rules.
///
/// # Examples
///
/// ```rust
/// use valtext::Locale;
///
/// let german = Locale::new(',', '.');
/// assert_eq!(german.normalize_number("1.234,5"), "1234.5");
/// assert_eq!(Locale::INVARIANT.normalize_number("1234.5"), "1234.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    decimal_separator: char,
    group_separator: char,
}

impl Locale {
    /// The culture-invariant locale: `.` decimal separator, `,` grouping.
    pub const INVARIANT: Self = Self {
        decimal_separator: '.',
        group_separator: ',',
    };

    /// Creates a locale from its separators.
    #[inline]
    pub const fn new(decimal_separator: char, group_separator: char) -> Self {
        Self {
            decimal_separator,
            group_separator,
        }
    }

    /// Returns the decimal separator.
    #[inline]
    pub const fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    /// Returns the digit-group separator.
    #[inline]
    pub const fn group_separator(&self) -> char {
        self.group_separator
    }

    /// Rewrites localized numeric text into the canonical form the standard
    /// parsers accept: group separators removed, the decimal separator
    /// replaced by `.`.
    ///
    /// Returns the input unchanged (without allocating) when no rewriting is
    /// needed.
    pub fn normalize_number<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let needs_rewrite = text
            .chars()
            .any(|ch| ch == self.group_separator || (ch == self.decimal_separator && ch != '.'));
        if !needs_rewrite {
            return Cow::Borrowed(text);
        }

        let mut normalized = String::with_capacity(text.len());
        for ch in text.chars() {
            if ch == self.group_separator {
                continue;
            }
            if ch == self.decimal_separator {
                normalized.push('.');
            } else {
                normalized.push(ch);
            }
        }
        Cow::Owned(normalized)
    }

    /// Rewrites canonical numeric text into this locale's notation by
    /// replacing the `.` decimal point. Grouping is never inserted.
    pub fn localize_number<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.decimal_separator == '.' || !text.contains('.') {
            return Cow::Borrowed(text);
        }
        Cow::Owned(text.replace('.', &self.decimal_separator.to_string()))
    }
}

impl Default for Locale {
    /// Returns [`Locale::INVARIANT`].
    fn default() -> Self {
        Self::INVARIANT
    }
}
