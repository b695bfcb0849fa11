//! Parsing style controls for numbers and dates.
//!
//! Styles are an internal contract between the resolver and the
//! number/date-aware safe parsers: every registered style-aware source carries
//! a default ([`NumberStyle::GENERAL`] for floats, [`NumberStyle::INTEGER`]
//! for integers, [`DateStyle::None`] for dates) and callers of the public API
//! never see or choose them.

/// Flags controlling which numeric notations a safe parser accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberStyle {
    /// Accept a leading `+` or `-`.
    pub allow_sign: bool,
    /// Accept a fractional part after the decimal separator.
    pub allow_decimal_point: bool,
    /// Accept scientific notation (`1.5e3`).
    pub allow_exponent: bool,
    /// Accept digit-group separators (stripped per locale before parsing).
    pub allow_grouping: bool,
}

impl NumberStyle {
    /// Integer notation: sign and grouping, no fraction or exponent.
    pub const INTEGER: Self = Self {
        allow_sign: true,
        allow_decimal_point: false,
        allow_exponent: false,
        allow_grouping: true,
    };

    /// General number notation: sign, fraction and exponent, with grouping.
    pub const GENERAL: Self = Self {
        allow_sign: true,
        allow_decimal_point: true,
        allow_exponent: true,
        allow_grouping: true,
    };

    /// Everything [`NumberStyle::GENERAL`] accepts.
    pub const ANY: Self = Self::GENERAL;

    /// Pre-checks `text` (already locale-normalized) against the style.
    ///
    /// This is a notation filter, not a full validation: the actual numeric
    /// parser still decides whether the text is a well-formed number.
    pub fn permits(&self, text: &str) -> bool {
        let body = text.strip_prefix(['+', '-']).unwrap_or(text);
        if body.len() != text.len() && !self.allow_sign {
            return false;
        }
        if !self.allow_decimal_point && body.contains('.') {
            return false;
        }
        if !self.allow_exponent && body.contains(['e', 'E']) {
            return false;
        }
        true
    }
}

/// Options for date and date-time safe parsers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateStyle {
    /// No special handling; the text must match the format exactly.
    #[default]
    None,
    /// Trim surrounding whitespace before parsing.
    AllowWhitespace,
    /// Interpret zone-less date-times as UTC.
    AssumeUtc,
}
