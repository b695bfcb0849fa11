//! Error types for construction and typed conversion.
//!
//! The error model distinguishes three situations:
//!
//! - [`ConvertError::InvalidArgument`]: the caller handed over malformed input
//!   (blank text, duplicate substitution keys). A programmer error.
//! - [`ConvertError::Conversion`]: a resolved strategy ran and failed, e.g. a
//!   numeric overflow. Wraps the underlying cause.
//! - [`ConvertError::NoStrategy`]: no parse or format strategy could be
//!   resolved for the requested type at all.
//!
//! Expected failures ("this text is not a number") are not errors: the
//! `try_parse` family reports them as `None` and never raises.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// An error produced while constructing a text value or converting one.
#[derive(Debug, Clone)]
pub enum ConvertError {
    /// Malformed caller input: blank construction text, duplicate
    /// substitution keys and the like.
    InvalidArgument(Cow<'static, str>),

    /// A resolved strategy executed and failed.
    ///
    /// `cause` carries the underlying error when the failing parser produced
    /// one; converters that only report success/failure leave it empty.
    Conversion {
        /// Name of the conversion target type.
        target: &'static str,
        /// The wrapped failure, if the strategy produced one.
        cause: Option<Arc<dyn Error + Send + Sync>>,
    },

    /// No strategy could be resolved for the requested type.
    NoStrategy {
        /// Name of the conversion target type.
        target: &'static str,
    },
}

impl ConvertError {
    /// Shorthand for an [`ConvertError::InvalidArgument`] with a static message.
    #[inline]
    pub(crate) const fn invalid(message: &'static str) -> Self {
        Self::InvalidArgument(Cow::Borrowed(message))
    }

    /// Wraps an underlying parser error as a conversion failure for `target`.
    #[inline]
    pub(crate) fn conversion<E>(target: &'static str, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::Conversion {
            target,
            cause: Some(Arc::new(cause)),
        }
    }

    /// A conversion failure with no underlying error value.
    #[inline]
    pub(crate) const fn conversion_bare(target: &'static str) -> Self {
        Self::Conversion {
            target,
            cause: None,
        }
    }

    /// Returns whether this error is [`ConvertError::InvalidArgument`].
    #[inline]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Returns whether this error is [`ConvertError::Conversion`].
    #[inline]
    pub const fn is_conversion(&self) -> bool {
        matches!(self, Self::Conversion { .. })
    }

    /// Returns whether this error is [`ConvertError::NoStrategy`].
    #[inline]
    pub const fn is_no_strategy(&self) -> bool {
        matches!(self, Self::NoStrategy { .. })
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(message) => {
                write!(formatter, "invalid argument: {message}")
            }
            Self::Conversion { target, cause } => match cause {
                Some(cause) => {
                    write!(formatter, "conversion to `{target}` failed: {cause}")
                }
                None => write!(formatter, "conversion to `{target}` failed"),
            },
            Self::NoStrategy { target } => {
                write!(formatter, "no conversion strategy resolved for `{target}`")
            }
        }
    }
}

impl Error for ConvertError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Conversion {
                cause: Some(cause), ..
            } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_invalid_argument_display() {
        let error = ConvertError::invalid("text must not be blank");
        assert_eq!(
            format!("{error}"),
            "invalid argument: text must not be blank"
        );
        assert!(error.is_invalid_argument());
    }

    #[rstest]
    fn test_conversion_display_with_cause() {
        let cause = "abc".parse::<i32>().unwrap_err();
        let error = ConvertError::conversion("i32", cause);
        let rendered = format!("{error}");
        assert!(rendered.starts_with("conversion to `i32` failed: "));
        assert!(error.is_conversion());
    }

    #[rstest]
    fn test_conversion_display_without_cause() {
        let error = ConvertError::conversion_bare("bool");
        assert_eq!(format!("{error}"), "conversion to `bool` failed");
    }

    #[rstest]
    fn test_no_strategy_display() {
        let error = ConvertError::NoStrategy { target: "Opaque" };
        assert_eq!(
            format!("{error}"),
            "no conversion strategy resolved for `Opaque`"
        );
        assert!(error.is_no_strategy());
    }

    #[rstest]
    fn test_source_exposes_cause() {
        let cause = "xyz".parse::<u8>().unwrap_err();
        let error = ConvertError::conversion("u8", cause);
        assert!(error.source().is_some());

        let bare = ConvertError::conversion_bare("u8");
        assert!(bare.source().is_none());
    }
}
