//! # valtext
//!
//! Immutable text values with a cached, strategy-based typed conversion engine.
//!
//! ## Overview
//!
//! This library provides a single core abstraction: a [`TextValue`] holding a
//! guaranteed non-blank piece of text, together with a [`Registry`] that knows
//! how to turn that text into typed values and typed values back into text.
//!
//! - **Text values**: [`TextValue`] is immutable, never empty, ordinally
//!   comparable, FNV-hashed, and usable as a map key.
//! - **Typed conversion**: `parse`, `try_parse` and `wrap` resolve a
//!   parse/format strategy for the target type on first use and cache it for
//!   the lifetime of the registry.
//! - **Custom converters**: hand-written overrides (booleans accepting
//!   `yes`/`no`/`1`/`0`, absolute URIs) consulted before a type's own parser.
//! - **Interpolation**: single-pass `{key}` placeholder substitution followed
//!   by a typed parse.
//!
//! ## Feature Flags
//!
//! - `uri`: absolute-URI built-in converter backed by the `url` crate
//! - `datetime`: date/date-time built-ins backed by `chrono`
//!
//! ## Example
//!
//! ```rust
//! use valtext::prelude::*;
//!
//! let value = TextValue::new("42")?;
//! let number: i32 = value.parse()?;
//! assert_eq!(number, 42);
//!
//! let flag: bool = TextValue::new("yes")?.parse()?;
//! assert!(flag);
//! # Ok::<(), valtext::ConvertError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use valtext::prelude::*;
/// ```
pub mod prelude {
    pub use crate::convert::*;
    pub use crate::value::*;
}

pub mod convert;
pub mod value;

pub use convert::{ConvertError, Locale, Registry};
pub use value::{TextComparison, TextValue};
