//! Immutable text values.
//!
//! - [`TextValue`]: a guaranteed non-blank, immutable piece of text with
//!   typed-conversion methods routed through the default registry.
//! - [`TextComparison`]: ordinal and case-folded equality modes.
//! - [`expand_placeholders`]: the single-pass `{key}` substitution scanner.
//! - [`fnv1a_64`]: the stable digest backing [`TextValue`]'s hash.
//!
//! # Examples
//!
//! ```rust
//! use valtext::value::{TextComparison, TextValue};
//!
//! let a = TextValue::new("Hello")?;
//! let b = TextValue::new("hello")?;
//!
//! assert_ne!(a, b);
//! assert!(a.eq_with(&b, TextComparison::OrdinalIgnoreCase));
//! # Ok::<(), valtext::ConvertError>(())
//! ```

mod hash;
mod interpolate;
mod text;

pub use hash::fnv1a_64;
pub use interpolate::expand_placeholders;
pub use text::{TextComparison, TextValue};
