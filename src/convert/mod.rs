//! The typed conversion engine.
//!
//! This module provides the machinery behind [`TextValue`](crate::TextValue)'s
//! typed operations:
//!
//! - [`Registry`]: resolves a parse/format [`Strategy`] per target type on
//!   first use, caches it forever, and exposes the `parse` / `try_parse` /
//!   `wrap` façade.
//! - [`NativeSources`]: the per-type record of throwing, safe, style-aware
//!   and formatting shapes a type offers.
//! - [`CustomConverter`]: hand-written overrides consulted before a type's
//!   own parsers.
//! - [`ParseText`] / [`TryParseText`] / [`FormatText`]: capability traits for
//!   downstream types.
//! - [`Locale`], [`NumberStyle`], [`DateStyle`]: culture and notation
//!   controls; everything defaults to the invariant culture.
//!
//! # Examples
//!
//! ```rust
//! use valtext::convert::{CustomConverter, Locale, Registry};
//! use valtext::TextValue;
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! enum Switch { On, Off }
//!
//! let registry = Registry::with_builtins();
//! registry.register_custom(CustomConverter::new(|text: &str, _: &Locale| {
//!     match text.trim() {
//!         "on" => Some(Switch::On),
//!         "off" => Some(Switch::Off),
//!         _ => None,
//!     }
//! }));
//!
//! let value = TextValue::new("on")?;
//! assert_eq!(registry.parse::<Switch>(&value)?, Switch::On);
//! # Ok::<(), valtext::ConvertError>(())
//! ```

mod builtin;
mod custom;
mod error;
mod locale;
mod registry;
mod strategy;
mod style;
mod traits;

pub use custom::{boolean_converter, CustomConverter};
pub use error::ConvertError;
pub use locale::Locale;
pub use registry::{default_registry, Registry};
pub use strategy::{NativeSources, Strategy};
pub use style::{DateStyle, NumberStyle};
pub use traits::{FormatText, ParseText, TryParseText};

#[cfg(feature = "uri")]
pub use custom::uri_converter;
