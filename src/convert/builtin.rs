//! Built-in registrations for the standard types.
//!
//! [`Registry::with_builtins`](super::Registry::with_builtins) installs
//! everything here: the integer and float families with style-aware safe
//! parsers, `bool`/`char`, the network address types, `PathBuf`, the boolean
//! word-table converter, and — behind their feature gates — absolute URIs and
//! chrono dates. Each registration also derives the matching `Option<T>`
//! strategy.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;

use super::custom;
use super::error::ConvertError;
use super::registry::Registry;
use super::strategy::NativeSources;
use super::style::NumberStyle;

#[cfg(feature = "datetime")]
use super::style::DateStyle;

/// Integer family: locale-aware throwing parse (grouping stripped), safe
/// parse with the INTEGER style default, `Display` formatting.
macro_rules! register_integers {
    ($registry:ident, $($ty:ty),+ $(,)?) => {
        $(
            $registry.register_with_sources(
                NativeSources::<$ty>::new(stringify!($ty))
                    .parse_localized(|text, locale| {
                        locale
                            .normalize_number(text.trim())
                            .parse::<$ty>()
                            .map_err(|error| ConvertError::conversion(stringify!($ty), error))
                    })
                    .try_number(
                        |text, style, locale| {
                            let normalized = locale.normalize_number(text.trim());
                            style
                                .permits(&normalized)
                                .then(|| normalized.parse::<$ty>().ok())
                                .flatten()
                        },
                        NumberStyle::INTEGER,
                    )
                    .display(|value| value.to_string()),
            );
        )+
    };
}

/// Float family: GENERAL style default and locale-aware formatting through
/// the formattable capability.
macro_rules! register_floats {
    ($registry:ident, $($ty:ty),+ $(,)?) => {
        $(
            $registry.register_with_sources(
                NativeSources::<$ty>::new(stringify!($ty))
                    .parse_localized(|text, locale| {
                        locale
                            .normalize_number(text.trim())
                            .parse::<$ty>()
                            .map_err(|error| ConvertError::conversion(stringify!($ty), error))
                    })
                    .try_number(
                        |text, style, locale| {
                            let normalized = locale.normalize_number(text.trim());
                            style
                                .permits(&normalized)
                                .then(|| normalized.parse::<$ty>().ok())
                                .flatten()
                        },
                        NumberStyle::GENERAL,
                    )
                    .format_with(|value, _format, locale| {
                        locale.localize_number(&value.to_string()).into_owned()
                    }),
            );
        )+
    };
}

/// Plain FromStr types: no locale sensitivity on either side.
macro_rules! register_from_str {
    ($registry:ident, $($ty:ty => $target:literal),+ $(,)?) => {
        $(
            $registry.register_with_sources(
                NativeSources::<$ty>::new($target)
                    .parse_plain(|text| {
                        text.parse::<$ty>()
                            .map_err(|error| ConvertError::conversion($target, error))
                    })
                    .display(|value| value.to_string()),
            );
        )+
    };
}

/// Installs every built-in registration into `registry`.
pub(crate) fn install(registry: &Registry) {
    register_integers!(
        registry, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
    );
    register_floats!(registry, f32, f64);
    register_from_str!(
        registry,
        bool => "bool",
        char => "char",
        IpAddr => "IpAddr",
        Ipv4Addr => "Ipv4Addr",
        Ipv6Addr => "Ipv6Addr",
        SocketAddr => "SocketAddr",
    );

    registry.register_with_sources(
        NativeSources::<PathBuf>::new("PathBuf")
            .construct(|text: &str| PathBuf::from(text))
            .display(|value| value.display().to_string()),
    );

    // String parses through the structural identity strategy; only its
    // optional lift needs an explicit entry.
    registry.register_optional::<String>();

    registry.register_custom(custom::boolean_converter());

    #[cfg(feature = "uri")]
    install_uri(registry);

    #[cfg(feature = "datetime")]
    install_datetime(registry);
}

#[cfg(feature = "uri")]
fn install_uri(registry: &Registry) {
    registry.register_with_sources(
        NativeSources::<url::Url>::new("Url").display(|value| value.to_string()),
    );
    registry.register_custom(custom::uri_converter());
}

#[cfg(feature = "datetime")]
fn install_datetime(registry: &Registry) {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

    fn styled<'a>(text: &'a str, style: DateStyle) -> &'a str {
        match style {
            DateStyle::AllowWhitespace => text.trim(),
            DateStyle::None | DateStyle::AssumeUtc => text,
        }
    }

    registry.register_with_sources(
        NativeSources::<NaiveDate>::new("NaiveDate")
            .parse_plain(|text| {
                text.parse::<NaiveDate>()
                    .map_err(|error| ConvertError::conversion("NaiveDate", error))
            })
            .try_date(
                |text, style, _locale| styled(text, style).parse::<NaiveDate>().ok(),
                DateStyle::None,
            )
            .display(|value| value.to_string()),
    );

    registry.register_with_sources(
        NativeSources::<NaiveDateTime>::new("NaiveDateTime")
            .parse_plain(|text| {
                text.parse::<NaiveDateTime>()
                    .map_err(|error| ConvertError::conversion("NaiveDateTime", error))
            })
            .try_date(
                |text, style, _locale| styled(text, style).parse::<NaiveDateTime>().ok(),
                DateStyle::None,
            )
            .display(|value| value.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
    );

    registry.register_with_sources(
        NativeSources::<DateTime<Utc>>::new("DateTime<Utc>")
            .parse_plain(|text| {
                text.parse::<DateTime<Utc>>()
                    .map_err(|error| ConvertError::conversion("DateTime<Utc>", error))
            })
            .try_date(
                |text, style, _locale| {
                    let text = styled(text, style);
                    if let Ok(parsed) = text.parse::<DateTime<Utc>>() {
                        return Some(parsed);
                    }
                    // Zone-less timestamps are only accepted when the style
                    // says to read them as UTC.
                    if style == DateStyle::AssumeUtc {
                        return text.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc());
                    }
                    None
                },
                DateStyle::None,
            )
            .format_with(|value, _format, _locale| value.to_rfc3339()),
    );
}
