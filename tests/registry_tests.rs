//! Integration tests for strategy resolution, caching and registration
//! against fresh, isolated registries.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use valtext::convert::{
    ConvertError, CustomConverter, FormatText, Locale, NativeSources, ParseText, Registry,
    TryParseText,
};
use valtext::TextValue;

// =============================================================================
// Caching
// =============================================================================

#[test]
fn test_resolution_happens_once_per_type() {
    let registry = Registry::with_builtins();
    let value = TextValue::new("5").unwrap();

    let _: i32 = registry.parse(&value).unwrap();
    let after_first = registry.resolution_count();

    for _ in 0..100 {
        let _: i32 = registry.parse(&value).unwrap();
        let _ = registry.try_parse::<i32>(&value);
    }
    assert_eq!(registry.resolution_count(), after_first);
}

#[test]
fn test_resolution_is_deterministic() {
    let first = Registry::with_builtins();
    let second = Registry::with_builtins();
    let value = TextValue::new("1,234.5").unwrap();

    assert_eq!(
        first.parse::<f64>(&value).unwrap(),
        second.parse::<f64>(&value).unwrap()
    );
}

#[test]
fn test_negative_entries_are_cached_too() {
    struct Unknown;

    let registry = Registry::with_builtins();
    let value = TextValue::new("x").unwrap();

    assert!(registry.parse::<Unknown>(&value).is_err());
    let after_first = registry.resolution_count();
    assert!(registry.try_parse::<Unknown>(&value).is_none());
    assert!(registry.parse::<Unknown>(&value).is_err());
    assert_eq!(registry.resolution_count(), after_first);
}

#[test]
fn test_concurrent_first_use_shares_one_entry() {
    let registry = Arc::new(Registry::with_builtins());

    let handles: Vec<_> = (0..16)
        .map(|index| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let text = format!("{index}");
                registry.parse_raw::<u64>(&text, &Locale::INVARIANT).unwrap()
            })
        })
        .collect();

    for (index, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), index as u64);
    }
}

// =============================================================================
// Custom converters
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Toggle {
    On,
    Off,
}

#[test]
fn test_custom_converter_for_new_type() {
    let registry = Registry::new();
    registry.register_custom(CustomConverter::new(|text: &str, _: &Locale| {
        match text.trim() {
            "on" => Some(Toggle::On),
            "off" => Some(Toggle::Off),
            _ => None,
        }
    }));

    let value = TextValue::new("on").unwrap();
    assert_eq!(registry.parse::<Toggle>(&value).unwrap(), Toggle::On);

    let bad = TextValue::new("sideways").unwrap();
    assert!(registry.parse::<Toggle>(&bad).unwrap_err().is_conversion());
    assert!(registry.try_parse::<Toggle>(&bad).is_none());
}

#[test]
fn test_custom_converter_optional_lift() {
    let registry = Registry::new();
    registry.register_custom(CustomConverter::new(|text: &str, _: &Locale| {
        (text == "on").then_some(Toggle::On)
    }));

    assert_eq!(
        registry
            .parse_raw::<Option<Toggle>>("  ", &Locale::INVARIANT)
            .unwrap(),
        None
    );
    assert_eq!(
        registry
            .parse_raw::<Option<Toggle>>("on", &Locale::INVARIANT)
            .unwrap(),
        Some(Toggle::On)
    );
}

#[test]
fn test_custom_converter_counts_invocations() {
    let calls = Arc::new(AtomicUsize::new(0));
    let registry = Registry::with_builtins();
    {
        let calls = Arc::clone(&calls);
        registry.register_custom(CustomConverter::new(move |text: &str, _: &Locale| {
            calls.fetch_add(1, Ordering::SeqCst);
            (text == "many").then_some(9000_i64)
        }));
    }

    let value = TextValue::new("many").unwrap();
    for _ in 0..3 {
        assert_eq!(registry.parse::<i64>(&value).unwrap(), 9000);
    }
    // The converter runs per call; resolution ran once.
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

// =============================================================================
// Trait-based registration
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Semver {
    major: u32,
    minor: u32,
    patch: u32,
}

impl ParseText for Semver {
    fn parse_text(text: &str, _locale: &Locale) -> Result<Self, ConvertError> {
        Self::try_parse_text(text, _locale).ok_or(ConvertError::Conversion {
            target: "Semver",
            cause: None,
        })
    }
}

impl TryParseText for Semver {
    fn try_parse_text(text: &str, _locale: &Locale) -> Option<Self> {
        let mut parts = text.trim().splitn(3, '.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        let patch = parts.next()?.parse().ok()?;
        Some(Self {
            major,
            minor,
            patch,
        })
    }
}

impl FormatText for Semver {
    fn format_text(&self, _format: &str, _locale: &Locale) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[test]
fn test_registered_trait_type_round_trips() {
    let registry = Registry::new();
    registry.register::<Semver>("Semver");

    let version = Semver {
        major: 1,
        minor: 2,
        patch: 3,
    };
    let wrapped = registry.wrap(&version).unwrap();
    assert_eq!(wrapped.as_str(), "1.2.3");
    assert_eq!(registry.parse::<Semver>(&wrapped).unwrap(), version);

    let bad = TextValue::new("1.2").unwrap();
    assert!(registry.try_parse::<Semver>(&bad).is_none());
}

#[test]
fn test_registered_trait_type_optional() {
    let registry = Registry::new();
    registry.register::<Semver>("Semver");

    assert_eq!(
        registry
            .parse_raw::<Option<Semver>>(" ", &Locale::INVARIANT)
            .unwrap(),
        None
    );
}

// =============================================================================
// Source-record registration
// =============================================================================

#[derive(Debug, PartialEq)]
struct RawTag(String);

#[test]
fn test_constructor_source_registration() {
    let registry = Registry::new();
    registry.register_with_sources(
        NativeSources::<RawTag>::new("RawTag")
            .construct(|text| RawTag(text.to_owned()))
            .display(|tag| tag.0.clone()),
    );

    let value = TextValue::new("release-7").unwrap();
    assert_eq!(
        registry.parse::<RawTag>(&value).unwrap(),
        RawTag("release-7".to_owned())
    );
    assert_eq!(registry.wrap(&RawTag("v1".to_owned())).unwrap().as_str(), "v1");
}

#[test]
fn test_custom_overrides_native_with_fallback() {
    let registry = Registry::new();
    registry.register_with_sources(
        NativeSources::<RawTag>::new("RawTag").construct(|text| RawTag(text.to_owned())),
    );
    registry.register_custom(CustomConverter::new(|text: &str, _: &Locale| {
        text.strip_prefix("tag:").map(|rest| RawTag(rest.to_owned()))
    }));

    // Custom converter recognizes the prefixed form first.
    assert_eq!(
        registry
            .parse_raw::<RawTag>("tag:alpha", &Locale::INVARIANT)
            .unwrap(),
        RawTag("alpha".to_owned())
    );
    // Custom failure falls back to the constructor.
    assert_eq!(
        registry.parse_raw::<RawTag>("beta", &Locale::INVARIANT).unwrap(),
        RawTag("beta".to_owned())
    );
}
