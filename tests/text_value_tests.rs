//! Integration tests for `TextValue` construction, equality and hashing.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use valtext::{TextComparison, TextValue};

fn std_hash(value: &TextValue) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// Construction guard
// =============================================================================

#[test]
fn test_construction_guard() {
    assert!(TextValue::new("").is_err());
    assert!(TextValue::new("   ").is_err());
    assert!(TextValue::new("\t \n").is_err());

    let value = TextValue::new("x").unwrap();
    assert_eq!(value.to_string(), "x");
}

#[test]
fn test_guard_error_kind() {
    let error = TextValue::new("").unwrap_err();
    assert!(error.is_invalid_argument());
    assert!(format!("{error}").starts_with("invalid argument"));
}

// =============================================================================
// Equality & hashing
// =============================================================================

#[test]
fn test_equality_and_hash_agree() {
    let a = TextValue::new("token").unwrap();
    let b = TextValue::new("token").unwrap();
    let c = TextValue::new("Token").unwrap();

    assert_eq!(a, b);
    assert_eq!(std_hash(&a), std_hash(&b));
    assert_eq!(a.hash_value(), b.hash_value());
    assert_ne!(a, c);
}

#[test]
fn test_hash_stable_across_instances() {
    // FNV-1a has no per-process seed: the digest of a given text is a fixed
    // number, unlike the std default hasher.
    assert_eq!(
        TextValue::new("fixed").unwrap().hash_value(),
        TextValue::new("fixed").unwrap().hash_value()
    );
}

#[test]
fn test_comparison_modes() {
    let a = TextValue::new("VALUE").unwrap();
    let b = TextValue::new("value").unwrap();

    assert!(!a.eq_with(&b, TextComparison::Ordinal));
    assert!(a.eq_with(&b, TextComparison::OrdinalIgnoreCase));
    assert!(a.eq_with(&a, TextComparison::Ordinal));
}

// =============================================================================
// Conversions to and from strings
// =============================================================================

#[test]
fn test_string_conversions() {
    let value: TextValue = "abc".parse().unwrap();
    assert_eq!(value.as_ref(), "abc");

    let owned: String = value.into();
    assert_eq!(owned, "abc");

    assert!("  ".parse::<TextValue>().is_err());
}
