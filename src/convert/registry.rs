//! The strategy registry: resolution, caching and the conversion façade.
//!
//! A [`Registry`] owns three read-mostly maps — native source records, custom
//! converter overrides and the strategy cache — all keyed by [`TypeId`]. The
//! first `parse`/`try_parse`/`wrap` call for a type resolves its strategy and
//! caches it (including negative results) for the registry's lifetime; every
//! later call reuses the cached entry.
//!
//! The cache discipline is read-lock probe, resolve outside any lock,
//! write-lock insert keeping the first entry. Two threads racing on the first
//! use of the same type may each run resolution once; both converge on the
//! same cached strategy and no entry is ever replaced or invalidated.
//!
//! The registry is an explicit object rather than hidden global state so tests
//! can construct a fresh one; [`default_registry`] provides the shared
//! process-wide instance the [`TextValue`](crate::value::TextValue)
//! convenience methods use.

use std::any::{Any, TypeId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::value::{expand_placeholders, TextValue};

use super::custom::CustomConverter;
use super::error::ConvertError;
use super::locale::Locale;
use super::strategy::{sources_from_traits, NativeSources, Strategy};
use super::traits::{FormatText, ParseText, TryParseText};

type Erased = Arc<dyn Any + Send + Sync>;
type OptionalResolver = Arc<dyn Fn(&Registry) -> Option<Erased> + Send + Sync>;

/// Resolves and caches parse/format strategies per target type, and exposes
/// the typed-conversion façade.
///
/// # Examples
///
/// ```rust
/// use valtext::{Registry, TextValue};
///
/// let registry = Registry::with_builtins();
/// let value = TextValue::new("42")?;
/// assert_eq!(registry.parse::<i64>(&value)?, 42);
/// assert_eq!(registry.try_parse::<bool>(&TextValue::new("yes")?), Some(true));
/// # Ok::<(), valtext::ConvertError>(())
/// ```
#[derive(Default)]
pub struct Registry {
    sources: RwLock<FxHashMap<TypeId, Erased>>,
    custom: RwLock<FxHashMap<TypeId, Erased>>,
    optional: RwLock<FxHashMap<TypeId, OptionalResolver>>,
    cache: RwLock<FxHashMap<TypeId, Option<Erased>>>,
    resolutions: AtomicUsize,
}

impl Registry {
    /// Creates an empty registry with no registrations at all.
    ///
    /// `String` still resolves (the identity strategy is structural); every
    /// other type needs a registration first.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-populated with the built-in registrations:
    /// primitives, network address types, paths, the boolean word-table
    /// converter and — behind their feature gates — URIs and chrono dates.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        super::builtin::install(&registry);
        registry
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Registers a hand-built source record for `T`, together with the
    /// derived `Option<T>` strategy.
    ///
    /// Replaces any previous record for `T`. Registration after `T`'s first
    /// resolution is not observed — strategies are resolved once and reused
    /// forever.
    pub fn register_with_sources<T: 'static>(&self, sources: NativeSources<T>) {
        self.sources
            .write()
            .insert(TypeId::of::<T>(), Arc::new(sources));
        self.register_optional::<T>();
    }

    /// Registers `T` from its capability-trait implementations.
    pub fn register<T>(&self, target: &'static str)
    where
        T: ParseText + TryParseText + FormatText + 'static,
    {
        self.register_with_sources(sources_from_traits::<T>(target));
    }

    /// Registers the `Option<T>` strategy: blank text parses to `None`,
    /// anything else delegates to `T`'s strategy; `None` formats to empty
    /// text.
    ///
    /// Called automatically by the other registration methods; only needed
    /// directly when `T` is reachable solely through a custom converter.
    pub fn register_optional<T: 'static>(&self) {
        let resolver: OptionalResolver = Arc::new(|registry: &Registry| {
            registry
                .strategy_for::<T>()
                .map(|inner| Arc::new(Strategy::optional(inner)) as Erased)
        });
        self.optional
            .write()
            .insert(TypeId::of::<Option<T>>(), resolver);
    }

    /// Registers a custom converter override for `T`.
    ///
    /// The converter is consulted before `T`'s own parsers; when it reports
    /// failure the native chain (if any) runs as fallback. A converter
    /// registered after `T`'s first resolution is not observed.
    pub fn register_custom<T: 'static>(&self, converter: CustomConverter<T>) {
        self.custom
            .write()
            .insert(TypeId::of::<T>(), Arc::new(converter));
        self.register_optional::<T>();
    }

    // ------------------------------------------------------------------
    // Façade
    // ------------------------------------------------------------------

    /// Parses a text value as `T` under the invariant locale.
    ///
    /// # Errors
    ///
    /// [`ConvertError::Conversion`] when the resolved strategy fails,
    /// [`ConvertError::NoStrategy`] when no strategy resolves for `T`.
    pub fn parse<T: 'static>(&self, value: &TextValue) -> Result<T, ConvertError> {
        self.parse_raw(value.as_str(), &Locale::INVARIANT)
    }

    /// Parses a text value as `T` under an explicit locale.
    ///
    /// # Errors
    ///
    /// Same as [`Registry::parse`].
    pub fn parse_with<T: 'static>(
        &self,
        value: &TextValue,
        locale: &Locale,
    ) -> Result<T, ConvertError> {
        self.parse_raw(value.as_str(), locale)
    }

    /// Parses raw text as `T`.
    ///
    /// # Errors
    ///
    /// Same as [`Registry::parse`].
    pub fn parse_raw<T: 'static>(&self, text: &str, locale: &Locale) -> Result<T, ConvertError> {
        match self.strategy_for::<T>() {
            Some(strategy) => strategy.parse(text, locale),
            None => Err(ConvertError::NoStrategy {
                target: std::any::type_name::<T>(),
            }),
        }
    }

    /// Safe parse under the invariant locale; `None` on any failure,
    /// including an unresolvable type.
    pub fn try_parse<T: 'static>(&self, value: &TextValue) -> Option<T> {
        self.try_parse_raw(value.as_str(), &Locale::INVARIANT)
    }

    /// Safe parse under an explicit locale.
    pub fn try_parse_with<T: 'static>(&self, value: &TextValue, locale: &Locale) -> Option<T> {
        self.try_parse_raw(value.as_str(), locale)
    }

    /// Safe parse of raw text.
    pub fn try_parse_raw<T: 'static>(&self, text: &str, locale: &Locale) -> Option<T> {
        self.strategy_for::<T>()
            .and_then(|strategy| strategy.try_parse(text, locale))
    }

    /// Formats `value` through the resolved formatter and wraps the result,
    /// applying the same non-blank guard as [`TextValue::new`].
    ///
    /// # Errors
    ///
    /// [`ConvertError::NoStrategy`] when no format strategy resolves,
    /// [`ConvertError::InvalidArgument`] when formatting produced blank text
    /// (a `None` optional formats to empty text and is rejected here).
    pub fn wrap<T: 'static>(&self, value: &T) -> Result<TextValue, ConvertError> {
        self.wrap_with(value, &Locale::INVARIANT)
    }

    /// Locale-aware form of [`Registry::wrap`].
    ///
    /// # Errors
    ///
    /// Same as [`Registry::wrap`].
    pub fn wrap_with<T: 'static>(&self, value: &T, locale: &Locale) -> Result<TextValue, ConvertError> {
        let strategy = self
            .strategy_for::<T>()
            .ok_or(ConvertError::NoStrategy {
                target: std::any::type_name::<T>(),
            })?;
        TextValue::new(strategy.format(value, locale)?)
    }

    /// Substitutes `{key}` placeholders in the wrapped text, then parses the
    /// result as `T` under the invariant locale.
    ///
    /// # Errors
    ///
    /// [`ConvertError::InvalidArgument`] on duplicate substitution keys, plus
    /// everything [`Registry::parse`] reports.
    pub fn expand_as<T: 'static>(
        &self,
        value: &TextValue,
        substitutions: &[(&str, &str)],
    ) -> Result<T, ConvertError> {
        self.expand_as_with(value, substitutions, &Locale::INVARIANT)
    }

    /// Locale-aware form of [`Registry::expand_as`].
    ///
    /// # Errors
    ///
    /// Same as [`Registry::expand_as`].
    pub fn expand_as_with<T: 'static>(
        &self,
        value: &TextValue,
        substitutions: &[(&str, &str)],
        locale: &Locale,
    ) -> Result<T, ConvertError> {
        let expanded = expand_placeholders(value.as_str(), substitutions)?;
        self.parse_raw(&expanded, locale)
    }

    // ------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------

    /// Number of resolution runs performed so far.
    ///
    /// Stays constant once every type in use has been resolved; under a
    /// first-use race it may exceed the number of distinct types by at most
    /// the number of racing threads.
    pub fn resolution_count(&self) -> usize {
        self.resolutions.load(Ordering::Relaxed)
    }

    /// Number of cached strategy entries, negative entries included.
    pub fn cached_types(&self) -> usize {
        self.cache.read().len()
    }

    // ------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------

    /// Returns the cached strategy for `T`, resolving it on first use.
    pub(crate) fn strategy_for<T: 'static>(&self) -> Option<Arc<Strategy<T>>> {
        let type_id = TypeId::of::<T>();

        if let Some(entry) = self.cache.read().get(&type_id) {
            return entry.clone().map(downcast_strategy::<T>);
        }

        // Miss: resolve outside any lock. A racing thread may do the same;
        // both results are functionally identical and the first insert wins.
        let resolved = self.resolve::<T>();
        self.resolutions.fetch_add(1, Ordering::Relaxed);

        let mut cache = self.cache.write();
        let entry = cache
            .entry(type_id)
            .or_insert_with(|| resolved.map(|strategy| Arc::new(strategy) as Erased));
        entry.clone().map(downcast_strategy::<T>)
    }

    /// Runs resolution for `T`: identity for `String`, the optional lift for
    /// registered `Option<U>` targets, otherwise composition of the custom
    /// converter and the native source record. Never fails; a miss is the
    /// `None` the caller caches as a negative entry.
    fn resolve<T: 'static>(&self) -> Option<Strategy<T>> {
        let type_id = TypeId::of::<T>();

        if type_id == TypeId::of::<String>() {
            let identity: Box<dyn Any> = Box::new(Strategy::identity());
            return identity.downcast::<Strategy<T>>().ok().map(|boxed| *boxed);
        }

        let optional_resolver = self.optional.read().get(&type_id).cloned();
        if let Some(resolver) = optional_resolver {
            return resolver(self)
                .map(|erased| downcast_strategy::<T>(erased))
                .map(|strategy| Strategy::clone(&strategy));
        }

        let natives = self
            .sources
            .read()
            .get(&type_id)
            .cloned()
            .and_then(|erased| erased.downcast::<NativeSources<T>>().ok());

        let custom = self
            .custom
            .read()
            .get(&type_id)
            .cloned()
            .and_then(|erased| erased.downcast::<CustomConverter<T>>().ok())
            .map(|converter| converter.parse_fn());

        Strategy::resolve(std::any::type_name::<T>(), natives.as_ref(), custom)
    }
}

fn downcast_strategy<T: 'static>(erased: Erased) -> Arc<Strategy<T>> {
    erased
        .downcast::<Strategy<T>>()
        .unwrap_or_else(|_| unreachable!("strategy cache entry stored under a foreign TypeId"))
}

static DEFAULT_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The shared process-wide registry, created with the built-ins on first use.
///
/// The [`TextValue`] convenience methods go through this instance; code that
/// needs deterministic isolation (tests, embedders with their own converters)
/// constructs its own [`Registry`] instead.
pub fn default_registry() -> &'static Registry {
    DEFAULT_REGISTRY.get_or_init(Registry::with_builtins)
}

static_assertions::assert_impl_all!(Registry: Send, Sync);
