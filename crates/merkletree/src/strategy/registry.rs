//! Process-wide registry of hash strategies.
//!
//! Built-in strategies ([`NamedStrategy`]) are always resolvable and their
//! names are reserved. Additional strategies can be registered at runtime
//! from any RustCrypto [`digest`] implementation.

use std::collections::HashMap;
use std::sync::Arc;

use digest::DynDigest;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use strum::VariantNames;

use super::{HashStrategy, HasherFactory, NamedStrategy, StrategyError};

/// Registry for custom hash strategies
struct StrategyRegistry {
    // Map of strategy name to hasher constructor
    factories: HashMap<String, HasherFactory>,
}

impl StrategyRegistry {
    /// Create a new registry
    fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a constructor, replacing any previous one with the same name
    fn register(&mut self, name: &str, factory: HasherFactory) -> &mut Self {
        self.factories.insert(name.to_owned(), factory);
        self
    }

    fn get(&self, name: &str) -> Option<HashStrategy> {
        self.factories
            .get(name)
            .map(|factory| HashStrategy::from_factory(name, Arc::clone(factory)))
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

static GLOBAL_REGISTRY: Lazy<RwLock<StrategyRegistry>> =
    Lazy::new(|| RwLock::new(StrategyRegistry::new()));

/// Register a custom hash strategy under `name`.
///
/// `factory` must return a fresh hasher on every call. Built-in names
/// cannot be overridden.
///
/// ```
/// use merkletree::strategy::{register_strategy, resolve};
///
/// register_strategy("sha384", || Box::new(<sha2::Sha384 as sha2::Digest>::new())).unwrap();
/// assert_eq!(resolve("sha384").unwrap().output_size(), 48);
/// ```
pub fn register_strategy<F>(name: &str, factory: F) -> Result<(), StrategyError>
where
    F: Fn() -> Box<dyn DynDigest + Send + Sync> + Send + Sync + 'static,
{
    if name.parse::<NamedStrategy>().is_ok() {
        return Err(StrategyError::reserved(name));
    }

    tracing::debug!(strategy = name, "registering custom hash strategy");
    let mut registry = GLOBAL_REGISTRY.write();
    registry.register(name, Arc::new(factory));
    Ok(())
}

/// Register any default-constructible digest under `name`.
pub fn register_digest<D>(name: &str) -> Result<(), StrategyError>
where
    D: DynDigest + Default + Send + Sync + 'static,
{
    register_strategy(name, || Box::new(D::default()))
}

/// Resolve a strategy by name.
///
/// Built-in names are matched case-insensitively; custom names must match
/// exactly. Unregistered names are an error.
pub fn resolve(name: &str) -> Result<HashStrategy, StrategyError> {
    if let Ok(named) = name.parse::<NamedStrategy>() {
        return Ok(named.into());
    }

    let registry = GLOBAL_REGISTRY.read();
    registry
        .get(name)
        .ok_or_else(|| StrategyError::unknown(name))
}

/// Names of every resolvable strategy, built-ins first.
pub fn registered_strategies() -> Vec<String> {
    let registry = GLOBAL_REGISTRY.read();
    let mut custom: Vec<String> = registry.names().map(str::to_owned).collect();
    custom.sort_unstable();

    NamedStrategy::VARIANTS
        .iter()
        .map(|name| (*name).to_owned())
        .chain(custom)
        .collect()
}
