//! Racer registry: resolves a racer by name at startup.

use super::{Racer, RooneyRacer, ScriptedRacer};
use crate::error::ConfigError;
use derive_getters::Getters;
use derive_new::new;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Settings a factory may use when building its racer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, new)]
pub struct RacerOptions {
    /// Seed for racers with random behavior.
    seed: Option<u64>,
    /// Moves for racers that replay a script.
    script: Vec<usize>,
}

/// Builds a racer from [`RacerOptions`].
pub type RacerFactory =
    Box<dyn Fn(&RacerOptions) -> Result<Box<dyn Racer>, ConfigError> + Send + Sync>;

/// Named racer factories.
///
/// Use [`RacerRegistry::with_builtins`] for the racers shipped with the
/// crate, then [`RacerRegistry::register`] to add your own.
#[derive(Default)]
pub struct RacerRegistry {
    factories: BTreeMap<String, RacerFactory>,
}

impl RacerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding `rooney` and `scripted`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        registry.register("rooney", |options| {
            let racer = match options.seed() {
                Some(seed) => RooneyRacer::with_seed(*seed),
                None => RooneyRacer::new(),
            };
            Ok(Box::new(racer))
        });

        registry.register("scripted", |options| {
            if options.script().is_empty() {
                return Err(ConfigError::new(
                    "the scripted racer needs a non-empty script",
                ));
            }
            Ok(Box::new(ScriptedRacer::new(options.script().clone())))
        });

        registry
    }

    /// Adds or replaces the factory for `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&RacerOptions) -> Result<Box<dyn Racer>, ConfigError> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(racer = %name, "Registering racer");
        self.factories.insert(name, Box::new(factory));
    }

    /// Builds the racer registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if no racer has that name or its factory
    /// rejects the options.
    #[instrument(skip(self, options))]
    pub fn create(&self, name: &str, options: &RacerOptions) -> Result<Box<dyn Racer>, ConfigError> {
        let factory = self.factories.get(name).ok_or_else(|| {
            ConfigError::new(format!(
                "unknown racer '{}' (available: {})",
                name,
                self.names().join(", ")
            ))
        })?;

        let racer = factory(options)?;
        info!(racer = %racer.name(), "Racer created");
        Ok(racer)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Debug for RacerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RacerRegistry")
            .field("racers", &self.names())
            .finish()
    }
}
