//! Flag Registry
//!
//! Stores flags by name in insertion order and mediates every read and
//! write of their state.

use crate::flag::Flag;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, trace};

/// Snapshot of every registered flag's state, in first-insertion order.
pub type FlagStatus = IndexMap<String, bool>;

static GLOBAL: Lazy<FeatureRegistry> = Lazy::new(FeatureRegistry::new);

/// Get the process-wide registry.
///
/// Created on first access and never dropped. Code that can take a
/// registry by reference should prefer an explicitly owned
/// [`FeatureRegistry`].
pub fn global() -> &'static FeatureRegistry {
    &GLOBAL
}

/// Registry of named boolean feature flags.
///
/// Cloning yields another handle to the same flags.
///
/// # Examples
///
/// ```
/// use flagkit_features::{FeatureRegistry, Flag};
///
/// let registry = FeatureRegistry::new();
/// registry.add([Flag::new("simple", true), Flag::new("descriptive", false)]);
///
/// assert!(registry.enabled("simple"));
/// assert!(!registry.toggle("simple"));
/// assert!(!registry.enabled("unknown"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FeatureRegistry {
    flags: Arc<RwLock<IndexMap<String, Flag>>>,
}

impl FeatureRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register flags, replacing any flag already registered under the
    /// same name.
    ///
    /// A replaced flag keeps its position in [`status`](Self::status).
    pub fn add(&self, flags: impl IntoIterator<Item = Flag>) {
        let mut map = self.flags.write();
        for flag in flags {
            debug!(flag = %flag.name, enabled = flag.enabled, "Registering feature flag");
            // IndexMap::insert keeps an existing key in its slot
            map.insert(flag.name.clone(), flag);
        }
    }

    /// Get the current state of every flag.
    pub fn status(&self) -> FlagStatus {
        self.flags
            .read()
            .iter()
            .map(|(name, flag)| (name.clone(), flag.enabled))
            .collect()
    }

    /// Check whether the named flag is enabled.
    ///
    /// Unknown names are reported as disabled.
    pub fn enabled(&self, name: &str) -> bool {
        match self.flags.read().get(name) {
            Some(flag) => flag.enabled,
            None => {
                trace!(flag = %name, "Unknown feature flag queried");
                false
            }
        }
    }

    /// Flip the named flag and return its new state.
    ///
    /// Unknown names are left alone and return `false`, the same value
    /// returned when a flag is switched off; use [`contains`](Self::contains)
    /// to tell the two apart.
    ///
    /// The flag's callback runs after the new state is stored and
    /// without the registry lock held. A panic in the callback reaches
    /// the caller and the flip stays in effect.
    pub fn toggle(&self, name: &str) -> bool {
        let (enabled, callback) = {
            let mut map = self.flags.write();
            let Some(flag) = map.get_mut(name) else {
                trace!(flag = %name, "Ignoring toggle of unknown feature flag");
                return false;
            };
            (flag.flip(), flag.on_toggled.clone())
        };

        debug!(flag = %name, enabled, "Feature flag toggled");

        if let Some(callback) = callback {
            callback.call(enabled);
        }

        enabled
    }

    /// Check whether a flag is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.flags.read().contains_key(name)
    }

    /// Get the description of the named flag, if it has one.
    pub fn description(&self, name: &str) -> Option<String> {
        self.flags
            .read()
            .get(name)
            .and_then(|flag| flag.description.clone())
    }

    /// Get registered flag names in first-insertion order.
    pub fn names(&self) -> Vec<String> {
        self.flags.read().keys().cloned().collect()
    }

    /// Number of registered flags
    pub fn len(&self) -> usize {
        self.flags.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.read().is_empty()
    }
}
