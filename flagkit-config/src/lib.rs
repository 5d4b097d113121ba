// Flag definition loading for flagkit
//
// Reads flag definitions from JSON, TOML or `.env` files, applies
// environment overrides and registers the result with a registry.

pub mod env;
pub mod error;
pub mod loader;

pub use env::{DEFAULT_PREFIX, EnvOverrides};
pub use error::{ConfigError, Result};
pub use loader::{FileFormat, FlagLoader};

use flagkit_features::{FeatureRegistry, Flag, OnToggled};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Flag as written in a configuration source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagDefinition {
    pub name: String,

    #[serde(default)]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FlagDefinition {
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            enabled,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Convert into a registry flag without a callback
    pub fn into_flag(self) -> Flag {
        let flag = Flag::new(self.name, self.enabled);
        match self.description {
            Some(description) => flag.with_description(description),
            None => flag,
        }
    }
}

/// Set of flag definitions ready to be registered
///
/// # Examples
///
/// ```
/// use flagkit_config::{FileFormat, FlagSet};
/// use flagkit_features::FeatureRegistry;
///
/// let registry = FeatureRegistry::new();
/// FlagSet::parse("simple=true\nbeta=false", FileFormat::Env)
///     .unwrap()
///     .with_callback("beta", |enabled| println!("beta: {}", enabled))
///     .register(&registry);
///
/// assert!(registry.enabled("simple"));
/// ```
#[derive(Debug, Default)]
pub struct FlagSet {
    definitions: Vec<FlagDefinition>,
    callbacks: HashMap<String, OnToggled>,
}

impl FlagSet {
    pub fn new(definitions: Vec<FlagDefinition>) -> Self {
        Self {
            definitions,
            callbacks: HashMap::new(),
        }
    }

    /// Load definitions from a file, detecting the format from its extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let definitions = FlagLoader::auto(path)?.load_file(path)?;
        Ok(Self::new(definitions))
    }

    /// Parse definitions from a string
    pub fn parse(content: &str, format: FileFormat) -> Result<Self> {
        Ok(Self::new(FlagLoader::new(format).parse(content)?))
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(mut self, env: &EnvOverrides) -> Result<Self> {
        let overrides = env.load()?;
        EnvOverrides::apply_to(&overrides, &mut self.definitions);
        Ok(self)
    }

    /// Attach a toggle callback to the named flag
    pub fn with_callback<F>(mut self, name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.callbacks.insert(name.into(), OnToggled::new(callback));
        self
    }

    pub fn definitions(&self) -> &[FlagDefinition] {
        &self.definitions
    }

    /// Build registry flags in definition order
    ///
    /// Every definition named by a callback gets that callback, including
    /// repeated definitions of the same name.
    pub fn into_flags(self) -> Vec<Flag> {
        for name in self.callbacks.keys() {
            if !self.definitions.iter().any(|d| &d.name == name) {
                warn!(flag = %name, "Callback given for a flag with no definition");
            }
        }

        self.definitions
            .into_iter()
            .map(|definition| {
                let callback = self.callbacks.get(&definition.name).cloned();
                let flag = definition.into_flag();
                match callback {
                    Some(callback) => flag.with_callback(callback),
                    None => flag,
                }
            })
            .collect()
    }

    /// Register every definition with `registry`
    pub fn register(self, registry: &FeatureRegistry) {
        let flags = self.into_flags();
        debug!(count = flags.len(), "Registering configured flags");
        registry.add(flags);
    }
}

/// Parse a boolean flag value.
///
/// Accepts `1/0`, `true/false`, `yes/no` and `on/off`, case-insensitively.
pub fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Lowercase a flag name and treat `-` as `_`.
pub(crate) fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace('-', "_")
}
