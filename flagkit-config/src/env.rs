// Environment variable overrides

use crate::{ConfigError, FlagDefinition, Result, normalize_name, parse_bool};
use std::collections::HashMap;
use std::env;
use std::path::Path;
use tracing::debug;

/// Default prefix for flag override variables.
pub const DEFAULT_PREFIX: &str = "FLAGKIT_FEATURE";

/// Overrides flag states from `<PREFIX>_<NAME>=<bool>` variables.
///
/// Names are matched case-insensitively with `-` and `_` treated alike,
/// so `FLAGKIT_FEATURE_NEW_UI=1` enables a flag defined as `new-ui`.
pub struct EnvOverrides {
    prefix: String,
}

impl EnvOverrides {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Collect overrides from the process environment
    ///
    /// Variables whose name is not valid UTF-8 are skipped. A prefixed
    /// variable with a non UTF-8 value is an [`ConfigError::InvalidValue`].
    pub fn load(&self) -> Result<HashMap<String, bool>> {
        let mut vars = Vec::new();

        for (key, value) in env::vars_os() {
            let Ok(key) = key.into_string() else {
                continue;
            };
            let prefixed = key
                .strip_prefix(&self.prefix)
                .is_some_and(|rest| rest.starts_with('_'));
            if !prefixed {
                continue;
            }
            match value.into_string() {
                Ok(value) => vars.push((key, value)),
                Err(value) => {
                    return Err(ConfigError::InvalidValue {
                        key,
                        value: value.to_string_lossy().into_owned(),
                    });
                }
            }
        }

        self.collect(vars)
    }

    /// Load a `.env` file into the process environment, then collect overrides
    ///
    /// Without a path, a missing `.env` in the working directory is ignored.
    pub fn load_dotenv(&self, path: Option<&Path>) -> Result<HashMap<String, bool>> {
        if let Some(path) = path {
            dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
        } else {
            dotenvy::dotenv().ok();
        }
        self.load()
    }

    /// Collect overrides from the given variables
    pub fn collect<I>(&self, vars: I) -> Result<HashMap<String, bool>>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut overrides = HashMap::new();

        for (key, value) in vars {
            let Some(name) = key
                .strip_prefix(&self.prefix)
                .and_then(|rest| rest.strip_prefix('_'))
            else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            overrides.insert(normalize_name(name), parse_bool(&key, &value)?);
        }

        Ok(overrides)
    }

    /// Apply overrides to matching definitions, returning how many changed.
    pub fn apply_to(
        overrides: &HashMap<String, bool>,
        definitions: &mut [FlagDefinition],
    ) -> usize {
        let mut applied = 0;
        for definition in definitions.iter_mut() {
            if let Some(&enabled) = overrides.get(&normalize_name(&definition.name)) {
                debug!(flag = %definition.name, enabled, "Applying environment override");
                definition.enabled = enabled;
                applied += 1;
            }
        }
        applied
    }
}

impl Default for EnvOverrides {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}
