// flagkit - named boolean feature flags
//
// This library provides an ordered registry of runtime-toggleable flags
// with change callbacks, plus optional configuration loading and logging.

// Re-export the registry
pub use flagkit_features::*;

// Re-export optional crates
#[cfg(feature = "config")]
pub use flagkit_config;

#[cfg(feature = "log")]
pub use flagkit_log;

// Prelude for common imports
pub mod prelude {
    pub use crate::{FeatureRegistry, Flag, FlagStatus, OnToggled, ToggleListener, global};

    #[cfg(feature = "config")]
    pub use flagkit_config::{EnvOverrides, FileFormat, FlagDefinition, FlagSet};
}
