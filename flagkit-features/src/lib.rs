//! Feature Flags for flagkit
//!
//! A registry of named boolean feature flags with runtime toggling and
//! change callbacks.
//!
//! # Features
//!
//! - **Ordered Registry** - Flags keep the order they were first added in
//! - **Runtime Toggling** - Flip flags while the process runs
//! - **Change Callbacks** - Run code whenever a flag is toggled
//! - **Listener Binding** - Expose toggling as a command in a host namespace
//!
//! # Quick Start
//!
//! ```
//! use flagkit_features::*;
//!
//! let registry = FeatureRegistry::new();
//! registry.add([
//!     Flag::new("simple", true),
//!     Flag::new("descriptive", false).with_description("a little extra explanation"),
//!     Flag::new("dynamic", false).on_toggled(|enabled| println!("dynamic: {}", enabled)),
//! ]);
//!
//! if registry.enabled("simple") {
//!     // Take the new code path
//! }
//!
//! assert!(registry.toggle("dynamic"));
//! ```
//!
//! # Process-wide Registry
//!
//! ```
//! use flagkit_features::{global, Flag};
//!
//! global().add([Flag::new("lib-docs-global", true)]);
//! assert!(global().enabled("lib-docs-global"));
//! ```
//!
//! Unknown flag names never fail: [`FeatureRegistry::enabled`] and
//! [`FeatureRegistry::toggle`] both report them as disabled.

pub mod error;
pub mod flag;
pub mod listener;
pub mod registry;

pub use error::{ListenerError, Result};
pub use flag::{Flag, OnToggled};
pub use listener::{Command, CommandTable, Namespace, TOGGLE_COMMAND, ToggleListener};
pub use registry::{FeatureRegistry, FlagStatus, global};
