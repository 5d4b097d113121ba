//! Feature Flag Record
//!
//! Defines the flag record stored by the registry and its toggle callback.

use std::fmt;
use std::sync::Arc;

/// Callback invoked with the new state after a flag is toggled.
///
/// Cloning is cheap; every clone refers to the same closure.
#[derive(Clone)]
pub struct OnToggled(Arc<dyn Fn(bool) + Send + Sync>);

impl OnToggled {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    /// Run the callback with the flag's new state.
    pub fn call(&self, enabled: bool) {
        (self.0)(enabled)
    }
}

impl fmt::Debug for OnToggled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OnToggled(..)")
    }
}

/// Feature flag
#[derive(Debug, Clone)]
pub struct Flag {
    /// Flag name, unique within a registry
    pub name: String,

    /// Current state
    pub enabled: bool,

    /// Flag description
    pub description: Option<String>,

    /// Called after every toggle of this flag
    pub on_toggled: Option<OnToggled>,
}

impl Flag {
    /// Create a new flag with no description and no callback.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagkit_features::Flag;
    ///
    /// let flag = Flag::new("new-ui", true);
    /// assert!(flag.enabled);
    /// ```
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            enabled,
            description: None,
            on_toggled: None,
        }
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the toggle callback
    ///
    /// ```
    /// use flagkit_features::Flag;
    ///
    /// let flag = Flag::new("dark-mode", false)
    ///     .on_toggled(|enabled| println!("dark mode is now {}", enabled));
    /// assert!(flag.on_toggled.is_some());
    /// ```
    pub fn on_toggled<F>(self, callback: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.with_callback(OnToggled::new(callback))
    }

    /// Set an already constructed toggle callback
    pub fn with_callback(mut self, callback: OnToggled) -> Self {
        self.on_toggled = Some(callback);
        self
    }

    /// Flip the state and return the new value.
    pub(crate) fn flip(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }
}
