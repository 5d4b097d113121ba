//! Toggle Listener
//!
//! Exposes [`FeatureRegistry::toggle`] as a named command inside host
//! namespaces, such as a debug console's command table.

use crate::error::{ListenerError, Result};
use crate::registry::FeatureRegistry;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Name under which the toggle command is installed.
pub const TOGGLE_COMMAND: &str = "toggleFeature";

/// Command callable from a host namespace with a single string argument.
pub type Command = Arc<dyn Fn(&str) + Send + Sync>;

/// A host surface that commands can be installed into.
pub trait Namespace: Send + Sync {
    /// Install `command` under `name`, replacing any existing command.
    fn install(&self, name: &str, command: Command);

    /// Remove the command under `name`. Returns whether one was present.
    fn remove(&self, name: &str) -> bool;
}

/// In-process command table.
///
/// # Examples
///
/// ```
/// use flagkit_features::{CommandTable, FeatureRegistry, Flag, ToggleListener, TOGGLE_COMMAND};
/// use std::sync::Arc;
///
/// let registry = FeatureRegistry::new();
/// registry.add([Flag::new("beta", false)]);
///
/// let console = Arc::new(CommandTable::new());
/// let listener = ToggleListener::new(registry.clone()).with_namespace(console.clone());
/// listener.listen(true);
///
/// console.invoke(TOGGLE_COMMAND, "beta").unwrap();
/// assert!(registry.enabled("beta"));
/// ```
#[derive(Default)]
pub struct CommandTable {
    commands: RwLock<IndexMap<String, Command>>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the command under `name` with `arg`.
    pub fn invoke(&self, name: &str, arg: &str) -> Result<()> {
        let command = self
            .commands
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| ListenerError::CommandNotFound(name.to_string()))?;

        command(arg);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.read().contains_key(name)
    }

    /// Installed command names, in installation order.
    pub fn names(&self) -> Vec<String> {
        self.commands.read().keys().cloned().collect()
    }
}

impl Namespace for CommandTable {
    fn install(&self, name: &str, command: Command) {
        self.commands.write().insert(name.to_string(), command);
    }

    fn remove(&self, name: &str) -> bool {
        self.commands.write().shift_remove(name).is_some()
    }
}

impl fmt::Debug for CommandTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandTable")
            .field("commands", &self.names())
            .finish()
    }
}

/// Installs and removes the [`TOGGLE_COMMAND`] in a set of namespaces.
///
/// The listener owns no flag state; the installed command forwards its
/// argument to [`FeatureRegistry::toggle`] and discards the result.
pub struct ToggleListener {
    registry: FeatureRegistry,
    namespaces: Vec<Arc<dyn Namespace>>,
    attached: AtomicBool,
}

impl ToggleListener {
    pub fn new(registry: FeatureRegistry) -> Self {
        Self {
            registry,
            namespaces: Vec::new(),
            attached: AtomicBool::new(false),
        }
    }

    /// Add a namespace to install the command into.
    pub fn with_namespace(mut self, namespace: Arc<dyn Namespace>) -> Self {
        self.namespaces.push(namespace);
        self
    }

    /// Attach when `start` is true, detach otherwise.
    pub fn listen(&self, start: bool) {
        if start {
            self.attach();
        } else {
            self.detach();
        }
    }

    /// Install the toggle command into every namespace.
    pub fn attach(&self) {
        for namespace in &self.namespaces {
            let registry = self.registry.clone();
            let command: Command = Arc::new(move |name: &str| {
                registry.toggle(name);
            });
            namespace.install(TOGGLE_COMMAND, command);
        }
        self.attached.store(true, Ordering::SeqCst);
        info!(
            command = TOGGLE_COMMAND,
            namespaces = self.namespaces.len(),
            "Feature toggle listener attached"
        );
    }

    /// Remove the toggle command from every namespace.
    pub fn detach(&self) {
        for namespace in &self.namespaces {
            if !namespace.remove(TOGGLE_COMMAND) {
                debug!(command = TOGGLE_COMMAND, "Toggle command was not installed");
            }
        }
        self.attached.store(false, Ordering::SeqCst);
        info!(command = TOGGLE_COMMAND, "Feature toggle listener detached");
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for ToggleListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleListener")
            .field("namespaces", &self.namespaces.len())
            .field("attached", &self.is_attached())
            .finish()
    }
}
