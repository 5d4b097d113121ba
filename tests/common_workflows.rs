//! Integration tests for common flagkit workflows.
//!
//! These tests verify that the most common use cases work correctly.

use flagkit::prelude::*;
use flagkit::{CommandTable, TOGGLE_COMMAND};
use flagkit_config::{FileFormat, FlagSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

// =============================================================================
// Registry Tests
// =============================================================================

#[test]
fn test_flag_lifecycle() {
    let toggles = Arc::new(AtomicUsize::new(0));
    let counter = toggles.clone();

    let registry = FeatureRegistry::new();
    registry.add([
        Flag::new("simple", true),
        Flag::new("descriptive", false),
        Flag::new("dynamic", false).on_toggled(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    ]);

    let status = registry.status();
    assert_eq!(
        status.iter().map(|(k, v)| (k.as_str(), *v)).collect::<Vec<_>>(),
        [("simple", true), ("descriptive", false), ("dynamic", false)]
    );

    assert!(registry.enabled("simple"));
    assert!(!registry.toggle("simple"));
    assert!(registry.toggle("simple"));

    for _ in 0..3 {
        registry.toggle("dynamic");
    }
    assert_eq!(toggles.load(Ordering::SeqCst), 3);

    assert!(!registry.enabled("nonexistent"));
    assert!(!registry.toggle("nonexistent"));

    // Re-adding replaces value and callback without moving the flag
    registry.add([Flag::new("simple", false), Flag::new("dynamic", false)]);
    assert_eq!(registry.names(), ["simple", "descriptive", "dynamic"]);
    assert!(!registry.enabled("simple"));
    registry.toggle("dynamic");
    assert_eq!(toggles.load(Ordering::SeqCst), 3);
}

#[test]
fn test_status_snapshot_as_json() {
    let registry = FeatureRegistry::new();
    registry.add([Flag::new("simple", true), Flag::new("descriptive", false)]);

    let json = serde_json::to_value(registry.status()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"simple": true, "descriptive": false})
    );
}

#[test]
fn test_global_registry() {
    global().add([Flag::new("workflow-global", false)]);
    assert!(flagkit::global().toggle("workflow-global"));
    assert!(global().enabled("workflow-global"));
}

// =============================================================================
// Configuration + Listener Tests
// =============================================================================

#[test]
fn test_configured_flags_toggled_from_console() {
    let registry = FeatureRegistry::new();
    FlagSet::parse(
        r#"{"flags": [{"name": "beta", "enabled": false, "description": "beta UI"}]}"#,
        FileFormat::Json,
    )
    .unwrap()
    .register(&registry);

    let console = Arc::new(CommandTable::new());
    let listener = ToggleListener::new(registry.clone()).with_namespace(console.clone());

    listener.listen(true);
    console.invoke(TOGGLE_COMMAND, "beta").unwrap();
    assert!(registry.enabled("beta"));
    assert_eq!(registry.description("beta").as_deref(), Some("beta UI"));

    listener.listen(false);
    assert!(console.invoke(TOGGLE_COMMAND, "beta").is_err());
    assert!(registry.enabled("beta"));
}

#[test]
fn test_logging_does_not_affect_registry() {
    flagkit_log::init();

    let registry = FeatureRegistry::new();
    registry.add([Flag::new("logged", false)]);
    assert!(registry.toggle("logged"));
}
