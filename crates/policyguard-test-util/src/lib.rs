//! Shared test utilities for the policyguard workspace.
//!
//! Fakes for every collaborator seam of the validator plus fixture builders.
//! `xtask` also uses `normalize_nondeterministic` at runtime, so this lives in
//! a crate instead of `#[cfg(test)]` modules.

mod evaluator;
mod fixtures;
mod sinks;
mod source;

pub use evaluator::ScriptedEvaluator;
pub use fixtures::{entity, policy, policy_config, policy_for_namespaces};
pub use sinks::{FailingSink, RecordingSink};
pub use source::{FailingSource, StaticPoliciesSource};

use serde_json::Value;
use std::sync::Once;

/// Install a fmt subscriber writing through the test harness, once per binary.
///
/// Honors `RUST_LOG`; defaults to `warn`.
pub fn init_test_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// Validation records carry a random `id` and a wall-clock `created_at`. Both
/// are replaced wherever an object has a `status` next to them, so policy and
/// entity ids elsewhere in the document stay intact.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    normalize_recursive(&mut value);
    value
}

fn normalize_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let is_validation = map.contains_key("status") && map.contains_key("created_at");
            if is_validation {
                map.insert("id".to_string(), Value::String("__ID__".to_string()));
                map.insert(
                    "created_at".to_string(),
                    Value::String("__TIMESTAMP__".to_string()),
                );
            }
            for val in map.values_mut() {
                normalize_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_recursive(val);
            }
        }
        _ => {}
    }
}
