//! Fuzz target for writing recommended values into manifests.
//!
//! Goal: get-or-create navigation should **never panic** on any document/path
//! pair, and a successful write leaves the document serializable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_mutation
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

#[derive(Arbitrary, Debug)]
struct MutationInput {
    /// JSON text for the manifest; invalid JSON is skipped.
    document: String,
    /// Violating key, e.g. `spec.containers[0].image`.
    path: String,
    /// Recommended value, taken verbatim as a JSON string.
    value: String,
}

fuzz_target!(|input: MutationInput| {
    if input.document.len() > 8192 || input.path.len() > 512 {
        return;
    }
    let Ok(mut document) = serde_json::from_str::<Value>(&input.document) else {
        return;
    };

    let value = Value::String(input.value);
    if policyguard_mutate::fuzz::write_at_path(&mut document, &input.path, &value) {
        let _ = serde_json::to_vec(&document).expect("mutated document serializes");
    }
});
