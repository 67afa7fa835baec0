//! Manifest remediation.
//!
//! Loads an entity's manifest into an editable document, writes each occurrence's
//! recommended value at its violating key, and labels the document once anything changed.
//! Individual field failures are logged and skipped; they never abort a batch.

#![forbid(unsafe_code)]

mod coerce;
mod error;
mod navigate;
mod path;
mod result;

pub use error::{MutationError, PathError};
pub use path::{PathComponent, parse_key_path};
pub use result::MutationResult;

/// Fuzz-friendly API for exercising parsing and navigation without an entity.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;
    use serde_json::Value;

    /// Parse `path` and get-or-create it inside `document`, writing `value` if found.
    ///
    /// Returns whether a write happened. **Never panics** on any input.
    pub fn write_at_path(document: &mut Value, path: &str, value: &Value) -> bool {
        let components = parse_key_path(path);
        match navigate::lookup_or_create(document, &components) {
            Ok(Some(slot)) => {
                *slot = coerce::coerce_recommended(value);
                true
            }
            _ => false,
        }
    }
}
