use crate::coerce::coerce_recommended;
use crate::error::MutationError;
use crate::navigate::lookup_or_create;
use crate::path::{PathComponent, parse_key_path};
use policyguard_types::ids::MUTATED_LABEL;
use policyguard_types::{Entity, Occurrence};
use serde_json::Value;
use tracing::{debug, error};

/// An entity manifest loaded for remediation.
///
/// Keeps the original serialized bytes next to the editable document so callers
/// can diff or patch against them.
#[derive(Clone, Debug)]
pub struct MutationResult {
    raw: Vec<u8>,
    document: Value,
}

impl MutationResult {
    pub fn load(entity: &Entity) -> Result<Self, MutationError> {
        let raw = serde_json::to_vec(&entity.manifest).map_err(MutationError::Serialize)?;
        let document = serde_json::from_slice(&raw).map_err(MutationError::Deserialize)?;
        Ok(Self { raw, document })
    }

    /// Write every remediable occurrence into the document.
    ///
    /// Occurrences whose path does not resolve are logged and skipped. Each applied
    /// occurrence comes back with `mutated` set; if any applied, the document is
    /// labeled with [`MUTATED_LABEL`].
    pub fn mutate(&mut self, mut occurrences: Vec<Occurrence>) -> Vec<Occurrence> {
        let mut mutated = false;
        for occurrence in occurrences.iter_mut() {
            let Some((key, value)) = occurrence.remediation() else {
                continue;
            };

            let path = parse_key_path(key);
            let slot = match lookup_or_create(&mut self.document, &path) {
                Ok(Some(slot)) => slot,
                Ok(None) => {
                    error!(path = %key, "field not found");
                    continue;
                }
                Err(err) => {
                    error!(path = %key, error = %err, "failed to mutate");
                    continue;
                }
            };

            *slot = coerce_recommended(value);
            debug!(path = %key, "applied recommended value");
            occurrence.mutated = true;
            mutated = true;
        }

        if mutated {
            self.set_mutated_label();
        }
        occurrences
    }

    /// The manifest exactly as it was loaded.
    pub fn old(&self) -> &[u8] {
        &self.raw
    }

    /// The current document serialized back to JSON.
    pub fn mutated(&self) -> Result<Vec<u8>, MutationError> {
        serde_json::to_vec(&self.document).map_err(MutationError::Serialize)
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    fn set_mutated_label(&mut self) {
        let path = [
            PathComponent::Field("metadata".to_string()),
            PathComponent::Field("labels".to_string()),
            PathComponent::Field(MUTATED_LABEL.to_string()),
        ];
        match lookup_or_create(&mut self.document, &path) {
            Ok(Some(slot)) => *slot = Value::String(String::new()),
            Ok(None) => error!("failed to set mutated label: labels not found"),
            Err(err) => error!(error = %err, "failed to set mutated label"),
        }
    }
}
