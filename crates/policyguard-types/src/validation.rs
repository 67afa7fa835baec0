use crate::entity::Entity;
use crate::policy::Policy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ValidationStatus {
    Violation,
    Compliance,
}

/// What kind of run produced a validation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ValidationType {
    #[default]
    Admission,
    Audit,
}

/// One located violation, optionally carrying a remediation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Occurrence {
    pub message: String,

    /// Dotted path to the offending field, e.g. `spec.containers[0].image`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violating_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_value: Option<JsonValue>,

    /// Set once the recommended value was written into the manifest.
    #[serde(default)]
    pub mutated: bool,
}

impl Occurrence {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Path and value to write, when both are present.
    pub fn remediation(&self) -> Option<(&str, &JsonValue)> {
        Some((
            self.violating_key.as_deref()?,
            self.recommended_value.as_ref()?,
        ))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyValidation {
    pub id: String,
    pub account_id: String,
    pub cluster_id: String,
    pub policy: Policy,
    pub entity: Entity,
    pub status: ValidationStatus,
    #[serde(default)]
    pub message: String,

    /// Free-form evaluator output; kept in memory only.
    #[serde(skip)]
    pub details: Map<String, JsonValue>,

    #[serde(default)]
    pub occurrences: Vec<Occurrence>,

    #[serde(rename = "source")]
    pub validation_type: ValidationType,
    pub trigger: String,

    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl PolicyValidation {
    pub fn is_violation(&self) -> bool {
        self.status == ValidationStatus::Violation
    }
}

/// Outcome of one validation run.
///
/// Order within each list follows completion, not policy input order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyValidationSummary {
    pub violations: Vec<PolicyValidation>,
    pub compliances: Vec<PolicyValidation>,
}

impl PolicyValidationSummary {
    pub fn violation_messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.violations.len() + self.compliances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty() && self.compliances.is_empty()
    }
}
