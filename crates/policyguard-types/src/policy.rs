use crate::entity::{ObjectReference, TargetRef};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// Selectors restricting which entities a policy applies to.
///
/// Empty in every category means the policy is unrestricted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyTargets {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<String>,
    #[serde(default, rename = "apps", skip_serializing_if = "Vec::is_empty")]
    pub applications: Vec<TargetRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<TargetRef>,
}

impl PolicyTargets {
    pub fn is_unrestricted(&self) -> bool {
        self.namespaces.is_empty() && self.applications.is_empty() && self.resources.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyParameter {
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<JsonValue>,
    #[serde(default)]
    pub required: bool,

    /// Set when the value came from a per-entity config override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_ref: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Policy {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub severity: Severity,

    /// Rule source, opaque to policyguard; handed to the evaluator as-is.
    pub code: String,

    #[serde(default)]
    pub targets: PolicyTargets,
    #[serde(default)]
    pub parameters: Vec<PolicyParameter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<ObjectReference>,
}

impl Policy {
    /// Declared defaults keyed by parameter name. Parameters without a value map to null.
    pub fn parameters_map(&self) -> Map<String, JsonValue> {
        self.parameters
            .iter()
            .map(|p| (p.name.clone(), p.value.clone().unwrap_or(JsonValue::Null)))
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyConfigParameter {
    pub value: JsonValue,
    #[serde(default)]
    pub config_ref: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyConfigEntry {
    #[serde(default)]
    pub parameters: BTreeMap<String, PolicyConfigParameter>,
}

/// Per-entity overrides, keyed by policy id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyConfig {
    #[serde(default)]
    pub config: BTreeMap<String, PolicyConfigEntry>,

    /// Selector the source used to pick this config for the entity.
    #[serde(default, rename = "match")]
    pub match_targets: PolicyTargets,
}

impl PolicyConfig {
    pub fn for_policy(&self, policy_id: &str) -> Option<&PolicyConfigEntry> {
        self.config.get(policy_id)
    }
}
