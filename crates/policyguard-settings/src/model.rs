use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `policyguard.toml` schema v1.
///
/// This is a *user-facing* config model: every field is optional and falls back to the profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyguardConfigV1 {
    /// Optional schema string for tooling (`policyguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `admission` (default) or `audit`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Recorded on every validation: `admission` or `audit`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_type: Option<String>,

    /// Forward compliances to sinks in addition to violations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_compliance: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,

    /// Upper bound on concurrent policy evaluations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_workers: Option<u32>,
}
