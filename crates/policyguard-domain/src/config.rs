use policyguard_types::ValidationType;
use policyguard_types::ids::MAX_WORKERS;

/// Run configuration consumed by the validator, after presets and overrides are applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub profile: String,
    pub validation_type: ValidationType,
    /// Forward compliances to sinks, not just violations.
    pub write_compliance: bool,
    pub account_id: String,
    pub cluster_id: String,
    pub max_workers: usize,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            profile: "admission".to_string(),
            validation_type: ValidationType::Admission,
            write_compliance: false,
            account_id: String::new(),
            cluster_id: String::new(),
            max_workers: MAX_WORKERS,
        }
    }
}
