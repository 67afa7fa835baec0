use policyguard_domain::config::EffectiveConfig;
use policyguard_types::ValidationType;
use policyguard_types::ids::MAX_WORKERS;

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything environment-specific goes into config.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "audit" => audit_profile(),
        // default
        _ => admission_profile(),
    }
}

fn admission_profile() -> EffectiveConfig {
    // Only violations reach sinks during admission.
    EffectiveConfig {
        profile: "admission".to_string(),
        validation_type: ValidationType::Admission,
        write_compliance: false,
        account_id: String::new(),
        cluster_id: String::new(),
        max_workers: MAX_WORKERS,
    }
}

fn audit_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "audit".to_string(),
        validation_type: ValidationType::Audit,
        write_compliance: true,
        account_id: String::new(),
        cluster_id: String::new(),
        max_workers: MAX_WORKERS,
    }
}
