use crate::{model::PolicyguardConfigV1, presets};
use anyhow::Context;
use policyguard_domain::config::EffectiveConfig;
use policyguard_types::ValidationType;

/// Caller-supplied values that win over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub validation_type: Option<String>,
    pub write_compliance: Option<bool>,
    pub account_id: Option<String>,
    pub cluster_id: Option<String>,
    pub max_workers: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: PolicyguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "admission".to_string());

    let mut effective = presets::preset(&profile);

    if let Some(vt) = overrides.validation_type.or(cfg.validation_type) {
        effective.validation_type = parse_validation_type(&vt)?;
    }

    if let Some(wc) = overrides.write_compliance.or(cfg.write_compliance) {
        effective.write_compliance = wc;
    }

    if let Some(account_id) = overrides.account_id.or(cfg.account_id) {
        effective.account_id = account_id;
    }
    if let Some(cluster_id) = overrides.cluster_id.or(cfg.cluster_id) {
        effective.cluster_id = cluster_id;
    }

    if let Some(mw) = overrides.max_workers.or(cfg.max_workers) {
        effective.max_workers = parse_max_workers(mw).context("invalid max_workers")?;
    }

    Ok(ResolvedConfig { effective })
}

fn parse_validation_type(v: &str) -> anyhow::Result<ValidationType> {
    match v.to_ascii_lowercase().as_str() {
        "admission" => Ok(ValidationType::Admission),
        "audit" => Ok(ValidationType::Audit),
        other => anyhow::bail!("unknown validation_type: {other} (expected 'admission' or 'audit')"),
    }
}

fn parse_max_workers(v: u32) -> anyhow::Result<usize> {
    if v == 0 {
        anyhow::bail!("max_workers must be at least 1");
    }
    Ok(v as usize)
}
