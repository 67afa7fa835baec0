use policyguard_types::{
    Entity, Policy, PolicyConfig, PolicyConfigEntry, PolicyConfigParameter, PolicyTargets,
};
use serde_json::{Value, json};

pub fn entity(kind: &str, name: &str, namespace: &str) -> Entity {
    Entity {
        id: format!("uid-{namespace}-{name}"),
        api_version: "apps/v1".to_string(),
        kind: kind.to_string(),
        name: name.to_string(),
        namespace: namespace.to_string(),
        resource_version: "1".to_string(),
        manifest: json!({
            "apiVersion": "apps/v1",
            "kind": kind,
            "metadata": { "name": name, "namespace": namespace },
            "spec": { "replicas": 1 }
        }),
        ..Entity::default()
    }
}

/// Unrestricted policy whose `code` is a [`ScriptedEvaluator`](crate::ScriptedEvaluator) script.
pub fn policy(id: &str, name: &str, code: &str) -> Policy {
    Policy {
        id: id.to_string(),
        name: name.to_string(),
        category: "test".to_string(),
        code: code.to_string(),
        ..Policy::default()
    }
}

pub fn policy_for_namespaces(id: &str, code: &str, namespaces: &[&str]) -> Policy {
    Policy {
        targets: PolicyTargets {
            namespaces: namespaces.iter().map(|ns| ns.to_string()).collect(),
            ..PolicyTargets::default()
        },
        ..policy(id, id, code)
    }
}

/// Config overriding `(policy_id, parameter, value, config_ref)` tuples.
pub fn policy_config(overrides: &[(&str, &str, Value, &str)]) -> PolicyConfig {
    let mut cfg = PolicyConfig::default();
    for (policy_id, name, value, config_ref) in overrides {
        cfg.config
            .entry(policy_id.to_string())
            .or_insert_with(PolicyConfigEntry::default)
            .parameters
            .insert(
                name.to_string(),
                PolicyConfigParameter {
                    value: value.clone(),
                    config_ref: config_ref.to_string(),
                },
            );
    }
    cfg
}
