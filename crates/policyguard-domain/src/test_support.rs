use policyguard_types::{
    Entity, Policy, PolicyConfigEntry, PolicyConfigParameter, PolicyParameter,
};
use serde_json::{Value, json};

pub fn entity(kind: &str, name: &str, namespace: &str) -> Entity {
    Entity {
        id: format!("{kind}/{namespace}/{name}"),
        api_version: "v1".to_string(),
        kind: kind.to_string(),
        name: name.to_string(),
        namespace: namespace.to_string(),
        resource_version: "1".to_string(),
        manifest: json!({}),
        ..Entity::default()
    }
}

pub fn policy(id: &str, name: &str) -> Policy {
    Policy {
        id: id.to_string(),
        name: name.to_string(),
        code: "package test".to_string(),
        ..Policy::default()
    }
}

pub fn policy_with_params(id: &str, params: &[(&str, Value)]) -> Policy {
    let mut p = policy(id, id);
    p.parameters = params
        .iter()
        .map(|(name, value)| PolicyParameter {
            name: name.to_string(),
            value: Some(value.clone()),
            ..PolicyParameter::default()
        })
        .collect();
    p
}

pub fn config_entry(overrides: &[(&str, Value, &str)]) -> PolicyConfigEntry {
    PolicyConfigEntry {
        parameters: overrides
            .iter()
            .map(|(name, value, config_ref)| {
                (
                    name.to_string(),
                    PolicyConfigParameter {
                        value: value.clone(),
                        config_ref: config_ref.to_string(),
                    },
                )
            })
            .collect(),
    }
}
