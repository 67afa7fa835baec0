use policyguard_types::{Policy, PolicyConfigEntry};
use serde_json::{Map, Value};
use tracing::info;

/// Effective parameters for one evaluation: policy defaults, then config overrides.
///
/// Overridden entries on `policy.parameters` take the override value and its
/// `config_ref`, so the policy snapshot shows where each value came from.
pub fn resolve_parameters(
    policy: &mut Policy,
    config: Option<&PolicyConfigEntry>,
) -> Map<String, Value> {
    let mut parameters = policy.parameters_map();
    let Some(config) = config else {
        return parameters;
    };

    for (name, param) in &config.parameters {
        info!(
            policy = %policy.id,
            param = %name,
            old_value = ?parameters.get(name),
            new_value = %param.value,
            config_ref = %param.config_ref,
            "overriding parameter"
        );
        parameters.insert(name.clone(), param.value.clone());
    }

    for declared in policy.parameters.iter_mut() {
        if let Some(param) = config.parameters.get(&declared.name) {
            declared.value = Some(param.value.clone());
            declared.config_ref = Some(param.config_ref.clone());
        }
    }

    parameters
}
