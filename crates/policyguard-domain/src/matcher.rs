use policyguard_types::{Entity, Policy};

/// Decide whether `policy` applies to `entity`.
///
/// Any configured selector category that matches is enough. A policy with no
/// namespaces, applications, or resources configured applies to everything.
pub fn matches(entity: &Entity, policy: &Policy) -> bool {
    let targets = &policy.targets;
    if targets.is_unrestricted() {
        return true;
    }

    if targets.namespaces.iter().any(|ns| *ns == entity.namespace) {
        return true;
    }

    if let Some(owner) = &entity.owner
        && targets.applications.iter().any(|app| app == owner)
    {
        return true;
    }

    let identity = entity.target_ref();
    targets.resources.iter().any(|res| *res == identity)
}
