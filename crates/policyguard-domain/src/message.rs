//! Human-readable text attached to validation results.

use policyguard_types::{Entity, Policy};

/// Default occurrence message: `"<policy> in <kind> <name>"`.
pub fn violation_title(policy: &Policy, entity: &Entity) -> String {
    format!(
        "{} in {} {}",
        policy.name,
        entity.kind.to_lowercase(),
        entity.name
    )
}

pub fn violation_message(policy: &Policy, entity: &Entity, occurrences: usize) -> String {
    format!(
        "{} ({} occurrences)",
        violation_title(policy, entity),
        occurrences
    )
}
