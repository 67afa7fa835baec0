//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Selector matching (unrestricted and namespace-only policies)
//! - Occurrence extraction cardinality
//! - Parameter resolution precedence

use crate::test_support::{config_entry, entity, policy, policy_with_params};
use crate::{extract_occurrences, matches, resolve_parameters};
use proptest::prelude::*;
use serde_json::{Value, json};

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Strategy for DNS-label-like names (namespaces, resource names).
fn arb_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9-]{0,15}").unwrap()
}

/// Strategy for resource kinds.
fn arb_kind() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Deployment".to_string()),
        Just("StatefulSet".to_string()),
        Just("Pod".to_string()),
        Just("Service".to_string()),
    ]
}

/// Strategy for scalar JSON values usable as parameters.
fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(|n| json!(n)),
        any::<bool>().prop_map(|b| json!(b)),
        arb_name().prop_map(|s| json!(s)),
    ]
}

/// Strategy for evaluator detail records.
fn arb_record() -> impl Strategy<Value = Value> {
    (arb_name(), proptest::option::of(arb_name()), proptest::option::of(arb_scalar())).prop_map(
        |(msg, key, value)| {
            let mut record = serde_json::Map::new();
            record.insert("msg".to_string(), json!(msg));
            if let Some(k) = key {
                record.insert("violating_key".to_string(), json!(k));
            }
            if let Some(v) = value {
                record.insert("recommended_value".to_string(), v);
            }
            Value::Object(record)
        },
    )
}

// ============================================================================
// Matcher
// ============================================================================

proptest! {
    #[test]
    fn unrestricted_policy_matches_any_entity(
        kind in arb_kind(),
        name in arb_name(),
        namespace in arb_name(),
    ) {
        let policy = policy("p", "p");
        prop_assert!(matches(&entity(&kind, &name, &namespace), &policy));
    }

    #[test]
    fn namespace_only_policy_matches_iff_listed(
        listed in prop::collection::vec(arb_name(), 1..5),
        namespace in arb_name(),
    ) {
        let mut policy = policy("p", "p");
        policy.targets.namespaces = listed.clone();

        let expected = listed.contains(&namespace);
        prop_assert_eq!(matches(&entity("Pod", "x", &namespace), &policy), expected);
    }
}

// ============================================================================
// Occurrence extraction
// ============================================================================

proptest! {
    #[test]
    fn list_payload_yields_one_occurrence_per_record(
        records in prop::collection::vec(arb_record(), 0..10),
    ) {
        let details = Value::Array(records.clone());
        let out = extract_occurrences("title", Some(&details));

        prop_assert_eq!(out.len(), records.len());
        for (occurrence, record) in out.iter().zip(&records) {
            prop_assert_eq!(&json!(occurrence.message), &record["msg"]);
            prop_assert_eq!(occurrence.violating_key.is_some(), record.get("violating_key").is_some());
        }
    }

    #[test]
    fn non_list_payload_yields_exactly_one(value in arb_scalar()) {
        prop_assert_eq!(extract_occurrences("title", Some(&value)).len(), 1);
    }
}

// ============================================================================
// Parameter resolution
// ============================================================================

proptest! {
    #[test]
    fn overrides_win_and_defaults_survive(
        default_value in arb_scalar(),
        override_value in arb_scalar(),
        other_value in arb_scalar(),
    ) {
        let mut policy = policy_with_params(
            "p",
            &[("overridden", default_value), ("kept", other_value.clone())],
        );
        let entry = config_entry(&[("overridden", override_value.clone(), "ref")]);

        let params = resolve_parameters(&mut policy, Some(&entry));

        prop_assert_eq!(&params["overridden"], &override_value);
        prop_assert_eq!(&params["kept"], &other_value);
        prop_assert_eq!(policy.parameters[0].config_ref.as_deref(), Some("ref"));
        prop_assert!(policy.parameters[1].config_ref.is_none());
    }
}
