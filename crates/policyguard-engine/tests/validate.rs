//! Integration tests for the validation use case.
//!
//! Every collaborator is a fake from `policyguard-test-util`; policy `code` is a
//! script understood by `ScriptedEvaluator`.

use policyguard_domain::config::EffectiveConfig;
use policyguard_engine::{PolicyError, PolicyValidator, ValidateError, Validator};
use policyguard_settings::{Overrides, parse_config_toml, resolve_config};
use policyguard_test_util::{
    FailingSink, FailingSource, RecordingSink, ScriptedEvaluator, StaticPoliciesSource, entity,
    init_test_tracing, policy, policy_config, policy_for_namespaces,
};
use policyguard_types::{Policy, ValidationStatus, ValidationType};
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

fn validator(policies: Vec<Policy>, config: EffectiveConfig) -> PolicyValidator {
    PolicyValidator::new(
        Arc::new(StaticPoliciesSource::new(policies)),
        Arc::new(ScriptedEvaluator::new()),
        config,
    )
}

fn config() -> EffectiveConfig {
    EffectiveConfig {
        account_id: "acc-1".to_string(),
        cluster_id: "cluster-1".to_string(),
        ..EffectiveConfig::default()
    }
}

#[tokio::test]
async fn every_matching_policy_yields_exactly_one_validation() {
    init_test_tracing();
    let policies = vec![
        policy("p1", "Replica Count", "compliant"),
        policy("p2", "Missing Owner Label", "violating"),
        policy("p3", "Image Tag", "compliant"),
        policy_for_namespaces("p4", "violating", &["kube-system"]),
    ];

    let summary = validator(policies, config())
        .validate(&entity("Deployment", "web", "prod"), "Admission")
        .await
        .expect("validate");

    assert_eq!(summary.len(), 3, "p4 targets another namespace");
    assert_eq!(summary.violations.len(), 1);
    assert_eq!(summary.compliances.len(), 2);

    let ids: BTreeSet<&str> = summary
        .violations
        .iter()
        .chain(&summary.compliances)
        .map(|v| v.policy.id.as_str())
        .collect();
    assert_eq!(ids, BTreeSet::from(["p1", "p2", "p3"]));
}

#[tokio::test]
async fn validations_carry_run_metadata() {
    let summary = validator(vec![policy("p1", "Replica Count", "compliant")], config())
        .validate(&entity("Deployment", "web", "prod"), "PolicyChange")
        .await
        .expect("validate");

    let v = &summary.compliances[0];
    assert_eq!(v.status, ValidationStatus::Compliance);
    assert_eq!(v.account_id, "acc-1");
    assert_eq!(v.cluster_id, "cluster-1");
    assert_eq!(v.trigger, "PolicyChange");
    assert_eq!(v.validation_type, ValidationType::Admission);
    assert_eq!(v.entity.name, "web");
    assert!(v.message.is_empty());
    assert!(v.occurrences.is_empty());
    assert!(!v.id.is_empty());
}

#[tokio::test]
async fn validation_ids_are_unique() {
    let policies = (0..10)
        .map(|i| policy(&format!("p{i}"), "Check", "compliant"))
        .collect();

    let summary = validator(policies, config())
        .validate(&entity("Deployment", "web", "prod"), "Audit")
        .await
        .expect("validate");

    let ids: BTreeSet<&str> = summary.compliances.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids.len(), 10);
}

#[tokio::test]
async fn violation_message_counts_occurrences() {
    let code = r#"violating:[
        {"msg": "container a uses latest", "violating_key": "spec.containers[0].image", "recommended_value": "nginx:1.25"},
        {"msg": "container b uses latest"}
    ]"#;
    let summary = validator(vec![policy("p1", "Image Tag", code)], config())
        .validate(&entity("Deployment", "web", "prod"), "Admission")
        .await
        .expect("validate");

    let v = &summary.violations[0];
    assert_eq!(v.message, "Image Tag in deployment web (2 occurrences)");
    assert_eq!(v.occurrences.len(), 2);
    assert_eq!(v.occurrences[0].message, "container a uses latest");
    assert_eq!(
        v.occurrences[0].violating_key.as_deref(),
        Some("spec.containers[0].image")
    );
    assert_eq!(v.occurrences[0].recommended_value, Some(json!("nginx:1.25")));
    assert!(!v.occurrences[0].mutated);
    assert_eq!(summary.violation_messages(), vec![v.message.clone()]);
}

#[tokio::test]
async fn violation_without_details_has_one_titled_occurrence() {
    let summary = validator(vec![policy("p1", "Missing Owner Label", "violating")], config())
        .validate(&entity("Deployment", "web", "prod"), "Admission")
        .await
        .expect("validate");

    let v = &summary.violations[0];
    assert_eq!(v.message, "Missing Owner Label in deployment web (1 occurrences)");
    assert_eq!(v.occurrences.len(), 1);
    assert_eq!(
        v.occurrences[0].message,
        "Missing Owner Label in deployment web"
    );
}

#[tokio::test]
async fn failures_name_every_failing_policy_and_return_no_summary() {
    init_test_tracing();
    let sink = Arc::new(RecordingSink::default());
    let policies = vec![
        policy("ok", "Fine", "compliant"),
        policy("bad-parse", "Broken", "not a rule"),
        policy("bad-eval", "Crashes", "eval-error"),
        policy("bad-panic", "Panics", "panic"),
    ];

    let err = validator(policies, config())
        .with_sink(sink.clone())
        .validate(&entity("Deployment", "web", "prod"), "Admission")
        .await
        .expect_err("failures must fail the call");

    let failed: BTreeSet<&str> = err
        .policy_errors()
        .iter()
        .filter_map(PolicyError::policy_id)
        .collect();
    assert_eq!(failed, BTreeSet::from(["bad-eval", "bad-panic", "bad-parse"]));

    let text = err.to_string();
    assert!(text.starts_with(
        "encountered errors while validating policies against resource Deployment/web"
    ));
    assert!(text.contains("failed to parse policy bad-parse"));
    assert!(text.contains("unable to evaluate resource against policy. policy id: bad-eval."));
    assert!(text.contains("bad-panic"));

    assert!(sink.writes().is_empty(), "sinks are skipped on failure");
}

#[tokio::test]
async fn skipped_policies_never_fail() {
    // Would fail to parse, but never reaches the evaluator.
    let policies = vec![
        policy_for_namespaces("elsewhere", "not a rule", &["kube-system"]),
        policy("p1", "Fine", "compliant"),
    ];

    let summary = validator(policies, config())
        .validate(&entity("Deployment", "web", "prod"), "Admission")
        .await
        .expect("validate");

    assert_eq!(summary.len(), 1);
}

#[tokio::test]
async fn source_failures_abort_before_evaluation() {
    let evaluator = Arc::new(ScriptedEvaluator::new());
    for source in [FailingSource::Policies, FailingSource::PolicyConfig] {
        let err = PolicyValidator::new(Arc::new(source), evaluator.clone(), config())
            .validate(&entity("Deployment", "web", "prod"), "Admission")
            .await
            .expect_err("source failure");

        match (source, &err) {
            (FailingSource::Policies, ValidateError::Policies(_)) => {}
            (FailingSource::PolicyConfig, ValidateError::PolicyConfig(_)) => {}
            other => panic!("unexpected error pairing: {other:?}"),
        }
        assert!(err.policy_errors().is_empty());
    }
    assert_eq!(evaluator.evaluated(), 0);
}

#[tokio::test]
async fn no_policies_yields_empty_summary() {
    let summary = validator(Vec::new(), config())
        .validate(&entity("Deployment", "web", "prod"), "Admission")
        .await
        .expect("validate");
    assert!(summary.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrency_never_exceeds_default_bound() {
    let evaluator = Arc::new(ScriptedEvaluator::new().with_delay(Duration::from_millis(20)));
    let policies: Vec<Policy> = (0..60)
        .map(|i| policy(&format!("p{i}"), "Check", "compliant"))
        .collect();

    let summary = PolicyValidator::new(
        Arc::new(StaticPoliciesSource::new(policies)),
        evaluator.clone(),
        config(),
    )
    .validate(&entity("Deployment", "web", "prod"), "Audit")
    .await
    .expect("validate");

    assert_eq!(summary.len(), 60);
    assert_eq!(evaluator.evaluated(), 60);
    assert!(evaluator.peak() <= 25, "peak was {}", evaluator.peak());
    assert!(evaluator.peak() > 1, "evaluations never overlapped");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrency_follows_configured_bound() {
    let cfg = parse_config_toml("max_workers = 3\n").expect("parse");
    let effective = resolve_config(cfg, Overrides::default())
        .expect("resolve")
        .effective;
    assert_eq!(effective.max_workers, 3);

    let evaluator = Arc::new(ScriptedEvaluator::new().with_delay(Duration::from_millis(10)));
    let policies: Vec<Policy> = (0..12)
        .map(|i| policy(&format!("p{i}"), "Check", "violating"))
        .collect();

    let summary = PolicyValidator::new(
        Arc::new(StaticPoliciesSource::new(policies)),
        evaluator.clone(),
        effective,
    )
    .validate(&entity("Deployment", "web", "prod"), "Audit")
    .await
    .expect("validate");

    assert_eq!(summary.violations.len(), 12);
    assert!(evaluator.peak() <= 3, "peak was {}", evaluator.peak());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn oversized_worker_bound_is_clamped() {
    let evaluator = Arc::new(ScriptedEvaluator::new());
    let policies: Vec<Policy> = (0..5)
        .map(|i| policy(&format!("p{i}"), "Check", "compliant"))
        .collect();
    let cfg = EffectiveConfig {
        max_workers: usize::MAX,
        ..config()
    };

    let summary = PolicyValidator::new(
        Arc::new(StaticPoliciesSource::new(policies)),
        evaluator.clone(),
        cfg,
    )
    .validate(&entity("Deployment", "web", "prod"), "Audit")
    .await
    .expect("validate");

    assert_eq!(summary.compliances.len(), 5);
    assert_eq!(evaluator.evaluated(), 5);
}

#[tokio::test]
async fn zero_worker_bound_still_evaluates() {
    let cfg = EffectiveConfig {
        max_workers: 0,
        ..config()
    };

    let summary = validator(vec![policy("p1", "Check", "violating")], cfg)
        .validate(&entity("Deployment", "web", "prod"), "Audit")
        .await
        .expect("validate");

    assert_eq!(summary.violations.len(), 1);
}

#[tokio::test]
async fn sinks_receive_summary_and_compliance_flag() {
    for write_compliance in [false, true] {
        let sink = Arc::new(RecordingSink::default());
        let cfg = EffectiveConfig {
            write_compliance,
            ..config()
        };

        let summary = validator(vec![policy("p1", "Fine", "compliant")], cfg)
            .with_sink(sink.clone())
            .validate(&entity("Deployment", "web", "prod"), "Admission")
            .await
            .expect("validate");

        let writes = sink.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, summary);
        assert_eq!(writes[0].1, write_compliance);
    }
}

#[tokio::test]
async fn sink_failure_does_not_fail_validation() {
    init_test_tracing();
    let recording = Arc::new(RecordingSink::default());

    let summary = validator(vec![policy("p1", "Check", "violating")], config())
        .with_sink(Arc::new(FailingSink))
        .with_sink(recording.clone())
        .validate(&entity("Deployment", "web", "prod"), "Admission")
        .await
        .expect("sink errors are logged, not returned");

    assert_eq!(summary.violations.len(), 1);
    assert_eq!(recording.writes().len(), 1, "other sinks still run");
}

#[tokio::test]
async fn config_overrides_reach_evaluator_and_snapshot() {
    let mut p = policy("p1", "Replica Count", "echo-params");
    p.parameters = vec![
        policyguard_types::PolicyParameter {
            name: "replica_count".to_string(),
            kind: "integer".to_string(),
            value: Some(json!(2)),
            ..Default::default()
        },
        policyguard_types::PolicyParameter {
            name: "exclude_namespaces".to_string(),
            kind: "array".to_string(),
            value: Some(json!([])),
            ..Default::default()
        },
    ];
    let source = StaticPoliciesSource::new(vec![p.clone()]).with_config(policy_config(&[(
        "p1",
        "replica_count",
        json!(5),
        "prod-overrides",
    )]));

    let summary = PolicyValidator::new(
        Arc::new(source.clone()),
        Arc::new(ScriptedEvaluator::new()),
        config(),
    )
    .validate(&entity("Deployment", "web", "prod"), "Admission")
    .await
    .expect("validate");

    let v = &summary.violations[0];
    assert_eq!(
        v.occurrences[0].recommended_value,
        Some(json!({"replica_count": 5, "exclude_namespaces": []}))
    );

    let snapshot = &v.policy.parameters;
    assert_eq!(snapshot[0].value, Some(json!(5)));
    assert_eq!(snapshot[0].config_ref.as_deref(), Some("prod-overrides"));
    assert_eq!(snapshot[1].value, Some(json!([])));
    assert!(snapshot[1].config_ref.is_none());

    // The source's copy is untouched.
    assert_eq!(source.policies[0], p);
}
