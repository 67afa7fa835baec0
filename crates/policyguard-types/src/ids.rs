//! Stable identifiers shared with evaluators, sinks, and mutated manifests.

/// Query name every policy is compiled and evaluated with.
pub const POLICY_QUERY: &str = "violation";

/// Label set on a manifest once at least one field was remediated.
pub const MUTATED_LABEL: &str = "pac.weave.works/mutated";

/// Default bound on concurrent policy evaluations for one validation run.
pub const MAX_WORKERS: usize = 25;

// Keys recognized in an evaluator detail record.
pub const DETAIL_MSG: &str = "msg";
pub const DETAIL_VIOLATING_KEY: &str = "violating_key";
pub const DETAIL_RECOMMENDED_VALUE: &str = "recommended_value";

// Schema ids
pub const SCHEMA_CONFIG_V1: &str = "policyguard.config.v1";
pub const SCHEMA_SUMMARY_V1: &str = "policyguard.summary.v1";
