//! Collaborator seams. Implementations live outside this crate.

use async_trait::async_trait;
use policyguard_types::{Entity, Policy, PolicyConfig, PolicyValidationSummary};
use serde_json::{Map, Value};

/// Read-only provider of policy definitions and per-entity overrides.
#[async_trait]
pub trait PoliciesSource: Send + Sync {
    async fn get_all(&self) -> anyhow::Result<Vec<Policy>>;

    async fn get_policy_config(&self, entity: &Entity) -> anyhow::Result<PolicyConfig>;
}

/// Result of running a compiled policy against one manifest.
#[derive(Clone, Debug, PartialEq)]
pub enum Evaluation {
    Compliant,
    /// The rule reported a failure. `details` is a single record, a list of
    /// records, or absent; see `policyguard_domain::extract_occurrences`.
    Violating { details: Option<Value> },
}

/// The external rule engine. Calls are synchronous and may be CPU-heavy.
pub trait PolicyEvaluator: Send + Sync {
    fn parse(&self, code: &str, query: &str) -> anyhow::Result<Box<dyn CompiledPolicy>>;
}

pub trait CompiledPolicy: Send {
    /// `Err` means evaluation itself failed; a rule violation is `Ok(Evaluation::Violating)`.
    fn eval_compliant(
        &self,
        manifest: &Value,
        parameters: &Map<String, Value>,
        query: &str,
    ) -> anyhow::Result<Evaluation>;
}

/// Write-only consumer of validation summaries (storage, events, notifications).
///
/// Failures are logged by the validator and never reach its caller.
#[async_trait]
pub trait PolicyValidationSink: Send + Sync {
    async fn write(
        &self,
        summary: &PolicyValidationSummary,
        include_compliances: bool,
    ) -> anyhow::Result<()>;
}
