use crate::error::{PolicyError, ValidateError};
use crate::ports::{Evaluation, PoliciesSource, PolicyEvaluator, PolicyValidationSink};
use crate::sinks::write_to_sinks;
use async_trait::async_trait;
use policyguard_domain::config::EffectiveConfig;
use policyguard_domain::message::{violation_message, violation_title};
use policyguard_domain::{extract_occurrences, matches, resolve_parameters};
use policyguard_types::ids::POLICY_QUERY;
use policyguard_types::{
    Entity, Policy, PolicyConfig, PolicyValidation, PolicyValidationSummary, ValidationStatus,
};
use serde_json::Map;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Semaphore;
use tokio::task::{self, JoinSet};
use tracing::{debug, info, warn};
use uuid::Uuid;

#[async_trait]
pub trait Validator: Send + Sync {
    /// Evaluate `entity` against every policy that targets it.
    ///
    /// `trigger` is an opaque label copied onto each validation.
    async fn validate(
        &self,
        entity: &Entity,
        trigger: &str,
    ) -> Result<PolicyValidationSummary, ValidateError>;
}

/// [`Validator`] that fans policies out over a bounded set of workers.
pub struct PolicyValidator {
    source: Arc<dyn PoliciesSource>,
    evaluator: Arc<dyn PolicyEvaluator>,
    sinks: Vec<Arc<dyn PolicyValidationSink>>,
    config: EffectiveConfig,
}

impl PolicyValidator {
    pub fn new(
        source: Arc<dyn PoliciesSource>,
        evaluator: Arc<dyn PolicyEvaluator>,
        config: EffectiveConfig,
    ) -> Self {
        Self {
            source,
            evaluator,
            sinks: Vec::new(),
            config,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn PolicyValidationSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

#[async_trait]
impl Validator for PolicyValidator {
    async fn validate(
        &self,
        entity: &Entity,
        trigger: &str,
    ) -> Result<PolicyValidationSummary, ValidateError> {
        let policies = self
            .source
            .get_all()
            .await
            .map_err(ValidateError::Policies)?;
        let policy_config = self
            .source
            .get_policy_config(entity)
            .await
            .map_err(ValidateError::PolicyConfig)?;

        debug!(
            kind = %entity.kind,
            name = %entity.name,
            policies = policies.len(),
            trigger,
            "validating entity"
        );

        let run = Arc::new(Run {
            entity: entity.clone(),
            policy_config,
            evaluator: Arc::clone(&self.evaluator),
            config: self.config.clone(),
            trigger: trigger.to_string(),
        });
        let workers = self.config.max_workers.clamp(1, Semaphore::MAX_PERMITS);
        let slots = Arc::new(Semaphore::new(workers));

        let mut tasks = JoinSet::new();
        for policy in policies {
            tasks.spawn(run_policy(Arc::clone(&run), Arc::clone(&slots), policy));
        }

        let mut summary = PolicyValidationSummary::default();
        let mut errors = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Outcome::Skipped) => {}
                Ok(Outcome::Violation(v)) => summary.violations.push(v),
                Ok(Outcome::Compliance(c)) => summary.compliances.push(c),
                Ok(Outcome::Failed(err)) => errors.push(err),
                Err(err) => errors.push(PolicyError::Join(err)),
            }
        }
        for err in &errors {
            warn!(
                policy = err.policy_id().unwrap_or("-"),
                error = %err,
                "policy evaluation failed"
            );
        }

        if !errors.is_empty() {
            warn!(
                kind = %entity.kind,
                name = %entity.name,
                failed = errors.len(),
                "validation aborted"
            );
            return Err(ValidateError::Aggregate {
                kind: entity.kind.clone(),
                name: entity.name.clone(),
                errors,
            });
        }

        info!(
            kind = %entity.kind,
            name = %entity.name,
            violations = summary.violations.len(),
            compliances = summary.compliances.len(),
            "validated entity"
        );

        write_to_sinks(&self.sinks, &summary, self.config.write_compliance).await;
        Ok(summary)
    }
}

enum Outcome {
    Skipped,
    Violation(PolicyValidation),
    Compliance(PolicyValidation),
    Failed(PolicyError),
}

/// State shared by every policy task of one `validate` call.
struct Run {
    entity: Entity,
    policy_config: PolicyConfig,
    evaluator: Arc<dyn PolicyEvaluator>,
    config: EffectiveConfig,
    trigger: String,
}

async fn run_policy(run: Arc<Run>, slots: Arc<Semaphore>, policy: Policy) -> Outcome {
    let _slot = slots
        .acquire_owned()
        .await
        .expect("worker slots are never closed");

    if !matches(&run.entity, &policy) {
        debug!(policy = %policy.id, "policy does not target entity");
        return Outcome::Skipped;
    }

    let policy_id = policy.id.clone();
    match task::spawn_blocking(move || run.evaluate(policy)).await {
        Ok(outcome) => outcome,
        Err(err) if err.is_panic() => Outcome::Failed(PolicyError::Panicked { policy_id }),
        Err(err) => Outcome::Failed(PolicyError::Join(err)),
    }
}

impl Run {
    /// Blocking: parses and evaluates one policy on its own copy.
    fn evaluate(&self, mut policy: Policy) -> Outcome {
        let compiled = match self.evaluator.parse(&policy.code, POLICY_QUERY) {
            Ok(compiled) => compiled,
            Err(source) => {
                return Outcome::Failed(PolicyError::Parse {
                    policy_id: policy.id,
                    source,
                });
            }
        };

        let overrides = self.policy_config.for_policy(&policy.id);
        let parameters = resolve_parameters(&mut policy, overrides);

        match compiled.eval_compliant(&self.entity.manifest, &parameters, POLICY_QUERY) {
            Ok(Evaluation::Compliant) => {
                Outcome::Compliance(self.validation(policy, ValidationStatus::Compliance))
            }
            Ok(Evaluation::Violating { details }) => {
                let title = violation_title(&policy, &self.entity);
                let occurrences = extract_occurrences(&title, details.as_ref());
                let message = violation_message(&policy, &self.entity, occurrences.len());

                let mut validation = self.validation(policy, ValidationStatus::Violation);
                validation.message = message;
                validation.occurrences = occurrences;
                Outcome::Violation(validation)
            }
            Err(source) => Outcome::Failed(PolicyError::Evaluate {
                policy_id: policy.id,
                source,
            }),
        }
    }

    fn validation(&self, policy: Policy, status: ValidationStatus) -> PolicyValidation {
        PolicyValidation {
            id: Uuid::new_v4().to_string(),
            account_id: self.config.account_id.clone(),
            cluster_id: self.config.cluster_id.clone(),
            policy,
            entity: self.entity.clone(),
            status,
            message: String::new(),
            details: Map::new(),
            occurrences: Vec::new(),
            validation_type: self.config.validation_type,
            trigger: self.trigger.clone(),
            created_at: OffsetDateTime::now_utc(),
        }
    }
}
