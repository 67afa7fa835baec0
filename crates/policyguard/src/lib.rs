//! Validate resources against policies and remediate what can be fixed.
//!
//! ```no_run
//! # async fn run(
//! #     source: std::sync::Arc<dyn policyguard::PoliciesSource>,
//! #     evaluator: std::sync::Arc<dyn policyguard::PolicyEvaluator>,
//! #     entity: policyguard::types::Entity,
//! # ) -> anyhow::Result<()> {
//! use policyguard::{MutationResult, PolicyValidator, Validator};
//!
//! let cfg = policyguard::settings::parse_config_toml("profile = \"admission\"")?;
//! let effective = policyguard::settings::resolve_config(cfg, Default::default())?.effective;
//!
//! let validator = PolicyValidator::new(source, evaluator, effective);
//! let summary = validator.validate(&entity, "Admission").await?;
//!
//! let mut result = MutationResult::load(&entity)?;
//! for violation in summary.violations {
//!     result.mutate(violation.occurrences);
//! }
//! let patched = result.mutated()?;
//! # let _ = patched;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub use policyguard_domain as domain;
pub use policyguard_settings as settings;
pub use policyguard_types as types;

pub use policyguard_domain::config::EffectiveConfig;
pub use policyguard_engine::{
    CompiledPolicy, Evaluation, PoliciesSource, PolicyError, PolicyEvaluator,
    PolicyValidationSink, PolicyValidator, ValidateError, Validator,
};
pub use policyguard_mutate::{MutationError, MutationResult, PathComponent, parse_key_path};
