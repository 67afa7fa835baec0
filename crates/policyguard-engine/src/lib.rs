//! The validation use case: evaluate one entity against every applicable policy.
//!
//! Policies and per-entity config come from a [`PoliciesSource`]; rule code is
//! compiled and run by a [`PolicyEvaluator`]; the resulting summary is handed to
//! every configured [`PolicyValidationSink`].
//!
//! Evaluations run concurrently, bounded by `EffectiveConfig::max_workers`.
//! Any per-policy failure fails the whole call; violations are results, not errors.
//!
//! Dropping the future returned by [`Validator::validate`] aborts policy tasks
//! that have not reached the evaluator. Evaluator calls already running on the
//! blocking pool finish in the background and their results are discarded.

#![forbid(unsafe_code)]

mod error;
mod ports;
mod sinks;
mod validator;

pub use error::{PolicyError, ValidateError};
pub use ports::{CompiledPolicy, Evaluation, PoliciesSource, PolicyEvaluator, PolicyValidationSink};
pub use validator::{PolicyValidator, Validator};
