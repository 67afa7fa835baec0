//! Stable DTOs and IDs used across the policyguard workspace.
//!
//! This crate is intentionally boring:
//! - the entity and policy shapes exchanged with policy sources
//! - per-entity policy configuration (parameter overrides)
//! - validation results and the summary handed to sinks
//! - stable string IDs and labels

#![forbid(unsafe_code)]

pub mod entity;
pub mod ids;
pub mod policy;
pub mod validation;

pub use entity::{Entity, ObjectReference, TargetRef};
pub use policy::{
    Policy, PolicyConfig, PolicyConfigEntry, PolicyConfigParameter, PolicyParameter,
    PolicyTargets, Severity,
};
pub use validation::{
    Occurrence, PolicyValidation, PolicyValidationSummary, ValidationStatus, ValidationType,
};
