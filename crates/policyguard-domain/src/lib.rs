//! Pure policy logic (no IO).
//!
//! Input: an entity, a policy, and optionally the per-entity policy config.
//! Output: match decisions, effective parameters, and normalized occurrences.

#![forbid(unsafe_code)]

pub mod config;
pub mod message;

mod matcher;
mod occurrence;
mod params;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use matcher::matches;
pub use occurrence::extract_occurrences;
pub use params::resolve_parameters;
