use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("failed to get policies from source: {0}")]
    Policies(#[source] anyhow::Error),

    #[error("failed to get policy config from source: {0}")]
    PolicyConfig(#[source] anyhow::Error),

    #[error(
        "encountered errors while validating policies against resource {kind}/{name}: {}",
        join_errors(.errors)
    )]
    Aggregate {
        kind: String,
        name: String,
        errors: Vec<PolicyError>,
    },
}

impl ValidateError {
    /// Per-policy failures behind an aggregate error; empty for source errors.
    pub fn policy_errors(&self) -> &[PolicyError] {
        match self {
            ValidateError::Aggregate { errors, .. } => errors,
            _ => &[],
        }
    }
}

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("failed to parse policy {policy_id}: {source}")]
    Parse {
        policy_id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("unable to evaluate resource against policy. policy id: {policy_id}. {source}")]
    Evaluate {
        policy_id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("policy evaluation panicked. policy id: {policy_id}")]
    Panicked { policy_id: String },

    #[error("policy task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl PolicyError {
    pub fn policy_id(&self) -> Option<&str> {
        match self {
            PolicyError::Parse { policy_id, .. }
            | PolicyError::Evaluate { policy_id, .. }
            | PolicyError::Panicked { policy_id } => Some(policy_id),
            PolicyError::Join(_) => None,
        }
    }
}

fn join_errors(errors: &[PolicyError]) -> String {
    let listed: Vec<String> = errors.iter().map(ToString::to_string).collect();
    format!("{} errors occurred: [{}]", errors.len(), listed.join("; "))
}
