use thiserror::Error;

#[derive(Debug, Error)]
pub enum MutationError {
    #[error("failed to serialize manifest: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to load manifest into a document: {0}")]
    Deserialize(#[source] serde_json::Error),
}

/// A path component could not be applied to the node it addressed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("cannot apply '{component}': expected {expected}, found {found}")]
pub struct PathError {
    pub component: String,
    pub expected: &'static str,
    pub found: &'static str,
}
