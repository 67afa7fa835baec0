//! Violating-key grammar.
//!
//! A key is a dot-separated list of segments. A segment of the form `name[N]`
//! splits into a field component and an index component; anything else is one field.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static INDEXED_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9]+)\[([0-9]+)\]").expect("indexed segment pattern is valid")
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathComponent {
    Field(String),
    Index(usize),
}

impl fmt::Display for PathComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathComponent::Field(name) => f.write_str(name),
            PathComponent::Index(idx) => write!(f, "[{idx}]"),
        }
    }
}

/// Parse a violating key like `spec.containers[0].image`.
pub fn parse_key_path(path: &str) -> Vec<PathComponent> {
    let mut components = Vec::new();
    for segment in path.split('.') {
        match split_indexed(segment) {
            Some((name, idx)) => {
                components.push(PathComponent::Field(name.to_string()));
                components.push(PathComponent::Index(idx));
            }
            None => components.push(PathComponent::Field(segment.to_string())),
        }
    }
    components
}

fn split_indexed(segment: &str) -> Option<(&str, usize)> {
    let caps = INDEXED_SEGMENT.captures(segment)?;
    let name = caps.get(1)?.as_str();
    // Indexes too large for usize can never address an element; keep the segment verbatim.
    let idx = caps.get(2)?.as_str().parse().ok()?;
    Some((name, idx))
}
