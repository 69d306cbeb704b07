use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::id::generate_id;

/// A stop on a line.
///
/// Stations are owned by whoever manages the station registry; lines only
/// reference them. Two stations are the same stop when their ids match,
/// regardless of name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    #[serde(default = "generate_id")]
    pub id: u64,
    pub name: String,
}

impl Station {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn with_id(id: u64, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Station {}

impl Hash for Station {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Station {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
