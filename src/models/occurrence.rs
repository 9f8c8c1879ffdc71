//! Task occurrence model.
//!
//! One occurrence is one instance of a chore (or of a merged chore group)
//! to be placed on a single day.

use serde::{Deserialize, Serialize};

/// One placeable unit of work.
///
/// Occurrences of the same chore are interchangeable; duplicates by name
/// are expected and each is placed independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOccurrence {
    /// Chore name, or the group name for a merged task.
    pub chore: String,
    /// Difficulty weight.
    pub weight: u32,
    /// Constituent chore names (`[chore]` for an individual occurrence).
    pub members: Vec<String>,
    /// Whether the adjacency rule is waived for this chore.
    #[serde(default)]
    pub adjacency_exempt: bool,
}

impl TaskOccurrence {
    /// Creates an occurrence of a single chore.
    pub fn new(chore: impl Into<String>, weight: u32) -> Self {
        let chore = chore.into();
        Self {
            members: vec![chore.clone()],
            chore,
            weight,
            adjacency_exempt: false,
        }
    }

    /// Creates a merged occurrence standing in for several chores.
    pub fn combined(name: impl Into<String>, weight: u32, members: Vec<String>) -> Self {
        Self {
            chore: name.into(),
            weight,
            members,
            adjacency_exempt: false,
        }
    }

    /// Waives the adjacency rule.
    pub fn with_adjacency_exempt(mut self, exempt: bool) -> Self {
        self.adjacency_exempt = exempt;
        self
    }

    /// Whether this occurrence performs the named chore.
    #[inline]
    pub fn covers(&self, chore: &str) -> bool {
        self.chore == chore || self.members.iter().any(|m| m == chore)
    }

    /// Whether this is a merged occurrence.
    pub fn is_combined(&self) -> bool {
        self.members.len() > 1
    }
}
