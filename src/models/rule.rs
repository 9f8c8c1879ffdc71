//! Pairing rules between chores.
//!
//! Rules relate chores to each other: merged into one task, required on
//! the same day, or limited to one occurrence per window across a category.

use serde::{Deserialize, Serialize};

use super::TaskOccurrence;

/// A declarative relation between chores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PairingRule {
    /// Members always co-occur as one combined task named `name`.
    ///
    /// Combined frequency is the minimum of the members' remaining
    /// frequencies; combined weight is the sum of their weights.
    GroupMerge { name: String, members: Vec<String> },

    /// Whenever `chore` is placed on a day, `requires` must be there too.
    CoRequirement { chore: String, requires: String },

    /// At most one occurrence among `members` per window of `days` days.
    ExclusionWindow {
        category: String,
        members: Vec<String>,
        days: u32,
        #[serde(default)]
        window: WindowKind,
    },

    /// `chore` may be scheduled on consecutive days.
    AllowAdjacent { chore: String },
}

/// How an exclusion window is laid over the month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    /// Fixed blocks starting at `day - day % days` (calendar weeks for 7).
    #[default]
    Calendar,
    /// Any two occurrences closer than `days` days apart conflict.
    Trailing,
}

impl WindowKind {
    /// Whether two days fall into the same window of `days` days.
    pub fn same_window(self, a: usize, b: usize, days: u32) -> bool {
        let days = days.max(1) as usize;
        match self {
            WindowKind::Calendar => a / days == b / days,
            WindowKind::Trailing => a.abs_diff(b) < days,
        }
    }
}

impl PairingRule {
    /// Creates a group-merge rule.
    pub fn group_merge(name: impl Into<String>, members: Vec<String>) -> Self {
        Self::GroupMerge {
            name: name.into(),
            members,
        }
    }

    /// Creates a group-merge rule whose name joins the members with " + ".
    pub fn merge_pair(first: impl Into<String>, second: impl Into<String>) -> Self {
        let (first, second) = (first.into(), second.into());
        Self::GroupMerge {
            name: format!("{first} + {second}"),
            members: vec![first, second],
        }
    }

    /// Creates a co-requirement rule.
    pub fn co_requirement(chore: impl Into<String>, requires: impl Into<String>) -> Self {
        Self::CoRequirement {
            chore: chore.into(),
            requires: requires.into(),
        }
    }

    /// Creates a calendar-aligned exclusion window.
    pub fn exclusion_window(category: impl Into<String>, members: Vec<String>, days: u32) -> Self {
        Self::ExclusionWindow {
            category: category.into(),
            members,
            days,
            window: WindowKind::Calendar,
        }
    }

    /// Creates a trailing exclusion window.
    pub fn trailing_window(category: impl Into<String>, members: Vec<String>, days: u32) -> Self {
        Self::ExclusionWindow {
            category: category.into(),
            members,
            days,
            window: WindowKind::Trailing,
        }
    }

    /// Creates an adjacency override.
    pub fn allow_adjacent(chore: impl Into<String>) -> Self {
        Self::AllowAdjacent {
            chore: chore.into(),
        }
    }
}

/// A view of an exclusion-window rule.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    pub category: &'a str,
    pub members: &'a [String],
    pub days: u32,
    pub kind: WindowKind,
}

impl Window<'_> {
    /// Whether the occurrence counts toward this window's category.
    pub fn covers(&self, occurrence: &TaskOccurrence) -> bool {
        self.members.iter().any(|m| occurrence.covers(m))
    }
}

/// An ordered collection of pairing rules with lookup helpers.
///
/// Rule order is significant for group merges, which are applied in the
/// order they were added.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<PairingRule>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: appends a rule and returns self.
    pub fn with_rule(mut self, rule: PairingRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Appends a rule.
    pub fn add(&mut self, rule: PairingRule) {
        self.rules.push(rule);
    }

    /// All rules in insertion order.
    pub fn rules(&self) -> &[PairingRule] {
        &self.rules
    }

    /// Group-merge rules in insertion order, as `(name, members)`.
    pub fn group_merges(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.rules.iter().filter_map(|r| match r {
            PairingRule::GroupMerge { name, members } => Some((name.as_str(), members.as_slice())),
            _ => None,
        })
    }

    /// Co-requirement rules as `(chore, requires)`.
    pub fn co_requirements(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules.iter().filter_map(|r| match r {
            PairingRule::CoRequirement { chore, requires } => {
                Some((chore.as_str(), requires.as_str()))
            }
            _ => None,
        })
    }

    /// Chores the occurrence requires on its day, deduplicated, rule order.
    pub fn requirements_of(&self, occurrence: &TaskOccurrence) -> Vec<&str> {
        let mut required: Vec<&str> = Vec::new();
        for (chore, requires) in self.co_requirements() {
            if occurrence.covers(chore) && !occurrence.covers(requires) && !required.contains(&requires) {
                required.push(requires);
            }
        }
        required
    }

    /// Whether `dependent` requires the chore `partner` covers.
    pub fn depends_on(&self, dependent: &TaskOccurrence, partner: &TaskOccurrence) -> bool {
        self.requirements_of(dependent)
            .iter()
            .any(|required| partner.covers(required))
    }

    /// Exclusion windows in insertion order.
    pub fn windows(&self) -> impl Iterator<Item = Window<'_>> {
        self.rules.iter().filter_map(|r| match r {
            PairingRule::ExclusionWindow {
                category,
                members,
                days,
                window,
            } => Some(Window {
                category,
                members,
                days: *days,
                kind: *window,
            }),
            _ => None,
        })
    }

    /// Whether an explicit adjacency override names this chore.
    pub fn allows_adjacent(&self, chore: &str) -> bool {
        self.rules
            .iter()
            .any(|r| matches!(r, PairingRule::AllowAdjacent { chore: c } if c == chore))
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the rule set is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<PairingRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = PairingRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
