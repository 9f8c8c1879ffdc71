//! Input validation for chore scheduling.
//!
//! Checks structural integrity of chores, rules and settings before
//! scheduling. Detects:
//! - Duplicate or empty chore names
//! - Malformed group-merge and exclusion-window rules
//! - Self and circular co-requirements (DAG validation)
//! - Zero capacity
//!
//! Missing rule members are *not* errors; the expander degrades those rules
//! and reports a warning.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::config::SchedulerConfig;
use crate::models::{Chore, PairingRule, RuleSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Two chores (or a chore and a group) share a name.
    DuplicateName,
    /// A chore has an empty name.
    EmptyName,
    /// A group-merge rule has fewer than two distinct members.
    InvalidGroup,
    /// An exclusion window has no members or a zero-day span.
    InvalidWindow,
    /// A chore requires itself.
    SelfRequirement,
    /// Co-requirements form a cycle.
    CyclicRequirement,
    /// Daily capacity is zero.
    InvalidCapacity,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates the input data for a scheduling run.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    chores: &[Chore],
    rules: &RuleSet,
    config: &SchedulerConfig,
) -> ValidationResult {
    let mut errors = Vec::new();

    if config.capacity == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidCapacity,
            "Daily capacity must be greater than zero",
        ));
    }

    let mut names = HashSet::new();
    for chore in chores {
        if chore.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                "Chore with an empty name",
            ));
        }
        if !names.insert(chore.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate chore name: {}", chore.name),
            ));
        }
    }

    for rule in rules.rules() {
        match rule {
            PairingRule::GroupMerge { name, members } => {
                let distinct: HashSet<&str> = members.iter().map(String::as_str).collect();
                if distinct.len() < 2 || distinct.len() != members.len() {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidGroup,
                        format!("Group '{name}' needs at least two distinct members"),
                    ));
                }
                if names.contains(name.as_str()) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DuplicateName,
                        format!("Group '{name}' has the same name as a chore"),
                    ));
                }
            }
            PairingRule::CoRequirement { chore, requires } if chore == requires => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SelfRequirement,
                    format!("Chore '{chore}' requires itself"),
                ));
            }
            PairingRule::ExclusionWindow {
                category,
                members,
                days,
                ..
            } => {
                if members.is_empty() || *days == 0 {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidWindow,
                        format!("Window '{category}' needs members and a span of at least one day"),
                    ));
                }
            }
            _ => {}
        }
    }

    if let Some(cycle_err) = detect_cycles(rules) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles in the co-requirement graph using DFS.
///
/// # Algorithm
/// Topological sort via DFS. If a back-edge is found (visiting a node
/// currently in the recursion stack), a cycle exists. Self-loops are
/// reported separately and skipped here.
fn detect_cycles(rules: &RuleSet) -> Option<ValidationError> {
    let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut nodes: Vec<&str> = Vec::new();

    for (chore, requires) in rules.co_requirements() {
        if chore == requires {
            continue;
        }
        adj.entry(chore).or_default().push(requires);
        for node in [chore, requires] {
            if !nodes.contains(&node) {
                nodes.push(node);
            }
        }
    }

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    for &node in &nodes {
        if !visited.contains(node) && has_cycle_dfs(node, &adj, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicRequirement,
                format!("Circular co-requirement involving chore '{node}'"),
            ));
        }
    }

    None
}

fn has_cycle_dfs<'a>(
    node: &'a str,
    adj: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    in_stack: &mut HashSet<&'a str>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(neighbors) = adj.get(node) {
        for &next in neighbors {
            if in_stack.contains(next) {
                return true; // Back edge → cycle
            }
            if !visited.contains(next) && has_cycle_dfs(next, adj, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(node);
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_chores() -> Vec<Chore> {
        vec![
            Chore::new("sweep").with_frequency(4).with_weight(3),
            Chore::new("mop").with_frequency(4).with_weight(2),
            Chore::new("tidy").with_frequency(30).with_weight(1),
        ]
    }

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result.unwrap_err().into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_input() {
        let rules = RuleSet::new()
            .with_rule(PairingRule::merge_pair("sweep", "mop"))
            .with_rule(PairingRule::co_requirement("mop", "sweep"))
            .with_rule(PairingRule::exclusion_window("floors", vec!["sweep".into()], 7));
        assert!(validate_input(&sample_chores(), &rules, &SchedulerConfig::weighted()).is_ok());
    }

    #[test]
    fn test_missing_member_is_not_an_error() {
        let rules = RuleSet::new().with_rule(PairingRule::merge_pair("sweep", "vacuum"));
        assert!(validate_input(&sample_chores(), &rules, &SchedulerConfig::weighted()).is_ok());
    }

    #[test]
    fn test_duplicate_chore_name() {
        let mut chores = sample_chores();
        chores.push(Chore::new("sweep"));
        let k = kinds(validate_input(&chores, &RuleSet::new(), &SchedulerConfig::weighted()));
        assert_eq!(k, vec![ValidationErrorKind::DuplicateName]);
    }

    #[test]
    fn test_empty_name() {
        let chores = vec![Chore::new("  ")];
        let k = kinds(validate_input(&chores, &RuleSet::new(), &SchedulerConfig::weighted()));
        assert!(k.contains(&ValidationErrorKind::EmptyName));
    }

    #[test]
    fn test_invalid_group() {
        let rules = RuleSet::new()
            .with_rule(PairingRule::group_merge("solo", vec!["sweep".into()]))
            .with_rule(PairingRule::group_merge("twice", vec!["mop".into(), "mop".into()]));
        let k = kinds(validate_input(&sample_chores(), &rules, &SchedulerConfig::weighted()));
        assert_eq!(k, vec![ValidationErrorKind::InvalidGroup, ValidationErrorKind::InvalidGroup]);
    }

    #[test]
    fn test_group_name_collides_with_chore() {
        let rules = RuleSet::new()
            .with_rule(PairingRule::group_merge("tidy", vec!["sweep".into(), "mop".into()]));
        let k = kinds(validate_input(&sample_chores(), &rules, &SchedulerConfig::weighted()));
        assert_eq!(k, vec![ValidationErrorKind::DuplicateName]);
    }

    #[test]
    fn test_invalid_window() {
        let rules = RuleSet::new()
            .with_rule(PairingRule::exclusion_window("dust", vec!["tidy".into()], 0))
            .with_rule(PairingRule::exclusion_window("empty", vec![], 7));
        let k = kinds(validate_input(&sample_chores(), &rules, &SchedulerConfig::weighted()));
        assert_eq!(k.len(), 2);
        assert!(k.iter().all(|k| *k == ValidationErrorKind::InvalidWindow));
    }

    #[test]
    fn test_self_requirement() {
        let rules = RuleSet::new().with_rule(PairingRule::co_requirement("mop", "mop"));
        let k = kinds(validate_input(&sample_chores(), &rules, &SchedulerConfig::weighted()));
        assert_eq!(k, vec![ValidationErrorKind::SelfRequirement]);
    }

    #[test]
    fn test_cyclic_requirement() {
        // mop → sweep → tidy → mop
        let rules = RuleSet::new()
            .with_rule(PairingRule::co_requirement("mop", "sweep"))
            .with_rule(PairingRule::co_requirement("sweep", "tidy"))
            .with_rule(PairingRule::co_requirement("tidy", "mop"));
        let k = kinds(validate_input(&sample_chores(), &rules, &SchedulerConfig::weighted()));
        assert_eq!(k, vec![ValidationErrorKind::CyclicRequirement]);
    }

    #[test]
    fn test_no_cycle_in_chain() {
        let rules = RuleSet::new()
            .with_rule(PairingRule::co_requirement("mop", "sweep"))
            .with_rule(PairingRule::co_requirement("sweep", "tidy"));
        assert!(validate_input(&sample_chores(), &rules, &SchedulerConfig::weighted()).is_ok());
    }

    #[test]
    fn test_zero_capacity_and_multiple_errors() {
        let mut chores = sample_chores();
        chores.push(Chore::new("mop"));
        let config = SchedulerConfig::weighted().with_capacity(0);
        let errors = validate_input(&chores, &RuleSet::new(), &config).unwrap_err();
        assert!(errors.len() >= 2);
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::InvalidCapacity));
    }
}
