//! Task expansion.
//!
//! # Algorithm
//!
//! 1. For each group-merge rule, in rule order, take the members present in
//!    the chore list. Skip the rule when none is present. Emit
//!    `min(remaining frequency)` combined occurrences weighted by the sum of
//!    member weights, and subtract that count from every member.
//! 2. Emit one occurrence per remaining unit of frequency for every chore,
//!    in chore order.
//!
//! Rules that share a member (one general chore merged with several
//! specific ones) draw on the member's remaining frequency in turn.
//!
//! [`resolve_rules`] applies the same tolerance to co-requirements: one that
//! names an undefined chore is dropped with a warning instead of leaving its
//! dependant unplaceable.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::models::{Chore, PairingRule, RuleSet, TaskOccurrence, Warning};

/// Output of [`expand`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expansion {
    /// Occurrences for the month: merged groups first, then leftovers.
    pub occurrences: Vec<TaskOccurrence>,
    /// Rules that referenced missing chores.
    pub warnings: Vec<Warning>,
}

/// Expands chore definitions into the month's occurrences.
///
/// The chore list is not modified; remaining frequencies are tracked
/// locally, so expanding the same input twice yields the same output.
pub fn expand(chores: &[Chore], rules: &RuleSet) -> Expansion {
    let mut index: HashMap<&str, usize> = HashMap::new();
    for (i, chore) in chores.iter().enumerate() {
        index.entry(chore.name.as_str()).or_insert(i);
    }

    let mut remaining: Vec<u32> = chores.iter().map(|c| c.frequency).collect();
    let mut expansion = Expansion::default();

    for (group, members) in rules.group_merges() {
        let mut present = Vec::with_capacity(members.len());
        for member in members {
            match index.get(member.as_str()) {
                Some(&i) if !present.contains(&i) => present.push(i),
                Some(_) => {}
                None => {
                    warn!(rule = group, member = %member, "group member not defined; rule uses present members only");
                    expansion
                        .warnings
                        .push(Warning::missing_rule_member(group, member));
                }
            }
        }
        if present.is_empty() {
            debug!(rule = group, "no group member defined; rule skipped");
            continue;
        }

        let freq = present.iter().map(|&i| remaining[i]).min().unwrap_or(0);
        // Saturates: an oversized group is unplaceable under any finite capacity.
        let weight = present
            .iter()
            .try_fold(0u32, |acc, &i| acc.checked_add(chores[i].weight))
            .unwrap_or(u32::MAX);
        let names: Vec<String> = present.iter().map(|&i| chores[i].name.clone()).collect();
        let exempt = rules.allows_adjacent(group)
            || present
                .iter()
                .all(|&i| chores[i].adjacency_exempt || rules.allows_adjacent(&chores[i].name));

        for _ in 0..freq {
            expansion.occurrences.push(
                TaskOccurrence::combined(group, weight, names.clone()).with_adjacency_exempt(exempt),
            );
        }
        for &i in &present {
            remaining[i] -= freq;
        }
        debug!(rule = group, freq, weight, "merged group");
    }

    for (chore, &left) in chores.iter().zip(&remaining) {
        let exempt = chore.adjacency_exempt || rules.allows_adjacent(&chore.name);
        for _ in 0..left {
            expansion.occurrences.push(
                TaskOccurrence::new(chore.name.clone(), chore.weight).with_adjacency_exempt(exempt),
            );
        }
    }

    expansion
}

/// Drops co-requirements that name a chore absent from the input.
///
/// A name counts as present when a chore defines it or a group merge with
/// at least one present member produces it. Each dropped rule yields a
/// [`Warning::missing_rule_member`] per absent name; all other rules are
/// kept in order.
pub fn resolve_rules(chores: &[Chore], rules: &RuleSet) -> (RuleSet, Vec<Warning>) {
    let mut known: HashSet<&str> = chores.iter().map(|c| c.name.as_str()).collect();
    for (group, members) in rules.group_merges() {
        if members.iter().any(|m| known.contains(m.as_str())) {
            known.insert(group);
        }
    }

    let mut resolved = RuleSet::new();
    let mut warnings = Vec::new();
    for rule in rules.rules() {
        if let PairingRule::CoRequirement { chore, requires } = rule {
            let missing: Vec<&str> = [chore.as_str(), requires.as_str()]
                .into_iter()
                .filter(|name| !known.contains(name))
                .collect();
            if !missing.is_empty() {
                let label = format!("{chore} requires {requires}");
                for member in missing {
                    warn!(rule = %label, member, "co-requirement names undefined chore; rule dropped");
                    warnings.push(Warning::missing_rule_member(label.clone(), member));
                }
                continue;
            }
        }
        resolved.add(rule.clone());
    }
    (resolved, warnings)
}
