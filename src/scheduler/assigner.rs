//! Day assignment.
//!
//! # Algorithm
//!
//! Occurrences are grouped by chore name, in order of first appearance.
//! For each chore, with `freq` of its occurrences still pending:
//!
//! 1. `interval = 30 / freq`; a stagger offset in `[0, interval)` is taken
//!    from a SHA-256 digest of the name, so chores with the same frequency
//!    do not all start on day 0.
//! 2. The i-th occurrence prefers day `round(offset + i * interval) mod 30`.
//! 3. [`Legality::find_day`] scans forward from there, then falls back to a
//!    whole-month scan with the adjacency rule relaxed.
//! 4. Occurrences with no legal day go to the unplaced list.
//!
//! Co-required partners are pulled from later chores' pending queues, so
//! a chore processed after its dependants may have fewer occurrences left
//! to place on its own turn. Earlier chores claim tight days first.

use std::collections::VecDeque;

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::legality::{Legality, PartnerPool};
use crate::models::{DayTable, PlacedTask, RuleSet, TaskOccurrence, Warning};

/// Output of [`assign`].
#[derive(Debug, Clone, PartialEq)]
pub struct DayAssignment {
    pub table: DayTable,
    pub unplaced: Vec<TaskOccurrence>,
    pub warnings: Vec<Warning>,
}

/// Per-chore queues of occurrences not yet placed, in first-appearance order.
#[derive(Debug, Clone, Default)]
struct PendingQueues {
    queues: Vec<(String, VecDeque<TaskOccurrence>)>,
}

impl PendingQueues {
    fn from_occurrences(occurrences: Vec<TaskOccurrence>) -> Self {
        let mut pending = Self::default();
        for occurrence in occurrences {
            match pending
                .queues
                .iter_mut()
                .find(|(name, _)| *name == occurrence.chore)
            {
                Some((_, queue)) => queue.push_back(occurrence),
                None => pending
                    .queues
                    .push((occurrence.chore.clone(), VecDeque::from([occurrence]))),
            }
        }
        pending
    }

    fn take(&mut self, chore: &str) -> Option<TaskOccurrence> {
        self.queues
            .iter_mut()
            .find(|(name, _)| name == chore)
            .and_then(|(_, queue)| queue.pop_front())
    }
}

impl PartnerPool for PendingQueues {
    fn peek(&self, chore: &str) -> Option<&TaskOccurrence> {
        self.queues
            .iter()
            .find(|(name, _)| name == chore)
            .and_then(|(_, queue)| queue.front())
    }
}

/// Starting offset for a chore's evenly spaced occurrences.
///
/// Deterministic across runs and platforms; 0 when `interval < 1`.
pub fn stagger_offset(chore: &str, interval: f64) -> usize {
    let span = interval.floor();
    if span < 1.0 {
        return 0;
    }
    let digest = Sha256::digest(chore.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(head) % span as u64) as usize
}

/// Preferred day of the `i`-th occurrence.
pub fn preferred_day(offset: usize, i: usize, interval: f64, days: usize) -> usize {
    (offset as f64 + i as f64 * interval).round() as usize % days
}

/// Places occurrences onto a fresh table with the given capacity.
pub fn assign(occurrences: Vec<TaskOccurrence>, capacity: u32, rules: &RuleSet) -> DayAssignment {
    let mut table = DayTable::new(capacity);
    let (unplaced, warnings) = assign_into(&mut table, occurrences, rules);
    DayAssignment {
        table,
        unplaced,
        warnings,
    }
}

/// Places occurrences onto an existing table.
///
/// Returns the unplaced occurrences and a warning per partially placed chore.
pub fn assign_into(
    table: &mut DayTable,
    occurrences: Vec<TaskOccurrence>,
    rules: &RuleSet,
) -> (Vec<TaskOccurrence>, Vec<Warning>) {
    let legality = Legality::new(rules);
    let mut pending = PendingQueues::from_occurrences(occurrences);
    let mut unplaced = Vec::new();
    let mut warnings = Vec::new();
    let days = table.len();

    for qi in 0..pending.queues.len() {
        let chore = pending.queues[qi].0.clone();
        let freq = pending.queues[qi].1.len();
        if freq == 0 {
            continue;
        }
        let interval = days as f64 / freq as f64;
        let offset = stagger_offset(&chore, interval);
        let mut placed = 0usize;

        for i in 0..freq {
            let Some(occurrence) = pending.queues[qi].1.pop_front() else {
                break;
            };
            let preferred = preferred_day(offset, i, interval, days);

            match legality.find_day(table, preferred, &occurrence, &pending) {
                Some(placement) => {
                    for partner in &placement.partners {
                        if let Some(partner) = pending.take(partner) {
                            table.place(
                                placement.day,
                                PlacedTask::inserted_for(partner, chore.clone()),
                            );
                        }
                    }
                    table.place(placement.day, PlacedTask::new(occurrence));
                    placed += 1;
                }
                None => unplaced.push(occurrence),
            }
        }

        debug!(chore = %chore, freq, placed, offset, "assigned chore");
        if placed < freq {
            warn!("Could only place {placed}/{freq} for chore '{chore}'");
            warnings.push(Warning::partial_placement(
                chore.clone(),
                placed as u32,
                freq as u32,
            ));
        }
    }

    (unplaced, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PairingRule;

    fn occurrences(chore: &str, weight: u32, n: usize) -> Vec<TaskOccurrence> {
        (0..n).map(|_| TaskOccurrence::new(chore, weight)).collect()
    }

    fn days_with(table: &DayTable, chore: &str) -> Vec<usize> {
        (0..table.len())
            .filter(|&d| table.day(d).has_chore(chore))
            .collect()
    }

    #[test]
    fn test_stagger_offset_in_range_and_stable() {
        for name in ["sweep", "mop", "dust office", "trash"] {
            let a = stagger_offset(name, 7.5);
            assert!(a < 7);
            assert_eq!(a, stagger_offset(name, 7.5));
        }
        assert_eq!(stagger_offset("anything", 0.5), 0);
        assert_eq!(stagger_offset("anything", 1.0), 0);
    }

    #[test]
    fn test_preferred_day_spacing() {
        let days: Vec<usize> = (0..4).map(|i| preferred_day(2, i, 7.5, 30)).collect();
        assert_eq!(days, vec![2, 10, 17, 25]);
        assert_eq!(preferred_day(5, 1, 30.0, 30), 5);
    }

    #[test]
    fn test_even_spacing_single_chore() {
        let out = assign(occurrences("vacuum", 3, 4), 15, &RuleSet::new());
        let placed = days_with(&out.table, "vacuum");
        assert_eq!(placed.len(), 4);
        for pair in placed.windows(2) {
            let gap = pair[1] - pair[0];
            assert!((7..=8).contains(&gap), "gap {gap} in {placed:?}");
        }
        assert!(out.unplaced.is_empty());
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_co_requirement_sweep_then_mop() {
        let mut occ = occurrences("sweep", 3, 4);
        occ.extend(occurrences("mop", 2, 4));
        let rules = RuleSet::new().with_rule(PairingRule::co_requirement("mop", "sweep"));
        let out = assign(occ, 15, &rules);

        let sweep_days = days_with(&out.table, "sweep");
        let mop_days = days_with(&out.table, "mop");
        assert_eq!(sweep_days.len(), 4);
        assert_eq!(mop_days, sweep_days);
        for &d in &mop_days {
            assert_eq!(out.table.day(d).total_weight, 5);
        }
        assert!(out.unplaced.is_empty());
    }

    #[test]
    fn test_co_requirement_inserts_pending_partner() {
        let mut occ = occurrences("mop", 2, 4);
        occ.extend(occurrences("sweep", 3, 4));
        let rules = RuleSet::new().with_rule(PairingRule::co_requirement("mop", "sweep"));
        let out = assign(occ, 15, &rules);

        let sweep_days = days_with(&out.table, "sweep");
        assert_eq!(days_with(&out.table, "mop"), sweep_days);
        assert_eq!(sweep_days.len(), 4);
        for &d in &sweep_days {
            let sweep = out.table.day(d).tasks.iter().find(|t| t.chore() == "sweep").unwrap();
            assert_eq!(sweep.inserted_for.as_deref(), Some("mop"));
        }
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_overweight_chore_all_unplaced() {
        let out = assign(occurrences("move furniture", 20, 3), 15, &RuleSet::new());
        assert_eq!(out.unplaced.len(), 3);
        assert_eq!(out.table.counts().iter().sum::<usize>(), 0);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_fallback_places_high_frequency_chore() {
        // 20 occurrences cannot avoid consecutive days; the relaxed scan
        // still finds a day for each.
        let out = assign(occurrences("tidy", 2, 20), 15, &RuleSet::new());
        assert_eq!(days_with(&out.table, "tidy").len(), 20);
        assert!(out.unplaced.is_empty());
    }

    #[test]
    fn test_more_than_thirty_overflows() {
        let out = assign(occurrences("wipe", 1, 33), 15, &RuleSet::new());
        assert_eq!(days_with(&out.table, "wipe").len(), 30);
        assert_eq!(out.unplaced.len(), 3);
    }

    #[test]
    fn test_capacity_never_exceeded() {
        let mut occ = occurrences("laundry", 6, 8);
        occ.extend(occurrences("dishes", 4, 25));
        occ.extend(occurrences("bathroom", 5, 10));
        let out = assign(occ, 10, &RuleSet::new());
        for day in out.table.days() {
            assert!(day.total_weight <= 10, "day {} at {}", day.index, day.total_weight);
        }
        let placed: usize = out.table.counts().iter().sum();
        assert_eq!(placed + out.unplaced.len(), 43);
    }

    #[test]
    fn test_window_limits_category() {
        let mut occ = occurrences("dust office", 2, 2);
        occ.extend(occurrences("dust bedroom", 2, 2));
        let rules = RuleSet::new().with_rule(PairingRule::exclusion_window(
            "dust",
            vec!["dust office".into(), "dust bedroom".into()],
            7,
        ));
        let out = assign(occ, 15, &rules);
        let mut dusted: Vec<usize> = days_with(&out.table, "dust office");
        dusted.extend(days_with(&out.table, "dust bedroom"));
        assert_eq!(dusted.len(), 4);
        let mut weeks: Vec<usize> = dusted.iter().map(|d| d / 7).collect();
        weeks.sort_unstable();
        weeks.dedup();
        assert_eq!(weeks.len(), 4);
    }

    #[test]
    fn test_assignment_is_deterministic() {
        let build = || {
            let mut occ = occurrences("sweep", 3, 4);
            occ.extend(occurrences("trash", 1, 8));
            occ.extend(occurrences("tidy", 2, 26));
            assign(occ, 15, &RuleSet::new())
        };
        assert_eq!(build(), build());
    }
}
