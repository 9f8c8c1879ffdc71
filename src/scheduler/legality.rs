//! Placement legality and the place-with-retry scan.
//!
//! A day is legal for an occurrence when:
//!
//! 1. the day's weight plus the occurrence (and any partner pulled in with
//!    it) stays within capacity;
//! 2. no occurrence with the same name is on the day, nor on either
//!    neighbouring day (wrapping), unless adjacency is relaxed or the
//!    occurrence is exempt;
//! 3. no exclusion window covering the occurrence already holds another
//!    covered occurrence;
//! 4. every chore it requires is on the day already, or a partner from the
//!    pool can be placed alongside it under rules 1-3.
//!
//! The same predicate serves initial placement (pool = pending
//! occurrences), fallback placement (adjacency relaxed) and rebalancing
//! moves (pool = the partner travelling with the occurrence).

use crate::config::SCAN_DAYS;
use crate::models::{DayTable, RuleSet, TaskOccurrence};

/// Whether the consecutive-day rule applies to a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjacency {
    Enforced,
    Relaxed,
}

/// Source of partners that can be inserted to satisfy a co-requirement.
pub trait PartnerPool {
    /// An available occurrence named exactly `chore`.
    fn peek(&self, chore: &str) -> Option<&TaskOccurrence>;
}

/// A pool with nothing in it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPartners;

impl PartnerPool for NoPartners {
    fn peek(&self, _chore: &str) -> Option<&TaskOccurrence> {
        None
    }
}

impl PartnerPool for [TaskOccurrence] {
    fn peek(&self, chore: &str) -> Option<&TaskOccurrence> {
        self.iter().find(|o| o.chore == chore)
    }
}

/// A legal day and the partners that must be inserted with the occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub day: usize,
    /// Chore names to take from the pool, in requirement order.
    pub partners: Vec<String>,
    pub adjacency: Adjacency,
}

/// Evaluates placement rules against a day table.
#[derive(Debug, Clone, Copy)]
pub struct Legality<'a> {
    rules: &'a RuleSet,
}

impl<'a> Legality<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Checks rules 1-3 for a lone occurrence, with `extra_weight` already
    /// committed to the day.
    pub fn admits(
        &self,
        table: &DayTable,
        day: usize,
        occurrence: &TaskOccurrence,
        extra_weight: u32,
        adjacency: Adjacency,
    ) -> bool {
        let Some(weight) = occurrence.weight.checked_add(extra_weight) else {
            return false;
        };
        if !table.fits(day, weight) {
            return false;
        }
        if table.day(day).has_chore(&occurrence.chore) {
            return false;
        }
        if adjacency == Adjacency::Enforced
            && !occurrence.adjacency_exempt
            && table
                .neighbors(day)
                .iter()
                .any(|&n| table.day(n).has_chore(&occurrence.chore))
        {
            return false;
        }
        self.window_clear(table, day, occurrence)
    }

    /// Whether no exclusion window covering the occurrence is occupied.
    pub fn window_clear(&self, table: &DayTable, day: usize, occurrence: &TaskOccurrence) -> bool {
        self.rules.windows().filter(|w| w.covers(occurrence)).all(|w| {
            (0..table.len())
                .filter(|&d| w.kind.same_window(day, d, w.days))
                .all(|d| !table.day(d).tasks.iter().any(|t| w.covers(&t.occurrence)))
        })
    }

    /// Full check including co-requirements.
    ///
    /// Returns the partners to insert, or `None` when the day is illegal.
    pub fn plan<P: PartnerPool + ?Sized>(
        &self,
        table: &DayTable,
        day: usize,
        occurrence: &TaskOccurrence,
        adjacency: Adjacency,
        pool: &P,
    ) -> Option<Vec<String>> {
        if !self.admits(table, day, occurrence, 0, adjacency) {
            return None;
        }

        let mut partners: Vec<&TaskOccurrence> = Vec::new();
        let mut committed = occurrence.weight;
        for required in self.rules.requirements_of(occurrence) {
            if table.day(day).covers(required) {
                continue;
            }
            let partner = pool.peek(required)?;
            // One level deep: the partner's own requirements must already
            // be met by the day or by what is being placed with it.
            let satisfied = self.rules.requirements_of(partner).iter().all(|r| {
                table.day(day).covers(r)
                    || occurrence.covers(r)
                    || partners.iter().any(|p| p.covers(r))
            });
            if !satisfied
                || !self.admits(table, day, partner, committed, adjacency)
                || self.clashes(occurrence, partner)
                || partners.iter().any(|p| self.clashes(p, partner))
            {
                return None;
            }
            committed = committed.checked_add(partner.weight)?;
            partners.push(partner);
        }

        Some(partners.into_iter().map(|p| p.chore.clone()).collect())
    }

    /// Whether two occurrences cannot share a day.
    pub fn clashes(&self, a: &TaskOccurrence, b: &TaskOccurrence) -> bool {
        a.chore == b.chore || self.rules.windows().any(|w| w.covers(a) && w.covers(b))
    }

    /// Place-with-retry: scans [`SCAN_DAYS`] days forward from `preferred`
    /// under the full rules, then the whole month from day 0 with the
    /// adjacency rule relaxed.
    pub fn find_day<P: PartnerPool + ?Sized>(
        &self,
        table: &DayTable,
        preferred: usize,
        occurrence: &TaskOccurrence,
        pool: &P,
    ) -> Option<Placement> {
        let days = table.len();
        scan_days(preferred, SCAN_DAYS, days, |day| {
            self.plan(table, day, occurrence, Adjacency::Enforced, pool)
        })
        .map(|(day, partners)| Placement {
            day,
            partners,
            adjacency: Adjacency::Enforced,
        })
        .or_else(|| {
            scan_days(0, days, days, |day| {
                self.plan(table, day, occurrence, Adjacency::Relaxed, pool)
            })
            .map(|(day, partners)| Placement {
                day,
                partners,
                adjacency: Adjacency::Relaxed,
            })
        })
    }
}

/// Probes up to `span` days starting at `start`, wrapping at `days`, and
/// returns the first day the probe accepts.
pub fn scan_days<T>(
    start: usize,
    span: usize,
    days: usize,
    mut probe: impl FnMut(usize) -> Option<T>,
) -> Option<(usize, T)> {
    if days == 0 {
        return None;
    }
    (0..span)
        .map(|offset| (start + offset) % days)
        .find_map(|day| probe(day).map(|found| (day, found)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PairingRule, PlacedTask};

    fn place(table: &mut DayTable, day: usize, chore: &str, weight: u32) {
        table.place(day, PlacedTask::new(TaskOccurrence::new(chore, weight)));
    }

    #[test]
    fn test_scan_wraps() {
        let hit = scan_days(28, 30, 30, |d| (d == 1).then_some(d * 10));
        assert_eq!(hit, Some((1, 10)));
        assert_eq!(scan_days(0, 30, 30, |_| None::<()>), None);
    }

    #[test]
    fn test_scan_respects_span() {
        let mut probed = Vec::new();
        let hit = scan_days(5, 3, 30, |d| {
            probed.push(d);
            None::<()>
        });
        assert!(hit.is_none());
        assert_eq!(probed, vec![5, 6, 7]);
    }

    #[test]
    fn test_capacity_rule() {
        let rules = RuleSet::new();
        let legality = Legality::new(&rules);
        let mut table = DayTable::new(10);
        place(&mut table, 0, "a", 8);
        let occ = TaskOccurrence::new("b", 3);
        assert!(!legality.admits(&table, 0, &occ, 0, Adjacency::Enforced));
        assert!(legality.admits(&table, 2, &occ, 0, Adjacency::Enforced));
        assert!(!legality.admits(&table, 2, &occ, 8, Adjacency::Enforced));
    }

    #[test]
    fn test_same_day_and_adjacent() {
        let rules = RuleSet::new();
        let legality = Legality::new(&rules);
        let mut table = DayTable::new(15);
        place(&mut table, 0, "sweep", 3);
        let occ = TaskOccurrence::new("sweep", 3);

        assert!(!legality.admits(&table, 0, &occ, 0, Adjacency::Relaxed));
        assert!(!legality.admits(&table, 1, &occ, 0, Adjacency::Enforced));
        // Day 29 neighbours day 0.
        assert!(!legality.admits(&table, 29, &occ, 0, Adjacency::Enforced));
        assert!(legality.admits(&table, 1, &occ, 0, Adjacency::Relaxed));
        assert!(legality.admits(&table, 2, &occ, 0, Adjacency::Enforced));

        let exempt = occ.clone().with_adjacency_exempt(true);
        assert!(legality.admits(&table, 1, &exempt, 0, Adjacency::Enforced));
    }

    #[test]
    fn test_calendar_window() {
        let rules = RuleSet::new().with_rule(PairingRule::exclusion_window(
            "dust",
            vec!["dust office".into(), "dust bedroom".into()],
            7,
        ));
        let legality = Legality::new(&rules);
        let mut table = DayTable::new(15);
        place(&mut table, 8, "dust office", 2);
        let occ = TaskOccurrence::new("dust bedroom", 2);

        for day in 7..14 {
            assert!(!legality.admits(&table, day, &occ, 0, Adjacency::Enforced));
        }
        assert!(legality.admits(&table, 6, &occ, 0, Adjacency::Enforced));
        assert!(legality.admits(&table, 14, &occ, 0, Adjacency::Enforced));
        // Unrelated chores are unaffected.
        assert!(legality.admits(&table, 9, &TaskOccurrence::new("mop", 2), 0, Adjacency::Enforced));
    }

    #[test]
    fn test_co_requirement_present_or_inserted() {
        let rules = RuleSet::new().with_rule(PairingRule::co_requirement("mop", "sweep"));
        let legality = Legality::new(&rules);
        let mut table = DayTable::new(15);
        place(&mut table, 3, "sweep", 3);
        let mop = TaskOccurrence::new("mop", 2);

        assert_eq!(
            legality.plan(&table, 3, &mop, Adjacency::Enforced, &NoPartners),
            Some(vec![])
        );
        assert_eq!(legality.plan(&table, 10, &mop, Adjacency::Enforced, &NoPartners), None);

        let pool = vec![TaskOccurrence::new("sweep", 3)];
        assert_eq!(
            legality.plan(&table, 10, &mop, Adjacency::Enforced, pool.as_slice()),
            Some(vec!["sweep".to_string()])
        );
        // Day 4 is next to the sweep on day 3.
        assert_eq!(legality.plan(&table, 4, &mop, Adjacency::Enforced, pool.as_slice()), None);
    }

    #[test]
    fn test_partner_insertion_respects_combined_capacity() {
        let rules = RuleSet::new().with_rule(PairingRule::co_requirement("mop", "sweep"));
        let legality = Legality::new(&rules);
        let mut table = DayTable::new(15);
        place(&mut table, 10, "laundry", 11);
        let pool = vec![TaskOccurrence::new("sweep", 3)];
        let mop = TaskOccurrence::new("mop", 2);
        // 11 + 2 fits, 11 + 2 + 3 does not.
        assert!(legality.admits(&table, 10, &mop, 0, Adjacency::Enforced));
        assert_eq!(legality.plan(&table, 10, &mop, Adjacency::Enforced, pool.as_slice()), None);
    }

    #[test]
    fn test_find_day_falls_back_to_relaxed() {
        let rules = RuleSet::new();
        let legality = Legality::new(&rules);
        let mut table = DayTable::new(15);
        // Every even day holds "tidy": strict placement needs a day with both
        // neighbours free, which no longer exists.
        for day in (0..30).step_by(2) {
            place(&mut table, day, "tidy", 1);
        }
        let occ = TaskOccurrence::new("tidy", 1);
        let placement = legality.find_day(&table, 0, &occ, &NoPartners).unwrap();
        assert_eq!(placement.day, 1);
        assert_eq!(placement.adjacency, Adjacency::Relaxed);
    }

    #[test]
    fn test_find_day_none_when_over_capacity() {
        let rules = RuleSet::new();
        let legality = Legality::new(&rules);
        let table = DayTable::new(15);
        let occ = TaskOccurrence::new("move furniture", 20);
        assert!(legality.find_day(&table, 0, &occ, &NoPartners).is_none());
    }
}
