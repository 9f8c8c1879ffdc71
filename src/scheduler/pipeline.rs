//! End-to-end scheduling pipeline.
//!
//! # Algorithm
//!
//! 1. Drop co-requirements naming undefined chores, then expand chore
//!    definitions into occurrences (group merges first).
//! 2. Assign occurrences to days under capacity, adjacency, window and
//!    co-requirement rules.
//! 3. Optionally rebalance day counts.
//!
//! Never fails: problems surface as warnings and unplaced occurrences.

use tracing::info;

use super::{assign, expand, rebalance, resolve_rules, RebalanceReport};
use crate::config::SchedulerConfig;
use crate::models::{Chore, RuleSet, Schedule, Warning};

/// Input container for scheduling.
#[derive(Debug, Clone, Default)]
pub struct ScheduleRequest {
    /// Chore definitions in input order.
    pub chores: Vec<Chore>,
    /// Pairing rules; group merges apply in this order.
    pub rules: RuleSet,
    /// Warnings raised while loading the input, carried into the schedule.
    pub warnings: Vec<Warning>,
}

impl ScheduleRequest {
    /// Creates a request with no rules.
    pub fn new(chores: Vec<Chore>) -> Self {
        Self {
            chores,
            ..Default::default()
        }
    }

    /// Sets the rules.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Adds loader warnings.
    pub fn with_warnings(mut self, warnings: Vec<Warning>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

/// Runs expansion, assignment and rebalancing with one configuration.
///
/// # Example
///
/// ```
/// use chore_schedule::config::SchedulerConfig;
/// use chore_schedule::models::{Chore, PairingRule, RuleSet};
/// use chore_schedule::scheduler::{ChoreScheduler, ScheduleRequest};
///
/// let chores = vec![
///     Chore::new("sweep").with_frequency(4).with_weight(3),
///     Chore::new("mop").with_frequency(4).with_weight(2),
/// ];
/// let rules = RuleSet::new().with_rule(PairingRule::co_requirement("mop", "sweep"));
/// let request = ScheduleRequest::new(chores).with_rules(rules);
///
/// let scheduler = ChoreScheduler::new(SchedulerConfig::weighted());
/// let schedule = scheduler.schedule_request(&request);
/// assert_eq!(schedule.placed_count(), 8);
/// assert!(schedule.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChoreScheduler {
    config: SchedulerConfig,
}

impl ChoreScheduler {
    /// Creates a scheduler.
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Schedules chores under the given rules.
    pub fn schedule(&self, chores: &[Chore], rules: &RuleSet) -> Schedule {
        self.run(chores, rules).0
    }

    /// Schedules and also reports what the rebalancer did.
    pub fn run(&self, chores: &[Chore], rules: &RuleSet) -> (Schedule, Option<RebalanceReport>) {
        let (rules, rule_warnings) = resolve_rules(chores, rules);
        let rules = &rules;
        let expansion = expand(chores, rules);
        let total = expansion.occurrences.len();
        let mut assignment = assign(expansion.occurrences, self.config.capacity, rules);

        let report = self.config.rebalance.then(|| {
            rebalance(
                &mut assignment.table,
                rules,
                self.config.max_rebalance_rounds,
            )
        });

        let mut schedule = Schedule::new(assignment.table, assignment.unplaced);
        schedule.warnings.extend(rule_warnings);
        schedule.warnings.extend(expansion.warnings);
        schedule.warnings.extend(assignment.warnings);

        info!(
            chores = chores.len(),
            occurrences = total,
            placed = schedule.placed_count(),
            unplaced = schedule.unplaced.len(),
            "schedule built"
        );
        (schedule, report)
    }

    /// Schedules from a request, keeping its loader warnings first.
    pub fn schedule_request(&self, request: &ScheduleRequest) -> Schedule {
        let mut schedule = self.schedule(&request.chores, &request.rules);
        let mut warnings = request.warnings.clone();
        warnings.append(&mut schedule.warnings);
        schedule.warnings = warnings;
        schedule
    }
}
