//! Schedule (solution) model.
//!
//! The month is a table of 30 days, each holding the occurrences placed on
//! it. The table is built by the assigner and mutated in place by the
//! rebalancer; the finished [`Schedule`] adds the unplaced list and any
//! warnings raised along the way.

use serde::{Deserialize, Serialize};

use super::TaskOccurrence;

/// Days in the scheduling month.
pub const DAYS_IN_MONTH: usize = 30;

/// An occurrence as placed on a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTask {
    #[serde(flatten)]
    pub occurrence: TaskOccurrence,
    /// Set when the occurrence was pulled in to satisfy another chore's
    /// co-requirement; names the requiring chore.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inserted_for: Option<String>,
}

impl PlacedTask {
    /// Wraps an occurrence placed on its own account.
    pub fn new(occurrence: TaskOccurrence) -> Self {
        Self {
            occurrence,
            inserted_for: None,
        }
    }

    /// Wraps an occurrence inserted for `chore`'s co-requirement.
    pub fn inserted_for(occurrence: TaskOccurrence, chore: impl Into<String>) -> Self {
        Self {
            occurrence,
            inserted_for: Some(chore.into()),
        }
    }

    #[inline]
    pub fn chore(&self) -> &str {
        &self.occurrence.chore
    }

    #[inline]
    pub fn weight(&self) -> u32 {
        self.occurrence.weight
    }
}

/// The occurrences placed on one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// Zero-based day index.
    pub index: usize,
    /// Placed occurrences, in placement order.
    pub tasks: Vec<PlacedTask>,
    /// Sum of the placed weights.
    pub total_weight: u32,
}

impl DaySchedule {
    /// Creates an empty day.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            tasks: Vec::new(),
            total_weight: 0,
        }
    }

    /// Number of occurrences on this day.
    pub fn count(&self) -> usize {
        self.tasks.len()
    }

    /// Whether an occurrence with exactly this name is on the day.
    pub fn has_chore(&self, chore: &str) -> bool {
        self.tasks.iter().any(|t| t.chore() == chore)
    }

    /// Whether any occurrence on the day performs `chore`.
    pub fn covers(&self, chore: &str) -> bool {
        self.tasks.iter().any(|t| t.occurrence.covers(chore))
    }

    /// Tasks ordered ascending by weight, ties by name.
    pub fn sorted_by_weight(&self) -> Vec<&PlacedTask> {
        let mut tasks: Vec<&PlacedTask> = self.tasks.iter().collect();
        tasks.sort_by(|a, b| a.weight().cmp(&b.weight()).then_with(|| a.chore().cmp(b.chore())));
        tasks
    }

    fn push(&mut self, task: PlacedTask) {
        self.total_weight = self.total_weight.saturating_add(task.weight());
        self.tasks.push(task);
    }

    fn insert(&mut self, position: usize, task: PlacedTask) {
        self.total_weight = self.total_weight.saturating_add(task.weight());
        let position = position.min(self.tasks.len());
        self.tasks.insert(position, task);
    }

    fn remove(&mut self, position: usize) -> PlacedTask {
        let task = self.tasks.remove(position);
        // Recount: the running total may have saturated.
        self.total_weight = self
            .tasks
            .iter()
            .fold(0u32, |total, t| total.saturating_add(t.weight()));
        task
    }
}

/// Mutable day-by-day table shared by the assigner and the rebalancer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTable {
    days: Vec<DaySchedule>,
    capacity: u32,
}

impl DayTable {
    /// Creates an empty month with the given per-day weight limit.
    pub fn new(capacity: u32) -> Self {
        Self {
            days: (0..DAYS_IN_MONTH).map(DaySchedule::new).collect(),
            capacity,
        }
    }

    /// Per-day weight limit.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Number of days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Always false; a month has days.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Read access to one day.
    pub fn day(&self, day: usize) -> &DaySchedule {
        &self.days[day]
    }

    /// All days in order.
    pub fn days(&self) -> &[DaySchedule] {
        &self.days
    }

    /// Whether `weight` more fits on the day.
    pub fn fits(&self, day: usize, weight: u32) -> bool {
        self.days[day]
            .total_weight
            .checked_add(weight)
            .is_some_and(|total| total <= self.capacity)
    }

    /// The days before and after `day`, wrapping around the month.
    pub fn neighbors(&self, day: usize) -> [usize; 2] {
        let n = self.days.len();
        [(day + n - 1) % n, (day + 1) % n]
    }

    /// Appends a task to a day.
    ///
    /// Does not check capacity; callers test [`fits`](Self::fits) first.
    /// The day total saturates at `u32::MAX`.
    pub fn place(&mut self, day: usize, task: PlacedTask) {
        self.days[day].push(task);
    }

    /// Inserts a task at a position within a day.
    pub fn insert(&mut self, day: usize, position: usize, task: PlacedTask) {
        self.days[day].insert(position, task);
    }

    /// Removes and returns the task at a position within a day.
    pub fn remove(&mut self, day: usize, position: usize) -> PlacedTask {
        self.days[day].remove(position)
    }

    /// Marks occurrences on a day that were inserted for `chore` as
    /// standing on their own.
    pub fn release_inserted(&mut self, day: usize, chore: &str) {
        for task in &mut self.days[day].tasks {
            if task.inserted_for.as_deref() == Some(chore) {
                task.inserted_for = None;
            }
        }
    }

    /// Occurrence counts per day.
    pub fn counts(&self) -> Vec<usize> {
        self.days.iter().map(DaySchedule::count).collect()
    }

    /// Lowest-indexed day with the most occurrences, and the lowest-indexed
    /// day with the fewest.
    pub fn extremes(&self) -> (usize, usize) {
        let mut max_day = 0;
        let mut min_day = 0;
        for (i, d) in self.days.iter().enumerate() {
            if d.count() > self.days[max_day].count() {
                max_day = i;
            }
            if d.count() < self.days[min_day].count() {
                min_day = i;
            }
        }
        (max_day, min_day)
    }

    /// Difference between the largest and smallest day counts.
    pub fn spread(&self) -> usize {
        let (max_day, min_day) = self.extremes();
        self.days[max_day].count() - self.days[min_day].count()
    }

    /// Consumes the table, returning its days.
    pub fn into_days(self) -> Vec<DaySchedule> {
        self.days
    }
}

/// A finished monthly schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// One entry per day of the month.
    pub days: Vec<DaySchedule>,
    /// Occurrences no legal day could take.
    pub unplaced: Vec<TaskOccurrence>,
    /// Recoverable problems met while building the schedule.
    pub warnings: Vec<Warning>,
}

impl Schedule {
    /// Creates a schedule from a filled table.
    pub fn new(table: DayTable, unplaced: Vec<TaskOccurrence>) -> Self {
        Self {
            days: table.into_days(),
            unplaced,
            warnings: Vec::new(),
        }
    }

    /// Adds a warning.
    pub fn add_warning(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    /// Whether every occurrence was placed.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Total occurrences placed.
    pub fn placed_count(&self) -> usize {
        self.days.iter().map(DaySchedule::count).sum()
    }

    /// Days (zero-based) holding an occurrence named `chore`.
    pub fn days_with(&self, chore: &str) -> Vec<usize> {
        self.days
            .iter()
            .filter(|d| d.has_chore(chore))
            .map(|d| d.index)
            .collect()
    }

    /// Number of placed occurrences named `chore`.
    pub fn placed_count_for(&self, chore: &str) -> usize {
        self.days
            .iter()
            .flat_map(|d| &d.tasks)
            .filter(|t| t.chore() == chore)
            .count()
    }

    /// Number of unplaced occurrences named `chore`.
    pub fn unplaced_count_for(&self, chore: &str) -> usize {
        self.unplaced.iter().filter(|o| o.chore == chore).count()
    }

    /// Unplaced occurrences ordered ascending by weight, ties by name.
    pub fn unplaced_sorted(&self) -> Vec<&TaskOccurrence> {
        let mut unplaced: Vec<&TaskOccurrence> = self.unplaced.iter().collect();
        unplaced.sort_by(|a, b| a.weight.cmp(&b.weight).then_with(|| a.chore.cmp(&b.chore)));
        unplaced
    }
}

/// A recoverable scheduling problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Type of warning.
    pub kind: WarningKind,
    /// Chore or rule the warning concerns.
    pub subject: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// An input row's interval label was not recognised; the chore was skipped.
    UnknownCadence,
    /// Not every occurrence of a chore found a legal day.
    PartialPlacement { placed: u32, requested: u32 },
    /// A group-merge rule names a chore missing from the input.
    MissingRuleMember,
}

impl Warning {
    /// Creates an unknown-cadence warning.
    pub fn unknown_cadence(chore: impl Into<String>, label: &str) -> Self {
        let chore = chore.into();
        Self {
            kind: WarningKind::UnknownCadence,
            message: format!("Unknown interval '{label}' for chore '{chore}', skipping"),
            subject: chore,
        }
    }

    /// Creates a partial-placement warning.
    pub fn partial_placement(chore: impl Into<String>, placed: u32, requested: u32) -> Self {
        let chore = chore.into();
        Self {
            kind: WarningKind::PartialPlacement { placed, requested },
            message: format!("Could only place {placed}/{requested} for chore '{chore}'"),
            subject: chore,
        }
    }

    /// Creates a missing-rule-member warning.
    pub fn missing_rule_member(rule: impl Into<String>, member: &str) -> Self {
        let rule = rule.into();
        Self {
            kind: WarningKind::MissingRuleMember,
            message: format!("Rule '{rule}' references unknown chore '{member}'"),
            subject: rule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> DayTable {
        let mut t = DayTable::new(15);
        t.place(0, PlacedTask::new(TaskOccurrence::new("sweep", 3)));
        t.place(0, PlacedTask::inserted_for(TaskOccurrence::new("dust", 1), "tidy"));
        t.place(5, PlacedTask::new(TaskOccurrence::new("mop", 2)));
        t
    }

    #[test]
    fn test_table_weights() {
        let t = sample_table();
        assert_eq!(t.len(), DAYS_IN_MONTH);
        assert_eq!(t.day(0).total_weight, 4);
        assert_eq!(t.day(5).total_weight, 2);
        assert!(t.fits(0, 11));
        assert!(!t.fits(0, 12));
    }

    #[test]
    fn test_fits_does_not_overflow() {
        let mut t = DayTable::new(u32::MAX);
        t.place(0, PlacedTask::new(TaskOccurrence::new("a", u32::MAX - 1)));
        assert!(t.fits(0, 1));
        assert!(!t.fits(0, 2));
    }

    #[test]
    fn test_day_total_saturates() {
        let mut t = DayTable::new(u32::MAX);
        t.place(3, PlacedTask::new(TaskOccurrence::new("a", u32::MAX)));
        t.place(3, PlacedTask::new(TaskOccurrence::new("b", 7)));
        assert_eq!(t.day(3).total_weight, u32::MAX);
        assert!(!t.fits(3, 1));

        t.remove(3, 0);
        assert_eq!(t.day(3).total_weight, 7);
    }

    #[test]
    fn test_neighbors_wrap() {
        let t = DayTable::new(15);
        assert_eq!(t.neighbors(0), [29, 1]);
        assert_eq!(t.neighbors(29), [28, 0]);
        assert_eq!(t.neighbors(10), [9, 11]);
    }

    #[test]
    fn test_remove_and_insert_keep_totals() {
        let mut t = sample_table();
        let task = t.remove(0, 0);
        assert_eq!(task.chore(), "sweep");
        assert_eq!(t.day(0).total_weight, 1);
        t.insert(0, 0, task);
        assert_eq!(t.day(0).total_weight, 4);
        assert_eq!(t.day(0).tasks[0].chore(), "sweep");
    }

    #[test]
    fn test_extremes_and_spread() {
        let t = sample_table();
        let (max_day, min_day) = t.extremes();
        assert_eq!(max_day, 0);
        assert_eq!(min_day, 1);
        assert_eq!(t.spread(), 2);
    }

    #[test]
    fn test_day_sorted_by_weight() {
        let t = sample_table();
        let names: Vec<&str> = t.day(0).sorted_by_weight().iter().map(|p| p.chore()).collect();
        assert_eq!(names, vec!["dust", "sweep"]);
    }

    #[test]
    fn test_schedule_counts() {
        let s = Schedule::new(sample_table(), vec![TaskOccurrence::new("mop", 2)]);
        assert_eq!(s.placed_count(), 3);
        assert_eq!(s.placed_count_for("mop"), 1);
        assert_eq!(s.unplaced_count_for("mop"), 1);
        assert_eq!(s.days_with("sweep"), vec![0]);
        assert!(!s.is_complete());
    }

    #[test]
    fn test_warning_factories() {
        let w = Warning::partial_placement("mop", 3, 4);
        assert_eq!(w.kind, WarningKind::PartialPlacement { placed: 3, requested: 4 });
        assert_eq!(w.subject, "mop");
        assert!(w.message.contains("3/4"));

        let w = Warning::unknown_cadence("windows", "quarterly");
        assert_eq!(w.kind, WarningKind::UnknownCadence);

        let w = Warning::missing_rule_member("sweep + mop", "mop");
        assert_eq!(w.kind, WarningKind::MissingRuleMember);
        assert!(w.message.contains("mop"));
    }

    #[test]
    fn test_placed_task_serializes_flat() {
        let p = PlacedTask::new(TaskOccurrence::new("sweep", 3));
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["chore"], "sweep");
        assert_eq!(json["weight"], 3);
        assert!(json.get("inserted_for").is_none());
    }
}
