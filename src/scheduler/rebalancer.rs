//! Load rebalancing by occurrence count.
//!
//! # Algorithm
//!
//! Each round takes the fullest and emptiest days (lowest index on ties).
//! If their counts differ by at most one the table is balanced. Otherwise
//! the fullest day's occurrences are tried in order and the first one that
//! can legally move to the emptiest day is moved. A round with no legal
//! move ends the run.
//!
//! An occurrence whose co-required partner is not already at the
//! destination takes the partner with it. A move of `k` occurrences is only
//! made when the count gap is at least `2k`, so every moved count stays
//! within the old `[min, max]` and the spread never grows. Anything another
//! occurrence on the source day still requires stays put.

use tracing::{debug, info};

use super::legality::{Adjacency, Legality};
use crate::models::{DayTable, PlacedTask, RuleSet, TaskOccurrence};

/// Outcome of a rebalancing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebalanceReport {
    /// Rounds started.
    pub rounds: usize,
    /// Moves made (a partner travelling along counts as part of one move).
    pub moves: usize,
    pub spread_before: usize,
    pub spread_after: usize,
}

/// Evens out day counts in place, for at most `max_rounds` rounds.
pub fn rebalance(table: &mut DayTable, rules: &RuleSet, max_rounds: usize) -> RebalanceReport {
    let mut report = RebalanceReport {
        spread_before: table.spread(),
        ..Default::default()
    };

    while report.rounds < max_rounds {
        let (max_day, min_day) = table.extremes();
        let spread = table.day(max_day).count() - table.day(min_day).count();
        if spread <= 1 {
            break;
        }
        report.rounds += 1;

        let moved = (0..table.day(max_day).count())
            .any(|position| try_move(table, rules, max_day, position, min_day, spread));
        if !moved {
            debug!(max_day, min_day, spread, "no movable occurrence");
            break;
        }
        report.moves += 1;
    }

    report.spread_after = table.spread();
    info!(
        rounds = report.rounds,
        moves = report.moves,
        before = report.spread_before,
        after = report.spread_after,
        "rebalanced day counts"
    );
    report
}

/// Whether every occurrence's requirements are covered within the day.
fn requirements_hold(rules: &RuleSet, tasks: &[PlacedTask]) -> bool {
    tasks.iter().all(|task| {
        rules
            .requirements_of(&task.occurrence)
            .iter()
            .all(|required| tasks.iter().any(|t| t.occurrence.covers(required)))
    })
}

/// Moves the occurrence at `position` on `src` (and any partner it needs)
/// to `dst` if legal. Leaves the table untouched otherwise.
fn try_move(
    table: &mut DayTable,
    rules: &RuleSet,
    src: usize,
    position: usize,
    dst: usize,
    spread: usize,
) -> bool {
    let moving = table.day(src).tasks[position].occurrence.clone();

    let mut partner_positions: Vec<usize> = Vec::new();
    for required in rules.requirements_of(&moving) {
        if table.day(dst).covers(required) {
            continue;
        }
        let found = table
            .day(src)
            .tasks
            .iter()
            .enumerate()
            .find(|(j, t)| *j != position && t.occurrence.covers(required))
            .map(|(j, _)| j);
        match found {
            Some(j) if !partner_positions.contains(&j) => partner_positions.push(j),
            Some(_) => {}
            None => return false,
        }
    }

    let k = 1 + partner_positions.len();
    if spread < 2 * k {
        return false;
    }

    let mut positions = partner_positions;
    positions.push(position);
    positions.sort_unstable_by(|a, b| b.cmp(a));
    let detached: Vec<(usize, PlacedTask)> = positions
        .iter()
        .map(|&p| (p, table.remove(src, p)))
        .collect();

    let partners: Vec<TaskOccurrence> = detached
        .iter()
        .filter(|(p, _)| *p != position)
        .map(|(_, t)| t.occurrence.clone())
        .collect();

    let legal = requirements_hold(rules, &table.day(src).tasks)
        && Legality::new(rules)
            .plan(table, dst, &moving, Adjacency::Enforced, partners.as_slice())
            .is_some_and(|needed| needed.len() == partners.len());

    if !legal {
        for (p, task) in detached.into_iter().rev() {
            table.insert(src, p, task);
        }
        return false;
    }

    for (p, task) in detached.into_iter().rev() {
        if p == position {
            table.place(dst, PlacedTask::new(task.occurrence));
        } else {
            table.place(dst, PlacedTask::inserted_for(task.occurrence, moving.chore.clone()));
        }
    }
    table.release_inserted(src, &moving.chore);
    debug!(chore = %moving.chore, from = src, to = dst, carried = k - 1, "moved occurrence");
    true
}
