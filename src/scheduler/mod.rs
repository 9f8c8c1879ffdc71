//! Chore scheduling phases and KPI evaluation.
//!
//! # Phases
//!
//! - **`expander`**: chore definitions and group merges → occurrences.
//! - **`assigner`**: occurrences → days, evenly spaced with a per-chore
//!   stagger and forward-scanning retry.
//! - **`rebalancer`**: moves occurrences from the fullest to the emptiest
//!   day while every placement rule still holds.
//! - **`legality`**: the shared legality predicate and place-with-retry scan.
//!
//! Each phase takes the table and rules explicitly, so phases can be run
//! and tested on their own. `ChoreScheduler` chains them.
//!
//! # KPI
//!
//! `ScheduleKpi` summarises placement rate, day loads and count spread.
//!
//! All phases are greedy heuristics with bounded scans; none of them
//! searches for an optimal schedule.

mod assigner;
mod expander;
mod kpi;
pub mod legality;
mod pipeline;
mod rebalancer;

pub use assigner::{assign, assign_into, preferred_day, stagger_offset, DayAssignment};
pub use expander::{expand, resolve_rules, Expansion};
pub use kpi::ScheduleKpi;
pub use pipeline::{ChoreScheduler, ScheduleRequest};
pub use rebalancer::{rebalance, RebalanceReport};
