//! Scheduling domain models.
//!
//! Provides the data types the scheduling phases pass between each other:
//! chore definitions and rules going in, occurrences in the middle, and the
//! day table and finished schedule coming out.
//!
//! # Lifecycle
//!
//! | Type | Built by | Consumed by |
//! |------|----------|-------------|
//! | Chore, RuleSet | loader / caller | expander |
//! | TaskOccurrence | expander | assigner |
//! | DayTable | assigner | rebalancer |
//! | Schedule | pipeline | renderer |

mod chore;
mod occurrence;
mod rule;
mod schedule;

pub use chore::{Cadence, Chore};
pub use occurrence::TaskOccurrence;
pub use rule::{PairingRule, RuleSet, Window, WindowKind};
pub use schedule::{
    DaySchedule, DayTable, PlacedTask, Schedule, Warning, WarningKind, DAYS_IN_MONTH,
};
