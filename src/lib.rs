//! Monthly chore scheduling.
//!
//! Assigns recurring household chores to the days of a 30-day month under
//! a per-day difficulty limit, same-chore spacing rules and pairing rules
//! between chores.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Chore`, `Cadence`, `PairingRule`,
//!   `RuleSet`, `TaskOccurrence`, `DayTable`, `Schedule`, `Warning`
//! - **`scheduler`**: Expansion, day assignment, rebalancing, KPIs
//! - **`validation`**: Input integrity checks (duplicate names, rule shape,
//!   co-requirement cycles)
//! - **`config`**: Scheduler settings and the TOML rule file
//! - **`io`**: CSV loading and text/JSON rendering
//!
//! # Architecture
//!
//! The pipeline is expander → assigner → rebalancer → renderer. Each phase
//! takes its inputs explicitly and can be used on its own. The scheduling
//! phases never fail; only loading and validation return errors.

pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Result, ScheduleError};
