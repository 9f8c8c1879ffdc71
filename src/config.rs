//! Scheduler configuration and the TOML rule file.
//!
//! A rule file carries an optional `[scheduler]` table and any number of
//! `[[rules]]` entries tagged by `type`:
//!
//! ```toml
//! [scheduler]
//! capacity = 15
//! rebalance = false
//!
//! [[rules]]
//! type = "group_merge"
//! name = "sweep + mop"
//! members = ["sweep", "mop"]
//!
//! [[rules]]
//! type = "exclusion_window"
//! category = "dust"
//! members = ["dust office", "dust bedroom"]
//! days = 7
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::models::{PairingRule, RuleSet};

/// Days scanned forward from the preferred day before falling back.
pub const SCAN_DAYS: usize = 30;

/// Upper bound on rebalancing rounds.
pub const MAX_REBALANCE_ROUNDS: usize = 100;

/// Daily difficulty limit for difficulty-weighted schedules.
pub const DEFAULT_CAPACITY: u32 = 15;

/// Tunables for one scheduling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Maximum total weight per day.
    pub capacity: u32,
    /// Whether to run the rebalancer after placement.
    pub rebalance: bool,
    /// Round bound for the rebalancer.
    pub max_rebalance_rounds: usize,
}

impl SchedulerConfig {
    /// Difficulty-weighted schedule: daily limit of 15, no rebalancing.
    pub fn weighted() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            rebalance: false,
            max_rebalance_rounds: MAX_REBALANCE_ROUNDS,
        }
    }

    /// Cadence schedule: no weight limit, rebalanced by day count.
    pub fn cadence() -> Self {
        Self {
            capacity: u32::MAX,
            rebalance: true,
            max_rebalance_rounds: MAX_REBALANCE_ROUNDS,
        }
    }

    /// Sets the daily capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Enables or disables rebalancing.
    pub fn with_rebalance(mut self, rebalance: bool) -> Self {
        self.rebalance = rebalance;
        self
    }

    /// Sets the rebalancing round bound.
    pub fn with_max_rebalance_rounds(mut self, rounds: usize) -> Self {
        self.max_rebalance_rounds = rounds;
        self
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::weighted()
    }
}

/// Contents of a rule file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleFile {
    /// Scheduler settings; absent fields keep the caller's preset.
    #[serde(default)]
    pub scheduler: Option<SchedulerOverrides>,
    #[serde(default)]
    pub rules: Vec<PairingRule>,
}

/// Optional scheduler settings from a rule file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerOverrides {
    pub capacity: Option<u32>,
    pub rebalance: Option<bool>,
    pub max_rebalance_rounds: Option<usize>,
}

impl SchedulerOverrides {
    /// Applies the present fields on top of `base`.
    pub fn apply(&self, mut base: SchedulerConfig) -> SchedulerConfig {
        if let Some(capacity) = self.capacity {
            base.capacity = capacity;
        }
        if let Some(rebalance) = self.rebalance {
            base.rebalance = rebalance;
        }
        if let Some(rounds) = self.max_rebalance_rounds {
            base.max_rebalance_rounds = rounds;
        }
        base
    }
}

impl RuleFile {
    /// Parses a rule file from TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a rule file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// The rules as a rule set, file order preserved.
    pub fn rule_set(&self) -> RuleSet {
        self.rules.iter().cloned().collect()
    }

    /// Scheduler settings with this file's overrides applied to `base`.
    pub fn scheduler_config(&self, base: SchedulerConfig) -> SchedulerConfig {
        match &self.scheduler {
            Some(overrides) => overrides.apply(base),
            None => base,
        }
    }
}
