//! Chore (definition) model.
//!
//! A chore is a named recurring task with a monthly frequency and a
//! difficulty weight. Weights come either from an explicit difficulty score
//! or from a cadence label.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;

/// How often a chore recurs, expressed as a label.
///
/// Each cadence maps to a number of occurrences in a 30-day month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    /// Every day (30/month).
    Daily,
    /// Every second day (15/month).
    EveryOther,
    /// Twice a week (8/month).
    TwiceWeekly,
    /// Once a week (4/month).
    Weekly,
    /// Every two weeks (2/month).
    Biweekly,
    /// Once a month.
    Monthly,
}

impl Cadence {
    /// All recognised cadences, most frequent first.
    pub const ALL: [Cadence; 6] = [
        Cadence::Daily,
        Cadence::EveryOther,
        Cadence::TwiceWeekly,
        Cadence::Weekly,
        Cadence::Biweekly,
        Cadence::Monthly,
    ];

    /// Occurrences per 30-day month.
    pub fn per_month(self) -> u32 {
        match self {
            Cadence::Daily => 30,
            Cadence::EveryOther => 15,
            Cadence::TwiceWeekly => 8,
            Cadence::Weekly => 4,
            Cadence::Biweekly => 2,
            Cadence::Monthly => 1,
        }
    }

    /// Input label for this cadence.
    pub fn label(self) -> &'static str {
        match self {
            Cadence::Daily => "daily",
            Cadence::EveryOther => "every_other",
            Cadence::TwiceWeekly => "twice_weekly",
            Cadence::Weekly => "weekly",
            Cadence::Biweekly => "biweekly",
            Cadence::Monthly => "monthly",
        }
    }

    /// Parses a label for the given chore, reporting the chore on failure.
    pub fn parse_for(chore: &str, label: &str) -> Result<Self, ScheduleError> {
        label.parse().map_err(|_| ScheduleError::UnknownCadence {
            chore: chore.to_string(),
            label: label.trim().to_lowercase(),
        })
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Cadence {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Cadence::ALL
            .into_iter()
            .find(|c| c.label() == normalized)
            .ok_or_else(|| ScheduleError::UnknownCadence {
                chore: String::new(),
                label: normalized,
            })
    }
}

/// A chore definition, loaded once per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chore {
    /// Unique chore name.
    pub name: String,
    /// Occurrences per month.
    pub frequency: u32,
    /// Difficulty weight of one occurrence.
    pub weight: u32,
    /// Cadence label the chore was defined with, if any.
    pub cadence: Option<Cadence>,
    /// Whether occurrences may land on consecutive days.
    pub adjacency_exempt: bool,
}

impl Chore {
    /// Creates a chore with zero frequency and weight.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frequency: 0,
            weight: 0,
            cadence: None,
            adjacency_exempt: false,
        }
    }

    /// Creates a chore from a cadence label.
    ///
    /// Frequency and weight both equal the cadence's monthly count.
    /// Daily chores are exempt from the adjacency rule.
    pub fn from_cadence(name: impl Into<String>, cadence: Cadence) -> Self {
        Self {
            name: name.into(),
            frequency: cadence.per_month(),
            weight: cadence.per_month(),
            cadence: Some(cadence),
            adjacency_exempt: cadence == Cadence::Daily,
        }
    }

    /// Sets the monthly frequency.
    pub fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the difficulty weight.
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Allows occurrences on consecutive days.
    pub fn with_adjacency_exempt(mut self, exempt: bool) -> Self {
        self.adjacency_exempt = exempt;
        self
    }
}
