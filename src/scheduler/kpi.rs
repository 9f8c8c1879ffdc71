//! Schedule quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placed / Unplaced | Occurrence counts |
//! | Placement Rate | placed / (placed + unplaced) |
//! | Max / Min Day Weight | Heaviest and lightest day totals |
//! | Count Spread | Max minus min occurrences per day |
//! | Utilization | Total placed weight over month capacity |

use crate::models::Schedule;

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleKpi {
    pub placed: usize,
    pub unplaced: usize,
    /// Fraction of occurrences placed (0.0..1.0).
    pub placement_rate: f64,
    pub total_weight: u64,
    pub max_day_weight: u32,
    pub min_day_weight: u32,
    pub max_day_count: usize,
    pub min_day_count: usize,
    /// `max_day_count - min_day_count`.
    pub count_spread: usize,
    /// Placed weight over `capacity * days`; `None` for unbounded capacity.
    pub utilization: Option<f64>,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule and the capacity it was built with.
    pub fn calculate(schedule: &Schedule, capacity: u32) -> Self {
        let placed = schedule.placed_count();
        let unplaced = schedule.unplaced.len();
        let total_weight: u64 = schedule.days.iter().map(|d| u64::from(d.total_weight)).sum();

        let weights = schedule.days.iter().map(|d| d.total_weight);
        let counts = schedule.days.iter().map(|d| d.count());
        let max_day_count = counts.clone().max().unwrap_or(0);
        let min_day_count = counts.min().unwrap_or(0);

        let placement_rate = if placed + unplaced == 0 {
            1.0
        } else {
            placed as f64 / (placed + unplaced) as f64
        };

        let utilization = (capacity != u32::MAX && capacity > 0 && !schedule.days.is_empty())
            .then(|| total_weight as f64 / (f64::from(capacity) * schedule.days.len() as f64));

        Self {
            placed,
            unplaced,
            placement_rate,
            total_weight,
            max_day_weight: weights.clone().max().unwrap_or(0),
            min_day_weight: weights.min().unwrap_or(0),
            max_day_count,
            min_day_count,
            count_spread: max_day_count - min_day_count,
            utilization,
        }
    }

    /// Whether everything was placed within the given count spread.
    pub fn meets_thresholds(&self, max_unplaced: usize, max_spread: usize) -> bool {
        self.unplaced <= max_unplaced && self.count_spread <= max_spread
    }
}
