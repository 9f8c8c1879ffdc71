//! Schedule rendering.
//!
//! Text output lists each day (1-indexed) with its total difficulty and
//! its chores ascending by difficulty, followed by any unplaced
//! occurrences, also ascending by difficulty.

use crate::error::Result;
use crate::models::Schedule;

/// Renders the schedule as plain text.
pub fn render_text(schedule: &Schedule) -> String {
    let mut out = String::new();
    for day in &schedule.days {
        out.push_str(&format!(
            "Day {} (Total difficulty: {})\n",
            day.index + 1,
            day.total_weight
        ));
        let tasks = day.sorted_by_weight();
        if tasks.is_empty() {
            out.push_str("  (no chores)\n");
        }
        for task in tasks {
            out.push_str(&format!("  - {} (difficulty {})\n", task.chore(), task.weight()));
        }
        out.push('\n');
    }

    if !schedule.unplaced.is_empty() {
        out.push_str("Unplaced Tasks (could not be scheduled due to difficulty or duplicates):\n");
        for occurrence in schedule.unplaced_sorted() {
            out.push_str(&format!(
                "  - {} (difficulty {})\n",
                occurrence.chore, occurrence.weight
            ));
        }
    }
    out
}

/// Renders the schedule as pretty-printed JSON.
pub fn render_json(schedule: &Schedule) -> Result<String> {
    Ok(serde_json::to_string_pretty(schedule)?)
}
