//! CSV input for chore definitions.
//!
//! Two row shapes are accepted:
//!
//! - weighted: `chore,difficulty,frequency_per_month`
//! - cadence: `chore,interval` with an interval label such as `weekly`
//!
//! Fields are trimmed. Cadence rows with an unknown label are skipped with
//! a warning; any other malformed row aborts the load.

use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, ScheduleError};
use crate::models::{Cadence, Chore, Warning};

#[derive(Debug, Deserialize)]
struct WeightedRow {
    chore: String,
    difficulty: u32,
    frequency_per_month: u32,
}

#[derive(Debug, Deserialize)]
struct CadenceRow {
    chore: String,
    interval: String,
}

/// Chores read from input, plus warnings for skipped rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedChores {
    pub chores: Vec<Chore>,
    pub warnings: Vec<Warning>,
}

fn reader<R: Read>(input: R, required: &[&str]) -> Result<csv::Reader<R>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    let headers = rdr.headers()?.clone();
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(ScheduleError::MissingColumn((*column).to_string()));
        }
    }
    Ok(rdr)
}

/// Reads `chore,difficulty,frequency_per_month` rows.
pub fn read_weighted<R: Read>(input: R) -> Result<LoadedChores> {
    let mut rdr = reader(input, &["chore", "difficulty", "frequency_per_month"])?;
    let mut loaded = LoadedChores::default();
    for row in rdr.deserialize() {
        let row: WeightedRow = row?;
        loaded.chores.push(
            Chore::new(row.chore)
                .with_weight(row.difficulty)
                .with_frequency(row.frequency_per_month),
        );
    }
    debug!(chores = loaded.chores.len(), "loaded weighted chores");
    Ok(loaded)
}

/// Reads `chore,interval` rows, skipping unknown intervals.
pub fn read_cadence<R: Read>(input: R) -> Result<LoadedChores> {
    let mut rdr = reader(input, &["chore", "interval"])?;
    let mut loaded = LoadedChores::default();
    for row in rdr.deserialize() {
        let row: CadenceRow = row?;
        match Cadence::parse_for(&row.chore, &row.interval) {
            Ok(cadence) => loaded.chores.push(Chore::from_cadence(row.chore, cadence)),
            Err(ScheduleError::UnknownCadence { chore, label }) => {
                warn!("Unknown interval '{label}' for chore '{chore}', skipping");
                loaded.warnings.push(Warning::unknown_cadence(chore, &label));
            }
            Err(other) => return Err(other),
        }
    }
    debug!(
        chores = loaded.chores.len(),
        skipped = loaded.warnings.len(),
        "loaded cadence chores"
    );
    Ok(loaded)
}

/// Reads a weighted CSV file.
pub fn load_weighted(path: impl AsRef<Path>) -> Result<LoadedChores> {
    read_weighted(std::fs::File::open(path)?)
}

/// Reads a cadence CSV file.
pub fn load_cadence(path: impl AsRef<Path>) -> Result<LoadedChores> {
    read_cadence(std::fs::File::open(path)?)
}
