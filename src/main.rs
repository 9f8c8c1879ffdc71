//! Chore schedule CLI.
//!
//! Reads chore definitions from CSV, applies an optional TOML rule file,
//! and writes a 30-day schedule.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use chore_schedule::config::{RuleFile, SchedulerConfig};
use chore_schedule::io::{load_cadence, load_weighted, render_json, render_text};
use chore_schedule::scheduler::{ChoreScheduler, ScheduleKpi, ScheduleRequest};
use chore_schedule::validation::validate_input;
use chore_schedule::ScheduleError;

#[derive(Parser)]
#[command(name = "chore-schedule")]
#[command(about = "Spread monthly chores across a 30-day schedule")]
struct Cli {
    /// Chore CSV file
    input: PathBuf,

    /// Input shape: weighted (chore,difficulty,frequency_per_month) or cadence (chore,interval)
    #[arg(short, long, value_enum, default_value_t = Mode::Weighted)]
    mode: Mode,

    /// TOML rule file (group merges, co-requirements, windows)
    #[arg(short, long, env = "CHORE_SCHEDULE_RULES")]
    rules: Option<PathBuf>,

    /// Maximum total difficulty per day
    #[arg(long)]
    capacity: Option<u32>,

    /// Rebalance day counts after placement
    #[arg(long, conflicts_with = "no_rebalance")]
    rebalance: bool,

    /// Skip rebalancing
    #[arg(long)]
    no_rebalance: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Weighted,
    Cadence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let (loaded, preset) = match cli.mode {
        Mode::Weighted => (load_weighted(&cli.input), SchedulerConfig::weighted()),
        Mode::Cadence => (load_cadence(&cli.input), SchedulerConfig::cadence()),
    };
    let loaded = loaded.with_context(|| format!("reading {}", cli.input.display()))?;

    let rule_file = match &cli.rules {
        Some(path) => {
            RuleFile::load(path).with_context(|| format!("reading rules {}", path.display()))?
        }
        None => RuleFile::default(),
    };

    let mut config = rule_file.scheduler_config(preset);
    if let Some(capacity) = cli.capacity {
        config.capacity = capacity;
    }
    if cli.rebalance {
        config.rebalance = true;
    }
    if cli.no_rebalance {
        config.rebalance = false;
    }

    let rules = rule_file.rule_set();
    if let Err(errors) = validate_input(&loaded.chores, &rules, &config) {
        for error in &errors {
            warn!("{error}");
        }
        return Err(ScheduleError::Invalid(errors).into());
    }

    info!(
        chores = loaded.chores.len(),
        rules = rules.len(),
        capacity = config.capacity,
        rebalance = config.rebalance,
        "scheduling"
    );

    let request = ScheduleRequest::new(loaded.chores)
        .with_rules(rules)
        .with_warnings(loaded.warnings);
    let scheduler = ChoreScheduler::new(config);
    let schedule = scheduler.schedule_request(&request);

    let kpi = ScheduleKpi::calculate(&schedule, scheduler.config().capacity);
    info!(
        placed = kpi.placed,
        unplaced = kpi.unplaced,
        max_day_weight = kpi.max_day_weight,
        count_spread = kpi.count_spread,
        "schedule summary"
    );

    let rendered = match cli.format {
        Format::Text => render_text(&schedule),
        Format::Json => render_json(&schedule)?,
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "schedule saved");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
