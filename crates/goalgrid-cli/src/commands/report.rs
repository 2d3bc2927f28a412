use clap::Args;
use goalgrid_core::{CheckIn, GoalConfig, GoalReport, RawCheckIn};
use log::debug;
use std::path::{Path, PathBuf};

use crate::common::{load_config, read_json, reference_instant, resolve_calendar};

#[derive(Args)]
pub struct ReportArgs {
    /// JSON file with the goal configuration
    #[arg(long)]
    goal: PathBuf,
    /// JSON file with an array of check-ins
    #[arg(long)]
    check_ins: PathBuf,
    /// Only score check-ins of this goal
    #[arg(long)]
    goal_id: Option<String>,
    /// Only score check-ins of this user
    #[arg(long)]
    user_id: Option<String>,
    /// Reference instant in RFC 3339 form (defaults to now)
    #[arg(long)]
    at: Option<String>,
    /// Owner's IANA timezone (defaults to calendar.default_timezone)
    #[arg(long)]
    tz: Option<String>,
}

pub fn run(args: ReportArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let calendar = resolve_calendar(args.tz.as_deref(), &config)?;
    let now = reference_instant(args.at.as_deref())?;

    let goal: GoalConfig = read_json(&args.goal)?;
    let raw: Vec<RawCheckIn> = read_json(&args.check_ins)?;

    let check_ins: Vec<CheckIn> = raw
        .iter()
        .filter(|c| args.goal_id.as_deref().map_or(true, |id| c.goal_id == id))
        .filter(|c| args.user_id.as_deref().map_or(true, |id| c.user_id == id))
        .map(|c| c.resolve(&calendar))
        .collect();
    debug!("{} of {} check-ins selected", check_ins.len(), raw.len());

    let report = GoalReport::compute(&goal, &check_ins, now, &calendar, &config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
