use clap::Args;
use serde::Serialize;
use std::path::Path;

use crate::common::{load_config, reference_instant, resolve_calendar};

#[derive(Args)]
pub struct KeysArgs {
    /// Instant in RFC 3339 form (defaults to now)
    #[arg(long)]
    at: Option<String>,
    /// IANA timezone (defaults to calendar.default_timezone)
    #[arg(long)]
    tz: Option<String>,
}

#[derive(Serialize)]
struct KeysOutput {
    timezone: &'static str,
    local_date_key: String,
    week_key: String,
    week_start: String,
    week_end: String,
}

pub fn run(args: KeysArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let calendar = resolve_calendar(args.tz.as_deref(), &config)?;
    let instant = reference_instant(args.at.as_deref())?;

    let output = KeysOutput {
        timezone: calendar.name(),
        local_date_key: calendar.date_key(instant).to_string(),
        week_key: calendar.week_key(instant).to_string(),
        week_start: calendar.week_start(instant).to_string(),
        week_end: calendar.week_end(instant).to_string(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
