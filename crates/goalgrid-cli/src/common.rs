//! Helpers shared by the CLI commands.

use chrono::{DateTime, Utc};
use goalgrid_core::{LocalCalendar, ScoringConfig};
use log::debug;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Load the config from `path`, or from the default location. A `path` that
/// does not exist yet reads as the default config.
pub fn load_config(path: Option<&Path>) -> Result<ScoringConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) if !path.exists() => ScoringConfig::default(),
        Some(path) => ScoringConfig::load_from(path)?,
        None => ScoringConfig::load()?,
    };
    Ok(config)
}

/// Calendar for `tz`, falling back to the configured default timezone.
pub fn resolve_calendar(
    tz: Option<&str>,
    config: &ScoringConfig,
) -> Result<LocalCalendar, Box<dyn std::error::Error>> {
    let calendar = match tz {
        Some(name) => LocalCalendar::new(name)?,
        None => {
            debug!(
                "no --tz given, using default {}",
                config.calendar.default_timezone
            );
            config.default_calendar()?
        }
    };
    Ok(calendar)
}

/// Parse an RFC 3339 instant, or take the current time.
pub fn reference_instant(at: Option<&str>) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    match at {
        Some(text) => {
            let parsed = DateTime::parse_from_rfc3339(text)
                .map_err(|e| format!("invalid --at '{text}': {e}"))?;
            Ok(parsed.with_timezone(&Utc))
        }
        None => Ok(Utc::now()),
    }
}

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let value = serde_json::from_str(&content)
        .map_err(|e| format!("cannot parse {}: {e}", path.display()))?;
    Ok(value)
}
