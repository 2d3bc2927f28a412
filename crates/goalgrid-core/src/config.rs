//! TOML-based scoring configuration.
//!
//! Stores the defaults the calling layer applies before it reaches the
//! scoring functions:
//! - Fallback timezone for users without a preference
//! - Streak bonus threshold
//! - Consistency window and message tiers
//!
//! Configuration is stored at `~/.config/goalgrid/config.toml`.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::consistency::MessageThresholds;
use crate::error::{ConfigError, CoreError, Result};
use crate::points::StreakBonusPolicy;
use crate::time::LocalCalendar;

/// Returns `~/.config/goalgrid[-dev]/` based on GOALGRID_ENV.
///
/// Set GOALGRID_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("GOALGRID_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("goalgrid-dev")
    } else {
        base_dir.join("goalgrid")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Calendar defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Used only when a user has no timezone of their own
    #[serde(default = "default_timezone")]
    pub default_timezone: String,
}

/// Points settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsConfig {
    #[serde(default = "default_streak_bonus_min_streak")]
    pub streak_bonus_min_streak: u32,
}

/// Consistency window and message tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyConfig {
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    #[serde(default = "default_high_threshold")]
    pub high_threshold: u8,
    #[serde(default = "default_medium_threshold")]
    pub medium_threshold: u8,
}

/// Scoring configuration.
///
/// Serialized to/from TOML at `~/.config/goalgrid/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub scoring: PointsConfig,
    #[serde(default)]
    pub consistency: ConsistencyConfig,
}

/// Longest consistency window accepted, about ten years.
pub const MAX_WINDOW_DAYS: u32 = 3660;

// Default functions
fn default_timezone() -> String {
    "America/Chicago".into()
}
fn default_streak_bonus_min_streak() -> u32 {
    1
}
fn default_window_days() -> u32 {
    30
}
fn default_high_threshold() -> u8 {
    80
}
fn default_medium_threshold() -> u8 {
    50
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            default_timezone: default_timezone(),
        }
    }
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            streak_bonus_min_streak: default_streak_bonus_min_streak(),
        }
    }
}

impl Default for ConsistencyConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            high_threshold: default_high_threshold(),
            medium_threshold: default_medium_threshold(),
        }
    }
}

impl ScoringConfig {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!("cannot parse '{value}' as a whole number"),
                        })?,
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// fails validation, or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            debug!("wrote default configuration to {}", path.display());
            return Ok(cfg);
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| load_failed(e.to_string()))?;
        let cfg: ScoringConfig = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
        cfg.validate()?;
        debug!("loaded configuration from {}", path.display());
        Ok(cfg)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. The change is validated but
    /// not written; call [`ScoringConfig::save`] to persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting configuration is invalid. `self` is left unchanged
    /// on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: ScoringConfig =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check that every value can be used by the scoring functions.
    pub fn validate(&self) -> Result<()> {
        let invalid = |key: &str, message: String| {
            warn!("rejecting configuration value for {key}: {message}");
            CoreError::from(ConfigError::InvalidValue {
                key: key.to_string(),
                message,
            })
        };

        if LocalCalendar::new(&self.calendar.default_timezone).is_err() {
            return Err(invalid(
                "calendar.default_timezone",
                format!("'{}' is not an IANA timezone", self.calendar.default_timezone),
            ));
        }
        if self.consistency.window_days == 0 {
            return Err(invalid("consistency.window_days", "must be at least 1".into()));
        }
        if self.consistency.window_days > MAX_WINDOW_DAYS {
            return Err(invalid(
                "consistency.window_days",
                format!("must be at most {MAX_WINDOW_DAYS}"),
            ));
        }
        if self.consistency.high_threshold > 100 {
            return Err(invalid("consistency.high_threshold", "must be at most 100".into()));
        }
        if self.consistency.medium_threshold > self.consistency.high_threshold {
            return Err(invalid(
                "consistency.medium_threshold",
                "must not exceed consistency.high_threshold".into(),
            ));
        }
        Ok(())
    }

    /// Calendar for users without a timezone preference.
    pub fn default_calendar(&self) -> Result<LocalCalendar> {
        LocalCalendar::new(&self.calendar.default_timezone)
    }

    pub fn streak_bonus_policy(&self) -> StreakBonusPolicy {
        StreakBonusPolicy::new(self.scoring.streak_bonus_min_streak)
    }

    pub fn message_thresholds(&self) -> MessageThresholds {
        MessageThresholds {
            high: self.consistency.high_threshold,
            medium: self.consistency.medium_threshold,
        }
    }
}
