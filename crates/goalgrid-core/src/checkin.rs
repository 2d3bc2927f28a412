//! Check-in records and the goal configuration view the scoring core reads.
//!
//! Both are owned by the application layer. The core never mutates them and
//! never filters them by owner or goal; callers hand over the check-ins that
//! belong to a single (goal, user) pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::time::{DateKey, LocalCalendar, WeekKey};

/// A logged completion of a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    /// When the check-in was logged
    pub timestamp: DateTime<Utc>,

    /// Civil date in the owner's timezone at logging time
    pub local_date_key: DateKey,

    /// ISO week in the owner's timezone at logging time
    pub week_key: WeekKey,

    pub user_id: String,

    pub goal_id: String,
}

impl CheckIn {
    /// Build a check-in whose keys are derived from `timestamp` in `calendar`.
    pub fn at(
        timestamp: DateTime<Utc>,
        calendar: &LocalCalendar,
        user_id: impl Into<String>,
        goal_id: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            local_date_key: calendar.date_key(timestamp),
            week_key: calendar.week_key(timestamp),
            user_id: user_id.into(),
            goal_id: goal_id.into(),
        }
    }
}

/// A check-in as stored upstream, where the calendar keys may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCheckIn {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub local_date_key: Option<DateKey>,
    #[serde(default)]
    pub week_key: Option<WeekKey>,
    pub user_id: String,
    pub goal_id: String,
}

impl RawCheckIn {
    /// Fill in missing keys from the timestamp. Keys that were recorded at
    /// logging time are kept even if the owner has since changed timezone.
    pub fn resolve(&self, calendar: &LocalCalendar) -> CheckIn {
        CheckIn {
            timestamp: self.timestamp,
            local_date_key: self
                .local_date_key
                .unwrap_or_else(|| calendar.date_key(self.timestamp)),
            week_key: self
                .week_key
                .unwrap_or_else(|| calendar.week_key(self.timestamp)),
            user_id: self.user_id.clone(),
            goal_id: self.goal_id.clone(),
        }
    }
}

/// How often a goal is meant to be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cadence {
    Daily,
    Weekly,
}

/// Flattened goal settings used for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalConfig {
    pub cadence: Cadence,

    /// Check-ins per week; required for weekly goals
    #[serde(default)]
    pub weekly_target: Option<u32>,

    /// Completions needed for a day to count as done
    #[serde(default = "default_daily_target")]
    pub daily_target: u32,

    #[serde(default = "default_points_per_check_in")]
    pub points_per_check_in: u32,

    #[serde(default = "default_weekly_target_bonus")]
    pub weekly_target_bonus: u32,

    #[serde(default = "default_streak_bonus")]
    pub streak_bonus: u32,
}

fn default_daily_target() -> u32 {
    1
}
fn default_points_per_check_in() -> u32 {
    10
}
fn default_weekly_target_bonus() -> u32 {
    20
}
fn default_streak_bonus() -> u32 {
    5
}

impl GoalConfig {
    /// A daily goal with the default point weights.
    pub fn daily() -> Self {
        Self {
            cadence: Cadence::Daily,
            weekly_target: None,
            daily_target: default_daily_target(),
            points_per_check_in: default_points_per_check_in(),
            weekly_target_bonus: default_weekly_target_bonus(),
            streak_bonus: default_streak_bonus(),
        }
    }

    /// A weekly goal with the default point weights.
    pub fn weekly(target: u32) -> Self {
        Self {
            cadence: Cadence::Weekly,
            weekly_target: Some(target),
            ..Self::daily()
        }
    }

    pub fn is_weekly(&self) -> bool {
        self.cadence == Cadence::Weekly
    }

    /// Reject settings the application should never have let through.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfiguration`] if the daily target is
    /// zero, or a weekly goal has a missing or zero weekly target.
    pub fn validate(&self) -> Result<()> {
        if self.daily_target == 0 {
            return Err(CoreError::invalid_config("daily_target", "must be at least 1"));
        }
        match (self.cadence, self.weekly_target) {
            (Cadence::Weekly, None) => Err(CoreError::invalid_config(
                "weekly_target",
                "weekly goals require a weekly target",
            )),
            (Cadence::Weekly, Some(0)) => {
                Err(CoreError::invalid_config("weekly_target", "must be at least 1"))
            }
            _ => Ok(()),
        }
    }

    /// The validated weekly target of a weekly goal; `None` for daily goals.
    pub fn required_weekly_target(&self) -> Result<Option<u32>> {
        self.validate()?;
        Ok(match self.cadence {
            Cadence::Weekly => self.weekly_target,
            Cadence::Daily => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_check_in_at_derives_local_keys() {
        let cal = LocalCalendar::new("America/Chicago").unwrap();
        let check = CheckIn::at(utc("2025-01-01T03:00:00Z"), &cal, "u1", "g1");
        assert_eq!(check.local_date_key.to_string(), "2024-12-31");
        assert_eq!(check.week_key.to_string(), "2025-W01");
    }

    #[test]
    fn test_raw_check_in_keeps_recorded_keys() {
        let cal = LocalCalendar::new("Asia/Tokyo").unwrap();
        let raw = RawCheckIn {
            timestamp: utc("2025-01-15T05:30:00Z"),
            local_date_key: Some("2025-01-14".parse().unwrap()),
            week_key: None,
            user_id: "u1".to_string(),
            goal_id: "g1".to_string(),
        };
        let check = raw.resolve(&cal);
        assert_eq!(check.local_date_key.to_string(), "2025-01-14");
        assert_eq!(check.week_key.to_string(), "2025-W03");
    }

    #[test]
    fn test_raw_check_in_deserializes_without_keys() {
        let json = r#"{"timestamp":"2025-01-15T18:00:00Z","user_id":"u1","goal_id":"g1"}"#;
        let raw: RawCheckIn = serde_json::from_str(json).unwrap();
        assert!(raw.local_date_key.is_none());
        assert!(raw.week_key.is_none());
    }

    #[test]
    fn test_goal_config_deserializes_with_defaults() {
        let json = r#"{"cadence":"WEEKLY","weekly_target":3}"#;
        let goal: GoalConfig = serde_json::from_str(json).unwrap();
        assert_eq!(goal.cadence, Cadence::Weekly);
        assert_eq!(goal.daily_target, 1);
        assert_eq!(goal.points_per_check_in, 10);
        assert_eq!(goal.weekly_target_bonus, 20);
        assert_eq!(goal.streak_bonus, 5);
    }

    #[test]
    fn test_validate_rejects_weekly_without_target() {
        let goal = GoalConfig {
            weekly_target: None,
            ..GoalConfig::weekly(3)
        };
        assert!(matches!(
            goal.validate(),
            Err(CoreError::InvalidConfiguration { ref field, .. }) if field == "weekly_target"
        ));
    }

    #[test]
    fn test_validate_rejects_zero_targets() {
        assert!(GoalConfig::weekly(0).validate().is_err());
        let goal = GoalConfig {
            daily_target: 0,
            ..GoalConfig::daily()
        };
        assert!(goal.validate().is_err());
    }

    #[test]
    fn test_daily_goal_ignores_weekly_target() {
        let goal = GoalConfig {
            weekly_target: Some(4),
            ..GoalConfig::daily()
        };
        assert!(goal.validate().is_ok());
        assert_eq!(goal.required_weekly_target().unwrap(), None);
        assert_eq!(GoalConfig::weekly(3).required_weekly_target().unwrap(), Some(3));
    }
}
