//! Rolling consistency and soft-failure feedback.
//!
//! Consistency is the share of days done in a trailing window ending today.
//! The feedback message is picked by tier so a missed day reads as a nudge,
//! not a failure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::summary::DateKeySet;
use crate::time::DateKey;

/// Feedback tier for a consistency percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyTier {
    High,
    Medium,
    Low,
}

/// Lower bounds (inclusive) of the high and medium tiers, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageThresholds {
    pub high: u8,
    pub medium: u8,
}

impl Default for MessageThresholds {
    fn default() -> Self {
        Self {
            high: 80,
            medium: 50,
        }
    }
}

impl MessageThresholds {
    pub fn tier_for(&self, percent: u8) -> ConsistencyTier {
        if percent >= self.high {
            ConsistencyTier::High
        } else if percent >= self.medium {
            ConsistencyTier::Medium
        } else {
            ConsistencyTier::Low
        }
    }
}

fn check_window(window_days: u32) -> Result<()> {
    if window_days == 0 {
        return Err(CoreError::invalid_config("window_days", "must be at least 1"));
    }
    Ok(())
}

/// Days done among the `window_days` days ending at `today`, inclusive.
pub fn completed_in_window(dates: &DateKeySet, today: DateKey, window_days: u32) -> u32 {
    if window_days == 0 {
        return 0;
    }
    let first = today
        .minus_days(window_days - 1)
        .unwrap_or_else(|| DateKey::new(NaiveDate::MIN));
    u32::try_from(dates.count_between(first, today)).unwrap_or(u32::MAX)
}

/// Percentage of the trailing window that was done, rounded to the nearest
/// whole percent (halves round up).
///
/// # Errors
///
/// Returns [`CoreError::InvalidConfiguration`] if `window_days` is zero.
pub fn consistency_percentage(dates: &DateKeySet, today: DateKey, window_days: u32) -> Result<u8> {
    check_window(window_days)?;
    let completed = u64::from(completed_in_window(dates, today, window_days));
    let window = u64::from(window_days);
    let percent = (completed * 200 + window) / (window * 2);
    Ok(percent.min(100) as u8)
}

/// Encouragement message for a consistency figure, using the default tiers.
pub fn soft_failure_message(percent: u8, completed: u32, window_days: u32) -> String {
    soft_failure_message_with(&MessageThresholds::default(), percent, completed, window_days)
}

/// Encouragement message for a consistency figure.
///
/// The high tier always quotes the percentage and the medium tier always
/// quotes the completed-day count.
pub fn soft_failure_message_with(
    thresholds: &MessageThresholds,
    percent: u8,
    completed: u32,
    window_days: u32,
) -> String {
    match thresholds.tier_for(percent) {
        ConsistencyTier::High => format!(
            "Amazing consistency! You showed up on {percent}% of the last {window_days} days. Keep it rolling."
        ),
        ConsistencyTier::Medium => format!(
            "Solid progress: {completed} of the last {window_days} days done. Every check-in moves you forward."
        ),
        ConsistencyTier::Low => {
            "Every day is a fresh start. One check-in today is all it takes to build momentum.".to_string()
        }
    }
}
