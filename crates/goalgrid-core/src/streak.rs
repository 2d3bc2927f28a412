//! Daily and weekly streaks over summarized check-ins.
//!
//! A streak is a run of consecutive completed periods ending at a reference
//! period. "Today" is always passed in by the caller.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::summary::{DateKeySet, WeekCounts};
use crate::time::{DateKey, WeekKey};

/// Streak state that tolerates an unfinished "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GracefulStreak {
    pub current_streak: u32,
    /// The streak survives only until today ends without a check-in.
    pub is_at_risk: bool,
}

/// Consecutive done days ending at and including `today`.
///
/// Returns 0 when `today` itself has no check-in, however long the run
/// before it.
pub fn daily_streak(dates: &DateKeySet, today: DateKey) -> u32 {
    let mut streak = 0;
    let mut cursor = Some(today);
    while let Some(day) = cursor {
        if !dates.contains(&day) {
            break;
        }
        streak += 1;
        cursor = day.pred();
    }
    streak
}

/// Longest run of consecutive done days anywhere in the history.
pub fn best_daily_streak(dates: &DateKeySet) -> u32 {
    let mut best = 0;
    let mut run = 0;
    let mut previous: Option<DateKey> = None;

    for &day in dates.iter() {
        run = match previous {
            Some(prev) if prev.succ() == Some(day) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        previous = Some(day);
    }

    best
}

/// Consecutive weeks meeting `weekly_target`, ending at the week that
/// contains `current_week_start`.
///
/// The current week only counts once it has reached the target; an
/// in-progress week below target gives a streak of 0.
///
/// # Errors
///
/// Returns [`CoreError::InvalidConfiguration`] if `weekly_target` is zero.
pub fn weekly_streak(
    counts: &WeekCounts,
    current_week_start: NaiveDate,
    weekly_target: u32,
) -> Result<u32> {
    if weekly_target == 0 {
        return Err(CoreError::invalid_config("weekly_target", "must be at least 1"));
    }

    let mut streak = 0;
    let mut cursor = Some(current_week_start);
    while let Some(day) = cursor {
        let week = WeekKey::from_date(day);
        if counts.get(&week) < weekly_target {
            break;
        }
        streak += 1;
        cursor = day.checked_sub_days(Days::new(7));
    }
    Ok(streak)
}

/// Daily streak that does not punish a day that is still in progress.
///
/// - today done: the ordinary daily streak, not at risk
/// - today open, yesterday done: the streak ending yesterday, at risk
/// - neither: 0, nothing left to lose
pub fn graceful_streak(dates: &DateKeySet, today: DateKey) -> GracefulStreak {
    if dates.contains(&today) {
        return GracefulStreak {
            current_streak: daily_streak(dates, today),
            is_at_risk: false,
        };
    }

    match today.pred() {
        Some(yesterday) if dates.contains(&yesterday) => GracefulStreak {
            current_streak: daily_streak(dates, yesterday),
            is_at_risk: true,
        },
        _ => GracefulStreak {
            current_streak: 0,
            is_at_risk: false,
        },
    }
}
