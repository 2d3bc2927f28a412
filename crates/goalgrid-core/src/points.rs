//! Weekly points for a goal.
//!
//! Points are additive:
//! - every check-in this week earns `points_per_check_in`
//! - a weekly goal that reached its target earns `weekly_target_bonus` once
//! - a streak that satisfies [`StreakBonusPolicy`] earns `streak_bonus` once
//!
//! There is no cap. All arithmetic is integer and saturating.

use serde::{Deserialize, Serialize};

use crate::checkin::GoalConfig;
use crate::error::Result;

/// Rule deciding when the streak bonus is awarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakBonusPolicy {
    /// Shortest streak that earns the bonus. Values below 1 behave as 1: a
    /// zero streak never earns it.
    pub min_streak: u32,
}

impl Default for StreakBonusPolicy {
    fn default() -> Self {
        Self { min_streak: 1 }
    }
}

impl StreakBonusPolicy {
    pub fn new(min_streak: u32) -> Self {
        Self { min_streak }
    }

    pub fn applies(&self, streak: u32) -> bool {
        streak > 0 && streak >= self.min_streak
    }
}

/// Inputs for one goal's weekly points.
#[derive(Debug, Clone, Copy)]
pub struct PointsInput<'a> {
    pub goal: &'a GoalConfig,
    /// Check-ins in the current ISO week
    pub check_ins_this_week: u32,
    /// Current daily streak of the goal
    pub current_streak: u32,
}

/// Points a goal earned this week.
///
/// # Errors
///
/// Returns [`crate::CoreError::InvalidConfiguration`] if the goal fails
/// [`GoalConfig::validate`].
pub fn weekly_points(input: &PointsInput<'_>, policy: &StreakBonusPolicy) -> Result<u32> {
    let goal = input.goal;
    let weekly_target = goal.required_weekly_target()?;

    let mut points = input
        .check_ins_this_week
        .saturating_mul(goal.points_per_check_in);

    if let Some(target) = weekly_target {
        if input.check_ins_this_week >= target {
            points = points.saturating_add(goal.weekly_target_bonus);
        }
    }

    if policy.applies(input.current_streak) {
        points = points.saturating_add(goal.streak_bonus);
    }

    Ok(points)
}
