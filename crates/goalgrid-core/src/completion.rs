//! Weekly completion across a member's goals.
//!
//! Each goal contributes its weekly target and the check-ins counted toward
//! it, capped at the target so one over-achieved goal cannot hide a
//! neglected one.

use crate::checkin::{Cadence, GoalConfig};
use crate::error::Result;

/// One goal and its check-in count for the week being scored.
#[derive(Debug, Clone, Copy)]
pub struct GoalWeek<'a> {
    pub goal: &'a GoalConfig,
    pub check_ins: u32,
}

/// Check-ins a goal needs in one week: the weekly target of a weekly goal,
/// or seven times the daily target of a daily goal.
pub fn weekly_target_for(goal: &GoalConfig) -> Result<u32> {
    goal.validate()?;
    Ok(match (goal.cadence, goal.weekly_target) {
        (Cadence::Weekly, Some(target)) => target,
        _ => goal.daily_target.saturating_mul(7),
    })
}

/// Rounded percentage of the combined weekly target that was met.
///
/// A member with no goals has nothing left to do and scores 100.
pub fn weekly_completion_percent(goals: &[GoalWeek<'_>]) -> Result<u8> {
    let mut total_target: u64 = 0;
    let mut total_completed: u64 = 0;

    for entry in goals {
        let target = u64::from(weekly_target_for(entry.goal)?);
        total_target += target;
        total_completed += u64::from(entry.check_ins).min(target);
    }

    if total_target == 0 {
        return Ok(100);
    }

    let percent = (total_completed * 200 + total_target) / (total_target * 2);
    Ok(percent.min(100) as u8)
}
