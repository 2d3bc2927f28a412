//! Achievement badges shown on the dashboard.
//!
//! Badges are derived from a user's whole goal list at one moment: the
//! lifetime check-in count, the current streak of each daily goal, and the
//! weekly counts of each weekly goal. Nothing is stored; the list is
//! recomputed on every view.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::streak::weekly_streak;
use crate::summary::WeekCounts;
use crate::time::WeekKey;

/// A badge a user has earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    FirstCheckIn,
    TenCheckIns,
    FiftyCheckIns,
    HundredCheckIns,
    ThreeDayStreak,
    SevenDayStreak,
    ThirtyDayStreak,
    WeeklyTargetMet,
    FourWeekStreak,
}

impl Badge {
    pub fn label(&self) -> &'static str {
        match self {
            Badge::FirstCheckIn => "First Check-In",
            Badge::TenCheckIns => "10 Check-Ins",
            Badge::FiftyCheckIns => "50 Check-Ins",
            Badge::HundredCheckIns => "100 Check-Ins",
            Badge::ThreeDayStreak => "3-Day Streak",
            Badge::SevenDayStreak => "7-Day Streak",
            Badge::ThirtyDayStreak => "30-Day Streak",
            Badge::WeeklyTargetMet => "Weekly Target Met",
            Badge::FourWeekStreak => "4-Week Streak",
        }
    }
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

const CHECK_IN_MILESTONES: [(usize, Badge); 4] = [
    (1, Badge::FirstCheckIn),
    (10, Badge::TenCheckIns),
    (50, Badge::FiftyCheckIns),
    (100, Badge::HundredCheckIns),
];

const DAILY_STREAK_MILESTONES: [(u32, Badge); 3] = [
    (3, Badge::ThreeDayStreak),
    (7, Badge::SevenDayStreak),
    (30, Badge::ThirtyDayStreak),
];

const WEEKLY_STREAK_MILESTONE: u32 = 4;

/// Week counts of one weekly goal.
#[derive(Debug, Clone, Copy)]
pub struct WeeklyGoalProgress<'a> {
    pub weekly_target: u32,
    pub week_counts: &'a WeekCounts,
}

/// Everything badge evaluation looks at.
#[derive(Debug, Clone, Copy)]
pub struct BadgeInput<'a> {
    /// Check-ins across all of the user's goals
    pub total_check_ins: usize,
    /// Current streak of each daily goal
    pub daily_streaks: &'a [u32],
    pub weekly_goals: &'a [WeeklyGoalProgress<'a>],
    /// Local Monday of the current week
    pub week_start: NaiveDate,
}

/// Badges earned, in a fixed order: check-in milestones, then daily streak
/// milestones, then weekly goal badges.
///
/// Any check-in at all earns [`Badge::FirstCheckIn`]. Streak badges use the
/// best current streak across goals.
///
/// # Errors
///
/// Returns [`crate::CoreError::InvalidConfiguration`] if a weekly goal has a
/// zero target.
pub fn badges(input: &BadgeInput) -> Result<Vec<Badge>> {
    let mut earned: Vec<Badge> = CHECK_IN_MILESTONES
        .iter()
        .filter(|(min, _)| input.total_check_ins >= *min)
        .map(|(_, badge)| *badge)
        .collect();

    let best_daily = input.daily_streaks.iter().copied().max().unwrap_or(0);
    earned.extend(
        DAILY_STREAK_MILESTONES
            .iter()
            .filter(|(min, _)| best_daily >= *min)
            .map(|(_, badge)| *badge),
    );

    let this_week = WeekKey::from_date(input.week_start);
    let mut target_met = false;
    let mut best_weekly = 0;
    for goal in input.weekly_goals {
        let streak = weekly_streak(goal.week_counts, input.week_start, goal.weekly_target)?;
        best_weekly = best_weekly.max(streak);
        target_met |= goal.week_counts.get(&this_week) >= goal.weekly_target;
    }
    if target_met {
        earned.push(Badge::WeeklyTargetMet);
    }
    if best_weekly >= WEEKLY_STREAK_MILESTONE {
        earned.push(Badge::FourWeekStreak);
    }

    Ok(earned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 13).unwrap()
    }

    fn counts(weeks: &[(&str, u32)]) -> WeekCounts {
        weeks.iter().map(|(w, n)| (w.parse().unwrap(), *n)).collect()
    }

    fn input<'a>(
        total: usize,
        daily: &'a [u32],
        weekly: &'a [WeeklyGoalProgress<'a>],
    ) -> BadgeInput<'a> {
        BadgeInput {
            total_check_ins: total,
            daily_streaks: daily,
            weekly_goals: weekly,
            week_start: monday(),
        }
    }

    #[test]
    fn test_no_check_ins_no_badges() {
        assert!(badges(&input(0, &[0, 0], &[])).unwrap().is_empty());
    }

    #[test]
    fn test_first_check_in_unlocks_a_badge() {
        assert_eq!(badges(&input(1, &[1], &[])).unwrap(), vec![Badge::FirstCheckIn]);
    }

    #[test]
    fn test_milestones_accumulate() {
        let earned = badges(&input(57, &[2, 8], &[])).unwrap();
        assert_eq!(
            earned,
            vec![
                Badge::FirstCheckIn,
                Badge::TenCheckIns,
                Badge::FiftyCheckIns,
                Badge::ThreeDayStreak,
                Badge::SevenDayStreak,
            ]
        );
    }

    #[test]
    fn test_weekly_goal_badges() {
        let history = counts(&[
            ("2024-W52", 3),
            ("2025-W01", 3),
            ("2025-W02", 4),
            ("2025-W03", 3),
        ]);
        let goals = [WeeklyGoalProgress {
            weekly_target: 3,
            week_counts: &history,
        }];
        let earned = badges(&input(13, &[], &goals)).unwrap();
        assert!(earned.contains(&Badge::WeeklyTargetMet));
        assert!(earned.contains(&Badge::FourWeekStreak));
    }

    #[test]
    fn test_weekly_target_not_yet_met() {
        let history = counts(&[("2025-W02", 3), ("2025-W03", 1)]);
        let goals = [WeeklyGoalProgress {
            weekly_target: 3,
            week_counts: &history,
        }];
        let earned = badges(&input(4, &[], &goals)).unwrap();
        assert_eq!(earned, vec![Badge::FirstCheckIn]);
    }

    #[test]
    fn test_zero_weekly_target_is_rejected() {
        let history = WeekCounts::new();
        let goals = [WeeklyGoalProgress {
            weekly_target: 0,
            week_counts: &history,
        }];
        assert!(matches!(
            badges(&input(0, &[], &goals)),
            Err(CoreError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Badge::FirstCheckIn.to_string(), "First Check-In");
        assert_eq!(Badge::FourWeekStreak.label(), "4-Week Streak");
    }
}
