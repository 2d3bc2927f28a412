//! Per-goal scoring snapshot.
//!
//! Gathers every figure a goal page shows into one value, computed from the
//! goal's check-ins at an injected reference instant.

use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::checkin::{CheckIn, GoalConfig};
use crate::config::ScoringConfig;
use crate::consistency::{completed_in_window, consistency_percentage, soft_failure_message_with};
use crate::error::Result;
use crate::points::{weekly_points, PointsInput};
use crate::streak::{
    best_daily_streak, daily_streak, graceful_streak, weekly_streak, GracefulStreak,
};
use crate::summary::{summarize_daily_with_target, summarize_weekly};
use crate::time::{DateKey, LocalCalendar, WeekKey};

/// Scoring figures for one goal at one moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalReport {
    pub today: DateKey,
    pub week: WeekKey,
    pub week_start: NaiveDate,
    pub today_done: bool,
    pub total_check_ins: usize,
    pub check_ins_this_week: u32,
    pub daily_streak: u32,
    pub best_daily_streak: u32,
    /// Zero for daily goals
    pub weekly_streak: u32,
    pub graceful: GracefulStreak,
    pub points: u32,
    pub consistency_percent: u8,
    pub consistency_message: String,
}

impl GoalReport {
    /// Score `check_ins` for `goal` as of `now` in `calendar`.
    ///
    /// `check_ins` must already be limited to this goal and its owner.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::InvalidConfiguration`] if the goal or the
    /// configuration holds an unusable target or window.
    pub fn compute(
        goal: &GoalConfig,
        check_ins: &[CheckIn],
        now: DateTime<Utc>,
        calendar: &LocalCalendar,
        config: &ScoringConfig,
    ) -> Result<Self> {
        goal.validate()?;

        let today = calendar.date_key(now);
        let week = calendar.week_key(now);
        let week_start = calendar.week_start(now);

        let done_days = summarize_daily_with_target(check_ins, goal.daily_target)?;
        let week_counts = summarize_weekly(check_ins);
        let check_ins_this_week = week_counts.get(&week);

        let current = daily_streak(&done_days, today);
        let weekly = match goal.required_weekly_target()? {
            Some(target) => weekly_streak(&week_counts, week_start, target)?,
            None => 0,
        };

        let points = weekly_points(
            &PointsInput {
                goal,
                check_ins_this_week,
                current_streak: current,
            },
            &config.streak_bonus_policy(),
        )?;

        let window_days = config.consistency.window_days;
        let consistency_percent = consistency_percentage(&done_days, today, window_days)?;
        let consistency_message = soft_failure_message_with(
            &config.message_thresholds(),
            consistency_percent,
            completed_in_window(&done_days, today, window_days),
            window_days,
        );

        debug!(
            "scored {} check-ins in {} for {today}: streak {current}, points {points}",
            check_ins.len(),
            calendar.name()
        );

        Ok(Self {
            today,
            week,
            week_start,
            today_done: done_days.contains(&today),
            total_check_ins: check_ins.len(),
            check_ins_this_week,
            daily_streak: current,
            best_daily_streak: best_daily_streak(&done_days),
            weekly_streak: weekly,
            graceful: graceful_streak(&done_days, today),
            points,
            consistency_percent,
            consistency_message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn history(cal: &LocalCalendar, now: DateTime<Utc>, days_ago: &[i64]) -> Vec<CheckIn> {
        days_ago
            .iter()
            .map(|&n| CheckIn::at(now - Duration::days(n), cal, "u1", "g1"))
            .collect()
    }

    #[test]
    fn test_daily_goal_report() {
        let cal = LocalCalendar::new("America/Chicago").unwrap();
        let now = utc("2025-01-15T18:00:00Z");
        let check_ins = history(&cal, now, &[0, 1, 2, 5, 6, 7, 8]);

        let goal = GoalConfig::daily();
        let report =
            GoalReport::compute(&goal, &check_ins, now, &cal, &ScoringConfig::default()).unwrap();

        assert_eq!(report.today.to_string(), "2025-01-15");
        assert_eq!(report.week.to_string(), "2025-W03");
        assert!(report.today_done);
        assert_eq!(report.total_check_ins, 7);
        // Monday 13th through Wednesday 15th
        assert_eq!(report.check_ins_this_week, 3);
        assert_eq!(report.daily_streak, 3);
        assert_eq!(report.best_daily_streak, 4);
        assert_eq!(report.weekly_streak, 0);
        assert!(!report.graceful.is_at_risk);
        // 3 * 10 + streak bonus 5
        assert_eq!(report.points, 35);
        // 7 of 30 days
        assert_eq!(report.consistency_percent, 23);
    }

    #[test]
    fn test_weekly_goal_report() {
        let cal = LocalCalendar::new("America/Chicago").unwrap();
        let now = utc("2025-01-15T18:00:00Z");
        // Three check-ins this week, three last week
        let check_ins = history(&cal, now, &[0, 1, 2, 3, 4, 5]);

        let report = GoalReport::compute(
            &GoalConfig::weekly(3),
            &check_ins,
            now,
            &cal,
            &ScoringConfig::default(),
        )
        .unwrap();

        assert_eq!(report.check_ins_this_week, 3);
        assert_eq!(report.weekly_streak, 2);
        // 3 * 10 + 20 target bonus + 5 streak bonus
        assert_eq!(report.points, 55);
    }

    #[test]
    fn test_report_marks_at_risk_before_todays_check_in() {
        let cal = LocalCalendar::new("America/Chicago").unwrap();
        let now = utc("2025-01-15T18:00:00Z");
        let check_ins = history(&cal, now, &[1, 2, 3]);

        let goal = GoalConfig::daily();
        let report =
            GoalReport::compute(&goal, &check_ins, now, &cal, &ScoringConfig::default()).unwrap();

        assert!(!report.today_done);
        assert_eq!(report.daily_streak, 0);
        assert_eq!(report.graceful.current_streak, 3);
        assert!(report.graceful.is_at_risk);
    }

    #[test]
    fn test_daily_target_gates_done_days() {
        let cal = LocalCalendar::new("UTC").unwrap();
        let now = utc("2025-01-15T18:00:00Z");
        let mut check_ins = history(&cal, now, &[0, 1]);
        check_ins.push(CheckIn::at(now - Duration::hours(2), &cal, "u1", "g1"));
        let goal = GoalConfig {
            daily_target: 2,
            ..GoalConfig::daily()
        };

        let report = GoalReport::compute(&goal, &check_ins, now, &cal, &ScoringConfig::default())
            .unwrap();

        assert!(report.today_done);
        assert_eq!(report.daily_streak, 1);
        assert_eq!(report.check_ins_this_week, 3);
    }

    #[test]
    fn test_report_rejects_invalid_goal() {
        let cal = LocalCalendar::new("UTC").unwrap();
        let goal = GoalConfig {
            weekly_target: None,
            ..GoalConfig::weekly(3)
        };
        let now = utc("2025-01-15T18:00:00Z");
        assert!(GoalReport::compute(&goal, &[], now, &cal, &ScoringConfig::default()).is_err());
    }
}
