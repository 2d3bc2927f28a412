//! # GoalGrid Core Library
//!
//! This library provides the scoring engine behind GoalGrid, a habit and goal
//! accountability app. It turns a history of timestamped check-ins into
//! calendar-local keys and derives streaks, weekly points, consistency and
//! feedback. The CLI binary and any server front end are thin layers that
//! load data, pick defaults, and call into these functions.
//!
//! ## Architecture
//!
//! - **Calendar**: IANA-timezone-aware date keys and ISO week keys
//! - **Summaries**: per-day presence and per-week counts of check-ins
//! - **Scoring**: streaks, points, consistency, weekly completion
//! - **Config**: TOML-based scoring defaults
//!
//! Every scoring function is pure. The reference instant ("now") is always
//! an argument, so repeated calls with the same inputs give the same output.
//!
//! ## Key Components
//!
//! - [`LocalCalendar`]: instant to [`DateKey`] / [`WeekKey`] conversion
//! - [`summarize_daily`] / [`summarize_weekly`]: check-in aggregation
//! - [`daily_streak`], [`weekly_streak`], [`graceful_streak`]: streak rules
//! - [`weekly_points`]: points with a configurable [`StreakBonusPolicy`]
//! - [`GoalReport`]: all figures for one goal at once
//! - [`badges()`]: dashboard achievements across all goals

pub mod badges;
pub mod checkin;
pub mod completion;
pub mod config;
pub mod consistency;
pub mod error;
pub mod points;
pub mod rank;
pub mod report;
pub mod streak;
pub mod summary;
pub mod time;

pub use badges::{badges, Badge, BadgeInput, WeeklyGoalProgress};
pub use checkin::{Cadence, CheckIn, GoalConfig, RawCheckIn};
pub use completion::{weekly_completion_percent, weekly_target_for, GoalWeek};
pub use config::ScoringConfig;
pub use consistency::{
    completed_in_window, consistency_percentage, soft_failure_message, soft_failure_message_with,
    ConsistencyTier, MessageThresholds,
};
pub use error::{ConfigError, CoreError, KeyKind, Result};
pub use points::{weekly_points, PointsInput, StreakBonusPolicy};
pub use rank::rank_name;
pub use report::GoalReport;
pub use streak::{best_daily_streak, daily_streak, graceful_streak, weekly_streak, GracefulStreak};
pub use summary::{
    summarize_daily, summarize_daily_with_target, summarize_weekly, DateKeySet, WeekCounts,
};
pub use time::{
    local_date_key, parse_timezone, week_end, week_key, week_start, DateKey, LocalCalendar, WeekKey,
};
