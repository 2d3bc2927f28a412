//! Aggregates of a check-in history.
//!
//! Streak, points and consistency code consume only these two shapes, never
//! raw check-in slices:
//! - [`DateKeySet`]: days with a qualifying check-in (presence only)
//! - [`WeekCounts`]: number of check-ins per ISO week (multiplicity matters)
//!
//! Both are ordered collections so iteration is deterministic.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::checkin::CheckIn;
use crate::error::{CoreError, Result};
use crate::time::{DateKey, WeekKey};

/// Distinct local dates on which a goal was done.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKeySet(BTreeSet<DateKey>);

impl DateKeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: DateKey) -> bool {
        self.0.insert(key)
    }

    pub fn contains(&self, key: &DateKey) -> bool {
        self.0.contains(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = &DateKey> {
        self.0.iter()
    }

    /// Number of keys from `first` through `last`, both inclusive.
    pub fn count_between(&self, first: DateKey, last: DateKey) -> usize {
        if first > last {
            return 0;
        }
        self.0.range(first..=last).count()
    }
}

impl FromIterator<DateKey> for DateKeySet {
    fn from_iter<I: IntoIterator<Item = DateKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Check-in totals per ISO week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekCounts(BTreeMap<WeekKey, u32>);

impl WeekCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` check-ins to `week`.
    pub fn add(&mut self, week: WeekKey, count: u32) {
        let entry = self.0.entry(week).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Count for `week`; weeks without check-ins read as zero.
    pub fn get(&self, week: &WeekKey) -> u32 {
        self.0.get(week).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in ascending week order.
    pub fn iter(&self) -> impl Iterator<Item = (&WeekKey, &u32)> {
        self.0.iter()
    }
}

impl FromIterator<(WeekKey, u32)> for WeekCounts {
    fn from_iter<I: IntoIterator<Item = (WeekKey, u32)>>(iter: I) -> Self {
        let mut counts = WeekCounts::new();
        for (week, count) in iter {
            counts.add(week, count);
        }
        counts
    }
}

/// Days with at least one check-in.
pub fn summarize_daily<'a, I>(check_ins: I) -> DateKeySet
where
    I: IntoIterator<Item = &'a CheckIn>,
{
    check_ins
        .into_iter()
        .map(|check| check.local_date_key)
        .collect()
}

/// Days with at least `daily_target` check-ins.
///
/// With a target of 1 this is the same as [`summarize_daily`].
///
/// # Errors
///
/// Returns [`CoreError::InvalidConfiguration`] if `daily_target` is zero.
pub fn summarize_daily_with_target<'a, I>(check_ins: I, daily_target: u32) -> Result<DateKeySet>
where
    I: IntoIterator<Item = &'a CheckIn>,
{
    if daily_target == 0 {
        return Err(CoreError::invalid_config("daily_target", "must be at least 1"));
    }

    let mut per_day: BTreeMap<DateKey, u32> = BTreeMap::new();
    for check in check_ins {
        let count = per_day.entry(check.local_date_key).or_insert(0);
        *count = count.saturating_add(1);
    }

    Ok(per_day
        .into_iter()
        .filter(|(_, count)| *count >= daily_target)
        .map(|(key, _)| key)
        .collect())
}

/// Check-ins per week, counting every record.
pub fn summarize_weekly<'a, I>(check_ins: I) -> WeekCounts
where
    I: IntoIterator<Item = &'a CheckIn>,
{
    check_ins
        .into_iter()
        .map(|check| (check.week_key, 1))
        .collect()
}
