use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{PentadError, Result};

/// Persisted history: local `YYYY-MM-DD` date key to the habit names
/// completed that day. One record per date, overwritten on log.
pub type HistoryRecord = BTreeMap<String, Vec<String>>;

/// The ordered, fixed habit list. Order determines sector position in the
/// radial indicator and the label next to it.
#[derive(Clone, Debug)]
pub struct HabitList {
    names: Vec<String>,
}

impl HabitList {
    pub fn new(names: Vec<String>) -> Result<Self> {
        if names.is_empty() {
            return Err(PentadError::Configuration(
                "habit list must not be empty".to_string(),
            ));
        }
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(PentadError::Configuration(
                    "habit names must not be empty".to_string(),
                ));
            }
            if names[..i].contains(name) {
                return Err(PentadError::Configuration(format!(
                    "duplicate habit name '{}'",
                    name
                )));
            }
        }
        Ok(Self { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

/// Today's per-habit booleans, index-aligned with the habit list. Never
/// persisted directly; written into the history as names on log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailyState {
    done: Vec<bool>,
}

impl DailyState {
    pub fn new(habit_count: usize) -> Self {
        Self {
            done: vec![false; habit_count],
        }
    }

    /// Seeds today's state from an already-logged record, so reopening the
    /// app on the same day preserves progress. Stale names never match.
    pub fn from_record(habits: &HabitList, completed: &[String]) -> Self {
        let done = habits
            .names()
            .iter()
            .map(|name| completed.iter().any(|c| c == name))
            .collect();
        Self { done }
    }

    /// Flips the entry at `index`. Out-of-range indices are absorbed and
    /// reported as `false`.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.done.get_mut(index) {
            Some(slot) => {
                *slot = !*slot;
                true
            }
            None => false,
        }
    }

    pub fn mark_done(&mut self, index: usize) -> bool {
        match self.done.get_mut(index) {
            Some(slot) => {
                *slot = true;
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.done.fill(false);
    }

    pub fn flags(&self) -> &[bool] {
        &self.done
    }

    pub fn completed_count(&self) -> usize {
        self.done.iter().filter(|&&d| d).count()
    }

    pub fn completed_names(&self, habits: &HabitList) -> Vec<String> {
        habits
            .names()
            .iter()
            .zip(&self.done)
            .filter(|&(_, &done)| done)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn completion_ratio(&self) -> f64 {
        if self.done.is_empty() {
            return 0.0;
        }
        self.completed_count() as f64 / self.done.len() as f64
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The 7 dates of the week containing `today`, Monday first.
pub fn week_window(today: NaiveDate) -> [NaiveDate; 7] {
    let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    std::array::from_fn(|i| monday + Duration::days(i as i64))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeeklySummary {
    pub dates: [NaiveDate; 7],
    pub daily_series: [usize; 7],
    pub weekly_total: usize,
}

pub fn build_weekly_summary(history: &HistoryRecord, today: NaiveDate) -> WeeklySummary {
    let dates = week_window(today);
    let daily_series: [usize; 7] =
        std::array::from_fn(|i| history.get(&date_key(dates[i])).map_or(0, |names| names.len()));
    let weekly_total = daily_series.iter().sum();
    WeeklySummary {
        dates,
        daily_series,
        weekly_total,
    }
}

impl WeeklySummary {
    pub fn has_data(&self) -> bool {
        self.daily_series.iter().any(|&count| count > 0)
    }

    pub fn span_label(&self) -> String {
        let start = self.dates[0];
        let end = self.dates[6];

        if start.year() == end.year() && start.month() == end.month() {
            return format!("{}-{}", start.format("%b %-d"), end.format("%-d"));
        }

        if start.year() == end.year() {
            return format!("{}-{}", start.format("%b %-d"), end.format("%b %-d"));
        }

        format!(
            "{}-{}",
            start.format("%b %-d, %Y"),
            end.format("%b %-d, %Y")
        )
    }
}
