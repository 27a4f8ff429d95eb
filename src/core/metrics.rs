use chrono::{Duration, NaiveDate};

use super::day::DayView;

/// User-selectable trailing window for the progress charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    TenDays,
    Month,
}

impl Period {
    pub fn days(self) -> usize {
        match self {
            Self::Week => 7,
            Self::TenDays => 10,
            Self::Month => 30,
        }
    }
}

/// One chart data point: per-day counts and a 0-100 productivity score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayMetric {
    pub date: NaiveDate,
    pub completed: u32,
    pub cancelled: u32,
    pub productivity: u8,
}

impl DayMetric {
    /// Derive a real data point from an aggregated day. Events carry no
    /// cancelled state in current scope, so `cancelled` is always zero
    /// here; the summarizer still guards the denominator.
    pub fn from_day_view(view: &DayView) -> Self {
        let completed = view.tasks.iter().filter(|t| t.completed).count() as u32;
        let total = view.tasks.len() as u32;
        let productivity = if total == 0 {
            0
        } else {
            (completed * 100 / total) as u8
        };

        Self {
            date: view.date,
            completed,
            cancelled: 0,
            productivity,
        }
    }
}

/// Headline numbers reduced from a trailing window of days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSummary {
    pub completed: u32,
    pub cancelled: u32,
    pub completion_rate: u8,
    pub avg_productivity: u8,
}

impl MetricsSummary {
    pub fn from_window(days: &[DayMetric]) -> Self {
        let completed: u32 = days.iter().map(|d| d.completed).sum();
        let cancelled: u32 = days.iter().map(|d| d.cancelled).sum();
        let avg_productivity = if days.is_empty() {
            0
        } else {
            (days.iter().map(|d| d.productivity as u32).sum::<u32>() / days.len() as u32) as u8
        };

        Self {
            completed,
            cancelled,
            completion_rate: completion_rate(completed, cancelled),
            avg_productivity,
        }
    }
}

/// `round(100 * completed / (completed + cancelled))`, 0 when nothing
/// happened at all.
pub fn completion_rate(completed: u32, cancelled: u32) -> u8 {
    let total = completed + cancelled;
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

/// The N ascending dates ending at `today`.
pub fn trailing_window(today: NaiveDate, period: Period) -> Vec<NaiveDate> {
    (0..period.days())
        .rev()
        .map(|ago| today - Duration::days(ago as i64))
        .collect()
}
