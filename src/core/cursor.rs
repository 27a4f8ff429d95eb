use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Calendar zoom level: how many days are visible at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    Month,
    Week,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// The single currently-viewed date plus the active granularity.
///
/// All operations are total over valid dates; consumers re-derive their
/// view models eagerly after every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCursor {
    pub date: NaiveDate,
    pub granularity: Granularity,
    pub week_start: Weekday,
}

impl Default for DateCursor {
    fn default() -> Self {
        Self::new(chrono::Local::now().date_naive(), Weekday::Sun)
    }
}

impl DateCursor {
    pub fn new(date: NaiveDate, week_start: Weekday) -> Self {
        Self {
            date,
            granularity: Granularity::Month,
            week_start,
        }
    }

    /// Advance or retreat by exactly one unit of the active granularity.
    ///
    /// Month steps clamp the day-of-month to the target month's length
    /// (Jan 31 -> Feb 28/29) and roll over year boundaries.
    pub fn navigate(&mut self, direction: Direction) {
        self.date = match (self.granularity, direction) {
            (Granularity::Month, Direction::Prev) => self
                .date
                .checked_sub_months(Months::new(1))
                .unwrap_or(self.date),
            (Granularity::Month, Direction::Next) => self
                .date
                .checked_add_months(Months::new(1))
                .unwrap_or(self.date),
            (Granularity::Week, Direction::Prev) => self.date - Duration::weeks(1),
            (Granularity::Week, Direction::Next) => self.date + Duration::weeks(1),
            (Granularity::Day, Direction::Prev) => self.date.pred_opt().unwrap_or(self.date),
            (Granularity::Day, Direction::Next) => self.date.succ_opt().unwrap_or(self.date),
        };
    }

    /// Change granularity without moving the cursor date.
    pub fn set_granularity(&mut self, granularity: Granularity) {
        self.granularity = granularity;
    }

    pub fn jump_to_today(&mut self) {
        self.date = chrono::Local::now().date_naive();
    }

    /// Jump to an explicit date, e.g. a clicked day cell.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    /// The ordered set of days to display for the active granularity.
    pub fn visible_days(&self) -> Vec<NaiveDate> {
        match self.granularity {
            Granularity::Month => month_of(self.date),
            Granularity::Week => week_of(self.date, self.week_start),
            Granularity::Day => vec![self.date],
        }
    }
}

/// The 7 consecutive days of the week containing `date`, ascending,
/// starting at `week_start`. A date already on the week boundary starts
/// its own week, so repeated prev/next cycles cannot drift.
pub fn week_of(date: NaiveDate, week_start: Weekday) -> Vec<NaiveDate> {
    let offset = (date.weekday().num_days_from_sunday() + 7
        - week_start.num_days_from_sunday())
        % 7;
    let start = date - Duration::days(offset as i64);
    (0..7).map(|i| start + Duration::days(i)).collect()
}

/// Every day of the month containing `date`, ascending. Leading and
/// trailing filler cells of a month grid belong to the presentation layer.
pub fn month_of(date: NaiveDate) -> Vec<NaiveDate> {
    (1..=days_in_month(date.year(), date.month()))
        .filter_map(|day| NaiveDate::from_ymd_opt(date.year(), date.month(), day))
        .collect()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(
        if month == 12 { year + 1 } else { year },
        if month == 12 { 1 } else { month + 1 },
        1,
    )
    .unwrap()
    .pred_opt()
    .unwrap()
    .day()
}
