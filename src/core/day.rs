use chrono::NaiveDate;

use super::event::{CalendarEvent, EventStore};
use super::task::{Task, TaskStore};

/// Derived, read-only bundle of everything shown for one calendar day.
#[derive(Debug, Clone)]
pub struct DayView {
    pub date: NaiveDate,
    pub events: Vec<CalendarEvent>,
    pub tasks: Vec<Task>,
    pub worked_hours: f64,
}

/// Join the stores into a per-day view model.
///
/// Tasks carry no date, so the whole list is attached to `today` and no
/// other day gets any; events filter by their own date. Recomputed from
/// scratch whenever an input changes.
pub fn aggregate(date: NaiveDate, today: NaiveDate, events: &EventStore, tasks: &TaskStore) -> DayView {
    let events: Vec<CalendarEvent> = events.events_on(date).into_iter().cloned().collect();
    let tasks: Vec<Task> = if date == today {
        tasks.tasks().to_vec()
    } else {
        Vec::new()
    };
    let worked_hours = round_tenths(tasks.iter().map(Task::worked_hours).sum());

    DayView {
        date,
        events,
        tasks,
        worked_hours,
    }
}

/// One decimal place for display.
fn round_tenths(hours: f64) -> f64 {
    (hours * 10.0).round() / 10.0
}
