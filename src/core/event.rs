use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ValidationError;

/// A user-created calendar entry. Immutable after creation; removed only
/// by explicit deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: Option<NaiveTime>,
    pub description: Option<String>,
}

/// Insertion-ordered collection of calendar events.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<CalendarEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a new event, returning its fresh id.
    ///
    /// A blank title or an end time not strictly after the start time
    /// aborts with a `ValidationError` and leaves the store untouched.
    pub fn add_event(
        &mut self,
        title: impl Into<String>,
        date: NaiveDate,
        start: NaiveTime,
        end: Option<NaiveTime>,
        description: Option<String>,
    ) -> Result<Uuid, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if let Some(end) = end {
            if end <= start {
                return Err(ValidationError::EndNotAfterStart);
            }
        }

        let event = CalendarEvent {
            id: Uuid::new_v4(),
            title,
            date,
            start,
            end,
            description,
        };
        let id = event.id;
        self.events.push(event);
        Ok(id)
    }

    /// All events on the given date, in store insertion order.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        self.events.iter().filter(|e| e.date == date).collect()
    }

    /// Remove by id; absent ids are a benign no-op.
    pub fn remove_event(&mut self, id: Uuid) {
        self.events.retain(|e| e.id != id);
    }

    /// Events dated today or later, for the overview card.
    pub fn upcoming_count(&self, today: NaiveDate) -> usize {
        self.events.iter().filter(|e| e.date >= today).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalendarEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
