use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::config::DaybookConfig;
use crate::core::cursor::{DateCursor, Direction, Granularity};
use crate::core::day::{self, DayView};
use crate::core::event::EventStore;
use crate::core::metrics::{self, DayMetric, MetricsSummary, Period};
use crate::core::profile::UserProfile;
use crate::core::task::{Task, TaskStore};
use crate::core::ValidationError;
use crate::notify::Notifier;
use crate::storage::Storage;

/// Headline numbers for the "Today's Overview" card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overview {
    /// Completed share of all tasks, 0-100; 0 when the list is empty.
    pub completion_rate: u8,
    pub upcoming_events: usize,
    pub total_tasks: usize,
}

/// The dashboard's state root: cursor and stores owned here, storage and
/// notification injected. Mutations apply in memory first; the durable
/// write follows and its failure is reported without rolling back.
pub struct Dashboard<S: Storage, N: Notifier> {
    config: DaybookConfig,
    cursor: DateCursor,
    events: EventStore,
    tasks: TaskStore,
    profile: Option<UserProfile>,
    storage: S,
    notifier: N,
}

impl<S: Storage, N: Notifier> Dashboard<S, N> {
    pub fn new(config: DaybookConfig, storage: S, notifier: N) -> Self {
        let tasks = TaskStore::load(&storage);
        let profile = UserProfile::load(&storage);
        let cursor = DateCursor::new(today(), config.week_start);

        Self {
            config,
            cursor,
            events: EventStore::new(),
            tasks,
            profile,
            storage,
            notifier,
        }
    }

    // Calendar navigation

    pub fn navigate(&mut self, direction: Direction) {
        self.cursor.navigate(direction);
    }

    pub fn set_granularity(&mut self, granularity: Granularity) {
        self.cursor.set_granularity(granularity);
    }

    pub fn jump_to_today(&mut self) {
        self.cursor.jump_to_today();
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.cursor.select_date(date);
    }

    pub fn visible_days(&self) -> Vec<NaiveDate> {
        self.cursor.visible_days()
    }

    // Events

    pub fn add_event(
        &mut self,
        title: impl Into<String>,
        date: NaiveDate,
        start: NaiveTime,
        end: Option<NaiveTime>,
        description: Option<String>,
    ) -> Result<Uuid, ValidationError> {
        match self.events.add_event(title, date, start, end, description) {
            Ok(id) => {
                self.notifier.report_success("Event added");
                Ok(id)
            }
            Err(err) => {
                self.notifier.report_failure(&err.to_string());
                Err(err)
            }
        }
    }

    pub fn remove_event(&mut self, id: Uuid) {
        self.events.remove_event(id);
    }

    // Tasks

    pub fn add_task(
        &mut self,
        title: impl Into<String>,
        start: Option<NaiveTime>,
        end: Option<NaiveTime>,
    ) -> Result<Task, ValidationError> {
        match self.tasks.add_task(title, start, end) {
            Ok(task) => {
                self.persist_tasks();
                Ok(task)
            }
            Err(err) => {
                self.notifier.report_failure(&err.to_string());
                Err(err)
            }
        }
    }

    pub fn toggle_task(&mut self, id: u32) {
        self.tasks.toggle_task(id);
        self.persist_tasks();
    }

    pub fn remove_task(&mut self, id: u32) {
        self.tasks.remove_task(id);
        self.persist_tasks();
    }

    fn persist_tasks(&mut self) {
        if let Err(err) = self.tasks.persist(&mut self.storage) {
            log::error!("Failed to save tasks: {}", err);
            self.notifier.report_failure("Failed to save tasks");
        }
    }

    // Derived views

    /// One view model per visible day, recomputed from current store
    /// contents.
    pub fn day_views(&self) -> Vec<DayView> {
        let today = today();
        self.visible_days()
            .into_iter()
            .map(|date| day::aggregate(date, today, &self.events, &self.tasks))
            .collect()
    }

    pub fn overview(&self) -> Overview {
        let total_tasks = self.tasks.len();
        let completed = self.tasks.completed_count();
        let completion_rate = if total_tasks == 0 {
            0
        } else {
            ((completed as f64 / total_tasks as f64) * 100.0).round() as u8
        };

        Overview {
            completion_rate,
            upcoming_events: self.events.upcoming_count(today()),
            total_tasks,
        }
    }

    /// Chart data for the trailing window ending today.
    pub fn metrics_window(&self, period: Period) -> Vec<DayMetric> {
        let today = today();
        metrics::trailing_window(today, period)
            .into_iter()
            .map(|date| {
                DayMetric::from_day_view(&day::aggregate(date, today, &self.events, &self.tasks))
            })
            .collect()
    }

    pub fn metrics_summary(&self, period: Period) -> MetricsSummary {
        MetricsSummary::from_window(&self.metrics_window(period))
    }

    // Accessors

    pub fn cursor(&self) -> &DateCursor {
        &self.cursor
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn events(&self) -> &EventStore {
        &self.events
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn config(&self) -> &DaybookConfig {
        &self.config
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::test_support::RecordingNotifier;
    use crate::storage::{MemoryStorage, StorageError, TASKS_KEY};

    fn dashboard() -> Dashboard<MemoryStorage, RecordingNotifier> {
        let mut config = DaybookConfig::default();
        config.data_dir = std::path::PathBuf::from("/unused");
        Dashboard::new(config, MemoryStorage::default(), RecordingNotifier::default())
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn starts_with_default_tasks_and_no_profile() {
        let dash = dashboard();
        assert_eq!(dash.tasks().len(), 4);
        assert!(dash.profile().is_none());
    }

    #[test]
    fn add_task_persists_to_storage() {
        let mut dash = dashboard();
        dash.add_task("Water plants", None, None).unwrap();

        let saved = dash.storage.load(TASKS_KEY).unwrap().unwrap();
        assert!(saved.contains("Water plants"));
        assert!(dash.notifier.failures.is_empty());
    }

    #[test]
    fn add_task_with_blank_title_reports_and_changes_nothing() {
        let mut dash = dashboard();
        let before = dash.tasks().len();

        assert!(dash.add_task("   ", None, None).is_err());

        assert_eq!(dash.tasks().len(), before);
        assert_eq!(dash.notifier.failures.len(), 1);
        assert!(dash.storage.load(TASKS_KEY).unwrap().is_none());
    }

    #[test]
    fn toggle_and_remove_persist() {
        let mut dash = dashboard();
        dash.toggle_task(1);
        assert!(dash.tasks().tasks()[0].completed);

        dash.remove_task(1);
        let saved = dash.storage.load(TASKS_KEY).unwrap().unwrap();
        assert!(!saved.contains("Morning Exercise"));
    }

    #[test]
    fn add_event_reports_outcomes() {
        let mut dash = dashboard();
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        dash.add_event("Standup", day, time(9, 0), Some(time(9, 15)), None)
            .unwrap();
        assert_eq!(dash.notifier.successes, vec!["Event added".to_string()]);

        assert!(dash
            .add_event("Bad", day, time(9, 0), Some(time(8, 0)), None)
            .is_err());
        assert_eq!(dash.notifier.failures.len(), 1);
        assert_eq!(dash.events().len(), 1);
    }

    #[test]
    fn overview_reflects_store_contents() {
        let mut dash = dashboard();
        // Defaults: 4 tasks, 1 completed.
        let overview = dash.overview();
        assert_eq!(overview.total_tasks, 4);
        assert_eq!(overview.completion_rate, 25);
        assert_eq!(overview.upcoming_events, 0);

        let far_future = NaiveDate::from_ymd_opt(9999, 1, 1).unwrap();
        dash.add_event("Conference", far_future, time(9, 0), None, None)
            .unwrap();
        assert_eq!(dash.overview().upcoming_events, 1);
    }

    #[test]
    fn overview_on_empty_task_list_has_zero_rate() {
        let mut dash = dashboard();
        for id in 1..=4 {
            dash.remove_task(id);
        }
        assert_eq!(dash.overview().completion_rate, 0);
    }

    #[test]
    fn day_views_cover_visible_range_and_attach_tasks_to_today() {
        let mut dash = dashboard();
        dash.set_granularity(Granularity::Week);
        let views = dash.day_views();
        assert_eq!(views.len(), 7);

        // The cursor starts on today, so exactly one visible day carries
        // the global task list.
        let with_tasks: Vec<_> = views.iter().filter(|v| !v.tasks.is_empty()).collect();
        assert_eq!(with_tasks.len(), 1);
        assert_eq!(with_tasks[0].tasks.len(), 4);
        // Defaults: 1h + 1h + 1h + 0.5h
        assert_eq!(with_tasks[0].worked_hours, 3.5);
    }

    #[test]
    fn metrics_summary_counts_todays_completions() {
        let dash = dashboard();
        let summary = dash.metrics_summary(Period::Week);
        // Only today contributes: one completed default task, nothing
        // cancelled.
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.cancelled, 0);
        assert_eq!(summary.completion_rate, 100);
    }

    #[test]
    fn failed_write_keeps_memory_state_and_reports() {
        struct FailingStorage;

        impl Storage for FailingStorage {
            fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
                Ok(None)
            }

            fn save(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
                Err(StorageError::Write {
                    key: key.to_string(),
                    source: std::io::Error::other("disk full"),
                })
            }
        }

        let mut dash = Dashboard::new(
            DaybookConfig::default(),
            FailingStorage,
            RecordingNotifier::default(),
        );
        let task = dash.add_task("Still here", None, None).unwrap();

        assert!(dash.tasks().tasks().iter().any(|t| t.id == task.id));
        assert_eq!(dash.notifier.failures, vec!["Failed to save tasks".to_string()]);
    }
}
