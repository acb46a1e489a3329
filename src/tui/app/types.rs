//! Core data types for the TUI application
//!
//! This module contains the fundamental data structures used throughout the TUI:
//! - `AppRow`: typed row record backing the applications table
//! - `DataSlice`: generic container with staleness tracking

use std::time::{Duration, Instant};

use crate::models::Application;

/// Typed row record for the applications table.
///
/// Selection handling reads from this record rather than from rendered cell
/// text, so column order is a pure display concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRow {
    pub app_id: String,
    pub name: String,
    pub attempt_count: usize,
    pub spark_user: String,
    pub completed: bool,
    pub start_time: String,
}

impl AppRow {
    #[must_use]
    pub fn from_application(app: &Application) -> Self {
        Self {
            app_id: app.id.clone(),
            name: app.name.clone(),
            attempt_count: app.attempt_count(),
            spark_user: app.spark_user().to_string(),
            completed: app.is_completed(),
            start_time: app
                .start_time()
                .map(|t| t.display())
                .unwrap_or_else(|| "-".to_string()),
        }
    }

    /// Status icon for the table cell, driven by the last attempt.
    #[must_use]
    pub fn status_icon(&self) -> &'static str {
        if self.completed { "✓" } else { "✗" }
    }

    /// Text the quick-search filter matches against.
    #[must_use]
    pub fn searchable_text(&self) -> String {
        format!("{} {} {}", self.app_id, self.name, self.spark_user).to_lowercase()
    }
}

/// Data slice with staleness tracking
///
/// Encapsulates data with timestamp tracking. The `data` field is private to ensure
/// all updates go through `update()`, which properly sets `last_updated`.
#[derive(Debug)]
pub struct DataSlice<T> {
    data: Vec<T>,
    pub last_updated: Option<Instant>,
    pub stale_threshold: Duration,
}

impl<T> Default for DataSlice<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            last_updated: None,
            stale_threshold: Duration::from_secs(30),
        }
    }
}

impl<T> DataSlice<T> {
    pub fn new(stale_threshold: Duration) -> Self {
        Self {
            data: Vec::new(),
            last_updated: None,
            stale_threshold,
        }
    }

    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.last_updated
            .map(|t| t.elapsed() > self.stale_threshold)
            .unwrap_or(true)
    }

    #[must_use]
    pub fn age(&self) -> Option<Duration> {
        self.last_updated.map(|t| t.elapsed())
    }

    pub fn update(&mut self, data: Vec<T>) {
        self.data = data;
        self.last_updated = Some(Instant::now());
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attempt, SparkTime};

    #[test]
    fn test_app_row_status_icon() {
        let mut app = Application {
            id: "app-001".to_string(),
            name: "WordCount".to_string(),
            attempts: vec![Attempt {
                attempt_id: Some(1),
                start_time: SparkTime::new("2017-01-01T00:00:00.000GMT"),
                end_time: SparkTime::new("2017-01-01T01:00:00.000GMT"),
                completed: true,
                spark_user: "alice".to_string(),
            }],
        };
        assert_eq!(AppRow::from_application(&app).status_icon(), "✓");

        app.attempts[0].completed = false;
        assert_eq!(AppRow::from_application(&app).status_icon(), "✗");
    }

    #[test]
    fn test_data_slice_staleness() {
        let mut slice: DataSlice<u32> = DataSlice::new(Duration::from_secs(60));
        assert!(slice.is_stale());

        slice.update(vec![1, 2, 3]);
        assert!(!slice.is_stale());
        assert_eq!(slice.get(2), Some(&3));
    }

    #[test]
    fn test_data_slice_iter_walks_current_data() {
        let mut slice: DataSlice<u32> = DataSlice::new(Duration::from_secs(60));
        assert_eq!(slice.iter().count(), 0);

        slice.update(vec![4, 5, 6]);
        assert_eq!(slice.iter().copied().collect::<Vec<_>>(), vec![4, 5, 6]);
        assert!(slice.iter().any(|v| *v == 5));
    }
}
