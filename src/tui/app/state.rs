//! Application state types for the TUI
//!
//! This module contains the state management types:
//! - View enum and per-view navigation state (ListState)
//! - Generation-versioned selection state (SelectionState)
//! - Modal states (Help, Filter)
//! - Data caching with staleness tracking (DataCache)
//! - Feedback state for errors and notifications

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::models::MonitorConfig;
use crate::models::{
    Application, Attempt, ExecutorSummary, JobSummary, RddInfo, StageDetail, StageSummary,
};

use super::plan::SelectionPlan;
use super::types::{AppRow, DataSlice};

// ============================================================================
// Selection State
// ============================================================================

/// All data derived from the currently selected application.
///
/// Every selection bumps `generation` and resets the record wholesale, so a
/// fetch completing for an earlier selection can be recognized and dropped.
/// Exactly one application is selected at a time; all derived regions are
/// invalidated together on reselection.
#[derive(Debug, Default)]
pub struct SelectionState {
    pub generation: u64,
    pub app_id: Option<String>,
    pub attempt_id: u32,
    pub application_name: String,

    pub basic_info: Option<Application>,
    /// Container id, or a placeholder label for local jobs.
    pub am_container: Option<String>,
    pub diagnostics: Option<String>,
    pub driver_log: Option<String>,
    pub job_result: Option<String>,
    pub jobs: Option<Vec<JobSummary>>,
    pub stages: Option<Vec<StageSummary>>,
    pub storage: Option<Vec<RddInfo>>,
    pub executors: Option<Vec<ExecutorSummary>>,
    /// Stage details keyed by stage id, filled as the per-stage fetches land.
    /// Backs both the task table and the stage-filter cascade.
    pub stage_details: HashMap<u64, StageDetail>,

    /// Stage ids of the job picked in the graph view, scoping the stage and
    /// task tables. `None` means unscoped.
    pub stage_scope: Option<Vec<u64>>,
    /// Set once the job menu has been built for this selection.
    pub job_graph_generated: bool,
}

impl SelectionState {
    /// Reset for a new selection, bumping the generation. Placeholder labels
    /// from the plan seed the suppressed regions.
    pub fn reset_for(&mut self, plan: &SelectionPlan) -> u64 {
        self.generation += 1;
        self.app_id = Some(plan.app_id.clone());
        self.attempt_id = plan.attempt_id;
        self.application_name = plan.application_name.clone();

        self.basic_info = None;
        self.am_container = plan.container_placeholder().map(str::to_string);
        self.diagnostics = plan.diagnostics_placeholder().map(str::to_string);
        self.driver_log = None;
        self.job_result = None;
        self.jobs = None;
        self.stages = None;
        self.storage = None;
        self.executors = None;
        self.stage_details.clear();
        self.stage_scope = None;
        self.job_graph_generated = false;

        self.generation
    }

    /// Whether a fetch completion tagged with `generation` belongs to the
    /// current selection.
    #[must_use]
    pub fn accepts(&self, generation: u64) -> bool {
        generation == self.generation
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.app_id.is_some()
    }

    /// The attempt this selection addresses, once the basic-info fetch has
    /// landed. Attempt `0` denotes the legacy no-id format.
    #[must_use]
    pub fn addressed_attempt(&self) -> Option<&Attempt> {
        let app = self.basic_info.as_ref()?;
        let selected = (self.attempt_id != 0).then_some(self.attempt_id);
        app.attempt_matching(selected)
    }
}

// ============================================================================
// Filter Types
// ============================================================================

/// Applied filter that persists when the filter modal closes
#[derive(Debug, Clone, Default)]
pub struct ActiveFilter {
    pub text: String,
}

impl ActiveFilter {
    /// Get filter text as Option for filtering logic
    #[must_use]
    pub fn as_option(&self) -> Option<String> {
        if self.text.is_empty() {
            None
        } else {
            Some(self.text.clone())
        }
    }
}

// ============================================================================
// Clipboard Feedback
// ============================================================================

/// Clipboard operation result for visual feedback
#[derive(Debug, Clone)]
pub struct ClipboardFeedback {
    pub message: String,
    pub success: bool,
    pub timestamp: Instant,
}

impl ClipboardFeedback {
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
            timestamp: Instant::now(),
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
            timestamp: Instant::now(),
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.timestamp.elapsed() < Duration::from_secs(2)
    }
}

// ============================================================================
// List Navigation State
// ============================================================================

/// List state with selection and scroll tracking
#[derive(Debug, Clone, Default)]
pub struct ListState {
    pub selected: usize,
    pub scroll_offset: usize,
    pub visible_count: usize,
}

impl ListState {
    pub fn clamp(&mut self, list_len: usize) {
        if list_len == 0 {
            self.selected = 0;
            self.scroll_offset = 0;
        } else {
            self.selected = self.selected.min(list_len - 1);
            if self.selected < self.scroll_offset {
                self.scroll_offset = self.selected;
            } else if self.visible_count > 0
                && self.selected >= self.scroll_offset + self.visible_count
            {
                self.scroll_offset = self.selected.saturating_sub(self.visible_count - 1);
            }
        }
    }

    pub fn move_up(&mut self, list_len: usize) {
        if self.selected > 0 {
            self.selected -= 1;
            self.clamp(list_len);
        }
    }

    pub fn move_down(&mut self, list_len: usize) {
        if list_len > 0 && self.selected < list_len - 1 {
            self.selected += 1;
            self.clamp(list_len);
        }
    }

    pub fn move_to_top(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn move_to_bottom(&mut self, list_len: usize) {
        if list_len > 0 {
            self.selected = list_len - 1;
            if self.visible_count > 0 {
                self.scroll_offset = list_len.saturating_sub(self.visible_count);
            }
        }
    }

    pub fn page_up(&mut self, list_len: usize) {
        let jump = self.visible_count.max(1) / 2;
        self.selected = self.selected.saturating_sub(jump);
        self.clamp(list_len);
    }

    pub fn page_down(&mut self, list_len: usize) {
        let jump = self.visible_count.max(1) / 2;
        self.selected = self.selected.saturating_add(jump);
        self.clamp(list_len);
    }
}

// ============================================================================
// View Enum
// ============================================================================

/// Current view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Applications,
    Graph,
    Stages,
    Tasks,
    Executors,
    Storage,
    Logs,
}

impl View {
    #[must_use]
    pub fn next(&self) -> Self {
        match self {
            View::Applications => View::Graph,
            View::Graph => View::Stages,
            View::Stages => View::Tasks,
            View::Tasks => View::Executors,
            View::Executors => View::Storage,
            View::Storage => View::Logs,
            View::Logs => View::Applications,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            View::Applications => "Applications",
            View::Graph => "Graph",
            View::Stages => "Stages",
            View::Tasks => "Tasks",
            View::Executors => "Executors",
            View::Storage => "Storage",
            View::Logs => "Logs",
        }
    }
}

// ============================================================================
// Modal State
// ============================================================================

/// Modal overlay state - only one modal can be active at a time.
///
/// NOTE: Filter's edit_buffer is EPHEMERAL - it's the draft being typed.
/// The actual applied filter lives in DataCache.active_filter
#[derive(Debug, Default)]
pub enum ModalState {
    #[default]
    None,
    Help,
    Filter {
        edit_buffer: String,
        cursor: usize,
    },
}

impl ModalState {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, ModalState::None)
    }

    #[must_use]
    pub fn is_editing_filter(&self) -> bool {
        matches!(self, ModalState::Filter { .. })
    }
}

// ============================================================================
// Data Cache
// ============================================================================

/// Selection-independent data cache with staleness tracking
#[derive(Debug)]
pub struct DataCache {
    pub applications: DataSlice<Application>,
    /// Typed rows derived from `applications`, rebuilt on every refresh.
    pub app_rows: Vec<AppRow>,

    /// Persistent filter state (survives modal close)
    pub active_filter: Option<ActiveFilter>,
}

impl DataCache {
    /// Create a new DataCache with configured stale thresholds
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            applications: DataSlice::new(Duration::from_secs(
                config.refresh.applications_interval * 3,
            )),
            app_rows: Vec::new(),
            active_filter: None,
        }
    }

    /// Replace the applications list and rebuild the typed rows.
    pub fn set_applications(&mut self, apps: Vec<Application>) {
        self.app_rows = apps.iter().map(AppRow::from_application).collect();
        self.applications.update(apps);
    }

    #[must_use]
    pub fn get_filter(&self) -> Option<String> {
        self.active_filter.as_ref().and_then(|f| f.as_option())
    }

    pub fn set_filter(&mut self, text: String) {
        if text.is_empty() {
            self.active_filter = None;
        } else {
            self.active_filter = Some(ActiveFilter { text });
        }
    }

    pub fn clear_filter(&mut self) {
        self.active_filter = None;
    }
}

// ============================================================================
// Feedback State
// ============================================================================

/// Unified feedback state for errors, warnings, and transient messages
#[derive(Debug)]
pub struct FeedbackState {
    last_error: Option<(String, Instant)>,
    error_display_duration: Duration,
    pub config_warnings: Vec<String>,
    clipboard_feedback: Option<ClipboardFeedback>,
}

impl FeedbackState {
    pub fn new(config_warnings: Vec<String>) -> Self {
        Self {
            last_error: None,
            error_display_duration: Duration::from_secs(5),
            config_warnings,
            clipboard_feedback: None,
        }
    }

    pub fn set_error(&mut self, msg: String) {
        self.last_error = Some((msg, Instant::now()));
    }

    #[must_use]
    pub fn should_show_error(&self) -> bool {
        self.last_error
            .as_ref()
            .map(|(_, t)| t.elapsed() < self.error_display_duration)
            .unwrap_or(false)
    }

    #[must_use]
    pub fn current_error(&self) -> Option<&str> {
        if self.should_show_error() {
            self.last_error.as_ref().map(|(msg, _)| msg.as_str())
        } else {
            None
        }
    }

    pub fn set_clipboard_feedback(&mut self, feedback: ClipboardFeedback) {
        self.clipboard_feedback = Some(feedback);
    }

    #[must_use]
    pub fn current_clipboard_feedback(&self) -> Option<&ClipboardFeedback> {
        self.clipboard_feedback.as_ref().filter(|f| f.is_visible())
    }
}

// ============================================================================
// Timing State
// ============================================================================

/// Grouped timing state for activity tracking
#[derive(Debug)]
pub struct TimingState {
    pub last_input: Instant,
    pub last_refresh: Option<Instant>,
}

impl Default for TimingState {
    fn default() -> Self {
        Self {
            last_input: Instant::now(),
            last_refresh: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attempt, SparkTime};

    fn plan_for(id: &str) -> SelectionPlan {
        let app = Application {
            id: id.to_string(),
            name: format!("app {id}"),
            attempts: vec![Attempt {
                attempt_id: Some(1),
                start_time: SparkTime::new("2017-01-01T00:00:00.000GMT"),
                end_time: SparkTime::new("2017-01-01T01:00:00.000GMT"),
                completed: true,
                spark_user: "alice".to_string(),
            }],
        };
        SelectionPlan::for_application(&app)
    }

    #[test]
    fn test_reselection_bumps_generation_and_resets() {
        let mut sel = SelectionState::default();
        let g1 = sel.reset_for(&plan_for("app-001"));
        sel.jobs = Some(vec![]);
        sel.job_graph_generated = true;
        sel.stage_scope = Some(vec![1, 2]);

        let g2 = sel.reset_for(&plan_for("app-002"));
        assert!(g2 > g1);
        assert!(sel.jobs.is_none());
        assert!(!sel.job_graph_generated);
        assert!(sel.stage_scope.is_none());
        assert_eq!(sel.app_id.as_deref(), Some("app-002"));
    }

    #[test]
    fn test_stale_generation_rejected() {
        let mut sel = SelectionState::default();
        let g1 = sel.reset_for(&plan_for("app-001"));
        let g2 = sel.reset_for(&plan_for("app-002"));
        assert!(!sel.accepts(g1));
        assert!(sel.accepts(g2));
    }

    #[test]
    fn test_addressed_attempt_follows_basic_info() {
        let mut sel = SelectionState::default();
        assert!(sel.addressed_attempt().is_none());

        let plan = plan_for("app-001");
        sel.reset_for(&plan);
        assert!(sel.addressed_attempt().is_none());

        sel.basic_info = Some(Application {
            id: "app-001".to_string(),
            name: "app app-001".to_string(),
            attempts: vec![
                Attempt {
                    attempt_id: Some(1),
                    start_time: SparkTime::new("2017-01-01T00:00:00.000GMT"),
                    end_time: SparkTime::new("2017-01-01T01:00:00.000GMT"),
                    completed: true,
                    spark_user: "alice".to_string(),
                },
                Attempt {
                    attempt_id: Some(2),
                    start_time: SparkTime::new("2017-01-02T00:00:00.000GMT"),
                    end_time: SparkTime::new("2017-01-02T01:00:00.000GMT"),
                    completed: false,
                    spark_user: "alice".to_string(),
                },
            ],
        });
        sel.attempt_id = 2;
        let attempt = sel.addressed_attempt().unwrap();
        assert_eq!(attempt.attempt_id, Some(2));
    }

    #[test]
    fn test_local_selection_seeds_placeholders() {
        let app = Application {
            id: "local-123".to_string(),
            name: "local job".to_string(),
            attempts: vec![],
        };
        let plan = SelectionPlan::for_application(&app);
        let mut sel = SelectionState::default();
        sel.reset_for(&plan);
        assert_eq!(sel.am_container.as_deref(), Some("Local Task"));
        assert_eq!(sel.diagnostics.as_deref(), Some("No Yarn Error Message"));
    }

    #[test]
    fn test_list_state_navigation() {
        let mut state = ListState {
            visible_count: 10,
            ..Default::default()
        };

        state.move_down(5);
        assert_eq!(state.selected, 1);

        state.move_to_bottom(5);
        assert_eq!(state.selected, 4);

        state.move_to_top();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_view_cycling() {
        assert_eq!(View::Applications.next(), View::Graph);
        assert_eq!(View::Logs.next(), View::Applications);
    }
}
