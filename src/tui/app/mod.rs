//! Application state and core logic for the TUI
//!
//! This module contains the main App struct and all associated state management.
//! The architecture follows a TEA-inspired pattern with mutable state and method-based updates.

// Submodules
pub mod filter;
pub mod graph;
mod plan;
mod state;
mod types;

// Re-export public types
pub use plan::{SelectionPlan, NO_STAGE_INFO_LABEL};
pub use state::{
    ClipboardFeedback, DataCache, FeedbackState, ListState, ModalState, SelectionState,
    TimingState, View,
};
pub use types::AppRow;

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::models::{Application, MonitorConfig, SessionState};
use crate::shim::ShimClient;
use crate::tui::event::{DataEvent, EventResult, InputEvent, KeyAction, SelectionData};
use crate::tui::runtime::spawn_selection_fetches;

/// Label shown when the YARN side reports no AM container.
pub const NO_CONTAINER_LABEL: &str = "No container found";

/// Main application state
///
/// Grouped fields:
/// - `modal`: unified modal state (help overlay, filter editing)
/// - `data`: selection-independent cache (applications list)
/// - `selection`: everything derived from the selected application
/// - `feedback`: errors and transient messages
/// - `timing`: activity tracking for the adaptive poller
pub struct App {
    // Lifecycle
    pub running: bool,

    // View State
    pub current_view: View,
    pub previous_view: View,

    // Modal State
    pub modal: ModalState,

    // Data
    pub data: DataCache,
    pub selection: SelectionState,

    // Per-view navigation
    pub apps_list: ListState,
    pub graph_menu: ListState,
    pub stages_list: ListState,
    pub tasks_list: ListState,
    pub executors_list: ListState,
    pub storage_list: ListState,
    pub log_scroll: usize,

    // Feedback
    pub feedback: FeedbackState,

    // Timing
    pub timing: TimingState,

    // Configuration and persisted session
    pub config: MonitorConfig,
    pub session: SessionState,

    // Communication
    pub data_tx: mpsc::Sender<DataEvent>,
    shim: Arc<ShimClient>,
    /// Cancels the in-flight fetches of the previous selection.
    selection_cancel: CancellationToken,
}

impl App {
    /// Create a new App instance with the required data channel sender.
    pub fn new(
        config: MonitorConfig,
        config_warnings: Vec<String>,
        session: SessionState,
        shim: Arc<ShimClient>,
        data_tx: mpsc::Sender<DataEvent>,
    ) -> Self {
        Self {
            running: true,
            current_view: View::Applications,
            previous_view: View::Applications,

            modal: ModalState::None,

            data: DataCache::new(&config),
            selection: SelectionState::default(),

            apps_list: ListState::default(),
            graph_menu: ListState::default(),
            stages_list: ListState::default(),
            tasks_list: ListState::default(),
            executors_list: ListState::default(),
            storage_list: ListState::default(),
            log_scroll: 0,

            feedback: FeedbackState::new(config_warnings),
            timing: TimingState::default(),

            config,
            session,

            data_tx,
            shim,
            selection_cancel: CancellationToken::new(),
        }
    }

    /// Handle an input event
    pub fn handle_input(&mut self, event: InputEvent) -> EventResult {
        self.timing.last_input = Instant::now();

        match event {
            InputEvent::Key(key_event) => {
                let in_filter = self.modal.is_editing_filter();
                let action = KeyAction::from_key_event(key_event, in_filter);
                self.handle_action(action)
            }
            InputEvent::Resize(_, _) => EventResult::Continue,
            InputEvent::Mouse(mouse_event) => {
                let action = KeyAction::from_mouse_event(mouse_event);
                self.handle_action(action)
            }
        }
    }

    /// Handle a key action
    fn handle_action(&mut self, action: KeyAction) -> EventResult {
        // Help overlay takes priority
        if matches!(self.modal, ModalState::Help) {
            match action {
                KeyAction::Escape | KeyAction::ShowHelp | KeyAction::Quit => {
                    self.modal = ModalState::None;
                    return EventResult::Continue;
                }
                _ => return EventResult::Unchanged,
            }
        }

        if self.modal.is_editing_filter() {
            return self.handle_filter_action(action);
        }

        if let Some(result) = self.handle_navigation(&action) {
            return result;
        }

        if let Some(result) = self.handle_view_switch(&action) {
            return result;
        }

        match action {
            KeyAction::Quit => {
                self.running = false;
                EventResult::Quit
            }

            KeyAction::Select => {
                match self.current_view {
                    View::Applications => self.select_application(),
                    View::Graph => self.select_graph_job(),
                    _ => {}
                }
                EventResult::Continue
            }
            KeyAction::Refresh => {
                // Re-run the selection fan-out for the current application
                self.reselect_current();
                EventResult::Continue
            }
            KeyAction::OpenFilter => {
                let initial_text = self.data.get_filter().unwrap_or_default();
                self.modal = ModalState::Filter {
                    cursor: initial_text.len(),
                    edit_buffer: initial_text,
                };
                EventResult::Continue
            }
            KeyAction::YankAppId => {
                self.yank_selected_app_id();
                EventResult::Continue
            }
            KeyAction::ClearStageScope => {
                if self.selection.stage_scope.take().is_some() {
                    self.tasks_list.move_to_top();
                    self.stages_list.move_to_top();
                }
                EventResult::Continue
            }
            KeyAction::ShowHelp => {
                self.modal = ModalState::Help;
                EventResult::Continue
            }
            KeyAction::Escape => {
                if self.data.active_filter.is_some() {
                    self.data.clear_filter();
                } else if self.selection.stage_scope.take().is_none()
                    && self.current_view != View::Applications
                {
                    self.switch_view(View::Applications);
                }
                EventResult::Continue
            }

            KeyAction::MouseClick { row, .. } => {
                self.handle_mouse_click(row);
                EventResult::Continue
            }

            _ => EventResult::Unchanged,
        }
    }

    /// Handle navigation actions (returns Some if action was handled)
    fn handle_navigation(&mut self, action: &KeyAction) -> Option<EventResult> {
        if self.current_view == View::Logs {
            return match action {
                KeyAction::MoveUp | KeyAction::MouseScrollUp => {
                    self.log_scroll = self.log_scroll.saturating_sub(1);
                    Some(EventResult::Continue)
                }
                KeyAction::MoveDown | KeyAction::MouseScrollDown => {
                    self.log_scroll = self.log_scroll.saturating_add(1);
                    Some(EventResult::Continue)
                }
                KeyAction::MoveToTop => {
                    self.log_scroll = 0;
                    Some(EventResult::Continue)
                }
                _ => None,
            };
        }

        match action {
            KeyAction::MoveUp | KeyAction::MouseScrollUp => {
                self.with_current_list(|state, len| state.move_up(len));
                Some(EventResult::Continue)
            }
            KeyAction::MoveDown | KeyAction::MouseScrollDown => {
                self.with_current_list(|state, len| state.move_down(len));
                Some(EventResult::Continue)
            }
            KeyAction::MoveToTop => {
                self.with_current_list(|state, _| state.move_to_top());
                Some(EventResult::Continue)
            }
            KeyAction::MoveToBottom => {
                self.with_current_list(|state, len| state.move_to_bottom(len));
                Some(EventResult::Continue)
            }
            KeyAction::PageUp => {
                self.with_current_list(|state, len| state.page_up(len));
                Some(EventResult::Continue)
            }
            KeyAction::PageDown => {
                self.with_current_list(|state, len| state.page_down(len));
                Some(EventResult::Continue)
            }
            _ => None,
        }
    }

    /// Handle view switching actions (returns Some if action was handled)
    fn handle_view_switch(&mut self, action: &KeyAction) -> Option<EventResult> {
        let view = match action {
            KeyAction::SwitchToApplications => View::Applications,
            KeyAction::SwitchToGraph => View::Graph,
            KeyAction::SwitchToStages => View::Stages,
            KeyAction::SwitchToTasks => View::Tasks,
            KeyAction::SwitchToExecutors => View::Executors,
            KeyAction::SwitchToStorage => View::Storage,
            KeyAction::SwitchToLogs => View::Logs,
            KeyAction::NextView => self.current_view.next(),
            _ => return None,
        };
        self.switch_view(view);
        Some(EventResult::Continue)
    }

    /// Handle mouse click to select row in the current list view
    fn handle_mouse_click(&mut self, row: u16) {
        if self.modal.is_active() || self.current_view == View::Logs {
            return;
        }

        // Layout above the first data row: tab bar, info bar, block border,
        // table header
        const CONTENT_START: u16 = 4;
        if row < CONTENT_START {
            return;
        }

        let clicked_index = (row - CONTENT_START) as usize;
        let len = self.current_list_len();
        if len == 0 {
            return;
        }

        self.with_current_list(|state, list_len| {
            let target = state.scroll_offset + clicked_index;
            if target < list_len {
                state.selected = target;
            }
        });
    }

    fn handle_filter_action(&mut self, action: KeyAction) -> EventResult {
        match action {
            KeyAction::Escape => {
                // Discard edit buffer, keep previous filter
                self.modal = ModalState::None;
                EventResult::Continue
            }
            KeyAction::Select => {
                if let ModalState::Filter { edit_buffer, .. } = &self.modal {
                    self.data.set_filter(edit_buffer.clone());
                }
                self.modal = ModalState::None;
                self.apps_list.clamp(self.current_list_len());
                EventResult::Continue
            }
            KeyAction::FilterClear => {
                if let ModalState::Filter { edit_buffer, cursor } = &mut self.modal {
                    edit_buffer.clear();
                    *cursor = 0;
                }
                EventResult::Continue
            }
            KeyAction::FilterBackspace => {
                if let ModalState::Filter { edit_buffer, cursor } = &mut self.modal
                    && *cursor > 0
                {
                    *cursor -= 1;
                    edit_buffer.remove(*cursor);
                }
                EventResult::Continue
            }
            KeyAction::FilterChar(c) => {
                if let ModalState::Filter { edit_buffer, cursor } = &mut self.modal {
                    edit_buffer.insert(*cursor, c);
                    *cursor += 1;
                }
                EventResult::Continue
            }
            _ => EventResult::Unchanged,
        }
    }

    /// Handle a data event
    pub fn handle_data(&mut self, event: DataEvent) -> EventResult {
        match event {
            DataEvent::ApplicationsUpdated(apps) => {
                self.data.set_applications(apps);
                self.apps_list.clamp(self.display_rows().len());
                self.timing.last_refresh = Some(Instant::now());
                self.restore_persisted_selection();
                EventResult::Continue
            }
            DataEvent::Selection { generation, data } => {
                if !self.selection.accepts(generation) {
                    tracing::debug!(generation, "dropping data for superseded selection");
                    return EventResult::Unchanged;
                }
                self.apply_selection_data(data);
                EventResult::Continue
            }
            DataEvent::FetchError {
                generation,
                source,
                error,
            } => {
                if let Some(g) = generation
                    && !self.selection.accepts(g)
                {
                    return EventResult::Unchanged;
                }
                self.feedback.set_error(format!("{}: {}", source, error));
                EventResult::Continue
            }
            DataEvent::AnimationTick => {
                if self.data.applications.last_updated.is_none() {
                    EventResult::Continue
                } else {
                    EventResult::Unchanged
                }
            }
        }
    }

    fn apply_selection_data(&mut self, data: SelectionData) {
        match data {
            SelectionData::BasicInfo(app) => {
                self.selection.basic_info = Some(app);
            }
            SelectionData::AmContainer(info) => {
                self.selection.am_container = Some(
                    info.map(|i| i.container_id)
                        .unwrap_or_else(|| NO_CONTAINER_LABEL.to_string()),
                );
            }
            SelectionData::Diagnostics(msg) => {
                self.selection.diagnostics = Some(msg);
            }
            SelectionData::DriverLog(log) => {
                self.selection.driver_log = Some(log);
            }
            SelectionData::JobResult(result) => {
                self.selection.job_result = Some(result);
            }
            SelectionData::Jobs(jobs) => {
                self.selection.jobs = Some(jobs);
                self.maybe_generate_job_graph();
            }
            SelectionData::Stages(stages) => {
                self.stages_list.clamp(stages.len());
                self.selection.stages = Some(stages);
                self.maybe_generate_job_graph();
            }
            SelectionData::Storage(rdds) => {
                self.storage_list.clamp(rdds.len());
                self.selection.storage = Some(rdds);
            }
            SelectionData::Executors(executors) => {
                self.executors_list.clamp(executors.len());
                self.selection.executors = Some(executors);
            }
            SelectionData::StageTasks(detail) => {
                self.selection.stage_details.insert(detail.stage_id, detail);
                self.tasks_list.clamp(self.current_tasks_len());
            }
        }
    }

    /// Build the job menu once both jobs and stages have landed. The gate
    /// keeps the menu from being rebuilt on later refreshes of the same
    /// selection.
    fn maybe_generate_job_graph(&mut self) {
        if self.selection.job_graph_generated {
            return;
        }
        if self.selection.jobs.is_some() && self.selection.stages.is_some() {
            self.selection.job_graph_generated = true;
            self.graph_menu = ListState::default();
        }
    }

    /// Select the application under the cursor: reset the selection state,
    /// persist the choice, and fan out the fetches for the new generation.
    fn select_application(&mut self) {
        let Some(app) = self.selected_application().cloned() else {
            return;
        };
        self.start_selection(&app);
    }

    /// Re-run the fan-out for the currently selected application.
    fn reselect_current(&mut self) {
        let Some(app_id) = self.selection.app_id.clone() else {
            return;
        };
        let Some(app) = self
            .data
            .applications
            .iter()
            .find(|a| a.id == app_id)
            .cloned()
        else {
            return;
        };
        self.start_selection(&app);
    }

    fn start_selection(&mut self, app: &Application) {
        let plan = SelectionPlan::for_application(app);
        let generation = self.selection.reset_for(&plan);

        self.graph_menu = ListState::default();
        self.stages_list = ListState::default();
        self.tasks_list = ListState::default();
        self.executors_list = ListState::default();
        self.storage_list = ListState::default();
        self.log_scroll = 0;

        self.session.selected_app_id = Some(plan.app_id.clone());
        self.session.save();

        self.selection_cancel.cancel();
        self.selection_cancel = CancellationToken::new();

        tracing::info!(app_id = %plan.app_id, generation, "selected application");
        spawn_selection_fetches(
            Arc::clone(&self.shim),
            self.data_tx.clone(),
            plan,
            generation,
            self.selection_cancel.clone(),
        );
    }

    /// Pick the job under the cursor in the graph view and scope the stage
    /// and task tables to its stages.
    fn select_graph_job(&mut self) {
        let Some(stages) = self.selection.stages.as_ref() else {
            return;
        };
        let Some(jobs) = self.selection.jobs.as_ref() else {
            return;
        };
        let Some(job) = jobs.get(self.graph_menu.selected) else {
            return;
        };

        self.selection.stage_scope = Some(graph::resolve_stage_ids(job, stages));
        self.stages_list.move_to_top();
        self.tasks_list.move_to_top();
    }

    /// On the first applications refresh, re-select the persisted application
    /// if it is still listed, otherwise the first row.
    fn restore_persisted_selection(&mut self) {
        if self.selection.has_selection() {
            return;
        }
        let (target, row_count) = {
            let rows = self.display_rows();
            if rows.is_empty() {
                return;
            }
            let target = self
                .session
                .selected_app_id
                .as_deref()
                .and_then(|id| rows.iter().position(|(_, r)| r.app_id == id))
                .unwrap_or(0);
            (target, rows.len())
        };
        self.apps_list.selected = target;
        self.apps_list.clamp(row_count);
        self.select_application();
    }

    /// Copy the focused application id to the system clipboard.
    fn yank_selected_app_id(&mut self) {
        let app_id = match self.current_view {
            View::Applications => self.selected_application().map(|a| a.id.clone()),
            _ => self.selection.app_id.clone(),
        };
        let Some(app_id) = app_id else {
            return;
        };

        let copied = copy_to_clipboard(&app_id);
        self.feedback.set_clipboard_feedback(if copied {
            ClipboardFeedback::success(format!("Copied: {}", app_id))
        } else {
            ClipboardFeedback::failure("Failed to copy (no clipboard)".to_string())
        });
    }

    fn switch_view(&mut self, view: View) {
        self.previous_view = self.current_view;
        self.current_view = view;
    }

    /// Apply a navigation operation to the active list. No-op for the Logs
    /// view, which scrolls instead.
    fn with_current_list<F>(&mut self, f: F)
    where
        F: FnOnce(&mut ListState, usize),
    {
        let len = self.current_list_len();
        match self.current_view {
            View::Applications => f(&mut self.apps_list, len),
            View::Graph => f(&mut self.graph_menu, len),
            View::Stages => f(&mut self.stages_list, len),
            View::Tasks => f(&mut self.tasks_list, len),
            View::Executors => f(&mut self.executors_list, len),
            View::Storage => f(&mut self.storage_list, len),
            View::Logs => {}
        }
    }

    fn current_list_len(&self) -> usize {
        match self.current_view {
            View::Applications => self.display_rows().len(),
            View::Graph => self
                .selection
                .jobs
                .as_ref()
                .map(Vec::len)
                .unwrap_or_default(),
            View::Stages => self.visible_stages().len(),
            View::Tasks => self.current_tasks_len(),
            View::Executors => self
                .selection
                .executors
                .as_ref()
                .map(Vec::len)
                .unwrap_or_default(),
            View::Storage => self
                .selection
                .storage
                .as_ref()
                .map(Vec::len)
                .unwrap_or_default(),
            View::Logs => 0,
        }
    }

    fn current_tasks_len(&self) -> usize {
        filter::visible_tasks(&self.selection, &self.data.get_filter()).len()
    }

    /// Application rows visible under the free-text filter, paired with
    /// their index into the unfiltered list.
    #[must_use]
    pub fn display_rows(&self) -> Vec<(usize, &AppRow)> {
        let filter = self.data.get_filter().map(|f| f.to_lowercase());
        self.data
            .app_rows
            .iter()
            .enumerate()
            .filter(|(_, row)| match &filter {
                Some(f) => row.searchable_text().contains(f),
                None => true,
            })
            .collect()
    }

    /// Indices of stage rows visible under the current stage scope.
    #[must_use]
    pub fn visible_stages(&self) -> Vec<usize> {
        match self.selection.stages.as_deref() {
            Some(stages) => filter::visible_stage_indices(stages, &self.selection.stage_scope),
            None => Vec::new(),
        }
    }

    /// The application under the cursor in the (filtered) applications view.
    #[must_use]
    pub fn selected_application(&self) -> Option<&Application> {
        let rows = self.display_rows();
        let (unfiltered_index, _) = rows.get(self.apps_list.selected)?;
        self.data.applications.get(*unfiltered_index)
    }

    #[must_use]
    pub fn current_error(&self) -> Option<&str> {
        self.feedback.current_error()
    }

    #[must_use]
    pub fn current_clipboard_feedback(&self) -> Option<&ClipboardFeedback> {
        self.feedback.current_clipboard_feedback()
    }
}

/// Attempt to copy text to the system clipboard via external tools.
fn copy_to_clipboard(text: &str) -> bool {
    let clipboard_commands = [
        ("xclip", vec!["-selection", "clipboard"]),
        ("xsel", vec!["--clipboard", "--input"]),
        ("pbcopy", vec![]),  // macOS
        ("wl-copy", vec![]), // Wayland
    ];

    for (cmd, args) in clipboard_commands {
        if let Ok(mut child) = std::process::Command::new(cmd)
            .args(&args)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
            && let Some(mut stdin) = child.stdin.take()
        {
            use std::io::Write;
            if stdin.write_all(text.as_bytes()).is_ok() {
                drop(stdin);
                if let Ok(status) = child.wait()
                    && status.success()
                {
                    return true;
                }
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attempt, SparkTime, StageSummary};
    use std::time::Duration;

    fn test_app() -> App {
        let (data_tx, _data_rx) = mpsc::channel(8);
        let shim = Arc::new(
            ShimClient::new(18888, Duration::from_secs(1)).expect("client builds"),
        );
        App::new(
            MonitorConfig::default(),
            Vec::new(),
            SessionState::default(),
            shim,
            data_tx,
        )
    }

    fn application(id: &str, name: &str, completed: bool) -> Application {
        Application {
            id: id.to_string(),
            name: name.to_string(),
            attempts: vec![Attempt {
                attempt_id: Some(1),
                start_time: SparkTime::new("2017-01-01T00:00:00.000GMT"),
                end_time: SparkTime::new("2017-01-01T01:00:00.000GMT"),
                completed,
                spark_user: "alice".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_stale_selection_data_is_dropped() {
        let mut app = test_app();
        app.handle_data(DataEvent::ApplicationsUpdated(vec![
            application("app-001", "first", true),
            application("app-002", "second", true),
        ]));
        let old_generation = app.selection.generation;

        // A newer selection supersedes the in-flight fetches
        app.apps_list.selected = 1;
        app.select_application();
        assert!(app.selection.generation > old_generation);

        let result = app.handle_data(DataEvent::Selection {
            generation: old_generation,
            data: SelectionData::Jobs(vec![]),
        });
        assert_eq!(result, EventResult::Unchanged);
        assert!(app.selection.jobs.is_none());
    }

    #[tokio::test]
    async fn test_current_generation_data_is_applied() {
        let mut app = test_app();
        app.handle_data(DataEvent::ApplicationsUpdated(vec![application(
            "app-001", "first", true,
        )]));

        let generation = app.selection.generation;
        app.handle_data(DataEvent::Selection {
            generation,
            data: SelectionData::Jobs(vec![]),
        });
        assert!(app.selection.jobs.is_some());
    }

    #[tokio::test]
    async fn test_first_refresh_restores_persisted_selection() {
        let mut app = test_app();
        app.session.selected_app_id = Some("app-002".to_string());

        app.handle_data(DataEvent::ApplicationsUpdated(vec![
            application("app-001", "first", true),
            application("app-002", "second", true),
        ]));

        assert_eq!(app.apps_list.selected, 1);
        assert_eq!(app.selection.app_id.as_deref(), Some("app-002"));
    }

    #[tokio::test]
    async fn test_unknown_persisted_id_falls_back_to_first_row() {
        let mut app = test_app();
        app.session.selected_app_id = Some("app-gone".to_string());

        app.handle_data(DataEvent::ApplicationsUpdated(vec![
            application("app-001", "first", true),
            application("app-002", "second", true),
        ]));

        assert_eq!(app.apps_list.selected, 0);
        assert_eq!(app.selection.app_id.as_deref(), Some("app-001"));
    }

    #[tokio::test]
    async fn test_job_graph_generated_once_per_selection() {
        let mut app = test_app();
        app.handle_data(DataEvent::ApplicationsUpdated(vec![application(
            "app-001", "first", true,
        )]));
        let generation = app.selection.generation;

        app.handle_data(DataEvent::Selection {
            generation,
            data: SelectionData::Jobs(vec![]),
        });
        assert!(!app.selection.job_graph_generated);

        app.handle_data(DataEvent::Selection {
            generation,
            data: SelectionData::Stages(vec![StageSummary::default()]),
        });
        assert!(app.selection.job_graph_generated);
    }

    #[tokio::test]
    async fn test_filter_narrows_application_rows() {
        let mut app = test_app();
        app.handle_data(DataEvent::ApplicationsUpdated(vec![
            application("app-001", "WordCount", true),
            application("app-002", "PageRank", true),
        ]));

        app.data.set_filter("pagerank".to_string());
        let rows = app.display_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].1.app_id, "app-002");
    }

    #[tokio::test]
    async fn test_reselect_refetches_current_application() {
        let mut app = test_app();
        app.handle_data(DataEvent::ApplicationsUpdated(vec![
            application("app-001", "first", true),
            application("app-002", "second", true),
        ]));
        let generation = app.selection.generation;

        app.reselect_current();
        assert!(app.selection.generation > generation);
        assert_eq!(app.selection.app_id.as_deref(), Some("app-001"));
    }

    #[tokio::test]
    async fn test_mouse_click_maps_to_row_under_cursor() {
        let mut app = test_app();
        app.handle_data(DataEvent::ApplicationsUpdated(vec![
            application("app-001", "first", true),
            application("app-002", "second", true),
            application("app-003", "third", true),
        ]));

        // First data row sits right below tab bar, info bar, border, header
        app.handle_mouse_click(4);
        assert_eq!(app.apps_list.selected, 0);

        app.handle_mouse_click(6);
        assert_eq!(app.apps_list.selected, 2);

        // Clicks above the content area are ignored
        app.handle_mouse_click(3);
        assert_eq!(app.apps_list.selected, 2);
    }
}
