//! Event types for the TUI
//!
//! Dual-channel event architecture, same shape as the rest of the runtime:
//! - InputEvent: priority channel for user input (never dropped)
//! - DataEvent: data channel for shim responses (may be dropped under load)
//!
//! Selection-scoped data events carry the generation of the selection they
//! were fetched for, so completions racing a newer selection self-discard.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

use crate::models::{
    Application, AppAttemptInfo, ExecutorSummary, JobSummary, RddInfo, StageDetail, StageSummary,
};

/// Input events from the terminal (priority channel - never dropped)
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Keyboard input
    Key(KeyEvent),
    /// Mouse input
    Mouse(MouseEvent),
    /// Terminal resize
    Resize(u16, u16),
}

/// Data region identifiers for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Applications,
    BasicInfo,
    AmContainer,
    Diagnostics,
    DriverLog,
    JobResult,
    Jobs,
    Stages,
    Storage,
    Executors,
    StageTasks,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Applications => write!(f, "applications"),
            DataSource::BasicInfo => write!(f, "basic info"),
            DataSource::AmContainer => write!(f, "AM container"),
            DataSource::Diagnostics => write!(f, "diagnostics"),
            DataSource::DriverLog => write!(f, "driver log"),
            DataSource::JobResult => write!(f, "job result"),
            DataSource::Jobs => write!(f, "jobs"),
            DataSource::Stages => write!(f, "stages"),
            DataSource::Storage => write!(f, "storage"),
            DataSource::Executors => write!(f, "executors"),
            DataSource::StageTasks => write!(f, "stage tasks"),
        }
    }
}

/// Payload of one completed selection-scoped fetch.
#[derive(Debug)]
pub enum SelectionData {
    /// Application with attempts (start/end times for the info panel)
    BasicInfo(Application),
    /// AM container of the current attempt, if the shim reports one
    AmContainer(Option<AppAttemptInfo>),
    /// Text for the error panel (already label-formatted)
    Diagnostics(String),
    DriverLog(String),
    JobResult(String),
    Jobs(Vec<JobSummary>),
    Stages(Vec<StageSummary>),
    Storage(Vec<RddInfo>),
    Executors(Vec<ExecutorSummary>),
    /// Detail of one stage with its task map, fetched after the stage list
    StageTasks(StageDetail),
}

/// Data and control events (data channel - may be dropped under load)
#[derive(Debug)]
pub enum DataEvent {
    /// Animation tick for the loading spinner (only while visible)
    AnimationTick,

    /// Applications list refreshed (selection-independent)
    ApplicationsUpdated(Vec<Application>),

    /// One region of the selected application finished loading
    Selection {
        generation: u64,
        data: SelectionData,
    },

    /// Fetch error from a data region. Selection-scoped errors carry the
    /// generation so stale failures are dropped like stale successes.
    FetchError {
        generation: Option<u64>,
        source: DataSource,
        error: String,
    },
}

/// Result of processing an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running, UI needs redraw
    Continue,
    /// Continue running, no UI change needed
    Unchanged,
    /// Quit the application
    Quit,
}

/// Key action mappings for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Navigation
    MoveUp,
    MoveDown,
    MoveToTop,
    MoveToBottom,
    PageUp,
    PageDown,

    // View switching
    SwitchToApplications,
    SwitchToGraph,
    SwitchToStages,
    SwitchToTasks,
    SwitchToExecutors,
    SwitchToStorage,
    SwitchToLogs,
    NextView,

    // Actions
    Select,
    Refresh,
    OpenFilter,
    YankAppId,
    ClearStageScope,

    // UI
    ShowHelp,
    Escape,
    Quit,

    // Filter mode specific
    FilterClear,
    FilterBackspace,
    FilterChar(char),

    // Mouse actions
    MouseClick { row: u16, column: u16 },
    MouseScrollUp,
    MouseScrollDown,

    // Unknown/unhandled
    Unknown,
}

impl KeyAction {
    /// Map a mouse event to an action
    pub fn from_mouse_event(event: MouseEvent) -> Self {
        use crossterm::event::{MouseButton, MouseEventKind};

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => KeyAction::MouseClick {
                row: event.row,
                column: event.column,
            },
            MouseEventKind::ScrollUp => KeyAction::MouseScrollUp,
            MouseEventKind::ScrollDown => KeyAction::MouseScrollDown,
            _ => KeyAction::Unknown,
        }
    }

    /// Map a key event to an action based on current mode
    pub fn from_key_event(event: KeyEvent, in_filter_mode: bool) -> Self {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        // Filter mode has different mappings
        if in_filter_mode {
            return match code {
                KeyCode::Esc => KeyAction::Escape,
                KeyCode::Enter => KeyAction::Select,
                KeyCode::Backspace => KeyAction::FilterBackspace,
                KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                    KeyAction::FilterClear
                }
                KeyCode::Char(c) => KeyAction::FilterChar(c),
                _ => KeyAction::Unknown,
            };
        }

        // Normal mode mappings
        match code {
            // Quit
            KeyCode::Char('q') => KeyAction::Quit,

            // Ctrl+ combinations must come before bare character matches
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
            KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::PageDown,
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::PageUp,

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => KeyAction::MoveDown,
            KeyCode::Char('k') | KeyCode::Up => KeyAction::MoveUp,
            KeyCode::Char('g') | KeyCode::Home => KeyAction::MoveToTop,
            KeyCode::Char('G') | KeyCode::End => KeyAction::MoveToBottom,
            KeyCode::PageDown => KeyAction::PageDown,
            KeyCode::PageUp => KeyAction::PageUp,

            // View switching
            KeyCode::Char('1') => KeyAction::SwitchToApplications,
            KeyCode::Char('2') => KeyAction::SwitchToGraph,
            KeyCode::Char('3') => KeyAction::SwitchToStages,
            KeyCode::Char('4') => KeyAction::SwitchToTasks,
            KeyCode::Char('5') => KeyAction::SwitchToExecutors,
            KeyCode::Char('6') => KeyAction::SwitchToStorage,
            KeyCode::Char('7') => KeyAction::SwitchToLogs,
            KeyCode::Tab => KeyAction::NextView,

            // Actions
            KeyCode::Enter => KeyAction::Select,
            KeyCode::Char('r') => KeyAction::Refresh,
            KeyCode::Char('/') => KeyAction::OpenFilter,
            KeyCode::Char('y') => KeyAction::YankAppId,
            KeyCode::Char('a') => KeyAction::ClearStageScope,

            // Help
            KeyCode::Char('?') | KeyCode::F(1) => KeyAction::ShowHelp,
            KeyCode::Esc => KeyAction::Escape,

            _ => KeyAction::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_action_quit() {
        let event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(KeyAction::from_key_event(event, false), KeyAction::Quit);
    }

    #[test]
    fn test_key_action_navigation() {
        let event = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(KeyAction::from_key_event(event, false), KeyAction::MoveDown);

        let event = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE);
        assert_eq!(KeyAction::from_key_event(event, false), KeyAction::MoveUp);
    }

    #[test]
    fn test_filter_mode_ctrl_u() {
        // In filter mode, Ctrl+U clears input
        let event = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(
            KeyAction::from_key_event(event, true),
            KeyAction::FilterClear
        );

        // In normal mode, Ctrl+U is page up
        assert_eq!(KeyAction::from_key_event(event, false), KeyAction::PageUp);
    }

    #[test]
    fn test_filter_mode_captures_characters() {
        let event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(
            KeyAction::from_key_event(event, true),
            KeyAction::FilterChar('q')
        );
    }
}
