//! UI rendering for the TUI
//!
//! This module handles all rendering using ratatui. The rendering is
//! event-driven - we only render when an event triggers a state change, not
//! at a fixed frame rate.

mod applications;
mod executors;
mod graph;
mod logs;
mod overlays;
mod stages;
mod widgets;

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Tabs};

use crate::tui::app::{App, ModalState, View};
use crate::tui::theme::Theme;

use applications::render_applications_view;
use executors::{render_executors_view, render_storage_view};
use graph::render_graph_view;
use logs::render_logs_view;
use overlays::{render_clipboard_toast, render_filter_overlay, render_help_overlay};
use stages::{render_stages_view, render_tasks_view};

const ALL_VIEWS: [View; 7] = [
    View::Applications,
    View::Graph,
    View::Stages,
    View::Tasks,
    View::Executors,
    View::Storage,
    View::Logs,
];

/// Render the entire TUI
pub fn render(app: &App, frame: &mut Frame) {
    let theme = Theme::from_name(&app.config.display.theme);
    let area = frame.area();

    // Main layout: header, content, footer
    let layout = Layout::vertical([
        Constraint::Length(1), // Tab bar
        Constraint::Length(1), // Info bar
        Constraint::Min(0),    // Main content
        Constraint::Length(2), // Status bar
    ])
    .split(area);

    render_tab_bar(app, frame, layout[0], &theme);
    render_info_bar(app, frame, layout[1], &theme);
    render_content(app, frame, layout[2], &theme);
    render_status_bar(app, frame, layout[3], &theme);

    // Overlays (render in order of z-index)
    match &app.modal {
        ModalState::Help => render_help_overlay(frame, area, &theme),
        ModalState::Filter { .. } => render_filter_overlay(app, frame, area, &theme),
        ModalState::None => {}
    }

    // Clipboard feedback toast (always on top)
    if let Some(feedback) = app.current_clipboard_feedback() {
        render_clipboard_toast(feedback, frame, area, &theme);
    }
}

fn render_tab_bar(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let titles: Vec<Line> = ALL_VIEWS
        .iter()
        .enumerate()
        .map(|(i, view)| {
            let num = format!("[{}]", i + 1);
            let label = view.label();
            if *view == app.current_view {
                Line::from(vec![
                    Span::styled(num, Style::default().fg(theme.border_focused)),
                    Span::styled(label, Style::default().fg(theme.selected_fg).bold()),
                ])
            } else {
                Line::from(vec![
                    Span::styled(num, Style::default().fg(theme.border)),
                    Span::raw(label),
                ])
            }
        })
        .collect();

    let selected = ALL_VIEWS
        .iter()
        .position(|v| *v == app.current_view)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .divider(" | ")
        .style(Style::default().fg(theme.fg))
        .highlight_style(Style::default().fg(theme.selected_fg).bold());

    frame.render_widget(tabs, area);
}

fn render_info_bar(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let app_count = app.data.app_rows.len();

    let cluster_info = app
        .config
        .shim
        .cluster_name
        .as_deref()
        .map(|name| format!("{} | ", name))
        .unwrap_or_default();

    let selection_info = if let Some(app_id) = &app.selection.app_id {
        let container = app
            .selection
            .am_container
            .as_deref()
            .unwrap_or("-");
        format!(
            " | {} ({}) attempt {} | AM: {}",
            app_id, app.selection.application_name, app.selection.attempt_id, container
        )
    } else {
        String::new()
    };

    let filter_info = if let Some(f) = app.data.get_filter() {
        format!(" | Filter: {}", f)
    } else {
        String::new()
    };

    let info = format!(
        " {}{} applications{}{}",
        cluster_info, app_count, selection_info, filter_info
    );

    let stale = app.data.applications.is_stale();
    let style = if stale {
        Style::default().fg(theme.stale_indicator)
    } else {
        Style::default().fg(theme.border)
    };

    let para = Paragraph::new(info).style(style);
    frame.render_widget(para, area);
}

fn render_content(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    match app.current_view {
        View::Applications => render_applications_view(app, frame, area, theme),
        View::Graph => render_graph_view(app, frame, area, theme),
        View::Stages => render_stages_view(app, frame, area, theme),
        View::Tasks => render_tasks_view(app, frame, area, theme),
        View::Executors => render_executors_view(app, frame, area, theme),
        View::Storage => render_storage_view(app, frame, area, theme),
        View::Logs => render_logs_view(app, frame, area, theme),
    }
}

fn render_status_bar(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let layout = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

    // Keybindings line - context-sensitive
    let keybinds = match app.current_view {
        View::Applications => " j/k:move  Enter:select  y:yank  /:filter  r:refresh  ?:help  q:quit ",
        View::Graph => " j/k:move  Enter:scope stages  a:clear scope  ?:help  q:quit ",
        View::Stages | View::Tasks => " j/k:move  /:filter  a:clear scope  ?:help  q:quit ",
        View::Logs => " j/k:scroll  g/G:top/bottom  ?:help  q:quit ",
        View::Executors | View::Storage => " j/k:move  ?:help  q:quit ",
    };
    let keybinds_para = Paragraph::new(keybinds).style(Style::default().fg(theme.border));
    frame.render_widget(keybinds_para, layout[0]);

    let mut status_parts = Vec::new();

    // Selection-derived counts once data is in
    if let Some(jobs) = &app.selection.jobs {
        let active = jobs
            .iter()
            .filter(|j| j.status.eq_ignore_ascii_case("running"))
            .count();
        status_parts.push(Span::styled(
            format!(" Jobs: {} ({} running)", jobs.len(), active),
            Style::default().fg(theme.border),
        ));
    }
    if let Some(stages) = &app.selection.stages {
        status_parts.push(Span::styled(
            format!(" | Stages: {}", stages.len()),
            Style::default().fg(theme.border),
        ));
    }
    if app.selection.stage_scope.is_some() {
        status_parts.push(Span::styled(
            " [scoped]",
            Style::default().fg(theme.border_focused),
        ));
    }

    // Last update time
    status_parts.push(Span::raw(" | "));
    if let Some(age) = app.data.applications.age() {
        let age_secs = age.as_secs();
        let age_str = if age_secs < 60 {
            format!("{}s", age_secs)
        } else {
            format!("{}m", age_secs / 60)
        };

        if app.data.applications.is_stale() {
            status_parts.push(Span::styled(
                format!("Updated: {} (*STALE*)", age_str),
                Style::default().fg(theme.stale_indicator),
            ));
        } else {
            status_parts.push(Span::styled(
                format!("Updated: {}", age_str),
                Style::default().fg(theme.border),
            ));
        }
    } else {
        status_parts.push(Span::styled(
            "Loading...",
            Style::default().fg(theme.pending),
        ));
    }

    // Config warnings display (persistent until fixed)
    if !app.feedback.config_warnings.is_empty() {
        let warning_text = if app.feedback.config_warnings.len() == 1 {
            format!(" | WARN: {}", app.feedback.config_warnings[0])
        } else {
            format!(
                " | WARN: {} (+{} more)",
                app.feedback.config_warnings[0],
                app.feedback.config_warnings.len() - 1
            )
        };
        status_parts.push(Span::styled(
            warning_text,
            Style::default().fg(theme.pending),
        ));
    }

    // Error display (temporary, auto-dismisses)
    if let Some(error) = app.current_error() {
        status_parts.push(Span::styled(
            format!(" | ERROR: {} ", error),
            Style::default().fg(theme.failed),
        ));
    }

    let status_line = Line::from(status_parts);
    let status_para = Paragraph::new(status_line);
    frame.render_widget(status_para, layout[1]);
}
