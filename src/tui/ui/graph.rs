//! Job graph view rendering
//!
//! Left panel lists the jobs of the selected application; the right panel
//! shows a textual stage DAG for the highlighted job. Picking a job scopes
//! the stage and task tables to its stages.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::tui::app::{graph, App};
use crate::tui::theme::Theme;

use super::widgets::render_placeholder;

pub fn render_graph_view(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let layout =
        Layout::horizontal([Constraint::Length(24), Constraint::Min(0)]).split(area);

    render_job_menu(app, frame, layout[0], theme);
    render_dag_panel(app, frame, layout[1], theme);
}

fn render_job_menu(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(" Jobs ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(jobs) = &app.selection.jobs else {
        render_placeholder(menu_placeholder(app), frame, inner, theme);
        return;
    };
    if jobs.is_empty() {
        render_placeholder("No jobs", frame, inner, theme);
        return;
    }

    let labels = graph::job_menu(jobs);
    let selected = app.graph_menu.selected;
    let stages = app.selection.stages.as_deref().unwrap_or_default();

    let items: Vec<ListItem> = labels
        .iter()
        .zip(jobs.iter())
        .enumerate()
        .map(|(i, (label, job))| {
            let color = theme.status_color(&job.status);
            let scoped =
                graph::job_is_scoped(job, stages, app.selection.stage_scope.as_deref());
            let marker = if scoped { "* " } else { "  " };
            let style = if i == selected {
                Style::default().bg(theme.selected_bg).fg(theme.selected_fg)
            } else {
                Style::default().fg(color)
            };
            ListItem::new(format!("{}{}", marker, label)).style(style)
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

fn render_dag_panel(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Stage Graph ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (Some(jobs), Some(stages)) = (&app.selection.jobs, &app.selection.stages) else {
        render_placeholder(menu_placeholder(app), frame, inner, theme);
        return;
    };

    let Some(job) = jobs.get(app.graph_menu.selected) else {
        render_placeholder("No job selected", frame, inner, theme);
        return;
    };

    let lines: Vec<Line> = graph::dag_lines(job, stages)
        .into_iter()
        .map(Line::from)
        .collect();

    let para = Paragraph::new(lines).style(Style::default().fg(theme.fg));
    frame.render_widget(para, inner);
}

fn menu_placeholder(app: &App) -> &'static str {
    if !app.selection.has_selection() {
        "Select an application first"
    } else {
        "Loading job graph..."
    }
}
