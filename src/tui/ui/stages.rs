//! Stage and task view rendering
//!
//! Both tables honor the stage scope picked in the graph view. The task
//! table additionally applies the active text filter to its rows.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use crate::formatting::{format_bytes, format_task_progress, truncate_string};
use crate::models::{StageSummary, TaskDetail};
use crate::tui::app::{filter, App, NO_STAGE_INFO_LABEL};
use crate::tui::theme::Theme;

use super::widgets::{calculate_scroll_offset, create_table_header, render_placeholder};

pub fn render_stages_view(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let title = if app.selection.stage_scope.is_some() {
        " Stages (job scope, a to clear) "
    } else {
        " Stages "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(stages) = &app.selection.stages else {
        render_placeholder(stages_placeholder(app), frame, inner, theme);
        return;
    };

    let visible = app.visible_stages();
    if visible.is_empty() {
        render_placeholder("No stages in scope", frame, inner, theme);
        return;
    }

    let header = create_table_header(
        &["ID", "Name", "Status", "Tasks", "Input", "Output", "Sh.Read", "Sh.Write"],
        theme,
    );

    let available_height = inner.height.saturating_sub(1) as usize;
    let selected = app.stages_list.selected;
    let scroll_offset = calculate_scroll_offset(selected, available_height, visible.len());

    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(available_height)
        .filter_map(|(display_idx, idx)| {
            stages
                .get(*idx)
                .map(|stage| stage_to_row(stage, display_idx == selected, theme))
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(20),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths).header(header);
    frame.render_widget(table, inner);
}

fn stage_to_row<'a>(stage: &'a StageSummary, is_selected: bool, theme: &Theme) -> Row<'a> {
    let status_color = theme.status_color(&stage.status);

    let cells = vec![
        Cell::from(stage.stage_id.to_string()),
        Cell::from(truncate_string(&stage.name, 40)),
        Cell::from(stage.status.as_str()).style(Style::default().fg(status_color)),
        Cell::from(format_task_progress(
            stage.num_complete_tasks,
            stage.num_tasks,
        )),
        Cell::from(format_bytes(stage.input_bytes)),
        Cell::from(format_bytes(stage.output_bytes)),
        Cell::from(format_bytes(stage.shuffle_read_bytes)),
        Cell::from(format_bytes(stage.shuffle_write_bytes)),
    ];

    let row = Row::new(cells);
    if is_selected {
        row.style(Style::default().bg(theme.selected_bg))
    } else {
        row
    }
}

pub fn render_tasks_view(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let title = match (&app.selection.stage_scope, app.data.get_filter()) {
        (Some(_), Some(_)) => " Tasks (job scope, filtered) ",
        (Some(_), None) => " Tasks (job scope) ",
        (None, Some(_)) => " Tasks (filtered) ",
        (None, None) => " Tasks ",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.selection.stages.is_none() {
        render_placeholder(stages_placeholder(app), frame, inner, theme);
        return;
    }

    let tasks = filter::visible_tasks(&app.selection, &app.data.get_filter());
    if tasks.is_empty() {
        let msg = if app.selection.stage_details.is_empty() {
            "Loading task details..."
        } else {
            "No tasks match"
        };
        render_placeholder(msg, frame, inner, theme);
        return;
    }

    let header = create_table_header(
        &["Task", "Index", "Attempt", "Status", "Executor", "Host", "Locality", "Launched"],
        theme,
    );

    let available_height = inner.height.saturating_sub(1) as usize;
    let selected = app.tasks_list.selected;
    let scroll_offset = calculate_scroll_offset(selected, available_height, tasks.len());

    let rows: Vec<Row> = tasks
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(available_height)
        .map(|(display_idx, task)| task_to_row(task, display_idx == selected, theme))
        .collect();

    let widths = [
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Min(16),
        Constraint::Length(14),
        Constraint::Length(24),
    ];

    let table = Table::new(rows, widths).header(header);
    frame.render_widget(table, inner);
}

fn task_to_row<'a>(task: &'a TaskDetail, is_selected: bool, theme: &Theme) -> Row<'a> {
    let status_color = theme.status_color(&task.status);

    let cells = vec![
        Cell::from(task.task_id.to_string()),
        Cell::from(task.index.to_string()),
        Cell::from(task.attempt.to_string()),
        Cell::from(task.status.as_str()).style(Style::default().fg(status_color)),
        Cell::from(task.executor_id.as_str()),
        Cell::from(task.host.as_str()),
        Cell::from(task.task_locality.as_str()),
        Cell::from(task.launch_time.display()),
    ];

    let row = Row::new(cells);
    if is_selected {
        row.style(Style::default().bg(theme.selected_bg))
    } else {
        row
    }
}

fn stages_placeholder(app: &App) -> &'static str {
    if !app.selection.has_selection() {
        "Select an application first"
    } else if app.selection.attempt_id == 0 {
        NO_STAGE_INFO_LABEL
    } else {
        "Loading stages..."
    }
}
