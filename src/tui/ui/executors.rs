//! Executor and storage view rendering

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use crate::formatting::{format_bytes, truncate_string};
use crate::models::{ExecutorSummary, RddInfo};
use crate::tui::app::App;
use crate::tui::theme::Theme;

use super::widgets::{calculate_scroll_offset, create_table_header, render_placeholder};

pub fn render_executors_view(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(" Executors ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(executors) = &app.selection.executors else {
        let msg = if app.selection.has_selection() {
            "Loading executors..."
        } else {
            "Select an application first"
        };
        render_placeholder(msg, frame, inner, theme);
        return;
    };
    if executors.is_empty() {
        render_placeholder("No executors", frame, inner, theme);
        return;
    }

    let header = create_table_header(
        &["ID", "Host:Port", "", "Cores", "Active", "Failed", "Done", "Memory", "Disk", "RDD"],
        theme,
    );

    let available_height = inner.height.saturating_sub(1) as usize;
    let selected = app.executors_list.selected;
    let scroll_offset = calculate_scroll_offset(selected, available_height, executors.len());

    let rows: Vec<Row> = executors
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(available_height)
        .map(|(display_idx, exec)| executor_to_row(exec, display_idx == selected, theme))
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Min(18),
        Constraint::Length(2),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, widths).header(header);
    frame.render_widget(table, inner);
}

fn executor_to_row<'a>(exec: &'a ExecutorSummary, is_selected: bool, theme: &Theme) -> Row<'a> {
    let state_color = if exec.is_active {
        theme.active
    } else {
        theme.skipped
    };
    let state_icon = if exec.is_active { "●" } else { "○" };

    let cells = vec![
        Cell::from(exec.id.as_str()),
        Cell::from(exec.host_port.as_str()),
        Cell::from(state_icon).style(Style::default().fg(state_color)),
        Cell::from(exec.total_cores.to_string()),
        Cell::from(exec.active_tasks.to_string()),
        Cell::from(exec.failed_tasks.to_string()),
        Cell::from(exec.completed_tasks.to_string()),
        Cell::from(format_bytes(exec.memory_used)),
        Cell::from(format_bytes(exec.disk_used)),
        Cell::from(exec.rdd_blocks.to_string()),
    ];

    let row = Row::new(cells);
    if is_selected {
        row.style(Style::default().bg(theme.selected_bg))
    } else {
        row
    }
}

pub fn render_storage_view(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(" Storage (cached RDDs) ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(rdds) = &app.selection.storage else {
        let msg = if !app.selection.has_selection() {
            "Select an application first"
        } else if app.selection.attempt_id == 0 {
            "No storage info for this attempt"
        } else {
            "Loading storage..."
        };
        render_placeholder(msg, frame, inner, theme);
        return;
    };
    if rdds.is_empty() {
        render_placeholder("No cached RDDs", frame, inner, theme);
        return;
    }

    let header = create_table_header(
        &["ID", "Name", "Level", "Partitions", "Cached", "Memory", "Disk"],
        theme,
    );

    let available_height = inner.height.saturating_sub(1) as usize;
    let selected = app.storage_list.selected;
    let scroll_offset = calculate_scroll_offset(selected, available_height, rdds.len());

    let rows: Vec<Row> = rdds
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(available_height)
        .map(|(display_idx, rdd)| rdd_to_row(rdd, display_idx == selected, theme))
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(20),
        Constraint::Length(22),
        Constraint::Length(11),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths).header(header);
    frame.render_widget(table, inner);
}

fn rdd_to_row<'a>(rdd: &'a RddInfo, is_selected: bool, theme: &Theme) -> Row<'a> {
    let cells = vec![
        Cell::from(rdd.id.to_string()),
        Cell::from(truncate_string(&rdd.name, 30)),
        Cell::from(rdd.storage_level.as_str()),
        Cell::from(rdd.num_partitions.to_string()),
        Cell::from(rdd.num_cached_partitions.to_string()),
        Cell::from(format_bytes(rdd.memory_used)),
        Cell::from(format_bytes(rdd.disk_used)),
    ];

    let row = Row::new(cells);
    if is_selected {
        row.style(Style::default().bg(theme.selected_bg))
    } else {
        row
    }
}
