//! Applications view rendering
//!
//! The application list is the entry point of the dashboard: one row per
//! Spark application known to the shim, with the active filter applied.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use crate::formatting::truncate_string;
use crate::tui::app::{App, AppRow};
use crate::tui::theme::Theme;

use super::widgets::{calculate_scroll_offset, create_table_header, render_placeholder};

pub fn render_applications_view(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let title = if app.data.get_filter().is_some() {
        " Applications (filtered) "
    } else {
        " Applications "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(title);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = app.display_rows();
    if rows.is_empty() {
        let msg = if app.data.applications.last_updated.is_none() {
            "Loading applications..."
        } else if app.data.get_filter().is_some() {
            "No applications match the filter"
        } else {
            "No applications found"
        };
        render_placeholder(msg, frame, inner, theme);
        return;
    }

    let header = create_table_header(&["", "ID", "Name", "Attempts", "User", "Started"], theme);

    let available_height = inner.height.saturating_sub(1) as usize;
    let selected = app.apps_list.selected;
    let scroll_offset = calculate_scroll_offset(selected, available_height, rows.len());

    let name_max = app.config.display.app_name_max_length;
    let table_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(available_height)
        .map(|(display_idx, (_, row))| app_to_row(row, display_idx == selected, name_max, theme))
        .collect();

    let widths = [
        Constraint::Length(2),  // Status icon
        Constraint::Length(32), // Application id
        Constraint::Min(20),    // Name
        Constraint::Length(8),  // Attempts
        Constraint::Length(12), // User
        Constraint::Length(24), // Start time
    ];

    let table = Table::new(table_rows, widths).header(header);
    frame.render_widget(table, inner);
}

fn app_to_row<'a>(row: &'a AppRow, is_selected: bool, name_max: usize, theme: &Theme) -> Row<'a> {
    let status_color = theme.app_status_color(row.completed);

    let cells = vec![
        Cell::from(row.status_icon()).style(Style::default().fg(status_color)),
        Cell::from(row.app_id.as_str()),
        Cell::from(truncate_string(&row.name, name_max)),
        Cell::from(row.attempt_count.to_string()),
        Cell::from(row.spark_user.as_str()),
        Cell::from(row.start_time.as_str()),
    ];

    let table_row = Row::new(cells);
    if is_selected {
        table_row.style(
            Style::default()
                .bg(theme.selected_bg)
                .fg(theme.selected_fg),
        )
    } else {
        table_row
    }
}
