//! Reusable UI widgets and helper functions
//!
//! Shared rendering utilities used across different views.

use ratatui::prelude::*;
use ratatui::widgets::{Cell, Paragraph, Row};

use crate::tui::theme::Theme;

/// Create a styled table header row from column names
pub fn create_table_header<'a>(columns: &[&'a str], theme: &Theme) -> Row<'a> {
    let header_cells = columns
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(theme.header_fg).bold()));
    Row::new(header_cells)
        .style(Style::default().bg(theme.header_bg))
        .height(1)
}

/// Calculate scroll offset to keep selection visible
pub fn calculate_scroll_offset(selected: usize, visible_height: usize, total: usize) -> usize {
    if visible_height == 0 || total == 0 {
        return 0;
    }

    if selected < visible_height / 2 {
        0
    } else if selected > total.saturating_sub(visible_height / 2) {
        total.saturating_sub(visible_height)
    } else {
        selected.saturating_sub(visible_height / 2)
    }
}

/// Create a centered rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Centered placeholder message for a view with no data yet
pub fn render_placeholder(msg: &str, frame: &mut Frame, area: Rect, theme: &Theme) {
    let para = Paragraph::new(msg.to_string())
        .style(Style::default().fg(theme.placeholder))
        .alignment(Alignment::Center);
    frame.render_widget(para, area);
}

/// Section header line used in detail panes
pub fn section_header<'a>(title: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(
        format!("── {} ", title),
        Style::default().fg(theme.border_focused).bold(),
    ))
}
