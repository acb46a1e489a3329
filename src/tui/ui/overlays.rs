//! Overlay and popup rendering
//!
//! Handles rendering of the help overlay, the filter input and toast
//! notifications.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, ClipboardFeedback, ModalState};
use crate::tui::theme::Theme;

use super::widgets::centered_rect;

pub fn render_help_overlay(frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup_area = centered_rect(65, 80, area);

    // Clear the area first
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "sparkmon TUI - Keyboard Shortcuts",
            Style::default().bold(),
        )]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Navigation",
            Style::default().fg(theme.border_focused).bold(),
        )]),
        Line::from("  j / Down       Move selection down"),
        Line::from("  k / Up         Move selection up"),
        Line::from("  g / Home       Jump to top"),
        Line::from("  G / End        Jump to bottom"),
        Line::from("  Ctrl+d / PgDn  Page down"),
        Line::from("  Ctrl+u / PgUp  Page up"),
        Line::from("  Mouse click    Select row"),
        Line::from("  Scroll wheel   Navigate up/down"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Views",
            Style::default().fg(theme.border_focused).bold(),
        )]),
        Line::from("  1              Applications view"),
        Line::from("  2              Job graph view"),
        Line::from("  3              Stages view"),
        Line::from("  4              Tasks view"),
        Line::from("  5              Executors view"),
        Line::from("  6              Storage view"),
        Line::from("  7              Logs view"),
        Line::from("  Tab            Cycle to next view"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Actions",
            Style::default().fg(theme.border_focused).bold(),
        )]),
        Line::from("  Enter          Select application / scope stages to job"),
        Line::from("  a              Clear job scope"),
        Line::from("  y              Copy application ID to clipboard"),
        Line::from("  /              Filter applications and tasks"),
        Line::from("  r              Refetch the selected application"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "General",
            Style::default().fg(theme.border_focused).bold(),
        )]),
        Line::from("  ?/F1           Show this help"),
        Line::from("  Esc            Close overlay / clear filter / back"),
        Line::from("  q              Quit application"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press ? or Esc to close this help",
            Style::default().fg(theme.border),
        )]),
    ];

    let help_para = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_focused))
                .title(" Help "),
        )
        .style(Style::default().fg(theme.fg));

    frame.render_widget(help_para, popup_area);
}

pub fn render_filter_overlay(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let (filter_input, cursor_pos) = match &app.modal {
        ModalState::Filter {
            edit_buffer,
            cursor,
        } => (edit_buffer.as_str(), *cursor),
        _ => return,
    };

    let popup_area = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4).min(60),
        height: 3,
    };

    frame.render_widget(Clear, popup_area);

    let input_text = format!("/{}", filter_input);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(" Filter ");

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let para = Paragraph::new(input_text).style(Style::default().fg(theme.fg));
    frame.render_widget(para, inner);

    // Show cursor after the `/` prefix
    frame.set_cursor_position((inner.x + 1 + cursor_pos as u16, inner.y));
}

pub fn render_clipboard_toast(
    feedback: &ClipboardFeedback,
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
) {
    let width = (feedback.message.len() as u16 + 4).min(area.width);
    let toast_area = Rect {
        x: area.width.saturating_sub(width + 1),
        y: area.y + 1,
        width,
        height: 3,
    };

    frame.render_widget(Clear, toast_area);

    let color = if feedback.success {
        theme.active
    } else {
        theme.failed
    };

    let para = Paragraph::new(feedback.message.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
        .style(Style::default().fg(color));

    frame.render_widget(para, toast_area);
}
