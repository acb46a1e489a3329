//! Logs view rendering
//!
//! A scrollable pane combining the attempt timestamps, the YARN diagnostics,
//! the driver log and the job result for the selected application. Regions
//! that are suppressed for local runs show their placeholder labels instead.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::formatting::attempt_duration;
use crate::tui::app::App;
use crate::tui::theme::Theme;

use super::widgets::{render_placeholder, section_header};

pub fn render_logs_view(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(" Logs (j/k to scroll) ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !app.selection.has_selection() {
        render_placeholder("Select an application first", frame, inner, theme);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();

    lines.push(section_header("Application", theme));
    match app.selection.addressed_attempt() {
        Some(attempt) => {
            lines.push(Line::from(format!(
                "Started: {}",
                attempt.start_time.display()
            )));
            lines.push(Line::from(format!("Ended:   {}", attempt.end_time.display())));
            if let Some(duration) = attempt_duration(&attempt.start_time, &attempt.end_time) {
                lines.push(Line::from(format!("Duration: {}", duration)));
            }
        }
        None => lines.push(Line::from(Span::styled(
            "Loading...",
            Style::default().fg(theme.placeholder),
        ))),
    }

    lines.push(Line::from(""));
    lines.push(section_header("Diagnostics", theme));
    push_region(&mut lines, app.selection.diagnostics.as_deref(), theme);

    lines.push(Line::from(""));
    lines.push(section_header("Driver Log", theme));
    push_region(&mut lines, app.selection.driver_log.as_deref(), theme);

    lines.push(Line::from(""));
    lines.push(section_header("Job Result", theme));
    push_region(&mut lines, app.selection.job_result.as_deref(), theme);

    let para = Paragraph::new(lines)
        .style(Style::default().fg(theme.fg))
        .scroll((app.log_scroll as u16, 0));
    frame.render_widget(para, inner);
}

fn push_region<'a>(lines: &mut Vec<Line<'a>>, content: Option<&'a str>, theme: &Theme) {
    match content {
        Some(text) if !text.is_empty() => {
            for line in text.lines() {
                lines.push(Line::from(line));
            }
        }
        Some(_) => lines.push(Line::from(Span::styled(
            "(empty)",
            Style::default().fg(theme.placeholder),
        ))),
        None => lines.push(Line::from(Span::styled(
            "Loading...",
            Style::default().fg(theme.placeholder),
        ))),
    }
}
