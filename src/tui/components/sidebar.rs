//! # Sidebar Component
//!
//! Observer Dashboard shown next to the scene: task id and counters on top,
//! the live log stream below. Each event is one compact JSON object
//! (`taskId`, `time`, `act`, `err`) prefixed by a marker, red for errors and
//! green otherwise.
//!
//! The stream always follows the tail. Older entries scroll off the top.

use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};
use serde_json::json;

use crate::core::journal::{LogEvent, SessionLog};
use crate::tui::component::Component;

pub struct Sidebar<'a> {
    pub task_id: Option<&'a str>,
    pub log: &'a SessionLog,
}

impl<'a> Sidebar<'a> {
    pub fn new(task_id: Option<&'a str>, log: &'a SessionLog) -> Self {
        Self { task_id, log }
    }
}

/// One stream line per event, oldest first.
pub fn stream_lines(events: &[LogEvent]) -> Vec<Line<'static>> {
    events.iter().map(stream_line).collect()
}

fn stream_line(event: &LogEvent) -> Line<'static> {
    let time = DateTime::<Utc>::from_timestamp_millis(event.timestamp)
        .map(|t| t.format("%H:%M:%S%.3f").to_string())
        .unwrap_or_else(|| event.timestamp.to_string());
    let record = json!({
        "taskId": event.level.as_str(),
        "time": time,
        "act": event.action,
        "err": event.error,
    });
    let (marker, color) = if event.is_error() {
        ("✖ ", Color::Red)
    } else {
        ("● ", Color::Green)
    };
    Line::from(vec![
        Span::styled(marker, Style::default().fg(color)),
        Span::styled(record.to_string(), Style::default().fg(Color::Gray)),
    ])
}

impl Component for Sidebar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::LEFT)
            .title(" Observer Dashboard ")
            .title_style(Style::default().add_modifier(Modifier::BOLD))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [summary_area, stream_area] =
            Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).areas(inner);

        let errors = self.log.error_count();
        let error_style = if errors > 0 {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };
        let summary = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Current task: ", Style::default().fg(Color::DarkGray)),
                Span::raw(self.task_id.unwrap_or("-").to_string()),
            ]),
            Line::from(vec![
                Span::styled("Total errors: ", Style::default().fg(Color::DarkGray)),
                Span::styled(errors.to_string(), error_style),
            ]),
            Line::from(vec![
                Span::styled("Events:       ", Style::default().fg(Color::DarkGray)),
                Span::raw(self.log.len().to_string()),
            ]),
        ]);
        frame.render_widget(summary, summary_area);

        let lines = stream_lines(self.log.events());
        let visible = stream_area.height as usize;
        let skip = lines.len().saturating_sub(visible);
        let stream = Paragraph::new(lines).scroll((skip as u16, 0));
        frame.render_widget(stream, stream_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::journal::{ActionKind, ErrorKind};
    use crate::core::level::LevelId;
    use uuid::Uuid;

    fn event(action: ActionKind, error: Option<ErrorKind>) -> LogEvent {
        LogEvent {
            id: Uuid::new_v4(),
            level: LevelId::new("LEVEL_2"),
            timestamp: 1_700_000_000_123,
            action,
            error,
            context: None,
            ring: None,
        }
    }

    #[test]
    fn test_stream_line_is_compact_json() {
        let lines = stream_lines(&[event(ActionKind::Pop, None)]);
        let text = lines[0].to_string();
        assert!(text.starts_with("● "));
        let json: serde_json::Value = serde_json::from_str(&text["● ".len()..]).unwrap();
        assert_eq!(json["taskId"], "LEVEL_2");
        assert_eq!(json["act"], "POP");
        assert!(json["err"].is_null());
        assert!(json["time"].as_str().unwrap().ends_with(".123"));
    }

    #[test]
    fn test_error_lines_are_marked() {
        let lines = stream_lines(&[event(ActionKind::Error, Some(ErrorKind::LifoViolation))]);
        let text = lines[0].to_string();
        assert!(text.starts_with("✖ "));
        assert!(text.contains("\"err\":\"LIFO_VIOLATION\""));
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::Red));
    }
}
