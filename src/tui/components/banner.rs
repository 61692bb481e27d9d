//! Success banner overlay shown while a completed level is waiting to be
//! acknowledged.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::tui::component::Component;

pub struct SuccessBanner<'a> {
    pub title: &'a str,
    pub is_last: bool,
}

impl<'a> SuccessBanner<'a> {
    pub fn new(title: &'a str, is_last: bool) -> Self {
        Self { title, is_last }
    }

    fn prompt(&self) -> &'static str {
        if self.is_last {
            "[Enter] Finish Study"
        } else {
            "[Enter] Next Level →"
        }
    }
}

impl Component for SuccessBanner<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(50, 40, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Task Complete ")
            .title_alignment(Alignment::Center)
            .padding(Padding::uniform(1));

        let body = Paragraph::new(vec![
            Line::styled(
                self.title.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
            Line::styled(self.prompt(), Style::default().fg(Color::Cyan)),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(body, overlay);
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
