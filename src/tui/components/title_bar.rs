//! # TitleBar Component
//!
//! Top status bar: app name, participant, and the transient status line
//! (e.g. "Exported to session.json").
//!
//! Stateless. All three props are handed in by `ui::draw_ui`; the title bar
//! does not care whether they come from the session or the TUI state.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

pub struct TitleBar {
    pub participant: Option<String>,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(participant: Option<String>, status_message: String) -> Self {
        Self {
            participant,
            status_message,
        }
    }

    fn text(&self) -> String {
        let mut text = String::from("Smart Stack");
        if let Some(participant) = &self.participant {
            text.push_str(&format!(" (participant: {participant})"));
        }
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let span = Span::styled(self.text(), Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(span, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_participant_and_status() {
        let mut title_bar = TitleBar::new(Some("P07".to_string()), "Exported".to_string());
        let text = rendered(&mut title_bar);
        assert!(text.contains("Smart Stack"));
        assert!(text.contains("participant: P07"));
        assert!(text.contains("| Exported"));
    }

    #[test]
    fn test_title_bar_minimal() {
        let mut title_bar = TitleBar::new(None, String::new());
        let text = rendered(&mut title_bar);
        assert!(text.contains("Smart Stack"));
        assert!(!text.contains('|'));
        assert!(!text.contains("participant"));
    }
}
