//! Task header above the scene: "TASK i / N", optional badge, title, and the
//! instruction text. Once the study is complete it shows the closing card
//! instead.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::core::level::LevelDef;
use crate::tui::component::Component;

pub struct InstructionPanel<'a> {
    pub level: Option<&'a LevelDef>,
    /// (1-based current, total)
    pub progress: (usize, usize),
}

impl<'a> InstructionPanel<'a> {
    pub fn new(level: Option<&'a LevelDef>, progress: (usize, usize)) -> Self {
        Self { level, progress }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let Some(level) = self.level else {
            return vec![
                Line::from(Span::styled(
                    "Study Complete",
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                )),
                Line::from("Thank you for participating. Press Esc to exit."),
            ];
        };

        let (current, total) = self.progress;
        let mut header = vec![Span::styled(
            format!("TASK {current} / {total}"),
            Style::default().fg(Color::DarkGray),
        )];
        if let Some(badge) = &level.badge {
            header.push(Span::raw("  "));
            header.push(Span::styled(
                format!(" {badge} "),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        vec![
            Line::from(header),
            Line::from(Span::styled(
                level.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(level.instruction.clone()),
        ]
    }
}

impl Component for InstructionPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.lines())
            .block(Block::default().borders(Borders::BOTTOM))
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
