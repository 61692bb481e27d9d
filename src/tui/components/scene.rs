//! # Scene Component
//!
//! Text rendition of the puzzle: one column per pole, rings drawn bottom to
//! top, and the floor row underneath.
//!
//! ```text
//!        ( c GREEN )
//!        ( b BLUE  )        <- selected rings get a ▶ marker
//!        ( a RED   )
//!      ══════╦══════
//!       [1] CENTER
//!
//! Floor:  d GOLD   e PURPLE ...
//! ```
//!
//! Ring labels double as the keys that click them. Shaking rings are nudged
//! one column left or right per animation frame. A blindfolded level hides
//! its stack behind a `?` box.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout as Split, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::core::pole::PoleId;
use crate::core::puzzle::PuzzleState;
use crate::core::ring::{Ring, RingColor};
use crate::tui::component::Component;
use crate::tui::shake::Shakes;

const FLOOR_HEIGHT: u16 = 3;
const RING_WIDTH: usize = 8;

pub struct Scene<'a> {
    pub puzzle: &'a PuzzleState,
    pub blindfold: bool,
    pub shakes: &'a Shakes,
    pub now: Instant,
}

impl<'a> Scene<'a> {
    pub fn new(puzzle: &'a PuzzleState, blindfold: bool, shakes: &'a Shakes, now: Instant) -> Self {
        Self {
            puzzle,
            blindfold,
            shakes,
            now,
        }
    }

    fn ring_span(&self, ring: &Ring) -> Span<'static> {
        let selected = self.puzzle.selected() == Some(ring.id);
        let offset = self.shakes.offset(ring.id, self.now);
        let left = (1 + offset).max(0) as usize;
        let right = (1 - offset).max(0) as usize;
        let marker = if selected { "▶" } else { " " };
        let body = format!(
            "{marker}{}( {} {:<w$} ){}",
            " ".repeat(left),
            ring.id.label(),
            ring.color.name(),
            " ".repeat(right),
            w = RING_WIDTH - 2,
        );
        let mut style = Style::default().fg(ring_color(ring.color));
        if selected {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        Span::styled(body, style)
    }

    /// Lines for one pole column, top of screen first.
    pub fn pole_lines(&self, pole: PoleId, slot: usize, height: usize) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();
        if self.blindfold {
            let hidden = Style::default().fg(Color::DarkGray);
            lines.push(Line::styled("┌─────────┐", hidden));
            lines.push(Line::styled("│    ?    │", hidden));
            lines.push(Line::styled("│    ?    │", hidden));
            lines.push(Line::styled("└─────────┘", hidden));
        } else {
            let rings: Vec<&Ring> = self.puzzle.stack_of(pole).collect();
            for ring in rings.iter().rev() {
                lines.push(Line::from(self.ring_span(ring)));
            }
        }

        let base = 2;
        let pad = height.saturating_sub(lines.len() + base);
        let mut column = vec![Line::from("│"); pad];
        column.append(&mut lines);
        column.push(Line::from("══════╩══════"));
        column.push(Line::styled(
            format!("[{}] {}", slot, pole.name()),
            Style::default().fg(Color::Cyan),
        ));
        column
    }

    pub fn floor_line(&self) -> Line<'static> {
        let mut spans = vec![Span::styled("Floor: ", Style::default().fg(Color::DarkGray))];
        let mut any = false;
        for ring in self.puzzle.floor_rings() {
            any = true;
            spans.push(self.ring_span(ring));
        }
        if !any {
            spans.push(Span::styled("(empty)", Style::default().fg(Color::DarkGray)));
        }
        Line::from(spans)
    }
}

impl Component for Scene<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [poles_area, floor_area] =
            Split::vertical([Constraint::Min(0), Constraint::Length(FLOOR_HEIGHT)]).areas(area);

        let poles = self.puzzle.layout().poles();
        let columns = Split::horizontal(
            poles.iter().map(|_| Constraint::Ratio(1, poles.len() as u32)),
        )
        .split(poles_area);

        for (slot, (pole, column)) in poles.iter().zip(columns.iter()).enumerate() {
            let lines = self.pole_lines(*pole, slot + 1, column.height as usize);
            frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), *column);
        }

        let floor = Paragraph::new(self.floor_line())
            .block(Block::default().borders(Borders::TOP))
            .wrap(Wrap { trim: false });
        frame.render_widget(floor, floor_area);
    }
}

fn ring_color(color: RingColor) -> Color {
    color.hex().parse().unwrap_or(Color::White)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pole::Layout;
    use crate::core::ring::RingId;
    use std::time::Duration;

    fn stacked() -> PuzzleState {
        PuzzleState::builder(Layout::Single)
            .stacked(PoleId::Center, &[RingColor::Red, RingColor::Gold])
            .floor(RingColor::Blue)
            .build()
    }

    fn joined(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_pole_lines_top_ring_first() {
        let puzzle = stacked();
        let shakes = Shakes::default();
        let scene = Scene::new(&puzzle, false, &shakes, Instant::now());
        let lines = joined(&scene.pole_lines(PoleId::Center, 1, 10));
        assert_eq!(lines.len(), 10);
        let gold = lines.iter().position(|l| l.contains("GOLD")).unwrap();
        let red = lines.iter().position(|l| l.contains("RED")).unwrap();
        assert!(gold < red);
        assert_eq!(lines.last().unwrap(), "[1] CENTER");
    }

    #[test]
    fn test_blindfold_hides_stack() {
        let puzzle = stacked();
        let shakes = Shakes::default();
        let scene = Scene::new(&puzzle, true, &shakes, Instant::now());
        let lines = joined(&scene.pole_lines(PoleId::Center, 1, 10));
        assert!(lines.iter().all(|l| !l.contains("GOLD")));
        assert!(lines.iter().any(|l| l.contains('?')));
    }

    #[test]
    fn test_floor_line_lists_floor_rings_only() {
        let puzzle = stacked();
        let shakes = Shakes::default();
        let scene = Scene::new(&puzzle, false, &shakes, Instant::now());
        let floor = scene.floor_line().to_string();
        assert!(floor.contains("c BLUE"));
        assert!(!floor.contains("RED"));
    }

    #[test]
    fn test_shake_nudges_ring() {
        let puzzle = stacked();
        let t0 = Instant::now();
        let mut shakes = Shakes::default();
        shakes.start(RingId(0), t0);
        let still = Scene::new(&puzzle, false, &shakes, t0 + Duration::from_secs(1));
        let moving = Scene::new(&puzzle, false, &shakes, t0);
        let ring = puzzle.ring(RingId(0)).unwrap();
        let rest = still.ring_span(ring).content.to_string();
        let shaken = moving.ring_span(ring).content.to_string();
        assert_eq!(rest.len(), shaken.len());
        assert_ne!(rest, shaken);
    }
}
