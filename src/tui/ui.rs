use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::core::session::Session;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{InstructionPanel, Scene, Sidebar, SuccessBanner, TitleBar};

const SIDEBAR_WIDTH: u16 = 58;
const HELP: &str = " a-z click ring  1-2 click pole  Enter next  Esc quit ";

pub fn draw_ui(frame: &mut Frame, session: &Session, tui: &TuiState, now: Instant) {
    use Constraint::{Length, Min};
    let [title_area, body_area, help_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());
    let [main_area, sidebar_area] =
        Layout::horizontal([Min(0), Length(SIDEBAR_WIDTH)]).areas(body_area);
    let [instruction_area, scene_area] =
        Layout::vertical([Length(4), Min(0)]).areas(main_area);

    TitleBar::new(
        session.participant().map(str::to_string),
        tui.status.clone(),
    )
    .render(frame, title_area);

    let level = session.level();
    InstructionPanel::new(level, session.progress()).render(frame, instruction_area);

    if let Some(level) = level {
        Scene::new(session.puzzle(), level.blindfold, &tui.shakes, now).render(frame, scene_area);
    }

    Sidebar::new(level.map(|l| l.id.as_str()), session.log()).render(frame, sidebar_area);

    frame.render_widget(
        Paragraph::new(Line::from(HELP)).style(Style::default().fg(Color::DarkGray)),
        help_area,
    );

    if session.director().is_celebrating()
        && let Some(level) = level
    {
        let (current, total) = session.progress();
        SuccessBanner::new(&level.title, current == total).render(frame, body_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ring::RingId;
    use crate::core::rules::Gesture;
    use crate::test_support::{RecordingAlarm, test_session};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(session: &Session) -> String {
        let backend = TestBackend::new(140, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let tui = TuiState::default();
        terminal
            .draw(|f| draw_ui(f, session, &tui, Instant::now()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_draws_first_level() {
        let text = screen(&test_session());
        assert!(text.contains("TASK 1 / 6"));
        assert!(text.contains("Observer Dashboard"));
        assert!(text.contains("CENTER"));
    }

    #[test]
    fn test_banner_appears_while_celebrating() {
        let alarm = RecordingAlarm::default();
        let mut session = test_session();
        for i in 0..3 {
            session.dispatch(Gesture::ClickRing(RingId(i)), 0, &alarm);
        }
        session.signal();
        assert!(screen(&session).contains("Task Complete"));
    }
}
