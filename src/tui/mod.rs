//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. A 3D
//! front end would replace it and keep `core` untouched.
//!
//! ## Keys
//!
//! - `a`..`z`: click the ring with that label
//! - `1`, `2`: click the first/second pole of the current layout
//! - `Enter`: dismiss the success banner
//! - `Esc`, `Ctrl+C`: quit (the log is exported first)
//!
//! ## Redraw Strategy
//!
//! - **Shaking**: a ring is animating, redraw every ~40ms.
//! - **Idle**: sleep up to 100ms, redraw only on input or alarm signals.

mod alarm;
mod component;
mod components;
mod event;
mod shake;
mod ui;

use log::{info, warn};
use std::path::Path;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crate::ExportFormat;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::export;
use crate::core::level::LevelCatalog;
use crate::core::ring::RingId;
use crate::core::session::{Session, SessionOptions};
use crate::tui::alarm::TokioAlarm;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::shake::Shakes;

const ANIMATION_TICK: Duration = Duration::from_millis(40);
const IDLE_TICK: Duration = Duration::from_millis(100);

/// TUI-specific presentation state (not part of core study logic)
#[derive(Debug, Default)]
pub struct TuiState {
    pub shakes: Shakes,
    /// Transient status line shown in the title bar.
    pub status: String,
    /// Set once the log has been written so quit doesn't write it again.
    pub exported: bool,
}

/// Translate a TUI event into a core action, given the active session.
fn to_action(event: TuiEvent, session: &Session) -> Option<Action> {
    match event {
        TuiEvent::RingKey(c) => RingId::from_label(c)
            .filter(|id| session.puzzle().ring(*id).is_some())
            .map(Action::ClickRing),
        TuiEvent::PoleKey(slot) => session
            .puzzle()
            .layout()
            .poles()
            .get(slot.checked_sub(1)?)
            .copied()
            .map(Action::ClickPole),
        TuiEvent::Acknowledge => Some(Action::Acknowledge),
        TuiEvent::Quit => Some(Action::Quit),
        TuiEvent::Resize => None,
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let catalog = Arc::new(LevelCatalog::standard(&config.rules));
    let mut session = Session::new(
        catalog,
        SessionOptions {
            completion_delay: config.completion_delay,
            auto_advance: config.auto_advance,
            participant: config.participant.clone(),
        },
    );
    let mut tui = TuiState::default();

    // Channel for completion signals from alarm tasks
    let (tx, rx) = mpsc::channel();
    let alarm = TokioAlarm::new(tx);

    let mut terminal = ratatui::init();
    let mut needs_redraw = true; // Force first frame

    loop {
        let now = Instant::now();
        let animating = tui.shakes.is_animating(now);
        if animating {
            needs_redraw = true;
        } else {
            tui.shakes.prune(now);
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &session, &tui, now))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Input events first, then anything the alarm delivered
        let mut actions: Vec<Action> = first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
            .filter_map(|event| to_action(event, &session))
            .collect();
        while let Ok(action) = rx.try_recv() {
            actions.push(action);
            needs_redraw = true;
        }

        let mut should_quit = false;
        for action in actions {
            match update(&mut session, action, &alarm) {
                Effect::None => {}
                Effect::Shake(ring) => tui.shakes.start(ring, Instant::now()),
                Effect::LevelChanged => {
                    tui.shakes.clear();
                    tui.status.clear();
                }
                Effect::StudyComplete => {
                    tui.shakes.clear();
                    export_once(&session, &config, &mut tui);
                }
                Effect::Quit => {
                    should_quit = true;
                    break;
                }
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    export_once(&session, &config, &mut tui);
    info!(
        "Session ended: {} events, {} errors, complete: {}",
        session.log().len(),
        session.log().error_count(),
        session.is_complete()
    );
    Ok(())
}

fn export_once(session: &Session, config: &ResolvedConfig, tui: &mut TuiState) {
    if tui.exported {
        return;
    }
    let Some(path) = config.export_path.as_deref() else {
        return;
    };
    tui.status = export_status(session, path, config.export_format);
    tui.exported = true;
}

fn export_status(session: &Session, path: &Path, format: ExportFormat) -> String {
    match export::write_export(session, path, format) {
        Ok(()) => format!("Exported to {}", path.display()),
        Err(e) => {
            warn!("Failed to export session log to {}: {}", path.display(), e);
            format!("Export failed: {e}")
        }
    }
}
