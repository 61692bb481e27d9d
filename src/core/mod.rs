//! # Core Study Logic
//!
//! This module contains Smart Stack's business logic: the level/interaction
//! state machine. It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Session (state)      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No UI. No threads.     │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Export   │      │  3D scene  │
//!     │  Adapter   │      │   (JSON)   │      │  (future)  │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`ring`], [`pole`], [`puzzle`]: the puzzle state store
//! - [`level`]: the level catalog
//! - [`rules`]: per-level behaviors (what a click means)
//! - [`processor`]: the pure action processor
//! - [`journal`]: the append-only session log
//! - [`director`]: level progression and the input gate
//! - [`session`], [`action`]: the session and its reducer
//! - [`alarm`]: deferred completion signal
//! - [`config`], [`export`]: ambient plumbing

pub mod action;
pub mod alarm;
pub mod config;
pub mod director;
pub mod export;
pub mod journal;
pub mod level;
pub mod pole;
pub mod processor;
pub mod puzzle;
pub mod ring;
pub mod rules;
pub mod session;
