//! # TUI Components
//!
//! All components are stateless: they borrow what they show from the
//! `Session` or `TuiState` and render it. Anything that changes over time
//! (shake animation, status line) lives in `TuiState`, not here.
//!
//! ```text
//! components/
//! ├── title_bar.rs     (top status bar)
//! ├── instruction.rs   (task header and instruction)
//! ├── scene.rs         (poles, rings, floor)
//! ├── sidebar.rs       (observer dashboard and log stream)
//! └── banner.rs        (success overlay)
//! ```

mod banner;
mod instruction;
mod scene;
mod sidebar;
mod title_bar;

pub use banner::SuccessBanner;
pub use instruction::InstructionPanel;
pub use scene::Scene;
pub use sidebar::Sidebar;
pub use title_bar::TitleBar;
