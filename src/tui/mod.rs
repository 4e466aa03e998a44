//! Terminal wizard framework
//!
//! Ratatui front end plus the navigation machinery: typed context, screen
//! contract, navigator, background actions and widgets.

pub mod action;
pub mod app;
pub mod components;
pub mod context;
pub mod display;
pub mod event;
pub mod navigator;
pub mod responses;
pub mod screen;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use action::{Action, ActionError, ActionId, ActionRunner, CancelToken, Outcome, Reporter};
pub use app::TuiApp;
pub use context::{Context, Flag, Flags, Page};
pub use display::{display_summary, should_run_interactive};
pub use event::{EventPoll, EventQueue, TuiEvent};
pub use navigator::{Navigator, SessionEnd};
pub use responses::{Response, ResponseLog};
pub use screen::{Screen, Transition};
pub use theme::{Theme, theme};
pub use ui::render;
