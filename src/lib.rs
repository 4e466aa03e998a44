//! Stepwise - a terminal wizard framework
//!
//! This library provides the navigation and state machinery underneath
//! multi-step terminal wizards:
//! - A typed context carrying wizard state through a chain of screens
//! - Step-back navigation by replaying cloned state snapshots
//! - An init/update/view screen contract driven by a single event loop
//! - Reusable widgets: validated text field, selector, checkbox,
//!   spinner and progress downloader
//! - Background actions that report back to the loop as events
//! - A reference `launch` wizard built on top of all of the above

// Initialize i18n with locale files
rust_i18n::i18n!("locales", fallback = "en");

pub mod cli;
pub mod config;
pub mod error;
pub mod i18n;
pub mod tui;
pub mod wizard;

pub use cli::Cli;
pub use config::{Config, ConfigError};
pub use error::{Error, Result};
pub use i18n::init_locale;
pub use tui::{
    Action, ActionError, Context, Navigator, Screen, SessionEnd, Transition, TuiApp, TuiEvent,
    display_summary, should_run_interactive,
};
