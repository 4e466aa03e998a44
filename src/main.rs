//! Stepwise - interactive launch wizard
//!
//! Runs the launch wizard in the terminal, then prints what was collected.

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use rust_i18n::t;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use stepwise::{
    Cli, SessionEnd, TuiApp, display_summary, init_locale, should_run_interactive, wizard,
};
use tracing::{Level, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// Initialize i18n for this binary
rust_i18n::i18n!("locales", fallback = "en");

// CLI Output Module
mod cli_output {
    //! Styled output for messages printed outside the TUI

    use crossterm::{
        ExecutableCommand,
        style::{Color, Print, Stylize, style},
    };
    use std::io::stdout;

    /// CLI theme colors
    pub struct CliTheme;

    impl CliTheme {
        pub const ERROR: Color = Color::Red;
        pub const WARNING: Color = Color::Yellow;
        pub const HINT: Color = Color::DarkGrey;
        pub const ACCENT: Color = Color::Cyan;
    }

    pub fn print_error(msg: &str) {
        let _ = stdout().execute(Print(style("✗ ").with(CliTheme::ERROR).bold()));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    pub fn print_warning(msg: &str) {
        let _ = stdout().execute(Print(style("⚠ ").with(CliTheme::WARNING).bold()));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    /// Print the log file location
    pub fn print_log_path(label: &str, path: &str) {
        let _ = stdout().execute(Print(style("  → ").with(CliTheme::ACCENT)));
        let _ = stdout().execute(Print(style(format!("{label}: ")).with(CliTheme::HINT)));
        let _ = stdout().execute(Print(format!("{}\n", path)));
    }
}

fn main() -> Result<()> {
    // Initialize locale based on system settings
    init_locale();

    let cli = Cli::parse();
    let config = cli.load_config()?;

    let log_path = session_log_path(&config.log_dir);
    let _guard = setup_file_only_logging(&cli, &log_path)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        home = %config.home_dir.display(),
        "Stepwise starting"
    );

    if !should_run_interactive() {
        warn!("Standard input or output is not a terminal");
        cli_output::print_error(&t!("cli_not_a_terminal"));
        std::process::exit(2);
    }

    let config = Arc::new(config);
    let app = TuiApp::new(wizard::launch(Arc::clone(&config)), config.tick_rate());

    match app.run()? {
        SessionEnd::Completed(state) => {
            info!(responses = state.responses.len(), "Wizard completed");
            display_summary(&t!("summary_title"), &state.responses);
        }
        SessionEnd::Interrupted(state) => {
            info!(responses = state.responses.len(), "Wizard interrupted by user");
            display_summary(&t!("summary_interrupted"), &state.responses);
            cli_output::print_warning(&t!("cli_interrupted"));
        }
        SessionEnd::Failed(err) => {
            error!(error = %err, "Wizard failed");
            cli_output::print_error(&err.to_string());
            cli_output::print_log_path(&t!("cli_log_file"), &log_path.display().to_string());
            std::process::exit(1);
        }
    }

    cli_output::print_log_path(&t!("cli_log_file"), &log_path.display().to_string());
    Ok(())
}

/// Timestamped log file inside `log_dir`
fn session_log_path(log_dir: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    log_dir.join(format!("Wizard_{}.log", timestamp))
}

/// Setup logging for interactive mode (file only, the terminal belongs to the TUI)
fn setup_file_only_logging(cli: &Cli, log_path: &Path) -> Result<WorkerGuard> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if cli.json_log {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
            .init();
    }

    Ok(guard)
}
