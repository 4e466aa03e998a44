//! Summary display module
//!
//! Prints the answer history to stdout once the terminal has been restored.

use crate::tui::components::truncate_to_width;
use crate::tui::responses::{MAX_ANSWER_WIDTH, Response, ResponseLog};
use crossterm::style::Stylize;
use rust_i18n::t;
use std::io::IsTerminal;

/// Print the session summary
pub fn display_summary(title: &str, responses: &ResponseLog) {
    println!("\n{}", "═".repeat(60));
    println!("{:^60}", title);
    println!("{}", "═".repeat(60));

    if responses.is_empty() {
        println!("\n  {}", t!("summary_empty").to_string().dim());
    } else {
        println!("\n  {}", t!("summary_answers"));
        println!("  {}", "─".repeat(40));
        for entry in responses.entries() {
            match entry {
                Response::Answer { question, answer } => {
                    let answer = truncate_to_width(answer, MAX_ANSWER_WIDTH);
                    println!("    {} {}: {}", "✓".green(), question, answer.bold());
                }
                Response::Note(text) => {
                    println!("    {} {}", "•".cyan(), text);
                }
            }
        }
    }

    println!("\n{}", "═".repeat(60));
}

/// Whether both stdin and stdout are attached to a terminal
pub fn should_run_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}
