//! Terminal rendering of comparison state and notifications.

use std::io::Write;

use aicompare_core::clipboard::{Clipboard, ClipboardError};
use aicompare_core::comparison::{ComparisonState, FetchPhase};
use aicompare_core::notify::{Notification, Notifier};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use colored::Colorize;

/// Prints notifications as coloured one-liners.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        let line = format!("[{}] {}", notification.title, notification.description);
        if notification.is_destructive() {
            eprintln!("{}", line.red());
        } else {
            println!("{}", line.bright_green());
        }
    }
}

/// Copies through the terminal using the OSC 52 escape sequence.
pub struct Osc52Clipboard;

pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", BASE64_STANDARD.encode(text.as_bytes()))
}

impl Clipboard for Osc52Clipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| ClipboardError(e.to_string()))
    }
}

pub fn render_answers(state: &ComparisonState) {
    match state.fetch {
        FetchPhase::Idle => {
            println!("{}", "Ask a question to compare answers.".bright_black());
            return;
        }
        FetchPhase::Fetching => {
            println!("{}", "Fetching answers...".yellow());
            return;
        }
        FetchPhase::Failed => {
            println!("{}", "No answers for the last question.".bright_black());
            return;
        }
        FetchPhase::Populated => {}
    }

    if let Some(question) = &state.asked_question {
        println!("{}", format!("Q: {question}").bold());
    }
    for record in &state.answers {
        println!();
        println!("{}", format!("[{}]", record.model).bright_magenta());
        println!("{}", "Original Answer".bright_black());
        for line in record.answer.lines() {
            println!("  {}", line.bright_blue());
        }
        if let Some(humanized) = &record.humanized_answer {
            println!("{}", "Humanized Answer".bright_black());
            for line in humanized.lines() {
                println!("  {}", line.bright_white());
            }
        } else if state.humanize_loading() == Some(record.model.as_str()) {
            println!("{}", "  humanizing...".yellow());
        }
    }
    println!();
}

pub fn render_help() {
    let rows = [
        ("<question>", "Ask every model"),
        ("/humanize <model>", "Humanize one model's answer"),
        ("/copy <model>", "Copy an answer (humanized if available)"),
        ("/answers", "Show the current answers"),
        ("/login <email> [password]", "Sign in"),
        ("/register <email> <name>", "Create an account"),
        ("/logout", "Sign out"),
        ("quit", "Exit"),
    ];
    for (command, description) in rows {
        println!("  {:<28}{}", command.bright_cyan(), description.bright_black());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence_encodes_payload() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }
}
