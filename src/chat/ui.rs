//! Chat mode UI components.

use std::fmt::Write as _;

use crate::capability::{CapabilityKind, language_name};
use crate::ui::Style;

use super::session::SessionConfig;
use super::store::Message;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header() {
    println!(
        "{} {} - Detect, summarize and translate",
        Style::header("babel"),
        Style::version(format!("v{VERSION}"))
    );
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_config(config: &SessionConfig, target_language: &str) {
    println!("{}", Style::header("Configuration"));
    println!(
        "  {}          {}",
        Style::label("to"),
        Style::value(describe_language(target_language))
    );
    for kind in CapabilityKind::ALL {
        let label = format!("{:<10}", kind.name());
        match config.bindings.get(kind) {
            Some(binding) => println!(
                "  {}  {} {}",
                Style::label(label),
                Style::value(format!("{}/{}", binding.provider_name, binding.model)),
                Style::secondary(&binding.endpoint)
            ),
            None => println!(
                "  {}  {}",
                Style::label(label),
                Style::hint("not available")
            ),
        }
    }
    println!();
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    let commands = [
        ("/list", "Show all messages"),
        ("/summarize <n>", "Summarize message n"),
        ("/translate <n>", "Translate message n into the target language"),
        ("/to <lang>", "Select the target language (en, pt, es, ru, tr, fr)"),
        ("/config", "Show capabilities and target language"),
        ("/help", "Show this help"),
        ("/quit", "Exit chat mode"),
    ];
    for (command, description) in commands {
        println!(
            "  {}  {}",
            Style::command(format!("{command:<15}")),
            Style::secondary(description)
        );
    }
    println!();
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}

pub fn print_messages(messages: &[Message]) {
    if messages.is_empty() {
        println!("{}", Style::hint("No messages yet. Type some text to start."));
        println!();
        return;
    }
    for (index, message) in messages.iter().enumerate() {
        print!("{}", render_message(index, message));
    }
}

fn describe_language(code: &str) -> String {
    language_name(code).map_or_else(|| code.to_string(), |name| format!("{name} ({code})"))
}

/// Renders one message with its derived fields and the actions it offers.
///
/// `index` is the store index; it is shown 1-based.
pub fn render_message(index: usize, message: &Message) -> String {
    let position = index + 1;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {} {}",
        Style::header(format!("#{position}")),
        Style::code(format!("[{}]", message.detected_language())),
        message.text()
    );

    if let Some(summary) = message.summary() {
        let _ = writeln!(out, "   {} {summary}", Style::label("summary:"));
    }

    if let Some(translation) = message.translation() {
        let _ = writeln!(
            out,
            "   {} {}",
            Style::label(format!("translation ({}):", translation.language)),
            translation.text
        );
    }

    let mut actions = Vec::new();
    if message.offers_summary() {
        actions.push(format!("/summarize {position}"));
    }
    actions.push(format!("/translate {position}"));
    let _ = writeln!(out, "   {}", Style::hint(actions.join("  ")));
    out.push('\n');

    out
}
