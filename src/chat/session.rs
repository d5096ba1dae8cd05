use anyhow::Result;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use std::sync::Arc;

use super::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use super::store::MessageStore;
use super::ui;
use crate::config::{CapabilityBindings, ResolvedConfig};
use crate::error::ChatError;
use crate::ui::{Spinner, Style, is_prompt_cancelled};

/// What the session shows under `/config`.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub bindings: CapabilityBindings,
}

impl From<&ResolvedConfig> for SessionConfig {
    fn from(resolved: &ResolvedConfig) -> Self {
        Self {
            bindings: resolved.bindings.clone(),
        }
    }
}

/// An interactive chat session.
///
/// Each line of text becomes a message; slash commands run the
/// summarize and translate actions on earlier messages.
pub struct ChatSession {
    config: SessionConfig,
    store: Arc<MessageStore>,
}

impl ChatSession {
    pub const fn new(config: SessionConfig, store: Arc<MessageStore>) -> Self {
        Self { config, store }
    }

    pub async fn run(&self) -> Result<()> {
        ui::print_header();

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);

        // Non-highlighted suggestions: gray
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        // Highlighted suggestion: purple
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            let input = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message("Type text to send, /help for commands, Ctrl+C to quit")
                .prompt();

            match input {
                Ok(line) => match parse_input(&line) {
                    Input::Empty => {}
                    Input::Command(cmd) => {
                        if !self.handle_command(cmd).await {
                            break;
                        }
                    }
                    Input::Text(text) => self.submit(text).await,
                },
                Err(e) if is_prompt_cancelled(&e) => {
                    println!(); // Clear line before goodbye message
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    async fn handle_command(&self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Config => {
                ui::print_config(&self.config, &self.store.target_language());
            }
            SlashCommand::Help => ui::print_help(),
            SlashCommand::List => ui::print_messages(&self.store.messages()),
            SlashCommand::Quit => return false,
            SlashCommand::Summarize(position) => self.summarize(position).await,
            SlashCommand::Translate(position) => self.translate(position).await,
            SlashCommand::To(lang) => self.select_target_language(&lang),
            SlashCommand::Usage(usage) => ui::print_error(&format!("Usage: {usage}")),
            SlashCommand::Unknown(cmd) => {
                ui::print_error(&format!("Unknown command: /{cmd}"));
            }
        }
        true
    }

    async fn submit(&self, text: String) {
        self.store.set_draft(text);

        let spinner = Spinner::new("Detecting language...");
        let result = self.store.submit().await;
        spinner.stop();

        self.show_result(result);
    }

    async fn summarize(&self, position: usize) {
        let index = position - 1;

        // Only offered for long English messages; the action itself would run.
        if let Err(e) = self.store.require_summary_offer(index) {
            self.show_result(Err(e));
            return;
        }

        let spinner = Spinner::new("Summarizing...");
        let result = self.store.summarize(index).await.map(|()| index);
        spinner.stop();

        self.show_result(result);
    }

    async fn translate(&self, position: usize) {
        let index = position - 1;

        let spinner = Spinner::new("Translating...");
        let result = self.store.translate(index).await.map(|()| index);
        spinner.stop();

        self.show_result(result);
    }

    fn select_target_language(&self, lang: &str) {
        match self.store.select_target_language(lang) {
            Ok(()) => println!(
                "{} Target language set to {}\n",
                Style::success("✓"),
                Style::value(lang)
            ),
            Err(e) => ui::print_error(&e.to_string()),
        }
    }

    /// Prints the updated message, or whatever the store put in its error slot.
    fn show_result(&self, result: Result<usize, ChatError>) {
        match result {
            Ok(index) => {
                if let Some(message) = self.store.message(index) {
                    print!("{}", ui::render_message(index, &message));
                }
            }
            Err(e) => {
                let message = self.store.error().unwrap_or_else(|| e.to_string());
                ui::print_error(&message);
            }
        }
    }
}
