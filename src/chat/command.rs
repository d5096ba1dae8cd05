use inquire::autocompletion::{Autocomplete, Replacement};

// Available slash commands: (command, description)
const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/config", "Show capabilities and target language"),
    ("/help", "Show available commands"),
    ("/list", "Show all messages"),
    ("/quit", "Exit chat mode"),
    ("/summarize", "Summarize message <n>"),
    ("/to", "Select target language <lang>"),
    ("/translate", "Translate message <n>"),
];

/// Slash command autocompleter
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if !input.starts_with('/') || input.contains(char::is_whitespace) {
            return Ok(vec![]);
        }

        let suggestions: Vec<String> = SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect();

        Ok(suggestions)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        let replacement =
            highlighted_suggestion.map(|s| s.split_whitespace().next().unwrap_or("").to_string());
        Ok(replacement)
    }
}

/// Slash command types.
///
/// Message numbers are 1-based, as shown in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Config,
    Help,
    List,
    Quit,
    Summarize(usize),
    Translate(usize),
    To(String),
    /// A known command with missing or malformed arguments.
    Usage(&'static str),
    Unknown(String),
}

/// Input types
#[derive(Debug)]
pub enum Input {
    Text(String),
    Command(SlashCommand),
    Empty,
}

pub fn parse_input(input: &str) -> Input {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Input::Empty;
    }

    // Plain text keeps its inner spacing; only the line itself is trimmed.
    trimmed
        .strip_prefix('/')
        .map_or_else(|| Input::Text(trimmed.to_string()), parse_slash_command)
}

fn parse_slash_command(cmd: &str) -> Input {
    let parts: Vec<&str> = cmd.split_whitespace().collect();

    let command = match parts.as_slice() {
        ["config"] => SlashCommand::Config,
        ["help"] => SlashCommand::Help,
        ["list" | "ls"] => SlashCommand::List,
        ["quit" | "exit" | "q"] => SlashCommand::Quit,
        ["summarize" | "sum", n] => {
            parse_position(n).map_or(SlashCommand::Usage("/summarize <n>"), SlashCommand::Summarize)
        }
        ["summarize" | "sum", ..] => SlashCommand::Usage("/summarize <n>"),
        ["translate" | "tr", n] => {
            parse_position(n).map_or(SlashCommand::Usage("/translate <n>"), SlashCommand::Translate)
        }
        ["translate" | "tr", ..] => SlashCommand::Usage("/translate <n>"),
        ["to", lang] => SlashCommand::To((*lang).to_string()),
        ["to", ..] => SlashCommand::Usage("/to <lang>"),
        _ => SlashCommand::Unknown(parts.join(" ")),
    };

    Input::Command(command)
}

fn parse_position(value: &str) -> Option<usize> {
    value.parse::<usize>().ok().filter(|n| *n > 0)
}
