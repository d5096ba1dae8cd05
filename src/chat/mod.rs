//! Interactive chat mode.
//!
//! Provides a REPL-style interface over the [`MessageStore`]: text lines are
//! submitted as messages and slash commands trigger summaries and
//! translations.

/// Slash command parsing and autocomplete.
pub mod command;
mod session;
mod store;
mod ui;

pub use session::{ChatSession, SessionConfig};
pub use store::{Message, MessageStore, SUMMARY_LANGUAGE, SUMMARY_MIN_CHARS, Translation};
pub use ui::render_message;
