//! # babel - Chat-style detection, summarization and translation
//!
//! `babel` is an interactive terminal chat. Every line you send is stored as
//! a message together with its detected language; earlier messages can then
//! be summarized or translated into one of a handful of target languages.
//! The three capabilities are served by OpenAI-compatible endpoints.
//!
//! ## Quick Start
//!
//! ```bash
//! # Start chatting (translations go to the configured default language)
//! babel
//!
//! # Translate into Portuguese and use a specific model for everything
//! babel chat --to pt --model gemma3:12b
//!
//! # List target languages
//! babel languages
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/babel/config.toml`:
//!
//! ```toml
//! [babel]
//! provider = "ollama"
//! model = "gemma3:12b"
//! to = "en"
//!
//! [providers.ollama]
//! endpoint = "http://localhost:11434"
//! models = ["gemma3:12b"]
//!
//! [capabilities.detector]
//! model = "llama3.2"
//! ```
//!
//! A capability with no provider is simply unavailable: messages are stored
//! with language `unknown`, and summarize/translate report an error.

/// Capability traits and the OpenAI-compatible host.
pub mod capability;

/// Interactive chat mode and the message store.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and capability resolution.
pub mod config;

/// Errors reported by chat actions.
pub mod error;

/// Diagnostic logging setup.
pub mod logging;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Terminal UI components (spinner, colors).
pub mod ui;
