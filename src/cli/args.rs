use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "babel")]
#[command(about = "Chat-style language detection, summarization and translation")]
#[command(version)]
pub struct Args {
    /// Target language code (en, pt, es, ru, tr, fr)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// Provider name for every capability (overrides config file)
    #[arg(short = 'p', long)]
    pub provider: Option<String>,

    /// Model name for every capability (overrides config file)
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive chat mode (the default)
    Chat {
        /// Target language code (en, pt, es, ru, tr, fr)
        #[arg(short = 't', long = "to")]
        to: Option<String>,

        /// Provider name for every capability (overrides config file)
        #[arg(short = 'p', long)]
        provider: Option<String>,

        /// Model name for every capability (overrides config file)
        #[arg(short = 'm', long)]
        model: Option<String>,
    },
    /// List target language codes
    Languages,
    /// List configured providers and capability bindings
    Providers {
        /// Show details for a specific provider
        provider: Option<String>,
    },
}
