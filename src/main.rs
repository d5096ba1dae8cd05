use anyhow::Result;
use clap::Parser;

use babel_chat::capability::{print_languages, validate_target_language};
use babel_chat::cli::commands::{chat, providers};
use babel_chat::cli::{Args, Command};
use babel_chat::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    match args.command {
        Some(Command::Languages) => {
            print_languages();
        }
        Some(Command::Providers { provider }) => {
            providers::print_providers(provider.as_deref())?;
        }
        Some(Command::Chat {
            to,
            provider,
            model,
        }) => {
            if let Some(ref lang) = to {
                validate_target_language(lang)?;
            }

            let options = chat::ChatOptions {
                to: to.or(args.to),
                provider: provider.or(args.provider),
                model: model.or(args.model),
            };
            chat::run_chat(options).await?;
        }
        None => {
            if let Some(ref lang) = args.to {
                validate_target_language(lang)?;
            }

            let options = chat::ChatOptions {
                to: args.to,
                provider: args.provider,
                model: args.model,
            };
            chat::run_chat(options).await?;
        }
    }

    Ok(())
}
