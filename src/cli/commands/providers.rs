//! Provider listing command handler.

use anyhow::Result;

use crate::capability::CapabilityKind;
use crate::config::{ConfigFile, ConfigManager, ResolveOptions, resolve_config};
use crate::ui::Style;

/// Prints configured providers to stdout.
///
/// If `specific_provider` is provided, shows detailed information for that provider.
/// Otherwise, lists all configured providers followed by the capability bindings.
pub fn print_providers(specific_provider: Option<&str>) -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_if_exists()?;

    if config.providers.is_empty() {
        println!("No providers configured.");
        println!("Add providers to {}", manager.config_path().display());
        return Ok(());
    }

    let default_provider = config.babel.provider.as_deref();

    if let Some(provider_name) = specific_provider {
        let Some(provider) = config.providers.get(provider_name) else {
            anyhow::bail!("Provider '{provider_name}' not found");
        };
        let is_default = default_provider == Some(provider_name);
        println!(
            "{} {}{}",
            Style::header("Provider:"),
            Style::value(provider_name),
            if is_default {
                format!(" {}", Style::default_marker())
            } else {
                String::new()
            }
        );
        println!("  endpoint = {}", provider.endpoint);
        if provider.requires_api_key() {
            let has_key = provider.get_api_key().is_some();
            println!(
                "  api_key  = {}",
                if has_key { "(set)" } else { "(not set)" }
            );
        }
        if provider.models.is_empty() {
            println!("  models   = (none configured)");
        } else {
            println!("  models:");
            for model in &provider.models {
                println!("    - {model}");
            }
        }
        return Ok(());
    }

    println!("{}\n", Style::header("Configured providers"));
    let mut names: Vec<_> = config.providers.keys().collect();
    names.sort();
    for name in names {
        let provider = &config.providers[name];
        let is_default = default_provider == Some(name.as_str());
        println!(
            "  {}{}",
            Style::value(name),
            if is_default {
                format!(" {}", Style::default_marker())
            } else {
                String::new()
            }
        );
        println!("    endpoint: {}", Style::secondary(&provider.endpoint));
        if !provider.models.is_empty() {
            println!("    models: {}", provider.models.join(", "));
        }
    }
    println!();

    print_bindings(&config);
    Ok(())
}

fn print_bindings(config: &ConfigFile) {
    println!("{}", Style::header("Capabilities"));
    match resolve_config(&ResolveOptions::default(), config) {
        Ok(resolved) => {
            for kind in CapabilityKind::ALL {
                match resolved.bindings.get(kind) {
                    Some(binding) => println!(
                        "  {:<10}  {}/{}",
                        kind.name(),
                        binding.provider_name,
                        binding.model
                    ),
                    None => println!("  {:<10}  {}", kind.name(), Style::hint("not available")),
                }
            }
        }
        Err(e) => println!("  {} {e:#}", Style::warning("Unresolved:")),
    }
}
