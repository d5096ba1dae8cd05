use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::PathBuf;

use crate::capability::{CapabilityKind, DEFAULT_TARGET_LANGUAGE, validate_target_language};
use crate::paths;
use crate::ui::Style;

/// Default settings in the `[babel]` section of config.toml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BabelConfig {
    /// Provider used by every capability without its own override.
    pub provider: Option<String>,
    /// Model used by every capability without its own override.
    pub model: Option<String>,
    /// Default target language code.
    pub to: Option<String>,
}

/// An OpenAI-compatible provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// The OpenAI-compatible API endpoint URL.
    pub endpoint: String,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// List of available models for this provider.
    #[serde(default)]
    pub models: Vec<String>,
}

impl ProviderConfig {
    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }

    /// Returns `true` if this provider requires an API key.
    pub const fn requires_api_key(&self) -> bool {
        self.api_key.is_some() || self.api_key_env.is_some()
    }
}

const fn default_enabled() -> bool {
    true
}

/// Per-capability overrides, e.g. `[capabilities.summarizer]`.
#[derive(Debug, Clone, Deserialize)]
pub struct CapabilityConfig {
    pub provider: Option<String>,
    pub model: Option<String>,
    /// Setting this to `false` makes the capability unavailable.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for CapabilityConfig {
    fn default() -> Self {
        Self {
            provider: None,
            model: None,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CapabilitiesConfig {
    #[serde(default)]
    pub detector: Option<CapabilityConfig>,
    #[serde(default)]
    pub summarizer: Option<CapabilityConfig>,
    #[serde(default)]
    pub translator: Option<CapabilityConfig>,
}

impl CapabilitiesConfig {
    pub const fn get(&self, kind: CapabilityKind) -> Option<&CapabilityConfig> {
        match kind {
            CapabilityKind::Detector => self.detector.as_ref(),
            CapabilityKind::Summarizer => self.summarizer.as_ref(),
            CapabilityKind::Translator => self.translator.as_ref(),
        }
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/babel/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub babel: BabelConfig,
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    #[serde(default)]
    pub capabilities: CapabilitiesConfig,
}

/// The provider and model a capability resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityBinding {
    pub provider_name: String,
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
}

/// Resolved bindings; `None` means the capability is not available.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityBindings {
    pub detector: Option<CapabilityBinding>,
    pub summarizer: Option<CapabilityBinding>,
    pub translator: Option<CapabilityBinding>,
}

impl CapabilityBindings {
    pub const fn get(&self, kind: CapabilityKind) -> Option<&CapabilityBinding> {
        match kind {
            CapabilityKind::Detector => self.detector.as_ref(),
            CapabilityKind::Summarizer => self.summarizer.as_ref(),
            CapabilityKind::Translator => self.translator.as_ref(),
        }
    }

    const fn slot(&mut self, kind: CapabilityKind) -> &mut Option<CapabilityBinding> {
        match kind {
            CapabilityKind::Detector => &mut self.detector,
            CapabilityKind::Summarizer => &mut self.summarizer,
            CapabilityKind::Translator => &mut self.translator,
        }
    }
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The initially selected target language code.
    pub target_language: String,
    pub bindings: CapabilityBindings,
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Target language code override.
    pub to: Option<String>,
    /// Provider name override, applied to every capability.
    pub provider: Option<String>,
    /// Model name override, applied to every capability.
    pub model: Option<String>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// Priority is CLI options, then `[capabilities.<name>]`, then `[babel]`.
/// A capability with no provider at any level is left unbound.
///
/// # Errors
///
/// Returns an error if a named provider is not configured, a bound capability
/// has no model, a required API key is missing, or the target language is
/// not supported.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let mut bindings = CapabilityBindings::default();

    for kind in CapabilityKind::ALL {
        *bindings.slot(kind) = resolve_binding(kind, options, config_file)?;
    }

    let target_language = options
        .to
        .as_ref()
        .or(config_file.babel.to.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string());
    validate_target_language(&target_language)?;

    for (provider_name, model) in unlisted_models(&bindings, config_file) {
        if let Some(provider_config) = config_file.providers.get(provider_name) {
            eprintln!(
                "{} Model '{}' is not in the configured models list for '{}'\n\
                 Configured models: {}\n\
                 Proceeding anyway...\n",
                Style::warning("Warning:"),
                model,
                provider_name,
                provider_config.models.join(", ")
            );
        }
    }

    Ok(ResolvedConfig {
        target_language,
        bindings,
    })
}

/// Bound provider/model pairs whose model is missing from the provider's
/// `models` list. Capabilities sharing a pair yield it once.
fn unlisted_models<'a>(
    bindings: &'a CapabilityBindings,
    config_file: &ConfigFile,
) -> BTreeSet<(&'a str, &'a str)> {
    CapabilityKind::ALL
        .into_iter()
        .filter_map(|kind| bindings.get(kind))
        .filter(|binding| {
            config_file
                .providers
                .get(&binding.provider_name)
                .is_some_and(|p| !p.models.is_empty() && !p.models.contains(&binding.model))
        })
        .map(|binding| (binding.provider_name.as_str(), binding.model.as_str()))
        .collect()
}

fn resolve_binding(
    kind: CapabilityKind,
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<Option<CapabilityBinding>> {
    let section = config_file.capabilities.get(kind).cloned().unwrap_or_default();

    if !section.enabled {
        tracing::debug!(%kind, "capability disabled in config");
        return Ok(None);
    }

    let Some(provider_name) = options
        .provider
        .as_ref()
        .or(section.provider.as_ref())
        .or(config_file.babel.provider.as_ref())
        .cloned()
    else {
        tracing::debug!(%kind, "no provider configured; capability unavailable");
        return Ok(None);
    };

    let provider_config = config_file.providers.get(&provider_name).ok_or_else(|| {
        let mut available: Vec<_> = config_file.providers.keys().map(String::as_str).collect();
        available.sort_unstable();
        if available.is_empty() {
            anyhow::anyhow!(
                "Provider '{provider_name}' not found\n\n\
                 No providers configured. Add providers to ~/.config/babel/config.toml"
            )
        } else {
            anyhow::anyhow!(
                "Provider '{provider_name}' not found\n\n\
                 Available providers:\n  \
                 - {}\n\n\
                 Add providers to ~/.config/babel/config.toml",
                available.join("\n  - ")
            )
        }
    })?;

    let model = options
        .model
        .as_ref()
        .or(section.model.as_ref())
        .or(config_file.babel.model.as_ref())
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'model' for the {kind}\n\n\
                 Please provide it via:\n  \
                 - CLI option: babel --model <name>\n  \
                 - Config file: [babel] or [capabilities.{kind}] in ~/.config/babel/config.toml"
            )
        })?;

    let api_key = provider_config.get_api_key();

    if provider_config.requires_api_key() && api_key.is_none() {
        let env_var = provider_config.api_key_env.as_deref().unwrap_or("API_KEY");
        bail!(
            "Provider '{provider_name}' requires an API key\n\n\
             Set the {env_var} environment variable:\n  \
             export {env_var}=\"your-api-key\"\n\n\
             Or set api_key in ~/.config/babel/config.toml"
        );
    }

    Ok(Some(CapabilityBinding {
        provider_name,
        endpoint: provider_config.endpoint.clone(),
        model,
        api_key,
    }))
}

/// Loads the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is read from `$XDG_CONFIG_HOME/babel/config.toml`
    /// or `~/.config/babel/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })
    }

    /// Loads the config file, or an empty configuration if there is none.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_if_exists(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            tracing::debug!(path = %self.config_path.display(), "no config file");
            Ok(ConfigFile::default())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager {
            config_path: temp_dir.path().join("config.toml"),
        }
    }

    #[test]
    fn test_load_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::write(
            manager.config_path(),
            r#"
[babel]
provider = "ollama"
model = "gemma3:12b"
to = "pt"

[providers.ollama]
endpoint = "http://localhost:11434"
models = ["gemma3:12b", "llama3.2"]

[capabilities.detector]
enabled = false
"#,
        )
        .unwrap();

        let loaded = manager.load().unwrap();

        assert_eq!(loaded.babel.provider, Some("ollama".to_string()));
        assert_eq!(loaded.babel.model, Some("gemma3:12b".to_string()));
        assert_eq!(loaded.babel.to, Some("pt".to_string()));
        assert!(loaded.providers.contains_key("ollama"));
        assert!(!loaded.capabilities.detector.unwrap().enabled);
        assert!(loaded.capabilities.summarizer.is_none());
    }

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        assert!(manager.load().is_err());
        let config = manager.load_if_exists().unwrap();
        assert!(config.providers.is_empty());
    }

    #[test]
    fn test_load_if_exists_reports_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::write(manager.config_path(), "[babel\nprovider = ").unwrap();

        let err = manager.load_if_exists().unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_provider_requires_api_key() {
        let provider_with_key = ProviderConfig {
            endpoint: "https://api.example.com".to_string(),
            api_key: Some("key".to_string()),
            api_key_env: None,
            models: vec![],
        };
        assert!(provider_with_key.requires_api_key());

        let provider_without = ProviderConfig {
            endpoint: "http://localhost:11434".to_string(),
            api_key: None,
            api_key_env: None,
            models: vec![],
        };
        assert!(!provider_without.requires_api_key());
        assert!(provider_without.get_api_key().is_none());
    }

    #[test]
    fn test_unlisted_model_is_reported_once_per_pair() {
        let config: ConfigFile = toml::from_str(
            r#"
[babel]
provider = "ollama"
model = "mistral"

[providers.ollama]
endpoint = "http://localhost:11434"
models = ["gemma3:12b"]

[capabilities.translator]
model = "gemma3:12b"
"#,
        )
        .unwrap();

        let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();
        let unlisted: Vec<_> = unlisted_models(&resolved.bindings, &config)
            .into_iter()
            .collect();

        assert_eq!(unlisted, [("ollama", "mistral")]);
    }

    #[test]
    fn test_capability_section_enabled_by_default() {
        let section: CapabilityConfig = toml::from_str("provider = \"x\"").unwrap();
        assert!(section.enabled);
    }
}
