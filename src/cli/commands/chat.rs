use anyhow::Result;
use std::sync::Arc;

use crate::capability::{CapabilityKind, OpenAiHost};
use crate::chat::{ChatSession, MessageStore, SessionConfig};
use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};

pub struct ChatOptions {
    pub to: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
}

pub async fn run_chat(options: ChatOptions) -> Result<()> {
    let resolved = load_resolved_config(options)?;

    for kind in CapabilityKind::ALL {
        match resolved.bindings.get(kind) {
            Some(binding) => tracing::info!(
                %kind,
                provider = %binding.provider_name,
                model = %binding.model,
                "capability bound"
            ),
            None => tracing::info!(%kind, "capability not available"),
        }
    }

    let host = Arc::new(OpenAiHost::new(resolved.bindings.clone()));
    let store = Arc::new(MessageStore::new(host, resolved.target_language.clone()));

    let session = ChatSession::new(SessionConfig::from(&resolved), store);
    session.run().await
}

fn load_resolved_config(options: ChatOptions) -> Result<ResolvedConfig> {
    let manager = ConfigManager::new()?;
    let file_config = manager.load_if_exists()?;

    let resolve_options = ResolveOptions {
        to: options.to,
        provider: options.provider,
        model: options.model,
    };

    resolve_config(&resolve_options, &file_config)
}
