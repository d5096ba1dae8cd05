//! Configuration file loading and capability resolution.

mod manager;

pub use manager::{
    BabelConfig, CapabilitiesConfig, CapabilityBinding, CapabilityBindings, CapabilityConfig,
    ConfigFile, ConfigManager, ProviderConfig, ResolveOptions, ResolvedConfig, resolve_config,
};
