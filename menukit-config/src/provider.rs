//! Configuration provider using Figment

use crate::discovery::{ConfigFile, ConfigFormat, FileDiscovery};
use crate::error::{ConfigError, ConfigResult};
use crate::types::MenukitConfig;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use tracing::{debug, trace};

/// Environment variable prefix; nested keys are separated by `__`
pub const ENV_PREFIX: &str = "MENUKIT_";

/// Configuration provider using figment
///
/// Sources in precedence order (later sources override earlier ones):
/// 1. Default values
/// 2. Discovered configuration files (global, then project)
/// 3. `MENUKIT_` environment variables
///
/// Nothing is cached; every `load` reads the sources again.
#[derive(Debug, Default)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
}

impl ConfigProvider {
    /// Create a provider using the standard discovery directories
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider over a custom discovery
    pub fn with_discovery(discovery: FileDiscovery) -> Self {
        Self { discovery }
    }

    /// Load and validate the configuration
    pub fn load(&self) -> ConfigResult<MenukitConfig> {
        let config: MenukitConfig = self.build_figment().extract()?;

        if !config.logging.is_valid_level() {
            return Err(ConfigError::invalid_value(
                "logging.level",
                format!("unknown level '{}'", config.logging.level),
            ));
        }
        if config.server.host.trim().is_empty() {
            return Err(ConfigError::invalid_value("server.host", "must not be empty"));
        }

        debug!(
            "Loaded configuration: host={} port={} level={}",
            config.server.host, config.server.port, config.logging.level
        );
        Ok(config)
    }

    fn build_figment(&self) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(MenukitConfig::default()));

        for file in self.discovery.discover_all() {
            figment = figment.merge(Self::load_config_file(&file));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn load_config_file(config_file: &ConfigFile) -> Figment {
        let path = &config_file.path;
        trace!("Loading config file: {}", path.display());

        match config_file.format {
            ConfigFormat::Toml => Figment::from(Toml::file(path)),
            ConfigFormat::Yaml => Figment::from(Yaml::file(path)),
            ConfigFormat::Json => Figment::from(Json::file(path)),
        }
    }
}
