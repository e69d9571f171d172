//! # menukit configuration
//!
//! Figment-backed settings for the network surfaces and logging.
//!
//! ```no_run
//! let config = menukit_config::load_configuration().unwrap_or_default();
//! println!("binding {}:{}", config.server.host, config.server.port);
//! ```

pub mod discovery;
pub mod error;
pub mod provider;
pub mod types;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery};
pub use error::{ConfigError, ConfigResult};
pub use provider::{ConfigProvider, ENV_PREFIX};
pub use types::{LoggingConfig, MenukitConfig, ServerConfig, DEFAULT_HOST, DEFAULT_LOG_FILE};

/// Load configuration from all standard sources
pub fn load_configuration() -> ConfigResult<MenukitConfig> {
    ConfigProvider::new().load()
}
