//! Configuration value types

use serde::{Deserialize, Serialize};

/// Default bind host for network surfaces
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default log file used in stdio MCP mode
pub const DEFAULT_LOG_FILE: &str = "menukit-mcp.log";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Complete menukit configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MenukitConfig {
    /// Network server settings
    pub server: ServerConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Bind settings shared by the HTTP tool routes and the MCP endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind
    pub host: String,
    /// Port to bind; 0 picks a random free port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: 0,
        }
    }
}

impl ServerConfig {
    /// The port as an option, `None` for a random port
    pub fn port(&self) -> Option<u16> {
        (self.port != 0).then_some(self.port)
    }
}

/// Tracing settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter level when `RUST_LOG` is unset
    pub level: String,
    /// Log file for stdio MCP mode
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl LoggingConfig {
    /// Whether `level` names a known tracing level
    pub fn is_valid_level(&self) -> bool {
        LOG_LEVELS.contains(&self.level.to_lowercase().as_str())
    }
}
