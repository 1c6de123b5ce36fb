//! HTTP server configuration types.

use serde::{Deserialize, Serialize};

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address.
    pub bind: String,

    /// Listen port.
    pub port: u16,

    /// Allow cross-origin requests (the browser frontend runs on another port).
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 5000,
            cors: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.bind, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert!(config.cors);
    }

    #[test]
    fn test_server_config_partial_yaml() {
        let config: ServerConfig = serde_yaml::from_str("port: 8000").unwrap();
        assert_eq!(config.bind, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert!(config.cors);
    }
}
