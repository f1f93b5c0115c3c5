//! CLI configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// RPC endpoint URL
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Default token id used when --token is not given
    #[serde(default)]
    pub token: Option<u64>,
}

fn default_rpc_url() -> String {
    okcpu_sdk::DEFAULT_RPC_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            token: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".okcomputers"))
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load config from file or return default
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| {
                if path.exists() {
                    std::fs::read_to_string(&path).ok()
                } else {
                    None
                }
            })
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let path = Self::config_path().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "Cannot determine config path")
        })?;

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;

        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.rpc_url, "https://mainnet.base.org");
        assert_eq!(config.token, None);
    }

    #[test]
    fn test_config_serialize() {
        let config = Config {
            rpc_url: "https://mainnet.base.org".to_string(),
            token: Some(1399),
        };
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("rpc_url"));
        assert!(toml.contains("token = 1399"));
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            rpc_url = "http://localhost:8545"
            token = 42
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.token, Some(42));
    }

    #[test]
    fn test_config_deserialize_missing_fields() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.rpc_url, "https://mainnet.base.org");
        assert_eq!(config.token, None);
    }
}
