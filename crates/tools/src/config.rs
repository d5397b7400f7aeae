//! Runtime configuration for the SuiNS tools
//!
//! Selects the network and the fullnode endpoint the setup commands talk to.
//! Configuration is resolved in priority order:
//!
//! 1. Environment variables (SUINS_*), including a `.env` file
//! 2. suins.toml profile selection
//! 3. Built-in defaults for the selected network
//!
//! The deployment addresses themselves are not configurable here; they live in
//! the static registry in `suins_core::registry`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use suins_tools::config::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! println!("Network: {}", config.network);
//! println!("RPC URL: {}", config.rpc_url);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use suins_core::{Network, RegistryError};
use thiserror::Error;

/// Default location of the profile file, relative to the working directory
pub const CONFIG_FILE: &str = "suins.toml";

const DEFAULT_RPC_TIMEOUT_MS: u64 = 30_000;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Network(#[from] RegistryError),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Per-network profile from suins.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkProfile {
    #[serde(default)]
    pub rpc_url: Option<String>,
    #[serde(default)]
    pub rpc_timeout_ms: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Contents of suins.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuinsToml {
    #[serde(default)]
    pub default: Option<DefaultProfile>,
    #[serde(default)]
    pub profile: HashMap<String, NetworkProfile>,
}

/// Default profile section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultProfile {
    pub network: Option<String>,
}

/// Resolved runtime configuration with all required fields
#[derive(Debug, Clone)]
pub struct Config {
    /// Active network
    pub network: Network,
    /// Fullnode JSON-RPC endpoint
    pub rpc_url: String,
    /// RPC timeout in milliseconds
    pub rpc_timeout_ms: u64,
    /// Debug mode
    pub debug: bool,
}

impl Config {
    /// Load configuration from the environment and `suins.toml` in the
    /// working directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - An unknown network name is configured
    /// - suins.toml exists but cannot be read or parsed
    /// - The resolved values fail validation
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_for(None)
    }

    /// Load configuration, with `network` (typically a CLI flag) taking
    /// precedence over every other network source.
    pub fn load_for(network: Option<Network>) -> Result<Self, ConfigError> {
        // Load .env file if it exists (non-fatal)
        let _ = dotenvy::dotenv();
        Self::load_with(Path::new(CONFIG_FILE), network)
    }

    /// Same as [`Config::load_for`] with an explicit profile file. A missing
    /// file is not an error.
    ///
    /// # Resolution Order
    ///
    /// 1. `network` argument, else SUINS_NETWORK, else `[default] network`,
    ///    else testnet
    /// 2. SUINS_RPC_URL / SUINS_RPC_TIMEOUT_MS over the network's profile
    /// 3. Network defaults for anything still unset
    pub fn load_with(toml_path: &Path, network: Option<Network>) -> Result<Self, ConfigError> {
        let toml_config = Self::load_toml(toml_path)?.unwrap_or_default();

        let network = match network {
            Some(network) => network,
            None => std::env::var("SUINS_NETWORK")
                .ok()
                .or_else(|| toml_config.default.as_ref().and_then(|d| d.network.clone()))
                .unwrap_or_else(|| Network::Testnet.as_str().to_string())
                .parse::<Network>()?,
        };

        let profile = toml_config
            .profile
            .get(network.as_str())
            .cloned()
            .unwrap_or_default();

        let rpc_url = std::env::var("SUINS_RPC_URL")
            .ok()
            .or(profile.rpc_url)
            .unwrap_or_else(|| network.default_rpc_url().to_string());

        let rpc_timeout_ms = match std::env::var("SUINS_RPC_TIMEOUT_MS") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: "SUINS_RPC_TIMEOUT_MS",
                value: raw,
            })?,
            Err(_) => profile.rpc_timeout_ms.unwrap_or(DEFAULT_RPC_TIMEOUT_MS),
        };

        let debug = std::env::var("SUINS_DEBUG")
            .ok()
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self::validate(&rpc_url, rpc_timeout_ms)?;

        Ok(Config {
            network,
            rpc_url,
            rpc_timeout_ms,
            debug,
        })
    }

    /// Read a profile file, `None` if it does not exist
    fn load_toml(path: &Path) -> Result<Option<SuinsToml>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Some(toml::from_str(&content)?))
    }

    /// Validate configuration values
    pub fn validate(rpc_url: &str, rpc_timeout_ms: u64) -> Result<(), ConfigError> {
        if rpc_url.is_empty() {
            return Err(ConfigError::MissingField("rpc_url".to_string()));
        }

        if !rpc_url.starts_with("http://") && !rpc_url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "RPC URL must start with http:// or https://: {}",
                rpc_url
            )));
        }

        if rpc_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "RPC timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Print the resolved configuration
    pub fn print_summary(&self) {
        println!("╔════════════════════════════════════════════════════════════════╗");
        println!("║           SUINS TOOLS CONFIGURATION RESOLVED                   ║");
        println!("╚════════════════════════════════════════════════════════════════╝");
        println!("  Network:             {}", self.network);
        println!("  RPC URL:             {}", self.rpc_url);
        println!("  RPC Timeout:         {}ms", self.rpc_timeout_ms);

        if self.debug {
            println!("  Debug Mode:          ENABLED");
        }
    }

    /// Get configuration as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for Config {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("network", &self.network)?;
        map.serialize_entry("rpc_url", &self.rpc_url)?;
        map.serialize_entry("rpc_timeout_ms", &self.rpc_timeout_ms)?;
        map.serialize_entry("debug", &self.debug)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    fn setup_test_env() {
        env::remove_var("SUINS_NETWORK");
        env::remove_var("SUINS_RPC_URL");
        env::remove_var("SUINS_RPC_TIMEOUT_MS");
        env::remove_var("SUINS_DEBUG");
    }

    fn write_toml(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    #[serial]
    fn test_defaults_without_file_or_env() {
        setup_test_env();
        let dir = TempDir::new().unwrap();

        let config = Config::load_with(&dir.path().join(CONFIG_FILE), None).unwrap();
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.rpc_url, "https://fullnode.testnet.sui.io:443");
        assert_eq!(config.rpc_timeout_ms, 30_000);
        assert!(!config.debug);
    }

    #[test]
    #[serial]
    fn test_toml_profile_selection() {
        setup_test_env();
        let dir = TempDir::new().unwrap();
        let path = write_toml(
            &dir,
            r#"
[default]
network = "mainnet"

[profile.mainnet]
rpc_url = "https://rpc.example.com"
rpc_timeout_ms = 5000
description = "private fullnode"

[profile.testnet]
rpc_url = "https://testnet.example.com"
"#,
        );

        let config = Config::load_with(&path, None).unwrap();
        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(config.rpc_url, "https://rpc.example.com");
        assert_eq!(config.rpc_timeout_ms, 5000);
    }

    #[test]
    #[serial]
    fn test_env_overrides_toml() {
        setup_test_env();
        let dir = TempDir::new().unwrap();
        let path = write_toml(
            &dir,
            r#"
[default]
network = "mainnet"

[profile.testnet]
rpc_url = "https://testnet.example.com"
rpc_timeout_ms = 5000
"#,
        );

        env::set_var("SUINS_NETWORK", "testnet");
        env::set_var("SUINS_RPC_TIMEOUT_MS", "1200");
        env::set_var("SUINS_DEBUG", "TRUE");
        let config = Config::load_with(&path, None).unwrap();
        setup_test_env();

        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.rpc_url, "https://testnet.example.com");
        assert_eq!(config.rpc_timeout_ms, 1200);
        assert!(config.debug);
    }

    #[test]
    #[serial]
    fn test_explicit_network_beats_env_and_toml() {
        setup_test_env();
        let dir = TempDir::new().unwrap();
        let path = write_toml(
            &dir,
            r#"
[default]
network = "testnet"

[profile.mainnet]
rpc_url = "https://rpc.example.com"
"#,
        );

        env::set_var("SUINS_NETWORK", "testnet");
        let config = Config::load_with(&path, Some(Network::Mainnet)).unwrap();
        setup_test_env();

        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(config.rpc_url, "https://rpc.example.com");
    }

    #[test]
    #[serial]
    fn test_unknown_network_is_rejected() {
        setup_test_env();
        let dir = TempDir::new().unwrap();

        env::set_var("SUINS_NETWORK", "devnet");
        let result = Config::load_with(&dir.path().join(CONFIG_FILE), None);
        setup_test_env();

        assert!(matches!(
            result,
            Err(ConfigError::Network(RegistryError::UnknownNetwork(_)))
        ));
    }

    #[test]
    #[serial]
    fn test_malformed_timeout_is_rejected() {
        setup_test_env();
        let dir = TempDir::new().unwrap();

        env::set_var("SUINS_RPC_TIMEOUT_MS", "soon");
        let result = Config::load_with(&dir.path().join(CONFIG_FILE), None);
        setup_test_env();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnv { name: "SUINS_RPC_TIMEOUT_MS", .. })
        ));
    }

    #[test]
    #[serial]
    fn test_malformed_toml_is_an_error() {
        setup_test_env();
        let dir = TempDir::new().unwrap();
        let path = write_toml(&dir, "[default\nnetwork = ");

        assert!(matches!(
            Config::load_with(&path, None),
            Err(ConfigError::TomlError(_))
        ));
    }

    #[test]
    fn test_validate_missing_rpc_url() {
        let result = Config::validate("", 30_000);
        assert!(matches!(result, Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_validate_invalid_rpc_url() {
        let result = Config::validate("ftp://example.com", 30_000);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let result = Config::validate("https://fullnode.mainnet.sui.io:443", 0);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_success() {
        let result = Config::validate("https://fullnode.testnet.sui.io:443", 30_000);
        assert!(result.is_ok());
    }

    #[test]
    fn test_to_json() {
        let config = Config {
            network: Network::Mainnet,
            rpc_url: Network::Mainnet.default_rpc_url().to_string(),
            rpc_timeout_ms: 30_000,
            debug: false,
        };
        let json: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(json["network"], "mainnet");
        assert_eq!(json["rpc_timeout_ms"], 30_000);
    }
}
