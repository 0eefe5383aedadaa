//! Configuration loading and management

use std::path::Path;

use anyhow::{Context, Result};
use file_store::Store;
use serde::{Deserialize, Serialize};

/// File name looked up inside the config directory
pub const CONFIG_FILE: &str = "config.json";

/// Main configuration for the file server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Maximum accepted upload size in bytes (`null` = no limit)
    #[serde(default)]
    pub max_upload_bytes: Option<usize>,

    /// Accounts registered at startup
    #[serde(default)]
    pub accounts: Vec<SeedAccount>,
}

/// An account to register when the server starts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedAccount {
    pub username: String,
    pub password: String,
}

impl Config {
    /// Load configuration from the config directory
    ///
    /// Writes a default `config.json` for reference when none exists.
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_file = config_path.join(CONFIG_FILE);

        if config_file.exists() {
            let content = std::fs::read_to_string(&config_file)
                .with_context(|| format!("Failed to read config file: {:?}", config_file))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {:?}", config_file))?;
            tracing::info!("Loaded configuration from {:?}", config_file);
            Ok(config)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_file);
            let config = Config::default();

            std::fs::create_dir_all(config_path)
                .with_context(|| format!("Failed to create config directory: {:?}", config_path))?;

            let content = serde_json::to_string_pretty(&config)?;
            std::fs::write(&config_file, content)
                .with_context(|| format!("Failed to write default config: {:?}", config_file))?;
            tracing::info!("Created default config at {:?}", config_file);

            Ok(config)
        }
    }

    /// Register the configured seed accounts, returning how many were added.
    ///
    /// Seeds go through the normal registration rules; rejected entries are
    /// logged and skipped.
    pub fn register_seed_accounts(&self, store: &Store) -> usize {
        let mut registered = 0;
        for account in &self.accounts {
            match store.register(&account.username, &account.password) {
                Ok(()) => registered += 1,
                Err(e) => {
                    tracing::warn!("Skipping seed account {:?}: {}", account.username, e);
                }
            }
        }
        registered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_config_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let config_dir = dir.path().join("nested");

        let config = Config::load(&config_dir).unwrap();

        assert_eq!(config.max_upload_bytes, None);
        assert!(config.accounts.is_empty());
        assert!(config_dir.join(CONFIG_FILE).exists());

        // The written file loads back cleanly
        let reloaded = Config::load(&config_dir).unwrap();
        assert_eq!(reloaded.max_upload_bytes, None);
    }

    #[test]
    fn test_load_existing_config() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{
                "max_upload_bytes": 1024,
                "accounts": [{ "username": "alice", "password": "password1" }]
            }"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();

        assert_eq!(config.max_upload_bytes, Some(1024));
        assert_eq!(config.accounts.len(), 1);
        assert_eq!(config.accounts[0].username, "alice");
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{}").unwrap();

        let config = Config::load(dir.path()).unwrap();

        assert_eq!(config.max_upload_bytes, None);
        assert!(config.accounts.is_empty());
    }

    #[test]
    fn test_load_malformed_config_fails() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "not json").unwrap();

        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn test_seed_accounts_skip_invalid_and_duplicates() {
        let config = Config {
            max_upload_bytes: None,
            accounts: vec![
                SeedAccount {
                    username: "alice".into(),
                    password: "password1".into(),
                },
                SeedAccount {
                    username: "alice".into(),
                    password: "password2".into(),
                },
                SeedAccount {
                    username: "ab".into(),
                    password: "password1".into(),
                },
            ],
        };
        let store = Store::new();

        assert_eq!(config.register_seed_accounts(&store), 1);
        assert_eq!(store.account_count(), 1);
        assert!(store.login("alice", "password1").is_ok());
    }
}
