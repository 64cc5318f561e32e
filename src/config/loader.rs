//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.redflag.toml` in repo root
//! 4. `~/.config/redflag/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants;
use crate::env::Env;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub provider: ProviderConfig,
}

/// Scan-related configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Branch the current branch is diffed against.
    pub base_branch: String,
    /// Source file extensions eligible for review.
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            base_branch: constants::DEFAULT_BASE_BRANCH.to_string(),
            extensions: constants::DEFAULT_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

/// Completion provider configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub temperature: f32,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: constants::DEFAULT_MODEL.to_string(),
            base_url: None,
            api_key: None,
            temperature: 1.0,
        }
    }
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads from global config, repo-local config, then applies
    /// environment variable overrides.
    pub fn load(repo_root: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        // Layer 3: repo-local config
        if let Some(root) = repo_root {
            let local_path = root.join(constants::CONFIG_FILENAME);
            if local_path.exists() {
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        // Layer 2: environment variables
        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one (other takes precedence for
    /// non-default values).
    fn merge(&mut self, other: Config) {
        let default_scan = ScanConfig::default();
        if other.scan.base_branch != default_scan.base_branch {
            self.scan.base_branch = other.scan.base_branch;
        }
        if other.scan.extensions != default_scan.extensions {
            self.scan.extensions = other.scan.extensions;
        }

        let default_provider = ProviderConfig::default();
        if other.provider.model != default_provider.model {
            self.provider.model = other.provider.model;
        }
        if other.provider.base_url.is_some() {
            self.provider.base_url = other.provider.base_url;
        }
        if other.provider.api_key.is_some() {
            self.provider.api_key = other.provider.api_key;
        }
        if other.provider.temperature != default_provider.temperature {
            self.provider.temperature = other.provider.temperature;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Ok(val) = env.var(constants::ENV_MODEL) {
            self.provider.model = val;
        }
        if let Ok(val) = env.var(constants::ENV_BASE_URL) {
            self.provider.base_url = Some(val);
        }
        if let Ok(val) = env.var(constants::ENV_BASE_BRANCH) {
            self.scan.base_branch = val;
        }
        if let Ok(val) = env.var(constants::ENV_TEMPERATURE) {
            match val.parse::<f32>() {
                Ok(t) => self.provider.temperature = t,
                Err(_) => eprintln!(
                    "Warning: ignoring invalid {} value: {val}",
                    constants::ENV_TEMPERATURE
                ),
            }
        }

        // API key resolution with OpenAI-convention fallback
        let api_key = env
            .var(constants::ENV_API_KEY)
            .or_else(|_| env.var(constants::ENV_API_KEY_FALLBACK))
            .ok();
        if api_key.is_some() {
            self.provider.api_key = api_key;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.provider.model, "gpt-4.1-nano");
        assert_eq!(config.provider.temperature, 1.0);
        assert_eq!(config.scan.base_branch, "master");
        assert_eq!(
            config.scan.extensions,
            vec![".ts", ".tsx", ".js", ".jsx"]
        );
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[scan]
base_branch = "main"
extensions = [".py"]

[provider]
model = "gpt-4"
temperature = 0.2
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.scan.base_branch, "main");
        assert_eq!(config.scan.extensions, vec![".py"]);
        assert_eq!(config.provider.model, "gpt-4");
        assert_eq!(config.provider.temperature, 0.2);
    }

    #[test]
    fn merge_overrides_non_default_values() {
        let mut base = Config::default();
        let mut other = Config::default();

        other.scan.base_branch = "develop".to_string();
        other.provider.model = "o4-mini".to_string();
        other.provider.base_url = Some("https://custom.api".to_string());
        other.provider.api_key = Some("sk-test".to_string());
        other.provider.temperature = 0.5;

        base.merge(other);

        assert_eq!(base.scan.base_branch, "develop");
        assert_eq!(base.provider.model, "o4-mini");
        assert_eq!(base.provider.base_url, Some("https://custom.api".to_string()));
        assert_eq!(base.provider.api_key, Some("sk-test".to_string()));
        assert_eq!(base.provider.temperature, 0.5);
    }

    #[test]
    fn merge_keeps_base_when_other_is_default() {
        let mut base = Config::default();
        base.scan.base_branch = "main".to_string();
        base.provider.api_key = Some("sk-kept".to_string());

        base.merge(Config::default());

        assert_eq!(base.scan.base_branch, "main");
        assert_eq!(base.provider.api_key, Some("sk-kept".to_string()));
    }

    #[test]
    fn load_from_repo_root() {
        let env = Env::mock(Vec::<(&str, &str)>::new());

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".redflag.toml"),
            r#"
[provider]
model = "gpt-4"

[scan]
base_branch = "main"
"#,
        )
        .unwrap();

        let config = Config::load(Some(dir.path()), &env).unwrap();
        assert_eq!(config.provider.model, "gpt-4");
        assert_eq!(config.scan.base_branch, "main");
    }

    #[test]
    fn load_without_any_config_files() {
        let env = Env::mock(Vec::<(&str, &str)>::new());

        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(dir.path()), &env).unwrap();
        assert_eq!(config.provider.model, "gpt-4.1-nano");
    }

    #[test]
    fn load_file_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "not valid {{ toml").unwrap();

        let result = Config::load_file(&path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("parse"));
    }

    #[test]
    fn apply_env_vars_model_and_base_branch() {
        let env = Env::mock([
            ("REDFLAG_MODEL", "gpt-4-turbo-preview"),
            ("REDFLAG_BASE_BRANCH", "main"),
        ]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.provider.model, "gpt-4-turbo-preview");
        assert_eq!(config.scan.base_branch, "main");
    }

    #[test]
    fn apply_env_vars_api_key_prefers_redflag_var() {
        let env = Env::mock([
            ("REDFLAG_API_KEY", "sk-redflag"),
            ("OPENAI_API_KEY", "sk-openai"),
        ]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.provider.api_key, Some("sk-redflag".to_string()));
    }

    #[test]
    fn apply_env_vars_api_key_falls_back_to_openai() {
        let env = Env::mock([("OPENAI_API_KEY", "sk-openai")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.provider.api_key, Some("sk-openai".to_string()));
    }

    #[test]
    fn apply_env_vars_temperature() {
        let env = Env::mock([("REDFLAG_TEMPERATURE", "0.3")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.provider.temperature, 0.3);
    }

    #[test]
    fn apply_env_vars_invalid_temperature_keeps_default() {
        let env = Env::mock([("REDFLAG_TEMPERATURE", "hot")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.provider.temperature, 1.0);
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = ProviderConfig {
            api_key: Some("sk-secret".to_string()),
            ..ProviderConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("REDACTED"));
    }
}
