//! Configuration system for mhrisk.
//!
//! Uses `figment` for layered configuration: defaults -> config file -> environment -> CLI args.
//! Configuration is loaded from `~/.config/mhrisk/config.toml` and/or `mhrisk.toml` in the
//! working directory, or from an explicit file passed on the command line.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::gateway::GatewayConfig;
use mhrisk_ml::{DEFAULT_MODEL_FILE, MissingModelPolicy};

/// Workspace-local configuration file name.
pub const WORKSPACE_CONFIG_FILE: &str = "mhrisk.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub model: ModelConfig,
    /// Request/response web form.
    pub form: GatewayConfig,
    /// Interactive dashboard.
    pub dashboard: GatewayConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            form: GatewayConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                missing_model: MissingModelPolicy::PerRequest,
            },
            dashboard: GatewayConfig {
                host: "127.0.0.1".to_string(),
                port: 8501,
                missing_model: MissingModelPolicy::FailStartup,
            },
        }
    }
}

/// Where the model artifact lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Artifact path, relative paths resolve against the working directory.
    pub path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_MODEL_FILE),
        }
    }
}

/// Load configuration with layered sources.
///
/// Priority (highest to lowest):
/// 1. Explicit overrides (passed as argument)
/// 2. Environment variables (prefixed with `MHRISK_`)
/// 3. Explicit config file, or else the workspace file (`mhrisk.toml`)
/// 4. User config (`~/.config/mhrisk/config.toml`)
/// 5. Built-in defaults
pub fn load_config(
    workspace: Option<&Path>,
    config_file: Option<&Path>,
    overrides: Option<&AppConfig>,
) -> Result<AppConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    // User-level config
    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    match config_file {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            figment = figment.merge(Toml::file(path));
        }
        None => {
            if let Some(ws) = workspace {
                let ws_config = ws.join(WORKSPACE_CONFIG_FILE);
                if ws_config.exists() {
                    figment = figment.merge(Toml::file(&ws_config));
                }
            }
        }
    }

    // Environment variables (MHRISK_MODEL__PATH, MHRISK_FORM__PORT, etc.)
    figment = figment.merge(Env::prefixed("MHRISK_").split("__"));

    if let Some(overrides) = overrides {
        figment = figment.merge(Serialized::defaults(overrides));
    }

    Ok(figment.extract()?)
}

/// `~/.config/mhrisk/config.toml` on Linux, the platform equivalent elsewhere.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "mhrisk", "mhrisk")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Render the effective configuration as TOML.
pub fn to_toml(config: &AppConfig) -> Result<String, ConfigError> {
    toml::to_string_pretty(config).map_err(|e| ConfigError::Invalid {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_keep_front_end_policies_apart() {
        let config = AppConfig::default();
        assert_eq!(config.form.port, 5000);
        assert_eq!(config.form.missing_model, MissingModelPolicy::PerRequest);
        assert_eq!(config.dashboard.port, 8501);
        assert_eq!(
            config.dashboard.missing_model,
            MissingModelPolicy::FailStartup
        );
        assert_eq!(config.model.path, PathBuf::from(DEFAULT_MODEL_FILE));
    }

    #[test]
    fn test_workspace_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(WORKSPACE_CONFIG_FILE),
            "[model]\npath = \"models/forest.json\"\n\n[form]\nport = 8000\n",
        )
        .unwrap();
        let config = load_config(Some(dir.path()), None, None).unwrap();
        assert_eq!(config.model.path, PathBuf::from("models/forest.json"));
        assert_eq!(config.form.port, 8000);
        // Untouched keys keep their defaults.
        assert_eq!(config.form.host, "127.0.0.1");
        assert_eq!(config.dashboard.port, 8501);
    }

    #[test]
    fn test_explicit_file_wins_over_workspace() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(WORKSPACE_CONFIG_FILE),
            "[dashboard]\nport = 9000\n",
        )
        .unwrap();
        let explicit = dir.path().join("other.toml");
        std::fs::write(
            &explicit,
            "[dashboard]\nmissing_model = \"per_request\"\n",
        )
        .unwrap();
        let config = load_config(Some(dir.path()), Some(&explicit), None).unwrap();
        assert_eq!(config.dashboard.port, 8501);
        assert_eq!(
            config.dashboard.missing_model,
            MissingModelPolicy::PerRequest
        );
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(None, Some(&dir.path().join("nope.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_invalid_policy_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(WORKSPACE_CONFIG_FILE),
            "[form]\nmissing_model = \"sometimes\"\n",
        )
        .unwrap();
        let err = load_config(Some(dir.path()), None, None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_overrides_win() {
        let mut overrides = AppConfig::default();
        overrides.model.path = PathBuf::from("/srv/model.json");
        let config = load_config(None, None, Some(&overrides)).unwrap();
        assert_eq!(config.model.path, PathBuf::from("/srv/model.json"));
    }

    #[test]
    fn test_to_toml_roundtrips_through_figment() {
        let text = to_toml(&AppConfig::default()).unwrap();
        assert!(text.contains("[model]"));
        assert!(text.contains("missing_model = \"fail_startup\""));
        let parsed: AppConfig = Figment::from(Toml::string(&text)).extract().unwrap();
        assert_eq!(parsed.dashboard.port, 8501);
    }
}
