//! Evaluation configuration.
//!
//! Uses `figment` for layered configuration: defaults -> user config file ->
//! workspace config file -> explicit config file -> environment -> CLI overrides.
//! Configuration is loaded from `~/.config/subdex/config.toml` and/or
//! `.subdex/config.toml` in the workspace directory.

use crate::error::EvalError;
use crate::subject::SuggestionFilter;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a report is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Top-level evaluation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Maximum number of hits kept per document (unlimited if not set).
    #[serde(default)]
    pub limit: Option<usize>,
    /// Minimum hit score kept (0.0-1.0).
    #[serde(default)]
    pub threshold: f64,
    /// Report rendering.
    #[serde(default)]
    pub output: OutputFormat,
    /// Backend identifier used for suggestions.
    #[serde(default = "default_backend")]
    pub backend: String,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            limit: None,
            threshold: 0.0,
            output: OutputFormat::Table,
            backend: default_backend(),
        }
    }
}

fn default_backend() -> String {
    "dummy".to_string()
}

impl EvalConfig {
    pub fn filter(&self) -> SuggestionFilter {
        SuggestionFilter::new(self.limit, self.threshold)
    }

    pub fn validate(&self) -> Result<(), EvalError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(EvalError::config(format!(
                "threshold must be between 0.0 and 1.0, got {}",
                self.threshold
            )));
        }
        if self.limit == Some(0) {
            return Err(EvalError::config("limit must be at least 1"));
        }
        Ok(())
    }
}

/// Values supplied on the command line; unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Explicit overrides
/// 2. Environment variables (prefixed with `SUBDEX_`)
/// 3. Explicit config file
/// 4. Workspace-local config (`.subdex/config.toml`)
/// 5. User config (`~/.config/subdex/config.toml`)
/// 6. Built-in defaults
pub fn load_config(
    workspace: Option<&Path>,
    config_file: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<EvalConfig, EvalError> {
    let mut figment = Figment::from(Serialized::defaults(EvalConfig::default()));

    if let Some(dirs) = directories::ProjectDirs::from("dev", "subdex", "subdex") {
        let user_config = dirs.config_dir().join("config.toml");
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    if let Some(ws) = workspace {
        let ws_config = ws.join(".subdex").join("config.toml");
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    if let Some(path) = config_file {
        if !path.exists() {
            return Err(EvalError::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        figment = figment.merge(Toml::file(path));
    }

    // SUBDEX_LIMIT, SUBDEX_THRESHOLD, SUBDEX_OUTPUT, ...
    figment = figment.merge(Env::prefixed("SUBDEX_").split("__"));
    figment = figment.merge(Serialized::defaults(overrides));

    let config: EvalConfig = figment
        .extract()
        .map_err(|e| EvalError::config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EvalConfig::default();
        assert_eq!(config.limit, None);
        assert_eq!(config.threshold, 0.0);
        assert_eq!(config.output, OutputFormat::Table);
        assert_eq!(config.backend, "dummy");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_workspace_config_and_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_dir = dir.path().join(".subdex");
        std::fs::create_dir_all(&cfg_dir).unwrap();
        std::fs::write(
            cfg_dir.join("config.toml"),
            "limit = 10\nthreshold = 0.2\noutput = \"json\"\n",
        )
        .unwrap();

        let config = load_config(Some(dir.path()), None, &ConfigOverrides::default()).unwrap();
        assert_eq!(config.limit, Some(10));
        assert_eq!(config.output, OutputFormat::Json);

        let overrides = ConfigOverrides {
            limit: Some(3),
            ..Default::default()
        };
        let config = load_config(Some(dir.path()), None, &overrides).unwrap();
        assert_eq!(config.limit, Some(3));
        assert_eq!(config.threshold, 0.2);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let result = load_config(None, Some(&missing), &ConfigOverrides::default());
        assert!(matches!(result, Err(EvalError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = EvalConfig {
            threshold: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        let config = EvalConfig {
            limit: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = EvalConfig {
            limit: Some(5),
            ..Default::default()
        };
        let text = toml::to_string(&config).unwrap();
        let parsed: EvalConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.limit, Some(5));
        assert_eq!(parsed.backend, config.backend);
    }
}
