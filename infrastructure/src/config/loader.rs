//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

const PROJECT_FILES: &[&str] = &["shellfix.toml", ".shellfix.toml"];
const ENV_PREFIX: &str = "SHELLFIX_";

/// Errors raised while merging configuration sources
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
}

/// Where a configuration layer comes from, for `shellfix config`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub label: &'static str,
    pub location: String,
    pub found: bool,
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (lowest to highest):
    /// 1. Default values
    /// 2. Global: `$XDG_CONFIG_HOME/shellfix/config.toml`
    /// 3. Project: `./shellfix.toml` or `./.shellfix.toml`
    /// 4. Explicit config path (if provided)
    /// 5. `SHELLFIX_*` environment variables, `__` separating nested keys
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        let project_dir = std::env::current_dir().unwrap_or_default();
        let figment = Self::file_figment(
            Self::global_config_path().as_deref(),
            &project_dir,
            config_path,
        )
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Defaults plus the TOML layers, without the environment.
    fn file_figment(global: Option<&Path>, project_dir: &Path, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        if let Some(project_path) = Self::project_config_in(project_dir) {
            figment = figment.merge(Toml::file(project_path));
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("shellfix").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        std::env::current_dir()
            .ok()
            .and_then(|dir| Self::project_config_in(&dir))
    }

    fn project_config_in(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Configuration sources in priority order, highest first.
    pub fn sources(config_path: Option<&Path>) -> Vec<ConfigSource> {
        let mut sources = vec![ConfigSource {
            label: "Env",
            location: format!("{}* variables", ENV_PREFIX),
            found: std::env::vars().any(|(k, _)| k.starts_with(ENV_PREFIX)),
        }];

        if let Some(path) = config_path {
            sources.push(ConfigSource {
                label: "Explicit",
                location: path.display().to_string(),
                found: path.exists(),
            });
        }

        sources.push(match Self::project_config_path() {
            Some(path) => ConfigSource {
                label: "Project",
                location: path.display().to_string(),
                found: true,
            },
            None => ConfigSource {
                label: "Project",
                location: "./shellfix.toml or ./.shellfix.toml".to_string(),
                found: false,
            },
        });

        if let Some(path) = Self::global_config_path() {
            sources.push(ConfigSource {
                label: "Global",
                found: path.exists(),
                location: path.display().to_string(),
            });
        }

        sources.push(ConfigSource {
            label: "Default",
            location: "built-in defaults".to_string(),
            found: true,
        });
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn extract(global: Option<&Path>, project_dir: &Path, explicit: Option<&Path>) -> FileConfig {
        ConfigLoader::file_figment(global, project_dir, explicit)
            .extract()
            .unwrap()
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("shellfix"));
    }

    #[test]
    fn test_layers_override_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        fs::write(&global, "provider = \"opencode\"\ntimeout_seconds = 10\n").unwrap();

        let project_dir = dir.path().join("project");
        fs::create_dir(&project_dir).unwrap();
        fs::write(project_dir.join(".shellfix.toml"), "timeout_seconds = 20\n").unwrap();

        let explicit = dir.path().join("explicit.toml");
        fs::write(&explicit, "[activation]\nmode = \"manual\"\n").unwrap();

        let config = extract(Some(&global), &project_dir, Some(&explicit));
        assert_eq!(config.provider, "opencode");
        assert_eq!(config.timeout_seconds, 20);
        assert_eq!(config.activation.mode, "manual");
        assert_eq!(config.ollama.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_project_file_name_precedence() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("shellfix.toml"), "timeout_seconds = 5\n").unwrap();
        fs::write(dir.path().join(".shellfix.toml"), "timeout_seconds = 6\n").unwrap();

        let config = extract(None, dir.path(), None);
        assert_eq!(config.timeout_seconds, 5);
    }

    #[test]
    fn test_missing_global_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let config = extract(Some(&dir.path().join("absent.toml")), dir.path(), None);
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("bad.toml");
        fs::write(&explicit, "timeout_seconds = \"soon\"\n").unwrap();

        let result: Result<FileConfig, _> =
            ConfigLoader::file_figment(None, dir.path(), Some(&explicit)).extract();
        assert!(result.is_err());
    }
}
