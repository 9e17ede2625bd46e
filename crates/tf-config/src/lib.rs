//! Configuration management for templatefinder.
//!
//! Parses `templatefinder.toml` with serde and discovers it in the current
//! directory or its parents. CLI settings are applied during load via
//! [`CliSettings`].
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8000
//!
//! [templates]
//! root_dir = "templates"
//!
//! [sitemap]
//! base_templates = ["base.html", "base_no_nav.html"]
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `server.host` and `templates.root_dir` support `${VAR}` and
//! `${VAR:-default}`.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override template root directory.
    pub template_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "templatefinder.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Template configuration (paths are relative strings from TOML).
    templates: TemplatesConfigRaw,
    /// Sitemap configuration.
    pub sitemap: SitemapConfig,

    /// Resolved template configuration (set after loading).
    #[serde(skip)]
    pub templates_resolved: TemplatesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8000,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TemplatesConfigRaw {
    root_dir: Option<String>,
}

/// Resolved template configuration with absolute paths.
#[derive(Debug, Default)]
pub struct TemplatesConfig {
    /// Directory searched for page templates.
    pub root_dir: PathBuf,
}

/// Sitemap configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Layout templates a page must ultimately extend, relative to the
    /// scanned directory.
    pub base_templates: Vec<String>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            base_templates: vec!["base.html".to_owned(), "base_no_nav.html".to_owned()],
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`TF_HOST`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise, searches
    /// for `templatefinder.toml` in the current directory and parents, falling
    /// back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(template_dir) = &settings.template_dir {
            self.templates_resolved.root_dir.clone_from(template_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            templates: TemplatesConfigRaw::default(),
            sitemap: SitemapConfig::default(),
            templates_resolved: TemplatesConfig {
                root_dir: base.join("templates"),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }
        if self.sitemap.base_templates.iter().any(String::is_empty) {
            return Err(ConfigError::Validation(
                "sitemap.base_templates cannot contain empty names".to_owned(),
            ));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        if let Some(ref root_dir) = self.templates.root_dir {
            self.templates.root_dir = Some(expand::expand_env(root_dir, "templates.root_dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let root_dir = self.templates.root_dir.as_deref().unwrap_or("templates");
        self.templates_resolved = TemplatesConfig {
            root_dir: config_dir.join(root_dir),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(
            config.templates_resolved.root_dir,
            PathBuf::from("/test/templates")
        );
        assert_eq!(
            config.sitemap.base_templates,
            vec!["base.html", "base_no_nav.html"]
        );
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 9000

[templates]
root_dir = "site/templates"

[sitemap]
base_templates = ["layout.html"]
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(
            config.templates_resolved.root_dir,
            PathBuf::from("/project/site/templates")
        );
        assert_eq!(config.sitemap.base_templates, vec!["layout.html"]);
    }

    #[test]
    fn test_resolve_paths_default_root() {
        let mut config: Config = toml::from_str("[server]\nport = 8080\n").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.templates_resolved.root_dir,
            PathBuf::from("/project/templates")
        );
    }

    #[test]
    fn test_resolve_paths_absolute_root() {
        let mut config: Config = toml::from_str("[templates]\nroot_dir = \"/srv/templates\"\n").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.templates_resolved.root_dir,
            PathBuf::from("/srv/templates")
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[server]\nport = 8123\n\n[templates]\nroot_dir = \"pages\"\n")
            .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.server.port, 8123);
        assert_eq!(config.templates_resolved.root_dir, dir.path().join("pages"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/templatefinder.toml")), None)
            .unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[server\nport = ").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_applies_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[server]\nhost = \"0.0.0.0\"\n").unwrap();
        let settings = CliSettings {
            port: Some(9999),
            template_dir: Some(PathBuf::from("/custom/templates")),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9999);
        assert_eq!(
            config.templates_resolved.root_dir,
            PathBuf::from("/custom/templates")
        );
    }

    #[test]
    fn test_apply_cli_settings_host() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(
            config.templates_resolved.root_dir,
            PathBuf::from("/test/templates")
        );
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TF_CONFIG_TEST_HOST", "10.0.0.1");
            std::env::remove_var("TF_CONFIG_TEST_ROOT");
        }

        let toml = r#"
[server]
host = "${TF_CONFIG_TEST_HOST}"

[templates]
root_dir = "${TF_CONFIG_TEST_ROOT:-templates}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.server.host, "10.0.0.1");
        assert_eq!(config.templates.root_dir.as_deref(), Some("templates"));

        unsafe {
            std::env::remove_var("TF_CONFIG_TEST_HOST");
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default_with_base(Path::new("/test")).validate().is_ok());
    }

    #[test]
    fn test_validate_server_host_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.host = String::new();

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("server.host"));
    }

    #[test]
    fn test_validate_server_port_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.port = 0;

        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_empty_base_template() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.sitemap.base_templates.push(String::new());

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("sitemap.base_templates"));
    }
}
