//! Configuration management for the article renderer.
//!
//! Parses `ba.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [render]
//! max_depth = 8
//! external_prefixes = ["http://", "https://", "www."]
//! hash_routes = true
//! external_marker = "↗"
//!
//! [shortcodes]
//! names = ["INTERACTIVE_QUIZ", "AI_TUTOR_CTA"]
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override table cell nesting limit.
    pub max_depth: Option<usize>,
    /// Override hash-router links.
    pub hash_routes: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "ba.toml";

/// Upper bound accepted for `render.max_depth`.
const MAX_DEPTH_LIMIT: usize = 64;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Shortcode configuration.
    pub shortcodes: ShortcodesConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// How deep table cells are re-rendered as blocks.
    pub max_depth: usize,
    /// Link targets starting with one of these open externally; all other
    /// targets are site routes.
    pub external_prefixes: Vec<String>,
    /// Write internal links as hash-router hrefs (`#/path`).
    pub hash_routes: bool,
    /// Text appended to external links.
    pub external_marker: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            external_prefixes: vec![
                "http://".to_owned(),
                "https://".to_owned(),
                "www.".to_owned(),
            ],
            hash_routes: true,
            external_marker: "↗".to_owned(),
        }
    }
}

/// Shortcode configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShortcodesConfig {
    /// Recognized shortcode names. `None` keeps the renderer's built-in list.
    pub names: Option<Vec<String>>,
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
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `ba.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, and the result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or a value is out of range.
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
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(max_depth) = settings.max_depth {
            self.render.max_depth = max_depth;
        }
        if let Some(hash_routes) = settings.hash_routes {
            self.render.hash_routes = hash_routes;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_from(&cwd)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
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

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_render()?;
        self.validate_shortcodes()?;
        Ok(())
    }

    fn validate_render(&self) -> Result<(), ConfigError> {
        if self.render.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::Validation(format!(
                "render.max_depth cannot exceed {MAX_DEPTH_LIMIT}"
            )));
        }
        if self
            .render
            .external_prefixes
            .iter()
            .any(|prefix| prefix.is_empty())
        {
            return Err(ConfigError::Validation(
                "render.external_prefixes cannot contain empty strings".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_shortcodes(&self) -> Result<(), ConfigError> {
        let Some(names) = &self.shortcodes.names else {
            return Ok(());
        };
        for name in names {
            let valid = !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
            if !valid {
                return Err(ConfigError::Validation(format!(
                    "shortcodes.names: invalid name {name:?} (expected A-Z, 0-9 and _)"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.render.max_depth, 8);
        assert_eq!(
            config.render.external_prefixes,
            vec!["http://".to_owned(), "https://".to_owned(), "www.".to_owned()]
        );
        assert!(config.render.hash_routes);
        assert_eq!(config.render.external_marker, "↗");
        assert!(config.shortcodes.names.is_none());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[render]
max_depth = 3
external_prefixes = ["https://", "mailto:"]
hash_routes = false
external_marker = ""

[shortcodes]
names = ["QUIZ", "CTA_2"]
"#,
        );

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.render.max_depth, 3);
        assert_eq!(
            config.render.external_prefixes,
            vec!["https://".to_owned(), "mailto:".to_owned()]
        );
        assert!(!config.render.hash_routes);
        assert_eq!(config.render.external_marker, "");
        assert_eq!(
            config.shortcodes.names,
            Some(vec!["QUIZ".to_owned(), "CTA_2".to_owned()])
        );
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[render]\nmax_depth = 2\n");

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.render.max_depth, 2);
        assert!(config.render.hash_routes);
        assert_eq!(config.render.external_prefixes.len(), 3);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn test_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[render\nmax_depth = ");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_cli_settings_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[render]\nmax_depth = 2\nhash_routes = true\n");
        let settings = CliSettings {
            max_depth: Some(5),
            hash_routes: Some(false),
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert_eq!(config.render.max_depth, 5);
        assert!(!config.render.hash_routes);
    }

    #[test]
    fn test_cli_settings_are_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "");
        let settings = CliSettings {
            max_depth: Some(MAX_DEPTH_LIMIT + 1),
            hash_routes: None,
        };

        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_empty_external_prefix_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[render]\nexternal_prefixes = [\"\"]\n");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(err.to_string().contains("external_prefixes"));
    }

    #[test]
    fn test_invalid_shortcode_name_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[shortcodes]\nnames = [\"bad-name\"]\n");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(err.to_string().contains("bad-name"));
    }

    #[test]
    fn test_discover_in_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "");
        let nested = dir.path().join("articles").join("2024");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover_from(&nested), Some(path));
    }

    #[test]
    fn test_discover_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "");
        let nested = dir.path().join("site");
        fs::create_dir_all(&nested).unwrap();
        let nearest = write_config(&nested, "");

        assert_eq!(Config::discover_from(&nested), Some(nearest));
    }
}
