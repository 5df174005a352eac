use linkmark_engine::{
    LinkTarget, ValidationError,
    markdown::PatternError,
    plugin::LinkOptions,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid markdown pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        source: PatternError,
    },

    #[error("Invalid default_target: {0}")]
    InvalidTarget(#[from] ValidationError),
}

/// Host-side settings for the link plugin.
///
/// Every field is optional; an empty file means "all defaults".
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Markdown link pattern. An empty string disables markdown conversion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotkey: Option<String>,

    /// One of `_blank`, `_parent`, `_top`, `_self`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_target: Option<String>,

    /// Where the scratchpad writes its log, since stderr belongs to the terminal UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the log path
        config.log_file = config
            .log_file
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/linkmark");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Validated options for constructing the link plugin.
    pub fn link_options(&self) -> Result<LinkOptions, ConfigError> {
        let default_target = match self.default_target.as_deref() {
            None | Some("") => LinkTarget::default(),
            Some(target) => target.parse()?,
        };
        let options = LinkOptions {
            markdown: self.markdown.clone(),
            hotkey: self.hotkey.clone(),
            default_target,
        };
        options
            .pattern()
            .map_err(|source| ConfigError::InvalidPattern {
                pattern: self.markdown.clone().unwrap_or_default(),
                source,
            })?;
        Ok(options)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/linkmark/config.toml"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());

        let options = config.link_options().unwrap();
        assert_eq!(options, LinkOptions::default());
        assert_eq!(options.hotkey().keys, "mod+k");
    }

    #[test]
    fn test_config_with_all_fields() {
        let config_content = r#"
markdown = '\[(.+?)\]\(([^\s]+?)\)$'
hotkey = "ctrl+l"
default_target = "_top"
"#;

        let config: Config = toml::from_str(config_content).unwrap();
        let options = config.link_options().unwrap();

        assert_eq!(options.default_target, LinkTarget::Top);
        assert_eq!(options.hotkey().keys, "ctrl+l");
        assert_eq!(options.hotkey().args, vec!["_top".to_string()]);
        assert!(options.pattern().unwrap().is_some());
    }

    #[test]
    fn test_empty_markdown_disables_conversion() {
        let config: Config = toml::from_str("markdown = \"\"\n").unwrap();
        let options = config.link_options().unwrap();
        assert!(options.pattern().unwrap().is_none());
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let config = Config {
            markdown: Some("[unclosed".to_string()),
            ..Default::default()
        };

        let err = config.link_options().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidPattern {
                source: PatternError::Regex(_),
                ..
            }
        ));
    }

    #[test]
    fn test_pattern_needs_two_groups() {
        let config = Config {
            markdown: Some(r"\[(.+?)\]".to_string()),
            ..Default::default()
        };

        let err = config.link_options().unwrap_err();
        assert!(err.to_string().contains("exactly 2 capture groups"));
    }

    #[test]
    fn test_invalid_target_is_reported() {
        let config = Config {
            default_target: Some("_new".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            config.link_options(),
            Err(ConfigError::InvalidTarget(ValidationError::OutOfDomain { .. }))
        ));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("LINKMARK_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$LINKMARK_TEST_VAR/linkmark.log");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/linkmark.log")));

        unsafe {
            env::remove_var("LINKMARK_TEST_VAR");
        }
    }

    #[test]
    fn test_log_file_tilde_is_expanded_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "log_file = \"~/linkmark.log\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        let log_file = config.log_file.unwrap();

        assert!(!log_file.to_string_lossy().starts_with('~'));
        assert!(log_file.to_string_lossy().ends_with("linkmark.log"));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_unparsable_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "markdown = [").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            markdown: Some(String::new()),
            hotkey: Some("mod+shift+k".to_string()),
            default_target: Some("_self".to_string()),
            log_file: None,
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }
}
