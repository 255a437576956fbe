//! TOML-based configuration.
//!
//! Example configuration (`sqlselect.toml`):
//! ```toml
//! [render]
//! line_separator = "\r\n"
//! indent_width = 4
//! param_style = "at_p"   # indexed | at_p | dollar | question | inline
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::sql::placeholder::ParamStyle;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Statement rendering.
    pub render: RenderSettings,
}

/// How statements are laid out and how literals are bound.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Separator placed between clause lines.
    pub line_separator: String,

    /// Spaces used to indent clause bodies.
    pub indent_width: usize,

    /// Placeholder syntax for bound literals.
    pub param_style: ParamStyle,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            line_separator: "\n".to_string(),
            indent_width: 4,
            param_style: ParamStyle::default(),
        }
    }
}

impl RenderSettings {
    /// Default layout with a different placeholder style.
    pub fn with_param_style(param_style: ParamStyle) -> Self {
        Self {
            param_style,
            ..Self::default()
        }
    }

    /// Default layout with literals written into the command text.
    pub fn inline() -> Self {
        Self::with_param_style(ParamStyle::Inline)
    }

    /// The indentation unit for one level.
    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent_width)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.line_separator.is_empty() {
            return Err(SettingsError::InvalidConfig(
                "render.line_separator must not be empty".into(),
            ));
        }
        if !self.line_separator.chars().all(|c| c == '\r' || c == '\n') {
            return Err(SettingsError::InvalidConfig(format!(
                "render.line_separator must be a line break, got {:?}",
                self.line_separator
            )));
        }
        Ok(())
    }
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.render.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `SQLSELECT_CONFIG`
    /// 2. `./sqlselect.toml`
    /// 3. `~/.config/sqlselect/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("SQLSELECT_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("sqlselect.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("sqlselect").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[render]
line_separator = "\r\n"
indent_width = 2
param_style = "dollar"
"#;

        let settings = Settings::from_toml_str(toml).unwrap();

        assert_eq!(settings.render.line_separator, "\r\n");
        assert_eq!(settings.render.indent_width, 2);
        assert_eq!(settings.render.param_style, ParamStyle::Dollar);
        assert_eq!(settings.render.indent_unit(), "  ");
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.render.line_separator, "\n");
        assert_eq!(settings.render.indent_width, 4);
        assert_eq!(settings.render.param_style, ParamStyle::Indexed);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = Settings::from_toml_str("[render]\nparam_style = \"inline\"\n").unwrap();
        assert_eq!(settings.render.param_style, ParamStyle::Inline);
        assert_eq!(settings.render.indent_width, 4);

        let empty = Settings::from_toml_str("").unwrap();
        assert_eq!(empty, Settings::default());
    }

    #[test]
    fn test_invalid_separator() {
        let result = Settings::from_toml_str("[render]\nline_separator = \";\"\n");
        assert!(matches!(result, Err(SettingsError::InvalidConfig(_))));
    }

    #[test]
    fn test_unknown_param_style() {
        let result = Settings::from_toml_str("[render]\nparam_style = \"colon\"\n");
        assert!(matches!(result, Err(SettingsError::ParseError(_))));
    }

    #[test]
    fn test_from_file() {
        let path = env::temp_dir().join(format!("sqlselect-settings-{}.toml", std::process::id()));
        fs::write(&path, "[render]\nparam_style = \"question\"\n").unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.render.param_style, ParamStyle::Question);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let result = Settings::from_file("/nonexistent/sqlselect.toml");
        assert!(matches!(result, Err(SettingsError::FileNotFound(_))));
    }
}
