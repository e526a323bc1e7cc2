//! Generator configuration
//!
//! Settings come from an optional TOML file and are then overridden by
//! command-line flags:
//!
//! ```toml
//! template_dir = "templates"
//! output_dir = "generated"
//! definitions = "definitions/s3.yaml"
//! template_suffix = ".tmpl"
//! service = "s3"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};
use crate::generation::{DEFAULT_TEMPLATE_SUFFIX, RunnerConfig};

/// Resolved generator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the `*.tmpl` files
    pub template_dir: Option<PathBuf>,
    /// Root under which templates create their files
    pub output_dir: Option<PathBuf>,
    /// Path or URL of the service catalog document
    pub definitions: Option<String>,
    /// Suffix identifying template files
    pub template_suffix: String,
    /// Restrict generation to one service id
    pub service: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_dir: None,
            output_dir: None,
            definitions: None,
            template_suffix: DEFAULT_TEMPLATE_SUFFIX.to_string(),
            service: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Check that every required setting is present
    pub fn validate(&self) -> Result<()> {
        if self.template_dir.is_none() {
            return Err(Error::config("template_dir is required"));
        }
        if self.output_dir.is_none() {
            return Err(Error::config("output_dir is required"));
        }
        if self.definitions.as_deref().is_none_or(str::is_empty) {
            return Err(Error::config("definitions is required"));
        }
        if self.template_suffix.is_empty() {
            return Err(Error::config("template_suffix must not be empty"));
        }
        Ok(())
    }

    /// Path or URL of the service catalog
    pub fn definitions_source(&self) -> Result<&str> {
        self.definitions
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::config("definitions is required"))
    }

    /// Settings handed to the template runner
    pub fn runner_config(&self) -> Result<RunnerConfig> {
        self.validate()?;
        let (Some(template_dir), Some(output_dir)) = (&self.template_dir, &self.output_dir) else {
            return Err(Error::config("template_dir and output_dir are required"));
        };
        Ok(RunnerConfig::new(template_dir, output_dir).with_suffix(&self.template_suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.template_dir.is_none());
        assert!(config.output_dir.is_none());
        assert!(config.definitions.is_none());
        assert!(config.service.is_none());
        assert_eq!(config.template_suffix, ".tmpl");
    }

    #[test]
    fn test_config_from_toml_str() {
        let config = Config::from_toml_str(
            r#"
template_dir = "templates"
output_dir = "generated"
definitions = "https://example.com/catalog.json"
service = "s3"
"#,
        )
        .unwrap();

        assert_eq!(config.template_dir, Some(PathBuf::from("templates")));
        assert_eq!(config.output_dir, Some(PathBuf::from("generated")));
        assert_eq!(
            config.definitions.as_deref(),
            Some("https://example.com/catalog.json")
        );
        assert_eq!(config.service.as_deref(), Some("s3"));
        assert_eq!(config.template_suffix, ".tmpl");
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        let result = Config::from_toml_str("template_directory = \"x\"");
        assert!(matches!(result, Err(Error::Toml(_))));
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "template_suffix = \".tera\"").unwrap();
        file.flush().unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.template_suffix, ".tera");
    }

    #[test]
    fn test_validate_reports_missing_settings() {
        let mut config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("template_dir"));

        config.template_dir = Some(PathBuf::from("t"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("output_dir"));

        config.output_dir = Some(PathBuf::from("o"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("definitions"));

        config.definitions = Some("catalog.json".to_string());
        config.template_suffix.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("template_suffix"));

        config.template_suffix = ".tmpl".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_runner_config() {
        let config = Config {
            template_dir: Some(PathBuf::from("templates")),
            output_dir: Some(PathBuf::from("out")),
            definitions: Some("catalog.yaml".to_string()),
            template_suffix: ".tpl".to_string(),
            service: None,
        };

        let runner = config.runner_config().unwrap();
        assert_eq!(runner.template_dir, PathBuf::from("templates"));
        assert_eq!(runner.output_dir, PathBuf::from("out"));
        assert_eq!(runner.template_suffix, ".tpl");
        assert_eq!(config.definitions_source().unwrap(), "catalog.yaml");
    }
}
