//! Report configuration
//!
//! Loaded from a TOML file, then overridden by `UPDATE_DIGEST_CATEGORIES`,
//! then by command line flags. `UPDATE_DIGEST_LOG_LEVEL` is read by the binary
//! when it sets up logging.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const CATEGORIES_ENV: &str = "UPDATE_DIGEST_CATEGORIES";
pub const LOG_LEVEL_ENV: &str = "UPDATE_DIGEST_LOG_LEVEL";

pub const DEFAULT_SEPARATOR: &str = "\n";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Categories to report, in output order
    #[serde(default)]
    pub categories: Vec<String>,

    /// Joins report lines
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Custom Tera template used instead of the built-in report layout
    #[serde(default)]
    pub template: Option<PathBuf>,
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            separator: default_separator(),
            template: None,
        }
    }
}

impl ReportConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config file. A relative `template` path is resolved against the
    /// directory holding the config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;

        if let Some(dir) = path.parent() {
            config.template = config.template.map(|template| {
                if template.is_relative() {
                    dir.join(template)
                } else {
                    template
                }
            });
        }

        Ok(config)
    }

    pub fn merge_env_vars(&mut self) {
        self.merge_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value
    pub fn merge_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(categories) = lookup(CATEGORIES_ENV) {
            self.categories = parse_category_list(&categories);
        }
    }

    /// Fail when there is nothing to report
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(Error::Config(format!(
                "no categories configured; pass --category or set {CATEGORIES_ENV}"
            )));
        }
        Ok(())
    }
}

/// Split a comma separated list, trimming entries and dropping empty ones
pub fn parse_category_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::from_toml_str("").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.separator, "\n");
    }

    #[test]
    fn test_parse_full_config() {
        let config = ReportConfig::from_toml_str(
            r#"
categories = ["Security", "Critical"]
separator = "\r\n"
template = "digest.tera"
"#,
        )
        .unwrap();

        assert_eq!(config.categories, vec!["Security", "Critical"]);
        assert_eq!(config.separator, "\r\n");
        assert_eq!(config.template, Some(PathBuf::from("digest.tera")));
    }

    #[test]
    fn test_invalid_toml() {
        let err = ReportConfig::from_toml_str("categories = \"Security\"").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (CATEGORIES_ENV, " Security , ,Drivers "),
            (LOG_LEVEL_ENV, "trace"),
        ]
        .into_iter()
        .collect();

        let mut config = ReportConfig {
            categories: vec!["Bugfix".to_string()],
            ..ReportConfig::default()
        };
        config.merge_env_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.categories, vec!["Security", "Drivers"]);
    }

    #[test]
    fn test_env_absent_keeps_values() {
        let mut config = ReportConfig {
            categories: vec!["Bugfix".to_string()],
            ..ReportConfig::default()
        };
        config.merge_env_from(|_| None);
        assert_eq!(config.categories, vec!["Bugfix"]);
    }

    #[test]
    fn test_validate_requires_categories() {
        assert!(matches!(
            ReportConfig::default().validate(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_resolves_relative_template() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("digest.toml");
        fs::write(&path, "categories = [\"Security\"]\ntemplate = \"t.tera\"\n").unwrap();

        let config = ReportConfig::load(&path).unwrap();
        assert_eq!(config.template, Some(temp_dir.path().join("t.tera")));
    }
}
