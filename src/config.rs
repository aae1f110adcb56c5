use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::project::Projects;

const DEFAULT_API_URL: &str = "https://scrapbox.io/api";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub scrapbox: ScrapboxConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScrapboxConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub projects: Vec<String>,
    pub connect_sid: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ScrapboxConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            projects: Vec::new(),
            connect_sid: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from the TOML file named by `COSENSE_MCP_CONFIG`
    /// (or `config.toml`), then apply environment overrides.
    ///
    /// A missing file is not an error: everything can come from the environment.
    pub fn load() -> Result<Self> {
        let path = std::env::var("COSENSE_MCP_CONFIG").unwrap_or_else(|_| "config.toml".into());

        let mut config = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        toml::from_str(&content).context("Failed to parse config file")
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(projects) = std::env::var("SCRAPBOX_PROJECT") {
            self.scrapbox.projects = Projects::split_list(&projects);
        }
        if let Ok(sid) = std::env::var("SCRAPBOX_CONNECT_SID") {
            self.scrapbox.connect_sid = Some(sid).filter(|s| !s.is_empty());
        }
        if let Ok(url) = std::env::var("SCRAPBOX_API_URL") {
            self.scrapbox.api_url = url;
        }
    }

    /// Build the collection allow-list. Fails when no project is configured.
    pub fn projects(&self) -> Result<Projects> {
        Projects::new(self.scrapbox.projects.clone())
            .context("SCRAPBOX_PROJECT environment variable (or [scrapbox].projects) is required")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parsing() {
        let toml_str = r#"
            [scrapbox]
            api_url = "http://localhost:8080/api"
            projects = ["notes", "team"]
            connect_sid = "s%3Aabc"

            [logging]
            level = "debug"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.scrapbox.api_url, "http://localhost:8080/api");
        assert_eq!(config.scrapbox.projects, vec!["notes", "team"]);
        assert_eq!(config.scrapbox.connect_sid.as_deref(), Some("s%3Aabc"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_config_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.scrapbox.api_url, DEFAULT_API_URL);
        assert!(config.scrapbox.projects.is_empty());
        assert!(config.scrapbox.connect_sid.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_project_list_is_rejected() {
        let config = Config::default();
        let err = config.projects().unwrap_err();
        assert!(format!("{:#}", err).contains("SCRAPBOX_PROJECT"));
    }

    #[test]
    fn test_projects_default_is_first_entry() {
        let toml_str = r#"
            [scrapbox]
            projects = ["first", "second"]
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        let projects = config.projects().unwrap();
        assert_eq!(projects.default_project(), "first");
    }
}
