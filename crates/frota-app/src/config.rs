//! Configuration management for frota-checker
//!
//! Config stored at: ~/.config/frota-checker/config.json

use frota_domain::model::schema::DEFAULT_SHEET_NAME;
use frota_domain::model::{ColumnAliases, StatusRules, TargetSchema};
use frota_domain::service::Reconciler;
use frota_infra::load_template;
use frota_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Template workbook or TOML file fixing the output columns
    #[serde(default)]
    pub template_path: Option<PathBuf>,

    /// Sheet of the template workbook holding the header row
    #[serde(default = "default_template_sheet")]
    pub template_sheet: String,

    /// Where correction workbooks are written (current directory if unset)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// How long a generated workbook stays downloadable
    #[serde(default = "default_artifact_ttl_secs")]
    pub artifact_ttl_secs: u64,

    #[serde(default)]
    pub statuses: StatusRules,

    #[serde(default)]
    pub aliases: ColumnAliases,
}

fn default_template_sheet() -> String {
    DEFAULT_SHEET_NAME.to_string()
}

fn default_artifact_ttl_secs() -> u64 {
    600
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            template_path: None,
            template_sheet: default_template_sheet(),
            output_dir: None,
            artifact_ttl_secs: default_artifact_ttl_secs(),
            statuses: StatusRules::default(),
            aliases: ColumnAliases::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("frota-checker");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn artifact_ttl(&self) -> Duration {
        Duration::from_secs(self.artifact_ttl_secs)
    }

    /// Output layout: the configured template, or the built-in one
    pub fn schema(&self) -> Result<TargetSchema> {
        match self.template_path {
            Some(ref path) => load_template(path, Some(&self.template_sheet)),
            None => Ok(TargetSchema::fleet_update().with_sheet_name(self.template_sheet.clone())),
        }
    }

    pub fn reconciler(&self) -> Reconciler {
        Reconciler::new(self.aliases.clone(), self.statuses.clone())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Frota Checker Configuration")?;
        writeln!(f, "===========================")?;
        writeln!(f)?;
        writeln!(f, "Output format:   {}", self.output_format)?;
        writeln!(
            f,
            "Template:        {}",
            self.template_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in)".to_string())
        )?;
        writeln!(f, "Template sheet:  {}", self.template_sheet)?;
        writeln!(
            f,
            "Output dir:      {}",
            self.output_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(current directory)".to_string())
        )?;
        writeln!(f, "Artifact TTL:    {}s", self.artifact_ttl_secs)?;
        writeln!(f, "Active status:   {}", self.statuses.active)?;
        writeln!(f, "Idle status:     {}", self.statuses.idle)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:     {}", path.display())?;
        }

        Ok(())
    }
}
