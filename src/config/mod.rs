//! Configuration for the master wells pipeline.
//!
//! All values are optional and defaulted. A JSON file may override any subset
//! of them, and `MASTER_WELLS_*` environment variables override the file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::util::safe_read_to_string;
use crate::error::{MasterWellsError, Result};

/// Default name of the materialized output table
pub const DEFAULT_OUTPUT_TABLE: &str = "MASTER_WELLS_TABLE_TRANSFORMED";
/// Default logical name of the internal energy-well registry
pub const DEFAULT_REGISTRY_SOURCE: &str = "TG40.TZ_ADA_MP_RB_ENERGY.RB_ENERGY_WELLS";
/// Default logical name of the environmental dataset
pub const DEFAULT_ENVIRONMENTAL_SOURCE: &str = "RAW_ENV_PRISM_WELLS";
/// Default logical name of the manual-override dataset
pub const DEFAULT_OVERRIDE_SOURCE: &str = "RBC_WELL_OVERRIDES";

/// Configuration for the reconciliation pipeline
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Target database of the output table
    pub database: Option<String>,
    /// Target schema of the output table
    pub schema: Option<String>,
    /// Bare name of the output table
    pub output_table_name: String,
    /// Logical name of the internal registry source
    pub registry_source_name: String,
    /// Logical name of the environmental source
    pub environmental_source_name: String,
    /// Logical name of the manual-override source
    pub override_source_name: String,
    /// Suffix for columns joined from the environmental source
    pub environmental_suffix: String,
    /// Suffix for columns joined from the override source
    pub override_suffix: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            database: None,
            schema: None,
            output_table_name: DEFAULT_OUTPUT_TABLE.to_string(),
            registry_source_name: DEFAULT_REGISTRY_SOURCE.to_string(),
            environmental_source_name: DEFAULT_ENVIRONMENTAL_SOURCE.to_string(),
            override_source_name: DEFAULT_OVERRIDE_SOURCE.to_string(),
            environmental_suffix: "env".to_string(),
            override_suffix: "rbc".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Reject values that would produce unusable table or column names
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("output_table_name", &self.output_table_name),
            ("registry_source_name", &self.registry_source_name),
            ("environmental_source_name", &self.environmental_source_name),
            ("override_source_name", &self.override_source_name),
            ("environmental_suffix", &self.environmental_suffix),
            ("override_suffix", &self.override_suffix),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(MasterWellsError::Config(format!("{name} must not be empty")));
        }
        if self.environmental_suffix == self.override_suffix {
            return Err(MasterWellsError::Config(format!(
                "environmental and override suffixes must differ (both '{}')",
                self.environmental_suffix
            )));
        }
        Ok(())
    }
}

impl fmt::Display for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipeline Configuration:")?;
        if let Some(database) = &self.database {
            writeln!(f, "  Database: {database}")?;
        }
        if let Some(schema) = &self.schema {
            writeln!(f, "  Schema: {schema}")?;
        }
        writeln!(f, "  Output Table: {}", self.output_table_name)?;
        writeln!(f, "  Registry Source: {}", self.registry_source_name)?;
        writeln!(
            f,
            "  Environmental Source: {} (suffix '{}')",
            self.environmental_source_name, self.environmental_suffix
        )?;
        writeln!(
            f,
            "  Override Source: {} (suffix '{}')",
            self.override_source_name, self.override_suffix
        )
    }
}

/// File format used when materializing to a directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Parquet,
    Csv,
}

impl OutputFormat {
    /// File extension written for this format
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Parquet => "parquet",
            Self::Csv => "csv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = MasterWellsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parquet" => Ok(Self::Parquet),
            "csv" => Ok(Self::Csv),
            other => Err(MasterWellsError::Config(format!(
                "unknown output format '{other}' (expected 'parquet' or 'csv')"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Configuration for the directory-backed store
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding input tables and receiving the output table
    pub data_dir: PathBuf,
    /// Format of the materialized output
    pub output_format: OutputFormat,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_format: OutputFormat::default(),
        }
    }
}

impl fmt::Display for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Store Configuration:")?;
        writeln!(f, "  Data Directory: {}", self.data_dir.display())?;
        writeln!(f, "  Output Format: {}", self.output_format)
    }
}

/// Complete configuration of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pipeline: PipelineConfig,
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from a JSON file; absent keys keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = safe_read_to_string(path, "loading configuration")?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Apply `MASTER_WELLS_*` environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup, e.g. the process environment
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // an empty value clears the qualifier
        if let Some(value) = lookup("MASTER_WELLS_DATABASE") {
            self.pipeline.database = non_blank(value);
        }
        if let Some(value) = lookup("MASTER_WELLS_SCHEMA") {
            self.pipeline.schema = non_blank(value);
        }
        if let Some(value) = lookup("MASTER_WELLS_OUTPUT_TABLE") {
            self.pipeline.output_table_name = value;
        }
        if let Some(value) = lookup("MASTER_WELLS_ENV_SOURCE") {
            self.pipeline.environmental_source_name = value;
        }
        if let Some(value) = lookup("MASTER_WELLS_OVERRIDE_SOURCE") {
            self.pipeline.override_source_name = value;
        }
        if let Some(value) = lookup("MASTER_WELLS_DATA_DIR") {
            self.store.data_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("MASTER_WELLS_OUTPUT_FORMAT") {
            self.store.output_format = value.parse()?;
        }
        Ok(())
    }
}

fn non_blank(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

impl fmt::Display for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pipeline, self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.output_table_name, "MASTER_WELLS_TABLE_TRANSFORMED");
        assert_eq!(config.environmental_source_name, "RAW_ENV_PRISM_WELLS");
        assert_eq!(config.override_source_name, "RBC_WELL_OVERRIDES");
        assert!(config.database.is_none() && config.schema.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AppConfig::from_json_str(
            r#"{"pipeline": {"database": "TG40", "schema": "TZ_ADA_MP_RB_ENERGY"},
                "store": {"output_format": "csv"}}"#,
        )
        .unwrap();
        assert_eq!(config.pipeline.database.as_deref(), Some("TG40"));
        assert_eq!(config.pipeline.output_table_name, DEFAULT_OUTPUT_TABLE);
        assert_eq!(config.store.output_format, OutputFormat::Csv);
        assert_eq!(config.store.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("MASTER_WELLS_SCHEMA", "ANALYTICS"),
            ("MASTER_WELLS_OUTPUT_FORMAT", "CSV"),
        ]
        .into_iter()
        .collect();
        let mut config = AppConfig::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| (*v).to_string()))
            .unwrap();
        assert_eq!(config.pipeline.schema.as_deref(), Some("ANALYTICS"));
        assert_eq!(config.store.output_format, OutputFormat::Csv);

        config
            .apply_overrides(|key| (key == "MASTER_WELLS_SCHEMA").then(String::new))
            .unwrap();
        assert!(config.pipeline.schema.is_none());

        let err = config
            .apply_overrides(|key| (key == "MASTER_WELLS_OUTPUT_FORMAT").then(|| "xlsx".into()))
            .unwrap_err();
        assert!(matches!(err, MasterWellsError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_equal_suffixes() {
        let config = PipelineConfig {
            override_suffix: "env".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            output_table_name: " ".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
