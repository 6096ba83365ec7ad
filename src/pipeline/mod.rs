//! Master wells pipeline orchestration
//!
//! Sequences union, identifier normalization, standard derivations and the
//! enrichment joins. Inputs come from a [`Source`]; the result is handed to a
//! [`Sink`] exactly once, after every step has succeeded.

use std::fmt;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use log::info;

use crate::algorithm::{
    Enrichment, derive_standard_columns, enrich, normalize_identifiers, union_by_name,
};
use crate::common::traits::{Sink, Source, WriteMode};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::record_set::RecordSet;
use crate::utils::logging::log_stage_complete;

/// Construct a qualified table name
///
/// Returns `database.schema.table` when both are given, `schema.table` when
/// only the schema is given, and `table` otherwise. A database without a
/// schema is ignored, and blank parts count as absent. Identifier legality is
/// left to the sink.
#[must_use]
pub fn build_table_name(table: &str, database: Option<&str>, schema: Option<&str>) -> String {
    match (non_blank(database), non_blank(schema)) {
        (Some(database), Some(schema)) => format!("{database}.{schema}.{table}"),
        (None, Some(schema)) => format!("{schema}.{table}"),
        _ => table.to_string(),
    }
}

fn non_blank(part: Option<&str>) -> Option<&str> {
    part.map(str::trim).filter(|p| !p.is_empty())
}

/// Outcome of a materialized run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Qualified name the output was written to
    pub output_table: String,
    /// Rows in the master record set
    pub rows: usize,
    /// Columns in the master record set
    pub columns: usize,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Wall time of the whole run, including materialization
    pub elapsed: Duration,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows x {} columns written to {} (started {}, took {:?})",
            self.rows,
            self.columns,
            self.output_table,
            self.started_at.to_rfc3339(),
            self.elapsed
        )
    }
}

/// The reconciliation pipeline producing the master wells record set
#[derive(Debug, Clone, Default)]
pub struct MasterWellsPipeline {
    config: PipelineConfig,
}

impl MasterWellsPipeline {
    /// Create a pipeline from a validated configuration
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Qualified name of the output table
    #[must_use]
    pub fn output_table_name(&self) -> String {
        build_table_name(
            &self.config.output_table_name,
            self.config.database.as_deref(),
            self.config.schema.as_deref(),
        )
    }

    /// Build the master wells record set without writing it
    pub fn transform<S: Source + ?Sized>(&self, source: &S) -> Result<RecordSet> {
        let config = &self.config;

        let start = Instant::now();
        let registry = source.load(&config.registry_source_name)?;
        let environmental = source.load(&config.environmental_source_name)?;
        let overrides = source.load(&config.override_source_name)?;
        info!(
            "Loaded sources: {} = {} rows, {} = {} rows, {} = {} rows",
            config.registry_source_name,
            registry.num_rows(),
            config.environmental_source_name,
            environmental.num_rows(),
            config.override_source_name,
            overrides.num_rows()
        );

        let (combined, start) = stage("Union", start, union_by_name(&registry, &environmental)?);
        let (normalized, start) = stage(
            "Identifier normalization",
            start,
            normalize_identifiers(&combined)?,
        );
        let (derived, start) = stage(
            "Standard derivation",
            start,
            derive_standard_columns(&normalized)?,
        );

        let enrichments = [
            Enrichment::new(
                config.environmental_source_name.clone(),
                config.environmental_suffix.clone(),
                environmental,
            ),
            Enrichment::new(
                config.override_source_name.clone(),
                config.override_suffix.clone(),
                overrides,
            ),
        ];
        let (master, _) = stage("Enrichment", start, enrich(&derived, &enrichments)?);
        Ok(master)
    }

    /// Build the master wells record set and materialize it in overwrite mode
    pub fn run<S, K>(&self, source: &S, sink: &mut K) -> Result<RunSummary>
    where
        S: Source + ?Sized,
        K: Sink + ?Sized,
    {
        let started_at = Utc::now();
        let start = Instant::now();
        info!("Starting master wells run at {}", started_at.to_rfc3339());

        let master = self.transform(source)?;
        let output_table = self.output_table_name();
        sink.materialize(&master, &output_table, WriteMode::Overwrite)?;

        let summary = RunSummary {
            output_table,
            rows: master.num_rows(),
            columns: master.num_columns(),
            started_at,
            elapsed: start.elapsed(),
        };
        info!("Run complete: {summary}");
        Ok(summary)
    }
}

/// Log a finished stage and restart the stage timer
fn stage(name: &str, start: Instant, output: RecordSet) -> (RecordSet, Instant) {
    log_stage_complete(name, output.num_rows(), output.num_columns(), start.elapsed());
    (output, Instant::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_table_name() {
        assert_eq!(build_table_name("T", None, None), "T");
        assert_eq!(build_table_name("T", None, Some("S")), "S.T");
        assert_eq!(build_table_name("T", Some("D"), Some("S")), "D.S.T");
        assert_eq!(build_table_name("T", Some("D"), None), "T");
    }

    #[test]
    fn test_build_table_name_ignores_blank_parts() {
        assert_eq!(build_table_name("T", Some(""), Some("S")), "S.T");
        assert_eq!(build_table_name("T", None, Some("")), "T");
        assert_eq!(build_table_name("T", Some("D"), Some("  ")), "T");
    }

    #[test]
    fn test_blank_schema_override_keeps_bare_output_name() {
        let mut config = crate::config::AppConfig::default();
        config
            .apply_overrides(|key| (key == "MASTER_WELLS_SCHEMA").then(String::new))
            .unwrap();
        let pipeline = MasterWellsPipeline::new(config.pipeline).unwrap();
        assert_eq!(pipeline.output_table_name(), "MASTER_WELLS_TABLE_TRANSFORMED");
    }

    #[test]
    fn test_output_table_name_from_config() {
        let pipeline = MasterWellsPipeline::new(PipelineConfig {
            database: Some("TG40".into()),
            schema: Some("TZ_ADA_MP_RB_ENERGY".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            pipeline.output_table_name(),
            "TG40.TZ_ADA_MP_RB_ENERGY.MASTER_WELLS_TABLE_TRANSFORMED"
        );
    }
}
