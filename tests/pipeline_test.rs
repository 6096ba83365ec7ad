mod utils;

use master_wells::config::{DEFAULT_ENVIRONMENTAL_SOURCE, DEFAULT_OUTPUT_TABLE, DEFAULT_REGISTRY_SOURCE};
use master_wells::{
    MasterWellsError, MasterWellsPipeline, MemoryStore, PipelineConfig, RecordSet, Sink, Source,
    WriteMode,
};
use utils::{default_store, string_values, utf8};

fn s(value: &str) -> Option<String> {
    Some(value.to_string())
}

#[test]
fn test_transform_builds_master_wells() {
    let store = default_store();
    let pipeline = MasterWellsPipeline::default();

    let master = pipeline.transform(&store).unwrap();

    assert_eq!(master.num_rows(), 5);
    assert_eq!(
        master.column_names(),
        vec![
            "API",
            "WELL_NAME",
            "OPERATOR",
            "ENV_STATUS",
            "API14",
            "API12",
            "API10",
            "WELL_NAME_UPPER",
            "API_env",
            "WELL_NAME_env",
            "ENV_STATUS_env",
            "WELL_NAME_rbc",
            "OVERRIDE_NAME_rbc",
        ]
    );

    assert_eq!(
        string_values(&master, "API14"),
        vec![
            s("00004250120123"),
            s("42501201240000"),
            s("00000000000123"),
            s("00004250120123"),
            s("00000000000999"),
        ]
    );
    assert_eq!(string_values(&master, "API10")[1], s("4250120124"));
    assert_eq!(string_values(&master, "WELL_NAME_UPPER")[0], s("SMITH 1-H"));

    // registry rows first, then environmental rows
    assert_eq!(
        string_values(&master, "OPERATOR"),
        vec![s("Acme"), s("Acme"), None, None, None]
    );
    assert_eq!(
        string_values(&master, "ENV_STATUS_env"),
        vec![s("producing"), None, None, s("producing"), s("shut-in")]
    );
    assert_eq!(
        string_values(&master, "OVERRIDE_NAME_rbc"),
        vec![None, s("Fixed Name"), None, None, None]
    );
    // base columns keep their own values next to the suffixed ones
    assert_eq!(string_values(&master, "WELL_NAME")[1], s("Jones 2"));
    assert_eq!(string_values(&master, "WELL_NAME_rbc")[1], s("Jones 2 (corrected)"));
}

#[test]
fn test_run_materializes_under_qualified_name() {
    let mut store = default_store();
    let pipeline = MasterWellsPipeline::new(PipelineConfig {
        database: Some("TG40".into()),
        schema: Some("TZ_ADA_MP_RB_ENERGY".into()),
        ..Default::default()
    })
    .unwrap();

    let source = store.clone();
    let summary = pipeline.run(&source, &mut store).unwrap();

    let qualified = format!("TG40.TZ_ADA_MP_RB_ENERGY.{DEFAULT_OUTPUT_TABLE}");
    assert_eq!(summary.output_table, qualified);
    assert_eq!(summary.rows, 5);
    assert_eq!(summary.columns, 13);
    assert_eq!(store.load(&qualified).unwrap().num_rows(), 5);
}

#[test]
fn test_run_is_idempotent() {
    let source = default_store();
    let pipeline = MasterWellsPipeline::default();

    let mut first = MemoryStore::new();
    let mut second = MemoryStore::new();
    pipeline.run(&source, &mut first).unwrap();
    pipeline.run(&source, &mut second).unwrap();
    pipeline.run(&source, &mut second).unwrap();

    assert_eq!(
        first.load(DEFAULT_OUTPUT_TABLE).unwrap(),
        second.load(DEFAULT_OUTPUT_TABLE).unwrap()
    );
}

#[test]
fn test_missing_source_fails_without_writing() {
    let mut source = MemoryStore::new();
    source.insert(DEFAULT_REGISTRY_SOURCE, utils::registry_wells());
    let mut sink = MemoryStore::new();

    let err = MasterWellsPipeline::default()
        .run(&source, &mut sink)
        .unwrap_err();

    assert!(matches!(err, MasterWellsError::TableNotFound(name) if name == DEFAULT_ENVIRONMENTAL_SOURCE));
    assert!(!sink.contains(DEFAULT_OUTPUT_TABLE));
}

#[test]
fn test_missing_well_name_keeps_previous_output() {
    let mut source = default_store();
    let no_names = RecordSet::from_columns(vec![("API", utf8(&[Some("1")]))]).unwrap();
    source
        .insert(DEFAULT_REGISTRY_SOURCE, no_names.clone())
        .insert(DEFAULT_ENVIRONMENTAL_SOURCE, no_names);

    let mut sink = MemoryStore::new();
    let previous = RecordSet::from_columns(vec![("API14", utf8(&[Some("previous")]))]).unwrap();
    sink.materialize(&previous, DEFAULT_OUTPUT_TABLE, WriteMode::Overwrite)
        .unwrap();

    let err = MasterWellsPipeline::default()
        .run(&source, &mut sink)
        .unwrap_err();

    assert!(matches!(err, MasterWellsError::MissingColumn { ref column, .. } if column == "WELL_NAME"));
    assert_eq!(sink.load(DEFAULT_OUTPUT_TABLE).unwrap(), previous);
}

#[test]
fn test_missing_identifier_column_is_fatal() {
    let mut source = default_store();
    let anonymous = RecordSet::from_columns(vec![("WELL_NAME", utf8(&[Some("A")]))]).unwrap();
    source
        .insert(DEFAULT_REGISTRY_SOURCE, anonymous.clone())
        .insert(DEFAULT_ENVIRONMENTAL_SOURCE, anonymous);

    let err = MasterWellsPipeline::default().transform(&source).unwrap_err();
    assert!(matches!(err, MasterWellsError::MissingIdentifierColumn { .. }));
}

#[test]
fn test_custom_source_names_and_suffixes() {
    let mut source = MemoryStore::new();
    source
        .insert("registry", utils::registry_wells())
        .insert("prism", utils::environmental_wells())
        .insert("manual", utils::well_overrides());

    let pipeline = MasterWellsPipeline::new(PipelineConfig {
        registry_source_name: "registry".into(),
        environmental_source_name: "prism".into(),
        override_source_name: "manual".into(),
        environmental_suffix: "prism".into(),
        override_suffix: "manual".into(),
        ..Default::default()
    })
    .unwrap();

    let master = pipeline.transform(&source).unwrap();
    assert!(master.has_column("ENV_STATUS_prism"));
    assert!(master.has_column("OVERRIDE_NAME_manual"));
    assert_eq!(master.num_rows(), 5);
}

#[test]
fn test_invalid_config_rejected() {
    let err = MasterWellsPipeline::new(PipelineConfig {
        override_suffix: "env".into(),
        ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, MasterWellsError::Config(_)));
}
