use std::path::PathBuf;

use anyhow::Context;
use log::info;
use master_wells::{AppConfig, DirectoryStore, MasterWellsPipeline};

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => AppConfig::from_json_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => AppConfig::default(),
    };
    config
        .apply_env_overrides()
        .context("Invalid MASTER_WELLS_* environment override")?;
    info!("{config}");

    let source = DirectoryStore::from_config(&config.store)
        .context("Failed to open the data directory")?;
    let mut sink = source.clone();
    let pipeline = MasterWellsPipeline::new(config.pipeline)?;

    let summary = pipeline
        .run(&source, &mut sink)
        .context("Master wells run failed")?;
    info!("{summary}");

    Ok(())
}
