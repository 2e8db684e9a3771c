mod app;
mod commands;
mod config;
mod effects;
mod render;

use anyhow::Context;
use jobboard_logging::{jb_info, jb_warn, LevelFilter};

fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let loaded = config::load_config(&cwd);
    let mut config = loaded.as_ref().cloned().unwrap_or_default();

    jobboard_logging::initialize(config.log_destination(), LevelFilter::Info);
    match &loaded {
        Ok(_) => jb_info!("Config resolved from {:?}", cwd),
        Err(err) => jb_warn!("{}; using defaults", err),
    }

    if let Some(endpoint) = std::env::args().nth(1) {
        config.endpoint = endpoint;
    }
    if config.data_dir.is_relative() {
        config.data_dir = cwd.join(&config.data_dir);
    }

    app::run(config)
}
