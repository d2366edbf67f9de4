mod app;
mod config;
mod etl;
mod utils;

use anyhow::anyhow;
use app::EtlLauncher;
use config::Config;
use eframe::CreationContext;
use etl::HttpEtlClient;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load();
    info!("Using ETL backend at {}", config.backend_url);

    let backend = Arc::new(HttpEtlClient::new(config.backend_url.clone()));
    let launcher = EtlLauncher::new(backend)?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Pentaho ETL Launcher",
        options,
        Box::new(move |_cc: &CreationContext| Box::new(launcher)),
    )
    .map_err(|e| anyhow!("failed to start the UI: {}", e))
}
