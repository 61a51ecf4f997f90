mod commands;
mod config;
mod main_lib;

use config::Config;
use main_lib::{build_app, init_tracing, run_until_shutdown};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();
    let app = build_app(&config).await?;

    app.synchronizer.start();
    tracing::info!("Cache synchronizer running, reading commands from stdin");

    let outcome = run_until_shutdown(&app).await;
    app.synchronizer.stop().await;
    outcome
}
