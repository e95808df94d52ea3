use bmp085_sensorhub::{config, init_tracing, run_station};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug for per-reading detail and JSON messages
    init_tracing();

    let config_path = config::config_dir();
    tracing::info!("[main] configuration path: {}", config_path);

    run_station(&config_path).await
}
