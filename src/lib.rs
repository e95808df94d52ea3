//! Bosch BMP085 barometric pressure / temperature driver for Linux I2C, plus
//! a small sampling station built on it.

// Public modules
pub mod bus;
pub mod config;
pub mod errors;
pub mod messages;
pub mod registry;
pub mod scheduler;
pub mod sensors;

// Re-export commonly used types
pub use bus::i2c::I2CBus;
pub use bus::Bus;
pub use errors::{BusError, ConfigError, InitError, MeasureError, StationError};
pub use sensors::{altitude, Bmp085, Calibration, Measurement, Oversampling};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Initialize tracing with default configuration
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();
}

/// Run the station described by `buses.toml` / `sensors.toml` in `config_path`
/// until every sensor has finished or Ctrl-C is pressed.
pub async fn run_station(config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    info!("[station] starting up...");

    let entries = registry::load_station(config_path)?;
    if entries.is_empty() {
        return Err(Box::new(StationError::NoSensors));
    }

    let (tx, rx) = mpsc::channel(64);
    let stop = Arc::new(AtomicBool::new(false));

    let ctrl_c_stop = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("[station] interrupt received, stopping sensors");
            ctrl_c_stop.store(true, Ordering::Relaxed);
        }
    });

    let workers = scheduler::spawn_sensor_tasks(entries, tx, stop);
    info!("[station] {} sensor task(s) launched", workers.len());
    let publisher = tokio::spawn(scheduler::publish_frames("bmp085_station".to_string(), rx));

    let mut healthy = 0usize;
    for (id, worker) in workers {
        match worker.await {
            Ok(Ok(readings)) => {
                info!("[{}] done, {} reading(s)", id, readings);
                healthy += 1;
            }
            Ok(Err(e)) => error!("[{}] {}", id, e),
            Err(e) => error!("[{}] sensor task panicked: {}", id, e),
        }
    }

    let published = publisher.await?;
    info!("[station] published {} reading(s)", published);

    if healthy == 0 {
        return Err(Box::new(StationError::NoSensors));
    }
    Ok(())
}
