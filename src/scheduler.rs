use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::bus::i2c::I2CBus;
use crate::bus::Bus;
use crate::config::SensorEntry;
use crate::errors::{ConfigError, StationError, StationResult};
use crate::messages::BarometerMessage;
use crate::registry::StationEntry;
use crate::sensors::{altitude, Bmp085, SensorDataFrame};

/// Start one blocking sampling worker per sensor. Each returns the number of
/// readings it produced.
pub fn spawn_sensor_tasks(
    entries: Vec<StationEntry>,
    tx: mpsc::Sender<SensorDataFrame>,
    stop: Arc<AtomicBool>,
) -> Vec<(String, JoinHandle<StationResult<u64>>)> {
    entries
        .into_iter()
        .map(|entry| {
            let id = entry.sensor.id.clone();
            let tx = tx.clone();
            let stop = stop.clone();
            let handle = tokio::task::spawn_blocking(move || {
                let mut bus = I2CBus::new(&entry.bus_path).map_err(|source| StationError::Bus {
                    sensor: entry.sensor.id.clone(),
                    source,
                })?;
                sample_loop(&mut bus, &entry.sensor, &tx, &stop)
            });
            (id, handle)
        })
        .collect()
}

/// Calibrate the sensor on `bus`, then sample at the configured rate until
/// the sample budget is spent, `stop` is raised or the receiver goes away.
pub fn sample_loop<B: Bus>(
    bus: &mut B,
    cfg: &SensorEntry,
    tx: &mpsc::Sender<SensorDataFrame>,
    stop: &AtomicBool,
) -> StationResult<u64> {
    let period = cfg.period().ok_or_else(|| ConfigError::InvalidValue {
        field: format!("{}.frequency", cfg.id),
        reason: "must be at least 1 Hz".to_string(),
    })?;
    let mut sensor = Bmp085::new(bus, cfg.address, cfg.mode).map_err(|source| StationError::Init {
        sensor: cfg.id.clone(),
        source,
    })?;
    info!("[{}] calibrated at {:#04x}, mode {}", cfg.id, cfg.address, sensor.mode());

    if cfg.print_calibration {
        println!("[{}] Table of calibration coefficients:\n{}", cfg.id, sensor.format_calibration_table());
    }

    let mut attempts = 0u64;
    let mut seq = 0u64;

    while !stop.load(Ordering::Relaxed) && cfg.samples.map_or(true, |n| attempts < n) {
        if attempts > 0 {
            std::thread::sleep(period);
        }
        attempts += 1;

        match sensor.measure() {
            Ok(measurement) => {
                seq += 1;
                let frame = SensorDataFrame {
                    sensor_id: cfg.id.clone(),
                    seq,
                    measurement,
                    altitude: cfg
                        .baseline_pressure
                        .map(|p0| altitude(measurement.pressure as f64, p0)),
                };
                if tx.blocking_send(frame).is_err() {
                    debug!("[{}] publisher gone, stopping", cfg.id);
                    break;
                }
            }
            Err(e) => {
                warn!("[{}] sensor read error: {}", cfg.id, e);
            }
        }
    }

    info!("[{}] sampling finished after {} reading(s)", cfg.id, seq);
    Ok(seq)
}

/// Human-readable report line for one reading
pub fn format_frame(frame: &SensorDataFrame) -> String {
    let mut line = format!(
        "[{}] Temperature = {:+5.2}\u{b0}C  Pressure = {:.2}hPa",
        frame.sensor_id,
        frame.temperature_celsius(),
        frame.pressure_hpa()
    );
    if let Some(h) = frame.altitude {
        line.push_str(&format!("  Altitude = {}m", h));
    }
    line
}

/// Drain readings until every worker has dropped its sender.
pub async fn publish_frames(device_id: String, mut rx: mpsc::Receiver<SensorDataFrame>) -> u64 {
    let mut published = 0u64;
    while let Some(frame) = rx.recv().await {
        println!("{}", format_frame(&frame));
        match BarometerMessage::from_frame(&device_id, &frame).to_json() {
            Ok(json) => debug!("[publish] {}", json),
            Err(e) => error!("[publish] failed to encode reading: {}", e),
        }
        published += 1;
    }
    published
}
