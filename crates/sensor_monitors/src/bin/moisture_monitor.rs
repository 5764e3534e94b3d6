//! Monitor do sensor de umidade do solo.
//!
//! ```bash
//! moisture_monitor --port 0 --interval 0.5
//! ```

use clap::Parser;
use grove_core::hardware::backend_by_name;
use grove_core::status::{MoistureStatus, draw_bar};
use sensor_monitors::{Tick, init_logging, parse_interval, run_monitor, stop_signal};
use std::process::ExitCode;
use std::time::Duration;

/// Escala do gráfico de barras.
const BAR_MAX: u32 = 1000;
const BAR_WIDTH: usize = 20;

/// Grove Moisture Sensor Tester
#[derive(Parser, Debug)]
#[command(version, about = "Grove Moisture Sensor Tester", long_about = None)]
struct Args {
    /// The Analog Port ID (0 for A0, 2 for A2)
    #[arg(long, default_value_t = 0)]
    port: u8,

    /// Seconds between reads
    #[arg(long, default_value = "0.5", value_parser = parse_interval)]
    interval: Duration,

    /// Driver backend
    #[arg(long, default_value = "simulated")]
    backend: String,
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    println!("--- 💧 Starting Moisture Monitor ---");
    println!("   • Port: A{}", args.port);
    println!("------------------------------------------");

    let sensor = backend_by_name(&args.backend)
        .map_err(|e| e.to_string())
        .and_then(|b| b.moisture_sensor(args.port).map_err(|e| e.to_string()));
    let mut sensor = match sensor {
        Ok(sensor) => sensor,
        Err(e) => {
            eprintln!("❌ Hardware Init Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stop = stop_signal();
    let result = run_monitor(
        args.interval,
        &stop,
        &mut std::io::stdout(),
        || match sensor.read() {
            Ok(level) => Tick::Status(format!(
                "Level: {level:<4} {} Status: {}",
                draw_bar(level, BAR_MAX, BAR_WIDTH),
                MoistureStatus::from_level(level).label()
            )),
            Err(e) => Tick::Error(e.to_string()),
        },
    );

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Erro de saída: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_interval_is_rejected_by_the_parser() {
        assert!(Args::try_parse_from(["moisture_monitor", "--interval=-0.5"]).is_err());
        assert!(Args::try_parse_from(["moisture_monitor", "--interval", "NaN"]).is_err());
    }

    #[test]
    fn default_interval_is_half_a_second() {
        let args = Args::try_parse_from(["moisture_monitor"]).unwrap();
        assert_eq!(args.interval, Duration::from_millis(500));
        assert_eq!(args.port, 0);
    }
}
