//! Monitor do sensor de luz.
//!
//! ```bash
//! light_monitor --port 0 --dark-threshold 300
//! ```

use clap::Parser;
use grove_core::hardware::backend_by_name;
use grove_core::status::LightStatus;
use sensor_monitors::{Tick, init_logging, parse_interval, run_monitor, stop_signal};
use std::process::ExitCode;
use std::time::Duration;

/// Grove Light Sensor Tester
#[derive(Parser, Debug)]
#[command(version, about = "Grove Light Sensor Tester", long_about = None)]
struct Args {
    /// The Analog Port ID (0 for A0)
    #[arg(long, default_value_t = 0)]
    port: u8,

    /// Seconds between reads
    #[arg(long, default_value = "0.2", value_parser = parse_interval)]
    interval: Duration,

    /// Below this level the room counts as dark
    #[arg(long, default_value_t = 300)]
    dark_threshold: u32,

    /// Driver backend
    #[arg(long, default_value = "simulated")]
    backend: String,
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    let sensor = backend_by_name(&args.backend)
        .map_err(|e| e.to_string())
        .and_then(|b| b.light_sensor(args.port).map_err(|e| e.to_string()));
    let mut sensor = match sensor {
        Ok(sensor) => sensor,
        Err(e) => {
            eprintln!("❌ Hardware Init Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Reading Light Sensor on Pin A{}...", args.port);
    println!("Cover the sensor to see the value drop!");

    let stop = stop_signal();
    let threshold = args.dark_threshold;
    let result = run_monitor(
        args.interval,
        &stop,
        &mut std::io::stdout(),
        || match sensor.read() {
            Ok(level) => Tick::Status(format!(
                "Light Level: {level} | Status: {}",
                LightStatus::from_level(level, threshold).label()
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
