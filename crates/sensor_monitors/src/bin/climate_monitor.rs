//! Monitor de temperatura e umidade (DHT11 azul / DHT22 branco).
//!
//! ```bash
//! climate_monitor --port 5 --type white --unit F
//! ```

use clap::Parser;
use grove_core::hardware::backend_by_name;
use grove_core::status::{ClimateStatus, TempUnit};
use grove_core::types::DhtKind;
use sensor_monitors::{Tick, init_logging, parse_interval, run_monitor, stop_signal};
use std::process::ExitCode;
use std::time::Duration;
use tracing::debug;

/// Grove DHT Sensor Tester
#[derive(Parser, Debug)]
#[command(version, about = "Grove DHT Sensor Tester", long_about = None)]
struct Args {
    /// The Digital Port ID (e.g., 5, 16, 18)
    #[arg(long, default_value_t = 5)]
    port: u8,

    /// Sensor color: "blue" (DHT11) or "white" (DHT22/Pro)
    #[arg(long = "type", default_value = "blue")]
    kind: DhtKind,

    /// Temperature unit: C or F
    #[arg(long, default_value = "C")]
    unit: TempUnit,

    /// Seconds between reads
    #[arg(long, default_value = "1.5", value_parser = parse_interval)]
    interval: Duration,

    /// Driver backend
    #[arg(long, default_value = "simulated")]
    backend: String,
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    println!("--- 🌡️  Starting Environment Monitor ---");
    println!("   • Port: D{}", args.port);
    println!("   • Sensor: {}", args.kind.label());
    println!("------------------------------------------");

    let sensor = backend_by_name(&args.backend)
        .map_err(|e| e.to_string())
        .and_then(|b| b.climate_sensor(args.kind, args.port).map_err(|e| e.to_string()));
    let mut sensor = match sensor {
        Ok(sensor) => sensor,
        Err(e) => {
            eprintln!("❌ Hardware Init Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stop = stop_signal();
    let unit = args.unit;
    let result = run_monitor(
        args.interval,
        &stop,
        &mut std::io::stdout(),
        || match sensor.read() {
            // Leituras NaN aparecem no aquecimento do sensor
            Ok(reading) if !reading.is_valid() => Tick::Skip,
            Ok(reading) => Tick::Status(format!(
                "Temp: {:.1}{} | Humidity: {:.1}% | Status: {}",
                unit.convert(reading.temperature),
                unit.symbol(),
                reading.humidity,
                ClimateStatus::from_reading(reading.temperature, reading.humidity).label()
            )),
            // DHTs falham com frequência; tenta de novo no próximo ciclo
            Err(e) => {
                debug!("leitura do DHT: {e}");
                Tick::Skip
            }
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
