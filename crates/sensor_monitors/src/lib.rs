//! # Sensor Monitors
//!
//! Infra comum dos monitores de sensor único (`moisture_monitor`,
//! `light_monitor`, `climate_monitor`): logging, Ctrl-C, validação do
//! intervalo e a linha de status sobrescrita no terminal.

use grove_core::pacing::Cadence;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::warn;

/// Limites aceitos para `--interval` (segundos).
pub const MIN_INTERVAL_SECS: f64 = 0.05;
pub const MAX_INTERVAL_SECS: f64 = 60.0;

/// Inicializa o `tracing` com `RUST_LOG` (padrão `warn`, para não
/// atrapalhar a linha de status).
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();
}

/// Instala o handler de Ctrl-C e retorna o sinal de parada.
pub fn stop_signal() -> Arc<AtomicBool> {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed)) {
        warn!("Falha ao instalar handler de Ctrl-C: {e}");
    }
    stop
}

/// `value_parser` do clap para `--interval`: segundos finitos dentro dos limites.
pub fn parse_interval(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("`{s}` não é um número"))?;
    if !(MIN_INTERVAL_SECS..=MAX_INTERVAL_SECS).contains(&secs) {
        return Err(format!(
            "intervalo deve estar entre {MIN_INTERVAL_SECS} e {MAX_INTERVAL_SECS}s"
        ));
    }
    Ok(Duration::from_secs_f64(secs))
}

/// O que fazer com a linha de um ciclo.
pub enum Tick {
    /// Sobrescreve a linha de status.
    Status(String),
    /// Mensagem de erro em linha própria.
    Error(String),
    /// Nada a mostrar neste ciclo.
    Skip,
}

/// Formata a linha sobrescrita: `\r{linha}   `.
pub fn overwrite_line(line: &str) -> String {
    format!("\r{line}   ")
}

/// Loop de monitor: chama `tick` a cada intervalo até Ctrl-C.
///
/// Retorna o número de ciclos executados.
pub fn run_monitor(
    interval: Duration,
    stop: &AtomicBool,
    out: &mut impl Write,
    mut tick: impl FnMut() -> Tick,
) -> std::io::Result<u64> {
    let cadence = Cadence::new(interval);
    let mut cycles = 0;
    loop {
        match tick() {
            Tick::Status(line) => write!(out, "{}", overwrite_line(&line))?,
            Tick::Error(msg) => writeln!(out, "\n⚠️ Error: {msg}")?,
            Tick::Skip => {}
        }
        out.flush()?;
        cycles += 1;

        if !cadence.pause(stop) {
            break;
        }
    }
    writeln!(out, "\n\n🛑 Monitor stopped.")?;
    Ok(cycles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_is_carriage_return_prefixed() {
        assert_eq!(overwrite_line("Level: 42"), "\rLevel: 42   ");
    }

    #[test]
    fn monitor_writes_status_and_stop_message() {
        let stop = AtomicBool::new(true);
        let mut out = Vec::new();
        let cycles = run_monitor(Duration::from_millis(10), &stop, &mut out, || {
            Tick::Status("Level: 100".into())
        })
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(cycles, 1);
        assert!(text.starts_with("\rLevel: 100   "));
        assert!(text.ends_with("🛑 Monitor stopped.\n"));
    }

    #[test]
    fn errors_do_not_end_the_loop() {
        let stop = AtomicBool::new(false);
        let mut out = Vec::new();
        let mut n = 0;
        let cycles = run_monitor(Duration::from_millis(1), &stop, &mut out, || {
            n += 1;
            if n == 3 {
                stop.store(true, Ordering::Relaxed);
            }
            match n {
                1 => Tick::Error("ADC ocupado".into()),
                2 => Tick::Skip,
                _ => Tick::Status("ok".into()),
            }
        })
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(cycles, 3);
        assert!(text.contains("⚠️ Error: ADC ocupado"));
        assert!(text.contains("\rok   "));
    }

    #[test]
    fn interval_accepts_seconds_in_range() {
        assert_eq!(parse_interval("0.5"), Ok(Duration::from_millis(500)));
        assert_eq!(parse_interval("60"), Ok(Duration::from_secs(60)));
    }

    #[test]
    fn interval_rejects_values_that_cannot_be_a_pause() {
        for bad in ["-0.5", "0", "NaN", "inf", "1e300", "0.01", "abc"] {
            assert!(parse_interval(bad).is_err(), "aceitou {bad}");
        }
    }
}
