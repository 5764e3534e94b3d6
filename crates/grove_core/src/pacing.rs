//! Cadência do loop: um ciclo, uma pausa fixa, repetir.
//!
//! O sinal de parada é um `AtomicBool` ligado pelo handler de Ctrl-C.
//! Ele só é observado entre ciclos e durante a pausa, nunca no meio de
//! uma leitura ou envio.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Granularidade com que a pausa verifica o sinal de parada.
const STOP_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    interval: Duration,
}

impl Cadence {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Dorme o intervalo inteiro a partir de agora, independente de quanto
    /// o ciclo demorou.
    ///
    /// Retorna `false` se a parada foi pedida.
    pub fn pause(&self, stop: &AtomicBool) -> bool {
        let deadline = Instant::now() + self.interval;
        loop {
            if stop.load(Ordering::Relaxed) {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            std::thread::sleep((deadline - now).min(STOP_POLL));
        }
    }
}
