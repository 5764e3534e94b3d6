//! Loop do nó de borda.
//!
//! Um ciclo: métricas do host → sensores → (alerta, atuadores, LCD) →
//! registro → emissão → pausa. As duas variantes compartilham o mesmo
//! loop; a variante `solution` liga a estratégia de alertas.

use crate::actuate::{clear_display, report, set_alarm, show_frame};
use crate::link::TelemetrySink;
use crate::reader::{MissingReading, read_environment};
use crate::stats::HostStatsSource;
use grove_core::alerts::evaluate_alert;
use grove_core::config::{NodeConfig, Variant};
use grove_core::display::{PageContext, PageRotation, next_frame};
use grove_core::hardware::{DeviceRegistry, DeviceSlot};
use grove_core::pacing::Cadence;
use grove_core::types::{NodeStatus, TelemetryRecord};
use std::sync::atomic::AtomicBool;
use tracing::{info, warn};

/// Estado da estratégia de alertas (só na variante `solution`).
#[derive(Debug, Default)]
struct AlertStrategy {
    rotation: PageRotation,
}

/// Resultado de um ciclo.
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub record: TelemetryRecord,
    pub emitted: bool,
    pub alarm: bool,
}

/// Totais de uma execução do loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub failed_sends: u64,
    pub alarm_cycles: u64,
}

pub struct EdgeNode<'a, S, K> {
    config: &'a NodeConfig,
    devices: DeviceRegistry,
    stats: S,
    sink: K,
    alerts: Option<AlertStrategy>,
}

impl<'a, S: HostStatsSource, K: TelemetrySink> EdgeNode<'a, S, K> {
    pub fn new(config: &'a NodeConfig, devices: DeviceRegistry, stats: S, sink: K) -> Self {
        let alerts = match config.node.variant {
            Variant::Edge => None,
            Variant::Solution => Some(AlertStrategy::default()),
        };
        Self {
            config,
            devices,
            stats,
            sink,
            alerts,
        }
    }

    /// Executa um ciclo completo e retorna o registro emitido.
    pub fn run_cycle(&mut self) -> CycleOutcome {
        let host = self.stats.sample();

        let policy = match self.alerts {
            Some(_) => MissingReading::Zero,
            None => MissingReading::Omit,
        };
        let env = read_environment(&mut self.devices, policy);

        let mut record = TelemetryRecord::new(
            &self.config.node.node_id,
            &self.config.node.team_name,
            host,
            env,
        );

        let mut alarm = false;
        if let Some(strategy) = self.alerts.as_mut() {
            let alert = evaluate_alert(&env, &self.config.thresholds);
            alarm = alert.is_some();

            set_alarm(&mut self.devices, alarm);

            let ctx = PageContext {
                team_name: &self.config.node.team_name,
                host: &host,
                env: &env,
            };
            let frame = next_frame(&mut strategy.rotation, alert.as_ref(), &ctx);
            show_frame(&mut self.devices, &frame);

            record = record.with_status(if alarm {
                NodeStatus::Alert
            } else {
                NodeStatus::Online
            });
        }

        let emitted = match self.sink.emit(&record) {
            Ok(()) => true,
            Err(e) => {
                warn!("{e}");
                false
            }
        };

        CycleOutcome {
            record,
            emitted,
            alarm,
        }
    }

    /// Repete ciclos até o sinal de parada, com a pausa fixa entre eles.
    pub fn run(&mut self, stop: &AtomicBool) -> RunSummary {
        let cadence = Cadence::new(self.config.interval());
        let mut summary = RunSummary::default();
        info!("📡 Transmitindo a cada {:.1}s", cadence.interval().as_secs_f64());

        loop {
            let outcome = self.run_cycle();
            summary.cycles += 1;
            if !outcome.emitted {
                summary.failed_sends += 1;
            }
            if outcome.alarm {
                summary.alarm_cycles += 1;
            }

            if self.alerts.is_some() {
                println!("Sent: {} | Alarm: {}", outcome.record, outcome.alarm);
            } else {
                println!("Sent: {}", outcome.record);
            }

            if !cadence.pause(stop) {
                break;
            }
        }
        summary
    }

    /// Encerramento best-effort: cada passo é tentado mesmo se o anterior falhar.
    ///
    /// Retorna quantos passos falharam.
    pub fn shutdown(mut self) -> usize {
        info!("🛑 Nó parado");
        let mut failures = 0;

        if let Err(e) = self.sink.disconnect() {
            warn!("{e}");
            failures += 1;
        }

        let steps = [
            (DeviceSlot::Led, self.devices.set_led(false)),
            (DeviceSlot::Buzzer, self.devices.set_buzzer(false)),
            (DeviceSlot::Display, clear_display(&mut self.devices)),
        ];
        for (slot, outcome) in steps {
            if matches!(outcome, Some(Err(_))) {
                failures += 1;
            }
            report(slot, outcome);
        }

        failures
    }

    pub fn devices(&self) -> &DeviceRegistry {
        &self.devices
    }
}
