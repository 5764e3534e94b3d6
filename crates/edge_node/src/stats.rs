//! Coletor de métricas do host: uso de CPU, temperatura e latência.
//!
//! - `sysinfo` — uso global da CPU
//! - arquivo térmico do kernel — temperatura em milésimos de grau
//! - GET HTTP com timeout curto — latência até o dashboard

use grove_core::config::NodeConfig;
use grove_core::types::HostStats;
use reqwest::blocking::Client;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sysinfo::{CpuRefreshKind, RefreshKind, System};
use tracing::{debug, warn};

/// Fonte de métricas do host consultada a cada ciclo.
pub trait HostStatsSource {
    fn sample(&mut self) -> HostStats;
}

/// Métricas reais do sistema.
pub struct SystemStats {
    sys: System,
    thermal_path: PathBuf,
    probe: LatencyProbe,
}

impl SystemStats {
    pub fn new(config: &NodeConfig) -> Self {
        let mut sys =
            System::new_with_specifics(RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()));
        // Primeira leitura para inicializar contadores
        sys.refresh_cpu_usage();

        Self {
            sys,
            thermal_path: PathBuf::from(&config.stats.thermal_path),
            probe: LatencyProbe::new(
                &config.node.server_url,
                config.probe_timeout(),
                config.stats.unreachable_latency_ms,
            ),
        }
    }
}

impl HostStatsSource for SystemStats {
    fn sample(&mut self) -> HostStats {
        self.sys.refresh_cpu_usage();
        let stats = HostStats {
            cpu: self.sys.global_cpu_usage(),
            temp: read_cpu_temp(&self.thermal_path),
            latency_ms: self.probe.measure(),
        };
        debug!(
            "Host: CPU {:.1}% {:.1}°C | latência {}ms",
            stats.cpu, stats.temp, stats.latency_ms
        );
        stats
    }
}

/// Lê a temperatura da CPU (°C, 1 casa decimal).
///
/// Arquivo ausente ou ilegível resulta em exatamente 0.0.
pub fn read_cpu_temp(path: &Path) -> f32 {
    match std::fs::read_to_string(path) {
        Ok(raw) => match raw.trim().parse::<i64>() {
            Ok(millis) => ((millis as f64 / 1000.0) * 10.0).round() as f32 / 10.0,
            Err(e) => {
                debug!("Conteúdo inválido em {}: {e}", path.display());
                0.0
            }
        },
        Err(e) => {
            debug!("Sem temperatura em {}: {e}", path.display());
            0.0
        }
    }
}

/// Sonda de alcance do dashboard.
///
/// Mede o tempo de um GET (corpo ignorado). Qualquer falha, inclusive
/// timeout, vira o valor sentinela.
pub struct LatencyProbe {
    client: Option<Client>,
    url: String,
    sentinel_ms: u32,
}

impl LatencyProbe {
    pub fn new(url: &str, timeout: Duration, sentinel_ms: u32) -> Self {
        let client = match Client::builder().timeout(timeout).build() {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Falha ao criar cliente HTTP da sonda: {e}. Latência fixa em {sentinel_ms}ms");
                None
            }
        };
        Self {
            client,
            url: url.to_owned(),
            sentinel_ms,
        }
    }

    pub fn measure(&self) -> u32 {
        let Some(client) = &self.client else {
            return self.sentinel_ms;
        };
        let start = Instant::now();
        match client.get(&self.url).send() {
            Ok(_response) => {
                let ms = start.elapsed().as_millis();
                u32::try_from(ms).unwrap_or(u32::MAX)
            }
            Err(e) => {
                debug!("Dashboard inalcançável ({}): {e}", self.url);
                self.sentinel_ms
            }
        }
    }
}
