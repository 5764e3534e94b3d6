//! # Grove Edge Node
//!
//! Lê os sensores do kit Grove e as métricas do host, e transmite um
//! registro plano por ciclo ao dashboard via Socket.IO.
//!
//! ## Uso
//! ```bash
//! edge_node                              # node.toml ao lado do executável
//! edge_node --config node.toml
//! edge_node --variant solution           # alertas + LED/buzzer + LCD
//! edge_node --server http://10.0.0.5:5000
//! ```

mod actuate;
mod link;
mod node;
mod reader;
mod stats;
#[cfg(test)]
mod testing;

use clap::Parser;
use grove_core::config::{NodeConfig, Variant};
use grove_core::hardware::{DeviceRegistry, backend_by_name};
use link::DashboardLink;
use node::EdgeNode;
use stats::SystemStats;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};

/// Nó de borda do kit Grove
#[derive(Parser, Debug)]
#[command(version, about = "Grove edge node – streams sensor telemetry to the dashboard", long_about = None)]
struct Cli {
    /// Arquivo de configuração TOML
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Variante do loop: edge ou solution
    #[arg(long)]
    variant: Option<Variant>,

    /// URL do dashboard (sobrepõe a configuração)
    #[arg(long)]
    server: Option<String>,
}

fn main() -> ExitCode {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // ── Carregar config ──
    let config_path = cli.config.clone().unwrap_or_else(NodeConfig::default_path);
    let mut config = NodeConfig::load(&config_path);

    // Salva config padrão se não existir
    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            warn!("Não foi possível salvar config padrão: {e}");
        }
    }

    if let Some(variant) = cli.variant {
        config.node.variant = variant;
    }
    if let Some(server) = cli.server {
        config.node.server_url = server;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("Configuração inválida: {e}");
        }
        return ExitCode::FAILURE;
    }
    // Daqui em diante a configuração é só leitura
    let config = config;

    // ── Banner ──
    println!();
    println!("══════════════════════════════════════════════");
    println!("   🚀 GROVE EDGE NODE – {}", config.node.team_name);
    println!("══════════════════════════════════════════════");
    println!("  Nó:        {}", config.node.node_id);
    println!("  Dashboard: {}", config.node.server_url);
    println!("  Variante:  {:?}", config.node.variant);
    println!("  Intervalo: {:.1}s", config.interval().as_secs_f64());
    println!("══════════════════════════════════════════════");
    println!();

    // ── Hardware ──
    let backend = match backend_by_name(&config.hardware.backend) {
        Ok(backend) => backend,
        Err(e) => {
            error!("⚠️  CRÍTICO: {e}");
            return ExitCode::FAILURE;
        }
    };
    let devices = DeviceRegistry::bind(&config.ports, backend.as_ref());
    if config.node.variant == Variant::Solution && devices.bound_slots().is_empty() {
        warn!("Nenhum dispositivo vinculado; alertas usarão leituras zeradas");
    }

    let stats = SystemStats::new(&config);

    // ── Dashboard ──
    info!("📡 Conectando ao dashboard em {}...", config.node.server_url);
    let link = match DashboardLink::connect(&config.node.server_url) {
        Ok(link) => link,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // ── Ctrl-C ──
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = Arc::clone(&stop);
    if let Err(e) = ctrlc::set_handler(move || stop_flag.store(true, Ordering::Relaxed)) {
        warn!("Falha ao instalar handler de Ctrl-C: {e}");
    }

    // ── Loop principal ──
    let mut node = EdgeNode::new(&config, devices, stats, link);
    info!("Dispositivos ativos: {:?}", node.devices());
    let summary = node.run(&stop);
    info!(
        "{} ciclos executados ({} com alerta)",
        summary.cycles, summary.alarm_cycles
    );
    if summary.failed_sends > 0 {
        warn!("{} envio(s) ao dashboard falharam", summary.failed_sends);
    }

    let failures = node.shutdown();
    if failures > 0 {
        warn!("{failures} passo(s) do encerramento falharam");
    }

    ExitCode::SUCCESS
}
