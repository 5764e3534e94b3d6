//! Configuração do nó via TOML.
//!
//! Um único `node.toml` substitui o bloco de constantes editado à mão.
//! É carregado uma vez na partida e só lido depois disso.

use crate::types::DhtKind;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Erros de persistência da configuração.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Erro de E/S em {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Erro ao parsear {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Erro ao serializar configuração: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Variante do loop do nó.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Só transmite telemetria.
    #[default]
    Edge,
    /// Transmite, avalia alertas e controla LED, buzzer e LCD.
    Solution,
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "edge" => Ok(Variant::Edge),
            "solution" => Ok(Variant::Solution),
            other => Err(format!("variante desconhecida: {other} (use edge ou solution)")),
        }
    }
}

/// Identidade do nó e endereço do dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSection {
    /// URL do dashboard (ex: http://192.168.137.1:5000)
    pub server_url: String,
    /// Nome exibido no dashboard e no LCD
    pub team_name: String,
    /// Identificador único do nó
    pub node_id: String,
    pub variant: Variant,
    /// Pausa entre ciclos (vazio = 1.0s edge, 1.5s solution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_secs: Option<f64>,
}

impl Default for NodeSection {
    fn default() -> Self {
        Self {
            server_url: "http://192.168.137.1:5000".into(),
            team_name: "Team Alpha".into(),
            node_id: "Pi-1".into(),
            variant: Variant::Edge,
            interval_secs: None,
        }
    }
}

/// Portas dos dispositivos. Porta ausente = dispositivo não usado.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortConfig {
    /// Porta analógica (0 = A0)
    #[serde(deserialize_with = "port_or_none", skip_serializing_if = "Option::is_none")]
    pub moisture: Option<u8>,
    /// Porta analógica (2 = A2)
    #[serde(deserialize_with = "port_or_none", skip_serializing_if = "Option::is_none")]
    pub light: Option<u8>,
    /// Porta digital (5 = D5)
    #[serde(deserialize_with = "port_or_none", skip_serializing_if = "Option::is_none")]
    pub dht: Option<u8>,
    pub dht_kind: DhtKind,
    #[serde(deserialize_with = "port_or_none", skip_serializing_if = "Option::is_none")]
    pub led: Option<u8>,
    #[serde(deserialize_with = "port_or_none", skip_serializing_if = "Option::is_none")]
    pub buzzer: Option<u8>,
    /// "I2C" para o LCD
    #[serde(deserialize_with = "label_or_none", skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// Limites estáticos de alerta (comparação estritamente maior).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    /// °C
    pub temp_limit: f32,
    /// %
    pub humidity_limit: f32,
    pub moisture_limit: u32,
    pub light_limit: u32,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            temp_limit: 28.0,
            humidity_limit: 80.0,
            moisture_limit: 1200,
            light_limit: 600,
        }
    }
}

/// Fontes das métricas do host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Arquivo com a temperatura em milésimos de grau
    pub thermal_path: String,
    /// Timeout da sonda de latência (vazio = 500ms edge, 100ms solution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe_timeout_ms: Option<u64>,
    /// Latência reportada quando o dashboard não responde
    pub unreachable_latency_ms: u32,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            thermal_path: "/sys/class/thermal/thermal_zone0/temp".into(),
            probe_timeout_ms: None,
            unreachable_latency_ms: 999,
        }
    }
}

/// Seleção do backend de drivers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    pub backend: String,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            backend: "simulated".into(),
        }
    }
}

/// Configuração raiz do nó.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub node: NodeSection,
    pub ports: PortConfig,
    pub thresholds: AlertThresholds,
    pub stats: StatsConfig,
    pub hardware: HardwareConfig,
}

impl NodeConfig {
    /// Carrega configuração de um arquivo TOML, com padrões em caso de erro.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match Self::read(path) {
                Ok(config) => {
                    info!("Configuração carregada de {}", path.display());
                    return config;
                }
                Err(e) => warn!("{e}"),
            }
        }

        info!("Usando configuração padrão");
        NodeConfig::default()
    }

    /// Lê e parseia um arquivo TOML, propagando o erro.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Salva configuração em arquivo TOML.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Configuração salva em {}", path.display());
        Ok(())
    }

    /// Retorna o caminho padrão do node.toml (ao lado do executável).
    pub fn default_path() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .map(|p| p.parent().unwrap_or(Path::new(".")).to_path_buf())
            .unwrap_or_else(|_| PathBuf::from("."));
        exe_dir.join("node.toml")
    }

    /// Pausa entre ciclos do loop.
    pub fn interval(&self) -> Duration {
        let secs = self.node.interval_secs.unwrap_or(match self.node.variant {
            Variant::Edge => 1.0,
            Variant::Solution => 1.5,
        });
        Duration::from_secs_f64(secs)
    }

    /// Timeout da sonda de latência.
    pub fn probe_timeout(&self) -> Duration {
        let ms = self.stats.probe_timeout_ms.unwrap_or(match self.node.variant {
            Variant::Edge => 500,
            Variant::Solution => 100,
        });
        Duration::from_millis(ms)
    }

    /// Valida a configuração e retorna lista de erros.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let url = &self.node.server_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(format!("URL do dashboard inválida: {url:?} (esperado http:// ou https://)"));
        }
        if self.node.node_id.trim().is_empty() {
            errors.push("node_id não pode ser vazio".into());
        }
        if let Some(secs) = self.node.interval_secs {
            if !(0.1..=60.0).contains(&secs) {
                errors.push(format!("Intervalo inválido: {secs} (0.1–60.0)"));
            }
        }
        if let (Some(led), Some(buzzer)) = (self.ports.led, self.ports.buzzer) {
            if led == buzzer {
                errors.push(format!("LED e buzzer na mesma porta D{led}"));
            }
        }
        if let Some(display) = &self.ports.display {
            if !display.eq_ignore_ascii_case("i2c") {
                errors.push(format!("Display só suporta I2C, recebido {display:?}"));
            }
        }
        if self.stats.probe_timeout_ms == Some(0) {
            errors.push("Timeout da sonda não pode ser 0".into());
        }

        errors
    }
}

/// Normaliza uma porta digitada à mão: "None", "none" ou "" = não usada.
pub fn clean_port(raw: &str) -> Result<Option<u8>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    trimmed
        .parse::<u8>()
        .map(Some)
        .map_err(|_| format!("porta inválida: {raw:?}"))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPort {
    Number(u8),
    Text(String),
}

fn port_or_none<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawPort>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawPort::Number(n)) => Ok(Some(n)),
        Some(RawPort::Text(s)) => clean_port(&s).map_err(de::Error::custom),
    }
}

fn label_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| {
        let s = s.trim();
        !s.is_empty() && !s.eq_ignore_ascii_case("none")
    }))
}
