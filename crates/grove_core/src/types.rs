//! Definição de tipos para telemetria do nó.
//!
//! O registro enviado ao dashboard é um mapa plano: campos fixos de
//! identificação e saúde do host, mais campos opcionais por sensor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ──────────────────────────────────────────────
// Host
// ──────────────────────────────────────────────

/// Métricas do host coletadas a cada ciclo.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HostStats {
    /// Uso total da CPU (0–100%)
    pub cpu: f32,
    /// Temperatura da CPU (°C, 1 casa decimal). 0.0 se indisponível.
    pub temp: f32,
    /// Latência até o dashboard (ms), ou o sentinela de falha
    pub latency_ms: u32,
}

// ──────────────────────────────────────────────
// Sensores
// ──────────────────────────────────────────────

/// Modelo do sensor DHT.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DhtKind {
    /// Azul
    #[default]
    #[serde(alias = "blue", alias = "11")]
    Dht11,
    /// Branco (Pro)
    #[serde(alias = "white", alias = "22")]
    Dht22,
}

impl DhtKind {
    pub fn label(self) -> &'static str {
        match self {
            DhtKind::Dht11 => "DHT11",
            DhtKind::Dht22 => "DHT22",
        }
    }
}

impl FromStr for DhtKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "blue" | "11" | "dht11" => Ok(DhtKind::Dht11),
            "white" | "22" | "dht22" => Ok(DhtKind::Dht22),
            other => Err(format!("tipo de DHT desconhecido: {other} (use blue ou white)")),
        }
    }
}

/// Leitura do sensor de temperatura/umidade.
///
/// O driver devolve `(umidade, temperatura)`; aqui os campos são nomeados.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateReading {
    /// Umidade relativa (%)
    pub humidity: f32,
    /// Temperatura ambiente (°C)
    pub temperature: f32,
}

impl ClimateReading {
    /// DHTs costumam devolver NaN durante o aquecimento.
    pub fn is_valid(&self) -> bool {
        !self.humidity.is_nan() && !self.temperature.is_nan()
    }
}

/// Leituras ambientais de um ciclo.
///
/// `None` significa sensor não vinculado ou leitura que falhou neste ciclo.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnvReadings {
    pub moisture: Option<u32>,
    pub light: Option<u32>,
    pub env_temp: Option<f32>,
    pub env_humidity: Option<f32>,
}

impl EnvReadings {
    /// Substitui campos ausentes por zero.
    pub fn zero_filled(self) -> Self {
        Self {
            moisture: Some(self.moisture.unwrap_or(0)),
            light: Some(self.light.unwrap_or(0)),
            env_temp: Some(self.env_temp.unwrap_or(0.0)),
            env_humidity: Some(self.env_humidity.unwrap_or(0.0)),
        }
    }
}

// ──────────────────────────────────────────────
// Registro de telemetria
// ──────────────────────────────────────────────

/// Estado do nó reportado pela variante com alertas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeStatus {
    Online,
    Alert,
}

/// Registro plano emitido uma vez por ciclo no evento `telemetry_stream`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub id: String,
    pub name: String,
    pub cpu: f32,
    pub temp: f32,
    pub latency: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moisture: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_temp: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_humidity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<NodeStatus>,
}

impl TelemetryRecord {
    pub fn new(id: &str, name: &str, host: HostStats, env: EnvReadings) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            cpu: host.cpu,
            temp: host.temp,
            latency: host.latency_ms,
            moisture: env.moisture,
            light: env.light,
            env_temp: env.env_temp,
            env_humidity: env.env_humidity,
            status: None,
        }
    }

    pub fn with_status(mut self, status: NodeStatus) -> Self {
        self.status = Some(status);
        self
    }
}

impl fmt::Display for TelemetryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{self:?}"),
        }
    }
}

/// Formata uma leitura como o LCD e as mensagens mostram:
/// inteiros sem casas decimais, o resto com uma casa.
pub fn fmt_reading(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> HostStats {
        HostStats {
            cpu: 12.5,
            temp: 48.3,
            latency_ms: 7,
        }
    }

    #[test]
    fn unbound_fields_are_not_serialized() {
        let env = EnvReadings {
            moisture: Some(420),
            ..Default::default()
        };
        let record = TelemetryRecord::new("Pi-1", "Team Alpha", host(), env);
        let json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj["id"], "Pi-1");
        assert_eq!(obj["latency"], 7);
        assert_eq!(obj["moisture"], 420);
        assert!(!obj.contains_key("light"));
        assert!(!obj.contains_key("env_temp"));
        assert!(!obj.contains_key("env_humidity"));
        assert!(!obj.contains_key("status"));
    }

    #[test]
    fn zero_filled_keeps_present_values() {
        let env = EnvReadings {
            light: Some(310),
            ..Default::default()
        }
        .zero_filled();
        assert_eq!(env.light, Some(310));
        assert_eq!(env.moisture, Some(0));
        assert_eq!(env.env_temp, Some(0.0));
        assert_eq!(env.env_humidity, Some(0.0));
    }

    #[test]
    fn status_uses_uppercase_on_the_wire() {
        let record = TelemetryRecord::new("n", "t", host(), EnvReadings::default())
            .with_status(NodeStatus::Alert);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "ALERT");
    }

    #[test]
    fn dht_kind_accepts_colour_names() {
        assert_eq!("blue".parse::<DhtKind>().unwrap(), DhtKind::Dht11);
        assert_eq!("White".parse::<DhtKind>().unwrap(), DhtKind::Dht22);
        assert!("green".parse::<DhtKind>().is_err());
    }

    #[test]
    fn nan_climate_reading_is_invalid() {
        let r = ClimateReading {
            humidity: f32::NAN,
            temperature: 22.0,
        };
        assert!(!r.is_valid());
    }

    #[test]
    fn reading_format() {
        assert_eq!(fmt_reading(29.0), "29");
        assert_eq!(fmt_reading(29.5), "29.5");
    }
}
