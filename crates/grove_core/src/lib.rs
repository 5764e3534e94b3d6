//! # Grove Core
//!
//! Crate compartilhada pelo nó de borda e pelos monitores de sensor único
//! do kit Grove: registro de telemetria, configuração TOML, capacidades
//! de hardware, alertas e páginas do LCD.
//!
//! ## Módulos
//! - [`types`] – Registro plano de telemetria e leituras
//! - [`protocol`] – Evento `telemetry_stream` e codificação JSON
//! - [`config`] – Configuração unificada via TOML
//! - [`hardware`] – Traits de dispositivo, registro e backend simulado
//! - [`alerts`] – Limites e avaliação com prioridade fixa
//! - [`display`] – Rotação de páginas do LCD 16x2
//! - [`status`] – Faixas de status dos monitores
//! - [`pacing`] – Pausa entre ciclos interrompível

pub mod types;
pub mod protocol;
pub mod config;
pub mod hardware;
pub mod alerts;
pub mod display;
pub mod status;
pub mod pacing;

// Re-exports convenientes
pub use types::{EnvReadings, HostStats, TelemetryRecord};
pub use protocol::{TELEMETRY_EVENT, encode_record};
pub use config::{NodeConfig, Variant};
pub use hardware::{DeviceRegistry, DriverBackend};
