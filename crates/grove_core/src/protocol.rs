//! Protocolo de telemetria com o dashboard.
//!
//! O nó emite um único evento Socket.IO, [`TELEMETRY_EVENT`], cujo argumento
//! é o registro plano serializado como objeto JSON:
//!
//! ```text
//! telemetry_stream {"id": "Pi-1", "name": "Team Alpha", "cpu": 12.5,
//!                   "temp": 48.3, "latency": 7, "moisture": 420, ...}
//! ```
//!
//! Campos de sensores ausentes simplesmente não aparecem no objeto.

use crate::types::TelemetryRecord;
use serde_json::Value;

/// Nome do evento que carrega o registro.
pub const TELEMETRY_EVENT: &str = "telemetry_stream";

/// Erros do protocolo.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("Erro de serialização: {0}")]
    Serialize(String),

    #[error("Campo obrigatório vazio: {0}")]
    EmptyField(&'static str),
}

/// Codifica um [`TelemetryRecord`] como argumento do evento.
pub fn encode_record(record: &TelemetryRecord) -> Result<Value, ProtocolError> {
    if record.id.is_empty() {
        return Err(ProtocolError::EmptyField("id"));
    }
    serde_json::to_value(record).map_err(|e| ProtocolError::Serialize(e.to_string()))
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────
