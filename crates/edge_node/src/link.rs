//! Conexão persistente com o dashboard (Socket.IO).
//!
//! Envio best-effort: sem confirmação, sem fila, sem reenvio.

use grove_core::protocol::{ProtocolError, TELEMETRY_EVENT, encode_record};
use grove_core::types::TelemetryRecord;
use rust_socketio::client::Client;
use rust_socketio::{ClientBuilder, Payload, RawClient};
use tracing::{info, warn};

/// Erros da conexão com o dashboard.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("Falha ao conectar em {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("Falha ao emitir telemetry_stream: {0}")]
    Emit(String),

    #[error("Falha ao desconectar: {0}")]
    Disconnect(String),

    #[error(transparent)]
    Encode(#[from] ProtocolError),
}

/// Destino dos registros de telemetria.
pub trait TelemetrySink {
    fn emit(&mut self, record: &TelemetryRecord) -> Result<(), LinkError>;
    fn disconnect(&mut self) -> Result<(), LinkError>;
}

/// Cliente Socket.IO conectado ao dashboard.
pub struct DashboardLink {
    client: Client,
}

impl DashboardLink {
    pub fn connect(url: &str) -> Result<Self, LinkError> {
        let client = ClientBuilder::new(url)
            .on("error", |err: Payload, _socket: RawClient| {
                warn!("Erro na conexão com o dashboard: {err:?}");
            })
            .connect()
            .map_err(|e| LinkError::Connect {
                url: url.to_owned(),
                reason: e.to_string(),
            })?;
        info!("🟢 Conectado ao dashboard em {url}");
        Ok(Self { client })
    }
}

impl TelemetrySink for DashboardLink {
    fn emit(&mut self, record: &TelemetryRecord) -> Result<(), LinkError> {
        let value = encode_record(record)?;
        self.client
            .emit(TELEMETRY_EVENT, Payload::Text(vec![value]))
            .map_err(|e| LinkError::Emit(e.to_string()))
    }

    fn disconnect(&mut self) -> Result<(), LinkError> {
        self.client
            .disconnect()
            .map_err(|e| LinkError::Disconnect(e.to_string()))
    }
}
