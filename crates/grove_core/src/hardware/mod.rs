//! Capacidades de hardware e vínculo de dispositivos.
//!
//! Os drivers ficam atrás de traits pequenas ([`AnalogSensor`],
//! [`ClimateSensor`], [`Switch`], [`TextDisplay`]). Um [`DriverBackend`]
//! constrói os handles; o [`DeviceRegistry`] é montado uma vez na partida
//! e nunca revinculado.

pub mod simulated;

use crate::config::PortConfig;
use crate::types::{ClimateReading, DhtKind};
use std::fmt;
use tracing::{debug, info, warn};

/// Falha de um único dispositivo. Nunca é fatal.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("inicialização falhou: {0}")]
    Init(String),

    #[error("leitura falhou: {0}")]
    Read(String),

    #[error("escrita falhou: {0}")]
    Write(String),
}

/// Falha fatal de partida.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    #[error("biblioteca de drivers '{0}' indisponível (disponíveis: {known})", known = KNOWN_BACKENDS.join(", "))]
    DriverUnavailable(String),
}

/// Backends compilados neste binário.
pub const KNOWN_BACKENDS: &[&str] = &[simulated::BACKEND_NAME];

/// Resolve o backend pelo nome configurado.
pub fn backend_by_name(name: &str) -> Result<Box<dyn DriverBackend>, BindError> {
    match name.trim().to_lowercase().as_str() {
        simulated::BACKEND_NAME => Ok(Box::new(simulated::SimulatedBackend::new())),
        _ => Err(BindError::DriverUnavailable(name.to_owned())),
    }
}

// ──────────────────────────────────────────────
// Capacidades
// ──────────────────────────────────────────────

/// Sensor analógico de valor único (solo, luz).
pub trait AnalogSensor {
    fn read(&mut self) -> Result<u32, DeviceError>;
}

/// Sensor de temperatura e umidade.
pub trait ClimateSensor {
    fn read(&mut self) -> Result<ClimateReading, DeviceError>;
}

/// Saída binária (LED, buzzer).
pub trait Switch {
    fn write(&mut self, on: bool) -> Result<(), DeviceError>;
}

/// Display de texto em linhas.
pub trait TextDisplay {
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DeviceError>;
    fn write(&mut self, text: &str) -> Result<(), DeviceError>;
    fn clear(&mut self) -> Result<(), DeviceError>;
}

/// Fábrica de handles de dispositivo.
pub trait DriverBackend {
    fn name(&self) -> &'static str;
    fn moisture_sensor(&self, port: u8) -> Result<Box<dyn AnalogSensor>, DeviceError>;
    fn light_sensor(&self, port: u8) -> Result<Box<dyn AnalogSensor>, DeviceError>;
    fn climate_sensor(&self, kind: DhtKind, port: u8) -> Result<Box<dyn ClimateSensor>, DeviceError>;
    fn switch(&self, port: u8) -> Result<Box<dyn Switch>, DeviceError>;
    fn display(&self) -> Result<Box<dyn TextDisplay>, DeviceError>;
}

// ──────────────────────────────────────────────
// Registro
// ──────────────────────────────────────────────

/// Posição lógica de um dispositivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceSlot {
    Moisture,
    Light,
    Climate,
    Led,
    Buzzer,
    Display,
}

impl DeviceSlot {
    pub const ALL: [DeviceSlot; 6] = [
        DeviceSlot::Moisture,
        DeviceSlot::Light,
        DeviceSlot::Climate,
        DeviceSlot::Led,
        DeviceSlot::Buzzer,
        DeviceSlot::Display,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DeviceSlot::Moisture => "moisture",
            DeviceSlot::Light => "light",
            DeviceSlot::Climate => "dht",
            DeviceSlot::Led => "led",
            DeviceSlot::Buzzer => "buzzer",
            DeviceSlot::Display => "lcd",
        }
    }
}

impl fmt::Display for DeviceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handles vinculados na partida. Slot vazio = dispositivo ausente.
#[derive(Default)]
pub struct DeviceRegistry {
    moisture: Option<Box<dyn AnalogSensor>>,
    light: Option<Box<dyn AnalogSensor>>,
    climate: Option<Box<dyn ClimateSensor>>,
    led: Option<Box<dyn Switch>>,
    buzzer: Option<Box<dyn Switch>>,
    display: Option<Box<dyn TextDisplay>>,
}

impl DeviceRegistry {
    /// Constrói um handle para cada porta configurada.
    ///
    /// Porta ausente pula o dispositivo; falha de construção é logada e o
    /// slot fica vazio.
    pub fn bind(ports: &PortConfig, backend: &dyn DriverBackend) -> Self {
        info!("Vinculando dispositivos (backend: {})", backend.name());

        Self {
            moisture: bind_slot(DeviceSlot::Moisture, ports.moisture, |p| {
                backend.moisture_sensor(p).map(|s| (s, format!("A{p}")))
            }),
            light: bind_slot(DeviceSlot::Light, ports.light, |p| {
                backend.light_sensor(p).map(|s| (s, format!("A{p}")))
            }),
            climate: bind_slot(DeviceSlot::Climate, ports.dht, |p| {
                backend
                    .climate_sensor(ports.dht_kind, p)
                    .map(|s| (s, format!("D{p} ({})", ports.dht_kind.label())))
            }),
            led: bind_slot(DeviceSlot::Led, ports.led, |p| {
                backend.switch(p).map(|s| (s, format!("D{p}")))
            }),
            buzzer: bind_slot(DeviceSlot::Buzzer, ports.buzzer, |p| {
                backend.switch(p).map(|s| (s, format!("D{p}")))
            }),
            display: bind_slot(DeviceSlot::Display, ports.display.as_ref().map(|_| ()), |_| {
                backend.display().map(|d| (d, "I2C".to_string()))
            }),
        }
    }

    pub fn with_moisture(mut self, sensor: Box<dyn AnalogSensor>) -> Self {
        self.moisture = Some(sensor);
        self
    }

    pub fn with_light(mut self, sensor: Box<dyn AnalogSensor>) -> Self {
        self.light = Some(sensor);
        self
    }

    pub fn with_climate(mut self, sensor: Box<dyn ClimateSensor>) -> Self {
        self.climate = Some(sensor);
        self
    }

    pub fn with_led(mut self, led: Box<dyn Switch>) -> Self {
        self.led = Some(led);
        self
    }

    pub fn with_buzzer(mut self, buzzer: Box<dyn Switch>) -> Self {
        self.buzzer = Some(buzzer);
        self
    }

    pub fn with_display(mut self, display: Box<dyn TextDisplay>) -> Self {
        self.display = Some(display);
        self
    }

    pub fn is_bound(&self, slot: DeviceSlot) -> bool {
        match slot {
            DeviceSlot::Moisture => self.moisture.is_some(),
            DeviceSlot::Light => self.light.is_some(),
            DeviceSlot::Climate => self.climate.is_some(),
            DeviceSlot::Led => self.led.is_some(),
            DeviceSlot::Buzzer => self.buzzer.is_some(),
            DeviceSlot::Display => self.display.is_some(),
        }
    }

    pub fn bound_slots(&self) -> Vec<DeviceSlot> {
        DeviceSlot::ALL
            .into_iter()
            .filter(|s| self.is_bound(*s))
            .collect()
    }

    /// `None` se o sensor não está vinculado.
    pub fn read_moisture(&mut self) -> Option<Result<u32, DeviceError>> {
        self.moisture.as_mut().map(|s| s.read())
    }

    pub fn read_light(&mut self) -> Option<Result<u32, DeviceError>> {
        self.light.as_mut().map(|s| s.read())
    }

    pub fn read_climate(&mut self) -> Option<Result<ClimateReading, DeviceError>> {
        self.climate.as_mut().map(|s| s.read())
    }

    pub fn set_led(&mut self, on: bool) -> Option<Result<(), DeviceError>> {
        self.led.as_mut().map(|l| l.write(on))
    }

    pub fn set_buzzer(&mut self, on: bool) -> Option<Result<(), DeviceError>> {
        self.buzzer.as_mut().map(|b| b.write(on))
    }

    pub fn display(&mut self) -> Option<&mut Box<dyn TextDisplay>> {
        self.display.as_mut()
    }
}

impl fmt::Debug for DeviceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceRegistry")
            .field("bound", &self.bound_slots())
            .finish()
    }
}

fn bind_slot<P, T>(
    slot: DeviceSlot,
    port: Option<P>,
    open: impl FnOnce(P) -> Result<(T, String), DeviceError>,
) -> Option<T> {
    let Some(port) = port else {
        debug!("{slot}: sem porta configurada, ignorado");
        return None;
    };
    match open(port) {
        Ok((handle, location)) => {
            info!("✓ {slot} ativo em {location}");
            Some(handle)
        }
        Err(e) => {
            warn!("✗ {slot}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend que falha só para o sensor de luz.
    struct FlakyLightBackend;

    struct Fixed(u32);

    impl AnalogSensor for Fixed {
        fn read(&mut self) -> Result<u32, DeviceError> {
            Ok(self.0)
        }
    }

    impl DriverBackend for FlakyLightBackend {
        fn name(&self) -> &'static str {
            "flaky-light"
        }
        fn moisture_sensor(&self, _port: u8) -> Result<Box<dyn AnalogSensor>, DeviceError> {
            Ok(Box::new(Fixed(700)))
        }
        fn light_sensor(&self, port: u8) -> Result<Box<dyn AnalogSensor>, DeviceError> {
            Err(DeviceError::Init(format!("nada responde em A{port}")))
        }
        fn climate_sensor(&self, kind: DhtKind, port: u8) -> Result<Box<dyn ClimateSensor>, DeviceError> {
            simulated::SimulatedBackend::new().climate_sensor(kind, port)
        }
        fn switch(&self, port: u8) -> Result<Box<dyn Switch>, DeviceError> {
            simulated::SimulatedBackend::new().switch(port)
        }
        fn display(&self) -> Result<Box<dyn TextDisplay>, DeviceError> {
            simulated::SimulatedBackend::new().display()
        }
    }

    #[test]
    fn unknown_backend_is_fatal() {
        let err = backend_by_name("grove.py").err().unwrap();
        assert!(matches!(err, BindError::DriverUnavailable(ref n) if n == "grove.py"));
    }

    #[test]
    fn known_backend_resolves_case_insensitively() {
        let backend = backend_by_name("Simulated").unwrap();
        assert_eq!(backend.name(), simulated::BACKEND_NAME);
    }

    #[test]
    fn unconfigured_ports_stay_unbound() {
        let ports = PortConfig {
            moisture: Some(0),
            ..Default::default()
        };
        let mut registry = DeviceRegistry::bind(&ports, &FlakyLightBackend);
        assert_eq!(registry.bound_slots(), vec![DeviceSlot::Moisture]);
        assert!(registry.read_light().is_none());
        assert_eq!(registry.read_moisture().unwrap().unwrap(), 700);
    }

    #[test]
    fn construction_failure_leaves_slot_empty() {
        let ports = PortConfig {
            moisture: Some(0),
            light: Some(2),
            dht: Some(5),
            led: Some(18),
            buzzer: Some(16),
            display: Some("I2C".into()),
            ..Default::default()
        };
        let registry = DeviceRegistry::bind(&ports, &FlakyLightBackend);
        assert!(!registry.is_bound(DeviceSlot::Light));
        assert_eq!(registry.bound_slots().len(), 5);
    }
}
