//! Backend simulado – permite rodar o nó e os monitores sem o kit.
//!
//! As leituras variam devagar e de forma determinística a partir de um
//! contador por dispositivo. O DHT falha periodicamente, como o real.

use super::{AnalogSensor, ClimateSensor, DeviceError, DriverBackend, Switch, TextDisplay};
use crate::display::LCD_COLUMNS;
use crate::types::{ClimateReading, DhtKind};
use tracing::debug;

pub const BACKEND_NAME: &str = "simulated";

/// A cada N leituras o DHT simulado devolve erro.
pub const CLIMATE_FAILURE_EVERY: u64 = 7;

/// Maior porta aceita (Grove Base Hat).
const MAX_PORT: u8 = 26;

#[derive(Debug, Default)]
pub struct SimulatedBackend;

impl SimulatedBackend {
    pub fn new() -> Self {
        Self
    }
}

fn check_port(port: u8) -> Result<(), DeviceError> {
    if port > MAX_PORT {
        return Err(DeviceError::Init(format!("porta {port} não existe no Base Hat")));
    }
    Ok(())
}

/// Onda lenta entre `base - amp` e `base + amp`.
fn wave(tick: u64, period: f64, base: f64, amp: f64) -> f64 {
    base + amp * (tick as f64 * std::f64::consts::TAU / period).sin()
}

impl DriverBackend for SimulatedBackend {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn moisture_sensor(&self, port: u8) -> Result<Box<dyn AnalogSensor>, DeviceError> {
        check_port(port)?;
        Ok(Box::new(SimAnalog {
            tick: u64::from(port) * 5,
            period: 120.0,
            base: 650.0,
            amp: 450.0,
        }))
    }

    fn light_sensor(&self, port: u8) -> Result<Box<dyn AnalogSensor>, DeviceError> {
        check_port(port)?;
        Ok(Box::new(SimAnalog {
            tick: u64::from(port) * 5,
            period: 90.0,
            base: 400.0,
            amp: 300.0,
        }))
    }

    fn climate_sensor(&self, kind: DhtKind, port: u8) -> Result<Box<dyn ClimateSensor>, DeviceError> {
        check_port(port)?;
        Ok(Box::new(SimClimate { kind, tick: 0 }))
    }

    fn switch(&self, port: u8) -> Result<Box<dyn Switch>, DeviceError> {
        check_port(port)?;
        Ok(Box::new(SimSwitch { port, on: false }))
    }

    fn display(&self) -> Result<Box<dyn TextDisplay>, DeviceError> {
        Ok(Box::new(SimLcd::default()))
    }
}

struct SimAnalog {
    tick: u64,
    period: f64,
    base: f64,
    amp: f64,
}

impl AnalogSensor for SimAnalog {
    fn read(&mut self) -> Result<u32, DeviceError> {
        self.tick += 1;
        Ok(wave(self.tick, self.period, self.base, self.amp).max(0.0).round() as u32)
    }
}

struct SimClimate {
    kind: DhtKind,
    tick: u64,
}

impl ClimateSensor for SimClimate {
    fn read(&mut self) -> Result<ClimateReading, DeviceError> {
        self.tick += 1;
        if self.tick % CLIMATE_FAILURE_EVERY == 0 {
            return Err(DeviceError::Read(format!(
                "{}: checksum inválido",
                self.kind.label()
            )));
        }
        let temperature = wave(self.tick, 60.0, 25.0, 5.0) as f32;
        let humidity = wave(self.tick + 15, 80.0, 60.0, 25.0) as f32;
        // DHT11 só tem resolução inteira
        let reading = match self.kind {
            DhtKind::Dht11 => ClimateReading {
                humidity: humidity.round(),
                temperature: temperature.round(),
            },
            DhtKind::Dht22 => ClimateReading {
                humidity: (humidity * 10.0).round() / 10.0,
                temperature: (temperature * 10.0).round() / 10.0,
            },
        };
        Ok(reading)
    }
}

struct SimSwitch {
    port: u8,
    on: bool,
}

impl Switch for SimSwitch {
    fn write(&mut self, on: bool) -> Result<(), DeviceError> {
        if self.on != on {
            debug!("D{} → {}", self.port, u8::from(on));
        }
        self.on = on;
        Ok(())
    }
}

#[derive(Default)]
struct SimLcd {
    rows: [String; 2],
    cursor: (u8, u8),
}

impl TextDisplay for SimLcd {
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DeviceError> {
        if row > 1 || usize::from(col) >= LCD_COLUMNS {
            return Err(DeviceError::Write(format!("cursor fora da tela: ({row}, {col})")));
        }
        self.cursor = (row, col);
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<(), DeviceError> {
        let (row, col) = self.cursor;
        let line = &mut self.rows[usize::from(row)];
        let mut chars: Vec<char> = format!("{:<width$}", line, width = LCD_COLUMNS).chars().collect();
        for (i, c) in text.chars().enumerate() {
            let at = usize::from(col) + i;
            if at >= LCD_COLUMNS {
                break;
            }
            chars[at] = c;
        }
        *line = chars.into_iter().take(LCD_COLUMNS).collect();
        debug!("LCD[{row}] |{line}|");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DeviceError> {
        self.rows = Default::default();
        self.cursor = (0, 0);
        debug!("LCD limpo");
        Ok(())
    }
}
