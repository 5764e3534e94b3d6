//! Dublês de teste para dispositivos, métricas e dashboard.

use crate::link::{LinkError, TelemetrySink};
use crate::stats::HostStatsSource;
use grove_core::hardware::{AnalogSensor, ClimateSensor, DeviceError, Switch, TextDisplay};
use grove_core::types::{ClimateReading, HostStats, TelemetryRecord};
use std::cell::RefCell;
use std::rc::Rc;

pub struct FixedAnalog(pub u32);

impl AnalogSensor for FixedAnalog {
    fn read(&mut self) -> Result<u32, DeviceError> {
        Ok(self.0)
    }
}

/// `(umidade, temperatura)`, na ordem do driver.
pub struct FixedClimate(pub f32, pub f32);

impl ClimateSensor for FixedClimate {
    fn read(&mut self) -> Result<ClimateReading, DeviceError> {
        Ok(ClimateReading {
            humidity: self.0,
            temperature: self.1,
        })
    }
}

pub struct FailingClimate;

impl ClimateSensor for FailingClimate {
    fn read(&mut self) -> Result<ClimateReading, DeviceError> {
        Err(DeviceError::Read("timeout do DHT".into()))
    }
}

/// Falha só na primeira leitura.
#[derive(Default)]
pub struct FlakyAnalog {
    pub value: u32,
    calls: u32,
}

impl FlakyAnalog {
    pub fn new(value: u32) -> Self {
        Self { value, calls: 0 }
    }
}

impl AnalogSensor for FlakyAnalog {
    fn read(&mut self) -> Result<u32, DeviceError> {
        self.calls += 1;
        if self.calls == 1 {
            return Err(DeviceError::Read("ADC ocupado".into()));
        }
        Ok(self.value)
    }
}

#[derive(Default)]
pub struct RecordingSwitch {
    log: Rc<RefCell<Vec<bool>>>,
}

impl RecordingSwitch {
    pub fn log(&self) -> Rc<RefCell<Vec<bool>>> {
        Rc::clone(&self.log)
    }
}

impl Switch for RecordingSwitch {
    fn write(&mut self, on: bool) -> Result<(), DeviceError> {
        self.log.borrow_mut().push(on);
        Ok(())
    }
}

pub struct BrokenSwitch;

impl Switch for BrokenSwitch {
    fn write(&mut self, _on: bool) -> Result<(), DeviceError> {
        Err(DeviceError::Write("GPIO não exportado".into()))
    }
}

#[derive(Debug, Default)]
pub struct Screen {
    pub rows: [String; 2],
    pub cursor: u8,
    pub clears: u32,
}

#[derive(Default)]
pub struct RecordingLcd {
    screen: Rc<RefCell<Screen>>,
}

impl RecordingLcd {
    pub fn screen(&self) -> Rc<RefCell<Screen>> {
        Rc::clone(&self.screen)
    }
}

impl TextDisplay for RecordingLcd {
    fn set_cursor(&mut self, row: u8, _col: u8) -> Result<(), DeviceError> {
        self.screen.borrow_mut().cursor = row;
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<(), DeviceError> {
        let mut screen = self.screen.borrow_mut();
        let row = usize::from(screen.cursor);
        screen.rows[row] = text.to_owned();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DeviceError> {
        let mut screen = self.screen.borrow_mut();
        screen.rows = Default::default();
        screen.clears += 1;
        Ok(())
    }
}

pub struct FixedStats(pub HostStats);

impl HostStatsSource for FixedStats {
    fn sample(&mut self) -> HostStats {
        self.0
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub sent: Rc<RefCell<Vec<TelemetryRecord>>>,
    pub disconnects: Rc<RefCell<u32>>,
    pub fail_emit: bool,
    pub fail_disconnect: bool,
}

impl TelemetrySink for RecordingSink {
    fn emit(&mut self, record: &TelemetryRecord) -> Result<(), LinkError> {
        if self.fail_emit {
            return Err(LinkError::Emit("socket fechado".into()));
        }
        self.sent.borrow_mut().push(record.clone());
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), LinkError> {
        *self.disconnects.borrow_mut() += 1;
        if self.fail_disconnect {
            return Err(LinkError::Disconnect("já desconectado".into()));
        }
        Ok(())
    }
}
