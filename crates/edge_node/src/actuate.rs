//! Atuadores: LED, buzzer e LCD.
//!
//! Falhas de escrita são logadas e engolidas; o ciclo continua.

use grove_core::display::LcdFrame;
use grove_core::hardware::{DeviceError, DeviceRegistry, DeviceSlot};
use tracing::warn;

/// LED e buzzer espelham o estado do alarme.
pub fn set_alarm(devices: &mut DeviceRegistry, active: bool) {
    report(DeviceSlot::Led, devices.set_led(active));
    report(DeviceSlot::Buzzer, devices.set_buzzer(active));
}

/// Escreve as duas linhas no LCD, se houver um.
pub fn show_frame(devices: &mut DeviceRegistry, frame: &LcdFrame) {
    let Some(lcd) = devices.display() else {
        return;
    };
    let written = frame.lines.iter().enumerate().try_for_each(|(row, line)| {
        lcd.set_cursor(row as u8, 0)?;
        lcd.write(line)
    });
    report(DeviceSlot::Display, Some(written));
}

/// Limpa o LCD, se houver um.
pub fn clear_display(devices: &mut DeviceRegistry) -> Option<Result<(), DeviceError>> {
    devices.display().map(|lcd| lcd.clear())
}

pub(crate) fn report(slot: DeviceSlot, outcome: Option<Result<(), DeviceError>>) {
    if let Some(Err(e)) = outcome {
        warn!("{slot}: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingLcd, RecordingSwitch};

    #[test]
    fn alarm_drives_led_and_buzzer_together() {
        let led = RecordingSwitch::default();
        let buzzer = RecordingSwitch::default();
        let (led_log, buzzer_log) = (led.log(), buzzer.log());
        let mut devices = DeviceRegistry::default()
            .with_led(Box::new(led))
            .with_buzzer(Box::new(buzzer));

        set_alarm(&mut devices, true);
        set_alarm(&mut devices, false);

        assert_eq!(*led_log.borrow(), vec![true, false]);
        assert_eq!(*buzzer_log.borrow(), vec![true, false]);
    }

    #[test]
    fn frame_writes_both_rows_from_column_zero() {
        let lcd = RecordingLcd::default();
        let screen = lcd.screen();
        let mut devices = DeviceRegistry::default().with_display(Box::new(lcd));

        show_frame(&mut devices, &LcdFrame::new("CPU: 3.0%", "Ping: 9ms"));

        let screen = screen.borrow();
        assert_eq!(screen.rows[0].trim_end(), "CPU: 3.0%");
        assert_eq!(screen.rows[1].trim_end(), "Ping: 9ms");
    }

    #[test]
    fn missing_actuators_are_a_no_op() {
        let mut devices = DeviceRegistry::default();
        set_alarm(&mut devices, true);
        show_frame(&mut devices, &LcdFrame::new("a", "b"));
        assert!(clear_display(&mut devices).is_none());
    }
}
