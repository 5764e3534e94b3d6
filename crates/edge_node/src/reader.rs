//! Leitura dos sensores vinculados.
//!
//! Cada sensor é lido de forma independente: a falha de um não impede os
//! outros. O que acontece com o campo que falhou é decidido por
//! [`MissingReading`].

use grove_core::hardware::{DeviceError, DeviceRegistry, DeviceSlot};
use grove_core::types::EnvReadings;
use tracing::warn;

/// Tratamento de campos sem leitura (sensor ausente ou falha).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingReading {
    /// O campo não aparece no registro.
    Omit,
    /// O campo aparece com valor zero.
    Zero,
}

/// Lê todos os sensores vinculados e aplica a política de ausência.
pub fn read_environment(devices: &mut DeviceRegistry, policy: MissingReading) -> EnvReadings {
    let mut env = EnvReadings {
        moisture: settle(DeviceSlot::Moisture, devices.read_moisture()),
        light: settle(DeviceSlot::Light, devices.read_light()),
        ..Default::default()
    };

    if let Some(reading) = settle(DeviceSlot::Climate, devices.read_climate()) {
        if reading.is_valid() {
            env.env_temp = Some(reading.temperature);
            env.env_humidity = Some(reading.humidity);
        } else {
            warn!("{}: leitura NaN descartada", DeviceSlot::Climate);
        }
    }

    match policy {
        MissingReading::Omit => env,
        MissingReading::Zero => env.zero_filled(),
    }
}

/// `None` para sensor não vinculado ou leitura que falhou (logada).
fn settle<T>(slot: DeviceSlot, outcome: Option<Result<T, DeviceError>>) -> Option<T> {
    match outcome? {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{slot}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingClimate, FixedAnalog, FixedClimate};

    #[test]
    fn unbound_sensors_are_omitted() {
        let mut devices = DeviceRegistry::default().with_light(Box::new(FixedAnalog(250)));
        let env = read_environment(&mut devices, MissingReading::Omit);
        assert_eq!(env.light, Some(250));
        assert_eq!(env.moisture, None);
        assert_eq!(env.env_temp, None);
        assert_eq!(env.env_humidity, None);
    }

    #[test]
    fn unbound_sensors_are_zeroed_when_asked() {
        let mut devices = DeviceRegistry::default();
        let env = read_environment(&mut devices, MissingReading::Zero);
        assert_eq!(env.moisture, Some(0));
        assert_eq!(env.light, Some(0));
        assert_eq!(env.env_temp, Some(0.0));
        assert_eq!(env.env_humidity, Some(0.0));
    }

    #[test]
    fn failing_sensor_does_not_block_others() {
        let mut devices = DeviceRegistry::default()
            .with_moisture(Box::new(FixedAnalog(640)))
            .with_climate(Box::new(FailingClimate))
            .with_light(Box::new(FixedAnalog(120)));
        let env = read_environment(&mut devices, MissingReading::Omit);
        assert_eq!(env.moisture, Some(640));
        assert_eq!(env.light, Some(120));
        assert_eq!(env.env_temp, None);
        assert_eq!(env.env_humidity, None);
    }

    #[test]
    fn nan_climate_reading_is_dropped() {
        let mut devices =
            DeviceRegistry::default().with_climate(Box::new(FixedClimate(f32::NAN, 21.0)));
        let env = read_environment(&mut devices, MissingReading::Zero);
        assert_eq!(env.env_temp, Some(0.0));
    }

    #[test]
    fn climate_pair_maps_to_named_fields() {
        let mut devices =
            DeviceRegistry::default().with_climate(Box::new(FixedClimate(55.0, 23.0)));
        let env = read_environment(&mut devices, MissingReading::Omit);
        assert_eq!(env.env_humidity, Some(55.0));
        assert_eq!(env.env_temp, Some(23.0));
    }
}
