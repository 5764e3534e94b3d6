//! Avaliação de alertas ambientais.
//!
//! As condições são verificadas em ordem fixa (temperatura, umidade,
//! umidade do solo, luz) e só a primeira violada é reportada.

use crate::config::AlertThresholds;
use crate::types::{EnvReadings, fmt_reading};

/// Grandeza que disparou o alerta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertMetric {
    Temperature,
    Humidity,
    Moisture,
    Light,
}

impl AlertMetric {
    /// Ordem de avaliação. A primeira violação vence.
    pub const PRIORITY: [AlertMetric; 4] = [
        AlertMetric::Temperature,
        AlertMetric::Humidity,
        AlertMetric::Moisture,
        AlertMetric::Light,
    ];

    /// Retorna a mensagem do alerta se o limite desta grandeza foi ultrapassado.
    fn breach(self, env: &EnvReadings, thresholds: &AlertThresholds) -> Option<String> {
        match self {
            AlertMetric::Temperature => env
                .env_temp
                .filter(|t| *t > thresholds.temp_limit)
                .map(|t| format!("HIGH TEMP: {}C", fmt_reading(t))),
            AlertMetric::Humidity => env
                .env_humidity
                .filter(|h| *h > thresholds.humidity_limit)
                .map(|h| format!("HIGH HUMID: {}%", fmt_reading(h))),
            AlertMetric::Moisture => env
                .moisture
                .filter(|m| *m > thresholds.moisture_limit)
                .map(|m| format!("HIGH H2O: {m}")),
            AlertMetric::Light => env
                .light
                .filter(|l| *l > thresholds.light_limit)
                .map(|l| format!("HIGH UV: {l}")),
        }
    }
}

/// Um alerta disparado.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub metric: AlertMetric,
    /// Texto para a segunda linha do LCD
    pub message: String,
}

/// Avalia as leituras contra os limites e retorna o primeiro alerta, se houver.
///
/// Campos ausentes nunca disparam alerta.
pub fn evaluate_alert(env: &EnvReadings, thresholds: &AlertThresholds) -> Option<Alert> {
    AlertMetric::PRIORITY.iter().find_map(|&metric| {
        metric
            .breach(env, thresholds)
            .map(|message| Alert { metric, message })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calm() -> EnvReadings {
        EnvReadings {
            moisture: Some(400),
            light: Some(300),
            env_temp: Some(22.0),
            env_humidity: Some(45.0),
        }
    }

    #[test]
    fn no_alert_for_normal_values() {
        assert!(evaluate_alert(&calm(), &AlertThresholds::default()).is_none());
    }

    #[test]
    fn temperature_wins_over_humidity() {
        let env = EnvReadings {
            env_temp: Some(31.0),
            env_humidity: Some(90.0),
            ..calm()
        };
        let alert = evaluate_alert(&env, &AlertThresholds::default()).unwrap();
        assert_eq!(alert.metric, AlertMetric::Temperature);
        assert_eq!(alert.message, "HIGH TEMP: 31C");
    }

    #[test]
    fn every_threshold_breached_reports_temperature_only() {
        let env = EnvReadings {
            moisture: Some(1500),
            light: Some(900),
            env_temp: Some(28.5),
            env_humidity: Some(85.0),
        };
        let alert = evaluate_alert(&env, &AlertThresholds::default()).unwrap();
        assert_eq!(alert.metric, AlertMetric::Temperature);
        assert_eq!(alert.message, "HIGH TEMP: 28.5C");
    }

    #[test]
    fn order_falls_through_to_later_metrics() {
        let t = AlertThresholds::default();

        let humid = EnvReadings {
            env_humidity: Some(81.0),
            moisture: Some(2000),
            ..calm()
        };
        assert_eq!(evaluate_alert(&humid, &t).unwrap().message, "HIGH HUMID: 81%");

        let wet = EnvReadings {
            moisture: Some(1201),
            light: Some(700),
            ..calm()
        };
        assert_eq!(evaluate_alert(&wet, &t).unwrap().message, "HIGH H2O: 1201");

        let bright = EnvReadings {
            light: Some(601),
            ..calm()
        };
        assert_eq!(evaluate_alert(&bright, &t).unwrap().metric, AlertMetric::Light);
    }

    #[test]
    fn limit_itself_is_not_a_breach() {
        let env = EnvReadings {
            env_temp: Some(28.0),
            light: Some(600),
            ..calm()
        };
        assert!(evaluate_alert(&env, &AlertThresholds::default()).is_none());
    }

    #[test]
    fn missing_readings_never_alert() {
        let t = AlertThresholds {
            temp_limit: -100.0,
            ..Default::default()
        };
        assert!(evaluate_alert(&EnvReadings::default(), &t).is_none());
    }
}
