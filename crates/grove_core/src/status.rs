//! Faixas de status dos monitores de sensor único.

/// Faixa de umidade do solo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoistureStatus {
    Dry,
    Moist,
    Wet,
}

impl MoistureStatus {
    /// 0–299 seco, 300–599 úmido, 600+ encharcado.
    pub fn from_level(level: u32) -> Self {
        if level < 300 {
            MoistureStatus::Dry
        } else if level < 600 {
            MoistureStatus::Moist
        } else {
            MoistureStatus::Wet
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MoistureStatus::Dry => "🌵 DRY",
            MoistureStatus::Moist => "🌱 MOIST",
            MoistureStatus::Wet => "🌊 WET",
        }
    }
}

/// Faixa de luminosidade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightStatus {
    Dark,
    Bright,
}

impl LightStatus {
    pub fn from_level(level: u32, dark_threshold: u32) -> Self {
        if level < dark_threshold {
            LightStatus::Dark
        } else {
            LightStatus::Bright
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LightStatus::Dark => "Dark - Night Mode",
            LightStatus::Bright => "Bright - Day Mode",
        }
    }
}

/// Status do ambiente. Calor tem prioridade sobre umidade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimateStatus {
    Normal,
    Hot,
    Humid,
}

impl ClimateStatus {
    /// `temp_c` sempre em Celsius, independente da unidade exibida.
    pub fn from_reading(temp_c: f32, humidity: f32) -> Self {
        if temp_c > 30.0 {
            ClimateStatus::Hot
        } else if humidity > 70.0 {
            ClimateStatus::Humid
        } else {
            ClimateStatus::Normal
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ClimateStatus::Normal => "✅ Normal",
            ClimateStatus::Hot => "🔥 HOT",
            ClimateStatus::Humid => "💧 HUMID",
        }
    }
}

/// Unidade de temperatura exibida.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    pub fn convert(self, celsius: f32) -> f32 {
        match self {
            TempUnit::Celsius => celsius,
            TempUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TempUnit::Celsius => "°C",
            TempUnit::Fahrenheit => "°F",
        }
    }
}

impl std::str::FromStr for TempUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "C" | "c" => Ok(TempUnit::Celsius),
            "F" | "f" => Ok(TempUnit::Fahrenheit),
            other => Err(format!("unidade desconhecida: {other} (use C ou F)")),
        }
    }
}

/// Barra horizontal `[████----]`, com o valor limitado a `max`.
pub fn draw_bar(value: u32, max: u32, width: usize) -> String {
    if max == 0 {
        return format!("[{}]", "-".repeat(width));
    }
    let value = value.min(max);
    let fill = (value as u64 * width as u64 / max as u64) as usize;
    format!("[{}{}]", "█".repeat(fill), "-".repeat(width - fill))
}
