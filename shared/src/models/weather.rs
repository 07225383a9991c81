//! Weather models used by the dispersion engine

use serde::{Deserialize, Serialize};

/// Pasquill-Gifford atmospheric stability class, from A (very unstable,
/// strong turbulent mixing) to F (stable, little mixing).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum StabilityClass {
    A,
    B,
    C,
    #[default]
    D,
    E,
    F,
}

impl StabilityClass {
    /// Parse a one-letter stability code, case-insensitively. Any code
    /// outside `A`-`F` behaves as the neutral class `D`.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "A" => StabilityClass::A,
            "B" => StabilityClass::B,
            "C" => StabilityClass::C,
            "D" => StabilityClass::D,
            "E" => StabilityClass::E,
            "F" => StabilityClass::F,
            _ => StabilityClass::D,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            StabilityClass::A => "A",
            StabilityClass::B => "B",
            StabilityClass::C => "C",
            StabilityClass::D => "D",
            StabilityClass::E => "E",
            StabilityClass::F => "F",
        }
    }
}

impl std::fmt::Display for StabilityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The subset of a weather observation the dispersion engine requires.
/// Weather is site-wide: one observation drives every source in a batch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DispersionWeather {
    /// Wind speed in m/s, `>= 0`.
    pub wind_speed_mps: f64,
    /// Meteorological wind direction in degrees: where the wind blows
    /// *from*, `[0, 360)`.
    pub wind_direction_deg: f64,
    pub stability: StabilityClass,
}

/// Assemble engine inputs from the nullable fields of a stored weather
/// observation. All three of wind speed, wind direction and stability
/// class must be present; a `None` here fails the whole prediction batch
/// with the incomplete-weather condition.
pub fn dispersion_weather(
    wind_speed_mps: Option<f64>,
    wind_direction_deg: Option<f64>,
    stability_code: Option<&str>,
) -> Option<DispersionWeather> {
    Some(DispersionWeather {
        wind_speed_mps: wind_speed_mps?,
        wind_direction_deg: wind_direction_deg?,
        stability: StabilityClass::from_code(stability_code?),
    })
}
