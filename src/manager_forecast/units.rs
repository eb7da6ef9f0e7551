use std::fmt;
use serde::{Deserialize, Deserializer};

/// Suffix used when the unit system is not one OpenWeatherMap knows about
pub const UNKNOWN_UNIT: &str = "?";

/// Unit systems supported by OpenWeatherMap
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UnitSystem {
    Standard,
    #[default]
    Metric,
    Imperial,
    Unknown(String),
}

impl UnitSystem {
    /// Maps an api unit code onto a unit system, any unrecognized code is kept as `Unknown`
    ///
    /// # Arguments
    ///
    /// * 'code' - unit code as used by the OpenWeatherMap api (standard, metric or imperial)
    pub fn from_code(code: &str) -> Self {
        match code {
            "standard" => UnitSystem::Standard,
            "metric" => UnitSystem::Metric,
            "imperial" => UnitSystem::Imperial,
            other => UnitSystem::Unknown(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            UnitSystem::Standard => "standard",
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
            UnitSystem::Unknown(code) => code,
        }
    }

    pub fn temperature_unit(&self) -> &'static str {
        match self {
            UnitSystem::Standard => "K",
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
            UnitSystem::Unknown(_) => UNKNOWN_UNIT,
        }
    }

    pub fn wind_unit(&self) -> &'static str {
        match self {
            UnitSystem::Standard | UnitSystem::Metric => "m/s",
            UnitSystem::Imperial => "mph",
            UnitSystem::Unknown(_) => UNKNOWN_UNIT,
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl<'de> Deserialize<'de> for UnitSystem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(UnitSystem::from_code(&code))
    }
}
