//! Historical price frequency definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Bucketing of a historical price series.
///
/// Each variant maps to the numeric `period` code the chart data feed
/// expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PriceFrequency {
    /// Hourly bars (intraday rows, no year on the wire).
    Hourly,
    /// Daily bars.
    #[default]
    Daily,
    /// Weekly bars.
    Weekly,
    /// Monthly bars.
    Monthly,
}

impl PriceFrequency {
    /// Returns the provider's numeric period code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::Hourly => 23,
            Self::Daily => 56,
            Self::Weekly => 67,
            Self::Monthly => 68,
        }
    }

    /// Looks up a frequency by provider period code.
    #[must_use]
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            23 => Some(Self::Hourly),
            56 => Some(Self::Daily),
            67 => Some(Self::Weekly),
            68 => Some(Self::Monthly),
            _ => None,
        }
    }

    /// Returns the frequency as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Returns all available frequencies.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Hourly, Self::Daily, Self::Weekly, Self::Monthly]
    }
}

impl std::fmt::Display for PriceFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PriceFrequency {
    type Err = FrequencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hourly" | "hour" | "h" | "1h" => Ok(Self::Hourly),
            "daily" | "day" | "d" | "1d" => Ok(Self::Daily),
            "weekly" | "week" | "w" | "1w" => Ok(Self::Weekly),
            "monthly" | "month" | "mo" | "1mo" => Ok(Self::Monthly),
            other => other
                .parse::<u16>()
                .ok()
                .and_then(Self::from_code)
                .ok_or_else(|| FrequencyParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid frequency string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyParseError(String);

impl std::fmt::Display for FrequencyParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid frequency '{}', expected one of: hourly, daily, weekly, monthly",
            self.0
        )
    }
}

impl std::error::Error for FrequencyParseError {}
