//! AQI severity bands.
//!
//! The band table is fixed: inclusive upper bounds at 50/100/150/200/300 and
//! open-ended above 300. Values are rounded to the nearest integer before
//! banding, so 50.4 is still Good and 50.5 is Moderate.

use serde::{Deserialize, Serialize};

/// Fallback color for category labels the client does not recognize.
pub const NEUTRAL_COLOR: &str = "#808080";

/// Ordered AQI severity categories, least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    /// Band a numeric AQI value; `None` for non-finite input.
    pub fn classify(aqi: f64) -> Option<Self> {
        if !aqi.is_finite() {
            return None;
        }
        let value = aqi.round() as i64;
        Some(match value {
            v if v <= 50 => Self::Good,
            v if v <= 100 => Self::Moderate,
            v if v <= 150 => Self::UnhealthyForSensitive,
            v if v <= 200 => Self::Unhealthy,
            v if v <= 300 => Self::VeryUnhealthy,
            _ => Self::Hazardous,
        })
    }

    /// Display label matching the backend's category strings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitive => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    /// Band color used for headline cards and category series.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Good => "#28a745",
            Self::Moderate => "#ffc107",
            Self::UnhealthyForSensitive => "#fd7e14",
            Self::Unhealthy => "#dc3545",
            Self::VeryUnhealthy => "#8f3e97",
            Self::Hazardous => "#7f0000",
        }
    }

    /// General advice for the band.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Good => "Air quality is satisfactory.",
            Self::Moderate => "Some pollutants may be a moderate health concern.",
            Self::UnhealthyForSensitive => {
                "Members of sensitive groups may experience health effects."
            }
            Self::Unhealthy => "Everyone may begin to experience health effects.",
            Self::VeryUnhealthy => "Health warnings of emergency conditions.",
            Self::Hazardous => "Health alert: everyone should avoid all outdoor exertion.",
        }
    }

    /// Numeric severity rank, 0 = Good through 5 = Hazardous.
    pub fn severity(&self) -> u8 {
        *self as u8
    }
}

/// Fixed category-label → color lookup with a neutral fallback, so unknown
/// backend categories render as a visually neutral series rather than a
/// defect.
pub fn category_color(label: &str) -> &'static str {
    match label {
        "Good" => AqiCategory::Good.color(),
        "Moderate" => AqiCategory::Moderate.color(),
        "Unhealthy for Sensitive Groups" => AqiCategory::UnhealthyForSensitive.color(),
        "Unhealthy" => AqiCategory::Unhealthy.color(),
        "Very Unhealthy" => AqiCategory::VeryUnhealthy.color(),
        "Hazardous" => AqiCategory::Hazardous.color(),
        _ => NEUTRAL_COLOR,
    }
}

#[cfg(test)]
#[path = "aqi_tests.rs"]
mod aqi_tests;
