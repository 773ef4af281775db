//! Wire-level DTOs for the dashboard API.
//!
//! This file consolidates the request/response types exchanged with the
//! remote prediction service. All types derive Serialize/Deserialize for
//! JSON serialization; optional backend fields stay `Option` so absence is
//! distinguishable from zero.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// User profile fields carried in session and auth responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub conditions: Option<String>,
}

/// Response of the session status endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStatus {
    pub logged_in: bool,
    #[serde(default)]
    pub user: Option<Profile>,
    /// Predictive feature names the backend currently supports, in order.
    #[serde(default)]
    pub features: Vec<String>,
}

/// Login / registration credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Success envelope returned by the auth-style endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<Profile>,
}

/// Profile update request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub conditions: Option<String>,
}

/// Marker synthesized for successful responses without a JSON body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
}

/// Latest reading for every measured variable, keyed by feature name.
///
/// The backend may report variables the prediction model does not use;
/// callers filter against the session feature list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiveConditions {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub data: HashMap<String, f64>,
}

/// Prediction response.
///
/// `perceived_aqi` and `personal_advice` are present only for authenticated
/// users with sufficient profile data; their absence is not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_aqi: f64,
    pub category: String,
    pub advice: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub perceived_aqi: Option<f64>,
    #[serde(default)]
    pub personal_advice: Option<String>,
}

/// One point of a historical or forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// ISO-8601 timestamp as emitted by the backend.
    pub ds: String,
    pub yhat: f64,
    #[serde(default)]
    pub perceived_yhat: Option<f64>,
}

/// Forecast endpoint response: disjoint historical and forecast sequences,
/// each ordered by timestamp ascending.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub historical: Vec<TimeSeriesPoint>,
    #[serde(default)]
    pub forecast: Vec<TimeSeriesPoint>,
}

/// Labeled series payload; `labels` and `values` pair up index-wise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl SeriesData {
    /// Whether labels and values pair up.
    pub fn is_consistent(&self) -> bool {
        self.labels.len() == self.values.len()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Aggregate statistics for the analysed range.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EdaStats {
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub median: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub min: Option<f64>,
}

/// Time-series tab payload of the analysis bundle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EdaTimeSeries {
    #[serde(default)]
    pub stats: EdaStats,
    pub aqi_over_time: SeriesData,
    pub categories: SeriesData,
    pub dist: SeriesData,
}

/// Trends tab payload: averages by calendar grouping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EdaDeepDive {
    pub by_month: SeriesData,
    pub by_day_of_week: SeriesData,
    pub by_hour: SeriesData,
}

/// Raw rows for the data-table tab.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableData {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(rename = "data", default)]
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
}

/// Complete analysis bundle; fully replaced on every run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EdaBundle {
    pub time_series: EdaTimeSeries,
    pub deep_dive: EdaDeepDive,
    pub table_data: TableData,
}

impl EdaBundle {
    /// Every chart-shaped sub-field must pair labels with values.
    pub fn series_consistent(&self) -> bool {
        [
            &self.time_series.aqi_over_time,
            &self.time_series.categories,
            &self.time_series.dist,
            &self.deep_dive.by_month,
            &self.deep_dive.by_day_of_week,
            &self.deep_dive.by_hour,
        ]
        .iter()
        .all(|series| series.is_consistent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_status_tolerates_missing_user() {
        let status: SessionStatus =
            serde_json::from_str(r#"{"logged_in": false, "features": ["PM2.5"]}"#)
                .expect("valid payload");
        assert!(!status.logged_in);
        assert!(status.user.is_none());
        assert_eq!(status.features, vec!["PM2.5"]);
    }

    #[test]
    fn prediction_result_optional_fields_default_to_none() {
        let result: PredictionResult = serde_json::from_str(
            r#"{"predicted_aqi": 87.4, "category": "Moderate", "advice": "Sensitive groups..."}"#,
        )
        .expect("valid payload");
        assert!(result.perceived_aqi.is_none());
        assert!(result.personal_advice.is_none());
        assert!(result.emoji.is_none());
    }

    #[test]
    fn bundle_consistency_detects_mismatched_series() {
        let mut bundle = EdaBundle::default();
        assert!(bundle.series_consistent());
        bundle.deep_dive.by_hour = SeriesData {
            labels: vec!["00:00".into()],
            values: vec![],
        };
        assert!(!bundle.series_consistent());
    }
}
