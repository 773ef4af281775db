//! In-memory gateway for tests and the demo binary.
//!
//! Mirrors the remote service deterministically: a fixed anchor timestamp, a
//! synthetic AQI curve, and the same auth/gating semantics as the real
//! backend. Failures can be scripted per operation to exercise the
//! controllers' failure paths, and every failure is reported to the notifier
//! with the same single-notify discipline as [`HttpGateway`](super::HttpGateway).

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate, NaiveDateTime};
use parking_lot::RwLock;
use serde_json::json;

use super::error::{GatewayError, GatewayResult};
use super::gateway::AirQualityApi;
use crate::api::{
    Ack, AuthResponse, Credentials, EdaBundle, EdaDeepDive, EdaStats, EdaTimeSeries,
    ForecastResponse, LiveConditions, PredictionResult, Profile, ProfileUpdate, SeriesData,
    SessionStatus, TableData, TimeSeriesPoint,
};
use crate::models::{AqiCategory, FeatureSet};
use crate::notifier::{NoticeLevel, Notifier};

const MONTH_ORDER: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_ORDER: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Default)]
struct LocalState {
    logged_in: bool,
    user: Option<Profile>,
    features: Vec<String>,
    /// username -> password
    accounts: HashMap<String, String>,
    /// operation -> one-shot failure message
    scripted_failures: HashMap<String, String>,
    /// operation -> number of invocations
    calls: HashMap<String, usize>,
}

/// Deterministic in-memory backend.
pub struct LocalGateway {
    state: RwLock<LocalState>,
    notifier: Notifier,
}

impl LocalGateway {
    pub fn new(notifier: Notifier) -> Self {
        let mut state = LocalState {
            features: vec![
                "PM2.5 (ug/m3)".to_string(),
                "PM10 (ug/m3)".to_string(),
                "NO2 (ug/m3)".to_string(),
                "O3 (ug/m3)".to_string(),
                "Temp (C)".to_string(),
                "Humidity (%)".to_string(),
            ],
            ..LocalState::default()
        };
        state.accounts.insert("demo".to_string(), "demo".to_string());
        Self {
            state: RwLock::new(state),
            notifier,
        }
    }

    // ---- test / demo scripting hooks ----

    /// Replace the advertised feature list.
    pub fn set_features(&self, features: Vec<String>) {
        self.state.write().features = features;
    }

    /// Mark the session authenticated with the given profile.
    pub fn log_in_as(&self, profile: Profile) {
        let mut state = self.state.write();
        state.logged_in = true;
        state.user = Some(profile);
    }

    /// Fail the next invocation of `operation` with `message`.
    pub fn script_failure(&self, operation: &str, message: impl Into<String>) {
        self.state
            .write()
            .scripted_failures
            .insert(operation.to_string(), message.into());
    }

    /// How many times `operation` has been invoked.
    pub fn calls(&self, operation: &str) -> usize {
        self.state
            .read()
            .calls
            .get(operation)
            .copied()
            .unwrap_or(0)
    }

    // ---- shared plumbing ----

    /// Record the call and consume any scripted failure for it.
    fn enter(&self, operation: &str) -> GatewayResult<()> {
        let mut state = self.state.write();
        *state.calls.entry(operation.to_string()).or_insert(0) += 1;
        if let Some(message) = state.scripted_failures.remove(operation) {
            drop(state);
            return Err(self.reject(500, message));
        }
        Ok(())
    }

    /// Build a status failure, reporting it to the notifier once.
    fn reject(&self, status: u16, message: impl Into<String>) -> GatewayError {
        let err = GatewayError::status(status, message);
        self.notifier.notify(err.user_message(), NoticeLevel::Danger);
        err
    }

    fn has_profile_data(state: &LocalState) -> bool {
        state
            .user
            .as_ref()
            .map(|u| u.age.is_some() || u.conditions.is_some())
            .unwrap_or(false)
    }

    /// Synthetic hourly ambient AQI curve around the anchor timestamp.
    fn ambient_at(hour_index: i64) -> f64 {
        40.0 + 6.0 * ((hour_index.rem_euclid(24)) as f64)
            + 3.0 * ((hour_index / 24).rem_euclid(5) as f64)
    }

    fn anchor() -> NaiveDateTime {
        NaiveDateTime::default()
    }

    fn point(hour_index: i64, perceived: Option<f64>) -> TimeSeriesPoint {
        let ts = Self::anchor() + ChronoDuration::hours(hour_index);
        TimeSeriesPoint {
            ds: ts.format("%Y-%m-%dT%H:%M:%S").to_string(),
            yhat: round2(Self::ambient_at(hour_index)),
            perceived_yhat: perceived.map(round2),
        }
    }

    fn perceived_for(state: &LocalState, ambient: f64, hour_index: i64) -> Option<f64> {
        if !(state.logged_in && Self::has_profile_data(state)) {
            return None;
        }
        // Every seventh point lacks a personalized value, like rows the
        // personal model could not score.
        if hour_index.rem_euclid(7) == 3 {
            return None;
        }
        Some(ambient.max(ambient + 12.0))
    }

    fn personal_advice(user: &Profile, category: AqiCategory) -> String {
        let sensitive = category >= AqiCategory::UnhealthyForSensitive;
        let mut parts = Vec::new();
        if user.age.is_some_and(|age| age > 60) && sensitive {
            parts.push("Given your age, it is strongly recommended to stay indoors.");
        }
        if let Some(conditions) = &user.conditions {
            let conditions = conditions.to_lowercase();
            if sensitive
                && ["asthma", "copd", "respiratory"]
                    .iter()
                    .any(|c| conditions.contains(c))
            {
                parts.push("Your respiratory condition puts you at high risk. Avoid all outdoor activity.");
            }
            if sensitive
                && ["heart", "cardiovascular"]
                    .iter()
                    .any(|c| conditions.contains(c))
            {
                parts.push("Your heart condition makes you more vulnerable. Avoid strenuous activity.");
            }
        }
        if parts.is_empty() {
            "The current air quality should not pose a significant additional risk based on your profile."
                .to_string()
        } else {
            parts.join(" ")
        }
    }
}

#[async_trait]
impl AirQualityApi for LocalGateway {
    async fn session_status(&self) -> GatewayResult<SessionStatus> {
        self.enter("session_status")?;
        let state = self.state.read();
        Ok(SessionStatus {
            logged_in: state.logged_in,
            user: state.user.clone(),
            features: state.features.clone(),
        })
    }

    async fn login(&self, credentials: &Credentials) -> GatewayResult<AuthResponse> {
        self.enter("login")?;
        let mut state = self.state.write();
        let known = state
            .accounts
            .get(&credentials.username)
            .is_some_and(|password| *password == credentials.password);
        if !known {
            drop(state);
            return Err(self.reject(401, "Invalid username or password."));
        }
        let profile = Profile {
            username: Some(credentials.username.clone()),
            ..state.user.clone().unwrap_or_default()
        };
        state.logged_in = true;
        state.user = Some(profile.clone());
        Ok(AuthResponse {
            success: true,
            message: Some("Login successful!".to_string()),
            user: Some(profile),
        })
    }

    async fn register(&self, credentials: &Credentials) -> GatewayResult<AuthResponse> {
        self.enter("register")?;
        let mut state = self.state.write();
        if state.accounts.contains_key(&credentials.username) {
            drop(state);
            return Err(self.reject(409, "Username already exists."));
        }
        state
            .accounts
            .insert(credentials.username.clone(), credentials.password.clone());
        Ok(AuthResponse {
            success: true,
            message: Some("Registration successful! Please log in.".to_string()),
            user: None,
        })
    }

    async fn logout(&self) -> GatewayResult<Ack> {
        self.enter("logout")?;
        let mut state = self.state.write();
        state.logged_in = false;
        state.user = None;
        Ok(Ack { success: true })
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> GatewayResult<AuthResponse> {
        self.enter("update_profile")?;
        let mut state = self.state.write();
        if !state.logged_in {
            drop(state);
            return Err(self.reject(401, "Authentication required."));
        }
        let user = state.user.get_or_insert_with(Profile::default);
        user.age = update.age;
        user.conditions = update
            .conditions
            .as_ref()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        let user = user.clone();
        Ok(AuthResponse {
            success: true,
            message: Some("Profile updated successfully!".to_string()),
            user: Some(user),
        })
    }

    async fn live_conditions(&self) -> GatewayResult<LiveConditions> {
        self.enter("live_conditions")?;
        let state = self.state.read();
        let mut data = HashMap::new();
        for (i, feature) in state.features.iter().enumerate() {
            data.insert(feature.clone(), round2(10.0 + 7.5 * i as f64));
        }
        // A variable the prediction model does not use.
        data.insert("Pressure_MSL (hPa)".to_string(), 1013.2);
        Ok(LiveConditions {
            source: Some("Live API (Bridged)".to_string()),
            data,
        })
    }

    async fn predict(&self, features: &FeatureSet) -> GatewayResult<PredictionResult> {
        self.enter("predict")?;
        let state = self.state.read();
        let ambient = if features.is_empty() {
            0.0
        } else {
            let sum: f64 = features.iter().map(|(_, v)| v).sum();
            (sum / features.len() as f64).max(0.0)
        };
        let category = AqiCategory::classify(ambient).unwrap_or(AqiCategory::Good);

        let (perceived_aqi, personal_advice) =
            if state.logged_in && Self::has_profile_data(&state) {
                let perceived = ambient.max(ambient + 12.0);
                let advice = state
                    .user
                    .as_ref()
                    .map(|user| Self::personal_advice(user, category));
                (Some(round2(perceived)), advice)
            } else {
                (None, None)
            };

        Ok(PredictionResult {
            predicted_aqi: round2(ambient),
            category: category.label().to_string(),
            advice: category.advice().to_string(),
            color: Some(category.color().to_string()),
            emoji: None,
            perceived_aqi,
            personal_advice,
        })
    }

    async fn forecast(&self, hours: u32) -> GatewayResult<ForecastResponse> {
        self.enter("forecast")?;
        let state = self.state.read();
        let historical: Vec<TimeSeriesPoint> =
            (-72..0).map(|i| Self::point(i, None)).collect();
        let forecast: Vec<TimeSeriesPoint> = (0..hours as i64)
            .map(|i| {
                let perceived = Self::perceived_for(&state, Self::ambient_at(i), i);
                Self::point(i, perceived)
            })
            .collect();
        Ok(ForecastResponse {
            historical,
            forecast,
        })
    }

    async fn historical_series(&self) -> GatewayResult<Vec<TimeSeriesPoint>> {
        self.enter("historical_series")?;
        Ok((-168..0).map(|i| Self::point(i, None)).collect())
    }

    async fn eda_data(&self, start: NaiveDate, end: NaiveDate) -> GatewayResult<EdaBundle> {
        self.enter("eda_data")?;
        if start > end {
            return Err(self.reject(404, "No data available for the selected date range."));
        }

        // Daily mean of the synthetic curve, capped at two years of days.
        let days: Vec<(NaiveDate, f64)> = start
            .iter_days()
            .take_while(|day| *day <= end)
            .take(730)
            .enumerate()
            .map(|(i, day)| {
                let value = round2(Self::ambient_at(i as i64 * 24) + 25.0);
                (day, value)
            })
            .collect();
        let values: Vec<f64> = days.iter().map(|(_, v)| *v).collect();

        let aqi_over_time = SeriesData {
            labels: days
                .iter()
                .map(|(day, _)| day.format("%Y-%m-%d").to_string())
                .collect(),
            values: values.clone(),
        };

        // 25-wide histogram bins over 0..200.
        let mut dist_labels = Vec::new();
        let mut dist_values = Vec::new();
        for bin in 0..8 {
            let lo = bin as f64 * 25.0;
            let hi = lo + 25.0;
            dist_labels.push(format!("{}-{}", lo as i64, hi as i64));
            let count = values
                .iter()
                .filter(|v| **v >= lo && (**v < hi || bin == 7))
                .count();
            dist_values.push(count as f64);
        }

        let mut category_counts: Vec<(AqiCategory, usize)> = Vec::new();
        for value in &values {
            if let Some(category) = AqiCategory::classify(*value) {
                match category_counts.iter_mut().find(|(c, _)| *c == category) {
                    Some(entry) => entry.1 += 1,
                    None => category_counts.push((category, 1)),
                }
            }
        }
        category_counts.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
        let categories = SeriesData {
            labels: category_counts
                .iter()
                .map(|(c, _)| c.label().to_string())
                .collect(),
            values: category_counts.iter().map(|(_, n)| *n as f64).collect(),
        };

        let stats = EdaStats {
            mean: mean(&values).map(round2),
            median: median(&values).map(round2),
            max: values.iter().copied().reduce(f64::max).map(round2),
            min: values.iter().copied().reduce(f64::min).map(round2),
        };

        let by_month = grouped_means(&days, &MONTH_ORDER, |day| day.format("%B").to_string());
        let by_day_of_week =
            grouped_means(&days, &WEEKDAY_ORDER, |day| day.format("%A").to_string());
        let base = mean(&values).unwrap_or(0.0);
        let by_hour = SeriesData {
            labels: (0..24).map(|h| format!("{h:02}:00")).collect(),
            values: (0..24)
                .map(|h| round2(base + (h as f64 - 12.0).abs()))
                .collect(),
        };

        let columns = vec![
            "Datetime".to_string(),
            "AQI".to_string(),
            "Temp (C)".to_string(),
            "Humidity (%)".to_string(),
            "Wind_Speed (km/h)".to_string(),
        ];
        let rows = days
            .iter()
            .enumerate()
            .rev()
            .take(500)
            .rev()
            .map(|(i, (day, value))| {
                let mut row = serde_json::Map::new();
                row.insert(
                    "Datetime".to_string(),
                    json!(day.format("%Y-%m-%dT00:00:00").to_string()),
                );
                row.insert("AQI".to_string(), json!(value));
                row.insert("Temp (C)".to_string(), json!(15 + (i % 10) as i64));
                row.insert("Humidity (%)".to_string(), json!(40 + (i % 30) as i64));
                row.insert("Wind_Speed (km/h)".to_string(), json!(5 + (i % 12) as i64));
                row
            })
            .collect();

        Ok(EdaBundle {
            time_series: EdaTimeSeries {
                stats,
                aqi_over_time,
                categories,
                dist: SeriesData {
                    labels: dist_labels,
                    values: dist_values,
                },
            },
            deep_dive: EdaDeepDive {
                by_month,
                by_day_of_week,
                by_hour,
            },
            table_data: TableData { columns, rows },
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Mean value per calendar group, emitted in the fixed calendar order and
/// restricted to groups present in the range.
fn grouped_means(
    days: &[(NaiveDate, f64)],
    order: &[&str],
    group: impl Fn(&NaiveDate) -> String,
) -> SeriesData {
    let mut sums: HashMap<String, (f64, usize)> = HashMap::new();
    for (day, value) in days {
        let entry = sums.entry(group(day)).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }
    let mut series = SeriesData::default();
    for name in order {
        if let Some((sum, count)) = sums.get(*name) {
            series.labels.push((*name).to_string());
            series.values.push(round2(sum / *count as f64));
        }
    }
    series
}
