//! Typed surface of the remote prediction service.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::GatewayResult;
use crate::api::{
    Ack, AuthResponse, Credentials, EdaBundle, ForecastResponse, LiveConditions,
    PredictionResult, ProfileUpdate, SessionStatus, TimeSeriesPoint,
};
use crate::models::FeatureSet;

/// One operation per backend endpoint.
///
/// Implementations must be `Send + Sync` so controllers can share them behind
/// `Arc`. Each operation resolves to the decoded response or a classified
/// [`GatewayError`](super::GatewayError) that has already been reported to
/// the notifier.
#[async_trait]
pub trait AirQualityApi: Send + Sync {
    /// GET session status: login flag, profile, supported feature names.
    async fn session_status(&self) -> GatewayResult<SessionStatus>;

    /// POST credentials; a success grants the server-side session.
    async fn login(&self, credentials: &Credentials) -> GatewayResult<AuthResponse>;

    /// POST registration fields.
    async fn register(&self, credentials: &Credentials) -> GatewayResult<AuthResponse>;

    /// POST logout; tears down the server-side session.
    async fn logout(&self) -> GatewayResult<Ack>;

    /// POST profile fields; the response echoes the stored profile.
    async fn update_profile(&self, update: &ProfileUpdate) -> GatewayResult<AuthResponse>;

    /// GET the latest reading for every measured variable.
    async fn live_conditions(&self) -> GatewayResult<LiveConditions>;

    /// POST a feature set and receive the prediction.
    async fn predict(&self, features: &FeatureSet) -> GatewayResult<PredictionResult>;

    /// POST a forecast horizon; returns disjoint historical and forecast
    /// sequences.
    async fn forecast(&self, hours: u32) -> GatewayResult<ForecastResponse>;

    /// GET the recent historical series shown before any forecast request.
    async fn historical_series(&self) -> GatewayResult<Vec<TimeSeriesPoint>>;

    /// GET the analysis bundle for a date range.
    async fn eda_data(&self, start: NaiveDate, end: NaiveDate) -> GatewayResult<EdaBundle>;
}
