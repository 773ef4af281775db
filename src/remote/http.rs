//! HTTP implementation of the remote gateway.
//!
//! A single request path classifies every outcome: non-success statuses have
//! their structured error body (`message` or `error`) extracted, successful
//! responses without a JSON content type collapse to a generic marker, and
//! every failure is reported to the notifier exactly once before it reaches
//! the caller.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::error::{GatewayError, GatewayResult};
use super::gateway::AirQualityApi;
use crate::api::{
    Ack, AuthResponse, Credentials, EdaBundle, ForecastResponse, LiveConditions,
    PredictionResult, ProfileUpdate, SessionStatus, TimeSeriesPoint,
};
use crate::models::FeatureSet;
use crate::notifier::{NoticeLevel, Notifier};

/// Default per-request deadline, so a dead backend resolves to the normal
/// failure path instead of an indefinite loading state.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Structured error body the backend attaches to non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// reqwest-backed gateway to the dashboard backend.
pub struct HttpGateway {
    client: Client,
    base_url: String,
    timeout_secs: u64,
    notifier: Notifier,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, notifier: Notifier) -> Self {
        Self::with_timeout(
            base_url,
            notifier,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        notifier: Notifier,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs: timeout.as_secs(),
            notifier,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Issue a request and decode the response, reporting any failure to the
    /// notifier once.
    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> GatewayResult<T> {
        let url = self.endpoint(path);
        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let result = self.execute(request).await;
        match &result {
            Ok(_) => debug!(%url, "remote call succeeded"),
            Err(err) => {
                warn!(%url, error = %err, "remote call failed");
                self.notifier.notify(err.user_message(), NoticeLevel::Danger);
            }
        }
        result
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> GatewayResult<T> {
        let response = request
            .send()
            .await
            .map_err(|err| self.classify_send_error(err))?;

        let status = response.status();
        if !status.is_success() {
            let message = Self::error_message(status, response).await;
            return Err(GatewayError::status(status.as_u16(), message));
        }

        let declares_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));
        if !declares_json {
            // Successful transport status without a JSON body: synthesize the
            // generic marker instead of guessing at a payload.
            return Ok(serde_json::from_value(json!({ "success": true }))?);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| GatewayError::transport(err.to_string()))?;
        let mut deserializer = serde_json::Deserializer::from_slice(&bytes);
        serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|err| GatewayError::decode(err.to_string()))
    }

    fn classify_send_error(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::timeout(self.timeout_secs)
        } else {
            GatewayError::transport(err.to_string())
        }
    }

    /// Extract the error message from a failed response body, falling back
    /// to a generic message when the body is absent or unparseable.
    async fn error_message(status: StatusCode, response: Response) -> String {
        let fallback = || format!("An API error occurred (HTTP {})", status.as_u16());
        match response.json::<ErrorBody>().await {
            Ok(body) => body.message.or(body.error).unwrap_or_else(fallback),
            Err(_) => fallback(),
        }
    }
}

#[async_trait]
impl AirQualityApi for HttpGateway {
    async fn session_status(&self) -> GatewayResult<SessionStatus> {
        self.call(Method::GET, "/session_status", None).await
    }

    async fn login(&self, credentials: &Credentials) -> GatewayResult<AuthResponse> {
        let body = serde_json::to_value(credentials)?;
        self.call(Method::POST, "/login", Some(body)).await
    }

    async fn register(&self, credentials: &Credentials) -> GatewayResult<AuthResponse> {
        let body = serde_json::to_value(credentials)?;
        self.call(Method::POST, "/register", Some(body)).await
    }

    async fn logout(&self) -> GatewayResult<Ack> {
        self.call(Method::POST, "/logout", None).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> GatewayResult<AuthResponse> {
        let body = serde_json::to_value(update)?;
        self.call(Method::POST, "/profile", Some(body)).await
    }

    async fn live_conditions(&self) -> GatewayResult<LiveConditions> {
        self.call(Method::GET, "/fetch_current_data", None).await
    }

    async fn predict(&self, features: &FeatureSet) -> GatewayResult<PredictionResult> {
        let body = serde_json::to_value(features)?;
        self.call(Method::POST, "/predict", Some(body)).await
    }

    async fn forecast(&self, hours: u32) -> GatewayResult<ForecastResponse> {
        self.call(
            Method::POST,
            "/forecast_lstm",
            Some(json!({ "hours": hours })),
        )
        .await
    }

    async fn historical_series(&self) -> GatewayResult<Vec<TimeSeriesPoint>> {
        self.call(Method::GET, "/historical_data", None).await
    }

    async fn eda_data(&self, start: NaiveDate, end: NaiveDate) -> GatewayResult<EdaBundle> {
        let path = format!(
            "/eda_data?start={}&end={}",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );
        self.call(Method::GET, &path, None).await
    }
}
