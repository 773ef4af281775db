//! Airsight dashboard CLI.
//!
//! Drives one full dashboard cycle against the backend and prints the
//! resulting view models: hydrate the session, fetch-and-predict, request a
//! forecast, run an EDA analysis. Useful as a smoke client and as a
//! reference for embedding the controllers.
//!
//! # Usage
//!
//! ```bash
//! # Against a live backend
//! AIRSIGHT_API_URL=http://127.0.0.1:5001 cargo run --bin airsight-dash
//!
//! # Against the deterministic in-memory backend
//! AIRSIGHT_DEMO=1 cargo run --bin airsight-dash
//! ```
//!
//! # Environment Variables
//!
//! - `AIRSIGHT_API_URL`: backend base URL (default: http://127.0.0.1:5001)
//! - `AIRSIGHT_DEMO`: set to 1 to use the in-memory backend
//! - `AIRSIGHT_TIMEOUT_SECS`: per-request deadline (default: 10)
//! - `RUST_LOG`: log filter (default: info)

use std::env;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use airsight::controllers::{EdaController, ForecastController, PredictionController};
use airsight::notifier::Notifier;
use airsight::remote::{AirQualityApi, HttpGateway};
use airsight::session::SessionContext;
use airsight::views::aqi_display::DisplayState;
use airsight::views::chart::{ChartRegistry, RecordingBackend};
use airsight::views::eda::EdaPanel;
use airsight::views::nav;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Airsight dashboard client");

    let notifier = Notifier::new();
    let api = build_gateway(&notifier)?;

    // Hydrate once; failure is non-fatal and leaves us logged out.
    let session = SessionContext::new();
    session.hydrate(api.as_ref()).await;
    let snapshot = session.snapshot();
    let links: Vec<&str> = nav::render(&snapshot).iter().map(|l| l.label).collect();
    info!(logged_in = snapshot.logged_in, nav = ?links, "session ready");

    let backend = Arc::new(RecordingBackend::new());
    let registry = Arc::new(ChartRegistry::new(backend.clone()));

    // Prediction flow.
    let prediction =
        PredictionController::new(api.clone(), session.clone(), notifier.clone());
    prediction.init_form();
    if prediction.fetch_and_predict().await.is_ok() {
        if let DisplayState::Ready(view) = prediction.display().state() {
            info!(
                aqi = view.aqi_rounded,
                category = %view.category_label,
                advice = %view.advice,
                "live prediction"
            );
            if let Some(perceived) = view.perceived_rounded {
                info!(perceived, "personalized AQI");
            }
        }
    }

    // Forecast flow.
    let forecast = ForecastController::new(
        api.clone(),
        session.clone(),
        notifier.clone(),
        registry.clone(),
    );
    forecast.initialize_chart();
    forecast.load_historical().await;
    if forecast.request_forecast(24).await.is_ok() {
        let table = forecast.table();
        info!(
            rows = table.rows.len(),
            perceived_column = table.show_perceived,
            "forecast table ready"
        );
    }

    // EDA flow over the trailing year.
    let eda = EdaController::new(api.clone(), notifier.clone(), registry.clone());
    let end = Utc::now().date_naive();
    let start = end - ChronoDuration::days(365);
    if eda.run_analysis(Some(start), Some(end)).await.is_ok() {
        if let EdaPanel::Ready(view) = eda.panel() {
            for card in &view.stats {
                info!(stat = card.label, value = %card.value, "analysis stat");
            }
            info!(
                charts = backend.live_instances(),
                table_rows = view.table.rows.len(),
                "analysis rendered"
            );
        }
    }

    for notice in notifier.active() {
        info!(level = ?notice.level, "{}", notice.message);
    }

    Ok(())
}

fn build_gateway(notifier: &Notifier) -> anyhow::Result<Arc<dyn AirQualityApi>> {
    let demo = env::var("AIRSIGHT_DEMO").is_ok_and(|v| v == "1");
    if demo {
        #[cfg(feature = "local-gateway")]
        {
            info!("using the in-memory demo backend");
            return Ok(Arc::new(airsight::remote::LocalGateway::new(
                notifier.clone(),
            )));
        }
        #[cfg(not(feature = "local-gateway"))]
        {
            anyhow::bail!("demo mode requires the `local-gateway` feature");
        }
    }

    let base_url =
        env::var("AIRSIGHT_API_URL").unwrap_or_else(|_| "http://127.0.0.1:5001".to_string());
    let timeout = env::var("AIRSIGHT_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(airsight::remote::http::DEFAULT_TIMEOUT_SECS);
    info!(%base_url, timeout, "using the HTTP backend");
    Ok(Arc::new(HttpGateway::with_timeout(
        base_url,
        notifier.clone(),
        Duration::from_secs(timeout),
    )))
}
