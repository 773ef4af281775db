//! Forecast flow: one request fans out to the main chart and the forecast
//! table.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::notifier::{NoticeLevel, Notifier};
use crate::remote::{AirQualityApi, GatewayError, GatewayResult};
use crate::session::SessionContext;
use crate::views::chart::ChartRegistry;
use crate::views::forecast_table::{self, ForecastTable};
use crate::views::timeseries::MainTimeSeriesView;

pub struct ForecastController {
    api: Arc<dyn AirQualityApi>,
    session: SessionContext,
    notifier: Notifier,
    chart: MainTimeSeriesView,
    table: RwLock<ForecastTable>,
    seq: AtomicU64,
}

impl ForecastController {
    pub fn new(
        api: Arc<dyn AirQualityApi>,
        session: SessionContext,
        notifier: Notifier,
        registry: Arc<ChartRegistry>,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
            chart: MainTimeSeriesView::new(registry),
            table: RwLock::new(ForecastTable::default()),
            seq: AtomicU64::new(0),
        }
    }

    /// Create the persistent chart instance. Called once at dashboard
    /// initialization.
    pub fn initialize_chart(&self) {
        self.chart.initialize();
    }

    /// Current table model.
    pub fn table(&self) -> ForecastTable {
        self.table.read().clone()
    }

    /// Load the historical series shown before any forecast is requested.
    /// Failure is logged but never fatal to dashboard startup.
    pub async fn load_historical(&self) {
        match self.api.historical_series().await {
            Ok(points) => {
                let session = self.session.snapshot();
                self.chart.render(&points, &[], &session);
            }
            Err(err) => debug!(error = %err, "initial historical series failed"),
        }
    }

    /// Request an N-hour forecast and rebuild both chart and table.
    pub async fn request_forecast(&self, hours: u32) -> GatewayResult<()> {
        if hours == 0 {
            let err = GatewayError::validation("Forecast horizon must be at least one hour.");
            self.notifier.notify(err.user_message(), NoticeLevel::Danger);
            return Err(err);
        }

        let run = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.notifier
            .notify("Generating forecast...", NoticeLevel::Info);

        let response = self.api.forecast(hours).await?;
        if self.seq.load(Ordering::SeqCst) != run {
            debug!(run, "discarding stale forecast response");
            return Ok(());
        }

        let session = self.session.snapshot();
        self.chart
            .render(&response.historical, &response.forecast, &session);
        *self.table.write() = forecast_table::render(&response.forecast, &session);
        info!(
            hours,
            historical = response.historical.len(),
            forecast = response.forecast.len(),
            "forecast rendered"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "forecast_tests.rs"]
mod forecast_tests;
