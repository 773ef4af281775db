//! Main time-series chart: historical, forecast, and perceived series.
//!
//! The chart instance lives in one registry slot for the whole page
//! lifetime: [`MainTimeSeriesView::initialize`] creates (or explicitly
//! replaces) it, and every render reuses it with a full dataset swap.

use std::sync::Arc;

use crate::api::TimeSeriesPoint;
use crate::session::SessionSnapshot;
use crate::views::chart::{ChartId, ChartKind, ChartRegistry, ChartSpec, SeriesSpec};

/// Registry slot owned by this view.
pub const MAIN_CHART_SLOT: &str = "main";

const HISTORICAL_COLOR: &str = "#a78bfa";
const FORECAST_COLOR: &str = "#6366f1";
const PERCEIVED_COLOR: &str = "#ec4899";

/// Persistent dashboard chart.
pub struct MainTimeSeriesView {
    registry: Arc<ChartRegistry>,
}

impl MainTimeSeriesView {
    pub fn new(registry: Arc<ChartRegistry>) -> Self {
        Self { registry }
    }

    /// Create the chart instance, disposing any prior one. Called once at
    /// dashboard initialization.
    pub fn initialize(&self) -> ChartId {
        self.registry
            .replace(MAIN_CHART_SLOT, ChartSpec::empty(ChartKind::Line))
    }

    /// Replace the full dataset.
    ///
    /// Always renders the historical series. The forecast series appears only
    /// when non-empty, and the perceived series only when the user is logged
    /// in and at least one forecast point carries a perceived value. Absent
    /// series are absent, not empty-but-drawn.
    pub fn render(
        &self,
        historical: &[TimeSeriesPoint],
        forecast: &[TimeSeriesPoint],
        session: &SessionSnapshot,
    ) -> ChartId {
        let mut series = vec![SeriesSpec::new(
            "Historical AQI",
            timestamps(historical),
            historical.iter().map(|p| p.yhat).collect(),
        )
        .color(HISTORICAL_COLOR)];

        if !forecast.is_empty() {
            series.push(
                SeriesSpec::new(
                    "Forecasted AQI",
                    timestamps(forecast),
                    forecast.iter().map(|p| p.yhat).collect(),
                )
                .color(FORECAST_COLOR)
                .dashed(),
            );

            let any_perceived = forecast.iter().any(|p| p.perceived_yhat.is_some());
            if session.logged_in && any_perceived {
                series.push(
                    SeriesSpec::with_gaps(
                        "Perceived AQI",
                        timestamps(forecast),
                        forecast.iter().map(|p| p.perceived_yhat).collect(),
                    )
                    .color(PERCEIVED_COLOR)
                    .dashed(),
                );
            }
        }

        self.registry
            .upsert(MAIN_CHART_SLOT, ChartSpec::new(ChartKind::Line, series))
    }
}

fn timestamps(points: &[TimeSeriesPoint]) -> Vec<String> {
    points.iter().map(|p| p.ds.clone()).collect()
}

#[cfg(test)]
#[path = "timeseries_tests.rs"]
mod timeseries_tests;
