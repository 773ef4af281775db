//! Tabular forecast rendering.
//!
//! The perceived column is present only under the same gating as the chart's
//! perceived series. When the column is present, a row without a value shows
//! a dash placeholder, which is distinct from the column being hidden
//! entirely for unauthorized users.

use chrono::NaiveDateTime;

use crate::api::TimeSeriesPoint;
use crate::models::AqiCategory;
use crate::session::SessionSnapshot;

/// One rendered table row.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRow {
    /// Wall-clock time of the point (HH:MM).
    pub time: String,
    pub ambient_rounded: i64,
    /// Perceived value; `None` renders as a dash when the column is shown.
    pub perceived_rounded: Option<i64>,
    pub category_label: String,
}

impl ForecastRow {
    /// Cell text for the perceived column.
    pub fn perceived_cell(&self) -> String {
        match self.perceived_rounded {
            Some(value) => value.to_string(),
            None => "-".to_string(),
        }
    }
}

/// Rendered forecast table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastTable {
    /// Whether the perceived column exists at all.
    pub show_perceived: bool,
    pub rows: Vec<ForecastRow>,
    /// Hidden entirely when there is nothing to show.
    pub visible: bool,
}

/// Build the table from a forecast sequence.
pub fn render(forecast: &[TimeSeriesPoint], session: &SessionSnapshot) -> ForecastTable {
    if forecast.is_empty() {
        return ForecastTable::default();
    }

    let show_perceived =
        session.logged_in && forecast.iter().any(|p| p.perceived_yhat.is_some());

    let rows = forecast
        .iter()
        .map(|point| ForecastRow {
            time: format_time(&point.ds),
            ambient_rounded: point.yhat.round() as i64,
            perceived_rounded: if show_perceived {
                point.perceived_yhat.map(|v| v.round() as i64)
            } else {
                None
            },
            category_label: AqiCategory::classify(point.yhat)
                .map(|c| c.label().to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
        })
        .collect();

    ForecastTable {
        show_perceived,
        rows,
        visible: true,
    }
}

fn format_time(ds: &str) -> String {
    NaiveDateTime::parse_from_str(ds, "%Y-%m-%dT%H:%M:%S")
        .map(|ts| ts.format("%H:%M").to_string())
        .unwrap_or_else(|_| ds.to_string())
}
