//! EDA panel view models: tabs, panel state, stats cards, table, and the
//! chart specs fanned out from one analysis bundle.

use crate::api::{EdaBundle, EdaStats, SeriesData, TableData};
use crate::models::category_color;
use crate::views::chart::{ChartKind, ChartSpec, SeriesSpec};

/// Registry slot prefix for the analysis run group.
pub const EDA_SLOT_PREFIX: &str = "eda.";

/// All chart slots of one analysis run.
pub const EDA_CHART_SLOTS: [&str; 6] = [
    "eda.aqi_over_time",
    "eda.categories",
    "eda.dist",
    "eda.by_month",
    "eda.by_day_of_week",
    "eda.by_hour",
];

/// Tabs of the analysis panel. Transitions happen only through explicit
/// selection; there are no automatic transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdaTab {
    #[default]
    TimeSeries,
    Trends,
    DataTable,
}

/// Panel state. Loading, content, and error are mutually exclusive by
/// construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EdaPanel {
    /// No analysis requested yet.
    #[default]
    Idle,
    Loading,
    Ready(EdaView),
    Error(String),
}

/// One summary statistic card.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
}

/// Rendered data table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EdaTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Shown instead of the table when there are no rows.
    pub empty_message: Option<&'static str>,
}

/// Non-chart artifacts of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct EdaView {
    pub stats: Vec<StatCard>,
    pub table: EdaTable,
}

impl EdaView {
    pub fn from_bundle(bundle: &EdaBundle) -> Self {
        Self {
            stats: stat_cards(&bundle.time_series.stats),
            table: render_table(&bundle.table_data),
        }
    }
}

/// Summary cards in fixed order, with "N/A" for absent values.
pub fn stat_cards(stats: &EdaStats) -> Vec<StatCard> {
    let card = |label: &'static str, value: Option<f64>| StatCard {
        label,
        value: value
            .map(|v| format_value(v))
            .unwrap_or_else(|| "N/A".to_string()),
    };
    vec![
        card("Average", stats.mean),
        card("Median", stats.median),
        card("Max", stats.max),
        card("Min", stats.min),
    ]
}

/// Stringify the raw rows in column order; null cells render as a dash.
pub fn render_table(data: &TableData) -> EdaTable {
    if data.rows.is_empty() {
        return EdaTable {
            columns: data.columns.clone(),
            rows: Vec::new(),
            empty_message: Some("No data to display."),
        };
    }
    let rows = data
        .rows
        .iter()
        .map(|row| {
            data.columns
                .iter()
                .map(|column| match row.get(column) {
                    None | Some(serde_json::Value::Null) => "-".to_string(),
                    Some(serde_json::Value::String(text)) => text.clone(),
                    Some(serde_json::Value::Number(number)) => number.to_string(),
                    Some(other) => other.to_string(),
                })
                .collect()
        })
        .collect();
    EdaTable {
        columns: data.columns.clone(),
        rows,
        empty_message: None,
    }
}

/// Chart specs for every slot of the run group.
pub fn chart_specs(bundle: &EdaBundle) -> Vec<(&'static str, ChartSpec)> {
    let ts = &bundle.time_series;
    let dd = &bundle.deep_dive;
    vec![
        (
            "eda.aqi_over_time",
            line_chart("Daily Average AQI", &ts.aqi_over_time, "#8b5cf6"),
        ),
        ("eda.categories", category_pie(&ts.categories)),
        ("eda.dist", bar_chart("Frequency (Hours)", &ts.dist, "#4299e1")),
        ("eda.by_month", bar_chart("Avg AQI", &dd.by_month, "#6366f1")),
        (
            "eda.by_day_of_week",
            bar_chart("Avg AQI", &dd.by_day_of_week, "#a78bfa"),
        ),
        ("eda.by_hour", bar_chart("Avg AQI", &dd.by_hour, "#ec4899")),
    ]
}

fn line_chart(label: &str, data: &SeriesData, color: &str) -> ChartSpec {
    ChartSpec::new(
        ChartKind::Line,
        vec![SeriesSpec::new(label, data.labels.clone(), data.values.clone()).color(color)],
    )
}

fn bar_chart(label: &str, data: &SeriesData, color: &str) -> ChartSpec {
    ChartSpec::new(
        ChartKind::Bar,
        vec![SeriesSpec::new(label, data.labels.clone(), data.values.clone()).color(color)],
    )
}

/// Pie of category frequencies, slice colors from the fixed lookup so an
/// unknown label degrades to the neutral color.
fn category_pie(data: &SeriesData) -> ChartSpec {
    let slice_colors = data
        .labels
        .iter()
        .map(|label| category_color(label).to_string())
        .collect();
    ChartSpec::new(
        ChartKind::Pie,
        vec![
            SeriesSpec::new("AQI Categories", data.labels.clone(), data.values.clone())
                .point_colors(slice_colors),
        ],
    )
}

fn format_value(value: f64) -> String {
    if (value - value.round()).abs() < f64::EPSILON {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
#[path = "eda_tests.rs"]
mod eda_tests;
