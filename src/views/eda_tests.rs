use serde_json::json;

use super::*;
use crate::api::{EdaDeepDive, EdaTimeSeries};
use crate::models::NEUTRAL_COLOR;
use crate::views::chart::ChartKind;

fn series(labels: &[&str], values: &[f64]) -> SeriesData {
    SeriesData {
        labels: labels.iter().map(|l| l.to_string()).collect(),
        values: values.to_vec(),
    }
}

fn sample_bundle() -> EdaBundle {
    let mut row = serde_json::Map::new();
    row.insert("Datetime".to_string(), json!("2024-01-01T00:00:00"));
    row.insert("AQI".to_string(), json!(87.4));
    row.insert("Temp (C)".to_string(), json!(serde_json::Value::Null));

    EdaBundle {
        time_series: EdaTimeSeries {
            stats: EdaStats {
                mean: Some(72.25),
                median: Some(70.0),
                max: Some(188.0),
                min: None,
            },
            aqi_over_time: series(&["2024-01-01", "2024-01-02"], &[60.0, 84.5]),
            categories: series(&["Good", "Mystery Band"], &[10.0, 2.0]),
            dist: series(&["0-25", "25-50"], &[4.0, 9.0]),
        },
        deep_dive: EdaDeepDive {
            by_month: series(&["January"], &[65.0]),
            by_day_of_week: series(&["Monday", "Tuesday"], &[61.0, 66.0]),
            by_hour: series(&["00:00", "01:00"], &[55.0, 57.5]),
        },
        table_data: TableData {
            columns: vec![
                "Datetime".to_string(),
                "AQI".to_string(),
                "Temp (C)".to_string(),
            ],
            rows: vec![row],
        },
    }
}

#[test]
fn stat_cards_fall_back_to_na() {
    let cards = stat_cards(&sample_bundle().time_series.stats);
    let rendered: Vec<(&str, &str)> = cards
        .iter()
        .map(|c| (c.label, c.value.as_str()))
        .collect();
    assert_eq!(
        rendered,
        vec![
            ("Average", "72.25"),
            ("Median", "70"),
            ("Max", "188"),
            ("Min", "N/A"),
        ]
    );
}

#[test]
fn table_rows_follow_column_order_and_dash_nulls() {
    let table = render_table(&sample_bundle().table_data);
    assert_eq!(table.empty_message, None);
    assert_eq!(
        table.rows,
        vec![vec![
            "2024-01-01T00:00:00".to_string(),
            "87.4".to_string(),
            "-".to_string(),
        ]]
    );
}

#[test]
fn empty_table_shows_a_message_instead_of_rows() {
    let table = render_table(&TableData::default());
    assert!(table.rows.is_empty());
    assert_eq!(table.empty_message, Some("No data to display."));
}

#[test]
fn chart_specs_cover_every_slot() {
    let specs = chart_specs(&sample_bundle());
    let slots: Vec<&str> = specs.iter().map(|(slot, _)| *slot).collect();
    assert_eq!(slots, EDA_CHART_SLOTS.to_vec());
    assert!(slots.iter().all(|slot| slot.starts_with(EDA_SLOT_PREFIX)));
}

#[test]
fn category_pie_uses_the_fixed_palette_with_neutral_fallback() {
    let specs = chart_specs(&sample_bundle());
    let (_, pie) = specs
        .iter()
        .find(|(slot, _)| *slot == "eda.categories")
        .expect("categories slot");
    assert_eq!(pie.kind, ChartKind::Pie);
    let colors = &pie.series[0].point_colors;
    assert_eq!(colors[0], "#28a745");
    assert_eq!(colors[1], NEUTRAL_COLOR);
}

#[test]
fn tab_default_is_time_series() {
    assert_eq!(EdaTab::default(), EdaTab::TimeSeries);
}
