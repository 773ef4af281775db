use std::sync::Arc;

use super::*;
use crate::remote::LocalGateway;
use crate::views::chart::RecordingBackend;
use crate::views::eda::EDA_CHART_SLOTS;

struct Rig {
    gateway: Arc<LocalGateway>,
    notifier: Notifier,
    backend: Arc<RecordingBackend>,
    registry: Arc<ChartRegistry>,
    controller: EdaController,
}

fn rig() -> Rig {
    let notifier = Notifier::new();
    let gateway = Arc::new(LocalGateway::new(notifier.clone()));
    let backend = Arc::new(RecordingBackend::new());
    let registry = Arc::new(ChartRegistry::new(backend.clone()));
    let api: Arc<dyn AirQualityApi> = gateway.clone();
    let controller = EdaController::new(api, notifier.clone(), registry.clone());
    Rig {
        gateway,
        notifier,
        backend,
        registry,
        controller,
    }
}

fn date(text: &str) -> NaiveDate {
    text.parse().expect("valid date")
}

#[tokio::test]
async fn missing_bounds_fail_fast_without_a_remote_call() {
    let rig = rig();
    let err = rig
        .controller
        .run_analysis(Some(date("2024-01-01")), None)
        .await
        .expect_err("validation failure");
    assert!(err.is_validation());
    assert_eq!(rig.gateway.calls("eda_data"), 0);
    assert_eq!(rig.controller.panel(), EdaPanel::Idle);
    assert!(rig
        .notifier
        .messages()
        .contains(&"Please select both dates.".to_string()));
}

#[tokio::test]
async fn successful_run_populates_every_artifact() {
    let rig = rig();
    rig.controller
        .run_analysis(Some(date("2024-01-01")), Some(date("2024-03-31")))
        .await
        .expect("analysis");

    let EdaPanel::Ready(view) = rig.controller.panel() else {
        panic!("expected a rendered panel");
    };
    assert_eq!(view.stats.len(), 4);
    assert!(!view.table.rows.is_empty());

    for slot in EDA_CHART_SLOTS {
        assert!(rig.registry.contains(slot), "missing chart slot {slot}");
    }
    assert_eq!(rig.backend.live_instances(), EDA_CHART_SLOTS.len());
}

#[tokio::test]
async fn rerunning_never_accumulates_chart_instances() {
    let rig = rig();
    rig.controller
        .run_analysis(Some(date("2024-01-01")), Some(date("2024-03-31")))
        .await
        .expect("first run");
    let first_stats = match rig.controller.panel() {
        EdaPanel::Ready(view) => view.stats,
        other => panic!("expected content, got {other:?}"),
    };

    rig.controller
        .run_analysis(Some(date("2024-05-01")), Some(date("2024-05-07")))
        .await
        .expect("second run");

    // Exactly one live instance per slot, and only the latest bundle shown.
    assert_eq!(rig.backend.live_instances(), EDA_CHART_SLOTS.len());
    let EdaPanel::Ready(view) = rig.controller.panel() else {
        panic!("expected content after rerun");
    };
    assert_ne!(view.stats, first_stats);
    assert!(view.table.rows.len() <= 7);
}

#[tokio::test]
async fn failure_reveals_the_error_panel_and_keeps_prior_charts() {
    let rig = rig();
    rig.controller
        .run_analysis(Some(date("2024-01-01")), Some(date("2024-01-31")))
        .await
        .expect("first run");

    rig.gateway.script_failure("eda_data", "analysis backend down");
    let err = rig
        .controller
        .run_analysis(Some(date("2024-02-01")), Some(date("2024-02-28")))
        .await
        .expect_err("scripted failure");

    assert_eq!(
        rig.controller.panel(),
        EdaPanel::Error(err.user_message())
    );
    // The failed run never drew, so the previous instances are untouched.
    assert_eq!(rig.backend.live_instances(), EDA_CHART_SLOTS.len());
}

#[tokio::test]
async fn inverted_range_surfaces_the_backend_message() {
    let rig = rig();
    let err = rig
        .controller
        .run_analysis(Some(date("2024-03-01")), Some(date("2024-01-01")))
        .await
        .expect_err("empty range");
    assert!(err
        .user_message()
        .contains("No data available for the selected date range."));
    assert!(matches!(rig.controller.panel(), EdaPanel::Error(_)));
}

#[tokio::test]
async fn tabs_change_only_by_explicit_selection() {
    let rig = rig();
    assert_eq!(rig.controller.current_tab(), EdaTab::TimeSeries);

    rig.controller.select_tab(EdaTab::DataTable);
    assert_eq!(rig.controller.current_tab(), EdaTab::DataTable);

    // A successful analysis run does not move the selection.
    rig.controller
        .run_analysis(Some(date("2024-01-01")), Some(date("2024-01-07")))
        .await
        .expect("analysis");
    assert_eq!(rig.controller.current_tab(), EdaTab::DataTable);
}
