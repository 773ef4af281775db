use std::sync::Arc;

use super::*;
use crate::api::Profile;
use crate::remote::LocalGateway;
use crate::views::chart::RecordingBackend;
use crate::views::timeseries::MAIN_CHART_SLOT;

struct Rig {
    gateway: Arc<LocalGateway>,
    session: SessionContext,
    backend: Arc<RecordingBackend>,
    registry: Arc<ChartRegistry>,
    controller: ForecastController,
}

fn rig() -> Rig {
    let notifier = Notifier::new();
    let gateway = Arc::new(LocalGateway::new(notifier.clone()));
    let session = SessionContext::new();
    let backend = Arc::new(RecordingBackend::new());
    let registry = Arc::new(ChartRegistry::new(backend.clone()));
    let api: Arc<dyn AirQualityApi> = gateway.clone();
    let controller =
        ForecastController::new(api, session.clone(), notifier, registry.clone());
    Rig {
        gateway,
        session,
        backend,
        registry,
        controller,
    }
}

#[tokio::test]
async fn zero_hours_fails_fast_without_a_remote_call() {
    let rig = rig();
    let err = rig
        .controller
        .request_forecast(0)
        .await
        .expect_err("validation failure");
    assert!(err.is_validation());
    assert_eq!(rig.gateway.calls("forecast"), 0);
}

#[tokio::test]
async fn forecast_updates_chart_and_table_together() {
    let rig = rig();
    rig.session.hydrate(rig.gateway.as_ref()).await;
    rig.controller.initialize_chart();
    rig.controller.load_historical().await;

    rig.controller
        .request_forecast(24)
        .await
        .expect("forecast");

    let id = rig.registry.id_of(MAIN_CHART_SLOT).expect("main chart");
    let spec = rig.backend.spec_of(id).expect("live instance");
    // Logged out: historical + forecast, no perceived series.
    assert_eq!(spec.series.len(), 2);

    let table = rig.controller.table();
    assert!(table.visible);
    assert!(!table.show_perceived);
    assert_eq!(table.rows.len(), 24);
}

#[tokio::test]
async fn profiled_user_gets_the_perceived_series_and_column() {
    let rig = rig();
    rig.gateway.log_in_as(Profile {
        username: Some("demo".to_string()),
        age: Some(70),
        conditions: None,
    });
    rig.session.hydrate(rig.gateway.as_ref()).await;
    rig.controller.initialize_chart();

    rig.controller
        .request_forecast(24)
        .await
        .expect("forecast");

    let id = rig.registry.id_of(MAIN_CHART_SLOT).expect("main chart");
    let spec = rig.backend.spec_of(id).expect("live instance");
    assert_eq!(spec.series.len(), 3);

    let table = rig.controller.table();
    assert!(table.show_perceived);
    // Some rows lack a personalized value and render a dash.
    assert!(table.rows.iter().any(|row| row.perceived_cell() == "-"));
    assert!(table
        .rows
        .iter()
        .any(|row| row.perceived_cell() != "-"));
}

#[tokio::test]
async fn forecast_failure_leaves_the_previous_table_alone() {
    let rig = rig();
    rig.session.hydrate(rig.gateway.as_ref()).await;
    rig.controller.initialize_chart();
    rig.controller
        .request_forecast(12)
        .await
        .expect("forecast");
    let before = rig.controller.table();

    rig.gateway.script_failure("forecast", "model cold");
    let err = rig
        .controller
        .request_forecast(12)
        .await
        .expect_err("scripted failure");
    assert_eq!(err.user_message(), "model cold");
    assert_eq!(rig.controller.table(), before);
}
