//! Shared fixtures for integration tests.

use std::sync::Arc;

use airsight::notifier::Notifier;
use airsight::remote::{AirQualityApi, LocalGateway};
use airsight::session::SessionContext;
use airsight::views::chart::{ChartRegistry, RecordingBackend};

/// Everything a flow test needs, wired the way the dashboard shell wires it.
pub struct Harness {
    pub notifier: Notifier,
    pub gateway: Arc<LocalGateway>,
    pub api: Arc<dyn AirQualityApi>,
    pub session: SessionContext,
    pub backend: Arc<RecordingBackend>,
    pub registry: Arc<ChartRegistry>,
}

impl Harness {
    pub fn new() -> Self {
        let notifier = Notifier::new();
        let gateway = Arc::new(LocalGateway::new(notifier.clone()));
        let api: Arc<dyn AirQualityApi> = gateway.clone();
        let backend = Arc::new(RecordingBackend::new());
        let registry = Arc::new(ChartRegistry::new(backend.clone()));
        Self {
            notifier,
            gateway,
            api,
            session: SessionContext::new(),
            backend,
            registry,
        }
    }

    pub async fn hydrate(&self) {
        self.session.hydrate(self.gateway.as_ref()).await;
    }
}
