//! EDA analysis flow: date-ranged analytics fanned out to a table, six chart
//! instances, and summary statistic cards.
//!
//! The panel is a single state enum, so the loading indicator, the content
//! area, and the error panel can never be visible at the same time. Chart
//! instances from a prior run are disposed before the replacements are
//! drawn, keeping the live-instance count constant across repeated runs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::notifier::{NoticeLevel, Notifier};
use crate::remote::{AirQualityApi, GatewayError, GatewayResult};
use crate::views::chart::ChartRegistry;
use crate::views::eda::{self, EdaPanel, EdaTab, EdaView, EDA_SLOT_PREFIX};

pub struct EdaController {
    api: Arc<dyn AirQualityApi>,
    notifier: Notifier,
    registry: Arc<ChartRegistry>,
    panel: RwLock<EdaPanel>,
    tab: RwLock<EdaTab>,
    seq: AtomicU64,
}

impl EdaController {
    pub fn new(
        api: Arc<dyn AirQualityApi>,
        notifier: Notifier,
        registry: Arc<ChartRegistry>,
    ) -> Self {
        Self {
            api,
            notifier,
            registry,
            panel: RwLock::new(EdaPanel::Idle),
            tab: RwLock::new(EdaTab::default()),
            seq: AtomicU64::new(0),
        }
    }

    pub fn panel(&self) -> EdaPanel {
        self.panel.read().clone()
    }

    pub fn current_tab(&self) -> EdaTab {
        *self.tab.read()
    }

    /// Explicit tab selection is the only transition source.
    pub fn select_tab(&self, tab: EdaTab) {
        *self.tab.write() = tab;
    }

    /// Run a date-ranged analysis, replacing every visual artifact of the
    /// previous run.
    pub async fn run_analysis(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> GatewayResult<()> {
        let (Some(start), Some(end)) = (start, end) else {
            let err = GatewayError::validation("Please select both dates.");
            self.notifier.notify(err.user_message(), NoticeLevel::Danger);
            return Err(err);
        };

        let run = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        *self.panel.write() = EdaPanel::Loading;

        match self.api.eda_data(start, end).await {
            Ok(bundle) => {
                if self.seq.load(Ordering::SeqCst) != run {
                    debug!(run, "discarding stale analysis response");
                    return Ok(());
                }
                if !bundle.series_consistent() {
                    let err =
                        GatewayError::decode("analysis bundle has mismatched series lengths");
                    self.notifier.notify(err.user_message(), NoticeLevel::Danger);
                    *self.panel.write() = EdaPanel::Error(err.user_message());
                    return Err(err);
                }

                // Release the previous run's instances before drawing the
                // replacements.
                self.registry.dispose_group(EDA_SLOT_PREFIX);
                for (slot, spec) in eda::chart_specs(&bundle) {
                    self.registry.replace(slot, spec);
                }
                *self.panel.write() = EdaPanel::Ready(EdaView::from_bundle(&bundle));
                info!(%start, %end, "analysis rendered");
                Ok(())
            }
            Err(err) => {
                if self.seq.load(Ordering::SeqCst) == run {
                    *self.panel.write() = EdaPanel::Error(err.user_message());
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "eda_tests.rs"]
mod eda_tests;
