//! Prediction flows: live fetch-and-predict and manual submission.
//!
//! Both entry points converge on one render step. Any failure resets the
//! display to its neutral state with the error in the status line; the card
//! is never left loading. Responses are tagged with a sequence number so a
//! stale response from a superseded invocation is discarded instead of
//! overwriting a newer result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::api::PredictionResult;
use crate::models::FeatureSet;
use crate::notifier::{NoticeLevel, Notifier};
use crate::remote::{AirQualityApi, GatewayError, GatewayResult};
use crate::session::SessionContext;
use crate::views::aqi_display::AqiDisplay;
use crate::views::manual_form::ManualForm;

pub struct PredictionController {
    api: Arc<dyn AirQualityApi>,
    session: SessionContext,
    notifier: Notifier,
    display: RwLock<AqiDisplay>,
    form: RwLock<ManualForm>,
    seq: AtomicU64,
}

impl PredictionController {
    pub fn new(api: Arc<dyn AirQualityApi>, session: SessionContext, notifier: Notifier) -> Self {
        Self {
            api,
            session,
            notifier,
            display: RwLock::new(AqiDisplay::new()),
            form: RwLock::new(ManualForm::default()),
            seq: AtomicU64::new(0),
        }
    }

    /// Build the manual form from the currently advertised features. Called
    /// after session hydration.
    pub fn init_form(&self) {
        *self.form.write() = ManualForm::from_features(&self.session.features());
    }

    /// Current card + status line.
    pub fn display(&self) -> AqiDisplay {
        self.display.read().clone()
    }

    /// Current manual form model.
    pub fn form(&self) -> ManualForm {
        self.form.read().clone()
    }

    /// Live path: fetch current readings, filter them to the session's
    /// feature list, mirror matched values into the manual form, then
    /// predict with the filtered set.
    pub async fn fetch_and_predict(&self) -> GatewayResult<()> {
        let run = self.begin_run();
        self.display
            .write()
            .set_loading("Fetching live conditions...");

        let result = self.run_live().await;
        match result {
            Ok(prediction) => {
                self.commit(run, &prediction, "Live prediction complete!");
                Ok(())
            }
            Err(err) => {
                self.fail(run, &err);
                Err(err)
            }
        }
    }

    async fn run_live(&self) -> GatewayResult<PredictionResult> {
        let conditions = self.api.live_conditions().await?;
        let features = self.session.features();
        let set = FeatureSet::from_readings(&conditions.data, &features);
        debug!(
            matched = set.len(),
            advertised = features.len(),
            "filtered live readings"
        );

        // Mirror matched values into the form for transparency.
        {
            let mut form = self.form.write();
            for (name, value) in set.iter() {
                form.set_value(name, *value);
            }
        }

        self.display.write().set_status("Predicting with live data...");
        self.api.predict(&set).await
    }

    /// Manual path: predict directly from raw form values, no filtering.
    pub async fn predict_manual(&self, values: FeatureSet) -> GatewayResult<()> {
        let run = self.begin_run();
        self.display.write().set_loading("Predicting...");

        match self.api.predict(&values).await {
            Ok(prediction) => {
                if self.commit(run, &prediction, "Manual prediction complete!") {
                    self.notifier
                        .notify("Manual prediction successful!", NoticeLevel::Success);
                }
                Ok(())
            }
            Err(err) => {
                self.fail(run, &err);
                Err(err)
            }
        }
    }

    fn begin_run(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, run: u64) -> bool {
        self.seq.load(Ordering::SeqCst) == run
    }

    /// Apply a successful response unless a newer invocation superseded it.
    fn commit(&self, run: u64, prediction: &PredictionResult, status: &str) -> bool {
        if !self.is_current(run) {
            debug!(run, "discarding stale prediction response");
            return false;
        }
        let session = self.session.snapshot();
        let mut display = self.display.write();
        display.show(prediction, &session);
        display.set_status(status);
        info!(aqi = prediction.predicted_aqi, "prediction rendered");
        true
    }

    fn fail(&self, run: u64, err: &GatewayError) {
        if !self.is_current(run) {
            debug!(run, "discarding stale prediction failure");
            return;
        }
        self.display.write().reset_with_error(&err.user_message());
    }
}

#[cfg(test)]
#[path = "prediction_tests.rs"]
mod prediction_tests;
