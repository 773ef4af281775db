//! Headline AQI card and its status line.

use crate::api::PredictionResult;
use crate::models::{AqiCategory, NEUTRAL_COLOR};
use crate::session::SessionSnapshot;

/// Rendered prediction card.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionView {
    /// Headline value, rounded to the nearest integer.
    pub aqi_rounded: i64,
    /// Category text as sent by the backend.
    pub category_label: String,
    /// Band color from the local severity table.
    pub band_color: &'static str,
    pub advice: String,
    pub emoji: Option<String>,
    /// Rounded perceived AQI; present only when the backend sent a value.
    pub perceived_rounded: Option<i64>,
    /// Personalized advice; present only when logged in and provided.
    pub personal_advice: Option<String>,
}

/// The card is exactly one of these at any time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DisplayState {
    /// Neutral card, ready for a prediction.
    #[default]
    Idle,
    /// A prediction flow is in flight.
    Loading,
    /// Latest successful prediction.
    Ready(PredictionView),
}

/// The AQI card plus the status line underneath it.
#[derive(Debug, Clone, Default)]
pub struct AqiDisplay {
    state: DisplayState,
    status: String,
}

impl AqiDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, DisplayState::Loading)
    }

    pub fn set_loading(&mut self, status: impl Into<String>) {
        self.state = DisplayState::Loading;
        self.status = status.into();
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Reset to the neutral card, recording the failure in the status line.
    pub fn reset_with_error(&mut self, message: &str) {
        self.state = DisplayState::Idle;
        self.status = format!("Error: {message}");
    }

    /// Project a prediction onto the card.
    pub fn show(&mut self, result: &PredictionResult, session: &SessionSnapshot) {
        self.state = DisplayState::Ready(render_prediction(result, session));
    }
}

/// Map a result to the card model: the severity band comes from the local
/// table, the personalized section is gated on authorization AND presence.
pub fn render_prediction(
    result: &PredictionResult,
    session: &SessionSnapshot,
) -> PredictionView {
    let band_color = AqiCategory::classify(result.predicted_aqi)
        .map(|category| category.color())
        .unwrap_or(NEUTRAL_COLOR);

    let personal_advice = if session.logged_in {
        result.personal_advice.clone()
    } else {
        None
    };

    PredictionView {
        aqi_rounded: result.predicted_aqi.round() as i64,
        category_label: result.category.clone(),
        band_color,
        advice: result.advice.clone(),
        emoji: result.emoji.clone(),
        perceived_rounded: result.perceived_aqi.map(|value| value.round() as i64),
        personal_advice,
    }
}

#[cfg(test)]
#[path = "aqi_display_tests.rs"]
mod aqi_display_tests;
