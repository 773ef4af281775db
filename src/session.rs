//! Process-wide session and capability state.
//!
//! Hydrated exactly once at startup and shared read-only with every
//! controller. Write sites are deliberately enumerable: [`SessionContext::hydrate`]
//! and [`SessionContext::apply_profile_update`] are the only two mutation
//! paths; everything else works from [`SessionSnapshot`] copies.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::api::{Profile, SessionStatus};
use crate::remote::AirQualityApi;

#[derive(Debug, Clone, Default)]
struct SessionState {
    logged_in: bool,
    user: Option<Profile>,
    features: Vec<String>,
    hydrated: bool,
}

/// Read-only copy of the session handed to views and controllers.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub logged_in: bool,
    pub user: Option<Profile>,
    /// Feature names the prediction model currently accepts, in order.
    pub features: Vec<String>,
}

impl SessionSnapshot {
    /// The logged-out, feature-less snapshot.
    pub fn logged_out() -> Self {
        Self::default()
    }
}

/// Shared, injectable session handle. Cloning shares the same state.
#[derive(Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<SessionState>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate from the session endpoint, once per process lifetime.
    ///
    /// Failure is non-fatal: the dashboard proceeds logged out with an empty
    /// feature list, and every other component keeps initializing.
    pub async fn hydrate(&self, api: &dyn AirQualityApi) {
        if self.inner.read().hydrated {
            warn!("session already hydrated; ignoring repeated hydration");
            return;
        }
        match api.session_status().await {
            Ok(status) => self.apply_status(status),
            Err(err) => {
                warn!(error = %err, "session hydration failed; proceeding logged out");
                let mut state = self.inner.write();
                *state = SessionState {
                    hydrated: true,
                    ..SessionState::default()
                };
            }
        }
    }

    fn apply_status(&self, status: SessionStatus) {
        let mut state = self.inner.write();
        state.logged_in = status.logged_in;
        state.user = status.user;
        state.features = status.features;
        state.hydrated = true;
        info!(
            logged_in = state.logged_in,
            features = state.features.len(),
            "session hydrated"
        );
    }

    /// Merge a successful profile-update response into the existing profile.
    ///
    /// Only `age` and `conditions` are taken from the response; the rest of
    /// the session (login flag, username, features) is left untouched.
    pub fn apply_profile_update(&self, updated: &Profile) {
        let mut state = self.inner.write();
        let user = state.user.get_or_insert_with(Profile::default);
        user.age = updated.age;
        user.conditions = updated.conditions.clone();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.inner.read();
        SessionSnapshot {
            logged_in: state.logged_in,
            user: state.user.clone(),
            features: state.features.clone(),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.read().logged_in
    }

    pub fn features(&self) -> Vec<String> {
        self.inner.read().features.clone()
    }
}
