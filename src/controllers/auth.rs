//! Authentication and profile flows.
//!
//! Successful login/registration/logout yield a [`Redirect`]; the embedding
//! shell navigates, and the next page lifetime hydrates a fresh session.
//! Profile updates are the one auth flow that mutates the live session, and
//! they do so through the session's single merge path.

use std::sync::Arc;

use tracing::info;

use crate::api::{Credentials, Profile, ProfileUpdate};
use crate::notifier::{NoticeLevel, Notifier};
use crate::remote::{AirQualityApi, GatewayError, GatewayResult};
use crate::session::SessionContext;

/// Navigation target issued after a successful auth action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Home,
    Dashboard,
    Login,
}

pub struct AuthController {
    api: Arc<dyn AirQualityApi>,
    session: SessionContext,
    notifier: Notifier,
}

impl AuthController {
    pub fn new(api: Arc<dyn AirQualityApi>, session: SessionContext, notifier: Notifier) -> Self {
        Self {
            api,
            session,
            notifier,
        }
    }

    /// Log in. `Ok(None)` means the backend answered without granting a
    /// session; the gateway has already surfaced any failure message.
    pub async fn login(&self, credentials: &Credentials) -> GatewayResult<Option<Redirect>> {
        let response = self.api.login(credentials).await?;
        if !response.success {
            return Ok(None);
        }
        self.notifier.notify(
            response
                .message
                .unwrap_or_else(|| "Login successful!".to_string()),
            NoticeLevel::Success,
        );
        info!(username = %credentials.username, "login succeeded");
        Ok(Some(Redirect::Dashboard))
    }

    /// Register a new account; success redirects to the login page.
    pub async fn register(&self, credentials: &Credentials) -> GatewayResult<Option<Redirect>> {
        let response = self.api.register(credentials).await?;
        if !response.success {
            return Ok(None);
        }
        self.notifier.notify(
            response
                .message
                .unwrap_or_else(|| "Registration successful! Please log in.".to_string()),
            NoticeLevel::Success,
        );
        Ok(Some(Redirect::Login))
    }

    /// Log out; success redirects to the home page.
    pub async fn logout(&self) -> GatewayResult<Redirect> {
        self.api.logout().await?;
        self.notifier
            .notify("You have been logged out.", NoticeLevel::Success);
        Ok(Redirect::Home)
    }

    /// Update profile fields and merge the stored result into the session.
    /// This is the only session write besides hydration.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> GatewayResult<Profile> {
        let response = self.api.update_profile(update).await?;
        match (response.success, response.user) {
            (true, Some(user)) => {
                self.session.apply_profile_update(&user);
                self.notifier.notify(
                    response
                        .message
                        .unwrap_or_else(|| "Profile updated successfully!".to_string()),
                    NoticeLevel::Success,
                );
                Ok(user)
            }
            _ => {
                let err = GatewayError::decode("profile update response did not include the stored profile");
                self.notifier.notify(err.user_message(), NoticeLevel::Danger);
                Err(err)
            }
        }
    }
}
