//! Login, logout, registration and profile

use chrono::Utc;
use hkadm_common::events::{AdminEvent, EventBus};
use hkadm_common::models::{
    ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateProfile, User,
};
use std::sync::Arc;
use tracing::info;

use crate::error::{ConsoleError, Result};
use crate::gateway::Gateway;

#[derive(Debug)]
pub struct AuthService {
    gateway: Arc<Gateway>,
    events: EventBus,
}

impl AuthService {
    pub fn new(gateway: Arc<Gateway>, events: EventBus) -> Self {
        Self { gateway, events }
    }

    pub async fn current_user(&self) -> Option<User> {
        self.gateway.session().user().await
    }

    pub async fn is_admin(&self) -> bool {
        self.gateway.session().is_admin().await
    }

    pub async fn token(&self) -> Option<String> {
        self.gateway.session().token().await
    }

    /// Authenticate and persist the session
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ConsoleError::Validation(
                "E-mail and password are required.".to_string(),
            ));
        }
        let credentials = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.gateway.login(&credentials).await?;
        let user = response.user.clone();
        self.gateway.session().save(response).await?;

        info!(email = %user.email, admin = user.is_admin(), "Logged in");
        self.announce_session(&user);
        Ok(user)
    }

    /// Create a participant account registered to `request.hackathon_id`
    ///
    /// Does not log in; the stored session is left untouched.
    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        let missing = [
            ("e-mail", &request.email),
            ("password", &request.password),
            ("last name", &request.nom),
            ("first name", &request.prenom),
            ("hackathon", &request.hackathon_id),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty());
        if let Some((field, _)) = missing {
            return Err(ConsoleError::Validation(format!("The {} is required.", field)));
        }
        if !request.email.contains('@') {
            return Err(ConsoleError::Validation(
                "The e-mail address is not valid.".to_string(),
            ));
        }

        let request = RegisterRequest {
            email: request.email.trim().to_string(),
            nom: request.nom.trim().to_string(),
            prenom: request.prenom.trim().to_string(),
            promo: request
                .promo
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            ..request.clone()
        };
        self.gateway.register(&request).await?;
        info!(email = %request.email, hackathon_id = %request.hackathon_id, "Registered");
        Ok(())
    }

    /// Announce a session restored from disk, if any
    pub async fn restore(&self) -> Option<User> {
        let user = self.current_user().await?;
        self.announce_session(&user);
        Some(user)
    }

    pub async fn logout(&self) -> Result<()> {
        self.gateway.session().clear().await?;
        info!("Logged out");
        self.events.emit_lossy(AdminEvent::SessionEnded {
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Fetch the profile and refresh the stored user record
    pub async fn profile(&self) -> Result<User> {
        let user = self.gateway.get_profile().await?;
        self.gateway.session().update_user(user.clone()).await?;
        Ok(user)
    }

    pub async fn update_profile(&self, update: &UpdateProfile) -> Result<User> {
        let user = self.gateway.update_profile(update).await?;
        self.gateway.session().update_user(user.clone()).await?;
        Ok(user)
    }

    pub async fn change_password(&self, current: &str, new: &str) -> Result<()> {
        if new.is_empty() {
            return Err(ConsoleError::Validation(
                "The new password must not be empty.".to_string(),
            ));
        }
        if current == new {
            return Err(ConsoleError::Validation(
                "The new password must differ from the current one.".to_string(),
            ));
        }
        let request = ChangePasswordRequest {
            current_password: current.to_string(),
            new_password: new.to_string(),
        };
        self.gateway.change_password(&request).await?;
        info!("Password changed");
        Ok(())
    }

    fn announce_session(&self, user: &User) {
        self.events.emit_lossy(AdminEvent::SessionStarted {
            email: user.email.clone(),
            is_admin: user.is_admin(),
            timestamp: Utc::now(),
        });
    }
}
