//! User accounts (admin)

use chrono::Utc;
use hkadm_common::events::{AdminEvent, EventBus};
use hkadm_common::models::{UpdateUser, User};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::require_admin;
use crate::error::{ConsoleError, Result};
use crate::gateway::Gateway;

#[derive(Debug)]
pub struct UsersStore {
    gateway: Arc<Gateway>,
    events: EventBus,
    users: RwLock<Vec<User>>,
}

impl UsersStore {
    pub fn new(gateway: Arc<Gateway>, events: EventBus) -> Self {
        Self {
            gateway,
            events,
            users: RwLock::new(Vec::new()),
        }
    }

    pub async fn users(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    pub async fn load(&self) -> Result<Vec<User>> {
        require_admin(&self.gateway).await?;
        let users = self.gateway.get_users().await?;
        debug!(count = users.len(), "Users loaded");
        *self.users.write().await = users.clone();
        Ok(users)
    }

    pub async fn update(&self, id: &str, update: &UpdateUser) -> Result<User> {
        require_admin(&self.gateway).await?;
        if update.email.as_deref().is_some_and(|e| !e.contains('@')) {
            return Err(ConsoleError::Validation(
                "The e-mail address is not valid.".to_string(),
            ));
        }
        let updated = self.gateway.update_user(id, update).await?;

        {
            let mut cached = self.users.write().await;
            if let Some(slot) = cached.iter_mut().find(|u| u.id == updated.id) {
                *slot = updated.clone();
            }
        }
        info!(user_id = id, "User updated");
        self.announce(id);
        Ok(updated)
    }

    /// Delete an account; the logged-in admin cannot delete themselves
    pub async fn delete(&self, id: &str) -> Result<()> {
        require_admin(&self.gateway).await?;
        let own = self.gateway.session().user().await.map(|u| u.id);
        if own.as_deref() == Some(id) {
            return Err(ConsoleError::Validation(
                "You cannot delete your own account.".to_string(),
            ));
        }
        self.gateway.delete_user(id).await?;
        self.users.write().await.retain(|u| u.id != id);
        info!(user_id = id, "User deleted");
        self.announce(id);
        Ok(())
    }

    fn announce(&self, user_id: &str) {
        self.events.emit_lossy(AdminEvent::UsersChanged {
            user_id: user_id.to_string(),
            timestamp: Utc::now(),
        });
    }
}
