//! Active hackathon state

use chrono::Utc;
use hkadm_common::events::{AdminEvent, EventBus};
use hkadm_common::models::{CreateHackathon, Hackathon, UpdateHackathon};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::require_admin;
use crate::error::{ConsoleError, Result};
use crate::gateway::Gateway;

/// The hackathon every other store is scoped to
#[derive(Debug)]
pub struct HackathonState {
    gateway: Arc<Gateway>,
    events: EventBus,
    current: RwLock<Option<Hackathon>>,
}

impl HackathonState {
    pub fn new(gateway: Arc<Gateway>, events: EventBus) -> Self {
        Self {
            gateway,
            events,
            current: RwLock::new(None),
        }
    }

    pub async fn current(&self) -> Option<Hackathon> {
        self.current.read().await.clone()
    }

    pub async fn current_id(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|h| h.id.clone())
    }

    /// Fetch the current public hackathon
    ///
    /// No hackathon on the backend clears the state.
    pub async fn refresh(&self) -> Result<Option<Hackathon>> {
        let hackathon = self.gateway.get_public_hackathon().await?;
        self.set_current(hackathon.clone()).await;
        Ok(hackathon)
    }

    /// Make a specific hackathon the active one (admin)
    pub async fn select(&self, id: &str) -> Result<Hackathon> {
        require_admin(&self.gateway).await?;
        let hackathon = self.gateway.get_hackathon(id).await?;
        self.set_current(Some(hackathon.clone())).await;
        Ok(hackathon)
    }

    /// Hackathons currently open for registration
    pub async fn available(&self) -> Result<Vec<Hackathon>> {
        self.gateway.get_available_hackathons().await
    }

    pub async fn past(&self, page: u32, limit: u32, year: Option<i32>) -> Result<Vec<Hackathon>> {
        self.gateway.get_past_hackathons(page, limit, year).await
    }

    /// Create a hackathon (admin)
    ///
    /// The active hackathon is re-read since the backend may now serve the
    /// new one publicly.
    pub async fn create(&self, hackathon: &CreateHackathon) -> Result<Hackathon> {
        require_admin(&self.gateway).await?;
        if hackathon.nom.trim().is_empty() {
            return Err(ConsoleError::Validation(
                "The hackathon name must not be empty.".to_string(),
            ));
        }
        hackathon.check_dates().map_err(ConsoleError::Validation)?;

        let created = self.gateway.create_hackathon(hackathon).await?;
        info!(hackathon_id = %created.id, nom = %created.nom, "Hackathon created");
        self.reread_after_change().await;
        Ok(created)
    }

    /// Delete a hackathon (admin); deleting the active one re-reads the
    /// public hackathon
    pub async fn delete(&self, id: &str) -> Result<()> {
        require_admin(&self.gateway).await?;
        self.gateway.delete_hackathon(id).await?;
        info!(hackathon_id = id, "Hackathon deleted");

        if self.current_id().await.as_deref() == Some(id) {
            self.reread_after_change().await;
        }
        Ok(())
    }

    /// Patch a hackathon (admin); the cached record follows when it is the
    /// active one
    pub async fn update(&self, id: &str, patch: &UpdateHackathon) -> Result<Hackathon> {
        require_admin(&self.gateway).await?;
        let updated = self.gateway.update_hackathon(id, patch).await?;

        let mut current = self.current.write().await;
        if current.as_ref().is_some_and(|h| h.id == updated.id) {
            *current = Some(updated.clone());
        }
        Ok(updated)
    }

    /// The mutation already succeeded; a failed re-read only leaves the
    /// cached record stale
    async fn reread_after_change(&self) {
        if let Err(e) = self.refresh().await {
            warn!("Could not re-read the active hackathon: {}", e);
        }
    }

    async fn set_current(&self, next: Option<Hackathon>) {
        let current = next.as_ref().map(|h| h.id.clone());
        let previous = {
            let mut guard = self.current.write().await;
            std::mem::replace(&mut *guard, next).map(|h| h.id)
        };

        if previous != current {
            info!(previous = ?previous, current = ?current, "Active hackathon changed");
            self.events.emit_lossy(AdminEvent::HackathonChanged {
                previous,
                current,
                timestamp: Utc::now(),
            });
        }
    }
}
