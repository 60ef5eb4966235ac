//! Announcements

use chrono::Utc;
use hkadm_common::events::{AdminEvent, EventBus};
use hkadm_common::models::{Annonce, CreateAnnonce, UpdateAnnonce};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::require_admin;
use crate::error::{ConsoleError, Result};
use crate::gateway::Gateway;

#[derive(Debug)]
pub struct AnnouncementsStore {
    gateway: Arc<Gateway>,
    events: EventBus,
    annonces: RwLock<Vec<Annonce>>,
}

impl AnnouncementsStore {
    pub fn new(gateway: Arc<Gateway>, events: EventBus) -> Self {
        Self {
            gateway,
            events,
            annonces: RwLock::new(Vec::new()),
        }
    }

    pub async fn annonces(&self) -> Vec<Annonce> {
        self.annonces.read().await.clone()
    }

    /// Load the announcements visible to everyone
    pub async fn load_public(&self) -> Result<Vec<Annonce>> {
        let list = self.gateway.get_public_annonces().await?;
        *self.annonces.write().await = list.clone();
        Ok(list)
    }

    /// Load the announcements addressed to registered participants
    pub async fn load_for_registrants(&self) -> Result<Vec<Annonce>> {
        let list = self.gateway.get_annonces_inscrits().await?;
        *self.annonces.write().await = list.clone();
        Ok(list)
    }

    pub async fn create(&self, annonce: &CreateAnnonce) -> Result<Annonce> {
        require_admin(&self.gateway).await?;
        if annonce.titre.trim().is_empty() || annonce.contenu.trim().is_empty() {
            return Err(ConsoleError::Validation(
                "Title and content are required.".to_string(),
            ));
        }
        let created = self.gateway.create_annonce(annonce).await?;
        self.annonces.write().await.insert(0, created.clone());
        info!(annonce_id = %created.id, "Announcement created");
        self.announce();
        Ok(created)
    }

    pub async fn update(&self, id: &str, update: &UpdateAnnonce) -> Result<Annonce> {
        require_admin(&self.gateway).await?;
        let updated = self.gateway.update_annonce(id, update).await?;
        {
            let mut cached = self.annonces.write().await;
            if let Some(slot) = cached.iter_mut().find(|a| a.id == updated.id) {
                *slot = updated.clone();
            }
        }
        self.announce();
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        require_admin(&self.gateway).await?;
        self.gateway.delete_annonce(id).await?;
        self.annonces.write().await.retain(|a| a.id != id);
        info!(annonce_id = id, "Announcement deleted");
        self.announce();
        Ok(())
    }

    fn announce(&self) {
        self.events.emit_lossy(AdminEvent::AnnouncementsChanged {
            timestamp: Utc::now(),
        });
    }
}
