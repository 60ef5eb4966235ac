//! Inscriptions: the active hackathon's list for admins, and the
//! participant's own

use chrono::Utc;
use hkadm_common::events::{AdminEvent, EventBus};
use hkadm_common::models::{Inscription, InscriptionStatus, UpdateInscription};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{require_admin, require_login, HackathonState};
use crate::error::Result;
use crate::gateway::Gateway;

/// Inscription totals per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InscriptionCounts {
    pub pending: usize,
    pub validated: usize,
    pub refused: usize,
}

impl InscriptionCounts {
    pub fn total(&self) -> usize {
        self.pending + self.validated + self.refused
    }
}

#[derive(Debug)]
pub struct InscriptionsStore {
    gateway: Arc<Gateway>,
    hackathon: Arc<HackathonState>,
    events: EventBus,
    inscriptions: RwLock<Vec<Inscription>>,
}

impl InscriptionsStore {
    pub fn new(gateway: Arc<Gateway>, hackathon: Arc<HackathonState>, events: EventBus) -> Self {
        Self {
            gateway,
            hackathon,
            events,
            inscriptions: RwLock::new(Vec::new()),
        }
    }

    pub async fn inscriptions(&self) -> Vec<Inscription> {
        self.inscriptions.read().await.clone()
    }

    /// Load every inscription, keeping those of the active hackathon
    ///
    /// With no active hackathon nothing is filtered out.
    pub async fn load(&self) -> Result<Vec<Inscription>> {
        require_admin(&self.gateway).await?;
        let all = self.gateway.get_all_inscriptions().await?;
        let list: Vec<Inscription> = match self.hackathon.current_id().await {
            Some(id) => all.into_iter().filter(|i| i.hackathon_id == id).collect(),
            None => all,
        };
        debug!(count = list.len(), "Inscriptions loaded");
        *self.inscriptions.write().await = list.clone();
        Ok(list)
    }

    pub async fn update_status(&self, id: &str, statut: InscriptionStatus) -> Result<Inscription> {
        require_admin(&self.gateway).await?;
        let patch = UpdateInscription {
            statut: Some(statut),
            ..UpdateInscription::default()
        };
        let updated = self.gateway.update_inscription(id, &patch).await?;

        {
            let mut cached = self.inscriptions.write().await;
            if let Some(slot) = cached.iter_mut().find(|i| i.id == updated.id) {
                *slot = updated.clone();
            }
        }
        info!(inscription_id = id, statut = ?statut, "Inscription status updated");
        self.announce(Some(updated.hackathon_id.clone()));
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        require_admin(&self.gateway).await?;
        self.gateway.delete_inscription(id).await?;
        self.inscriptions.write().await.retain(|i| i.id != id);
        info!(inscription_id = id, "Inscription deleted");
        self.announce(self.hackathon.current_id().await);
        Ok(())
    }

    /// Inscriptions of the logged-in participant, every hackathon
    pub async fn mine(&self) -> Result<Vec<Inscription>> {
        require_login(&self.gateway).await?;
        self.gateway.get_my_inscriptions().await
    }

    pub async fn get(&self, id: &str) -> Result<Inscription> {
        require_login(&self.gateway).await?;
        self.gateway.get_inscription(id).await
    }

    /// Cancel one of the participant's own inscriptions
    pub async fn withdraw(&self, id: &str) -> Result<()> {
        require_login(&self.gateway).await?;
        self.gateway.withdraw_inscription(id).await?;
        self.inscriptions.write().await.retain(|i| i.id != id);
        info!(inscription_id = id, "Inscription withdrawn");
        self.announce(self.hackathon.current_id().await);
        Ok(())
    }

    pub async fn counts(&self) -> InscriptionCounts {
        let mut counts = InscriptionCounts::default();
        for inscription in self.inscriptions.read().await.iter() {
            match inscription.statut {
                InscriptionStatus::EnAttente => counts.pending += 1,
                InscriptionStatus::Valide => counts.validated += 1,
                InscriptionStatus::Refuse => counts.refused += 1,
            }
        }
        counts
    }

    /// Inscriptions whose user e-mail is in `emails` (case-insensitive)
    pub async fn matching_emails(&self, emails: &[String]) -> Vec<Inscription> {
        let wanted: HashSet<String> = emails.iter().map(|e| e.trim().to_lowercase()).collect();
        self.inscriptions
            .read()
            .await
            .iter()
            .filter(|i| i.email().is_some_and(|e| wanted.contains(&e.to_lowercase())))
            .cloned()
            .collect()
    }

    fn announce(&self, hackathon_id: Option<String>) {
        self.events.emit_lossy(AdminEvent::InscriptionsChanged {
            hackathon_id,
            timestamp: Utc::now(),
        });
    }
}
