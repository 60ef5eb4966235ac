//! Teams of the active hackathon

use chrono::Utc;
use hkadm_common::events::{AdminEvent, EventBus};
use hkadm_common::models::{AddMemberRequest, CreateTeam, Team, UpdateTeam};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{require_admin, HackathonState};
use crate::error::{ConsoleError, Result};
use crate::gateway::Gateway;

/// Cached team list
///
/// Admins load `/teams/hackathon/{id}`; other sessions load `/teams/public`
/// and keep the teams of the active hackathon. Every admin mutation reloads
/// the list.
#[derive(Debug)]
pub struct TeamsStore {
    gateway: Arc<Gateway>,
    hackathon: Arc<HackathonState>,
    events: EventBus,
    teams: RwLock<Vec<Team>>,
}

impl TeamsStore {
    pub fn new(gateway: Arc<Gateway>, hackathon: Arc<HackathonState>, events: EventBus) -> Self {
        Self {
            gateway,
            hackathon,
            events,
            teams: RwLock::new(Vec::new()),
        }
    }

    pub async fn teams(&self) -> Vec<Team> {
        self.teams.read().await.clone()
    }

    /// Names selectable for podium places
    pub async fn project_names(&self) -> Vec<String> {
        self.teams
            .read()
            .await
            .iter()
            .map(|t| t.project_name().to_string())
            .collect()
    }

    pub async fn load(&self) -> Result<Vec<Team>> {
        let Some(hackathon_id) = self.hackathon.current_id().await else {
            self.teams.write().await.clear();
            return Ok(Vec::new());
        };

        let teams = if self.gateway.session().is_admin().await {
            self.gateway.get_teams_by_hackathon(&hackathon_id).await?
        } else {
            self.gateway
                .get_public_teams()
                .await?
                .into_iter()
                .filter(|t| t.hackathon_id == hackathon_id)
                .collect()
        };

        if self.hackathon.current_id().await.as_deref() != Some(hackathon_id.as_str()) {
            debug!(hackathon_id = %hackathon_id, "Dropping teams of a stale hackathon");
            return Err(ConsoleError::Cancelled);
        }
        debug!(hackathon_id = %hackathon_id, count = teams.len(), "Teams loaded");
        *self.teams.write().await = teams.clone();
        Ok(teams)
    }

    pub async fn create(&self, team: &CreateTeam) -> Result<Team> {
        require_admin(&self.gateway).await?;
        let hackathon_id = self
            .hackathon
            .current_id()
            .await
            .ok_or(ConsoleError::NoActiveHackathon)?;

        let created = self.gateway.create_team(&hackathon_id, team).await?;
        info!(team = %created.nom, "Team created");
        self.reload_after_change().await?;
        Ok(created)
    }

    pub async fn update(&self, team_id: &str, update: &UpdateTeam) -> Result<Team> {
        require_admin(&self.gateway).await?;
        let updated = self.gateway.update_team(team_id, update).await?;
        self.reload_after_change().await?;
        Ok(updated)
    }

    pub async fn delete(&self, team_id: &str) -> Result<()> {
        require_admin(&self.gateway).await?;
        self.gateway.delete_team(team_id).await?;
        info!(team_id, "Team deleted");
        self.reload_after_change().await
    }

    pub async fn add_member(&self, team_id: &str, member: &AddMemberRequest) -> Result<()> {
        require_admin(&self.gateway).await?;
        self.gateway.add_team_member(team_id, member).await?;
        self.reload_after_change().await
    }

    pub async fn remove_member(&self, team_id: &str, user_id: &str) -> Result<()> {
        require_admin(&self.gateway).await?;
        self.gateway.remove_team_member(team_id, user_id).await?;
        self.reload_after_change().await
    }

    async fn reload_after_change(&self) -> Result<()> {
        let teams = self.load().await?;
        if let Some(hackathon_id) = self.hackathon.current_id().await {
            self.events.emit_lossy(AdminEvent::TeamsChanged {
                hackathon_id,
                count: teams.len(),
                timestamp: Utc::now(),
            });
        }
        Ok(())
    }
}
