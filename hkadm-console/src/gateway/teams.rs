//! `/teams` endpoints

use hkadm_common::models::{AddMemberRequest, CreateTeam, Team, UpdateTeam};
use reqwest::Method;

use super::{Access, Gateway};
use crate::error::Result;

impl Gateway {
    /// GET /teams/hackathon/{id} (admin)
    pub async fn get_teams_by_hackathon(&self, hackathon_id: &str) -> Result<Vec<Team>> {
        self.get_json(
            self.endpoint(&["teams", "hackathon", hackathon_id]),
            Access::Authenticated,
        )
        .await
    }

    /// GET /teams/public (every hackathon)
    pub async fn get_public_teams(&self) -> Result<Vec<Team>> {
        self.get_json(self.endpoint(&["teams", "public"]), Access::Public)
            .await
    }

    /// POST /teams/hackathon/{id}
    pub async fn create_team(&self, hackathon_id: &str, team: &CreateTeam) -> Result<Team> {
        self.send_json(
            Method::POST,
            self.endpoint(&["teams", "hackathon", hackathon_id]),
            Some(team),
            Access::Authenticated,
        )
        .await
    }

    /// PUT /teams/{id}
    pub async fn update_team(&self, team_id: &str, update: &UpdateTeam) -> Result<Team> {
        self.send_json(
            Method::PUT,
            self.endpoint(&["teams", team_id]),
            Some(update),
            Access::Authenticated,
        )
        .await
    }

    /// DELETE /teams/{id}
    pub async fn delete_team(&self, team_id: &str) -> Result<()> {
        self.send_value::<()>(
            Method::DELETE,
            self.endpoint(&["teams", team_id]),
            None,
            Access::Authenticated,
        )
        .await?;
        Ok(())
    }

    /// POST /teams/{id}/members
    pub async fn add_team_member(&self, team_id: &str, member: &AddMemberRequest) -> Result<()> {
        self.send_value(
            Method::POST,
            self.endpoint(&["teams", team_id, "members"]),
            Some(member),
            Access::Authenticated,
        )
        .await?;
        Ok(())
    }

    /// DELETE /teams/{id}/members/{userId}
    pub async fn remove_team_member(&self, team_id: &str, user_id: &str) -> Result<()> {
        self.send_value::<()>(
            Method::DELETE,
            self.endpoint(&["teams", team_id, "members", user_id]),
            None,
            Access::Authenticated,
        )
        .await?;
        Ok(())
    }
}
