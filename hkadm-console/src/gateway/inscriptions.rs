//! Inscription endpoints: `/admin/inscriptions` for admins, `/inscriptions`
//! for the logged-in participant

use hkadm_common::models::{Inscription, UpdateInscription};
use reqwest::Method;

use super::{Access, Gateway};
use crate::error::Result;

impl Gateway {
    /// GET /admin/inscriptions (all hackathons)
    pub async fn get_all_inscriptions(&self) -> Result<Vec<Inscription>> {
        self.get_json(self.endpoint(&["admin", "inscriptions"]), Access::Authenticated)
            .await
    }

    /// PUT /admin/inscriptions/{id}
    pub async fn update_inscription(
        &self,
        id: &str,
        update: &UpdateInscription,
    ) -> Result<Inscription> {
        self.send_json(
            Method::PUT,
            self.endpoint(&["admin", "inscriptions", id]),
            Some(update),
            Access::Authenticated,
        )
        .await
    }

    /// DELETE /admin/inscriptions/{id}
    pub async fn delete_inscription(&self, id: &str) -> Result<()> {
        self.send_value::<()>(
            Method::DELETE,
            self.endpoint(&["admin", "inscriptions", id]),
            None,
            Access::Authenticated,
        )
        .await?;
        Ok(())
    }

    /// GET /inscriptions/mes-inscriptions
    pub async fn get_my_inscriptions(&self) -> Result<Vec<Inscription>> {
        self.get_json(
            self.endpoint(&["inscriptions", "mes-inscriptions"]),
            Access::Authenticated,
        )
        .await
    }

    /// GET /inscriptions/{id}
    pub async fn get_inscription(&self, id: &str) -> Result<Inscription> {
        self.get_json(self.endpoint(&["inscriptions", id]), Access::Authenticated)
            .await
    }

    /// DELETE /inscriptions/{id}: the participant withdraws
    pub async fn withdraw_inscription(&self, id: &str) -> Result<()> {
        self.send_value::<()>(
            Method::DELETE,
            self.endpoint(&["inscriptions", id]),
            None,
            Access::Authenticated,
        )
        .await?;
        Ok(())
    }
}
