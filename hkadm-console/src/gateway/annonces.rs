//! `/annonces` endpoints

use hkadm_common::models::{Annonce, CreateAnnonce, UpdateAnnonce};
use reqwest::Method;

use super::{Access, Gateway};
use crate::error::Result;

impl Gateway {
    /// GET /annonces/public
    pub async fn get_public_annonces(&self) -> Result<Vec<Annonce>> {
        self.get_json(self.endpoint(&["annonces", "public"]), Access::Public)
            .await
    }

    /// GET /annonces/inscrits (registered participants)
    pub async fn get_annonces_inscrits(&self) -> Result<Vec<Annonce>> {
        self.get_json(self.endpoint(&["annonces", "inscrits"]), Access::Authenticated)
            .await
    }

    /// POST /admin/annonces
    pub async fn create_annonce(&self, annonce: &CreateAnnonce) -> Result<Annonce> {
        self.send_json(
            Method::POST,
            self.endpoint(&["admin", "annonces"]),
            Some(annonce),
            Access::Authenticated,
        )
        .await
    }

    /// PUT /annonces/admin/annonces/{id}
    pub async fn update_annonce(&self, id: &str, update: &UpdateAnnonce) -> Result<Annonce> {
        self.send_json(
            Method::PUT,
            self.endpoint(&["annonces", "admin", "annonces", id]),
            Some(update),
            Access::Authenticated,
        )
        .await
    }

    /// DELETE /annonces/admin/annonces/{id}
    pub async fn delete_annonce(&self, id: &str) -> Result<()> {
        self.send_value::<()>(
            Method::DELETE,
            self.endpoint(&["annonces", "admin", "annonces", id]),
            None,
            Access::Authenticated,
        )
        .await?;
        Ok(())
    }
}
