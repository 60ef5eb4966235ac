//! `/hackathons` endpoints

use hkadm_common::models::{CreateHackathon, Hackathon, PastHackathons, UpdateHackathon};
use reqwest::Method;

use super::{Access, Gateway};
use crate::error::Result;

impl Gateway {
    /// GET /hackathons/public: the current or next hackathon
    ///
    /// None when the backend has no hackathon to show (404 or null body).
    pub async fn get_public_hackathon(&self) -> Result<Option<Hackathon>> {
        match self
            .get_json(self.endpoint(&["hackathons", "public"]), Access::Public)
            .await
        {
            Err(e) if e.is_not_found() => Ok(None),
            other => other,
        }
    }

    /// GET /hackathons/available: hackathons open for registration
    pub async fn get_available_hackathons(&self) -> Result<Vec<Hackathon>> {
        self.get_json(self.endpoint(&["hackathons", "available"]), Access::Public)
            .await
    }

    /// GET /hackathons/past?page=&limit=&year=
    pub async fn get_past_hackathons(
        &self,
        page: u32,
        limit: u32,
        year: Option<i32>,
    ) -> Result<Vec<Hackathon>> {
        let mut url = self.endpoint(&["hackathons", "past"]);
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("page", &page.to_string())
                .append_pair("limit", &limit.to_string());
            if let Some(year) = year {
                query.append_pair("year", &year.to_string());
            }
        }
        let past: PastHackathons = self.get_json(url, Access::Public).await?;
        Ok(past.into_vec())
    }

    /// GET /hackathons/{id}
    pub async fn get_hackathon(&self, id: &str) -> Result<Hackathon> {
        self.get_json(self.endpoint(&["hackathons", id]), Access::Authenticated)
            .await
    }

    /// POST /hackathons (admin)
    pub async fn create_hackathon(&self, hackathon: &CreateHackathon) -> Result<Hackathon> {
        self.send_json(
            Method::POST,
            self.endpoint(&["hackathons"]),
            Some(hackathon),
            Access::Authenticated,
        )
        .await
    }

    /// PUT /hackathons/{id} (admin)
    pub async fn update_hackathon(&self, id: &str, update: &UpdateHackathon) -> Result<Hackathon> {
        self.send_json(
            Method::PUT,
            self.endpoint(&["hackathons", id]),
            Some(update),
            Access::Authenticated,
        )
        .await
    }

    /// DELETE /hackathons/{id} (admin)
    pub async fn delete_hackathon(&self, id: &str) -> Result<()> {
        self.send_value::<()>(
            Method::DELETE,
            self.endpoint(&["hackathons", id]),
            None,
            Access::Authenticated,
        )
        .await?;
        Ok(())
    }
}
