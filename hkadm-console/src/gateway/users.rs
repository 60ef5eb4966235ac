//! `/admin/users` endpoints

use hkadm_common::models::{UpdateUser, User};
use reqwest::Method;

use super::{Access, Gateway};
use crate::error::Result;

impl Gateway {
    /// GET /admin/users
    pub async fn get_users(&self) -> Result<Vec<User>> {
        self.get_json(self.endpoint(&["admin", "users"]), Access::Authenticated)
            .await
    }

    /// PUT /admin/users/{id}
    pub async fn update_user(&self, id: &str, update: &UpdateUser) -> Result<User> {
        self.send_json(
            Method::PUT,
            self.endpoint(&["admin", "users", id]),
            Some(update),
            Access::Authenticated,
        )
        .await
    }

    /// DELETE /admin/users/{id}
    pub async fn delete_user(&self, id: &str) -> Result<()> {
        self.send_value::<()>(
            Method::DELETE,
            self.endpoint(&["admin", "users", id]),
            None,
            Access::Authenticated,
        )
        .await?;
        Ok(())
    }
}
