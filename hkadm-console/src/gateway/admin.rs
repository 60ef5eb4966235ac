//! `/admin` dashboard endpoint

use hkadm_common::models::DashboardStats;

use super::{Access, Gateway};
use crate::error::Result;

impl Gateway {
    /// GET /admin/dashboard
    pub async fn get_dashboard(&self) -> Result<DashboardStats> {
        self.get_json(self.endpoint(&["admin", "dashboard"]), Access::Authenticated)
            .await
    }
}
