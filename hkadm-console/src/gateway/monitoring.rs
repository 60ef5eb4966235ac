//! `/admin/monitoring` endpoints

use hkadm_common::models::{MonitoringLog, MonitoringLogs, SystemMetrics};

use super::{Access, Gateway};
use crate::error::Result;

impl Gateway {
    /// GET /admin/monitoring/metrics
    pub async fn get_metrics(&self) -> Result<SystemMetrics> {
        let metrics: Option<SystemMetrics> = self
            .get_json(
                self.endpoint(&["admin", "monitoring", "metrics"]),
                Access::Authenticated,
            )
            .await?;
        Ok(metrics.unwrap_or_default())
    }

    /// GET /admin/monitoring/logs?page=&limit=&type=
    pub async fn get_monitoring_logs(
        &self,
        page: u32,
        limit: u32,
        kind: Option<&str>,
    ) -> Result<Vec<MonitoringLog>> {
        let mut url = self.endpoint(&["admin", "monitoring", "logs"]);
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("page", &page.to_string())
                .append_pair("limit", &limit.to_string());
            if let Some(kind) = kind {
                query.append_pair("type", kind);
            }
        }
        let logs: MonitoringLogs = self.get_json(url, Access::Authenticated).await?;
        Ok(logs.into_vec())
    }
}
