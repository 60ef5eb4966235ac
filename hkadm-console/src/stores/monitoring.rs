//! System metrics and AI module logs (admin)

use hkadm_common::models::{MonitoringLog, SystemMetrics};
use std::sync::Arc;
use tracing::debug;

use super::require_admin;
use crate::error::{ConsoleError, Result};
use crate::gateway::Gateway;

/// Largest page the monitoring endpoint serves
pub const MAX_LOG_PAGE: u32 = 100;

#[derive(Debug)]
pub struct MonitoringStore {
    gateway: Arc<Gateway>,
}

impl MonitoringStore {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn metrics(&self) -> Result<SystemMetrics> {
        require_admin(&self.gateway).await?;
        self.gateway.get_metrics().await
    }

    /// One page of logs, optionally of a single type (SURVEILLANCE, ...)
    pub async fn logs(&self, page: u32, limit: u32, kind: Option<&str>) -> Result<Vec<MonitoringLog>> {
        require_admin(&self.gateway).await?;
        if page == 0 || limit == 0 || limit > MAX_LOG_PAGE {
            return Err(ConsoleError::Validation(format!(
                "Pages start at 1 and hold 1 to {} entries.",
                MAX_LOG_PAGE
            )));
        }
        let kind = kind.map(str::trim).filter(|k| !k.is_empty());
        let logs = self.gateway.get_monitoring_logs(page, limit, kind).await?;
        debug!(page, count = logs.len(), "Monitoring logs loaded");
        Ok(logs)
    }
}
