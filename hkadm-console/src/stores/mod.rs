//! Hackathon-scoped state stores
//!
//! Each store caches one slice of gateway data for the active hackathon and
//! announces admin mutations on the shared [`EventBus`](hkadm_common::EventBus).

mod announcements;
mod hackathon;
mod inscriptions;
mod monitoring;
mod teams;
mod users;

pub use announcements::AnnouncementsStore;
pub use hackathon::HackathonState;
pub use inscriptions::{InscriptionCounts, InscriptionsStore};
pub use monitoring::{MonitoringStore, MAX_LOG_PAGE};
pub use teams::TeamsStore;
pub use users::UsersStore;

use crate::error::{ConsoleError, Result};
use crate::gateway::Gateway;

pub(crate) const ADMIN_REQUIRED: &str = "Administrator access required";
pub(crate) const LOGIN_REQUIRED: &str = "Login required";

/// Fail with `Forbidden` unless the session belongs to an admin
pub(crate) async fn require_admin(gateway: &Gateway) -> Result<()> {
    if gateway.session().is_admin().await {
        Ok(())
    } else {
        Err(ConsoleError::Forbidden(ADMIN_REQUIRED.to_string()))
    }
}

/// Fail with `Forbidden` when nobody is logged in
pub(crate) async fn require_login(gateway: &Gateway) -> Result<()> {
    if gateway.session().token().await.is_some() {
        Ok(())
    } else {
        Err(ConsoleError::Forbidden(LOGIN_REQUIRED.to_string()))
    }
}
