//! Service container
//!
//! Wires the gateway, session and stores around one [`EventBus`] and runs
//! the synchroniser that keeps results and teams aligned with the active
//! hackathon.

use hkadm_common::config::ConsoleConfig;
use hkadm_common::events::{AdminEvent, EventBus};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::auth::AuthService;
use crate::error::{ConsoleError, Result};
use crate::gateway::Gateway;
use crate::results::ResultsCoordinator;
use crate::session::SessionStore;
use crate::stores::{
    AnnouncementsStore, HackathonState, InscriptionsStore, MonitoringStore, TeamsStore, UsersStore,
};

/// Every service of one console session
#[derive(Debug)]
pub struct AdminServices {
    pub config: ConsoleConfig,
    pub events: EventBus,
    pub gateway: Arc<Gateway>,
    pub auth: AuthService,
    pub hackathon: Arc<HackathonState>,
    pub results: Arc<ResultsCoordinator>,
    pub teams: Arc<TeamsStore>,
    pub inscriptions: InscriptionsStore,
    pub announcements: AnnouncementsStore,
    pub users: UsersStore,
    pub monitoring: MonitoringStore,
    shutdown: CancellationToken,
    sync_task: Mutex<Option<JoinHandle<()>>>,
}

impl AdminServices {
    /// Construct the services without touching the network
    pub fn build(config: ConsoleConfig) -> Result<Self> {
        let events = EventBus::default();
        let session = Arc::new(SessionStore::load(config.session_file.clone()));
        let gateway = Arc::new(Gateway::new(&config, session)?);

        let hackathon = Arc::new(HackathonState::new(Arc::clone(&gateway), events.clone()));
        let results = Arc::new(ResultsCoordinator::new(
            Arc::clone(&gateway),
            Arc::clone(&hackathon),
            events.clone(),
        ));
        let teams = Arc::new(TeamsStore::new(
            Arc::clone(&gateway),
            Arc::clone(&hackathon),
            events.clone(),
        ));
        let inscriptions =
            InscriptionsStore::new(Arc::clone(&gateway), Arc::clone(&hackathon), events.clone());
        let announcements = AnnouncementsStore::new(Arc::clone(&gateway), events.clone());
        let users = UsersStore::new(Arc::clone(&gateway), events.clone());
        let monitoring = MonitoringStore::new(Arc::clone(&gateway));
        let auth = AuthService::new(Arc::clone(&gateway), events.clone());

        Ok(Self {
            config,
            events,
            gateway,
            auth,
            hackathon,
            results,
            teams,
            inscriptions,
            announcements,
            users,
            monitoring,
            shutdown: CancellationToken::new(),
            sync_task: Mutex::new(None),
        })
    }

    /// Build, load the active hackathon and its results, then start
    /// synchronising
    ///
    /// Only a failed hackathon fetch fails; a results refresh error is
    /// logged and left for the admin to retry.
    pub async fn init(config: ConsoleConfig) -> Result<Self> {
        let services = Self::build(config)?;
        services.start().await?;
        Ok(services)
    }

    async fn start(&self) -> Result<()> {
        if let Some(user) = self.auth.restore().await {
            debug!(email = %user.email, "Using stored session");
        }

        let hackathon = self.hackathon.refresh().await?;
        match &hackathon {
            Some(h) => info!(hackathon_id = %h.id, nom = %h.nom, "Active hackathon"),
            None => info!("No active hackathon"),
        }
        log_failure("results", self.results.refresh().await);

        let rx = self.events.subscribe();
        let handle = tokio::spawn(synchronise(
            rx,
            Arc::clone(&self.results),
            Arc::clone(&self.teams),
            self.shutdown.clone(),
        ));
        if let Ok(mut slot) = self.sync_task.lock() {
            *slot = Some(handle);
        }
        Ok(())
    }

    /// Cancel in-flight work and stop the synchroniser
    ///
    /// The session file is left as is.
    pub async fn dispose(&self) {
        self.results.dispose();
        self.shutdown.cancel();

        let handle = self.sync_task.lock().ok().and_then(|mut slot| slot.take());
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!("Synchroniser ended abnormally: {}", e);
            }
        }
        debug!("Services disposed");
    }

    /// Clear the session, then dispose
    pub async fn logout(&self) -> Result<()> {
        self.auth.logout().await?;
        self.dispose().await;
        Ok(())
    }
}

/// Refresh dependent stores when the hackathon or the session changes
async fn synchronise(
    mut rx: Receiver<AdminEvent>,
    results: Arc<ResultsCoordinator>,
    teams: Arc<TeamsStore>,
    shutdown: CancellationToken,
) {
    loop {
        let event = tokio::select! {
            _ = shutdown.cancelled() => break,
            event = rx.recv() => event,
        };

        match event {
            Ok(AdminEvent::HackathonChanged { current, .. }) => {
                debug!(hackathon_id = ?current, "Resynchronising after hackathon change");
                log_failure("results", results.refresh().await);
                log_failure("teams", teams.load().await.map(|_| ()));
            }
            Ok(AdminEvent::SessionStarted { .. }) | Ok(AdminEvent::SessionEnded { .. }) => {
                log_failure("results", results.refresh().await);
            }
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Synchroniser lagged; refreshing results");
                log_failure("results", results.refresh().await);
            }
            Err(RecvError::Closed) => break,
        }
    }
    debug!("Synchroniser stopped");
}

fn log_failure(what: &str, result: Result<()>) {
    match result {
        Ok(()) => {}
        Err(ConsoleError::Cancelled) => debug!(what, "Refresh dropped"),
        Err(e) => warn!(what, "Refresh failed: {}", e),
    }
}
