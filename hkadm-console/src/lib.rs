//! hkadm-console: hackathon administration client
//!
//! Session handling, the gateway client, hackathon-scoped stores and the
//! results publication coordinator, assembled by [`AdminServices`].

pub mod auth;
pub mod error;
pub mod gateway;
pub mod results;
pub mod services;
pub mod session;
pub mod stores;

pub use auth::AuthService;
pub use error::{ConsoleError, Result};
pub use gateway::Gateway;
pub use results::{DocumentUpload, PublicResults, ResultsCoordinator, ResultsState};
pub use services::AdminServices;
pub use session::SessionStore;
pub use stores::{
    AnnouncementsStore, HackathonState, InscriptionsStore, MonitoringStore, TeamsStore, UsersStore,
};
