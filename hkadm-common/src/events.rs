//! Event types for the console event system
//!
//! Stores announce state changes on the [`EventBus`] so that dependent stores
//! resynchronise without sharing mutable globals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::models::Winners;

/// Console event types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AdminEvent {
    /// A user logged in (or a stored session was restored)
    SessionStarted {
        email: String,
        is_admin: bool,
        timestamp: DateTime<Utc>,
    },

    /// The session was cleared
    SessionEnded { timestamp: DateTime<Utc> },

    /// The active hackathon changed
    ///
    /// Triggers:
    /// - Results coordinator: refresh
    /// - Teams store: reload
    HackathonChanged {
        /// Previous hackathon id
        previous: Option<String>,
        /// New hackathon id (None: no active hackathon)
        current: Option<String>,
        timestamp: DateTime<Utc>,
    },

    /// Results state was replaced with server values
    ResultsRefreshed {
        hackathon_id: Option<String>,
        timestamp: DateTime<Utc>,
    },

    /// Podium published (or republished)
    PodiumPublished {
        hackathon_id: String,
        winners: Winners,
        timestamp: DateTime<Utc>,
    },

    /// Podium hidden; winners retained
    PodiumUnpublished {
        hackathon_id: String,
        timestamp: DateTime<Utc>,
    },

    PreselectionsPublished {
        hackathon_id: String,
        count: usize,
        timestamp: DateTime<Utc>,
    },

    PreselectionsUnpublished {
        hackathon_id: String,
        timestamp: DateTime<Utc>,
    },

    /// A preselection PDF was uploaded and parsed
    PreselectionsDocumentUploaded {
        hackathon_id: String,
        matched_count: usize,
        timestamp: DateTime<Utc>,
    },

    PreselectionsDocumentDeleted {
        hackathon_id: String,
        timestamp: DateTime<Utc>,
    },

    /// Teams list changed after an admin mutation
    TeamsChanged {
        hackathon_id: String,
        count: usize,
        timestamp: DateTime<Utc>,
    },

    /// Inscriptions changed after an admin mutation
    InscriptionsChanged {
        hackathon_id: Option<String>,
        timestamp: DateTime<Utc>,
    },

    /// Announcements changed after an admin mutation
    AnnouncementsChanged { timestamp: DateTime<Utc> },

    /// A user account was edited or deleted by an admin
    UsersChanged {
        user_id: String,
        timestamp: DateTime<Utc>,
    },
}

impl AdminEvent {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            AdminEvent::SessionStarted { .. } => "SessionStarted",
            AdminEvent::SessionEnded { .. } => "SessionEnded",
            AdminEvent::HackathonChanged { .. } => "HackathonChanged",
            AdminEvent::ResultsRefreshed { .. } => "ResultsRefreshed",
            AdminEvent::PodiumPublished { .. } => "PodiumPublished",
            AdminEvent::PodiumUnpublished { .. } => "PodiumUnpublished",
            AdminEvent::PreselectionsPublished { .. } => "PreselectionsPublished",
            AdminEvent::PreselectionsUnpublished { .. } => "PreselectionsUnpublished",
            AdminEvent::PreselectionsDocumentUploaded { .. } => "PreselectionsDocumentUploaded",
            AdminEvent::PreselectionsDocumentDeleted { .. } => "PreselectionsDocumentDeleted",
            AdminEvent::TeamsChanged { .. } => "TeamsChanged",
            AdminEvent::InscriptionsChanged { .. } => "InscriptionsChanged",
            AdminEvent::AnnouncementsChanged { .. } => "AnnouncementsChanged",
            AdminEvent::UsersChanged { .. } => "UsersChanged",
        }
    }
}

/// Broadcast bus shared by all stores of one console session
///
/// Cloning the bus clones the sender; every clone publishes to the same
/// subscribers.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AdminEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// `capacity` is the number of events buffered before slow subscribers
    /// start lagging.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<AdminEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: AdminEvent,
    ) -> Result<usize, broadcast::error::SendError<AdminEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: AdminEvent) {
        tracing::trace!(kind = event.kind(), "emit");
        let _ = self.tx.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(100)
    }
}
