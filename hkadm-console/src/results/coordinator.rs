//! Results publication coordinator
//!
//! Owns podium winners, the preselection list, both publication flags and
//! the preselection document metadata for the active hackathon. Every write
//! goes through the gateway first; local state only changes once the
//! gateway has confirmed the operation.
//!
//! **Reconciliation:** when a mutation answers with a results representation
//! it is applied as-is; an acknowledgement-only answer applies the values
//! that were sent.
//!
//! **Lifecycle:** [`dispose`](ResultsCoordinator::dispose) cancels in-flight
//! requests. Responses that arrive after dispose, or after the active
//! hackathon changed, are dropped with [`ConsoleError::Cancelled`].

use chrono::Utc;
use hkadm_common::events::{AdminEvent, EventBus};
use hkadm_common::models::{ResultatsDto, Team, UploadPreselectionsResponse, Winners};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::document::DocumentUpload;
use super::public_view::PublicResults;
use crate::error::{ConsoleError, Result};
use crate::gateway::Gateway;
use crate::stores::HackathonState;

/// Stored preselection PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreselectionsDocument {
    /// Original file name, when the backend reported one
    pub name: Option<String>,
    pub url: String,
}

/// Results state of one hackathon
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsState {
    pub hackathon_id: Option<String>,
    pub winners: Winners,
    pub are_results_published: bool,
    /// Participant e-mails, duplicates removed, first occurrence order
    pub preselected: Vec<String>,
    pub are_preselections_published: bool,
    pub document: Option<PreselectionsDocument>,
}

impl ResultsState {
    fn empty(hackathon_id: Option<String>) -> Self {
        Self {
            hackathon_id,
            ..Self::default()
        }
    }

    /// Overwrite the fields a representation carries
    ///
    /// A field absent from the representation keeps its local value. The
    /// three places travel together with the podium flag: when any of them
    /// is present, missing places mean "none".
    fn apply(&mut self, dto: ResultatsDto, gateway: &Gateway) {
        if let Some(id) = dto.hackathon_id.clone() {
            self.hackathon_id = Some(id);
        }
        let carries_podium = dto.podium_publie.is_some()
            || dto.premier_place.is_some()
            || dto.deuxieme_place.is_some()
            || dto.troisieme_place.is_some();
        if carries_podium {
            self.winners = dto.winners();
        }
        if let Some(published) = dto.podium_publie {
            self.are_results_published = published;
        }
        if let Some(list) = dto.preselectionnes.clone() {
            self.preselected = dedup(list);
        }
        if let Some(published) = dto.preselections_publiees {
            self.are_preselections_published = published;
        }
        if let Some(has_document) = dto.has_preselections_document {
            self.document = match (has_document, self.hackathon_id.as_deref()) {
                (true, Some(id)) => Some(PreselectionsDocument {
                    name: dto.document_preselections_name.clone(),
                    url: gateway.preselections_document_url(id),
                }),
                _ => None,
            };
        }
    }

    fn from_dto(dto: ResultatsDto, hackathon_id: Option<String>, gateway: &Gateway) -> Self {
        let mut state = Self::empty(hackathon_id);
        state.apply(dto, gateway);
        state
    }
}

/// Remove repeated entries, keeping the first occurrence
pub(crate) fn dedup(list: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(list.len());
    for item in list {
        let item = item.trim().to_string();
        if !item.is_empty() && !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

fn check_unique(winners: &Winners) -> Result<()> {
    match winners.duplicate() {
        Some(name) => Err(ConsoleError::Validation(format!(
            "\"{}\" cannot occupy more than one podium place.",
            name
        ))),
        None => Ok(()),
    }
}

/// Results Publication Coordinator
#[derive(Debug)]
pub struct ResultsCoordinator {
    gateway: Arc<Gateway>,
    hackathon: Arc<HackathonState>,
    events: EventBus,
    state: RwLock<ResultsState>,
    cancel: CancellationToken,
}

impl ResultsCoordinator {
    pub fn new(gateway: Arc<Gateway>, hackathon: Arc<HackathonState>, events: EventBus) -> Self {
        Self {
            gateway,
            hackathon,
            events,
            state: RwLock::new(ResultsState::default()),
            cancel: CancellationToken::new(),
        }
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> ResultsState {
        self.state.read().await.clone()
    }

    /// What the public results page shows, enriched with team details
    pub async fn public_view(&self, teams: &[Team]) -> PublicResults {
        PublicResults::build(&*self.state.read().await, teams)
    }

    /// Cancel in-flight requests and stop applying responses
    pub fn dispose(&self) {
        if !self.cancel.is_cancelled() {
            debug!("Results coordinator disposed");
            self.cancel.cancel();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Replace local state with the server's results
    ///
    /// Admins read `/resultats/hackathon/{id}`; everyone else (or an admin
    /// with no active hackathon) reads `/resultats/public`. A missing
    /// resource resets to defaults. On error the state is left untouched.
    pub async fn refresh(&self) -> Result<()> {
        let hackathon_id = self.hackathon.current_id().await;
        let admin = self.gateway.session().is_admin().await;

        let dto = match hackathon_id.as_deref() {
            Some(id) if admin => self.guarded(self.gateway.get_resultats(id)).await?,
            _ => self.guarded(self.gateway.get_public_resultats()).await?,
        };

        let next = match dto {
            Some(dto) => ResultsState::from_dto(dto, hackathon_id.clone(), &self.gateway),
            None => ResultsState::empty(hackathon_id.clone()),
        };
        debug!(
            hackathon_id = ?hackathon_id,
            podium = next.are_results_published,
            preselections = next.are_preselections_published,
            "Results refreshed"
        );
        self.commit(&hackathon_id, |state| *state = next).await?;

        self.events.emit_lossy(AdminEvent::ResultsRefreshed {
            hackathon_id,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Persist the podium and mark it published
    ///
    /// No "at least one winner" check here; see
    /// [`publish_results`](Self::publish_results).
    pub async fn set_winners(&self, winners: Winners) -> Result<()> {
        let hackathon_id = self.require_hackathon().await?;
        check_unique(&winners)?;

        let response = self
            .guarded(self.gateway.publish_podium(&hackathon_id, &winners.to_request()))
            .await?;

        let issued_for = Some(hackathon_id.clone());
        let gateway = Arc::clone(&self.gateway);
        let sent = winners.clone();
        self.commit(&issued_for, move |state| match response {
            Some(dto) => state.apply(dto, &gateway),
            None => {
                state.winners = sent;
                state.are_results_published = true;
            }
        })
        .await?;

        info!(hackathon_id = %hackathon_id, "Podium saved");
        self.events.emit_lossy(AdminEvent::PodiumPublished {
            hackathon_id,
            winners,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Publish or hide the podium
    ///
    /// Publishing uses `winners` when given, else the local winners, and
    /// requires at least one assigned place. Hiding keeps the winners
    /// locally so that a later publish without override sends them again.
    pub async fn publish_results(&self, published: bool, winners: Option<Winners>) -> Result<()> {
        if published {
            let winners = match winners {
                Some(winners) => winners,
                None => self.state.read().await.winners.clone(),
            };
            if !winners.has_any() {
                return Err(ConsoleError::Validation(
                    "Assign at least one podium place before publishing.".to_string(),
                ));
            }
            return self.set_winners(winners).await;
        }

        let hackathon_id = self.require_hackathon().await?;
        let response = self
            .guarded(self.gateway.unpublish_podium(&hackathon_id))
            .await?;

        let issued_for = Some(hackathon_id.clone());
        let gateway = Arc::clone(&self.gateway);
        self.commit(&issued_for, move |state| {
            let kept = state.winners.clone();
            if let Some(dto) = response {
                state.apply(dto, &gateway);
            }
            state.winners = kept;
            state.are_results_published = false;
        })
        .await?;

        info!(hackathon_id = %hackathon_id, "Podium hidden");
        self.events.emit_lossy(AdminEvent::PodiumUnpublished {
            hackathon_id,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Replace the local preselection list; nothing is sent
    pub async fn set_preselected(&self, list: Vec<String>) {
        let list = dedup(list);
        debug!(count = list.len(), "Preselection list set locally");
        self.state.write().await.preselected = list;
    }

    /// Publish or hide the preselection list
    ///
    /// Publishing sends `list` when given, else the local list. Hiding
    /// clears only the flag.
    pub async fn publish_preselections(
        &self,
        published: bool,
        list: Option<Vec<String>>,
    ) -> Result<()> {
        if published {
            let list = match list {
                Some(list) => dedup(list),
                None => self.state.read().await.preselected.clone(),
            };
            if list.is_empty() {
                return Err(ConsoleError::Validation(
                    "Select at least one participant before publishing.".to_string(),
                ));
            }
            let hackathon_id = self.require_hackathon().await?;
            let response = self
                .guarded(self.gateway.publish_preselections(&hackathon_id, &list))
                .await?;

            let count = list.len();
            let issued_for = Some(hackathon_id.clone());
            let gateway = Arc::clone(&self.gateway);
            self.commit(&issued_for, move |state| match response {
                Some(dto) => state.apply(dto, &gateway),
                None => {
                    state.preselected = list;
                    state.are_preselections_published = true;
                }
            })
            .await?;

            info!(hackathon_id = %hackathon_id, count, "Preselections published");
            self.events.emit_lossy(AdminEvent::PreselectionsPublished {
                hackathon_id,
                count,
                timestamp: Utc::now(),
            });
            return Ok(());
        }

        let hackathon_id = self.require_hackathon().await?;
        let response = self
            .guarded(self.gateway.unpublish_preselections(&hackathon_id))
            .await?;

        let issued_for = Some(hackathon_id.clone());
        let gateway = Arc::clone(&self.gateway);
        self.commit(&issued_for, move |state| {
            let kept = state.preselected.clone();
            if let Some(dto) = response {
                state.apply(dto, &gateway);
            }
            state.preselected = kept;
            state.are_preselections_published = false;
        })
        .await?;

        info!(hackathon_id = %hackathon_id, "Preselections hidden");
        self.events.emit_lossy(AdminEvent::PreselectionsUnpublished {
            hackathon_id,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Upload a preselection PDF for server-side e-mail extraction
    ///
    /// Type and size are checked before anything is sent. The returned
    /// list is not applied; callers pass it to
    /// [`set_preselected`](Self::set_preselected).
    pub async fn upload_preselections_document(
        &self,
        upload: &DocumentUpload,
    ) -> Result<UploadPreselectionsResponse> {
        upload.validate()?;
        let hackathon_id = self.require_hackathon().await?;

        let response = self
            .guarded(
                self.gateway
                    .upload_preselections_document(&hackathon_id, upload),
            )
            .await?;

        let document = PreselectionsDocument {
            name: Some(upload.file_name.clone()),
            url: self.gateway.preselections_document_url(&hackathon_id),
        };
        let issued_for = Some(hackathon_id.clone());
        self.commit(&issued_for, move |state| state.document = Some(document))
            .await?;

        if response.matched_count == 0 {
            warn!(hackathon_id = %hackathon_id, "No registered e-mail found in the document");
        }
        self.events.emit_lossy(AdminEvent::PreselectionsDocumentUploaded {
            hackathon_id,
            matched_count: response.matched_count,
            timestamp: Utc::now(),
        });
        Ok(response)
    }

    pub async fn download_preselections_document(&self) -> Result<Vec<u8>> {
        let hackathon_id = self.require_hackathon().await?;
        self.guarded(self.gateway.download_preselections_document(&hackathon_id))
            .await
    }

    /// Delete the stored PDF; the preselection list is untouched
    pub async fn delete_preselections_document(&self) -> Result<()> {
        let hackathon_id = self.require_hackathon().await?;
        self.guarded(self.gateway.delete_preselections_document(&hackathon_id))
            .await?;

        let issued_for = Some(hackathon_id.clone());
        self.commit(&issued_for, |state| state.document = None).await?;

        self.events.emit_lossy(AdminEvent::PreselectionsDocumentDeleted {
            hackathon_id,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Generated PDF listing the hackathon's inscriptions
    pub async fn download_inscriptions_list(&self) -> Result<Vec<u8>> {
        let hackathon_id = self.require_hackathon().await?;
        self.guarded(self.gateway.download_inscriptions_list(&hackathon_id))
            .await
    }

    async fn require_hackathon(&self) -> Result<String> {
        self.hackathon
            .current_id()
            .await
            .ok_or(ConsoleError::NoActiveHackathon)
    }

    /// Race a gateway call against disposal
    async fn guarded<T, F>(&self, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.cancel.is_cancelled() {
            return Err(ConsoleError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                debug!("Request abandoned: coordinator disposed");
                Err(ConsoleError::Cancelled)
            }
            result = call => result,
        }
    }

    /// Apply a confirmed change unless the response went stale
    async fn commit<F>(&self, issued_for: &Option<String>, apply: F) -> Result<()>
    where
        F: FnOnce(&mut ResultsState),
    {
        if self.cancel.is_cancelled() {
            debug!("Dropping response: coordinator disposed");
            return Err(ConsoleError::Cancelled);
        }
        let current = self.hackathon.current_id().await;
        if current != *issued_for {
            debug!(
                issued_for = ?issued_for,
                current = ?current,
                "Dropping response for a hackathon that is no longer active"
            );
            return Err(ConsoleError::Cancelled);
        }
        let mut state = self.state.write().await;
        apply(&mut state);
        Ok(())
    }
}
