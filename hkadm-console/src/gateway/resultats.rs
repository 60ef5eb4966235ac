//! `/resultats` endpoints: podium, preselections and their documents

use hkadm_common::models::{
    PodiumRequest, PreselectionsRequest, ResultatsDto, UploadPreselectionsResponse,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, Url};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{Access, Gateway};
use crate::error::{ConsoleError, Result};
use crate::results::DocumentUpload;

/// Keys that identify a results representation in a mutation response
const RESULTS_KEYS: [&str; 6] = [
    "podiumPublie",
    "preselectionsPubliees",
    "premierPlace",
    "deuxiemePlace",
    "troisiemePlace",
    "preselectionnes",
];

/// Interpret a mutation response as a results representation, if it is one
///
/// Acknowledgements such as `{"message": "ok"}` yield None.
pub(crate) fn results_representation(value: Value) -> Option<ResultatsDto> {
    let is_results = value
        .as_object()
        .is_some_and(|obj| RESULTS_KEYS.iter().any(|k| obj.contains_key(*k)));
    if !is_results {
        return None;
    }
    match serde_json::from_value(value) {
        Ok(dto) => Some(dto),
        Err(e) => {
            warn!("Undecodable results representation, keeping sent values: {}", e);
            None
        }
    }
}

/// Treat 404 and an empty/null body as "no results yet"
fn optional(result: Result<Option<ResultatsDto>>) -> Result<Option<ResultatsDto>> {
    match result {
        Err(e) if e.is_not_found() => {
            debug!("No results resource yet");
            Ok(None)
        }
        other => other,
    }
}

impl Gateway {
    /// `/resultats/hackathon/{id}` followed by `rest`
    fn results_url(&self, hackathon_id: &str, rest: &[&str]) -> Url {
        let mut segments = vec!["resultats", "hackathon", hackathon_id];
        segments.extend_from_slice(rest);
        self.endpoint(&segments)
    }

    /// GET /resultats/public
    pub async fn get_public_resultats(&self) -> Result<Option<ResultatsDto>> {
        optional(
            self.get_json(self.endpoint(&["resultats", "public"]), Access::Public)
                .await,
        )
    }

    /// GET /resultats/hackathon/{id} (admin)
    pub async fn get_resultats(&self, hackathon_id: &str) -> Result<Option<ResultatsDto>> {
        optional(
            self.get_json(self.results_url(hackathon_id, &[]), Access::Authenticated)
                .await,
        )
    }

    /// POST /resultats/hackathon/{id}/podium
    pub async fn publish_podium(
        &self,
        hackathon_id: &str,
        podium: &PodiumRequest,
    ) -> Result<Option<ResultatsDto>> {
        let value = self
            .send_value(
                Method::POST,
                self.results_url(hackathon_id, &["podium"]),
                Some(podium),
                Access::Authenticated,
            )
            .await?;
        info!(hackathon_id, "Podium published");
        Ok(results_representation(value))
    }

    /// DELETE /resultats/hackathon/{id}/podium
    pub async fn unpublish_podium(&self, hackathon_id: &str) -> Result<Option<ResultatsDto>> {
        let value = self
            .send_value::<()>(
                Method::DELETE,
                self.results_url(hackathon_id, &["podium"]),
                None,
                Access::Authenticated,
            )
            .await?;
        info!(hackathon_id, "Podium unpublished");
        Ok(results_representation(value))
    }

    /// POST /resultats/hackathon/{id}/preselections
    pub async fn publish_preselections(
        &self,
        hackathon_id: &str,
        preselectionnes: &[String],
    ) -> Result<Option<ResultatsDto>> {
        let body = PreselectionsRequest {
            preselectionnes: preselectionnes.to_vec(),
        };
        let value = self
            .send_value(
                Method::POST,
                self.results_url(hackathon_id, &["preselections"]),
                Some(&body),
                Access::Authenticated,
            )
            .await?;
        info!(hackathon_id, count = preselectionnes.len(), "Preselections published");
        Ok(results_representation(value))
    }

    /// DELETE /resultats/hackathon/{id}/preselections
    pub async fn unpublish_preselections(&self, hackathon_id: &str) -> Result<Option<ResultatsDto>> {
        let value = self
            .send_value::<()>(
                Method::DELETE,
                self.results_url(hackathon_id, &["preselections"]),
                None,
                Access::Authenticated,
            )
            .await?;
        info!(hackathon_id, "Preselections unpublished");
        Ok(results_representation(value))
    }

    /// POST /resultats/hackathon/{id}/preselections/document (multipart `file`)
    ///
    /// The backend extracts e-mails from the PDF and matches them against
    /// registrations.
    pub async fn upload_preselections_document(
        &self,
        hackathon_id: &str,
        upload: &DocumentUpload,
    ) -> Result<UploadPreselectionsResponse> {
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)
            .map_err(|e| ConsoleError::Validation(format!("Invalid content type: {}", e)))?;
        let form = Form::new().part("file", part);

        let response: UploadPreselectionsResponse = self
            .send_multipart(
                self.results_url(hackathon_id, &["preselections", "document"]),
                form,
                Access::Authenticated,
            )
            .await?;

        info!(
            hackathon_id,
            file = %upload.file_name,
            matched = response.matched_count,
            "Preselections document processed"
        );
        Ok(response)
    }

    /// GET /resultats/hackathon/{id}/preselections/document
    pub async fn download_preselections_document(&self, hackathon_id: &str) -> Result<Vec<u8>> {
        self.get_bytes(
            self.results_url(hackathon_id, &["preselections", "document"]),
            Access::Authenticated,
        )
        .await
    }

    /// DELETE /resultats/hackathon/{id}/preselections/document
    pub async fn delete_preselections_document(&self, hackathon_id: &str) -> Result<()> {
        self.send_value::<()>(
            Method::DELETE,
            self.results_url(hackathon_id, &["preselections", "document"]),
            None,
            Access::Authenticated,
        )
        .await?;
        info!(hackathon_id, "Preselections document deleted");
        Ok(())
    }

    /// GET /resultats/hackathon/{id}/inscriptions/liste-pdf
    pub async fn download_inscriptions_list(&self, hackathon_id: &str) -> Result<Vec<u8>> {
        self.get_bytes(
            self.results_url(hackathon_id, &["inscriptions", "liste-pdf"]),
            Access::Authenticated,
        )
        .await
    }

    /// Download URL of the stored preselection PDF
    ///
    /// Derived client-side; the backend only reports whether a document exists.
    pub fn preselections_document_url(&self, hackathon_id: &str) -> String {
        self.results_url(hackathon_id, &["preselections", "document"])
            .to_string()
    }
}
