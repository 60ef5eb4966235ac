//! Participant registrations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validation status of a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InscriptionStatus {
    EnAttente,
    Valide,
    Refuse,
}

impl std::str::FromStr for InscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EN_ATTENTE" | "PENDING" => Ok(InscriptionStatus::EnAttente),
            "VALIDE" | "VALID" => Ok(InscriptionStatus::Valide),
            "REFUSE" | "REFUSED" => Ok(InscriptionStatus::Refuse),
            other => Err(format!("unknown inscription status: {}", other)),
        }
    }
}

/// Registrant summary embedded in an inscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InscriptionUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub prenom: String,
}

/// Registration of a participant for one hackathon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inscription {
    pub id: String,
    pub user_id: String,
    pub hackathon_id: String,
    #[serde(default)]
    pub promo: Option<String>,
    /// Free-form on the backend (list of strings or object)
    #[serde(default)]
    pub technologies: Option<serde_json::Value>,
    pub statut: InscriptionStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub user: Option<InscriptionUser>,
}

impl Inscription {
    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }
}

/// PUT /admin/inscriptions/{id} body
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateInscription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statut: Option<InscriptionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technologies: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&InscriptionStatus::EnAttente).unwrap(),
            "\"EN_ATTENTE\""
        );
        let s: InscriptionStatus = serde_json::from_str("\"REFUSE\"").unwrap();
        assert_eq!(s, InscriptionStatus::Refuse);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("valide".parse::<InscriptionStatus>(), Ok(InscriptionStatus::Valide));
        assert!("maybe".parse::<InscriptionStatus>().is_err());
    }
}
