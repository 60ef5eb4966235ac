//! Announcements

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audience of an announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Cible {
    /// Everyone, including anonymous visitors
    Public,
    /// Registered participants only
    Inscrits,
}

impl std::str::FromStr for Cible {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PUBLIC" => Ok(Cible::Public),
            "INSCRITS" | "REGISTRANTS" => Ok(Cible::Inscrits),
            other => Err(format!("unknown audience: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnonceHackathon {
    pub id: String,
    pub nom: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annonce {
    pub id: String,
    pub titre: String,
    pub contenu: String,
    pub cible: Cible,
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub hackathon_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub hackathon: Option<AnnonceHackathon>,
}

/// POST /admin/annonces body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnonce {
    pub titre: String,
    pub contenu: String,
    pub cible: Cible,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hackathon_id: Option<String>,
}

/// PUT /annonces/admin/annonces/{id} body
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnnonce {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contenu: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cible: Option<Cible>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hackathon_id: Option<String>,
}
