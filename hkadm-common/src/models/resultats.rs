//! Results: podium winners and preselections
//!
//! A podium slot holds either a project name or the sentinel `"none"`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Podium rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Place {
    First,
    Second,
    Third,
}

impl Place {
    pub const ALL: [Place; 3] = [Place::First, Place::Second, Place::Third];

    pub fn label(&self) -> &'static str {
        match self {
            Place::First => "1st place",
            Place::Second => "2nd place",
            Place::Third => "3rd place",
        }
    }
}

/// Content of one podium slot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    Unassigned,
    Project(String),
}

impl Placement {
    /// Wire/UI sentinel for an empty slot
    pub const NONE: &'static str = "none";

    /// Parse a slot value; blank and `"none"` are unassigned
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == Self::NONE {
            Placement::Unassigned
        } else {
            Placement::Project(value.to_string())
        }
    }

    pub fn project(&self) -> Option<&str> {
        match self {
            Placement::Unassigned => None,
            Placement::Project(name) => Some(name),
        }
    }

    pub fn is_assigned(&self) -> bool {
        matches!(self, Placement::Project(_))
    }

    fn to_wire(&self) -> Option<String> {
        self.project().map(str::to_string)
    }
}

impl From<Option<String>> for Placement {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Placement::parse).unwrap_or_default()
    }
}

impl From<&str> for Placement {
    fn from(value: &str) -> Self {
        Placement::parse(value)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.project().unwrap_or(Self::NONE))
    }
}

impl Serialize for Placement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.project().unwrap_or(Self::NONE))
    }
}

impl<'de> Deserialize<'de> for Placement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(Placement::from(value))
    }
}

/// The three podium slots
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Winners {
    pub first: Placement,
    pub second: Placement,
    pub third: Placement,
}

impl Winners {
    pub fn new(
        first: impl Into<Placement>,
        second: impl Into<Placement>,
        third: impl Into<Placement>,
    ) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            third: third.into(),
        }
    }

    pub fn get(&self, place: Place) -> &Placement {
        match place {
            Place::First => &self.first,
            Place::Second => &self.second,
            Place::Third => &self.third,
        }
    }

    /// Assigned slots in rank order
    pub fn assigned(&self) -> Vec<(Place, &str)> {
        Place::ALL
            .iter()
            .filter_map(|place| self.get(*place).project().map(|name| (*place, name)))
            .collect()
    }

    pub fn has_any(&self) -> bool {
        Place::ALL.iter().any(|place| self.get(*place).is_assigned())
    }

    /// First project name that occupies more than one slot
    pub fn duplicate(&self) -> Option<&str> {
        let assigned = self.assigned();
        assigned.iter().enumerate().find_map(|(i, (_, name))| {
            assigned[i + 1..]
                .iter()
                .any(|(_, other)| other == name)
                .then_some(*name)
        })
    }

    pub fn to_request(&self) -> PodiumRequest {
        PodiumRequest {
            premier_place: self.first.to_wire(),
            deuxieme_place: self.second.to_wire(),
            troisieme_place: self.third.to_wire(),
        }
    }
}

/// POST /resultats/hackathon/{id}/podium body
///
/// Unassigned slots are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodiumRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premier_place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deuxieme_place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub troisieme_place: Option<String>,
}

/// POST /resultats/hackathon/{id}/preselections body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreselectionsRequest {
    #[serde(default)]
    pub preselectionnes: Vec<String>,
}

/// Results resource (`/resultats/public`, `/resultats/hackathon/{id}`)
///
/// Every field tolerates absence or `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultatsDto {
    #[serde(default)]
    pub hackathon_id: Option<String>,
    #[serde(default)]
    pub podium_publie: Option<bool>,
    #[serde(default)]
    pub preselections_publiees: Option<bool>,
    #[serde(default)]
    pub premier_place: Option<String>,
    #[serde(default)]
    pub deuxieme_place: Option<String>,
    #[serde(default)]
    pub troisieme_place: Option<String>,
    #[serde(default)]
    pub preselectionnes: Option<Vec<String>>,
    #[serde(default)]
    pub document_preselections_name: Option<String>,
    #[serde(default)]
    pub has_preselections_document: Option<bool>,
}

impl ResultatsDto {
    pub fn winners(&self) -> Winners {
        Winners {
            first: self.premier_place.clone().into(),
            second: self.deuxieme_place.clone().into(),
            third: self.troisieme_place.clone().into(),
        }
    }

    pub fn is_podium_published(&self) -> bool {
        self.podium_publie.unwrap_or(false)
    }

    pub fn are_preselections_published(&self) -> bool {
        self.preselections_publiees.unwrap_or(false)
    }

    pub fn preselected(&self) -> Vec<String> {
        self.preselectionnes.clone().unwrap_or_default()
    }

    pub fn has_document(&self) -> bool {
        self.has_preselections_document.unwrap_or(false)
    }
}

/// POST /resultats/hackathon/{id}/preselections/document response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPreselectionsResponse {
    #[serde(default)]
    pub matched_count: usize,
    #[serde(default)]
    pub preselectionnes: Vec<String>,
}
