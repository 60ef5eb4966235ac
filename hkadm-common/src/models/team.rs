//! Teams and their members

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub prenom: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub user_id: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub user: Option<MemberUser>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub nom: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub projet_nom: Option<String>,
    pub hackathon_id: String,
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

impl Team {
    /// Name shown in podium slots: the project name, else the team name
    pub fn project_name(&self) -> &str {
        self.projet_nom
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(&self.nom)
    }

    /// "Prénom Nom" of every member with an embedded user record
    pub fn member_names(&self) -> Vec<String> {
        self.members
            .iter()
            .filter_map(|m| m.user.as_ref())
            .map(|u| format!("{} {}", u.prenom, u.nom).trim().to_string())
            .collect()
    }
}

/// POST /teams/hackathon/{id} body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeam {
    pub nom: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projet_nom: Option<String>,
}

/// PUT /teams/{id} body
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeam {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projet_nom: Option<String>,
}

/// POST /teams/{id}/members body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_name_falls_back_to_team_name() {
        let mut team: Team =
            serde_json::from_str(r#"{"id":"t1","nom":"Rockets","hackathonId":"H1"}"#).unwrap();
        assert_eq!(team.project_name(), "Rockets");
        team.projet_nom = Some("Alpha".into());
        assert_eq!(team.project_name(), "Alpha");
        team.projet_nom = Some("  ".into());
        assert_eq!(team.project_name(), "Rockets");
    }
}
