//! Public results page model

use hkadm_common::models::{Place, Team};

use super::coordinator::ResultsState;

/// One podium place as the public page renders it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodiumEntry {
    pub place: Place,
    pub project: String,
    /// Team name when a team carries this project
    pub team: Option<String>,
    pub members: Vec<String>,
    pub description: Option<String>,
}

/// Public results page
///
/// A section is `None` when it is not published. Unassigned places are
/// left out of the podium.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicResults {
    pub hackathon_id: Option<String>,
    pub podium: Option<Vec<PodiumEntry>>,
    pub preselected: Option<Vec<String>>,
}

impl PublicResults {
    pub fn build(state: &ResultsState, teams: &[Team]) -> Self {
        let podium = state.are_results_published.then(|| {
            state
                .winners
                .assigned()
                .into_iter()
                .map(|(place, project)| entry(place, project, teams))
                .collect()
        });
        let preselected = state
            .are_preselections_published
            .then(|| state.preselected.clone());

        Self {
            hackathon_id: state.hackathon_id.clone(),
            podium,
            preselected,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.podium.is_none() && self.preselected.is_none()
    }
}

fn entry(place: Place, project: &str, teams: &[Team]) -> PodiumEntry {
    let team = teams
        .iter()
        .find(|t| t.project_name() == project)
        .or_else(|| teams.iter().find(|t| t.nom == project));

    PodiumEntry {
        place,
        project: project.to_string(),
        team: team.map(|t| t.nom.clone()),
        members: team.map(Team::member_names).unwrap_or_default(),
        description: team.and_then(|t| t.description.clone()),
    }
}
