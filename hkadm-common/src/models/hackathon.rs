//! Hackathon records and the public countdown

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hackathon lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HackathonStatus {
    Upcoming,
    Ongoing,
    Past,
}

impl std::str::FromStr for HackathonStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UPCOMING" => Ok(HackathonStatus::Upcoming),
            "ONGOING" => Ok(HackathonStatus::Ongoing),
            "PAST" => Ok(HackathonStatus::Past),
            other => Err(format!("unknown hackathon status: {}", other)),
        }
    }
}

/// Hackathon record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hackathon {
    pub id: String,
    pub nom: String,
    #[serde(default)]
    pub description: String,
    pub date_debut: DateTime<Utc>,
    pub date_fin: DateTime<Utc>,
    pub date_limite_inscription: DateTime<Utc>,
    pub status: HackathonStatus,
    #[serde(default)]
    pub nombre_inscriptions: Option<u64>,
    /// Registration goal shown on the dashboard
    #[serde(default)]
    pub objectif_inscriptions: Option<u64>,
}

/// Which deadline the public countdown is running towards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownPhase {
    /// Counting down to `date_debut`
    BeforeStart,
    /// Started; counting down to `date_limite_inscription`
    RegistrationOpen,
    /// Submissions closed; counting down to `date_fin`
    UntilEnd,
    Finished,
}

impl CountdownPhase {
    pub fn label(&self) -> &'static str {
        match self {
            CountdownPhase::BeforeStart => "Until start",
            CountdownPhase::RegistrationOpen => "Registration open",
            CountdownPhase::UntilEnd => "Until end",
            CountdownPhase::Finished => "Finished",
        }
    }
}

/// Remaining time split for display
///
/// Months are 30-day blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub phase: CountdownPhase,
    pub months: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Countdown {
    fn finished() -> Self {
        Self {
            phase: CountdownPhase::Finished,
            months: 0,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == CountdownPhase::Finished
    }
}

impl Hackathon {
    /// Countdown as seen at `now`
    pub fn countdown(&self, now: DateTime<Utc>) -> Countdown {
        let (target, phase) = if now < self.date_debut {
            (self.date_debut, CountdownPhase::BeforeStart)
        } else if now < self.date_limite_inscription {
            (self.date_limite_inscription, CountdownPhase::RegistrationOpen)
        } else if now < self.date_fin {
            (self.date_fin, CountdownPhase::UntilEnd)
        } else {
            return Countdown::finished();
        };

        let remaining = (target - now).num_seconds();
        if remaining <= 0 {
            return Countdown::finished();
        }
        let remaining = remaining as u64;

        let total_days = remaining / 86_400;
        Countdown {
            phase,
            months: total_days / 30,
            days: total_days % 30,
            hours: (remaining / 3_600) % 24,
            minutes: (remaining / 60) % 60,
            seconds: remaining % 60,
        }
    }

    /// Registrations as a percentage of the goal, capped at 100
    ///
    /// None when no goal is set.
    pub fn registration_progress(&self) -> Option<u8> {
        let goal = self.objectif_inscriptions.filter(|g| *g > 0)?;
        let count = self.nombre_inscriptions.unwrap_or(0);
        Some((count.saturating_mul(100) / goal).min(100) as u8)
    }
}

/// POST /hackathons body (admin)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHackathon {
    pub nom: String,
    pub description: String,
    pub date_debut: DateTime<Utc>,
    pub date_fin: DateTime<Utc>,
    pub date_limite_inscription: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<HackathonStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objectif_inscriptions: Option<u64>,
}

impl CreateHackathon {
    /// Dates must run start, registration deadline, end
    ///
    /// The deadline may fall on the start or end instant but not outside.
    pub fn check_dates(&self) -> Result<(), String> {
        if self.date_fin <= self.date_debut {
            return Err("The end date must be after the start date.".to_string());
        }
        if self.date_limite_inscription > self.date_fin {
            return Err("The registration deadline must not be after the end date.".to_string());
        }
        Ok(())
    }
}

/// PUT /hackathons/{id} body (admin)
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHackathon {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_debut: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_fin: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_limite_inscription: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<HackathonStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objectif_inscriptions: Option<u64>,
}

/// GET /hackathons/past response
///
/// The backend answers either with a bare list or with a paginated envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PastHackathons {
    Page {
        data: Vec<Hackathon>,
        #[serde(default)]
        total: Option<u64>,
    },
    List(Vec<Hackathon>),
}

impl PastHackathons {
    pub fn into_vec(self) -> Vec<Hackathon> {
        match self {
            PastHackathons::Page { data, .. } => data,
            PastHackathons::List(list) => list,
        }
    }
}
