//! Gateway wire models
//!
//! Field names follow the backend's JSON (camelCase, French domain terms);
//! Rust names are snake_case with serde renames.

mod annonce;
mod dashboard;
mod hackathon;
mod inscription;
mod monitoring;
mod resultats;
mod team;
mod user;

pub use annonce::{Annonce, AnnonceHackathon, Cible, CreateAnnonce, UpdateAnnonce};
pub use dashboard::{DashboardStats, DayCount, PromoCount, TechnologyCount};
pub use hackathon::{
    Countdown, CountdownPhase, CreateHackathon, Hackathon, HackathonStatus, PastHackathons,
    UpdateHackathon,
};
pub use inscription::{Inscription, InscriptionStatus, InscriptionUser, UpdateInscription};
pub use monitoring::{MonitoringLog, MonitoringLogs, SystemMetrics};
pub use resultats::{
    Place, Placement, PodiumRequest, PreselectionsRequest, ResultatsDto,
    UploadPreselectionsResponse, Winners,
};
pub use team::{AddMemberRequest, CreateTeam, MemberUser, Team, TeamMember, UpdateTeam};
pub use user::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest, Role, UpdateProfile,
    UpdateUser, User,
};
