//! hkadm - hackathon administration console
//!
//! Command-line front end over the admin services: log in, manage
//! hackathons, teams, inscriptions and announcements, publish the podium and
//! the preselection list.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use hkadm_common::config::{self, ConfigResolver, ConsoleConfig};
use hkadm_common::models::{
    AddMemberRequest, Cible, CreateAnnonce, CreateHackathon, CreateTeam, Hackathon,
    HackathonStatus, Inscription, InscriptionStatus, Place, Placement, RegisterRequest, Role,
    UpdateAnnonce, UpdateHackathon, UpdateProfile, UpdateTeam, UpdateUser, Winners,
};
use hkadm_console::{AdminServices, ConsoleError, DocumentUpload};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hkadm")]
#[command(about = "Hackathon administration console")]
#[command(version)]
struct Args {
    /// Backend base URL
    #[arg(long, global = true, env = "HKADM_API_URL")]
    api_url: Option<String>,

    /// Configuration file (default: ~/.config/hkadm/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Session file
    #[arg(long, global = true, env = "HKADM_SESSION_FILE")]
    session_file: Option<PathBuf>,

    /// Work on this hackathon instead of the public one (admin)
    #[arg(long = "hackathon", global = true, env = "HKADM_HACKATHON")]
    active_hackathon: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "HKADM_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in account
    Whoami,
    /// Create a participant account registered to a hackathon
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "HKADM_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        nom: String,
        #[arg(long)]
        prenom: String,
        #[arg(long)]
        promo: Option<String>,
        /// Repeat for several technologies
        #[arg(long = "tech")]
        technologies: Vec<String>,
        /// Defaults to the active hackathon
        #[arg(long = "for")]
        for_hackathon: Option<String>,
    },
    /// Own profile and password
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Active, available and past hackathons
    Hackathon {
        #[command(subcommand)]
        command: Option<HackathonCommand>,
    },
    /// Registration statistics (admin)
    Dashboard,
    /// Podium results
    #[command(subcommand)]
    Results(ResultsCommand),
    /// Preselection list and document
    #[command(subcommand)]
    Preselections(PreselectionsCommand),
    /// Inscriptions of the active hackathon, or your own
    #[command(subcommand)]
    Inscriptions(InscriptionsCommand),
    /// Teams of the active hackathon
    Teams {
        #[command(subcommand)]
        command: Option<TeamsCommand>,
    },
    /// Announcements
    Announcements {
        #[command(subcommand)]
        command: Option<AnnouncementsCommand>,
    },
    /// User accounts (admin)
    #[command(subcommand)]
    Users(UsersCommand),
    /// System metrics and AI module logs (admin)
    #[command(subcommand)]
    Monitoring(MonitoringCommand),
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    /// Change your name
    Update {
        #[arg(long)]
        nom: Option<String>,
        #[arg(long)]
        prenom: Option<String>,
    },
    /// Change your password
    Password {
        #[arg(long, env = "HKADM_PASSWORD", hide_env_values = true)]
        current: String,
        #[arg(long, env = "HKADM_NEW_PASSWORD", hide_env_values = true)]
        new: String,
    },
}

#[derive(Subcommand, Debug)]
enum HackathonCommand {
    /// Show the active hackathon (default)
    Show,
    /// Hackathons open for registration
    Available,
    /// List past hackathons
    Past {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Create a hackathon (admin)
    Create {
        #[arg(long)]
        nom: String,
        #[arg(long, default_value = "")]
        description: String,
        /// RFC 3339, e.g. 2026-03-01T09:00:00Z
        #[arg(long)]
        start: DateTime<Utc>,
        #[arg(long)]
        end: DateTime<Utc>,
        /// Registration deadline
        #[arg(long)]
        deadline: DateTime<Utc>,
        #[arg(long)]
        status: Option<HackathonStatus>,
        /// Registration goal
        #[arg(long)]
        goal: Option<u64>,
    },
    /// Edit a hackathon (admin); unset options are left unchanged
    Update {
        id: String,
        #[arg(long)]
        nom: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        start: Option<DateTime<Utc>>,
        #[arg(long)]
        end: Option<DateTime<Utc>>,
        #[arg(long)]
        deadline: Option<DateTime<Utc>>,
        #[arg(long)]
        status: Option<HackathonStatus>,
        #[arg(long)]
        goal: Option<u64>,
    },
    /// Delete a hackathon (admin)
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum ResultsCommand {
    /// Show results state and the public page
    Show,
    /// Publish the podium (unset places keep the stored winner)
    PublishPodium {
        #[arg(long)]
        first: Option<String>,
        #[arg(long)]
        second: Option<String>,
        #[arg(long)]
        third: Option<String>,
    },
    /// Hide the podium
    Unpublish,
}

#[derive(Subcommand, Debug)]
enum PreselectionsCommand {
    /// Publish the given e-mails, or the stored list when none are given
    Publish { emails: Vec<String> },
    /// Hide the preselection list
    Unpublish,
    /// Upload a PDF and extract the preselected e-mails
    Upload {
        file: PathBuf,
        /// Publish the extracted list right away
        #[arg(long)]
        publish: bool,
    },
    /// Save the stored PDF
    Download { output: PathBuf },
    /// Delete the stored PDF
    DeleteDocument,
}

#[derive(Subcommand, Debug)]
enum InscriptionsCommand {
    /// List inscriptions with their status (admin)
    List,
    /// Save the generated inscriptions PDF (admin)
    Pdf { output: PathBuf },
    /// Validate, refuse or reset an inscription (admin)
    SetStatus {
        id: String,
        /// VALIDE, EN_ATTENTE or REFUSE
        status: InscriptionStatus,
    },
    /// Delete an inscription (admin)
    Delete { id: String },
    /// Your own inscriptions
    Mine,
    /// One inscription by id
    Show { id: String },
    /// Withdraw one of your inscriptions
    Withdraw { id: String },
}

#[derive(Subcommand, Debug)]
enum TeamsCommand {
    /// List teams (default)
    List,
    /// Create a team in the active hackathon (admin)
    Create {
        nom: String,
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Edit a team (admin)
    Update {
        id: String,
        #[arg(long)]
        nom: Option<String>,
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a team (admin)
    Delete { id: String },
    /// Add a user to a team (admin)
    AddMember {
        team: String,
        user: String,
        #[arg(long)]
        role: Option<String>,
    },
    /// Remove a user from a team (admin)
    RemoveMember { team: String, user: String },
}

#[derive(Subcommand, Debug)]
enum AnnouncementsCommand {
    /// List public announcements (default)
    List {
        /// Announcements for registered participants instead
        #[arg(long)]
        registrants: bool,
    },
    /// Post an announcement (admin)
    Create {
        #[arg(long)]
        titre: String,
        #[arg(long)]
        contenu: String,
        /// PUBLIC or INSCRITS
        #[arg(long, default_value = "PUBLIC")]
        cible: Cible,
        /// Attach to the active hackathon
        #[arg(long)]
        scoped: bool,
    },
    /// Edit an announcement (admin)
    Update {
        id: String,
        #[arg(long)]
        titre: Option<String>,
        #[arg(long)]
        contenu: Option<String>,
        #[arg(long)]
        cible: Option<Cible>,
    },
    /// Delete an announcement (admin)
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum UsersCommand {
    List,
    Update {
        id: String,
        #[arg(long)]
        nom: Option<String>,
        #[arg(long)]
        prenom: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// USER or ADMIN
        #[arg(long)]
        role: Option<Role>,
    },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum MonitoringCommand {
    Metrics,
    Logs {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        limit: u32,
        /// SURVEILLANCE, SUGGESTION, ...
        #[arg(long = "type")]
        kind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let toml = match &args.config {
        Some(path) => config::load_or_default(Some(path.as_path())),
        None => config::load_or_default(config::default_config_path().as_deref()),
    };
    let resolved = ConfigResolver::new(toml)
        .with_cli_api_url(args.api_url.clone())
        .with_cli_session_file(args.session_file.clone())
        .resolve();
    let console_config = match resolved {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&console_config);
    debug!(
        "hkadm v{} using {}",
        env!("CARGO_PKG_VERSION"),
        console_config.api_base_url
    );

    match run(args.command, args.active_hackathon, console_config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = match e.downcast_ref::<ConsoleError>() {
                Some(console) => console.user_message(),
                None => format!("{:#}", e),
            };
            error!("{:#}", e);
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr, or to the configured file
fn init_tracing(config: &ConsoleConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let file = config.logging.file.as_ref().and_then(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| eprintln!("Cannot open log file {}: {}", path.display(), e))
            .ok()
    });
    match file {
        Some(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
        None => builder.with_writer(std::io::stderr).init(),
    }
}

async fn run(
    command: Command,
    active_hackathon: Option<String>,
    config: ConsoleConfig,
) -> Result<()> {
    if let Command::Login { email, password } = &command {
        let services = AdminServices::build(config)?;
        let user = services.auth.login(email, password).await?;
        println!("Logged in as {} ({:?})", user.display_name(), user.role);
        return Ok(());
    }
    if let Command::Logout = command {
        let services = AdminServices::build(config)?;
        services.auth.logout().await?;
        println!("Logged out");
        return Ok(());
    }

    let services = AdminServices::init(config).await?;
    let outcome = match active_hackathon {
        Some(id) => match select_hackathon(&services, &id).await {
            Ok(()) => dispatch(command, &services).await,
            Err(e) => Err(e),
        },
        None => dispatch(command, &services).await,
    };
    services.dispose().await;
    outcome
}

/// Make `id` the active hackathon and load its results before dispatching
async fn select_hackathon(services: &AdminServices, id: &str) -> Result<()> {
    let hackathon = services.hackathon.select(id).await?;
    debug!(hackathon_id = %hackathon.id, "Selected hackathon");
    services.results.refresh().await?;
    Ok(())
}

async fn dispatch(command: Command, services: &AdminServices) -> Result<()> {
    match command {
        Command::Login { .. } | Command::Logout => Ok(()),
        Command::Whoami => {
            match services.auth.current_user().await {
                Some(_) => {
                    let user = services.auth.profile().await?;
                    println!("{} <{}> {:?}", user.display_name(), user.email, user.role);
                }
                None => println!("Not logged in"),
            }
            Ok(())
        }
        Command::Register {
            email,
            password,
            nom,
            prenom,
            promo,
            technologies,
            for_hackathon,
        } => {
            let hackathon_id = match for_hackathon {
                Some(id) => id,
                None => services
                    .hackathon
                    .current_id()
                    .await
                    .ok_or(ConsoleError::NoActiveHackathon)?,
            };
            let request = RegisterRequest {
                email,
                password,
                nom,
                prenom,
                promo,
                technologies,
                hackathon_id,
            };
            services.auth.register(&request).await?;
            println!("Registered {} for {}", request.email, request.hackathon_id);
            Ok(())
        }
        Command::Profile(cmd) => profile(cmd, services).await,
        Command::Hackathon { command } => {
            hackathon(command.unwrap_or(HackathonCommand::Show), services).await
        }
        Command::Dashboard => {
            let stats = services.gateway.get_dashboard().await?;
            println!("Registrations: {}", stats.total_inscrits);
            if let Some(today) = stats.inscriptions_aujourdhui {
                println!("Today: {}", today);
            }
            for promo in &stats.par_promo {
                println!("  {:<12} {}", promo.promo, promo.count);
            }
            for tech in &stats.par_technologie {
                println!("  {:<12} {}", tech.technologie, tech.count);
            }
            Ok(())
        }
        Command::Results(cmd) => results(cmd, services).await,
        Command::Preselections(cmd) => preselections(cmd, services).await,
        Command::Inscriptions(cmd) => inscriptions(cmd, services).await,
        Command::Teams { command } => {
            teams(command.unwrap_or(TeamsCommand::List), services).await
        }
        Command::Announcements { command } => {
            let command = command.unwrap_or(AnnouncementsCommand::List { registrants: false });
            announcements(command, services).await
        }
        Command::Users(cmd) => users(cmd, services).await,
        Command::Monitoring(cmd) => monitoring(cmd, services).await,
    }
}

async fn profile(cmd: ProfileCommand, services: &AdminServices) -> Result<()> {
    match cmd {
        ProfileCommand::Update { nom, prenom } => {
            let user = services
                .auth
                .update_profile(&UpdateProfile { nom, prenom })
                .await?;
            println!("Profile updated: {}", user.display_name());
        }
        ProfileCommand::Password { current, new } => {
            services.auth.change_password(&current, &new).await?;
            println!("Password changed");
        }
    }
    Ok(())
}

async fn hackathon(cmd: HackathonCommand, services: &AdminServices) -> Result<()> {
    let state = &services.hackathon;
    match cmd {
        HackathonCommand::Show => show_hackathon(services).await?,
        HackathonCommand::Available => {
            for hackathon in state.available().await? {
                print_hackathon_line(&hackathon);
            }
        }
        HackathonCommand::Past { year, page } => {
            for hackathon in state.past(page, 10, year).await? {
                print_hackathon_line(&hackathon);
            }
        }
        HackathonCommand::Create {
            nom,
            description,
            start,
            end,
            deadline,
            status,
            goal,
        } => {
            let created = state
                .create(&CreateHackathon {
                    nom,
                    description,
                    date_debut: start,
                    date_fin: end,
                    date_limite_inscription: deadline,
                    status,
                    objectif_inscriptions: goal,
                })
                .await?;
            println!("Created {} ({})", created.nom, created.id);
        }
        HackathonCommand::Update {
            id,
            nom,
            description,
            start,
            end,
            deadline,
            status,
            goal,
        } => {
            let patch = UpdateHackathon {
                nom,
                description,
                date_debut: start,
                date_fin: end,
                date_limite_inscription: deadline,
                status,
                objectif_inscriptions: goal,
            };
            let updated = state.update(&id, &patch).await?;
            println!("Updated {} ({})", updated.nom, updated.id);
        }
        HackathonCommand::Delete { id } => {
            state.delete(&id).await?;
            println!("Deleted {}", id);
        }
    }
    Ok(())
}

fn print_hackathon_line(hackathon: &Hackathon) {
    println!(
        "{} {:<32} {:<9} {}",
        hackathon.date_debut.format("%Y-%m-%d"),
        hackathon.nom,
        format!("{:?}", hackathon.status),
        hackathon.id
    );
}

async fn show_hackathon(services: &AdminServices) -> Result<()> {
    let Some(hackathon) = services.hackathon.current().await else {
        println!("No active hackathon");
        return Ok(());
    };
    println!("{} ({})", hackathon.nom, hackathon.id);
    println!("Status: {:?}", hackathon.status);
    println!(
        "Dates: {} -> {} (registration until {})",
        hackathon.date_debut.format("%Y-%m-%d"),
        hackathon.date_fin.format("%Y-%m-%d"),
        hackathon.date_limite_inscription.format("%Y-%m-%d")
    );
    if let Some(progress) = hackathon.registration_progress() {
        println!("Registrations: {}% of goal", progress);
    }
    let countdown = hackathon.countdown(Utc::now());
    println!(
        "{}: {}mo {}d {}h {}m {}s",
        countdown.phase.label(),
        countdown.months,
        countdown.days,
        countdown.hours,
        countdown.minutes,
        countdown.seconds
    );
    Ok(())
}

async fn results(cmd: ResultsCommand, services: &AdminServices) -> Result<()> {
    let coordinator = &services.results;
    match cmd {
        ResultsCommand::Show => {
            let state = coordinator.snapshot().await;
            println!(
                "Podium: {}",
                if state.are_results_published { "published" } else { "hidden" }
            );
            for place in Place::ALL {
                println!("  {:<6} {}", place.label(), state.winners.get(place));
            }
            println!(
                "Preselections: {} ({} participants)",
                if state.are_preselections_published { "published" } else { "hidden" },
                state.preselected.len()
            );
            if let Some(document) = &state.document {
                println!(
                    "Document: {} ({})",
                    document.name.as_deref().unwrap_or("preselections.pdf"),
                    document.url
                );
            }

            let teams = services.teams.load().await.unwrap_or_default();
            let view = coordinator.public_view(&teams).await;
            if let Some(podium) = &view.podium {
                println!("Public podium:");
                for entry in podium {
                    println!(
                        "  {:<6} {} {}",
                        entry.place.label(),
                        entry.project,
                        entry.members.join(", ")
                    );
                }
            }
        }
        ResultsCommand::PublishPodium { first, second, third } => {
            let stored = coordinator.snapshot().await.winners;
            let pick = |arg: Option<String>, kept: &Placement| match arg {
                Some(value) => Placement::parse(&value),
                None => kept.clone(),
            };
            let winners = Winners {
                first: pick(first, &stored.first),
                second: pick(second, &stored.second),
                third: pick(third, &stored.third),
            };
            coordinator.publish_results(true, Some(winners)).await?;
            println!("Podium published");
        }
        ResultsCommand::Unpublish => {
            coordinator.publish_results(false, None).await?;
            println!("Podium hidden");
        }
    }
    Ok(())
}

async fn preselections(cmd: PreselectionsCommand, services: &AdminServices) -> Result<()> {
    let coordinator = &services.results;
    match cmd {
        PreselectionsCommand::Publish { emails } => {
            let list = (!emails.is_empty()).then_some(emails);
            coordinator.publish_preselections(true, list).await?;
            println!(
                "Preselections published ({} participants)",
                coordinator.snapshot().await.preselected.len()
            );
        }
        PreselectionsCommand::Unpublish => {
            coordinator.publish_preselections(false, None).await?;
            println!("Preselections hidden");
        }
        PreselectionsCommand::Upload { file, publish } => {
            let upload = DocumentUpload::from_path(&file)?;
            let response = coordinator.upload_preselections_document(&upload).await?;
            println!("{} registered e-mails found", response.matched_count);
            for email in &response.preselectionnes {
                println!("  {}", email);
            }
            coordinator.set_preselected(response.preselectionnes).await;
            if publish {
                coordinator.publish_preselections(true, None).await?;
                println!("Preselections published");
            }
        }
        PreselectionsCommand::Download { output } => {
            let bytes = coordinator.download_preselections_document().await?;
            save(&output, &bytes)?;
        }
        PreselectionsCommand::DeleteDocument => {
            coordinator.delete_preselections_document().await?;
            println!("Document deleted");
        }
    }
    Ok(())
}

async fn inscriptions(cmd: InscriptionsCommand, services: &AdminServices) -> Result<()> {
    let store = &services.inscriptions;
    match cmd {
        InscriptionsCommand::List => {
            for inscription in &store.load().await? {
                print_inscription_line(inscription);
            }
            let counts = store.counts().await;
            println!(
                "{} total: {} pending, {} validated, {} refused",
                counts.total(),
                counts.pending,
                counts.validated,
                counts.refused
            );
        }
        InscriptionsCommand::Pdf { output } => {
            let bytes = services.results.download_inscriptions_list().await?;
            save(&output, &bytes)?;
        }
        InscriptionsCommand::SetStatus { id, status } => {
            let updated = store.update_status(&id, status).await?;
            println!("{} is now {:?}", updated.id, updated.statut);
        }
        InscriptionsCommand::Delete { id } => {
            store.delete(&id).await?;
            println!("Deleted {}", id);
        }
        InscriptionsCommand::Mine => {
            for inscription in &store.mine().await? {
                print_inscription_line(inscription);
            }
        }
        InscriptionsCommand::Show { id } => {
            let inscription = store.get(&id).await?;
            print_inscription_line(&inscription);
            println!("Hackathon: {}", inscription.hackathon_id);
            println!("Registered: {}", inscription.created_at.format("%Y-%m-%d %H:%M"));
        }
        InscriptionsCommand::Withdraw { id } => {
            store.withdraw(&id).await?;
            println!("Withdrawn {}", id);
        }
    }
    Ok(())
}

fn print_inscription_line(inscription: &Inscription) {
    println!(
        "{:<10} {:<12} {:<32} {}",
        inscription.id,
        format!("{:?}", inscription.statut),
        inscription.email().unwrap_or("-"),
        inscription.promo.as_deref().unwrap_or("")
    );
}

async fn teams(cmd: TeamsCommand, services: &AdminServices) -> Result<()> {
    let store = &services.teams;
    match cmd {
        TeamsCommand::List => {
            for team in store.load().await? {
                println!(
                    "{:<8} {:<24} {:<24} {}",
                    team.id,
                    team.nom,
                    team.project_name(),
                    team.member_names().join(", ")
                );
            }
        }
        TeamsCommand::Create {
            nom,
            project,
            description,
        } => {
            let created = store
                .create(&CreateTeam {
                    nom,
                    description,
                    projet_nom: project,
                })
                .await?;
            println!("Created {} ({})", created.nom, created.id);
        }
        TeamsCommand::Update {
            id,
            nom,
            project,
            description,
        } => {
            let patch = UpdateTeam {
                nom,
                description,
                projet_nom: project,
            };
            let updated = store.update(&id, &patch).await?;
            println!("Updated {} ({})", updated.nom, updated.id);
        }
        TeamsCommand::Delete { id } => {
            store.delete(&id).await?;
            println!("Deleted {}", id);
        }
        TeamsCommand::AddMember { team, user, role } => {
            store
                .add_member(&team, &AddMemberRequest { user_id: user, role })
                .await?;
            println!("Member added to {}", team);
        }
        TeamsCommand::RemoveMember { team, user } => {
            store.remove_member(&team, &user).await?;
            println!("Member removed from {}", team);
        }
    }
    Ok(())
}

async fn announcements(cmd: AnnouncementsCommand, services: &AdminServices) -> Result<()> {
    let store = &services.announcements;
    match cmd {
        AnnouncementsCommand::List { registrants } => {
            let list = if registrants {
                store.load_for_registrants().await?
            } else {
                store.load_public().await?
            };
            for annonce in list {
                println!(
                    "{} [{}] {}",
                    annonce.id,
                    annonce.created_at.format("%Y-%m-%d"),
                    annonce.titre
                );
                println!("    {}", annonce.contenu);
            }
        }
        AnnouncementsCommand::Create {
            titre,
            contenu,
            cible,
            scoped,
        } => {
            let hackathon_id = if scoped {
                Some(
                    services
                        .hackathon
                        .current_id()
                        .await
                        .ok_or(ConsoleError::NoActiveHackathon)?,
                )
            } else {
                None
            };
            let created = store
                .create(&CreateAnnonce {
                    titre,
                    contenu,
                    cible,
                    hackathon_id,
                })
                .await?;
            println!("Posted {} ({})", created.titre, created.id);
        }
        AnnouncementsCommand::Update {
            id,
            titre,
            contenu,
            cible,
        } => {
            let patch = UpdateAnnonce {
                titre,
                contenu,
                cible,
                hackathon_id: None,
            };
            let updated = store.update(&id, &patch).await?;
            println!("Updated {} ({})", updated.titre, updated.id);
        }
        AnnouncementsCommand::Delete { id } => {
            store.delete(&id).await?;
            println!("Deleted {}", id);
        }
    }
    Ok(())
}

async fn users(cmd: UsersCommand, services: &AdminServices) -> Result<()> {
    let store = &services.users;
    match cmd {
        UsersCommand::List => {
            for user in store.load().await? {
                println!(
                    "{:<10} {:<32} {:<24} {:?}",
                    user.id,
                    user.email,
                    user.display_name(),
                    user.role
                );
            }
        }
        UsersCommand::Update {
            id,
            nom,
            prenom,
            email,
            role,
        } => {
            let patch = UpdateUser {
                nom,
                prenom,
                email,
                role,
            };
            let updated = store.update(&id, &patch).await?;
            println!("Updated {} <{}>", updated.display_name(), updated.email);
        }
        UsersCommand::Delete { id } => {
            store.delete(&id).await?;
            println!("Deleted {}", id);
        }
    }
    Ok(())
}

async fn monitoring(cmd: MonitoringCommand, services: &AdminServices) -> Result<()> {
    match cmd {
        MonitoringCommand::Metrics => {
            for (name, value) in services.monitoring.metrics().await?.entries() {
                println!("{:<32} {}", name, value);
            }
        }
        MonitoringCommand::Logs { page, limit, kind } => {
            for log in services.monitoring.logs(page, limit, kind.as_deref()).await? {
                let at = log
                    .created_at
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_default();
                let subject = match log.user_id() {
                    Some(user) => format!("user {}", user),
                    None => log.input.as_ref().map(|v| v.to_string()).unwrap_or_default(),
                };
                println!("{:<19} {:<12} {}", at, log.kind, subject);
            }
        }
    }
    Ok(())
}

fn save(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    println!("Saved {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("hkadm").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_global_hackathon_flag_after_subcommand() {
        let args = parse(&["teams", "list", "--hackathon", "H2"]);
        assert_eq!(args.active_hackathon.as_deref(), Some("H2"));
        assert!(matches!(
            args.command,
            Command::Teams {
                command: Some(TeamsCommand::List)
            }
        ));
    }

    #[test]
    fn test_hackathon_create_parses_dates_and_status() {
        let args = parse(&[
            "hackathon",
            "create",
            "--nom",
            "Winter Hack",
            "--start",
            "2026-11-01T09:00:00Z",
            "--end",
            "2026-11-03T18:00:00Z",
            "--deadline",
            "2026-11-02T09:00:00Z",
            "--status",
            "ongoing",
        ]);
        match args.command {
            Command::Hackathon {
                command: Some(HackathonCommand::Create { nom, status, start, .. }),
            } => {
                assert_eq!(nom, "Winter Hack");
                assert_eq!(status, Some(HackathonStatus::Ongoing));
                assert_eq!(start.to_rfc3339(), "2026-11-01T09:00:00+00:00");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_mutation_subcommands_parse() {
        assert!(matches!(
            parse(&["inscriptions", "set-status", "i1", "VALIDE"]).command,
            Command::Inscriptions(InscriptionsCommand::SetStatus {
                status: InscriptionStatus::Valide,
                ..
            })
        ));
        assert!(matches!(
            parse(&["users", "update", "u2", "--role", "admin"]).command,
            Command::Users(UsersCommand::Update {
                role: Some(Role::Admin),
                ..
            })
        ));
        assert!(matches!(
            parse(&["teams", "add-member", "t1", "u2", "--role", "LEADER"]).command,
            Command::Teams {
                command: Some(TeamsCommand::AddMember { .. })
            }
        ));
        assert!(matches!(
            parse(&[
                "announcements",
                "create",
                "--titre",
                "Hi",
                "--contenu",
                "Go",
                "--cible",
                "inscrits",
            ])
            .command,
            Command::Announcements {
                command: Some(AnnouncementsCommand::Create {
                    cible: Cible::Inscrits,
                    ..
                })
            }
        ));
        assert!(matches!(
            parse(&["monitoring", "logs", "--type", "SURVEILLANCE", "--limit", "50"])
                .command,
            Command::Monitoring(MonitoringCommand::Logs { limit: 50, .. })
        ));
        let register = parse(&[
            "register",
            "--email",
            "lea@hack.test",
            "--password",
            "pw",
            "--nom",
            "D",
            "--prenom",
            "L",
            "--tech",
            "rust",
            "--tech",
            "go",
            "--for",
            "H1",
        ]);
        assert!(matches!(
            register.command,
            Command::Register { ref technologies, ref for_hackathon, .. }
                if technologies.len() == 2 && for_hackathon.as_deref() == Some("H1")
        ));
    }

    #[test]
    fn test_unknown_status_rejected() {
        let parsed =
            Args::try_parse_from(["hkadm", "hackathon", "update", "H1", "--status", "soon"]);
        assert!(parsed.is_err());
    }
}
