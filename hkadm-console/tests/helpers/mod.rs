//! Test helper utilities
//!
//! Shared setup for hkadm-console integration tests

#![allow(dead_code)]

pub mod mock_gateway;

pub use mock_gateway::{
    hackathon_json, inscription_json, team_json, MockBackend, MockGateway, RecordedRequest,
    ADMIN_TOKEN, PASSWORD, USER_TOKEN,
};

use hkadm_common::config::ConsoleConfig;
use hkadm_common::models::{LoginResponse, Role, User};
use hkadm_console::AdminServices;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

/// Console config pointing at the mock, with a session file in `dir`
pub fn config_for(gateway: &MockGateway, dir: &TempDir) -> ConsoleConfig {
    let mut config = ConsoleConfig::new(gateway.base_url.clone(), session_path(dir));
    config.request_timeout = Duration::from_secs(5);
    config
}

pub fn session_path(dir: &TempDir) -> PathBuf {
    dir.path().join("session.json")
}

pub fn login_response(role: Role) -> LoginResponse {
    let (token, email) = match role {
        Role::Admin => (ADMIN_TOKEN, "admin@hack.test"),
        Role::User => (USER_TOKEN, "sam@hack.test"),
    };
    LoginResponse {
        access_token: token.to_string(),
        user: User {
            id: "u1".to_string(),
            email: email.to_string(),
            nom: "Martin".to_string(),
            prenom: "Alex".to_string(),
            role,
        },
    }
}

/// Write a stored session the way a previous login would have
pub fn write_session(dir: &TempDir, role: Role) {
    write_session_entry(dir, login_response(role));
}

/// Stored session whose token the backend no longer accepts
pub fn write_session_with_token(dir: &TempDir, role: Role, token: &str) {
    let mut session = login_response(role);
    session.access_token = token.to_string();
    write_session_entry(dir, session);
}

fn write_session_entry(dir: &TempDir, session: LoginResponse) {
    let entry = serde_json::json!({ "user": session });
    std::fs::write(session_path(dir), serde_json::to_vec(&entry).unwrap()).unwrap();
}

/// Initialised services logged in as a participant
pub async fn participant_console(gateway: &MockGateway, dir: &TempDir) -> AdminServices {
    write_session(dir, Role::User);
    AdminServices::init(config_for(gateway, dir))
        .await
        .expect("services init")
}

/// Initialised services logged in as admin
pub async fn admin_console(gateway: &MockGateway, dir: &TempDir) -> AdminServices {
    write_session(dir, Role::Admin);
    AdminServices::init(config_for(gateway, dir))
        .await
        .expect("services init")
}

/// Initialised services without a session
pub async fn anonymous_console(gateway: &MockGateway, dir: &TempDir) -> AdminServices {
    AdminServices::init(config_for(gateway, dir))
        .await
        .expect("services init")
}

/// Poll `check` until it holds or the timeout elapses
pub async fn eventually<F, Fut>(timeout: Duration, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    check().await
}
