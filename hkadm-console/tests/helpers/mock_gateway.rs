//! In-process mock of the hackathon backend
//!
//! Serves the subset of the REST API the console talks to, records every
//! request, and supports one-shot failure injection and response delays.

use axum::body::{Body, Bytes};
use axum::extract::{Multipart, Path, Query, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const USER_TOKEN: &str = "user-token";
pub const PASSWORD: &str = "secret";

/// One request as the mock saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorized: bool,
    pub body: Option<Value>,
}

/// Backend data and behaviour switches
#[derive(Debug, Default)]
pub struct MockBackend {
    pub hackathon: Option<Value>,
    /// Results resources by hackathon id
    pub results: HashMap<String, Value>,
    pub teams: Vec<Value>,
    pub inscriptions: Vec<Value>,
    pub annonces: Vec<Value>,
    pub users: Vec<Value>,
    /// Hackathons reachable by id, besides the public one
    pub hackathons: Vec<Value>,
    pub registrations: Vec<Value>,
    pub monitoring_logs: Vec<Value>,
    pub document: Option<(String, Vec<u8>)>,
    /// Answer mutations with the full results resource instead of a message
    pub echo_results: bool,
    /// Next request fails with this status and body
    pub fail_next: Option<(u16, Value)>,
    /// Delay applied before every response
    pub delay: Option<Duration>,
    /// Delay applied only to requests whose path starts with the prefix
    pub slow_path: Option<(String, Duration)>,
    pub requests: Vec<RecordedRequest>,
}

impl MockBackend {
    pub fn with_hackathon(id: &str) -> Self {
        Self {
            hackathon: Some(hackathon_json(id, "Hack Days")),
            ..Self::default()
        }
    }

    fn entry(&mut self, id: &str) -> &mut Map<String, Value> {
        let value = self.results.entry(id.to_string()).or_insert_with(|| {
            json!({
                "hackathonId": id,
                "podiumPublie": false,
                "preselectionsPubliees": false,
                "preselectionnes": []
            })
        });
        match value {
            Value::Object(map) => map,
            _ => unreachable!("results entries are objects"),
        }
    }

    fn current_id(&self) -> Option<String> {
        self.hackathon
            .as_ref()
            .and_then(|h| h["id"].as_str())
            .map(str::to_string)
    }

    fn ack(&mut self, id: &str, message: &str) -> Value {
        if self.echo_results {
            Value::Object(self.entry(id).clone())
        } else {
            json!({ "message": message })
        }
    }
}

pub type Shared = Arc<Mutex<MockBackend>>;

/// Running mock server; stops when dropped
pub struct MockGateway {
    pub base_url: String,
    backend: Shared,
    handle: JoinHandle<()>,
}

impl MockGateway {
    pub async fn start(backend: MockBackend) -> Self {
        let backend: Shared = Arc::new(Mutex::new(backend));
        let app = router(Arc::clone(&backend));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock gateway");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock gateway");
        });

        Self {
            base_url: format!("http://{}", addr),
            backend,
            handle,
        }
    }

    /// Run `f` against the backend state
    pub fn with<R>(&self, f: impl FnOnce(&mut MockBackend) -> R) -> R {
        f(&mut self.backend.lock().unwrap())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.with(|b| b.requests.clone())
    }

    pub fn request_count(&self) -> usize {
        self.with(|b| b.requests.len())
    }

    pub fn clear_requests(&self) {
        self.with(|b| b.requests.clear());
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.with(|b| b.requests.last().cloned())
    }

    pub fn fail_next(&self, status: u16, body: Value) {
        self.with(|b| b.fail_next = Some((status, body)));
    }
}

impl Drop for MockGateway {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn hackathon_json(id: &str, nom: &str) -> Value {
    json!({
        "id": id,
        "nom": nom,
        "description": "48h de code",
        "dateDebut": "2026-03-01T09:00:00Z",
        "dateFin": "2026-03-03T18:00:00Z",
        "dateLimiteInscription": "2026-02-20T23:59:59Z",
        "status": "UPCOMING",
        "nombreInscriptions": 40,
        "objectifInscriptions": 80
    })
}

pub fn team_json(id: &str, hackathon_id: &str, nom: &str, projet: &str) -> Value {
    json!({
        "id": id,
        "nom": nom,
        "description": format!("{} pitch", projet),
        "projetNom": projet,
        "hackathonId": hackathon_id,
        "members": [{
            "userId": format!("{}-u1", id),
            "role": "LEADER",
            "user": {
                "id": format!("{}-u1", id),
                "email": format!("lead-{}@hack.test", id),
                "nom": "Lead",
                "prenom": nom
            }
        }]
    })
}

pub fn inscription_json(id: &str, hackathon_id: &str, email: &str, statut: &str) -> Value {
    json!({
        "id": id,
        "userId": format!("user-{}", id),
        "hackathonId": hackathon_id,
        "promo": "L3",
        "technologies": ["rust"],
        "statut": statut,
        "createdAt": "2026-01-15T10:00:00Z",
        "user": { "id": format!("user-{}", id), "email": email, "nom": "Doe", "prenom": "Sam" }
    })
}

fn router(backend: Shared) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/profile", get(profile))
        .route("/hackathons", post(create_hackathon))
        .route("/hackathons/public", get(public_hackathon))
        .route("/hackathons/available", get(available_hackathons))
        .route("/hackathons/:id", get(hackathon_by_id).delete(delete_hackathon))
        .route("/resultats/public", get(public_results))
        .route("/resultats/hackathon/:id", get(results_by_id))
        .route(
            "/resultats/hackathon/:id/podium",
            post(publish_podium).delete(unpublish_podium),
        )
        .route(
            "/resultats/hackathon/:id/preselections",
            post(publish_preselections).delete(unpublish_preselections),
        )
        .route(
            "/resultats/hackathon/:id/preselections/document",
            post(upload_document)
                .get(download_document)
                .delete(delete_document),
        )
        .route("/resultats/hackathon/:id/inscriptions/liste-pdf", get(inscriptions_pdf))
        .route("/teams/public", get(public_teams))
        .route("/teams/hackathon/:id", get(teams_by_hackathon).post(create_team))
        .route("/teams/:id", delete(delete_team))
        .route("/admin/inscriptions", get(all_inscriptions))
        .route("/admin/inscriptions/:id", put(update_inscription))
        .route("/inscriptions/mes-inscriptions", get(my_inscriptions))
        .route(
            "/inscriptions/:id",
            get(own_inscription).delete(withdraw_inscription),
        )
        .route("/admin/users", get(all_users))
        .route("/admin/users/:id", put(update_user).delete(delete_user))
        .route("/admin/monitoring/metrics", get(metrics))
        .route("/admin/monitoring/logs", get(monitoring_logs))
        .route("/annonces/public", get(public_annonces))
        .layer(middleware::from_fn_with_state(Arc::clone(&backend), record))
        .with_state(backend)
}

/// Record the request, then apply injected delay or failure
async fn record(State(backend): State<Shared>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    let (delay, failure) = {
        let mut b = backend.lock().unwrap();
        b.requests.push(RecordedRequest {
            method: parts.method.to_string(),
            path: parts.uri.path().to_string(),
            authorized: parts.headers.contains_key(header::AUTHORIZATION),
            body: serde_json::from_slice(&bytes).ok(),
        });
        let slow = b
            .slow_path
            .as_ref()
            .filter(|(prefix, _)| parts.uri.path().starts_with(prefix.as_str()))
            .map(|(_, delay)| *delay);
        (slow.or(b.delay), b.fail_next.take())
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    if let Some((status, body)) = failure {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, Json(body)).into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "statusCode": 403, "message": "Forbidden resource", "error": "Forbidden" })),
    )
        .into_response()
}

fn not_found(message: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "statusCode": 404, "message": message, "error": "Not Found" })),
    )
        .into_response()
}

macro_rules! admin_only {
    ($headers:expr) => {
        if bearer(&$headers) != Some(ADMIN_TOKEN) {
            return forbidden();
        }
    };
}

fn user_json(email: &str) -> Value {
    let admin = email.starts_with("admin");
    json!({
        "id": if admin { "u-admin" } else { "u-user" },
        "email": email,
        "nom": "Martin",
        "prenom": if admin { "Alex" } else { "Sam" },
        "role": if admin { "ADMIN" } else { "USER" }
    })
}

async fn login(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    if body["password"].as_str() != Some(PASSWORD) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "statusCode": 401, "message": "Identifiants invalides" })),
        )
            .into_response();
    }
    let token = if email.starts_with("admin") { ADMIN_TOKEN } else { USER_TOKEN };
    Json(json!({ "access_token": token, "user": user_json(email) })).into_response()
}

/// Account plus inscription; duplicate e-mails are rejected
async fn register(State(backend): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut b = backend.lock().unwrap();
    if b.registrations.iter().any(|r| r["email"] == body["email"]) {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "statusCode": 409, "message": "Cet e-mail est déjà utilisé" })),
        )
            .into_response();
    }
    b.registrations.push(body.clone());
    (StatusCode::CREATED, Json(json!({ "message": "Inscription réussie" }))).into_response()
}

async fn profile(headers: HeaderMap) -> Response {
    match bearer(&headers) {
        Some(ADMIN_TOKEN) => Json(user_json("admin@hack.test")).into_response(),
        Some(USER_TOKEN) => Json(user_json("sam@hack.test")).into_response(),
        _ => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
    }
}

async fn public_hackathon(State(backend): State<Shared>) -> Response {
    match backend.lock().unwrap().hackathon.clone() {
        Some(h) => Json(h).into_response(),
        None => not_found("Aucun hackathon"),
    }
}

async fn hackathon_by_id(State(backend): State<Shared>, Path(id): Path<String>) -> Response {
    let b = backend.lock().unwrap();
    let known = b
        .hackathons
        .iter()
        .chain(b.hackathon.iter())
        .find(|h| h["id"] == id)
        .cloned();
    Json(known.unwrap_or_else(|| hackathon_json(&id, "Selected"))).into_response()
}

async fn available_hackathons(State(backend): State<Shared>) -> Response {
    let b = backend.lock().unwrap();
    let open: Vec<Value> = b
        .hackathon
        .iter()
        .chain(b.hackathons.iter())
        .filter(|h| h["status"] != "PAST")
        .cloned()
        .collect();
    Json(open).into_response()
}

async fn create_hackathon(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    admin_only!(headers);
    let mut b = backend.lock().unwrap();
    let id = format!("H{}", b.hackathons.len() + 100);
    let mut created = body.clone();
    created["id"] = json!(id);
    if created.get("status").is_none() {
        created["status"] = json!("UPCOMING");
    }
    b.hackathons.push(created.clone());
    if b.hackathon.is_none() {
        b.hackathon = Some(created.clone());
    }
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn delete_hackathon(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    admin_only!(headers);
    let mut b = backend.lock().unwrap();
    b.hackathons.retain(|h| h["id"] != id);
    if b.current_id().as_deref() == Some(id.as_str()) {
        b.hackathon = None;
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn public_results(State(backend): State<Shared>) -> Response {
    let b = backend.lock().unwrap();
    match b.current_id().and_then(|id| b.results.get(&id).cloned()) {
        Some(results) => Json(results).into_response(),
        None => not_found("Aucun résultat"),
    }
}

async fn results_by_id(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    admin_only!(headers);
    match backend.lock().unwrap().results.get(&id).cloned() {
        Some(results) => Json(results).into_response(),
        None => not_found("Aucun résultat"),
    }
}

async fn publish_podium(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    admin_only!(headers);
    let mut b = backend.lock().unwrap();
    let entry = b.entry(&id);
    for key in ["premierPlace", "deuxiemePlace", "troisiemePlace"] {
        entry.insert(key.to_string(), body.get(key).cloned().unwrap_or(Value::Null));
    }
    entry.insert("podiumPublie".to_string(), json!(true));
    Json(b.ack(&id, "Podium publié")).into_response()
}

async fn unpublish_podium(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    admin_only!(headers);
    let mut b = backend.lock().unwrap();
    b.entry(&id).insert("podiumPublie".to_string(), json!(false));
    Json(b.ack(&id, "Podium masqué")).into_response()
}

async fn publish_preselections(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    admin_only!(headers);
    let mut b = backend.lock().unwrap();
    let entry = b.entry(&id);
    entry.insert(
        "preselectionnes".to_string(),
        body.get("preselectionnes").cloned().unwrap_or(json!([])),
    );
    entry.insert("preselectionsPubliees".to_string(), json!(true));
    Json(b.ack(&id, "Présélections publiées")).into_response()
}

async fn unpublish_preselections(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    admin_only!(headers);
    let mut b = backend.lock().unwrap();
    b.entry(&id).insert("preselectionsPubliees".to_string(), json!(false));
    Json(b.ack(&id, "Présélections masquées")).into_response()
}

/// Extract registered e-mails found in the uploaded file's text
async fn upload_document(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Response {
    admin_only!(headers);
    let mut upload: Option<(String, Bytes)> = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or("document.pdf").to_string();
            if let Ok(bytes) = field.bytes().await {
                upload = Some((name, bytes));
            }
        }
    }
    let Some((name, bytes)) = upload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Aucun fichier" })),
        )
            .into_response();
    };

    let text = String::from_utf8_lossy(&bytes).to_string();
    let mut b = backend.lock().unwrap();
    let matched: Vec<String> = b
        .inscriptions
        .iter()
        .filter(|i| i["hackathonId"] == id)
        .filter_map(|i| i["user"]["email"].as_str())
        .filter(|email| text.contains(email))
        .map(str::to_string)
        .collect();

    let entry = b.entry(&id);
    entry.insert("hasPreselectionsDocument".to_string(), json!(true));
    entry.insert("documentPreselectionsName".to_string(), json!(name.clone()));
    b.document = Some((name, bytes.to_vec()));

    Json(json!({ "matchedCount": matched.len(), "preselectionnes": matched })).into_response()
}

async fn download_document(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    admin_only!(headers);
    match backend.lock().unwrap().document.clone() {
        Some((_, bytes)) => ([(header::CONTENT_TYPE, "application/pdf")], bytes).into_response(),
        None => not_found("Aucun document"),
    }
}

async fn delete_document(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    admin_only!(headers);
    let mut b = backend.lock().unwrap();
    b.document = None;
    let entry = b.entry(&id);
    entry.insert("hasPreselectionsDocument".to_string(), json!(false));
    entry.remove("documentPreselectionsName");
    StatusCode::NO_CONTENT.into_response()
}

async fn inscriptions_pdf(headers: HeaderMap) -> Response {
    admin_only!(headers);
    (
        [(header::CONTENT_TYPE, "application/pdf")],
        b"%PDF-1.4 inscriptions".to_vec(),
    )
        .into_response()
}

async fn public_teams(State(backend): State<Shared>) -> Response {
    Json(Value::Array(backend.lock().unwrap().teams.clone())).into_response()
}

async fn teams_by_hackathon(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    admin_only!(headers);
    let teams: Vec<Value> = backend
        .lock()
        .unwrap()
        .teams
        .iter()
        .filter(|t| t["hackathonId"] == id)
        .cloned()
        .collect();
    Json(teams).into_response()
}

async fn create_team(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    admin_only!(headers);
    let mut b = backend.lock().unwrap();
    let team_id = format!("t{}", b.teams.len() + 1);
    let mut team = json!({
        "id": team_id,
        "nom": body["nom"],
        "hackathonId": id,
        "members": []
    });
    if let Some(projet) = body.get("projetNom") {
        team["projetNom"] = projet.clone();
    }
    b.teams.push(team.clone());
    (StatusCode::CREATED, Json(team)).into_response()
}

async fn delete_team(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    admin_only!(headers);
    backend.lock().unwrap().teams.retain(|t| t["id"] != id);
    StatusCode::NO_CONTENT.into_response()
}

async fn all_inscriptions(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    admin_only!(headers);
    Json(Value::Array(backend.lock().unwrap().inscriptions.clone())).into_response()
}

async fn update_inscription(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    admin_only!(headers);
    let mut b = backend.lock().unwrap();
    let Some(inscription) = b.inscriptions.iter_mut().find(|i| i["id"] == id) else {
        return not_found("Inscription introuvable");
    };
    if let Some(statut) = body.get("statut") {
        inscription["statut"] = statut.clone();
    }
    Json(inscription.clone()).into_response()
}

async fn public_annonces(State(backend): State<Shared>) -> Response {
    Json(Value::Array(backend.lock().unwrap().annonces.clone())).into_response()
}

/// User id behind the bearer token, as in `user_json`
fn caller_id(headers: &HeaderMap) -> Option<&'static str> {
    match bearer(headers) {
        Some(ADMIN_TOKEN) => Some("u-admin"),
        Some(USER_TOKEN) => Some("u-user"),
        _ => None,
    }
}

/// Admins see every inscription, participants only their own
fn owned_by_caller(headers: &HeaderMap, inscription: &Value) -> bool {
    match caller_id(headers) {
        Some("u-admin") => true,
        Some(id) => inscription["userId"] == id,
        None => false,
    }
}

async fn my_inscriptions(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    let Some(caller) = caller_id(&headers) else {
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    };
    let mine: Vec<Value> = backend
        .lock()
        .unwrap()
        .inscriptions
        .iter()
        .filter(|i| i["userId"] == caller)
        .cloned()
        .collect();
    Json(mine).into_response()
}

async fn own_inscription(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let b = backend.lock().unwrap();
    match b.inscriptions.iter().find(|i| i["id"] == id) {
        Some(i) if owned_by_caller(&headers, i) => Json(i.clone()).into_response(),
        Some(_) => forbidden(),
        None => not_found("Inscription introuvable"),
    }
}

async fn withdraw_inscription(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut b = backend.lock().unwrap();
    match b.inscriptions.iter().find(|i| i["id"] == id) {
        Some(i) if owned_by_caller(&headers, i) => {
            b.inscriptions.retain(|i| i["id"] != id);
            StatusCode::NO_CONTENT.into_response()
        }
        Some(_) => forbidden(),
        None => not_found("Inscription introuvable"),
    }
}

async fn all_users(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    admin_only!(headers);
    Json(Value::Array(backend.lock().unwrap().users.clone())).into_response()
}

async fn update_user(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    admin_only!(headers);
    let mut b = backend.lock().unwrap();
    let Some(user) = b.users.iter_mut().find(|u| u["id"] == id) else {
        return not_found("Utilisateur introuvable");
    };
    if let (Value::Object(target), Value::Object(patch)) = (user, body) {
        for (key, value) in patch {
            target.insert(key, value);
        }
    }
    let updated = b.users.iter().find(|u| u["id"] == id).cloned();
    Json(updated.unwrap_or(Value::Null)).into_response()
}

async fn delete_user(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    admin_only!(headers);
    backend.lock().unwrap().users.retain(|u| u["id"] != id);
    StatusCode::NO_CONTENT.into_response()
}

async fn metrics(headers: HeaderMap) -> Response {
    admin_only!(headers);
    Json(json!({
        "uptime": 3600,
        "memory": { "used": "512MB", "total": "2GB" },
        "database": "connected"
    }))
    .into_response()
}

/// Paginated as `{data, meta}`, filtered by the `type` query parameter
async fn monitoring_logs(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    admin_only!(headers);
    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(50);
    let b = backend.lock().unwrap();
    let matching: Vec<Value> = b
        .monitoring_logs
        .iter()
        .filter(|log| params.get("type").map_or(true, |t| log["type"] == t.as_str()))
        .cloned()
        .collect();
    let total = matching.len();
    let data: Vec<Value> = matching
        .into_iter()
        .skip((page.max(1) - 1) * limit)
        .take(limit)
        .collect();
    Json(json!({ "data": data, "meta": { "page": page, "limit": limit, "total": total } }))
        .into_response()
}
