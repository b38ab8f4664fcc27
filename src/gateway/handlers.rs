//! Endpoint handlers.
//!
//! Each handler builds one console command, runs it through the shared
//! [`AppState`], and shapes the reply. Handlers hold no state of their own.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use serde_json::json;
use tracing::{debug, warn};

use crate::gateway::error::GatewayError;
use crate::gateway::models::{CommandRequest, PlayerInfo, PlayersInfo, SaveForm, UptimeResponse};
use crate::gateway::{pages, scrape, AppState};
use crate::utils::MetricsSnapshot;

/// `GET /` — the admin page for allowlisted clients, the read-only page
/// for everyone else. With an empty allowlist every client gets the admin
/// page (fail-open, see [`crate::allowlist`]).
pub async fn index(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Html<&'static str> {
    if state.allowlist.is_allowed(Some(addr.ip())) {
        Html(pages::ADMIN_HTML)
    } else {
        Html(pages::VIEWER_HTML)
    }
}

/// `GET /static/{filename}` — embedded assets.
///
/// Traversal-shaped names are rejected outright, and `.htm`/`.html` names
/// are refused so the admin page cannot be fetched around the IP check on
/// `GET /`.
pub async fn static_file(Path(filename): Path<String>) -> Response {
    let lowered = filename.to_lowercase();
    if lowered.starts_with("..")
        || filename.contains('/')
        || filename.contains('\\')
        || lowered.contains(".htm")
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Invalid filename." })),
        )
            .into_response();
    }

    match pages::asset(&filename) {
        Some((media_type, body)) => {
            ([(header::CONTENT_TYPE, media_type)], body).into_response()
        }
        None => {
            warn!(%filename, "static asset not found");
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": format!("File {filename} not found.") })),
            )
                .into_response()
        }
    }
}

/// `GET /players` — roster with the server-reported count.
pub async fn players(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PlayersInfo>, GatewayError> {
    let reply = state.run_command("/players").await?;
    Ok(Json(scrape::players(&reply)?))
}

/// `GET /admins` — admin roster.
pub async fn admins(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PlayerInfo>>, GatewayError> {
    let reply = state.run_command("/admins").await?;
    Ok(Json(scrape::admins(&reply)))
}

/// `GET /seed` — the map seed as an integer.
pub async fn seed(State(state): State<Arc<AppState>>) -> Result<Json<u64>, GatewayError> {
    let reply = state.run_command("/seed").await?;
    Ok(Json(scrape::seed(&reply)?))
}

/// `GET /uptime` — server uptime scraped from `/time`.
pub async fn uptime(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UptimeResponse>, GatewayError> {
    let reply = state.run_command("/time").await?;
    Ok(Json(scrape::uptime(&reply)))
}

/// `GET /status` — gateway-side command metrics.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

/// `POST /save` — save the map, optionally under a given name. Returns
/// the filename the server reports.
pub async fn save(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SaveForm>,
) -> Result<Json<String>, GatewayError> {
    let command = match form.filename.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => format!("/save {name}"),
        _ => "/save".to_string(),
    };
    let reply = state.run_command(&command).await?;
    let filename = scrape::save_result(&reply)?;
    debug!(%filename, "map saved");
    Ok(Json(filename))
}

/// `POST /shutdown` — stop the server, echoing its farewell.
pub async fn shutdown(State(state): State<Arc<AppState>>) -> Result<Json<String>, GatewayError> {
    let reply = state.run_command("/quit").await?;
    Ok(Json(reply.trim().to_string()))
}

/// `POST /command` — run an arbitrary console command and return the raw
/// reply text.
pub async fn command(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CommandRequest>,
) -> Result<Json<String>, GatewayError> {
    let reply = state.run_command(&request.command).await?;
    Ok(Json(reply))
}
