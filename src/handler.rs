use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use rand::RngCore;
use tracing::info;

use crate::api::{SaveRequest, SaveResponse};
use crate::assets::serve_embedded;
use crate::db::Database;
use crate::error::SaveError;
use crate::identity;
use crate::render;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthcheck))
        .route("/api/save", post(save_paste))
        .route("/paste/:id", get(view_paste))
        .route("/raw/:id", get(raw_paste))
        .route("/history", get(history))
        .fallback(serve_embedded)
        .with_state(state)
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(serde_json::json!({ "status": "ok" }))
}

/// Paste ids are 4 random bytes, hex-encoded. Not content-addressed; a
/// collision surfaces as a primary-key conflict on insert.
fn generate_paste_id() -> String {
    let mut bytes = [0u8; 4];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub async fn save_paste(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Json(payload): Json<SaveRequest>,
) -> Result<Response, SaveError> {
    let content = payload.content.unwrap_or_default();
    if content.trim().is_empty() {
        return Err(SaveError::EmptyContent);
    }

    let client_addr = identity::client_address(&headers, peer.map(|ConnectInfo(addr)| addr));
    let identity = identity::resolve(&headers, &client_addr);

    let id = generate_paste_id();
    state.db.insert_paste(&id, &content, &client_addr).await?;

    info!("saved paste {} for {}", id, client_addr);
    let mut response = Json(SaveResponse::new(&id, &identity.user_id)).into_response();
    if let Some(cookie) = identity.set_cookie {
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    Ok(response)
}

pub async fn view_paste(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.db.get_paste(&id).await {
        Ok(Some(paste)) => Html(render::paste_page(&paste.id, &paste.content)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, Html(render::NOT_FOUND_PAGE)).into_response(),
        Err(e) => {
            tracing::error!("failed to get paste {}. db_error: {}", id, e);
            (StatusCode::NOT_FOUND, Html(render::NOT_FOUND_PAGE)).into_response()
        }
    }
}

pub async fn raw_paste(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.db.get_paste(&id).await {
        Ok(Some(paste)) => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            paste.content,
        )
            .into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Paste not found").into_response(),
        Err(e) => {
            tracing::error!("failed to get paste {}. db_error: {}", id, e);
            (StatusCode::NOT_FOUND, "Paste not found").into_response()
        }
    }
}

pub async fn history(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> Response {
    let client_addr = identity::client_address(&headers, peer.map(|ConnectInfo(addr)| addr));

    match state.db.pastes_by_address(&client_addr).await {
        Ok(entries) if entries.is_empty() => Html(render::history_empty_page()).into_response(),
        Ok(entries) => Html(render::history_page(&entries)).into_response(),
        Err(e) => {
            tracing::error!("failed to list pastes for {}. db_error: {}", client_addr, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving history").into_response()
        }
    }
}
