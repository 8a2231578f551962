//! REST API handlers for widget-state persistence
//!
//! The widget's best-effort state writes land here: the host forwards the
//! blob and the server keys it by session cookie.

use super::{helpers::*, models::*, state::SharedState};
use axum::http::HeaderMap;
use axum::{extract::State, response::IntoResponse, routing::post, Json, Router};
use tracing::info;

/// Creates routes for widget-state operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/sync_state", post(sync_state))
        .route("/clear_state", post(clear_state))
}

/// Endpoint: POST /sync_state
/// Stores the widget-state blob exactly as the widget sent it.
async fn sync_state(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<SyncStateInput>,
) -> impl IntoResponse {
    let (cookie_session, is_new_session) = resolve_session_id(&headers);
    let session_id = get_or_default_session_id(payload.session_id, &cookie_session);

    state.widget_states.insert(session_id.clone(), payload.state);

    let mut response = Json(StateSyncResponse {
        status: "updated".to_string(),
        session_id,
    })
    .into_response();

    if is_new_session {
        let cookie_val = format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, cookie_session);
        response
            .headers_mut()
            .insert(axum::http::header::SET_COOKIE, cookie_val.parse().unwrap());
    }

    response
}

/// Endpoint: POST /clear_state
/// Drops the stored widget state for the session.
async fn clear_state(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<ClearStateInput>,
) -> impl IntoResponse {
    let (cookie_session, is_new_session) = resolve_session_id(&headers);
    let session_id = get_or_default_session_id(payload.session_id, &cookie_session);

    if state.widget_states.remove(&session_id).is_some() {
        info!(session = %session_id, "cleared widget state");
    }

    let mut response = Json(StateSyncResponse {
        status: "cleared".to_string(),
        session_id,
    })
    .into_response();

    if is_new_session {
        let cookie_val = format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, cookie_session);
        response
            .headers_mut()
            .insert(axum::http::header::SET_COOKIE, cookie_val.parse().unwrap());
    }

    response
}
