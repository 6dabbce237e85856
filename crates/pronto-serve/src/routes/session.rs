use crate::middleware::correlation::CorrelationId;
use crate::routes::error::{invalid_input, map_session_error};
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use pronto_core::store::IdentityCache;
use pronto_core::types::{CachedIdentity, Identity, Session, UserId};
use serde::Deserialize;
use utoipa::ToSchema;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/session/identity", get(current_identity))
        .route("/session", post(sign_in).delete(sign_out))
        .with_state(state)
}

/// Dev-only sign-in: installs a session on the in-memory auth collaborator
/// and seeds the local identity cache the way a real auth flow would.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignInBody {
    pub user_id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/session/identity",
    responses((status = 200, body = Identity))
)]
pub(crate) async fn current_identity(State(state): State<AppState>) -> Response {
    let identity = state.pronto.identity().resolve().await;
    Json(identity).into_response()
}

#[utoipa::path(
    post,
    path = "/api/session",
    request_body = SignInBody,
    responses(
        (status = 204, description = "Session installed"),
        (status = 400, description = "Blank user id")
    )
)]
pub(crate) async fn sign_in(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Json(body): Json<SignInBody>,
) -> Response {
    let user_id = match UserId::new(body.user_id) {
        Ok(value) => value,
        Err(err) => return invalid_input(err.to_string(), Some(correlation.0)).into_response(),
    };
    let cached = CachedIdentity {
        user_id: Some(user_id.as_str().to_string()),
        display_name: body.display_name.clone(),
        email: body.email.clone(),
    };
    state.sessions.sign_in(Session {
        user_id,
        display_name: body.display_name,
        email: body.email,
    });
    if let Err(err) = state.pronto.cache().save(&cached) {
        tracing::warn!(error = %err, "failed to persist cached identity on sign-in");
    }
    StatusCode::NO_CONTENT.into_response()
}

#[utoipa::path(
    delete,
    path = "/api/session",
    responses((status = 204, description = "Session ended and cache cleared"))
)]
pub(crate) async fn sign_out(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
) -> Response {
    match state.pronto.identity().sign_out().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => map_session_error(&err, Some(correlation.0)).into_response(),
    }
}
