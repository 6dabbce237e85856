use crate::middleware::correlation::CorrelationId;
use crate::routes::error::{invalid_input, map_aggregate_error};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use pronto_core::types::{ProviderAggregate, ProviderId, ProviderSummary};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/providers/{id}/summary", get(summary))
        .route("/providers/{id}/recompute", post(recompute))
        .with_state(state)
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SummaryQuery {
    /// Display name to fall back to when the provider document is missing.
    pub name: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/providers/{id}/summary",
    params(
        ("id" = String, Path, description = "Provider ID"),
        SummaryQuery
    ),
    responses((status = 200, body = ProviderSummary))
)]
pub(crate) async fn summary(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Path(id): Path<String>,
    Query(query): Query<SummaryQuery>,
) -> Response {
    let provider_id = match ProviderId::new(id) {
        Ok(value) => value,
        Err(err) => return invalid_input(err.to_string(), Some(correlation.0)).into_response(),
    };
    let summary = state
        .pronto
        .providers()
        .summary(&provider_id, query.name.as_deref())
        .await;
    Json(summary).into_response()
}

#[utoipa::path(
    post,
    path = "/api/providers/{id}/recompute",
    params(("id" = String, Path, description = "Provider ID")),
    responses(
        (status = 200, body = ProviderAggregate),
        (status = 404, description = "Provider document does not exist"),
        (status = 502, description = "Recomputation failed after retries")
    )
)]
pub(crate) async fn recompute(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Path(id): Path<String>,
) -> Response {
    let provider_id = match ProviderId::new(id) {
        Ok(value) => value,
        Err(err) => return invalid_input(err.to_string(), Some(correlation.0)).into_response(),
    };
    match state
        .pronto
        .providers()
        .recompute_with_retry(&provider_id)
        .await
    {
        Ok(aggregate) => Json(aggregate).into_response(),
        Err(err) => map_aggregate_error(&err, Some(correlation.0)).into_response(),
    }
}
