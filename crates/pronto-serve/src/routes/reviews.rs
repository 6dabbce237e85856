use crate::middleware::correlation::CorrelationId;
use crate::routes::error::{invalid_input, map_store_error, map_submission_error};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use pronto_core::types::{ProviderId, ReviewRecord, ReviewStats, SubmitReviewInput};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/providers/{id}/reviews",
            post(submit_review).get(list_reviews),
        )
        .route("/providers/{id}/stats", get(review_stats))
        .with_state(state)
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitReviewBody {
    /// Star rating as sent by the client; validated into the 1-5 range.
    pub rating: i32,
    pub comment: Option<String>,
    pub service_id: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ReviewListQuery {
    pub limit: Option<usize>,
}

#[utoipa::path(
    post,
    path = "/api/providers/{id}/reviews",
    request_body = SubmitReviewBody,
    params(("id" = String, Path, description = "Provider ID")),
    responses(
        (status = 201, body = ReviewRecord),
        (status = 400, description = "Invalid rating or missing provider"),
        (status = 401, description = "No resolvable reviewer identity")
    )
)]
pub(crate) async fn submit_review(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Path(id): Path<String>,
    Json(body): Json<SubmitReviewBody>,
) -> Response {
    let reviewer = state.pronto.identity().resolve().await;
    let input = SubmitReviewInput {
        provider_id: id,
        rating: body.rating,
        comment: body.comment,
        service_id: body.service_id,
    };
    match state.pronto.reviews().submit(input, &reviewer).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(err) => map_submission_error(&err, Some(correlation.0)).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/providers/{id}/reviews",
    params(
        ("id" = String, Path, description = "Provider ID"),
        ReviewListQuery
    ),
    responses((status = 200, body = Vec<ReviewRecord>))
)]
pub(crate) async fn list_reviews(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Path(id): Path<String>,
    Query(query): Query<ReviewListQuery>,
) -> Response {
    let provider_id = match ProviderId::new(id) {
        Ok(value) => value,
        Err(err) => return invalid_input(err.to_string(), Some(correlation.0)).into_response(),
    };
    let limit = query
        .limit
        .unwrap_or(state.pronto.config().fetch_limit);
    match state.pronto.reviews().list(&provider_id, limit).await {
        Ok(reviews) => Json(reviews).into_response(),
        Err(err) => map_store_error(&err, Some(correlation.0)).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/providers/{id}/stats",
    params(("id" = String, Path, description = "Provider ID")),
    responses((status = 200, body = ReviewStats))
)]
pub(crate) async fn review_stats(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Path(id): Path<String>,
) -> Response {
    let provider_id = match ProviderId::new(id) {
        Ok(value) => value,
        Err(err) => return invalid_input(err.to_string(), Some(correlation.0)).into_response(),
    };
    match state.pronto.reviews().stats(&provider_id).await {
        Ok(stats) => Json(stats).into_response(),
        Err(err) => map_store_error(&err, Some(correlation.0)).into_response(),
    }
}
