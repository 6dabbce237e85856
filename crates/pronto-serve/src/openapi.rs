use utoipa::OpenApi;

use crate::routes::providers::SummaryQuery;
use crate::routes::reviews::{ReviewListQuery, SubmitReviewBody};
use crate::routes::session::SignInBody;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use pronto_core::types::{
    CachedIdentity, Identity, NewReview, Profile, Provider, ProviderAggregate, ProviderId,
    ProviderSummary, Rating, ReviewId, ReviewRecord, ReviewStats, ServiceId, Session, StarCount,
    UserId,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::reviews::submit_review,
        crate::routes::reviews::list_reviews,
        crate::routes::reviews::review_stats,
        crate::routes::providers::summary,
        crate::routes::providers::recompute,
        crate::routes::session::current_identity,
        crate::routes::session::sign_in,
        crate::routes::session::sign_out
    ),
    components(schemas(
        ReviewRecord,
        NewReview,
        ReviewStats,
        StarCount,
        SubmitReviewBody,
        ReviewListQuery,
        Provider,
        ProviderAggregate,
        ProviderSummary,
        SummaryQuery,
        Identity,
        Session,
        Profile,
        CachedIdentity,
        SignInBody,
        Rating,
        ProviderId,
        UserId,
        ServiceId,
        ReviewId
    ))
)]
struct ApiDoc;

pub fn generate_spec() -> String {
    ApiDoc::openapi()
        .to_json()
        .unwrap_or_else(|_| "{}".to_string())
}

pub fn router() -> Router {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
