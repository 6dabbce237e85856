pub mod error;
pub mod providers;
pub mod reviews;
pub mod session;

use crate::middleware::correlation::correlation_middleware;
use crate::{openapi, AppState};
use axum::middleware;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(reviews::router(state.clone()))
        .merge(providers::router(state.clone()))
        .merge(session::router(state))
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .route_layer(middleware::from_fn(correlation_middleware));

    Router::new().nest("/api", api)
}
