pub mod middleware;
pub mod openapi;
pub mod routes;

use axum::Router;
use pronto_core::Pronto;
use pronto_store::{MemSessions, MemStore, ProfileCache};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Concrete workflow type served by the dev server: an in-memory document
/// store and auth collaborator with a sqlite-backed identity cache.
pub type DevPronto = Pronto<MemStore, MemSessions, ProfileCache>;

#[derive(Clone)]
pub struct AppState {
    pub pronto: Arc<DevPronto>,
    pub sessions: MemSessions,
}

impl AppState {
    pub fn new(pronto: DevPronto, sessions: MemSessions) -> Self {
        Self {
            pronto: Arc::new(pronto),
            sessions,
        }
    }
}

pub fn app(state: AppState) -> Router {
    routes::router(state)
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await
}
