use axum::Router;

pub mod commandes;
pub mod common;
pub mod system;

/// Router for all resource endpoints.
pub fn router() -> Router {
    Router::new().nest("/api/commandes", commandes::router())
}
