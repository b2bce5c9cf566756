//! API route handlers.
//!
//! Each submodule defines routes for a feature area:
//! - `projects`: Repository listing proxy (GET /api/github)
//! - `stats`: Usage statistics view and manual refresh
//! - `health`: Liveness probe

pub mod health;
pub mod projects;
pub mod stats;

use axum::Router;

use crate::upstream::{SharedListing, SharedStats};

pub fn create_router(listing: SharedListing, stats: SharedStats) -> Router {
    Router::new()
        .merge(projects::routes(listing))
        .merge(stats::routes(stats))
        .merge(health::routes())
}
