//! Repository listing proxy.
//!
//! GET /api/github
//!
//! Fetches the configured repository's top-level contents and returns them
//! as `{ "projects": [...] }`. Any upstream failure becomes a 500 with a
//! generic `{ "error": ... }` body and no partial results.
//!
//! Used by: projects page (file/folder grid with manual retry)

use axum::{extract::State, routing::get, Json, Router};

use crate::error::Result;
use crate::models::ProjectsResponse;
use crate::upstream::SharedListing;

pub fn routes(listing: SharedListing) -> Router {
    Router::new()
        .route("/api/github", get(list_projects))
        .with_state(listing)
}

async fn list_projects(State(listing): State<SharedListing>) -> Result<Json<ProjectsResponse>> {
    let projects = listing.fetch_projects().await.inspect_err(|e| {
        tracing::error!("Error fetching repository listing: {}", e);
    })?;
    Ok(Json(ProjectsResponse { projects }))
}
