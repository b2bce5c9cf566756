//! Data transfer objects (DTOs) for upstream payloads and API responses.
//!
//! - `listing`: RemoteEntry, ProjectItem, ProjectsResponse
//! - `stats`: StatsPayload, StatsView for the footer widget

pub mod listing;
pub mod stats;

pub use listing::*;
pub use stats::*;
