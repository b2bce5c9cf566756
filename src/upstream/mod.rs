pub mod client;
pub mod listing;
pub mod stats;

pub use client::{TransportConfig, UpstreamClient};
pub use listing::{ListingSource, SharedListing};
pub use stats::{PollOutcome, SharedStats, StatsPoller};
