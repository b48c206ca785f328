//! SMELT maintenance-review domain: record models, paginated retrieval,
//! and reviewer-based filtering.

pub mod client;
pub mod error;
pub mod filter;
pub mod models;

pub use client::SmeltClient;
pub use error::ReportError;
pub use filter::ReviewerFilter;
pub use models::{Incident, Reference, Review};
