//! Smelta library crate: SMELT maintenance-review reporting.
//!
//! The library fetches paginated incident records from the SMELT overview
//! API, filters them by assigned reviewer, and renders an aligned text
//! table, CSV, or a JSON passthrough of the raw records. Verbose reports
//! additionally resolve tracker titles for reference URLs.

pub mod cli;
pub mod report;
pub mod smelt;
pub mod titles;

pub use cli::Options;
pub use report::{RecordView, ReferenceStyle, SortOrder};
pub use smelt::{Incident, Reference, ReportError, Review, ReviewerFilter, SmeltClient};
