//! Report rendering: derived row views, priority sorting, and the text and
//! CSV renderers.
//!
//! Rendering works on [`RecordView`] values derived from incidents against
//! an explicit reference time, so the same views feed both output formats
//! and tests can pin "now".

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};
use std::io;

use chrono::{DateTime, Utc};

use crate::smelt::error::ReportError;
use crate::smelt::models::{Incident, Review};

pub mod csv;
pub mod text;

/// Placeholder rendered for absent values and empty lists.
///
/// Upstream null and upstream empty-list are deliberately not
/// distinguished; both collapse to this dash.
pub const PLACEHOLDER: &str = "-";

/// Reference display name emitted by a known upstream data defect;
/// entries carrying it are dropped from compact output.
const MALFORMED_REFERENCE_NAME: &str = "https:";

/// Column headers, in render order.
pub(crate) const HEADERS: [&str; 9] = [
    "ID",
    "RATING",
    "PRIORITY",
    "AGE",
    "DUE",
    "ASSIGNEES",
    "PACKAGES",
    "CHANNELS",
    "REFERENCES",
];

/// Direction of the optional priority sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Lowest priority value first.
    Ascending,
    /// Highest priority value first.
    Descending,
}

/// How reference entries are rendered.
#[derive(Debug, Clone, Copy)]
pub enum ReferenceStyle<'a> {
    /// Show each reference's display name.
    Compact,
    /// Show full URLs, annotated with resolved tracker titles.
    Verbose {
        /// Titles keyed by reference URL.
        titles: &'a HashMap<String, String>,
    },
}

/// Derived display row for one incident.
///
/// Multi-valued fields are sorted, deduplicated, and normalised so an
/// empty list becomes a single [`PLACEHOLDER`] entry; both renderers
/// therefore emit the same logical values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordView {
    /// Abbreviated incident identifier.
    pub id: String,
    /// Rating name or placeholder.
    pub rating: String,
    /// Scheduling priority, kept numeric for sorting.
    pub priority: i64,
    /// Whole days since the request was created, rendered `{days}d`.
    pub age: String,
    /// Whole days until the deadline, rendered `{days}d`, or placeholder.
    pub due: String,
    /// Assignee names drawn from unfinished reviews.
    pub assignees: Vec<String>,
    /// Package names.
    pub packages: Vec<String>,
    /// Product channel names.
    pub channels: Vec<String>,
    /// Reference display strings per the chosen [`ReferenceStyle`].
    pub references: Vec<String>,
}

impl RecordView {
    /// Derives the display row for `incident` relative to `now`.
    #[must_use]
    pub fn build(incident: &Incident, now: DateTime<Utc>, style: &ReferenceStyle<'_>) -> Self {
        let assignees: BTreeSet<String> = incident
            .reviews
            .iter()
            .filter_map(Review::assignee)
            .map(ToOwned::to_owned)
            .collect();

        let mut packages = incident.packages.clone();
        packages.sort();
        let mut channels = incident.channels.clone();
        channels.sort();

        Self {
            id: incident.request_label(),
            rating: incident
                .rating
                .as_deref()
                .unwrap_or(PLACEHOLDER)
                .to_owned(),
            priority: incident.priority,
            age: format_days((now - incident.created).num_days()),
            due: incident.deadline.map_or_else(
                || PLACEHOLDER.to_owned(),
                |deadline| format_days((deadline - now).num_days()),
            ),
            assignees: normalise(assignees.into_iter().collect()),
            packages: normalise(packages),
            channels: normalise(channels),
            references: normalise(render_references(incident, style)),
        }
    }

    /// Number of physical rows this record occupies in text output.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.assignees
            .len()
            .max(self.packages.len())
            .max(self.channels.len())
            .max(self.references.len())
    }
}

/// Derives display rows for every incident.
#[must_use]
pub fn build_views(
    incidents: &[Incident],
    now: DateTime<Utc>,
    style: &ReferenceStyle<'_>,
) -> Vec<RecordView> {
    incidents
        .iter()
        .map(|incident| RecordView::build(incident, now, style))
        .collect()
}

/// Stable-sorts views by priority in the given direction.
///
/// Views with equal priority keep their fetch order.
pub fn sort_by_priority(views: &mut [RecordView], order: SortOrder) {
    match order {
        SortOrder::Ascending => views.sort_by_key(|view| view.priority),
        SortOrder::Descending => views.sort_by_key(|view| Reverse(view.priority)),
    }
}

fn render_references(incident: &Incident, style: &ReferenceStyle<'_>) -> Vec<String> {
    match style {
        ReferenceStyle::Compact => {
            let names: BTreeSet<String> = incident
                .references
                .iter()
                .filter_map(|reference| match reference.name.as_deref() {
                    Some(MALFORMED_REFERENCE_NAME) => None,
                    Some(name) => Some(name.to_owned()),
                    None => Some(reference.url.clone()),
                })
                .collect();
            names.into_iter().collect()
        }
        ReferenceStyle::Verbose { titles } => {
            let urls: BTreeSet<&str> = incident
                .references
                .iter()
                .map(|reference| reference.url.as_str())
                .collect();
            urls.into_iter()
                .map(|url| {
                    titles
                        .get(url)
                        .map_or_else(|| url.to_owned(), |title| format!("{url}  {title}"))
                })
                .collect()
        }
    }
}

fn format_days(days: i64) -> String {
    format!("{days}d")
}

fn normalise(values: Vec<String>) -> Vec<String> {
    if values.is_empty() {
        vec![PLACEHOLDER.to_owned()]
    } else {
        values
    }
}

/// Converts an I/O error to a [`ReportError::Io`].
pub(crate) fn io_error(error: &io::Error) -> ReportError {
    ReportError::Io {
        message: error.to_string(),
    }
}
