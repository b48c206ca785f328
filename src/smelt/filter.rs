//! Reviewer-based record selection.
//!
//! A record is selected when at least one of its unfinished reviews is
//! assigned to a user or group named in the filter sets. Filtering never
//! reorders or mutates records, and show-all mode is the identity.

use std::collections::BTreeSet;

use super::models::Incident;

/// Filter over review assignees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewerFilter {
    users: BTreeSet<String>,
    groups: BTreeSet<String>,
    all: bool,
}

impl ReviewerFilter {
    /// Creates a filter matching the given user and group names.
    #[must_use]
    pub fn new<U, G>(users: U, groups: G) -> Self
    where
        U: IntoIterator<Item = String>,
        G: IntoIterator<Item = String>,
    {
        Self {
            users: users.into_iter().collect(),
            groups: groups.into_iter().collect(),
            all: false,
        }
    }

    /// Creates a filter that selects every record.
    #[must_use]
    pub fn show_all() -> Self {
        Self {
            all: true,
            ..Self::default()
        }
    }

    /// Returns true when the incident should be included in the report.
    ///
    /// A review entry with neither an assigned user nor an assigned group
    /// contributes nothing to the match.
    #[must_use]
    pub fn matches(&self, incident: &Incident) -> bool {
        if self.all {
            return true;
        }
        incident.reviews.iter().any(|review| {
            review
                .user
                .as_deref()
                .is_some_and(|user| self.users.contains(user))
                || review
                    .group
                    .as_deref()
                    .is_some_and(|group| self.groups.contains(group))
        })
    }

    /// Returns the matching subset of `incidents`, preserving input order.
    #[must_use]
    pub fn apply(&self, incidents: Vec<Incident>) -> Vec<Incident> {
        incidents
            .into_iter()
            .filter(|incident| self.matches(incident))
            .collect()
    }
}
