//! Data models for maintenance incidents under review.
//!
//! This module contains domain models for the records returned by the SMELT
//! overview API. Types prefixed with `Api` are internal deserialisation
//! targets that convert into public domain types; the raw JSON value of a
//! record is kept separately by the caller for passthrough output.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Upstream spelling of the incident project prefix.
const PROJECT_PREFIX: &str = "SUSE:Maintenance";

/// Abbreviation used when rendering incident identifiers.
const PROJECT_PREFIX_SHORT: &str = "S:M";

/// One maintenance incident under review.
///
/// Records are immutable once fetched; display-time derivations (sorted
/// lists, ages, due-day counts) are computed on separate view types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incident {
    /// Incident project (e.g. `SUSE:Maintenance:123`).
    pub project: String,
    /// Review request number, normalised to a string.
    pub request_id: String,
    /// Scheduling priority assigned by the release team.
    pub priority: i64,
    /// Rating name (e.g. `critical`) if present.
    pub rating: Option<String>,
    /// Creation timestamp of the review request.
    pub created: DateTime<Utc>,
    /// Review deadline if one was set.
    pub deadline: Option<DateTime<Utc>>,
    /// Package names shipped by the incident.
    pub packages: Vec<String>,
    /// Product channels the incident is being released into.
    pub channels: Vec<String>,
    /// Codestream identifiers (`stream:version` pairs).
    pub codestreams: Vec<String>,
    /// Reviews that have not been concluded yet.
    pub reviews: Vec<Review>,
    /// External tracker references, incident-level entries first.
    pub references: Vec<Reference>,
}

impl Incident {
    /// Deserialises an incident from a raw record value.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error when a required identity
    /// field (`incident.project`, `request_id`, `created`) is missing or
    /// malformed. Optional fields fall back to empty or absent values.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        let record = ApiRecord::deserialize(value)?;
        Ok(record.into())
    }

    /// Returns the abbreviated incident identifier shown in reports.
    ///
    /// The `SUSE:Maintenance` project prefix is shortened to `S:M` and the
    /// request number is appended (e.g. `S:M:123:456`).
    #[must_use]
    pub fn request_label(&self) -> String {
        format!(
            "{}:{}",
            self.project.replace(PROJECT_PREFIX, PROJECT_PREFIX_SHORT),
            self.request_id
        )
    }
}

/// One unfinished review delegation.
///
/// A review names an assigned user or an assigned group; either may be
/// absent, and an entry with neither assignee is ignored for filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Review {
    /// Assigned user name if the review was delegated to a user.
    pub user: Option<String>,
    /// Assigned group name if the review was delegated to a group.
    pub group: Option<String>,
}

impl Review {
    /// Returns the assignee name, preferring the user over the group.
    #[must_use]
    pub fn assignee(&self) -> Option<&str> {
        self.user.as_deref().or(self.group.as_deref())
    }
}

/// External tracker reference attached to an incident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Tracker URL.
    pub url: String,
    /// Display name (e.g. `bsc#1234567`) if the upstream data carries one.
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiRecord {
    incident: ApiIncident,
    request_id: ApiRequestId,
    created: DateTime<Utc>,
    #[serde(default)]
    packages: Vec<String>,
    #[serde(default)]
    channellist: Vec<String>,
    #[serde(default)]
    codestreams: Vec<String>,
    #[serde(default)]
    references: Vec<ApiReference>,
    #[serde(default)]
    unfinished_reviews: Vec<ApiReview>,
}

#[derive(Debug, Deserialize)]
struct ApiIncident {
    project: String,
    #[serde(default)]
    priority: i64,
    #[serde(default)]
    deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    rating: Option<ApiRating>,
    #[serde(default)]
    references: Vec<ApiReference>,
}

#[derive(Debug, Deserialize)]
struct ApiRating {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiReference {
    url: String,
    #[serde(default)]
    name: Option<String>,
}

/// Request numbers arrive as JSON numbers or strings depending on revision.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiRequestId {
    Number(u64),
    Text(String),
}

impl ApiRequestId {
    fn into_string(self) -> String {
        match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiReview {
    #[serde(default)]
    assigned_by_user: Option<ApiUser>,
    #[serde(default)]
    assigned_by_group: Option<ApiGroup>,
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    #[serde(default)]
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiGroup {
    #[serde(default)]
    name: Option<String>,
}

impl From<ApiRecord> for Incident {
    fn from(record: ApiRecord) -> Self {
        let ApiRecord {
            incident,
            request_id,
            created,
            packages,
            channellist,
            codestreams,
            references,
            unfinished_reviews,
        } = record;

        let mut merged: Vec<Reference> = incident
            .references
            .into_iter()
            .map(|reference| Reference {
                url: reference.url,
                name: reference.name,
            })
            .collect();
        merged.extend(references.into_iter().map(|reference| Reference {
            url: reference.url,
            name: reference.name,
        }));

        Self {
            project: incident.project,
            request_id: request_id.into_string(),
            priority: incident.priority,
            rating: incident.rating.and_then(|rating| rating.name),
            created,
            deadline: incident.deadline,
            packages,
            channels: channellist,
            codestreams,
            reviews: unfinished_reviews
                .into_iter()
                .map(|review| Review {
                    user: review.assigned_by_user.and_then(|user| user.username),
                    group: review.assigned_by_group.and_then(|group| group.name),
                })
                .collect(),
            references: merged,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Incident;

    fn sample_record() -> serde_json::Value {
        json!({
            "incident": {
                "project": "SUSE:Maintenance:123",
                "priority": 500,
                "deadline": null,
                "rating": {"name": "critical"},
                "references": [{"url": "https://bugzilla.suse.com/show_bug.cgi?id=1", "name": "bsc#1"}]
            },
            "request_id": "456",
            "created": "2024-01-01T00:00:00Z",
            "packages": ["foo"],
            "channellist": ["SLE15"],
            "codestreams": [],
            "references": [{"url": "https://jira.suse.com/browse/PED-1", "name": "jsc#PED-1"}],
            "unfinished_reviews": [
                {"assigned_by_user": {"username": "alice"}, "assigned_by_group": null}
            ]
        })
    }

    #[test]
    fn from_value_decodes_sample_record() {
        let incident =
            Incident::from_value(&sample_record()).expect("sample record should decode");

        assert_eq!(incident.project, "SUSE:Maintenance:123");
        assert_eq!(incident.request_id, "456");
        assert_eq!(incident.priority, 500);
        assert_eq!(incident.rating.as_deref(), Some("critical"));
        assert_eq!(incident.deadline, None);
        assert_eq!(incident.packages, vec!["foo".to_owned()]);
        assert_eq!(incident.channels, vec!["SLE15".to_owned()]);
        assert_eq!(
            incident.reviews.first().and_then(|review| review.assignee()),
            Some("alice")
        );
    }

    #[test]
    fn from_value_merges_incident_and_record_references() {
        let incident =
            Incident::from_value(&sample_record()).expect("sample record should decode");

        let urls: Vec<&str> = incident
            .references
            .iter()
            .map(|reference| reference.url.as_str())
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://bugzilla.suse.com/show_bug.cgi?id=1",
                "https://jira.suse.com/browse/PED-1",
            ]
        );
    }

    #[test]
    fn from_value_accepts_numeric_request_ids() {
        let mut record = sample_record();
        record["request_id"] = json!(789);

        let incident = Incident::from_value(&record).expect("numeric id should decode");
        assert_eq!(incident.request_id, "789");
    }

    #[test]
    fn from_value_defaults_missing_optional_fields() {
        let record = json!({
            "incident": {"project": "SUSE:Maintenance:9"},
            "request_id": 1,
            "created": "2024-06-01T12:00:00Z"
        });

        let incident = Incident::from_value(&record).expect("minimal record should decode");
        assert_eq!(incident.priority, 0);
        assert_eq!(incident.rating, None);
        assert!(incident.packages.is_empty());
        assert!(incident.reviews.is_empty());
        assert!(incident.references.is_empty());
    }

    #[test]
    fn from_value_rejects_records_without_identity() {
        let record = json!({"request_id": 1, "created": "2024-06-01T12:00:00Z"});
        assert!(Incident::from_value(&record).is_err());
    }

    #[test]
    fn request_label_abbreviates_the_maintenance_prefix() {
        let incident =
            Incident::from_value(&sample_record()).expect("sample record should decode");
        assert_eq!(incident.request_label(), "S:M:123:456");
    }
}
