//! Jira REST title lookup.
//!
//! Jira references all live under one instance. Issue keys are looked up
//! in batches through the search API with a `key in (...)` JQL clause,
//! authenticated with a bearer token from the `JIRA_TOKEN` environment
//! variable. Without the token the lookup is skipped.

use std::collections::HashMap;
use std::env;

use serde_json::Value;

use crate::smelt::client::SmeltClient;

use super::{MAX_ISSUES, sanitise};

/// Base URL of the Jira instance references point at.
const JIRA_URL: &str = "https://jira.suse.com";

/// Extracts the issue key from a `browse/` style URL.
#[must_use]
pub fn issue_key(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// Fetches titles for the Jira references among the given URLs.
///
/// Returns `None` when no token is configured or when any batch request
/// fails; partial results are not reported.
#[must_use]
pub fn fetch_titles(client: &SmeltClient, urls: &[String]) -> Option<HashMap<String, String>> {
    let token = env::var("JIRA_TOKEN").ok()?;

    let keys: Vec<&str> = urls
        .iter()
        .filter(|url| url.starts_with(JIRA_URL))
        .map(|url| issue_key(url))
        .collect();

    let endpoint = format!("{JIRA_URL}/rest/api/2/search");
    let mut titles = HashMap::new();
    for chunk in keys.chunks(MAX_ISSUES) {
        let query = [
            ("fields", "summary".to_owned()),
            ("jql", format!("key in ({})", chunk.join(","))),
        ];

        match client.get_json_with(&endpoint, &query, Some(&token)) {
            Ok(body) => collect_issues(&body, &mut titles),
            Err(error) => {
                let message = error.to_string();
                tracing::warn!("{endpoint}: {}", sanitise(&message));
                return None;
            }
        }
    }
    Some(titles)
}

fn collect_issues(body: &Value, titles: &mut HashMap<String, String>) {
    let Some(issues) = body.get("issues").and_then(Value::as_array) else {
        return;
    };
    for issue in issues {
        let Some(key) = issue.get("key").and_then(Value::as_str) else {
            continue;
        };
        let Some(summary) = issue
            .get("fields")
            .and_then(|fields| fields.get("summary"))
            .and_then(Value::as_str)
        else {
            continue;
        };
        titles.insert(format!("{JIRA_URL}/browse/{key}"), summary.to_owned());
    }
}
