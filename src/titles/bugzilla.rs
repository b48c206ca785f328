//! Bugzilla REST title lookup.
//!
//! References point at several Bugzilla instances; each host is queried
//! separately through `GET /rest/bug` with batched `id` parameters. The
//! SUSE instances require an API key from the `BUGZILLA_TOKEN` environment
//! variable and are skipped without one.

use std::collections::{BTreeMap, HashMap};
use std::env;

use serde_json::Value;
use url::Url;

use crate::smelt::client::SmeltClient;

use super::{MAX_ISSUES, sanitise};

/// Hosts that require the `Bugzilla_api_key` query parameter.
const SUSE_HOSTS: [&str; 2] = ["bugzilla.suse.com", "bugzilla.opensuse.org"];

/// Hosts with a broken REST endpoint, skipped entirely.
const BROKEN_HOSTS: [&str; 1] = ["bugzilla.gnome.org"];

/// Groups Bugzilla reference URLs by instance host.
///
/// Only hosts starting with `bugzilla.` are considered; broken instances
/// are dropped. Unparseable URLs are ignored.
#[must_use]
pub fn group_by_host(urls: &[String]) -> BTreeMap<String, Vec<String>> {
    let mut hosts: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for url in urls {
        let Ok(parsed) = Url::parse(url) else {
            continue;
        };
        let Some(host) = parsed.host_str() else {
            continue;
        };
        if host.starts_with("bugzilla.") && !BROKEN_HOSTS.contains(&host) {
            hosts.entry(host.to_owned()).or_default().push(url.clone());
        }
    }
    hosts
}

/// Extracts the bug id from a `show_bug.cgi?id=` style URL.
#[must_use]
pub fn issue_id(url: &str) -> &str {
    url.rsplit('=').next().unwrap_or(url)
}

/// Fetches titles for the given URLs from one Bugzilla instance.
///
/// Returns `None` when the host needs a token that is not configured or
/// when any batch request fails; partial results are not reported.
#[must_use]
pub fn fetch_titles(
    client: &SmeltClient,
    host: &str,
    urls: &[String],
) -> Option<HashMap<String, String>> {
    let token = env::var("BUGZILLA_TOKEN").ok();
    let needs_token = SUSE_HOSTS.contains(&host);
    if needs_token && token.is_none() {
        return None;
    }

    let endpoint = format!("https://{host}/rest/bug");
    let ids: Vec<&str> = urls.iter().map(|url| issue_id(url)).collect();

    let mut titles = HashMap::new();
    for chunk in ids.chunks(MAX_ISSUES) {
        let mut query: Vec<(&str, String)> = chunk
            .iter()
            .map(|id| ("id", (*id).to_owned()))
            .collect();
        query.push(("include_fields", "id,summary".to_owned()));
        if needs_token && let Some(key) = token.as_deref() {
            query.push(("Bugzilla_api_key", key.to_owned()));
        }

        match client.get_json_with(&endpoint, &query, None) {
            Ok(body) => collect_bugs(host, &body, &mut titles),
            Err(error) => {
                let message = error.to_string();
                tracing::warn!("{endpoint}: {}", sanitise(&message));
                return None;
            }
        }
    }
    Some(titles)
}

fn collect_bugs(host: &str, body: &Value, titles: &mut HashMap<String, String>) {
    let Some(bugs) = body.get("bugs").and_then(Value::as_array) else {
        return;
    };
    for bug in bugs {
        let Some(id) = bug.get("id").and_then(Value::as_u64) else {
            continue;
        };
        let Some(summary) = bug.get("summary").and_then(Value::as_str) else {
            continue;
        };
        titles.insert(
            format!("https://{host}/show_bug.cgi?id={id}"),
            summary.to_owned(),
        );
    }
}
