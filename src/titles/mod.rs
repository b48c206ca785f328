//! Human-readable titles for tracker reference URLs.
//!
//! Verbose reports annotate each reference URL with the title of the
//! tracker item behind it. Bugzilla instances are queried per host via
//! their REST API; Jira issues go through the Jira search API. Lookup
//! failures are never fatal: the affected tracker's titles are simply
//! absent from the result.

use std::collections::HashMap;

use crate::smelt::client::SmeltClient;

pub mod bugzilla;
pub mod jira;

/// Maximum number of tracker items requested per API call.
const MAX_ISSUES: usize = 200;

/// Resolves titles for the given reference URLs.
///
/// Returns a map from reference URL (in its canonical `show_bug.cgi?id=`
/// or `browse/` form) to the tracker item's title. URLs whose tracker is
/// unknown, unreachable, or not authenticated are absent from the map.
#[must_use]
pub fn resolve(client: &SmeltClient, urls: &[String]) -> HashMap<String, String> {
    let mut titles = HashMap::new();

    for (host, group) in bugzilla::group_by_host(urls) {
        if let Some(found) = bugzilla::fetch_titles(client, &host, &group) {
            titles.extend(found);
        }
    }

    if let Some(found) = jira::fetch_titles(client, urls) {
        titles.extend(found);
    }

    titles
}

/// Strips the query string from an error message so request parameters
/// (notably API keys) cannot leak into logs.
pub(crate) fn sanitise(message: &str) -> &str {
    message.split('?').next().unwrap_or(message)
}
