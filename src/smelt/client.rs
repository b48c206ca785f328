//! Blocking HTTP session and paginated record retrieval.
//!
//! The overview API serves records in pages of the shape
//! `{ "results": [...], "next": <url-or-null> }`. [`SmeltClient::fetch_all`]
//! follows the `next` cursor until it is null and returns the accumulated
//! records in API order. Any failure along the way is fatal to the fetch;
//! pages collected before the failure are discarded.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

use super::error::ReportError;

/// Per-request timeout, matching the upstream service's slow paging.
const TIMEOUT: Duration = Duration::from_secs(15);

/// Process-scoped HTTP session.
///
/// One client is built per invocation and reused for every request so the
/// underlying connections are shared between pagination and title lookups.
#[derive(Debug, Clone)]
pub struct SmeltClient {
    http: Client,
}

/// One page of the overview listing.
#[derive(Debug, Deserialize)]
struct Page {
    results: Vec<Value>,
    #[serde(default)]
    next: Option<String>,
}

impl SmeltClient {
    /// Builds the HTTP session.
    ///
    /// `insecure` disables TLS certificate verification, for instances
    /// behind inspection proxies.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Client`] when the underlying client cannot be
    /// constructed.
    pub fn new(insecure: bool) -> Result<Self, ReportError> {
        let http = Client::builder()
            .timeout(TIMEOUT)
            .danger_accept_invalid_certs(insecure)
            .build()
            .map_err(|error| ReportError::Client {
                message: error.to_string(),
            })?;
        Ok(Self { http })
    }

    /// Issues a GET request and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Network`] on transport failure,
    /// [`ReportError::Status`] on a non-success response, and
    /// [`ReportError::Decode`] when the body is not valid JSON.
    pub fn get_json(&self, url: &str) -> Result<Value, ReportError> {
        self.get_json_with(url, &[], None)
    }

    /// Issues a GET request with query parameters and optional bearer auth.
    ///
    /// Used by the tracker title lookups, which add query-string batches and
    /// (for Jira) an `Authorization: Bearer` header.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`SmeltClient::get_json`].
    pub fn get_json_with(
        &self,
        url: &str,
        query: &[(&str, String)],
        bearer: Option<&str>,
    ) -> Result<Value, ReportError> {
        tracing::debug!("GET {url}");
        let mut request = self.http.get(url).query(query);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|error| ReportError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        response.json().map_err(|error| ReportError::Decode {
            url: url.to_owned(),
            message: error.to_string(),
        })
    }

    /// Fetches every record reachable from `url`, following `next` cursors.
    ///
    /// Records are returned in the API's pagination order. The raw JSON
    /// values are kept so callers can re-emit them unchanged.
    ///
    /// # Errors
    ///
    /// Propagates the first request, status, or decode error; nothing
    /// fetched before the failure is returned.
    pub fn fetch_all(&self, url: &str) -> Result<Vec<Value>, ReportError> {
        let mut results = Vec::new();
        let mut cursor = Some(url.to_owned());
        while let Some(current) = cursor {
            let mut page = self.fetch_page(&current)?;
            results.append(&mut page.results);
            cursor = page.next;
        }
        Ok(results)
    }

    fn fetch_page(&self, url: &str) -> Result<Page, ReportError> {
        let body = self.get_json(url)?;
        serde_json::from_value(body).map_err(|error| ReportError::Decode {
            url: url.to_owned(),
            message: error.to_string(),
        })
    }
}
