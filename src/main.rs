//! Smelta CLI entrypoint for SMELT maintenance-review reporting.

use std::collections::{BTreeSet, HashMap};
use std::io::{self, Write};
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use serde_json::Value;

use smelta::report::{self, ReferenceStyle};
use smelta::{Incident, Options, ReportError, SmeltClient, titles};

/// Overview listing of incidents in the review pipeline.
const OVERVIEW_URL: &str = "https://smelt.suse.de/api/v1/overview/testing/";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ReportError> {
    let options = Options::parse();

    let client = SmeltClient::new(options.insecure)?;
    let records = client.fetch_all(OVERVIEW_URL)?;

    let filter = options.reviewer_filter();
    let selected = select_records(records, &filter)?;

    if options.json {
        return write_json(&selected);
    }

    let incidents: Vec<Incident> = selected.into_iter().map(|(_, incident)| incident).collect();
    let titles = if options.verbose {
        titles::resolve(&client, &reference_urls(&incidents))
    } else {
        HashMap::new()
    };
    let style = if options.verbose {
        ReferenceStyle::Verbose { titles: &titles }
    } else {
        ReferenceStyle::Compact
    };

    let mut views = report::build_views(&incidents, Utc::now(), &style);
    if let Some(order) = options.sort_order() {
        report::sort_by_priority(&mut views, order);
    }

    let mut stdout = io::stdout().lock();
    if options.csv {
        report::csv::write_csv(&mut stdout, &views, !options.no_header)
    } else {
        report::text::write_table(&mut stdout, &views, !options.no_header)
    }
}

/// Pairs each raw record with its decoded incident and keeps the matches.
///
/// The raw values ride along so JSON output can re-emit exactly what the
/// API returned for the selected records.
fn select_records(
    records: Vec<Value>,
    filter: &smelta::ReviewerFilter,
) -> Result<Vec<(Value, Incident)>, ReportError> {
    records
        .into_iter()
        .map(|record| {
            let incident =
                Incident::from_value(&record).map_err(|error| ReportError::Decode {
                    url: OVERVIEW_URL.to_owned(),
                    message: error.to_string(),
                })?;
            Ok((record, incident))
        })
        .filter(|decoded| match decoded {
            Ok((_, incident)) => filter.matches(incident),
            Err(_) => true,
        })
        .collect()
}

fn reference_urls(incidents: &[Incident]) -> Vec<String> {
    incidents
        .iter()
        .flat_map(|incident| {
            incident
                .references
                .iter()
                .map(|reference| reference.url.clone())
        })
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

fn write_json(selected: &[(Value, Incident)]) -> Result<(), ReportError> {
    let records: Vec<&Value> = selected.iter().map(|(record, _)| record).collect();
    let rendered = serde_json::to_string_pretty(&records).map_err(|error| ReportError::Io {
        message: error.to_string(),
    })?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}").map_err(|error| ReportError::Io {
        message: error.to_string(),
    })
}
