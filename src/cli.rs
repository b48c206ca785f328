//! Command-line options.
//!
//! The selection flags (`-u`, `-g`, `-a`) decide which records appear in
//! the report; at least one must be given. The remaining flags shape the
//! output format.

use clap::{ArgGroup, Parser};

use crate::report::SortOrder;
use crate::smelt::ReviewerFilter;

/// Report pending SMELT maintenance reviews.
#[derive(Debug, Parser)]
#[command(name = "smelta", version, about)]
#[command(group(
    ArgGroup::new("selection")
        .required(true)
        .multiple(true)
        .args(["users", "groups", "all"])
))]
pub struct Options {
    /// Show requests with a review assigned to this user (repeatable).
    #[arg(short = 'u', long = "user", value_name = "USER")]
    pub users: Vec<String>,

    /// Show requests with a review assigned to this group (repeatable).
    #[arg(short = 'g', long = "group", value_name = "GROUP")]
    pub groups: Vec<String>,

    /// Show all requests regardless of assignee.
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Output CSV instead of an aligned table.
    #[arg(short = 'c', long = "csv", conflicts_with = "json")]
    pub csv: bool,

    /// Dump the fetched records as JSON instead of a table.
    #[arg(short = 'j', long = "json")]
    pub json: bool,

    /// Suppress the header row.
    #[arg(short = 'H', long = "no-header")]
    pub no_header: bool,

    /// Sort by priority, lowest first.
    #[arg(short = 's', long = "sort", conflicts_with = "reverse")]
    pub sort: bool,

    /// Sort by priority, highest first.
    #[arg(short = 'r', long = "reverse")]
    pub reverse: bool,

    /// Show reference URLs with resolved tracker titles.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Disable TLS certificate verification.
    #[arg(short = 'k', long = "insecure")]
    pub insecure: bool,
}

impl Options {
    /// Builds the reviewer filter the selection flags describe.
    #[must_use]
    pub fn reviewer_filter(&self) -> ReviewerFilter {
        if self.all {
            ReviewerFilter::show_all()
        } else {
            ReviewerFilter::new(self.users.clone(), self.groups.clone())
        }
    }

    /// Returns the requested sort direction, if any.
    #[must_use]
    pub const fn sort_order(&self) -> Option<SortOrder> {
        if self.sort {
            Some(SortOrder::Ascending)
        } else if self.reverse {
            Some(SortOrder::Descending)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rstest::rstest;

    use crate::report::SortOrder;

    use super::Options;

    #[test]
    fn repeatable_user_and_group_flags_accumulate() {
        let options =
            Options::parse_from(["smelta", "-u", "alice", "-u", "bob", "-g", "qam-sle"]);
        assert_eq!(options.users, vec!["alice".to_owned(), "bob".to_owned()]);
        assert_eq!(options.groups, vec!["qam-sle".to_owned()]);
    }

    #[test]
    fn a_selection_flag_is_required() {
        assert!(Options::try_parse_from(["smelta"]).is_err());
        assert!(Options::try_parse_from(["smelta", "-a"]).is_ok());
    }

    #[test]
    fn csv_and_json_are_mutually_exclusive() {
        assert!(Options::try_parse_from(["smelta", "-a", "-c", "-j"]).is_err());
    }

    #[rstest]
    #[case::unsorted(&["smelta", "-a"], None)]
    #[case::ascending(&["smelta", "-a", "-s"], Some(SortOrder::Ascending))]
    #[case::descending(&["smelta", "-a", "-r"], Some(SortOrder::Descending))]
    fn sort_flags_map_to_directions(
        #[case] argv: &[&str],
        #[case] expected: Option<SortOrder>,
    ) {
        let options = Options::parse_from(argv.iter().copied());
        assert_eq!(options.sort_order(), expected);
    }

    #[test]
    fn sort_directions_are_mutually_exclusive() {
        assert!(Options::try_parse_from(["smelta", "-a", "-s", "-r"]).is_err());
    }

    #[test]
    fn show_all_wins_over_filter_sets() {
        let options = Options::parse_from(["smelta", "-a", "-u", "alice"]);
        assert!(options.reviewer_filter().matches(
            &crate::smelt::Incident::from_value(&serde_json::json!({
                "incident": {"project": "SUSE:Maintenance:1"},
                "request_id": 1,
                "created": "2024-01-01T00:00:00Z"
            }))
            .expect("minimal record should decode")
        ));
    }
}
