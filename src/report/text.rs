//! Fixed-width aligned text table renderer.
//!
//! Variable-length columns (assignees, packages, channels) are sized to the
//! widest value observed across the whole invocation, with a floor of eight
//! columns, so alignment is stable for one report. Multi-valued fields put
//! their first value on the record row and the rest on blank-padded
//! continuation rows.

use std::io::Write;

use unicode_width::UnicodeWidthStr;

use crate::smelt::error::ReportError;

use super::{HEADERS, RecordView, io_error};

/// Width floor for the variable-length columns.
const MIN_COLUMN_WIDTH: usize = 8;

/// Fixed width of the incident identifier column.
const ID_WIDTH: usize = 20;

/// Fixed width of the rating column.
const RATING_WIDTH: usize = 9;

/// Fixed width of the priority column.
const PRIORITY_WIDTH: usize = 8;

/// Fixed width of the age and due columns.
const DAYS_WIDTH: usize = 5;

/// Column separator.
const GAP: &str = "  ";

struct ColumnWidths {
    assignees: usize,
    packages: usize,
    channels: usize,
}

impl ColumnWidths {
    fn measure(views: &[RecordView]) -> Self {
        Self {
            assignees: measure_column(views, |view| &view.assignees),
            packages: measure_column(views, |view| &view.packages),
            channels: measure_column(views, |view| &view.channels),
        }
    }
}

fn measure_column<F>(views: &[RecordView], select: F) -> usize
where
    F: Fn(&RecordView) -> &Vec<String>,
{
    views
        .iter()
        .flat_map(|view| select(view).iter())
        .map(|value| value.width())
        .max()
        .map_or(MIN_COLUMN_WIDTH, |widest| widest.max(MIN_COLUMN_WIDTH))
}

/// Writes the aligned text table to `writer`.
///
/// # Errors
///
/// Returns [`ReportError::Io`] when the underlying writer fails.
pub fn write_table<W: Write>(
    writer: &mut W,
    views: &[RecordView],
    header: bool,
) -> Result<(), ReportError> {
    let widths = ColumnWidths::measure(views);

    if header {
        write_row(writer, &widths, HEADERS)?;
    }

    for view in views {
        let priority = view.priority.to_string();
        for row in 0..view.depth() {
            let cells = if row == 0 {
                [
                    view.id.as_str(),
                    view.rating.as_str(),
                    priority.as_str(),
                    view.age.as_str(),
                    view.due.as_str(),
                    value_at(&view.assignees, row),
                    value_at(&view.packages, row),
                    value_at(&view.channels, row),
                    value_at(&view.references, row),
                ]
            } else {
                [
                    "",
                    "",
                    "",
                    "",
                    "",
                    value_at(&view.assignees, row),
                    value_at(&view.packages, row),
                    value_at(&view.channels, row),
                    value_at(&view.references, row),
                ]
            };
            write_row(writer, &widths, cells)?;
        }
    }

    Ok(())
}

fn value_at(values: &[String], row: usize) -> &str {
    values.get(row).map_or("", String::as_str)
}

fn write_row<W: Write>(
    writer: &mut W,
    widths: &ColumnWidths,
    cells: [&str; 9],
) -> Result<(), ReportError> {
    let [id, rating, priority, age, due, assignees, packages, channels, references] = cells;

    let mut line = String::new();
    push_cell(&mut line, id, ID_WIDTH);
    push_cell(&mut line, rating, RATING_WIDTH);
    push_cell(&mut line, priority, PRIORITY_WIDTH);
    push_cell(&mut line, age, DAYS_WIDTH);
    push_cell(&mut line, due, DAYS_WIDTH);
    push_cell(&mut line, assignees, widths.assignees);
    push_cell(&mut line, packages, widths.packages);
    push_cell(&mut line, channels, widths.channels);
    line.push_str(references);

    writeln!(writer, "{}", line.trim_end()).map_err(|error| io_error(&error))
}

fn push_cell(line: &mut String, value: &str, width: usize) {
    line.push_str(value);
    let padding = width.saturating_sub(value.width());
    for _ in 0..padding {
        line.push(' ');
    }
    line.push_str(GAP);
}

#[cfg(test)]
mod tests {
    use super::{MIN_COLUMN_WIDTH, measure_column, write_table};
    use crate::report::{PLACEHOLDER, RecordView};

    fn view(id: &str, assignees: &[&str], packages: &[&str], references: &[&str]) -> RecordView {
        RecordView {
            id: id.to_owned(),
            rating: "critical".to_owned(),
            priority: 500,
            age: "10d".to_owned(),
            due: PLACEHOLDER.to_owned(),
            assignees: assignees.iter().map(|&s| s.to_owned()).collect(),
            packages: packages.iter().map(|&s| s.to_owned()).collect(),
            channels: vec!["SLE15".to_owned()],
            references: references.iter().map(|&s| s.to_owned()).collect(),
        }
    }

    fn render(views: &[RecordView], header: bool) -> String {
        let mut buffer = Vec::new();
        write_table(&mut buffer, views, header).expect("table should render");
        String::from_utf8(buffer).expect("output should be valid UTF-8")
    }

    #[test]
    fn variable_columns_have_a_width_floor_of_eight() {
        let views = vec![view("S:M:1:1", &["ab"], &["cd"], &["bsc#1"])];
        assert_eq!(measure_column(&views, |v| &v.assignees), MIN_COLUMN_WIDTH);
    }

    #[test]
    fn variable_columns_grow_to_the_widest_value() {
        let views = vec![
            view("S:M:1:1", &["short"], &["a-rather-long-package"], &["bsc#1"]),
            view("S:M:1:2", &["short"], &["tiny"], &["bsc#2"]),
        ];
        assert_eq!(
            measure_column(&views, |v| &v.packages),
            "a-rather-long-package".len()
        );
    }

    #[test]
    fn first_values_share_the_record_row() {
        let output = render(
            &[view("S:M:1:1", &["alice"], &["bash"], &["bsc#1"])],
            false,
        );
        let first = output.lines().next().expect("one row expected");
        assert!(first.starts_with("S:M:1:1"));
        assert!(first.contains("alice"));
        assert!(first.contains("bash"));
        assert!(first.ends_with("bsc#1"));
    }

    #[test]
    fn extra_values_land_on_blank_padded_continuation_rows() {
        let output = render(
            &[view(
                "S:M:1:1",
                &["alice", "bob"],
                &["bash", "readline", "zsh"],
                &["bsc#1"],
            )],
            false,
        );
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with(' '), "continuation row: {output}");
        assert!(lines[1].contains("bob"));
        assert!(lines[1].contains("readline"));
        assert!(lines[2].contains("zsh"));
        assert!(!lines[2].contains("bob"));
    }

    #[test]
    fn values_stay_aligned_under_their_columns() {
        let views = vec![view(
            "S:M:1:1",
            &["alice", "bob"],
            &["bash", "zsh"],
            &["bsc#1"],
        )];
        let output = render(&views, false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines[0].find("alice"),
            lines[1].find("bob"),
            "assignee column drifted: {output}"
        );
        assert_eq!(lines[0].find("bash"), lines[1].find("zsh"));
    }

    #[test]
    fn header_row_is_optional() {
        let views = vec![view("S:M:1:1", &["alice"], &["bash"], &["bsc#1"])];

        let with_header = render(&views, true);
        assert!(with_header.starts_with("ID"));
        assert!(with_header.contains("REFERENCES"));

        let without_header = render(&views, false);
        assert!(!without_header.contains("REFERENCES"));
    }
}
