//! CSV renderer.
//!
//! One logical record per line: fields joined with `,`, multi-valued
//! fields flattened with `|`. The values are the same normalised strings
//! the text renderer spreads over continuation rows.

use std::io::Write;

use crate::smelt::error::ReportError;

use super::{HEADERS, RecordView, io_error};

/// Separator between fields of one record.
const FIELD_SEPARATOR: &str = ",";

/// Separator between the values of one multi-valued field.
const VALUE_SEPARATOR: &str = "|";

/// Writes the CSV report to `writer`.
///
/// # Errors
///
/// Returns [`ReportError::Io`] when the underlying writer fails.
pub fn write_csv<W: Write>(
    writer: &mut W,
    views: &[RecordView],
    header: bool,
) -> Result<(), ReportError> {
    if header {
        writeln!(writer, "{}", HEADERS.join(FIELD_SEPARATOR)).map_err(|error| io_error(&error))?;
    }

    for view in views {
        let fields = [
            view.id.clone(),
            view.rating.clone(),
            view.priority.to_string(),
            view.age.clone(),
            view.due.clone(),
            view.assignees.join(VALUE_SEPARATOR),
            view.packages.join(VALUE_SEPARATOR),
            view.channels.join(VALUE_SEPARATOR),
            view.references.join(VALUE_SEPARATOR),
        ];
        writeln!(writer, "{}", fields.join(FIELD_SEPARATOR)).map_err(|error| io_error(&error))?;
    }

    Ok(())
}
