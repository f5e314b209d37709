//! Arrivals table extraction.
//!
//! Columns are matched by position. All knowledge of the page layout lives
//! in this file.

use tracing::{debug, trace};

use crate::dom::{Node, PathSegment, find_by_id, first_text, resolve_path};
use crate::domain::Schedule;
use crate::store::StopStore;

use super::error::{ParseError, ScheduleError};

/// Id of the element wrapping the arrivals table.
pub const TABLE_ID: &str = "GridView1";

/// Raw text of the cells of one data row.
#[derive(Debug, Default)]
struct RowCells<'a> {
    line: Option<&'a str>,
    route: Option<&'a str>,
    time: Option<&'a str>,
}

/// Extract every arrival from a parsed arrivals page.
///
/// The first row is skipped as a header. Each following row must name a
/// line known to `store` and carry a numeric minutes cell; the first row
/// that does not fails the whole extraction. Rows without any cells are
/// ignored.
pub fn extract_schedules<S>(document: &Node, store: &S) -> Result<Vec<Schedule>, ScheduleError>
where
    S: StopStore + ?Sized,
{
    let table = find_by_id(document, TABLE_ID).ok_or(ParseError::TableNotFound)?;
    let body = resolve_path(table, &[PathSegment::Tag("tbody".into())])
        .ok_or(ParseError::BodyNotFound)?;

    let mut schedules = Vec::new();

    for (row_idx, row) in body.children_with_tag("tr").enumerate().skip(1) {
        let Some(cells) = read_row(row) else {
            trace!(row = row_idx, "skipping row without cells");
            continue;
        };

        let name = cells
            .line
            .map(str::trim)
            .ok_or(ParseError::IncompleteRow {
                row: row_idx,
                field: "line",
            })?;
        let line = store
            .line_by_name(name)?
            .ok_or_else(|| ParseError::UnknownLine(name.to_string()))?;

        let time_text = cells.time.ok_or(ParseError::IncompleteRow {
            row: row_idx,
            field: "time",
        })?;
        let time = time_text
            .trim()
            .parse::<u32>()
            .map_err(|_| ParseError::InvalidTime(time_text.to_string()))?;

        schedules.push(Schedule {
            line,
            route: cells.route.unwrap_or_default().to_string(),
            time,
        });
    }

    debug!(count = schedules.len(), "extracted schedules");
    Ok(schedules)
}

/// Read the first three `td` cells of a row.
///
/// Returns `None` for a row with no `td` children at all.
fn read_row(row: &Node) -> Option<RowCells<'_>> {
    let mut cells = row.children_with_tag("td").peekable();
    cells.peek()?;

    let mut out = RowCells::default();
    for (idx, cell) in cells.take(3).enumerate() {
        let text = cell_text(cell);
        match idx {
            0 => out.line = text,
            1 => out.route = text,
            _ => out.time = text,
        }
    }
    Some(out)
}

/// Text of the `<font>` wrapper inside a cell.
fn cell_text(cell: &Node) -> Option<&str> {
    resolve_path(cell, &[PathSegment::Tag("font".into())]).and_then(first_text)
}
