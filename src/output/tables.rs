use chrono::{DateTime, Local, Utc};
use comfy_table::presets::NOTHING;
use comfy_table::{Cell, Color as TableColor, ContentArrangement, Table};

use crate::model::Status;

/// Row of the `list` table.
pub struct ListRow {
    pub name: String,
    pub status: Option<Status>,
    pub stage: Option<String>,
    pub last_update: Option<DateTime<Utc>>,
    pub revision: Option<String>,
}

/// Row of the `run` result table.
pub struct RunRow {
    pub pipeline: String,
    pub execution_id: String,
}

/// Borderless, left-aligned, padding-separated table.
fn create_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            header
                .iter()
                .map(|label| Cell::new(*label).fg(TableColor::Cyan))
                .collect::<Vec<_>>(),
        );
    table
}

/// Status cell colored the way the AWS console colors executions.
pub fn status_cell(status: &Status) -> Cell {
    let text = status.to_string();
    match status {
        Status::InProgress => Cell::new(text).fg(TableColor::Blue),
        Status::Failed | Status::Stopped | Status::Cancelled => {
            Cell::new(text).fg(TableColor::Red)
        }
        Status::Stopping => Cell::new(text).fg(TableColor::Yellow),
        Status::Succeeded => Cell::new(text).fg(TableColor::Green),
        Status::Superseded => Cell::new(text).fg(TableColor::DarkGrey),
        Status::Other(_) => Cell::new(text),
    }
}

/// Table for the `list` command. The header renders even with no rows.
pub fn pipeline_table(rows: &[ListRow]) -> Table {
    let mut table = create_table(&["Name", "Status", "Stage", "Last update", "Revision"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.name),
            row.status.as_ref().map_or_else(|| Cell::new("-"), status_cell),
            Cell::new(row.stage.as_deref().unwrap_or("-")),
            Cell::new(
                row.last_update
                    .map(|t| {
                        t.with_timezone(&Local)
                            .format("%b %d %Y %H:%M:%S")
                            .to_string()
                    })
                    .unwrap_or_else(|| "-".to_owned()),
            ),
            Cell::new(row.revision.as_deref().unwrap_or("-")),
        ]);
    }
    table
}

/// Table for the `run` command: which execution each pipeline got.
pub fn execution_table(rows: &[RunRow]) -> Table {
    let mut table = create_table(&["Pipeline", "Execution ID"]);
    for row in rows {
        table.add_row(vec![Cell::new(&row.pipeline), Cell::new(&row.execution_id)]);
    }
    table
}
