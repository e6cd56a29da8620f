//! Declarative column definitions for the document table: one entry per
//! visible column with a header title, a cell renderer and, where the
//! column is filterable, a filter predicate. Consumed by the same table
//! state the toolbar writes through to.

use chrono::NaiveDate;
use tracing::warn;

use crate::record::DocumentRecord;
use crate::refdata;
use crate::table_state::{ColumnInfo, FilterValue};

/// Placeholder for cells whose stored value has no metadata entry.
pub const MISS_PLACEHOLDER: &str = "∅";

/// Rendered cell content. `hint` is surfaced in the status line for the
/// selected cell, standing in for a hover tooltip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub icon: Option<&'static str>,
    pub hint: String,
}

impl Cell {
    fn plain(text: impl Into<String>, hint: String) -> Self {
        Cell { text: text.into(), icon: None, hint }
    }
}

pub struct ColumnDef {
    pub id: &'static str,
    pub title: &'static str,
    pub sortable: bool,
    pub hideable: bool,
    pub cell: fn(&DocumentRecord) -> Cell,
    pub filter: Option<fn(&DocumentRecord, &FilterValue) -> bool>,
}

pub const COLUMNS: &[ColumnDef] = &[
    ColumnDef {
        id: "print-code",
        title: "Scan",
        sortable: false,
        hideable: false,
        cell: scan_cell,
        filter: None,
    },
    ColumnDef {
        id: "code",
        title: "Code",
        sortable: true,
        hideable: true,
        cell: code_cell,
        filter: None,
    },
    ColumnDef {
        id: "origin_office",
        title: "Origin Office",
        sortable: true,
        hideable: true,
        cell: origin_office_cell,
        filter: None,
    },
    ColumnDef {
        id: "title",
        title: "Subject/Title",
        sortable: true,
        hideable: true,
        cell: title_cell,
        filter: None,
    },
    ColumnDef {
        id: "classification",
        title: "Classification",
        sortable: true,
        hideable: true,
        cell: classification_cell,
        filter: None,
    },
    ColumnDef {
        id: "type",
        title: "Type",
        sortable: true,
        hideable: true,
        cell: type_cell,
        filter: None,
    },
    ColumnDef {
        id: "created_by",
        title: "Created By",
        sortable: true,
        hideable: true,
        cell: created_by_cell,
        filter: None,
    },
    ColumnDef {
        id: "date_created",
        title: "Date Created",
        sortable: true,
        hideable: true,
        cell: date_created_cell,
        filter: None,
    },
    ColumnDef {
        id: "status",
        title: "Status",
        sortable: true,
        hideable: true,
        cell: status_cell,
        filter: Some(status_filter),
    },
    ColumnDef {
        id: "actions",
        title: "Actions",
        sortable: false,
        hideable: false,
        cell: actions_cell,
        filter: None,
    },
];

pub fn column(id: &str) -> Option<&'static ColumnDef> {
    COLUMNS.iter().find(|c| c.id == id)
}

/// The filtering identities the table state is built from: every declared
/// column plus the filter-only "document" search column.
pub fn column_infos() -> Vec<ColumnInfo<DocumentRecord>> {
    let mut infos: Vec<ColumnInfo<DocumentRecord>> = COLUMNS
        .iter()
        .map(|c| ColumnInfo {
            id: c.id,
            sortable: c.sortable,
            hideable: c.hideable,
            predicate: c.filter,
        })
        .collect();
    infos.push(ColumnInfo {
        id: "document",
        sortable: false,
        hideable: false,
        predicate: None,
    });
    infos
}

fn scan_cell(rec: &DocumentRecord) -> Cell {
    Cell {
        text: scan_glyphs(&rec.code),
        icon: None,
        hint: format!("Scan: {}", rec.code),
    }
}

/// Barcode-style visualization of the document code.
pub fn scan_glyphs(code: &str) -> String {
    code.bytes()
        .map(|b| match b % 4 {
            0 => '▏',
            1 => '▍',
            2 => '▋',
            _ => '█',
        })
        .collect()
}

fn code_cell(rec: &DocumentRecord) -> Cell {
    Cell::plain(rec.code.as_str(), format!("Code: {}", rec.code))
}

fn origin_office_cell(rec: &DocumentRecord) -> Cell {
    Cell::plain(
        rec.origin_office.as_str(),
        format!("Origin Office: {}", rec.origin_office),
    )
}

fn title_cell(rec: &DocumentRecord) -> Cell {
    Cell::plain(rec.title.as_str(), format!("Title: {}", rec.title))
}

fn type_cell(rec: &DocumentRecord) -> Cell {
    Cell::plain(rec.doc_type.as_str(), format!("Type: {}", rec.doc_type))
}

fn created_by_cell(rec: &DocumentRecord) -> Cell {
    Cell::plain(rec.created_by.as_str(), format!("Created By: {}", rec.created_by))
}

fn classification_cell(rec: &DocumentRecord) -> Cell {
    match refdata::classification_meta(&rec.classification) {
        Some(meta) => Cell::plain(meta.label, format!("Classification: {}", meta.label)),
        None => {
            warn!("No classification metadata for \"{}\"", rec.classification);
            Cell::plain(
                MISS_PLACEHOLDER,
                format!("Unknown classification: {}", rec.classification),
            )
        }
    }
}

fn status_cell(rec: &DocumentRecord) -> Cell {
    match refdata::status_meta(&rec.status) {
        Some(meta) => Cell {
            text: meta.label.to_string(),
            icon: Some(meta.icon),
            hint: format!("Status: {}", meta.label),
        },
        None => {
            warn!("No status metadata for \"{}\"", rec.status);
            Cell::plain(MISS_PLACEHOLDER, format!("Unknown status: {}", rec.status))
        }
    }
}

fn date_created_cell(rec: &DocumentRecord) -> Cell {
    let text = match parse_date(&rec.date_created) {
        Some(date) => date.format("%a %b %d %Y").to_string(),
        None => {
            warn!("Unparsable date_created \"{}\"", rec.date_created);
            rec.date_created.clone()
        }
    };
    Cell::plain(text.clone(), format!("Date Created: {text}"))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| chrono::DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn actions_cell(rec: &DocumentRecord) -> Cell {
    Cell::plain("⋯", format!("Row Actions: {}", rec.code))
}

/// Multi-select semantics: the row matches when its status is a member of
/// the filter's value set.
fn status_filter(rec: &DocumentRecord, value: &FilterValue) -> bool {
    match value {
        FilterValue::Set(values) => values.iter().any(|v| v == &rec.status),
        FilterValue::Text(term) => rec.status.contains(term.as_str()),
    }
}
