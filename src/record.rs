use polars::prelude::*;
use rayon::prelude::*;
use std::borrow::Cow;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

use crate::domain::DvError;
use crate::table_state::TableRow;

#[derive(Debug)]
enum FileType {
    CSV,
    PARQUET,
}

#[derive(Debug)]
struct FileInfo {
    path: PathBuf,
    file_type: FileType,
}

/// One document row as the dashboard sees it. Read only; nothing in the
/// presentation layer mutates a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    pub code: String,
    pub origin_office: String,
    pub title: String,
    pub classification: String,
    pub doc_type: String,
    pub created_by: String,
    pub date_created: String,
    pub status: String,
}

/// Column names as they appear in input files and in the table state.
pub const FIELDS: &[&str] = &[
    "code",
    "origin_office",
    "title",
    "classification",
    "type",
    "created_by",
    "date_created",
    "status",
];

impl DocumentRecord {
    /// The free-text search surface of the virtual "document" column.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.code, self.title)
    }
}

impl TableRow for DocumentRecord {
    fn field(&self, column: &str) -> Option<Cow<'_, str>> {
        match column {
            "code" => Some(Cow::Borrowed(&self.code)),
            "origin_office" => Some(Cow::Borrowed(&self.origin_office)),
            "title" => Some(Cow::Borrowed(&self.title)),
            "classification" => Some(Cow::Borrowed(&self.classification)),
            "type" => Some(Cow::Borrowed(&self.doc_type)),
            "created_by" => Some(Cow::Borrowed(&self.created_by)),
            "date_created" => Some(Cow::Borrowed(&self.date_created)),
            "status" => Some(Cow::Borrowed(&self.status)),
            "document" => Some(Cow::Owned(self.searchable_text())),
            _ => None,
        }
    }
}

/// Loads document records from a CSV or parquet file. Columns missing from
/// the file turn into empty strings; the dashboard renders what it has.
pub fn load_records(path: PathBuf) -> Result<Vec<DocumentRecord>, DvError> {
    let file_info = get_file_info(path)?;
    let frame = match file_info.file_type {
        FileType::CSV => load_csv(&file_info.path)?,
        FileType::PARQUET => load_parquet(&file_info.path)?,
    };

    let start_time = Instant::now();
    let df = frame.collect()?;

    // Each named field is materialized to strings in its own thread.
    let columns: Vec<Vec<String>> = FIELDS
        .par_iter()
        .map(|name| materialize_column(&df, name))
        .collect::<Result<_, PolarsError>>()?;

    let nrows = df.height();
    let mut records = Vec::with_capacity(nrows);
    for ridx in 0..nrows {
        let get = |cidx: usize| columns[cidx][ridx].clone();
        records.push(DocumentRecord {
            code: get(0),
            origin_office: get(1),
            title: get(2),
            classification: get(3),
            doc_type: get(4),
            created_by: get(5),
            date_created: get(6),
            status: get(7),
        });
    }

    info!(
        "Loaded {} records in {}ms",
        records.len(),
        start_time.elapsed().as_millis()
    );
    Ok(records)
}

fn materialize_column(df: &DataFrame, name: &str) -> Result<Vec<String>, PolarsError> {
    let Ok(col) = df.column(name) else {
        debug!("Input has no \"{name}\" column, filling with empty strings");
        return Ok(vec![String::new(); df.height()]);
    };
    let col = col.cast(&DataType::String)?;
    let series = col.str()?;
    let data = series
        .into_iter()
        .map(|v| v.map(str::to_string).unwrap_or_default())
        .collect();
    Ok(data)
}

fn detect_file_type(path: &Path) -> Result<FileType, DvError> {
    match path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_uppercase())
        .as_deref()
    {
        Some("CSV") => Ok(FileType::CSV),
        Some("PARQUET") | Some("PQ") => Ok(FileType::PARQUET),
        _ => Err(DvError::UnknownFileType),
    }
}

fn get_file_info(path: PathBuf) -> Result<FileInfo, DvError> {
    let metadata = fs::metadata(&path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DvError::FileNotFound,
        ErrorKind::PermissionDenied => DvError::PermissionDenied,
        _ => DvError::IoError(e),
    })?;
    if !metadata.is_file() {
        return Err(DvError::LoadingFailed("Not a file!".into()));
    }
    let file_type = detect_file_type(&path)?;
    Ok(FileInfo { path, file_type })
}

fn load_csv(path: &PathBuf) -> Result<LazyFrame, PolarsError> {
    LazyCsvReader::new(PlPath::Local(path.as_path().into()))
        .with_has_header(true)
        .finish()
}

fn load_parquet(path: &PathBuf) -> Result<LazyFrame, PolarsError> {
    LazyFrame::scan_parquet(
        PlPath::Local(path.as_path().into()),
        ScanArgsParquet::default(),
    )
}

#[cfg(test)]
pub(crate) fn sample_records() -> Vec<DocumentRecord> {
    let mk = |code: &str, office: &str, title: &str, class: &str, dtype: &str, by: &str, date: &str, status: &str| {
        DocumentRecord {
            code: code.into(),
            origin_office: office.into(),
            title: title.into(),
            classification: class.into(),
            doc_type: dtype.into(),
            created_by: by.into(),
            date_created: date.into(),
            status: status.into(),
        }
    };
    vec![
        mk("DOC-001", "Records", "Quarterly budget report", "internal", "report", "amy", "2024-03-05", "pending"),
        mk("DOC-002", "Legal", "NDA template", "confidential", "memo", "bob", "2024-01-12", "approved"),
        mk("DOC-003", "Accounting", "Invoice batch 17", "internal", "invoice", "amy", "2024-02-28", "released"),
        mk("DOC-004", "Registry", "Personnel transfer", "top_secret", "letter", "eva", "2023-11-30", "rejected"),
        mk("DOC-005", "Records", "Travel request", "public", "travel_order", "dan", "2024-04-01", "pending"),
    ]
}
