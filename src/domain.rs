use polars::error::PolarsError;
use ratatui::crossterm::event::KeyEvent;
use std::io::Error;

use crate::toolbar::Facet;

#[derive(Debug, Clone)]
pub struct DvConfig {
    pub event_poll_time: u64,
    pub max_column_width: usize,
    pub settings_dir: Option<std::path::PathBuf>,
}

impl Default for DvConfig {
    fn default() -> Self {
        Self {
            event_poll_time: 100,
            max_column_width: 32,
            settings_dir: None,
        }
    }
}

#[derive(Debug)]
pub enum DvError {
    IoError(Error),
    PolarsError(PolarsError),
    Settings(serde_json::Error),
    LoadingFailed(String),
    FileNotFound,
    PermissionDenied,
    UnknownFileType,
}

impl From<Error> for DvError {
    fn from(err: Error) -> Self {
        DvError::IoError(err)
    }
}

impl From<PolarsError> for DvError {
    fn from(err: PolarsError) -> Self {
        DvError::PolarsError(err)
    }
}

impl From<serde_json::Error> for DvError {
    fn from(err: serde_json::Error) -> Self {
        DvError::Settings(err)
    }
}

/// Input events mapped to dashboard intents by the controller.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    Quit,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    MovePageUp,
    MovePageDown,
    MoveBeginning,
    MoveEnd,
    Enter,
    Exit,
    Search,
    OpenFacet(Facet),
    ResetFilters,
    Export,
    AddDocument,
    ViewOptions,
    Appearance,
    SortAscending,
    SortDescending,
    Help,
    Resize(usize, usize),
    RawKey(KeyEvent),
}

pub const HELP_TEXT: &str = "\
dv - document dashboard

  /        search documents
  s t c    filter by status / type / classification
  r        reset all filters
  e        export visible rows to clipboard
  a        add document
  v        column view options
  p        appearance settings
  o O      sort column ascending / descending
  arrows   move selection
  Enter    select / toggle
  Esc      close popup
  ?        this help
  q        quit
";
