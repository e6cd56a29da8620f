use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, trace, warn};

use arboard::Clipboard;
use ratatui::crossterm::event::KeyEvent;

use crate::appearance::{
    AppearanceForm, Font, FormField, JsonFileStore, MemoryStore, SettingsStore, Theme, ThemeSink,
};
use crate::columns::{COLUMNS, Cell, ColumnDef};
use crate::domain::{DvConfig, DvError, HELP_TEXT, Message};
use crate::inputter::InputResult;
use crate::record::{DocumentRecord, FIELDS, load_records};
use crate::table_state::TableState;
use crate::toolbar::{Toolbar, export_csv};
use crate::ui::{COLUMN_WIDTH_MARGIN, STATUSLINE_HEIGHT, TABLE_HEADER_HEIGHT, TOOLBAR_HEIGHT};

#[derive(Debug, PartialEq)]
pub enum Status {
    READY,
    QUITTING,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Modus {
    TABLE,
    SEARCH,
    FACET,
    VIEWOPTIONS,
    DIALOG,
    APPEARANCE,
    POPUP,
}

/// What the applied appearance currently is. This is the theme collaborator
/// the settings form talks to.
struct AppliedAppearance {
    theme: Option<Theme>,
    font: Font,
}

impl ThemeSink for AppliedAppearance {
    fn current_theme(&self) -> Option<Theme> {
        self.theme
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = Some(theme);
    }
}

pub struct FacetOptionView {
    pub label: String,
    pub selected: bool,
    pub count: usize,
}

pub enum PopupView {
    None,
    Facet {
        title: String,
        options: Vec<FacetOptionView>,
        cursor: usize,
    },
    ViewOptions {
        options: Vec<(String, bool)>,
        cursor: usize,
    },
    Dialog {
        icon: &'static str,
        prompt: String,
    },
    Appearance {
        font: String,
        theme: String,
        focus_font: bool,
        font_error: Option<String>,
        theme_error: Option<String>,
    },
    Help(String),
}

/// Snapshot of everything the UI renders on one frame.
pub struct UIData {
    pub title: String,
    pub search: InputResult,
    pub searching: bool,
    pub facet_chips: Vec<(String, usize)>,
    pub is_filtered: bool,
    pub add_icon: &'static str,
    pub add_title: String,
    pub header: Vec<(String, usize)>,
    pub rows: Vec<Vec<Cell>>,
    pub nrows_visible: usize,
    pub nrows_total: usize,
    pub selected_row: usize,
    pub hint: String,
    pub popup: PopupView,
    pub status_message: String,
    pub last_status_message_update: Instant,
    pub theme: Theme,
    pub font: Font,
}

impl UIData {
    pub fn empty() -> Self {
        UIData {
            title: String::new(),
            search: InputResult::default(),
            searching: false,
            facet_chips: Vec::new(),
            is_filtered: false,
            add_icon: "+",
            add_title: "Add".to_string(),
            header: Vec::new(),
            rows: Vec::new(),
            nrows_visible: 0,
            nrows_total: 0,
            selected_row: 0,
            hint: String::new(),
            popup: PopupView::None,
            status_message: String::new(),
            last_status_message_update: Instant::now(),
            theme: Theme::System,
            font: Font::Sans,
        }
    }
}

pub struct Model {
    config: DvConfig,
    pub status: Status,
    modus: Modus,
    previous_modus: Modus,
    table: TableState<DocumentRecord>,
    toolbar: Toolbar,
    form: Option<AppearanceForm>,
    store: Box<dyn SettingsStore>,
    applied: AppliedAppearance,
    cursor_row: usize,
    offset_row: usize,
    cursor_col: usize,
    table_height: usize,
    view_cursor: usize,
    uidata: UIData,
    status_message: String,
    last_status_message_update: Instant,
}

impl Model {
    pub fn init(config: &DvConfig, ui_height: usize) -> Result<Self, DvError> {
        let store: Box<dyn SettingsStore> =
            match JsonFileStore::new(config.settings_dir.as_deref()) {
                Some(store) => Box::new(store),
                None => {
                    warn!("No config directory available, appearance settings will not persist");
                    Box::new(MemoryStore::default())
                }
            };

        let mut applied = AppliedAppearance { theme: None, font: Font::Sans };
        let mut load_error = None;
        match store.load() {
            Ok(Some(settings)) => {
                applied.theme = Some(settings.theme);
                applied.font = settings.font;
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Could not read appearance settings: {e:?}");
                load_error = Some("Could not read appearance settings, using defaults".to_string());
            }
        }

        let mut model = Self {
            config: config.clone(),
            status: Status::READY,
            modus: Modus::TABLE,
            previous_modus: Modus::TABLE,
            table: TableState::new(crate::columns::column_infos()),
            toolbar: Toolbar::new(),
            form: None,
            store,
            applied,
            cursor_row: 0,
            offset_row: 0,
            cursor_col: 1, // start on "code", past the scan column
            table_height: ui_height
                .saturating_sub(TOOLBAR_HEIGHT + TABLE_HEADER_HEIGHT + STATUSLINE_HEIGHT),
            view_cursor: 0,
            uidata: UIData::empty(),
            status_message: "Started dv!".to_string(),
            last_status_message_update: Instant::now(),
        };
        if let Some(msg) = load_error {
            model.set_status_message(msg);
        }
        model.update_uidata();
        Ok(model)
    }

    pub fn load_documents(&mut self, path: PathBuf) -> Result<(), DvError> {
        let records = load_records(path)?;
        let count = records.len();
        self.table.set_rows(records);
        self.set_status_message(format!("Loaded {count} documents"));
        self.update_uidata();
        Ok(())
    }

    pub fn get_uidata(&self) -> &UIData {
        &self.uidata
    }

    /// True while a widget consumes keystrokes directly.
    pub fn raw_keyevents(&self) -> bool {
        self.modus == Modus::SEARCH
    }

    pub fn quit(&mut self) {
        self.status = Status::QUITTING;
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.last_status_message_update = Instant::now();
    }

    pub fn update(&mut self, message: Message) -> Result<(), DvError> {
        trace!("Update: Modus {:?}, Message {:?}", self.modus, message);
        match self.modus {
            Modus::TABLE => match message {
                Message::Quit => self.quit(),
                Message::MoveUp => self.move_selection_up(1),
                Message::MoveDown => self.move_selection_down(1),
                Message::MovePageUp => self.move_selection_up(self.table_height.max(1)),
                Message::MovePageDown => self.move_selection_down(self.table_height.max(1)),
                Message::MoveBeginning => {
                    self.cursor_row = 0;
                    self.offset_row = 0;
                }
                Message::MoveEnd => self.move_selection_end(),
                Message::MoveLeft => self.move_column_cursor(-1),
                Message::MoveRight => self.move_column_cursor(1),
                Message::Search => self.enter_search(),
                Message::OpenFacet(facet) => {
                    if self.toolbar.open_facet(facet, &self.table) {
                        self.previous_modus = self.modus;
                        self.modus = Modus::FACET;
                    } else {
                        self.set_status_message(format!(
                            "No {} column on this table",
                            facet.title()
                        ));
                    }
                }
                Message::ResetFilters => {
                    if self.table.is_filtered() {
                        self.toolbar.reset(&mut self.table);
                        self.cursor_row = 0;
                        self.offset_row = 0;
                        self.set_status_message("Filters reset");
                    }
                }
                Message::Export => self.export(),
                Message::AddDocument => {
                    self.toolbar.add.activate();
                    self.previous_modus = self.modus;
                    self.modus = Modus::DIALOG;
                }
                Message::ViewOptions => {
                    self.view_cursor = 0;
                    self.previous_modus = self.modus;
                    self.modus = Modus::VIEWOPTIONS;
                }
                Message::Appearance => self.open_appearance(),
                Message::SortAscending => self.sort_selected_column(true),
                Message::SortDescending => self.sort_selected_column(false),
                Message::Help => {
                    self.previous_modus = self.modus;
                    self.modus = Modus::POPUP;
                }
                Message::Resize(_, height) => self.resize(height),
                _ => (),
            },
            Modus::SEARCH => {
                if let Message::RawKey(key) = message {
                    self.search_input(key);
                }
            }
            Modus::FACET => match message {
                Message::Quit => self.quit(),
                Message::MoveUp => {
                    if let Some(popup) = self.toolbar.facet.as_mut() {
                        popup.move_cursor(-1);
                    }
                }
                Message::MoveDown => {
                    if let Some(popup) = self.toolbar.facet.as_mut() {
                        popup.move_cursor(1);
                    }
                }
                Message::Enter => {
                    if let Some(popup) = self.toolbar.facet.take() {
                        popup.toggle(&mut self.table);
                        self.toolbar.facet = Some(popup);
                        self.clamp_selection();
                    }
                }
                Message::Exit => {
                    self.toolbar.close_facet();
                    self.modus = self.previous_modus;
                }
                Message::Resize(_, height) => self.resize(height),
                _ => (),
            },
            Modus::VIEWOPTIONS => match message {
                Message::Quit => self.quit(),
                Message::MoveUp => {
                    let len = self.hideable_columns().len().max(1);
                    self.view_cursor = (self.view_cursor + len - 1) % len;
                }
                Message::MoveDown => {
                    let len = self.hideable_columns().len().max(1);
                    self.view_cursor = (self.view_cursor + 1) % len;
                }
                Message::Enter => {
                    if let Some(def) = self.hideable_columns().get(self.view_cursor) {
                        let id = def.id;
                        self.table.toggle_column_visibility(id);
                        let ncols = self.visible_defs().len();
                        self.cursor_col = self.cursor_col.min(ncols.saturating_sub(1));
                    }
                }
                Message::Exit => self.modus = self.previous_modus,
                Message::Resize(_, height) => self.resize(height),
                _ => (),
            },
            Modus::DIALOG => match message {
                Message::Quit => self.quit(),
                Message::Enter | Message::Exit => {
                    self.toolbar.add.close();
                    self.modus = self.previous_modus;
                }
                Message::Resize(_, height) => self.resize(height),
                _ => (),
            },
            Modus::APPEARANCE => match message {
                Message::Quit => self.quit(),
                Message::MoveLeft => {
                    if let Some(form) = self.form.as_mut() {
                        form.cycle(false);
                    }
                }
                Message::MoveRight => {
                    if let Some(form) = self.form.as_mut() {
                        form.cycle(true);
                    }
                }
                Message::MoveUp | Message::MoveDown => {
                    if let Some(form) = self.form.as_mut() {
                        form.focus_next();
                    }
                }
                Message::Enter => self.submit_appearance(),
                Message::Exit => {
                    self.form = None;
                    self.modus = self.previous_modus;
                }
                Message::Resize(_, height) => self.resize(height),
                _ => (),
            },
            Modus::POPUP => match message {
                Message::Quit => self.quit(),
                Message::Enter | Message::Exit | Message::Help => {
                    self.modus = self.previous_modus;
                }
                Message::Resize(_, height) => self.resize(height),
                _ => (),
            },
        }
        self.update_uidata();
        Ok(())
    }

    // -------------------- Control handling functions ---------------------- //

    fn enter_search(&mut self) {
        self.previous_modus = self.modus;
        self.modus = Modus::SEARCH;
        self.toolbar.search.clear();
        if let Some(crate::table_state::FilterValue::Text(term)) =
            self.table.filter_value("document")
        {
            let term = term.clone();
            self.toolbar.search.set(&term);
        }
    }

    /// Every keystroke writes the current input through to the "document"
    /// column filter; there is no debouncing.
    fn search_input(&mut self, key: KeyEvent) {
        let result = self.toolbar.search.read(key);
        self.toolbar.apply_search(&mut self.table);
        self.clamp_selection();
        if result.finished {
            self.modus = self.previous_modus;
            if result.canceled {
                self.set_status_message("Search cleared");
            }
        }
    }

    fn open_appearance(&mut self) {
        self.form = Some(AppearanceForm::new(&self.applied, self.store.as_ref()));
        self.previous_modus = self.modus;
        self.modus = Modus::APPEARANCE;
    }

    fn submit_appearance(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match form.submit(self.store.as_mut(), &mut self.applied) {
            Ok(Some(settings)) => {
                self.applied.font = settings.font;
                self.form = None;
                self.modus = self.previous_modus;
                self.set_status_message(
                    "Appearance settings updated. Your preferences have been saved and applied.",
                );
            }
            Ok(None) => {
                // Field errors stay visible in the form
            }
            Err(e) => {
                warn!("Saving appearance settings failed: {e:?}");
                self.set_status_message("Could not save appearance settings");
            }
        }
    }

    fn export(&mut self) {
        let csv = export_csv(&self.table, FIELDS);
        let nrows = csv.lines().count().saturating_sub(1);
        match Clipboard::new().and_then(|mut cb| cb.set_text(csv)) {
            Ok(_) => {
                info!("Exported {nrows} rows to clipboard");
                self.set_status_message(format!("Exported {nrows} documents to clipboard"));
            }
            Err(e) => {
                warn!("Error copying to clipboard: {e:?}");
                self.set_status_message("Clipboard unavailable");
            }
        }
    }

    fn sort_selected_column(&mut self, ascending: bool) {
        let defs = self.visible_defs();
        let Some(def) = defs.get(self.cursor_col) else {
            return;
        };
        if !def.sortable {
            let title = def.title;
            self.set_status_message(format!("\"{title}\" does not sort"));
            return;
        }
        let (id, title) = (def.id, def.title);
        self.table.sort_by(id, ascending);
        self.set_status_message(format!(
            "Sorted by {} ({})",
            title,
            if ascending { "ascending" } else { "descending" }
        ));
    }

    fn resize(&mut self, height: usize) {
        self.table_height =
            height.saturating_sub(TOOLBAR_HEIGHT + TABLE_HEADER_HEIGHT + STATUSLINE_HEIGHT);
        self.clamp_selection();
    }

    fn visible_defs(&self) -> Vec<&'static ColumnDef> {
        COLUMNS
            .iter()
            .filter(|c| self.table.is_column_visible(c.id))
            .collect()
    }

    fn hideable_columns(&self) -> Vec<&'static ColumnDef> {
        COLUMNS.iter().filter(|c| c.hideable).collect()
    }

    fn move_column_cursor(&mut self, delta: isize) {
        let len = self.visible_defs().len() as isize;
        if len == 0 {
            return;
        }
        self.cursor_col = (self.cursor_col as isize + delta).rem_euclid(len) as usize;
    }

    fn clamp_selection(&mut self) {
        let nrows = self.table.visible_rows().len();
        if nrows == 0 {
            self.cursor_row = 0;
            self.offset_row = 0;
            return;
        }
        if self.offset_row >= nrows {
            self.offset_row = nrows.saturating_sub(self.table_height.max(1));
        }
        let window = nrows - self.offset_row;
        self.cursor_row = self.cursor_row.min(window.saturating_sub(1));
    }

    fn move_selection_up(&mut self, size: usize) {
        if self.cursor_row > 0 {
            self.cursor_row = self.cursor_row.saturating_sub(size);
        } else {
            self.offset_row = self.offset_row.saturating_sub(size);
        }
    }

    fn move_selection_down(&mut self, size: usize) {
        let nrows = self.table.visible_rows().len();
        if nrows == 0 {
            return;
        }
        let height = self.table_height.max(1);
        if self.cursor_row + self.offset_row + 1 < nrows {
            if self.cursor_row + 1 < height {
                let window_max = nrows.saturating_sub(self.offset_row + 1).min(height - 1);
                self.cursor_row = (self.cursor_row + size).min(window_max);
            } else {
                self.offset_row = (self.offset_row + size).min(nrows.saturating_sub(height));
            }
        }
    }

    fn move_selection_end(&mut self) {
        let nrows = self.table.visible_rows().len();
        let height = self.table_height.max(1);
        if nrows <= height {
            self.offset_row = 0;
            self.cursor_row = nrows.saturating_sub(1);
        } else {
            self.offset_row = nrows - height;
            self.cursor_row = height - 1;
        }
    }

    // -------------------- UIData snapshot ---------------------- //

    fn update_uidata(&mut self) {
        let defs = self.visible_defs();
        let visible = self.table.visible_rows();
        let rbegin = self.offset_row.min(visible.len());
        let rend = (rbegin + self.table_height.max(1)).min(visible.len());

        let window: Vec<Vec<Cell>> = visible[rbegin..rend]
            .iter()
            .map(|&ridx| {
                let rec = &self.table.rows()[ridx];
                defs.iter().map(|def| (def.cell)(rec)).collect()
            })
            .collect();

        let header: Vec<(String, usize)> = defs
            .iter()
            .enumerate()
            .map(|(cidx, def)| {
                let content_width = window
                    .iter()
                    .map(|row| {
                        let cell = &row[cidx];
                        cell.text.chars().count() + if cell.icon.is_some() { 2 } else { 0 }
                    })
                    .max()
                    .unwrap_or(0);
                let width = content_width
                    .max(def.title.chars().count())
                    .min(self.config.max_column_width)
                    + COLUMN_WIDTH_MARGIN;
                (def.title.to_string(), width)
            })
            .collect();

        let selected_row = self.cursor_row.min(window.len().saturating_sub(1));
        let hint = window
            .get(selected_row)
            .and_then(|row| row.get(self.cursor_col.min(defs.len().saturating_sub(1))))
            .map(|cell| cell.hint.clone())
            .unwrap_or_default();

        let facet_chips = self
            .toolbar
            .available_facets(&self.table)
            .into_iter()
            .map(|facet| {
                let selected = match self.table.filter_value(facet.column_id()) {
                    Some(crate::table_state::FilterValue::Set(values)) => values.len(),
                    _ => 0,
                };
                (facet.title().to_string(), selected)
            })
            .collect();

        self.uidata = UIData {
            title: "Documents".to_string(),
            search: self.toolbar.search.get(),
            searching: self.modus == Modus::SEARCH,
            facet_chips,
            is_filtered: self.table.is_filtered(),
            add_icon: self.toolbar.add.action.icon(),
            add_title: self.toolbar.add.title.clone(),
            header,
            rows: window,
            nrows_visible: visible.len(),
            nrows_total: self.table.rows().len(),
            selected_row,
            hint,
            popup: self.popup_view(),
            status_message: self.status_message.clone(),
            last_status_message_update: self.last_status_message_update,
            theme: self.applied.theme.unwrap_or_default(),
            font: self.applied.font,
        };
    }

    fn popup_view(&self) -> PopupView {
        match self.modus {
            Modus::FACET => {
                let Some(popup) = self.toolbar.facet.as_ref() else {
                    return PopupView::None;
                };
                let options = popup
                    .facet
                    .display_options()
                    .into_iter()
                    .map(|(label, value)| FacetOptionView {
                        selected: popup.is_selected(&self.table, value),
                        count: self.table.facet_count(popup.facet.column_id(), value),
                        label,
                    })
                    .collect();
                PopupView::Facet {
                    title: popup.facet.title().to_string(),
                    options,
                    cursor: popup.cursor,
                }
            }
            Modus::VIEWOPTIONS => PopupView::ViewOptions {
                options: self
                    .hideable_columns()
                    .iter()
                    .map(|def| (def.title.to_string(), self.table.is_column_visible(def.id)))
                    .collect(),
                cursor: self.view_cursor,
            },
            Modus::DIALOG => match self.toolbar.add.dialog() {
                Some(dialog) => PopupView::Dialog {
                    icon: dialog.action.icon(),
                    prompt: dialog.prompt(),
                },
                None => PopupView::None,
            },
            Modus::APPEARANCE => match self.form.as_ref() {
                Some(form) => PopupView::Appearance {
                    font: form.font_choice.clone(),
                    theme: form.theme_choice.clone(),
                    focus_font: form.focus == FormField::Font,
                    font_error: form.errors.font.clone(),
                    theme_error: form.errors.theme.clone(),
                },
                None => PopupView::None,
            },
            Modus::POPUP => PopupView::Help(HELP_TEXT.to_string()),
            _ => PopupView::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::sample_records;
    use crate::table_state::FilterValue;
    use crate::toolbar::Facet;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    fn model() -> Model {
        let config = DvConfig::default();
        let mut m = Model::init(&config, 40).expect("model init");
        // In-memory settings keep tests off the real config dir
        m.store = Box::new(MemoryStore::default());
        m.applied = AppliedAppearance { theme: None, font: Font::Sans };
        m.table.set_rows(sample_records());
        m.update_uidata();
        m
    }

    fn key(m: &mut Model, code: KeyCode) {
        m.update(Message::RawKey(KeyEvent::new(code, KeyModifiers::NONE)))
            .expect("update");
    }

    #[test]
    fn search_filters_on_every_keystroke() {
        let mut m = model();
        m.update(Message::Search).unwrap();
        assert!(m.raw_keyevents());
        key(&mut m, KeyCode::Char('b'));
        key(&mut m, KeyCode::Char('u'));
        key(&mut m, KeyCode::Char('d'));
        // Filter already active before the input is confirmed
        assert_eq!(m.get_uidata().nrows_visible, 1);
        key(&mut m, KeyCode::Enter);
        assert!(!m.raw_keyevents());
        assert!(m.get_uidata().is_filtered);
    }

    #[test]
    fn facet_popup_toggles_and_reset_clears() {
        let mut m = model();
        m.update(Message::OpenFacet(Facet::Status)).unwrap();
        m.update(Message::Enter).unwrap(); // select "pending"
        assert_eq!(
            m.table.filter_value("status"),
            Some(&FilterValue::Set(vec!["pending".into()]))
        );
        m.update(Message::Exit).unwrap();
        assert_eq!(m.get_uidata().nrows_visible, 2);
        assert!(m.get_uidata().is_filtered);
        m.update(Message::ResetFilters).unwrap();
        assert!(!m.get_uidata().is_filtered);
        assert_eq!(m.get_uidata().nrows_visible, 5);
    }

    #[test]
    fn add_dialog_exists_only_while_open() {
        let mut m = model();
        assert!(m.toolbar.add.dialog().is_none());
        m.update(Message::AddDocument).unwrap();
        assert!(m.toolbar.add.is_open());
        assert!(matches!(m.get_uidata().popup, PopupView::Dialog { .. }));
        m.update(Message::Exit).unwrap();
        assert!(m.toolbar.add.dialog().is_none());
        assert!(matches!(m.get_uidata().popup, PopupView::None));
    }

    #[test]
    fn appearance_submit_applies_theme_and_font() {
        let mut m = model();
        m.update(Message::Appearance).unwrap();
        {
            let form = m.form.as_mut().expect("form open");
            form.theme_choice = "dark".into();
            form.font_choice = "mono".into();
        }
        m.update(Message::Enter).unwrap();
        assert!(m.form.is_none());
        assert_eq!(m.get_uidata().theme, Theme::Dark);
        assert_eq!(m.get_uidata().font, Font::Mono);
        assert!(
            m.get_uidata()
                .status_message
                .contains("Appearance settings updated")
        );
        let stored = m.store.load().unwrap().expect("persisted");
        assert_eq!(stored.theme, Theme::Dark);
        assert_eq!(stored.font, Font::Mono);
    }

    #[test]
    fn invalid_appearance_choice_keeps_the_form_open() {
        let mut m = model();
        m.update(Message::Appearance).unwrap();
        m.form.as_mut().unwrap().theme_choice = "sepia".into();
        m.update(Message::Enter).unwrap();
        assert!(m.form.is_some());
        match &m.get_uidata().popup {
            PopupView::Appearance { theme_error, font_error, .. } => {
                assert_eq!(theme_error.as_deref(), Some("Please select a theme."));
                assert!(font_error.is_none());
            }
            _ => panic!("appearance popup expected"),
        }
        assert!(m.store.load().unwrap().is_none());
    }

    #[test]
    fn empty_visible_rows_yield_empty_uidata_rows() {
        let mut m = model();
        m.table
            .set_filter_value("status", FilterValue::Set(vec!["galactic".into()]));
        m.update_uidata();
        assert!(m.get_uidata().rows.is_empty());
        assert_eq!(m.get_uidata().nrows_total, 5);
    }

    #[test]
    fn view_options_toggle_removes_the_column() {
        let mut m = model();
        let before = m.get_uidata().header.len();
        m.update(Message::ViewOptions).unwrap();
        m.update(Message::Enter).unwrap(); // hide "Code"
        m.update(Message::Exit).unwrap();
        assert_eq!(m.get_uidata().header.len(), before - 1);
        assert!(!m.get_uidata().header.iter().any(|(t, _)| t == "Code"));
    }
}
