//! Toolbar over the document table: free-text search, faceted filters,
//! reset, export, the add-document trigger and column view options. Works
//! against any row type the table state holds; every control writes through
//! to the shared state synchronously.

use tracing::{debug, trace};

use crate::inputter::Inputter;
use crate::refdata::{self, FilterOption};
use crate::table_state::{FilterValue, TableRow, TableState};

/// The three faceted filters the toolbar knows about. Each renders only if
/// its column exists on the current table state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Status,
    Type,
    Classification,
}

impl Facet {
    pub fn column_id(self) -> &'static str {
        match self {
            Facet::Status => "status",
            Facet::Type => "type",
            Facet::Classification => "classification",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Facet::Status => "Status",
            Facet::Type => "Type",
            Facet::Classification => "Classification",
        }
    }

    pub fn options(self) -> &'static [FilterOption] {
        match self {
            Facet::Status => refdata::DOC_STATUS,
            Facet::Type => refdata::DOC_TYPES,
            Facet::Classification => refdata::DOC_CLASSIFICATION,
        }
    }

    /// Selectable options with the sentinel excluded and labels formatted
    /// for display. Values stay untouched.
    pub fn display_options(self) -> Vec<(String, &'static str)> {
        refdata::selectable(self.options())
            .map(|o| (refdata::format_label(o.label), o.value))
            .collect()
    }
}

/// Open faceted-filter popup: which facet and which option the cursor is on.
pub struct FacetPopup {
    pub facet: Facet,
    pub cursor: usize,
}

impl FacetPopup {
    pub fn new(facet: Facet) -> Self {
        Self { facet, cursor: 0 }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.facet.display_options().len();
        if len == 0 {
            return;
        }
        let cur = self.cursor as isize + delta;
        self.cursor = cur.rem_euclid(len as isize) as usize;
    }

    /// Toggles the option under the cursor in the column's filter set and
    /// writes the new set through.
    pub fn toggle<R: TableRow>(&self, state: &mut TableState<R>) {
        let options = self.facet.display_options();
        let Some((_, value)) = options.get(self.cursor) else {
            return;
        };
        let id = self.facet.column_id();
        let mut selected: Vec<String> = match state.filter_value(id) {
            Some(FilterValue::Set(values)) => values.clone(),
            _ => Vec::new(),
        };
        if let Some(pos) = selected.iter().position(|v| v == value) {
            selected.remove(pos);
        } else {
            selected.push((*value).to_string());
        }
        trace!("Facet {:?} -> {:?}", self.facet, selected);
        state.set_filter_value(id, FilterValue::Set(selected));
    }

    pub fn is_selected<R: TableRow>(&self, state: &TableState<R>, value: &str) -> bool {
        matches!(
            state.filter_value(self.facet.column_id()),
            Some(FilterValue::Set(values)) if values.iter().any(|v| v == value)
        )
    }
}

/// Discriminant for the add-document trigger. Unrecognized names fall back
/// to `Create` when parsed from caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionType {
    #[default]
    Create,
    Receive,
    Release,
}

impl ActionType {
    pub fn parse(name: &str) -> Self {
        match name {
            "Receive" => ActionType::Receive,
            "Release" => ActionType::Release,
            "Create" => ActionType::Create,
            other => {
                debug!("Unknown action type \"{other}\", falling back to Create");
                ActionType::Create
            }
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ActionType::Create => "+",
            ActionType::Receive => "✎",
            ActionType::Release => "➤",
        }
    }
}

/// The creation dialog. Exists only while open; dropped on close.
pub struct AddDocumentDialog {
    pub action: ActionType,
}

impl AddDocumentDialog {
    pub fn prompt(&self) -> String {
        format!("{:?} a new document", self.action)
    }
}

/// Button that opens the creation dialog, optionally firing a caller
/// supplied callback first. Exposes no result value.
pub struct AddDocumentButton {
    pub title: String,
    pub action: ActionType,
    on_add: Option<Box<dyn FnMut()>>,
    dialog: Option<AddDocumentDialog>,
}

impl AddDocumentButton {
    pub fn new(action: ActionType) -> Self {
        Self {
            title: "Add".to_string(),
            action,
            on_add: None,
            dialog: None,
        }
    }

    pub fn with_on_add(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_add = Some(Box::new(f));
        self
    }

    /// Callback first, then the dialog opens.
    pub fn activate(&mut self) {
        if let Some(on_add) = self.on_add.as_mut() {
            on_add();
        }
        self.dialog = Some(AddDocumentDialog { action: self.action });
    }

    pub fn close(&mut self) {
        self.dialog = None;
    }

    pub fn dialog(&self) -> Option<&AddDocumentDialog> {
        self.dialog.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.dialog.is_some()
    }
}

pub struct Toolbar {
    pub search: Inputter,
    pub add: AddDocumentButton,
    pub facet: Option<FacetPopup>,
    pub view_cursor: usize,
}

impl Toolbar {
    pub fn new() -> Self {
        Self {
            search: Inputter::default(),
            add: AddDocumentButton::new(ActionType::Create),
            facet: None,
            view_cursor: 0,
        }
    }

    /// Writes the current search input through to the "document" column
    /// filter. Called on every keystroke.
    pub fn apply_search<R: TableRow>(&self, state: &mut TableState<R>) {
        state.set_filter_value("document", FilterValue::Text(self.search.get().input));
    }

    /// Facets to render: only those whose column is present on this table.
    pub fn available_facets<R: TableRow>(&self, state: &TableState<R>) -> Vec<Facet> {
        [Facet::Status, Facet::Type, Facet::Classification]
            .into_iter()
            .filter(|f| state.column(f.column_id()).is_some())
            .collect()
    }

    pub fn open_facet<R: TableRow>(&mut self, facet: Facet, state: &TableState<R>) -> bool {
        if state.column(facet.column_id()).is_none() {
            trace!("Facet {:?} has no column on this table", facet);
            return false;
        }
        self.facet = Some(FacetPopup::new(facet));
        true
    }

    pub fn close_facet(&mut self) {
        self.facet = None;
    }

    pub fn reset<R: TableRow>(&mut self, state: &mut TableState<R>) {
        state.reset_column_filters();
        self.search.clear();
    }
}

/// CSV export of the rows passing the current filters, columns in field
/// order. The result goes to the clipboard.
pub fn export_csv<R: TableRow>(state: &TableState<R>, fields: &[&str]) -> String {
    let mut out = String::new();
    out.push_str(&fields.join(","));
    out.push('\n');
    for idx in state.visible_rows() {
        let row = &state.rows()[idx];
        let line = fields
            .iter()
            .map(|f| wrap_cell_content(row.field(f).unwrap_or_default().as_ref()))
            .collect::<Vec<String>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn wrap_cell_content(c: &str) -> String {
    let needs_escaping = c.chars().any(|c| c == '"');
    let needs_wrapping = c.chars().any(|c| c == ' ' || c == '\t' || c == ',');
    let mut out = String::from(c);

    if needs_escaping {
        out = out.replace("\"", "\"\"");
    }
    if needs_wrapping || needs_escaping {
        out = format!("\"{out}\"");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::column_infos;
    use crate::record::{FIELDS, sample_records};
    use crate::table_state::ColumnInfo;
    use std::borrow::Cow;
    use std::cell::Cell as StdCell;
    use std::rc::Rc;

    fn document_state() -> TableState<crate::record::DocumentRecord> {
        let mut st = TableState::new(column_infos());
        st.set_rows(sample_records());
        st
    }

    #[test]
    fn facet_labels_are_formatted_values_are_not() {
        let opts = Facet::Status.display_options();
        let for_release = opts.iter().find(|(_, v)| *v == "for_release").unwrap();
        assert_eq!(for_release.0, "for release");
        assert_eq!(for_release.1, "for_release");
        assert!(opts.iter().all(|(_, v)| *v != refdata::ALL_SENTINEL));
    }

    #[test]
    fn facets_are_hidden_when_their_column_is_absent() {
        struct Bare;
        impl TableRow for Bare {
            fn field(&self, _column: &str) -> Option<Cow<'_, str>> {
                None
            }
        }
        let state: TableState<Bare> = TableState::new(vec![ColumnInfo {
            id: "title",
            sortable: false,
            hideable: false,
            predicate: None,
        }]);
        let mut toolbar = Toolbar::new();
        assert!(toolbar.available_facets(&state).is_empty());
        assert!(!toolbar.open_facet(Facet::Status, &state));
        assert!(toolbar.facet.is_none());
    }

    #[test]
    fn facet_toggle_writes_through_and_untoggles() {
        let mut state = document_state();
        let mut popup = FacetPopup::new(Facet::Status);
        popup.toggle(&mut state); // first selectable option: pending
        assert_eq!(
            state.filter_value("status"),
            Some(&FilterValue::Set(vec!["pending".into()]))
        );
        popup.cursor = 1; // approved
        popup.toggle(&mut state);
        assert_eq!(state.visible_rows().len(), 3);
        popup.toggle(&mut state); // untoggle approved
        assert_eq!(
            state.filter_value("status"),
            Some(&FilterValue::Set(vec!["pending".into()]))
        );
        popup.cursor = 0;
        popup.toggle(&mut state); // untoggle pending clears the filter
        assert!(state.filter_value("status").is_none());
    }

    #[test]
    fn search_writes_through_on_every_keystroke() {
        let mut state = document_state();
        let mut toolbar = Toolbar::new();
        toolbar.search.set("budget");
        toolbar.apply_search(&mut state);
        assert_eq!(state.visible_rows(), vec![0]);
        toolbar.search.set("");
        toolbar.apply_search(&mut state);
        assert_eq!(state.visible_rows().len(), 5);
    }

    #[test]
    fn reset_hides_the_reset_affordance() {
        let mut state = document_state();
        let mut toolbar = Toolbar::new();
        toolbar.search.set("DOC-001");
        toolbar.apply_search(&mut state);
        state.set_filter_value("status", FilterValue::Set(vec!["pending".into()]));
        assert!(state.is_filtered());
        toolbar.reset(&mut state);
        assert!(!state.is_filtered());
        assert_eq!(state.visible_rows().len(), 5);
    }

    #[test]
    fn action_type_icons_and_fallback() {
        assert_eq!(ActionType::parse("Receive").icon(), "✎");
        assert_eq!(ActionType::parse("Release").icon(), "➤");
        assert_eq!(ActionType::parse("Transmogrify").icon(), "+");
    }

    #[test]
    fn activation_fires_callback_then_opens_dialog() {
        let fired = Rc::new(StdCell::new(false));
        let flag = Rc::clone(&fired);
        let mut button =
            AddDocumentButton::new(ActionType::Receive).with_on_add(move || flag.set(true));
        assert!(!button.is_open());
        button.activate();
        assert!(fired.get());
        assert!(button.is_open());
        assert_eq!(button.dialog().unwrap().action, ActionType::Receive);
        button.close();
        assert!(button.dialog().is_none());
    }

    #[test]
    fn export_quotes_embedded_commas_and_quotes() {
        assert_eq!(wrap_cell_content("plain"), "plain");
        assert_eq!(wrap_cell_content("a,b"), "\"a,b\"");
        assert_eq!(wrap_cell_content("say \"hi\""), "\"say \"\"hi\"\"\"");

        let mut state = document_state();
        state.set_filter_value("status", FilterValue::Set(vec!["rejected".into()]));
        let csv = export_csv(&state, FIELDS);
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap().split(',').count(), FIELDS.len());
        assert!(lines.next().unwrap().starts_with("DOC-004"));
        assert!(lines.next().is_none());
    }
}
