//! End-to-end coverage of the dashboard's observable behavior: option
//! lists, toolbar filter wiring, column rendering, appearance persistence.

use std::borrow::Cow;

use dv::appearance::{
    AppearanceForm, AppearanceSettings, Font, JsonFileStore, MemoryStore, SettingsStore, Theme,
    ThemeSink,
};
use dv::columns::{self, MISS_PLACEHOLDER};
use dv::record::{DocumentRecord, FIELDS, load_records};
use dv::refdata::{self, ALL_SENTINEL};
use dv::table_state::{ColumnInfo, FilterValue, TableRow, TableState};
use dv::toolbar::{ActionType, AddDocumentButton, Facet, FacetPopup, Toolbar, export_csv};

fn record(code: &str, title: &str, status: &str) -> DocumentRecord {
    DocumentRecord {
        code: code.to_string(),
        origin_office: "Records".to_string(),
        title: title.to_string(),
        classification: "internal".to_string(),
        doc_type: "memo".to_string(),
        created_by: "amy".to_string(),
        date_created: "2024-03-05".to_string(),
        status: status.to_string(),
    }
}

fn document_table() -> TableState<DocumentRecord> {
    let mut state = TableState::new(columns::column_infos());
    state.set_rows(vec![
        record("DOC-1", "Budget proposal", "pending"),
        record("DOC-2", "Audit findings", "approved"),
        record("DOC-3", "Office supplies", "archived"),
    ]);
    state
}

#[test]
fn rendered_option_sets_exclude_the_sentinel() {
    for facet in [Facet::Status, Facet::Type, Facet::Classification] {
        let options = facet.display_options();
        assert!(!options.is_empty());
        assert!(options.iter().all(|(_, value)| *value != ALL_SENTINEL));
    }
}

#[test]
fn labels_are_formatted_but_values_are_not() {
    let options = Facet::Type.display_options();
    let travel = options
        .iter()
        .find(|(_, value)| *value == "travel_order")
        .expect("travel_order option");
    assert_eq!(travel.0, "travel order");
    assert_eq!(travel.1, "travel_order");
    assert_eq!(refdata::format_label("semi-annual_report"), "semi annual report");
}

#[test]
fn toolbar_renders_no_status_facet_without_a_status_column() {
    struct NamelessRow;
    impl TableRow for NamelessRow {
        fn field(&self, _column: &str) -> Option<Cow<'_, str>> {
            None
        }
    }
    let state: TableState<NamelessRow> = TableState::new(vec![ColumnInfo {
        id: "title",
        sortable: true,
        hideable: true,
        predicate: None,
    }]);
    let mut toolbar = Toolbar::new();
    assert!(!toolbar.available_facets(&state).contains(&Facet::Status));
    assert!(!toolbar.open_facet(Facet::Status, &state));
}

#[test]
fn receive_trigger_opens_dialog_with_pen_icon_and_unknown_falls_back() {
    let mut button = AddDocumentButton::new(ActionType::parse("Receive"));
    button.activate();
    assert!(button.is_open());
    assert_eq!(button.dialog().unwrap().action.icon(), "✎");

    assert_eq!(ActionType::parse("Misfile").icon(), "+");
}

#[test]
fn status_filter_set_matches_members_only() {
    let mut state = document_table();
    state.set_filter_value(
        "status",
        FilterValue::Set(vec!["pending".to_string(), "approved".to_string()]),
    );
    let visible = state.visible_rows();
    let statuses: Vec<&str> = visible
        .iter()
        .map(|&idx| state.rows()[idx].status.as_str())
        .collect();
    assert_eq!(statuses, vec!["pending", "approved"]);
}

#[test]
fn reset_clears_all_filters_and_hides_the_reset_action() {
    let mut state = document_table();
    let mut toolbar = Toolbar::new();
    toolbar.search.set("budget");
    toolbar.apply_search(&mut state);
    let popup = FacetPopup::new(Facet::Status);
    popup.toggle(&mut state);
    assert!(state.is_filtered());

    toolbar.reset(&mut state);
    assert_eq!(state.active_filter_count(), 0);
    assert!(!state.is_filtered());
    assert_eq!(state.visible_rows().len(), 3);
}

#[test]
fn metadata_miss_renders_a_placeholder_not_nothing() {
    let mut rec = record("DOC-9", "Mystery", "imaginary");
    rec.classification = "galactic".to_string();
    let status_cell = (columns::column("status").unwrap().cell)(&rec);
    let class_cell = (columns::column("classification").unwrap().cell)(&rec);
    assert_eq!(status_cell.text, MISS_PLACEHOLDER);
    assert_eq!(class_cell.text, MISS_PLACEHOLDER);
}

#[test]
fn appearance_submission_persists_and_applies_dark_mono() {
    #[derive(Default)]
    struct Sink {
        current: Option<Theme>,
        applied: Vec<Theme>,
    }
    impl ThemeSink for Sink {
        fn current_theme(&self) -> Option<Theme> {
            self.current
        }
        fn set_theme(&mut self, theme: Theme) {
            self.applied.push(theme);
        }
    }

    let mut sink = Sink::default();
    let mut store = MemoryStore::default();
    let mut form = AppearanceForm::new(&sink, &store);
    form.theme_choice = "dark".to_string();
    form.font_choice = "mono".to_string();
    let settings = form
        .submit(&mut store, &mut sink)
        .expect("store is in memory")
        .expect("valid submission");
    assert_eq!(settings, AppearanceSettings { theme: Theme::Dark, font: Font::Mono });
    assert_eq!(store.settings, Some(settings));
    assert_eq!(sink.applied, vec![Theme::Dark]);
}

#[test]
fn settings_round_trip_through_the_json_file_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = JsonFileStore::new(Some(dir.path())).expect("store");
    assert!(store.load().expect("empty load").is_none());

    let settings = AppearanceSettings { theme: Theme::Light, font: Font::Mono };
    store.save(&settings).expect("save");
    assert_eq!(store.load().expect("reload"), Some(settings));

    // Malformed content is an error, not a panic
    std::fs::write(store.path(), "{not json").expect("overwrite");
    assert!(store.load().is_err());
}

#[test]
fn csv_fixture_loads_into_typed_records() {
    let records = load_records("tests/fixtures/documents.csv".into()).expect("load fixture");
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].code, "DOC-101");
    assert_eq!(records[2].title, "Invoice batch, Q1");
    assert_eq!(records[3].status, "rejected");
}

#[test]
fn export_covers_exactly_the_visible_rows() {
    let mut state = document_table();
    state.set_filter_value("status", FilterValue::Set(vec!["archived".to_string()]));
    let csv = export_csv(&state, FIELDS);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2); // header + one matching row
    assert!(lines[1].starts_with("DOC-3"));
}
