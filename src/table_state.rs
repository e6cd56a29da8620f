//! Generic table state shared by the toolbar and the column definition set:
//! which columns exist, which filters are active, which rows survive them.
//! All filter mutations write through synchronously; there is no caching of
//! filter values outside this struct.

use std::borrow::Cow;
use std::collections::HashSet;
use tracing::trace;

/// Capability constraint on row types: named, independently readable
/// columns. Filter-only columns (ones no column definition renders) may be
/// exposed here too.
pub trait TableRow {
    fn field(&self, column: &str) -> Option<Cow<'_, str>>;
}

/// One column's active filter. An absent entry means "no filter"; setting an
/// empty value clears the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// Case-insensitive substring match.
    Text(String),
    /// Multi-select membership match.
    Set(Vec<String>),
}

impl FilterValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(s) => s.is_empty(),
            FilterValue::Set(v) => v.is_empty(),
        }
    }
}

/// Filtering identity of one column. Rendering lives in the column
/// definition set; this is only what the table state needs.
pub struct ColumnInfo<R> {
    pub id: &'static str,
    pub sortable: bool,
    pub hideable: bool,
    /// Custom filter predicate; `None` falls back to the default match on
    /// the row's field value.
    pub predicate: Option<fn(&R, &FilterValue) -> bool>,
}

pub struct TableState<R: TableRow> {
    rows: Vec<R>,
    columns: Vec<ColumnInfo<R>>,
    filters: Vec<(&'static str, FilterValue)>,
    hidden: HashSet<&'static str>,
    sort: Option<(&'static str, bool)>,
}

impl<R: TableRow> TableState<R> {
    pub fn new(columns: Vec<ColumnInfo<R>>) -> Self {
        Self {
            rows: Vec::new(),
            columns,
            filters: Vec::new(),
            hidden: HashSet::new(),
            sort: None,
        }
    }

    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// The column handle, present only when the caller configuration
    /// declares the column. Guards every filter surface against columns
    /// that are absent on this table.
    pub fn column(&self, id: &str) -> Option<&ColumnInfo<R>> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn filter_value(&self, id: &str) -> Option<&FilterValue> {
        self.filters.iter().find(|(fid, _)| *fid == id).map(|(_, v)| v)
    }

    pub fn set_filter_value(&mut self, id: &str, value: FilterValue) {
        let Some(column) = self.columns.iter().find(|c| c.id == id) else {
            trace!("Ignoring filter for unknown column \"{id}\"");
            return;
        };
        let id = column.id;
        self.filters.retain(|(fid, _)| *fid != id);
        if !value.is_empty() {
            self.filters.push((id, value));
        }
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.len()
    }

    pub fn is_filtered(&self) -> bool {
        !self.filters.is_empty()
    }

    pub fn reset_column_filters(&mut self) {
        self.filters.clear();
    }

    pub fn toggle_column_visibility(&mut self, id: &str) {
        let Some(column) = self.columns.iter().find(|c| c.id == id && c.hideable) else {
            return;
        };
        if !self.hidden.remove(column.id) {
            self.hidden.insert(column.id);
        }
    }

    pub fn is_column_visible(&self, id: &str) -> bool {
        !self.hidden.contains(id)
    }

    pub fn sort_by(&mut self, id: &str, ascending: bool) {
        if let Some(column) = self.columns.iter().find(|c| c.id == id && c.sortable) {
            self.sort = Some((column.id, ascending));
        }
    }

    pub fn sort(&self) -> Option<(&'static str, bool)> {
        self.sort
    }

    fn row_passes(&self, row: &R, except: Option<&str>) -> bool {
        self.filters.iter().all(|(id, value)| {
            if Some(*id) == except {
                return true;
            }
            let predicate = self
                .columns
                .iter()
                .find(|c| c.id == *id)
                .and_then(|c| c.predicate);
            match predicate {
                Some(p) => p(row, value),
                None => default_match(row, id, value),
            }
        })
    }

    /// Indices of rows passing every active filter, in current sort order.
    pub fn visible_rows(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| self.row_passes(row, None))
            .map(|(idx, _)| idx)
            .collect();

        if let Some((id, ascending)) = self.sort {
            indices.sort_by(|&a, &b| {
                let va = self.rows[a].field(id).unwrap_or_default();
                let vb = self.rows[b].field(id).unwrap_or_default();
                if ascending { va.cmp(&vb) } else { vb.cmp(&va) }
            });
        }
        indices
    }

    /// Count of rows carrying `value` in `id`, evaluated against the other
    /// active filters. Backs the facet option badges.
    pub fn facet_count(&self, id: &str, value: &str) -> usize {
        self.rows
            .iter()
            .filter(|row| self.row_passes(row, Some(id)))
            .filter(|row| row.field(id).as_deref() == Some(value))
            .count()
    }
}

fn default_match<R: TableRow>(row: &R, id: &str, value: &FilterValue) -> bool {
    let Some(field) = row.field(id) else {
        return false;
    };
    match value {
        FilterValue::Text(term) => field.to_lowercase().contains(&term.to_lowercase()),
        FilterValue::Set(values) => values.iter().any(|v| v == field.as_ref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: &'static str,
        status: &'static str,
    }

    impl TableRow for Row {
        fn field(&self, column: &str) -> Option<Cow<'_, str>> {
            match column {
                "name" => Some(Cow::Borrowed(self.name)),
                "status" => Some(Cow::Borrowed(self.status)),
                _ => None,
            }
        }
    }

    fn state() -> TableState<Row> {
        let mut st = TableState::new(vec![
            ColumnInfo { id: "name", sortable: true, hideable: true, predicate: None },
            ColumnInfo { id: "status", sortable: true, hideable: true, predicate: None },
        ]);
        st.set_rows(vec![
            Row { name: "alpha", status: "pending" },
            Row { name: "Beta", status: "approved" },
            Row { name: "gamma", status: "archived" },
        ]);
        st
    }

    #[test]
    fn text_filter_is_case_insensitive_substring() {
        let mut st = state();
        st.set_filter_value("name", FilterValue::Text("bet".into()));
        assert_eq!(st.visible_rows(), vec![1]);
    }

    #[test]
    fn set_filter_matches_membership() {
        let mut st = state();
        st.set_filter_value(
            "status",
            FilterValue::Set(vec!["pending".into(), "approved".into()]),
        );
        assert_eq!(st.visible_rows(), vec![0, 1]);
    }

    #[test]
    fn unknown_columns_are_guarded() {
        let mut st = state();
        assert!(st.column("classification").is_none());
        st.set_filter_value("classification", FilterValue::Text("x".into()));
        assert_eq!(st.active_filter_count(), 0);
        assert_eq!(st.visible_rows().len(), 3);
    }

    #[test]
    fn empty_values_clear_the_filter() {
        let mut st = state();
        st.set_filter_value("name", FilterValue::Text("a".into()));
        assert!(st.is_filtered());
        st.set_filter_value("name", FilterValue::Text(String::new()));
        assert!(!st.is_filtered());
    }

    #[test]
    fn reset_clears_every_column_filter() {
        let mut st = state();
        st.set_filter_value("name", FilterValue::Text("a".into()));
        st.set_filter_value("status", FilterValue::Set(vec!["pending".into()]));
        assert_eq!(st.active_filter_count(), 2);
        st.reset_column_filters();
        assert_eq!(st.active_filter_count(), 0);
        assert!(!st.is_filtered());
    }

    #[test]
    fn facet_counts_respect_the_other_filters() {
        let mut st = state();
        assert_eq!(st.facet_count("status", "pending"), 1);
        st.set_filter_value("name", FilterValue::Text("gamma".into()));
        // Only gamma passes the name filter, and its status is archived.
        assert_eq!(st.facet_count("status", "pending"), 0);
        assert_eq!(st.facet_count("status", "archived"), 1);
        // The facet's own column is exempt from its count.
        st.set_filter_value("status", FilterValue::Set(vec!["pending".into()]));
        assert_eq!(st.facet_count("status", "archived"), 1);
    }

    #[test]
    fn sorting_orders_visible_rows() {
        let mut st = state();
        st.sort_by("name", true);
        assert_eq!(st.visible_rows(), vec![1, 0, 2]); // "Beta" < "alpha" < "gamma"
        st.sort_by("name", false);
        assert_eq!(st.visible_rows(), vec![2, 0, 1]);
    }
}
