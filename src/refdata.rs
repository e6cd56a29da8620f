//! Static reference data for document records: the selectable option lists
//! backing the faceted filters and the metadata tables used by the column
//! renderers. Option lists carry an `"all"` sentinel meaning "no filter",
//! which is stripped before anything is shown to the user.

pub const ALL_SENTINEL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOption {
    pub label: &'static str,
    pub value: &'static str,
}

pub const DOC_STATUS: &[FilterOption] = &[
    FilterOption { label: "All", value: ALL_SENTINEL },
    FilterOption { label: "pending", value: "pending" },
    FilterOption { label: "approved", value: "approved" },
    FilterOption { label: "for_release", value: "for_release" },
    FilterOption { label: "released", value: "released" },
    FilterOption { label: "rejected", value: "rejected" },
    FilterOption { label: "archived", value: "archived" },
];

pub const DOC_TYPES: &[FilterOption] = &[
    FilterOption { label: "All", value: ALL_SENTINEL },
    FilterOption { label: "memo", value: "memo" },
    FilterOption { label: "letter", value: "letter" },
    FilterOption { label: "report", value: "report" },
    FilterOption { label: "invoice", value: "invoice" },
    FilterOption { label: "travel_order", value: "travel_order" },
    FilterOption { label: "endorsement", value: "endorsement" },
];

pub const DOC_CLASSIFICATION: &[FilterOption] = &[
    FilterOption { label: "All", value: ALL_SENTINEL },
    FilterOption { label: "public", value: "public" },
    FilterOption { label: "internal", value: "internal" },
    FilterOption { label: "confidential", value: "confidential" },
    FilterOption { label: "top_secret", value: "top_secret" },
];

/// The option list with the `"all"` sentinel excluded. Every selectable
/// surface goes through this.
pub fn selectable(options: &'static [FilterOption]) -> impl Iterator<Item = &'static FilterOption> {
    options.iter().filter(|o| o.value != ALL_SENTINEL)
}

/// Display formatting only: underscores and hyphens become spaces. The
/// underlying filter value is never touched.
pub fn format_label(label: &str) -> String {
    label.replace(['_', '-'], " ")
}

#[derive(Debug, Clone, Copy)]
pub struct StatusMeta {
    pub value: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct ClassificationMeta {
    pub value: &'static str,
    pub label: &'static str,
}

pub const STATUS_META: &[StatusMeta] = &[
    StatusMeta { value: "pending", label: "Pending", icon: "◌" },
    StatusMeta { value: "approved", label: "Approved", icon: "✓" },
    StatusMeta { value: "for_release", label: "For Release", icon: "➤" },
    StatusMeta { value: "released", label: "Released", icon: "▷" },
    StatusMeta { value: "rejected", label: "Rejected", icon: "✗" },
    StatusMeta { value: "archived", label: "Archived", icon: "▤" },
];

pub const CLASSIFICATION_META: &[ClassificationMeta] = &[
    ClassificationMeta { value: "public", label: "Public" },
    ClassificationMeta { value: "internal", label: "Internal" },
    ClassificationMeta { value: "confidential", label: "Confidential" },
    ClassificationMeta { value: "top_secret", label: "Top Secret" },
];

/// Lookup by stored value. A miss is an explicit `None` so callers can
/// render a placeholder instead of dropping the cell.
pub fn status_meta(value: &str) -> Option<&'static StatusMeta> {
    STATUS_META.iter().find(|m| m.value == value)
}

pub fn classification_meta(value: &str) -> Option<&'static ClassificationMeta> {
    CLASSIFICATION_META.iter().find(|m| m.value == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectable_excludes_the_all_sentinel() {
        for options in [DOC_STATUS, DOC_TYPES, DOC_CLASSIFICATION] {
            assert!(options.iter().any(|o| o.value == ALL_SENTINEL));
            assert!(selectable(options).all(|o| o.value != ALL_SENTINEL));
            assert_eq!(selectable(options).count(), options.len() - 1);
        }
    }

    #[test]
    fn format_label_replaces_separators_only_in_display() {
        assert_eq!(format_label("for_release"), "for release");
        assert_eq!(format_label("travel-order"), "travel order");
        assert_eq!(format_label("memo"), "memo");
        // The option value is untouched by display formatting
        let opt = DOC_STATUS.iter().find(|o| o.value == "for_release").unwrap();
        assert_eq!(opt.value, "for_release");
    }

    #[test]
    fn metadata_lookup_hits_and_misses() {
        let approved = status_meta("approved").expect("approved meta");
        assert_eq!(approved.label, "Approved");
        assert_eq!(approved.icon, "✓");
        assert!(status_meta("galactic").is_none());

        assert_eq!(classification_meta("top_secret").unwrap().label, "Top Secret");
        assert!(classification_meta("unclassified").is_none());
    }
}
