//! Presentation layer of a document-management dashboard, rendered in the
//! terminal: a filterable document table, its toolbar, and an appearance
//! settings form.

pub mod appearance;
pub mod columns;
pub mod controller;
pub mod domain;
pub mod inputter;
pub mod model;
pub mod record;
pub mod refdata;
pub mod table_state;
pub mod toolbar;
pub mod ui;
