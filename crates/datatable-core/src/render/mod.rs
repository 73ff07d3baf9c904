//! Rendering boundary: compiled rows plus column metadata into presentation
//! output.

mod escape;
mod html;


use crate::model::{Column, SortKey, TableSpec};

pub use escape::{escape_html, percent_encode};
pub use html::HtmlTableRenderer;

///
/// TableView
///
/// Everything a renderer receives for one table: presentation classes,
/// ordered columns with their types, headers, the active sort, and text rows.
///

#[derive(Clone, Copy, Debug)]
pub struct TableView<'a> {
    pub classes: &'a str,
    pub columns: &'a [Column],
    pub headers: &'a [String],
    pub sort: Option<&'a SortKey>,
    pub rows: &'a [Vec<String>],
}

impl<'a> TableView<'a> {
    #[must_use]
    pub fn new(spec: &'a TableSpec, sort: Option<&'a SortKey>, rows: &'a [Vec<String>]) -> Self {
        Self {
            classes: &spec.classes,
            columns: &spec.columns,
            headers: &spec.headers,
            sort,
            rows,
        }
    }

    /// Active sort for `key`, if the table is currently sorted by it.
    #[must_use]
    pub fn sort_for(&self, key: &str) -> Option<&'a SortKey> {
        self.sort.filter(|sort| sort.key == key)
    }
}

///
/// TableRenderer
///

pub trait TableRenderer {
    fn render(&self, view: &TableView<'_>) -> String;
}
