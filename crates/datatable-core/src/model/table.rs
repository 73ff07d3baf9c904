use crate::model::{Column, ColumnType, Filter, SortKey};
use serde::Serialize;

///
/// TableSpec
///
/// Normalized form of one directive occurrence. Built fresh per render pass
/// and read-only once handed to the compiler.
///
/// `headers[i]` labels `columns[i]`; the parser guarantees equal lengths.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct TableSpec {
    pub classes: String,
    pub columns: Vec<Column>,
    pub headers: Vec<String>,
    pub sort: Option<SortKey>,
    pub filters: Vec<Filter>,
}

impl TableSpec {
    #[must_use]
    pub fn new(classes: impl Into<String>) -> Self {
        Self {
            classes: classes.into(),
            ..Self::default()
        }
    }

    pub fn column_keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.key.as_str())
    }

    /// Insert a column, or retype an existing one in place.
    /// A re-declared key keeps its original position.
    pub(crate) fn upsert_column(&mut self, key: String, ty: ColumnType) {
        match self.columns.iter_mut().find(|column| column.key == key) {
            Some(column) => column.ty = ty,
            None => self.columns.push(Column { key, ty }),
        }
    }

    /// Column keys as headers, with the identity column relabeled.
    #[must_use]
    pub fn default_headers(&self, sentinel: &str, page_name_label: &str) -> Vec<String> {
        self.column_keys()
            .map(|key| {
                if key == sentinel {
                    page_name_label.to_string()
                } else {
                    key.to_string()
                }
            })
            .collect()
    }
}
