//! De-duplicating string concatenation, as a pure accumulator and as a
//! SQLite aggregate function.
//!
//! SQLite owns one `DedupConcat` per group for the duration of a single
//! statement; nothing is retained across queries.

use crate::exec::value_text;
use rusqlite::{
    Connection,
    functions::{Aggregate, Context, FunctionFlags},
};
use std::collections::HashSet;

/// Separator used when a row does not supply one.
pub const DEFAULT_SEPARATOR: &str = ",";

///
/// DedupConcat
///
/// Per-group accumulator: values in arrival order, duplicates included,
/// until `finalize` removes repeats and joins the rest.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DedupConcat {
    separator: Option<String>,
    values: Vec<String>,
}

impl DedupConcat {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one contributing row. The separator is assumed constant per
    /// group; the last one seen wins.
    pub fn accumulate(&mut self, value: impl Into<String>, separator: &str) {
        if self.separator.as_deref() != Some(separator) {
            self.separator = Some(separator.to_string());
        }
        self.values.push(value.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Join unique values in first-occurrence order. Equality is exact.
    #[must_use]
    pub fn finalize(self) -> String {
        let mut seen = HashSet::with_capacity(self.values.len());
        let unique: Vec<&str> = self
            .values
            .iter()
            .map(String::as_str)
            .filter(|value| seen.insert(*value))
            .collect();

        unique.join(self.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR))
    }
}

///
/// DedupConcatAggregate
///
/// SQLite binding for `DedupConcat`, called as `name(value, separator)`.
/// NULL values (unmatched LEFT JOIN rows) contribute nothing.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct DedupConcatAggregate;

impl Aggregate<DedupConcat, String> for DedupConcatAggregate {
    fn init(&self, _: &mut Context<'_>) -> rusqlite::Result<DedupConcat> {
        Ok(DedupConcat::new())
    }

    fn step(&self, ctx: &mut Context<'_>, acc: &mut DedupConcat) -> rusqlite::Result<()> {
        let separator = if ctx.len() > 1 {
            value_text(ctx.get_raw(1))
        } else {
            None
        };

        if let Some(value) = value_text(ctx.get_raw(0)) {
            acc.accumulate(value, separator.as_deref().unwrap_or(DEFAULT_SEPARATOR));
        }

        Ok(())
    }

    fn finalize(
        &self,
        _: &mut Context<'_>,
        acc: Option<DedupConcat>,
    ) -> rusqlite::Result<String> {
        Ok(acc.map(DedupConcat::finalize).unwrap_or_default())
    }
}

/// Register the aggregate on `conn` under `name` with two arguments.
pub fn register(conn: &Connection, name: &str) -> rusqlite::Result<()> {
    conn.create_aggregate_function(
        name,
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        DedupConcatAggregate,
    )
}
