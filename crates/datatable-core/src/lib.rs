//! Core runtime for datatable: directive parsing, EAV pivot query compilation,
//! the dedup-concat SQLite aggregate, and the table rendering boundary.
//!
//! A directive flows leaf-first through the crate:
//! `block` → `directive` (via `model::ColumnResolver`) → `query` → `exec`
//! (with `aggregate` registered) → `render`. The `session::DataTable` facade
//! wires the whole chain for a single directive occurrence.
#![warn(unreachable_pub)]

pub mod aggregate;
pub mod block;
pub mod config;
pub mod directive;
pub mod error;
pub mod exec;
pub mod model;
pub mod query;
pub mod render;
pub mod session;

// re-exports
pub use config::Config;
pub use error::{Error, ErrorKind};
pub use session::DataTable;

///
/// Prelude
///
/// Prelude contains only domain vocabulary and the facade.
///

pub mod prelude {
    pub use crate::{
        directive::{Diagnostic, DirectiveParser, ParsedDirective},
        model::{
            Column, ColumnResolver, ColumnType, Comparator, Direction, Filter, Logic, SortKey,
            SqlLiteral, TableSpec,
        },
        query::{CompiledQuery, QueryCompiler},
        session::DataTable,
    };
}
