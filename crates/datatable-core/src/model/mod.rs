//! Normalized directive vocabulary shared by the parser, compiler and renderer.

mod column;
mod filter;
mod literal;
mod sort;
mod table;


pub use column::{Column, ColumnResolver, ColumnType, ResolvedColumn};
pub use filter::{Comparator, Filter, Logic};
pub use literal::{SqlIdent, SqlLiteral};
pub use sort::{Direction, SortKey};
pub use table::TableSpec;
