//! Query compilation: `TableSpec` into one pivoting SQLite statement.

mod compile;
mod join;


pub use compile::{CompiledQuery, EMPTY_SELECT, QueryCompiler};
pub use join::{AttributeJoin, JoinAllocation};
