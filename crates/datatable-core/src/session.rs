use crate::{
    block::DirectiveBlock,
    config::Config,
    directive::{DirectiveParser, ParsedDirective},
    error::Error,
    exec::{self, Rows},
    model::{ColumnResolver, SortKey, TableSpec},
    query::{CompiledQuery, QueryCompiler},
    render::{TableRenderer, TableView},
};
use rusqlite::Connection;

///
/// TableResult
///
/// Rows of one executed directive together with the statement that
/// produced them.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TableResult {
    pub query: CompiledQuery,
    pub rows: Rows,
}

///
/// DataTable
///
/// Facade over one validated configuration. Each call handles a single
/// directive occurrence; nothing is cached between calls.
///

#[derive(Clone, Debug)]
pub struct DataTable {
    config: Config,
}

impl DataTable {
    pub fn new(config: Config) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn parse<'l, I>(&self, classes: &str, lines: I) -> ParsedDirective
    where
        I: IntoIterator<Item = &'l str>,
    {
        DirectiveParser::new(&self.config.directive).parse(classes, lines)
    }

    #[must_use]
    pub fn parse_block(&self, block: &DirectiveBlock<'_>) -> ParsedDirective {
        self.parse(&block.classes, block.lines.iter().copied())
    }

    /// Decode a runtime sort parameter. Blank or missing values yield `None`.
    #[must_use]
    pub fn sort_override(&self, param: Option<&str>) -> Option<SortKey> {
        let directive = &self.config.directive;
        let resolver = ColumnResolver::new(&directive.identity_sentinel);

        param.and_then(|param| SortKey::parse(param, &resolver, directive.descending_marker))
    }

    #[must_use]
    pub fn compile(&self, spec: &TableSpec, sort_param: Option<&str>) -> CompiledQuery {
        let sort_override = self.sort_override(sort_param);

        QueryCompiler::new(&self.config).compile(spec, sort_override.as_ref())
    }

    /// Compile and execute `spec` against `conn`, registering the aggregate
    /// first.
    pub fn query(
        &self,
        conn: &Connection,
        spec: &TableSpec,
        sort_param: Option<&str>,
    ) -> Result<TableResult, Error> {
        let query = self.compile(spec, sort_param);
        exec::register_functions(conn, &self.config.store)?;
        let rows = exec::run(conn, &query)?;

        Ok(TableResult { query, rows })
    }

    pub fn render<R: TableRenderer>(
        &self,
        conn: &Connection,
        spec: &TableSpec,
        sort_param: Option<&str>,
        renderer: &R,
    ) -> Result<String, Error> {
        let result = self.query(conn, spec, sort_param)?;
        let view = TableView::new(spec, result.query.sort.as_ref(), &result.rows);

        Ok(renderer.render(&view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn new_rejects_invalid_config() {
        let mut config = Config::default();
        config.store.entity_table = "pages; drop".to_string();

        let err = DataTable::new(config).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn sort_override_decodes_marker_and_case() {
        let table = DataTable::new(Config::default()).unwrap();

        assert_eq!(
            table.sort_override(Some("^Color")),
            Some(SortKey::desc("color"))
        );
        assert_eq!(
            table.sort_override(Some(" size ")),
            Some(SortKey::asc("size"))
        );
        assert_eq!(table.sort_override(Some("")), None);
        assert_eq!(table.sort_override(Some("^")), None);
        assert_eq!(table.sort_override(None), None);
    }

    #[test]
    fn compile_applies_override() {
        let table = DataTable::new(Config::default()).unwrap();
        let parsed = table.parse("", ["cols: name, size", "sort: name"]);

        let query = table.compile(&parsed.spec, Some("^size"));
        assert_eq!(query.sort, Some(SortKey::desc("size")));
        assert!(query.sql.ends_with("ORDER BY T2.\"value\" DESC"));
    }

    #[test]
    fn parse_block_passes_classes() {
        let table = DataTable::new(Config::default()).unwrap();
        let blocks = crate::block::find_blocks("---- datatable wide ----\ncols: a\n----");

        let parsed = table.parse_block(&blocks[0]);
        assert_eq!(parsed.spec.classes, "wide");
        assert_eq!(parsed.spec.column_keys().collect::<Vec<_>>(), ["a"]);
    }
}
