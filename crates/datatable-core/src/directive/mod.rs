//! Directive parsing: raw directive body lines into a normalized `TableSpec`.
//!
//! Parsing never aborts. Unknown instructions produce warnings, lines
//! without a separator are skipped, and filter lines without a comparator
//! are skipped with a note.

mod diagnostics;
mod instruction;
mod line;


use crate::{
    config::DirectiveConfig,
    model::{ColumnResolver, Comparator, Filter, Logic, SortKey, SqlLiteral, TableSpec},
};

pub use diagnostics::{Diagnostic, FilterProblem, Severity};
pub use instruction::Instruction;

///
/// ParsedDirective
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParsedDirective {
    pub spec: TableSpec,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedDirective {
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity() == Severity::Warning)
    }
}

///
/// DirectiveParser
///

#[derive(Clone, Copy, Debug)]
pub struct DirectiveParser<'a> {
    config: &'a DirectiveConfig,
}

impl<'a> DirectiveParser<'a> {
    #[must_use]
    pub const fn new(config: &'a DirectiveConfig) -> Self {
        Self { config }
    }

    fn resolver(&self) -> ColumnResolver<'a> {
        ColumnResolver::new(self.config.identity_sentinel.as_str())
    }

    /// Parse one directive body. `classes` is the class suffix the caller
    /// extracted from the opening line and is passed through untouched.
    #[must_use]
    pub fn parse<'l, I>(&self, classes: &str, lines: I) -> ParsedDirective
    where
        I: IntoIterator<Item = &'l str>,
    {
        let mut parsed = ParsedDirective {
            spec: TableSpec::new(classes.trim()),
            diagnostics: Vec::new(),
        };
        let mut headers_declared = false;

        for (idx, raw) in lines.into_iter().enumerate() {
            let line_no = idx + 1;
            let stripped = line::strip_comment(raw);
            let stripped = stripped.trim();
            if stripped.is_empty() {
                continue;
            }

            let Some((name, argument)) = line::split_instruction(stripped) else {
                tracing::trace!(line = line_no, "skipping directive line without separator");
                continue;
            };

            match Instruction::lookup(&name) {
                Some(Instruction::Select) => self.parse_select(&mut parsed.spec, &argument),
                Some(Instruction::Headers) => {
                    headers_declared = true;
                    parsed
                        .spec
                        .headers
                        .extend(argument.split(',').map(|head| head.trim().to_string()));
                }
                Some(Instruction::Sort) => {
                    if let Some(sort) =
                        SortKey::parse(&argument, &self.resolver(), self.config.descending_marker)
                    {
                        parsed.spec.sort = Some(sort);
                    }
                }
                Some(Instruction::Filter(logic)) => match self.parse_filter(&argument, logic) {
                    Ok(filter) => parsed.spec.filters.push(filter),
                    Err(problem) => parsed.diagnostics.push(Diagnostic::MalformedFilter {
                        line: line_no,
                        argument,
                        problem,
                    }),
                },
                None => {
                    tracing::warn!(option = %name, line = line_no, "data table: unknown option");
                    parsed.diagnostics.push(Diagnostic::UnknownOption {
                        line: line_no,
                        option: name,
                    });
                }
            }
        }

        self.finish_headers(&mut parsed, headers_declared);

        parsed
    }

    fn parse_select(&self, spec: &mut TableSpec, argument: &str) {
        let resolver = self.resolver();

        for token in argument.split(',') {
            let resolved = resolver.resolve(token);
            if resolved.is_empty() {
                continue;
            }

            let ty = resolved.column_type();
            spec.upsert_column(resolved.key, ty);
        }
    }

    /// Build a filter from `left <comparator> right`.
    fn parse_filter(&self, argument: &str, logic: Logic) -> Result<Filter, FilterProblem> {
        let (left, token, right) =
            split_comparison(argument).ok_or(FilterProblem::MissingComparator)?;
        let comparator = Comparator::from_token(token).ok_or(FilterProblem::MissingComparator)?;

        let resolved = self.resolver().resolve(left);
        if resolved.is_empty() {
            return Err(FilterProblem::MissingKey);
        }

        let value = comparator.prepare_value(right.trim());

        Ok(Filter {
            key: resolved.key,
            comparator,
            value: SqlLiteral::escape(&value),
            logic,
        })
    }

    fn finish_headers(&self, parsed: &mut ParsedDirective, declared: bool) {
        let spec = &mut parsed.spec;
        if declared && spec.headers.len() == spec.columns.len() {
            return;
        }

        if declared {
            tracing::warn!(
                headers = spec.headers.len(),
                columns = spec.columns.len(),
                "data table: header count does not match column count"
            );
            parsed.diagnostics.push(Diagnostic::HeaderCountMismatch {
                headers: spec.headers.len(),
                columns: spec.columns.len(),
            });
        }

        spec.headers = spec.default_headers(
            &self.config.identity_sentinel,
            &self.config.page_name_label,
        );
    }
}

/// Find the leftmost comparator, preferring the longest token at that
/// position, and split the argument around it.
fn split_comparison(argument: &str) -> Option<(&str, &'static str, &str)> {
    argument.char_indices().find_map(|(idx, _)| {
        let rest = &argument[idx..];
        Comparator::TOKENS
            .iter()
            .find(|token| rest.starts_with(**token))
            .map(|token| (&argument[..idx], *token, &rest[token.len()..]))
    })
}
