use crate::{
    config::{Config, StoreConfig},
    model::{Filter, SortKey, SqlIdent, SqlLiteral, TableSpec},
    query::JoinAllocation,
};

/// Statement returned for a directive that selects nothing: valid SQL that
/// yields zero rows.
pub const EMPTY_SELECT: &str = "SELECT NULL WHERE 0";

///
/// CompiledQuery
///
/// One compiled statement plus the effective sort the renderer needs to
/// mark the active column.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,
    pub sort: Option<SortKey>,
    pub joins: JoinAllocation,
}

impl CompiledQuery {
    #[must_use]
    pub fn is_empty_select(&self) -> bool {
        self.sql == EMPTY_SELECT
    }
}

///
/// StoreNames
///
/// Configured store names, quoted once per compilation.
///

struct StoreNames {
    entity_table: SqlIdent,
    entity_id: SqlIdent,
    entity_name: SqlIdent,
    attribute_table: SqlIdent,
    attribute_entity: SqlIdent,
    attribute_key: SqlIdent,
    attribute_value: SqlIdent,
    aggregate: SqlIdent,
}

impl StoreNames {
    fn quote(store: &StoreConfig) -> Self {
        Self {
            entity_table: SqlIdent::quote(&store.entity_table),
            entity_id: SqlIdent::quote(&store.entity_id),
            entity_name: SqlIdent::quote(&store.entity_name),
            attribute_table: SqlIdent::quote(&store.attribute_table),
            attribute_entity: SqlIdent::quote(&store.attribute_entity),
            attribute_key: SqlIdent::quote(&store.attribute_key),
            attribute_value: SqlIdent::quote(&store.attribute_value),
            aggregate: SqlIdent::quote(&store.aggregate),
        }
    }

    fn entity_name(&self) -> String {
        format!("{}.{}", self.entity_table, self.entity_name)
    }
}

///
/// QueryCompiler
///
/// Pivots a `TableSpec` into a single grouped SELECT over the entity table,
/// with one LEFT JOIN of the attribute table per distinct referenced key.
///
/// Identifiers come from validated configuration only and are always
/// double-quoted. Directive text reaches the statement exclusively through
/// `SqlLiteral`.
///

#[derive(Clone, Copy, Debug)]
pub struct QueryCompiler<'a> {
    config: &'a Config,
}

impl<'a> QueryCompiler<'a> {
    #[must_use]
    pub const fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Compile `spec`. A present `sort_override` replaces the directive's own
    /// sort for this compilation only.
    #[must_use]
    pub fn compile(&self, spec: &TableSpec, sort_override: Option<&SortKey>) -> CompiledQuery {
        if spec.columns.is_empty() {
            tracing::warn!("data table: no columns selected, compiling an empty select");
            return CompiledQuery {
                sql: EMPTY_SELECT.to_string(),
                sort: None,
                joins: JoinAllocation::new(),
            };
        }

        let names = StoreNames::quote(&self.config.store);
        let separator = SqlLiteral::escape(&self.config.store.separator);
        let mut joins = JoinAllocation::new();

        // select list
        let select: Vec<String> = spec
            .column_keys()
            .map(|key| {
                if self.is_identity(key) {
                    names.entity_name()
                } else {
                    let alias = joins.alias_for(key);
                    format!(
                        "{}({alias}.{}, {separator})",
                        names.aggregate, names.attribute_value
                    )
                }
            })
            .collect();

        // sort, possibly on a column that is not selected
        let sort = sort_override
            .filter(|sort| !sort.key.is_empty())
            .or(spec.sort.as_ref())
            .filter(|sort| !sort.key.is_empty())
            .cloned();
        let order = match &sort {
            Some(sort) => format!(
                "ORDER BY {} {}",
                self.value_ref(&names, &mut joins, &sort.key),
                sort.direction
            ),
            None => "ORDER BY 1 ASC".to_string(),
        };

        // filters, in source order
        let predicates: Vec<(&Filter, String)> = spec
            .filters
            .iter()
            .map(|filter| {
                let target = self.value_ref(&names, &mut joins, &filter.key);
                (
                    filter,
                    format!("{target} {} {}", filter.comparator, filter.value),
                )
            })
            .collect();

        let mut clauses = vec![
            format!("SELECT {}", select.join(", ")),
            format!("FROM {}", names.entity_table),
        ];
        clauses.extend(joins.iter().map(|join| {
            format!(
                "LEFT JOIN {table} AS {alias} ON {alias}.{entity} = {pages}.{id} AND {alias}.{key} = {literal}",
                table = names.attribute_table,
                alias = join.alias,
                entity = names.attribute_entity,
                pages = names.entity_table,
                id = names.entity_id,
                key = names.attribute_key,
                literal = SqlLiteral::escape(&join.key),
            )
        }));

        if let Some(anchor) = joins.first() {
            // rows lacking the first-referenced attribute drop out here even
            // though every attribute join is a LEFT JOIN
            clauses.push(format!(
                "WHERE {}.{} = {}.{}",
                names.entity_table, names.entity_id, anchor.alias, names.attribute_entity
            ));
            clauses.extend(
                predicates
                    .into_iter()
                    .map(|(filter, predicate)| format!("{} {predicate}", filter.logic)),
            );
        } else {
            for (idx, (filter, predicate)) in predicates.into_iter().enumerate() {
                if idx == 0 {
                    clauses.push(format!("WHERE {predicate}"));
                } else {
                    clauses.push(format!("{} {predicate}", filter.logic));
                }
            }
        }

        clauses.push(format!("GROUP BY {}", names.entity_name()));
        clauses.push(order);

        let sql = clauses.join(" ");
        tracing::debug!(
            joins = joins.len(),
            filters = spec.filters.len(),
            sql = %sql,
            "data table: compiled query"
        );

        CompiledQuery { sql, sort, joins }
    }

    fn is_identity(&self, key: &str) -> bool {
        key == self.config.directive.identity_sentinel
    }

    /// Column expression for `key`: the entity name for the identity column,
    /// otherwise the value column of its (possibly new) join.
    fn value_ref(&self, names: &StoreNames, joins: &mut JoinAllocation, key: &str) -> String {
        if self.is_identity(key) {
            names.entity_name()
        } else {
            format!("{}.{}", joins.alias_for(key), names.attribute_value)
        }
    }
}
