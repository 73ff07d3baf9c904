use crate::model::SqlLiteral;
use derive_more::Display;
use serde::Serialize;

///
/// Logic
///
/// Boolean connective attached to a single filter line. Filters form a flat
/// left-to-right chain; there is no grouping.
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Logic {
    #[default]
    #[display("AND")]
    And,
    #[display("OR")]
    Or,
}

///
/// Comparator
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
pub enum Comparator {
    #[display("=")]
    #[serde(rename = "=")]
    Eq,
    #[display("!=")]
    #[serde(rename = "!=")]
    Ne,
    #[display("<")]
    #[serde(rename = "<")]
    Lt,
    #[display("<=")]
    #[serde(rename = "<=")]
    Lte,
    #[display(">")]
    #[serde(rename = ">")]
    Gt,
    #[display(">=")]
    #[serde(rename = ">=")]
    Gte,
    #[display("LIKE")]
    #[serde(rename = "LIKE")]
    Like,
}

impl Comparator {
    /// Directive comparator spellings, two-character tokens first so the
    /// longest token wins at any position.
    pub const TOKENS: [&'static str; 9] = ["<=", ">=", "<>", "!=", "=~", "=", "<", ">", "~"];

    /// Normalize a comparator token. Accepts the directive spellings and the
    /// normalized SQL spellings, so normalizing twice is a no-op.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            "=" => Self::Eq,
            "!=" | "<>" => Self::Ne,
            "<" => Self::Lt,
            "<=" => Self::Lte,
            ">" => Self::Gt,
            ">=" => Self::Gte,
            "=~" | "~" => Self::Like,
            other if other.eq_ignore_ascii_case("like") => Self::Like,
            _ => return None,
        };

        Some(op)
    }

    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Like => "LIKE",
        }
    }

    /// Rewrite a raw filter value for this comparator. Pattern matches turn
    /// the directive wildcard `*` into SQL's `%`.
    #[must_use]
    pub fn prepare_value(self, raw: &str) -> String {
        match self {
            Self::Like => raw.replace('*', "%"),
            _ => raw.to_string(),
        }
    }
}

///
/// Filter
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Filter {
    pub key: String,
    pub comparator: Comparator,
    pub value: SqlLiteral,
    pub logic: Logic,
}
