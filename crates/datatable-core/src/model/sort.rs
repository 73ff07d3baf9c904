use crate::model::ColumnResolver;
use derive_more::Display;
use serde::Serialize;

///
/// Direction
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    #[display("ASC")]
    Asc,
    #[display("DESC")]
    Desc,
}

impl Direction {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

///
/// SortKey
///
/// Single sort column. Built from a directive `sort:` line or from the
/// runtime override parameter; both share the `^key` descending syntax.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SortKey {
    pub key: String,
    pub direction: Direction,
}

impl SortKey {
    #[must_use]
    pub fn new(key: impl Into<String>, direction: Direction) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    #[must_use]
    pub fn asc(key: impl Into<String>) -> Self {
        Self::new(key, Direction::Asc)
    }

    #[must_use]
    pub fn desc(key: impl Into<String>) -> Self {
        Self::new(key, Direction::Desc)
    }

    /// Parse `key` or `<marker>key`. Returns `None` when no key remains.
    #[must_use]
    pub fn parse(token: &str, resolver: &ColumnResolver<'_>, marker: char) -> Option<Self> {
        let resolved = resolver.resolve(token);
        let (key, direction) = match resolved.key.strip_prefix(marker) {
            Some(rest) => (rest.to_string(), Direction::Desc),
            None => (resolved.key, Direction::Asc),
        };

        if key.is_empty() {
            None
        } else {
            Some(Self { key, direction })
        }
    }

    /// Encode as a runtime override parameter value.
    #[must_use]
    pub fn to_param(&self, marker: char) -> String {
        match self.direction {
            Direction::Asc => self.key.clone(),
            Direction::Desc => format!("{marker}{}", self.key),
        }
    }
}
