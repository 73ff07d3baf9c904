use serde::Serialize;
use std::fmt;

///
/// SqlLiteral
///
/// Text already escaped for a single-quoted SQLite string literal.
/// The only constructor escapes, so a value cannot be embedded unescaped and
/// cannot be escaped twice.
///

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SqlLiteral(String);

impl SqlLiteral {
    /// Escape raw text: quotes are doubled and NUL bytes dropped.
    #[must_use]
    pub fn escape(raw: &str) -> Self {
        let mut escaped = String::with_capacity(raw.len());
        for c in raw.chars() {
            match c {
                '\'' => escaped.push_str("''"),
                '\0' => {}
                c => escaped.push(c),
            }
        }

        Self(escaped)
    }

    /// Escaped body, without surrounding quotes.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Renders the quoted literal, ready to splice into a statement.
impl fmt::Display for SqlLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.0)
    }
}

///
/// SqlIdent
///
/// Double-quoted SQLite identifier. Quoting keeps configured names that
/// collide with keywords (`order`, `group`) valid in generated statements.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SqlIdent(String);

impl SqlIdent {
    /// Quote a raw name; embedded double quotes are doubled.
    #[must_use]
    pub fn quote(raw: &str) -> Self {
        Self(format!("\"{}\"", raw.replace('"', "\"\"")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SqlIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
