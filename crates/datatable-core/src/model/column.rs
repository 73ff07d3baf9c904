use serde::{Deserialize, Serialize};

///
/// ColumnType
///
/// Declared presentation type of a column. Only consulted by renderers;
/// the compiler treats every attribute value as text.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    #[default]
    Text,
    Page,
    Url,
    Mail,
    Other(String),
}

impl ColumnType {
    /// Known type names match case-insensitively; any other name is kept
    /// as written.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        let token = token.trim();

        match token.to_lowercase().as_str() {
            "" | "text" => Self::Text,
            "page" => Self::Page,
            "url" => Self::Url,
            "mail" => Self::Mail,
            _ => Self::Other(token.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Page => "page",
            Self::Url => "url",
            Self::Mail => "mail",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for ColumnType {
    fn from(value: String) -> Self {
        Self::from_token(&value)
    }
}

impl From<ColumnType> for String {
    fn from(value: ColumnType) -> Self {
        value.as_str().to_string()
    }
}

///
/// Column
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Column {
    pub key: String,
    #[serde(rename = "type")]
    pub ty: ColumnType,
}

impl Column {
    #[must_use]
    pub fn new(key: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            key: key.into(),
            ty,
        }
    }
}

///
/// ResolvedColumn
///
/// Output of `ColumnResolver::resolve`. An empty `key` means the token was
/// blank and must be skipped by the caller.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedColumn {
    pub key: String,
    pub declared: Option<ColumnType>,
    pub identity: bool,
}

impl ResolvedColumn {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// Effective column type; the identity column is always a page reference.
    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        if self.identity {
            ColumnType::Page
        } else {
            self.declared.clone().unwrap_or_default()
        }
    }
}

///
/// ColumnResolver
///
/// Splits a `name` or `name type` token into a lowercase key and an optional
/// declared type, flagging the identity sentinel.
///

#[derive(Clone, Copy, Debug)]
pub struct ColumnResolver<'a> {
    sentinel: &'a str,
}

impl<'a> ColumnResolver<'a> {
    #[must_use]
    pub const fn new(sentinel: &'a str) -> Self {
        Self { sentinel }
    }

    #[must_use]
    pub fn is_identity(&self, key: &str) -> bool {
        key == self.sentinel
    }

    #[must_use]
    pub fn resolve(&self, token: &str) -> ResolvedColumn {
        let token = token.trim();
        let (name, declared) = match token.split_once(char::is_whitespace) {
            Some((name, ty)) => (name, Some(ty.trim())),
            None => (token, None),
        };

        let key = name.to_lowercase();
        let identity = self.is_identity(&key);

        ResolvedColumn {
            key,
            declared: declared.filter(|ty| !ty.is_empty()).map(ColumnType::from_token),
            identity,
        }
    }
}
