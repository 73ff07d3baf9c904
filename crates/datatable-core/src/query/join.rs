use std::collections::HashMap;

///
/// AttributeJoin
///
/// One LEFT JOIN of the attribute-value table, scoped to a single key.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttributeJoin {
    pub key: String,
    pub alias: String,
}

///
/// JoinAllocation
///
/// Per-compilation arena of attribute joins with a key index. Each key is
/// joined at most once; aliases are `T1`, `T2`, ... in allocation order.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct JoinAllocation {
    joins: Vec<AttributeJoin>,
    index: HashMap<String, usize>,
}

impl JoinAllocation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the alias for `key`, allocating a new join on first use.
    pub fn alias_for(&mut self, key: &str) -> &str {
        let slot = if let Some(&slot) = self.index.get(key) {
            slot
        } else {
            let slot = self.joins.len();
            self.joins.push(AttributeJoin {
                key: key.to_string(),
                alias: format!("T{}", slot + 1),
            });
            self.index.insert(key.to_string(), slot);
            slot
        };

        &self.joins[slot].alias
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&slot| self.joins[slot].alias.as_str())
    }

    /// The join every result row is anchored against.
    #[must_use]
    pub fn first(&self) -> Option<&AttributeJoin> {
        self.joins.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeJoin> {
        self.joins.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.joins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joins.is_empty()
    }
}
