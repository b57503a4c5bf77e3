//! Entity records and the per-revision name → entity map

use std::collections::btree_map::{self, BTreeMap};

use serde::Serialize;

/// Syntactic category of an entity. Display only; identity is the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// `function foo() {}`
    Function,
    /// `class Foo {}`
    Class,
    /// `bar() {}` inside a class body
    Method,
    /// `const foo = () => {}`
    ArrowFunction,
}

impl EntityKind {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Class => "class",
            Self::Method => "method",
            Self::ArrowFunction => "arrow function",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named construct found in a source tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRecord {
    pub name: String,
    /// Exact source text spanned by the construct
    #[serde(skip_serializing)]
    pub text: String,
    /// 1-based, inclusive
    pub start_line: usize,
    /// 1-based, inclusive
    pub end_line: usize,
    pub kind: EntityKind,
}

impl EntityRecord {
    /// `start-end` span label used in reports
    pub fn line_span(&self) -> String {
        format!("{}-{}", self.start_line, self.end_line)
    }
}

/// Name → entity mapping for one version of a file
///
/// Names are unique: inserting a name that is already present replaces the
/// earlier record (last wins). Replaced names are remembered in
/// [`EntityMap::shadowed`] so callers can see that something was lost.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityMap {
    entries: BTreeMap<String, EntityRecord>,
    shadowed: Vec<String>,
}

impl EntityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any earlier record with the same name
    pub fn insert(&mut self, record: EntityRecord) -> Option<EntityRecord> {
        let previous = self.entries.insert(record.name.clone(), record);
        if let Some(prev) = &previous {
            tracing::debug!(
                "duplicate entity name '{}': line {} replaces line {}",
                prev.name,
                self.entries[&prev.name].start_line,
                prev.start_line
            );
            self.shadowed.push(prev.name.clone());
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&EntityRecord> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in ascending order
    pub fn names(&self) -> btree_map::Keys<'_, String, EntityRecord> {
        self.entries.keys()
    }

    /// Records in ascending name order
    pub fn iter(&self) -> btree_map::Values<'_, String, EntityRecord> {
        self.entries.values()
    }

    /// Names that were overwritten by a later construct of the same name,
    /// in the order the overwrites happened
    pub fn shadowed(&self) -> &[String] {
        &self.shadowed
    }
}

impl FromIterator<EntityRecord> for EntityMap {
    fn from_iter<I: IntoIterator<Item = EntityRecord>>(iter: I) -> Self {
        let mut map = Self::new();
        for record in iter {
            map.insert(record);
        }
        map
    }
}
