//! Name-based comparison of two entity maps
//!
//! Entities are matched across versions purely by name. A renamed entity is
//! therefore reported as one removal plus one addition.

use serde::Serialize;
use similar::{Algorithm, ChangeTag, DiffOp, DiffTag, TextDiff};

use crate::entity::{EntityMap, EntityRecord};

/// Outcome of comparing an old and a new [`EntityMap`]
///
/// `added`, `removed`, `modified` and `unchanged` partition the union of
/// both key sets. Each list is sorted ascending by name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComparisonResult {
    /// Present only in the new map
    pub added: Vec<EntityRecord>,
    /// Present only in the old map
    pub removed: Vec<EntityRecord>,
    /// Present in both with differing text
    pub modified: Vec<ModifiedEntity>,
    /// Present in both with identical text
    pub unchanged: Vec<String>,
}

impl ComparisonResult {
    /// True when no entity was added, removed or modified
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    pub fn added_names(&self) -> Vec<&str> {
        self.added.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn removed_names(&self) -> Vec<&str> {
        self.removed.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn modified_names(&self) -> Vec<&str> {
        self.modified.iter().map(|m| m.name.as_str()).collect()
    }
}

/// An entity whose text changed between versions
#[derive(Debug, Clone, Serialize)]
pub struct ModifiedEntity {
    pub name: String,
    pub old: EntityRecord,
    pub new: EntityRecord,
    pub diff: LineDiff,
}

/// Context-free line diff of an entity body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineDiff {
    pub hunks: Vec<Hunk>,
}

impl LineDiff {
    /// Diff `old` against `new` line by line, without context lines
    ///
    /// Lines end at `\n`, `\r\n` or a lone `\r`.
    pub fn between(old: &str, new: &str) -> Self {
        let old_lines = split_lines(old);
        let new_lines = split_lines(new);

        let diff = TextDiff::configure()
            .algorithm(Algorithm::Myers)
            .diff_slices(old_lines.as_slice(), new_lines.as_slice());

        let mut hunks = Vec::new();
        for group in diff.grouped_ops(0) {
            let ops: Vec<&DiffOp> = group.iter().filter(|op| op.tag() != DiffTag::Equal).collect();
            let (Some(first), Some(last)) = (ops.first(), ops.last()) else {
                continue;
            };

            let mut lines = Vec::new();
            for op in ops.iter().copied() {
                for change in diff.iter_changes(op) {
                    let tag = match change.tag() {
                        ChangeTag::Delete => LineTag::Removed,
                        ChangeTag::Insert => LineTag::Added,
                        ChangeTag::Equal => continue,
                    };
                    lines.push(DiffLine {
                        tag,
                        text: change.value().to_string(),
                    });
                }
            }

            hunks.push(Hunk {
                old_start: first.old_range().start,
                old_len: last.old_range().end - first.old_range().start,
                new_start: first.new_range().start,
                new_len: last.new_range().end - first.new_range().start,
                lines,
            });
        }

        Self { hunks }
    }

    /// No line-level difference, e.g. the texts differ only in trailing
    /// newlines or line-ending style
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }
}

/// Split on any line ending, dropping the terminators. A trailing
/// terminator does not start an extra empty line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(['\n', '\r']) {
            Some(i) => {
                lines.push(&rest[..i]);
                let terminator = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[i + terminator..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

/// A run of consecutive changed lines
///
/// Starts are 0-based indices into the entity's lines; [`Hunk::header`]
/// renders them in unified-diff form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hunk {
    pub old_start: usize,
    pub old_len: usize,
    pub new_start: usize,
    pub new_len: usize,
    pub lines: Vec<DiffLine>,
}

impl Hunk {
    /// `@@ -a,b +c,d @@` marker
    pub fn header(&self) -> String {
        format!(
            "@@ -{} +{} @@",
            unified_range(self.old_start, self.old_len),
            unified_range(self.new_start, self.new_len)
        )
    }
}

/// Unified-diff range: `start` alone for one line, `start,len` otherwise.
/// Empty ranges point at the line before the gap.
fn unified_range(start: usize, len: usize) -> String {
    match len {
        0 => format!("{},0", start),
        1 => format!("{}", start + 1),
        _ => format!("{},{}", start + 1, len),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub tag: LineTag,
    pub text: String,
}

impl DiffLine {
    /// `+text` / `-text`
    pub fn prefixed(&self) -> String {
        format!("{}{}", self.tag.sign(), self.text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTag {
    Added,
    Removed,
}

impl LineTag {
    pub fn sign(&self) -> char {
        match self {
            Self::Added => '+',
            Self::Removed => '-',
        }
    }
}

/// Compare two entity maps by name
pub fn diff(old: &EntityMap, new: &EntityMap) -> ComparisonResult {
    let mut result = ComparisonResult::default();

    // Both maps iterate in ascending name order, so every list comes out sorted
    for old_entity in old.iter() {
        match new.get(&old_entity.name) {
            None => result.removed.push(old_entity.clone()),
            Some(new_entity) if new_entity.text != old_entity.text => {
                result.modified.push(ModifiedEntity {
                    name: old_entity.name.clone(),
                    old: old_entity.clone(),
                    new: new_entity.clone(),
                    diff: LineDiff::between(&old_entity.text, &new_entity.text),
                });
            }
            Some(_) => result.unchanged.push(old_entity.name.clone()),
        }
    }

    result.added = new
        .iter()
        .filter(|entity| !old.contains(&entity.name))
        .cloned()
        .collect();

    tracing::debug!(
        "compared {} old / {} new entities: {} modified, {} added, {} removed",
        old.len(),
        new.len(),
        result.modified.len(),
        result.added.len(),
        result.removed.len()
    );

    result
}
