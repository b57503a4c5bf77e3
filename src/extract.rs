//! Entity extraction from tree-sitter syntax trees
//!
//! Walks the whole tree in pre-order and matches each node against a small,
//! fixed set of syntactic categories (see [`SyntaxCategory`]). Matching is
//! purely structural: no scopes, no symbol resolution. Nested constructs are
//! captured independently, so a class and each of its methods are separate
//! entities.
//!
//! Parse errors are not fatal. tree-sitter keeps `ERROR` nodes in the tree
//! and the walk treats them like any other node, so entities around a broken
//! region are still found.

use tree_sitter::{Language, Node, Parser, Tree};

use crate::entity::{EntityKind, EntityMap, EntityRecord};
use crate::error::{Result, SemdiffError};

/// Parse `source` with `grammar` and extract its entities
pub fn extract(source: &str, grammar: &Language) -> Result<EntityMap> {
    let tree = parse(source, grammar)?;
    Ok(extract_from_tree(&tree, source))
}

/// Parse `source` into a concrete syntax tree
pub fn parse(source: &str, grammar: &Language) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(grammar)
        .map_err(|e| SemdiffError::ParseFailure {
            message: format!("Failed to set language: {}", e),
        })?;

    parser
        .parse(source, None)
        .ok_or_else(|| SemdiffError::ParseFailure {
            message: "parser produced no tree".to_string(),
        })
}

/// Collect every recognised entity in `tree`
///
/// `source` must be the text the tree was parsed from.
pub fn extract_from_tree(tree: &Tree, source: &str) -> EntityMap {
    let mut entities = EntityMap::new();

    visit_all(&tree.root_node(), |node| {
        if let Some(category) = SyntaxCategory::classify(node) {
            for record in category.into_records(node, source) {
                entities.insert(record);
            }
        }
    });

    entities
}

/// A `variable_declarator` whose initializer is an arrow function
#[derive(Debug, Clone, Copy)]
struct ArrowBinding<'tree> {
    declarator: Node<'tree>,
    name: Node<'tree>,
}

/// Node categories that produce entities, each carrying what it needs to
/// produce its record(s)
#[derive(Debug)]
enum SyntaxCategory<'tree> {
    FunctionDeclaration { name: Node<'tree> },
    ClassDeclaration { name: Node<'tree> },
    MethodDefinition { name: Node<'tree> },
    /// `let`/`const` statement; only arrow-valued declarators are kept
    LexicalDeclaration { bindings: Vec<ArrowBinding<'tree>> },
}

impl<'tree> SyntaxCategory<'tree> {
    fn classify(node: &Node<'tree>) -> Option<Self> {
        match node.kind() {
            "function_declaration" => node
                .child_by_field_name("name")
                .map(|name| Self::FunctionDeclaration { name }),
            "class_declaration" => node
                .child_by_field_name("name")
                .map(|name| Self::ClassDeclaration { name }),
            "method_definition" => node
                .child_by_field_name("name")
                .map(|name| Self::MethodDefinition { name }),
            "lexical_declaration" => {
                let mut cursor = node.walk();
                let bindings: Vec<_> = node
                    .children(&mut cursor)
                    .filter(|child| child.kind() == "variable_declarator")
                    .filter_map(arrow_binding)
                    .collect();

                if bindings.is_empty() {
                    None
                } else {
                    Some(Self::LexicalDeclaration { bindings })
                }
            }
            _ => None,
        }
    }

    fn into_records(self, node: &Node<'tree>, source: &str) -> Vec<EntityRecord> {
        match self {
            Self::FunctionDeclaration { name } => {
                vec![record(node, &name, EntityKind::Function, source)]
            }
            Self::ClassDeclaration { name } => {
                vec![record(node, &name, EntityKind::Class, source)]
            }
            Self::MethodDefinition { name } => {
                vec![record(node, &name, EntityKind::Method, source)]
            }
            // Span the declarator, not the statement, so `const a = () => 1, b = () => 2`
            // gives each binding its own text and lines
            Self::LexicalDeclaration { bindings } => bindings
                .iter()
                .map(|b| record(&b.declarator, &b.name, EntityKind::ArrowFunction, source))
                .collect(),
        }
    }
}

fn arrow_binding(declarator: Node<'_>) -> Option<ArrowBinding<'_>> {
    let name = declarator.child_by_field_name("name")?;
    let value = declarator.child_by_field_name("value")?;
    (value.kind() == "arrow_function").then_some(ArrowBinding { declarator, name })
}

fn record(span: &Node, name: &Node, kind: EntityKind, source: &str) -> EntityRecord {
    EntityRecord {
        name: get_node_text(name, source).to_string(),
        text: get_node_text(span, source).to_string(),
        start_line: span.start_position().row + 1,
        end_line: span.end_position().row + 1,
        kind,
    }
}

/// Get text content of a node
fn get_node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// Visit all nodes in pre-order (iterative to avoid stack overflow)
fn visit_all<'tree, F>(node: &Node<'tree>, mut visitor: F)
where
    F: FnMut(&Node<'tree>),
{
    let mut cursor = node.walk();
    let mut did_visit_children = false;

    loop {
        if !did_visit_children {
            visitor(&cursor.node());

            if cursor.goto_first_child() {
                continue;
            }
        }

        if cursor.goto_next_sibling() {
            did_visit_children = false;
            continue;
        }

        // Back at the starting node: done
        if !cursor.goto_parent() {
            break;
        }
        did_visit_children = true;
    }
}
