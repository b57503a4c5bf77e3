//! semdiff: entity-level semantic diff between two revisions of a source file
//!
//! Instead of a textual line diff, semdiff extracts the named top-level
//! constructs of each version (functions, classes, methods and arrow-function
//! bindings), matches them by name, and reports which were added, removed or
//! modified. Only modified entities get a line diff, limited to their own
//! text, so reformatting and unrelated line shifts elsewhere stay quiet.
//!
//! # Supported Languages
//!
//! - TypeScript, TSX
//! - JavaScript, JSX
//!
//! # Example
//!
//! ```ignore
//! use semdiff::{diff, extract, Lang};
//!
//! let grammar = Lang::TypeScript.tree_sitter_language();
//! let old = extract("const calc = (x) => x + 1;", &grammar)?;
//! let new = extract("const calc = (x) => x + 2;", &grammar)?;
//!
//! let result = diff(&old, &new);
//! assert_eq!(result.modified_names(), vec!["calc"]);
//! ```

pub mod cli;
pub mod config;
pub mod differ;
pub mod entity;
pub mod error;
pub mod extract;
pub mod git;
pub mod lang;
pub mod normalize;
pub mod pipeline;
pub mod report;

// Re-export commonly used types
pub use cli::{Cli, ColorChoice, OutputFormat};
pub use config::SemdiffConfig;
pub use differ::{diff, ComparisonResult, DiffLine, Hunk, LineDiff, LineTag, ModifiedEntity};
pub use entity::{EntityKind, EntityMap, EntityRecord};
pub use error::{Result, SemdiffError};
pub use extract::{extract, extract_from_tree};
pub use git::{GitSourceProvider, SourceProvider, WORKING};
pub use lang::{FormatterCommand, GrammarRegistry, Lang, LangEntry};
pub use normalize::{FallbackReason, Normalization, NormalizationOutcome, Normalizer};
pub use pipeline::{run_semantic_diff, DiffRequest};
pub use report::{render_json, render_text, Palette, SemanticDiffReport};
