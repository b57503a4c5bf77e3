//! Language detection, tree-sitter grammar loading and the grammar registry
//!
//! The registry maps a file extension to the grammar used to parse it and the
//! external formatter used to normalize it before parsing. The table itself is
//! static; only the formatter half of an entry can be overridden from config.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tree_sitter::Language;

use crate::error::{Result, SemdiffError};

/// Supported source kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    TypeScript,
    Tsx,
    JavaScript,
    Jsx,
}

impl Lang {
    /// All supported languages, in registry order
    pub const ALL: [Lang; 4] = [Self::TypeScript, Self::Tsx, Self::JavaScript, Self::Jsx];

    /// Get the canonical name of the language
    pub fn name(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
            Self::JavaScript => "javascript",
            Self::Jsx => "jsx",
        }
    }

    /// Get the tree-sitter Language for parsing
    pub fn tree_sitter_language(&self) -> Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Self::JavaScript | Self::Jsx => tree_sitter_javascript::LANGUAGE.into(),
        }
    }

    /// Get common file extensions for this language
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::TypeScript => &["ts", "mts", "cts"],
            Self::Tsx => &["tsx"],
            Self::JavaScript => &["js", "mjs", "cjs"],
            Self::Jsx => &["jsx"],
        }
    }

    /// Default formatter invocation used to normalize this language
    pub fn default_formatter(&self) -> FormatterCommand {
        let parser = match self {
            Self::TypeScript | Self::Tsx => "typescript",
            Self::JavaScript | Self::Jsx => "babel",
        };
        FormatterCommand::new(["npx", "prettier", "--parser", parser])
    }
}

/// An external formatter that reads source on stdin and writes it to stdout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl FormatterCommand {
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        Self {
            program: argv.next().unwrap_or_default(),
            args: argv.collect(),
        }
    }

    /// Build from a config argv; `None` when the argv is empty
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        if program.trim().is_empty() {
            return None;
        }
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Human-readable command line, for logs
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One registry row: how to parse and how to normalize a source kind
#[derive(Debug, Clone)]
pub struct LangEntry {
    pub lang: Lang,
    pub formatter: Option<FormatterCommand>,
}

/// Extension → grammar/formatter table
#[derive(Debug, Clone)]
pub struct GrammarRegistry {
    entries: BTreeMap<String, LangEntry>,
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        for lang in Lang::ALL {
            for ext in lang.extensions() {
                entries.insert(
                    (*ext).to_string(),
                    LangEntry {
                        lang,
                        formatter: Some(lang.default_formatter()),
                    },
                );
            }
        }
        Self { entries }
    }
}

impl GrammarRegistry {
    /// Look up the entry for a file, keyed by its extension
    pub fn resolve(&self, path: &Path) -> Result<&LangEntry> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        self.entries
            .get(&ext)
            .ok_or_else(|| SemdiffError::UnsupportedLanguage {
                extension: if ext.is_empty() {
                    "none".to_string()
                } else {
                    ext
                },
            })
    }

    /// Replace the formatter for one extension
    ///
    /// Returns `false` when the extension has no grammar; grammars cannot be
    /// added at runtime so such overrides are dropped.
    pub fn set_formatter(&mut self, ext: &str, formatter: Option<FormatterCommand>) -> bool {
        match self.entries.get_mut(&ext.trim_start_matches('.').to_lowercase()) {
            Some(entry) => {
                entry.formatter = formatter;
                true
            }
            None => false,
        }
    }
}
