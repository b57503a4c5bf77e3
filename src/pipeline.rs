//! End-to-end comparison: fetch → normalize → extract → diff
//!
//! Fails only on an unsupported file kind (checked before anything is
//! fetched), a retrieval failure on either side, or a grammar that cannot
//! be loaded. Formatter problems never fail the run.

use std::path::{Path, PathBuf};

use crate::differ::diff;
use crate::error::Result;
use crate::extract::extract;
use crate::git::SourceProvider;
use crate::lang::GrammarRegistry;
use crate::normalize::{Normalization, Normalizer};
use crate::report::{NormalizationSummary, SemanticDiffReport};

/// One file compared between two revisions
#[derive(Debug, Clone)]
pub struct DiffRequest {
    pub path: PathBuf,
    pub old_revision: String,
    pub new_revision: String,
    /// Run the registered formatter before parsing
    pub normalize: bool,
}

/// Compare `request.path` between its two revisions
pub fn run_semantic_diff(
    request: &DiffRequest,
    registry: &GrammarRegistry,
    provider: &dyn SourceProvider,
) -> Result<SemanticDiffReport> {
    let entry = registry.resolve(&request.path)?;
    tracing::info!(
        "comparing {} ({}) {} -> {}",
        request.path.display(),
        entry.lang.name(),
        request.old_revision,
        request.new_revision
    );

    let raw_old = fetch(provider, &request.old_revision, &request.path)?;
    let raw_new = fetch(provider, &request.new_revision, &request.path)?;

    let normalizer = if request.normalize {
        Normalizer::new(entry.formatter.clone())
    } else {
        Normalizer::disabled()
    };
    let old = normalize_side(&normalizer, "old", &raw_old);
    let new = normalize_side(&normalizer, "new", &raw_new);

    let grammar = entry.lang.tree_sitter_language();
    let old_entities = extract(old.text(), &grammar)?;
    let new_entities = extract(new.text(), &grammar)?;
    tracing::info!(
        "extracted {} old / {} new entities",
        old_entities.len(),
        new_entities.len()
    );
    for (side, entities) in [("old", &old_entities), ("new", &new_entities)] {
        if !entities.shadowed().is_empty() {
            tracing::debug!(
                "{} side: duplicate names kept last occurrence: {}",
                side,
                entities.shadowed().join(", ")
            );
        }
    }

    Ok(SemanticDiffReport {
        path: display_path(&request.path),
        old_revision: request.old_revision.clone(),
        new_revision: request.new_revision.clone(),
        language: entry.lang,
        normalization: NormalizationSummary {
            old: old.outcome(),
            new: new.outcome(),
        },
        comparison: diff(&old_entities, &new_entities),
    })
}

fn fetch(provider: &dyn SourceProvider, revision: &str, path: &Path) -> Result<String> {
    let content = provider.fetch(revision, path)?;
    tracing::debug!("fetched {} bytes at {}", content.len(), revision);
    Ok(content)
}

fn normalize_side(normalizer: &Normalizer, side: &str, raw: &str) -> Normalization {
    let result = normalizer.normalize(raw);
    match result.fallback_reason() {
        None => tracing::debug!("{} side normalized", side),
        Some(reason) => tracing::warn!("{} side not normalized: {}", side, reason),
    }
    result
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}
