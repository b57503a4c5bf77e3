//! Report rendering
//!
//! Text output order is fixed: modified entities (each with its line diff),
//! then additions, then removals. Each group is sorted by name. Colors come
//! from a [`Palette`] passed in by the caller.

use std::fmt::Write as _;

use console::Style;
use serde::Serialize;

use crate::differ::{ComparisonResult, LineTag, ModifiedEntity};
use crate::error::Result;
use crate::lang::Lang;
use crate::normalize::{FallbackReason, NormalizationOutcome};

/// Everything known about one comparison
#[derive(Debug, Clone, Serialize)]
pub struct SemanticDiffReport {
    pub path: String,
    pub old_revision: String,
    pub new_revision: String,
    pub language: Lang,
    pub normalization: NormalizationSummary,
    #[serde(flatten)]
    pub comparison: ComparisonResult,
}

/// Normalization outcome of each side
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizationSummary {
    pub old: NormalizationOutcome,
    pub new: NormalizationOutcome,
}

/// Styles used by the text renderer
#[derive(Debug, Clone)]
pub struct Palette {
    pub header: Style,
    pub info: Style,
    pub added: Style,
    pub removed: Style,
    pub modified: Style,
    pub name: Style,
}

impl Palette {
    /// No escape codes at all
    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            info: Style::new(),
            added: Style::new(),
            removed: Style::new(),
            modified: Style::new(),
            name: Style::new(),
        }
    }

    /// ANSI colors, emitted regardless of terminal detection
    pub fn colored() -> Self {
        Self {
            header: Style::new().magenta().force_styling(true),
            info: Style::new().blue().force_styling(true),
            added: Style::new().green().force_styling(true),
            removed: Style::new().red().force_styling(true),
            modified: Style::new().yellow().force_styling(true),
            name: Style::new().bold().force_styling(true),
        }
    }
}

/// First 7 characters of a revision, like a short SHA
pub fn abbreviate_revision(revision: &str) -> String {
    revision.chars().take(7).collect()
}

/// Render the human-readable report
pub fn render_text(report: &SemanticDiffReport, palette: &Palette) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}",
        palette
            .header
            .apply_to(format!("--- Semantic Analysis: {} ---", report.path))
    );
    let _ = writeln!(
        out,
        "{}",
        palette.info.apply_to(format!(
            "Comparing {} -> {}",
            abbreviate_revision(&report.old_revision),
            abbreviate_revision(&report.new_revision)
        ))
    );
    for (side, outcome) in [
        ("old", &report.normalization.old),
        ("new", &report.normalization.new),
    ] {
        if let NormalizationOutcome::Raw(reason) = outcome {
            if *reason != FallbackReason::Disabled {
                let _ = writeln!(
                    out,
                    "{}",
                    palette
                        .info
                        .apply_to(format!("note: {} side not normalized ({})", side, reason))
                );
            }
        }
    }
    out.push('\n');

    let comparison = &report.comparison;
    if comparison.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            palette.added.apply_to("No structural logic changes detected.")
        );
        return out;
    }

    for entity in &comparison.modified {
        render_modified(&mut out, entity, palette);
    }

    if !comparison.added.is_empty() {
        let _ = writeln!(out, "{}", palette.added.apply_to("ADDED FUNCTIONS/CLASSES:"));
        for entity in &comparison.added {
            let _ = writeln!(
                out,
                "  + {} ({}, lines {})",
                palette.name.apply_to(&entity.name),
                entity.kind,
                entity.line_span()
            );
        }
    }

    if !comparison.removed.is_empty() {
        let _ = writeln!(out, "{}", palette.removed.apply_to("REMOVED FUNCTIONS/CLASSES:"));
        for entity in &comparison.removed {
            let _ = writeln!(
                out,
                "  - {} ({})",
                palette.name.apply_to(&entity.name),
                entity.kind
            );
        }
    }

    out
}

fn render_modified(out: &mut String, entity: &ModifiedEntity, palette: &Palette) {
    let _ = writeln!(
        out,
        "{} {} ({}, lines {})",
        palette.modified.apply_to("MODIFIED:"),
        palette.name.apply_to(&entity.name),
        entity.new.kind,
        entity.new.line_span()
    );

    if entity.diff.is_empty() {
        let _ = writeln!(
            out,
            "  {}",
            palette
                .info
                .apply_to("(no line-level change; likely a comment or formatting shift)")
        );
    }

    for hunk in &entity.diff.hunks {
        let _ = writeln!(out, "  {}", palette.info.apply_to(hunk.header()));
        for line in &hunk.lines {
            let style = match line.tag {
                LineTag::Added => &palette.added,
                LineTag::Removed => &palette.removed,
            };
            let _ = writeln!(out, "  {}", style.apply_to(line.prefixed()));
        }
    }
    out.push('\n');
}

/// Render the report as pretty-printed JSON
pub fn render_json(report: &SemanticDiffReport) -> Result<String> {
    let json = serde_json::to_string_pretty(report).map_err(std::io::Error::from)?;
    Ok(json)
}
