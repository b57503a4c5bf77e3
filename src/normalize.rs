//! Best-effort source normalization through an external formatter
//!
//! Formatting both revisions the same way cancels out pure whitespace and
//! wrapping changes before entity texts are compared. It is never required:
//! whenever the formatter is missing or fails, the raw text is used and the
//! result says so.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use serde::Serialize;

use crate::lang::FormatterCommand;

/// Why the raw text was used instead of formatter output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    /// Normalization turned off by the caller
    Disabled,
    /// No formatter registered for this file kind
    FormatterNotConfigured,
    /// Formatter program not found on `PATH`
    FormatterNotFound(String),
    /// Formatter ran but could not complete (spawn error, non-zero exit,
    /// non-UTF-8 output)
    FormatterFailed(String),
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => f.write_str("normalization disabled"),
            Self::FormatterNotConfigured => f.write_str("no formatter configured"),
            Self::FormatterNotFound(program) => write!(f, "formatter '{}' not found", program),
            Self::FormatterFailed(detail) => write!(f, "formatter failed: {}", detail),
        }
    }
}

/// Result of [`Normalizer::normalize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalization {
    /// Formatter output
    Normalized(String),
    /// The input, unchanged
    FellBackToRaw { text: String, reason: FallbackReason },
}

impl Normalization {
    /// The text to parse, whichever path was taken
    pub fn text(&self) -> &str {
        match self {
            Self::Normalized(text) => text,
            Self::FellBackToRaw { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Normalized(text) => text,
            Self::FellBackToRaw { text, .. } => text,
        }
    }

    pub fn is_normalized(&self) -> bool {
        matches!(self, Self::Normalized(_))
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Self::Normalized(_) => None,
            Self::FellBackToRaw { reason, .. } => Some(reason),
        }
    }

    /// Serializable summary without the text
    pub fn outcome(&self) -> NormalizationOutcome {
        match self {
            Self::Normalized(_) => NormalizationOutcome::Normalized,
            Self::FellBackToRaw { reason, .. } => NormalizationOutcome::Raw(reason.clone()),
        }
    }
}

/// What happened to one side of the comparison, for reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationOutcome {
    Normalized,
    Raw(FallbackReason),
}

/// Runs one formatter (or none) over source text
#[derive(Debug, Clone)]
pub struct Normalizer {
    formatter: Option<FormatterCommand>,
    enabled: bool,
}

impl Normalizer {
    pub fn new(formatter: Option<FormatterCommand>) -> Self {
        Self {
            formatter,
            enabled: true,
        }
    }

    /// A normalizer that always returns its input
    pub fn disabled() -> Self {
        Self {
            formatter: None,
            enabled: false,
        }
    }

    /// Format `text`, falling back to `text` itself on any failure
    pub fn normalize(&self, text: &str) -> Normalization {
        let fallback = |reason: FallbackReason| {
            tracing::debug!("using raw text: {}", reason);
            Normalization::FellBackToRaw {
                text: text.to_string(),
                reason,
            }
        };

        if !self.enabled {
            return fallback(FallbackReason::Disabled);
        }
        let Some(formatter) = &self.formatter else {
            return fallback(FallbackReason::FormatterNotConfigured);
        };

        let program = match which::which(&formatter.program) {
            Ok(path) => path,
            Err(_) => return fallback(FallbackReason::FormatterNotFound(formatter.program.clone())),
        };

        tracing::debug!("normalizing {} bytes with {}", text.len(), formatter.display());
        match run_formatter(&program, &formatter.args, text) {
            Ok(formatted) => Normalization::Normalized(formatted),
            Err(detail) => fallback(FallbackReason::FormatterFailed(detail)),
        }
    }
}

/// Pipe `input` through `program args...` and return its stdout
fn run_formatter(
    program: &std::path::Path,
    args: &[String],
    input: &str,
) -> std::result::Result<String, String> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("failed to start: {}", e))?;

    // Feed stdin from another thread so a formatter that streams output
    // before reading all input cannot deadlock on a full pipe
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| "stdin not captured".to_string())?;
    let input = input.to_string();
    let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

    let output = child
        .wait_with_output()
        .map_err(|e| format!("failed to wait: {}", e))?;

    let written = writer
        .join()
        .unwrap_or_else(|_| Err(std::io::Error::other("writer thread panicked")));

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("exited with {}: {}", output.status, stderr.trim()));
    }
    // Output of a formatter that stopped reading early covers only part of
    // the input
    written.map_err(|e| format!("failed to write input: {}", e))?;

    String::from_utf8(output.stdout).map_err(|_| "output is not valid UTF-8".to_string())
}
