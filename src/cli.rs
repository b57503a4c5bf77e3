//! CLI argument definitions using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::error::{Result, SemdiffError};
use crate::report::Palette;

/// Entity-level semantic diff of one file between two git revisions
#[derive(Parser, Debug)]
#[command(name = "semdiff")]
#[command(
    about = "Report which functions, classes and methods changed in a file between two revisions"
)]
#[command(version)]
pub struct Cli {
    /// File to compare (relative to the current directory or --repo)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Old revision (commit, branch, tag, or WORKING for the working tree)
    #[arg(value_name = "OLD_REV")]
    pub old_rev: String,

    /// New revision (commit, branch, tag, or WORKING for the working tree)
    #[arg(value_name = "NEW_REV")]
    pub new_rev: String,

    /// Output format
    #[arg(short, long, default_value = "text", value_enum)]
    pub format: OutputFormat,

    /// When to color text output
    #[arg(long, default_value = "auto", value_enum)]
    pub color: ColorChoice,

    /// Skip the formatter and compare raw source
    #[arg(long)]
    pub no_normalize: bool,

    /// Run git in this directory instead of the current one
    #[arg(short = 'C', long, value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, value_name = "FILE", env = "SEMDIFF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// Full report as JSON
    Json,
}

/// Color options for text output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ColorChoice {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn palette(self) -> Palette {
        let colored = match self {
            Self::Auto => console::colors_enabled(),
            Self::Always => true,
            Self::Never => false,
        };
        if colored {
            Palette::colored()
        } else {
            Palette::plain()
        }
    }
}

impl Cli {
    /// Parse arguments, turning malformed invocations into [`SemdiffError::Usage`]
    ///
    /// `--help` and `--version` print and exit the process.
    pub fn parse_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => Ok(cli),
            Err(e) if !e.use_stderr() => e.exit(),
            Err(e) => Err(SemdiffError::Usage {
                message: e.render().to_string().trim_end().to_string(),
            }),
        }
    }
}
