//! semdiff CLI entry point

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use semdiff::{
    render_json, render_text, run_semantic_diff, Cli, DiffRequest, GitSourceProvider,
    OutputFormat, SemdiffConfig, SemdiffError,
};

fn main() -> ExitCode {
    match run() {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(SemdiffError::Usage { message }) => {
            eprintln!("{}", message);
            SemdiffError::Usage { message }.exit_code()
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run() -> semdiff::Result<String> {
    let cli = Cli::parse_args(std::env::args_os())?;

    let config = match &cli.config {
        Some(path) => SemdiffConfig::load_from(path)?,
        None => SemdiffConfig::load()?,
    };
    init_logging(&cli, &config);

    let registry = config.registry();
    let provider = GitSourceProvider::new(cli.repo.clone());
    let request = DiffRequest {
        path: cli.file.clone(),
        old_revision: cli.old_rev.clone(),
        new_revision: cli.new_rev.clone(),
        normalize: config.normalize.enabled && !cli.no_normalize,
    };

    let report = run_semantic_diff(&request, &registry, &provider)?;

    match cli.format {
        OutputFormat::Text => Ok(render_text(&report, &cli.color.palette())),
        OutputFormat::Json => Ok(format!("{}\n", render_json(&report)?)),
    }
}

/// Logs go to stderr. `RUST_LOG` wins, then `--verbose`, then the config level.
fn init_logging(cli: &Cli, config: &SemdiffConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if cli.verbose {
            "debug"
        } else {
            config.logging.level.as_str()
        };
        EnvFilter::new(format!("semdiff={}", level))
    });

    // Only fails if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
