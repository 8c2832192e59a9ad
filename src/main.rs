/*!
 * Command-line interface for codemerge
 */

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use codemerge::clipboard::copy_to_clipboard;
use codemerge::config::{Args, Config};
use codemerge::error::MergeError;
use codemerge::merge::merge_project;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut command = Args::command();
        generate(shell, &mut command, "codemerge", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error merging files: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> codemerge::Result<()> {
    // Create and validate configuration before touching the tree
    let config = Config::from_args(args)?;
    init_logging(config.verbosity);
    config.validate()?;

    let merged = merge_project(&config)?;

    // Stdout first; the clipboard is a best-effort side channel
    let mut stdout = io::stdout().lock();
    stdout.write_all(merged.as_bytes())?;
    stdout.flush()?;

    if config.clipboard {
        match copy_to_clipboard(&merged) {
            Ok(()) => eprintln!("Merged output copied to clipboard."),
            Err(e) => eprintln!("Warning: {}", MergeError::from(e)),
        }
    }

    Ok(())
}

/// Send logs to stderr; RUST_LOG takes precedence over --verbose
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .try_init();
}
