//! `arcana` — the Arcana toolchain's command-line entry point.
//!
//! Grounded on `faxt::{Cli, main}`'s clap-derive shape: one global verbose
//! flag feeding a `tracing-subscriber` filter, one subcommand per mode.
//! `ARCANA_LOG` overrides the filter directly (e.g. `ARCANA_LOG=debug`)
//! the way `faxt`'s own subscriber setup honors its env var first.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, fmt::format::FmtSpan, prelude::*, EnvFilter};

use arcana_drv::{read_source, render_diagnostic, run_aedificatio, run_exsecutio, run_inspectio};

#[derive(Parser, Debug)]
#[command(name = "arcana")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lex, parse, validate and run Arcana programs")]
struct Cli {
    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a source file and run it via the host interpreter
    Exsecutio {
        file: PathBuf,
        /// Print the transpiled host text instead of running it
        #[arg(long)]
        perscribere: bool,
    },
    /// Validate a source file without running it (reserved)
    Inspectio { file: PathBuf },
    /// Build project artifacts from a source file (reserved)
    Aedificatio { file: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (file, code) = match cli.command {
        Commands::Exsecutio { file, perscribere } => {
            let code = match read_source(&file) {
                Ok(source) => run_exsecutio(&source, perscribere),
                Err(e) => {
                    eprintln!("{}", render_diagnostic(&e));
                    arcana_drv::EXIT_FAILURE
                }
            };
            (file, code)
        }
        Commands::Inspectio { file } => {
            let code = match read_source(&file) {
                Ok(source) => run_inspectio(&source),
                Err(e) => {
                    eprintln!("{}", render_diagnostic(&e));
                    arcana_drv::EXIT_FAILURE
                }
            };
            (file, code)
        }
        Commands::Aedificatio { file } => {
            let code = match read_source(&file) {
                Ok(source) => run_aedificatio(&source),
                Err(e) => {
                    eprintln!("{}", render_diagnostic(&e));
                    arcana_drv::EXIT_FAILURE
                }
            };
            (file, code)
        }
    };

    tracing::debug!(file = %file.display(), exit_code = code, "arcana run complete");
    ExitCode::from(code as u8)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("ARCANA_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    let subscriber = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);
    let _ = tracing_subscriber::registry().with(filter).with(subscriber).try_init();
}
