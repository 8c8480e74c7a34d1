//! omx-validate CLI entry point.
//!
//! Validates an OMX matrix file against the convention's twelve checks and
//! prints a per-check report plus an overall verdict.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use omx_validate::checks::all_checks;
use omx_validate::cli::output::{get_formatter, OutputFormat};
use omx_validate::version::build_info;
use omx_validate::run_checks;

/// Validate OMX matrix files against the OMX convention
#[derive(Parser)]
#[command(name = "omx-validate")]
#[command(version)]
#[command(about = "Validate OMX matrix files against the OMX convention")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all twelve convention checks against a file
    Validate {
        /// OMX file to validate
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Only output failing checks
        #[arg(long)]
        quiet: bool,

        /// Include per-item diagnostic lines for passing checks too
        #[arg(short, long)]
        verbose: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// List the checks in the suite
    List,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Validate {
            file,
            format,
            quiet,
            verbose,
            no_color,
        } => validate(&file, format, quiet, verbose, no_color),
        Command::List => {
            print_check_list();
            ExitCode::SUCCESS
        }
    }
}

fn validate(
    file: &PathBuf,
    format: OutputFormat,
    quiet: bool,
    verbose: bool,
    no_color: bool,
) -> ExitCode {
    let report = match run_checks(file) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::from(2);
        }
    };

    let formatter = get_formatter(format, no_color, verbose, quiet);
    println!("{}", formatter.format(&report));

    if report.overall() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn print_check_list() {
    println!("{}", build_info());
    println!();
    println!("Checks (required checks decide the overall verdict):");
    for check in all_checks() {
        let required = if check.required { "required" } else { "optional" };
        println!("  {:2}  {}  {}", check.number, required, check.name);
    }
}
