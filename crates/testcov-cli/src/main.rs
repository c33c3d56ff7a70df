//! Testcov CLI: fail Go test runs that introduce untested code
//!
//! ## Usage
//!
//! ```bash
//! testcov test ./...              # go test ./... with coverage checked
//! testcov test -run TestFoo ./... # extra arguments go to go test
//! testcov check                   # re-check an existing coverage.out
//! testcov check --format json     # machine-readable report
//! ```

use clap::Parser;
use std::process::ExitCode;
use testcov_cli::{
    run_coverage_check, CheckArgs, Cli, CliConfig, CliError, CliResult, ColorChoice, Commands,
    ProgressReporter, ReportFormat, TestRunner, Verbosity,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    // Build configuration from CLI args
    let config = build_config(&cli);
    init_tracing(config.verbosity);
    tracing::debug!(verbosity = ?config.verbosity, "parsed configuration");

    match cli.command {
        Commands::Test(args) => {
            let code = TestRunner::new(config).run(&args.args)?;
            Ok(ExitCode::from(code))
        }
        Commands::Check(args) => run_check(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let color: ColorChoice = cli.color.clone().into();

    CliConfig::new().with_verbosity(verbosity).with_color(color)
}

/// Route events from the coverage engine to stderr, filtered by
/// `TESTCOV_LOG` when set, otherwise by verbosity.
fn init_tracing(verbosity: Verbosity) {
    let default_filter = if verbosity.is_debug() {
        "debug"
    } else if verbosity.is_verbose() {
        "info"
    } else if verbosity.is_quiet() {
        "error"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_env("TESTCOV_LOG").unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_check(config: &CliConfig, args: &CheckArgs) -> CliResult<ExitCode> {
    if !args.profile.exists() {
        return Err(CliError::config(format!(
            "coverage profile {} not found (run `testcov test` to produce it)",
            args.profile.display()
        )));
    }

    let report = run_coverage_check(&args.profile)?;
    let reporter = ProgressReporter::new(
        config.color.should_color(),
        config.verbosity.is_quiet(),
    );

    // verdict text and block warnings go to stderr in every format
    let verdict = report.render_text();
    reporter.diagnostic(&verdict);

    match args.format {
        ReportFormat::Text => {
            if config.verbosity.is_verbose() {
                // the warn verdict carries no trailing newline
                if !verdict.is_empty() && !verdict.ends_with('\n') {
                    reporter.diagnostic("\n");
                }
                if !report.passed() {
                    reporter.failure("new untested sections introduced");
                } else if report.warned() {
                    reporter.warning("fewer untested sections than configured");
                } else {
                    reporter.success("no new untested sections");
                }
            }
        }
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| CliError::report_generation(e.to_string()))?;
            println!("{json}");
        }
    }

    Ok(ExitCode::from(report.exit_code()))
}
