//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Testcov: go test wrapper that fails when new untested code appears
#[derive(Parser, Debug)]
#[command(name = "testcov")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run go test with coverage and judge the result
    ///
    /// All arguments are passed through to `go test` (or to `ginkgo`
    /// when it is named first), with the coverage profile flags spliced
    /// in. The profile is judged once the tests pass.
    ///
    /// Flags testcov claims for itself (`-v`, `-q`, `--color`) reach
    /// go test only after a `--` separator: `testcov test -- -v ./...`.
    Test(TestArgs),

    /// Judge an existing coverage profile without running tests
    Check(CheckArgs),
}

/// Arguments for the test command
#[derive(Parser, Debug)]
pub struct TestArgs {
    /// Arguments passed through to go test (or ginkgo)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Coverage profile to judge
    #[arg(short, long, default_value = "coverage.out")]
    pub profile: PathBuf,

    /// Report format
    #[arg(short, long, default_value = "text")]
    pub format: ReportFormat,
}

/// Check report output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Plain diagnostics on stderr
    #[default]
    Text,
    /// JSON report on stdout
    Json,
}

/// Color output mode
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
