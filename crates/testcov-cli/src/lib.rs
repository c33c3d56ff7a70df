//! Testcov CLI Library
//!
//! Command-line interface for the testcov coverage policy: run Go tests
//! with coverage enabled and fail when new untested code appears.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
mod output;
mod runner;

pub use commands::{CheckArgs, Cli, ColorArg, Commands, ReportFormat, TestArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::ProgressReporter;
pub use runner::{run_coverage_check, TestRunner};
