//! Test execution with coverage collection

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::ProgressReporter;
use std::path::Path;
use std::process::Command;
use testcov::{CheckReport, CoverageCheck};

/// Runs the wrapped test command with coverage enabled, then checks the
/// resulting profile for new untested code.
#[derive(Debug)]
pub struct TestRunner {
    config: CliConfig,
}

impl TestRunner {
    /// Create a new test runner
    #[must_use]
    pub const fn new(config: CliConfig) -> Self {
        Self { config }
    }

    /// Run the test command and check coverage afterwards.
    ///
    /// Returns the exit code the process should finish with: the test
    /// command's own code when it fails, otherwise the coverage verdict.
    pub fn run(&self, args: &[String]) -> CliResult<u8> {
        let profile = self.config.profile_path.clone();

        // a stale profile from an earlier run must not get checked when
        // the test command fails before writing a new one
        let _ = std::fs::remove_file(&profile);

        let result = self.run_and_check(args, &profile);

        // users who pass -cover themselves want to inspect the profile
        // TODO: honor a user-supplied -coverprofile path and keep that file instead
        if !args.iter().any(|arg| arg == "-cover") {
            let _ = std::fs::remove_file(&profile);
        }

        result
    }

    fn run_and_check(&self, args: &[String], profile: &Path) -> CliResult<u8> {
        let command = coverage_command(args, profile);

        let reporter = self.reporter();
        if self.config.verbosity.is_verbose() {
            reporter.info(&format!("running: {}", command.join(" ")));
        }

        let exit = run_streamed(&command);
        if exit != 0 {
            // the test run itself failed, its own output explains why
            return Ok(exit);
        }

        let report = run_coverage_check(profile)?;
        let verdict = report.render_text();
        reporter.diagnostic(&verdict);

        if self.config.verbosity.is_verbose() {
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

        Ok(report.exit_code())
    }

    fn reporter(&self) -> ProgressReporter {
        ProgressReporter::new(
            self.config.color.should_color(),
            self.config.verbosity.is_quiet(),
        )
    }
}

/// Check a coverage profile against the current directory, honoring GOPATH
/// when resolving module-prefixed source paths.
pub fn run_coverage_check(profile: &Path) -> CliResult<CheckReport> {
    let cwd = std::env::current_dir()?;
    let mut check = CoverageCheck::new(cwd);
    if let Some(gopath) = std::env::var_os("GOPATH").filter(|p| !p.is_empty()) {
        check = check.with_module_root(gopath);
    }
    Ok(check.check_profile_file(profile)?)
}

/// Assemble the test command with coverage flags spliced in.
///
/// ginkgo requires subcommands first and package paths last, so the flags
/// go right before the final argument. Everything else runs through
/// `go test`, which accepts flags after the package list.
fn coverage_command(args: &[String], profile: &Path) -> Vec<String> {
    let profile_arg = profile.display().to_string();

    let ginkgo = args
        .first()
        .is_some_and(|first| format!("/{first}").ends_with("/ginkgo"));

    if ginkgo {
        if let Some((last, init)) = args.split_last() {
            let mut command = init.to_vec();
            command.extend([
                "-cover".to_string(),
                "-coverprofile".to_string(),
                profile_arg,
                last.clone(),
            ]);
            return command;
        }
    }

    let mut command = vec!["go".to_string(), "test".to_string()];
    command.extend_from_slice(args);
    command.extend(["-coverprofile".to_string(), profile_arg]);
    command
}

/// Run a command with inherited stdio and return its exit code.
fn run_streamed(command: &[String]) -> u8 {
    let Some((name, args)) = command.split_first() else {
        return 1;
    };

    match Command::new(name).args(args).status() {
        Ok(status) => status.code().map_or_else(
            || exit_code_unavailable(name, args),
            |code| u8::try_from(code).unwrap_or(1),
        ),
        Err(_) => exit_code_unavailable(name, args),
    }
}

fn exit_code_unavailable(name: &str, args: &[String]) -> u8 {
    eprintln!("Could not get exit code for failed program: {name}, {args:?}");
    1
}
