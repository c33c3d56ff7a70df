//! The coverage verdict: compare what the profile reports against what
//! each file allows.
//!
//! Files are judged independently and in path order. A file passes when
//! its untested sections match the allowance exactly, fails when new
//! ones appeared, and warns when the allowance is now too generous.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{CoverageError, CoverageResult};
use crate::markers::Markers;
use crate::paths::PathResolver;
use crate::profile::{group_by_path, parse_profile};
use crate::section::Section;
use crate::suppress::{filter_suppressed, UnclosedBlock};
use crate::threshold::{resolve_threshold, Threshold, ThresholdMode};

/// Verdict for a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOutcome {
    /// Generated file, exempt from any checking
    Skipped,
    /// Untested sections match the allowance
    Passed,
    /// Fewer untested sections than allowed
    Warned,
    /// New untested sections appeared
    Failed,
}

/// Everything the judge decided about one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Path shown in diagnostics
    pub display_path: String,
    /// Path the source was read from, absent for skipped files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_path: Option<PathBuf>,
    /// Verdict for this file
    pub outcome: FileOutcome,
    /// Untested sections counting against the allowance, ordered by
    /// position in the file
    pub untested: Vec<Section>,
    /// Allowance the file was judged against, absent for skipped files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<Threshold>,
    /// Untested sections per source line, percent mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub untested_percent: Option<usize>,
    /// Block markers whose closing line was never found
    pub block_warnings: Vec<UnclosedBlock>,
}

impl FileReport {
    fn skipped(path: &str) -> Self {
        Self {
            display_path: path.to_string(),
            read_path: None,
            outcome: FileOutcome::Skipped,
            untested: Vec::new(),
            threshold: None,
            untested_percent: None,
            block_warnings: Vec::new(),
        }
    }

    /// Stderr diagnostic for this file, `None` when there is nothing to
    /// say.
    #[must_use]
    pub fn diagnostic(&self) -> Option<String> {
        let threshold = self.threshold.as_ref()?;
        match self.outcome {
            FileOutcome::Failed => {
                let mut text = format!(
                    "{} new untested sections introduced {}\n",
                    self.display_path,
                    self.details(threshold)
                );
                for section in &self.untested {
                    text.push_str(&format!("{}:{}\n", self.display_path, section.location()));
                }
                Some(text)
            }
            FileOutcome::Warned => {
                let read = self.read_path.as_deref().unwrap_or_else(|| Path::new(""));
                Some(format!(
                    "{} has less untested sections {}, decrement configured untested?\nconfigured on: {}:{}",
                    self.display_path,
                    self.details(threshold),
                    read.display(),
                    threshold.declared_at.unwrap_or(0)
                ))
            }
            FileOutcome::Skipped | FileOutcome::Passed => None,
        }
    }

    fn details(&self, threshold: &Threshold) -> String {
        match threshold.mode {
            ThresholdMode::Count => format!(
                "({} current vs {} configured)",
                self.untested.len(),
                threshold.limit
            ),
            ThresholdMode::Percent => format!(
                "({}% current vs {}% configured)",
                self.untested_percent.unwrap_or(0),
                threshold.limit
            ),
        }
    }
}

/// Verdicts for every file in a profile, in path order.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// One report per file that had untested sections
    pub files: Vec<FileReport>,
}

impl CheckReport {
    /// True when no file failed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.files
            .iter()
            .all(|file| file.outcome != FileOutcome::Failed)
    }

    /// True when any file has a more generous allowance than it needs.
    #[must_use]
    pub fn warned(&self) -> bool {
        self.files
            .iter()
            .any(|file| file.outcome == FileOutcome::Warned)
    }

    /// Process exit code for this verdict.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        u8::from(!self.passed())
    }

    /// Full stderr payload: block warnings, then the verdict, per file.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut text = String::new();
        for file in &self.files {
            for warning in &file.block_warnings {
                text.push_str(&warning.message());
            }
            if let Some(diagnostic) = file.diagnostic() {
                text.push_str(&diagnostic);
            }
        }
        text
    }
}

/// Judges coverage profiles against per-file allowances.
#[derive(Debug, Clone)]
pub struct CoverageCheck {
    cwd: PathBuf,
    module_root: Option<PathBuf>,
    markers: Markers,
}

impl CoverageCheck {
    /// Create a check rooted at the given working directory.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            module_root: None,
            markers: Markers::new(),
        }
    }

    /// Resolve read paths through a module root as well, typically
    /// `$GOPATH`.
    #[must_use]
    pub fn with_module_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.module_root = Some(root.into());
        self
    }

    /// Judge the profile stored at `path`.
    ///
    /// # Errors
    ///
    /// Fails when the profile cannot be read or parsed, a source file
    /// cannot be read, or an allowance declaration is unparseable.
    pub fn check_profile_file(&self, path: &Path) -> CoverageResult<CheckReport> {
        let content = fs::read_to_string(self.cwd.join(path))?;
        self.check_profile(&content)
    }

    /// Judge an already loaded profile.
    ///
    /// # Errors
    ///
    /// Fails when the profile cannot be parsed, a source file cannot be
    /// read, or an allowance declaration is unparseable.
    pub fn check_profile(&self, content: &str) -> CoverageResult<CheckReport> {
        let sections = parse_profile(content)?;
        let grouped = group_by_path(sections);
        let resolver = PathResolver::new(self.cwd.clone(), self.module_root.clone());

        let mut files = Vec::new();
        for (path, sections) in grouped {
            // generated code is exempt before any path resolution
            if self.markers.is_generated(&path) {
                debug!(path = %path, "skipping generated file");
                files.push(FileReport::skipped(&path));
                continue;
            }
            files.push(self.check_file(&resolver, &path, sections)?);
        }
        Ok(CheckReport { files })
    }

    fn check_file(
        &self,
        resolver: &PathResolver,
        path: &str,
        sections: Vec<Section>,
    ) -> CoverageResult<FileReport> {
        let pair = resolver.resolve(path);
        let content = fs::read_to_string(self.cwd.join(&pair.read)).map_err(|error| {
            CoverageError::SourceRead {
                path: pair.read.display().to_string(),
                message: error.to_string(),
            }
        })?;

        let threshold =
            resolve_threshold(&pair.read.display().to_string(), &content, &self.markers)?;
        let lines: Vec<&str> = content.split('\n').collect();
        let filtered = filter_suppressed(sections, &lines, &self.markers);

        let actual = filtered.kept.len();
        let percent = percent_of(actual, lines.len());
        let outcome = match threshold.mode {
            ThresholdMode::Count => {
                if actual == threshold.limit {
                    FileOutcome::Passed
                } else if actual > threshold.limit {
                    FileOutcome::Failed
                } else {
                    FileOutcome::Warned
                }
            }
            ThresholdMode::Percent => {
                if percent <= threshold.limit {
                    FileOutcome::Passed
                } else {
                    FileOutcome::Failed
                }
            }
        };
        debug!(
            path = %pair.display,
            actual,
            limit = threshold.limit,
            ?outcome,
            "judged file"
        );

        let mut untested = filtered.kept;
        untested.sort_by_key(|section| section.sort_key);
        let untested_percent =
            matches!(threshold.mode, ThresholdMode::Percent).then_some(percent);

        Ok(FileReport {
            display_path: pair.display,
            read_path: Some(pair.read),
            outcome,
            untested,
            threshold: Some(threshold),
            untested_percent,
            block_warnings: filtered.unclosed_blocks,
        })
    }
}

/// Untested sections per source line, rounded half away from zero.
fn percent_of(sections: usize, lines: usize) -> usize {
    (sections as f64 / lines as f64 * 100.0).round() as usize
}
