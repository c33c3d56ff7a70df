//! Testcov: fail the test suite when new untested code appears.
//!
//! Parses Go coverage profiles and judges every covered file against the
//! allowance declared in its own source comments. A file without a
//! declaration allows no untested sections at all, so coverage can only
//! move in one direction.
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────┐   ┌───────────┐   ┌─────────────┐   ┌──────────┐
//! │ coverage │   │ untested  │   │ suppression │   │ verdict  │
//! │ profile  │──►│ sections  │──►│ + allowance │──►│ per file │
//! └──────────┘   │ per file  │   │ per file    │   └──────────┘
//!                └───────────┘   └─────────────┘
//! ```
//!
//! The entry point is [`CoverageCheck`], which runs the whole pipeline
//! and returns a [`CheckReport`]. The individual stages are public for
//! callers that need only part of it.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod error;
mod judge;
mod markers;
mod paths;
mod profile;
mod section;
mod suppress;
mod threshold;

pub use error::{CoverageError, CoverageResult};
pub use judge::{CheckReport, CoverageCheck, FileOutcome, FileReport};
pub use markers::Markers;
pub use paths::{PathPair, PathResolver};
pub use profile::{group_by_path, parse_profile, SectionGroup};
pub use section::Section;
pub use suppress::{filter_suppressed, FilterOutcome, UnclosedBlock};
pub use threshold::{resolve_threshold, Threshold, ThresholdMode};
