//! Per-file untested allowances declared in source comments.
//!
//! A file opts into an allowance with a comment such as
//! `// untested sections: 2`, `// untested sections: 3%` or
//! `// untested sections: ignore`. Only the first declaration in a file
//! counts.

use serde::Serialize;
use tracing::debug;

use crate::error::{CoverageError, CoverageResult};
use crate::markers::Markers;

/// How a threshold limit is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMode {
    /// Exact number of untested sections
    Count,
    /// Untested sections per source line, rounded
    Percent,
}

/// Untested allowance for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Threshold {
    /// How the limit is interpreted
    pub mode: ThresholdMode,
    /// Allowed untested sections, a count or a percentage
    pub limit: usize,
    /// Line of the declaration comment, absent for the implicit zero
    pub declared_at: Option<usize>,
}

impl Default for Threshold {
    fn default() -> Self {
        Self {
            mode: ThresholdMode::Count,
            limit: 0,
            declared_at: None,
        }
    }
}

/// Extract the allowance declared in `content`. Files without a
/// declaration get the implicit `Count` limit of zero.
///
/// # Errors
///
/// Returns [`CoverageError::ThresholdSyntax`] when the declared value is
/// neither a number, a percentage nor `ignore`.
pub fn resolve_threshold(
    path: &str,
    content: &str,
    markers: &Markers,
) -> CoverageResult<Threshold> {
    let Some(captures) = markers.per_file_config.captures(content) else {
        return Ok(Threshold::default());
    };

    let value = &captures[1];
    let declared_at = Some(line_of_offset(
        content,
        captures.get(0).map_or(0, |m| m.start()),
    ));
    debug!(path, value, "found untested sections declaration");

    // 100% can never be exceeded, so the file is effectively ignored
    if value == "ignore" {
        return Ok(Threshold {
            mode: ThresholdMode::Percent,
            limit: 100,
            declared_at,
        });
    }

    let (mode, digits) = match value.strip_suffix('%') {
        Some(digits) => (ThresholdMode::Percent, digits),
        None => (ThresholdMode::Count, value),
    };
    let limit = digits
        .parse()
        .map_err(|_| CoverageError::ThresholdSyntax {
            path: path.to_string(),
            value: value.to_string(),
        })?;

    Ok(Threshold {
        mode,
        limit,
        declared_at,
    })
}

/// 1-based line number holding the given byte offset.
fn line_of_offset(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}
