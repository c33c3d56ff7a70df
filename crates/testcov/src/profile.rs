//! Coverage profile parsing and grouping.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::CoverageResult;
use crate::section::Section;

/// Sections keyed by profile path. Iterating the map yields paths in
/// lexicographic order; each group keeps the profile's own order.
pub type SectionGroup = BTreeMap<String, Vec<Section>>;

/// Extract the untested sections from coverage profile text.
///
/// The first non-empty line is the mode header and never carries data.
/// A data line is untested when its trailing execution count is exactly
/// `0`, which the profile writes as a `" 0"` suffix.
///
/// # Errors
///
/// Returns [`CoverageError::ProfileSyntax`] when an untested data line
/// cannot be parsed.
///
/// [`CoverageError::ProfileSyntax`]: crate::error::CoverageError::ProfileSyntax
pub fn parse_profile(content: &str) -> CoverageResult<Vec<Section>> {
    let mut lines = content.split('\n').filter(|line| !line.is_empty());

    // drop the `mode:` header
    if lines.next().is_none() {
        return Ok(Vec::new());
    }

    let mut sections = Vec::new();
    for line in lines {
        if line.ends_with(" 0") {
            sections.push(Section::parse(line)?);
        }
    }
    debug!(untested = sections.len(), "parsed coverage profile");
    Ok(sections)
}

/// Group sections by their profile path, preserving profile order
/// within each file.
#[must_use]
pub fn group_by_path(sections: Vec<Section>) -> SectionGroup {
    let mut grouped = SectionGroup::new();
    for section in sections {
        grouped
            .entry(section.path.clone())
            .or_default()
            .push(section);
    }
    grouped
}
