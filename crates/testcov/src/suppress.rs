//! Filtering of untested sections that are deliberately marked as such.
//!
//! Two marker styles exist. An inline `// untested section` comment on
//! any line of a section, or directly above its first line, drops that
//! section. A `// untested block` comment between two sections drops
//! every section up to the line closing the comment's scope, a line
//! starting with the comment's indentation and `}`.

use serde::Serialize;
use tracing::debug;

use crate::markers::Markers;
use crate::section::Section;

/// Result of suppression filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Sections still counting against the allowance, in input order
    pub kept: Vec<Section>,
    /// Block markers whose closing line was never found
    pub unclosed_blocks: Vec<UnclosedBlock>,
}

/// An `// untested block` comment without a matching closing line.
/// The sections after it fall back to inline handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnclosedBlock {
    /// End line of the section before the marker, 1 for the first
    pub previous_end: usize,
    /// Start line of the section that triggered the search
    pub section_start: usize,
    /// Line prefix that would have closed the block
    pub closing_prefix: String,
}

impl UnclosedBlock {
    /// Advisory printed to stderr, without a trailing newline.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "testcov: unable to find the end of the `// untested block` started between {} and {}, a line starting with {}",
            self.previous_end, self.section_start, self.closing_prefix
        )
    }
}

enum BlockSearch {
    Found(usize),
    Unclosed(UnclosedBlock),
    None,
}

/// Drop sections covered by inline or block markers. `lines` is the
/// source file split on `\n`.
#[must_use]
pub fn filter_suppressed(sections: Vec<Section>, lines: &[&str], markers: &Markers) -> FilterOutcome {
    let mut kept = Vec::new();
    let mut unclosed_blocks = Vec::new();
    let mut ignored_block_end: Option<usize> = None;

    for (index, section) in sections.iter().enumerate() {
        // still inside the active block
        if ignored_block_end.is_some_and(|end| section.end_line <= end) {
            continue;
        }

        match next_ignore_block(&sections, index, lines, markers) {
            BlockSearch::Found(end_line) => {
                ignored_block_end = Some(end_line);
                continue;
            }
            BlockSearch::Unclosed(warning) => {
                ignored_block_end = None;
                unclosed_blocks.push(warning);
            }
            BlockSearch::None => ignored_block_end = None,
        }

        for line_number in section.start_line..=section.end_line {
            if markers.inline_ignore.is_match(line_at(lines, line_number)) {
                break; // marked on one of its own lines
            }
            if line_number >= 2
                && markers
                    .leading_inline_ignore
                    .is_match(line_at(lines, line_number - 1))
            {
                break; // marked on the line above
            }
            if line_number == section.end_line {
                kept.push(section.clone());
            }
        }
    }

    debug!(
        kept = kept.len(),
        suppressed = sections.len() - kept.len(),
        "filtered marked sections"
    );
    FilterOutcome {
        kept,
        unclosed_blocks,
    }
}

/// Look for a block marker in the comment-only gap before the section at
/// `index` and resolve the line closing its scope.
fn next_ignore_block(
    sections: &[Section],
    index: usize,
    lines: &[&str],
    markers: &Markers,
) -> BlockSearch {
    let previous_end = if index == 0 {
        1
    } else {
        sections[index - 1].end_line
    };
    let section_start = sections[index].start_line;

    let gap_start = previous_end.saturating_sub(1).min(lines.len());
    let gap_end = section_start.saturating_sub(1).clamp(gap_start, lines.len());
    let codeless = lines[gap_start..gap_end].join("\n");

    let Some(captures) = markers.block_ignore.captures(&codeless) else {
        return BlockSearch::None;
    };

    // the block runs until a line at the marker's indentation closes it
    let closing_prefix = format!("{}}}", &captures[1]);
    let scan_start = section_start.saturating_sub(1).min(lines.len());
    for (offset, line) in lines[scan_start..].iter().enumerate() {
        if line.starts_with(&closing_prefix) {
            return BlockSearch::Found(section_start + offset);
        }
    }

    BlockSearch::Unclosed(UnclosedBlock {
        previous_end,
        section_start,
        closing_prefix,
    })
}

/// 1-based line lookup, empty for out-of-range numbers.
fn line_at<'a>(lines: &[&'a str], number: usize) -> &'a str {
    number
        .checked_sub(1)
        .and_then(|index| lines.get(index))
        .copied()
        .unwrap_or("")
}
