//! Comment markers recognized in covered source files.
//!
//! All patterns are compiled once per run and shared immutably; the
//! marker dialect is `// untested section` (inline), `// untested block`
//! (until the matching closing brace) and `// untested sections: <value>`
//! (per-file allowance).

use regex::Regex;

const INLINE_IGNORE: &str = r"//.*untested section(\s|:|,|$)";

/// Compiled marker patterns shared by the whole run.
#[derive(Debug, Clone)]
pub struct Markers {
    /// Inline ignore comment anywhere in a line
    pub(crate) inline_ignore: Regex,
    /// Line consisting of leading whitespace and an inline ignore comment
    pub(crate) leading_inline_ignore: Regex,
    /// Block ignore comment, capturing its indentation
    pub(crate) block_ignore: Regex,
    /// Per-file untested-sections declaration, capturing the value
    pub(crate) per_file_config: Regex,
    /// Generated-file paths exempt from checking
    pub(crate) generated_file: Regex,
}

impl Markers {
    /// Compile the marker patterns.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inline_ignore: Regex::new(INLINE_IGNORE).unwrap(),
            leading_inline_ignore: Regex::new(&format!(r"^\s*{INLINE_IGNORE}")).unwrap(),
            block_ignore: Regex::new(r"(?m)^([\t ]*)// *untested block(\s|:|,|$)").unwrap(),
            per_file_config: Regex::new(r"// *untested sections: *(\S+)").unwrap(),
            generated_file: Regex::new(r"/*generated.*\.go$").unwrap(),
        }
    }

    /// Whether a profile path names a generated file.
    #[must_use]
    pub fn is_generated(&self, path: &str) -> bool {
        self.generated_file.is_match(path)
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::new()
    }
}
