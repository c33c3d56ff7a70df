//! Untested source sections as reported by the coverage profile.

use serde::Serialize;

use crate::error::{CoverageError, CoverageResult};

/// A contiguous run of untested statements in one source file, parsed
/// from a profile data line such as `github.com/foo/bar/baz.go:1.2,3.5 1 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Import-style path of the covered file
    pub path: String,
    /// First line of the section (1-based)
    pub start_line: usize,
    /// Column the section starts at
    pub start_char: usize,
    /// Last line of the section (1-based)
    pub end_line: usize,
    /// Column the section ends at
    pub end_char: usize,
    /// Derived ordering key, `start_line * 100000 + start_char`
    #[serde(skip)]
    pub sort_key: usize,
}

impl Section {
    /// Parse one profile data line.
    ///
    /// # Errors
    ///
    /// Returns [`CoverageError::ProfileSyntax`] when the line is not in
    /// profile format.
    pub fn parse(line: &str) -> CoverageResult<Self> {
        let syntax_error = |message: &str| CoverageError::ProfileSyntax {
            line: line.to_string(),
            message: message.to_string(),
        };

        let (path, location) = line
            .split_once(':')
            .ok_or_else(|| syntax_error("missing `:` between path and location"))?;

        // location is "<line>.<char>,<line>.<char> <statements> <count>"
        let mut fields = location.split([',', '.', ' ']);
        let mut next_number = |name: &str| -> CoverageResult<usize> {
            fields
                .next()
                .ok_or_else(|| syntax_error(&format!("missing {name}")))?
                .parse()
                .map_err(|_| syntax_error(&format!("non-numeric {name}")))
        };

        let start_line = next_number("start line")?;
        let start_char = next_number("start column")?;
        let end_line = next_number("end line")?;
        let end_char = next_number("end column")?;

        Ok(Self {
            path: path.to_string(),
            start_line,
            start_char,
            end_line,
            end_char,
            sort_key: start_line * 100000 + start_char,
        })
    }

    /// Location rendered the way the profile writes it, `1.2,3.5`.
    #[must_use]
    pub fn location(&self) -> String {
        format!(
            "{}.{},{}.{}",
            self.start_line, self.start_char, self.end_line, self.end_char
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_profile_line() {
        let section = Section::parse("github.com/foo/bar/baz.go:1.2,3.5 1 0").unwrap();
        assert_eq!(section.path, "github.com/foo/bar/baz.go");
        assert_eq!(section.start_line, 1);
        assert_eq!(section.start_char, 2);
        assert_eq!(section.end_line, 3);
        assert_eq!(section.end_char, 5);
    }

    #[test]
    fn test_sort_key_orders_by_line_then_column() {
        let section = Section::parse("foo.go:1.2,3.5 1 0").unwrap();
        assert_eq!(section.sort_key, 100002);

        let later_column = Section::parse("foo.go:1.30,3.5 1 0").unwrap();
        let later_line = Section::parse("foo.go:2.1,3.5 1 0").unwrap();
        assert!(section.sort_key < later_column.sort_key);
        assert!(later_column.sort_key < later_line.sort_key);
    }

    #[test]
    fn test_location_round_trips_coordinates() {
        let section = Section::parse("foo.go:12.4,20.10 3 0").unwrap();
        assert_eq!(section.location(), "12.4,20.10");
    }

    #[test]
    fn test_rejects_line_without_separator() {
        let err = Section::parse("foo.go 1.2,3.5 1 0").unwrap_err();
        assert!(err.to_string().contains("Malformed profile line"));
    }

    #[test]
    fn test_rejects_non_numeric_positions() {
        assert!(Section::parse("foo.go:a.2,3.5 1 0").is_err());
    }

    #[test]
    fn test_rejects_truncated_location() {
        assert!(Section::parse("foo.go:1.2 0").is_err());
    }
}
