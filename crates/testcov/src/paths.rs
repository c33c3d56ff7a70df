//! Resolution of profile paths to display and filesystem paths.
//!
//! Coverage profiles name files by import path, e.g.
//! `github.com/user/lib/pkg/file.go`. What the user wants to see and
//! what can be read from disk depend on where the tool runs: inside the
//! module, in a nested package directory, or outside the module root.

use std::path::PathBuf;

use tracing::debug;

/// Leading segments that form a module prefix: `foo.com/bar/baz` + file
const MODULE_PREFIX_SEGMENTS: usize = 3;

/// Display and filesystem paths for one covered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPair {
    /// Import-style path shown in diagnostics
    pub display: String,
    /// Path the source file is read from
    pub read: PathBuf,
}

/// Resolves profile paths against the working directory and the module
/// root (`$GOPATH`, when set).
#[derive(Debug, Clone)]
pub struct PathResolver {
    cwd: PathBuf,
    module_root: Option<PathBuf>,
}

impl PathResolver {
    /// Create a resolver for the given working directory.
    pub fn new(cwd: impl Into<PathBuf>, module_root: Option<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            module_root,
        }
    }

    /// Resolve one profile path to its display and read paths.
    #[must_use]
    pub fn resolve(&self, path: &str) -> PathPair {
        let parts: Vec<&str> = path.splitn(MODULE_PREFIX_SEGMENTS + 1, '/').collect();

        // reconstructed location under the module root, when it exists there
        let go_prefixed = self.module_root.as_ref().and_then(|root| {
            let prefixed = root.join("src").join(path);
            prefixed.exists().then_some(prefixed)
        });

        // path too short to carry a module prefix, return a good guess
        if parts.len() <= MODULE_PREFIX_SEGMENTS {
            let read = go_prefixed.unwrap_or_else(|| PathBuf::from(path));
            return self.resolved(PathPair {
                display: path.to_string(),
                read,
            });
        }

        let prefix = parts[..MODULE_PREFIX_SEGMENTS].join("/");
        let demodularized = self.find_file(parts[MODULE_PREFIX_SEGMENTS]);

        // not under the module root, strip the module nesting entirely
        let Some(read) = go_prefixed else {
            let read = PathBuf::from(&demodularized);
            return self.resolved(PathPair {
                display: demodularized,
                read,
            });
        };

        // running inside the module, short display plus full read path
        if self.cwd.ends_with(&prefix) {
            return self.resolved(PathPair {
                display: demodularized,
                read,
            });
        }

        // checking a remote package, keep the import path visible
        self.resolved(PathPair {
            display: path.to_string(),
            read,
        })
    }

    /// Shift leading directories off `path` until the remainder exists
    /// relative to the working directory. Empty when nothing matches.
    fn find_file(&self, path: &str) -> String {
        let mut parts: Vec<&str> = path.split('/').collect();
        while !parts.is_empty() {
            let candidate = parts.join("/");
            if self.cwd.join(&candidate).exists() {
                break;
            }
            parts.remove(0); // shift a directory and keep looking
        }
        parts.join("/")
    }

    fn resolved(&self, pair: PathPair) -> PathPair {
        debug!(display = %pair.display, read = %pair.read.display(), "resolved covered path");
        pair
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, path: &str) {
        let full = dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, "package foo\n").unwrap();
    }

    mod short_path_tests {
        use super::*;

        #[test]
        fn test_short_path_without_module_root_reads_in_place() {
            let dir = TempDir::new().unwrap();
            let resolver = PathResolver::new(dir.path(), None);
            let pair = resolver.resolve("foo.go");
            assert_eq!(pair.display, "foo.go");
            assert_eq!(pair.read, PathBuf::from("foo.go"));
        }

        #[test]
        fn test_short_path_under_module_root_reads_from_src() {
            let root = TempDir::new().unwrap();
            touch(&root, "src/foo.go");
            let cwd = TempDir::new().unwrap();

            let resolver = PathResolver::new(cwd.path(), Some(root.path().to_path_buf()));
            let pair = resolver.resolve("foo.go");
            assert_eq!(pair.display, "foo.go");
            assert_eq!(pair.read, root.path().join("src/foo.go"));
        }

        #[test]
        fn test_short_path_missing_from_module_root_reads_in_place() {
            let root = TempDir::new().unwrap();
            let cwd = TempDir::new().unwrap();

            let resolver = PathResolver::new(cwd.path(), Some(root.path().to_path_buf()));
            let pair = resolver.resolve("foo.go");
            assert_eq!(pair.read, PathBuf::from("foo.go"));
        }
    }

    mod module_path_tests {
        use super::*;

        #[test]
        fn test_outside_module_root_strips_prefix() {
            let cwd = TempDir::new().unwrap();
            touch(&cwd, "pkg/file.go");

            let resolver = PathResolver::new(cwd.path(), None);
            let pair = resolver.resolve("github.com/user/lib/pkg/file.go");
            assert_eq!(pair.display, "pkg/file.go");
            assert_eq!(pair.read, PathBuf::from("pkg/file.go"));
        }

        #[test]
        fn test_nested_working_directory_shifts_segments() {
            // running from inside pkg/, only file.go exists here
            let cwd = TempDir::new().unwrap();
            touch(&cwd, "file.go");

            let resolver = PathResolver::new(cwd.path(), None);
            let pair = resolver.resolve("github.com/user/lib/pkg/file.go");
            assert_eq!(pair.display, "file.go");
            assert_eq!(pair.read, PathBuf::from("file.go"));
        }

        #[test]
        fn test_unlocatable_file_resolves_empty() {
            let cwd = TempDir::new().unwrap();
            let resolver = PathResolver::new(cwd.path(), None);
            let pair = resolver.resolve("github.com/user/lib/pkg/file.go");
            assert_eq!(pair.display, "");
        }

        #[test]
        fn test_inside_module_root_expands_read_path() {
            let root = TempDir::new().unwrap();
            touch(&root, "src/github.com/user/lib/file.go");
            let cwd = root.path().join("src/github.com/user/lib");

            let resolver = PathResolver::new(&cwd, Some(root.path().to_path_buf()));
            let pair = resolver.resolve("github.com/user/lib/file.go");
            assert_eq!(pair.display, "file.go");
            assert_eq!(pair.read, root.path().join("src/github.com/user/lib/file.go"));
        }

        #[test]
        fn test_remote_package_keeps_import_path_visible() {
            let root = TempDir::new().unwrap();
            touch(&root, "src/github.com/user/lib/file.go");
            let cwd = TempDir::new().unwrap();

            let resolver = PathResolver::new(cwd.path(), Some(root.path().to_path_buf()));
            let pair = resolver.resolve("github.com/user/lib/file.go");
            assert_eq!(pair.display, "github.com/user/lib/file.go");
            assert_eq!(pair.read, root.path().join("src/github.com/user/lib/file.go"));
        }

        #[test]
        fn test_prefix_comparison_is_component_wise() {
            // a directory merely ending in the prefix text does not count
            let root = TempDir::new().unwrap();
            touch(&root, "src/github.com/user/lib/file.go");
            let cwd = TempDir::new().unwrap();
            touch(&cwd, "nested-github.com/user/lib/.keep");

            let resolver = PathResolver::new(
                cwd.path().join("nested-github.com/user/lib"),
                Some(root.path().to_path_buf()),
            );
            let pair = resolver.resolve("github.com/user/lib/file.go");
            assert_eq!(pair.display, "github.com/user/lib/file.go");
        }
    }
}
