use std::path::{Component, Path, PathBuf};

#[derive(Clone, Debug, Default)]
pub struct PathExpander;

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    /// Expands a leading `~` or `~/...`. `~user` forms are left untouched.
    pub fn expand(&self, path: &str) -> PathBuf {
        if path.starts_with('~') {
            self.expand_tilde(path)
        } else {
            PathBuf::from(path)
        }
    }

    fn expand_tilde(&self, path: &str) -> PathBuf {
        let Some(mut home_path) = self.home_dir() else {
            return PathBuf::from(path);
        };

        if path.len() == 1 {
            return home_path;
        }

        match path[1..].strip_prefix('/') {
            Some(stripped) => {
                for part in stripped.split('/').filter(|part| !part.is_empty()) {
                    home_path.push(part);
                }
                home_path
            }
            None => PathBuf::from(path),
        }
    }

    /// Interprets `arg` relative to `cwd`; absolute arguments win.
    pub fn resolve(&self, cwd: &Path, arg: &str) -> PathBuf {
        cwd.join(arg)
    }

    /// Lexically normalises `path` into an absolute form: `.` is dropped and
    /// `..` pops a component. Symlinks are not resolved.
    pub fn absolute(&self, path: &Path) -> PathBuf {
        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => {
                    normalized.push(component.as_os_str())
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    normalized.pop();
                }
                Component::Normal(part) => normalized.push(part),
            }
        }
        normalized
    }

    /// True only for the forms `expand` rewrites: `~` and `~/...`.
    pub fn is_home_path(&self, path: &str) -> bool {
        path == "~" || path.starts_with("~/")
    }

    pub fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_plain_path() {
        let expander = PathExpander::new();
        assert_eq!(expander.expand("some/dir"), PathBuf::from("some/dir"));
    }

    #[test]
    fn test_expand_tilde() {
        let expander = PathExpander::new();
        if let Some(home) = expander.home_dir() {
            assert_eq!(expander.expand("~"), home);
            assert_eq!(expander.expand("~/a//b"), home.join("a").join("b"));
        }
        assert_eq!(expander.expand("~other/x"), PathBuf::from("~other/x"));
        assert!(expander.is_home_path("~/x"));
        assert!(expander.is_home_path("~"));
        assert!(!expander.is_home_path("~other"));
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let expander = PathExpander::new();
        let cwd = Path::new("/base");
        assert_eq!(expander.resolve(cwd, "file"), PathBuf::from("/base/file"));
        assert_eq!(expander.resolve(cwd, "/etc/x"), PathBuf::from("/etc/x"));
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_normalises() {
        let expander = PathExpander::new();
        assert_eq!(
            expander.absolute(Path::new("/a/b/./c/../d")),
            PathBuf::from("/a/b/d")
        );
        assert_eq!(expander.absolute(Path::new("/..")), PathBuf::from("/"));
    }
}
