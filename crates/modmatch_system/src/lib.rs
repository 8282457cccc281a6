use std::fmt::Debug;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};

type Result<T> = std::io::Result<T>;

/// Host filesystem access for the resolution pipelines.
///
/// Only the operations the pipelines actually need: reading a
/// path-referenced manifest and resolving relative references against the
/// working directory.
pub trait System: Debug + Send + Sync {
    fn read_to_string(&self, path: &Utf8Path) -> Result<String>;

    fn current_directory(&self) -> &Utf8Path;

    /// Resolves `path` against the current directory when it is relative.
    fn absolute(&self, path: &Utf8Path) -> Utf8PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.current_directory().join(path)
        }
    }
}

/// A [`System`] backed by the OS file system.
#[derive(Debug, Clone)]
pub struct OsSystem {
    inner: Arc<OsSystemInner>,
}

#[derive(Debug, Default)]
struct OsSystemInner {
    cwd: Utf8PathBuf,
}

impl OsSystem {
    pub fn new(cwd: impl AsRef<Utf8Path>) -> Self {
        let cwd = cwd.as_ref();
        assert!(cwd.is_absolute());

        Self {
            inner: Arc::new(OsSystemInner {
                cwd: cwd.to_path_buf(),
            }),
        }
    }
}

impl System for OsSystem {
    fn read_to_string(&self, path: &Utf8Path) -> Result<String> {
        tracing::trace!("Reading `{path}`");
        std::fs::read_to_string(path.as_std_path())
    }

    fn current_directory(&self) -> &Utf8Path {
        &self.inner.cwd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tempdir_system() -> (tempfile::TempDir, OsSystem) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let cwd = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 path");
        let system = OsSystem::new(&cwd);
        (dir, system)
    }

    #[test]
    fn reads_files_from_disk() {
        let (dir, system) = tempdir_system();
        let path = system.current_directory().join("manifest.json");
        std::fs::write(path.as_std_path(), "{}").expect("write");
        assert_eq!(system.read_to_string(&path).expect("read"), "{}");
        drop(dir);
    }

    #[test]
    fn absolute_resolves_relative_paths_against_cwd() {
        let (dir, system) = tempdir_system();
        let resolved = system.absolute(Utf8Path::new("manifest.json"));
        assert_eq!(
            resolved,
            system.current_directory().join("manifest.json")
        );
        drop(dir);
    }

    #[test]
    fn absolute_keeps_absolute_paths() {
        let (dir, system) = tempdir_system();
        let path = system.current_directory().join("nested").join("m.json");
        assert_eq!(system.absolute(&path), path);
        drop(dir);
    }
}
