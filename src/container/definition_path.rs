//! Tracking of definition files for external loaders and watchers.

use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::Result;

/// A definition file and whether it has been loaded.
///
/// Equality and hashing look at the path only, so a set of
/// `DefinitionPath`s holds each file once regardless of its state. Use
/// [`is_same_state`](Self::is_same_state) to compare the loaded flag too.
///
/// # Examples
///
/// ```rust
/// use funbox::container::DefinitionPath;
///
/// let pending = DefinitionPath::new("defs/math.rs", false);
/// let loaded = DefinitionPath::new("defs/math.rs", true);
///
/// assert_eq!(pending, loaded);
/// assert!(!pending.is_same_state(&loaded));
/// ```
#[derive(Debug, Clone)]
pub struct DefinitionPath {
    path: PathBuf,
    loaded: bool,
}

impl DefinitionPath {
    /// Creates a tracked path.
    pub fn new(path: impl Into<PathBuf>, loaded: bool) -> Self {
        Self {
            path: path.into(),
            loaded,
        }
    }

    /// The file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` once the file has been loaded.
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Compares both the path and the loaded flag.
    pub fn is_same_state(&self, other: &Self) -> bool {
        self == other && self.loaded == other.loaded
    }
}

impl PartialEq for DefinitionPath {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for DefinitionPath {}

impl Hash for DefinitionPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

/// The set of tracked definition files.
///
/// An external loader calls [`load_with`](Self::load_with) for every file
/// it discovers; the loader closure runs once per file unless the file is
/// already loaded. A file watcher reads [`tracked`](Self::tracked) to set
/// up its watches and calls [`reload_with`](Self::reload_with) when a file
/// changes.
///
/// # Examples
///
/// ```rust
/// use funbox::container::DefinitionPaths;
///
/// let paths = DefinitionPaths::new();
/// let mut runs = 0;
///
/// assert!(paths.load_with("defs/math.rs", |_| { runs += 1; Ok(()) }).unwrap());
/// assert!(!paths.load_with("defs/math.rs", |_| { runs += 1; Ok(()) }).unwrap());
/// assert_eq!(runs, 1);
/// assert!(paths.is_loaded("defs/math.rs"));
/// ```
#[derive(Debug, Default)]
pub struct DefinitionPaths {
    paths: Mutex<Vec<DefinitionPath>>,
}

impl DefinitionPaths {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking `path` as not loaded. Returns `false` when it was
    /// already tracked.
    pub fn track(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let mut paths = self.paths.lock();
        if paths.iter().any(|tracked| tracked.path == path) {
            return false;
        }
        paths.push(DefinitionPath::new(path, false));
        true
    }

    /// Marks `path` as loaded, tracking it if needed.
    pub fn mark_loaded(&self, path: impl AsRef<Path>) {
        self.set_loaded(path.as_ref(), true);
    }

    /// Returns `true` when `path` is tracked and loaded.
    pub fn is_loaded(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        self.paths
            .lock()
            .iter()
            .any(|tracked| tracked.path == path && tracked.loaded)
    }

    /// Returns `true` when `path` is tracked.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        self.paths.lock().iter().any(|tracked| tracked.path == path)
    }

    /// Every tracked path, in the order it was first seen.
    pub fn tracked(&self) -> Vec<PathBuf> {
        self.paths
            .lock()
            .iter()
            .map(|tracked| tracked.path.clone())
            .collect()
    }

    /// A snapshot of every tracked path with its state.
    pub fn snapshot(&self) -> Vec<DefinitionPath> {
        self.paths.lock().clone()
    }

    /// Runs `loader` for `path` unless it is already loaded.
    ///
    /// Returns `true` when the loader ran. The path is marked loaded before
    /// the loader runs so that concurrent callers skip it; a failing loader
    /// resets the mark.
    ///
    /// # Errors
    ///
    /// Returns the loader's error.
    pub fn load_with<F>(&self, path: impl AsRef<Path>, loader: F) -> Result<bool>
    where
        F: FnOnce(&Path) -> Result<()>,
    {
        let path = path.as_ref();
        {
            let mut paths = self.paths.lock();
            match paths.iter_mut().find(|tracked| tracked.path == path) {
                Some(tracked) if tracked.loaded => return Ok(false),
                Some(tracked) => tracked.loaded = true,
                None => paths.push(DefinitionPath::new(path, true)),
            }
        }

        tracing::debug!(path = %path.display(), "loading definition file");
        if let Err(error) = loader(path) {
            self.set_loaded(path, false);
            return Err(error);
        }
        Ok(true)
    }

    /// Runs `loader` for `path` whether or not it was loaded before.
    ///
    /// # Errors
    ///
    /// Returns the loader's error; the path is then left unloaded.
    pub fn reload_with<F>(&self, path: impl AsRef<Path>, loader: F) -> Result<()>
    where
        F: FnOnce(&Path) -> Result<()>,
    {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reloading definition file");
        let result = loader(path);
        self.set_loaded(path, result.is_ok());
        result
    }

    fn set_loaded(&self, path: &Path, loaded: bool) {
        let mut paths = self.paths.lock();
        match paths.iter_mut().find(|tracked| tracked.path == path) {
            Some(tracked) => tracked.loaded = loaded,
            None => paths.push(DefinitionPath::new(path, loaded)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    fn set_membership_ignores_loaded_state() {
        let mut set = HashSet::new();
        set.insert(DefinitionPath::new("a.rs", false));

        assert!(set.contains(&DefinitionPath::new("a.rs", true)));
        assert!(!set.insert(DefinitionPath::new("a.rs", true)));
    }

    #[rstest]
    fn track_is_idempotent() {
        let paths = DefinitionPaths::new();

        assert!(paths.track("a.rs"));
        assert!(!paths.track("a.rs"));
        assert_eq!(paths.tracked(), vec![PathBuf::from("a.rs")]);
        assert!(!paths.is_loaded("a.rs"));
    }

    #[rstest]
    fn failed_load_can_be_retried() {
        let paths = DefinitionPaths::new();

        let failed = paths.load_with("a.rs", |_| Err(Error::failed("syntax error")));
        assert_eq!(failed, Err(Error::failed("syntax error")));
        assert!(!paths.is_loaded("a.rs"));

        assert_eq!(paths.load_with("a.rs", |_| Ok(())), Ok(true));
        assert!(paths.is_loaded("a.rs"));
    }

    #[rstest]
    fn reload_always_runs_loader() {
        let paths = DefinitionPaths::new();
        let mut runs = 0;

        paths.mark_loaded("a.rs");
        paths
            .reload_with("a.rs", |_| {
                runs += 1;
                Ok(())
            })
            .unwrap();
        paths
            .reload_with("a.rs", |_| {
                runs += 1;
                Ok(())
            })
            .unwrap();

        assert_eq!(runs, 2);
        assert!(paths.is_loaded("a.rs"));
    }

    #[rstest]
    fn snapshot_reports_state() {
        let paths = DefinitionPaths::new();
        paths.track("a.rs");
        paths.mark_loaded("b.rs");

        let snapshot = paths.snapshot();
        assert!(snapshot[0].is_same_state(&DefinitionPath::new("a.rs", false)));
        assert!(snapshot[1].is_same_state(&DefinitionPath::new("b.rs", true)));
    }
}
