//! Namespaced staging area on local disk
//!
//! Layout is `root/namespace/item_id/filename`. Directories are created on
//! demand, one level at a time; files are never removed by this module.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::{StagingError, StagingResult};

/// Staging directory tree for one namespace (usually one service)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingArea {
    root: PathBuf,
    namespace: String,
}

impl StagingArea {
    /// Creates a staging area for `namespace` under `root`
    ///
    /// Nothing is created on disk until a file is saved.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            namespace: namespace.into(),
        }
    }

    /// Returns the staging root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the namespace
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the directory holding the files of `item_id`
    #[must_use]
    pub fn item_dir(&self, item_id: &str) -> PathBuf {
        self.root.join(&self.namespace).join(item_id)
    }

    /// Returns where `filename` of `item_id` is (or would be) stored
    ///
    /// Pure path computation: the file is not required to exist.
    #[must_use]
    pub fn file_path(&self, item_id: &str, filename: &str) -> PathBuf {
        self.item_dir(item_id).join(filename)
    }

    /// Writes `content` to `root/namespace/item_id/filename`
    ///
    /// Creates each missing directory level first. An existing file is
    /// overwritten.
    ///
    /// # Errors
    ///
    /// Returns `StagingError::InvalidItemId` if `item_id` is not a single
    /// plain path component. Returns other `StagingError` variants if a
    /// directory cannot be created for any reason other than it already
    /// existing, or if the file cannot be written.
    pub fn save_file(&self, item_id: &str, filename: &str, content: &str) -> StagingResult<PathBuf> {
        if !is_single_component(item_id) {
            return Err(StagingError::InvalidItemId(item_id.to_string()));
        }
        let namespace_dir = self.root.join(&self.namespace);
        let item_dir = namespace_dir.join(item_id);
        for dir in [self.root.as_path(), namespace_dir.as_path(), item_dir.as_path()] {
            create_dir_if_absent(dir)?;
        }

        let path = item_dir.join(filename);
        fs::write(&path, content).map_err(|source| StagingError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "Staged file");
        Ok(path)
    }
}

/// Returns true if `id` names exactly one entry inside its parent
fn is_single_component(id: &str) -> bool {
    let mut components = Path::new(id).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !id.contains(['/', '\\'])
}

/// Creates `dir`, treating an already existing entry as success
fn create_dir_if_absent(dir: &Path) -> StagingResult<()> {
    match fs::create_dir(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(source) => Err(StagingError::CreateDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}
