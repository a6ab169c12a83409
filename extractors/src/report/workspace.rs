use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const RUN_DIR_PREFIX: &str = "cv-run-";

/// Working directory owned by a single pipeline run.
///
/// The directory is uniquely named under `root` and removed when the value
/// is dropped, unless [`RunWorkspace::keep`] was called.
#[derive(Debug)]
pub struct RunWorkspace {
    path: PathBuf,
    keep: bool,
}

impl RunWorkspace {
    pub fn create(root: &Path) -> io::Result<Self> {
        let path = root.join(format!("{RUN_DIR_PREFIX}{}", Uuid::new_v4()));
        fs::create_dir_all(&path)?;
        tracing::debug!(path = %path.display(), "Created run workspace");
        Ok(Self { path, keep: false })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Leave the directory on disk after drop
    pub fn keep(&mut self) {
        self.keep = true;
    }
}

impl Drop for RunWorkspace {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        if let Err(e) = fs::remove_dir_all(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), "Failed to remove run workspace: {}", e);
            }
        } else {
            tracing::debug!(path = %self.path.display(), "Removed run workspace");
        }
    }
}
