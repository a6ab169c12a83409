use shared_types::ExtractionError;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use zip::result::ZipError;
use zip::ZipArchive;

/// Expands uploaded ZIP archives into a working directory
pub struct ArchiveExpander;

impl ArchiveExpander {
    pub fn new() -> Self {
        Self
    }

    /// Expand `archive_path` into `target_dir`, creating it if needed.
    ///
    /// Existing files in `target_dir` are left alone, so the caller should
    /// hand in a fresh directory per run. Entries whose names would land
    /// outside `target_dir` are skipped.
    pub fn expand(&self, archive_path: &Path, target_dir: &Path) -> Result<PathBuf, ExtractionError> {
        tracing::info!(archive = %archive_path.display(), target = %target_dir.display(), "Expanding archive");

        let file = File::open(archive_path).map_err(ExtractionError::archive)?;
        let mut archive =
            ZipArchive::new(BufReader::new(file)).map_err(classify_zip_error)?;

        fs::create_dir_all(target_dir).map_err(ExtractionError::archive)?;

        let mut extracted = 0usize;

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).map_err(classify_zip_error)?;

            let Some(relative) = entry.enclosed_name() else {
                tracing::warn!(entry = entry.name(), "Skipping archive entry with unsafe path");
                continue;
            };
            let out_path = target_dir.join(relative);

            if entry.is_dir() {
                fs::create_dir_all(&out_path).map_err(ExtractionError::archive)?;
                continue;
            }

            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent).map_err(ExtractionError::archive)?;
            }

            let mut out = File::create(&out_path).map_err(ExtractionError::archive)?;
            io::copy(&mut entry, &mut out).map_err(|e| classify_zip_error(ZipError::Io(e)))?;
            extracted += 1;
        }

        tracing::info!(files = extracted, target = %target_dir.display(), "Archive expanded");
        Ok(target_dir.to_path_buf())
    }
}

impl Default for ArchiveExpander {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural ZIP problems mean the upload was never a valid archive;
/// anything I/O related is a failure while expanding it.
fn classify_zip_error(err: ZipError) -> ExtractionError {
    match err {
        ZipError::Io(e) if e.kind() == io::ErrorKind::InvalidData => {
            ExtractionError::InvalidArchive(e.to_string())
        }
        ZipError::Io(e) => ExtractionError::archive(e),
        other => ExtractionError::InvalidArchive(other.to_string()),
    }
}
