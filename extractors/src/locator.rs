//! Recursive discovery of CV files.
//!
//! Entries are visited in whatever order `fs::read_dir` yields them, which is
//! platform and filesystem dependent. Callers that need a stable order must
//! sort the result themselves.

use shared_types::{Document, DocumentFormat};
use std::fs;
use std::path::Path;

/// Walk `directory` depth-first and collect every `.pdf`, `.docx` and `.doc`
/// file, never descending into directories whose name starts with `.`.
///
/// An unreadable directory or entry is logged and skipped; the rest of the
/// tree is still searched. Nothing is returned when the root itself cannot
/// be read.
pub fn find_documents(directory: &Path) -> Vec<Document> {
    tracing::info!(directory = %directory.display(), "Searching for CVs");

    let mut documents = Vec::new();
    walk(directory, &mut documents);

    tracing::info!(directory = %directory.display(), found = documents.len(), "Search finished");
    documents
}

fn walk(directory: &Path, documents: &mut Vec<Document>) {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!(directory = %directory.display(), "Error while searching for CVs: {}", e);
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(directory = %directory.display(), "Skipping unreadable entry: {}", e);
                continue;
            }
        };
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                tracing::warn!(path = %entry.path().display(), "Skipping entry: {}", e);
                continue;
            }
        };
        let name = entry.file_name();
        let name = name.to_string_lossy();

        if file_type.is_dir() {
            if !name.starts_with('.') {
                walk(&entry.path(), documents);
            }
            continue;
        }

        if DocumentFormat::from_file_name(&name).is_supported() {
            let document = Document::new(entry.path());
            tracing::info!(path = %document.path.display(), format = %document.format, "Found CV file");
            documents.push(document);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    fn names(documents: &[Document]) -> Vec<String> {
        let mut names: Vec<String> = documents.iter().map(|d| d.file_name()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_collects_supported_suffixes_recursively() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.pdf"));
        touch(&dir.path().join("nested/deeper/b.docx"));
        touch(&dir.path().join("nested/c.doc"));
        touch(&dir.path().join("nested/readme.txt"));
        touch(&dir.path().join("upper.PDF"));

        let documents = find_documents(dir.path());

        assert_eq!(names(&documents), vec!["a.pdf", "b.docx", "c.doc"]);
    }

    #[test]
    fn test_skips_hidden_directories() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join(".git/objects/x.pdf"));
        touch(&dir.path().join(".temp_extract/y.docx"));
        touch(&dir.path().join("visible/z.doc"));

        let documents = find_documents(dir.path());

        assert_eq!(names(&documents), vec!["z.doc"]);
        assert!(documents
            .iter()
            .all(|d| !d.path.to_string_lossy().contains("/.")));
    }

    #[test]
    fn test_hidden_files_are_still_checked_by_suffix() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join(".draft.pdf"));

        let documents = find_documents(dir.path());

        assert_eq!(names(&documents), vec![".draft.pdf"]);
    }

    #[test]
    fn test_formats_are_tagged() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("only.docx"));

        let documents = find_documents(dir.path());

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].format, DocumentFormat::Docx);
    }

    #[test]
    fn test_missing_directory_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let documents = find_documents(&dir.path().join("does-not-exist"));
        assert!(documents.is_empty());
    }

    /// Nest directories with long names until the full path is longer than
    /// the OS allows, so listing the innermost one fails. Built innermost
    /// first so every rename works on a short path.
    #[cfg(target_os = "linux")]
    fn unlistable_chain(parent: &Path) {
        const DEPTH: usize = 25;
        let mut short = parent.join("deep");
        for _ in 0..DEPTH {
            short.push("d");
        }
        fs::create_dir_all(&short).unwrap();

        let long_name = "n".repeat(200);
        for level in (1..=DEPTH).rev() {
            let mut dir = parent.join("deep");
            for _ in 0..level - 1 {
                dir.push("d");
            }
            fs::rename(dir.join("d"), dir.join(&long_name)).unwrap();
        }
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_unreadable_subdirectory_does_not_hide_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let letters = ["a", "b", "c", "d", "e", "f", "g", "h"];
        for letter in letters {
            touch(&dir.path().join(letter).join(format!("cv_{letter}.pdf")));
        }
        unlistable_chain(dir.path());

        let documents = find_documents(dir.path());

        let expected: Vec<String> = letters.iter().map(|l| format!("cv_{l}.pdf")).collect();
        assert_eq!(names(&documents), expected);
    }
}
