use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Document formats the pipeline knows how to read.
///
/// Detection is a case-sensitive match on the file-name suffix, so
/// `resume.PDF` is `Unsupported`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Doc,
    Unsupported,
}

impl DocumentFormat {
    pub const SUPPORTED: [DocumentFormat; 3] =
        [DocumentFormat::Pdf, DocumentFormat::Docx, DocumentFormat::Doc];

    pub fn from_file_name(name: &str) -> Self {
        if name.ends_with(".pdf") {
            DocumentFormat::Pdf
        } else if name.ends_with(".docx") {
            DocumentFormat::Docx
        } else if name.ends_with(".doc") {
            DocumentFormat::Doc
        } else {
            DocumentFormat::Unsupported
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(Self::from_file_name)
            .unwrap_or(DocumentFormat::Unsupported)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, DocumentFormat::Unsupported)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Doc => "doc",
            DocumentFormat::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

/// A discovered CV file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub path: PathBuf,
    pub format: DocumentFormat,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = DocumentFormat::from_path(&path);
        Self { path, format }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
