//! Legacy Word 97-2003 (.doc) text extraction.
//!
//! The binary format is not parsed here. After checking the OLE2/CFB
//! signature the file is handed to an external converter:
//!
//! - `antiword <file>` prints the document text to stdout
//! - `soffice --headless --convert-to txt:Text --outdir <dir> <file>` writes
//!   `<dir>/<stem>.txt`

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use shared_types::{DocumentFormat, ExtractionError, TextExtractor};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use std::process::Command;

/// All OLE-based Office formats start with `D0 CF 11 E0 A1 B1 1A E1`
const CFB_MAGIC_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DocConverter {
    #[default]
    Antiword,
    Libreoffice,
}

impl DocConverter {
    pub fn default_binary(&self) -> &'static str {
        match self {
            DocConverter::Antiword => "antiword",
            DocConverter::Libreoffice => "soffice",
        }
    }
}

pub struct DocTextExtractor {
    converter: DocConverter,
    binary: String,
}

impl DocTextExtractor {
    pub fn new(converter: DocConverter, binary: Option<String>) -> Self {
        let binary = binary.unwrap_or_else(|| converter.default_binary().to_string());
        Self { converter, binary }
    }

    pub fn with_defaults() -> Self {
        Self::new(DocConverter::default(), None)
    }

    fn convert(&self, path: &Path) -> Result<String> {
        verify_cfb_signature(path)?;

        match self.converter {
            DocConverter::Antiword => self.convert_with_antiword(path),
            DocConverter::Libreoffice => self.convert_with_libreoffice(path),
        }
    }

    fn convert_with_antiword(&self, path: &Path) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg(path)
            .output()
            .with_context(|| format!("Failed to run {}", self.binary))?;

        if !output.status.success() {
            bail!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn convert_with_libreoffice(&self, path: &Path) -> Result<String> {
        let out_dir = tempfile::tempdir().context("Failed to create conversion directory")?;

        let output = Command::new(&self.binary)
            .args(["--headless", "--convert-to", "txt:Text", "--outdir"])
            .arg(out_dir.path())
            .arg(path)
            .output()
            .with_context(|| format!("Failed to run {}", self.binary))?;

        if !output.status.success() {
            bail!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let stem = path
            .file_stem()
            .context("Document path has no file name")?;
        let txt_path = out_dir
            .path()
            .join(format!("{}.txt", stem.to_string_lossy()));
        let bytes = fs::read(&txt_path)
            .with_context(|| format!("Converter produced no output at {}", txt_path.display()))?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl TextExtractor for DocTextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        tracing::info!(path = %path.display(), converter = %self.binary, "Reading DOC");

        self.convert(path)
            .map_err(|e| ExtractionError::document(path, format!("{e:#}")))
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Doc
    }
}

fn verify_cfb_signature(path: &Path) -> Result<()> {
    let mut header = [0u8; 8];
    File::open(path)
        .and_then(|mut f| f.read_exact(&mut header))
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    if header != CFB_MAGIC_SIGNATURE {
        bail!("Invalid .doc file signature {header:02X?}");
    }

    Ok(())
}
