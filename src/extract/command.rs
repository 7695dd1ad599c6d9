//! External reference extractor
//!
//! Runs `<program> [args...] <pdf> <out.json>` per record and reads the
//! references the program wrote to `<out.json>`, typically
//! `[{"raw_ref": "..."}, ...]`.

use super::{ExtractError, ExtractResult, ReferenceExtractor};
use crate::link::RawReference;
use crate::record::MetadataRecord;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Reference extractor backed by an external program
#[derive(Debug, Clone)]
pub struct CommandExtractor {
    program: PathBuf,
    args: Vec<String>,
    pdfs_dir: Option<PathBuf>,
}

impl CommandExtractor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            pdfs_dir: None,
        }
    }

    /// Arguments placed before the pdf and output paths
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Directory searched for downloaded PDFs of records without a local file
    pub fn with_pdfs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.pdfs_dir = Some(dir.into());
        self
    }
}

impl ReferenceExtractor for CommandExtractor {
    fn extract(&self, record: &MetadataRecord) -> ExtractResult<Vec<RawReference>> {
        let pdf = local_pdf_path(record, self.pdfs_dir.as_deref())
            .ok_or_else(|| ExtractError::NoSource(record.uid.clone()))?;
        let out = tempfile::Builder::new()
            .prefix("citegraph-refs-")
            .suffix(".json")
            .tempfile()?;

        tracing::debug!(uid = %record.uid, pdf = %pdf.display(), "running reference extractor");
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&pdf)
            .arg(out.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(ExtractError::Spawn)?;

        if !output.status.success() {
            return Err(ExtractError::Command {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let file = File::open(out.path())?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// The record's local PDF: its own file when present, else a downloaded copy
/// named `<canonical title>_<uid>.pdf` under `pdfs_dir`.
pub fn local_pdf_path(record: &MetadataRecord, pdfs_dir: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = record.pdf_path.as_ref().filter(|p| p.is_file()) {
        return Some(path.clone());
    }
    let dir = pdfs_dir?;
    let name = format!(
        "{}_{}.pdf",
        record.canonical_title,
        record.uid.replace([':', '/'], "_")
    );
    Some(dir.join(name)).filter(|p| p.is_file())
}
