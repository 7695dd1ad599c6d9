//! Reading raw source records from JSON files
//!
//! A source file holds either one raw record object or an array of them. A
//! directory is read recursively, `.json` files in path order. Each item is
//! parsed on its own, so one bad item never rejects the file.

use crate::record::{RawRecord, RecordResult, SourceKind};
use crate::storage::{StorageError, StorageResult};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Load raw records of one source kind from a file or directory.
///
/// Bibliography entries that are not publications (see
/// [`BIBTEX_PUBLICATION_TYPES`](crate::record::BIBTEX_PUBLICATION_TYPES)) are
/// skipped. Manager exports resolve attachment paths against the directory of
/// their file.
pub fn load_raw_records(path: &Path, kind: SourceKind) -> StorageResult<Vec<RecordResult<RawRecord>>> {
    let files = source_files(path)?;
    let mut items = Vec::new();
    let mut skipped = 0usize;

    for file in &files {
        let value: Value = serde_json::from_reader(BufReader::new(File::open(file)?))?;
        let values = match value {
            Value::Array(values) => values,
            other => vec![other],
        };
        let base_dir = file.parent().map(Path::to_path_buf);

        for value in values {
            let parsed = RawRecord::parse(value, kind).map(|raw| with_base_dir(raw, base_dir.as_deref()));
            if let Ok(RawRecord::BibEntry(entry)) = &parsed {
                if !entry.is_publication() {
                    skipped += 1;
                    continue;
                }
            }
            items.push(parsed);
        }
    }

    tracing::info!(
        path = %path.display(),
        %kind,
        files = files.len(),
        items = items.len(),
        skipped,
        "loaded raw records"
    );
    Ok(items)
}

fn with_base_dir(raw: RawRecord, dir: Option<&Path>) -> RawRecord {
    match (raw, dir) {
        (RawRecord::ManagerExport(export), Some(dir)) if export.base_dir.is_none() => {
            RawRecord::ManagerExport(export.with_base_dir(dir))
        }
        (raw, _) => raw,
    }
}

fn source_files(path: &Path) -> StorageResult<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(StorageError::NotFound(path.display().to_string()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(|e| StorageError::Io(e.into()))?;
        let is_json = entry.path().extension().is_some_and(|ext| ext == "json");
        if entry.file_type().is_file() && is_json {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordError;
    use tempfile::TempDir;

    #[test]
    fn array_file_yields_one_item_per_element() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("entries.json");
        std::fs::write(
            &path,
            r#"[{"title": "A", "ENTRYTYPE": "article"},
                {"title": "Slides", "ENTRYTYPE": "booklet"},
                42,
                {"author": "Nobody", "ENTRYTYPE": "misc"}]"#,
        )
        .unwrap();

        let items = load_raw_records(&path, SourceKind::BibliographyFileEntry).unwrap();
        assert_eq!(items.len(), 3);
        assert!(items[0].is_ok());
        assert!(matches!(items[1], Err(RecordError::Malformed(_))));
        assert!(items[2].is_ok());
    }

    #[test]
    fn directory_reads_json_files_in_order() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(
            dir.path().join("b.json"),
            r#"{"result": {"title": "Second", "arxiv_id": "2"}}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("a.json"), r#"{"title": "First", "arxiv_id": "1"}"#).unwrap();
        std::fs::write(dir.path().join("nested/c.json"), r#"[{"title": "Third"}]"#).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let items = load_raw_records(dir.path(), SourceKind::CrawledResult).unwrap();
        let titles: Vec<_> = items
            .into_iter()
            .map(|i| i.unwrap().fields().title.unwrap())
            .collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn manager_exports_resolve_attachments_next_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.json");
        std::fs::write(
            &path,
            r#"[{"TITLE": "Paper", "file_attachments1": "files/1/paper.pdf"}]"#,
        )
        .unwrap();

        let items = load_raw_records(&path, SourceKind::BibliographyManagerExport).unwrap();
        let fields = items.into_iter().next().unwrap().unwrap().fields();
        assert_eq!(fields.pdf_path, Some(dir.path().join("files/1/paper.pdf")));
    }

    #[test]
    fn invalid_json_file_is_a_batch_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[{").unwrap();
        assert!(matches!(
            load_raw_records(&path, SourceKind::CrawledResult),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn missing_path_is_not_found() {
        assert!(matches!(
            load_raw_records(Path::new("/nonexistent/input"), SourceKind::CrawledResult),
            Err(StorageError::NotFound(_))
        ));
    }
}
