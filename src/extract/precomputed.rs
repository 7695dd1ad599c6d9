use super::{ExtractError, ExtractResult, ReferenceExtractor};
use crate::link::{RawReference, RawReferences};
use crate::record::MetadataRecord;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// References computed ahead of time, keyed by record uid
#[derive(Debug, Clone, Default)]
pub struct PrecomputedReferences {
    references: RawReferences,
}

impl PrecomputedReferences {
    pub fn new(references: RawReferences) -> Self {
        Self { references }
    }

    /// Load a JSON object mapping uid to an array of references
    pub fn from_json_file(path: impl AsRef<Path>) -> ExtractResult<Self> {
        let file = File::open(path.as_ref())?;
        let references: RawReferences = serde_json::from_reader(BufReader::new(file))?;
        Ok(Self::new(references))
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

impl ReferenceExtractor for PrecomputedReferences {
    fn extract(&self, record: &MetadataRecord) -> ExtractResult<Vec<RawReference>> {
        self.references
            .get(&record.uid)
            .cloned()
            .ok_or_else(|| ExtractError::NotPrecomputed(record.uid.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::NormalizeOptions;
    use crate::record::{SourceFields, SourceKind};
    use std::io::Write;

    #[test]
    fn loads_mixed_shapes_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"doi:10.1/x": ["plain", ["title first"], {{"raw_ref": "raw only"}}]}}"#
        )
        .unwrap();

        let pre = PrecomputedReferences::from_json_file(file.path()).unwrap();
        assert_eq!(pre.len(), 1);

        let mut record = MetadataRecord::from_fields(
            SourceKind::BibliographyFileEntry,
            SourceFields {
                title: Some("X".into()),
                ..Default::default()
            },
            &NormalizeOptions::default(),
        )
        .unwrap();
        assert!(matches!(pre.extract(&record), Err(ExtractError::NotPrecomputed(_))));

        record.uid = "doi:10.1/x".to_string();
        let refs = pre.extract(&record).unwrap();
        assert_eq!(refs.len(), 3);
        assert_eq!(refs[2].candidate_title(), Some("raw only"));
    }
}
