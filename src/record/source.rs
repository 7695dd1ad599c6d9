//! Raw record shapes produced by the upstream collaborators
//!
//! Each shape is deserialized leniently (missing fields become `None`) and then
//! reduced to [`SourceFields`], the one fixed shape downstream code sees.

use super::metadata::RecordResult;
use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Where a raw record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// Crawled result (arXiv listing shape)
    CrawledResult,
    /// Bibliography file entry (BibTeX field map)
    BibliographyFileEntry,
    /// Bibliography manager export (RIS-derived field map)
    BibliographyManagerExport,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SourceKind::CrawledResult => "crawled-result",
            SourceKind::BibliographyFileEntry => "bibliography-file-entry",
            SourceKind::BibliographyManagerExport => "bibliography-manager-export",
        };
        f.write_str(s)
    }
}

/// A raw record, tagged by source kind
#[derive(Debug, Clone)]
pub enum RawRecord {
    Crawled(CrawledResult),
    BibEntry(BibEntry),
    ManagerExport(ManagerExport),
}

impl RawRecord {
    /// Parse a JSON field map as a record of the given kind.
    ///
    /// Crawled results may be wrapped in `{"result": {...}}`. Manager export
    /// keys are matched case-insensitively.
    pub fn parse(value: Value, kind: SourceKind) -> RecordResult<Self> {
        let record = match kind {
            SourceKind::CrawledResult => {
                let inner = match value {
                    Value::Object(mut map) if map.contains_key("result") => {
                        map.remove("result").unwrap_or(Value::Null)
                    }
                    other => other,
                };
                RawRecord::Crawled(serde_json::from_value(inner)?)
            }
            SourceKind::BibliographyFileEntry => RawRecord::BibEntry(serde_json::from_value(value)?),
            SourceKind::BibliographyManagerExport => {
                RawRecord::ManagerExport(serde_json::from_value(lowercase_keys(value))?)
            }
        };
        Ok(record)
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            RawRecord::Crawled(_) => SourceKind::CrawledResult,
            RawRecord::BibEntry(_) => SourceKind::BibliographyFileEntry,
            RawRecord::ManagerExport(_) => SourceKind::BibliographyManagerExport,
        }
    }

    /// Reduce to the common field set.
    pub fn fields(&self) -> SourceFields {
        match self {
            RawRecord::Crawled(r) => r.fields(),
            RawRecord::BibEntry(r) => r.fields(),
            RawRecord::ManagerExport(r) => r.fields(),
        }
    }
}

/// The common attribute set every source reduces to
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceFields {
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub year: Option<i32>,
    pub abstract_text: Option<String>,
    pub url: Option<String>,
    /// Durable source identifier, already carrying its tag prefix
    pub source_id: Option<String>,
    /// Free-form origin label (e.g. "arxiv", "dblp")
    pub origin: Option<String>,
    pub pdf_path: Option<PathBuf>,
}

/// Crawled publication listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawledResult {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub submission_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub arxiv_id: Option<String>,
    #[serde(default, rename = "abstract", deserialize_with = "lenient_string")]
    pub abstract_text: Option<String>,
}

impl CrawledResult {
    fn fields(&self) -> SourceFields {
        let arxiv_id = non_empty(self.arxiv_id.as_deref());
        SourceFields {
            title: self.title.clone(),
            authors: self.authors.clone(),
            year: self.submission_date.as_deref().and_then(year_from_date),
            abstract_text: self.abstract_text.clone(),
            url: arxiv_id.map(|id| format!("https://arxiv.org/abs/{}", id)),
            source_id: arxiv_id.map(|id| format!("arxiv:{}", id)),
            origin: Some("arxiv".to_string()),
            pdf_path: None,
        }
    }
}

/// BibTeX entry as a field map
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BibEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    /// Authors joined by `and`
    #[serde(default, deserialize_with = "lenient_string")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: Option<String>,
    #[serde(default, rename = "abstract", deserialize_with = "lenient_string")]
    pub abstract_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub doi: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub source: Option<String>,
    #[serde(default, rename = "ENTRYTYPE", alias = "entrytype", deserialize_with = "lenient_string")]
    pub entry_type: Option<String>,
}

/// Entry types the corpus accepts from bibliography files
pub const BIBTEX_PUBLICATION_TYPES: [&str; 3] = ["article", "inproceedings", "misc"];

impl BibEntry {
    /// Whether this entry describes a publication (article, proceedings, misc).
    ///
    /// Entries without a type are accepted.
    pub fn is_publication(&self) -> bool {
        match &self.entry_type {
            Some(t) => BIBTEX_PUBLICATION_TYPES.contains(&t.to_lowercase().as_str()),
            None => true,
        }
    }

    fn fields(&self) -> SourceFields {
        SourceFields {
            title: self.title.as_deref().map(fold_newlines),
            authors: self
                .author
                .as_deref()
                .map(split_bibtex_authors)
                .unwrap_or_default(),
            year: self.year.as_deref().and_then(leading_year),
            abstract_text: self.abstract_text.as_deref().map(fold_newlines),
            url: self.url.clone(),
            source_id: non_empty(self.doi.as_deref()).map(|doi| format!("doi:{}", doi)),
            origin: self.source.clone(),
            pdf_path: None,
        }
    }
}

/// Bibliography manager export entry (RIS tags mapped to names)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManagerExport {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub primary_title: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub first_authors: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub publication_year: Option<String>,
    #[serde(default, rename = "abstract", deserialize_with = "lenient_string")]
    pub abstract_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub doi: Option<String>,
    #[serde(default)]
    pub urls: Vec<String>,
    /// Remaining fields, including `file_attachments1`, `file_attachments2`, ...
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
    /// Directory attachment paths are relative to
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl ManagerExport {
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// First attachment ending in `.pdf`, in attachment-key order.
    pub fn pdf_attachment(&self) -> Option<PathBuf> {
        let pdf = self
            .extra
            .iter()
            .filter(|(k, _)| k.starts_with("file_attachments"))
            .filter_map(|(_, v)| v.as_str())
            .find(|p| p.to_lowercase().ends_with(".pdf"))?;
        Some(match &self.base_dir {
            Some(dir) => dir.join(pdf),
            None => Path::new(pdf).to_path_buf(),
        })
    }

    fn fields(&self) -> SourceFields {
        let title = self.title.clone().or_else(|| self.primary_title.clone());
        let authors = if self.authors.is_empty() {
            self.first_authors.clone()
        } else {
            self.authors.clone()
        };
        let year = self
            .year
            .as_deref()
            .or(self.publication_year.as_deref())
            .and_then(leading_year);
        SourceFields {
            title,
            authors,
            year,
            abstract_text: self.abstract_text.clone(),
            url: self.urls.first().cloned(),
            source_id: non_empty(self.doi.as_deref()).map(|doi| format!("doi:{}", doi)),
            origin: None,
            pdf_path: self.pdf_attachment(),
        }
    }
}

/// Split a BibTeX author field on standalone `and` words.
pub fn split_bibtex_authors(text: &str) -> Vec<String> {
    let mut authors = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for word in text.split_whitespace() {
        if word.eq_ignore_ascii_case("and") {
            if !current.is_empty() {
                authors.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(word);
        }
    }
    if !current.is_empty() {
        authors.push(current.join(" "));
    }
    authors
}

/// Year from an RFC 3339 timestamp, an ISO date, or a leading 4-digit year.
fn year_from_date(date: &str) -> Option<i32> {
    let date = date.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.year());
    }
    date.get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .map(|d| d.year())
        .or_else(|| leading_year(date))
}

/// Parse a leading 4-digit year ("2017", "2017/06/12/").
fn leading_year(text: &str) -> Option<i32> {
    let head = text.trim().get(..4)?;
    if head.chars().all(|c| c.is_ascii_digit()) {
        head.parse().ok()
    } else {
        None
    }
}

fn fold_newlines(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect(),
        ),
        other => other,
    }
}

/// Accept strings, numbers and null for textual fields.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
