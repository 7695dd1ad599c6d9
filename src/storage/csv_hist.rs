//! Histogram CSV encoding: `term,frequency`, rows by descending frequency

use super::traits::{StorageError, StorageResult};
use crate::histogram::{Histogram, HistogramData};
use std::io::{Read, Write};

pub const HEADER: [&str; 2] = ["term", "frequency"];

pub fn write_histogram<W: Write>(writer: W, histogram: &HistogramData) -> StorageResult<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(HEADER)?;
    for (term, value) in histogram.rows() {
        out.write_record([term, value])?;
    }
    out.flush()?;
    Ok(())
}

/// Read a histogram; the header row is optional.
///
/// Values are fractions when any of them contains a `.`, counts otherwise.
pub fn read_histogram<R: Read>(reader: R) -> StorageResult<HistogramData> {
    let mut input = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows: Vec<(String, String)> = Vec::new();
    for (row, record) in input.records().enumerate() {
        let record = record?;
        if row == 0 && record.iter().eq(HEADER) {
            continue;
        }
        match (record.get(0), record.get(1), record.len()) {
            (Some(term), Some(value), 2) => rows.push((term.to_string(), value.trim().to_string())),
            _ => {
                return Err(StorageError::MalformedHistogram {
                    row,
                    reason: format!("expected 2 fields, found {}", record.len()),
                })
            }
        }
    }

    if rows.iter().any(|(_, v)| v.contains('.')) {
        let hist: Histogram<f64> = rows
            .into_iter()
            .enumerate()
            .map(|(row, (term, value))| parse_value::<f64>(row, &value).map(|v| (term, v)))
            .collect::<StorageResult<_>>()?;
        Ok(HistogramData::Normalized(hist))
    } else {
        let hist: Histogram<u64> = rows
            .into_iter()
            .enumerate()
            .map(|(row, (term, value))| parse_value::<u64>(row, &value).map(|v| (term, v)))
            .collect::<StorageResult<_>>()?;
        Ok(HistogramData::Counts(hist))
    }
}

fn parse_value<V: std::str::FromStr>(row: usize, value: &str) -> StorageResult<V> {
    value.parse().map_err(|_| StorageError::MalformedHistogram {
        row,
        reason: format!("invalid frequency '{}'", value),
    })
}
