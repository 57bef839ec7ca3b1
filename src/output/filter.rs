use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use super::{OutputError, non_zero_path_for};
use crate::enrich::EnrichedRecord;

/// A secondary-file row: the primary row plus its original position.
#[derive(Debug, Serialize)]
struct IndexedRow<'a> {
    index: usize,
    display_name: &'a str,
    review_score_percent: f64,
    genre: &'a str,
    hours_played: f64,
}

impl<'a> IndexedRow<'a> {
    fn new(index: usize, record: &'a EnrichedRecord) -> Self {
        Self {
            index,
            display_name: &record.display_name,
            review_score_percent: record.review_score_percent,
            genre: &record.genre,
            hours_played: record.hours_played,
        }
    }
}

/// Reads the primary file at `path`, drops zero-score rows, sorts the rest by
/// score (highest first) and writes them next to it with a leading `index`
/// column.
///
/// Equal scores keep their primary-file order. `index` is the row's 0-based
/// position among the primary file's data rows.
///
/// Returns the path of the file written.
///
/// # Errors
///
/// - [`OutputError::EmptyOutput`] when the primary file has no data rows; no
///   secondary file is produced
/// - [`OutputError::Csv`] / [`OutputError::Io`] on read or write failures
#[instrument(fields(path = %path.display()))]
#[allow(clippy::float_cmp)]
pub fn filter_and_sort(path: &Path) -> Result<PathBuf, OutputError> {
    let records = read_records(path)?;
    if records.is_empty() {
        return Err(OutputError::EmptyOutput {
            path: path.to_path_buf(),
        });
    }

    let mut kept: Vec<(usize, &EnrichedRecord)> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.review_score_percent != 0.0)
        .collect();
    // sort_by is stable
    kept.sort_by(|(_, a), (_, b)| b.review_score_percent.total_cmp(&a.review_score_percent));

    let target = non_zero_path_for(path);
    let mut writer = csv::Writer::from_path(&target).map_err(|e| OutputError::csv(&target, e))?;
    if kept.is_empty() {
        writer
            .write_record(super::NON_ZERO_COLUMNS)
            .map_err(|e| OutputError::csv(&target, e))?;
    }
    for &(index, record) in &kept {
        writer
            .serialize(IndexedRow::new(index, record))
            .map_err(|e| OutputError::csv(&target, e))?;
    }
    writer.flush().map_err(|e| OutputError::io(&target, e))?;

    info!(
        kept = kept.len(),
        dropped = records.len() - kept.len(),
        target = %target.display(),
        "wrote non-zero output"
    );
    Ok(target)
}

fn read_records(path: &Path) -> Result<Vec<EnrichedRecord>, OutputError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| OutputError::csv(path, e))?;
    let records = reader
        .deserialize()
        .collect::<Result<Vec<EnrichedRecord>, _>>()
        .map_err(|e| OutputError::csv(path, e))?;
    debug!(rows = records.len(), "read primary output");
    Ok(records)
}
