use std::path::Path;

use tracing::{debug, instrument};

use super::OutputError;
use crate::enrich::EnrichedRecord;

/// Writes `records` to `path` as CSV, replacing any existing file.
///
/// The header is [`super::PRIMARY_COLUMNS`]; rows keep the slice order.
///
/// # Errors
///
/// Returns [`OutputError::NoRecords`] for an empty slice (no file is created)
/// and [`OutputError::Csv`] / [`OutputError::Io`] when writing fails.
#[instrument(skip(records), fields(path = %path.display(), count = records.len()))]
pub fn write_records(records: &[EnrichedRecord], path: &Path) -> Result<(), OutputError> {
    if records.is_empty() {
        return Err(OutputError::NoRecords);
    }

    let mut writer = csv::Writer::from_path(path).map_err(|e| OutputError::csv(path, e))?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| OutputError::csv(path, e))?;
    }
    writer.flush().map_err(|e| OutputError::io(path, e))?;

    debug!("wrote primary output");
    Ok(())
}
