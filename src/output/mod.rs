//! CSV output: the primary per-game file and its filtered, sorted variant.
//!
//! File names derive from the steam ID:
//! - `<dir>/<steamid>_games.csv` - every enriched game, library order
//! - `<dir>/<steamid>_games_non_zero.csv` - non-zero scores, best first

mod error;
mod filter;
mod writer;

use std::path::{Path, PathBuf};

pub use error::OutputError;
pub use filter::filter_and_sort;
pub use writer::write_records;

use crate::steam::SteamId;

/// Column order of the primary file.
pub const PRIMARY_COLUMNS: [&str; 4] =
    ["display_name", "review_score_percent", "genre", "hours_played"];

/// Column order of the non-zero file.
pub const NON_ZERO_COLUMNS: [&str; 5] = [
    "index",
    "display_name",
    "review_score_percent",
    "genre",
    "hours_played",
];

const NON_ZERO_SUFFIX: &str = "_non_zero";

/// Path of the primary file for `steam_id` inside `dir`.
#[must_use]
pub fn primary_path(dir: &Path, steam_id: SteamId) -> PathBuf {
    dir.join(format!("{steam_id}_games.csv"))
}

/// Path of the non-zero file for `steam_id` inside `dir`.
#[must_use]
pub fn non_zero_path(dir: &Path, steam_id: SteamId) -> PathBuf {
    non_zero_path_for(&primary_path(dir, steam_id))
}

/// Derives the non-zero file path from a primary file path:
/// `x/123_games.csv` becomes `x/123_games_non_zero.csv`.
#[must_use]
pub fn non_zero_path_for(primary: &Path) -> PathBuf {
    let stem = primary
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match primary.extension() {
        Some(ext) => format!("{stem}{NON_ZERO_SUFFIX}.{}", ext.to_string_lossy()),
        None => format!("{stem}{NON_ZERO_SUFFIX}"),
    };
    primary.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: SteamId = SteamId::new(76_561_197_960_287_930);

    #[test]
    fn test_file_names_derive_from_steam_id() {
        let dir = Path::new("out");
        assert_eq!(
            primary_path(dir, ID),
            PathBuf::from("out/76561197960287930_games.csv")
        );
        assert_eq!(
            non_zero_path(dir, ID),
            PathBuf::from("out/76561197960287930_games_non_zero.csv")
        );
    }

    #[test]
    fn test_non_zero_path_without_extension() {
        assert_eq!(
            non_zero_path_for(Path::new("/tmp/report")),
            PathBuf::from("/tmp/report_non_zero")
        );
    }

    #[test]
    fn test_primary_columns_match_record_fields() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let path = dir.path().join("h.csv");
        let record = crate::enrich::EnrichedRecord {
            display_name: "n".to_string(),
            review_score_percent: 1.0,
            genre: String::new(),
            hours_played: 0.0,
        };
        write_records(&[record], &path).unwrap_or_else(|e| panic!("write: {e}"));
        let content = std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read: {e}"));
        assert_eq!(content.lines().next(), Some(PRIMARY_COLUMNS.join(",").as_str()));
    }
}
