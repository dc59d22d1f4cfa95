use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::TournamentId;
use crate::errors::{PersistenceError, storage_context};

const DELIMITER: &str = ",";

/// Comma-separated, ascending list of known tournament ids
///
/// The file is always read and rewritten whole; there is a single writer.
pub struct TournamentIdStore {
    path: PathBuf,
}

impl TournamentIdStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<TournamentId>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| storage_context("read", &self.path))?;
        let ids = parse_ids(&text).with_context(|| storage_context("parse", &self.path))?;
        info!("Loaded {} tournament ids from {}", ids.len(), self.path.display());
        Ok(ids)
    }

    pub fn save(&self, ids: &[TournamentId]) -> Result<()> {
        fs::write(&self.path, format_ids(ids))
            .with_context(|| storage_context("write", &self.path))?;
        info!("Saved {} tournament ids to {}", ids.len(), self.path.display());
        Ok(())
    }
}

pub fn parse_ids(text: &str) -> Result<Vec<TournamentId>, PersistenceError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    text.split(DELIMITER)
        .map(|entry| {
            entry
                .parse()
                .map_err(|_| PersistenceError::MalformedEntry(entry.trim().to_string()))
        })
        .collect()
}

pub fn format_ids(ids: &[TournamentId]) -> String {
    ids.iter()
        .map(TournamentId::to_string)
        .collect::<Vec<_>>()
        .join(DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = TournamentIdStore::new(dir.path().join("ids.csv"));
        let ids = vec![TournamentId(3), TournamentId(21494), TournamentId(100000)];

        store.save(&ids).unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "3,21494,100000");
        assert_eq!(store.load().unwrap(), ids);
    }

    #[test]
    fn test_tolerates_whitespace_and_trailing_newline() {
        assert_eq!(
            parse_ids(" 1, 2 ,3\n").unwrap(),
            vec![TournamentId(1), TournamentId(2), TournamentId(3)]
        );
        assert!(parse_ids("").unwrap().is_empty());
    }

    #[test]
    fn test_non_integer_entry_fails() {
        assert_eq!(
            parse_ids("1,two,3").unwrap_err(),
            PersistenceError::MalformedEntry("two".to_string())
        );
        assert!(parse_ids("1,,3").is_err());
        assert!(parse_ids("1,2,").is_err());
    }

    #[test]
    fn test_malformed_file_is_a_persistence_error() {
        let dir = tempdir().unwrap();
        let store = TournamentIdStore::new(dir.path().join("ids.csv"));
        fs::write(store.path(), "1,2,x").unwrap();

        let err = store.load().unwrap_err();
        assert!(err.downcast_ref::<PersistenceError>().is_some());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let store = TournamentIdStore::new(dir.path().join("absent.csv"));
        assert!(store.load().is_err());
    }
}
