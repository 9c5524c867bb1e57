use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::ledger::{LedgerBook, CURRENT_SCHEMA_VERSION};
use crate::errors::{LedgerError, Result};

use super::StorageBackend;

const TMP_SUFFIX: &str = "tmp";

/// Stores the whole ledger book as one JSON file, written atomically via a
/// temp file and rename.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<Option<LedgerBook>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        let book: LedgerBook = serde_json::from_str(&data)
            .map_err(|err| LedgerError::Persistence(err.to_string()))?;
        if book.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(LedgerError::Validation(format!(
                "book schema v{} is newer than supported v{}",
                book.schema_version, CURRENT_SCHEMA_VERSION
            )));
        }
        Ok(Some(book))
    }

    fn save(&self, book: &LedgerBook) -> Result<()> {
        let json = serde_json::to_string_pretty(book)
            .map_err(|err| LedgerError::Persistence(err.to_string()))?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::Ledger;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_roundtrip() {
        let temp = tempdir().unwrap();
        let storage = JsonStorage::new(temp.path().join("book.json"));
        let book = LedgerBook::new(Ledger::new("Personal", "USD"));
        storage.save(&book).expect("save book");
        let loaded = storage.load().expect("load book").expect("book present");
        assert_eq!(loaded.ledgers.len(), 1);
        assert_eq!(loaded.ledgers[0].name, "Personal");
        assert_eq!(loaded.default_id, book.default_id);
    }

    #[test]
    fn load_returns_none_before_first_save() {
        let temp = tempdir().unwrap();
        let storage = JsonStorage::new(temp.path().join("missing.json"));
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn rejects_future_schema_versions() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("future.json");
        let storage = JsonStorage::new(&path);
        let mut book = LedgerBook::new(Ledger::new("Future", "USD"));
        book.schema_version = CURRENT_SCHEMA_VERSION + 5;
        storage.save(&book).unwrap();

        let err = storage.load().expect_err("future schema must fail");
        assert!(matches!(err, LedgerError::Validation(_)));
    }
}
