use uuid::Uuid;

use crate::config::Preferences;
use crate::domain::ledger::{Ledger, LedgerBook};
use crate::errors::Result;
use crate::storage::StorageBackend;

/// Facade that pairs the in-memory ledger book with a persistence backend.
///
/// Mutation flows are sequences of small object-graph edits followed by
/// one explicit [`BookManager::commit`]; nothing is saved implicitly.
pub struct BookManager {
    book: LedgerBook,
    preferences: Preferences,
    storage: Box<dyn StorageBackend>,
}

impl BookManager {
    /// Loads the persisted book, or initializes one with a default ledger
    /// when no book exists yet (at least one ledger must always exist).
    pub fn open_or_init(storage: Box<dyn StorageBackend>, preferences: Preferences) -> Result<Self> {
        let book = match storage.load()? {
            Some(book) => book,
            None => {
                tracing::info!("no persisted book found, creating default ledger");
                let book = LedgerBook::new(Ledger::new("Personal", preferences.currency.clone()));
                storage.save(&book)?;
                book
            }
        };
        Ok(Self {
            book,
            preferences,
            storage,
        })
    }

    pub fn book(&self) -> &LedgerBook {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut LedgerBook {
        &mut self.book
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn ledger(&self, id: Uuid) -> Option<&Ledger> {
        self.book.ledger(id)
    }

    pub fn ledger_mut(&mut self, id: Uuid) -> Option<&mut Ledger> {
        self.book.ledger_mut(id)
    }

    pub fn default_ledger(&self) -> Option<&Ledger> {
        self.book.default_ledger()
    }

    /// Creates an empty ledger using the preferences' currency.
    pub fn create_ledger(&mut self, name: impl Into<String>) -> Uuid {
        let ledger = Ledger::new(name, self.preferences.currency.clone());
        self.book.add_ledger(ledger)
    }

    /// Deletes a ledger and everything it owns. The caller is expected to
    /// have confirmed with the user; no re-confirmation happens here.
    pub fn delete_ledger(&mut self, id: Uuid) -> Result<()> {
        self.book.delete_ledger(id)
    }

    /// Clears all entities owned by a ledger, keeping its identity.
    pub fn reset_ledger(&mut self, id: Uuid) -> Result<()> {
        let ledger = self
            .book
            .ledger_mut(id)
            .ok_or_else(|| crate::errors::LedgerError::Validation(format!(
                "ledger {} not found",
                id
            )))?;
        ledger.reset();
        Ok(())
    }

    /// Exports one ledger's full subgraph as snapshot bytes.
    pub fn export_ledger(
        &self,
        id: Uuid,
        sink: &mut dyn crate::snapshot::ProgressSink,
    ) -> Result<Vec<u8>> {
        let ledger = self
            .ledger(id)
            .ok_or_else(|| crate::errors::LedgerError::Validation(format!(
                "ledger {} not found",
                id
            )))?;
        crate::snapshot::export(ledger, &self.preferences.app_version, sink)
    }

    /// Imports a snapshot as a new ledger and returns its id. The caller
    /// still decides when to [`BookManager::commit`].
    pub fn import_snapshot(
        &mut self,
        bytes: &[u8],
        new_name: Option<&str>,
        sink: &mut dyn crate::snapshot::ProgressSink,
    ) -> Result<Uuid> {
        crate::snapshot::import_ledger(&mut self.book, bytes, new_name, sink)
    }

    /// Durably persists the current book state.
    pub fn commit(&self) -> Result<()> {
        self.storage.save(&self.book)
    }
}
