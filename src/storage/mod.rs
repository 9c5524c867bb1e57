//! Persistence seam for the ledger book.
//!
//! The engine itself only needs insert/delete/save semantics over the
//! in-memory graph plus one explicit commit; the backend decides how the
//! book is physically stored.

pub mod json_backend;

pub use json_backend::JsonStorage;

use crate::domain::ledger::LedgerBook;
use crate::errors::Result;

/// Trait that abstracts interaction with the persistence layer.
pub trait StorageBackend: Send + Sync {
    /// Loads the persisted book, or `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<LedgerBook>>;
    /// Durably writes the whole book.
    fn save(&self, book: &LedgerBook) -> Result<()>;
}
