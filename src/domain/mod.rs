//! Entity graph: ledgers and the accounts, categories, transactions,
//! budgets, and tags they own.

pub mod account;
pub mod budget;
pub mod category;
pub mod common;
pub mod ledger;
pub mod period;
pub mod tag;
pub mod transaction;

pub use account::{Account, AccountKind};
pub use budget::{Budget, BudgetPeriod};
pub use category::{Category, CategoryKind};
pub use common::{query, Identifiable, NamedEntity};
pub use ledger::{Ledger, LedgerBook};
pub use tag::Tag;
pub use transaction::{Transaction, TransactionKind};
