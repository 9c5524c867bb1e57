//! Validated CRUD for transactions, wired through the balance protocol.
//!
//! Create and apply are one atomic step from the caller's perspective, as
//! are delete and revert. An update reverts the old state and applies the
//! new one against the same in-memory accounts, so a single combined
//! persistence commit leaves balances correct.

use uuid::Uuid;

use crate::core::services::balance;
use crate::domain::ledger::Ledger;
use crate::domain::transaction::Transaction;
use crate::errors::{LedgerError, Result};

pub struct TransactionService;

impl TransactionService {
    /// Validates, stores, and applies a new transaction in one step.
    pub fn add(ledger: &mut Ledger, transaction: Transaction) -> Result<Uuid> {
        transaction.validate()?;
        Self::ensure_references(ledger, &transaction)?;
        balance::apply(ledger, &transaction);
        Ok(ledger.add_transaction(transaction))
    }

    /// Replaces the stored state of transaction `id` with `changes`,
    /// reverting the old balance effect and applying the new one.
    pub fn update(ledger: &mut Ledger, id: Uuid, mut changes: Transaction) -> Result<()> {
        changes.validate()?;
        Self::ensure_references(ledger, &changes)?;
        let old = ledger
            .transaction(id)
            .cloned()
            .ok_or_else(|| LedgerError::Validation("Transaction not found".into()))?;
        balance::revert(ledger, &old);
        balance::apply(ledger, &changes);
        changes.id = old.id;
        changes.created_at = old.created_at;
        changes.touch();
        let slot = ledger
            .transaction_mut(id)
            .ok_or_else(|| LedgerError::Validation("Transaction not found".into()))?;
        *slot = changes;
        ledger.touch();
        Ok(())
    }

    /// Removes a transaction, reverting its balance effect, and returns
    /// the removed instance.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> Result<Transaction> {
        let removed = ledger
            .remove_transaction(id)
            .ok_or_else(|| LedgerError::Validation("Transaction not found".into()))?;
        balance::revert(ledger, &removed);
        Ok(removed)
    }

    pub fn list(ledger: &Ledger) -> Vec<&Transaction> {
        ledger.transactions.iter().collect()
    }

    fn ensure_references(ledger: &Ledger, transaction: &Transaction) -> Result<()> {
        for account_id in [transaction.from_account, transaction.to_account]
            .into_iter()
            .flatten()
        {
            if ledger.account(account_id).is_none() {
                return Err(LedgerError::Validation(format!(
                    "linked account {} does not exist",
                    account_id
                )));
            }
        }
        if let Some(category_id) = transaction.category_id {
            if ledger.category(category_id).is_none() {
                return Err(LedgerError::Validation(
                    "linked category does not exist".into(),
                ));
            }
        }
        for tag_id in &transaction.tag_ids {
            if ledger.tag(*tag_id).is_none() {
                return Err(LedgerError::Validation(format!(
                    "linked tag {} does not exist",
                    tag_id
                )));
            }
        }
        Ok(())
    }
}
