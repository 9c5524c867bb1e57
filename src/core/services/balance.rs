//! Balance mutation protocol.
//!
//! Keeps `Account::balance` consistent with the set of live transactions
//! referencing it. `apply` runs exactly once when a transaction is durably
//! created and `revert` exactly once when it is durably deleted; an edit is
//! revert(old) immediately followed by apply(new) against the same
//! in-memory accounts, committed as one persistence step.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::ledger::Ledger;
use crate::domain::transaction::{Transaction, TransactionKind};
use crate::errors::{LedgerError, Result};

/// Applies the balance effect of a transaction to the accounts it touches.
///
/// Missing required account references are silent no-ops for that side:
/// the protocol stays permissive so snapshot replay and partially
/// specified drafts never fail here. Callers validate completeness before
/// persisting.
pub fn apply(ledger: &mut Ledger, transaction: &Transaction) {
    match transaction.kind {
        TransactionKind::Expense => {
            debit(ledger, transaction.from_account, transaction.amount);
        }
        TransactionKind::Income => {
            credit(ledger, transaction.to_account, transaction.amount);
        }
        TransactionKind::Transfer => {
            debit(ledger, transaction.from_account, transaction.amount);
            credit(ledger, transaction.to_account, transaction.amount);
        }
        // Adjustment effects are applied once by `reconcile`, not here.
        TransactionKind::Adjustment => {}
    }
}

/// Exact algebraic inverse of [`apply`].
pub fn revert(ledger: &mut Ledger, transaction: &Transaction) {
    match transaction.kind {
        TransactionKind::Expense => {
            credit(ledger, transaction.from_account, transaction.amount);
        }
        TransactionKind::Income => {
            debit(ledger, transaction.to_account, transaction.amount);
        }
        TransactionKind::Transfer => {
            credit(ledger, transaction.from_account, transaction.amount);
            debit(ledger, transaction.to_account, transaction.amount);
        }
        TransactionKind::Adjustment => {}
    }
}

/// Sets an account balance directly and records the delta as an adjustment
/// transaction for audit. This is the only path that produces adjustments.
pub fn reconcile(
    ledger: &mut Ledger,
    account_id: Uuid,
    new_balance: Decimal,
    note: Option<String>,
) -> Result<Uuid> {
    let account = ledger
        .account(account_id)
        .ok_or_else(|| LedgerError::Validation(format!("account {} not found", account_id)))?;
    let delta = new_balance - account.balance;
    let today = chrono::Utc::now().date_naive();
    let mut adjustment = Transaction::new(TransactionKind::Adjustment, delta.abs(), today)
        .with_to_account(account_id);
    adjustment.note = note;

    let account = ledger
        .account_mut(account_id)
        .ok_or_else(|| LedgerError::Validation(format!("account {} not found", account_id)))?;
    account.balance = new_balance;
    tracing::debug!(%account_id, %delta, "account reconciled");
    Ok(ledger.add_transaction(adjustment))
}

fn debit(ledger: &mut Ledger, account_id: Option<Uuid>, amount: Decimal) {
    if let Some(account) = account_id.and_then(|id| ledger.account_mut(id)) {
        account.balance -= amount;
    }
}

fn credit(ledger: &mut Ledger, account_id: Option<Uuid>, amount: Decimal) {
    if let Some(account) = account_id.and_then(|id| ledger.account_mut(id)) {
        account.balance += amount;
    }
}
