use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::services::balance;
use crate::domain::account::Account;
use crate::domain::ledger::Ledger;
use crate::errors::{LedgerError, Result};

pub struct AccountService;

impl AccountService {
    pub fn add(ledger: &mut Ledger, account: Account) -> Result<Uuid> {
        Self::validate_name(ledger, None, &account.name)?;
        account.validate()?;
        Ok(ledger.add_account(account))
    }

    pub fn edit(ledger: &mut Ledger, id: Uuid, changes: Account) -> Result<()> {
        Self::validate_name(ledger, Some(id), &changes.name)?;
        changes.validate()?;
        let account = ledger
            .account_mut(id)
            .ok_or_else(|| LedgerError::Validation("Account not found".into()))?;
        account.name = changes.name;
        account.kind = changes.kind;
        account.credit_limit = changes.credit_limit;
        account.statement_day = changes.statement_day;
        account.due_day = changes.due_day;
        account.card_last4 = changes.card_last4;
        account.color_hex = changes.color_hex;
        account.icon_name = changes.icon_name;
        account.exclude_from_total = changes.exclude_from_total;
        account.archived = changes.archived;
        account.sort_order = changes.sort_order;
        account.note = changes.note;
        ledger.touch();
        Ok(())
    }

    /// Removes an account that has no linked transactions. Blocked
    /// removals report the number of transactions still referencing the
    /// account and perform no mutation.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> Result<()> {
        let linked = ledger.account_transactions(id).len();
        if linked > 0 {
            return Err(LedgerError::DeleteBlocked {
                entity: "account",
                count: linked,
            });
        }
        let before = ledger.accounts.len();
        ledger.accounts.retain(|account| account.id != id);
        if ledger.accounts.len() == before {
            return Err(LedgerError::Validation("Account not found".into()));
        }
        ledger.touch();
        Ok(())
    }

    /// Direct reconciliation: sets the balance and records the delta as an
    /// adjustment transaction.
    pub fn adjust_balance(
        ledger: &mut Ledger,
        id: Uuid,
        new_balance: Decimal,
        note: Option<String>,
    ) -> Result<Uuid> {
        balance::reconcile(ledger, id, new_balance, note)
    }

    pub fn list(ledger: &Ledger) -> Vec<&Account> {
        ledger.accounts.iter().collect()
    }

    fn validate_name(ledger: &Ledger, exclude: Option<Uuid>, candidate: &str) -> Result<()> {
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = ledger.accounts.iter().any(|account| {
            let name = account.name.trim().to_ascii_lowercase();
            name == normalized && exclude.map_or(true, |id| account.id != id)
        });
        if duplicate {
            Err(LedgerError::Validation(format!(
                "Account `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}
