//! Budget period engine: usage, status, and rollover transitions over a
//! recurring window. All figures are computed on read, never cached.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::budget::{Budget, BudgetPeriod};
use crate::domain::ledger::Ledger;
use crate::domain::transaction::TransactionKind;
use crate::errors::{LedgerError, Result};

/// Derived figures for one budget window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetReport {
    pub used_amount: Decimal,
    pub remaining_amount: Decimal,
    /// used / (amount + rollover); may exceed 1.0.
    pub progress: Decimal,
    pub status: BudgetStatus,
    pub daily_average: Decimal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Safe,
    Caution,
    Warning,
    Exceeded,
}

impl BudgetStatus {
    fn from_progress(progress: Decimal) -> Self {
        if progress >= Decimal::ONE {
            BudgetStatus::Exceeded
        } else if progress >= Decimal::new(9, 1) {
            BudgetStatus::Warning
        } else if progress >= Decimal::new(8, 1) {
            BudgetStatus::Caution
        } else {
            BudgetStatus::Safe
        }
    }
}

pub struct BudgetService;

impl BudgetService {
    pub fn add(ledger: &mut Ledger, budget: Budget) -> Result<Uuid> {
        if ledger.category(budget.category_id).is_none() {
            return Err(LedgerError::Validation(
                "Budget category does not exist".into(),
            ));
        }
        if budget.amount < Decimal::ZERO {
            return Err(LedgerError::Validation(
                "Budget amount must be non-negative".into(),
            ));
        }
        Ok(ledger.add_budget(budget))
    }

    pub fn edit(ledger: &mut Ledger, id: Uuid, changes: Budget) -> Result<()> {
        if ledger.category(changes.category_id).is_none() {
            return Err(LedgerError::Validation(
                "Budget category does not exist".into(),
            ));
        }
        let budget = ledger
            .budget_mut(id)
            .ok_or_else(|| LedgerError::Validation("Budget not found".into()))?;
        budget.category_id = changes.category_id;
        budget.amount = changes.amount;
        budget.enable_rollover = changes.enable_rollover;
        ledger.touch();
        Ok(())
    }

    pub fn remove(ledger: &mut Ledger, id: Uuid) -> Result<()> {
        let before = ledger.budgets.len();
        ledger.budgets.retain(|budget| budget.id != id);
        if ledger.budgets.len() == before {
            return Err(LedgerError::Validation("Budget not found".into()));
        }
        ledger.touch();
        Ok(())
    }

    pub fn list(ledger: &Ledger) -> Vec<&Budget> {
        ledger.budgets.iter().collect()
    }

    /// Sum of expense-kind transaction amounts in the budget's category
    /// subtree with date inside [start, end).
    pub fn used_amount(ledger: &Ledger, budget: &Budget) -> Decimal {
        let ids = ledger.category_subtree_ids(budget.category_id);
        ledger
            .transactions
            .iter()
            .filter(|txn| txn.kind == TransactionKind::Expense)
            .filter(|txn| txn.category_id.map_or(false, |id| ids.contains(&id)))
            .filter(|txn| txn.date >= budget.start_date && txn.date < budget.end_date)
            .map(|txn| txn.amount)
            .sum()
    }

    pub fn remaining_amount(ledger: &Ledger, budget: &Budget) -> Decimal {
        budget.amount + budget.rollover_amount - Self::used_amount(ledger, budget)
    }

    /// Full derived report for the window as of `today`.
    pub fn report(ledger: &Ledger, budget_id: Uuid, today: NaiveDate) -> Result<BudgetReport> {
        let budget = ledger
            .budget(budget_id)
            .ok_or_else(|| LedgerError::Validation("Budget not found".into()))?;
        let used = Self::used_amount(ledger, budget);
        let total = budget.amount + budget.rollover_amount;
        let remaining = total - used;
        let progress = if total > Decimal::ZERO {
            used / total
        } else if used > Decimal::ZERO {
            Decimal::ONE
        } else {
            Decimal::ZERO
        };
        let days_left = (budget.end_date - today).num_days();
        let daily_average = if days_left <= 0 {
            Decimal::ZERO
        } else {
            remaining / Decimal::from(days_left)
        };
        Ok(BudgetReport {
            used_amount: used,
            remaining_amount: remaining,
            progress,
            status: BudgetStatus::from_progress(progress),
            daily_average,
        })
    }

    /// Carries a positive remainder into the next window and advances the
    /// window by one period length. Custom windows never auto-advance.
    ///
    /// The transition is externally triggered and deliberately not
    /// idempotent: calling it twice in one period double-advances, which
    /// the caller is responsible for preventing.
    pub fn rollover_to_next_period(ledger: &mut Ledger, budget_id: Uuid) -> Result<()> {
        let budget = ledger
            .budget(budget_id)
            .ok_or_else(|| LedgerError::Validation("Budget not found".into()))?;
        if !budget.enable_rollover {
            return Err(LedgerError::Validation(
                "Rollover is not enabled for this budget".into(),
            ));
        }
        let remaining = Self::remaining_amount(ledger, budget);
        let budget = ledger
            .budget_mut(budget_id)
            .ok_or_else(|| LedgerError::Validation("Budget not found".into()))?;
        budget.rollover_amount = if remaining > Decimal::ZERO {
            remaining
        } else {
            Decimal::ZERO
        };
        if budget.period != BudgetPeriod::Custom {
            budget.start_date = budget.end_date;
            budget.end_date = budget.period.advance(budget.start_date);
        }
        ledger.touch();
        Ok(())
    }
}
