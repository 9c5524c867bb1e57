use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::account::Account;
use crate::domain::budget::Budget;
use crate::domain::category::Category;
use crate::domain::common::query;
use crate::domain::tag::Tag;
use crate::domain::transaction::Transaction;
use crate::errors::{LedgerError, Result};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// A named book of accounts sharing one currency.
///
/// The ledger owns every entity it references; cross-entity relations are
/// plain identifier fields resolved through the lookup accessors below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub id: Uuid,
    pub name: String,
    /// ISO-4217 code shared by every account in this ledger.
    pub currency: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ledger {
    pub fn new(name: impl Into<String>, currency: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            currency: currency.into(),
            accounts: Vec::new(),
            categories: Vec::new(),
            transactions: Vec::new(),
            budgets: Vec::new(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add_account(&mut self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        self.touch();
        id
    }

    pub fn add_category(&mut self, category: Category) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        self.touch();
        id
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    pub fn add_budget(&mut self, budget: Budget) -> Uuid {
        let id = budget.id;
        self.budgets.push(budget);
        self.touch();
        id
    }

    pub fn add_tag(&mut self, tag: Tag) -> Uuid {
        let id = tag.id;
        self.tags.push(tag);
        self.touch();
        id
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn account_mut(&mut self, id: Uuid) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id == id)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn category_mut(&mut self, id: Uuid) -> Option<&mut Category> {
        self.categories.iter_mut().find(|category| category.id == id)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        self.touch();
        Some(self.transactions.remove(index))
    }

    pub fn budget(&self, id: Uuid) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.id == id)
    }

    pub fn budget_mut(&mut self, id: Uuid) -> Option<&mut Budget> {
        self.budgets.iter_mut().find(|budget| budget.id == id)
    }

    pub fn tag(&self, id: Uuid) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.id == id)
    }

    /// Transactions touching the account on either side, derived by lookup.
    pub fn account_transactions(&self, account_id: Uuid) -> Vec<&Transaction> {
        query(&self.transactions, |txn| {
            txn.from_account == Some(account_id) || txn.to_account == Some(account_id)
        })
    }

    /// Direct children of a root category.
    pub fn category_children(&self, category_id: Uuid) -> Vec<&Category> {
        query(&self.categories, |category| {
            category.parent_id == Some(category_id)
        })
    }

    /// The category plus its children, as the id set used for budget usage
    /// and tallies.
    pub fn category_subtree_ids(&self, category_id: Uuid) -> Vec<Uuid> {
        let mut ids = vec![category_id];
        ids.extend(
            self.category_children(category_id)
                .iter()
                .map(|child| child.id),
        );
        ids
    }

    /// Owned transactions of a category: direct plus children's.
    pub fn category_transactions(&self, category_id: Uuid) -> Vec<&Transaction> {
        let ids = self.category_subtree_ids(category_id);
        query(&self.transactions, |txn| {
            txn.category_id.map_or(false, |id| ids.contains(&id))
        })
    }

    /// "Parent > Child" for leaves, the plain name for roots.
    pub fn category_full_path(&self, category_id: Uuid) -> Option<String> {
        let category = self.category(category_id)?;
        match category.parent_id.and_then(|pid| self.category(pid)) {
            Some(parent) => Some(format!("{} > {}", parent.name, category.name)),
            None => Some(category.name.clone()),
        }
    }

    /// Read-only integrity sweep listing dangling transaction references.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for txn in &self.transactions {
            if let Some(id) = txn.from_account {
                if self.account(id).is_none() {
                    warnings.push(format!(
                        "transaction {} references unknown from account {}",
                        txn.id, id
                    ));
                }
            }
            if let Some(id) = txn.to_account {
                if self.account(id).is_none() {
                    warnings.push(format!(
                        "transaction {} references unknown to account {}",
                        txn.id, id
                    ));
                }
            }
            if let Some(id) = txn.category_id {
                if self.category(id).is_none() {
                    warnings.push(format!(
                        "transaction {} references missing category {}",
                        txn.id, id
                    ));
                }
            }
            for tag_id in &txn.tag_ids {
                if self.tag(*tag_id).is_none() {
                    warnings.push(format!(
                        "transaction {} references missing tag {}",
                        txn.id, tag_id
                    ));
                }
            }
        }
        warnings
    }

    /// Clears every owned entity, leaving an empty ledger with the same
    /// identity and currency.
    pub fn reset(&mut self) {
        self.accounts.clear();
        self.categories.clear();
        self.transactions.clear();
        self.budgets.clear();
        self.tags.clear();
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// The user's full collection of ledgers. Exactly one is the default, and
/// at least one must always remain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerBook {
    #[serde(default = "LedgerBook::schema_version_default")]
    pub schema_version: u8,
    pub ledgers: Vec<Ledger>,
    pub default_id: Uuid,
}

impl LedgerBook {
    /// Creates a book whose first ledger becomes the default.
    pub fn new(initial: Ledger) -> Self {
        let default_id = initial.id;
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            ledgers: vec![initial],
            default_id,
        }
    }

    pub fn ledger(&self, id: Uuid) -> Option<&Ledger> {
        self.ledgers.iter().find(|ledger| ledger.id == id)
    }

    pub fn ledger_mut(&mut self, id: Uuid) -> Option<&mut Ledger> {
        self.ledgers.iter_mut().find(|ledger| ledger.id == id)
    }

    pub fn default_ledger(&self) -> Option<&Ledger> {
        self.ledger(self.default_id)
    }

    pub fn add_ledger(&mut self, ledger: Ledger) -> Uuid {
        let id = ledger.id;
        self.ledgers.push(ledger);
        id
    }

    pub fn set_default(&mut self, id: Uuid) -> Result<()> {
        if self.ledger(id).is_none() {
            return Err(LedgerError::Validation(format!("ledger {} not found", id)));
        }
        self.default_id = id;
        Ok(())
    }

    /// Deletes a ledger and everything it owns. Refuses to delete the last
    /// ledger; deleting the default promotes the first remaining ledger.
    pub fn delete_ledger(&mut self, id: Uuid) -> Result<()> {
        if self.ledgers.len() <= 1 {
            return Err(LedgerError::LastLedger);
        }
        let before = self.ledgers.len();
        self.ledgers.retain(|ledger| ledger.id != id);
        if self.ledgers.len() == before {
            return Err(LedgerError::Validation(format!("ledger {} not found", id)));
        }
        if self.default_id == id {
            self.default_id = self.ledgers[0].id;
        }
        Ok(())
    }

    /// Smallest-`n` " (n)" disambiguation for an imported ledger name.
    pub fn unique_ledger_name(&self, base: &str) -> String {
        let taken = |candidate: &str| self.ledgers.iter().any(|l| l.name == candidate);
        if !taken(base) {
            return base.to_string();
        }
        let mut n = 1usize;
        loop {
            let candidate = format!("{} ({})", base, n);
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
