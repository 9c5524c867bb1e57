//! Flat record shapes for the `.ledgerbackup` document.
//!
//! Every record carries its own stable identifier and refers to sibling
//! entities by identifier only, so the document is self-contained and
//! order-independent at the relation level.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::account::{Account, AccountKind};
use crate::domain::budget::{Budget, BudgetPeriod};
use crate::domain::category::{Category, CategoryKind};
use crate::domain::ledger::Ledger;
use crate::domain::tag::Tag;
use crate::domain::transaction::{Transaction, TransactionKind};

pub const FORMAT_VERSION: &str = "1.0";

/// File extension convention for exported snapshots.
pub const BACKUP_EXTENSION: &str = "ledgerbackup";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDocument {
    pub version: String,
    pub export_date: DateTime<Utc>,
    pub app_version: String,
    pub ledger: LedgerRecord,
    pub accounts: Vec<AccountRecord>,
    pub categories: Vec<CategoryRecord>,
    pub transactions: Vec<TransactionRecord>,
    pub budgets: Vec<BudgetRecord>,
    pub tags: Vec<TagRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRecord {
    pub name: String,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub id: Uuid,
    pub name: String,
    pub kind: AccountKind,
    pub balance: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_limit: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement_day: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_day: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_last4: Option<String>,
    pub color_hex: String,
    pub icon_name: String,
    pub exclude_from_total: bool,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub sort_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<&Account> for AccountRecord {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            kind: account.kind,
            balance: account.balance,
            credit_limit: account.credit_limit,
            statement_day: account.statement_day,
            due_day: account.due_day,
            card_last4: account.card_last4.clone(),
            color_hex: account.color_hex.clone(),
            icon_name: account.icon_name.clone(),
            exclude_from_total: account.exclude_from_total,
            archived: account.archived,
            created_at: account.created_at,
            sort_order: account.sort_order,
            note: account.note.clone(),
        }
    }
}

impl AccountRecord {
    /// Rebuilds a live account under a fresh identifier. The balance is
    /// taken verbatim: imported transactions are already-settled history
    /// and must not be re-applied.
    pub fn instantiate(&self) -> Account {
        let mut account = Account::new(self.name.clone(), self.kind);
        account.balance = self.balance;
        account.credit_limit = self.credit_limit;
        account.statement_day = self.statement_day;
        account.due_day = self.due_day;
        account.card_last4 = self.card_last4.clone();
        account.color_hex = self.color_hex.clone();
        account.icon_name = self.icon_name.clone();
        account.exclude_from_total = self.exclude_from_total;
        account.archived = self.archived;
        account.created_at = self.created_at;
        account.sort_order = self.sort_order;
        account.note = self.note.clone();
        account
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub id: Uuid,
    pub name: String,
    pub icon_name: String,
    pub kind: CategoryKind,
    pub color_hex: String,
    pub sort_order: i32,
    pub hidden: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
}

impl From<&Category> for CategoryRecord {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            icon_name: category.icon_name.clone(),
            kind: category.kind,
            color_hex: category.color_hex.clone(),
            sort_order: category.sort_order,
            hidden: category.hidden,
            created_at: category.created_at,
            parent_id: category.parent_id,
        }
    }
}

impl CategoryRecord {
    /// Rebuilds a live category as a root; the importer links the parent
    /// afterwards once the remap table can resolve it.
    pub fn instantiate(&self) -> Category {
        let mut category = Category::new_root(self.name.clone(), self.kind);
        category.icon_name = self.icon_name.clone();
        category.color_hex = self.color_hex.clone();
        category.sort_order = self.sort_order;
        category.hidden = self.hidden;
        category.created_at = self.created_at;
        category
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: Uuid,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_account_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_account_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub tag_ids: Vec<Uuid>,
}

impl From<&Transaction> for TransactionRecord {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id,
            amount: txn.amount,
            date: txn.date,
            kind: txn.kind,
            note: txn.note.clone(),
            payee: txn.payee.clone(),
            image_ref: txn.image_ref.clone(),
            created_at: txn.created_at,
            modified_at: txn.modified_at,
            from_account_id: txn.from_account,
            to_account_id: txn.to_account,
            category_id: txn.category_id,
            tag_ids: txn.tag_ids.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRecord {
    pub id: Uuid,
    pub amount: Decimal,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub enable_rollover: bool,
    pub rollover_amount: Decimal,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
}

impl From<&Budget> for BudgetRecord {
    fn from(budget: &Budget) -> Self {
        Self {
            id: budget.id,
            amount: budget.amount,
            period: budget.period,
            start_date: budget.start_date,
            end_date: budget.end_date,
            enable_rollover: budget.enable_rollover,
            rollover_amount: budget.rollover_amount,
            created_at: budget.created_at,
            category_id: Some(budget.category_id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRecord {
    pub id: Uuid,
    pub name: String,
    pub color_hex: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl From<&Tag> for TagRecord {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name.clone(),
            color_hex: tag.color_hex.clone(),
            sort_order: tag.sort_order,
            created_at: tag.created_at,
        }
    }
}

impl TagRecord {
    pub fn instantiate(&self) -> Tag {
        let mut tag = Tag::new(self.name.clone());
        tag.color_hex = self.color_hex.clone();
        tag.sort_order = self.sort_order;
        tag.created_at = self.created_at;
        tag
    }
}

impl From<&Ledger> for LedgerRecord {
    fn from(ledger: &Ledger) -> Self {
        Self {
            name: ledger.name.clone(),
            currency: ledger.currency.clone(),
            created_at: ledger.created_at,
        }
    }
}
