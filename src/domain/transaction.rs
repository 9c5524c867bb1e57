use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::Identifiable;
use crate::errors::{LedgerError, Result};

/// A dated monetary event affecting one or two accounts.
///
/// The amount is always non-negative; direction comes from the kind and
/// the populated account side(s).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub from_account: Option<Uuid>,
    pub to_account: Option<Uuid>,
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    #[serde(default)]
    pub tag_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(kind: TransactionKind, amount: Decimal, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            amount,
            date,
            kind,
            from_account: None,
            to_account: None,
            category_id: None,
            note: None,
            payee: None,
            image_ref: None,
            tag_ids: Vec::new(),
            created_at: now,
            modified_at: now,
        }
    }

    pub fn with_from_account(mut self, account_id: Uuid) -> Self {
        self.from_account = Some(account_id);
        self
    }

    pub fn with_to_account(mut self, account_id: Uuid) -> Self {
        self.to_account = Some(account_id);
        self
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_tags(mut self, tag_ids: Vec<Uuid>) -> Self {
        self.tag_ids = tag_ids;
        self
    }

    /// Validates the amount and the kind-dependent account requirements.
    ///
    /// The balance protocol itself tolerates missing sides for replay;
    /// this is the stricter gate callers run before persisting.
    pub fn validate(&self) -> Result<()> {
        if self.amount < Decimal::ZERO {
            return Err(LedgerError::Validation(
                "transaction amount must be non-negative".into(),
            ));
        }
        let missing = match self.kind {
            TransactionKind::Expense => self.from_account.is_none(),
            TransactionKind::Income => self.to_account.is_none(),
            TransactionKind::Transfer => {
                self.from_account.is_none() || self.to_account.is_none()
            }
            TransactionKind::Adjustment => self.to_account.is_none(),
        };
        if missing {
            return Err(LedgerError::Validation(format!(
                "{:?} transaction is missing a required account reference",
                self.kind
            )));
        }
        Ok(())
    }

    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// The four transaction kinds and their balance semantics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Debits `from_account`.
    Expense,
    /// Credits `to_account`.
    Income,
    /// Debits `from_account` and credits `to_account`.
    Transfer,
    /// Balance effect applied once at reconciliation time, never replayed.
    Adjustment,
}
