use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Identifiable, NamedEntity};
use crate::errors::{LedgerError, Result};

/// A balance-bearing store of value inside one ledger.
///
/// The balance is a signed running total mutated exclusively by the balance
/// mutation protocol (or reconciliation); nothing else may write it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
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
    #[serde(default)]
    pub exclude_from_total: bool,
    #[serde(default)]
    pub archived: bool,
    pub sort_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new account with a zero balance.
    pub fn new(name: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            balance: Decimal::ZERO,
            credit_limit: None,
            statement_day: None,
            due_day: None,
            card_last4: None,
            color_hex: "#4A90D9".into(),
            icon_name: "wallet".into(),
            exclude_from_total: false,
            archived: false,
            sort_order: 0,
            note: None,
            created_at: Utc::now(),
        }
    }

    /// Attaches the credit-card field group in one step.
    pub fn with_credit_terms(mut self, limit: Decimal, statement_day: u8, due_day: u8) -> Self {
        self.credit_limit = Some(limit);
        self.statement_day = Some(statement_day);
        self.due_day = Some(due_day);
        self
    }

    /// Checks the credit-card field-group invariant: limit, statement day,
    /// and due day are present if and only if the account is a credit card,
    /// and all three must validate together.
    pub fn validate(&self) -> Result<()> {
        let has_terms = self.credit_limit.is_some()
            || self.statement_day.is_some()
            || self.due_day.is_some();
        if self.kind != AccountKind::CreditCard {
            if has_terms {
                return Err(LedgerError::Validation(format!(
                    "account `{}` carries credit terms but is not a credit card",
                    self.name
                )));
            }
            return Ok(());
        }
        match (self.credit_limit, self.statement_day, self.due_day) {
            (Some(limit), Some(statement), Some(due)) => {
                if limit <= Decimal::ZERO {
                    return Err(LedgerError::Validation(format!(
                        "credit limit for `{}` must be positive",
                        self.name
                    )));
                }
                if !(1..=31).contains(&statement) || !(1..=31).contains(&due) {
                    return Err(LedgerError::Validation(format!(
                        "statement/due day for `{}` must fall in 1..=31",
                        self.name
                    )));
                }
                Ok(())
            }
            _ => Err(LedgerError::Validation(format!(
                "credit card `{}` needs limit, statement day, and due day together",
                self.name
            ))),
        }
    }

    /// True when a credit card has its full, valid field group.
    pub fn is_credit_configured(&self) -> bool {
        self.kind == AccountKind::CreditCard && self.validate().is_ok()
    }
}

impl Identifiable for Account {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Account {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Enumerates the supported account classifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Cash,
    Checking,
    CreditCard,
    EWallet,
}
