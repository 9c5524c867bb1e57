//! Snapshot codec: serializes one ledger's entire owned subgraph into a
//! self-contained `.ledgerbackup` document and reconstructs it under a
//! fresh identifier namespace with every internal cross-reference intact.

pub mod progress;
pub mod records;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::budget::Budget;
use crate::domain::ledger::{Ledger, LedgerBook};
use crate::domain::transaction::Transaction;
use crate::errors::{LedgerError, Result};

pub use progress::{NoopSink, ProgressSink};
pub use records::{SnapshotDocument, BACKUP_EXTENSION, FORMAT_VERSION};

/// Counts and source metadata for a snapshot, produced without mutating
/// any store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotSummary {
    pub ledger_name: String,
    pub currency: String,
    pub export_date: DateTime<Utc>,
    pub accounts: usize,
    pub categories: usize,
    pub transactions: usize,
    pub budgets: usize,
    pub tags: usize,
}

/// Serializes the ledger's full owned subgraph into snapshot bytes.
pub fn export(
    ledger: &Ledger,
    app_version: &str,
    sink: &mut dyn ProgressSink,
) -> Result<Vec<u8>> {
    sink.report(0.0, "Collecting records");
    let document = SnapshotDocument {
        version: FORMAT_VERSION.to_string(),
        export_date: Utc::now(),
        app_version: app_version.to_string(),
        ledger: records::LedgerRecord::from(ledger),
        accounts: ledger.accounts.iter().map(Into::into).collect(),
        categories: ledger.categories.iter().map(Into::into).collect(),
        transactions: ledger.transactions.iter().map(Into::into).collect(),
        budgets: ledger.budgets.iter().map(Into::into).collect(),
        tags: ledger.tags.iter().map(Into::into).collect(),
    };
    sink.report(0.5, "Serializing snapshot");
    let bytes = serde_json::to_vec_pretty(&document)
        .map_err(|err| LedgerError::Persistence(err.to_string()))?;
    sink.report(1.0, "Export complete");
    tracing::info!(
        ledger = %ledger.name,
        transactions = document.transactions.len(),
        "ledger exported"
    );
    Ok(bytes)
}

/// Parses snapshot bytes and returns counts without touching any store.
pub fn preview(bytes: &[u8]) -> Result<SnapshotSummary> {
    let document = parse(bytes)?;
    Ok(SnapshotSummary {
        ledger_name: document.ledger.name.clone(),
        currency: document.ledger.currency.clone(),
        export_date: document.export_date,
        accounts: document.accounts.len(),
        categories: document.categories.len(),
        transactions: document.transactions.len(),
        budgets: document.budgets.len(),
        tags: document.tags.len(),
    })
}

/// Reconstructs the snapshot as a new, independent ledger inside `book`
/// and returns its id.
///
/// Record arrays may arrive in any order. Account balances are taken
/// verbatim from the document; the balance mutation protocol is never
/// re-run because imported transactions are already-settled history.
/// Dangling inner references resolve to "no reference"; only an unreadable
/// outer document aborts the import, leaving no partial ledger behind.
pub fn import_ledger(
    book: &mut LedgerBook,
    bytes: &[u8],
    new_name: Option<&str>,
    sink: &mut dyn ProgressSink,
) -> Result<Uuid> {
    let document = parse(bytes)?;
    sink.report(0.1, "Snapshot parsed");

    let base_name = new_name.unwrap_or(&document.ledger.name);
    let name = book.unique_ledger_name(base_name);
    let mut ledger = Ledger::new(name, document.ledger.currency.clone());

    // Old-identifier → new-identifier tables, one per entity kind.
    // Document identifiers are never reused as live identifiers.
    let mut account_map: HashMap<Uuid, Uuid> = HashMap::new();
    let mut category_map: HashMap<Uuid, Uuid> = HashMap::new();
    let mut tag_map: HashMap<Uuid, Uuid> = HashMap::new();

    for record in &document.accounts {
        let account = record.instantiate();
        account_map.insert(record.id, account.id);
        ledger.accounts.push(account);
    }
    for record in &document.tags {
        let tag = record.instantiate();
        tag_map.insert(record.id, tag.id);
        ledger.tags.push(tag);
    }
    sink.report(0.3, "Accounts and tags restored");

    // Mandatory two-pass order: roots exist before any leaf resolves its
    // parent. Leaf parents resolve against the root table only, so a
    // malformed chain deeper than two levels flattens to a root.
    let mut root_map: HashMap<Uuid, Uuid> = HashMap::new();
    for record in document.categories.iter().filter(|r| r.parent_id.is_none()) {
        let category = record.instantiate();
        root_map.insert(record.id, category.id);
        category_map.insert(record.id, category.id);
        ledger.categories.push(category);
    }
    for record in &document.categories {
        let Some(old_parent) = record.parent_id else {
            continue;
        };
        let mut category = record.instantiate();
        match root_map.get(&old_parent) {
            Some(new_parent) => {
                let parent_kind = ledger
                    .category(*new_parent)
                    .map(|parent| parent.kind);
                if parent_kind == Some(record.kind) {
                    category.parent_id = Some(*new_parent);
                } else {
                    tracing::warn!(
                        category = %record.name,
                        "parent kind mismatch, flattening category to root"
                    );
                }
            }
            None => {
                tracing::warn!(
                    category = %record.name,
                    parent = %old_parent,
                    "parent is missing or not a root, flattening category to root"
                );
            }
        }
        category_map.insert(record.id, category.id);
        ledger.categories.push(category);
    }
    sink.report(0.5, "Categories restored");

    let total = document.transactions.len().max(1);
    for (index, record) in document.transactions.iter().enumerate() {
        let mut txn = Transaction::new(record.kind, record.amount, record.date);
        txn.from_account = record
            .from_account_id
            .and_then(|id| account_map.get(&id).copied());
        txn.to_account = record
            .to_account_id
            .and_then(|id| account_map.get(&id).copied());
        txn.category_id = record
            .category_id
            .and_then(|id| category_map.get(&id).copied());
        txn.tag_ids = record
            .tag_ids
            .iter()
            .filter_map(|id| tag_map.get(id).copied())
            .collect();
        txn.note = record.note.clone();
        txn.payee = record.payee.clone();
        txn.image_ref = record.image_ref.clone();
        txn.created_at = record.created_at;
        txn.modified_at = record.modified_at;
        ledger.transactions.push(txn);
        if (index + 1) % 500 == 0 {
            let fraction = 0.5 + 0.4 * ((index + 1) as f64 / total as f64);
            sink.report(fraction, "Restoring transactions");
        }
    }
    sink.report(0.9, "Transactions restored");

    let mut skipped_budgets = 0usize;
    for record in &document.budgets {
        let category_id = record
            .category_id
            .and_then(|id| category_map.get(&id).copied());
        let Some(category_id) = category_id else {
            skipped_budgets += 1;
            tracing::warn!(budget = %record.id, "budget category unresolved, record skipped");
            continue;
        };
        let mut budget = Budget::new(category_id, record.amount, record.period, record.start_date);
        budget.end_date = record.end_date;
        budget.enable_rollover = record.enable_rollover;
        budget.rollover_amount = record.rollover_amount;
        budget.created_at = record.created_at;
        ledger.budgets.push(budget);
    }

    let id = book.add_ledger(ledger);
    sink.report(1.0, "Import complete");
    tracing::info!(
        ledger = %book.ledger(id).map(|l| l.name.as_str()).unwrap_or_default(),
        skipped_budgets,
        "ledger imported"
    );
    Ok(id)
}

fn parse(bytes: &[u8]) -> Result<SnapshotDocument> {
    let document: SnapshotDocument = serde_json::from_slice(bytes)
        .map_err(|err| LedgerError::Integrity(err.to_string()))?;
    ensure_version_supported(&document.version)?;
    Ok(document)
}

fn ensure_version_supported(version: &str) -> Result<()> {
    let major = version.split('.').next().unwrap_or_default();
    if major != "1" {
        return Err(LedgerError::Validation(format!(
            "unsupported snapshot version `{}`",
            version
        )));
    }
    Ok(())
}
