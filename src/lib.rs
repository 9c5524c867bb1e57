#![doc(test(attr(deny(warnings))))]

//! Ledger Core keeps account balances, categorized transactions, budgets,
//! and tags consistent as money moves between accounts and time periods,
//! and round-trips whole ledgers through a stable-identifier snapshot.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod snapshot;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Ledger Core tracing initialized.");
    });
}
