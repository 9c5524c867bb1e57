use chrono::NaiveDate;
use ledger_core::{
    core::services::{balance, CategoryService, TransactionService},
    domain::{
        account::{Account, AccountKind},
        budget::{Budget, BudgetPeriod},
        category::{Category, CategoryKind},
        ledger::{Ledger, LedgerBook},
        tag::Tag,
        transaction::{Transaction, TransactionKind},
    },
    snapshot::{self, NoopSink},
};
use rust_decimal_macros::dec;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Builds a ledger exercising all four transaction kinds, a parent/child
/// category pair, budgets, and tags. Accounts start from non-zero
/// balances (seeded by reconciliation), so replaying apply() on import
/// would NOT reproduce the exported balances.
fn rich_ledger() -> Ledger {
    let mut ledger = Ledger::new("Household", "EUR");

    let checking = Account::new("Checking", AccountKind::Checking);
    let wallet = Account::new("Wallet", AccountKind::Cash);
    let card = Account::new("Visa", AccountKind::CreditCard)
        .with_credit_terms(dec!(6000), 3, 21);
    let checking_id = ledger.add_account(checking);
    let wallet_id = ledger.add_account(wallet);
    let card_id = ledger.add_account(card);
    balance::reconcile(&mut ledger, checking_id, dec!(3210.45), Some("opening".into())).unwrap();
    balance::reconcile(&mut ledger, wallet_id, dec!(180.00), None).unwrap();

    let food = Category::new_root("Food", CategoryKind::Expense);
    let groceries = Category::new_child("Groceries", &food).unwrap();
    let salary = Category::new_root("Salary", CategoryKind::Income);
    let food_id = CategoryService::add(&mut ledger, food).unwrap();
    let groceries_id = CategoryService::add(&mut ledger, groceries).unwrap();
    let salary_id = CategoryService::add(&mut ledger, salary).unwrap();

    let errand = Tag::new("errand");
    let monthly = Tag::new("monthly");
    let errand_id = ledger.add_tag(errand);
    let monthly_id = ledger.add_tag(monthly);

    let expense = Transaction::new(TransactionKind::Expense, dec!(64.37), date(2024, 6, 3))
        .with_from_account(checking_id)
        .with_category(groceries_id)
        .with_tags(vec![errand_id]);
    let income = Transaction::new(TransactionKind::Income, dec!(2600), date(2024, 6, 1))
        .with_to_account(checking_id)
        .with_category(salary_id)
        .with_tags(vec![monthly_id, errand_id]);
    let transfer = Transaction::new(TransactionKind::Transfer, dec!(120), date(2024, 6, 5))
        .with_from_account(checking_id)
        .with_to_account(wallet_id);
    TransactionService::add(&mut ledger, expense).unwrap();
    TransactionService::add(&mut ledger, income).unwrap();
    TransactionService::add(&mut ledger, transfer).unwrap();
    balance::reconcile(&mut ledger, card_id, dec!(-75.20), Some("statement".into())).unwrap();

    let food_budget = Budget::new(food_id, dec!(900), BudgetPeriod::Monthly, date(2024, 6, 1))
        .with_rollover();
    let year_budget = Budget::new(salary_id, dec!(31200), BudgetPeriod::Yearly, date(2024, 1, 1));
    ledger.add_budget(food_budget);
    ledger.add_budget(year_budget);

    ledger
}

#[test]
fn round_trip_preserves_counts_topology_and_balances() {
    let original = rich_ledger();
    let bytes = snapshot::export(&original, "0.1.0", &mut NoopSink).unwrap();

    let mut book = LedgerBook::new(Ledger::new("Personal", "USD"));
    let id = snapshot::import_ledger(&mut book, &bytes, None, &mut NoopSink).unwrap();
    let imported = book.ledger(id).unwrap();

    assert_eq!(imported.name, "Household");
    assert_eq!(imported.currency, "EUR");
    assert_eq!(imported.accounts.len(), original.accounts.len());
    assert_eq!(imported.categories.len(), original.categories.len());
    assert_eq!(imported.transactions.len(), original.transactions.len());
    assert_eq!(imported.budgets.len(), original.budgets.len());
    assert_eq!(imported.tags.len(), original.tags.len());

    // Fresh identifier namespace.
    assert_ne!(imported.id, original.id);
    for account in &imported.accounts {
        assert!(original.account(account.id).is_none());
    }

    // Balances verbatim, not replayed. The adjustment transactions carry
    // only the audit delta, so re-running apply() could not reproduce the
    // reconciled balances.
    for account in &original.accounts {
        let twin = imported
            .accounts
            .iter()
            .find(|a| a.name == account.name)
            .expect("corresponding account");
        assert_eq!(twin.balance, account.balance, "balance of {}", account.name);
        assert_eq!(twin.kind, account.kind);
        assert_eq!(twin.credit_limit, account.credit_limit);
    }

    // Relation topology survives the identifier rewrite.
    let find_category = |ledger: &Ledger, name: &str| -> Uuid {
        ledger
            .categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.id)
            .expect("category present")
    };
    let groceries_new = find_category(imported, "Groceries");
    let food_new = find_category(imported, "Food");
    assert_eq!(
        imported.category(groceries_new).unwrap().parent_id,
        Some(food_new)
    );
    assert_eq!(
        imported.category_full_path(groceries_new).unwrap(),
        "Food > Groceries"
    );

    let expense = imported
        .transactions
        .iter()
        .find(|t| t.kind == TransactionKind::Expense && t.amount == dec!(64.37))
        .expect("expense transaction");
    assert_eq!(expense.category_id, Some(groceries_new));
    let from = expense.from_account.expect("resolved from account");
    assert_eq!(imported.account(from).unwrap().name, "Checking");
    assert_eq!(expense.tag_ids.len(), 1);
    assert_eq!(imported.tag(expense.tag_ids[0]).unwrap().name, "errand");

    let income = imported
        .transactions
        .iter()
        .find(|t| t.kind == TransactionKind::Income)
        .expect("income transaction");
    assert_eq!(income.tag_ids.len(), 2);

    for budget in &imported.budgets {
        assert!(imported.category(budget.category_id).is_some());
    }
    let food_budget = imported
        .budgets
        .iter()
        .find(|b| b.category_id == food_new)
        .expect("food budget");
    assert!(food_budget.enable_rollover);
    assert_eq!(food_budget.amount, dec!(900));
    assert_eq!(food_budget.end_date, date(2024, 7, 1));

    assert!(imported.warnings().is_empty(), "no dangling references");
}

#[test]
fn importing_twice_disambiguates_the_second_name() {
    let original = rich_ledger();
    let bytes = snapshot::export(&original, "0.1.0", &mut NoopSink).unwrap();

    let mut book = LedgerBook::new(Ledger::new("Personal", "USD"));
    let first = snapshot::import_ledger(&mut book, &bytes, None, &mut NoopSink).unwrap();
    let second = snapshot::import_ledger(&mut book, &bytes, None, &mut NoopSink).unwrap();

    assert_eq!(book.ledger(first).unwrap().name, "Household");
    assert_eq!(book.ledger(second).unwrap().name, "Household (1)");
}

#[test]
fn caller_supplied_name_overrides_the_document_name() {
    let original = rich_ledger();
    let bytes = snapshot::export(&original, "0.1.0", &mut NoopSink).unwrap();

    let mut book = LedgerBook::new(Ledger::new("Personal", "USD"));
    let id = snapshot::import_ledger(&mut book, &bytes, Some("Archive 2024"), &mut NoopSink)
        .unwrap();
    assert_eq!(book.ledger(id).unwrap().name, "Archive 2024");
}

#[test]
fn import_is_order_independent() {
    let original = rich_ledger();
    let bytes = snapshot::export(&original, "0.1.0", &mut NoopSink).unwrap();
    let mut value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    // Shuffle every record array: reverse order puts leaves before roots
    // and transactions before nothing they depend on.
    for key in ["accounts", "categories", "transactions", "budgets", "tags"] {
        value[key].as_array_mut().unwrap().reverse();
    }
    let bytes = serde_json::to_vec(&value).unwrap();

    let mut book = LedgerBook::new(Ledger::new("Personal", "USD"));
    let id = snapshot::import_ledger(&mut book, &bytes, None, &mut NoopSink).unwrap();
    let imported = book.ledger(id).unwrap();
    assert_eq!(imported.transactions.len(), original.transactions.len());
    assert!(imported.warnings().is_empty());
    let groceries = imported
        .categories
        .iter()
        .find(|c| c.name == "Groceries")
        .unwrap();
    assert!(groceries.parent_id.is_some());
}

#[test]
fn preview_matches_the_exported_graph() {
    let original = rich_ledger();
    let bytes = snapshot::export(&original, "0.1.0", &mut NoopSink).unwrap();
    let summary = snapshot::preview(&bytes).unwrap();
    assert_eq!(summary.ledger_name, "Household");
    assert_eq!(summary.currency, "EUR");
    assert_eq!(summary.accounts, 3);
    assert_eq!(summary.categories, 3);
    assert_eq!(summary.transactions, original.transactions.len());
    assert_eq!(summary.budgets, 2);
    assert_eq!(summary.tags, 2);
}
