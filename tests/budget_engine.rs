use chrono::NaiveDate;
use ledger_core::{
    core::services::{BudgetService, BudgetStatus, CategoryService, TransactionService},
    domain::{
        account::{Account, AccountKind},
        budget::{Budget, BudgetPeriod},
        category::{Category, CategoryKind},
        ledger::Ledger,
        transaction::{Transaction, TransactionKind},
    },
};
use rust_decimal_macros::dec;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Fixture {
    ledger: Ledger,
    account: Uuid,
    food: Uuid,
    groceries: Uuid,
}

fn fixture() -> Fixture {
    let mut ledger = Ledger::new("Budgets", "USD");
    let mut checking = Account::new("Checking", AccountKind::Checking);
    checking.balance = dec!(5000);
    let account = ledger.add_account(checking);
    let root = Category::new_root("Food", CategoryKind::Expense);
    let child = Category::new_child("Groceries", &root).unwrap();
    let food = CategoryService::add(&mut ledger, root).unwrap();
    let groceries = CategoryService::add(&mut ledger, child).unwrap();
    Fixture {
        ledger,
        account,
        food,
        groceries,
    }
}

fn spend(fx: &mut Fixture, category: Uuid, amount: rust_decimal::Decimal, on: NaiveDate) {
    let txn = Transaction::new(TransactionKind::Expense, amount, on)
        .with_from_account(fx.account)
        .with_category(category);
    TransactionService::add(&mut fx.ledger, txn).unwrap();
}

#[test]
fn usage_aggregates_across_the_category_subtree() {
    let mut fx = fixture();
    let budget = Budget::new(fx.food, dec!(1000), BudgetPeriod::Monthly, date(2024, 5, 1));
    let budget_id = BudgetService::add(&mut fx.ledger, budget).unwrap();

    let (food, groceries) = (fx.food, fx.groceries);
    spend(&mut fx, food, dec!(200), date(2024, 5, 3));
    spend(&mut fx, groceries, dec!(350.25), date(2024, 5, 12));
    // Income and transfers never count toward budget usage.
    let refund = Transaction::new(TransactionKind::Income, dec!(50), date(2024, 5, 13))
        .with_to_account(fx.account)
        .with_category(fx.food);
    TransactionService::add(&mut fx.ledger, refund).unwrap();

    let report = BudgetService::report(&fx.ledger, budget_id, date(2024, 5, 15)).unwrap();
    assert_eq!(report.used_amount, dec!(550.25));
    assert_eq!(report.remaining_amount, dec!(449.75));
    assert_eq!(report.status, BudgetStatus::Safe);
}

#[test]
fn rollover_carries_remainder_into_next_month() {
    let mut fx = fixture();
    let budget = Budget::new(fx.food, dec!(1000), BudgetPeriod::Monthly, date(2024, 5, 1))
        .with_rollover();
    let budget_id = BudgetService::add(&mut fx.ledger, budget).unwrap();
    let groceries = fx.groceries;
    spend(&mut fx, groceries, dec!(850), date(2024, 5, 20));

    BudgetService::rollover_to_next_period(&mut fx.ledger, budget_id).unwrap();
    let budget = fx.ledger.budget(budget_id).unwrap();
    assert_eq!(budget.rollover_amount, dec!(150));
    assert_eq!(budget.start_date, date(2024, 6, 1));
    assert_eq!(budget.end_date, date(2024, 7, 1));

    // The carried amount raises next period's headroom.
    let food = fx.food;
    spend(&mut fx, food, dec!(900), date(2024, 6, 10));
    let report = BudgetService::report(&fx.ledger, budget_id, date(2024, 6, 15)).unwrap();
    assert_eq!(report.remaining_amount, dec!(250));
    assert_eq!(report.status, BudgetStatus::Safe);
}

#[test]
fn overspent_rollover_resets_to_zero() {
    let mut fx = fixture();
    let budget = Budget::new(fx.food, dec!(500), BudgetPeriod::Monthly, date(2024, 5, 1))
        .with_rollover();
    let budget_id = BudgetService::add(&mut fx.ledger, budget).unwrap();
    let food = fx.food;
    spend(&mut fx, food, dec!(550), date(2024, 5, 8));

    BudgetService::rollover_to_next_period(&mut fx.ledger, budget_id).unwrap();
    let budget = fx.ledger.budget(budget_id).unwrap();
    assert_eq!(budget.rollover_amount, dec!(0));
    assert_eq!(budget.start_date, date(2024, 6, 1));
}

#[test]
fn yearly_budget_advances_by_a_calendar_year() {
    let mut fx = fixture();
    let budget = Budget::new(fx.food, dec!(12000), BudgetPeriod::Yearly, date(2024, 2, 29))
        .with_rollover();
    let budget_id = BudgetService::add(&mut fx.ledger, budget).unwrap();
    assert_eq!(
        fx.ledger.budget(budget_id).unwrap().end_date,
        date(2025, 2, 28)
    );

    BudgetService::rollover_to_next_period(&mut fx.ledger, budget_id).unwrap();
    let budget = fx.ledger.budget(budget_id).unwrap();
    assert_eq!(budget.start_date, date(2025, 2, 28));
    assert_eq!(budget.end_date, date(2026, 2, 28));
}

#[test]
fn custom_windows_never_auto_advance() {
    let mut fx = fixture();
    let budget = Budget::new_custom(fx.food, dec!(400), date(2024, 5, 1), date(2024, 5, 20))
        .with_rollover();
    let budget_id = BudgetService::add(&mut fx.ledger, budget).unwrap();
    let food = fx.food;
    spend(&mut fx, food, dec!(100), date(2024, 5, 5));

    BudgetService::rollover_to_next_period(&mut fx.ledger, budget_id).unwrap();
    let budget = fx.ledger.budget(budget_id).unwrap();
    assert_eq!(budget.rollover_amount, dec!(300));
    assert_eq!(budget.start_date, date(2024, 5, 1));
    assert_eq!(budget.end_date, date(2024, 5, 20));
}

#[test]
fn progress_can_exceed_one() {
    let mut fx = fixture();
    let budget = Budget::new(fx.food, dec!(1000), BudgetPeriod::Monthly, date(2024, 5, 1));
    let budget_id = BudgetService::add(&mut fx.ledger, budget).unwrap();
    let food = fx.food;
    spend(&mut fx, food, dec!(1200), date(2024, 5, 2));

    let report = BudgetService::report(&fx.ledger, budget_id, date(2024, 5, 10)).unwrap();
    assert_eq!(report.progress, dec!(1.2));
    assert_eq!(report.remaining_amount, dec!(-200));
    assert_eq!(report.status, BudgetStatus::Exceeded);
}
