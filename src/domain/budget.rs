use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::Identifiable;
use crate::domain::period;

/// A recurring spending cap scoped to one category over a rolling window.
///
/// `end_date` is derived from `start_date` plus one period at creation and
/// is only ever mutated by the rollover transition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: Uuid,
    pub category_id: Uuid,
    pub amount: Decimal,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub enable_rollover: bool,
    pub rollover_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Budget {
    /// Creates a monthly or yearly budget; the window end is derived from
    /// the period length.
    pub fn new(
        category_id: Uuid,
        amount: Decimal,
        period: BudgetPeriod,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category_id,
            amount,
            period,
            start_date,
            end_date: period.advance(start_date),
            enable_rollover: false,
            rollover_amount: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }

    /// Creates a custom-window budget with an explicit end date.
    pub fn new_custom(
        category_id: Uuid,
        amount: Decimal,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        let mut budget = Self::new(category_id, amount, BudgetPeriod::Custom, start_date);
        budget.end_date = end_date;
        budget
    }

    pub fn with_rollover(mut self) -> Self {
        self.enable_rollover = true;
        self
    }
}

impl Identifiable for Budget {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Enumeration of budgeting periods.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPeriod {
    Monthly,
    Yearly,
    Custom,
}

impl BudgetPeriod {
    /// Moves a window boundary forward by one period length. Custom
    /// windows do not auto-advance.
    pub fn advance(&self, from: NaiveDate) -> NaiveDate {
        match self {
            BudgetPeriod::Monthly => period::add_months(from, 1),
            BudgetPeriod::Yearly => period::add_years(from, 1),
            BudgetPeriod::Custom => from,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_end_date_is_derived() {
        let budget = Budget::new(
            Uuid::new_v4(),
            dec!(500),
            BudgetPeriod::Monthly,
            date(2024, 1, 31),
        );
        assert_eq!(budget.end_date, date(2024, 2, 29));
    }

    #[test]
    fn custom_window_keeps_explicit_end() {
        let budget =
            Budget::new_custom(Uuid::new_v4(), dec!(300), date(2024, 5, 1), date(2024, 5, 15));
        assert_eq!(budget.end_date, date(2024, 5, 15));
        assert_eq!(budget.period.advance(budget.end_date), budget.end_date);
    }
}
