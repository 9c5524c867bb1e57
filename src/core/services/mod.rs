pub mod account_service;
pub mod balance;
pub mod budget_service;
pub mod category_service;
pub mod tag_service;
pub mod transaction_service;

pub use account_service::AccountService;
pub use budget_service::{BudgetReport, BudgetService, BudgetStatus};
pub use category_service::CategoryService;
pub use tag_service::TagService;
pub use transaction_service::TransactionService;
