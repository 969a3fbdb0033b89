//! Group expense sharing: balances, settlements and storage

mod model;
mod netting;
mod shares;
mod summary;
pub mod repository;

pub use model::{Balance, Expense, ExpenseCategory, ExpenseSplit, Group, Member, Settlement, SplitType};
pub use netting::{member_balances, net_balances, net_balances_in, settle, Netting, SPLIT_TOLERANCE};
pub use shares::{calculate_splits, SplitMethod};
pub use summary::GroupSummary;
pub use repository::{GroupRepository, InMemoryGroupRepository, JsonFileGroupRepository};
