pub mod expense;
pub mod group;
pub mod user;

pub use expense::{Expense, NewExpense};
pub use group::{Group, GroupDetails, GroupImage, NewGroupForm};
pub use user::{AuthenticatedUser, User, UserId};
