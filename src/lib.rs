pub mod api;
pub mod config;
pub mod core;
pub mod infrastructure;
pub mod router;
pub mod session;
pub mod stores;

pub use crate::api::ApiClient;
pub use crate::core::errors::{ClientError, ErrorKind};
pub use crate::infrastructure::storage::{DurableStorage, file::FileStorage, in_memory::InMemoryStorage};
pub use crate::router::{RouteMatch, Router, View};
pub use crate::session::Session;
pub use crate::stores::{AuthStore, ExpenseStore, GroupStore};

#[cfg(test)]
mod tests; // Include integration tests
