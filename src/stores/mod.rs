pub mod auth;
pub mod expenses;
pub mod groups;

pub use auth::{AuthStore, USER_STORAGE_KEY};
pub use expenses::ExpenseStore;
pub use groups::GroupStore;

use tokio::sync::watch;

/// Change counter shared by the stores. Each mutation bumps it and every
/// subscriber sees the new value, which is their cue to re-read the store.
#[derive(Debug)]
pub struct Revision {
    tx: watch::Sender<u64>,
}

impl Revision {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Revision { tx }
    }

    pub fn bump(&self) {
        self.tx.send_modify(|rev| *rev += 1);
    }

    pub fn current(&self) -> u64 {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for Revision {
    fn default() -> Self {
        Self::new()
    }
}
