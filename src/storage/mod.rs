//! Durable timer state
//!
//! The engine never holds authoritative state in memory: every decision reads
//! the record back through [`PersistentState`], which sits on top of any
//! [`KeyValueStore`] backend.

pub mod file_store;
pub mod memory_store;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{error::StoreError, state::TimerState};

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

/// Key under which the single timer record lives
pub const TIMER_STATE_KEY: &str = "countdown-timer-state";

/// A string key-value store that survives process restarts
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Removing a missing key succeeds
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Fail-soft access to the persisted [`TimerState`].
///
/// Backend failures are logged and swallowed. Unreadable or corrupt records
/// load as `None`.
#[derive(Clone)]
pub struct PersistentState {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl PersistentState {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, TIMER_STATE_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Overwrite the stored record
    pub fn save(&self, state: &TimerState) {
        let json = match serde_json::to_string(state) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize timer state: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(&self.key, &json) {
            warn!("Failed to save timer state: {}", e);
        } else {
            debug!("Saved timer state: {}", json);
        }
    }

    pub fn load(&self) -> Option<TimerState> {
        let raw = match self.store.get(&self.key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Failed to read timer state: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<TimerState>(&raw) {
            Ok(state) => {
                let validated = state.validated();
                if validated.is_none() {
                    warn!("Ignoring timer state with non-positive total: {}", raw);
                }
                validated
            }
            Err(e) => {
                warn!("Ignoring unreadable timer state: {}", e);
                None
            }
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.remove(&self.key) {
            warn!("Failed to clear timer state: {}", e);
        }
    }
}
