pub mod memory;

pub use memory::MemoryStorage;

/// Synchronous string key-value store the deck store persists through.
/// `get` returns `None` when the key is unset. `set` and `remove` do not
/// report failure; a backend that can fail is expected to log and carry on,
/// and an unreadable record reads the same as an absent one.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}
