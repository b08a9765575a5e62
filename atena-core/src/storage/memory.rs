use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Default)]
pub struct MemoryStorage {
    map: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl crate::storage::Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.map.write().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.map.write().remove(key);
    }
}
