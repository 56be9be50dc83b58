use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use anyhow::Result;

use crate::repository::traits::KeyValueStore;

#[derive(Debug, Clone, PartialEq)]
enum StoredValue {
    Text(String),
    Number(f64),
}

/// Process-local store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RefCell<HashMap<String, StoredValue>>,
    writes: Cell<usize>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saves performed so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    fn insert(&self, key: &str, value: StoredValue) {
        self.entries.borrow_mut().insert(key.to_string(), value);
        self.writes.set(self.writes.get() + 1);
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn load_string(&self, key: &str) -> Result<Option<String>> {
        match self.entries.borrow().get(key) {
            Some(StoredValue::Text(s)) => Ok(Some(s.clone())),
            _ => Ok(None),
        }
    }

    fn load_f64(&self, key: &str) -> Result<Option<f64>> {
        match self.entries.borrow().get(key) {
            Some(StoredValue::Number(n)) => Ok(Some(*n)),
            _ => Ok(None),
        }
    }

    fn save_string(&self, key: &str, value: &str) -> Result<()> {
        self.insert(key, StoredValue::Text(value.to_string()));
        Ok(())
    }

    fn save_f64(&self, key: &str, value: f64) -> Result<()> {
        self.insert(key, StoredValue::Number(value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_and_write_count() {
        let store = MemoryKeyValueStore::new();
        store.save_string("savingsGoal", "1000").unwrap();
        store.save_f64("currentSavings", 12.0).unwrap();

        assert_eq!(
            store.load_string("savingsGoal").unwrap(),
            Some("1000".to_string())
        );
        assert_eq!(store.load_f64("currentSavings").unwrap(), Some(12.0));
        assert_eq!(store.load_f64("savingsGoal").unwrap(), None);
        assert_eq!(store.write_count(), 2);
    }
}
