use heapless::{String, Vec};

use super::{KeyValueStore, PersistenceError};
use crate::config::STORED_VALUE_CAPACITY;

/// Longest key accepted, matching the flash preferences limit
const KEY_CAPACITY: usize = 15;
const NAMESPACE_CAPACITY: usize = 15;
const MAX_ENTRIES: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
enum StoredValue {
    Bool(bool),
    U32(u32),
    I32(i32),
    Str(String<STORED_VALUE_CAPACITY>),
}

/// In-memory [`KeyValueStore`] for host builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    namespace: String<NAMESPACE_CAPACITY>,
    entries: Vec<(String<KEY_CAPACITY>, StoredValue), MAX_ENTRIES>,
    fail_writes: bool,
}

impl MemoryStore {
    pub const fn new() -> Self {
        Self {
            namespace: String::new(),
            entries: Vec::new(),
            fail_writes: false,
        }
    }

    /// Make every following write fail with [`PersistenceError::DriverError`]
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Namespace selected by the last [`KeyValueStore::open`]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Check whether `key` holds any value
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn get(&self, key: &str) -> Option<&StoredValue> {
        self.entries
            .iter()
            .find(|(stored_key, _)| stored_key.as_str() == key)
            .map(|(_, value)| value)
    }

    fn put(&mut self, key: &str, value: StoredValue) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(PersistenceError::DriverError);
        }
        if let Some((_, slot)) = self
            .entries
            .iter_mut()
            .find(|(stored_key, _)| stored_key.as_str() == key)
        {
            *slot = value;
            return Ok(());
        }

        let key = String::try_from(key).map_err(|()| PersistenceError::Full)?;
        self.entries
            .push((key, value))
            .map_err(|_| PersistenceError::Full)
    }
}

impl KeyValueStore for MemoryStore {
    fn open(&mut self, namespace: &str) -> Result<(), PersistenceError> {
        self.namespace = String::try_from(namespace).map_err(|()| PersistenceError::Full)?;
        Ok(())
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(StoredValue::Bool(value)) => *value,
            _ => default,
        }
    }

    fn get_u32(&self, key: &str, default: u32) -> u32 {
        match self.get(key) {
            Some(StoredValue::U32(value)) => *value,
            _ => default,
        }
    }

    fn get_i32(&self, key: &str, default: i32) -> i32 {
        match self.get(key) {
            Some(StoredValue::I32(value)) => *value,
            _ => default,
        }
    }

    fn get_str<const N: usize>(&self, key: &str, default: &str) -> String<N> {
        match self.get(key) {
            Some(StoredValue::Str(value)) => String::try_from(value.as_str())
                .or_else(|()| String::try_from(default))
                .unwrap_or_default(),
            _ => String::try_from(default).unwrap_or_default(),
        }
    }

    fn put_bool(&mut self, key: &str, value: bool) -> Result<(), PersistenceError> {
        self.put(key, StoredValue::Bool(value))
    }

    fn put_u32(&mut self, key: &str, value: u32) -> Result<(), PersistenceError> {
        self.put(key, StoredValue::U32(value))
    }

    fn put_i32(&mut self, key: &str, value: i32) -> Result<(), PersistenceError> {
        self.put(key, StoredValue::I32(value))
    }

    fn put_str(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let value = String::try_from(value).map_err(|()| PersistenceError::Full)?;
        self.put(key, StoredValue::Str(value))
    }
}
