use std::cell::RefCell;
use std::collections::HashMap;

use liftlog_domain::StorageError;

use crate::{Backend, Key};

/// Non-persistent backend for tests and ephemeral use.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    entries: RefCell<HashMap<String, String>>,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for InMemoryBackend {
    fn get(&self, key: Key) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key.as_ref()).cloned())
    }

    fn set(&self, key: Key, value: String) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.as_ref().to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_get_returns_what_was_set() {
        let backend = InMemoryBackend::new();
        assert_eq!(backend.get(Key::Routines).unwrap(), None);
        backend.set(Key::Routines, "[]".to_string()).unwrap();
        assert_eq!(backend.get(Key::Routines).unwrap(), Some("[]".to_string()));
        assert_eq!(backend.get(Key::WorkoutSessions).unwrap(), None);
    }
}
