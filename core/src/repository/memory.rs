use std::sync::Mutex;

use anyhow::{anyhow, Result};

use crate::repository::document::{DocumentBackend, StoreDocument};

/// Keeps the document in memory. Useful for tests and for embedding the
/// organizer behind another store.
#[derive(Default)]
pub struct MemoryRepository {
    doc: Mutex<StoreDocument>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(doc: StoreDocument) -> Self {
        Self { doc: Mutex::new(doc) }
    }
}

impl DocumentBackend for MemoryRepository {
    fn load(&self) -> Result<StoreDocument> {
        let guard = self.doc.lock().map_err(|_| anyhow!("Memory store lock poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&self, doc: &StoreDocument) -> Result<()> {
        let mut guard = self.doc.lock().map_err(|_| anyhow!("Memory store lock poisoned"))?;
        *guard = doc.clone();
        Ok(())
    }
}
