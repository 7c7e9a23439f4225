use std::collections::hash_map::Entry;
use std::collections::HashMap;

use anyhow::Result;
use parking_lot::RwLock;

use crate::logic::ensure_integrity;
use crate::model::{Id, PageDataArchitectureDocument};
use crate::store::traits::{DocumentStore, UpdateOutcome};

/// Keeps documents in process memory; contents are lost on restart
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<Id, PageDataArchitectureDocument>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn get_document(&self, id: &Id) -> Result<Option<PageDataArchitectureDocument>> {
        Ok(self.documents.read().get(id).cloned())
    }

    async fn list_documents(&self) -> Result<Vec<PageDataArchitectureDocument>> {
        let mut documents: Vec<_> = self.documents.read().values().cloned().collect();
        documents.sort_by(|a, b| a.header.created_at_utc_iso.cmp(&b.header.created_at_utc_iso));
        Ok(documents)
    }

    async fn insert_document(&self, document: PageDataArchitectureDocument) -> Result<bool> {
        ensure_integrity(&document.state)?;
        match self.documents.write().entry(document.header.id.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(document);
                Ok(true)
            }
        }
    }

    async fn upsert_document(&self, document: PageDataArchitectureDocument) -> Result<()> {
        ensure_integrity(&document.state)?;
        self.documents
            .write()
            .insert(document.header.id.clone(), document);
        Ok(())
    }

    async fn update_document<T, E, F>(&self, id: &Id, update: F) -> Result<UpdateOutcome<T, E>>
    where
        T: Send + 'static,
        E: Send + 'static,
        F: FnOnce(&mut PageDataArchitectureDocument) -> Result<T, E> + Send + 'static,
    {
        let mut documents = self.documents.write();
        let Some(stored) = documents.get_mut(id) else {
            return Ok(UpdateOutcome::NotFound);
        };

        let mut document = stored.clone();
        let value = match update(&mut document) {
            Ok(value) => value,
            Err(e) => return Ok(UpdateOutcome::Rejected(e)),
        };
        ensure_integrity(&document.state)?;
        *stored = document;
        Ok(UpdateOutcome::Applied(value))
    }

    async fn delete_document(&self, id: &Id) -> Result<bool> {
        Ok(self.documents.write().remove(id).is_some())
    }
}
