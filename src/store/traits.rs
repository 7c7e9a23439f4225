use crate::model::{Id, PageDataArchitectureDocument};
use anyhow::Result;

/// Result of an atomic read-modify-write on one stored document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome<T, E> {
    /// No document with that id
    NotFound,
    /// The update closure failed; nothing was written
    Rejected(E),
    /// The updated document was written
    Applied(T),
}

#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_document(&self, id: &Id) -> Result<Option<PageDataArchitectureDocument>>;
    async fn list_documents(&self) -> Result<Vec<PageDataArchitectureDocument>>;

    /// Store a new document. Returns `false` and writes nothing if the id is taken.
    async fn insert_document(&self, document: PageDataArchitectureDocument) -> Result<bool>;

    async fn upsert_document(&self, document: PageDataArchitectureDocument) -> Result<()>;

    /// Load, modify and save one document with no other write to it in between.
    ///
    /// `update` runs on a copy; the copy replaces the stored document only when
    /// `update` succeeds.
    async fn update_document<T, E, F>(&self, id: &Id, update: F) -> Result<UpdateOutcome<T, E>>
    where
        T: Send + 'static,
        E: Send + 'static,
        F: FnOnce(&mut PageDataArchitectureDocument) -> Result<T, E> + Send + 'static;

    async fn delete_document(&self, id: &Id) -> Result<bool>;
}

// Main store trait
pub trait Store: DocumentStore {}
impl<T: DocumentStore> Store for T {}
