use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Mutex;

use crate::logic::ensure_integrity;
use crate::model::{Id, PageDataArchitectureDocument, FILE_EXTENSION};
use crate::store::traits::{DocumentStore, UpdateOutcome};

/// Stores each document as `<id>.pharch` inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    /// Held by every writer so read-modify-write sequences do not interleave
    write_lock: Arc<Mutex<()>>,
}

impl FileStore {
    /// Open the directory, creating it if needed
    pub async fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root)
            .await
            .with_context(|| format!("failed to create data directory {}", root.display()))?;
        log::info!("file store opened at {}", root.display());
        Ok(Self {
            root,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn path_for(&self, id: &Id) -> Result<PathBuf> {
        if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
            anyhow::bail!("invalid document id '{}'", id);
        }
        Ok(self.root.join(format!("{}{}", id, FILE_EXTENSION)))
    }

    async fn read_document(path: &Path) -> Result<PageDataArchitectureDocument> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let document = PageDataArchitectureDocument::from_bytes(&bytes)
            .with_context(|| format!("failed to decode {}", path.display()))?;
        ensure_integrity(&document.state)
            .with_context(|| format!("document {} failed integrity check", path.display()))?;
        Ok(document)
    }

    async fn write_document(&self, document: &PageDataArchitectureDocument) -> Result<()> {
        ensure_integrity(&document.state)?;
        let path = self.path_for(document.id())?;
        let bytes = document.to_bytes()?;

        // write-then-rename: readers only ever see a complete file
        let tmp_path = path.with_extension("pharch.tmp");
        tokio::fs::write(&tmp_path, bytes)
            .await
            .with_context(|| format!("failed to write {}", tmp_path.display()))?;
        tokio::fs::rename(&tmp_path, &path).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl DocumentStore for FileStore {
    async fn get_document(&self, id: &Id) -> Result<Option<PageDataArchitectureDocument>> {
        let path = self.path_for(id)?;
        if !tokio::fs::try_exists(&path).await? {
            return Ok(None);
        }
        Self::read_document(&path).await.map(Some)
    }

    async fn list_documents(&self) -> Result<Vec<PageDataArchitectureDocument>> {
        let mut documents = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_document = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.ends_with(FILE_EXTENSION))
                .unwrap_or(false);
            if !is_document {
                continue;
            }

            match Self::read_document(&path).await {
                Ok(document) => documents.push(document),
                Err(e) => log::warn!("skipping unreadable document {}: {:#}", path.display(), e),
            }
        }
        documents.sort_by(|a, b| a.header.created_at_utc_iso.cmp(&b.header.created_at_utc_iso));
        Ok(documents)
    }

    async fn insert_document(&self, document: PageDataArchitectureDocument) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        if tokio::fs::try_exists(self.path_for(document.id())?).await? {
            return Ok(false);
        }
        self.write_document(&document).await?;
        Ok(true)
    }

    async fn upsert_document(&self, document: PageDataArchitectureDocument) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write_document(&document).await
    }

    async fn update_document<T, E, F>(&self, id: &Id, update: F) -> Result<UpdateOutcome<T, E>>
    where
        T: Send + 'static,
        E: Send + 'static,
        F: FnOnce(&mut PageDataArchitectureDocument) -> Result<T, E> + Send + 'static,
    {
        let _guard = self.write_lock.lock().await;
        let path = self.path_for(id)?;
        if !tokio::fs::try_exists(&path).await? {
            return Ok(UpdateOutcome::NotFound);
        }

        let mut document = Self::read_document(&path).await?;
        match update(&mut document) {
            Ok(value) => {
                self.write_document(&document).await?;
                Ok(UpdateOutcome::Applied(value))
            }
            Err(e) => Ok(UpdateOutcome::Rejected(e)),
        }
    }

    async fn delete_document(&self, id: &Id) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let path = self.path_for(id)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Action, AddEndpointInput};

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pharch-{}-{}", name, uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = temp_dir("round-trip");
        let store = FileStore::open(&dir).await.unwrap();

        let mut document = PageDataArchitectureDocument::new("Site");
        document
            .dispatch(Action::add_endpoint(AddEndpointInput {
                id: "e1".to_string(),
                title: "Home".to_string(),
                url_path: "/home".to_string(),
                description: Some("landing page".to_string()),
                comments: None,
            }))
            .unwrap();
        let id = document.id().clone();

        store.upsert_document(document.clone()).await.unwrap();
        assert_eq!(store.get_document(&id).await.unwrap(), Some(document));
        assert_eq!(store.list_documents().await.unwrap().len(), 1);

        assert!(store.delete_document(&id).await.unwrap());
        assert_eq!(store.get_document(&id).await.unwrap(), None);
        assert!(!store.delete_document(&id).await.unwrap());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_rejects_path_ids() {
        let dir = temp_dir("path-ids");
        let store = FileStore::open(&dir).await.unwrap();

        assert!(store.get_document(&"../escape".to_string()).await.is_err());
        assert!(store.delete_document(&String::new()).await.is_err());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_insert_and_update() {
        let dir = temp_dir("update");
        let store = FileStore::open(&dir).await.unwrap();

        let document = PageDataArchitectureDocument::new("Site");
        let id = document.id().clone();
        assert!(store.insert_document(document.clone()).await.unwrap());
        assert!(!store.insert_document(document).await.unwrap());

        let add_home = || {
            Action::add_endpoint(AddEndpointInput {
                id: "e1".to_string(),
                title: "Home".to_string(),
                url_path: "/home".to_string(),
                description: None,
                comments: None,
            })
        };

        let outcome = store
            .update_document(&id, move |document| document.dispatch(add_home()).map(|_| ()))
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Applied(()));

        let outcome = store
            .update_document(&id, move |document| document.dispatch(add_home()).map(|_| ()))
            .await
            .unwrap();
        assert!(matches!(outcome, UpdateOutcome::Rejected(_)));

        let stored = store.get_document(&id).await.unwrap().unwrap();
        assert_eq!(stored.header.revision, 1);

        let outcome = store
            .update_document(&"missing".to_string(), move |document| {
                document.dispatch(add_home()).map(|_| ())
            })
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::NotFound);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
