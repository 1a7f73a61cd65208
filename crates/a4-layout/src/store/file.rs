use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use super::{DocumentStore, DocumentTable};
use crate::model::{Document, DocumentDraft, DocumentPatch};
use crate::types::*;

/// Documents kept in a single JSON file.
///
/// The file is read before and written after every call, so several
/// stores may point at the same path one after another. A missing file is
/// an empty store.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<DocumentTable> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(DocumentTable::default()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write(&self, table: &DocumentTable) -> Result<()> {
        let json = serde_json::to_vec_pretty(table)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Run `op` against the table and write the result back
    async fn modify<T>(&self, op: impl FnOnce(&mut DocumentTable) -> Result<T>) -> Result<T> {
        let _guard = self.lock.lock().await;
        let mut table = self.read().await?;
        let out = op(&mut table)?;
        self.write(&table).await?;
        Ok(out)
    }
}

impl DocumentStore for JsonFileStore {
    async fn load(&self, owner: &OwnerId) -> Result<Vec<Document>> {
        let _guard = self.lock.lock().await;
        Ok(self.read().await?.load(owner))
    }

    async fn save(&self, owner: &OwnerId, draft: DocumentDraft) -> Result<Document> {
        self.modify(|table| Ok(table.save(owner, draft))).await
    }

    async fn update(
        &self,
        owner: &OwnerId,
        id: &DocumentId,
        patch: DocumentPatch,
    ) -> Result<Document> {
        self.modify(|table| table.update(owner, id, patch)).await
    }

    async fn delete(&self, owner: &OwnerId, id: &DocumentId) -> Result<bool> {
        self.modify(|table| Ok(table.delete(owner, id))).await
    }

    async fn import(&self, owner: &OwnerId, drafts: Vec<DocumentDraft>) -> Result<Vec<Document>> {
        self.modify(|table| Ok(table.import(owner, drafts))).await
    }
}
