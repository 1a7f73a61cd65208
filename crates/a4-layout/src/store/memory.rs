use tokio::sync::Mutex;

use super::{DocumentStore, DocumentTable};
use crate::model::{Document, DocumentDraft, DocumentPatch};
use crate::types::*;

/// Documents kept in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: Mutex<DocumentTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    async fn load(&self, owner: &OwnerId) -> Result<Vec<Document>> {
        Ok(self.table.lock().await.load(owner))
    }

    async fn save(&self, owner: &OwnerId, draft: DocumentDraft) -> Result<Document> {
        Ok(self.table.lock().await.save(owner, draft))
    }

    async fn update(
        &self,
        owner: &OwnerId,
        id: &DocumentId,
        patch: DocumentPatch,
    ) -> Result<Document> {
        self.table.lock().await.update(owner, id, patch)
    }

    async fn delete(&self, owner: &OwnerId, id: &DocumentId) -> Result<bool> {
        Ok(self.table.lock().await.delete(owner, id))
    }

    async fn import(&self, owner: &OwnerId, drafts: Vec<DocumentDraft>) -> Result<Vec<Document>> {
        Ok(self.table.lock().await.import(owner, drafts))
    }
}
