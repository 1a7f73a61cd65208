//! Document persistence
//!
//! The editor only needs "get and set the blocks of a document"; where the
//! documents live is up to the store. Every call is scoped to an owner and
//! a document belonging to someone else behaves as if it did not exist.

mod memory;
#[cfg(feature = "serde")]
mod file;

pub use memory::MemoryStore;
#[cfg(feature = "serde")]
pub use file::JsonFileStore;

use std::future::Future;

use crate::model::{Document, DocumentDraft, DocumentPatch, effective_title};
use crate::types::*;

/// Owner-scoped document persistence
pub trait DocumentStore: Send + Sync {
    /// All documents of `owner`, most recently updated first
    fn load(&self, owner: &OwnerId) -> impl Future<Output = Result<Vec<Document>>> + Send;

    /// Persist a new document and assign it an id
    fn save(
        &self,
        owner: &OwnerId,
        draft: DocumentDraft,
    ) -> impl Future<Output = Result<Document>> + Send;

    /// Replace the title and/or blocks of an existing document
    fn update(
        &self,
        owner: &OwnerId,
        id: &DocumentId,
        patch: DocumentPatch,
    ) -> impl Future<Output = Result<Document>> + Send;

    /// Remove a document. Returns false if there was nothing to remove.
    fn delete(&self, owner: &OwnerId, id: &DocumentId)
    -> impl Future<Output = Result<bool>> + Send;

    /// Save several documents at once, keeping their creation times
    fn import(
        &self,
        owner: &OwnerId,
        drafts: Vec<DocumentDraft>,
    ) -> impl Future<Output = Result<Vec<Document>>> + Send;
}

// =============================================================================
// Shared Table
// =============================================================================

/// The documents of every owner, as held by both stores
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub(crate) struct DocumentTable {
    next_id: u64,
    last_stamp: i64,
    documents: Vec<Document>,
}

impl DocumentTable {
    /// Current time in Unix milliseconds, strictly increasing per table
    fn stamp(&mut self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        self.last_stamp = now.max(self.last_stamp + 1);
        self.last_stamp
    }

    fn next_id(&mut self) -> DocumentId {
        self.next_id += 1;
        DocumentId(self.next_id.to_string())
    }

    pub(crate) fn load(&self, owner: &OwnerId) -> Vec<Document> {
        let mut documents: Vec<Document> = self
            .documents
            .iter()
            .filter(|d| &d.owner == owner)
            .cloned()
            .collect();
        documents.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        documents
    }

    pub(crate) fn save(&mut self, owner: &OwnerId, draft: DocumentDraft) -> Document {
        let now = self.stamp();
        let document = Document {
            id: self.next_id(),
            owner: owner.clone(),
            title: draft.effective_title(),
            blocks: draft.blocks,
            created_at: draft.created_at.unwrap_or(now),
            updated_at: now,
        };
        log::debug!("Saved document {} for {:?}", document.id, owner.0);
        self.documents.push(document.clone());
        document
    }

    pub(crate) fn update(
        &mut self,
        owner: &OwnerId,
        id: &DocumentId,
        patch: DocumentPatch,
    ) -> Result<Document> {
        let now = self.stamp();
        let document = self
            .documents
            .iter_mut()
            .find(|d| &d.id == id && &d.owner == owner)
            .ok_or_else(|| LayoutError::DocumentNotFound(id.clone()))?;

        // A blank title keeps the stored one
        if let Some(title) = patch.title.filter(|t| !t.trim().is_empty()) {
            document.title = effective_title(&title);
        }
        if let Some(blocks) = patch.blocks {
            document.blocks = blocks;
        }
        document.updated_at = now;
        Ok(document.clone())
    }

    pub(crate) fn delete(&mut self, owner: &OwnerId, id: &DocumentId) -> bool {
        let before = self.documents.len();
        self.documents
            .retain(|d| !(&d.id == id && &d.owner == owner));
        self.documents.len() != before
    }

    pub(crate) fn import(&mut self, owner: &OwnerId, drafts: Vec<DocumentDraft>) -> Vec<Document> {
        drafts
            .into_iter()
            .map(|draft| self.save(owner, draft))
            .collect()
    }
}
