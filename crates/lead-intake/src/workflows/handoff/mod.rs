//! Continuation token carrying a finished funnel's lead to the property-detail form.
//!
//! Stage one writes the draft once; stage two reads it, and removes it when it submits.

pub mod store;

use std::sync::Arc;

use tracing::debug;

use crate::workflows::funnel::LeadRecord;

pub use store::{DraftStore, FileDraftStore, MemoryDraftStore};

/// Fixed entry name shared by both stages.
pub const DRAFT_KEY: &str = "leadData";

#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    #[error("draft store io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored draft is not a lead record: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("invalid draft key '{0}'")]
    InvalidKey(String),
    #[error("draft store lock poisoned")]
    Poisoned,
}

#[derive(Clone)]
pub struct DraftHandoff {
    store: Arc<dyn DraftStore>,
}

impl std::fmt::Debug for DraftHandoff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftHandoff").finish_non_exhaustive()
    }
}

impl DraftHandoff {
    pub fn new(store: Arc<dyn DraftStore>) -> Self {
        Self { store }
    }

    pub fn save_draft(&self, record: &LeadRecord) -> Result<(), HandoffError> {
        let serialized = serde_json::to_string(record)?;
        self.store.set(DRAFT_KEY, serialized)?;
        debug!(key = DRAFT_KEY, "lead draft saved for continuation");
        Ok(())
    }

    /// Read the draft without giving it up.
    pub fn peek_draft(&self) -> Result<Option<LeadRecord>, HandoffError> {
        match self.store.get(DRAFT_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Read and delete the draft. The entry is removed even when it no longer parses.
    pub fn take_draft(&self) -> Result<Option<LeadRecord>, HandoffError> {
        let raw = self.store.get(DRAFT_KEY)?;
        self.store.remove(DRAFT_KEY)?;
        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }
}
