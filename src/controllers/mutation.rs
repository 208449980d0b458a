use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::api::HistoryApi;
use crate::error::Result;
use crate::models::{RecordId, RecordUpdate};

/// Asks the user to approve a destructive action
#[async_trait]
pub trait Confirmer: Send + Sync {
    /// Resolves once the user has answered; `true` means go ahead
    async fn confirm(&self, prompt: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Server acknowledgement message
    Deleted(String),
    /// The user declined; nothing was sent
    Declined,
}

/// Performs update and delete against the remote store.
///
/// Nothing here touches local state. Callers reconcile by reloading the active search
/// once a call resolves successfully.
#[derive(Clone)]
pub struct MutationGateway {
    api: Arc<dyn HistoryApi>,
    confirmer: Arc<dyn Confirmer>,
}

impl MutationGateway {
    pub fn new(api: Arc<dyn HistoryApi>, confirmer: Arc<dyn Confirmer>) -> Self {
        Self { api, confirmer }
    }

    pub async fn update(&self, id: RecordId, update: &RecordUpdate) -> Result<String> {
        match self.api.update_record(id, update).await {
            Ok(message) => {
                info!("record {} updated: {}", id, message);
                Ok(message)
            }
            Err(e) => {
                warn!("update of record {} failed: {}", id, e);
                Err(e)
            }
        }
    }

    /// Delete after an explicit confirmation. No retry on failure.
    pub async fn delete(&self, id: RecordId) -> Result<DeleteOutcome> {
        let prompt = format!("Delete record #{}? This cannot be undone.", id);
        if !self.confirmer.confirm(&prompt).await {
            info!("deletion of record {} declined", id);
            return Ok(DeleteOutcome::Declined);
        }

        match self.api.delete_record(id).await {
            Ok(message) => {
                info!("record {} deleted: {}", id, message);
                Ok(DeleteOutcome::Deleted(message))
            }
            Err(e) => {
                warn!("delete of record {} failed: {}", id, e);
                Err(e)
            }
        }
    }
}
