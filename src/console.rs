//! Sequential driver over [`AppContext`].
//!
//! Runs each operation to completion before returning. Used by the CLI subcommands and
//! by tests; the TUI drives the same `begin_*`/`complete_*` pairs from spawned tasks.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;

use crate::api::HistoryApi;
use crate::context::{AppContext, SearchOutcome};
use crate::controllers::{Confirmer, DeleteOutcome, MutationGateway, SearchRequest};
use crate::dashboard::{FetchOutcome, save_report};
use crate::editing::EditSession;
use crate::error::{EditError, Result};
use crate::models::RecordId;

pub struct Console {
    context: AppContext,
    api: Arc<dyn HistoryApi>,
    gateway: MutationGateway,
}

impl Console {
    pub fn new(api: Arc<dyn HistoryApi>, confirmer: Arc<dyn Confirmer>) -> Self {
        let gateway = MutationGateway::new(Arc::clone(&api), confirmer);
        Self { context: AppContext::new(), api, gateway }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut AppContext {
        &mut self.context
    }

    pub async fn search(&mut self, text: &str) -> SearchOutcome {
        let request = self.context.begin_search(text);
        self.run_search(request).await
    }

    pub async fn reload(&mut self) -> SearchOutcome {
        let request = self.context.begin_reload();
        self.run_search(request).await
    }

    async fn run_search(&mut self, request: SearchRequest) -> SearchOutcome {
        let result = self.api.list_records(request.query.as_deref()).await;
        self.context.complete_search(request.ticket, result)
    }

    pub fn start_edit(&mut self, id: RecordId) -> std::result::Result<(), EditError> {
        self.context.start_edit(id)
    }

    /// Validate, send the update and reload the active search on success
    pub async fn save(&mut self, id: RecordId) -> Result<()> {
        let update = self.context.begin_save(id)?;
        let result = self.gateway.update(id, &update).await;
        let reload = self.context.complete_save(id, result)?;
        self.run_search(reload).await;
        Ok(())
    }

    pub fn cancel_edit(&mut self, id: RecordId) -> std::result::Result<EditSession, EditError> {
        self.context.cancel_edit(id)
    }

    /// Confirm, delete and reload the active search on success
    pub async fn delete(&mut self, id: RecordId) -> Result<DeleteOutcome> {
        let result = self.gateway.delete(id).await;
        let outcome = result.as_ref().ok().cloned();
        if let Some(reload) = self.context.complete_delete(id, result)? {
            self.run_search(reload).await;
        }
        Ok(outcome.unwrap_or(DeleteOutcome::Declined))
    }

    pub async fn refresh_dashboard(&mut self) -> FetchOutcome {
        let ticket = self.context.begin_dashboard();
        let result = self.api.fetch_statistics().await;
        self.context.complete_dashboard(ticket, result)
    }

    /// Download the detailed report into `dir` under today's date-stamped name
    pub async fn download_report(&mut self, dir: &Path) -> Result<PathBuf> {
        let result = match self.api.fetch_detailed_report().await {
            Ok(report) => save_report(dir, &report, Local::now().date_naive()),
            Err(e) => Err(e),
        };
        self.context.complete_report(result)
    }

    /// Trigger the PDF job and return the absolute URL of the generated file
    pub async fn generate_pdf(&mut self) -> Result<String> {
        let result = self.api.request_pdf_report().await;
        self.context.complete_pdf(result)
    }
}
