//! Application context: the single owner of all console state.
//!
//! Every remote operation is split in two. A `begin_*` call updates local state and
//! returns what must be fetched; the caller performs the request however it likes
//! (inline, or on a spawned task) and hands the result to the matching `complete_*`
//! call. Completions carry the ticket they were issued with, so a superseded response
//! is dropped instead of overwriting newer state.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::controllers::{DeleteOutcome, SearchController, SearchRequest};
use crate::dashboard::{DashboardAggregator, FetchOutcome};
use crate::editing::{EditSession, EditSessions};
use crate::error::{ConsoleError, EditError, Result};
use crate::models::{Record, RecordId, RecordUpdate, StatisticsSnapshot};
use crate::notifications::NotificationCenter;
use crate::store::{RecordStore, Ticket};

/// What happened to a completed list fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Applied,
    /// Superseded by a newer fetch and dropped
    Stale,
    /// The fetch failed; the store keeps what it had
    Failed,
}

#[derive(Debug, Default)]
pub struct AppContext {
    records: RecordStore,
    sessions: EditSessions,
    notifications: NotificationCenter,
    search: SearchController,
    dashboard: DashboardAggregator,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn sessions(&self) -> &EditSessions {
        &self.sessions
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn dashboard(&self) -> &DashboardAggregator {
        &self.dashboard
    }

    // Search

    pub fn begin_search(&mut self, text: &str) -> SearchRequest {
        self.records.mark_loading();
        self.search.begin(text)
    }

    /// Re-issue the active query, e.g. after a mutation or when the section is shown again
    pub fn begin_reload(&mut self) -> SearchRequest {
        self.records.mark_loading();
        self.search.reload()
    }

    pub fn complete_search(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<Record>>,
    ) -> SearchOutcome {
        if !self.search.is_current(ticket) {
            debug!("dropping stale list fetch #{}", ticket.value());
            return SearchOutcome::Stale;
        }

        match result {
            Ok(records) => {
                debug!("list fetch #{} applied ({} records)", ticket.value(), records.len());
                self.records.replace(records);
                SearchOutcome::Applied
            }
            Err(e) => {
                warn!("list fetch #{} failed: {}", ticket.value(), e);
                self.records.mark_failed(e.to_string());
                self.notifications.error(format!("Could not load history: {}", e));
                SearchOutcome::Failed
            }
        }
    }

    // Editing

    /// Open an edit session on a displayed record
    pub fn start_edit(&mut self, id: RecordId) -> std::result::Result<(), EditError> {
        let record = self.records.get(id).ok_or(EditError::UnknownRecord(id))?;
        self.sessions.start(record)
    }

    pub fn session_mut(&mut self, id: RecordId) -> std::result::Result<&mut EditSession, EditError> {
        self.sessions.get_mut(id)
    }

    /// Editing -> Saving. A validation failure is reported to the user and nothing
    /// should be sent.
    pub fn begin_save(&mut self, id: RecordId) -> Result<RecordUpdate> {
        match self.sessions.begin_save(id) {
            Ok(update) => Ok(update),
            Err(ConsoleError::Validation(message)) => {
                self.notifications.error(message.clone());
                Err(ConsoleError::Validation(message))
            }
            Err(e) => Err(e),
        }
    }

    /// Apply the result of an update call.
    ///
    /// On success the session is destroyed and the returned request reloads the active
    /// search. On failure the session goes back to Editing with the drafts intact, a
    /// notification is posted, and the error is handed back.
    pub fn complete_save(&mut self, id: RecordId, result: Result<String>) -> Result<SearchRequest> {
        match result {
            Ok(_) => {
                self.sessions.complete_save(id)?;
                self.notifications.success(format!("Record #{} updated", id));
                Ok(self.begin_reload())
            }
            Err(e) => {
                self.sessions.fail_save(id)?;
                let message = if e.is_not_found() {
                    format!("Record #{} no longer exists", id)
                } else {
                    format!("Could not update record #{}: {}", id, e)
                };
                self.notifications.error(message);
                Err(e)
            }
        }
    }

    /// Editing -> Viewing; the returned session holds the restored originals
    pub fn cancel_edit(&mut self, id: RecordId) -> std::result::Result<EditSession, EditError> {
        self.sessions.cancel(id)
    }

    // Deletion

    /// Apply the result of a delete call. Open edit sessions are left alone: deletion
    /// is authoritative and a later save on the id fails with not-found.
    pub fn complete_delete(
        &mut self,
        id: RecordId,
        result: Result<DeleteOutcome>,
    ) -> Result<Option<SearchRequest>> {
        match result {
            Ok(DeleteOutcome::Deleted(_)) => {
                self.notifications.success(format!("Record #{} deleted", id));
                Ok(Some(self.begin_reload()))
            }
            Ok(DeleteOutcome::Declined) => Ok(None),
            Err(e) => {
                self.notifications.error(format!("Could not delete record #{}: {}", id, e));
                Err(e)
            }
        }
    }

    // Dashboard

    pub fn begin_dashboard(&mut self) -> Ticket {
        self.dashboard.begin_fetch()
    }

    pub fn complete_dashboard(
        &mut self,
        ticket: Ticket,
        result: Result<StatisticsSnapshot>,
    ) -> FetchOutcome {
        let outcome = self.dashboard.complete_fetch(ticket, result);
        if outcome == FetchOutcome::Sample {
            self.notifications.error("Statistics unavailable, showing sample data");
        }
        outcome
    }

    pub fn complete_report(&mut self, result: Result<PathBuf>) -> Result<PathBuf> {
        match result {
            Ok(path) => {
                self.notifications.success(format!("Report saved to {}", path.display()));
                Ok(path)
            }
            Err(e) => {
                warn!("detailed report failed: {}", e);
                self.notifications.error(format!("Could not download report: {}", e));
                Err(e)
            }
        }
    }

    pub fn complete_pdf(&mut self, result: Result<String>) -> Result<String> {
        match result {
            Ok(url) => {
                self.notifications.success(format!("PDF report ready: {}", url));
                Ok(url)
            }
            Err(e) => {
                warn!("PDF report failed: {}", e);
                self.notifications.error(format!("Could not generate PDF report: {}", e));
                Err(e)
            }
        }
    }
}
