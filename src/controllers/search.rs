use tracing::debug;

use crate::store::{RequestSequencer, Ticket};

/// A list fetch to run: `query` is `None` for the unfiltered list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub ticket: Ticket,
    pub query: Option<String>,
}

/// Turns query text into sequenced list fetches.
///
/// Reloads after a mutation go through the same sequencer as searches, since both
/// replace the whole record store.
#[derive(Debug, Default)]
pub struct SearchController {
    sequencer: RequestSequencer,
    active_query: Option<String>,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fetch for `text`. Blank text means the unfiltered list.
    pub fn begin(&mut self, text: &str) -> SearchRequest {
        let trimmed = text.trim();
        self.active_query = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self.issue()
    }

    /// Re-issue the active query in full
    pub fn reload(&mut self) -> SearchRequest {
        self.issue()
    }

    fn issue(&mut self) -> SearchRequest {
        let ticket = self.sequencer.issue();
        debug!("list fetch #{} issued (query: {:?})", ticket.value(), self.active_query);
        SearchRequest { ticket, query: self.active_query.clone() }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.sequencer.is_current(ticket)
    }

    pub fn active_query(&self) -> Option<&str> {
        self.active_query.as_deref()
    }
}
