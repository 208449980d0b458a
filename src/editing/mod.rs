//! Per-record inline editing.
//!
//! ```text
//! Viewing --start--> Editing --save--> Saving --success--> Viewing
//!                       ^                 |
//!                       +----failure------+
//! Editing --cancel--> Viewing
//! ```
//!
//! Any number of records may be in Editing at once. A session is removed when a save
//! succeeds or the edit is cancelled; transitions on a removed session report
//! [`EditError::NoSession`].

pub mod session;

use std::collections::BTreeMap;

pub use session::{EditField, EditSession, EditState};

use crate::error::{ConsoleError, EditError};
use crate::models::{Record, RecordId, RecordUpdate};

/// All open edit sessions, keyed by record id
#[derive(Debug, Default)]
pub struct EditSessions {
    sessions: BTreeMap<RecordId, EditSession>,
}

impl EditSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, record: &Record) -> Result<(), EditError> {
        if self.sessions.contains_key(&record.id) {
            return Err(EditError::AlreadyEditing(record.id));
        }
        self.sessions.insert(record.id, EditSession::start(record));
        Ok(())
    }

    pub fn get(&self, id: RecordId) -> Option<&EditSession> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: RecordId) -> Result<&mut EditSession, EditError> {
        self.sessions.get_mut(&id).ok_or(EditError::NoSession(id))
    }

    pub fn state(&self, id: RecordId) -> Option<EditState> {
        self.sessions.get(&id).map(EditSession::state)
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.sessions.keys().copied()
    }

    /// Ids of open sessions whose record is not among `displayed`, ascending.
    ///
    /// A reload can drop an edited record (deleted, removed elsewhere, or outside a
    /// narrower search). Its session stays open so the drafts can still be saved or
    /// cancelled.
    pub fn detached_ids(&self, displayed: &[Record]) -> Vec<RecordId> {
        self.ids().filter(|id| !displayed.iter().any(|r| r.id == *id)).collect()
    }

    /// Editing -> Saving, returning the body to send
    pub fn begin_save(&mut self, id: RecordId) -> Result<RecordUpdate, ConsoleError> {
        self.get_mut(id)?.begin_save()
    }

    /// Saving -> Viewing; the session is destroyed
    pub fn complete_save(&mut self, id: RecordId) -> Result<(), EditError> {
        match self.sessions.get(&id).map(EditSession::state) {
            Some(EditState::Saving) => {
                self.sessions.remove(&id);
                Ok(())
            }
            Some(EditState::Editing) => Err(EditError::Busy(id)),
            None => Err(EditError::NoSession(id)),
        }
    }

    /// Saving -> Editing with the user's drafts intact
    pub fn fail_save(&mut self, id: RecordId) -> Result<(), EditError> {
        let session = self.get_mut(id)?;
        session.revert_to_editing();
        Ok(())
    }

    /// Editing -> Viewing. Returns the terminated session, whose originals are the
    /// text to restore.
    pub fn cancel(&mut self, id: RecordId) -> Result<EditSession, EditError> {
        match self.sessions.get(&id).map(EditSession::state) {
            Some(EditState::Editing) => self.sessions.remove(&id).ok_or(EditError::NoSession(id)),
            Some(EditState::Saving) => Err(EditError::Busy(id)),
            None => Err(EditError::NoSession(id)),
        }
    }
}
