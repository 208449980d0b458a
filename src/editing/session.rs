use crate::error::{ConsoleError, EditError};
use crate::models::{Record, RecordId, RecordUpdate};

/// Longest draft accepted from keyboard input, in characters
const MAX_DRAFT_CHARS: usize = 4000;

/// Non-viewing states of a record. Viewing is the absence of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Editing,
    Saving,
}

/// Which of the two editable fields keyboard input goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Utterance,
    Response,
}

/// Inline edit of a single record.
///
/// Holds the values captured when editing began (restored on cancel) and the
/// user's drafts (kept across a failed save).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    record_id: RecordId,
    original_utterance: String,
    original_response: String,
    draft_utterance: String,
    draft_response: String,
    state: EditState,
    focus: EditField,
}

impl EditSession {
    /// Enter Editing, snapshotting the record's current text
    pub fn start(record: &Record) -> Self {
        Self {
            record_id: record.id,
            original_utterance: record.user_utterance.clone(),
            original_response: record.assistant_response.clone(),
            draft_utterance: record.user_utterance.clone(),
            draft_response: record.assistant_response.clone(),
            state: EditState::Editing,
            focus: EditField::Utterance,
        }
    }

    pub fn record_id(&self) -> RecordId {
        self.record_id
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn focus(&self) -> EditField {
        self.focus
    }

    pub fn originals(&self) -> (&str, &str) {
        (&self.original_utterance, &self.original_response)
    }

    pub fn draft(&self, field: EditField) -> &str {
        match field {
            EditField::Utterance => &self.draft_utterance,
            EditField::Response => &self.draft_response,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            EditField::Utterance => EditField::Response,
            EditField::Response => EditField::Utterance,
        };
    }

    fn draft_mut(&mut self, field: EditField) -> Result<&mut String, EditError> {
        if self.state == EditState::Saving {
            return Err(EditError::Busy(self.record_id));
        }
        Ok(match field {
            EditField::Utterance => &mut self.draft_utterance,
            EditField::Response => &mut self.draft_response,
        })
    }

    pub fn set_draft(&mut self, field: EditField, text: impl Into<String>) -> Result<(), EditError> {
        *self.draft_mut(field)? = text.into();
        Ok(())
    }

    /// Append a typed character to the focused draft
    pub fn push_char(&mut self, c: char) -> Result<(), EditError> {
        let field = self.focus;
        let draft = self.draft_mut(field)?;
        if draft.chars().count() < MAX_DRAFT_CHARS {
            draft.push(c);
        }
        Ok(())
    }

    /// Remove the last character of the focused draft
    pub fn pop_char(&mut self) -> Result<(), EditError> {
        let field = self.focus;
        self.draft_mut(field)?.pop();
        Ok(())
    }

    /// Editing -> Saving. Both trimmed drafts must be non-empty; on rejection the
    /// session stays in Editing.
    pub(crate) fn begin_save(&mut self) -> Result<RecordUpdate, ConsoleError> {
        if self.state == EditState::Saving {
            return Err(EditError::Busy(self.record_id).into());
        }
        let utterance = self.draft_utterance.trim();
        let response = self.draft_response.trim();
        if utterance.is_empty() || response.is_empty() {
            return Err(ConsoleError::Validation("Both fields are required".to_string()));
        }
        let update = RecordUpdate {
            user_utterance: utterance.to_string(),
            assistant_response: response.to_string(),
        };
        self.state = EditState::Saving;
        Ok(update)
    }

    /// Saving -> Editing, keeping whatever the user typed
    pub(crate) fn revert_to_editing(&mut self) {
        self.state = EditState::Editing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record {
            id: 7,
            user_utterance: "qué hora es".to_string(),
            assistant_response: "Son las 10".to_string(),
            timestamp_label: "x".to_string(),
            command_type: Some("hora".to_string()),
        }
    }

    #[test]
    fn test_start_snapshots_originals() {
        let session = EditSession::start(&record());
        assert_eq!(session.state(), EditState::Editing);
        assert_eq!(session.originals(), ("qué hora es", "Son las 10"));
        assert_eq!(session.draft(EditField::Utterance), "qué hora es");
        assert_eq!(session.focus(), EditField::Utterance);
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let mut session = EditSession::start(&record());
        session.push_char('?').unwrap();
        session.toggle_focus();
        session.pop_char().unwrap();

        assert_eq!(session.draft(EditField::Utterance), "qué hora es?");
        assert_eq!(session.draft(EditField::Response), "Son las 1");
        assert_eq!(session.originals(), ("qué hora es", "Son las 10"));
    }

    #[test]
    fn test_begin_save_trims_and_moves_to_saving() {
        let mut session = EditSession::start(&record());
        session.set_draft(EditField::Utterance, "  hola  ").unwrap();

        let update = session.begin_save().unwrap();
        assert_eq!(update.user_utterance, "hola");
        assert_eq!(session.state(), EditState::Saving);
    }

    #[test]
    fn test_blank_field_is_rejected_and_stays_editing() {
        let mut session = EditSession::start(&record());
        session.set_draft(EditField::Response, "   ").unwrap();

        let err = session.begin_save().unwrap_err();
        assert!(matches!(err, ConsoleError::Validation(_)));
        assert_eq!(session.state(), EditState::Editing);
    }

    #[test]
    fn test_drafts_locked_while_saving() {
        let mut session = EditSession::start(&record());
        session.begin_save().unwrap();

        assert_eq!(session.push_char('x'), Err(EditError::Busy(7)));
        assert!(matches!(
            session.begin_save().unwrap_err(),
            ConsoleError::Edit(EditError::Busy(7))
        ));
    }

    #[test]
    fn test_revert_keeps_unsent_drafts() {
        let mut session = EditSession::start(&record());
        session.set_draft(EditField::Utterance, "nuevo texto").unwrap();
        session.begin_save().unwrap();
        session.revert_to_editing();

        assert_eq!(session.state(), EditState::Editing);
        assert_eq!(session.draft(EditField::Utterance), "nuevo texto");
    }
}
