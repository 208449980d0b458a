use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::oneshot;

use crate::controllers::DeleteOutcome;
use crate::error::Result;
use crate::models::{Record, RecordId, StatisticsSnapshot};
use crate::store::Ticket;

/// Completion of background work, sent from spawned tasks back to the UI loop
#[derive(Debug)]
pub enum AppEvent {
    SearchLoaded { ticket: Ticket, result: Result<Vec<Record>> },
    SaveFinished { id: RecordId, result: Result<String> },
    DeleteFinished { id: RecordId, result: Result<DeleteOutcome> },
    StatsLoaded { ticket: Ticket, result: Result<StatisticsSnapshot> },
    ReportSaved(Result<PathBuf>),
    PdfReady(Result<String>),
    /// A task is waiting for the user to answer a yes/no prompt
    ConfirmRequested { prompt: String, reply: oneshot::Sender<bool> },
}

/// Which key map applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// History list, keys edit the search query
    Browse,
    /// The selected record has an open edit session
    Edit,
    /// A yes/no prompt is showing
    Confirm,
    Dashboard,
}

/// User actions from keyboard events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    SwitchSection,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    // History
    Search,
    QueryChar(char),
    QueryBackspace,
    ClearQuery,
    StartEdit,
    Delete,
    CopyUtterance,
    GeneratePdf,
    // Editing
    EditChar(char),
    EditBackspace,
    ToggleField,
    Save,
    CancelEdit,
    // Confirmation prompt
    ConfirmYes,
    ConfirmNo,
    // Dashboard
    Refresh,
    DownloadReport,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration, mode: InputMode) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
    {
        return Ok(key_to_action(key, mode));
    }
    Ok(Action::None)
}

fn is_text(modifiers: KeyModifiers) -> bool {
    modifiers == KeyModifiers::NONE || modifiers == KeyModifiers::SHIFT
}

pub fn key_to_action(key: KeyEvent, mode: InputMode) -> Action {
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return Action::Quit;
    }

    match mode {
        InputMode::Confirm => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Action::ConfirmYes,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::ConfirmNo,
            _ => Action::None,
        },
        InputMode::Dashboard => match (key.code, key.modifiers) {
            (KeyCode::Tab, _) => Action::SwitchSection,
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => Action::Refresh,
            (KeyCode::Char('o'), KeyModifiers::CONTROL) => Action::DownloadReport,
            _ => Action::None,
        },
        InputMode::Edit => match (key.code, key.modifiers) {
            (KeyCode::Up, _) => Action::MoveUp,
            (KeyCode::Down, _) => Action::MoveDown,
            (KeyCode::Tab, _) => Action::ToggleField,
            (KeyCode::Esc, _) => Action::CancelEdit,
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => Action::Save,
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::Delete,
            (KeyCode::Enter, _) => Action::EditChar('\n'),
            (KeyCode::Backspace, _) => Action::EditBackspace,
            (KeyCode::Char(c), m) if is_text(m) => Action::EditChar(c),
            _ => Action::None,
        },
        InputMode::Browse => match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => Action::ClearQuery,
            (KeyCode::Tab, _) => Action::SwitchSection,

            (KeyCode::Up, _) => Action::MoveUp,
            (KeyCode::Down, _) => Action::MoveDown,
            (KeyCode::PageUp, _) => Action::PageUp,
            (KeyCode::PageDown, _) => Action::PageDown,

            (KeyCode::Enter, _) => Action::Search,
            (KeyCode::Char('e'), KeyModifiers::CONTROL) => Action::StartEdit,
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::Delete,
            (KeyCode::Char('y'), KeyModifiers::CONTROL) => Action::CopyUtterance,
            (KeyCode::Char('p'), KeyModifiers::CONTROL) => Action::GeneratePdf,

            (KeyCode::Char(c), m) if is_text(m) => Action::QueryChar(c),
            (KeyCode::Backspace, _) => Action::QueryBackspace,

            _ => Action::None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_quit_in_every_mode() {
        for mode in [InputMode::Browse, InputMode::Edit, InputMode::Confirm, InputMode::Dashboard] {
            assert_eq!(key_to_action(ctrl('c'), mode), Action::Quit);
        }
    }

    #[test]
    fn test_browse_keys() {
        assert_eq!(key_to_action(key(KeyCode::Enter), InputMode::Browse), Action::Search);
        assert_eq!(key_to_action(key(KeyCode::Esc), InputMode::Browse), Action::ClearQuery);
        assert_eq!(key_to_action(ctrl('e'), InputMode::Browse), Action::StartEdit);
        assert_eq!(key_to_action(ctrl('d'), InputMode::Browse), Action::Delete);
        assert_eq!(key_to_action(ctrl('y'), InputMode::Browse), Action::CopyUtterance);
        assert_eq!(key_to_action(ctrl('p'), InputMode::Browse), Action::GeneratePdf);
        assert_eq!(key_to_action(key(KeyCode::Tab), InputMode::Browse), Action::SwitchSection);
    }

    #[test]
    fn test_browse_text_goes_to_query() {
        assert_eq!(key_to_action(key(KeyCode::Char('h')), InputMode::Browse), Action::QueryChar('h'));
        let shifted = KeyEvent::new(KeyCode::Char('H'), KeyModifiers::SHIFT);
        assert_eq!(key_to_action(shifted, InputMode::Browse), Action::QueryChar('H'));
        assert_eq!(
            key_to_action(key(KeyCode::Backspace), InputMode::Browse),
            Action::QueryBackspace
        );
    }

    #[test]
    fn test_edit_keys() {
        assert_eq!(key_to_action(key(KeyCode::Char('a')), InputMode::Edit), Action::EditChar('a'));
        assert_eq!(key_to_action(key(KeyCode::Tab), InputMode::Edit), Action::ToggleField);
        assert_eq!(key_to_action(key(KeyCode::Esc), InputMode::Edit), Action::CancelEdit);
        assert_eq!(key_to_action(ctrl('s'), InputMode::Edit), Action::Save);
        assert_eq!(key_to_action(key(KeyCode::Down), InputMode::Edit), Action::MoveDown);
        // An open edit does not lock the record against deletion
        assert_eq!(key_to_action(ctrl('d'), InputMode::Edit), Action::Delete);
        assert_eq!(key_to_action(ctrl('e'), InputMode::Edit), Action::None);
    }

    #[test]
    fn test_confirm_keys() {
        assert_eq!(key_to_action(key(KeyCode::Char('y')), InputMode::Confirm), Action::ConfirmYes);
        assert_eq!(key_to_action(key(KeyCode::Char('N')), InputMode::Confirm), Action::ConfirmNo);
        assert_eq!(key_to_action(key(KeyCode::Esc), InputMode::Confirm), Action::ConfirmNo);
        assert_eq!(key_to_action(key(KeyCode::Enter), InputMode::Confirm), Action::None);
    }

    #[test]
    fn test_dashboard_keys() {
        assert_eq!(key_to_action(ctrl('r'), InputMode::Dashboard), Action::Refresh);
        assert_eq!(key_to_action(ctrl('o'), InputMode::Dashboard), Action::DownloadReport);
        assert_eq!(key_to_action(key(KeyCode::Tab), InputMode::Dashboard), Action::SwitchSection);
        assert_eq!(key_to_action(key(KeyCode::Char('x')), InputMode::Dashboard), Action::None);
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(key_to_action(key(KeyCode::F(1)), InputMode::Browse), Action::None);
    }
}
