use crate::models::{Record, RecordId};

/// Fetch status of the record list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Failed(String),
}

/// What the list renderer should show. Empty is its own view, never an error or loading view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Records(&'a [Record]),
}

/// Currently displayed records, in server order.
///
/// The store only changes through [`RecordStore::replace`], which swaps the whole
/// sequence at once, so a render never sees a half-applied update.
#[derive(Debug)]
pub struct RecordStore {
    records: Vec<Record>,
    status: LoadStatus,
    loaded_once: bool,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self { records: Vec::new(), status: LoadStatus::Idle, loaded_once: false }
    }

    /// Replace the full sequence; order is kept exactly as received
    pub fn replace(&mut self, records: Vec<Record>) {
        self.records = records;
        self.status = LoadStatus::Idle;
        self.loaded_once = true;
    }

    pub fn mark_loading(&mut self) {
        self.status = LoadStatus::Loading;
    }

    /// Record a failed list fetch. Records already shown are kept.
    pub fn mark_failed(&mut self, message: impl Into<String>) {
        self.status = LoadStatus::Failed(message.into());
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn view(&self) -> ListView<'_> {
        match &self.status {
            LoadStatus::Failed(message) => ListView::Error(message),
            LoadStatus::Loading if !self.loaded_once => ListView::Loading,
            _ if self.records.is_empty() => {
                if self.loaded_once {
                    ListView::Empty
                } else {
                    ListView::Loading
                }
            }
            _ => ListView::Records(&self.records),
        }
    }
}
