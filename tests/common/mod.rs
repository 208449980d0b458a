//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use assistant_console::controllers::Confirmer;
use assistant_console::dashboard::sample_snapshot;
use assistant_console::error::{ConsoleError, Result};
use assistant_console::models::{Record, RecordId, RecordUpdate, StatisticsSnapshot};
use assistant_console::HistoryApi;
use async_trait::async_trait;

/// Builder for test records
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn new(id: RecordId) -> Self {
        Self {
            record: Record {
                id,
                user_utterance: format!("utterance {}", id),
                assistant_response: format!("response {}", id),
                timestamp_label: "02/11/2025 09:41AM".to_string(),
                command_type: None,
            },
        }
    }

    pub fn utterance(mut self, text: &str) -> Self {
        self.record.user_utterance = text.to_string();
        self
    }

    pub fn response(mut self, text: &str) -> Self {
        self.record.assistant_response = text.to_string();
        self
    }

    pub fn command(mut self, kind: &str) -> Self {
        self.record.command_type = Some(kind.to_string());
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}

/// In-memory assistant server.
///
/// Searches match case-insensitively on either text field. Mutations of a missing id
/// fail with not-found, the same as the real server's 404.
#[derive(Default)]
pub struct FakeHistoryApi {
    records: Mutex<Vec<Record>>,
    statistics: Mutex<Option<StatisticsSnapshot>>,
    fail_lists: AtomicBool,
    list_calls: AtomicUsize,
    update_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl FakeHistoryApi {
    pub fn with_records(records: Vec<Record>) -> Self {
        let api = Self::default();
        *api.records.lock().unwrap() = records;
        api
    }

    pub fn with_statistics(self, snapshot: StatisticsSnapshot) -> Self {
        *self.statistics.lock().unwrap() = Some(snapshot);
        self
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    /// Remove a record behind the console's back
    pub fn remove(&self, id: RecordId) {
        self.records.lock().unwrap().retain(|r| r.id != id);
    }

    pub fn record(&self, id: RecordId) -> Option<Record> {
        self.records.lock().unwrap().iter().find(|r| r.id == id).cloned()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HistoryApi for FakeHistoryApi {
    async fn list_records(&self, query: Option<&str>) -> Result<Vec<Record>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(ConsoleError::Transport { status: 500, message: "boom".to_string() });
        }

        let records = self.records.lock().unwrap();
        let Some(query) = query else {
            return Ok(records.clone());
        };
        let needle = query.to_lowercase();
        Ok(records
            .iter()
            .filter(|r| {
                r.user_utterance.to_lowercase().contains(&needle)
                    || r.assistant_response.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn update_record(&self, id: RecordId, update: &RecordUpdate) -> Result<String> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.lock().unwrap();
        let record = records.iter_mut().find(|r| r.id == id).ok_or(ConsoleError::NotFound(id))?;
        record.user_utterance = update.user_utterance.clone();
        record.assistant_response = update.assistant_response.clone();
        Ok("Registro actualizado".to_string())
    }

    async fn delete_record(&self, id: RecordId) -> Result<String> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(ConsoleError::NotFound(id));
        }
        Ok("Registro eliminado".to_string())
    }

    async fn fetch_statistics(&self) -> Result<StatisticsSnapshot> {
        self.statistics
            .lock()
            .unwrap()
            .clone()
            .ok_or(ConsoleError::Transport { status: 503, message: "unavailable".to_string() })
    }

    async fn fetch_detailed_report(&self) -> Result<serde_json::Value> {
        Ok(serde_json::json!({ "total": self.records.lock().unwrap().len() }))
    }

    async fn request_pdf_report(&self) -> Result<String> {
        Ok("http://assistant.test/static/reportes/reporte.pdf".to_string())
    }
}

/// Confirmer that always answers the same way and counts prompts
pub struct FixedConfirmer {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl FixedConfirmer {
    pub fn new(answer: bool) -> Self {
        Self { answer, prompts: Mutex::new(Vec::new()) }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirmer for FixedConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}

/// Five records covering the command types the dashboard knows about
pub fn sample_records() -> Vec<Record> {
    vec![
        RecordBuilder::new(5).utterance("reproduce despacito").response("Reproduciendo despacito").command("reproduce").build(),
        RecordBuilder::new(4).utterance("qué hora es").response("Son las 9:41").command("hora").build(),
        RecordBuilder::new(3).utterance("busca en google rust").response("Buscando rust").command("busca en google").build(),
        RecordBuilder::new(2).utterance("reproduce la bamba").response("Reproduciendo la bamba").command("reproduce").build(),
        RecordBuilder::new(1).utterance("dime un chiste").response("No sé chistes").build(),
    ]
}

/// Statistics matching the built-in sample, used where a live snapshot is needed
pub fn live_statistics() -> StatisticsSnapshot {
    sample_snapshot()
}
