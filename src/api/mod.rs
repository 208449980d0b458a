//! Remote history store interface.
//!
//! [`HistoryApi`] covers the six server calls the console makes. The production
//! implementation is [`HttpHistoryApi`]; tests substitute in-memory fakes. Any non-2xx
//! status is a failure regardless of body content.

pub mod http;

use async_trait::async_trait;

pub use http::HttpHistoryApi;

use crate::error::Result;
use crate::models::{Record, RecordId, RecordUpdate, StatisticsSnapshot};

#[async_trait]
pub trait HistoryApi: Send + Sync {
    /// `GET /historial[?buscar=text]`; `None` lists everything
    async fn list_records(&self, query: Option<&str>) -> Result<Vec<Record>>;

    /// `PUT /historial/{id}`; returns the server's acknowledgement message
    async fn update_record(&self, id: RecordId, update: &RecordUpdate) -> Result<String>;

    /// `DELETE /historial/{id}`; returns the server's acknowledgement message
    async fn delete_record(&self, id: RecordId) -> Result<String>;

    /// `GET /dashboard/estadisticas`
    async fn fetch_statistics(&self) -> Result<StatisticsSnapshot>;

    /// `GET /dashboard/reporte-detallado`, returned untouched
    async fn fetch_detailed_report(&self) -> Result<serde_json::Value>;

    /// `POST /historial/reportes/pdf`; returns an absolute URL of the generated file
    async fn request_pdf_report(&self) -> Result<String>;
}
