//! reqwest implementation of [`HistoryApi`]

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use tracing::{debug, error};

use super::HistoryApi;
use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, Result};
use crate::models::{Record, RecordId, RecordUpdate, StatisticsSnapshot};
use crate::parsers::{parse_mutation_ack, parse_pdf_location, parse_records, parse_snapshot};

/// Characters left unescaped in a query component (same set as `encodeURIComponent`)
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Longest error body kept in a transport error message
const MAX_ERROR_BODY: usize = 200;

/// HTTP client for the assistant server
#[derive(Debug, Clone)]
pub struct HttpHistoryApi {
    client: Client,
    base_url: Url,
}

impl HttpHistoryApi {
    pub fn new(config: &ConsoleConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { client, base_url: config.base_url.clone() })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ConsoleError::Format(format!("invalid endpoint '{}': {}", path, e)))
    }

    /// Build the list URL, encoding the filter the way the server expects
    pub fn records_url(&self, query: Option<&str>) -> Result<Url> {
        match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => {
                let encoded = utf8_percent_encode(q, QUERY_COMPONENT);
                self.endpoint(&format!("historial?buscar={}", encoded))
            }
            None => self.endpoint("historial"),
        }
    }

    /// Send a request and return the body of a 2xx response.
    ///
    /// A 404 on a record endpoint is reported as [`ConsoleError::NotFound`].
    async fn send(&self, request: RequestBuilder, record: Option<RecordId>) -> Result<String> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if let (StatusCode::NOT_FOUND, Some(id)) = (status, record) {
                return Err(ConsoleError::NotFound(id));
            }
            error!("server error: {} - {}", status, body);
            return Err(ConsoleError::Transport {
                status: status.as_u16(),
                message: truncate(&body, MAX_ERROR_BODY),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl HistoryApi for HttpHistoryApi {
    async fn list_records(&self, query: Option<&str>) -> Result<Vec<Record>> {
        let url = self.records_url(query)?;
        debug!("GET {}", url);
        let body = self.send(self.client.get(url), None).await?;
        parse_records(&body)
    }

    async fn update_record(&self, id: RecordId, update: &RecordUpdate) -> Result<String> {
        let url = self.endpoint(&format!("historial/{}", id))?;
        debug!("PUT {}", url);
        let body = self.send(self.client.put(url).json(update), Some(id)).await?;
        parse_mutation_ack(id, &body)
    }

    async fn delete_record(&self, id: RecordId) -> Result<String> {
        let url = self.endpoint(&format!("historial/{}", id))?;
        debug!("DELETE {}", url);
        let body = self.send(self.client.delete(url), Some(id)).await?;
        parse_mutation_ack(id, &body)
    }

    async fn fetch_statistics(&self) -> Result<StatisticsSnapshot> {
        let url = self.endpoint("dashboard/estadisticas")?;
        debug!("GET {}", url);
        let body = self.send(self.client.get(url), None).await?;
        parse_snapshot(&body)
    }

    async fn fetch_detailed_report(&self) -> Result<serde_json::Value> {
        let url = self.endpoint("dashboard/reporte-detallado")?;
        debug!("GET {}", url);
        let body = self.send(self.client.get(url), None).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn request_pdf_report(&self) -> Result<String> {
        let url = self.endpoint("historial/reportes/pdf")?;
        debug!("POST {}", url);
        let body = self
            .send(self.client.post(url).header("Content-Type", "application/json"), None)
            .await?;
        let location = parse_pdf_location(&body)?;
        Ok(self.endpoint(&location)?.to_string())
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpHistoryApi {
        let config = ConsoleConfig::default().with_base_url(base).unwrap();
        HttpHistoryApi::new(&config).unwrap()
    }

    #[test]
    fn test_records_url_without_query() {
        let api = api("http://localhost:8000");
        assert_eq!(api.records_url(None).unwrap().as_str(), "http://localhost:8000/historial");
        assert_eq!(api.records_url(Some("   ")).unwrap().as_str(), "http://localhost:8000/historial");
    }

    #[test]
    fn test_records_url_encodes_query() {
        let api = api("http://localhost:8000");
        let url = api.records_url(Some("busca en google & más")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/historial?buscar=busca%20en%20google%20%26%20m%C3%A1s"
        );
    }

    #[test]
    fn test_endpoints_under_base_path() {
        let api = api("http://localhost:8000/asistente");
        assert_eq!(
            api.endpoint("historial/7").unwrap().as_str(),
            "http://localhost:8000/asistente/historial/7"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc…");
    }
}
