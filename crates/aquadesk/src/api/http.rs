//! Blocking reqwest client. Runs on the API worker thread only.

use std::time::Duration;

use aquadesk_core::ResourceKind;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Url;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;
use tracing::debug;

use super::{ApiError, Backend};

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, kind: ResourceKind) -> String {
        format!("{}/api/{}", self.base_url, kind.path())
    }

    /// Record address with `id` encoded as a single path segment
    fn record_url(&self, kind: ResourceKind, id: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.collection_url(kind))
            .map_err(|e| ApiError::Transport(format!("invalid backend URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::Transport("backend URL cannot take a path".to_string()))?
            .push(id);
        Ok(url)
    }

    /// Send and turn any non-2xx status into [`ApiError::Status`]
    fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .header(USER_AGENT, concat!("aquadesk/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "Response received");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(ApiError::from_status(status.as_u16(), &body))
    }

    fn json(response: Response) -> Result<Value, ApiError> {
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl Backend for HttpBackend {
    fn list(&self, kind: ResourceKind) -> Result<Vec<Value>, ApiError> {
        let response = self.send(self.client.get(self.collection_url(kind)))?;
        match Self::json(response)? {
            Value::Array(items) => Ok(items),
            other => Err(ApiError::Decode(format!(
                "expected an array of {}, got {}",
                kind.path(),
                json_type(&other)
            ))),
        }
    }

    fn create(&self, kind: ResourceKind, body: &Value) -> Result<Value, ApiError> {
        let response = self.send(self.client.post(self.collection_url(kind)).json(body))?;
        Self::json(response)
    }

    fn update(&self, kind: ResourceKind, id: &str, body: &Value) -> Result<Value, ApiError> {
        let response = self.send(self.client.put(self.record_url(kind, id)?).json(body))?;
        Self::json(response)
    }

    fn delete(&self, kind: ResourceKind, id: &str) -> Result<(), ApiError> {
        self.send(self.client.delete(self.record_url(kind, id)?))?;
        Ok(())
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_join_without_double_slash() {
        let backend = HttpBackend::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            backend.collection_url(ResourceKind::WaterSources),
            "http://localhost:5000/api/water-sources"
        );
        assert_eq!(
            backend.record_url(ResourceKind::Complaints, "65a1f0").unwrap().as_str(),
            "http://localhost:5000/api/complaints/65a1f0"
        );
    }

    #[test]
    fn test_record_id_stays_one_segment() {
        let backend = HttpBackend::new("http://localhost:5000", Duration::from_secs(1)).unwrap();
        let url = backend.record_url(ResourceKind::AuditLogs, "a/b?c#d").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/audit/a%2Fb%3Fc%23d");
        assert_eq!(url.path_segments().map(Iterator::count), Some(3));
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_unreachable_server_is_transport_error() {
        // Port 9 (discard) on localhost is closed on test machines
        let backend = HttpBackend::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        assert!(matches!(
            backend.list(ResourceKind::Users),
            Err(ApiError::Transport(_))
        ));
    }
}
