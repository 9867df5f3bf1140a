use std::future::Future;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub action: String,
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

/// Sends a form submission and hands back whatever the server answered.
/// Non-2xx statuses are responses, not errors.
pub trait FormTransport {
    fn submit(
        &self,
        request: &SubmitRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>>;
}

/// Posts form-encoded bodies over HTTP, flagged as background requests so
/// the server answers with JSON instead of a page.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, action: &str) -> String {
        if action.starts_with("http://") || action.starts_with("https://") {
            action.to_string()
        } else if action.starts_with('/') {
            format!("{}{action}", self.base_url)
        } else {
            format!("{}/{action}", self.base_url)
        }
    }
}

impl FormTransport for HttpTransport {
    async fn submit(&self, request: &SubmitRequest) -> Result<TransportResponse, TransportError> {
        let url = self.url_for(&request.action);
        debug!("posting {} fields to {url}", request.fields.len());
        let response = self
            .client
            .post(&url)
            .header("X-Requested-With", "XMLHttpRequest")
            .form(&request.fields)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_actions_join_base_url() {
        let transport = HttpTransport::new("http://127.0.0.1:8080/");
        assert_eq!(transport.url_for("/feedback"), "http://127.0.0.1:8080/feedback");
        assert_eq!(transport.url_for("feedback"), "http://127.0.0.1:8080/feedback");
        assert_eq!(
            transport.url_for("https://example.com/post"),
            "https://example.com/post"
        );
    }

    #[test]
    fn success_is_any_2xx() {
        assert!(TransportResponse::new(200, "").is_success());
        assert!(TransportResponse::new(204, "").is_success());
        assert!(!TransportResponse::new(302, "").is_success());
        assert!(!TransportResponse::new(400, "{}").is_success());
    }
}
