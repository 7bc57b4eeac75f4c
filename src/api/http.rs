//! HTTP/JSON transport built on the actix client.

use awc::Client;
use awc::http::Method;

use crate::api::{ApiRequest, ApiResponse, HttpMethod, Transport, TransportError};

/// Upper bound on a response body; collection listings are the largest.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Talks to the CRUD API at `base_url`.
///
/// Requests carry no timeout: a stuck call keeps its caller pending until the
/// connection settles.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder().disable_timeout().finish();
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        };
        let url = self.url(&request.path);
        log::debug!("{} {url}", request.method);

        let builder = self.client.request(method, url.as_str());
        let sent = match &request.body {
            Some(body) => builder.send_json(body).await,
            None => builder.send().await,
        };
        let mut response = sent.map_err(|err| TransportError::Connection(err.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body()
            .limit(MAX_BODY_BYTES)
            .await
            .map_err(|err| TransportError::Body(err.to_string()))?;

        Ok(ApiResponse::new(status, body.to_vec()))
    }
}
