use std::time::Duration;

use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Method, RequestBuilder,
};
use serde::{de::DeserializeOwned, Serialize};

use tsb_core::{
    errors::{Error, Origin, StatusFailure},
    exchange, Result,
};

const APPLICATION_JSON: &str = "application/json";

/// `base + version + endpoint`, concatenated as configured.
pub fn compose_url(base_url: &str, api_version: &str, endpoint: &str) -> String {
    format!("{base_url}{api_version}{endpoint}")
}

/// Failure of a single exchange, before it is mapped into a domain [`Error`].
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Non-2xx response; body kept raw for the error translator.
    #[error(transparent)]
    Status(#[from] StatusFailure),

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("response body could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),
}

impl TransportError {
    pub fn into_error(self, origin: Origin) -> Error {
        match self {
            TransportError::Status(failure) => exchange::translate_failure(origin, failure),
            TransportError::Request(e) => Error::Transport {
                origin,
                reason: e.to_string(),
            },
            TransportError::Decode(e) => Error::MalformedResponse {
                origin,
                reason: e.to_string(),
            },
        }
    }
}

/// JSON-over-HTTP transport shared by the networked repositories.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Clone, Debug)]
pub struct JsonTransport {
    http: reqwest::Client,
}

impl JsonTransport {
    /// `timeout: None` keeps reqwest's default.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::Config(format!("http client build failed: {e}")))?;
        Ok(Self::with_client(http))
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    pub async fn post<B, T>(&self, url: &str, body: &B) -> std::result::Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .request(Method::POST, url)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .json(body);
        self.send(request).await
    }

    /// Bodyless PUT; no `Content-Type` is sent.
    pub async fn put<T>(&self, url: &str) -> std::result::Result<T, TransportError>
    where
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PUT, url)).await
    }

    pub async fn get<T>(&self, url: &str) -> std::result::Result<T, TransportError>
    where
        T: DeserializeOwned,
    {
        self.send(self.request(Method::GET, url)).await
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http.request(method, url).header(ACCEPT, APPLICATION_JSON)
    }

    async fn send<T>(&self, request: RequestBuilder) -> std::result::Result<T, TransportError>
    where
        T: DeserializeOwned,
    {
        let resp = request.send().await.map_err(TransportError::Request)?;
        let status = resp.status();
        let body = resp.text().await.map_err(TransportError::Request)?;

        if !status.is_success() {
            return Err(StatusFailure {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        serde_json::from_str(&body).map_err(TransportError::Decode)
    }
}
