//! REST transport facade for the bookshelf client with JSON bodies and error
//! message extraction.

use std::time::{Duration, Instant};

use reqwest::{header::HeaderValue, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;
use uuid::{Timestamp, Uuid};

use bookshelf_kernel::settings::ApiSettings;

pub mod error;

pub use error::ClientError;
pub use reqwest::Method;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// JSON client bound to a fixed base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client from the `api` settings section
    pub fn new(settings: &ApiSettings) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder().user_agent(settings.user_agent.clone());
        if let Some(timeout_ms) = settings.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: parse_base_url(&settings.base_url)?,
        })
    }

    /// The base URL every path is resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` (e.g. `/api/books/3`) against the base URL.
    ///
    /// Any path prefix on the base URL is kept, so a base of
    /// `http://host/shop` resolves `/api/books` to `http://host/shop/api/books`.
    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let relative = path.trim_start_matches('/');
        self.base_url
            .join(relative)
            .map_err(|source| ClientError::InvalidUrl {
                url: format!("{}{}", self.base_url, relative),
                source,
            })
    }

    /// GET `path` and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        let response = self.execute(self.client.get(url), Method::GET, path).await?;
        decode(response).await
    }

    /// Send `body` as JSON with `method` and decode the JSON answer
    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let request = self.client.request(method.clone(), url).json(body);
        let response = self.execute(request, method, path).await?;
        decode(response).await
    }

    /// DELETE `path`, ignoring whatever body a successful response carries
    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let url = self.endpoint(path)?;
        self.execute(self.client.delete(url), Method::DELETE, path)
            .await?;
        Ok(())
    }

    /// Tag the request with an id, send it and turn non-2xx answers into
    /// [`ClientError::Api`].
    async fn execute(
        &self,
        request: RequestBuilder,
        method: Method,
        path: &str,
    ) -> Result<Response, ClientError> {
        let request_id = make_request_id();
        let request = match HeaderValue::from_str(&request_id) {
            Ok(value) => request.header(REQUEST_ID_HEADER, value),
            Err(_) => request,
        };

        let started = Instant::now();
        let response = request.send().await.map_err(|e| {
            tracing::error!(
                request_id = %request_id,
                method = %method,
                path,
                error = %e,
                "request failed before a response arrived"
            );
            ClientError::Transport(e)
        })?;

        let status = response.status();
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if status.is_success() {
            tracing::debug!(
                request_id = %request_id,
                method = %method,
                path,
                status_code = status.as_u16(),
                elapsed_ms,
                "request completed"
            );
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ClientError::api(status.as_u16(), &body);
        tracing::error!(
            request_id = %request_id,
            method = %method,
            path,
            status_code = status.as_u16(),
            elapsed_ms,
            server_message = error.server_message().unwrap_or("-"),
            "request rejected by server"
        );
        Err(error)
    }
}

/// Parse a base URL, making sure it ends in `/` so joins append to it.
fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };

    Url::parse(&with_slash).map_err(|source| ClientError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Request ids are time-ordered UUIDs so they sort with the log stream
fn make_request_id() -> String {
    let timestamp = Timestamp::now(uuid::NoContext);
    Uuid::new_v7(timestamp).to_string()
}
