use crate::error::{Error, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Content type the server expects for query calls.
///
/// The body sent under this header is the crate's bincode envelope, not protobuf; the
/// header only selects the server's binary query route.
pub const BINARY_CONTENT_TYPE: &str = "application/x-protobuf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RawRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Vec<u8>>,
}

/// A completed exchange, whatever its status code.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Type alias for the boxed future a transport returns.
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<RawResponse>> + Send + 'a>>;

/// Performs one network exchange.
///
/// Implementations must report a refused or failed connection as
/// [`Error::HostUnreachable`] so the dispatcher can evict the host, and every other
/// failure as [`Error::Transport`]. Non-2xx responses are not failures at this level.
pub trait Transport: Send + Sync {
    fn send(&self, request: RawRequest) -> TransportFuture<'_>;
}

/// reqwest-backed transport.
pub struct HttpTransport {
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(user_agent: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(BINARY_CONTENT_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static(BINARY_CONTENT_TYPE));

        let http_client = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(Self { http_client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: RawRequest) -> TransportFuture<'_> {
        Box::pin(async move {
            let mut builder = self
                .http_client
                .request(request.method.into(), request.url.as_str());
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(classify)?;

            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body = response.bytes().await.map_err(classify)?.to_vec();

            Ok(RawResponse {
                status,
                content_type,
                body,
            })
        })
    }
}

fn classify(err: reqwest::Error) -> Error {
    if err.is_connect() && !err.is_timeout() {
        Error::HostUnreachable(err.to_string())
    } else {
        Error::Transport(err.to_string())
    }
}
