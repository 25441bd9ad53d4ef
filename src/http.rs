use std::collections::HashMap;
use std::time::Duration;

use serde_json::{Map, Value};
use url::Url;
use wreq::{
    header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client, Method,
};

use crate::error::{KuroError, Result};

/// Request body forms the API uses.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// `application/x-www-form-urlencoded`, used by the community API.
    Form(Map<String, Value>),
    /// JSON, used by the gacha API.
    Json(Value),
}

impl RequestBody {
    pub fn is_empty(&self) -> bool {
        match self {
            RequestBody::Empty => true,
            RequestBody::Form(map) => map.is_empty(),
            RequestBody::Json(value) => value.is_null(),
        }
    }
}

/// One outgoing HTTP request. A missing method is filled in by the caller.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Option<Method>,
    pub url: String,
    pub body: RequestBody,
    pub params: Vec<(String, String)>,
    pub headers: HashMap<String, String>,
}

impl Request {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            method: None,
            url: url.into(),
            body: RequestBody::Empty,
            params: Vec::new(),
            headers: HashMap::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url).with_method(Method::GET)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(url).with_method(Method::POST)
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_form(mut self, data: Map<String, Value>) -> Self {
        self.body = RequestBody::Form(data);
        self
    }

    pub fn with_json(mut self, data: Value) -> Self {
        self.body = RequestBody::Json(data);
        self
    }

    pub fn with_param(mut self, name: &str, value: &str) -> Self {
        self.params.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }
}

/// Status and body of a completed round trip.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}

pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration, connect_timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| KuroError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    /// Send `request` and read the whole body. Only timeouts and transport
    /// failures are errors here; HTTP error statuses are returned as-is.
    pub async fn send(&self, request: &Request) -> Result<RawResponse> {
        let method = request.method.clone().unwrap_or(Method::GET);
        let url = build_url(&request.url, &request.params)?;
        let headers = to_header_map(&request.headers)?;

        tracing::debug!(%method, %url, "sending request");

        let mut builder = self.client.request(method, url.as_str()).headers(headers);
        builder = match &request.body {
            RequestBody::Form(data) if !data.is_empty() => builder
                .header(
                    CONTENT_TYPE,
                    HeaderValue::from_static("application/x-www-form-urlencoded"),
                )
                .body(encode_form(data)),
            RequestBody::Json(data) if !data.is_null() => builder.json(data),
            _ => builder,
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        if status >= 400 {
            tracing::warn!(status, %url, "HTTP error status");
        }

        Ok(RawResponse { status, body })
    }
}

fn build_url(base: &str, params: &[(String, String)]) -> Result<Url> {
    let mut url = Url::parse(base)?;
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }
    Ok(url)
}

fn to_header_map(headers: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| KuroError::Validation(format!("Invalid header name: {}", name)))?;
        // Avoid echoing header values (tokens, cookies) in errors.
        let value = HeaderValue::from_str(value)
            .map_err(|_| KuroError::Validation(format!("Invalid value for header {}", name)))?;
        map.insert(name, value);
    }
    Ok(map)
}

/// Form-encode a flat JSON object. Nulls are skipped, scalars are written
/// without quotes.
pub fn encode_form(data: &Map<String, Value>) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in data {
        match value {
            Value::Null => {}
            Value::String(s) => {
                serializer.append_pair(key, s);
            }
            other => {
                serializer.append_pair(key, &other.to_string());
            }
        }
    }
    serializer.finish()
}
