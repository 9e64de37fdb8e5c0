//! HTTP implementation of [`GameApi`] using `reqwest`.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tablebot_protocol::{
    Acknowledgement, ActRequest, ActionKind, ApiErrorBody, ChatRequest, Codec,
    HandRecord, HistoryPage, JoinRequest, JsonCodec, LeaderboardEntry,
    LeaderboardPage, Profile, RegisterRequest, Registration, Snapshot,
};

use crate::{GameApi, TransportError};

/// Production endpoint of the game service.
pub const DEFAULT_BASE_URL: &str =
    "https://agent-poker.danieljcheung.workers.dev/api";

/// Upper bound on every request, connect through body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the service lives and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL all paths are appended to. A trailing `/` is ignored.
    pub base_url: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Default settings against a different base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    fn root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// An authenticated client for one agent.
///
/// Holds a pooled `reqwest::Client`, so a single instance should be reused
/// for every call the agent makes.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    codec: JsonCodec,
}

impl HttpClient {
    /// Builds a client that sends `api_key` as a bearer credential.
    ///
    /// # Errors
    /// [`TransportError::InvalidConfig`] if the key can't be placed in a
    /// header or the underlying client fails to build.
    pub fn new(
        api_key: &str,
        config: &ClientConfig,
    ) -> Result<Self, TransportError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| {
                TransportError::InvalidConfig(
                    "api key contains characters not allowed in a header"
                        .into(),
                )
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        Ok(Self {
            http: build_http(config, headers)?,
            base_url: config.root().to_string(),
            codec: JsonCodec,
        })
    }

    /// Registers a new agent. Needs no credential.
    ///
    /// The returned [`Registration::api_key`] is shown exactly once.
    pub async fn register(
        config: &ClientConfig,
        request: &RegisterRequest,
    ) -> Result<Registration, TransportError> {
        let codec = JsonCodec;
        let http = build_http(config, HeaderMap::new())?;
        let url = format!("{}/register", config.root());
        let response = http
            .post(&url)
            .body(codec.encode(request)?)
            .send()
            .await
            .map_err(from_reqwest)?;
        read_body(&codec, response).await
    }

    /// The base URL requests are sent to, without a trailing `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(from_reqwest)?;
        tracing::trace!(%method, path, status = response.status().as_u16(), "response received");
        read_bytes(&self.codec, response).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, TransportError> {
        let bytes = self.send(Method::GET, path, None).await?;
        Ok(self.codec.decode(&bytes)?)
    }

    /// POSTs a command and decodes the acknowledgement. An empty success
    /// body counts as a bare acknowledgement.
    async fn command<B: Serialize>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Acknowledgement, TransportError> {
        let body = body.map(|b| self.codec.encode(b)).transpose()?;
        let bytes = self.send(Method::POST, path, body).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Acknowledgement::default());
        }
        Ok(self.codec.decode(&bytes)?)
    }
}

impl GameApi for HttpClient {
    async fn profile(&self) -> Result<Profile, TransportError> {
        self.get("/me").await
    }

    async fn join(
        &self,
        table_id: &str,
    ) -> Result<Acknowledgement, TransportError> {
        let body = JoinRequest {
            table_id: table_id.to_string(),
        };
        self.command("/table/join", Some(&body)).await
    }

    async fn leave(&self) -> Result<Acknowledgement, TransportError> {
        self.command::<()>("/table/leave", None).await
    }

    async fn observe(&self) -> Result<Snapshot, TransportError> {
        self.get("/table/state").await
    }

    async fn act(
        &self,
        action: ActionKind,
        amount: Option<i64>,
    ) -> Result<Acknowledgement, TransportError> {
        let body = ActRequest::new(action, amount);
        self.command("/table/act", Some(&body)).await
    }

    async fn chat(&self, text: &str) -> Result<Acknowledgement, TransportError> {
        let body = ChatRequest {
            text: text.to_string(),
        };
        self.command("/table/chat", Some(&body)).await
    }

    async fn rebuy(&self) -> Result<Acknowledgement, TransportError> {
        self.command::<()>("/rebuy", None).await
    }

    async fn leaderboard(
        &self,
        limit: u32,
    ) -> Result<Vec<LeaderboardEntry>, TransportError> {
        let page: LeaderboardPage =
            self.get(&format!("/leaderboard?limit={limit}")).await?;
        Ok(page.leaderboard)
    }

    async fn history(
        &self,
        limit: u32,
    ) -> Result<Vec<HandRecord>, TransportError> {
        let page: HistoryPage =
            self.get(&format!("/table/history?limit={limit}")).await?;
        Ok(page.hands)
    }

    async fn sit_out(&self) -> Result<Acknowledgement, TransportError> {
        self.command::<()>("/table/sit-out", None).await
    }

    async fn sit_in(&self) -> Result<Acknowledgement, TransportError> {
        self.command::<()>("/table/sit-in", None).await
    }
}

fn build_http(
    config: &ClientConfig,
    mut headers: HeaderMap,
) -> Result<reqwest::Client, TransportError> {
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(config.timeout)
        .build()
        .map_err(|e| TransportError::InvalidConfig(e.to_string()))
}

fn from_reqwest(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::TimedOut
    } else {
        TransportError::Network(err.to_string())
    }
}

/// Reads the body and turns non-success statuses into
/// [`TransportError::Status`].
async fn read_bytes(
    codec: &impl Codec,
    response: Response,
) -> Result<Vec<u8>, TransportError> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(from_reqwest)?;

    if !status.is_success() {
        let message = codec
            .decode::<ApiErrorBody>(&bytes)
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        return Err(TransportError::status(status.as_u16(), message));
    }

    Ok(bytes.to_vec())
}

async fn read_body<T: DeserializeOwned>(
    codec: &impl Codec,
    response: Response,
) -> Result<T, TransportError> {
    let bytes = read_bytes(codec, response).await?;
    Ok(codec.decode(&bytes)?)
}
