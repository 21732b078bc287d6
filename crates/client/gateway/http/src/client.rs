//! `reqwest` implementation of the gateway traits.

use async_trait::async_trait;
use reqwest::{IntoUrl, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use client_gateway_core::{
    ClaimOutcome, ClaimRequest, CreateUserRequest, DirectoryReader, ErrorBody, Gateway,
    HistoryPage, HistoryQuery, HistoryReader, LeaderboardRow, PointsWriter, RequestError,
    Result, User, UserId,
};

use crate::config::GatewayConfig;

/// JSON-over-HTTP gateway talking to the leaderboard server.
pub struct HttpGateway {
    config: GatewayConfig,
    http_client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Use a preconfigured `reqwest::Client` (proxies, TLS roots, ...).
    pub fn with_client(config: GatewayConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        tracing::debug!("Gateway request: {}", what);

        let response = request.send().await.map_err(|e| {
            tracing::warn!("Gateway request {} failed before a response: {}", what, e);
            // Transport failures carry no server message; callers substitute
            // their own text.
            RequestError::network(String::new())
        })?;

        handle(response, what).await
    }

    fn history_request(&self, url: impl IntoUrl, query: HistoryQuery) -> RequestBuilder {
        self.http_client
            .get(url)
            .query(&[("page", query.page), ("limit", query.limit)])
    }

    /// `/api/users/history/{id}` with the id as one percent-encoded segment,
    /// so ids containing `/`, `?` or `#` cannot change the route.
    fn user_history_url(&self, user_id: &UserId) -> Result<Url> {
        let invalid = |what: &str| {
            tracing::warn!("Cannot build user history URL: {}", what);
            RequestError::network(String::new())
        };

        let mut url = Url::parse(&self.config.url("/api/users/history"))
            .map_err(|e| invalid(&e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("base URL cannot have path segments"))?
            .push(user_id.as_str());
        Ok(url)
    }
}

/// Normalize a response: success bodies are decoded as `T`, anything else
/// becomes a [`RequestError`] carrying the body's `error` field or, when the
/// body is not JSON, the status reason phrase.
async fn handle<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error.unwrap_or_default(),
            Err(_) => reason,
        };
        tracing::warn!("Gateway request {} returned {}: {:?}", what, status, message);
        return Err(RequestError::status(status.as_u16(), message));
    }

    response.json::<T>().await.map_err(|e| {
        tracing::warn!("Gateway response for {} could not be decoded: {}", what, e);
        RequestError::decode(String::new())
    })
}

#[async_trait]
impl DirectoryReader for HttpGateway {
    async fn list_users(&self) -> Result<Vec<User>> {
        let request = self.http_client.get(self.config.url("/api/users"));
        self.send(request, "list users").await
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardRow>> {
        let request = self
            .http_client
            .get(self.config.url("/api/users/leaderboard"));
        self.send(request, "leaderboard").await
    }
}

#[async_trait]
impl HistoryReader for HttpGateway {
    async fn history(&self, query: HistoryQuery) -> Result<HistoryPage> {
        let request = self.history_request(self.config.url("/api/users/history"), query);
        self.send(request, "history").await
    }

    async fn user_history(&self, user_id: &UserId, query: HistoryQuery) -> Result<HistoryPage> {
        let request = self.history_request(self.user_history_url(user_id)?, query);
        self.send(request, "user history").await
    }
}

#[async_trait]
impl PointsWriter for HttpGateway {
    async fn create_user(&self, name: &str) -> Result<User> {
        let request = self
            .http_client
            .post(self.config.url("/api/users"))
            .json(&CreateUserRequest { name });
        self.send(request, "create user").await
    }

    async fn claim(&self, user_id: &UserId) -> Result<ClaimOutcome> {
        let request = self
            .http_client
            .post(self.config.url("/api/users/claim"))
            .json(&ClaimRequest { user_id });
        self.send(request, "claim").await
    }
}

impl Gateway for HttpGateway {
    fn name(&self) -> &str {
        "http"
    }

    fn endpoint(&self) -> &str {
        self.config.base_url()
    }
}
