//! Request construction, dispatch and response classification.
//!
//! # Design
//! `ArenaClient` holds only immutable configuration (API root, authorization
//! header value, transport, clock) and carries no mutable state between
//! calls, so independent operations may run concurrently. Every operation
//! goes through the same pipeline: build an `HttpRequest` (no I/O), hand it
//! to the injected `Transport`, then classify the `HttpResponse`. GET and
//! POST decode the JSON body on any 2xx; PUT and DELETE discard it. Any
//! other status becomes `ApiError::Http`.
//!
//! Resource accessors (`user`, `group`, `channel`, `block`, `search`)
//! borrow the client and bind one identifier; they perform no I/O until one
//! of their operations is awaited. The futures those operations return
//! borrow the client alone, so an accessor may be a temporary:
//! `tokio::join!(client.block(1).get(), client.block(2).get())`.

mod block;
mod channel;
mod group;
mod search;
mod user;

#[cfg(test)]
pub(crate) mod mock;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::query::{pagination_query, with_query, Pagination};
use crate::types::{ChannelPage, Me};

pub use block::BlockApi;
pub use channel::{ChannelApi, ConnectApi, DisconnectApi};
pub use group::GroupApi;
pub use search::SearchApi;
pub use user::UserApi;

/// Asynchronous client for the Are.na API.
pub struct ArenaClient<T, C = SystemClock> {
    base_url: String,
    authorization: String,
    transport: T,
    clock: C,
}

impl<T: Transport> ArenaClient<T> {
    /// Client for the public API root without a token.
    pub fn new(transport: T) -> Self {
        Self::with_config(ClientConfig::default(), transport)
    }

    pub fn with_config(config: ClientConfig, transport: T) -> Self {
        Self {
            base_url: config.normalized_base_url(),
            authorization: config.authorization(),
            transport,
            clock: SystemClock,
        }
    }
}

impl<T: Transport, C: Clock> ArenaClient<T, C> {
    /// Replace the time source used for the `date` cache-busting parameter.
    pub fn with_clock<N: Clock>(self, clock: N) -> ArenaClient<T, N> {
        ArenaClient {
            base_url: self.base_url,
            authorization: self.authorization,
            transport: self.transport,
            clock,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        !self.authorization.is_empty()
    }

    /// Build the request for `endpoint` (relative path, query included)
    /// without sending it.
    pub fn build_request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: Option<String>,
    ) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{}", self.base_url, endpoint.trim_start_matches('/')),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Authorization".to_string(), self.authorization.clone()),
            ],
            body,
        }
    }

    fn build_json_request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(ApiError::Serialization)?;
        Ok(self.build_request(method, endpoint, Some(body)))
    }

    /// `GET endpoint`, decoding the body on success.
    pub async fn get_json<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R, ApiError> {
        let request = self.build_request(HttpMethod::Get, endpoint, None);
        parse_json(self.send(request).await?)
    }

    /// `POST endpoint` with a JSON body, decoding the response body.
    pub async fn post_json<B, R>(&self, endpoint: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.build_json_request(HttpMethod::Post, endpoint, body)?;
        parse_json(self.send(request).await?)
    }

    /// `PUT endpoint` with a JSON body. The response body is discarded.
    pub async fn put<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<(), ApiError> {
        let request = self.build_json_request(HttpMethod::Put, endpoint, body)?;
        self.send(request).await.map(drop)
    }

    /// `DELETE endpoint`. The response body is discarded.
    pub async fn delete(&self, endpoint: &str) -> Result<(), ApiError> {
        let request = self.build_request(HttpMethod::Delete, endpoint, None);
        self.send(request).await.map(drop)
    }

    /// Run one round-trip and reject non-2xx responses.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        debug!(%method, %url, "sending request");
        let response = self
            .transport
            .execute(request)
            .await
            .map_err(ApiError::Transport)?;
        debug!(%method, %url, status = response.status, "received response");
        check_status(&response)?;
        Ok(response)
    }

    pub(crate) fn paginated(&self, path: &str, options: Option<&Pagination>) -> String {
        with_query(path, &pagination_query(options, &self.clock))
    }

    pub(crate) fn clock(&self) -> &C {
        &self.clock
    }

    /// The authenticated user. Fails with 401 without a token.
    pub async fn me(&self) -> Result<Me, ApiError> {
        self.get_json("me").await
    }

    /// Channels visible to the authenticated scope.
    pub async fn channels(&self, options: Option<&Pagination>) -> Result<ChannelPage, ApiError> {
        self.get_json(&self.paginated("channels", options)).await
    }

    /// Accessor for a user, by numeric id or slug.
    pub fn user(&self, id: impl std::fmt::Display) -> UserApi<'_, T, C> {
        UserApi::new(self, id.to_string())
    }

    pub fn group(&self, slug: impl Into<String>) -> GroupApi<'_, T, C> {
        GroupApi::new(self, slug.into())
    }

    pub fn channel(&self, slug: impl Into<String>) -> ChannelApi<'_, T, C> {
        ChannelApi::new(self, slug.into())
    }

    pub fn block(&self, id: u64) -> BlockApi<'_, T, C> {
        BlockApi::new(self, id)
    }

    pub fn search(&self) -> SearchApi<'_, T, C> {
        SearchApi::new(self)
    }
}

impl<T, C> std::fmt::Debug for ArenaClient<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArenaClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &!self.authorization.is_empty())
            .finish_non_exhaustive()
    }
}

/// Map non-2xx responses to `ApiError::Http`.
pub fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    warn!(
        status = response.status,
        status_text = %response.status_text,
        "request rejected"
    );
    Err(ApiError::Http {
        status: response.status,
        message: response.status_text.clone(),
    })
}

pub fn parse_json<R: DeserializeOwned>(response: HttpResponse) -> Result<R, ApiError> {
    serde_json::from_str(&response.body).map_err(ApiError::Deserialization)
}
