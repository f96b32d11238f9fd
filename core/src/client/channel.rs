//! Channel accessor and its nested connect/disconnect bundles.
//!
//! # Design
//! The slug is percent-encoded once into the channel path; `create` still
//! sends the raw slug as the new channel's title. Every verb resolves its
//! endpoint and body up front, so the returned future borrows only the
//! client and never the bundle that produced it.

use std::future::Future;

use tracing::debug;

use crate::clock::Clock;
use crate::error::ApiError;
use crate::http::Transport;
use crate::query::{path_segment, Pagination};
use crate::types::{
    Block, Channel, ChannelContents, ChannelItem, ChannelStatus, ConnectableType, Connected,
    CreateBlock, CreateChannel, CreateConnection, SortChannel, UpdateChannel,
};

use super::ArenaClient;

/// Operations on one channel, addressed by slug.
#[derive(Debug)]
pub struct ChannelApi<'a, T, C> {
    client: &'a ArenaClient<T, C>,
    slug: String,
    path: String,
}

impl<'a, T: Transport, C: Clock> ChannelApi<'a, T, C> {
    pub(super) fn new(client: &'a ArenaClient<T, C>, slug: String) -> Self {
        let path = format!("channels/{}", path_segment(&slug));
        Self { client, slug, path }
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Channel detail with one page of contents.
    pub fn get(
        &self,
        options: Option<&Pagination>,
    ) -> impl Future<Output = Result<Channel, ApiError>> + 'a {
        let client = self.client;
        let endpoint = client.paginated(&self.path, options);
        async move { client.get_json(&endpoint).await }
    }

    /// Create a channel titled with this accessor's slug.
    pub fn create(
        &self,
        status: Option<ChannelStatus>,
    ) -> impl Future<Output = Result<Channel, ApiError>> + 'a {
        let client = self.client;
        let body = CreateChannel {
            title: self.slug.clone(),
            status,
        };
        async move { client.post_json("channels", &body).await }
    }

    pub fn update(&self, data: &UpdateChannel) -> impl Future<Output = Result<(), ApiError>> + 'a {
        let client = self.client;
        let path = self.path.clone();
        let data = data.clone();
        async move { client.put(&path, &data).await }
    }

    pub fn delete(&self) -> impl Future<Output = Result<(), ApiError>> + 'a {
        let client = self.client;
        let path = self.path.clone();
        async move { client.delete(&path).await }
    }

    /// Lightweight summary with a short preview of the contents.
    pub fn thumb(&self) -> impl Future<Output = Result<Channel, ApiError>> + 'a {
        let client = self.client;
        let endpoint = format!("{}/thumb", self.path);
        async move { client.get_json(&endpoint).await }
    }

    pub fn contents(
        &self,
        options: Option<&Pagination>,
    ) -> impl Future<Output = Result<ChannelContents, ApiError>> + 'a {
        let client = self.client;
        let endpoint = client.paginated(&format!("{}/contents", self.path), options);
        async move { client.get_json(&endpoint).await }
    }

    /// Create a block and connect it to this channel in one request.
    pub fn create_block(
        &self,
        data: &CreateBlock,
    ) -> impl Future<Output = Result<Connected<Block>, ApiError>> + 'a {
        let client = self.client;
        let endpoint = format!("{}/blocks", self.path);
        let data = data.clone();
        async move { client.post_json(&endpoint, &data).await }
    }

    pub fn connections(
        &self,
        options: Option<&Pagination>,
    ) -> impl Future<Output = Result<Vec<ChannelItem>, ApiError>> + 'a {
        let client = self.client;
        let endpoint = client.paginated(&format!("{}/connections", self.path), options);
        async move { client.get_json(&endpoint).await }
    }

    /// Reorder blocks; `ids` lists them in their new order.
    pub fn sort(&self, ids: Vec<u64>) -> impl Future<Output = Result<(), ApiError>> + 'a {
        let client = self.client;
        let endpoint = format!("{}/sort", self.path);
        async move { client.put(&endpoint, &SortChannel { ids }).await }
    }

    pub fn connect(&self) -> ConnectApi<'a, T, C> {
        ConnectApi {
            client: self.client,
            path: format!("{}/connections", self.path),
        }
    }

    pub fn disconnect(&self) -> DisconnectApi<'a, T, C> {
        DisconnectApi {
            client: self.client,
            slug: self.slug.clone(),
            path: self.path.clone(),
        }
    }
}

/// Link existing blocks or channels into a channel.
#[derive(Debug)]
pub struct ConnectApi<'a, T, C> {
    client: &'a ArenaClient<T, C>,
    path: String,
}

impl<'a, T: Transport, C: Clock> ConnectApi<'a, T, C> {
    pub fn block(&self, id: u64) -> impl Future<Output = Result<Connected<Block>, ApiError>> + 'a {
        let client = self.client;
        let path = self.path.clone();
        let body = CreateConnection {
            connectable_type: ConnectableType::Block,
            connectable_id: id,
        };
        async move { client.post_json(&path, &body).await }
    }

    pub fn channel(
        &self,
        id: u64,
    ) -> impl Future<Output = Result<Connected<Channel>, ApiError>> + 'a {
        let client = self.client;
        let path = self.path.clone();
        let body = CreateConnection {
            connectable_type: ConnectableType::Channel,
            connectable_id: id,
        };
        async move { client.post_json(&path, &body).await }
    }
}

/// Remove links from a channel.
#[derive(Debug)]
pub struct DisconnectApi<'a, T, C> {
    client: &'a ArenaClient<T, C>,
    slug: String,
    path: String,
}

impl<'a, T: Transport, C: Clock> DisconnectApi<'a, T, C> {
    pub fn block(&self, id: u64) -> impl Future<Output = Result<(), ApiError>> + 'a {
        let client = self.client;
        let endpoint = format!("{}/blocks/{id}", self.path);
        async move { client.delete(&endpoint).await }
    }

    /// Always fails with `ApiError::NotImplemented`; nothing is sent.
    pub fn channel(&self, id: u64) -> impl Future<Output = Result<(), ApiError>> + 'a {
        let slug = self.slug.clone();
        async move {
            debug!(%slug, id, "refusing to disconnect a channel");
            Err(ApiError::NotImplemented("disconnecting a channel"))
        }
    }
}
